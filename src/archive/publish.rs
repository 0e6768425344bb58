use crate::{error::ArchiveError, secrets::Secrets, CONFIG};
use async_trait::async_trait;
use aws_config::Region;
use aws_credential_types::Credentials;
use aws_sdk_s3::{error::DisplayErrorContext, primitives::ByteStream, Client as S3Client};
use std::path::Path;

/// Destination for archived files.
#[async_trait]
pub trait ObjectUploader: Send + Sync {
    /// Stores the file at `path` under `key`, replacing any existing object.
    async fn put_object(&self, key: &str, path: &Path) -> Result<(), ArchiveError>;
}

/// Uploads to an S3 bucket, or any S3-compatible store when an endpoint
/// url is configured.
#[derive(Clone)]
pub struct S3Uploader {
    client: S3Client,
    bucket: String,
}

impl S3Uploader {
    pub async fn new(secrets: &Secrets) -> Self {
        // "None" is in place of a session token
        let creds = Credentials::new(
            secrets.aws_access_key_id.clone(),
            secrets.aws_secret_access_key.clone(),
            None,
            None,
            "voicemail",
        );

        let region = secrets
            .aws_region
            .clone()
            .unwrap_or_else(|| CONFIG.storage.region.to_owned());

        let mut loader = aws_config::from_env()
            .region(Region::new(region))
            .credentials_provider(creds);
        if let Some(ref endpoint) = secrets.aws_endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let cfg = loader.load().await;

        Self {
            client: S3Client::new(&cfg),
            bucket: secrets.aws_bucket_name.clone(),
        }
    }
}

#[async_trait]
impl ObjectUploader for S3Uploader {
    async fn put_object(&self, key: &str, path: &Path) -> Result<(), ArchiveError> {
        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| ArchiveError::Upload {
                key: key.to_owned(),
                message: e.to_string(),
            })?;

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(body)
            .content_type(CONFIG.storage.content_type)
            .send()
            .await
            .map_err(|e| ArchiveError::Upload {
                key: key.to_owned(),
                message: DisplayErrorContext(e).to_string(),
            })?;

        Ok(())
    }
}

/// Object key for a local file: its base name.
pub fn object_key(path: &Path) -> Result<String, ArchiveError> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| ArchiveError::InvalidPath(path.to_path_buf()))
}

/// Uploads the file at `path` under its base name and returns the key.
pub async fn publish(uploader: &dyn ObjectUploader, path: &Path) -> Result<String, ArchiveError> {
    let key = object_key(path)?;

    log::info!("Uploading {} as {key}", path.display());
    uploader.put_object(&key, path).await?;

    Ok(key)
}
