use crate::{error::ArchiveError, CONFIG};
use async_trait::async_trait;
use twilio::{Client as TwilioClient, RecordingResource};

/// Source of recording metadata.
#[async_trait]
pub trait RecordingLister: Send + Sync {
    /// Recordings newest first, only those of `call_sid` when given.
    async fn list_recordings(
        &self,
        call_sid: Option<&str>,
    ) -> Result<Vec<RecordingResource>, ArchiveError>;

    /// URL of the recording's audio media.
    fn media_url(&self, recording: &RecordingResource) -> String;
}

#[async_trait]
impl RecordingLister for TwilioClient {
    async fn list_recordings(
        &self,
        call_sid: Option<&str>,
    ) -> Result<Vec<RecordingResource>, ArchiveError> {
        let page_size = CONFIG.recording.page_size as u32;
        Ok(TwilioClient::list_recordings(self, page_size, call_sid).await?)
    }

    fn media_url(&self, recording: &RecordingResource) -> String {
        self.recording_media_url(recording)
    }
}
