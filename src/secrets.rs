use anyhow::{Context, Result};
use std::env::var;

#[derive(Debug, Clone)]
pub struct Secrets {
    pub twilio_account_sid: String,
    pub twilio_auth_token: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub aws_bucket_name: String,
    pub aws_region: Option<String>,
    pub aws_endpoint_url: Option<String>,
}

impl Secrets {
    /// Reads credentials from the environment. Values are only checked for
    /// presence, never against the remote services.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            twilio_account_sid: required("TWILIO_ACCOUNT_SID")?,
            twilio_auth_token: required("TWILIO_AUTH_TOKEN")?,
            aws_access_key_id: required("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: required("AWS_SECRET_ACCESS_KEY")?,
            aws_bucket_name: required("AWS_BUCKET_NAME")?,
            aws_region: optional("AWS_REGION"),
            aws_endpoint_url: optional("AWS_ENDPOINT_URL"),
        })
    }
}

fn required(name: &str) -> Result<String> {
    var(name).with_context(|| format!("{name} must be set"))
}

fn optional(name: &str) -> Option<String> {
    var(name).ok().filter(|v| !v.is_empty())
}
