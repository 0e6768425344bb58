use crate::{Client, TwilioError};
use reqwest::Method;
use serde::Deserialize;

/// A recording as listed by the REST API.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordingResource {
    pub sid: String,
    pub call_sid: String,
    /// Metadata URI relative to the API host, ending in `.json`.
    pub uri: String,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RecordingPage {
    pub recordings: Vec<RecordingResource>,
}

/// Turns a recording's metadata URI into the URL of its mp3 media.
///
/// `/2010-04-01/Accounts/AC1/Recordings/RE1.json` becomes
/// `{api_host}/2010-04-01/Accounts/AC1/Recordings/RE1.mp3`.
pub fn media_url(api_host: &str, uri: &str) -> String {
    let resource = uri.strip_suffix(".json").unwrap_or(uri);
    format!("{}{}.mp3", api_host.trim_end_matches('/'), resource)
}

impl Client {
    /// Lists the account's recordings, newest first as returned by Twilio.
    /// With `call_sid` only the recordings of that call are listed.
    pub async fn list_recordings(
        &self,
        page_size: u32,
        call_sid: Option<&str>,
    ) -> Result<Vec<RecordingResource>, TwilioError> {
        let page_size = page_size.to_string();
        let mut params = vec![("PageSize", page_size.as_str())];
        if let Some(sid) = call_sid {
            params.push(("CallSid", sid));
        }

        let page: RecordingPage = self
            .send_request(Method::GET, "Recordings", &params)
            .await?;

        Ok(page.recordings)
    }

    pub fn recording_media_url(&self, recording: &RecordingResource) -> String {
        media_url(&self.api_host, &recording.uri)
    }
}
