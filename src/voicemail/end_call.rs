use super::say;
use crate::{
    archive::{archive_voicemail, Archiver},
    CONFIG,
};
use axum::{extract::Request, response::IntoResponse, Extension};
use std::sync::Arc;
use twilio::{
    twiml::{Hangup, Twiml},
    Client as TwilioClient, RecordingEvent,
};

pub async fn end_call_handler(
    twilio: Extension<TwilioClient>,
    archiver: Extension<Arc<Archiver>>,
    request: Request,
) -> impl IntoResponse {
    twilio
        .respond_to_webhook(request, |recording: RecordingEvent| {
            log::info!(
                "Voicemail recorded for call {} ({}s)",
                recording.call_sid.as_deref().unwrap_or("<unknown>"),
                recording
                    .duration_seconds
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "?".to_owned())
            );

            // The hangup is returned without waiting for archival
            tokio::spawn(archive_voicemail(archiver.0.clone(), recording.call_sid));

            generate_end_call_twiml()
        })
        .await
}

/// Generate the TwiML for the end of the call: thank the caller and hang up.
pub fn generate_end_call_twiml() -> Twiml {
    let mut twiml = Twiml::new();

    twiml.add(&say(CONFIG.voice.farewell));
    twiml.add(&Hangup);

    twiml
}
