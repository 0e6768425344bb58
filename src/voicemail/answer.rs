use super::say;
use crate::CONFIG;
use axum::{extract::Request, response::IntoResponse, Extension};
use twilio::{
    twiml::{Method, Record, Twiml},
    CallEvent, Client as TwilioClient,
};

pub async fn answer_handler(twilio: Extension<TwilioClient>, request: Request) -> impl IntoResponse {
    twilio
        .respond_to_webhook(request, |call: CallEvent| {
            log::info!(
                "Answering call {} from {}",
                call.sid.as_deref().unwrap_or("<unknown>"),
                call.from.as_deref().unwrap_or("<unknown>")
            );

            generate_answer_twiml()
        })
        .await
}

/// Generate the TwiML for an incoming call.
/// 1. Ask the caller to leave a message
/// 2. Record until the finish key is pressed, then post to the end call route
pub fn generate_answer_twiml() -> Twiml {
    let mut twiml = Twiml::new();

    twiml.add(&say(CONFIG.voice.greeting));

    twiml.add(&Record {
        action: Some(CONFIG.recording.end_call_path.to_owned()),
        method: Method::Post,
        finish_on_key: CONFIG.recording.finish_on_key.to_owned(),
        timeout_seconds: CONFIG.recording.timeout as u32,
        max_length_seconds: CONFIG.recording.max_length as u32,
        play_beep: CONFIG.recording.play_beep,
        ..Default::default()
    });

    twiml
}
