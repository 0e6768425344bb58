use crate::{FromMap, TwilioError};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallStatus {
    Queued,
    Ringing,
    InProgress,
    Canceled,
    Completed,
    Failed,
    Busy,
    NoAnswer,
}

impl CallStatus {
    fn parse(s: &str) -> Option<CallStatus> {
        match s {
            "queued" => Some(CallStatus::Queued),
            "ringing" => Some(CallStatus::Ringing),
            "in-progress" => Some(CallStatus::InProgress),
            "canceled" => Some(CallStatus::Canceled),
            "completed" => Some(CallStatus::Completed),
            "failed" => Some(CallStatus::Failed),
            "busy" => Some(CallStatus::Busy),
            "no-answer" => Some(CallStatus::NoAnswer),
            _ => None,
        }
    }
}

/// Inbound call webhook. Every field is optional since the payload is
/// accepted as-is.
#[derive(Debug, Clone, Default)]
pub struct CallEvent {
    pub sid: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub status: Option<CallStatus>,
}

/// Payload of the `<Record action>` callback, sent once recording stops.
#[derive(Debug, Clone, Default)]
pub struct RecordingEvent {
    pub call_sid: Option<String>,
    pub recording_sid: Option<String>,
    pub recording_url: Option<String>,
    pub duration_seconds: Option<u32>,
    pub digits: Option<String>,
}

impl FromMap for CallEvent {
    fn from_map(mut m: BTreeMap<String, String>) -> Result<CallEvent, TwilioError> {
        Ok(CallEvent {
            sid: m.remove("CallSid"),
            from: m.remove("From"),
            to: m.remove("To"),
            status: m.get("CallStatus").and_then(|s| CallStatus::parse(s)),
        })
    }
}

impl FromMap for RecordingEvent {
    fn from_map(mut m: BTreeMap<String, String>) -> Result<RecordingEvent, TwilioError> {
        Ok(RecordingEvent {
            call_sid: m.remove("CallSid"),
            recording_sid: m.remove("RecordingSid"),
            recording_url: m.remove("RecordingUrl"),
            duration_seconds: m.remove("RecordingDuration").and_then(|d| d.parse().ok()),
            digits: m.remove("Digits"),
        })
    }
}
