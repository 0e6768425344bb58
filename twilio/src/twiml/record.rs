use super::{format_xml_string, Action, Method};
use std::default::Default;

/// Records the caller's audio. Twilio requests `action` once recording
/// stops, either on `finish_on_key`, silence, or `max_length_seconds`.
#[derive(Debug, Clone)]
pub struct Record {
    pub action: Option<String>,
    pub method: Method,
    pub timeout_seconds: u32,
    pub finish_on_key: String,
    pub max_length_seconds: u32,
    pub play_beep: bool,
    pub trim_silence: bool,
    pub recording_status_callback: Option<String>,
}

impl Action for Record {
    fn as_twiml(&self) -> String {
        let timeout_string = self.timeout_seconds.to_string();
        let max_length_string = self.max_length_seconds.to_string();
        let mut attrs = Vec::new();
        if let Some(ref a) = self.action {
            attrs.push(("action", a.as_str()));
        }
        attrs.push(("method", self.method.as_str()));
        attrs.push(("timeout", timeout_string.as_ref()));
        attrs.push(("finishOnKey", self.finish_on_key.as_ref()));
        attrs.push(("maxLength", max_length_string.as_ref()));
        attrs.push(("playBeep", if self.play_beep { "true" } else { "false" }));
        attrs.push((
            "trim",
            if self.trim_silence {
                "trim-silence"
            } else {
                "do-not-trim"
            },
        ));
        if let Some(ref c) = self.recording_status_callback {
            attrs.push(("recordingStatusCallback", c.as_str()));
        }

        format_xml_string("Record", &attrs, "")
    }
}

impl Default for Record {
    fn default() -> Record {
        Record {
            action: None,
            method: Method::Post,
            timeout_seconds: 5,
            finish_on_key: "1234567890*#".to_owned(),
            max_length_seconds: 3600,
            play_beep: true,
            trim_silence: true,
            recording_status_callback: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voicemail_record_attributes() {
        let twiml = Record {
            action: Some("/end_call".to_owned()),
            finish_on_key: "*".to_owned(),
            ..Default::default()
        }
        .as_twiml();

        assert_eq!(
            twiml,
            "<Record action=\"/end_call\" method=\"POST\" timeout=\"5\" finishOnKey=\"*\" \
             maxLength=\"3600\" playBeep=\"true\" trim=\"trim-silence\"/>"
        );
    }

    #[test]
    fn status_callback_is_optional() {
        let twiml = Record {
            recording_status_callback: Some("https://example.com/status".to_owned()),
            ..Default::default()
        }
        .as_twiml();

        assert!(!twiml.contains("action="));
        assert!(twiml.contains("recordingStatusCallback=\"https://example.com/status\""));
    }
}
