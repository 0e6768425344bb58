use crate::CONFIG;
use twilio::twiml::{Say, Voice};

pub mod answer;
pub mod end_call;

/// Say `txt` with the configured voice and language.
fn say(txt: &str) -> Say {
    Say {
        txt: txt.to_owned(),
        voice: Voice::Custom(CONFIG.voice.name.to_owned()),
        language: CONFIG.voice.language.to_owned(),
    }
}
