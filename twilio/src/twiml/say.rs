use super::{escape_xml, format_xml_string, Action};

#[derive(Debug, Clone)]
pub enum Voice {
    Man,
    Woman,
    Custom(String),
}

/// Reads `txt` to the caller with a text-to-speech voice.
#[derive(Debug, Clone)]
pub struct Say {
    pub txt: String,
    pub voice: Voice,
    pub language: String,
}

impl Action for Say {
    fn as_twiml(&self) -> String {
        let voice_str = match self.voice {
            Voice::Man => "man",
            Voice::Woman => "woman",
            Voice::Custom(ref s) => s.as_ref(),
        };
        format_xml_string(
            "Say",
            &[("voice", voice_str), ("language", &self.language)],
            &escape_xml(&self.txt),
        )
    }
}
