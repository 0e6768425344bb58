use super::{format_xml_string, Action};

#[derive(Debug, Default, Clone, Copy)]
pub struct Hangup;

impl Action for Hangup {
    fn as_twiml(&self) -> String {
        format_xml_string("Hangup", &[], "")
    }
}
