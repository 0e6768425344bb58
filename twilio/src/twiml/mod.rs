mod hangup;
mod record;
mod say;

pub use hangup::Hangup;
pub use record::Record;
pub use say::{Say, Voice};

/// A single TwiML verb.
pub trait Action {
    fn as_twiml(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub enum Method {
    Get,
    #[default]
    Post,
}

impl Method {
    fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// A `<Response>` document built from verbs in the order they are added.
#[derive(Debug, Default)]
pub struct Twiml {
    body: String,
}

impl Twiml {
    pub fn new() -> Twiml {
        Twiml::default()
    }

    pub fn add(&mut self, a: &dyn Action) -> &mut Twiml {
        self.body.push_str(&a.as_twiml());
        self
    }

    pub fn as_twiml(&self) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><Response>{}</Response>",
            self.body
        )
    }
}

fn escape_xml(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn format_xml_string(tag: &str, attributes: &[(&str, &str)], inner: &str) -> String {
    let attrs: String = attributes
        .iter()
        .map(|(k, v)| format!(" {}=\"{}\"", k, escape_xml(v)))
        .collect();

    if inner.is_empty() {
        format!("<{tag}{attrs}/>")
    } else {
        format!("<{tag}{attrs}>{inner}</{tag}>")
    }
}
