//! Template Formatting
//!
//! Renders raw template documents as display text.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::catalog::RawTemplate;

/// Pretty-printer capability injected into the session
pub trait TemplateFormatter: Send + Sync {
    /// Render a raw template document as display text
    fn format(&self, raw: &RawTemplate) -> String;
}

/// JSON pretty-printer with a configurable indentation width
#[derive(Debug, Clone)]
pub struct JsonFormatter {
    indent: String,
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new(2)
    }
}

impl JsonFormatter {
    pub fn new(indent_width: usize) -> Self {
        Self {
            indent: " ".repeat(indent_width),
        }
    }
}

impl TemplateFormatter for JsonFormatter {
    fn format(&self, raw: &RawTemplate) -> String {
        let mut out = Vec::new();
        let formatter = PrettyFormatter::with_indent(self.indent.as_bytes());
        let mut serializer = Serializer::with_formatter(&mut out, formatter);

        // Serializing a Value into a Vec cannot fail in practice; fall back
        // to the compact form rather than propagate.
        if raw.serialize(&mut serializer).is_err() {
            return raw.to_string();
        }
        String::from_utf8(out).unwrap_or_else(|_| raw.to_string())
    }
}
