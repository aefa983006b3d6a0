//! Per-document settings.

use crate::layout::Margins;
use crate::units::Pt;
use crate::{LetterheadError, Result};

/// Settings a document is compiled with. These don't change during compilation.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentConfig {
    /// Name of the layout the pages are cloned from
    pub layout: String,
    pub margins: Margins,
    /// The width alignment is computed against
    pub page_width: Pt,
    /// Encoding of the text handed in. Rust strings are always UTF-8, so that is the only
    /// one accepted.
    pub encoding: String,
    /// After each table row, a new page is started once the cursor is at or below this
    pub overflow_threshold: Pt,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        DocumentConfig {
            layout: "blank".to_string(),
            margins: Margins::letter(),
            page_width: Pt(595.0),
            encoding: "UTF-8".to_string(),
            overflow_threshold: Pt(250.0),
        }
    }
}

impl DocumentConfig {
    pub fn builder() -> DocumentConfigBuilder {
        DocumentConfigBuilder::default()
    }

    pub(crate) fn check_encoding(&self) -> Result<()> {
        let name = self.encoding.replace(['-', '_'], "");
        if name.eq_ignore_ascii_case("utf8") {
            Ok(())
        } else {
            Err(LetterheadError::InvalidArgument(format!(
                "unsupported text encoding `{}`, text must be UTF-8",
                self.encoding
            )))
        }
    }
}

/// A value handed to a generic `set(name, value)` call
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Length(Pt),
    Margins(Margins),
}

impl FieldValue {
    pub(crate) fn into_text(self, field: &str) -> Result<String> {
        match self {
            FieldValue::Text(text) => Ok(text),
            other => Err(mismatch(field, "text", &other)),
        }
    }

    pub(crate) fn into_length(self, field: &str) -> Result<Pt> {
        match self {
            FieldValue::Length(length) => Ok(length),
            other => Err(mismatch(field, "a length", &other)),
        }
    }
}

fn mismatch(field: &str, expected: &str, got: &FieldValue) -> LetterheadError {
    LetterheadError::InvalidArgument(format!("`{field}` takes {expected}, not {got:?}"))
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<Pt> for FieldValue {
    fn from(value: Pt) -> Self {
        FieldValue::Length(value)
    }
}

impl From<f32> for FieldValue {
    fn from(value: f32) -> Self {
        FieldValue::Length(Pt(value))
    }
}

impl From<Margins> for FieldValue {
    fn from(value: Margins) -> Self {
        FieldValue::Margins(value)
    }
}

#[derive(Debug, Default, Clone)]
pub struct DocumentConfigBuilder {
    config: DocumentConfig,
}

impl DocumentConfigBuilder {
    pub fn layout<S: Into<String>>(mut self, layout: S) -> Self {
        self.config.layout = layout.into();
        self
    }

    pub fn margins(mut self, margins: Margins) -> Self {
        self.config.margins = margins;
        self
    }

    pub fn page_width(mut self, page_width: Pt) -> Self {
        self.config.page_width = page_width;
        self
    }

    pub fn encoding<S: Into<String>>(mut self, encoding: S) -> Self {
        self.config.encoding = encoding.into();
        self
    }

    pub fn overflow_threshold(mut self, threshold: Pt) -> Self {
        self.config.overflow_threshold = threshold;
        self
    }

    /// Set a field by name, for callers that only know fields at runtime
    pub fn set<V: Into<FieldValue>>(self, name: &str, value: V) -> Result<Self> {
        let value = value.into();
        Ok(match name {
            "layout" => self.layout(value.into_text(name)?),
            "margins" => match value {
                FieldValue::Margins(margins) => self.margins(margins),
                other => return Err(mismatch(name, "margins", &other)),
            },
            "page_width" => self.page_width(value.into_length(name)?),
            "encoding" => self.encoding(value.into_text(name)?),
            "overflow_threshold" => self.overflow_threshold(value.into_length(name)?),
            _ => return Err(LetterheadError::UnknownField(name.to_string())),
        })
    }

    pub fn build(self) -> DocumentConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = DocumentConfig::default();
        assert_eq!(config.layout, "blank");
        assert_eq!(
            config.margins,
            Margins::trbl(Pt(100.0), Pt(55.0), Pt(100.0), Pt(80.0))
        );
        assert_eq!(config.page_width, Pt(595.0));
        assert_eq!(config.encoding, "UTF-8");
        assert_eq!(config.overflow_threshold, Pt(250.0));
    }

    #[test]
    fn sets_fields_by_name() {
        let config = DocumentConfig::builder()
            .set("layout", "shipment")
            .unwrap()
            .set("overflow_threshold", 300.0)
            .unwrap()
            .set("margins", Margins::all(Pt(50.0)))
            .unwrap()
            .build();
        assert_eq!(config.layout, "shipment");
        assert_eq!(config.overflow_threshold, Pt(300.0));
        assert_eq!(config.margins.left, Pt(50.0));
    }

    #[test]
    fn only_utf8_text_is_accepted() {
        for encoding in ["UTF-8", "utf8", "utf_8"] {
            let config = DocumentConfig::builder().encoding(encoding).build();
            assert!(config.check_encoding().is_ok(), "{encoding}");
        }
        let config = DocumentConfig::builder().encoding("ISO-8859-1").build();
        assert!(matches!(
            config.check_encoding(),
            Err(LetterheadError::InvalidArgument(message)) if message.contains("ISO-8859-1")
        ));
    }

    #[test]
    fn rejects_unknown_and_mistyped_fields() {
        assert!(matches!(
            DocumentConfig::builder().set("colour", "red"),
            Err(LetterheadError::UnknownField(name)) if name == "colour"
        ));
        assert!(matches!(
            DocumentConfig::builder().set("page_width", "wide"),
            Err(LetterheadError::InvalidArgument(_))
        ));
    }
}
