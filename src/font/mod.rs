//! Fonts and the glyph metrics that text measurement is built on.
//!
//! A [Font] is either one of the standard PDF faces (Helvetica and Helvetica-Bold, measured
//! from built-in AFM width tables and never embedded) or a TrueType / OpenType face that
//! gets embedded in its entirety.
//!
//! Both kinds map characters to an internal code first (a WinAnsi byte for standard faces,
//! a glyph id for embedded faces) and measure that code. Characters without a code have no
//! width and are not drawn.

mod embedded;
mod standard;

pub use embedded::EmbeddedFont;
pub use standard::StandardFont;

use crate::refs::ObjectReferences;
use crate::Result;
use pdf_writer::Pdf;

/// Glyph metrics as needed for measuring text.
pub trait FontMetrics {
    /// Number of font units in one em
    fn units_per_em(&self) -> u16;

    /// Map a character into the font's internal encoding. Returns [None] for characters
    /// the font has no glyph for.
    fn encode(&self, ch: char) -> Option<u16>;

    /// The horizontal advance of an encoded character, in font units
    fn advance(&self, code: u16) -> Option<u16>;
}

/// A font that styles can refer to. Fonts live in the [StyleRegistry](crate::StyleRegistry)
/// and are referred to everywhere else by their [id_arena::Id].
#[derive(Debug)]
pub enum Font {
    Standard(StandardFont),
    Embedded(EmbeddedFont),
}

impl Font {
    /// Load a TrueType / OpenType font from raw bytes, returning an error if the font
    /// could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font> {
        Ok(Font::Embedded(EmbeddedFont::load(bytes)?))
    }

    /// Load a TrueType / OpenType font from disk
    pub fn load_from_disk<P: AsRef<std::path::Path>>(path: P) -> Result<Font> {
        Font::load(std::fs::read(path)?)
    }

    /// The PostScript-ish name the font is known by
    pub fn name(&self) -> String {
        match self {
            Font::Standard(font) => font.base_font().to_string(),
            Font::Embedded(font) => font.name(),
        }
    }

    /// The encoded codes of all characters in `text` that the font can draw, in order
    pub fn encode_str(&self, text: &str) -> Vec<u16> {
        text.chars().filter_map(|ch| self.encode(ch)).collect()
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        match self {
            Font::Standard(font) => font.write(refs, font_index, writer),
            Font::Embedded(font) => font.write(refs, font_index, writer),
        }
    }
}

impl From<StandardFont> for Font {
    fn from(font: StandardFont) -> Self {
        Font::Standard(font)
    }
}

impl FontMetrics for Font {
    fn units_per_em(&self) -> u16 {
        match self {
            Font::Standard(font) => font.units_per_em(),
            Font::Embedded(font) => font.units_per_em(),
        }
    }

    fn encode(&self, ch: char) -> Option<u16> {
        match self {
            Font::Standard(font) => font.encode(ch),
            Font::Embedded(font) => font.encode(ch),
        }
    }

    fn advance(&self, code: u16) -> Option<u16> {
        match self {
            Font::Standard(font) => font.advance(code),
            Font::Embedded(font) => font.advance(code),
        }
    }
}
