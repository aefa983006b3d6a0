//! Named text styles and the fonts they are set in.

use crate::font::{Font, StandardFont};
use crate::layout::width_of_text;
use crate::page::SpanFont;
use crate::units::Pt;
use crate::{LetterheadError, Result};
use id_arena::{Arena, Id};
use std::collections::HashMap;

/// Line height of styles that don't specify one
pub const DEFAULT_LINE_HEIGHT: Pt = Pt(13.0);

/// A font at a size, with the distance between consecutive baselines
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Style {
    pub font: Id<Font>,
    pub size: Pt,
    pub line_height: Pt,
}

impl Style {
    pub fn span_font(&self) -> SpanFont {
        SpanFont {
            id: self.font,
            size: self.size,
        }
    }
}

/// All fonts and named styles available to documents.
///
/// A registry is set up once and then shared by reference between any number of
/// compilations, which only ever read from it. Styles can be added and redefined while
/// the registry is being set up, but never removed, so the built-in styles are always
/// there:
///
/// | name           | font           | size |
/// |----------------|----------------|------|
/// | `display`      | Helvetica      | 24   |
/// | `display-bold` | Helvetica-Bold | 24   |
/// | `body`         | Helvetica      | 10   |
/// | `body-bold`    | Helvetica-Bold | 10   |
/// | `caption`      | Helvetica      | 7    |
#[derive(Debug)]
pub struct StyleRegistry {
    fonts: Arena<Font>,
    styles: HashMap<String, Style>,
    regular: Id<Font>,
    bold: Id<Font>,
}

impl Default for StyleRegistry {
    fn default() -> Self {
        StyleRegistry::new()
    }
}

impl StyleRegistry {
    pub const DISPLAY: &'static str = "display";
    pub const DISPLAY_BOLD: &'static str = "display-bold";
    pub const BODY: &'static str = "body";
    pub const BODY_BOLD: &'static str = "body-bold";
    pub const CAPTION: &'static str = "caption";

    pub fn new() -> StyleRegistry {
        let mut fonts = Arena::new();
        let regular = fonts.alloc(Font::from(StandardFont::Helvetica));
        let bold = fonts.alloc(Font::from(StandardFont::HelveticaBold));

        let mut registry = StyleRegistry {
            fonts,
            styles: HashMap::new(),
            regular,
            bold,
        };
        registry
            .define(Self::DISPLAY, regular, Pt(24.0))
            .define(Self::DISPLAY_BOLD, bold, Pt(24.0))
            .define(Self::BODY, regular, Pt(10.0))
            .define(Self::BODY_BOLD, bold, Pt(10.0))
            .define(Self::CAPTION, regular, Pt(7.0));
        registry
    }

    /// Add a font, returning the id styles refer to it by
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        log::debug!("Registering font {}", font.name());
        self.fonts.alloc(font)
    }

    /// Helvetica
    pub fn regular_font(&self) -> Id<Font> {
        self.regular
    }

    /// Helvetica-Bold
    pub fn bold_font(&self) -> Id<Font> {
        self.bold
    }

    pub fn fonts(&self) -> &Arena<Font> {
        &self.fonts
    }

    pub fn font(&self, id: Id<Font>) -> Option<&Font> {
        self.fonts.get(id)
    }

    /// Register a style with the default line height, replacing any style of the same name
    pub fn define<S: Into<String>>(&mut self, name: S, font: Id<Font>, size: Pt) -> &mut Self {
        self.define_with_line_height(name, font, size, DEFAULT_LINE_HEIGHT)
    }

    pub fn define_with_line_height<S: Into<String>>(
        &mut self,
        name: S,
        font: Id<Font>,
        size: Pt,
        line_height: Pt,
    ) -> &mut Self {
        self.styles.insert(
            name.into(),
            Style {
                font,
                size,
                line_height,
            },
        );
        self
    }

    /// Look up a style by name
    pub fn get(&self, name: &str) -> Result<&Style> {
        self.styles
            .get(name)
            .ok_or_else(|| LetterheadError::UnknownStyle(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Width of `text` set in `style`. Fonts this registry doesn't know measure as zero.
    pub fn width_of(&self, text: &str, style: &Style) -> Pt {
        match self.fonts.get(style.font) {
            Some(font) => width_of_text(text, font, style.size),
            None => Pt::ZERO,
        }
    }
}
