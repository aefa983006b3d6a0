use crate::font::FontMetrics;
use crate::layout::Margins;
use crate::units::Pt;
use crate::LetterheadError;
use std::str::FromStr;

/// Calculates the width of a string of text in a given font and size. Characters the font
/// cannot encode contribute nothing.
pub fn width_of_text<F: FontMetrics + ?Sized>(text: &str, font: &F, size: Pt) -> Pt {
    let units: u32 = text
        .chars()
        .filter_map(|ch| font.encode(ch))
        .map(|code| font.advance(code).unwrap_or_default() as u32)
        .sum();
    Pt(units as f32 / font.units_per_em() as f32 * *size)
}

/// Turn `\r\n` and lone `\r` into `\n`
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Greedily break `text` into lines no wider than `max_width`, splitting on single spaces.
///
/// Text that fits is returned as a single line. Otherwise each word is appended to the
/// current line while `"{line} {word}"` still fits; when it doesn't, the current line is
/// emitted and the word starts the next one. A word wider than `max_width` on its own
/// ends up alone on its line.
///
/// The separating space is measured for the first word too. A first word that only fits
/// without it leaves an empty first line behind, which takes up a line when drawn.
pub fn wrap_text<M>(text: &str, max_width: Pt, measure: M) -> Vec<String>
where
    M: Fn(&str) -> Pt,
{
    if measure(text) <= max_width {
        return vec![text.to_string()];
    }

    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    for word in text.split(' ') {
        if measure(&format!("{line} {word}")) <= max_width {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(word);
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        }
    }
    lines.push(line);

    lines
}

/// Horizontal text alignment
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum Align {
    #[default]
    Left,
    Right,
    Center,
    /// Left aligned, shifted right by the given amount
    Offset(Pt),
}

impl FromStr for Align {
    type Err = LetterheadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Align::Left),
            "right" => Ok(Align::Right),
            "center" => Ok(Align::Center),
            _ => Err(LetterheadError::InvalidAlignment(s.to_string())),
        }
    }
}

/// Where and how wide text is drawn. Everything unset falls back to the page: the width
/// to the space the alignment works in, `offset_y` to the current cursor.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct TextOptions {
    pub width: Option<Pt>,
    pub offset_x: Pt,
    pub offset_y: Option<Pt>,
}

impl TextOptions {
    pub fn width(mut self, width: Pt) -> Self {
        self.width = Some(width);
        self
    }

    pub fn offset_x(mut self, offset_x: Pt) -> Self {
        self.offset_x = offset_x;
        self
    }

    pub fn offset_y(mut self, offset_y: Pt) -> Self {
        self.offset_y = Some(offset_y);
        self
    }
}

/// The outcome of resolving an alignment: where lines start, and how wide they may wrap
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Placement {
    pub x: Pt,
    pub width: Pt,
}

/// Work out where a line of text starts.
///
/// * left: `margin.left + offset_x`, within `page_width - margin.left - margin.right` by default
/// * right: `width - text_width - margin.right + offset_x`, within `page_width` by default
/// * center: `(width - text_width + offset_x) / 2`, within `page_width` by default
///
/// `measure` is only called for right and center alignment.
pub fn resolve_alignment<M>(
    text: &str,
    measure: M,
    align: Align,
    margins: &Margins,
    page_width: Pt,
    options: &TextOptions,
) -> Placement
where
    M: FnOnce(&str) -> Pt,
{
    match align {
        Align::Left | Align::Offset(_) => {
            let shift = match align {
                Align::Offset(shift) => shift,
                _ => Pt::ZERO,
            };
            Placement {
                x: margins.left + options.offset_x + shift,
                width: options
                    .width
                    .unwrap_or_else(|| margins.content_width(page_width)),
            }
        }
        Align::Right => {
            let width = options.width.unwrap_or(page_width);
            Placement {
                x: width - measure(text) - margins.right + options.offset_x,
                width,
            }
        }
        Align::Center => {
            let width = options.width.unwrap_or(page_width);
            Placement {
                x: (width - measure(text) + options.offset_x) / 2.0,
                width,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::StandardFont;

    fn monospace(s: &str) -> Pt {
        Pt(5.0 * s.chars().count() as f32)
    }

    #[test]
    fn measures_helvetica() {
        // 'W' 944 + 'i' 222
        let width = width_of_text("Wi", &StandardFont::Helvetica, Pt(10.0));
        assert!((width.0 - 11.66).abs() < 1e-4);
        assert_eq!(width_of_text("", &StandardFont::Helvetica, Pt(10.0)), Pt::ZERO);
    }

    #[test]
    fn text_that_fits_is_one_line() {
        assert_eq!(wrap_text("short", Pt(100.0), monospace), vec!["short"]);
        assert_eq!(wrap_text("", Pt(100.0), monospace), vec![""]);
    }

    #[test]
    fn wraps_greedily() {
        let lines = wrap_text(
            "the quick brown fox jumps over the lazy dog",
            Pt(80.0),
            monospace,
        );
        assert_eq!(lines, vec!["the quick brown", "fox jumps over", "the lazy dog"]);
        for line in &lines {
            assert!(monospace(line) <= Pt(80.0));
        }
        assert_eq!(lines.join(" "), "the quick brown fox jumps over the lazy dog");
    }

    #[test]
    fn over_wide_words_stand_alone() {
        let lines = wrap_text("aa incomprehensibilities bb", Pt(30.0), monospace);
        assert_eq!(lines, vec!["aa", "incomprehensibilities", "bb"]);

        let lines = wrap_text("incomprehensibilities bb", Pt(30.0), monospace);
        assert_eq!(lines, vec!["", "incomprehensibilities", "bb"]);
    }

    #[test]
    fn first_words_are_measured_with_a_space() {
        // " abcdef" is 35pt, so the first line stays empty
        let lines = wrap_text("abcdef gh", Pt(30.0), monospace);
        assert_eq!(lines, vec!["", "abcdef", "gh"]);

        let lines = wrap_text("abcde gh", Pt(30.0), monospace);
        assert_eq!(lines, vec!["abcde", "gh"]);
    }

    #[test]
    fn adjacent_lines_would_not_fit_joined() {
        let text = "the quick brown fox jumps over the lazy dog while five boxing wizards jump";
        for max in [40.0, 55.0, 80.0, 120.0, 200.0] {
            let max = Pt(max);
            let lines = wrap_text(text, max, monospace);
            assert!(lines.len() > 1, "{max}");
            for line in &lines {
                assert!(monospace(line) <= max, "`{line}` is wider than {max}");
            }
            for pair in lines.windows(2) {
                let joined = format!("{} {}", pair[0], pair[1]);
                assert!(monospace(&joined) > max, "`{joined}` fits in {max}");
            }
            assert_eq!(lines.join(" "), text);
        }
    }

    #[test]
    fn parses_alignments() {
        assert_eq!("left".parse::<Align>().unwrap(), Align::Left);
        assert_eq!("right".parse::<Align>().unwrap(), Align::Right);
        assert_eq!("center".parse::<Align>().unwrap(), Align::Center);
        assert!(matches!(
            "justify".parse::<Align>(),
            Err(LetterheadError::InvalidAlignment(name)) if name == "justify"
        ));
    }

    #[test]
    fn left_alignment_starts_at_the_margin() {
        let margins = Margins::letter();
        let placement = resolve_alignment(
            "x",
            |_| panic!("left alignment never measures"),
            Align::Left,
            &margins,
            Pt(595.0),
            &TextOptions::default(),
        );
        assert_eq!(placement, Placement { x: Pt(80.0), width: Pt(460.0) });

        let placement = resolve_alignment(
            "x",
            monospace,
            Align::Offset(Pt(20.0)),
            &margins,
            Pt(595.0),
            &TextOptions::default().offset_x(Pt(300.0)).width(Pt(100.0)),
        );
        assert_eq!(placement, Placement { x: Pt(400.0), width: Pt(100.0) });
    }

    #[test]
    fn right_alignment_hugs_the_right_margin() {
        let margins = Margins::letter();
        let placement = resolve_alignment(
            "TOTAL",
            |_| Pt(40.0),
            Align::Right,
            &margins,
            Pt(595.0),
            &TextOptions::default().width(Pt(100.0)).offset_x(Pt(500.0)),
        );
        assert_eq!(placement.x, Pt(505.0));

        let placement = resolve_alignment(
            "date",
            |_| Pt(60.0),
            Align::Right,
            &margins,
            Pt(595.0),
            &TextOptions::default(),
        );
        assert_eq!(placement, Placement { x: Pt(480.0), width: Pt(595.0) });
    }

    #[test]
    fn center_alignment_splits_the_difference() {
        let placement = resolve_alignment(
            "centred",
            |_| Pt(95.0),
            Align::Center,
            &Margins::letter(),
            Pt(595.0),
            &TextOptions::default(),
        );
        assert_eq!(placement.x, Pt(250.0));
    }

    #[test]
    fn normalizes_newlines() {
        assert_eq!(normalize_newlines("a\r\nb\rc\nd"), "a\nb\nc\nd");
    }
}
