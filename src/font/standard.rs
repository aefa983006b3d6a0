use super::FontMetrics;
use crate::refs::{ObjectReferences, RefType};
use pdf_writer::{Name, Pdf};

/// One of the standard PDF faces. Viewers ship these, so they are referenced by name only.
/// Text in them is encoded as WinAnsi (Windows-1252), which covers Western European text.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum StandardFont {
    Helvetica,
    HelveticaBold,
}

impl StandardFont {
    /// The `/BaseFont` name of the face
    pub fn base_font(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    fn width(self, code: u8) -> Option<u16> {
        match (self, code) {
            (StandardFont::Helvetica, 0x20..=0x7e) => Some(HELVETICA_ASCII[(code - 0x20) as usize]),
            (StandardFont::HelveticaBold, 0x20..=0x7e) => {
                Some(HELVETICA_BOLD_ASCII[(code - 0x20) as usize])
            }
            (StandardFont::Helvetica, _) => helvetica_high(code),
            (StandardFont::HelveticaBold, _) => helvetica_bold_high(code),
        }
    }

    pub(crate) fn write(self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        let id = refs.gen(RefType::Font(font_index));
        writer
            .type1_font(id)
            .base_font(Name(self.base_font().as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
    }
}

impl FontMetrics for StandardFont {
    fn units_per_em(&self) -> u16 {
        1000
    }

    fn encode(&self, ch: char) -> Option<u16> {
        to_winansi(ch)
            .filter(|&code| self.width(code).is_some())
            .map(u16::from)
    }

    fn advance(&self, code: u16) -> Option<u16> {
        u8::try_from(code).ok().and_then(|code| self.width(code))
    }
}

/// Map a character to its Windows-1252 byte. Latin-1 maps straight through, the
/// 0x80..=0x9F block holds typographic punctuation and a handful of extra letters.
pub(crate) fn to_winansi(ch: char) -> Option<u8> {
    match ch as u32 {
        c @ (0x20..=0x7e | 0xa0..=0xff) => Some(c as u8),
        0x20ac => Some(0x80),
        0x201a => Some(0x82),
        0x0192 => Some(0x83),
        0x201e => Some(0x84),
        0x2026 => Some(0x85),
        0x2020 => Some(0x86),
        0x2021 => Some(0x87),
        0x02c6 => Some(0x88),
        0x2030 => Some(0x89),
        0x0160 => Some(0x8a),
        0x2039 => Some(0x8b),
        0x0152 => Some(0x8c),
        0x017d => Some(0x8e),
        0x2018 => Some(0x91),
        0x2019 => Some(0x92),
        0x201c => Some(0x93),
        0x201d => Some(0x94),
        0x2022 => Some(0x95),
        0x2013 => Some(0x96),
        0x2014 => Some(0x97),
        0x02dc => Some(0x98),
        0x2122 => Some(0x99),
        0x0161 => Some(0x9a),
        0x203a => Some(0x9b),
        0x0153 => Some(0x9c),
        0x017e => Some(0x9e),
        0x0178 => Some(0x9f),
        _ => None,
    }
}

// AFM advance widths for codes 0x20..=0x7E
#[rustfmt::skip]
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn helvetica_high(code: u8) -> Option<u16> {
    let width = match code {
        0x80 => 556,
        0x82 => 222,
        0x83 => 556,
        0x84 => 333,
        0x85 => 1000,
        0x86 | 0x87 => 556,
        0x88 => 333,
        0x89 => 1000,
        0x8a => 667,
        0x8b => 333,
        0x8c => 1000,
        0x8e => 611,
        0x91 | 0x92 => 222,
        0x93 | 0x94 => 333,
        0x95 => 350,
        0x96 => 556,
        0x97 => 1000,
        0x98 => 333,
        0x99 => 1000,
        0x9a => 500,
        0x9b => 333,
        0x9c => 944,
        0x9e => 500,
        0x9f => 667,
        0xa0 => 278,
        0xa1 => 333,
        0xa2..=0xa5 => 556,
        0xa6 => 260,
        0xa7 => 556,
        0xa8 => 333,
        0xa9 => 737,
        0xaa => 370,
        0xab => 556,
        0xac => 584,
        0xad => 333,
        0xae => 737,
        0xaf => 333,
        0xb0 => 400,
        0xb1 => 584,
        0xb2..=0xb4 => 333,
        0xb5 => 556,
        0xb6 => 537,
        0xb7 => 278,
        0xb8 | 0xb9 => 333,
        0xba => 365,
        0xbb => 556,
        0xbc..=0xbe => 834,
        0xbf => 611,
        0xc0..=0xc5 => 667,
        0xc6 => 1000,
        0xc7 => 722,
        0xc8..=0xcb => 667,
        0xcc..=0xcf => 278,
        0xd0 | 0xd1 => 722,
        0xd2..=0xd6 => 778,
        0xd7 => 584,
        0xd8 => 778,
        0xd9..=0xdc => 722,
        0xdd | 0xde => 667,
        0xdf => 611,
        0xe0..=0xe5 => 556,
        0xe6 => 889,
        0xe7 => 500,
        0xe8..=0xeb => 556,
        0xec..=0xef => 278,
        0xf0..=0xf6 => 556,
        0xf7 => 584,
        0xf8 => 611,
        0xf9..=0xfc => 556,
        0xfd => 500,
        0xfe => 556,
        0xff => 500,
        _ => return None,
    };
    Some(width)
}

fn helvetica_bold_high(code: u8) -> Option<u16> {
    let width = match code {
        0x80 => 556,
        0x82 => 278,
        0x83 => 556,
        0x84 => 500,
        0x85 => 1000,
        0x86 | 0x87 => 556,
        0x88 => 333,
        0x89 => 1000,
        0x8a => 667,
        0x8b => 333,
        0x8c => 1000,
        0x8e => 611,
        0x91 | 0x92 => 278,
        0x93 | 0x94 => 500,
        0x95 => 350,
        0x96 => 556,
        0x97 => 1000,
        0x98 => 333,
        0x99 => 1000,
        0x9a => 556,
        0x9b => 333,
        0x9c => 944,
        0x9e => 500,
        0x9f => 667,
        0xa0 => 278,
        0xa1 => 333,
        0xa2..=0xa5 => 556,
        0xa6 => 280,
        0xa7 => 556,
        0xa8 => 333,
        0xa9 => 737,
        0xaa => 370,
        0xab => 556,
        0xac => 584,
        0xad => 333,
        0xae => 737,
        0xaf => 333,
        0xb0 => 400,
        0xb1 => 584,
        0xb2..=0xb4 => 333,
        0xb5 => 611,
        0xb6 => 556,
        0xb7 => 278,
        0xb8 | 0xb9 => 333,
        0xba => 365,
        0xbb => 556,
        0xbc..=0xbe => 834,
        0xbf => 611,
        0xc0..=0xc5 => 722,
        0xc6 => 1000,
        0xc7 => 722,
        0xc8..=0xcb => 667,
        0xcc..=0xcf => 278,
        0xd0 | 0xd1 => 722,
        0xd2..=0xd6 => 778,
        0xd7 => 584,
        0xd8 => 778,
        0xd9..=0xdc => 722,
        0xdd | 0xde => 667,
        0xdf => 611,
        0xe0..=0xe5 => 556,
        0xe6 => 889,
        0xe7..=0xeb => 556,
        0xec..=0xef => 278,
        0xf0..=0xf6 => 611,
        0xf7 => 584,
        0xf8..=0xfc => 611,
        0xfd => 556,
        0xfe => 611,
        0xff => 556,
        _ => return None,
    };
    Some(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_latin1_and_typographic_punctuation() {
        assert_eq!(to_winansi('A'), Some(0x41));
        assert_eq!(to_winansi('ü'), Some(0xfc));
        assert_eq!(to_winansi('€'), Some(0x80));
        assert_eq!(to_winansi('„'), Some(0x84));
        assert_eq!(to_winansi('\t'), None);
        assert_eq!(to_winansi('漢'), None);
    }

    #[test]
    fn widths_come_from_the_afm_tables() {
        let regular = StandardFont::Helvetica;
        let bold = StandardFont::HelveticaBold;
        assert_eq!(regular.advance(u16::from(b' ')), Some(278));
        assert_eq!(regular.advance(u16::from(b'W')), Some(944));
        assert_eq!(regular.advance(u16::from(b'i')), Some(222));
        assert_eq!(bold.advance(u16::from(b'i')), Some(278));
        assert_eq!(regular.advance(0xfc), Some(556));
        assert_eq!(regular.advance(0x81), None);
    }

    #[test]
    fn unmapped_characters_have_no_code() {
        // known weakness: these end up invisible and zero-width rather than failing
        assert_eq!(StandardFont::Helvetica.encode('→'), None);
        assert_eq!(StandardFont::Helvetica.encode('\u{7f}'), None);
    }
}
