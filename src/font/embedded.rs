use super::FontMetrics;
use crate::refs::{ObjectReferences, RefType};
use crate::Result;
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::HashMap;

/// A parsed TrueType / OpenType face. The face is embedded in its entirety in the generated
/// PDF, so large fonts will noticeably grow the output. Text is encoded as glyph ids
/// (`Identity-H`), with a ToUnicode map so that it can still be copied out of the PDF.
pub struct EmbeddedFont {
    face: OwnedFace,
}

impl std::fmt::Debug for EmbeddedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddedFont")
            .field("name", &self.name())
            .field("data_len", &self.face.as_slice().len())
            .finish()
    }
}

impl EmbeddedFont {
    /// Parse the first face in the font data
    pub fn load(bytes: Vec<u8>) -> Result<EmbeddedFont> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(EmbeddedFont { face })
    }

    fn lookup_name(&self, name_id: u16) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == name_id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// The full name of the face, or `Embedded` for faces without a name table entry
    pub fn name(&self) -> String {
        self.lookup_name(owned_ttf_parser::name_id::FULL_NAME)
            .unwrap_or_else(|| "Embedded".to_string())
    }

    /// The family name of the face, falling back to its full name
    pub fn family(&self) -> String {
        self.lookup_name(owned_ttf_parser::name_id::FAMILY)
            .unwrap_or_else(|| self.name())
    }

    /// 1000 / units-per-em: PDF font dictionaries measure glyphs in thousandths of an em
    fn pdf_scaling(&self) -> f32 {
        1000.0 / self.face.as_face_ref().units_per_em() as f32
    }

    /// Every glyph the face maps a unicode codepoint to, keyed by glyph id
    fn glyph_chars(&self) -> HashMap<u16, char> {
        let mut map: HashMap<u16, char> = HashMap::new();
        let Some(cmap) = self.face.as_face_ref().tables().cmap else {
            return map;
        };

        for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
            subtable.codepoints(|codepoint: u32| {
                if let Ok(ch) = char::try_from(codepoint) {
                    if let Some(gid) = subtable.glyph_index(codepoint).filter(|gid| gid.0 > 0) {
                        map.entry(gid.0).or_insert(ch);
                    }
                }
            });
        }

        map
    }

    /// Advance width and height (in font units) of every mapped glyph
    fn glyph_sizes(&self, glyphs: &HashMap<u16, char>) -> HashMap<u16, (u16, i16)> {
        let face = self.face.as_face_ref();
        glyphs
            .keys()
            .filter_map(|&gid| {
                let advance = face.glyph_hor_advance(GlyphId(gid))?;
                let height = face
                    .glyph_bounding_box(GlyphId(gid))
                    .map(|bbox| bbox.y_max - bbox.y_min - face.descender())
                    .unwrap_or(1000);
                Some((gid, (advance, height)))
            })
            .collect()
    }

    fn write_cid(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let font_descriptor_id = self.write_descriptor(refs, font_index, writer);
        let id = refs.gen(RefType::CidFont(font_index));
        let scaling = self.pdf_scaling();

        let sizes = self.glyph_sizes(&self.glyph_chars());

        // the most common advance becomes the default width
        let mut width_counts: HashMap<u16, usize> = HashMap::new();
        for (advance, _) in sizes.values() {
            *width_counts.entry(*advance).or_insert(0) += 1;
        }
        let default_width = width_counts
            .iter()
            .max_by_key(|(_, &count)| count)
            .map(|(&advance, _)| advance as f32 * scaling)
            .unwrap_or(1000.0);

        let mut widths: Vec<(u16, f32)> = sizes
            .iter()
            .map(|(&gid, &(advance, _))| (gid, advance as f32 * scaling))
            .collect();
        widths.sort_by_key(|(gid, _)| *gid);

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(font_descriptor_id);

        // runs of consecutive glyph ids share one widths entry
        let mut pdf_widths = cid_font.widths();
        let mut run_start: Option<u16> = None;
        let mut run: Vec<f32> = Vec::new();
        for (gid, width) in widths {
            match run_start {
                Some(start) if gid as usize == start as usize + run.len() => run.push(width),
                Some(start) => {
                    pdf_widths.consecutive(start, run.drain(..));
                    run_start = Some(gid);
                    run.push(width);
                }
                None => {
                    run_start = Some(gid);
                    run.push(width);
                }
            }
        }
        if let Some(start) = run_start {
            pdf_widths.consecutive(start, run.drain(..));
        }
        pdf_widths.finish();

        cid_font.default_width(default_width);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        id
    }

    fn write_descriptor(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let data_id = refs.gen(RefType::FontData(font_index));
        writer
            .stream(data_id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        let face = self.face.as_face_ref();
        let scaling = self.pdf_scaling();
        let sizes = self.glyph_sizes(&self.glyph_chars());

        let max_width = sizes.values().map(|&(w, _)| w).max().unwrap_or_default();
        let max_height = sizes.values().map(|&(_, h)| h).max().unwrap_or_default();
        let sum_width: usize = sizes.values().map(|&(w, _)| w as usize).sum();
        let avg_width = sum_width as f32 / sizes.len().max(1) as f32;

        let id = refs.gen(RefType::FontDescriptor(font_index));
        let name = self.name();
        let family = self.family();

        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(name.as_bytes()));
        descriptor.family(Str(family.as_bytes()));
        descriptor.weight(face.weight().to_number());

        let mut flags = FontFlags::empty();
        flags.set(FontFlags::FIXED_PITCH, face.is_monospaced());
        flags.set(FontFlags::ITALIC, face.is_italic());
        flags.set(FontFlags::NON_SYMBOLIC, true);
        descriptor.flags(flags);

        descriptor.bbox(pdf_writer::Rect {
            x1: 0.0,
            y1: 0.0,
            x2: max_width as f32 * scaling,
            y2: max_height as f32 * scaling,
        });
        descriptor.italic_angle(if face.is_italic() { -12.0 } else { 0.0 });
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        let cap_height = face.capital_height().map(|h| h as f32 * scaling).unwrap_or(1000.0);
        descriptor.cap_height(cap_height);
        descriptor.x_height(face.x_height().map(|h| h as f32 * scaling).unwrap_or(cap_height));
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width * scaling);
        descriptor.max_width(max_width as f32 * scaling);
        descriptor.missing_width(max_width as f32 * scaling);
        descriptor.font_file2(data_id);

        id
    }

    fn write_to_unicode(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut cmap = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo\n\
             << /Registry (Adobe)\n\
             /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        let mut glyphs: Vec<(u16, char)> = self.glyph_chars().into_iter().collect();
        glyphs.sort_by_key(|&(gid, _)| gid);

        // bfchar blocks hold at most 100 entries that share a high byte
        let mut blocks: Vec<Vec<(u16, char)>> = Vec::new();
        for (gid, ch) in glyphs {
            match blocks.last_mut() {
                Some(block) if block.len() < 100 && block[0].0 >> 8 == gid >> 8 => {
                    block.push((gid, ch))
                }
                _ => blocks.push(vec![(gid, ch)]),
            }
        }

        for block in blocks {
            cmap.push_str(&format!("{} beginbfchar\n", block.len()));
            for (gid, ch) in block {
                let mut utf16 = [0u16; 2];
                let units: String = ch
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04x}"))
                    .collect();
                cmap.push_str(&format!("<{gid:04x}> <{units}>\n"));
            }
            cmap.push_str("endbfchar\n");
        }
        cmap.push_str("endcmap CMapName currentdict /CMap defineresource pop end end\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            cmap.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        writer.stream(id, &compressed).filter(Filter::FlateDecode);

        id
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) {
        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = self.write_cid(refs, font_index, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }
}

impl FontMetrics for EmbeddedFont {
    fn units_per_em(&self) -> u16 {
        self.face.as_face_ref().units_per_em()
    }

    fn encode(&self, ch: char) -> Option<u16> {
        self.face.as_face_ref().glyph_index(ch).map(|gid| gid.0)
    }

    fn advance(&self, code: u16) -> Option<u16> {
        self.face.as_face_ref().glyph_hor_advance(GlyphId(code))
    }
}
