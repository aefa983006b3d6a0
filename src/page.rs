use crate::content::render_contents;
use crate::font::Font;
use crate::image::Image;
use crate::refs::{ObjectReferences, RefType};
use crate::transform::Transform;
use crate::units::*;
use crate::{LetterheadError, PageSize, Rect, Result};
use id_arena::{Arena, Id};
use miniz_oxide::deflate::{compress_to_vec_zlib, CompressionLevel};
use pdf_writer::{Filter, Finish, Name, Pdf};

/// A font at a given size, as text is set in
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A single line of text, placed with its baseline start at `coords`
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub coords: (Pt, Pt),
}

/// A straight stroked line, optionally dashed. An empty dash pattern is solid.
#[derive(Clone, PartialEq, Debug)]
pub struct RuleLayout {
    pub from: (Pt, Pt),
    pub to: (Pt, Pt),
    pub thickness: Pt,
    pub dash: Vec<f32>,
}

/// An image stretched over `position`
#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image_id: Id<Image>,
    pub position: Rect,
}

/// One draw operation, in the order it was issued
#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(SpanLayout),
    Rule(RuleLayout),
    Image(ImageLayout),
    /// Applies to everything drawn after it on the page
    Transform(Transform),
}

/// A page of a compiled document.
///
/// Pages start out as copies of the layout's template page: same size, same background,
/// but nothing drawn on them yet.
#[derive(Clone, Debug)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// The layout's background, painted beneath all contents
    pub background: Option<ImageLayout>,
    /// The font text was most recently set in
    pub font: Option<SpanFont>,
    /// Everything drawn on the page so far
    pub contents: Vec<PageContents>,
    /// Accumulated rotation of the page contents, in degrees
    pub rotation: Option<f32>,
}

impl Page {
    pub fn new(size: PageSize) -> Page {
        Page {
            media_box: Rect::sized(size.0, size.1),
            background: None,
            font: None,
            contents: Vec::default(),
            rotation: None,
        }
    }

    pub fn with_background(mut self, background: ImageLayout) -> Page {
        self.background = Some(background);
        self
    }

    pub fn width(&self) -> Pt {
        self.media_box.width()
    }

    pub fn height(&self) -> Pt {
        self.media_box.height()
    }

    /// A fresh page with the same geometry and background, used when a document needs
    /// another page from the same template
    pub fn blank_copy(&self) -> Page {
        Page {
            media_box: self.media_box,
            background: self.background.clone(),
            font: None,
            contents: Vec::default(),
            rotation: None,
        }
    }

    pub fn set_font(&mut self, font: SpanFont) {
        self.font = Some(font);
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(span));
    }

    pub fn add_rule(&mut self, rule: RuleLayout) {
        self.contents.push(PageContents::Rule(rule));
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(PageContents::Image(image));
    }

    /// Rotate everything drawn from now on by `degrees` (counter-clockwise) around the
    /// centre of the page
    pub fn rotate(&mut self, degrees: f32) {
        let transform =
            Transform::rotate_about(degrees, self.width() / 2.0, self.height() / 2.0);
        self.contents.push(PageContents::Transform(transform));
        self.rotation = Some(self.rotation.unwrap_or_default() + degrees);
    }

    /// All text on the page, in drawing order
    pub fn spans(&self) -> impl Iterator<Item = &SpanLayout> {
        self.contents.iter().filter_map(|content| match content {
            PageContents::Text(span) => Some(span),
            _ => None,
        })
    }

    pub fn rules(&self) -> impl Iterator<Item = &RuleLayout> {
        self.contents.iter().filter_map(|content| match content {
            PageContents::Rule(rule) => Some(rule),
            _ => None,
        })
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        images: &Arena<Image>,
        writer: &mut Pdf,
    ) -> Result<()> {
        let id = refs
            .get(RefType::Page(page_index))
            .ok_or(LetterheadError::PageMissing(page_index))?;
        let parent = refs
            .get(RefType::PageTree)
            .ok_or(LetterheadError::PageMissing(page_index))?;
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.parent(parent);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (font_id, _) in fonts.iter() {
            if let Some(font_ref) = refs.get(RefType::Font(font_id.index())) {
                resource_fonts.pair(Name(format!("F{}", font_id.index()).as_bytes()), font_ref);
            }
        }
        resource_fonts.finish();
        let mut resource_xobjects = resources.x_objects();
        for (image_id, _) in images.iter() {
            if let Some(image_ref) = refs.get(RefType::Image(image_id.index())) {
                resource_xobjects
                    .pair(Name(format!("I{}", image_id.index()).as_bytes()), image_ref);
            }
        }
        resource_xobjects.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        let rendered = render_contents(self, fonts)?;
        let compressed =
            compress_to_vec_zlib(rendered.as_slice(), CompressionLevel::DefaultLevel as u8);
        writer
            .stream(content_id, compressed.as_slice())
            .filter(Filter::FlateDecode);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize::A4;

    #[test]
    fn blank_copies_keep_geometry_but_not_contents() {
        let mut fonts: Arena<Font> = Arena::new();
        let font = fonts.alloc(crate::font::StandardFont::Helvetica.into());
        let mut images: Arena<Image> = Arena::new();
        let background = images.alloc(Image::new_raster(image::DynamicImage::new_rgb8(2, 2)));

        let mut page = Page::new(A4).with_background(ImageLayout {
            image_id: background,
            position: Rect::sized(A4.0, A4.1),
        });
        page.set_font(SpanFont { id: font, size: Pt(10.0) });
        page.add_span(SpanLayout {
            text: "hello".into(),
            font: SpanFont { id: font, size: Pt(10.0) },
            coords: (Pt(80.0), Pt(672.0)),
        });
        page.rotate(90.0);

        let copy = page.blank_copy();
        assert_eq!(copy.media_box, page.media_box);
        assert_eq!(copy.background, page.background);
        assert!(copy.contents.is_empty());
        assert_eq!(copy.font, None);
        assert_eq!(copy.rotation, None);
        assert_eq!(page.spans().count(), 1);
        assert_eq!(page.rotation, Some(90.0));
    }
}
