use crate::{
    font::Font,
    image::Image,
    info::Info,
    page::Page,
    refs::{ObjectReferences, RefType},
    Result,
};
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Pdf, Ref};
use std::io::Write;

/// A compiled document: the pages a [DocumentCompiler](crate::DocumentCompiler) drew,
/// the images they paint, and metadata. Fonts are not owned by the document; they stay in
/// the [StyleRegistry](crate::StyleRegistry) the document was compiled against and are
/// passed back in when writing.
#[derive(Debug)]
pub struct Document {
    pub info: Info,
    /// Encoding the text was handed in with, as checked when compilation started. Text is
    /// written through the fonts' own encodings.
    pub encoding: String,
    pub pages: Vec<Page>,
    pub images: Arena<Image>,
}

impl Default for Document {
    fn default() -> Self {
        Document::new("UTF-8")
    }
}

impl Document {
    pub fn new<S: ToString>(encoding: S) -> Document {
        Document {
            info: Info::new(),
            encoding: encoding.to_string(),
            pages: Vec::default(),
            images: Arena::new(),
        }
    }

    pub fn meta_author<S: ToString>(&mut self, author: S) -> &mut Self {
        self.info.author(author);
        self
    }

    pub fn meta_title<S: ToString>(&mut self, title: S) -> &mut Self {
        self.info.title(title);
        self
    }

    pub fn meta_subject<S: ToString>(&mut self, subject: S) -> &mut Self {
        self.info.subject(subject);
        self
    }

    pub fn meta_creator<S: ToString>(&mut self, creator: S) -> &mut Self {
        self.info.creator(creator);
        self
    }

    /// Add a page to the end of the document, returning its index
    pub fn add_page(&mut self, page: Page) -> usize {
        self.pages.push(page);
        self.pages.len() - 1
    }

    /// Add an image to the document structure. Images are stored "globally" within the
    /// document, so any page can re-use an image by referring to its id.
    pub fn add_image(&mut self, image: Image) -> Id<Image> {
        self.images.alloc(image)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Write the document as a PDF. `fonts` must be the font arena of the registry the
    /// document was compiled with, since pages refer to fonts by id.
    ///
    /// Note: although this can write to arbitrary streams, the entire document is
    /// rendered in memory first.
    pub fn write<W: Write>(&self, fonts: &Arena<Font>, mut w: W) -> Result<()> {
        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        self.info.write(&mut refs, &mut writer);

        let page_refs: Vec<Ref> = (0..self.pages.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (id, font) in fonts.iter() {
            font.write(&mut refs, id.index(), &mut writer);
        }

        for (id, image) in self.images.iter() {
            image.write(&mut refs, id.index(), &mut writer)?;
        }

        for (page_index, page) in self.pages.iter().enumerate() {
            page.write(&mut refs, page_index, fonts, &self.images, &mut writer)?;
        }

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        catalog.finish();

        log::debug!("Wrote document with {} page(s)", self.pages.len());
        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }

    /// Write the document as a PDF into a new buffer
    pub fn to_bytes(&self, fonts: &Arena<Font>) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.write(fonts, &mut bytes)?;
        Ok(bytes)
    }
}
