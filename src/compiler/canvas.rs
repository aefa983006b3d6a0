use crate::config::DocumentConfig;
use crate::document::Document;
use crate::image::Image;
use crate::layout::{
    fit_image, has_sufficient_resolution, normalize_newlines, place_in_box, resolve_alignment,
    wrap_text, Align, Gravity, Margins, PageCursor, Placement, TextOptions,
};
use crate::page::{ImageLayout, Page, RuleLayout, SpanLayout};
use crate::source::Layout;
use crate::style::{Style, StyleRegistry};
use crate::units::Pt;
use crate::{Rect, Result};

/// The drawing surface of a compilation in progress: the active page, the vertical
/// cursor, the active style, and the pages finished so far.
///
/// Every page is a blank copy of the layout's template page. The cursor is only moved by
/// drawing text and by [set_cursor](Canvas::set_cursor); nothing here starts a new page
/// on its own.
#[derive(Debug)]
pub struct Canvas<'r> {
    registry: &'r StyleRegistry,
    style: &'r Style,
    margins: Margins,
    page_width: Pt,
    cursor: PageCursor,
    template: Page,
    page: Page,
    document: Document,
}

impl<'r> Canvas<'r> {
    /// Seed a canvas from a layout: its page becomes the template and the first page,
    /// set in the body style
    pub(crate) fn new(
        registry: &'r StyleRegistry,
        config: &DocumentConfig,
        layout: Layout,
    ) -> Result<Canvas<'r>> {
        let mut document = Document::new(&config.encoding);
        let (width, height) = layout.size;

        let mut template = Page::new(layout.size);
        if let Some(background) = layout.background {
            let image_id = document.add_image(background);
            template = template.with_background(ImageLayout {
                image_id,
                position: Rect::sized(width, height),
            });
        }

        let style = registry.get(StyleRegistry::BODY)?;
        let mut page = template.blank_copy();
        page.set_font(style.span_font());

        Ok(Canvas {
            registry,
            style,
            margins: config.margins,
            page_width: config.page_width,
            cursor: PageCursor::new(height, config.margins.top),
            template,
            page,
            document,
        })
    }

    pub fn registry(&self) -> &'r StyleRegistry {
        self.registry
    }

    /// The active style
    pub fn style(&self) -> &'r Style {
        self.style
    }

    /// Make the named style the active one, for the active page and all pages after it
    pub fn use_style(&mut self, name: &str) -> Result<()> {
        self.style = self.registry.get(name)?;
        self.page.set_font(self.style.span_font());
        Ok(())
    }

    pub fn margins(&self) -> &Margins {
        &self.margins
    }

    pub fn page_width(&self) -> Pt {
        self.page_width
    }

    pub fn page_height(&self) -> Pt {
        self.page.height()
    }

    pub fn cursor(&self) -> Pt {
        self.cursor.y()
    }

    pub fn set_cursor(&mut self, y: Pt) {
        self.cursor.set(y);
    }

    /// The cursor position `lines` lines (of the active style) further down. The cursor
    /// itself doesn't move.
    pub fn skip_lines(&self, lines: f32) -> Pt {
        self.cursor.skip(lines, self.style.line_height)
    }

    /// Width of `text` in the active style
    pub fn width_of(&self, text: &str) -> Pt {
        self.registry.width_of(text, self.style)
    }

    /// Break `text` into lines no wider than `max_width` in the active style
    pub fn wrap(&self, text: &str, max_width: Pt) -> Vec<String> {
        wrap_text(text, max_width, |s| self.width_of(s))
    }

    /// Where text aligned with `align` starts, and how wide it may run
    pub fn placement(&self, text: &str, align: Align, options: &TextOptions) -> Placement {
        resolve_alignment(
            text,
            |s| self.width_of(s),
            align,
            &self.margins,
            self.page_width,
            options,
        )
    }

    /// Draw text in the active style.
    ///
    /// The text is split into paragraphs at newlines, and each paragraph wrapped to the
    /// placement width. The first line sits at `options.offset_y` (the cursor by default),
    /// every further line one line height below the previous one; empty lines only take
    /// up space. The cursor ends up on the last line, which is also returned.
    pub fn draw_text(&mut self, text: &str, align: Align, options: TextOptions) -> Pt {
        let text = normalize_newlines(text);
        let placement = self.placement(&text, align, &options);
        let line_height = self.style.line_height;

        let mut y = options.offset_y.unwrap_or_else(|| self.cursor.y());
        let mut lines = text
            .split('\n')
            .flat_map(|paragraph| self.wrap(paragraph, placement.width))
            .collect::<Vec<_>>()
            .into_iter();

        if let Some(first) = lines.next() {
            self.draw_line(first, placement.x, y);
        }
        for line in lines {
            y -= line_height;
            self.draw_line(line, placement.x, y);
        }

        self.cursor.set(y);
        self.cursor.y()
    }

    fn draw_line(&mut self, text: String, x: Pt, y: Pt) {
        if text.is_empty() {
            return;
        }
        log::trace!("Drawing `{text}` at ({x}, {y})");
        self.page.add_span(SpanLayout {
            text,
            font: self.style.span_font(),
            coords: (x, y),
        });
    }

    /// Draw a horizontal rule half a line above the cursor, from the left margin to just
    /// past the right margin. An empty dash pattern draws a solid line.
    pub fn draw_rule(&mut self, thickness: Pt, dash: &[f32]) {
        let y = (self.cursor.y() + self.style.line_height / 2.0).ceil();
        self.page.add_rule(RuleLayout {
            from: (self.margins.left, y),
            to: (self.page_width - self.margins.right + Pt(5.0), y),
            thickness,
            dash: dash.to_vec(),
        });
    }

    /// Draw an image scaled to fit a box whose top-left corner is at `offset`. The image
    /// is never scaled up, and sticks to the part of the box given by `gravity`. Returns
    /// where the image ended up.
    pub fn draw_image(
        &mut self,
        image: Image,
        offset: (Pt, Pt),
        bounds: (Pt, Pt),
        gravity: Gravity,
    ) -> Rect {
        let (width, height) = (Pt(image.width), Pt(image.height));
        if !image.is_vector() && !has_sufficient_resolution(width, height, bounds.0, bounds.1) {
            log::warn!(
                "Image of {}x{}px is too small for a {}x{}pt box and will look blurry",
                image.width,
                image.height,
                bounds.0,
                bounds.1
            );
        }

        let (width, height) = fit_image(width, height, bounds.0, bounds.1);
        let (dx, dy) = place_in_box(bounds.0, bounds.1, width, height, gravity);
        let position = Rect::from_top_left(offset.0 + dx, offset.1 - dy, width, height);

        let image_id = self.document.add_image(image);
        self.page.add_image(ImageLayout { image_id, position });
        position
    }

    /// Rotate everything drawn on the active page from now on around the page centre
    pub fn rotate(&mut self, degrees: f32) {
        self.page.rotate(degrees);
    }

    /// Finish the active page and continue on a fresh copy of the template, in the
    /// active style, with the cursor back at the top margin
    pub fn next_page(&mut self) {
        let mut page = self.template.blank_copy();
        page.set_font(self.style.span_font());
        let finished = std::mem::replace(&mut self.page, page);
        self.document.add_page(finished);
        self.cursor.reset();
        log::debug!("Starting page {}", self.page_count());
    }

    /// Start a new page if the cursor is at or below `threshold`, returning whether it did
    pub fn advance_for_overflow(&mut self, threshold: Pt) -> bool {
        if self.cursor.overflows(threshold) {
            self.next_page();
            true
        } else {
            false
        }
    }

    /// The page being drawn on
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Pages finished so far, not including the active page
    pub fn finished_pages(&self) -> &[Page] {
        &self.document.pages
    }

    pub fn page_count(&self) -> usize {
        self.document.pages.len() + 1
    }

    pub(crate) fn finish(mut self) -> Document {
        self.document.add_page(self.page);
        self.document
    }
}
