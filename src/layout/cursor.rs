use crate::units::Pt;

/// The vertical write position on the active page, in page coordinates (so it decreases
/// as content is added). It always stays within `[0, page height]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PageCursor {
    y: Pt,
    top: Pt,
    page_height: Pt,
}

impl PageCursor {
    /// A cursor at the top of the content area, `top_margin` below the top of the page
    pub fn new(page_height: Pt, top_margin: Pt) -> PageCursor {
        let top = (page_height - top_margin).max(Pt::ZERO).min(page_height);
        PageCursor {
            y: top,
            top,
            page_height,
        }
    }

    pub fn y(&self) -> Pt {
        self.y
    }

    /// Where the cursor goes back to on a fresh page
    pub fn top(&self) -> Pt {
        self.top
    }

    /// Move the cursor to `y`, clamped to the page
    pub fn set(&mut self, y: Pt) {
        let clamped = y.max(Pt::ZERO).min(self.page_height);
        if clamped != y {
            log::warn!("Cursor {y} is off the page, clamping to {clamped}");
        }
        self.y = clamped;
    }

    pub fn reset(&mut self) {
        self.y = self.top;
    }

    /// The position `lines` lines of `line_height` below the cursor. Does not move the
    /// cursor; pass the result to [set](PageCursor::set) for that.
    pub fn skip(&self, lines: f32, line_height: Pt) -> Pt {
        self.y - line_height * lines
    }

    /// Whether the cursor has reached `threshold`, i.e. the page is full
    pub fn overflows(&self, threshold: Pt) -> bool {
        self.y <= threshold
    }
}
