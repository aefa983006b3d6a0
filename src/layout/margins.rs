use crate::units::Pt;

/// Page margins. Nothing stops content from being drawn into them; they are the
/// reference lines that alignment, wrapping widths, and the top-of-page cursor are
/// computed from.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Margins {
    pub top: Pt,
    pub right: Pt,
    pub bottom: Pt,
    pub left: Pt,
}

impl Margins {
    /// Create margins by specifying individual components in a clockwise fashion
    /// starting at the top (in the same order as CSS margins)
    pub fn trbl(top: Pt, right: Pt, bottom: Pt, left: Pt) -> Margins {
        Margins {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Create margins where all values are equal
    pub fn all<D: Into<Pt>>(value: D) -> Margins {
        let value: Pt = value.into();
        Margins::trbl(value, value, value, value)
    }

    /// The margins business letters in this crate are laid out with:
    /// 100pt top and bottom, 55pt right, 80pt left
    pub fn letter() -> Margins {
        Margins::trbl(Pt(100.0), Pt(55.0), Pt(100.0), Pt(80.0))
    }

    /// Width left between the left and right margins
    pub fn content_width(&self, page_width: Pt) -> Pt {
        page_width - self.left - self.right
    }
}
