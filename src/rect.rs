use crate::units::*;

/// A rectangle, specified by two opposite corners in page coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the lower-left corner.
    pub x1: Pt,
    /// The y-coordinate of the lower-left corner.
    pub y1: Pt,
    /// The x-coordinate of the upper-right corner.
    pub x2: Pt,
    /// The y-coordinate of the upper-right corner.
    pub y2: Pt,
}

impl Rect {
    /// A rectangle anchored at the page origin
    pub fn sized(width: Pt, height: Pt) -> Rect {
        Rect {
            x1: Pt::ZERO,
            y1: Pt::ZERO,
            x2: width,
            y2: height,
        }
    }

    /// A rectangle hanging down from its top-left corner. Layout code thinks in
    /// "boxes below a point", while PDF wants lower-left / upper-right corners.
    pub fn from_top_left(x: Pt, top: Pt, width: Pt, height: Pt) -> Rect {
        Rect {
            x1: x,
            y1: top - height,
            x2: x + width,
            y2: top,
        }
    }

    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_left_boxes_hang_down() {
        let r = Rect::from_top_left(Pt(80.0), Pt(700.0), Pt(100.0), Pt(50.0));
        assert_eq!(r.y1, Pt(650.0));
        assert_eq!(r.x2, Pt(180.0));
        assert_eq!(r.width(), Pt(100.0));
        assert_eq!(r.height(), Pt(50.0));
    }
}
