//! The measuring and positioning rules documents are drawn with.
//!
//! Everything here is a pure function of its inputs: text widths come from font metrics
//! (or any measuring closure), so the same rules can be checked without a compiler or a
//! PDF in sight. The [Canvas](crate::Canvas) ties them to a page.
//!
//! - [`wrap_text`] greedily breaks text into lines no wider than a limit
//! - [`resolve_alignment`] turns an [`Align`] into a starting x coordinate
//! - [`fit_image`] and [`place_in_box`] scale and position images inside a box
//! - [`PageCursor`] tracks the vertical write position
//!
//! # Example
//!
//! ```
//! use pdf_letterhead::layout::{wrap_text, resolve_alignment, Align, Margins, TextOptions};
//! use pdf_letterhead::Pt;
//!
//! // every character is 5pt wide
//! let measure = |s: &str| Pt(5.0 * s.chars().count() as f32);
//!
//! let lines = wrap_text("aa bb cc", Pt(25.0), measure);
//! assert_eq!(lines, vec!["aa bb", "cc"]);
//!
//! let placement = resolve_alignment(
//!     "TOTAL",
//!     |_| Pt(40.0),
//!     Align::Right,
//!     &Margins::letter(),
//!     Pt(595.0),
//!     &TextOptions::default().width(Pt(100.0)).offset_x(Pt(500.0)),
//! );
//! assert_eq!(placement.x, Pt(505.0));
//! ```

mod cursor;
mod fit;
mod margins;
mod text;

pub use cursor::*;
pub use fit::*;
pub use margins::*;
pub use text::*;
