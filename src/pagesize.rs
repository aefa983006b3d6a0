//! Page sizes for the paper formats business letters are printed on.
//!
//! All sizes are portrait (width, height) in points. Raster layouts carry no physical
//! size of their own and are stretched over one of these.

use crate::units::*;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

/// ISO A4, rounded to whole points the way letter templates are usually drawn (595 x 842)
pub const A4: PageSize = (Pt(595.0), Pt(842.0));
pub const A5: PageSize = (Pt(420.0), Pt(595.0));
pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const LEGAL: PageSize = (Pt(8.5 * 72.0), Pt(14.0 * 72.0));
