//! Paginated business letters and invoices, drawn over background page templates.
//!
//! A document is compiled in three steps: a [DocumentCompiler] loads the configured
//! layout (page size and background) from a [LayoutSource], opens the first page, and
//! then runs the drawing [Stages] of a kind of document (see [FinancialLetter]) against a
//! [Canvas]. Styles and fonts come from a [StyleRegistry] that any number of
//! compilations share. The resulting [Document] is written out as a PDF with
//! [Document::write].

mod compiler;
pub use compiler::*;

mod config;
pub use config::*;

mod content;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

/// Measuring, wrapping, aligning, and fitting: the rules documents are laid out by
pub mod layout;

/// The invoice / shipment note document
pub mod letter;
pub use letter::{FinancialLetter, FinancialLetterBuilder, Position, TableColumns};

mod page;
pub use page::*;

/// Common page sizes
pub mod pagesize;
pub use pagesize::PageSize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod source;
pub use source::*;

mod style;
pub use style::*;

mod transform;
pub use transform::*;

mod units;
pub use units::*;

mod error;
pub use error::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
