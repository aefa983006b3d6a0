use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum LetterheadError {
    #[error("no document layout `{name}` found (searched: {searched:?})")]
    /// None of the places a [LayoutSource](crate::LayoutSource) looks in holds the layout
    LayoutNotFound { name: String, searched: Vec<String> },

    #[error("unknown style `{0}`")]
    /// A style was activated that was never defined in the [StyleRegistry](crate::StyleRegistry)
    UnknownStyle(String),

    #[error("unknown field `{0}`")]
    /// A generic setter was called with a name that no builder knows about
    UnknownField(String),

    #[error("invalid text alignment `{0}`")]
    /// An alignment name other than left, right, or center
    InvalidAlignment(String),

    #[error("invalid argument: {0}")]
    /// A value outside of what an operation accepts, such as an unsupported gravity
    InvalidArgument(String),

    #[error("compiler is {actual}, expected {expected}")]
    /// A compiler lifecycle step was called out of order
    InvalidState {
        expected: &'static str,
        actual: &'static str,
    },

    #[error("page {0} is missing from the document")]
    /// A page referenced by index does not exist
    PageMissing(usize),

    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to parse the image
    Image(#[from] image::ImageError),

    #[error(transparent)]
    /// [usvg] failed to parse the image
    Svg(#[from] usvg::Error),

    #[error("failed to convert SVG: {0}")]
    /// [svg2pdf] failed to convert a parsed SVG
    SvgConversion(String),
}

pub type Result<T, E = LetterheadError> = std::result::Result<T, E>;
