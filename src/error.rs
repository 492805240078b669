use thiserror::Error;

/// All errors that the crate can generate
#[derive(Error, Debug)]
pub enum PDFError {
    #[error(transparent)]
    /// An I/O error occurred, usually while writing to the output target
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error("no font has been registered under the name `{0}`")]
    /// A style or table referred to a font name that was never registered
    UnknownFont(String),

    #[error("table row {row} has {found} cells but the table has {expected} columns")]
    /// A table row does not match the number of column widths
    MalformedTable {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("tables need at least one row and one column")]
    EmptyTable,

    #[error("invalid paragraph markup: {0}")]
    /// Paragraph text contained a tag or entity the layout engine doesn't understand
    Markup(String),

    #[error("`{0}` is not a valid amount")]
    /// An item amount could not be parsed as a decimal number
    InvalidAmount(String),

    #[error("sum of item amounts overflowed")]
    AmountOverflow,

    #[error("page is missing from the document")]
    PageMissing,
}
