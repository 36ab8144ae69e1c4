use thiserror::Error;

/// Errors raised while parsing a standalone shortcode opening tag.
///
/// The rewriting helpers never surface these: text that does not parse is
/// simply left untouched. They are only returned by [`crate::Shortcode::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortcodeError {
    /// Input did not begin with `[`.
    #[error("Shortcode must start with '[', found {found:?}")]
    MissingOpenBracket {
        /// First character of the input, if any.
        found: Option<char>,
    },
    /// Opening tag was never closed with `]`.
    #[error("Unterminated shortcode: expected closing ']'")]
    Unterminated,
    /// No name followed the opening bracket.
    #[error("Shortcode name is empty at offset {offset}")]
    EmptyName {
        /// Byte offset where the name was expected.
        offset: usize,
    },
    /// A quoted attribute value never found its closing quote.
    #[error("Unterminated {quote} quote in attribute value at offset {offset}")]
    UnterminatedQuote {
        /// Quote character that opened the value.
        quote: char,
        /// Byte offset of the opening quote.
        offset: usize,
    },
    /// Text remained after the closing `]`.
    #[error("Unexpected text after shortcode: {0:?}")]
    TrailingText(String),
}
