//! Error types for parsing and encoding.

use thiserror::Error;

/// Result type for parse operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Error raised when a property list fails to parse.
///
/// Variants fall into two intents. Structural errors mean the input is
/// malformed at the offending token; no amount of further input fixes them.
/// Truncation errors mean the input was valid as far as it went but ended
/// inside an open construct. [`ParseError::is_premature_end`] tells the two
/// apart, so a caller assembling input incrementally can retry on
/// truncation and give up on malformation.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Input was empty or contained only whitespace.
    #[error("No non-whitespace input found")]
    NoInput,

    /// A character that cannot start a value.
    #[error("Unexpected character \"{ch}\" at offset {offset}")]
    UnexpectedChar { ch: char, offset: usize },

    /// Content remained after the single root value, or a root character
    /// fell outside the grammar entirely.
    #[error("Unexpected character \"{ch}\" at offset {offset} after root processed on first run")]
    UnexpectedCharAfterRoot { ch: char, offset: usize },

    /// Input ended inside a quoted or angled bracket string body.
    #[error("Unexpected end of quoted string at offset {offset}")]
    UnexpectedEndOfQuotedString { offset: usize },

    /// Input ended directly after a backslash inside a string body.
    #[error("Unexpected end of quoted string (after backslash) at offset {offset}")]
    UnexpectedEndOfQuotedStringAfterBackslash { offset: usize },

    /// Something other than `>` followed the closing quote of an angled
    /// bracket string.
    #[error("Angled bracket string closing bracket expected but found \"{ch}\" at offset {offset}")]
    AngledStringClosingBracketExpected { ch: char, offset: usize },

    /// Input ended between the closing quote and the `>` of an angled
    /// bracket string.
    #[error("Premature end to angled bracket string at offset {offset}")]
    PrematureEndOfAngledString { offset: usize },

    /// A non-hex, non-whitespace character appeared before the `>` of a
    /// data literal.
    #[error("Invalid data (hex) end character \"{ch}\" at offset {offset}")]
    InvalidDataEndChar { ch: char, offset: usize },

    /// Input ended before the `>` of a data literal.
    #[error("Premature end to data (hex) at offset {offset}")]
    PrematureEndOfData { offset: usize },

    /// Input ended before the `)` of an array.
    #[error("Premature end to array at offset {offset}")]
    PrematureEndOfArray { offset: usize },

    /// A `}` closed a construct that was not a dict.
    #[error("Unexpected close for dict at offset {offset}")]
    UnexpectedCloseForDict { offset: usize },

    /// A `)` closed a construct that was not an array.
    #[error("Unexpected close for array at offset {offset}")]
    UnexpectedCloseForArray { offset: usize },

    /// Two array items without a separating comma.
    #[error("Missing comma between array items at offset {offset}")]
    MissingComma { offset: usize },

    /// Two dict entries without a separating semi-colon.
    #[error("Missing semi-colon between dict items at offset {offset}")]
    MissingSemiColon { offset: usize },

    /// A dict key was followed by something other than `=`.
    #[error("Expecting \"=\" character after dict key but found \"{ch}\" at offset {offset}")]
    ExpectingEqualsAfterKey { ch: char, offset: usize },

    /// A `;` separator outside a dict entry position.
    #[error("Unexpected semi-colon during non-dict mode at offset {offset}")]
    UnexpectedSemiColon { offset: usize },

    /// A `,` separator outside an array item position.
    #[error("Unexpected comma during non-array mode at offset {offset}")]
    UnexpectedComma { offset: usize },

    /// Input ended where a dict key should begin.
    #[error("Premature end to dict (before key) at offset {offset}")]
    PrematureEndOfDictBeforeKey { offset: usize },

    /// Input ended between a dict key and its `=`.
    #[error("Premature end to dict (before equals) at offset {offset}")]
    PrematureEndOfDictBeforeEquals { offset: usize },

    /// Input ended between `=` and the entry value.
    #[error("Premature end to dict (after equals) at offset {offset}")]
    PrematureEndOfDictAfterEquals { offset: usize },

    /// Input ended between an entry value and its `;`.
    #[error("Premature end to dict (before semi-colon) at offset {offset}")]
    PrematureEndOfDictBeforeSemiColon { offset: usize },

    /// Input ended after a `;` with the dict still open.
    #[error("Premature end to dict (after semi-colon) at offset {offset}")]
    PrematureEndOfDictAfterSemiColon { offset: usize },

    /// Containers nested beyond the supported depth.
    #[error("Maximum nesting depth {limit} exceeded at offset {offset}")]
    DepthLimitExceeded { limit: usize, offset: usize },
}

impl ParseError {
    /// Whether this error reports truncated input rather than malformed
    /// input.
    pub fn is_premature_end(&self) -> bool {
        matches!(
            self,
            ParseError::NoInput
                | ParseError::UnexpectedEndOfQuotedString { .. }
                | ParseError::UnexpectedEndOfQuotedStringAfterBackslash { .. }
                | ParseError::PrematureEndOfAngledString { .. }
                | ParseError::PrematureEndOfData { .. }
                | ParseError::PrematureEndOfArray { .. }
                | ParseError::PrematureEndOfDictBeforeKey { .. }
                | ParseError::PrematureEndOfDictBeforeEquals { .. }
                | ParseError::PrematureEndOfDictAfterEquals { .. }
                | ParseError::PrematureEndOfDictBeforeSemiColon { .. }
                | ParseError::PrematureEndOfDictAfterSemiColon { .. }
        )
    }
}

/// Error raised when a value cannot be rendered as XML property list
/// markup.
#[derive(Error, Debug)]
pub enum EncodeError {
    /// `NaN` has no XML property list representation.
    #[error("`NaN` is not allowed")]
    NanNotAllowed,

    /// A non-hex character in a string encoded under `force_hex`.
    #[error("Invalid hex digit \"{ch}\" in forced-hex string")]
    InvalidHexDigit { ch: char },

    /// A value kind the ASCII grammar cannot spell (booleans and dates
    /// have no old-style literal form).
    #[error("Unrecognized type cannot be converted to ASCII property list item")]
    UnrepresentableInAscii,
}
