//! Old-style (ASCII) property list parser and XML property list encoder.
//!
//! Old-style plists are the legacy curly-brace/parenthesis text format
//! still emitted and consumed by macOS preference tooling (`defaults` and
//! friends). This crate parses that format into a tree of generic values
//! and renders native values back out as XML property list (plist 1.0)
//! markup.
//!
//! # Parsing
//!
//! The parser is a recursive descent over a character cursor:
//!
//! 1. **Scanner**: an offset-tracked cursor; every diagnostic names the
//!    character offset where it was raised.
//!
//! 2. **Value dispatcher**: picks string/data/array/dict parsing from the
//!    next significant character, recursing for nested containers.
//!
//! 3. **Root driver**: trims the input, parses exactly one root value, and
//!    rejects trailing content.
//!
//! Every scalar leaf parses as a string — the grammar has no number,
//! boolean, or date literals — and hex data literals parse to one element
//! per digit, so the original digit string can always be reproduced.
//!
//! # Encoding
//!
//! The XML side consumes [`XmlValue`], a richer native domain (booleans,
//! numbers, dates, packed data), since the XML plist grammar has elements
//! for each. It is the inverse of the parser's value semantics, not of its
//! text grammar.

mod encode;
mod error;
mod parser;
mod scanner;
mod value;

pub use encode::{encode_ascii, encode_xml, encode_xml_fragment, EncodeOptions, XmlValue};
pub use error::{EncodeError, ParseError, Result};
pub use parser::ParseOptions;
pub use value::Value;

/// Parse an old-style property list with default options.
///
/// # Example
///
/// ```
/// use asciiplist::parse;
///
/// let value = parse("{ a = 3; b = 4;}").unwrap();
/// assert_eq!(value.as_dict().unwrap()["a"].as_str(), Some("3"));
/// ```
pub fn parse(input: &str) -> Result<Value> {
    parse_with_options(input, &ParseOptions::default())
}

/// Parse an old-style property list with explicit grammar options.
///
/// # Example
///
/// ```
/// use asciiplist::{parse_with_options, ParseOptions};
///
/// let options = ParseOptions {
///     allow_unquoted_strings_at_root: true,
///     ..Default::default()
/// };
/// let value = parse_with_options("abc def", &options).unwrap();
/// assert_eq!(value.as_str(), Some("abc def"));
/// ```
pub fn parse_with_options(input: &str, options: &ParseOptions) -> Result<Value> {
    parser::parse_root(input, options)
}
