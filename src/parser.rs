//! Recursive-descent parser for old-style (ASCII) property lists.
//!
//! The grammar dispatches on the first significant character of a value:
//!
//! - `(` arrays and `{` dicts, mutually recursive with the dispatcher
//! - `"` quoted strings (backslash escapes a following quote, nothing else)
//! - `<"` angled bracket strings, behind [`ParseOptions`]
//! - `<` hex data literals, one element per digit
//! - word runs for dict keys and simple unquoted scalars
//!
//! Errors are raised at the first offending token with its character
//! offset; the parser never recovers, never returns a partial tree, and
//! keeps no state between calls.

use crate::error::{ParseError, Result};
use crate::scanner::{is_space, is_word_char, Scanner};
use crate::value::Value;
use indexmap::IndexMap;

/// Containers nested deeper than this fail with
/// [`ParseError::DepthLimitExceeded`] instead of exhausting the native
/// stack on adversarial input.
const MAX_DEPTH: usize = 512;

/// Grammar options for a single parse call.
///
/// Options are immutable per call and the parser allocates all of its state
/// per call, so parses with distinct options may run concurrently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Accept `<"...">` angled bracket strings in value position. Off by
    /// default; without it a `<"` opener parses as a data literal and fails
    /// on the quote.
    pub allow_angled_bracket_strings: bool,

    /// Accept adjacent array items and dict entries with no `,`/`;`
    /// separator between them.
    pub allow_missing_separators: bool,

    /// Accept a bare, possibly multi-word string as the entire root value.
    /// This never extends into containers: a bare token inside a container
    /// still ends at its last word character, so a second word surfaces as
    /// a missing-separator error.
    pub allow_unquoted_strings_at_root: bool,

    /// Surfacing hint for callers: report data values as plain digit
    /// arrays rather than a packed byte type. Does not affect the grammar
    /// or the parse result.
    pub hex_as_arrays: bool,
}

/// Where the dispatcher sits in the document, which decides how bare
/// tokens and stray characters are diagnosed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Root,
    Container,
}

/// Parse one complete property list document.
pub(crate) fn parse_root(input: &str, options: &ParseOptions) -> Result<Value> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::NoInput);
    }
    let mut parser = Parser::new(trimmed, options);
    let value = parser.parse_value(Mode::Root, 0)?;
    parser.scanner.skip_whitespace();
    if let Some(ch) = parser.scanner.peek() {
        return Err(ParseError::UnexpectedCharAfterRoot {
            ch,
            offset: parser.scanner.offset(),
        });
    }
    Ok(value)
}

struct Parser<'a> {
    scanner: Scanner,
    options: &'a ParseOptions,
}

impl<'a> Parser<'a> {
    fn new(input: &str, options: &'a ParseOptions) -> Self {
        Parser {
            scanner: Scanner::new(input),
            options,
        }
    }

    // ========================================================================
    // Value dispatch
    // ========================================================================

    /// Parse one value starting at the next non-whitespace character,
    /// leaving the scanner just past it.
    fn parse_value(&mut self, mode: Mode, depth: usize) -> Result<Value> {
        self.scanner.skip_whitespace();
        let offset = self.scanner.offset();
        let Some(ch) = self.scanner.peek() else {
            return Err(ParseError::NoInput);
        };
        if depth > MAX_DEPTH {
            return Err(ParseError::DepthLimitExceeded {
                limit: MAX_DEPTH,
                offset,
            });
        }
        match ch {
            '(' => self.parse_array(depth),
            '{' => self.parse_dict(depth),
            '"' => {
                self.scanner.advance();
                Ok(Value::String(self.quoted_string_body()?))
            }
            '<' if self.options.allow_angled_bracket_strings
                && self.scanner.peek_at(1) == Some('"') =>
            {
                self.parse_angled_string()
            }
            '<' => {
                self.scanner.advance();
                self.parse_data()
            }
            ')' => Err(ParseError::UnexpectedCloseForArray { offset }),
            '}' => Err(ParseError::UnexpectedCloseForDict { offset }),
            ';' => Err(ParseError::UnexpectedSemiColon { offset }),
            ',' => Err(ParseError::UnexpectedComma { offset }),
            _ if mode == Mode::Root && self.options.allow_unquoted_strings_at_root => {
                Ok(Value::String(self.unquoted_root_run()))
            }
            c if is_word_char(c) => Ok(Value::String(self.word_run())),
            c => match mode {
                Mode::Root => Err(ParseError::UnexpectedCharAfterRoot { ch: c, offset }),
                Mode::Container => Err(ParseError::UnexpectedChar { ch: c, offset }),
            },
        }
    }

    // ========================================================================
    // Strings
    // ========================================================================

    /// Body of a quoted string, after the opening `"` has been consumed.
    ///
    /// A backslash followed by a quote yields one literal quote; a
    /// backslash followed by anything else stays a literal backslash. No
    /// other escapes exist in this grammar.
    fn quoted_string_body(&mut self) -> Result<String> {
        let mut out = String::new();
        loop {
            match self.scanner.advance() {
                None => {
                    return Err(ParseError::UnexpectedEndOfQuotedString {
                        offset: self.scanner.offset(),
                    })
                }
                Some('"') => return Ok(out),
                Some('\\') => match self.scanner.peek() {
                    None => {
                        return Err(ParseError::UnexpectedEndOfQuotedStringAfterBackslash {
                            offset: self.scanner.offset(),
                        })
                    }
                    Some('"') => {
                        out.push('"');
                        self.scanner.advance();
                    }
                    Some(_) => out.push('\\'),
                },
                Some(c) => out.push(c),
            }
        }
    }

    /// `<"...">`: a quoted body, then the closing `>`.
    fn parse_angled_string(&mut self) -> Result<Value> {
        self.scanner.advance(); // <
        self.scanner.advance(); // "
        let body = self.quoted_string_body()?;
        let offset = self.scanner.offset();
        match self.scanner.peek() {
            None => Err(ParseError::PrematureEndOfAngledString { offset }),
            Some('>') => {
                self.scanner.advance();
                Ok(Value::String(body))
            }
            Some(ch) => Err(ParseError::AngledStringClosingBracketExpected { ch, offset }),
        }
    }

    /// Maximal run of word characters.
    fn word_run(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.scanner.peek() {
            if !is_word_char(c) {
                break;
            }
            out.push(c);
            self.scanner.advance();
        }
        out
    }

    /// Root-only bare string: everything up to a structural delimiter or
    /// end of input, trailing whitespace dropped.
    fn unquoted_root_run(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.scanner.peek() {
            if matches!(c, '(' | ')' | '{' | '}' | '<' | '>' | ',' | ';' | '"') {
                break;
            }
            out.push(c);
            self.scanner.advance();
        }
        out.trim_end().to_string()
    }

    // ========================================================================
    // Data (hex)
    // ========================================================================

    /// Data body, after the opening `<` has been consumed. Each digit
    /// becomes one element with its numeric value; digits are not packed
    /// into byte pairs, which is what lets the literal round-trip exactly.
    /// Interior whitespace is stripped and an odd digit count is legal.
    fn parse_data(&mut self) -> Result<Value> {
        let mut digits = Vec::new();
        loop {
            let offset = self.scanner.offset();
            match self.scanner.peek() {
                None => return Err(ParseError::PrematureEndOfData { offset }),
                Some('>') => {
                    self.scanner.advance();
                    return Ok(Value::Data(digits));
                }
                Some(c) => {
                    if let Some(digit) = c.to_digit(16) {
                        digits.push(digit as u8);
                    } else if !is_space(c) {
                        return Err(ParseError::InvalidDataEndChar { ch: c, offset });
                    }
                    self.scanner.advance();
                }
            }
        }
    }

    // ========================================================================
    // Arrays
    // ========================================================================

    fn parse_array(&mut self, depth: usize) -> Result<Value> {
        self.scanner.advance(); // (
        let mut items = Vec::new();
        loop {
            self.scanner.skip_whitespace();
            match self.scanner.peek() {
                None => {
                    return Err(ParseError::PrematureEndOfArray {
                        offset: self.scanner.offset(),
                    })
                }
                // Also closes after a trailing comma.
                Some(')') => {
                    self.scanner.advance();
                    return Ok(Value::Array(items));
                }
                Some(_) => {}
            }
            items.push(self.parse_value(Mode::Container, depth + 1)?);

            self.scanner.skip_whitespace();
            let offset = self.scanner.offset();
            match self.scanner.peek() {
                None => return Err(ParseError::PrematureEndOfArray { offset }),
                Some(')') => {
                    self.scanner.advance();
                    return Ok(Value::Array(items));
                }
                Some(',') => {
                    self.scanner.advance();
                }
                Some(';') => return Err(ParseError::UnexpectedSemiColon { offset }),
                Some('}') => return Err(ParseError::UnexpectedCloseForDict { offset }),
                Some(_) if self.options.allow_missing_separators => {}
                Some(_) => return Err(ParseError::MissingComma { offset }),
            }
        }
    }

    // ========================================================================
    // Dicts
    // ========================================================================

    fn parse_dict(&mut self, depth: usize) -> Result<Value> {
        self.scanner.advance(); // {
        let mut entries = IndexMap::new();
        loop {
            self.scanner.skip_whitespace();
            match self.scanner.peek() {
                None => {
                    return Err(ParseError::PrematureEndOfDictBeforeKey {
                        offset: self.scanner.offset(),
                    })
                }
                Some('}') => {
                    self.scanner.advance();
                    return Ok(Value::Dict(entries));
                }
                Some(_) => {}
            }
            let key = self.parse_dict_key()?;

            self.scanner.skip_whitespace();
            let offset = self.scanner.offset();
            match self.scanner.peek() {
                None => return Err(ParseError::PrematureEndOfDictBeforeEquals { offset }),
                Some('=') => {
                    self.scanner.advance();
                }
                Some(ch) => return Err(ParseError::ExpectingEqualsAfterKey { ch, offset }),
            }

            self.scanner.skip_whitespace();
            if self.scanner.at_end() {
                return Err(ParseError::PrematureEndOfDictAfterEquals {
                    offset: self.scanner.offset(),
                });
            }
            let value = self.parse_value(Mode::Container, depth + 1)?;
            // A repeated key keeps its position and takes the new value.
            entries.insert(key, value);

            self.scanner.skip_whitespace();
            let offset = self.scanner.offset();
            match self.scanner.peek() {
                None => return Err(ParseError::PrematureEndOfDictBeforeSemiColon { offset }),
                Some(';') => {
                    self.scanner.advance();
                    self.scanner.skip_whitespace();
                    if self.scanner.at_end() {
                        return Err(ParseError::PrematureEndOfDictAfterSemiColon {
                            offset: self.scanner.offset(),
                        });
                    }
                }
                Some(',') => return Err(ParseError::UnexpectedComma { offset }),
                Some(')') => return Err(ParseError::UnexpectedCloseForArray { offset }),
                Some(_) if self.options.allow_missing_separators => {}
                Some(_) => return Err(ParseError::MissingSemiColon { offset }),
            }
        }
    }

    /// Dict keys are word tokens or quoted strings; a quoted empty string
    /// is a legal key.
    fn parse_dict_key(&mut self) -> Result<String> {
        let offset = self.scanner.offset();
        match self.scanner.peek() {
            None => Err(ParseError::PrematureEndOfDictBeforeKey { offset }),
            Some('"') => {
                self.scanner.advance();
                self.quoted_string_body()
            }
            Some(c) if is_word_char(c) => Ok(self.word_run()),
            Some(c) => Err(ParseError::UnexpectedChar { ch: c, offset }),
        }
    }
}
