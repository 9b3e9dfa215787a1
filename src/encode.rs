//! Encode native values as XML property list markup.
//!
//! The encoder is the value-semantics inverse of the ASCII parser, not its
//! grammar inverse: it consumes booleans, numbers, dates, and byte data
//! that the ASCII grammar only ever spells as strings, and renders the
//! plist 1.0 XML elements for each.
//!
//! Note the packing asymmetry with the parser: [`XmlValue::Data`] packs its
//! hex digits two per byte for base64 `<data>` output, while the parser's
//! [`Value::Data`] keeps one element per digit so the original literal can
//! be reproduced.

use crate::error::EncodeError;
use crate::value::Value;
use base64::prelude::*;
use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use num_bigint::BigInt;
use num_traits::ToPrimitive;

/// Fixed plist 1.0 document envelope, up to and including the opening
/// `<plist>` tag.
const XML_HEADER: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
<!DOCTYPE plist PUBLIC \"-//Apple//DTD PLIST 1.0//EN\" \"http://www.apple.com/DTDs/PropertyList-1.0.dtd\">\n\
<plist version=\"1.0\">\n";

/// Options for the XML encoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Keep integral reals as `<real>` instead of demoting them to
    /// `<integer>`.
    pub force_real: bool,

    /// Treat every string value (keys excluded) as a run of hex digits and
    /// emit `<data>`.
    pub force_hex: bool,
}

/// A native value renderable as XML property list markup.
///
/// This is the serialization-side value domain. Unlike [`Value`], it
/// carries booleans, numbers, dates, and data, because the XML plist
/// grammar has an element for each.
#[derive(Clone, Debug, PartialEq)]
pub enum XmlValue {
    /// `<true/>` or `<false/>`.
    Bool(bool),
    /// `<integer>`, arbitrary precision.
    Integer(BigInt),
    /// `<real>`, or `<integer>` when integral (see [`EncodeOptions`]).
    Real(f64),
    /// `<string>`, content-escaped.
    String(String),
    /// `<date>`, seconds-precision UTC.
    Date(DateTime<Utc>),
    /// `<data>`, base64 of the packed hex digits. Elements at or below
    /// 0xf contribute one digit and larger elements two, so parser nibble
    /// arrays and ordinary byte arrays are both accepted.
    Data(Vec<u8>),
    /// `<array>` of recursively encoded items.
    Array(Vec<XmlValue>),
    /// `<dict>` of alternating `<key>`/value elements in insertion order.
    Dict(IndexMap<String, XmlValue>),
}

/// Encode a value as a complete XML property list document, wrapped in the
/// fixed plist 1.0 envelope.
pub fn encode_xml(value: &XmlValue, options: &EncodeOptions) -> Result<String, EncodeError> {
    let mut out = String::from(XML_HEADER);
    write_value(value, options, 0, &mut out)?;
    out.push_str("\n</plist>\n");
    Ok(out)
}

/// Encode a value as a bare markup fragment, without the document
/// envelope.
pub fn encode_xml_fragment(
    value: &XmlValue,
    options: &EncodeOptions,
) -> Result<String, EncodeError> {
    let mut out = String::new();
    write_value(value, options, 0, &mut out)?;
    Ok(out)
}

fn write_value(
    value: &XmlValue,
    options: &EncodeOptions,
    level: usize,
    out: &mut String,
) -> Result<(), EncodeError> {
    match value {
        XmlValue::Bool(true) => out.push_str("<true/>"),
        XmlValue::Bool(false) => out.push_str("<false/>"),
        XmlValue::Integer(n) => {
            out.push_str("<integer>");
            out.push_str(&n.to_string());
            out.push_str("</integer>");
        }
        XmlValue::Real(f) => write_real(*f, options, out)?,
        XmlValue::String(s) => {
            if options.force_hex {
                let digits = string_hex_values(s)?;
                write_data(&digits, out);
            } else {
                out.push_str("<string>");
                push_escaped(s, out);
                out.push_str("</string>");
            }
        }
        XmlValue::Date(d) => {
            out.push_str("<date>");
            out.push_str(&d.to_rfc3339_opts(SecondsFormat::Secs, true));
            out.push_str("</date>");
        }
        XmlValue::Data(digits) => write_data(digits, out),
        XmlValue::Array(items) => {
            if items.is_empty() {
                out.push_str("<array/>");
            } else {
                out.push_str("<array>\n");
                for item in items {
                    push_indent(level + 1, out);
                    write_value(item, options, level + 1, out)?;
                    out.push('\n');
                }
                push_indent(level, out);
                out.push_str("</array>");
            }
        }
        XmlValue::Dict(entries) => {
            if entries.is_empty() {
                out.push_str("<dict/>");
            } else {
                out.push_str("<dict>\n");
                for (key, item) in entries {
                    push_indent(level + 1, out);
                    out.push_str("<key>");
                    push_escaped(key, out);
                    out.push_str("</key>\n");
                    push_indent(level + 1, out);
                    write_value(item, options, level + 1, out)?;
                    out.push('\n');
                }
                push_indent(level, out);
                out.push_str("</dict>");
            }
        }
    }
    Ok(())
}

/// Reals demote to `<integer>` when integral, matching how the ASCII side
/// of the toolchain reports whole numbers, unless `force_real` is set. An
/// integral real outside the `i64` range stays `<real>`.
fn write_real(f: f64, options: &EncodeOptions, out: &mut String) -> Result<(), EncodeError> {
    if f.is_nan() {
        return Err(EncodeError::NanNotAllowed);
    }
    if !options.force_real && f.fract() == 0.0 {
        if let Some(i) = f.to_i64() {
            out.push_str("<integer>");
            out.push_str(&i.to_string());
            out.push_str("</integer>");
            return Ok(());
        }
    }
    out.push_str("<real>");
    out.push_str(&f.to_string());
    out.push_str("</real>");
    Ok(())
}

/// One space per nesting level.
fn push_indent(level: usize, out: &mut String) {
    for _ in 0..level {
        out.push(' ');
    }
}

/// Escape `&`, `<`, and `>` for element content. Quotes stay literal:
/// this is never attribute text.
fn push_escaped(s: &str, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

/// `<data>` holds base64 of the packed digit string: elements render as
/// lowercase hex, the digit string is left-padded with one `0` when its
/// length is odd, and digit pairs become bytes.
fn write_data(digit_values: &[u8], out: &mut String) {
    let mut hex = String::new();
    for v in digit_values {
        hex.push_str(&format!("{:x}", v));
    }
    if hex.len() % 2 != 0 {
        hex.insert(0, '0');
    }
    let mut bytes = Vec::with_capacity(hex.len() / 2);
    for i in (0..hex.len()).step_by(2) {
        // The digit string comes from `{:x}`, so the pair is valid hex.
        bytes.push(u8::from_str_radix(&hex[i..i + 2], 16).unwrap());
    }
    out.push_str("<data>");
    out.push_str(&BASE64_STANDARD.encode(&bytes));
    out.push_str("</data>");
}

/// Encode a value as old-style ASCII property list text.
///
/// The inverse direction of [`crate::parse`] for everything the ASCII
/// grammar can spell: strings, numbers (rendered as word or quoted
/// tokens, since the grammar has no number literal), data, arrays, and
/// dicts. Booleans and dates have no old-style form and are rejected.
pub fn encode_ascii(value: &XmlValue) -> Result<String, EncodeError> {
    let mut out = String::new();
    write_ascii(value, &mut out)?;
    Ok(out)
}

fn write_ascii(value: &XmlValue, out: &mut String) -> Result<(), EncodeError> {
    match value {
        XmlValue::String(s) => push_ascii_string(s, out),
        XmlValue::Integer(n) => push_ascii_string(&n.to_string(), out),
        XmlValue::Real(f) => {
            if f.is_nan() {
                return Err(EncodeError::NanNotAllowed);
            }
            push_ascii_string(&f.to_string(), out);
        }
        XmlValue::Data(digit_values) => {
            out.push('<');
            for v in digit_values {
                out.push_str(&format!("{:x}", v));
            }
            out.push('>');
        }
        XmlValue::Array(items) => {
            out.push('(');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_ascii(item, out)?;
            }
            out.push(')');
        }
        XmlValue::Dict(entries) => {
            out.push_str("{ ");
            for (key, item) in entries {
                push_ascii_string(key, out);
                out.push_str(" = ");
                write_ascii(item, out)?;
                out.push_str("; ");
            }
            out.push('}');
        }
        XmlValue::Bool(_) | XmlValue::Date(_) => {
            return Err(EncodeError::UnrepresentableInAscii)
        }
    }
    Ok(())
}

/// Bare word tokens stay bare; anything else (including the empty string)
/// is quoted, with `"` escaped as `\"` — the grammar's only escape.
fn push_ascii_string(s: &str, out: &mut String) {
    if !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        out.push_str(s);
        return;
    }
    out.push('"');
    for c in s.chars() {
        if c == '"' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
}

/// `force_hex` reinterprets a string as its hex digit values.
fn string_hex_values(s: &str) -> Result<Vec<u8>, EncodeError> {
    s.chars()
        .map(|c| {
            c.to_digit(16)
                .map(|d| d as u8)
                .ok_or(EncodeError::InvalidHexDigit { ch: c })
        })
        .collect()
}

impl From<bool> for XmlValue {
    fn from(b: bool) -> Self {
        XmlValue::Bool(b)
    }
}

impl From<i64> for XmlValue {
    fn from(n: i64) -> Self {
        XmlValue::Integer(BigInt::from(n))
    }
}

impl From<BigInt> for XmlValue {
    fn from(n: BigInt) -> Self {
        XmlValue::Integer(n)
    }
}

impl From<f64> for XmlValue {
    fn from(f: f64) -> Self {
        XmlValue::Real(f)
    }
}

impl From<String> for XmlValue {
    fn from(s: String) -> Self {
        XmlValue::String(s)
    }
}

impl From<&str> for XmlValue {
    fn from(s: &str) -> Self {
        XmlValue::String(s.to_string())
    }
}

impl From<DateTime<Utc>> for XmlValue {
    fn from(d: DateTime<Utc>) -> Self {
        XmlValue::Date(d)
    }
}

impl From<Vec<XmlValue>> for XmlValue {
    fn from(items: Vec<XmlValue>) -> Self {
        XmlValue::Array(items)
    }
}

impl From<IndexMap<String, XmlValue>> for XmlValue {
    fn from(entries: IndexMap<String, XmlValue>) -> Self {
        XmlValue::Dict(entries)
    }
}

impl From<Value> for XmlValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => XmlValue::String(s),
            Value::Data(digits) => XmlValue::Data(digits),
            Value::Array(items) => {
                XmlValue::Array(items.into_iter().map(XmlValue::from).collect())
            }
            Value::Dict(entries) => XmlValue::Dict(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, XmlValue::from(v)))
                    .collect(),
            ),
        }
    }
}
