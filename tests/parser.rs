//! Grammar catalog for the ASCII plist parser.
//!
//! One test per accepted form and per diagnostic. Error assertions match on
//! message substrings, so wording changes to the static parts of a message
//! are caught while offsets stay free to move.

use asciiplist::{parse, parse_with_options, ParseError, ParseOptions, Value};
use indexmap::IndexMap;

fn assert_err_contains(result: Result<Value, ParseError>, needle: &str) -> ParseError {
    let err = result.unwrap_err();
    let message = err.to_string();
    assert!(
        message.contains(needle),
        "expected {:?} in {:?}",
        needle,
        message
    );
    err
}

// ============================================================================
// Accepted forms
// ============================================================================

#[test]
fn test_root_array() {
    let value = parse("(3, abc)").unwrap();
    assert_eq!(
        value,
        Value::Array(vec![Value::from("3"), Value::from("abc")])
    );
}

#[test]
fn test_root_dict() {
    let value = parse("{ a = 3; b = 4;}").unwrap();
    let dict = value.as_dict().unwrap();
    assert_eq!(dict.len(), 2);
    assert_eq!(dict["a"].as_str(), Some("3"));
    assert_eq!(dict["b"].as_str(), Some("4"));
}

#[test]
fn test_root_string_unquoted_word() {
    assert_eq!(parse("abc").unwrap(), Value::from("abc"));
}

#[test]
fn test_root_string_quoted() {
    assert_eq!(parse("\"abc\"").unwrap(), Value::from("abc"));
}

#[test]
fn test_root_string_quoted_with_unicode() {
    assert_eq!(
        parse("\"ab\u{1234}c\"").unwrap(),
        Value::from("ab\u{1234}c")
    );
}

#[test]
fn test_root_angled_bracket_string() {
    let options = ParseOptions {
        allow_angled_bracket_strings: true,
        ..Default::default()
    };
    assert_eq!(
        parse_with_options("<\"abc\">", &options).unwrap(),
        Value::from("abc")
    );
}

#[test]
fn test_root_unquoted_string() {
    let options = ParseOptions {
        allow_unquoted_strings_at_root: true,
        ..Default::default()
    };
    assert_eq!(
        parse_with_options("abc def", &options).unwrap(),
        Value::from("abc def")
    );
}

#[test]
fn test_quoted_string_with_escaped_quote() {
    // Backslash-quote is the only escape; the backslash drops and the
    // quote becomes data.
    assert_eq!(parse(r#""ab\"c""#).unwrap(), Value::from("ab\"c"));
}

#[test]
fn test_quoted_string_keeps_lone_backslash() {
    assert_eq!(parse(r#""ab\c""#).unwrap(), Value::from("ab\\c"));
}

#[test]
fn test_angled_bracket_string_with_escaped_quote() {
    let options = ParseOptions {
        allow_angled_bracket_strings: true,
        ..Default::default()
    };
    assert_eq!(
        parse_with_options(r#"<"ab\"c">"#, &options).unwrap(),
        Value::from("ab\"c")
    );
}

#[test]
fn test_root_data_hex() {
    assert_eq!(parse("<a3 1f>").unwrap(), Value::Data(vec![0xa, 3, 1, 0xf]));
}

#[test]
fn test_root_data_hex_upper_case() {
    assert_eq!(parse("<A3 1F>").unwrap(), Value::Data(vec![0xa, 3, 1, 0xf]));
}

#[test]
fn test_data_round_trips_to_digit_string() {
    let value = parse("<0A3F 12>").unwrap();
    let hex: String = value
        .as_data()
        .unwrap()
        .iter()
        .map(|d| format!("{:x}", d))
        .collect();
    assert_eq!(hex, "0a3f12");
}

#[test]
fn test_nested_dict_in_dict() {
    let value = parse("{ a = { inner = \"abc\"; }; b = 4;}").unwrap();
    let dict = value.as_dict().unwrap();
    assert_eq!(dict["a"].as_dict().unwrap()["inner"].as_str(), Some("abc"));
    assert_eq!(dict["b"].as_str(), Some("4"));
}

#[test]
fn test_nested_array_in_array() {
    let value = parse("( a, (inner), b, c)").unwrap();
    assert_eq!(
        value,
        Value::Array(vec![
            Value::from("a"),
            Value::Array(vec![Value::from("inner")]),
            Value::from("b"),
            Value::from("c"),
        ])
    );
}

#[test]
fn test_nested_dict_in_array() {
    let value = parse("( a, {inner = \"ggg\";}, b, c)").unwrap();
    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[1].as_dict().unwrap()["inner"].as_str(), Some("ggg"));
}

#[test]
fn test_nested_array_in_dict() {
    let value = parse("{ a = ( \"inner\" ); b = 4;}").unwrap();
    let dict = value.as_dict().unwrap();
    assert_eq!(
        dict["a"],
        Value::Array(vec![Value::from("inner")])
    );
}

#[test]
fn test_nested_with_all_types() {
    let value = parse(
        "{ a = ( \"inner\" ); \
         b = \"4\"; \
         c = <0a3f>; \
         d = { efg = hij; kl = 55; mm = (abc, def); }; \
         n = (); oo = {}; }",
    )
    .unwrap();
    let dict = value.as_dict().unwrap();
    assert_eq!(dict["a"], Value::Array(vec![Value::from("inner")]));
    assert_eq!(dict["b"].as_str(), Some("4"));
    assert_eq!(dict["c"], Value::Data(vec![0, 0xa, 3, 0xf]));
    let d = dict["d"].as_dict().unwrap();
    assert_eq!(d["efg"].as_str(), Some("hij"));
    assert_eq!(d["kl"].as_str(), Some("55"));
    assert_eq!(
        d["mm"],
        Value::Array(vec![Value::from("abc"), Value::from("def")])
    );
    assert_eq!(dict["n"], Value::Array(vec![]));
    assert_eq!(dict["oo"], Value::Dict(IndexMap::new()));
}

#[test]
fn test_dict_keys_keep_input_order() {
    let value = parse("{ z = 1; m = 2; a = 3; }").unwrap();
    let keys: Vec<&String> = value.as_dict().unwrap().keys().collect();
    assert_eq!(keys, ["z", "m", "a"]);
}

// ============================================================================
// Structural errors
// ============================================================================

#[test]
fn test_erring_bad_root_unquoted_unicode() {
    let err = assert_err_contains(parse("\u{1234}"), "Unexpected character");
    assert!(err
        .to_string()
        .contains("after root processed on first run"));
    assert!(!err.is_premature_end());
}

#[test]
fn test_erring_unquoted_string_not_at_root() {
    let options = ParseOptions {
        allow_unquoted_strings_at_root: true,
        ..Default::default()
    };
    assert_err_contains(
        parse_with_options("(abc def)", &options),
        "Missing comma between array items",
    );
    assert_err_contains(
        parse_with_options("{a=abc def=ggg;}", &options),
        "Missing semi-colon between dict items",
    );
}

#[test]
fn test_erring_bad_data_hex() {
    assert_err_contains(parse("<g>"), "Invalid data (hex) end character");
}

#[test]
fn test_erring_angled_bracket_bad_character_after_quote() {
    let options = ParseOptions {
        allow_angled_bracket_strings: true,
        ..Default::default()
    };
    assert_err_contains(
        parse_with_options("<\"string\"x", &options),
        "Angled bracket string closing bracket expected but found",
    );
}

#[test]
fn test_erring_escaped_quote_outside_quoted_string() {
    let err = assert_err_contains(parse("abc\\\""), "Unexpected character");
    assert!(err
        .to_string()
        .contains("after root processed on first run"));
}

#[test]
fn test_erring_unexpected_dict_closing() {
    assert_err_contains(parse("(a, b})"), "Unexpected close for dict at");
}

#[test]
fn test_erring_unexpected_array_closing() {
    assert_err_contains(parse("{a = );}"), "Unexpected close for array at");
}

#[test]
fn test_erring_missing_comma_within_array() {
    assert_err_contains(parse("(a b)"), "Missing comma between array items");
}

#[test]
fn test_erring_missing_semi_colon_within_dict() {
    assert_err_contains(parse("{a=1 b=2;}"), "Missing semi-colon between dict items");
}

#[test]
fn test_erring_missing_semi_colon_before_close() {
    assert_err_contains(parse("{a=1}"), "Missing semi-colon between dict items");
}

#[test]
fn test_erring_missing_equals_within_dict() {
    assert_err_contains(
        parse("{a 1; b=2;)"),
        "Expecting \"=\" character after dict key",
    );
}

#[test]
fn test_erring_missing_value_within_dict() {
    assert_err_contains(
        parse("{a= ; b=2;)"),
        "Unexpected semi-colon during non-dict mode",
    );
}

#[test]
fn test_erring_array_comma_within_dict() {
    assert_err_contains(parse("{a = b,}"), "Unexpected comma during non-array mode");
}

#[test]
fn test_erring_dict_semi_colon_within_array() {
    assert_err_contains(
        parse("(a, b;)"),
        "Unexpected semi-colon during non-dict mode",
    );
}

#[test]
fn test_erring_word_after_dict_key() {
    assert_err_contains(parse("{a b;}"), "Expecting \"=\" character after dict key");
}

#[test]
fn test_erring_unexpected_character_after_root() {
    let err = assert_err_contains(parse("\"abc\" g"), "Unexpected character");
    assert!(err
        .to_string()
        .contains("after root processed on first run"));
}

// ============================================================================
// Truncation errors
// ============================================================================

#[test]
fn test_erring_whitespace_only_input() {
    for input in ["", "   ", " \t\n "] {
        let err = assert_err_contains(parse(input), "No non-whitespace input found");
        assert!(err.is_premature_end());
    }
}

#[test]
fn test_erring_unfinished_quoted_string() {
    let err = assert_err_contains(parse("\"abc"), "Unexpected end of quoted string at offset");
    assert!(err.is_premature_end());
}

#[test]
fn test_erring_unfinished_quoted_string_after_backslash() {
    let err = assert_err_contains(
        parse("\"ab\\"),
        "Unexpected end of quoted string (after backslash)",
    );
    assert!(err.is_premature_end());
}

#[test]
fn test_erring_unfinished_angled_bracket_string() {
    let options = ParseOptions {
        allow_angled_bracket_strings: true,
        ..Default::default()
    };
    let err = assert_err_contains(
        parse_with_options("<\"abc", &options),
        "Unexpected end of quoted string at offset",
    );
    assert!(err.is_premature_end());
}

#[test]
fn test_erring_unfinished_angled_bracket_string_after_backslash() {
    let options = ParseOptions {
        allow_angled_bracket_strings: true,
        ..Default::default()
    };
    let err = assert_err_contains(
        parse_with_options("<\"ab\\", &options),
        "Unexpected end of quoted string (after backslash)",
    );
    assert!(err.is_premature_end());
}

#[test]
fn test_erring_incomplete_data_hex() {
    let err = assert_err_contains(parse("<abc1"), "Premature end to data (hex)");
    assert!(err.is_premature_end());
}

#[test]
fn test_erring_incomplete_angled_bracket_string() {
    let options = ParseOptions {
        allow_angled_bracket_strings: true,
        ..Default::default()
    };
    let err = assert_err_contains(
        parse_with_options("<\"abc\"", &options),
        "Premature end to angled bracket string",
    );
    assert!(err.is_premature_end());
}

#[test]
fn test_erring_incomplete_array() {
    let err = assert_err_contains(parse("(abc"), "Premature end to array");
    assert!(err.is_premature_end());
}

#[test]
fn test_erring_incomplete_dict_before_key() {
    let err = assert_err_contains(parse("{"), "Premature end to dict (before key)");
    assert!(err.is_premature_end());
}

#[test]
fn test_erring_incomplete_dict_before_equals() {
    let err = assert_err_contains(parse("{abc"), "Premature end to dict (before equals)");
    assert!(err.is_premature_end());
}

#[test]
fn test_erring_incomplete_dict_after_equals() {
    let err = assert_err_contains(parse("{abc="), "Premature end to dict (after equals)");
    assert!(err.is_premature_end());
}

#[test]
fn test_erring_incomplete_dict_before_semi_colon() {
    let err = assert_err_contains(parse("{abc=def"), "Premature end to dict (before semi-colon)");
    assert!(err.is_premature_end());
}

#[test]
fn test_erring_incomplete_dict_after_semi_colon() {
    let err = assert_err_contains(parse("{abc=def;"), "Premature end to dict (after semi-colon)");
    assert!(err.is_premature_end());
}

#[test]
fn test_structural_errors_are_not_premature_ends() {
    for input in ["(a b)", "{a=1 b=2;}", "(a, b})", "<g>", "{a = b,}"] {
        let err = parse(input).unwrap_err();
        assert!(
            !err.is_premature_end(),
            "expected structural classification for {:?}",
            input
        );
    }
}

// ============================================================================
// Resource bounds
// ============================================================================

#[test]
fn test_adversarial_nesting_depth_is_diagnosed() {
    let input: String = std::iter::repeat('(').take(10_000).collect();
    let err = assert_err_contains(parse(&input), "Maximum nesting depth");
    assert!(!err.is_premature_end());
}
