//! # rill-json-ast
//!
//! `rill-json-ast` turns a JSON byte buffer into a validated syntax tree
//! that keeps every literal exactly as it was written. Strings keep their
//! quotes and escapes, numbers stay text. Nothing is decoded, so callers
//! can inspect a document byte-for-byte or plug in their own number and
//! string decoding without losing precision.
//!
//! ## Key Features
//!
//! * **Source-preserving:** every `Literal` and key is a byte slice of the
//!   input. String contents are passed through unchecked, invalid UTF-8
//!   included.
//! * **Lazy tokenizer:** an `Iterator` of `Token`s, ending in exactly one
//!   `Eof` or `Illegal` token.
//! * **First defect wins:** lexical and grammar errors come through one
//!   channel; the first one aborts the parse and no partial tree is returned.
//! * **Bounded:** nesting depth is capped, and an input size cap can be
//!   opted into, via `ParseOptions`.
//!
//! ## Quick Start
//!
//! ```
//! use rill_json_ast::{parse, LiteralKind};
//!
//! let document = parse(br#"{"price": 1.10}"#).unwrap();
//! let object = document.root.as_object().unwrap();
//! let element = &object.elements[0];
//! assert_eq!(element.key_str(), Ok(r#""price""#));
//!
//! let literal = element.value.as_literal().unwrap();
//! assert_eq!(literal.kind, LiteralKind::Number);
//! assert_eq!(literal.text(), b"1.10");
//! ```
//!
//! Errors carry the exact diagnostic text:
//!
//! ```
//! let err = rill_json_ast::parse(b"[1, 2, 3][1, 2, 3]").unwrap_err();
//! assert_eq!(err.to_string(), "expected TokenEof but found TokenLbrack");
//! ```

/// Contains the syntax tree types.
pub mod ast;
/// Contains the primary `ParseError` type for the library.
pub mod error;
/// Contains the recursive-descent `Parser`.
pub mod parser;
/// Contains the `Token` and `TokenKind` types.
pub mod token;
/// Contains the lazy, byte-based `Tokenizer`.
pub mod tokenizer;

pub use ast::{Array, Document, Element, Literal, LiteralKind, Object, Value};
pub use error::{ErrorKind, ParseError};
pub use parser::Parser;
pub use token::{Token, TokenKind};
pub use tokenizer::Tokenizer;

// --- Constants ---
/// The default maximum nesting depth (e.g., `[[[]]]`) to prevent stack
/// overflows. Matches `serde_json`'s recursion limit.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Limits applied by [`parse_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// The deepest allowed nesting of objects and arrays.
    pub max_depth: usize,
    /// The largest accepted input, in bytes. Unbounded by default.
    pub max_input_len: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_len: usize::MAX,
        }
    }
}

/// Splits `input` into a lazy stream of tokens.
///
/// The stream ends with exactly one terminal token: `Eof` if the whole
/// input is lexically valid, otherwise `Illegal` carrying the message of
/// the first defect. Each call is independent of any other.
///
/// # Examples
/// ```
/// use rill_json_ast::{tokenize, TokenKind};
///
/// let kinds: Vec<TokenKind> = tokenize(b"[true]").map(|t| t.kind).collect();
/// assert_eq!(
///     kinds,
///     vec![TokenKind::LBracket, TokenKind::True, TokenKind::RBracket, TokenKind::Eof]
/// );
/// ```
pub fn tokenize(input: &[u8]) -> Tokenizer<'_> {
    Tokenizer::new(input)
}

/// Parses `input` into a `Document` using the default `ParseOptions`.
///
/// Inputs of any size are accepted. Objects and arrays may nest at most
/// [`DEFAULT_MAX_DEPTH`] levels deep; use [`parse_with`] to change that or
/// to cap the input size.
///
/// # Errors
/// Returns the first lexical or grammar error in the input, or a limit
/// error (`maximum nesting depth exceeded`) for documents nested deeper
/// than [`DEFAULT_MAX_DEPTH`].
pub fn parse(input: &[u8]) -> Result<Document<'_>, ParseError> {
    parse_with(input, &ParseOptions::default())
}

/// Parses `input` into a `Document` under explicit `options`.
///
/// # Errors
/// Returns a `ParseError` if the input exceeds `options.max_input_len`
/// *before* parsing begins, and otherwise the first defect found.
pub fn parse_with<'a>(input: &'a [u8], options: &ParseOptions) -> Result<Document<'a>, ParseError> {
    tracing::debug!(len = input.len(), max_depth = options.max_depth, "parsing");

    if input.len() > options.max_input_len {
        tracing::debug!(limit = options.max_input_len, "input rejected");
        return Err(ParseError::new(
            ErrorKind::Limit,
            "input exceeds maximum size limit",
            1,
            1,
        ));
    }

    let result = Parser::new(input, options.max_depth).parse();
    match &result {
        Ok(_) => tracing::debug!("parsed"),
        Err(e) => tracing::debug!(error = %e, line = e.line, column = e.column, "parse failed"),
    }
    result
}

// --- Test Module ---
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value as SerdeValue;

    fn parse_str(input: &str) -> Result<Document<'_>, ParseError> {
        parse(input.as_bytes())
    }

    fn parse_err(input: &str) -> String {
        match parse_str(input) {
            Ok(document) => panic!("expected an error for {:?}, got {:?}", input, document),
            Err(e) => e.message,
        }
    }

    fn literal(value: &Value) -> (LiteralKind, String) {
        let literal = value.as_literal().expect("literal");
        (literal.kind, literal.to_str().unwrap().to_string())
    }

    /// Checks that our tree has the same shape as serde_json's reading of
    /// the same text, without relying on serde's decoded leaves.
    fn assert_same_shape(ours: &Value, theirs: &SerdeValue) {
        match (ours, theirs) {
            (Value::Object(object), SerdeValue::Object(map)) => {
                // serde_json collapses duplicate keys; these fixtures have none.
                assert_eq!(object.len(), map.len());
                for element in object.iter() {
                    let key: String = serde_json::from_slice(&element.key).unwrap();
                    assert_same_shape(&element.value, &map[&key]);
                }
            }
            (Value::Array(array), SerdeValue::Array(items)) => {
                assert_eq!(array.len(), items.len());
                for (value, item) in array.iter().zip(items) {
                    assert_same_shape(value, item);
                }
            }
            (Value::Literal(literal), theirs) => {
                let reparsed: SerdeValue = serde_json::from_slice(&literal.text).unwrap();
                assert_eq!(&reparsed, theirs);
                let expected_kind = match theirs {
                    SerdeValue::String(_) => LiteralKind::String,
                    SerdeValue::Number(_) => LiteralKind::Number,
                    SerdeValue::Bool(true) => LiteralKind::True,
                    SerdeValue::Bool(false) => LiteralKind::False,
                    SerdeValue::Null => LiteralKind::Null,
                    other => panic!("unexpected serde value {:?}", other),
                };
                assert_eq!(literal.kind, expected_kind);
            }
            (ours, theirs) => panic!("shape mismatch: {:?} vs {:?}", ours, theirs),
        }
    }

    #[test]
    fn test_parse_top_level_literals() {
        let document = parse_str("true").unwrap();
        assert_eq!(literal(&document.root), (LiteralKind::True, "true".to_string()));

        let document = parse_str(r#""ab\"cd\"""#).unwrap();
        assert_eq!(
            literal(&document.root),
            (LiteralKind::String, r#""ab\"cd\"""#.to_string())
        );

        let document = parse_str("  -0.5e-7\n").unwrap();
        assert_eq!(literal(&document.root), (LiteralKind::Number, "-0.5e-7".to_string()));

        let document = parse_str("null").unwrap();
        assert_eq!(literal(&document.root), (LiteralKind::Null, "null".to_string()));
    }

    #[test]
    fn test_parse_simple_object() {
        let document = parse_str(r#"{"foo": 123}"#).unwrap();
        let object = document.root.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object.elements[0].key_str(), Ok(r#""foo""#));
        assert_eq!(
            literal(&object.elements[0].value),
            (LiteralKind::Number, "123".to_string())
        );
    }

    #[test]
    fn test_parse_array_of_numbers() {
        let document = parse_str("[1.23, 2e3, -4.5E6, null]").unwrap();
        let values: Vec<(LiteralKind, String)> =
            document.root.as_array().unwrap().iter().map(literal).collect();
        assert_eq!(
            values,
            vec![
                (LiteralKind::Number, "1.23".to_string()),
                (LiteralKind::Number, "2e3".to_string()),
                (LiteralKind::Number, "-4.5E6".to_string()),
                (LiteralKind::Null, "null".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_nested_document() {
        let document =
            parse_str(r#"{"foo": 123, "bar": [345, "pqr", true], "abc": "xyz"}"#).unwrap();
        let object = document.root.as_object().unwrap();
        let keys: Vec<&str> = object.iter().map(|e| e.key_str().unwrap()).collect();
        assert_eq!(keys, vec![r#""foo""#, r#""bar""#, r#""abc""#]);

        let array = object.elements[1].value.as_array().unwrap();
        let texts: Vec<&[u8]> = array.iter().filter_map(Value::as_literal).map(Literal::text).collect();
        assert_eq!(texts, vec![&b"345"[..], &br#""pqr""#[..], &b"true"[..]]);
    }

    #[test]
    fn test_parse_empty_collections() {
        let document = parse_str("{}").unwrap();
        assert!(document.root.as_object().unwrap().is_empty());

        let document = parse_str("[ ]").unwrap();
        assert!(document.root.as_array().unwrap().is_empty());

        let document = parse_str(r#"{"a": {}, "b": [], "c": [{}, []]}"#).unwrap();
        let object = document.root.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert_eq!(object.elements[2].value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_parse_keeps_duplicate_keys_in_order() {
        let document = parse_str(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
        let pairs: Vec<(String, String)> = document
            .root
            .as_object()
            .unwrap()
            .iter()
            .map(|e| (e.key_str().unwrap().to_string(), literal(&e.value).1))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (r#""a""#.to_string(), "1".to_string()),
                (r#""b""#.to_string(), "2".to_string()),
                (r#""a""#.to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_preserves_raw_literals() {
        let input = r#"[9007199254740993, 1.000000000000000000001, "😐", "tab\tquote\""]"#;
        let document = parse_str(input).unwrap();
        let texts: Vec<&str> = document
            .root
            .as_array()
            .unwrap()
            .iter()
            .filter_map(Value::as_literal)
            .map(|literal| literal.to_str().unwrap())
            .collect();
        assert_eq!(
            texts,
            vec![
                "9007199254740993",
                "1.000000000000000000001",
                r#""😐""#,
                r#""tab\tquote\"""#,
            ]
        );
        // Every text is a slice of the input.
        for text in texts {
            assert!(input.contains(text));
        }
    }

    #[test]
    fn test_parse_passes_invalid_utf8_through() {
        let input = b"[\"caf\xe9\"]";
        let kinds: Vec<TokenKind> = tokenize(input).map(|t| t.kind).collect();
        assert_eq!(kinds.last(), Some(&TokenKind::Eof));

        let document = parse(input).unwrap();
        let array = document.root.as_array().unwrap();
        let literal = array.values[0].as_literal().unwrap();
        assert_eq!(literal.kind, LiteralKind::String);
        assert_eq!(literal.text(), b"\"caf\xe9\"");
        assert!(literal.to_str().is_err());
    }

    #[test]
    fn test_parse_matches_serde_shape() {
        for input in [
            r#"{"name": "Babbage", "age": 30, "admin": true, "friends": ["Ada", "Charles"]}"#,
            r#"[{"id": 1, "done": false}, {"id": 2, "done": true, "tags": []}, null]"#,
            r#"{"nested": {"key": [null, 1, 1.23e4, -0.5, "é\n"]}}"#,
            r#""just a string""#,
        ] {
            let ours = parse_str(input).unwrap();
            let theirs: SerdeValue = serde_json::from_str(input).unwrap();
            assert_same_shape(&ours.root, &theirs);
        }
    }

    #[test]
    fn test_parse_is_idempotent() {
        let input = br#"{"k": [1, {"x": "y"}, false], "k": null}"#;
        assert_eq!(parse(input).unwrap(), parse(input).unwrap());
    }

    #[test]
    fn test_lexical_errors_surface_verbatim() {
        for input in [
            "True",
            "t",
            "falsee",
            "faLse",
            "nul",
            r#""str"#,
            r#"""#,
            r#""ab\""#,
            r#""ab\x""#,
            r#""\uD83D\uDE1""#,
            r#""\u007t""#,
            r#""\u00"#,
            "1.2.3",
            "+1.2",
            "-.1",
            "1.2f3",
            "1Y3",
            "1%3",
            "1.2e*3",
            "1.2e3e3",
            r#"{"foo": 123)"#,
        ] {
            let illegal = tokenize(input.as_bytes()).last().unwrap();
            assert_eq!(illegal.kind, TokenKind::Illegal, "input {:?}", input);

            let err = parse_str(input).unwrap_err();
            assert_eq!(err.kind, ErrorKind::Lexical, "input {:?}", input);
            assert_eq!(err.message.as_bytes(), &*illegal.text, "input {:?}", input);
        }
    }

    #[test]
    fn test_grammar_errors() {
        assert_eq!(parse_err(r#"{"foo", 123)"#), "expected TokenColon but found TokenComma");
        assert_eq!(parse_err(r#"{"foo": 123]"#), "expected TokenComma but found TokenRbrack");
        assert_eq!(parse_err("{abc: 123}"), "unexpected character a");
        assert_eq!(parse_err(r#"{"foo": 123)"#), "unexpected character )");
        assert_eq!(parse_err("{true: 123}"), "expected string key but found true");
        assert_eq!(parse_err("{123: 456}"), "expected string key but found 123");
        assert_eq!(parse_err("[true: false]"), "expected TokenComma but found TokenColon");
        assert_eq!(parse_err("[true: false}"), "expected TokenComma but found TokenColon");
        assert_eq!(parse_err("[true, false}"), "expected TokenComma but found TokenRbrace");
        assert_eq!(
            parse_err(r#"{"foo": [true, false}}"#),
            "expected TokenComma but found TokenRbrace"
        );
        assert_eq!(
            parse_err(r#"{"foo": 123, "bar": [345, "pqr", true], "abc", "xyz"}"#),
            "expected TokenColon but found TokenComma"
        );
        assert_eq!(
            parse_err(r#"{"foo": 123} "bar": [345, "pqr", true], "abc": "xyz"}"#),
            "expected TokenEof but found TokenString"
        );
        assert_eq!(parse_err("[1, 2, 3][1, 2, 3]"), "expected TokenEof but found TokenLbrack");
    }

    #[test]
    fn test_grammar_error_edge_cases() {
        assert_eq!(parse_err(""), "unexpected token ");
        assert_eq!(parse_err("   "), "unexpected token ");
        assert_eq!(parse_err("]"), "unexpected token ]");
        assert_eq!(parse_err("[1,]"), "unexpected token ]");
        assert_eq!(parse_err("[,1]"), "unexpected token ,");
        assert_eq!(parse_err(r#"{"a": 1,}"#), "expected string key but found }");
        assert_eq!(parse_err(r#"{"a" 1}"#), "expected TokenColon but found TokenNumber");
        assert_eq!(parse_err("[1"), "expected TokenComma but found TokenEof");
        assert_eq!(parse_err(r#"{"a": 1"#), "expected TokenComma but found TokenEof");
        // The key is consumed before it is checked, so the lexical error after it wins.
        assert_eq!(parse_err("{true)"), "unexpected character )");
        assert_eq!(parse_err("{} {}"), "expected TokenEof but found TokenLbrace");
        assert_eq!(parse_err("1 2"), "expected TokenEof but found TokenNumber");
    }

    #[test]
    fn test_grammar_error_before_lexical_error_wins() {
        // The tokenizer would fail at `?`, but the parser never pulls that far.
        let err = parse_str(r#"{"a" "b" ?}"#).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Grammar);
        assert_eq!(err.message, "expected TokenColon but found TokenString");
    }

    #[test]
    fn test_size_limit() {
        assert_eq!(ParseOptions::default().max_input_len, usize::MAX);
        let large = " ".repeat(11 << 20) + "1";
        assert!(parse_str(&large).is_ok());

        let options = ParseOptions {
            max_input_len: 8,
            ..ParseOptions::default()
        };
        let err = parse_with(b"[1, 2, 3, 4]", &options).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Limit);
        assert_eq!(err.message, "input exceeds maximum size limit");
        assert!(parse_with(b"[1, 2]", &options).is_ok());
    }

    #[test]
    fn test_default_depth_limit() {
        let input = "[".repeat(101) + &"]".repeat(101);
        assert!(parse_str(&input).is_ok());

        let ok_input = "[".repeat(DEFAULT_MAX_DEPTH) + &"]".repeat(DEFAULT_MAX_DEPTH);
        assert!(parse_str(&ok_input).is_ok());

        let evil_input = "[".repeat(DEFAULT_MAX_DEPTH + 1) + &"]".repeat(DEFAULT_MAX_DEPTH + 1);
        let err = parse_str(&evil_input).unwrap_err();
        assert_eq!(err.message, "maximum nesting depth exceeded");
        assert_eq!(err.column, DEFAULT_MAX_DEPTH + 1);
    }

    #[test]
    fn test_tokenize_is_independent_per_call() {
        let input = br#"{"a": [1, 2]}"#;
        let first: Vec<Token> = tokenize(input).collect();
        let second: Vec<Token> = tokenize(input).collect();
        assert_eq!(first, second);
        assert_eq!(first.last().map(|t| t.kind), Some(TokenKind::Eof));
    }
}
