//! The source-preserving JSON syntax tree.
//!
//! Nodes own their children exclusively and keep source order. Keys and
//! literal texts are the raw lexemes borrowed from the input: string
//! keys keep their quotes, escapes stay escaped, numbers stay text.
//! Decoding is left to whoever consumes the tree.
//!
//! Lexemes are bytes. String contents are not checked for UTF-8, so
//! `Literal::to_str` and `Element::key_str` are fallible.

use crate::token::TokenKind;
use std::borrow::Cow;
use std::str::{self, Utf8Error};

/// The result of a successful parse: exactly one top-level value.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Document<'a> {
    /// The single top-level value. May be a bare literal.
    pub root: Value<'a>,
}

/// Any JSON value.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Value<'a> {
    /// `{ ... }`
    Object(Object<'a>),
    /// `[ ... ]`
    Array(Array<'a>),
    /// A string, number, `true`, `false` or `null`.
    Literal(Literal<'a>),
}

impl<'a> Value<'a> {
    /// Returns the object if this value is one.
    pub fn as_object(&self) -> Option<&Object<'a>> {
        match self {
            Value::Object(object) => Some(object),
            _ => None,
        }
    }

    /// Returns the array if this value is one.
    pub fn as_array(&self) -> Option<&Array<'a>> {
        match self {
            Value::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Returns the literal if this value is one.
    pub fn as_literal(&self) -> Option<&Literal<'a>> {
        match self {
            Value::Literal(literal) => Some(literal),
            _ => None,
        }
    }
}

/// A JSON object, e.g. `{"abc": "xyz"}`.
///
/// Members appear in source order. Duplicate keys are kept as written;
/// nothing is merged or rejected.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Object<'a> {
    /// The members, in source order.
    pub elements: Vec<Element<'a>>,
}

impl<'a> Object<'a> {
    /// The number of members, duplicates included.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates over the members in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Element<'a>> {
        self.elements.iter()
    }
}

/// One `key: value` member of an `Object`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Element<'a> {
    /// The raw string lexeme of the key, quotes included.
    pub key: Cow<'a, [u8]>,
    /// The value bound to `key`.
    pub value: Value<'a>,
}

impl Element<'_> {
    /// The key lexeme as `&str`, if it is valid UTF-8.
    pub fn key_str(&self) -> Result<&str, Utf8Error> {
        str::from_utf8(&self.key)
    }
}

/// A JSON array, e.g. `[1, "foo", true]`.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Array<'a> {
    /// The items, in source order.
    pub values: Vec<Value<'a>>,
}

impl<'a> Array<'a> {
    /// The number of items.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the items in source order.
    pub fn iter(&self) -> std::slice::Iter<'_, Value<'a>> {
        self.values.iter()
    }
}

/// The kind of a `Literal`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum LiteralKind {
    /// A quoted string, escapes left as written.
    String,
    /// A number in its source spelling, e.g. `0123` or `1e+5`.
    Number,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
}

impl LiteralKind {
    /// Maps a token kind to the literal it denotes, if any.
    pub fn from_token(kind: TokenKind) -> Option<LiteralKind> {
        match kind {
            TokenKind::String => Some(LiteralKind::String),
            TokenKind::Number => Some(LiteralKind::Number),
            TokenKind::True => Some(LiteralKind::True),
            TokenKind::False => Some(LiteralKind::False),
            TokenKind::Null => Some(LiteralKind::Null),
            _ => None,
        }
    }
}

/// A leaf value holding its undecoded source text, e.g. `"a\n"` or `1e3`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Literal<'a> {
    /// The exact source bytes of the literal.
    pub text: Cow<'a, [u8]>,
    pub kind: LiteralKind,
}

impl Literal<'_> {
    pub fn kind(&self) -> LiteralKind {
        self.kind
    }

    /// The raw source bytes.
    pub fn text(&self) -> &[u8] {
        &self.text
    }

    /// The source text as `&str`, if it is valid UTF-8. Only `String`
    /// literals can fail.
    pub fn to_str(&self) -> Result<&str, Utf8Error> {
        str::from_utf8(&self.text)
    }
}
