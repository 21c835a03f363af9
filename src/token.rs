//! Defines the `Token` struct and the `TokenKind` enum.
//!
//! These are the units handed from the `Tokenizer` (lexer) to the
//! `Parser`. Unlike a decoding lexer, a token never interprets its
//! lexeme: `text` is the exact byte slice of the input it was scanned
//! from, or the diagnostic message when the token is `Illegal`. String
//! lexemes may carry bytes that are not valid UTF-8; they pass through
//! untouched.

use std::borrow::Cow;
use std::fmt;
use std::str::{self, Utf8Error};

/// The classification of a `Token`.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    /// A lexical defect. The token's `text` holds the diagnostic message.
    Illegal,
    /// End of input. Always the last token of a successful scan.
    Eof,
    /// A string literal, quotes and escapes included, e.g. `"a\n"`
    String,
    /// A number literal, e.g. `-1.5e3`
    Number,
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// `:`
    Colon,
}

impl TokenKind {
    /// The diagnostic name of the kind, as it appears in grammar errors.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Illegal => "TokenIllegal",
            TokenKind::Eof => "TokenEof",
            TokenKind::String => "TokenString",
            TokenKind::Number => "TokenNumber",
            TokenKind::True => "TokenTrue",
            TokenKind::False => "TokenFalse",
            TokenKind::Null => "TokenNull",
            TokenKind::LBrace => "TokenLbrace",
            TokenKind::LBracket => "TokenLbrack",
            TokenKind::RBrace => "TokenRbrace",
            TokenKind::RBracket => "TokenRbrack",
            TokenKind::Comma => "TokenComma",
            TokenKind::Colon => "TokenColon",
        }
    }

    /// Returns `true` for `Eof` and `Illegal`, the kinds that close a token stream.
    pub fn is_terminal(self) -> bool {
        matches!(self, TokenKind::Eof | TokenKind::Illegal)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single token produced by the `Tokenizer`.
///
/// Data tokens borrow their text from the input. Only `Illegal` tokens own
/// their text, since the message is formatted at the point of failure.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token<'a> {
    /// The kind of the token.
    pub kind: TokenKind,
    /// The raw lexeme, or the diagnostic message for `Illegal`.
    pub text: Cow<'a, [u8]>,
    /// The 1-indexed line number where the token starts.
    pub line: usize,
    /// The 1-indexed byte column where the token starts.
    pub column: usize,
}

impl Token<'_> {
    /// Returns `true` if this token closes the stream.
    pub fn is_terminal(&self) -> bool {
        self.kind.is_terminal()
    }

    /// The text as `&str`, if it is valid UTF-8.
    ///
    /// Always succeeds for everything but `String` tokens, whose contents
    /// are copied from the input unchecked.
    pub fn text_str(&self) -> Result<&str, Utf8Error> {
        str::from_utf8(&self.text)
    }
}

// `<TokenString "foo">`, handy when dumping a token stream.
impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{} {}>", self.kind, String::from_utf8_lossy(&self.text))
    }
}
