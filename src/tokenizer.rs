//! The byte-based tokenizer (lexer).
//!
//! The tokenizer is an explicit state machine driven from `Iterator::next`:
//! every call runs states until exactly one token is ready, so a consumer
//! pulls tokens one at a time and the tokenizer never runs ahead of it.
//! The stream always closes with a single terminal token, `Eof` on success
//! or `Illegal` on the first lexical defect, after which the iterator is
//! exhausted.
//!
//! Lexemes are never decoded or validated as UTF-8. A token's text is the
//! exact input slice it was scanned from.

use crate::token::{Token, TokenKind};
use memchr::{memchr2, memchr_iter, memrchr};
use std::borrow::Cow;
use std::iter::FusedIterator;

// --- The Lookup Table (LUT) ---
// Classifies every byte that can start a token, or be skipped between two.
const W: u8 = 1; // Whitespace
const S: u8 = 2; // Structural
const K: u8 = 3; // Keyword start
const D: u8 = 4; // Digit
const Q: u8 = 5; // Quote

static BYTE_CLASS: [u8; 256] = {
    let mut table = [0; 256];
    table[b' ' as usize] = W;
    table[b'\n' as usize] = W;
    table[b'\r' as usize] = W;
    table[b'\t' as usize] = W;

    table[b'{' as usize] = S;
    table[b'}' as usize] = S;
    table[b'[' as usize] = S;
    table[b']' as usize] = S;
    table[b':' as usize] = S;
    table[b',' as usize] = S;

    table[b't' as usize] = K;
    table[b'f' as usize] = K;
    table[b'n' as usize] = K;

    table[b'"' as usize] = Q;

    let mut digit = b'0';
    while digit <= b'9' {
        table[digit as usize] = D;
        digit += 1;
    }

    // 0: everything else, including '-', which needs a lookahead.
    table
};

/// The states of the tokenizer. Every state but `Dispatch` is entered with
/// the first byte of its token already consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Dispatch,
    Keyword { word: &'static str, kind: TokenKind },
    Number,
    String,
    Done,
}

/// A lazy, pull-based token stream over a byte slice.
///
/// Created by [`crate::tokenize`]. Each tokenizer is independent; scanning
/// the same input twice means creating a second one.
pub struct Tokenizer<'a> {
    /// The raw input.
    bytes: &'a [u8],
    /// Offset where the token being scanned starts.
    start: usize,
    /// Offset of the next unread byte.
    cursor: usize,
    /// Current line (1-indexed).
    line: usize,
    /// Offset of the first byte of the current line.
    line_start: usize,
    /// Position of `start`, captured when the token began.
    token_line: usize,
    token_column: usize,
    state: State,
}

impl<'a> Tokenizer<'a> {
    /// Creates a new `Tokenizer` over `input`.
    pub fn new(input: &'a [u8]) -> Self {
        Tokenizer {
            bytes: input,
            start: 0,
            cursor: 0,
            line: 1,
            line_start: 0,
            token_line: 1,
            token_column: 1,
            state: State::Dispatch,
        }
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.cursor).copied()
    }

    #[inline]
    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.bytes.get(self.cursor + ahead).copied()
    }

    #[inline]
    fn column(&self) -> usize {
        self.cursor - self.line_start + 1
    }

    /// Consumes one byte, keeping the line counter in step.
    #[inline]
    fn bump(&mut self) {
        if let Some(byte) = self.peek() {
            self.cursor += 1;
            if byte == b'\n' {
                self.line += 1;
                self.line_start = self.cursor;
            }
        }
    }

    /// Consumes `n` bytes at once. Used to skip plain string content found
    /// by `memchr`, which may span raw newlines.
    fn advance_by(&mut self, n: usize) {
        let bytes = self.bytes;
        let end = (self.cursor + n).min(bytes.len());
        let chunk = &bytes[self.cursor..end];
        if let Some(last) = memrchr(b'\n', chunk) {
            self.line += memchr_iter(b'\n', chunk).count();
            self.line_start = self.cursor + last + 1;
        }
        self.cursor = end;
    }

    #[inline]
    fn skip_whitespace(&mut self) {
        while let Some(byte) = self.peek() {
            if BYTE_CLASS[byte as usize] != W {
                break;
            }
            self.bump();
        }
    }

    /// Marks the current cursor as the start of the next token.
    fn begin(&mut self) {
        self.start = self.cursor;
        self.token_line = self.line;
        self.token_column = self.column();
    }

    /// Emits the scanned lexeme as a token of `kind` and returns to `Dispatch`.
    fn emit(&mut self, kind: TokenKind) -> Token<'a> {
        let bytes = self.bytes;
        self.state = State::Dispatch;
        Token {
            kind,
            text: Cow::Borrowed(&bytes[self.start..self.cursor]),
            line: self.token_line,
            column: self.token_column,
        }
    }

    /// Emits the terminal `Illegal` token, positioned at the cursor.
    fn illegal(&mut self, message: String) -> Token<'a> {
        self.state = State::Done;
        Token {
            kind: TokenKind::Illegal,
            text: Cow::Owned(message.into_bytes()),
            line: self.line,
            column: self.column(),
        }
    }

    /// Everything from the start of the current token to the end of input.
    fn consumed(&self) -> Cow<'a, str> {
        let bytes = self.bytes;
        String::from_utf8_lossy(&bytes[self.start..])
    }

    /// Skips whitespace, then either emits a single-byte token or moves to
    /// the state that scans the token starting here.
    fn lex_dispatch(&mut self) -> Option<Token<'a>> {
        self.skip_whitespace();
        self.begin();

        let byte = match self.peek() {
            Some(byte) => byte,
            None => {
                let eof = self.emit(TokenKind::Eof);
                self.state = State::Done;
                return Some(eof);
            }
        };

        match BYTE_CLASS[byte as usize] {
            S => {
                self.bump();
                let kind = match byte {
                    b'{' => TokenKind::LBrace,
                    b'}' => TokenKind::RBrace,
                    b'[' => TokenKind::LBracket,
                    b']' => TokenKind::RBracket,
                    b':' => TokenKind::Colon,
                    _ => TokenKind::Comma,
                };
                return Some(self.emit(kind));
            }
            K => {
                let (word, kind) = match byte {
                    b't' => ("true", TokenKind::True),
                    b'f' => ("false", TokenKind::False),
                    _ => ("null", TokenKind::Null),
                };
                self.bump();
                self.state = State::Keyword { word, kind };
            }
            D => {
                self.bump();
                self.state = State::Number;
            }
            Q => {
                self.bump();
                self.state = State::String;
            }
            _ if byte == b'-' && matches!(self.peek_at(1), Some(b'0'..=b'9')) => {
                self.bump();
                self.bump();
                self.state = State::Number;
            }
            _ => return Some(self.illegal(format!("unexpected character {}", byte as char))),
        }
        None
    }

    /// Matches the rest of `true`, `false` or `null`.
    fn lex_keyword(&mut self, word: &'static str, kind: TokenKind) -> Token<'a> {
        for &expected in &word.as_bytes()[1..] {
            match self.peek() {
                Some(byte) if byte == expected => self.bump(),
                Some(byte) => {
                    return self.illegal(format!(
                        "unexpected character {}, expected {}",
                        byte as char, word
                    ))
                }
                None => {
                    let consumed = self.consumed();
                    return self.illegal(format!(
                        "unterminated value {}, expected {}",
                        consumed, word
                    ));
                }
            }
        }
        self.emit(kind)
    }

    /// Scans `'-'? digit+ ('.' digit*)? (('e'|'E') ('+'|'-')? digit*)?`.
    ///
    /// A byte that cannot continue the number ends it and is left for the
    /// next token, except for a second `.` or a stray letter before the
    /// exponent, which are errors.
    fn lex_number(&mut self) -> Token<'a> {
        let mut integer = true;
        let mut fraction = false;

        while let Some(byte) = self.peek() {
            match byte {
                b'0'..=b'9' => self.bump(),
                b'.' if integer => {
                    integer = false;
                    fraction = true;
                    self.bump();
                }
                b'.' => return self.illegal("unexpected . in number".to_string()),
                b'e' | b'E' if integer || fraction => {
                    self.bump();
                    if matches!(self.peek(), Some(b'+' | b'-')) {
                        self.bump();
                    }
                    integer = false;
                    fraction = false;
                }
                b if (integer || fraction) && b.is_ascii_alphabetic() => {
                    return self.illegal(format!("unexpected character {} in number", b as char))
                }
                _ => break,
            }
        }
        self.emit(TokenKind::Number)
    }

    /// Scans up to the closing quote, validating escapes without decoding them.
    fn lex_string(&mut self) -> Token<'a> {
        let bytes = self.bytes;
        loop {
            // Plain content is skipped in one jump.
            let rest = &bytes[self.cursor..];
            let offset = match memchr2(b'"', b'\\', rest) {
                Some(offset) => offset,
                None => {
                    self.advance_by(rest.len());
                    return self.unterminated_string();
                }
            };
            let byte = rest[offset];
            self.advance_by(offset + 1);
            if byte == b'"' {
                return self.emit(TokenKind::String);
            }

            match self.peek() {
                Some(b'"' | b'\\' | b'b' | b'f' | b'n' | b'r' | b't') => self.bump(),
                Some(b'u') => {
                    self.bump();
                    for _ in 0..4 {
                        match self.peek() {
                            Some(hex) if hex.is_ascii_hexdigit() => self.bump(),
                            Some(other) => {
                                return self.illegal(format!(
                                    "unexpected non-hex character {}",
                                    other as char
                                ))
                            }
                            None => return self.unterminated_string(),
                        }
                    }
                }
                Some(other) => {
                    return self.illegal(format!("unexpected escape character {}", other as char))
                }
                None => return self.unterminated_string(),
            }
        }
    }

    fn unterminated_string(&mut self) -> Token<'a> {
        let consumed = self.consumed();
        self.illegal(format!("unterminated string literal {}", consumed))
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    /// Runs the state machine until the next token is ready.
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let token = match self.state {
                State::Done => return None,
                State::Dispatch => self.lex_dispatch(),
                State::Keyword { word, kind } => Some(self.lex_keyword(word, kind)),
                State::Number => Some(self.lex_number()),
                State::String => Some(self.lex_string()),
            };
            if token.is_some() {
                return token;
            }
        }
    }
}

impl FusedIterator for Tokenizer<'_> {}
