//! Contains the recursive-descent `Parser`.
//!
//! The parser keeps a single current token and pulls the next one from
//! the `Tokenizer` only when it consumes the current one, so the lexer is
//! never more than one token ahead. Grammar:
//!
//! ```text
//! Document := Value
//! Value    := Object | Array | Literal
//! Object   := '{' (Pair (',' Pair)*)? '}'
//! Pair     := String ':' Value
//! Array    := '[' (Value (',' Value)*)? ']'
//! Literal  := String | Number | True | False | Null
//! ```
//!
//! The first defect ends the parse. An `Illegal` token is reported as soon
//! as it is pulled, so lexical and grammar errors share one channel and
//! whichever comes first in the stream wins. Bailing out early leaves
//! nothing behind: the tokenizer is a plain iterator dropped with the parser.

use crate::ast::{Array, Document, Element, Literal, LiteralKind, Object, Value};
use crate::error::{ErrorKind, ParseError};
use crate::token::{Token, TokenKind};
use crate::tokenizer::Tokenizer;
use std::borrow::Cow;

/// A single-use parser over one input.
pub struct Parser<'a> {
    tokens: Tokenizer<'a>,
    /// The token under the cursor. Holds a placeholder until the first
    /// `advance` primes it.
    cur: Token<'a>,
    /// The current nesting depth of objects and arrays.
    depth: usize,
    /// The maximum allowed nesting depth.
    max_depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser for `input` that rejects nesting deeper than `max_depth`.
    pub fn new(input: &'a [u8], max_depth: usize) -> Self {
        Parser {
            tokens: Tokenizer::new(input),
            cur: Token {
                kind: TokenKind::Eof,
                text: Cow::Borrowed(b""),
                line: 1,
                column: 1,
            },
            depth: 0,
            max_depth,
        }
    }

    /// Parses the whole input into a `Document`.
    ///
    /// # Errors
    /// Returns the first lexical, grammar or limit error found. Nothing of
    /// the partially built tree is returned.
    pub fn parse(mut self) -> Result<Document<'a>, ParseError> {
        self.advance()?;
        let root = self.parse_value()?;
        if self.cur.kind != TokenKind::Eof {
            return Err(self.grammar_error(format!(
                "expected {} but found {}",
                TokenKind::Eof,
                self.cur.kind
            )));
        }
        Ok(Document { root })
    }

    /// A grammar error located at the current token.
    fn grammar_error(&self, message: String) -> ParseError {
        ParseError::new(ErrorKind::Grammar, message, self.cur.line, self.cur.column)
    }

    /// Moves the cursor to the next token and returns the one it was on.
    ///
    /// Fails with the token's message if the new token is `Illegal`. Once
    /// the stream is exhausted the cursor stays on `Eof`.
    fn advance(&mut self) -> Result<Token<'a>, ParseError> {
        let next = match self.tokens.next() {
            Some(token) => token,
            None => Token {
                kind: TokenKind::Eof,
                text: Cow::Borrowed(b""),
                line: self.cur.line,
                column: self.cur.column,
            },
        };
        tracing::trace!(token = %next, line = next.line, column = next.column, "pulled token");

        if next.kind == TokenKind::Illegal {
            return Err(ParseError::new(
                ErrorKind::Lexical,
                String::from_utf8_lossy(&next.text).into_owned(),
                next.line,
                next.column,
            ));
        }
        Ok(std::mem::replace(&mut self.cur, next))
    }

    /// Checks that the current token is of `kind`, then advances past it.
    fn expect(&mut self, kind: TokenKind) -> Result<Token<'a>, ParseError> {
        if self.cur.kind != kind {
            return Err(self.grammar_error(format!("expected {} but found {}", kind, self.cur.kind)));
        }
        self.advance()
    }

    fn parse_value(&mut self) -> Result<Value<'a>, ParseError> {
        match self.cur.kind {
            TokenKind::LBrace => Ok(Value::Object(self.parse_object()?)),
            TokenKind::LBracket => Ok(Value::Array(self.parse_array()?)),
            kind => match LiteralKind::from_token(kind) {
                Some(kind) => {
                    let token = self.advance()?;
                    Ok(Value::Literal(Literal {
                        text: token.text,
                        kind,
                    }))
                }
                None => Err(self.grammar_error(format!(
                    "unexpected token {}",
                    String::from_utf8_lossy(&self.cur.text)
                ))),
            },
        }
    }

    fn parse_object(&mut self) -> Result<Object<'a>, ParseError> {
        self.enter()?;
        self.expect(TokenKind::LBrace)?;

        let mut elements = Vec::new();
        if self.cur.kind == TokenKind::RBrace {
            self.advance()?;
        } else {
            loop {
                // The key is consumed before its kind is checked, so an
                // `Illegal` right after it takes precedence.
                let key = self.advance()?;
                if key.kind != TokenKind::String {
                    return Err(ParseError::new(
                        ErrorKind::Grammar,
                        format!(
                            "expected string key but found {}",
                            String::from_utf8_lossy(&key.text)
                        ),
                        key.line,
                        key.column,
                    ));
                }
                self.expect(TokenKind::Colon)?;
                let value = self.parse_value()?;
                elements.push(Element {
                    key: key.text,
                    value,
                });

                if self.cur.kind == TokenKind::RBrace {
                    self.advance()?;
                    break;
                }
                self.expect(TokenKind::Comma)?;
            }
        }

        self.depth -= 1;
        Ok(Object { elements })
    }

    fn parse_array(&mut self) -> Result<Array<'a>, ParseError> {
        self.enter()?;
        self.expect(TokenKind::LBracket)?;

        let mut values = Vec::new();
        if self.cur.kind == TokenKind::RBracket {
            self.advance()?;
        } else {
            loop {
                values.push(self.parse_value()?);

                if self.cur.kind == TokenKind::RBracket {
                    self.advance()?;
                    break;
                }
                self.expect(TokenKind::Comma)?;
            }
        }

        self.depth -= 1;
        Ok(Array { values })
    }

    /// Descends one nesting level, enforcing `max_depth`.
    fn enter(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::new(
                ErrorKind::Limit,
                "maximum nesting depth exceeded",
                self.cur.line,
                self.cur.column,
            ));
        }
        self.depth += 1;
        Ok(())
    }
}
