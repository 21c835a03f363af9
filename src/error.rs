//! Contains the primary `ParseError` type for the library.
use std::fmt;

/// Which stage rejected the input.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ErrorKind {
    /// Malformed number, string, escape or keyword, or a stray character.
    Lexical,
    /// A well-formed token showed up where the grammar does not allow it.
    Grammar,
    /// A `ParseOptions` limit (input size or nesting depth) was exceeded.
    Limit,
}

/// The error type for all parsing operations.
///
/// Only the first defect of an input is ever reported. `message` is the
/// exact diagnostic text; the location is carried alongside it rather
/// than baked into the text, so callers can match on the message.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ParseError {
    /// Which stage produced the error.
    pub kind: ErrorKind,
    /// A description of what went wrong.
    pub message: String,
    /// The line number (1-indexed) where the error was detected.
    pub line: usize,
    /// The byte column (1-indexed) where the error was detected.
    pub column: usize,
}

impl ParseError {
    pub(crate) fn new(kind: ErrorKind, message: impl Into<String>, line: usize, column: usize) -> Self {
        ParseError {
            kind,
            message: message.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ParseError {}
