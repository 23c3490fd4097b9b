//! Error types for the dipole circuit library.
//!
//! This module provides a unified error type [`DipoleError`] that covers
//! construction-time validation, parsing of the circuit notation, and I/O
//! performed by the CLI and output writers.
//!
//! Numeric irregularities (division by zero, open circuits) are not errors:
//! they propagate as IEEE-754 infinities and NaNs.

use thiserror::Error;

/// Result type alias using [`DipoleError`].
pub type Result<T> = std::result::Result<T, DipoleError>;

/// Unified error type for all dipole operations.
#[derive(Error, Debug)]
pub enum DipoleError {
    // ============ Construction Errors ============
    /// Invalid argument supplied to a constructor or evaluation
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    // ============ Notation Parsing Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Unknown element or filter constructor
    #[error("Unknown element kind '{kind}' at line {line}")]
    UnknownKind { kind: String, line: usize },

    // ============ I/O Errors ============
    /// Error reading a circuit file
    #[error("Failed to read circuit file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Error writing results
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DipoleError {
    /// Create an invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }
}
