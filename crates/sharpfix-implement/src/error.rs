//! Errors reported by the engine.
//!
//! Hosts treat every variant as "no code action offered"; the variants only
//! say why, for logs and the CLI.

use sharpfix_common::Span;
use sharpfix_symbols::TypeSymbolId;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImplementError {
    /// The request is well-formed but no fix can be produced.
    NoActionAvailable { reason: String },
    UnknownDocument { name: String },
    UnknownType { symbol: TypeSymbolId },
    /// The base-list entry names a class, or a type that is not an interface.
    NotAnInterface { name: String },
    DiagnosticNotInBaseList { document: String, span: Span },
}

impl ImplementError {
    pub fn no_action(reason: impl Into<String>) -> Self {
        ImplementError::NoActionAvailable {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ImplementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImplementError::NoActionAvailable { reason } => write!(f, "no action available: {reason}"),
            ImplementError::UnknownDocument { name } => write!(f, "unknown document '{name}'"),
            ImplementError::UnknownType { symbol } => write!(f, "unknown type symbol {}", symbol.0),
            ImplementError::NotAnInterface { name } => write!(f, "'{name}' is not an interface"),
            ImplementError::DiagnosticNotInBaseList { document, span } => write!(
                f,
                "{document}:{}..{} is not inside a base-list entry",
                span.start, span.end
            ),
        }
    }
}

impl std::error::Error for ImplementError {}
