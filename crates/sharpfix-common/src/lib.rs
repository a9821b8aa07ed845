//! Common types and utilities for the sharpfix engine.
//!
//! This crate provides foundational types used across all sharpfix crates:
//! - Source spans (`Span`)
//! - Text edits grouped per document (`TextEdit`, `DocumentEdit`, `WorkspaceEdit`)
//! - C# identifier escaping (`escape_identifier`, `is_reserved_keyword`)
//! - Engine limits and thresholds

// Span - Source location tracking (byte offsets)
pub mod span;
pub use span::Span;

// Text edits and their application to document text
pub mod text_edit;
pub use text_edit::{DocumentEdit, TextEdit, WorkspaceEdit, apply_text_edits};

// Identifier escaping for generated C#
pub mod identifiers;
pub use identifiers::{escape_identifier, is_reserved_keyword};

// Centralized limits and thresholds
pub mod limits;

#[cfg(test)]
#[path = "../tests/text_edit_tests.rs"]
mod text_edit_tests;
