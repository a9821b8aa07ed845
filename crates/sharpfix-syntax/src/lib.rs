//! Document outlines for the sharpfix engine.
//!
//! The engine does not parse C#. Each document arrives as text plus an
//! outline (`SourceDocument`) naming the spans the engine needs. This crate
//! provides:
//! - The outline model (`document`)
//! - `OutlineBuilder`, which derives an outline from literal anchors
//! - Edit application that re-anchors the outline (`reanchor`)
pub mod document;
pub mod outline;
pub mod reanchor;

pub use document::{
    BaseListEntry, MemberDeclaration, MemberDeclarationKind, SourceDocument, TypeDeclaration,
    UsingDirective,
};
pub use outline::{HiddenAnchor, MemberAnchor, OutlineBuilder, OutlineError, TypeAnchor};
pub use reanchor::{Bias, InsertedDeclaration, OffsetMap, OutlineEdit};

#[cfg(test)]
#[path = "../tests/outline_tests.rs"]
mod outline_tests;

#[cfg(test)]
#[path = "../tests/reanchor_tests.rs"]
mod reanchor_tests;
