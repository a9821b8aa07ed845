//! sharpfix: the C# "Implement interface" code fix.
//!
//! The engine lives in the workspace crates:
//!
//! - `sharpfix-common`: spans, text edits, identifier escaping
//! - `sharpfix-symbols`: the symbol model the engine queries
//! - `sharpfix-syntax`: document outlines and re-anchoring after edits
//! - `sharpfix-implement`: strategies, member synthesis and placement
//!
//! This crate re-exports them and adds the `sharpfix` command-line tool,
//! which runs the engine over JSON fixture files.

pub use sharpfix_common as common;
pub use sharpfix_implement as implement;
pub use sharpfix_symbols as symbols;
pub use sharpfix_syntax as syntax;

pub use sharpfix_implement::{
    CodeAction, Diagnostic, ImplementError, ImplementInterfaceService, ImplementOptions, fix_all,
};

pub mod cli;
pub mod tracing_config;
