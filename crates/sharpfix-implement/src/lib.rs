//! Implement-interface member synthesis and placement.
//!
//! Pipeline for one diagnostic:
//! - `query`: which interface members the type is missing
//! - `strategy`: the code actions offered, each with a stable identity
//! - `synthesis`: member declarations as IR (`ir`), plus `delegation` and
//!   `dispose` for the forwarding and `IDisposable` variants
//! - `placement`, `imports`, `printer`: text edits against the outline
//!
//! `service` wires these together per diagnostic and `fix_all` applies one
//! strategy across many diagnostics and documents.

pub mod context;
pub mod delegation;
pub mod dispose;
pub mod error;
pub mod fix_all;
pub mod imports;
pub mod ir;
pub mod options;
pub mod placement;
pub mod printer;
pub mod query;
pub mod service;
pub mod strategy;
pub mod synthesis;

pub use context::{ImplementContext, qualified_display, resolve_base_entry};
pub use delegation::{DelegationCandidate, DelegationKind};
pub use dispose::DisposeState;
pub use error::ImplementError;
pub use fix_all::{DocumentFix, FixAllResult, fix_all};
pub use options::{
    ExpressionBodyPreference, ExpressionBodyPreferences, ImplementOptions, IndentationOptions,
    InsertionBehavior, NamingOptions, PropertyGenerationBehavior,
};
pub use query::{InterfaceMember, InterfaceMemberGroup, unimplemented_member_groups, unimplemented_members};
pub use service::{CodeAction, Diagnostic, ImplementInterfaceService};
pub use strategy::{ActionKind, InterfaceIdentity, Strategy, StrategyIdentity};
pub use synthesis::{BodyKind, Synthesis, SynthesizedMember};

#[cfg(test)]
#[path = "../tests/fixtures.rs"]
mod fixtures;

#[cfg(test)]
#[path = "../tests/query_tests.rs"]
mod query_tests;

#[cfg(test)]
#[path = "../tests/strategy_tests.rs"]
mod strategy_tests;

#[cfg(test)]
#[path = "../tests/synthesis_tests.rs"]
mod synthesis_tests;

#[cfg(test)]
#[path = "../tests/defaults_tests.rs"]
mod defaults_tests;

#[cfg(test)]
#[path = "../tests/delegation_tests.rs"]
mod delegation_tests;

#[cfg(test)]
#[path = "../tests/dispose_tests.rs"]
mod dispose_tests;

#[cfg(test)]
#[path = "../tests/placement_tests.rs"]
mod placement_tests;

#[cfg(test)]
#[path = "../tests/printer_tests.rs"]
mod printer_tests;

#[cfg(test)]
#[path = "../tests/fix_all_tests.rs"]
mod fix_all_tests;
