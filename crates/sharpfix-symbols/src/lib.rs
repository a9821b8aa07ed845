//! Host symbol model for the sharpfix engine.
//!
//! - `types`/`symbols`: plain data for named types, members and type references
//! - `SymbolDatabase`: the read-only view the engine queries
//! - `SymbolArena`: serializable in-memory implementation, with builders
//! - `SymbolOverlay`: per-document writable layer used by fix-all
//! - `TypeSubstitution`, `TypeDisplay`, signature equivalence
pub mod arena;
pub mod builder;
pub mod core_library;
pub mod database;
pub mod display;
pub mod equivalence;
pub mod overlay;
pub mod queries;
pub mod substitution;
pub mod symbols;
pub mod types;
pub mod well_known;

pub use arena::SymbolArena;
pub use builder::{DEFAULT_ASSEMBLY, MemberBuilder, TypeBuilder};
pub use core_library::{CORE_ASSEMBLY, CoreLibrary};
pub use database::{SymbolDatabase, grants_internal_access, is_accessible_from, is_type_accessible_from};
pub use display::{NameScope, TypeDisplay};
pub use equivalence::{parameters_match, signatures_collide, signatures_equivalent, types_equivalent};
pub use overlay::{OVERLAY_MEMBER_BASE, SymbolOverlay};
pub use substitution::TypeSubstitution;
pub use symbols::{
    Accessor, AssemblySymbol, EventSignature, ExplicitImplementation, FieldSignature, MemberKind,
    MemberSymbol, MethodSignature, NamedTypeSymbol, OperatorKind, OperatorSignature, Parameter,
    PropertySignature, TypeKind, TypeParameter, TypeParameterConstraints, Variance,
};
pub use types::{
    Accessibility, AttributeData, ConstantValue, MemberId, MemberModifiers, RefKind, SpecialType,
    TupleElement, TypeModifiers, TypeParameterOwner, TypeParameterRef, TypeRef, TypeSymbolId,
};

#[cfg(test)]
#[path = "../tests/substitution_tests.rs"]
mod substitution_tests;

#[cfg(test)]
#[path = "../tests/display_tests.rs"]
mod display_tests;

#[cfg(test)]
#[path = "../tests/queries_tests.rs"]
mod queries_tests;
