//! Framework types the engine recognizes by name.

use crate::database::SymbolDatabase;
use crate::types::{TypeRef, TypeSymbolId};

pub const SYSTEM: &str = "System";
pub const COMPILER_SERVICES: &str = "System.Runtime.CompilerServices";
pub const INTEROP_SERVICES: &str = "System.Runtime.InteropServices";

/// Attributes the compiler emits to encode language sugar. Their effect is
/// expressed in the signature itself, so they are never copied.
pub const SUGAR_ATTRIBUTES: &[(&str, &str)] = &[
    (SYSTEM, "ParamArrayAttribute"),
    (COMPILER_SERVICES, "TupleElementNamesAttribute"),
    (COMPILER_SERVICES, "NativeIntegerAttribute"),
    (COMPILER_SERVICES, "DynamicAttribute"),
    (COMPILER_SERVICES, "NullableAttribute"),
    (COMPILER_SERVICES, "NullableContextAttribute"),
    (COMPILER_SERVICES, "NullablePublicOnlyAttribute"),
    (COMPILER_SERVICES, "DecimalConstantAttribute"),
    (COMPILER_SERVICES, "IsReadOnlyAttribute"),
    (COMPILER_SERVICES, "IsUnmanagedAttribute"),
    (COMPILER_SERVICES, "IsByRefLikeAttribute"),
    (COMPILER_SERVICES, "CompilerGeneratedAttribute"),
    (INTEROP_SERVICES, "ComAliasNameAttribute"),
];

/// Whether `id` is the top-level type `namespace.name` declared in a core
/// library assembly.
pub fn is_well_known(db: &dyn SymbolDatabase, id: TypeSymbolId, namespace: &str, name: &str) -> bool {
    let Some(symbol) = db.type_symbol(id) else {
        return false;
    };
    symbol.containing_type.is_none()
        && symbol.namespace == namespace
        && symbol.name == name
        && db
            .assembly(&symbol.assembly)
            .is_some_and(|a| a.is_core_library)
}

pub fn is_sugar_attribute(db: &dyn SymbolDatabase, id: TypeSymbolId) -> bool {
    SUGAR_ATTRIBUTES
        .iter()
        .any(|(ns, name)| is_well_known(db, id, ns, name))
}

pub fn is_optional_attribute(db: &dyn SymbolDatabase, id: TypeSymbolId) -> bool {
    is_well_known(db, id, INTEROP_SERVICES, "OptionalAttribute")
}

pub fn is_date_time_constant_attribute(db: &dyn SymbolDatabase, id: TypeSymbolId) -> bool {
    is_well_known(db, id, COMPILER_SERVICES, "DateTimeConstantAttribute")
}

pub fn is_flags_attribute(db: &dyn SymbolDatabase, id: TypeSymbolId) -> bool {
    is_well_known(db, id, SYSTEM, "FlagsAttribute")
}

pub fn is_com_import_attribute(db: &dyn SymbolDatabase, id: TypeSymbolId) -> bool {
    is_well_known(db, id, INTEROP_SERVICES, "ComImportAttribute")
}

/// `System.IDisposable`.
pub fn is_idisposable(db: &dyn SymbolDatabase, ty: &TypeRef) -> bool {
    ty.as_named()
        .is_some_and(|(id, args)| args.is_empty() && is_well_known(db, id, SYSTEM, "IDisposable"))
}

/// The type declares `[Flags]`.
pub fn has_flags_attribute(db: &dyn SymbolDatabase, id: TypeSymbolId) -> bool {
    db.type_symbol(id).is_some_and(|s| {
        s.attributes
            .iter()
            .any(|a| is_flags_attribute(db, a.attribute_class))
    })
}

/// The type declares `[ComImport]`.
pub fn has_com_import_attribute(db: &dyn SymbolDatabase, id: TypeSymbolId) -> bool {
    db.type_symbol(id).is_some_and(|s| {
        s.attributes
            .iter()
            .any(|a| is_com_import_attribute(db, a.attribute_class))
    })
}
