//! Type-parameter constraint clauses for generated methods.

use crate::ir::ConstraintNode;
use sharpfix_common::escape_identifier;
use sharpfix_symbols::queries::{is_value_type, type_kind};
use sharpfix_symbols::{
    SymbolDatabase, TypeDisplay, TypeKind, TypeParameter, TypeParameterConstraints, TypeRef,
};

/// Whether a constraint can no longer be written after substitution.
///
/// `where U : T` with `T = int` would be `where U : int`, which C# rejects.
/// The same holds for sealed classes, structs, enums, delegates, arrays and
/// special types, and for `class` combined with a value-type constraint.
pub fn is_inexpressible(db: &dyn SymbolDatabase, constraints: &TypeParameterConstraints) -> bool {
    constraints.types.iter().any(|ty| {
        let invalid_type = match ty.without_nullable() {
            TypeRef::Special { .. } | TypeRef::Array { .. } | TypeRef::Pointer { .. } => true,
            TypeRef::Tuple { .. } => true,
            named @ TypeRef::Named { .. } => match type_kind(db, named) {
                Some(TypeKind::Struct | TypeKind::Enum | TypeKind::Delegate) => true,
                Some(TypeKind::Class) => named
                    .as_named()
                    .and_then(|(id, _)| db.type_symbol(id))
                    .is_some_and(|s| s.is_sealed()),
                Some(TypeKind::Interface) | None => false,
            },
            TypeRef::TypeParameter { .. } | TypeRef::Error { .. } | TypeRef::Nullable { .. } => {
                false
            }
        };
        invalid_type || (constraints.reference_type && is_value_type(db, ty))
    })
}

/// The full clause for an implicit implementation: primary constraint,
/// type constraints, then `new()`. `default` is dropped; it is only legal
/// on explicit implementations.
pub fn implicit_clause(
    display: &mut TypeDisplay<'_>,
    param: &TypeParameter,
    nullable_enabled: bool,
) -> Option<ConstraintNode> {
    let c = &param.constraints;
    let mut parts: Vec<String> = Vec::new();
    if c.unmanaged {
        parts.push("unmanaged".to_string());
    } else if c.value_type {
        parts.push("struct".to_string());
    } else if c.nullable_reference_type && nullable_enabled {
        parts.push("class?".to_string());
    } else if c.reference_type || c.nullable_reference_type {
        parts.push("class".to_string());
    } else if c.not_null {
        parts.push("notnull".to_string());
    }
    parts.extend(c.types.iter().map(|ty| display.display(ty)));
    if c.constructor && !c.value_type && !c.unmanaged {
        parts.push("new()".to_string());
    }
    clause(param, parts)
}

/// The clause an explicit implementation may carry: `class` or `default`
/// when the signature uses `T?` and needs it to pick the meaning of `?`.
pub fn explicit_clause(param: &TypeParameter, mentions_nullable: bool) -> Option<ConstraintNode> {
    if !mentions_nullable {
        return None;
    }
    let c = &param.constraints;
    let primary = if c.reference_type || c.nullable_reference_type {
        "class"
    } else if c.value_type || c.unmanaged {
        return None;
    } else {
        "default"
    };
    clause(param, vec![primary.to_string()])
}

fn clause(param: &TypeParameter, constraints: Vec<String>) -> Option<ConstraintNode> {
    (!constraints.is_empty()).then(|| ConstraintNode {
        parameter: escape_identifier(&param.name),
        constraints,
    })
}
