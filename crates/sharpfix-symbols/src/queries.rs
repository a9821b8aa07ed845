//! Structural queries over the symbol model: classification of type
//! references and inheritance walks.

use crate::database::SymbolDatabase;
use crate::substitution::TypeSubstitution;
use crate::symbols::{TypeKind, TypeParameter};
use crate::types::{SpecialType, TypeParameterOwner, TypeParameterRef, TypeRef, TypeSymbolId};
use sharpfix_common::limits::{MAX_BASE_CLASS_DEPTH, MAX_INTERFACE_DEPTH};
use smallvec::SmallVec;
use tracing::trace;

/// The declaration a type-parameter reference points at.
pub fn type_parameter_decl<'db>(
    db: &'db dyn SymbolDatabase,
    param: &TypeParameterRef,
) -> Option<&'db TypeParameter> {
    let params = match param.owner {
        TypeParameterOwner::Type { symbol } => &db.type_symbol(symbol)?.type_parameters,
        TypeParameterOwner::Method { member } => db.member(member)?.type_parameters(),
    };
    params.get(param.ordinal as usize)
}

pub fn type_kind(db: &dyn SymbolDatabase, ty: &TypeRef) -> Option<TypeKind> {
    let (symbol, _) = ty.as_named()?;
    Some(db.type_symbol(symbol)?.kind)
}

/// Known to be a value type. Unconstrained type parameters are not.
pub fn is_value_type(db: &dyn SymbolDatabase, ty: &TypeRef) -> bool {
    match ty {
        TypeRef::Special { special } => special.is_value_type(),
        TypeRef::Named { .. } => matches!(
            type_kind(db, ty),
            Some(TypeKind::Struct | TypeKind::Enum)
        ),
        TypeRef::Tuple { .. } | TypeRef::Pointer { .. } => true,
        TypeRef::Nullable { underlying } => is_value_type(db, underlying),
        TypeRef::TypeParameter { param } => type_parameter_decl(db, param)
            .is_some_and(|p| p.constraints.value_type || p.constraints.unmanaged),
        TypeRef::Array { .. } | TypeRef::Error { .. } => false,
    }
}

/// Known to be a reference type. Unconstrained type parameters are not.
pub fn is_reference_type(db: &dyn SymbolDatabase, ty: &TypeRef) -> bool {
    match ty {
        TypeRef::Special { special } => matches!(
            special,
            SpecialType::Object | SpecialType::String | SpecialType::Dynamic
        ),
        TypeRef::Named { .. } => matches!(
            type_kind(db, ty),
            Some(TypeKind::Class | TypeKind::Interface | TypeKind::Delegate)
        ),
        TypeRef::Array { .. } => true,
        TypeRef::Nullable { underlying } => is_reference_type(db, underlying),
        TypeRef::TypeParameter { param } => type_parameter_decl(db, param).is_some_and(|p| {
            p.constraints.reference_type
                || p.constraints.nullable_reference_type
                || p.constraints.types.iter().any(|c| {
                    matches!(type_kind(db, c), Some(TypeKind::Class))
                })
        }),
        TypeRef::Tuple { .. } | TypeRef::Pointer { .. } | TypeRef::Error { .. } => false,
    }
}

/// `T?` where `T` is a value type: `Nullable<T>`, not an annotation.
pub fn is_nullable_value_type(db: &dyn SymbolDatabase, ty: &TypeRef) -> bool {
    matches!(ty, TypeRef::Nullable { underlying } if is_value_type(db, underlying))
}

/// The interface closure of `interface`: every base interface (depth-first,
/// declaration order, each instantiation once) followed by `interface`
/// itself.
pub fn interface_closure(db: &dyn SymbolDatabase, interface: &TypeRef) -> Vec<TypeRef> {
    let mut out = Vec::new();
    visit_interface(db, interface, 0, &mut out);
    out
}

fn visit_interface(db: &dyn SymbolDatabase, ty: &TypeRef, depth: u32, out: &mut Vec<TypeRef>) {
    if depth > MAX_INTERFACE_DEPTH {
        trace!(depth, "interface closure depth limit reached");
        return;
    }
    if out.contains(ty) {
        return;
    }
    let Some((symbol, args)) = ty.as_named() else {
        return;
    };
    let Some(decl) = db.type_symbol(symbol) else {
        return;
    };
    let subst = TypeSubstitution::from_args(db, symbol, args);
    for base in &decl.interfaces {
        visit_interface(db, &subst.apply(db, base), depth + 1, out);
    }
    if !out.contains(ty) {
        out.push(ty.clone());
    }
}

/// Base classes of `ty`, nearest first, instantiated. `object` is included
/// when the host lists it.
pub fn base_class_chain(db: &dyn SymbolDatabase, ty: &TypeRef) -> Vec<TypeRef> {
    let mut chain = Vec::new();
    let mut current = ty.clone();
    for _ in 0..MAX_BASE_CLASS_DEPTH {
        let Some((symbol, args)) = current.as_named() else {
            break;
        };
        let Some(decl) = db.type_symbol(symbol) else {
            break;
        };
        let Some(base) = &decl.base_type else {
            break;
        };
        let base = TypeSubstitution::from_args(db, symbol, args).apply(db, base);
        if chain.contains(&base) || &base == ty {
            break;
        }
        chain.push(base.clone());
        current = base;
    }
    chain
}

/// Every interface `ty` implements, directly or through base classes and
/// base interfaces. For an interface, the closure including itself.
pub fn all_interfaces(db: &dyn SymbolDatabase, ty: &TypeRef) -> Vec<TypeRef> {
    let mut out: Vec<TypeRef> = Vec::new();
    match ty {
        TypeRef::Named { symbol, .. } => {
            if db.type_symbol(*symbol).is_some_and(|d| d.is_interface()) {
                return interface_closure(db, ty);
            }
            let mut types: SmallVec<[TypeRef; 4]> = SmallVec::new();
            types.push(ty.clone());
            types.extend(base_class_chain(db, ty));
            for current in &types {
                let Some((symbol, args)) = current.as_named() else {
                    continue;
                };
                let Some(decl) = db.type_symbol(symbol) else {
                    continue;
                };
                let subst = TypeSubstitution::from_args(db, symbol, args);
                for iface in &decl.interfaces {
                    for t in interface_closure(db, &subst.apply(db, iface)) {
                        if !out.contains(&t) {
                            out.push(t);
                        }
                    }
                }
            }
        }
        TypeRef::TypeParameter { param } => {
            if let Some(decl) = type_parameter_decl(db, param) {
                for constraint in &decl.constraints.types {
                    for t in all_interfaces(db, constraint) {
                        if !out.contains(&t) {
                            out.push(t);
                        }
                    }
                }
            }
        }
        TypeRef::Nullable { underlying } => return all_interfaces(db, underlying),
        _ => {}
    }
    out
}

/// Whether `ty` is `interface` or implements it.
pub fn implements_interface(db: &dyn SymbolDatabase, ty: &TypeRef, interface: &TypeRef) -> bool {
    ty == interface || all_interfaces(db, ty).iter().any(|t| t == interface)
}

/// Whether `derived` is `base` or inherits from it.
pub fn derives_from(db: &dyn SymbolDatabase, derived: TypeSymbolId, base: TypeSymbolId) -> bool {
    derived == base
        || base_class_chain(db, &TypeRef::named(derived))
            .iter()
            .any(|t| t.as_named().is_some_and(|(s, _)| s == base))
}
