//! Signature identity.
//!
//! Two signatures are the same when they would collide as overloads.
//! Sugar that does not reach metadata is ignored: tuple element names,
//! reference-type nullable annotations, `dynamic` versus `object`. Method
//! type parameters are matched by position, not by name.

use crate::database::SymbolDatabase;
use crate::queries::is_value_type;
use crate::symbols::{MemberKind, MethodSignature, Parameter};
use crate::types::{SpecialType, TypeParameterOwner, TypeRef};

pub fn types_equivalent(db: &dyn SymbolDatabase, a: &TypeRef, b: &TypeRef) -> bool {
    let a = strip_annotation(db, a);
    let b = strip_annotation(db, b);
    match (a, b) {
        (TypeRef::Special { special: x }, TypeRef::Special { special: y }) => {
            normalize_special(*x) == normalize_special(*y)
        }
        (
            TypeRef::Named {
                symbol: sa,
                args: aa,
            },
            TypeRef::Named {
                symbol: sb,
                args: ab,
            },
        ) => sa == sb && all_equivalent(db, aa, ab),
        (TypeRef::TypeParameter { param: pa }, TypeRef::TypeParameter { param: pb }) => {
            match (pa.owner, pb.owner) {
                (TypeParameterOwner::Method { .. }, TypeParameterOwner::Method { .. }) => {
                    pa.ordinal == pb.ordinal
                }
                _ => pa.owner == pb.owner && pa.ordinal == pb.ordinal,
            }
        }
        (
            TypeRef::Array {
                element: ea,
                rank: ra,
            },
            TypeRef::Array {
                element: eb,
                rank: rb,
            },
        ) => ra == rb && types_equivalent(db, ea, eb),
        (TypeRef::Pointer { pointee: pa }, TypeRef::Pointer { pointee: pb }) => {
            types_equivalent(db, pa, pb)
        }
        (TypeRef::Nullable { underlying: ua }, TypeRef::Nullable { underlying: ub }) => {
            types_equivalent(db, ua, ub)
        }
        (TypeRef::Tuple { elements: ea }, TypeRef::Tuple { elements: eb }) => {
            ea.len() == eb.len()
                && ea
                    .iter()
                    .zip(eb)
                    .all(|(x, y)| types_equivalent(db, &x.ty, &y.ty))
        }
        (TypeRef::Error { name: na }, TypeRef::Error { name: nb }) => na == nb,
        _ => false,
    }
}

fn all_equivalent(db: &dyn SymbolDatabase, a: &[TypeRef], b: &[TypeRef]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| types_equivalent(db, x, y))
}

/// Drop a `?` that is only a reference-type annotation.
fn strip_annotation<'t>(db: &dyn SymbolDatabase, ty: &'t TypeRef) -> &'t TypeRef {
    match ty {
        TypeRef::Nullable { underlying } if !is_value_type(db, underlying) => underlying,
        other => other,
    }
}

const fn normalize_special(special: SpecialType) -> SpecialType {
    match special {
        SpecialType::Dynamic => SpecialType::Object,
        other => other,
    }
}

pub fn parameters_match(db: &dyn SymbolDatabase, a: &[Parameter], b: &[Parameter]) -> bool {
    a.len() == b.len()
        && a.iter()
            .zip(b)
            .all(|(x, y)| x.ref_kind == y.ref_kind && types_equivalent(db, &x.ty, &y.ty))
}

fn methods_match(db: &dyn SymbolDatabase, a: &MethodSignature, b: &MethodSignature) -> bool {
    a.type_parameters.len() == b.type_parameters.len()
        && parameters_match(db, &a.parameters, &b.parameters)
}

/// Whether two member shapes have the same parameter signature (overload
/// identity). Return types are not part of it.
pub fn signatures_collide(db: &dyn SymbolDatabase, a: &MemberKind, b: &MemberKind) -> bool {
    match (a, b) {
        (MemberKind::Method(x), MemberKind::Method(y)) => methods_match(db, x, y),
        (MemberKind::Operator(x), MemberKind::Operator(y)) => {
            x.operator == y.operator
                && methods_match(db, &x.signature, &y.signature)
                && (!x.operator.is_conversion()
                    || types_equivalent(db, &x.signature.return_type, &y.signature.return_type))
        }
        (MemberKind::Indexer(x), MemberKind::Indexer(y)) => {
            parameters_match(db, &x.parameters, &y.parameters)
        }
        (MemberKind::Property(_), MemberKind::Property(_))
        | (MemberKind::Event(_), MemberKind::Event(_))
        | (MemberKind::Field(_), MemberKind::Field(_)) => true,
        (MemberKind::Constructor(x), MemberKind::Constructor(y)) => methods_match(db, x, y),
        _ => false,
    }
}

/// Full identity: colliding signatures with the same value type and return
/// passing mode.
pub fn signatures_equivalent(db: &dyn SymbolDatabase, a: &MemberKind, b: &MemberKind) -> bool {
    if !signatures_collide(db, a, b) || !types_equivalent(db, a.value_type(), b.value_type()) {
        return false;
    }
    match (a, b) {
        (MemberKind::Method(x), MemberKind::Method(y)) => x.return_ref_kind == y.return_ref_kind,
        (MemberKind::Property(x), MemberKind::Property(y))
        | (MemberKind::Indexer(x), MemberKind::Indexer(y)) => x.ref_kind == y.ref_kind,
        _ => true,
    }
}
