//! Generic type substitution.
//!
//! Instantiating `I<T>` as `I<int>` maps each of `I`'s type parameters to a
//! type argument. The same mechanism renames method type parameters: the
//! replacement is just another type-parameter reference with a new name.

use crate::database::SymbolDatabase;
use crate::queries::{is_value_type, type_parameter_decl};
use crate::symbols::{
    EventSignature, FieldSignature, MemberKind, MethodSignature, OperatorSignature, Parameter,
    PropertySignature, TypeParameter,
};
use crate::types::{TupleElement, TypeParameterOwner, TypeParameterRef, TypeRef, TypeSymbolId};
use rustc_hash::FxHashMap;
use sharpfix_common::limits::MAX_TYPE_NESTING_DEPTH;

/// A mapping from type parameters to types.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TypeSubstitution {
    map: FxHashMap<(TypeParameterOwner, u32), TypeRef>,
}

impl TypeSubstitution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Substitution for an instantiation of `symbol` with `args`.
    ///
    /// Missing arguments leave the corresponding parameters unmapped; extra
    /// arguments are ignored.
    pub fn from_args(db: &dyn SymbolDatabase, symbol: TypeSymbolId, args: &[TypeRef]) -> Self {
        let mut subst = Self::new();
        let Some(decl) = db.type_symbol(symbol) else {
            return subst;
        };
        let owner = TypeParameterOwner::Type { symbol };
        for (ordinal, arg) in args.iter().enumerate().take(decl.type_parameters.len()) {
            subst.insert(owner, ordinal as u32, arg.clone());
        }
        subst
    }

    /// Substitution for an instantiated named type reference. Returns an
    /// empty substitution for anything else.
    pub fn for_type(db: &dyn SymbolDatabase, ty: &TypeRef) -> Self {
        match ty {
            TypeRef::Named { symbol, args } => Self::from_args(db, *symbol, args),
            _ => Self::new(),
        }
    }

    pub fn insert(&mut self, owner: TypeParameterOwner, ordinal: u32, ty: TypeRef) {
        self.map.insert((owner, ordinal), ty);
    }

    pub fn get(&self, param: &TypeParameterRef) -> Option<&TypeRef> {
        self.map.get(&(param.owner, param.ordinal))
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Apply the substitution to `ty`.
    pub fn apply(&self, db: &dyn SymbolDatabase, ty: &TypeRef) -> TypeRef {
        if self.is_empty() {
            return ty.clone();
        }
        self.apply_at(db, ty, 0)
    }

    /// Apply the substitution to every type in a member shape, including
    /// method type-parameter constraints.
    pub fn apply_member(&self, db: &dyn SymbolDatabase, kind: &MemberKind) -> MemberKind {
        if self.is_empty() {
            return kind.clone();
        }
        match kind {
            MemberKind::Method(sig) => MemberKind::Method(self.apply_method(db, sig)),
            MemberKind::Constructor(sig) => MemberKind::Constructor(self.apply_method(db, sig)),
            MemberKind::Operator(op) => MemberKind::Operator(OperatorSignature {
                operator: op.operator,
                signature: self.apply_method(db, &op.signature),
            }),
            MemberKind::Property(prop) => MemberKind::Property(self.apply_property(db, prop)),
            MemberKind::Indexer(prop) => MemberKind::Indexer(self.apply_property(db, prop)),
            MemberKind::Event(ev) => MemberKind::Event(EventSignature {
                ty: self.apply(db, &ev.ty),
            }),
            MemberKind::Field(field) => MemberKind::Field(FieldSignature {
                ty: self.apply(db, &field.ty),
                constant: field.constant.clone(),
            }),
        }
    }

    fn apply_method(&self, db: &dyn SymbolDatabase, sig: &MethodSignature) -> MethodSignature {
        MethodSignature {
            type_parameters: sig
                .type_parameters
                .iter()
                .map(|tp| self.apply_type_parameter(db, tp))
                .collect(),
            parameters: self.apply_parameters(db, &sig.parameters),
            return_type: self.apply(db, &sig.return_type),
            return_ref_kind: sig.return_ref_kind,
            return_attributes: sig.return_attributes.clone(),
        }
    }

    fn apply_property(&self, db: &dyn SymbolDatabase, prop: &PropertySignature) -> PropertySignature {
        PropertySignature {
            ty: self.apply(db, &prop.ty),
            parameters: self.apply_parameters(db, &prop.parameters),
            ..prop.clone()
        }
    }

    fn apply_parameters(&self, db: &dyn SymbolDatabase, params: &[Parameter]) -> Vec<Parameter> {
        params
            .iter()
            .map(|p| Parameter {
                ty: self.apply(db, &p.ty),
                ..p.clone()
            })
            .collect()
    }

    fn apply_type_parameter(&self, db: &dyn SymbolDatabase, tp: &TypeParameter) -> TypeParameter {
        let mut out = tp.clone();
        out.constraints.types = tp
            .constraints
            .types
            .iter()
            .map(|c| self.apply(db, c))
            .collect();
        out
    }

    fn apply_at(&self, db: &dyn SymbolDatabase, ty: &TypeRef, depth: u32) -> TypeRef {
        if depth > MAX_TYPE_NESTING_DEPTH {
            return TypeRef::Error {
                name: "?".to_string(),
            };
        }
        let depth = depth + 1;
        match ty {
            TypeRef::Special { .. } | TypeRef::Error { .. } => ty.clone(),
            TypeRef::TypeParameter { param } => {
                self.get(param).cloned().unwrap_or_else(|| ty.clone())
            }
            TypeRef::Named { symbol, args } => TypeRef::Named {
                symbol: *symbol,
                args: args.iter().map(|a| self.apply_at(db, a, depth)).collect(),
            },
            TypeRef::Array { element, rank } => TypeRef::Array {
                element: Box::new(self.apply_at(db, element, depth)),
                rank: *rank,
            },
            TypeRef::Pointer { pointee } => TypeRef::pointer(self.apply_at(db, pointee, depth)),
            TypeRef::Tuple { elements } => TypeRef::Tuple {
                elements: elements
                    .iter()
                    .map(|e| TupleElement {
                        ty: self.apply_at(db, &e.ty, depth),
                        name: e.name.clone(),
                    })
                    .collect(),
            },
            TypeRef::Nullable { underlying } => self.apply_nullable(db, underlying, depth),
        }
    }

    /// `T?` with `T` replaced:
    /// - `X?` substituted for `T` stays `X?` (never `X??`);
    /// - a value type substituted for an unconstrained `T` is the plain
    ///   value type, since `T?` only meant "may be default" there;
    /// - otherwise the result is annotated.
    fn apply_nullable(&self, db: &dyn SymbolDatabase, underlying: &TypeRef, depth: u32) -> TypeRef {
        let inner = self.apply_at(db, underlying, depth);
        if let TypeRef::TypeParameter { param } = underlying
            && self.get(param).is_some()
        {
            if matches!(inner, TypeRef::Nullable { .. }) {
                return inner;
            }
            let struct_constrained = type_parameter_decl(db, param)
                .is_some_and(|decl| decl.constraints.value_type || decl.constraints.unmanaged);
            if !struct_constrained && is_value_type(db, &inner) {
                return inner;
            }
        }
        TypeRef::nullable(inner)
    }
}
