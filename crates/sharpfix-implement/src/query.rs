//! Which interface members a type still has to implement.

use sharpfix_symbols::queries::{base_class_chain, interface_closure};
use sharpfix_symbols::{
    Accessibility, AttributeData, MemberId, MemberKind, MemberModifiers, MemberSymbol,
    PropertySignature, SymbolDatabase, TypeKind, TypeRef, TypeSubstitution, TypeSymbolId,
    is_accessible_from, signatures_equivalent, types_equivalent,
};
use tracing::{debug, trace};

/// An interface member as seen through one instantiation of its interface.
#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceMember {
    /// The declaring interface, instantiated (`IList<int>`).
    pub interface: TypeRef,
    pub id: MemberId,
    pub name: String,
    /// Signature with the interface's type parameters substituted.
    pub kind: MemberKind,
    pub accessibility: Accessibility,
    pub modifiers: MemberModifiers,
    pub attributes: Vec<AttributeData>,
    pub declaring_assembly: String,
}

impl InterfaceMember {
    pub fn is_static(&self) -> bool {
        self.modifiers.contains(MemberModifiers::STATIC)
    }

    /// Generic arity of a method member.
    pub fn arity(&self) -> usize {
        match &self.kind {
            MemberKind::Method(sig) => sig.type_parameters.len(),
            _ => 0,
        }
    }

    /// Whether an implicit (public) implementation in `assembly` can
    /// implement this member.
    pub fn is_accessible_from(&self, db: &dyn SymbolDatabase, assembly: &str) -> bool {
        is_accessible_from(db, self.accessibility, &self.declaring_assembly, assembly)
    }
}

/// The missing members of one interface in the closure.
#[derive(Clone, Debug, PartialEq)]
pub struct InterfaceMemberGroup {
    pub interface: TypeRef,
    pub members: Vec<InterfaceMember>,
}

/// Missing members per interface in closure order (base interfaces first).
/// Interfaces with nothing missing are left out.
pub fn unimplemented_member_groups(
    db: &dyn SymbolDatabase,
    target: TypeSymbolId,
    interface: &TypeRef,
) -> Vec<InterfaceMemberGroup> {
    let Some(target_symbol) = db.type_symbol(target) else {
        return Vec::new();
    };
    let target_type = self_instantiation(db, target);
    let allows_static = matches!(target_symbol.kind, TypeKind::Class | TypeKind::Struct);

    let mut groups = Vec::new();
    for iface in interface_closure(db, interface) {
        let Some((iface_id, _)) = iface.as_named() else {
            continue;
        };
        let subst = TypeSubstitution::for_type(db, &iface);
        let mut members = Vec::new();
        for (id, member) in db.members_of(iface_id) {
            if !is_implementable(member, allows_static) {
                continue;
            }
            let kind = subst.apply_member(db, &member.kind);
            if is_implemented(db, &target_type, &iface, id, member, &kind) {
                trace!(member = %member.name, "already implemented");
                continue;
            }
            members.push(InterfaceMember {
                interface: iface.clone(),
                id,
                name: member.name.clone(),
                kind,
                accessibility: member.accessibility,
                modifiers: member.modifiers,
                attributes: member.attributes.clone(),
                declaring_assembly: db
                    .type_symbol(iface_id)
                    .map(|s| s.assembly.clone())
                    .unwrap_or_default(),
            });
        }
        if !members.is_empty() {
            groups.push(InterfaceMemberGroup {
                interface: iface,
                members,
            });
        }
    }
    debug!(
        target = %db.qualified_name(target),
        groups = groups.len(),
        members = groups.iter().map(|g| g.members.len()).sum::<usize>(),
        "unimplemented interface members"
    );
    groups
}

/// Missing members flattened across the closure. Members that two
/// interfaces declare with the same substituted signature appear once.
pub fn unimplemented_members(
    db: &dyn SymbolDatabase,
    target: TypeSymbolId,
    interface: &TypeRef,
) -> Vec<InterfaceMember> {
    distinct_members(db, &unimplemented_member_groups(db, target, interface))
}

/// Members of `groups` in order, dropping any with the same name,
/// staticness and substituted signature as an earlier one.
pub fn distinct_members(db: &dyn SymbolDatabase, groups: &[InterfaceMemberGroup]) -> Vec<InterfaceMember> {
    let mut out: Vec<InterfaceMember> = Vec::new();
    for group in groups {
        for member in &group.members {
            let duplicate = out.iter().any(|m| {
                m.name == member.name
                    && m.is_static() == member.is_static()
                    && signatures_equivalent(db, &m.kind, &member.kind)
            });
            if !duplicate {
                out.push(member.clone());
            }
        }
    }
    out
}

pub(crate) fn self_instantiation(db: &dyn SymbolDatabase, target: TypeSymbolId) -> TypeRef {
    let owner = sharpfix_symbols::TypeParameterOwner::Type { symbol: target };
    let args = db
        .type_symbol(target)
        .map(|s| {
            s.type_parameters
                .iter()
                .enumerate()
                .map(|(i, p)| TypeRef::type_param(owner, i as u32, p.name.clone()))
                .collect()
        })
        .unwrap_or_default();
    TypeRef::generic(target, args)
}

fn is_implementable(member: &MemberSymbol, allows_static: bool) -> bool {
    let shape = matches!(
        member.kind,
        MemberKind::Method(_)
            | MemberKind::Property(_)
            | MemberKind::Indexer(_)
            | MemberKind::Event(_)
            | MemberKind::Operator(_)
    );
    if !shape || member.has_body || member.accessibility == Accessibility::Private {
        return false;
    }
    if member.is_static() {
        return member.is_abstract() && allows_static;
    }
    true
}

/// Whether the target or one of its base classes already implements the
/// interface member, explicitly or by a matching public member.
fn is_implemented(
    db: &dyn SymbolDatabase,
    target_type: &TypeRef,
    iface: &TypeRef,
    id: MemberId,
    member: &MemberSymbol,
    kind: &MemberKind,
) -> bool {
    let mut types = vec![target_type.clone()];
    types.extend(base_class_chain(db, target_type));
    for ty in &types {
        let Some((symbol, _)) = ty.as_named() else {
            continue;
        };
        let subst = TypeSubstitution::for_type(db, ty);
        for (_, candidate) in db.members_of(symbol) {
            let explicit = candidate.explicit_implementations.iter().any(|e| {
                e.member == id && types_equivalent(db, &subst.apply(db, &e.interface), iface)
            });
            if explicit {
                return true;
            }
            if implements_implicitly(db, &subst, candidate, member, kind) {
                return true;
            }
        }
    }
    false
}

fn implements_implicitly(
    db: &dyn SymbolDatabase,
    subst: &TypeSubstitution,
    candidate: &MemberSymbol,
    member: &MemberSymbol,
    kind: &MemberKind,
) -> bool {
    if candidate.is_explicit_implementation()
        || candidate.accessibility != Accessibility::Public
        || candidate.name != member.name
        || candidate.is_static() != member.is_static()
    {
        return false;
    }
    let candidate_kind = subst.apply_member(db, &candidate.kind);
    if !signatures_equivalent(db, &candidate_kind, kind) {
        return false;
    }
    match (&candidate_kind, kind) {
        (MemberKind::Property(have), MemberKind::Property(need))
        | (MemberKind::Indexer(have), MemberKind::Indexer(need)) => accessors_satisfy(have, need),
        _ => true,
    }
}

/// Every accessor the interface requires exists and is public.
fn accessors_satisfy(have: &PropertySignature, need: &PropertySignature) -> bool {
    let public = |accessor: &Option<sharpfix_symbols::Accessor>| {
        accessor
            .as_ref()
            .is_some_and(|a| a.accessibility.is_none_or(|acc| acc == Accessibility::Public))
    };
    (need.getter.is_none() || public(&have.getter)) && (need.setter.is_none() || public(&have.setter))
}
