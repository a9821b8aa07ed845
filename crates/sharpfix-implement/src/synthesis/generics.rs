//! Method type parameters on generated members.

use rustc_hash::FxHashSet;
use sharpfix_common::limits::MAX_NAME_SUFFIX;
use sharpfix_symbols::{
    MemberId, MemberKind, SymbolDatabase, TypeParameterOwner, TypeRef, TypeSubstitution,
};
use tracing::trace;

/// Rename method type parameters whose names are already taken by the
/// enclosing types' parameters. `T` becomes `T1`, then `T2`, skipping names
/// the method's other parameters use. Every use in the signature and in
/// constraints follows the rename.
pub fn rename_type_parameters(
    db: &dyn SymbolDatabase,
    member: MemberId,
    kind: &MemberKind,
    reserved: &FxHashSet<String>,
) -> MemberKind {
    let MemberKind::Method(sig) = kind else {
        return kind.clone();
    };
    let originals: Vec<&str> = sig.type_parameters.iter().map(|p| p.name.as_str()).collect();
    let mut chosen: Vec<String> = Vec::with_capacity(originals.len());
    for name in &originals {
        if !reserved.contains(*name) {
            chosen.push((*name).to_string());
            continue;
        }
        let fresh = (1..=MAX_NAME_SUFFIX)
            .map(|n| format!("{name}{n}"))
            .find(|candidate| {
                !reserved.contains(candidate)
                    && !originals.contains(&candidate.as_str())
                    && !chosen.contains(candidate)
            })
            .unwrap_or_else(|| (*name).to_string());
        trace!(from = %name, to = %fresh, "renamed method type parameter");
        chosen.push(fresh);
    }
    if originals.iter().zip(&chosen).all(|(a, b)| *a == b.as_str()) {
        return kind.clone();
    }

    let owner = TypeParameterOwner::Method { member };
    let mut subst = TypeSubstitution::new();
    for (ordinal, name) in chosen.iter().enumerate() {
        if originals[ordinal] != name.as_str() {
            subst.insert(owner, ordinal as u32, TypeRef::type_param(owner, ordinal as u32, name));
        }
    }
    let mut renamed = subst.apply_member(db, kind);
    if let MemberKind::Method(sig) = &mut renamed {
        for (param, name) in sig.type_parameters.iter_mut().zip(chosen) {
            param.name = name;
        }
    }
    renamed
}

/// Whether the signature uses `T?` for the method type parameter at
/// `ordinal`.
pub fn mentions_nullable_type_parameter(kind: &MemberKind, member: MemberId, ordinal: u32) -> bool {
    let owner = TypeParameterOwner::Method { member };
    let mut found = false;
    let mut visit = |t: &TypeRef| {
        if let TypeRef::Nullable { underlying } = t
            && let TypeRef::TypeParameter { param } = underlying.as_ref()
        {
            found |= param.owner == owner && param.ordinal == ordinal;
        }
    };
    kind.value_type().walk(&mut visit);
    for param in kind.parameters() {
        param.ty.walk(&mut visit);
    }
    found
}
