//! The read-only symbol model the engine works against.

use crate::symbols::{AssemblySymbol, MemberSymbol, NamedTypeSymbol};
use crate::types::{Accessibility, MemberId, TypeSymbolId};

/// Host symbol model.
///
/// Implementations must be shareable across threads: fix-all hands one
/// database to every worker.
pub trait SymbolDatabase: Sync {
    fn type_symbol(&self, id: TypeSymbolId) -> Option<&NamedTypeSymbol>;

    fn member(&self, id: MemberId) -> Option<&MemberSymbol>;

    fn assembly(&self, name: &str) -> Option<&AssemblySymbol>;

    /// Look a type up by namespace, simple name and generic arity.
    fn find_type(&self, namespace: &str, name: &str, arity: usize) -> Option<TypeSymbolId>;

    /// Members of a type, skipping ids the database cannot resolve.
    fn members_of(&self, id: TypeSymbolId) -> Vec<(MemberId, &MemberSymbol)> {
        let Some(symbol) = self.type_symbol(id) else {
            return Vec::new();
        };
        symbol
            .members
            .iter()
            .filter_map(|&member_id| self.member(member_id).map(|m| (member_id, m)))
            .collect()
    }

    /// Members of a type with the given name.
    fn members_named(&self, id: TypeSymbolId, name: &str) -> Vec<(MemberId, &MemberSymbol)> {
        let mut members = self.members_of(id);
        members.retain(|(_, m)| m.name == name);
        members
    }

    /// Dotted name including containing types and namespace, without
    /// type arguments. Used in log output and error messages.
    fn qualified_name(&self, id: TypeSymbolId) -> String {
        let Some(symbol) = self.type_symbol(id) else {
            return format!("<type {}>", id.0);
        };
        let prefix = match symbol.containing_type {
            Some(outer) => self.qualified_name(outer),
            None => symbol.namespace.clone(),
        };
        if prefix.is_empty() {
            symbol.name.clone()
        } else {
            format!("{prefix}.{}", symbol.name)
        }
    }
}

/// Whether `from_assembly` can see something declared with `accessibility`
/// in `declaring_assembly`, ignoring inheritance-based access.
pub fn is_accessible_from(
    db: &dyn SymbolDatabase,
    accessibility: Accessibility,
    declaring_assembly: &str,
    from_assembly: &str,
) -> bool {
    match accessibility {
        Accessibility::Public => true,
        Accessibility::Internal | Accessibility::ProtectedInternal => {
            grants_internal_access(db, declaring_assembly, from_assembly)
        }
        Accessibility::Private | Accessibility::PrivateProtected | Accessibility::Protected => {
            false
        }
    }
}

/// Same assembly, or the declaring assembly names `from_assembly` as a
/// friend.
pub fn grants_internal_access(
    db: &dyn SymbolDatabase,
    declaring_assembly: &str,
    from_assembly: &str,
) -> bool {
    if declaring_assembly == from_assembly {
        return true;
    }
    db.assembly(declaring_assembly)
        .is_some_and(|a| a.internals_visible_to.iter().any(|f| f == from_assembly))
}

/// Whether a named type (and every type containing it) is visible from
/// `from_assembly`.
pub fn is_type_accessible_from(
    db: &dyn SymbolDatabase,
    id: TypeSymbolId,
    from_assembly: &str,
) -> bool {
    let mut current = Some(id);
    let mut depth = 0;
    while let Some(id) = current {
        let Some(symbol) = db.type_symbol(id) else {
            return false;
        };
        if !is_accessible_from(db, symbol.accessibility, &symbol.assembly, from_assembly) {
            return false;
        }
        depth += 1;
        if depth > sharpfix_common::limits::MAX_TYPE_NESTING_DEPTH {
            return false;
        }
        current = symbol.containing_type;
    }
    true
}
