//! A writable layer over a shared symbol database.
//!
//! Fix-all applies several fixes to one document in sequence. Each fix must
//! see the members added by the fixes before it, but the shared database is
//! read-only and used by other workers at the same time. The overlay records
//! the added members per document and answers queries from the layer first.

use crate::database::SymbolDatabase;
use crate::symbols::{AssemblySymbol, MemberSymbol, NamedTypeSymbol};
use crate::types::{MemberId, TypeSymbolId};
use rustc_hash::FxHashMap;

/// Member ids at or above this value belong to an overlay.
pub const OVERLAY_MEMBER_BASE: u32 = 1 << 31;

pub struct SymbolOverlay<'a> {
    base: &'a dyn SymbolDatabase,
    types: FxHashMap<TypeSymbolId, NamedTypeSymbol>,
    members: Vec<MemberSymbol>,
}

impl<'a> SymbolOverlay<'a> {
    pub fn new(base: &'a dyn SymbolDatabase) -> Self {
        Self {
            base,
            types: FxHashMap::default(),
            members: Vec::new(),
        }
    }

    /// Record `member` as declared on its containing type.
    ///
    /// Returns `None` when the containing type is unknown to the base
    /// database.
    pub fn add_member(&mut self, member: MemberSymbol) -> Option<MemberId> {
        let owner = member.containing_type;
        let id = MemberId(OVERLAY_MEMBER_BASE + self.members.len() as u32);
        if !self.types.contains_key(&owner) {
            let symbol = self.base.type_symbol(owner)?.clone();
            self.types.insert(owner, symbol);
        }
        if let Some(symbol) = self.types.get_mut(&owner) {
            symbol.members.push(id);
        }
        self.members.push(member);
        Some(id)
    }

    /// Number of members added through this overlay.
    pub fn added_member_count(&self) -> usize {
        self.members.len()
    }
}

impl SymbolDatabase for SymbolOverlay<'_> {
    fn type_symbol(&self, id: TypeSymbolId) -> Option<&NamedTypeSymbol> {
        self.types.get(&id).or_else(|| self.base.type_symbol(id))
    }

    fn member(&self, id: MemberId) -> Option<&MemberSymbol> {
        if id.0 >= OVERLAY_MEMBER_BASE {
            self.members.get((id.0 - OVERLAY_MEMBER_BASE) as usize)
        } else {
            self.base.member(id)
        }
    }

    fn assembly(&self, name: &str) -> Option<&AssemblySymbol> {
        self.base.assembly(name)
    }

    fn find_type(&self, namespace: &str, name: &str, arity: usize) -> Option<TypeSymbolId> {
        self.base.find_type(namespace, name, arity)
    }
}
