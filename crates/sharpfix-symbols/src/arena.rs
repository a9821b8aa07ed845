//! In-memory symbol database.

use crate::database::SymbolDatabase;
use crate::symbols::{AssemblySymbol, MemberSymbol, NamedTypeSymbol};
use crate::types::{MemberId, TypeSymbolId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A flat, serializable symbol store. Ids are indices into `types` and
/// `members`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SymbolArena {
    #[serde(default)]
    pub assemblies: IndexMap<String, AssemblySymbol>,
    #[serde(default)]
    pub types: Vec<NamedTypeSymbol>,
    #[serde(default)]
    pub members: Vec<MemberSymbol>,
}

impl SymbolArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_assembly(&mut self, assembly: AssemblySymbol) {
        self.assemblies.insert(assembly.name.clone(), assembly);
    }

    /// Register an assembly by name if it is not known yet.
    pub fn ensure_assembly(&mut self, name: &str) {
        if !self.assemblies.contains_key(name) {
            self.add_assembly(AssemblySymbol {
                name: name.to_string(),
                is_core_library: false,
                internals_visible_to: Vec::new(),
            });
        }
    }

    /// Id the next `add_type` call will return.
    pub fn next_type_id(&self) -> TypeSymbolId {
        TypeSymbolId(self.types.len() as u32)
    }

    /// Id the next `add_member` call will return.
    pub fn next_member_id(&self) -> MemberId {
        MemberId(self.members.len() as u32)
    }

    pub fn add_type(&mut self, symbol: NamedTypeSymbol) -> TypeSymbolId {
        let id = self.next_type_id();
        self.ensure_assembly(&symbol.assembly);
        self.types.push(symbol);
        id
    }

    /// Add a member and append it to its containing type's member list.
    pub fn add_member(&mut self, member: MemberSymbol) -> MemberId {
        let id = self.next_member_id();
        if let Some(owner) = self.types.get_mut(member.containing_type.0 as usize) {
            owner.members.push(id);
        }
        self.members.push(member);
        id
    }

    pub fn type_mut(&mut self, id: TypeSymbolId) -> Option<&mut NamedTypeSymbol> {
        self.types.get_mut(id.0 as usize)
    }

    pub fn member_mut(&mut self, id: MemberId) -> Option<&mut MemberSymbol> {
        self.members.get_mut(id.0 as usize)
    }
}

impl SymbolDatabase for SymbolArena {
    fn type_symbol(&self, id: TypeSymbolId) -> Option<&NamedTypeSymbol> {
        self.types.get(id.0 as usize)
    }

    fn member(&self, id: MemberId) -> Option<&MemberSymbol> {
        self.members.get(id.0 as usize)
    }

    fn assembly(&self, name: &str) -> Option<&AssemblySymbol> {
        self.assemblies.get(name)
    }

    fn find_type(&self, namespace: &str, name: &str, arity: usize) -> Option<TypeSymbolId> {
        self.types
            .iter()
            .position(|t| {
                t.containing_type.is_none()
                    && t.namespace == namespace
                    && t.name == name
                    && t.arity() == arity
            })
            .map(|i| TypeSymbolId(i as u32))
    }
}
