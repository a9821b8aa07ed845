//! Fluent construction of arena symbols.
//!
//! Used by hosts that translate their own model into an arena and by every
//! test fixture in the workspace.

use crate::arena::SymbolArena;
use crate::symbols::{
    ExplicitImplementation, FieldSignature, MemberKind, MemberSymbol, MethodSignature, NamedTypeSymbol,
    Parameter, PropertySignature, TypeKind, TypeParameter,
};
use crate::types::{
    Accessibility, AttributeData, ConstantValue, MemberId, MemberModifiers, SpecialType,
    TypeModifiers, TypeParameterOwner, TypeRef, TypeSymbolId,
};

/// Assembly new types belong to unless `TypeBuilder::assembly` says
/// otherwise.
pub const DEFAULT_ASSEMBLY: &str = "App";

pub struct TypeBuilder<'a> {
    arena: &'a mut SymbolArena,
    id: TypeSymbolId,
    symbol: NamedTypeSymbol,
}

impl<'a> TypeBuilder<'a> {
    fn new(arena: &'a mut SymbolArena, name: &str, kind: TypeKind) -> Self {
        let id = arena.next_type_id();
        Self {
            arena,
            id,
            symbol: NamedTypeSymbol::new(name, "", kind, DEFAULT_ASSEMBLY),
        }
    }

    /// The id this type will have once finished.
    pub const fn id(&self) -> TypeSymbolId {
        self.id
    }

    pub fn namespace(mut self, namespace: &str) -> Self {
        self.symbol.namespace = namespace.to_string();
        self
    }

    pub fn assembly(mut self, assembly: &str) -> Self {
        self.symbol.assembly = assembly.to_string();
        self
    }

    pub fn nested_in(mut self, outer: TypeSymbolId) -> Self {
        self.symbol.containing_type = Some(outer);
        self
    }

    pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
        self.symbol.accessibility = accessibility;
        self
    }

    pub fn modifiers(mut self, modifiers: TypeModifiers) -> Self {
        self.symbol.modifiers |= modifiers;
        self
    }

    /// Declare a type parameter and return the builder with it added.
    pub fn type_parameter(mut self, param: TypeParameter) -> Self {
        self.symbol.type_parameters.push(param);
        self
    }

    /// Reference to this type's type parameter at `ordinal`.
    pub fn param_ref(&self, ordinal: u32) -> TypeRef {
        let name = self
            .symbol
            .type_parameters
            .get(ordinal as usize)
            .map_or_else(|| format!("T{ordinal}"), |p| p.name.clone());
        TypeRef::type_param(TypeParameterOwner::Type { symbol: self.id }, ordinal, name)
    }

    pub fn base(mut self, base: TypeRef) -> Self {
        self.symbol.base_type = Some(base);
        self
    }

    pub fn interface(mut self, interface: TypeRef) -> Self {
        self.symbol.interfaces.push(interface);
        self
    }

    pub fn attribute(mut self, attribute: AttributeData) -> Self {
        self.symbol.attributes.push(attribute);
        self
    }

    pub fn enum_underlying(mut self, special: SpecialType) -> Self {
        self.symbol.enum_underlying_type = Some(special);
        self
    }

    pub fn primary_constructor(mut self, parameters: Vec<Parameter>) -> Self {
        self.symbol.primary_constructor = parameters;
        self
    }

    pub fn finish(self) -> TypeSymbolId {
        let id = self.arena.add_type(self.symbol);
        debug_assert_eq!(id, self.id);
        id
    }
}

pub struct MemberBuilder<'a> {
    arena: &'a mut SymbolArena,
    id: MemberId,
    symbol: MemberSymbol,
}

impl<'a> MemberBuilder<'a> {
    fn new(arena: &'a mut SymbolArena, owner: TypeSymbolId, name: &str, kind: MemberKind) -> Self {
        let id = arena.next_member_id();
        Self {
            arena,
            id,
            symbol: MemberSymbol::new(name, owner, kind),
        }
    }

    pub const fn id(&self) -> MemberId {
        self.id
    }

    pub fn accessibility(mut self, accessibility: Accessibility) -> Self {
        self.symbol.accessibility = accessibility;
        self
    }

    pub fn modifiers(mut self, modifiers: MemberModifiers) -> Self {
        self.symbol.modifiers |= modifiers;
        self
    }

    pub fn attribute(mut self, attribute: AttributeData) -> Self {
        self.symbol.attributes.push(attribute);
        self
    }

    /// Mark as having a body (a default interface member).
    pub fn with_body(mut self) -> Self {
        self.symbol.has_body = true;
        self
    }

    pub fn implements_explicitly(mut self, interface: TypeRef, member: MemberId) -> Self {
        self.symbol
            .explicit_implementations
            .push(ExplicitImplementation { interface, member });
        self
    }

    pub fn finish(self) -> MemberId {
        let id = self.arena.add_member(self.symbol);
        debug_assert_eq!(id, self.id);
        id
    }
}

impl SymbolArena {
    pub fn build_type(&mut self, name: &str, kind: TypeKind) -> TypeBuilder<'_> {
        TypeBuilder::new(self, name, kind)
    }

    pub fn build_member(
        &mut self,
        owner: TypeSymbolId,
        name: &str,
        kind: MemberKind,
    ) -> MemberBuilder<'_> {
        MemberBuilder::new(self, owner, name, kind)
    }

    /// Reference to a type parameter of the method with id `member`.
    pub fn method_param_ref(member: MemberId, ordinal: u32, name: &str) -> TypeRef {
        TypeRef::type_param(TypeParameterOwner::Method { member }, ordinal, name)
    }

    /// Public class in the default assembly.
    pub fn add_class(&mut self, name: &str) -> TypeSymbolId {
        self.build_type(name, TypeKind::Class).finish()
    }

    /// Public interface in the default assembly.
    pub fn add_interface(&mut self, name: &str) -> TypeSymbolId {
        self.build_type(name, TypeKind::Interface).finish()
    }

    pub fn add_method(
        &mut self,
        owner: TypeSymbolId,
        name: &str,
        return_type: TypeRef,
        parameters: Vec<Parameter>,
    ) -> MemberId {
        self.build_member(
            owner,
            name,
            MemberKind::Method(MethodSignature::new(return_type, parameters)),
        )
        .finish()
    }

    pub fn add_property(
        &mut self,
        owner: TypeSymbolId,
        name: &str,
        signature: PropertySignature,
    ) -> MemberId {
        self.build_member(owner, name, MemberKind::Property(signature))
            .finish()
    }

    /// Instance field with the given accessibility.
    pub fn add_field(
        &mut self,
        owner: TypeSymbolId,
        name: &str,
        ty: TypeRef,
        accessibility: Accessibility,
    ) -> MemberId {
        self.build_member(
            owner,
            name,
            MemberKind::Field(FieldSignature { ty, constant: None }),
        )
        .accessibility(accessibility)
        .finish()
    }

    /// A named constant of an enum.
    pub fn add_enum_member(
        &mut self,
        owner: TypeSymbolId,
        name: &str,
        value: ConstantValue,
    ) -> MemberId {
        let ty = TypeRef::named(owner);
        self.build_member(
            owner,
            name,
            MemberKind::Field(FieldSignature {
                ty,
                constant: Some(value),
            }),
        )
        .modifiers(MemberModifiers::STATIC | MemberModifiers::CONST)
        .finish()
    }
}
