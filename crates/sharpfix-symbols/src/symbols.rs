//! Named type and member symbols.
//!
//! Symbols are plain data: the host fills them in once and the engine only
//! reads them through `SymbolDatabase`.

use crate::types::{
    Accessibility, AttributeData, ConstantValue, MemberId, MemberModifiers, RefKind, SpecialType,
    TypeModifiers, TypeRef, TypeSymbolId,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeKind {
    Class,
    Struct,
    Interface,
    Enum,
    Delegate,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Variance {
    #[default]
    None,
    In,
    Out,
}

/// Constraints declared on a type parameter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TypeParameterConstraints {
    /// `class`
    pub reference_type: bool,
    /// `class?`
    pub nullable_reference_type: bool,
    /// `struct`
    pub value_type: bool,
    pub unmanaged: bool,
    pub not_null: bool,
    /// `default` (only legal on overrides and explicit implementations)
    pub default: bool,
    /// `new()`
    pub constructor: bool,
    /// Type constraints, in declaration order.
    pub types: Vec<TypeRef>,
}

impl TypeParameterConstraints {
    pub fn is_empty(&self) -> bool {
        !self.reference_type
            && !self.nullable_reference_type
            && !self.value_type
            && !self.unmanaged
            && !self.not_null
            && !self.default
            && !self.constructor
            && self.types.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeParameter {
    pub name: String,
    #[serde(default)]
    pub variance: Variance,
    #[serde(default)]
    pub constraints: TypeParameterConstraints,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeData>,
}

impl TypeParameter {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variance: Variance::None,
            constraints: TypeParameterConstraints::default(),
            attributes: Vec::new(),
        }
    }

    pub fn with_constraints(mut self, constraints: TypeParameterConstraints) -> Self {
        self.constraints = constraints;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub ref_kind: RefKind,
    #[serde(default)]
    pub is_params: bool,
    /// Optional in metadata (`[Optional]`), whether or not a default
    /// constant is present.
    #[serde(default)]
    pub is_optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<ConstantValue>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeData>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            ref_kind: RefKind::None,
            is_params: false,
            is_optional: false,
            default_value: None,
            attributes: Vec::new(),
        }
    }

    pub fn with_ref_kind(mut self, ref_kind: RefKind) -> Self {
        self.ref_kind = ref_kind;
        self
    }

    pub fn with_default(mut self, value: ConstantValue) -> Self {
        self.is_optional = true;
        self.default_value = Some(value);
        self
    }

    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    pub fn params(mut self) -> Self {
        self.is_params = true;
        self
    }

    pub fn with_attribute(mut self, attribute: AttributeData) -> Self {
        self.attributes.push(attribute);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodSignature {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    pub return_type: TypeRef,
    #[serde(default)]
    pub return_ref_kind: RefKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub return_attributes: Vec<AttributeData>,
}

impl MethodSignature {
    pub fn new(return_type: TypeRef, parameters: Vec<Parameter>) -> Self {
        Self {
            type_parameters: Vec::new(),
            parameters,
            return_type,
            return_ref_kind: RefKind::None,
            return_attributes: Vec::new(),
        }
    }

    pub fn with_type_parameters(mut self, type_parameters: Vec<TypeParameter>) -> Self {
        self.type_parameters = type_parameters;
        self
    }
}

/// A property or indexer accessor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Accessor {
    /// Accessor-level accessibility when it differs from the property's.
    pub accessibility: Option<Accessibility>,
    /// `init` instead of `set`.
    pub is_init: bool,
    pub has_body: bool,
    pub attributes: Vec<AttributeData>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySignature {
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default)]
    pub ref_kind: RefKind,
    /// Non-empty for indexers.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub getter: Option<Accessor>,
    #[serde(default)]
    pub setter: Option<Accessor>,
}

impl PropertySignature {
    pub fn get_set(ty: TypeRef) -> Self {
        Self {
            ty,
            ref_kind: RefKind::None,
            parameters: Vec::new(),
            getter: Some(Accessor::default()),
            setter: Some(Accessor::default()),
        }
    }

    pub fn get_only(ty: TypeRef) -> Self {
        Self {
            setter: None,
            ..Self::get_set(ty)
        }
    }

    pub fn set_only(ty: TypeRef) -> Self {
        Self {
            getter: None,
            ..Self::get_set(ty)
        }
    }

    pub fn get_init(ty: TypeRef) -> Self {
        Self {
            setter: Some(Accessor {
                is_init: true,
                ..Accessor::default()
            }),
            ..Self::get_set(ty)
        }
    }

    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSignature {
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSignature {
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<ConstantValue>,
}

/// User-definable operators and conversions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperatorKind {
    Plus,
    Minus,
    LogicalNot,
    BitwiseNot,
    Increment,
    Decrement,
    True,
    False,
    Multiply,
    Divide,
    Modulus,
    BitwiseAnd,
    BitwiseOr,
    ExclusiveOr,
    LeftShift,
    RightShift,
    UnsignedRightShift,
    Equality,
    Inequality,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
    ImplicitConversion,
    ExplicitConversion,
}

impl OperatorKind {
    /// Token following the `operator` keyword. Conversions have none; their
    /// target type takes that place.
    pub const fn token(self) -> Option<&'static str> {
        Some(match self {
            OperatorKind::Plus => "+",
            OperatorKind::Minus => "-",
            OperatorKind::LogicalNot => "!",
            OperatorKind::BitwiseNot => "~",
            OperatorKind::Increment => "++",
            OperatorKind::Decrement => "--",
            OperatorKind::True => "true",
            OperatorKind::False => "false",
            OperatorKind::Multiply => "*",
            OperatorKind::Divide => "/",
            OperatorKind::Modulus => "%",
            OperatorKind::BitwiseAnd => "&",
            OperatorKind::BitwiseOr => "|",
            OperatorKind::ExclusiveOr => "^",
            OperatorKind::LeftShift => "<<",
            OperatorKind::RightShift => ">>",
            OperatorKind::UnsignedRightShift => ">>>",
            OperatorKind::Equality => "==",
            OperatorKind::Inequality => "!=",
            OperatorKind::LessThan => "<",
            OperatorKind::GreaterThan => ">",
            OperatorKind::LessThanOrEqual => "<=",
            OperatorKind::GreaterThanOrEqual => ">=",
            OperatorKind::ImplicitConversion | OperatorKind::ExplicitConversion => return None,
        })
    }

    pub const fn is_conversion(self) -> bool {
        matches!(
            self,
            OperatorKind::ImplicitConversion | OperatorKind::ExplicitConversion
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorSignature {
    pub operator: OperatorKind,
    pub signature: MethodSignature,
}

/// The closed set of member shapes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum MemberKind {
    Method(MethodSignature),
    Property(PropertySignature),
    Indexer(PropertySignature),
    Event(EventSignature),
    Operator(OperatorSignature),
    Field(FieldSignature),
    Constructor(MethodSignature),
}

impl MemberKind {
    pub const fn describe(&self) -> &'static str {
        match self {
            MemberKind::Method(_) => "method",
            MemberKind::Property(_) => "property",
            MemberKind::Indexer(_) => "indexer",
            MemberKind::Event(_) => "event",
            MemberKind::Operator(_) => "operator",
            MemberKind::Field(_) => "field",
            MemberKind::Constructor(_) => "constructor",
        }
    }

    /// Parameters of a method, operator, constructor or indexer.
    pub fn parameters(&self) -> &[Parameter] {
        match self {
            MemberKind::Method(sig) | MemberKind::Constructor(sig) => &sig.parameters,
            MemberKind::Operator(op) => &op.signature.parameters,
            MemberKind::Indexer(prop) | MemberKind::Property(prop) => &prop.parameters,
            MemberKind::Event(_) | MemberKind::Field(_) => &[],
        }
    }

    /// The member's value type: return type, property type, event or field
    /// type.
    pub fn value_type(&self) -> &TypeRef {
        match self {
            MemberKind::Method(sig) | MemberKind::Constructor(sig) => &sig.return_type,
            MemberKind::Operator(op) => &op.signature.return_type,
            MemberKind::Indexer(prop) | MemberKind::Property(prop) => &prop.ty,
            MemberKind::Event(ev) => &ev.ty,
            MemberKind::Field(field) => &field.ty,
        }
    }
}

/// An interface member implemented explicitly by a class member.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplicitImplementation {
    pub interface: TypeRef,
    pub member: MemberId,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSymbol {
    pub name: String,
    pub containing_type: TypeSymbolId,
    #[serde(default)]
    pub accessibility: Accessibility,
    #[serde(default)]
    pub modifiers: MemberModifiers,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeData>,
    /// For interface members: a default implementation body exists.
    #[serde(default)]
    pub has_body: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub explicit_implementations: Vec<ExplicitImplementation>,
    pub kind: MemberKind,
}

impl MemberSymbol {
    pub fn new(name: impl Into<String>, containing_type: TypeSymbolId, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            containing_type,
            accessibility: Accessibility::Public,
            modifiers: MemberModifiers::empty(),
            attributes: Vec::new(),
            has_body: false,
            explicit_implementations: Vec::new(),
            kind,
        }
    }

    pub fn is_static(&self) -> bool {
        self.modifiers.contains(MemberModifiers::STATIC)
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(MemberModifiers::ABSTRACT)
    }

    pub fn is_explicit_implementation(&self) -> bool {
        !self.explicit_implementations.is_empty()
    }

    pub fn type_parameters(&self) -> &[TypeParameter] {
        match &self.kind {
            MemberKind::Method(sig) => &sig.type_parameters,
            _ => &[],
        }
    }
}

/// An assembly (compilation unit of accessibility for `internal`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssemblySymbol {
    pub name: String,
    /// Defines the well-known framework types (`System.IDisposable`, ...).
    #[serde(default)]
    pub is_core_library: bool,
    /// Assemblies granted access to this assembly's internals.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub internals_visible_to: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedTypeSymbol {
    pub name: String,
    /// Dotted namespace, empty for the global namespace.
    #[serde(default)]
    pub namespace: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub containing_type: Option<TypeSymbolId>,
    pub kind: TypeKind,
    #[serde(default)]
    pub accessibility: Accessibility,
    #[serde(default)]
    pub modifiers: TypeModifiers,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_parameters: Vec<TypeParameter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<TypeRef>,
    /// Directly declared interfaces (for interfaces: base interfaces).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<TypeRef>,
    #[serde(default)]
    pub members: Vec<MemberId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeData>,
    pub assembly: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enum_underlying_type: Option<SpecialType>,
    /// Parameters of a primary constructor, in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub primary_constructor: Vec<Parameter>,
}

impl NamedTypeSymbol {
    pub fn new(
        name: impl Into<String>,
        namespace: impl Into<String>,
        kind: TypeKind,
        assembly: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            containing_type: None,
            kind,
            accessibility: Accessibility::Public,
            modifiers: TypeModifiers::empty(),
            type_parameters: Vec::new(),
            base_type: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            attributes: Vec::new(),
            assembly: assembly.into(),
            enum_underlying_type: None,
            primary_constructor: Vec::new(),
        }
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers.contains(TypeModifiers::ABSTRACT)
    }

    pub fn is_sealed(&self) -> bool {
        self.modifiers.contains(TypeModifiers::SEALED)
    }

    pub fn is_value_type(&self) -> bool {
        matches!(self.kind, TypeKind::Struct | TypeKind::Enum)
    }

    pub fn arity(&self) -> usize {
        self.type_parameters.len()
    }
}
