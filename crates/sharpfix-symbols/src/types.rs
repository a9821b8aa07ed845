//! Type references and the small value types shared by all symbols.
//!
//! A `TypeRef` is a structural description of a type as written in a
//! signature: it is what substitution rewrites and what the printer renders.
//! Named types point back into the symbol database by `TypeSymbolId`.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Index of a named type in the symbol database.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeSymbolId(pub u32);

/// Index of a member (method, property, field, ...) in the symbol database.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub u32);

/// Built-in types that C# spells with a keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpecialType {
    Void,
    Object,
    Dynamic,
    String,
    Bool,
    Char,
    SByte,
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    NInt,
    NUInt,
    Single,
    Double,
    Decimal,
}

impl SpecialType {
    /// The C# keyword for this type.
    pub const fn keyword(self) -> &'static str {
        match self {
            SpecialType::Void => "void",
            SpecialType::Object => "object",
            SpecialType::Dynamic => "dynamic",
            SpecialType::String => "string",
            SpecialType::Bool => "bool",
            SpecialType::Char => "char",
            SpecialType::SByte => "sbyte",
            SpecialType::Byte => "byte",
            SpecialType::Int16 => "short",
            SpecialType::UInt16 => "ushort",
            SpecialType::Int32 => "int",
            SpecialType::UInt32 => "uint",
            SpecialType::Int64 => "long",
            SpecialType::UInt64 => "ulong",
            SpecialType::NInt => "nint",
            SpecialType::NUInt => "nuint",
            SpecialType::Single => "float",
            SpecialType::Double => "double",
            SpecialType::Decimal => "decimal",
        }
    }

    pub const fn is_value_type(self) -> bool {
        !matches!(
            self,
            SpecialType::Void | SpecialType::Object | SpecialType::Dynamic | SpecialType::String
        )
    }

    pub const fn is_integral(self) -> bool {
        matches!(
            self,
            SpecialType::SByte
                | SpecialType::Byte
                | SpecialType::Int16
                | SpecialType::UInt16
                | SpecialType::Int32
                | SpecialType::UInt32
                | SpecialType::Int64
                | SpecialType::UInt64
                | SpecialType::NInt
                | SpecialType::NUInt
        )
    }

    pub const fn is_signed_integral(self) -> bool {
        matches!(
            self,
            SpecialType::SByte
                | SpecialType::Int16
                | SpecialType::Int32
                | SpecialType::Int64
                | SpecialType::NInt
        )
    }

    /// Inclusive range of an integral type, `None` for non-integral and
    /// native-sized types (whose range depends on the platform).
    pub const fn integral_range(self) -> Option<(i128, i128)> {
        match self {
            SpecialType::SByte => Some((i8::MIN as i128, i8::MAX as i128)),
            SpecialType::Byte => Some((0, u8::MAX as i128)),
            SpecialType::Int16 => Some((i16::MIN as i128, i16::MAX as i128)),
            SpecialType::UInt16 => Some((0, u16::MAX as i128)),
            SpecialType::Int32 => Some((i32::MIN as i128, i32::MAX as i128)),
            SpecialType::UInt32 => Some((0, u32::MAX as i128)),
            SpecialType::Int64 => Some((i64::MIN as i128, i64::MAX as i128)),
            SpecialType::UInt64 => Some((0, u64::MAX as i128)),
            _ => None,
        }
    }
}

/// Which declaration owns a type parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeParameterOwner {
    Type { symbol: TypeSymbolId },
    Method { member: MemberId },
}

/// A reference to a type parameter by owner and position. `name` is what
/// gets printed; renaming changes only the name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeParameterRef {
    pub owner: TypeParameterOwner,
    pub ordinal: u32,
    pub name: String,
}

/// One element of a tuple type. The name is sugar and does not take part in
/// signature identity.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TupleElement {
    #[serde(rename = "type")]
    pub ty: TypeRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// A type as it appears in a signature.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TypeRef {
    Special {
        special: SpecialType,
    },
    /// A named type with its own type arguments.
    Named {
        symbol: TypeSymbolId,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        args: Vec<TypeRef>,
    },
    TypeParameter {
        param: TypeParameterRef,
    },
    Array {
        element: Box<TypeRef>,
        #[serde(default = "default_rank")]
        rank: u32,
    },
    Pointer {
        pointee: Box<TypeRef>,
    },
    /// `T?`: a nullable value type or an annotated reference type.
    Nullable {
        underlying: Box<TypeRef>,
    },
    Tuple {
        elements: Vec<TupleElement>,
    },
    /// A type the host could not resolve; rendered by name.
    Error {
        name: String,
    },
}

const fn default_rank() -> u32 {
    1
}

impl TypeRef {
    pub const fn special(special: SpecialType) -> Self {
        TypeRef::Special { special }
    }

    pub const fn void() -> Self {
        Self::special(SpecialType::Void)
    }

    pub const fn object() -> Self {
        Self::special(SpecialType::Object)
    }

    pub const fn string() -> Self {
        Self::special(SpecialType::String)
    }

    pub const fn bool() -> Self {
        Self::special(SpecialType::Bool)
    }

    pub const fn int() -> Self {
        Self::special(SpecialType::Int32)
    }

    pub const fn named(symbol: TypeSymbolId) -> Self {
        TypeRef::Named {
            symbol,
            args: Vec::new(),
        }
    }

    pub fn generic(symbol: TypeSymbolId, args: Vec<TypeRef>) -> Self {
        TypeRef::Named { symbol, args }
    }

    pub fn type_param(owner: TypeParameterOwner, ordinal: u32, name: impl Into<String>) -> Self {
        TypeRef::TypeParameter {
            param: TypeParameterRef {
                owner,
                ordinal,
                name: name.into(),
            },
        }
    }

    pub fn array(element: TypeRef) -> Self {
        TypeRef::Array {
            element: Box::new(element),
            rank: 1,
        }
    }

    pub fn pointer(pointee: TypeRef) -> Self {
        TypeRef::Pointer {
            pointee: Box::new(pointee),
        }
    }

    /// Wrap in `?`. Already-nullable types are returned unchanged.
    pub fn nullable(underlying: TypeRef) -> Self {
        match underlying {
            TypeRef::Nullable { .. } => underlying,
            other => TypeRef::Nullable {
                underlying: Box::new(other),
            },
        }
    }

    pub fn tuple(elements: impl IntoIterator<Item = (TypeRef, Option<&'static str>)>) -> Self {
        TypeRef::Tuple {
            elements: elements
                .into_iter()
                .map(|(ty, name)| TupleElement {
                    ty,
                    name: name.map(str::to_string),
                })
                .collect(),
        }
    }

    pub fn as_special(&self) -> Option<SpecialType> {
        match self {
            TypeRef::Special { special } => Some(*special),
            _ => None,
        }
    }

    pub fn as_named(&self) -> Option<(TypeSymbolId, &[TypeRef])> {
        match self {
            TypeRef::Named { symbol, args } => Some((*symbol, args.as_slice())),
            _ => None,
        }
    }

    pub fn as_type_parameter(&self) -> Option<&TypeParameterRef> {
        match self {
            TypeRef::TypeParameter { param } => Some(param),
            _ => None,
        }
    }

    pub fn is_void(&self) -> bool {
        matches!(
            self,
            TypeRef::Special {
                special: SpecialType::Void
            }
        )
    }

    /// Strip one level of `?`.
    pub fn without_nullable(&self) -> &TypeRef {
        match self {
            TypeRef::Nullable { underlying } => underlying,
            other => other,
        }
    }

    /// Visit this type and every type nested inside it, outermost first.
    pub fn walk(&self, f: &mut dyn FnMut(&TypeRef)) {
        f(self);
        match self {
            TypeRef::Named { args, .. } => args.iter().for_each(|a| a.walk(f)),
            TypeRef::Array { element, .. } => element.walk(f),
            TypeRef::Pointer { pointee } => pointee.walk(f),
            TypeRef::Nullable { underlying } => underlying.walk(f),
            TypeRef::Tuple { elements } => elements.iter().for_each(|e| e.ty.walk(f)),
            TypeRef::Special { .. } | TypeRef::TypeParameter { .. } | TypeRef::Error { .. } => {}
        }
    }

    /// Whether any type parameter with the given name occurs in this type.
    pub fn mentions_type_parameter(&self, name: &str) -> bool {
        let mut found = false;
        self.walk(&mut |t| {
            if let TypeRef::TypeParameter { param } = t {
                found |= param.name == name;
            }
        });
        found
    }
}

/// Declared accessibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Accessibility {
    Private,
    PrivateProtected,
    Protected,
    Internal,
    ProtectedInternal,
    #[default]
    Public,
}

impl Accessibility {
    pub const fn keyword(self) -> &'static str {
        match self {
            Accessibility::Private => "private",
            Accessibility::PrivateProtected => "private protected",
            Accessibility::Protected => "protected",
            Accessibility::Internal => "internal",
            Accessibility::ProtectedInternal => "protected internal",
            Accessibility::Public => "public",
        }
    }
}

/// Parameter and return passing mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RefKind {
    #[default]
    None,
    Ref,
    Out,
    In,
    RefReadOnly,
}

impl RefKind {
    /// Modifier written before a parameter declaration, with trailing space.
    pub const fn parameter_prefix(self) -> &'static str {
        match self {
            RefKind::None => "",
            RefKind::Ref => "ref ",
            RefKind::Out => "out ",
            RefKind::In => "in ",
            RefKind::RefReadOnly => "ref readonly ",
        }
    }

    /// Modifier written before an argument at a call site. `in` and
    /// `ref readonly` arguments are passed with `in`.
    pub const fn argument_prefix(self) -> &'static str {
        match self {
            RefKind::None => "",
            RefKind::Ref => "ref ",
            RefKind::Out => "out ",
            RefKind::In | RefKind::RefReadOnly => "in ",
        }
    }

    /// Modifier written before a return type.
    pub const fn return_prefix(self) -> &'static str {
        match self {
            RefKind::Ref => "ref ",
            RefKind::RefReadOnly | RefKind::In => "ref readonly ",
            RefKind::None | RefKind::Out => "",
        }
    }
}

bitflags! {
    /// Modifiers on a member symbol.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct MemberModifiers: u32 {
        const STATIC   = 1 << 0;
        const ABSTRACT = 1 << 1;
        const VIRTUAL  = 1 << 2;
        const SEALED   = 1 << 3;
        const OVERRIDE = 1 << 4;
        const READONLY = 1 << 5;
        const CONST    = 1 << 6;
        const NEW      = 1 << 7;
        const EXTERN   = 1 << 8;
        const UNSAFE   = 1 << 9;
    }
}

bitflags! {
    /// Modifiers on a type symbol.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct TypeModifiers: u32 {
        const ABSTRACT = 1 << 0;
        const SEALED   = 1 << 1;
        const STATIC   = 1 << 2;
        const PARTIAL  = 1 << 3;
        const READONLY = 1 << 4;
        const REF      = 1 << 5;
    }
}

/// A compile-time constant, as stored for parameter defaults and enum
/// members.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ConstantValue {
    Null,
    Bool(bool),
    Char(char),
    String(String),
    /// Any signed integral (including enum members of signed underlying type).
    Int(i64),
    /// Any unsigned integral.
    UInt(u64),
    Single(f32),
    Double(f64),
    /// Decimal kept as its invariant-culture text (`"1.50"`).
    Decimal(String),
}

impl ConstantValue {
    /// Integral value widened to `i128`, if this is an integral constant.
    pub fn as_integral(&self) -> Option<i128> {
        match self {
            ConstantValue::Int(v) => Some(i128::from(*v)),
            ConstantValue::UInt(v) => Some(i128::from(*v)),
            ConstantValue::Char(c) => Some(i128::from(u32::from(*c))),
            _ => None,
        }
    }
}

/// An applied attribute. Arguments are kept as host-rendered C# expressions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeData {
    pub attribute_class: TypeSymbolId,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub named_arguments: Vec<(String, String)>,
}

impl AttributeData {
    pub const fn new(attribute_class: TypeSymbolId) -> Self {
        Self {
            attribute_class,
            arguments: Vec::new(),
            named_arguments: Vec::new(),
        }
    }

    pub fn with_argument(mut self, argument: impl Into<String>) -> Self {
        self.arguments.push(argument.into());
        self
    }
}
