//! Document outlines.
//!
//! An outline records where things are in a document's text: using
//! directives, type declarations, their base lists, braces and members.
//! The engine reads positions from it and never looks at tokens.

use serde::{Deserialize, Serialize};
use sharpfix_common::Span;
use sharpfix_symbols::{TypeRef, TypeSymbolId};

/// Member categories in the order generated members are grouped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MemberDeclarationKind {
    Field,
    Constructor,
    Event,
    Property,
    Indexer,
    Operator,
    Method,
    NestedType,
}

impl MemberDeclarationKind {
    pub const ALL: [MemberDeclarationKind; 8] = [
        MemberDeclarationKind::Field,
        MemberDeclarationKind::Constructor,
        MemberDeclarationKind::Event,
        MemberDeclarationKind::Property,
        MemberDeclarationKind::Indexer,
        MemberDeclarationKind::Operator,
        MemberDeclarationKind::Method,
        MemberDeclarationKind::NestedType,
    ];
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDeclaration {
    pub kind: MemberDeclarationKind,
    #[serde(default)]
    pub name: String,
    pub span: Span,
}

/// One entry of a type's base list, such as `IComparable<T>`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseListEntry {
    pub span: Span,
    /// The bound type, when the host knows it. Otherwise the entry's text is
    /// matched against the declared interfaces.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ty: Option<TypeRef>,
}

/// One (possibly partial) declaration of a type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDeclaration {
    pub symbol: TypeSymbolId,
    pub span: Span,
    /// Namespace the declaration sits in.
    #[serde(default)]
    pub namespace: String,
    /// Offset just past the header (name, base list, constraints), where
    /// braces go when the body is missing.
    pub header_end: u32,
    #[serde(default)]
    pub base_list: Vec<BaseListEntry>,
    #[serde(default)]
    pub open_brace: Option<u32>,
    #[serde(default)]
    pub close_brace: Option<u32>,
    #[serde(default)]
    pub members: Vec<MemberDeclaration>,
    /// Leading whitespace of the line the declaration starts on.
    #[serde(default)]
    pub indentation: String,
}

impl TypeDeclaration {
    pub fn has_body(&self) -> bool {
        self.open_brace.is_some() && self.close_brace.is_some()
    }

    /// Whether a base-list entry overlaps `span`.
    pub fn base_list_intersects(&self, span: Span) -> bool {
        self.base_list.iter().any(|b| b.span.intersects(span))
    }

    /// Span between the braces (exclusive), if the body exists.
    pub fn body_span(&self) -> Option<Span> {
        match (self.open_brace, self.close_brace) {
            (Some(open), Some(close)) if close > open => Some(Span::new(open + 1, close)),
            _ => None,
        }
    }

    /// Last member of `kind`, by position.
    pub fn last_member_of_kind(&self, kind: MemberDeclarationKind) -> Option<&MemberDeclaration> {
        self.members
            .iter()
            .filter(|m| m.kind == kind)
            .max_by_key(|m| m.span.end)
    }

    pub fn last_member(&self) -> Option<&MemberDeclaration> {
        self.members.iter().max_by_key(|m| m.span.end)
    }

    pub fn first_member(&self) -> Option<&MemberDeclaration> {
        self.members.iter().min_by_key(|m| m.span.start)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsingDirective {
    pub namespace: String,
    pub span: Span,
    /// `using static` or an alias; these never satisfy a namespace import.
    #[serde(default)]
    pub is_static_or_alias: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDocument {
    pub name: String,
    pub text: String,
    #[serde(default)]
    pub nullable_enabled: bool,
    #[serde(default)]
    pub usings: Vec<UsingDirective>,
    /// `#line hidden` regions; nothing may be inserted inside them.
    #[serde(default)]
    pub hidden_regions: Vec<Span>,
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    /// All declarations (partial parts) of `symbol`, in text order.
    pub fn declarations_of(&self, symbol: TypeSymbolId) -> impl Iterator<Item = &TypeDeclaration> {
        self.types.iter().filter(move |t| t.symbol == symbol)
    }

    /// The type declaration whose base list contains `span`.
    pub fn declaration_with_base_entry(&self, span: Span) -> Option<&TypeDeclaration> {
        self.types
            .iter()
            .filter(|t| t.base_list_intersects(span))
            // innermost: nested types start later
            .max_by_key(|t| t.span.start)
    }

    pub fn imported_namespaces(&self) -> Vec<String> {
        self.usings
            .iter()
            .filter(|u| !u.is_static_or_alias)
            .map(|u| u.namespace.clone())
            .collect()
    }

    pub fn imports(&self, namespace: &str) -> bool {
        self.usings
            .iter()
            .any(|u| !u.is_static_or_alias && u.namespace == namespace)
    }

    /// Whether `pos` lies inside a hidden region. Both ends count as hidden.
    pub fn is_hidden(&self, pos: u32) -> bool {
        self.hidden_regions
            .iter()
            .any(|r| pos >= r.start && pos <= r.end)
    }

    /// Offset of the first byte of the line containing `pos`.
    pub fn line_start(&self, pos: u32) -> u32 {
        let pos = (pos as usize).min(self.text.len());
        self.text
            .get(..pos)
            .and_then(|before| before.rfind('\n'))
            .map_or(0, |i| i as u32 + 1)
    }

    /// Offset just past the end of the line containing `pos` (after the
    /// newline, or the end of text).
    pub fn line_end(&self, pos: u32) -> u32 {
        let pos = (pos as usize).min(self.text.len());
        self.text
            .get(pos..)
            .and_then(|after| after.find('\n'))
            .map_or(self.text.len() as u32, |i| (pos + i + 1) as u32)
    }

    /// Leading whitespace of the line containing `pos`.
    pub fn indentation_at(&self, pos: u32) -> &str {
        let start = self.line_start(pos) as usize;
        let rest = self.text.get(start..).unwrap_or("");
        let len = rest
            .find(|c: char| c != ' ' && c != '\t')
            .unwrap_or(rest.len());
        &rest[..len]
    }

    /// Whether `span` covers only whitespace.
    pub fn is_blank(&self, span: Span) -> bool {
        span.text(&self.text).trim().is_empty()
    }
}
