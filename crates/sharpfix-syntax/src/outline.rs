//! Building outlines from literal anchors.
//!
//! A host that owns a parser fills `SourceDocument` directly. Everyone else
//! (tests, the CLI's JSON fixtures) describes a document by anchors: the
//! literal text a type or member declaration starts with. The builder finds
//! each anchor in order and derives the rest by brace matching. Braces
//! inside strings or comments are not special; fixtures that need them must
//! give the outline explicitly.

use crate::document::{
    BaseListEntry, MemberDeclaration, MemberDeclarationKind, SourceDocument, TypeDeclaration,
    UsingDirective,
};
use serde::{Deserialize, Serialize};
use sharpfix_common::Span;
use sharpfix_symbols::TypeSymbolId;
use std::fmt;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutlineError {
    AnchorNotFound { anchor: String },
    UnbalancedBraces { offset: u32 },
}

impl fmt::Display for OutlineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutlineError::AnchorNotFound { anchor } => write!(f, "anchor not found: {anchor:?}"),
            OutlineError::UnbalancedBraces { offset } => {
                write!(f, "no matching '}}' for '{{' at offset {offset}")
            }
        }
    }
}

impl std::error::Error for OutlineError {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberAnchor {
    pub kind: MemberDeclarationKind,
    pub anchor: String,
    /// Member name; defaults to empty, which only affects log output.
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeAnchor {
    pub symbol: TypeSymbolId,
    /// Text the declaration starts with, such as `class Program`.
    pub anchor: String,
    /// Enclosing namespace; found from the nearest preceding `namespace`
    /// line when absent.
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub bases: Vec<String>,
    #[serde(default)]
    pub members: Vec<MemberAnchor>,
    /// The declaration has no body (`class C : I` with no braces).
    #[serde(default)]
    pub no_body: bool,
}

impl TypeAnchor {
    pub fn new(symbol: TypeSymbolId, anchor: &str) -> Self {
        Self {
            symbol,
            anchor: anchor.to_string(),
            namespace: None,
            bases: Vec::new(),
            members: Vec::new(),
            no_body: false,
        }
    }

    pub fn base(mut self, base: &str) -> Self {
        self.bases.push(base.to_string());
        self
    }

    pub fn member(mut self, kind: MemberDeclarationKind, anchor: &str) -> Self {
        self.members.push(MemberAnchor {
            kind,
            anchor: anchor.to_string(),
            name: String::new(),
        });
        self
    }

    pub fn namespace(mut self, namespace: &str) -> Self {
        self.namespace = Some(namespace.to_string());
        self
    }

    pub fn without_body(mut self) -> Self {
        self.no_body = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiddenAnchor {
    pub start: String,
    pub end: String,
}

/// Anchor description of a whole document. Deserializable from fixtures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineBuilder {
    pub name: String,
    pub text: String,
    #[serde(default)]
    pub nullable_enabled: bool,
    #[serde(default)]
    pub types: Vec<TypeAnchor>,
    #[serde(default)]
    pub hidden: Vec<HiddenAnchor>,
}

impl OutlineBuilder {
    pub fn new(name: &str, text: &str) -> Self {
        Self {
            name: name.to_string(),
            text: text.to_string(),
            nullable_enabled: false,
            types: Vec::new(),
            hidden: Vec::new(),
        }
    }

    pub fn nullable(mut self, enabled: bool) -> Self {
        self.nullable_enabled = enabled;
        self
    }

    /// Add a type declaration. Declarations must be added in text order.
    pub fn type_decl(mut self, anchor: TypeAnchor) -> Self {
        self.types.push(anchor);
        self
    }

    pub fn hidden(mut self, start: &str, end: &str) -> Self {
        self.hidden.push(HiddenAnchor {
            start: start.to_string(),
            end: end.to_string(),
        });
        self
    }

    pub fn build(&self) -> Result<SourceDocument, OutlineError> {
        let text = self.text.as_str();
        let mut doc = SourceDocument::new(&self.name, text);
        doc.nullable_enabled = self.nullable_enabled;

        let mut cursor = 0usize;
        for anchor in &self.types {
            let decl = build_type(text, anchor, cursor)?;
            cursor = decl.span.start as usize + 1;
            doc.types.push(decl);
        }

        let usings_end = doc
            .types
            .first()
            .map_or(text.len(), |t| t.span.start as usize);
        doc.usings = scan_usings(text, usings_end);

        for hidden in &self.hidden {
            let start = find(text, &hidden.start, 0)?;
            let end = find(text, &hidden.end, start)? + hidden.end.len();
            doc.hidden_regions.push(Span::new(start as u32, end as u32));
        }

        debug!(
            document = %doc.name,
            types = doc.types.len(),
            usings = doc.usings.len(),
            "built outline"
        );
        Ok(doc)
    }
}

fn find(text: &str, anchor: &str, from: usize) -> Result<usize, OutlineError> {
    text.get(from..)
        .and_then(|rest| rest.find(anchor))
        .map(|i| from + i)
        .ok_or_else(|| OutlineError::AnchorNotFound {
            anchor: anchor.to_string(),
        })
}

fn build_type(text: &str, anchor: &TypeAnchor, from: usize) -> Result<TypeDeclaration, OutlineError> {
    let anchor_start = find(text, &anchor.anchor, from)?;
    let start = first_non_blank_of_line(text, anchor_start);
    let after_anchor = anchor_start + anchor.anchor.len();

    let (open_brace, close_brace) = if anchor.no_body {
        (None, None)
    } else {
        match find_body_open(text, after_anchor) {
            Some(open) => (Some(open), Some(matching_brace(text, open)?)),
            None => (None, None),
        }
    };

    let mut base_list = Vec::new();
    let mut base_cursor = after_anchor;
    for base in &anchor.bases {
        let pos = find(text, base, base_cursor)?;
        base_list.push(BaseListEntry {
            span: Span::new(pos as u32, (pos + base.len()) as u32),
            ty: None,
        });
        base_cursor = pos + base.len();
    }

    let header_end = match open_brace {
        Some(open) => trim_end_before(text, open),
        None => base_cursor.max(after_anchor),
    };
    let end = close_brace.map_or(header_end, |c| c + 1);

    let mut members = Vec::new();
    if let (Some(open), Some(close)) = (open_brace, close_brace) {
        let mut member_cursor = open + 1;
        for member in &anchor.members {
            let pos = find(text, &member.anchor, member_cursor)?;
            if pos >= close {
                return Err(OutlineError::AnchorNotFound {
                    anchor: member.anchor.clone(),
                });
            }
            let member_end = member_end(text, pos)?;
            members.push(MemberDeclaration {
                kind: member.kind,
                name: member.name.clone(),
                span: Span::new(pos as u32, member_end as u32),
            });
            member_cursor = member_end;
        }
    }

    let namespace = anchor
        .namespace
        .clone()
        .unwrap_or_else(|| enclosing_namespace(text, start));

    Ok(TypeDeclaration {
        symbol: anchor.symbol,
        span: Span::new(start as u32, end as u32),
        namespace,
        header_end: header_end as u32,
        base_list,
        open_brace: open_brace.map(|p| p as u32),
        close_brace: close_brace.map(|p| p as u32),
        members,
        indentation: leading_whitespace(text, start).to_string(),
    })
}

/// First `{` after the header, unless a `;` or `}` ends the declaration
/// first.
fn find_body_open(text: &str, from: usize) -> Option<usize> {
    let rest = text.get(from..)?;
    let i = rest.find(['{', ';', '}'])?;
    (rest.as_bytes()[i] == b'{').then_some(from + i)
}

fn matching_brace(text: &str, open: usize) -> Result<usize, OutlineError> {
    let mut depth = 0usize;
    for (i, b) in text.bytes().enumerate().skip(open) {
        match b {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
    }
    Err(OutlineError::UnbalancedBraces { offset: open as u32 })
}

/// End of a member starting at `start`: past its `;`, or past its body and
/// any initializer or trailing `;`.
fn member_end(text: &str, start: usize) -> Result<usize, OutlineError> {
    let rest = text.get(start..).unwrap_or("");
    let Some(i) = rest.find(['{', ';']) else {
        return Ok(text.len());
    };
    if rest.as_bytes()[i] == b';' {
        return Ok(start + i + 1);
    }
    let close = matching_brace(text, start + i)?;
    let after = close + 1;
    let tail = text.get(after..).unwrap_or("");
    let trimmed = tail.trim_start_matches([' ', '\t']);
    let skipped = tail.len() - trimmed.len();
    if trimmed.starts_with(';') {
        Ok(after + skipped + 1)
    } else if trimmed.starts_with('=') && !trimmed.starts_with("=>") {
        Ok(trimmed.find(';').map_or(text.len(), |j| after + skipped + j + 1))
    } else {
        Ok(after)
    }
}

fn trim_end_before(text: &str, pos: usize) -> usize {
    let before = text.get(..pos).unwrap_or("");
    before.trim_end().len()
}

fn first_non_blank_of_line(text: &str, pos: usize) -> usize {
    let line_start = text.get(..pos).and_then(|b| b.rfind('\n')).map_or(0, |i| i + 1);
    line_start + leading_whitespace(text, line_start).len()
}

fn leading_whitespace(text: &str, pos: usize) -> &str {
    let line_start = text.get(..pos).and_then(|b| b.rfind('\n')).map_or(0, |i| i + 1);
    let rest = text.get(line_start..).unwrap_or("");
    let len = rest
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(rest.len());
    &rest[..len]
}

fn enclosing_namespace(text: &str, before: usize) -> String {
    let head = text.get(..before).unwrap_or("");
    head.lines()
        .rev()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("namespace "))
        .map(|rest| {
            rest.trim_end_matches(|c: char| c == ';' || c == '{' || c.is_whitespace())
                .to_string()
        })
        .unwrap_or_default()
}

/// `using` directives before `end`, one per line.
fn scan_usings(text: &str, end: usize) -> Vec<UsingDirective> {
    let mut usings = Vec::new();
    let mut offset = 0usize;
    for line in text.split_inclusive('\n') {
        if offset >= end {
            break;
        }
        let trimmed = line.trim();
        let body = trimmed
            .strip_prefix("global ")
            .unwrap_or(trimmed)
            .strip_prefix("using ")
            .and_then(|rest| rest.strip_suffix(';'));
        if let Some(body) = body
            && !body.contains('(')
        {
            let lead = line.len() - line.trim_start().len();
            let start = offset + lead;
            let (namespace, is_static_or_alias) = match body.strip_prefix("static ") {
                Some(rest) => (rest.trim().to_string(), true),
                None => match body.split_once('=') {
                    Some((_, target)) => (target.trim().to_string(), true),
                    None => (body.trim().to_string(), false),
                },
            };
            usings.push(UsingDirective {
                namespace,
                span: Span::new(start as u32, (start + trimmed.len()) as u32),
                is_static_or_alias,
            });
        }
        offset += line.len();
    }
    usings
}
