//! Applying edits to a document while keeping its outline valid.
//!
//! Fix-all applies several fixes to the same document one after another.
//! After each fix the outline's offsets are shifted past the edits, and the
//! declarations the edits introduced are added, so the next fix can be
//! placed against the new text.

use crate::document::{
    MemberDeclaration, MemberDeclarationKind, SourceDocument, TypeDeclaration, UsingDirective,
};
use serde::{Deserialize, Serialize};
use sharpfix_common::{Span, TextEdit, apply_text_edits};
use sharpfix_symbols::TypeSymbolId;
use tracing::trace;

/// Something an edit's new text declares, at an offset relative to the
/// start of that text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum InsertedDeclaration {
    Member {
        symbol: TypeSymbolId,
        member: MemberDeclarationKind,
        name: String,
        span: Span,
    },
    OpenBrace {
        symbol: TypeSymbolId,
        offset: u32,
    },
    CloseBrace {
        symbol: TypeSymbolId,
        offset: u32,
    },
    Using {
        namespace: String,
        span: Span,
    },
}

/// A text edit plus the outline facts it introduces.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineEdit {
    pub edit: TextEdit,
    #[serde(default)]
    pub declarations: Vec<InsertedDeclaration>,
}

impl OutlineEdit {
    pub fn plain(edit: TextEdit) -> Self {
        Self {
            edit,
            declarations: Vec::new(),
        }
    }
}

/// Which side of an insertion at exactly the anchor's offset the anchor
/// ends up on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bias {
    /// Stay before text inserted at the anchor.
    Before,
    /// Move past text inserted at the anchor.
    After,
}

/// Offset map for a set of non-overlapping edits.
pub struct OffsetMap<'e> {
    /// Edits sorted by position, insertion order kept for ties.
    edits: Vec<&'e TextEdit>,
}

impl<'e> OffsetMap<'e> {
    pub fn new(edits: &'e [TextEdit]) -> Self {
        let mut ordered: Vec<(usize, &TextEdit)> = edits.iter().enumerate().collect();
        ordered.sort_by_key(|(i, e)| (e.span.start, e.span.end, *i));
        Self {
            edits: ordered.into_iter().map(|(_, e)| e).collect(),
        }
    }

    /// New offset of `pos`.
    pub fn map(&self, pos: u32, bias: Bias) -> u32 {
        let mut delta: i64 = 0;
        for edit in &self.edits {
            let span = edit.span;
            if span.start > pos {
                break;
            }
            if span.is_empty() && span.start == pos {
                if bias == Bias::After {
                    delta += edit.delta();
                }
                continue;
            }
            if span.end <= pos {
                delta += edit.delta();
            } else {
                // inside a replaced range: snap to the replacement's edge
                let new_start = i64::from(span.start) + delta;
                return match bias {
                    Bias::Before => new_start as u32,
                    Bias::After => (new_start + edit.new_text.len() as i64) as u32,
                };
            }
        }
        (i64::from(pos) + delta).max(0) as u32
    }

    fn map_span(&self, span: Span) -> Span {
        let start = self.map(span.start, Bias::After);
        let end = self.map(span.end, Bias::Before).max(start);
        Span::new(start, end)
    }

    /// Start of each edit's new text in the edited document, in the order
    /// the edits were given.
    fn new_text_starts(&self, edits: &[TextEdit]) -> Vec<u32> {
        edits
            .iter()
            .map(|target| {
                let mut delta: i64 = 0;
                for edit in &self.edits {
                    if std::ptr::eq(*edit, target) {
                        break;
                    }
                    delta += edit.delta();
                }
                (i64::from(target.span.start) + delta).max(0) as u32
            })
            .collect()
    }
}

impl SourceDocument {
    /// Apply `edits` and return the document with text and outline updated.
    pub fn apply_outline_edits(&self, edits: &[OutlineEdit]) -> SourceDocument {
        let text_edits: Vec<TextEdit> = edits.iter().map(|e| e.edit.clone()).collect();
        let map = OffsetMap::new(&text_edits);

        let mut doc = self.clone();
        doc.text = apply_text_edits(&self.text, &text_edits);

        for using in &mut doc.usings {
            using.span = map.map_span(using.span);
        }
        for region in &mut doc.hidden_regions {
            *region = map.map_span(*region);
        }
        for decl in &mut doc.types {
            decl.span = map.map_span(decl.span);
            decl.header_end = map.map(decl.header_end, Bias::Before);
            decl.open_brace = decl.open_brace.map(|p| map.map(p, Bias::Before));
            decl.close_brace = decl.close_brace.map(|p| map.map(p, Bias::After));
            for base in &mut decl.base_list {
                base.span = map.map_span(base.span);
            }
            for member in &mut decl.members {
                member.span = map.map_span(member.span);
            }
        }

        let starts = map.new_text_starts(&text_edits);
        for (edit, start) in edits.iter().zip(starts) {
            for inserted in &edit.declarations {
                record_declaration(&mut doc, inserted, start);
            }
        }
        for decl in &mut doc.types {
            decl.members.sort_by_key(|m| m.span.start);
            if let Some(close) = decl.close_brace {
                decl.span.end = decl.span.end.max(close + 1);
            }
        }
        doc.usings.sort_by_key(|u| u.span.start);
        doc
    }
}

fn record_declaration(doc: &mut SourceDocument, inserted: &InsertedDeclaration, start: u32) {
    match inserted {
        InsertedDeclaration::Member {
            symbol,
            member,
            name,
            span,
        } => {
            let span = Span::new(start + span.start, start + span.end);
            if let Some(decl) = target_part(doc, *symbol, span.start) {
                decl.members.push(MemberDeclaration {
                    kind: *member,
                    name: name.clone(),
                    span,
                });
            } else {
                trace!(name = %name, "inserted member outside any declaration");
            }
        }
        InsertedDeclaration::OpenBrace { symbol, offset } => {
            if let Some(decl) = target_part(doc, *symbol, start + offset) {
                decl.open_brace = Some(start + offset);
            }
        }
        InsertedDeclaration::CloseBrace { symbol, offset } => {
            if let Some(decl) = target_part(doc, *symbol, start + offset) {
                decl.close_brace = Some(start + offset);
            }
        }
        InsertedDeclaration::Using { namespace, span } => doc.usings.push(UsingDirective {
            namespace: namespace.clone(),
            span: Span::new(start + span.start, start + span.end),
            is_static_or_alias: false,
        }),
    }
}

/// The declaration part of `symbol` that `pos` belongs to: the last part
/// starting at or before `pos`.
fn target_part(
    doc: &mut SourceDocument,
    symbol: TypeSymbolId,
    pos: u32,
) -> Option<&mut TypeDeclaration> {
    doc.types
        .iter_mut()
        .filter(|t| t.symbol == symbol && t.span.start <= pos)
        .max_by_key(|t| t.span.start)
}
