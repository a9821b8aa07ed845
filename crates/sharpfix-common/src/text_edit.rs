//! Text edits produced by code actions.

use crate::span::Span;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single text edit: replace `span` with `new_text`.
///
/// An empty span is a pure insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextEdit {
    /// The range to replace.
    pub span: Span,
    /// The new text.
    pub new_text: String,
}

impl TextEdit {
    pub const fn new(span: Span, new_text: String) -> Self {
        Self { span, new_text }
    }

    /// Insert `new_text` at `pos`.
    pub const fn insert(pos: u32, new_text: String) -> Self {
        Self {
            span: Span::at(pos),
            new_text,
        }
    }

    /// Signed change in document length after applying this edit.
    pub fn delta(&self) -> i64 {
        self.new_text.len() as i64 - i64::from(self.span.len())
    }
}

/// All edits for one document. Edits never overlap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentEdit {
    pub document: String,
    pub edits: Vec<TextEdit>,
}

impl DocumentEdit {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            edits: Vec::new(),
        }
    }

    pub fn push(&mut self, edit: TextEdit) {
        self.edits.push(edit);
    }

    /// Sort edits by position. Insertions at the same offset keep their
    /// relative order.
    pub fn normalize(&mut self) {
        self.edits.sort_by_key(|e| (e.span.start, e.span.end));
    }

    pub fn apply(&self, text: &str) -> String {
        apply_text_edits(text, &self.edits)
    }
}

/// A workspace edit (changes across multiple documents), keyed by document
/// name in first-touched order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceEdit {
    pub changes: IndexMap<String, Vec<TextEdit>>,
}

impl WorkspaceEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_edit(&mut self, document: String, edit: TextEdit) {
        self.changes.entry(document).or_default().push(edit);
    }

    pub fn add_document_edit(&mut self, edit: DocumentEdit) {
        self.changes
            .entry(edit.document)
            .or_default()
            .extend(edit.edits);
    }

    pub fn is_empty(&self) -> bool {
        self.changes.values().all(|edits| edits.is_empty())
    }

    pub fn into_document_edits(self) -> Vec<DocumentEdit> {
        self.changes
            .into_iter()
            .map(|(document, edits)| {
                let mut edit = DocumentEdit { document, edits };
                edit.normalize();
                edit
            })
            .collect()
    }
}

/// Apply non-overlapping edits to `text`.
///
/// Edits are applied back to front so earlier offsets stay valid. Two
/// insertions at the same offset appear in the order given.
pub fn apply_text_edits(text: &str, edits: &[TextEdit]) -> String {
    let mut ordered: Vec<(usize, &TextEdit)> = edits.iter().enumerate().collect();
    ordered.sort_by(|(ia, a), (ib, b)| {
        (b.span.start, b.span.end, ib).cmp(&(a.span.start, a.span.end, ia))
    });

    let mut result = text.to_string();
    for (_, edit) in ordered {
        let start = (edit.span.start as usize).min(result.len());
        let end = (edit.span.end as usize).clamp(start, result.len());
        result.replace_range(start..end, &edit.new_text);
    }
    result
}
