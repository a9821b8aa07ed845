//! Applying one strategy to every diagnostic at once.
//!
//! Documents are fixed in parallel. Inside a document, diagnostics are
//! fixed one after another: each fix sees the text, outline and symbols
//! left by the fixes before it. A document either gets all of its fixes or
//! none.

use crate::error::ImplementError;
use crate::options::ImplementOptions;
use crate::service::{Diagnostic, Request, find_document};
use crate::strategy::StrategyIdentity;
use indexmap::IndexMap;
use rayon::prelude::*;
use sharpfix_common::{DocumentEdit, Span, TextEdit};
use sharpfix_symbols::{SymbolDatabase, SymbolOverlay};
use sharpfix_syntax::{Bias, OffsetMap, OutlineEdit, SourceDocument};
use tracing::{debug, trace};

/// The combined result for one document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentFix {
    /// One edit taking the original text to `text`.
    pub edit: DocumentEdit,
    pub text: String,
    /// Diagnostics fixed.
    pub applied: usize,
}

#[derive(Debug, Default)]
pub struct FixAllResult {
    pub documents: Vec<DocumentFix>,
    /// Documents left unchanged because a fix failed.
    pub failures: Vec<(String, ImplementError)>,
}

impl FixAllResult {
    pub fn document(&self, name: &str) -> Option<&DocumentFix> {
        self.documents.iter().find(|d| d.edit.document == name)
    }
}

/// Apply the strategy with `identity` to every diagnostic that offers it.
pub fn fix_all(
    db: &dyn SymbolDatabase,
    documents: &[SourceDocument],
    diagnostics: &[Diagnostic],
    identity: &StrategyIdentity,
    options: &ImplementOptions,
) -> FixAllResult {
    let mut by_document: IndexMap<&str, Vec<&Diagnostic>> = IndexMap::new();
    for diagnostic in diagnostics {
        by_document
            .entry(diagnostic.document.as_str())
            .or_default()
            .push(diagnostic);
    }
    debug!(
        documents = by_document.len(),
        diagnostics = diagnostics.len(),
        identity = %identity,
        "fix all"
    );

    let outcomes: Vec<(String, Result<Option<DocumentFix>, ImplementError>)> = by_document
        .into_iter()
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|(name, diagnostics)| {
            let outcome = fix_document(db, documents, name, &diagnostics, identity, options);
            (name.to_string(), outcome)
        })
        .collect();

    let mut result = FixAllResult::default();
    for (name, outcome) in outcomes {
        match outcome {
            Ok(Some(fix)) => result.documents.push(fix),
            Ok(None) => trace!(document = %name, "nothing to fix"),
            Err(error) => {
                debug!(document = %name, %error, "document skipped");
                result.failures.push((name, error));
            }
        }
    }
    result
}

fn fix_document(
    db: &dyn SymbolDatabase,
    documents: &[SourceDocument],
    name: &str,
    diagnostics: &[&Diagnostic],
    identity: &StrategyIdentity,
    options: &ImplementOptions,
) -> Result<Option<DocumentFix>, ImplementError> {
    let original = find_document(documents, name)?;
    let mut overlay = SymbolOverlay::new(db);
    let mut current = original.clone();
    let mut batches: Vec<Vec<TextEdit>> = Vec::new();
    let mut applied = 0;

    for diagnostic in diagnostics {
        let mapped = Diagnostic {
            span: remap(diagnostic.span, &batches),
            ..(*diagnostic).clone()
        };
        let generated = {
            let request = Request::new(&overlay, &current, &mapped, options)?;
            let strategies = request.strategies();
            let Some(strategy) = strategies.iter().find(|s| s.identity == *identity) else {
                trace!(span = ?mapped.span, "strategy not offered here");
                continue;
            };
            request.generate(strategy)?
        };
        for member in generated.members {
            overlay.add_member(member.symbol);
        }
        current = current.apply_outline_edits(&generated.edits);
        batches.push(text_edits(&generated.edits));
        applied += 1;
    }

    if applied == 0 {
        return Ok(None);
    }
    let mut edit = DocumentEdit::new(name);
    if let Some(change) = minimal_edit(&original.text, &current.text) {
        edit.push(change);
    }
    Ok(Some(DocumentFix {
        edit,
        text: current.text,
        applied,
    }))
}

fn text_edits(edits: &[OutlineEdit]) -> Vec<TextEdit> {
    edits.iter().map(|e| e.edit.clone()).collect()
}

/// Map a span of the original text through each batch of edits in turn.
fn remap(span: Span, batches: &[Vec<TextEdit>]) -> Span {
    batches.iter().fold(span, |span, batch| {
        let map = OffsetMap::new(batch);
        let start = map.map(span.start, Bias::After);
        Span::new(start, map.map(span.end, Bias::Before).max(start))
    })
}

/// A single edit covering the difference between `old` and `new`, trimmed
/// to their common prefix and suffix.
pub fn minimal_edit(old: &str, new: &str) -> Option<TextEdit> {
    if old == new {
        return None;
    }
    let mut prefix = old
        .bytes()
        .zip(new.bytes())
        .take_while(|(a, b)| a == b)
        .count();
    while !old.is_char_boundary(prefix) || !new.is_char_boundary(prefix) {
        prefix -= 1;
    }
    let limit = old.len().min(new.len()) - prefix;
    let mut suffix = old
        .bytes()
        .rev()
        .zip(new.bytes().rev())
        .take(limit)
        .take_while(|(a, b)| a == b)
        .count();
    while !old.is_char_boundary(old.len() - suffix) || !new.is_char_boundary(new.len() - suffix) {
        suffix -= 1;
    }
    Some(TextEdit::new(
        Span::new(prefix as u32, (old.len() - suffix) as u32),
        new[prefix..new.len() - suffix].to_string(),
    ))
}
