//! Fixture files: a serialized symbol arena, anchor outlines of the
//! documents, the diagnostics to fix and default options.
//!
//! ```json
//! {
//!   "symbols": { "types": [...], "members": [...] },
//!   "documents": [{ "name": "Program.cs", "text": "...", "types": [...] }],
//!   "diagnostics": [{ "document": "Program.cs", "entry": "IInterface" }],
//!   "options": { "insertionBehavior": "atTheEnd" }
//! }
//! ```
//!
//! A diagnostic names its base-list entry by text (`entry`, the n-th
//! diagnostic with the same text takes the n-th such entry) or by `span`.
//! A diagnostic with neither stands for every entry of its document, and a
//! fixture without diagnostics for every entry of every document.

use anyhow::{Context, Result, bail};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use sharpfix_common::Span;
use sharpfix_implement::{Diagnostic, ImplementOptions};
use sharpfix_symbols::SymbolArena;
use sharpfix_syntax::{OutlineBuilder, SourceDocument};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureFile {
    #[serde(default)]
    pub symbols: SymbolArena,
    pub documents: Vec<OutlineBuilder>,
    #[serde(default)]
    pub diagnostics: Vec<DiagnosticSpec>,
    #[serde(default)]
    pub options: ImplementOptions,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticSpec {
    pub document: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

/// A fixture with outlines built and diagnostics bound to spans.
#[derive(Debug)]
pub struct Fixture {
    pub symbols: SymbolArena,
    pub documents: Vec<SourceDocument>,
    pub diagnostics: Vec<Diagnostic>,
    pub options: ImplementOptions,
}

impl Fixture {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read fixture {}", path.display()))?;
        let file: FixtureFile = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse fixture {}", path.display()))?;
        file.resolve()
            .with_context(|| format!("invalid fixture {}", path.display()))
    }

    pub fn diagnostic(&self, index: usize) -> Result<&Diagnostic> {
        match self.diagnostics.get(index) {
            Some(diagnostic) => Ok(diagnostic),
            None => bail!(
                "diagnostic {index} requested, fixture has {}",
                self.diagnostics.len()
            ),
        }
    }
}

impl FixtureFile {
    pub fn resolve(self) -> Result<Fixture> {
        let mut documents = Vec::with_capacity(self.documents.len());
        for outline in &self.documents {
            let document = outline
                .build()
                .with_context(|| format!("failed to build outline of {}", outline.name))?;
            documents.push(document);
        }

        let specs = if self.diagnostics.is_empty() {
            documents
                .iter()
                .map(|d| DiagnosticSpec {
                    document: d.name.clone(),
                    entry: None,
                    span: None,
                })
                .collect()
        } else {
            self.diagnostics
        };

        let mut seen: FxHashMap<(String, String), usize> = FxHashMap::default();
        let mut diagnostics = Vec::new();
        for spec in specs {
            let Some(document) = documents.iter().find(|d| d.name == spec.document) else {
                bail!("diagnostic refers to unknown document {}", spec.document);
            };
            let entries = document.types.iter().flat_map(|t| t.base_list.iter());
            match (&spec.span, &spec.entry) {
                (Some(span), _) => diagnostics.push(Diagnostic::new(&spec.document, *span)),
                (None, Some(entry)) => {
                    let occurrence = seen
                        .entry((spec.document.clone(), entry.clone()))
                        .or_insert(0);
                    let Some(found) = entries
                        .filter(|e| e.span.text(&document.text) == entry)
                        .nth(*occurrence)
                    else {
                        bail!(
                            "{} has no base-list entry '{entry}' (occurrence {})",
                            spec.document,
                            *occurrence + 1
                        );
                    };
                    *occurrence += 1;
                    diagnostics.push(Diagnostic::new(&spec.document, found.span));
                }
                (None, None) => {
                    diagnostics.extend(entries.map(|e| Diagnostic::new(&spec.document, e.span)));
                }
            }
        }

        debug!(
            types = self.symbols.types.len(),
            documents = documents.len(),
            diagnostics = diagnostics.len(),
            "loaded fixture"
        );
        Ok(Fixture {
            symbols: self.symbols,
            documents,
            diagnostics,
            options: self.options,
        })
    }
}
