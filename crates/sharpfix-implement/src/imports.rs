//! `using` directives for namespaces the generated text relies on.

use indexmap::{IndexMap, IndexSet};
use sharpfix_common::{Span, TextEdit};
use sharpfix_syntax::{InsertedDeclaration, OutlineEdit, SourceDocument, UsingDirective};
use std::cmp::Ordering;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Position {
    /// Before the using directive at this index.
    Before(usize),
    /// After the last using directive.
    AfterLast,
    /// At the top of a file without usings.
    Top,
}

/// Edits adding a `using` for each namespace in `required` the document
/// does not import yet.
///
/// New directives are placed in sort order among the existing ones. The
/// order is `System` first when the file already follows that convention,
/// otherwise case-insensitive alphabetical.
pub fn import_edits(document: &SourceDocument, required: &IndexSet<String>) -> Vec<OutlineEdit> {
    let mut missing: Vec<&str> = required
        .iter()
        .map(String::as_str)
        .filter(|ns| !ns.is_empty() && !document.imports(ns))
        .collect();
    if missing.is_empty() {
        return Vec::new();
    }

    let plain: Vec<&UsingDirective> = document
        .usings
        .iter()
        .filter(|u| !u.is_static_or_alias)
        .collect();
    let system_first = plain
        .windows(2)
        .all(|w| system_first_order(&w[0].namespace, &w[1].namespace) != Ordering::Greater);
    let compare: fn(&str, &str) -> Ordering = if system_first {
        system_first_order
    } else {
        alphabetical_order
    };
    missing.sort_by(|a, b| compare(a, b));
    missing.dedup();

    let mut positions: IndexMap<Position, Vec<&str>> = IndexMap::new();
    for namespace in &missing {
        let position = if document.usings.is_empty() {
            Position::Top
        } else {
            plain
                .iter()
                .position(|u| compare(namespace, &u.namespace) == Ordering::Less)
                .map_or(Position::AfterLast, Position::Before)
        };
        positions.entry(position).or_default().push(*namespace);
    }
    debug!(
        document = %document.name,
        imports = ?missing,
        system_first,
        "adding using directives"
    );

    positions
        .into_iter()
        .map(|(position, namespaces)| match position {
            Position::Top => {
                let mut text = String::new();
                let mut declarations = Vec::new();
                for namespace in namespaces {
                    push_using(&mut text, &mut declarations, namespace);
                    text.push('\n');
                }
                text.push('\n');
                outline_edit(TextEdit::insert(0, text), declarations)
            }
            Position::Before(index) => {
                let anchor = plain[index].span.start;
                let indent = document.indentation_at(anchor).to_string();
                let mut text = String::new();
                let mut declarations = Vec::new();
                for namespace in namespaces {
                    push_using(&mut text, &mut declarations, namespace);
                    text.push('\n');
                    text.push_str(&indent);
                }
                outline_edit(TextEdit::insert(anchor, text), declarations)
            }
            Position::AfterLast => {
                let last = plain.last().copied().or_else(|| document.usings.last());
                let end = last.map_or(0, |u| u.span.end);
                let indent = last
                    .map(|u| document.indentation_at(u.span.start).to_string())
                    .unwrap_or_default();
                let mut text = String::new();
                let mut declarations = Vec::new();
                for namespace in namespaces {
                    text.push('\n');
                    text.push_str(&indent);
                    push_using(&mut text, &mut declarations, namespace);
                }
                outline_edit(TextEdit::insert(end, text), declarations)
            }
        })
        .collect()
}

fn push_using(text: &mut String, declarations: &mut Vec<InsertedDeclaration>, namespace: &str) {
    let start = text.len() as u32;
    text.push_str("using ");
    text.push_str(namespace);
    text.push(';');
    declarations.push(InsertedDeclaration::Using {
        namespace: namespace.to_string(),
        span: Span::new(start, text.len() as u32),
    });
}

fn outline_edit(edit: TextEdit, declarations: Vec<InsertedDeclaration>) -> OutlineEdit {
    OutlineEdit { edit, declarations }
}

fn is_system(namespace: &str) -> bool {
    namespace == "System" || namespace.starts_with("System.")
}

/// `System` and `System.*` before everything else, then alphabetical.
pub fn system_first_order(a: &str, b: &str) -> Ordering {
    is_system(b)
        .cmp(&is_system(a))
        .then_with(|| alphabetical_order(a, b))
}

/// Case-insensitive, ties broken by ordinal comparison.
pub fn alphabetical_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
