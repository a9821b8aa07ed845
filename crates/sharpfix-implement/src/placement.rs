//! Splicing generated members into the target declaration.
//!
//! Members are printed one indentation unit deeper than the declaration
//! line and separated by blank lines. Each edit also reports the member
//! declarations it introduces so the outline can be re-anchored after it is
//! applied.

use crate::context::ImplementContext;
use crate::error::ImplementError;
use crate::options::InsertionBehavior;
use crate::printer::print_member;
use crate::synthesis::SynthesizedMember;
use indexmap::IndexMap;
use sharpfix_common::{Span, TextEdit};
use sharpfix_syntax::{
    InsertedDeclaration, MemberDeclarationKind, OutlineEdit, SourceDocument, TypeDeclaration,
};
use tracing::{debug, trace};

/// Where a run of members is inserted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum Anchor {
    /// Right after `{`.
    BodyStart,
    /// Right after an existing member ending at this offset.
    After(u32),
}

/// Edits that insert `members` into `ctx.declaration`.
///
/// `keep_order` places every member after the last existing one in the
/// given order, for `[ComImport]` interfaces whose member order is part of
/// the vtable layout.
pub fn place(
    ctx: &ImplementContext<'_>,
    members: &[SynthesizedMember],
    keep_order: bool,
) -> Result<Vec<OutlineEdit>, ImplementError> {
    if members.is_empty() {
        return Ok(Vec::new());
    }
    let decl = ctx.declaration;
    let document = ctx.document;
    let unit = ctx.options.indentation.unit();
    let indent = format!("{}{unit}", decl.indentation);
    let at_the_end =
        keep_order || ctx.options.insertion_behavior == InsertionBehavior::AtTheEnd;

    let (open, close) = match (decl.open_brace, decl.close_brace) {
        (Some(open), Some(close)) => (open, close),
        _ => {
            if document.is_hidden(decl.header_end) {
                return Err(ImplementError::no_action("declaration header is hidden"));
            }
            debug!(document = %document.name, "adding missing braces");
            let ordered = ordered(members.iter().collect(), at_the_end);
            let edit = braced(decl, &ordered, &indent, &unit, Span::at(decl.header_end));
            return Ok(vec![edit]);
        }
    };

    if is_single_line_body(document, open, close) {
        let replaced = Span::new(decl.header_end, close + 1);
        if document.is_hidden(replaced.start) || document.is_hidden(replaced.end) {
            return Err(ImplementError::no_action("declaration body is hidden"));
        }
        trace!(document = %document.name, "expanding single-line body");
        let ordered = ordered(members.iter().collect(), at_the_end);
        return Ok(vec![braced(decl, &ordered, &indent, &unit, replaced)]);
    }

    let visible = |anchor: Anchor| !document.is_hidden(position(anchor, open));
    let fallbacks = [
        decl.last_member().map(|m| after(document, m.span.end)),
        Some(Anchor::BodyStart),
    ];
    let mut runs: IndexMap<Anchor, Vec<&SynthesizedMember>> = IndexMap::new();
    for member in members {
        let preferred = if at_the_end {
            decl.last_member()
                .map_or(Anchor::BodyStart, |m| after(document, m.span.end))
        } else {
            anchor_for(document, decl, member.group)
        };
        let anchor = std::iter::once(Some(preferred))
            .chain(fallbacks)
            .flatten()
            .find(|&a| visible(a))
            .ok_or_else(|| ImplementError::no_action("declaration body is hidden"))?;
        runs.entry(anchor).or_default().push(member);
    }

    let has_members = !decl.members.is_empty();
    let mut edits = Vec::with_capacity(runs.len());
    for (anchor, run) in runs {
        let run = ordered(run, at_the_end);
        let mut text = InsertionText::new(decl);
        match anchor {
            Anchor::BodyStart => {
                text.push_str("\n");
                text.push_members(&run, &indent, &unit);
                if has_members {
                    text.push_str("\n");
                }
            }
            Anchor::After(_) => {
                text.push_str("\n\n");
                text.push_members(&run, &indent, &unit);
            }
        }
        trace!(at = position(anchor, open), members = run.len(), "insertion");
        edits.push(text.into_edit(Span::at(position(anchor, open))));
    }
    Ok(edits)
}

/// Whether `ctx.declaration` has an insertion point outside hidden regions.
/// Declarations without one are offered no actions.
pub fn has_visible_insertion_point(ctx: &ImplementContext<'_>) -> bool {
    let decl = ctx.declaration;
    let document = ctx.document;
    let (Some(open), Some(close)) = (decl.open_brace, decl.close_brace) else {
        return !document.is_hidden(decl.header_end);
    };
    if is_single_line_body(document, open, close) {
        return !document.is_hidden(decl.header_end) && !document.is_hidden(close + 1);
    }
    [
        decl.last_member().map(|m| after(document, m.span.end)),
        Some(Anchor::BodyStart),
    ]
    .into_iter()
    .flatten()
    .any(|anchor| !document.is_hidden(position(anchor, open)))
}

/// `{ }` on one line with nothing between the braces.
fn is_single_line_body(document: &SourceDocument, open: u32, close: u32) -> bool {
    document.line_start(open) == document.line_start(close)
        && document.is_blank(Span::new(open + 1, close))
}

fn position(anchor: Anchor, open: u32) -> u32 {
    match anchor {
        Anchor::BodyStart => open + 1,
        Anchor::After(end) => end,
    }
}

/// After the last member of `group`, else after the last member of the
/// nearest preceding group, else at the start of the body.
fn anchor_for(
    document: &SourceDocument,
    decl: &TypeDeclaration,
    group: MemberDeclarationKind,
) -> Anchor {
    MemberDeclarationKind::ALL
        .iter()
        .rev()
        .filter(|&&kind| kind <= group)
        .find_map(|&kind| decl.last_member_of_kind(kind))
        .map_or(Anchor::BodyStart, |m| after(document, m.span.end))
}

/// Insertion point after a member ending at `end`, past a `//` comment
/// that trails it on the same line.
fn after(document: &SourceDocument, end: u32) -> Anchor {
    let rest = document.text.get(end as usize..).unwrap_or_default();
    let line = rest.split('\n').next().unwrap_or_default().trim_end_matches('\r');
    if line.trim_start().starts_with("//") {
        Anchor::After(end + line.len() as u32)
    } else {
        Anchor::After(end)
    }
}

/// Members of one run: grouped by kind unless the order must be kept.
fn ordered(mut run: Vec<&SynthesizedMember>, keep_order: bool) -> Vec<&SynthesizedMember> {
    if !keep_order {
        run.sort_by_key(|m| m.group);
    }
    run
}

/// A new body `{ ... }` on its own lines, replacing `span`.
fn braced(
    decl: &TypeDeclaration,
    members: &[&SynthesizedMember],
    indent: &str,
    unit: &str,
    span: Span,
) -> OutlineEdit {
    let mut text = InsertionText::new(decl);
    text.push_str("\n");
    text.push_str(&decl.indentation);
    text.mark_open_brace();
    text.push_str("{\n");
    text.push_members(members, indent, unit);
    text.push_str("\n");
    text.push_str(&decl.indentation);
    text.mark_close_brace();
    text.push_str("}");
    text.into_edit(span)
}

/// New text plus the declarations it introduces, with offsets relative to
/// the start of the text.
struct InsertionText<'d> {
    decl: &'d TypeDeclaration,
    text: String,
    declarations: Vec<InsertedDeclaration>,
}

impl<'d> InsertionText<'d> {
    const fn new(decl: &'d TypeDeclaration) -> Self {
        Self {
            decl,
            text: String::new(),
            declarations: Vec::new(),
        }
    }

    fn offset(&self) -> u32 {
        self.text.len() as u32
    }

    fn push_str(&mut self, s: &str) {
        self.text.push_str(s);
    }

    fn mark_open_brace(&mut self) {
        self.declarations.push(InsertedDeclaration::OpenBrace {
            symbol: self.decl.symbol,
            offset: self.offset(),
        });
    }

    fn mark_close_brace(&mut self) {
        self.declarations.push(InsertedDeclaration::CloseBrace {
            symbol: self.decl.symbol,
            offset: self.offset(),
        });
    }

    fn push_members(&mut self, members: &[&SynthesizedMember], indent: &str, unit: &str) {
        for (i, member) in members.iter().enumerate() {
            if i > 0 {
                self.text.push_str("\n\n");
            }
            let start = self.offset() + indent.len() as u32;
            self.text.push_str(&print_member(&member.node, indent, unit));
            self.declarations.push(InsertedDeclaration::Member {
                symbol: self.decl.symbol,
                member: member.group,
                name: member.name.clone(),
                span: Span::new(start, self.offset()),
            });
        }
    }

    fn into_edit(self, span: Span) -> OutlineEdit {
        OutlineEdit {
            edit: TextEdit::new(span, self.text),
            declarations: self.declarations,
        }
    }
}
