//! The implement-interface code fix entry point.

use crate::context::{ImplementContext, resolve_base_entry};
use crate::error::ImplementError;
use crate::imports::import_edits;
use crate::options::ImplementOptions;
use crate::placement::{has_visible_insertion_point, place};
use crate::query::{InterfaceMember, InterfaceMemberGroup, distinct_members, unimplemented_member_groups};
use crate::strategy::{self, Strategy, StrategyIdentity};
use crate::synthesis::{SynthesizedMember, synthesize};
use serde::{Deserialize, Serialize};
use sharpfix_common::{DocumentEdit, Span};
use sharpfix_symbols::well_known::has_com_import_attribute;
use sharpfix_symbols::{SymbolDatabase, TypeRef};
use sharpfix_syntax::{OutlineEdit, SourceDocument};
use tracing::debug;

/// A "type does not implement interface member" diagnostic, reported on a
/// base-list entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    pub document: String,
    pub span: Span,
    /// The interface, when the host has bound the entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interface: Option<TypeRef>,
}

impl Diagnostic {
    pub fn new(document: impl Into<String>, span: Span) -> Self {
        Self {
            document: document.into(),
            span,
            interface: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeAction {
    pub title: String,
    pub identity: StrategyIdentity,
    pub edits: Vec<DocumentEdit>,
}

/// Offers and applies implement-interface fixes over a fixed set of
/// documents.
pub struct ImplementInterfaceService<'a> {
    db: &'a dyn SymbolDatabase,
    documents: &'a [SourceDocument],
    options: &'a ImplementOptions,
}

impl<'a> ImplementInterfaceService<'a> {
    pub fn new(
        db: &'a dyn SymbolDatabase,
        documents: &'a [SourceDocument],
        options: &'a ImplementOptions,
    ) -> Self {
        Self {
            db,
            documents,
            options,
        }
    }

    pub fn document(&self, name: &str) -> Result<&'a SourceDocument, ImplementError> {
        find_document(self.documents, name)
    }

    /// Strategies offered for `diagnostic`, in presentation order. Empty
    /// when nothing is missing or every insertion point is hidden.
    pub fn strategies(&self, diagnostic: &Diagnostic) -> Result<Vec<Strategy>, ImplementError> {
        let document = self.document(&diagnostic.document)?;
        let request = Request::new(self.db, document, diagnostic, self.options)?;
        Ok(request.strategies())
    }

    /// Every offered action with its edits computed.
    pub fn code_actions(&self, diagnostic: &Diagnostic) -> Result<Vec<CodeAction>, ImplementError> {
        let document = self.document(&diagnostic.document)?;
        let request = Request::new(self.db, document, diagnostic, self.options)?;
        request
            .strategies()
            .iter()
            .map(|strategy| request.code_action(strategy))
            .collect()
    }

    /// The action at `index` of the offered list.
    pub fn apply(&self, diagnostic: &Diagnostic, index: usize) -> Result<CodeAction, ImplementError> {
        let document = self.document(&diagnostic.document)?;
        let request = Request::new(self.db, document, diagnostic, self.options)?;
        let strategies = request.strategies();
        let strategy = strategies.get(index).ok_or_else(|| {
            ImplementError::no_action(format!(
                "action {index} requested, {} offered",
                strategies.len()
            ))
        })?;
        request.code_action(strategy)
    }

    /// The action selected by the option flags (`explicitly`, `abstractly`,
    /// `throughMember`, `disposePattern`).
    pub fn apply_selected(&self, diagnostic: &Diagnostic) -> Result<CodeAction, ImplementError> {
        let document = self.document(&diagnostic.document)?;
        let request = Request::new(self.db, document, diagnostic, self.options)?;
        let strategies = request.strategies();
        let strategy = strategy::select(&strategies, self.options)
            .ok_or_else(|| ImplementError::no_action("no offered action matches the options"))?;
        request.code_action(strategy)
    }
}

pub(crate) fn find_document<'d>(
    documents: &'d [SourceDocument],
    name: &str,
) -> Result<&'d SourceDocument, ImplementError> {
    documents
        .iter()
        .find(|d| d.name == name)
        .ok_or_else(|| ImplementError::UnknownDocument {
            name: name.to_string(),
        })
}

/// One diagnostic bound to its declaration, interface and missing members.
pub(crate) struct Request<'a> {
    pub ctx: ImplementContext<'a>,
    pub groups: Vec<InterfaceMemberGroup>,
    pub members: Vec<InterfaceMember>,
}

/// Generated members and the edits that insert them.
pub(crate) struct Generated {
    pub members: Vec<SynthesizedMember>,
    pub edits: Vec<OutlineEdit>,
}

impl<'a> Request<'a> {
    pub fn new(
        db: &'a dyn SymbolDatabase,
        document: &'a SourceDocument,
        diagnostic: &Diagnostic,
        options: &'a ImplementOptions,
    ) -> Result<Self, ImplementError> {
        let declaration = document
            .declaration_with_base_entry(diagnostic.span)
            .ok_or_else(|| ImplementError::DiagnosticNotInBaseList {
                document: document.name.clone(),
                span: diagnostic.span,
            })?;
        let interface = match &diagnostic.interface {
            Some(interface) => interface.clone(),
            None => resolve_base_entry(db, document, declaration, diagnostic.span)?,
        };
        let ctx = ImplementContext::new(db, document, declaration, interface, options)?;
        let groups = unimplemented_member_groups(db, ctx.target, &ctx.interface);
        let members = distinct_members(db, &groups);
        debug!(
            document = %document.name,
            target = %db.qualified_name(ctx.target),
            missing = members.len(),
            "implement interface request"
        );
        Ok(Self {
            ctx,
            groups,
            members,
        })
    }

    pub fn strategies(&self) -> Vec<Strategy> {
        if !has_visible_insertion_point(&self.ctx) {
            debug!(document = %self.ctx.document.name, "declaration body is hidden");
            return Vec::new();
        }
        strategy::strategies(&self.ctx, &self.members)
    }

    pub fn generate(&self, strategy: &Strategy) -> Result<Generated, ImplementError> {
        let ctx = &self.ctx;
        let synthesis = synthesize(ctx, &self.groups, strategy);
        if synthesis.members.is_empty() {
            return Err(ImplementError::no_action("nothing to generate"));
        }
        let com_import = ctx
            .interface
            .as_named()
            .is_some_and(|(id, _)| has_com_import_attribute(ctx.db, id));
        let mut edits = place(ctx, &synthesis.members, com_import)?;
        edits.extend(import_edits(ctx.document, &synthesis.required_imports));
        Ok(Generated {
            members: synthesis.members,
            edits,
        })
    }

    pub fn code_action(&self, strategy: &Strategy) -> Result<CodeAction, ImplementError> {
        let generated = self.generate(strategy)?;
        let mut edit = DocumentEdit::new(self.ctx.document.name.clone());
        for outline_edit in generated.edits {
            edit.push(outline_edit.edit);
        }
        edit.normalize();
        Ok(CodeAction {
            title: strategy.title.clone(),
            identity: strategy.identity.clone(),
            edits: vec![edit],
        })
    }
}
