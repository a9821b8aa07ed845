//! The `actions`, `apply` and `fix-all` commands.
//!
//! Each command returns its stdout text so tests can run it without a
//! process; `main` only prints and picks the exit status.

use anyhow::{Context, Result, anyhow};
use serde::Serialize;
use tracing::debug;

use sharpfix_common::DocumentEdit;
use sharpfix_implement::{ImplementInterfaceService, ImplementOptions, fix_all};

use super::args::{ActionArgs, ApplyArgs, Command, FixAllArgs, OptionArgs};
use super::fixture::Fixture;
use super::reporter::Reporter;

/// What a command printed, and errors that should fail the run without
/// hiding the output.
#[derive(Debug, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub errors: Vec<String>,
}

impl CommandOutput {
    fn text(stdout: String) -> Self {
        Self {
            stdout,
            errors: Vec::new(),
        }
    }
}

pub fn run(command: &Command, reporter: &Reporter) -> Result<CommandOutput> {
    match command {
        Command::Actions(args) => actions(args, reporter),
        Command::Apply(args) => apply(args),
        Command::FixAll(args) => run_fix_all(args, reporter),
    }
}

fn options_for(fixture: &Fixture, flags: &OptionArgs) -> ImplementOptions {
    let mut options = fixture.options.clone();
    flags.apply_to(&mut options);
    options
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ListedAction<'a> {
    index: usize,
    title: &'a str,
    key: String,
    identity: &'a sharpfix_implement::StrategyIdentity,
}

pub fn actions(args: &ActionArgs, reporter: &Reporter) -> Result<CommandOutput> {
    let fixture = Fixture::load(&args.fixture)?;
    let options = options_for(&fixture, &args.options);
    let diagnostic = fixture.diagnostic(args.diagnostic)?;
    let service = ImplementInterfaceService::new(&fixture.symbols, &fixture.documents, &options);
    let strategies = service
        .strategies(diagnostic)
        .context("failed to compute actions")?;
    debug!(offered = strategies.len(), "actions");

    if args.json {
        let listed: Vec<ListedAction<'_>> = strategies
            .iter()
            .enumerate()
            .map(|(index, s)| ListedAction {
                index,
                title: &s.title,
                key: s.identity.key(),
                identity: &s.identity,
            })
            .collect();
        let mut json = serde_json::to_string_pretty(&listed)?;
        json.push('\n');
        return Ok(CommandOutput::text(json));
    }
    Ok(CommandOutput::text(reporter.actions(&strategies)))
}

pub fn apply(args: &ApplyArgs) -> Result<CommandOutput> {
    let fixture = Fixture::load(&args.fixture)?;
    let options = options_for(&fixture, &args.options);
    let diagnostic = fixture.diagnostic(args.diagnostic)?;
    let service = ImplementInterfaceService::new(&fixture.symbols, &fixture.documents, &options);
    let action = match args.index {
        Some(index) => service.apply(diagnostic, index),
        None => service.apply_selected(diagnostic),
    }
    .context("failed to apply action")?;

    if args.json {
        let mut json = serde_json::to_string_pretty(&action)?;
        json.push('\n');
        return Ok(CommandOutput::text(json));
    }
    let mut out = String::new();
    for edit in &action.edits {
        out.push_str(&apply_to_document(&fixture, edit)?);
    }
    Ok(CommandOutput::text(out))
}

fn apply_to_document(fixture: &Fixture, edit: &DocumentEdit) -> Result<String> {
    let document = fixture
        .documents
        .iter()
        .find(|d| d.name == edit.document)
        .ok_or_else(|| anyhow!("edit for unknown document {}", edit.document))?;
    Ok(edit.apply(&document.text))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FixAllJson<'a> {
    documents: Vec<FixedDocumentJson<'a>>,
    failures: Vec<FailureJson>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FixedDocumentJson<'a> {
    edit: &'a DocumentEdit,
    applied: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FailureJson {
    document: String,
    error: String,
}

pub fn run_fix_all(args: &FixAllArgs, reporter: &Reporter) -> Result<CommandOutput> {
    let fixture = Fixture::load(&args.fixture)?;
    let options = options_for(&fixture, &args.options);
    let first = fixture.diagnostic(0)?;
    let service = ImplementInterfaceService::new(&fixture.symbols, &fixture.documents, &options);
    let strategies = service
        .strategies(first)
        .context("failed to compute actions for the first diagnostic")?;
    let strategy = strategies.get(args.index).ok_or_else(|| {
        anyhow!(
            "action {} requested, {} offered",
            args.index,
            strategies.len()
        )
    })?;

    let result = fix_all(
        &fixture.symbols,
        &fixture.documents,
        &fixture.diagnostics,
        &strategy.identity,
        &options,
    );

    let errors: Vec<String> = result
        .failures
        .iter()
        .map(|(document, error)| reporter.failure(document, error))
        .collect();

    if args.json {
        let json = FixAllJson {
            documents: result
                .documents
                .iter()
                .map(|d| FixedDocumentJson {
                    edit: &d.edit,
                    applied: d.applied,
                })
                .collect(),
            failures: result
                .failures
                .iter()
                .map(|(document, error)| FailureJson {
                    document: document.clone(),
                    error: error.to_string(),
                })
                .collect(),
        };
        let mut stdout = serde_json::to_string_pretty(&json)?;
        stdout.push('\n');
        return Ok(CommandOutput { stdout, errors });
    }

    let mut stdout = String::new();
    for fix in &result.documents {
        stdout.push_str(&reporter.document_header(&fix.edit.document, fix.applied));
        stdout.push_str(&fix.text);
    }
    Ok(CommandOutput { stdout, errors })
}
