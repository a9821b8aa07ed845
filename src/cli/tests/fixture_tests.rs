use super::fixture::{DiagnosticSpec, Fixture, FixtureFile};
use sharpfix_common::Span;
use sharpfix_symbols::{SymbolArena, TypeKind, TypeRef};
use sharpfix_syntax::{OutlineBuilder, TypeAnchor};
use tempfile::TempDir;

const TWO_CLASSES: &str = "class A : IInterface\n{\n}\n\nclass B : IInterface\n{\n}\n";

fn two_classes(diagnostics: Vec<DiagnosticSpec>) -> FixtureFile {
    let mut arena = SymbolArena::new();
    let iface = arena.add_interface("IInterface");
    let a = arena
        .build_type("A", TypeKind::Class)
        .interface(TypeRef::named(iface))
        .finish();
    let b = arena
        .build_type("B", TypeKind::Class)
        .interface(TypeRef::named(iface))
        .finish();
    FixtureFile {
        symbols: arena,
        documents: vec![
            OutlineBuilder::new("Program.cs", TWO_CLASSES)
                .type_decl(TypeAnchor::new(a, "class A").base("IInterface"))
                .type_decl(TypeAnchor::new(b, "class B").base("IInterface")),
        ],
        diagnostics,
        options: Default::default(),
    }
}

fn by_entry(entry: &str) -> DiagnosticSpec {
    DiagnosticSpec {
        document: "Program.cs".to_string(),
        entry: Some(entry.to_string()),
        span: None,
    }
}

#[test]
fn test_repeated_entries_take_successive_occurrences() {
    let fixture = two_classes(vec![by_entry("IInterface"), by_entry("IInterface")])
        .resolve()
        .expect("resolves");

    let spans: Vec<Span> = fixture.diagnostics.iter().map(|d| d.span).collect();
    assert_eq!(spans, vec![Span::new(10, 20), Span::new(36, 46)]);
}

#[test]
fn test_no_diagnostics_means_every_entry() {
    let fixture = two_classes(Vec::new()).resolve().expect("resolves");

    assert_eq!(fixture.diagnostics.len(), 2);
    assert!(fixture.diagnostics.iter().all(|d| d.document == "Program.cs"));
}

#[test]
fn test_explicit_span_is_kept() {
    let fixture = two_classes(vec![DiagnosticSpec {
        document: "Program.cs".to_string(),
        entry: None,
        span: Some(Span::new(36, 46)),
    }])
    .resolve()
    .expect("resolves");

    assert_eq!(fixture.diagnostics[0].span, Span::new(36, 46));
}

#[test]
fn test_missing_entry_is_an_error() {
    let error = two_classes(vec![by_entry("IInterface"), by_entry("IInterface"), by_entry("IInterface")])
        .resolve()
        .expect_err("third occurrence does not exist");

    assert!(error.to_string().contains("occurrence 3"));
}

#[test]
fn test_unknown_document_is_an_error() {
    let error = two_classes(vec![DiagnosticSpec {
        document: "Other.cs".to_string(),
        entry: None,
        span: None,
    }])
    .resolve()
    .expect_err("unknown document");

    assert!(error.to_string().contains("Other.cs"));
}

#[test]
fn test_load_round_trips_through_json() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("fixture.json");
    let file = two_classes(vec![by_entry("IInterface")]);
    std::fs::write(&path, serde_json::to_string(&file).expect("serializes")).expect("writes");

    let fixture = Fixture::load(&path).expect("loads");

    assert_eq!(fixture.symbols, file.symbols);
    assert_eq!(fixture.documents[0].text, TWO_CLASSES);
    assert_eq!(fixture.diagnostics.len(), 1);
}

#[test]
fn test_load_reports_the_path() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").expect("writes");

    let error = Fixture::load(&path).expect_err("invalid json");

    assert!(format!("{error:#}").contains("broken.json"));
    assert!(Fixture::load(&dir.path().join("missing.json")).is_err());
}
