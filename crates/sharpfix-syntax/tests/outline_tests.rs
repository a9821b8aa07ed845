use super::*;
use sharpfix_common::Span;
use sharpfix_symbols::TypeSymbolId;

const PROGRAM: &str = "using System;
using static System.Math;

namespace N
{
    class Class : IInterface, IOther
    {
        private int x;

        public int P { get; } = 5;

        public void M()
        {
            if (x > 0) { }
        }
    }
}
";

fn program_outline() -> SourceDocument {
    OutlineBuilder::new("Program.cs", PROGRAM)
        .type_decl(
            TypeAnchor::new(TypeSymbolId(0), "class Class")
                .base("IInterface")
                .base("IOther")
                .member(MemberDeclarationKind::Field, "private int x;")
                .member(MemberDeclarationKind::Property, "public int P")
                .member(MemberDeclarationKind::Method, "public void M()"),
        )
        .build()
        .expect("outline builds")
}

#[test]
fn test_type_declaration_outline() {
    let doc = program_outline();
    let decl = &doc.types[0];

    assert_eq!(decl.namespace, "N");
    assert_eq!(decl.indentation, "    ");
    assert!(decl.span.text(PROGRAM).starts_with("class Class"));
    assert!(decl.span.text(PROGRAM).ends_with('}'));
    assert!(PROGRAM[..decl.header_end as usize].ends_with("IOther"));

    let bases: Vec<_> = decl.base_list.iter().map(|b| b.span.text(PROGRAM)).collect();
    assert_eq!(bases, vec!["IInterface", "IOther"]);

    let open = decl.open_brace.expect("has body") as usize;
    let close = decl.close_brace.expect("has body") as usize;
    assert_eq!(&PROGRAM[open..=open], "{");
    assert_eq!(&PROGRAM[close..=close], "}");
}

#[test]
fn test_member_spans_cover_bodies_and_initializers() {
    let doc = program_outline();
    let members: Vec<_> = doc.types[0]
        .members
        .iter()
        .map(|m| m.span.text(PROGRAM))
        .collect();

    assert_eq!(members[0], "private int x;");
    assert_eq!(members[1], "public int P { get; } = 5;");
    assert!(members[2].starts_with("public void M()"));
    assert!(members[2].ends_with("        }"));
}

#[test]
fn test_usings_are_scanned_before_first_type() {
    let doc = program_outline();

    assert_eq!(doc.usings.len(), 2);
    assert_eq!(doc.usings[0].namespace, "System");
    assert_eq!(doc.usings[0].span.text(PROGRAM), "using System;");
    assert!(doc.usings[1].is_static_or_alias);
    assert_eq!(doc.imported_namespaces(), vec!["System".to_string()]);
    assert!(!doc.imports("System.Math"));
}

#[test]
fn test_declaration_without_body() {
    let text = "class C : I\nclass D { }\n";
    let doc = OutlineBuilder::new("t.cs", text)
        .type_decl(TypeAnchor::new(TypeSymbolId(0), "class C").base("I").without_body())
        .type_decl(TypeAnchor::new(TypeSymbolId(1), "class D"))
        .build()
        .expect("outline builds");

    let c = &doc.types[0];
    assert!(!c.has_body());
    assert_eq!(c.header_end, 11);
    assert!(doc.types[1].has_body());
}

#[test]
fn test_partial_declarations_are_found_in_order() {
    let text = "partial class C { }\npartial class C : I { }\n";
    let doc = OutlineBuilder::new("t.cs", text)
        .type_decl(TypeAnchor::new(TypeSymbolId(0), "partial class C"))
        .type_decl(TypeAnchor::new(TypeSymbolId(0), "partial class C").base("I"))
        .build()
        .expect("outline builds");

    assert_eq!(doc.declarations_of(TypeSymbolId(0)).count(), 2);
    let base = doc.types[1].base_list[0].span;
    let target = doc
        .declaration_with_base_entry(base)
        .expect("declaration found");
    assert_eq!(target.span.start, doc.types[1].span.start);
}

#[test]
fn test_missing_anchor_is_an_error() {
    let err = OutlineBuilder::new("t.cs", "class C { }")
        .type_decl(TypeAnchor::new(TypeSymbolId(0), "class D"))
        .build()
        .unwrap_err();

    assert_eq!(
        err,
        OutlineError::AnchorNotFound {
            anchor: "class D".to_string()
        }
    );
}

#[test]
fn test_unbalanced_braces_are_an_error() {
    let err = OutlineBuilder::new("t.cs", "class C {")
        .type_decl(TypeAnchor::new(TypeSymbolId(0), "class C"))
        .build()
        .unwrap_err();

    assert!(matches!(err, OutlineError::UnbalancedBraces { offset: 8 }));
}

#[test]
fn test_hidden_regions() {
    let text = "class C\n{\n#line hidden\n    void M() { }\n#line default\n}\n";
    let doc = OutlineBuilder::new("t.cs", text)
        .type_decl(TypeAnchor::new(TypeSymbolId(0), "class C"))
        .hidden("#line hidden", "#line default")
        .build()
        .expect("outline builds");

    let region = doc.hidden_regions[0];
    assert!(doc.is_hidden(region.start + 15));
    assert!(!doc.is_hidden(0));
    assert_eq!(doc.line_start(region.start + 3), region.start);
    assert!(doc.is_blank(Span::new(9, 10)));
}

#[test]
fn test_builder_deserializes_from_json() {
    let json = r#"{
        "name": "t.cs",
        "text": "class C : I { }",
        "nullableEnabled": true,
        "types": [{ "symbol": 3, "anchor": "class C", "bases": ["I"] }]
    }"#;
    let builder: OutlineBuilder = serde_json::from_str(json).expect("valid fixture");
    let doc = builder.build().expect("outline builds");

    assert!(doc.nullable_enabled);
    assert_eq!(doc.types[0].symbol, TypeSymbolId(3));
    assert_eq!(doc.types[0].base_list.len(), 1);
}
