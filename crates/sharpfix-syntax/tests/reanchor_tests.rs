use super::*;
use sharpfix_common::{Span, TextEdit};
use sharpfix_symbols::TypeSymbolId;

const TEXT: &str = "class C : I\n{\n    int x;\n}\n";

fn outline() -> SourceDocument {
    OutlineBuilder::new("t.cs", TEXT)
        .type_decl(
            TypeAnchor::new(TypeSymbolId(0), "class C")
                .base("I")
                .member(MemberDeclarationKind::Field, "int x;"),
        )
        .build()
        .expect("outline builds")
}

#[test]
fn test_offset_map_bias_at_insertion_point() {
    let edits = vec![TextEdit::insert(5, "abc".to_string())];
    let map = OffsetMap::new(&edits);

    assert_eq!(map.map(5, Bias::Before), 5);
    assert_eq!(map.map(5, Bias::After), 8);
    assert_eq!(map.map(4, Bias::After), 4);
    assert_eq!(map.map(9, Bias::Before), 12);
}

#[test]
fn test_offset_map_inside_replacement_snaps_to_edges() {
    let edits = vec![TextEdit::new(Span::new(2, 6), "xy".to_string())];
    let map = OffsetMap::new(&edits);

    assert_eq!(map.map(4, Bias::Before), 2);
    assert_eq!(map.map(4, Bias::After), 4);
    assert_eq!(map.map(6, Bias::Before), 4);
    assert_eq!(map.map(10, Bias::Before), 8);
}

#[test]
fn test_insertion_after_member_keeps_member_and_moves_brace() {
    let doc = outline();
    let member_end = doc.types[0].members[0].span.end;
    let inserted = "\n\n    void M() { }";
    let edit = OutlineEdit {
        edit: TextEdit::insert(member_end, inserted.to_string()),
        declarations: vec![InsertedDeclaration::Member {
            symbol: TypeSymbolId(0),
            member: MemberDeclarationKind::Method,
            name: "M".to_string(),
            span: Span::new(6, inserted.len() as u32),
        }],
    };

    let after = doc.apply_outline_edits(&[edit]);
    let decl = &after.types[0];

    assert_eq!(after.text, "class C : I\n{\n    int x;\n\n    void M() { }\n}\n");
    assert_eq!(decl.members.len(), 2);
    assert_eq!(decl.members[0].span.text(&after.text), "int x;");
    assert_eq!(decl.members[1].span.text(&after.text), "void M() { }");
    let close = decl.close_brace.expect("body") as usize;
    assert_eq!(&after.text[close..=close], "}");
    assert_eq!(decl.span.end as usize, close + 1);
}

#[test]
fn test_using_at_start_shifts_everything() {
    let doc = outline();
    let using = "using System;\n\n";
    let edit = OutlineEdit {
        edit: TextEdit::insert(0, using.to_string()),
        declarations: vec![InsertedDeclaration::Using {
            namespace: "System".to_string(),
            span: Span::new(0, 13),
        }],
    };

    let after = doc.apply_outline_edits(&[edit]);

    assert_eq!(after.usings.len(), 1);
    assert_eq!(after.usings[0].span.text(&after.text), "using System;");
    assert_eq!(after.types[0].span.start as usize, using.len());
    assert_eq!(after.types[0].base_list[0].span.text(&after.text), "I");
    assert!(after.imports("System"));
}

#[test]
fn test_synthesized_braces_are_recorded() {
    let text = "class C : I";
    let doc = OutlineBuilder::new("t.cs", text)
        .type_decl(TypeAnchor::new(TypeSymbolId(0), "class C").base("I").without_body())
        .build()
        .expect("outline builds");
    let body = "\n{\n}";
    let edit = OutlineEdit {
        edit: TextEdit::insert(doc.types[0].header_end, body.to_string()),
        declarations: vec![
            InsertedDeclaration::OpenBrace {
                symbol: TypeSymbolId(0),
                offset: 1,
            },
            InsertedDeclaration::CloseBrace {
                symbol: TypeSymbolId(0),
                offset: 3,
            },
        ],
    };

    let after = doc.apply_outline_edits(&[edit]);
    let decl = &after.types[0];

    assert_eq!(after.text, "class C : I\n{\n}");
    assert_eq!(decl.open_brace, Some(12));
    assert_eq!(decl.close_brace, Some(14));
    assert_eq!(decl.header_end, 11);
    assert_eq!(decl.span.end, 15);
}

#[test]
fn test_two_edits_record_positions_in_final_text() {
    let doc = outline();
    let member_end = doc.types[0].members[0].span.end;
    let edits = vec![
        OutlineEdit {
            edit: TextEdit::insert(member_end, "\n    int y;".to_string()),
            declarations: vec![InsertedDeclaration::Member {
                symbol: TypeSymbolId(0),
                member: MemberDeclarationKind::Field,
                name: "y".to_string(),
                span: Span::new(5, 11),
            }],
        },
        OutlineEdit::plain(TextEdit::insert(0, "// header\n".to_string())),
    ];

    let after = doc.apply_outline_edits(&edits);
    let fields: Vec<_> = after.types[0]
        .members
        .iter()
        .map(|m| m.span.text(&after.text))
        .collect();

    assert_eq!(fields, vec!["int x;", "int y;"]);
}
