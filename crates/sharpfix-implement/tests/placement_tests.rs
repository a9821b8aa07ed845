use super::*;
use crate::fixtures::{Fixture, program_with};
use sharpfix_symbols::{
    AttributeData, Parameter, PropertySignature, TypeKind, TypeRef, TypeSymbolId,
};
use sharpfix_syntax::{MemberDeclarationKind, OutlineBuilder, TypeAnchor};

const THROWING_M: &str = "    public void M()
    {
        throw new NotImplementedException();
    }";

/// `Class : IInterface` in `text`, with `outline` adding member anchors,
/// hidden regions or a missing body to the declaration.
fn class_document(
    text: &str,
    interface_members: impl FnOnce(&mut Fixture, TypeSymbolId),
    outline: impl FnOnce(OutlineBuilder, TypeAnchor) -> OutlineBuilder,
) -> (Fixture, Diagnostic) {
    let mut f = Fixture::new();
    let iface = f.arena.add_interface("IInterface");
    interface_members(&mut f, iface);
    let class = f
        .arena
        .build_type("Class", TypeKind::Class)
        .interface(TypeRef::named(iface))
        .finish();
    let anchor = TypeAnchor::new(class, "class Class").base("IInterface");
    f.add_document(outline(OutlineBuilder::new("Program.cs", text), anchor));
    let diagnostic = f.diagnostic("Program.cs", "IInterface");
    (f, diagnostic)
}

fn method_m(f: &mut Fixture, iface: TypeSymbolId) {
    f.arena.add_method(iface, "M", TypeRef::void(), Vec::new());
}

fn plain(builder: OutlineBuilder, anchor: TypeAnchor) -> OutlineBuilder {
    builder.type_decl(anchor)
}

#[test]
fn test_missing_body_gets_braces() {
    let (f, diagnostic) = class_document(
        "using System;\n\nclass Class : IInterface\n",
        method_m,
        |builder, anchor| builder.type_decl(anchor.without_body()),
    );

    assert_eq!(f.apply(&diagnostic, 0), program_with(THROWING_M));
}

#[test]
fn test_single_line_body_is_expanded() {
    let (f, diagnostic) = class_document(
        "using System;\n\nclass Class : IInterface { }\n",
        method_m,
        plain,
    );

    assert_eq!(f.apply(&diagnostic, 0), program_with(THROWING_M));
}

const WITH_FIELD_AND_METHOD: &str = "using System;

class Class : IInterface
{
    private int count;

    public void Existing()
    {
    }
}
";

fn field_and_method(builder: OutlineBuilder, anchor: TypeAnchor) -> OutlineBuilder {
    builder.type_decl(
        anchor
            .member(MemberDeclarationKind::Field, "private int count;")
            .member(MemberDeclarationKind::Method, "public void Existing()"),
    )
}

fn method_then_property(f: &mut Fixture, iface: TypeSymbolId) {
    f.arena.add_method(iface, "M", TypeRef::void(), Vec::new());
    f.arena
        .add_property(iface, "P", PropertySignature::get_only(TypeRef::int()));
}

#[test]
fn test_members_join_their_own_kind() {
    let (f, diagnostic) =
        class_document(WITH_FIELD_AND_METHOD, method_then_property, field_and_method);

    let expected = "using System;

class Class : IInterface
{
    private int count;

    public int P
    {
        get
        {
            throw new NotImplementedException();
        }
    }

    public void Existing()
    {
    }

    public void M()
    {
        throw new NotImplementedException();
    }
}
";
    assert_eq!(f.apply(&diagnostic, 0), expected);
}

#[test]
fn test_at_the_end_keeps_generation_order() {
    let (mut f, diagnostic) =
        class_document(WITH_FIELD_AND_METHOD, method_then_property, field_and_method);
    f.options.insertion_behavior = InsertionBehavior::AtTheEnd;

    let expected = "using System;

class Class : IInterface
{
    private int count;

    public void Existing()
    {
    }

    public void M()
    {
        throw new NotImplementedException();
    }

    public int P
    {
        get
        {
            throw new NotImplementedException();
        }
    }
}
";
    assert_eq!(f.apply(&diagnostic, 0), expected);
}

#[test]
fn test_com_import_interface_keeps_member_order() {
    let (f, diagnostic) = class_document(
        "using System;\n\nclass Class : IInterface\n{\n}\n",
        |f, iface| {
            method_then_property(f, iface);
            let com_import = AttributeData::new(f.core.com_import_attribute);
            if let Some(symbol) = f.arena.type_mut(iface) {
                symbol.attributes.push(com_import);
            }
        },
        plain,
    );

    let applied = f.apply(&diagnostic, 0);

    let m = applied.find("public void M()").expect("method");
    let p = applied.find("public int P").expect("property");
    assert!(m < p);
}

#[test]
fn test_hidden_body_offers_no_actions() {
    let (f, diagnostic) = class_document(
        "using System;\n\nclass Class : IInterface\n{\n}\n",
        method_m,
        |builder, anchor| builder.type_decl(anchor).hidden("{", "}"),
    );

    assert!(f.service().strategies(&diagnostic).expect("resolves").is_empty());
    assert_eq!(f.service().code_actions(&diagnostic), Ok(Vec::new()));
    assert!(matches!(
        f.service().apply(&diagnostic, 0),
        Err(ImplementError::NoActionAvailable { .. })
    ));
}

#[test]
fn test_hidden_member_falls_back_to_body_start() {
    let text = "using System;

class Class : IInterface
{
    public void Existing()
    {
    }
}
";
    let (f, diagnostic) = class_document(text, method_m, |builder, anchor| {
        builder
            .type_decl(anchor.member(MemberDeclarationKind::Method, "public void Existing()"))
            .hidden("public void Existing()", "    }")
    });

    let expected = "using System;

class Class : IInterface
{
    public void M()
    {
        throw new NotImplementedException();
    }

    public void Existing()
    {
    }
}
";
    assert_eq!(f.apply(&diagnostic, 0), expected);
}

#[test]
fn test_members_indent_inside_namespace() {
    let text = "using System;

namespace App
{
    class Class : IInterface
    {
    }
}
";
    let mut f = Fixture::new();
    let iface = f.arena.add_interface("IInterface");
    method_m(&mut f, iface);
    let class = f
        .arena
        .build_type("Class", TypeKind::Class)
        .namespace("App")
        .interface(TypeRef::named(iface))
        .finish();
    f.add_document(
        OutlineBuilder::new("Program.cs", text)
            .type_decl(TypeAnchor::new(class, "class Class").base("IInterface")),
    );
    let diagnostic = f.diagnostic("Program.cs", "IInterface");

    let expected = "using System;

namespace App
{
    class Class : IInterface
    {
        public void M()
        {
            throw new NotImplementedException();
        }
    }
}
";
    assert_eq!(f.apply(&diagnostic, 0), expected);
}

#[test]
fn test_tab_indentation() {
    let (mut f, diagnostic) = class_document(
        "using System;\n\nclass Class : IInterface\n{\n}\n",
        method_m,
        plain,
    );
    f.options.indentation.insert_spaces = false;

    assert_eq!(
        f.apply(&diagnostic, 0),
        program_with("\tpublic void M()\n\t{\n\t\tthrow new NotImplementedException();\n\t}")
    );
}

#[test]
fn test_using_added_at_top_of_file_without_usings() {
    let (f, diagnostic) =
        class_document("class Class : IInterface\n{\n}\n", method_m, plain);

    assert_eq!(f.apply(&diagnostic, 0), program_with(THROWING_M));
}

#[test]
fn test_type_qualified_when_imports_disabled() {
    let (mut f, diagnostic) =
        class_document("class Class : IInterface\n{\n}\n", method_m, plain);
    f.options.add_imports = false;

    let expected = "class Class : IInterface
{
    public void M()
    {
        throw new System.NotImplementedException();
    }
}
";
    assert_eq!(f.apply(&diagnostic, 0), expected);
}

#[test]
fn test_usings_inserted_in_system_first_order() {
    let text = "using System.Collections;\n\nclass Class : IInterface\n{\n}\n";
    let (f, diagnostic) = class_document(
        text,
        |f, iface| {
            f.arena.add_method(
                iface,
                "M",
                TypeRef::void(),
                vec![Parameter::new("x", TypeRef::int()).optional()],
            );
        },
        plain,
    );

    let expected = "using System;
using System.Collections;
using System.Runtime.InteropServices;

class Class : IInterface
{
    public void M([Optional] int x)
    {
        throw new NotImplementedException();
    }
}
";
    assert_eq!(f.apply(&diagnostic, 0), expected);
}

#[test]
fn test_usings_inserted_alphabetically_when_file_is_not_system_first() {
    let text = "using Alpha;\nusing System.IO;\n\nclass Class : IInterface\n{\n}\n";
    let (f, diagnostic) = class_document(text, method_m, plain);

    let expected = format!(
        "using Alpha;\nusing System;\nusing System.IO;\n\nclass Class : IInterface\n{{\n{THROWING_M}\n}}\n"
    );
    assert_eq!(f.apply(&diagnostic, 0), expected);
}

#[test]
fn test_system_order_comparers() {
    use crate::imports::{alphabetical_order, system_first_order};
    use std::cmp::Ordering;

    assert_eq!(system_first_order("System.Linq", "Alpha"), Ordering::Less);
    assert_eq!(system_first_order("System", "System.Linq"), Ordering::Less);
    assert_eq!(system_first_order("Beta", "alpha"), Ordering::Greater);
    assert_eq!(alphabetical_order("System.Linq", "Alpha"), Ordering::Greater);
    assert_eq!(alphabetical_order("abc", "ABC"), Ordering::Greater);
}

#[test]
fn test_hidden_single_line_body_offers_no_actions() {
    let (f, diagnostic) = class_document(
        "using System;\n\nclass Class : IInterface { }\n",
        method_m,
        |builder, anchor| builder.type_decl(anchor).hidden("class Class", "}"),
    );

    assert!(f.titles(&diagnostic).is_empty());
}

#[test]
fn test_trailing_line_comment_stays_with_its_member() {
    let text = "using System;

class Class : IInterface
{
    public void Existing() { } // keep
}
";
    let (f, diagnostic) = class_document(text, method_m, |builder, anchor| {
        builder.type_decl(anchor.member(MemberDeclarationKind::Method, "public void Existing()"))
    });

    let expected = "using System;

class Class : IInterface
{
    public void Existing() { } // keep

    public void M()
    {
        throw new NotImplementedException();
    }
}
";
    assert_eq!(f.apply(&diagnostic, 0), expected);
}
