use super::*;
use crate::fixtures::{Fixture, PROGRAM, empty_class, program_with};
use sharpfix_symbols::{
    Accessibility, EventSignature, MemberKind, MemberModifiers, MethodSignature, Parameter,
    PropertySignature, RefKind, SymbolDatabase, TypeKind, TypeRef, TypeSymbolId,
};
use sharpfix_syntax::{MemberDeclarationKind, OutlineBuilder, TypeAnchor};

const THROUGH_INNER: &str = "Implement interface through 'inner'";

/// `Class : IInterface` declaring `private <field_type> inner;`, with the
/// field in both the symbols and the text.
fn class_with_field(
    members: impl FnOnce(&mut Fixture, TypeSymbolId),
    field_type: impl FnOnce(&mut Fixture, TypeSymbolId) -> (TypeRef, &'static str),
) -> (Fixture, Diagnostic) {
    let mut f = Fixture::new();
    let iface = f.arena.add_interface("IInterface");
    members(&mut f, iface);
    let (ty, written) = field_type(&mut f, iface);
    let class = f
        .arena
        .build_type("Class", TypeKind::Class)
        .interface(TypeRef::named(iface))
        .finish();
    f.arena.add_field(class, "inner", ty, Accessibility::Private);
    let field = format!("private {written} inner;");
    let text = format!("using System;\n\nclass Class : IInterface\n{{\n    {field}\n}}\n");
    f.add_document(
        OutlineBuilder::new("Program.cs", &text).type_decl(
            TypeAnchor::new(class, "class Class")
                .base("IInterface")
                .member(MemberDeclarationKind::Field, &field),
        ),
    );
    let diagnostic = f.diagnostic("Program.cs", "IInterface");
    (f, diagnostic)
}

fn interface_typed(_: &mut Fixture, iface: TypeSymbolId) -> (TypeRef, &'static str) {
    (TypeRef::named(iface), "IInterface")
}

fn with_field(written: &str, members: &str) -> String {
    program_with(&format!("    private {written} inner;\n\n{members}"))
}

#[test]
fn test_forwards_every_member_shape() {
    let (f, diagnostic) = class_with_field(
        |f, iface| {
            f.arena.add_method(
                iface,
                "Get",
                TypeRef::int(),
                vec![Parameter::new("x", TypeRef::int())],
            );
            f.arena.add_method(
                iface,
                "Set",
                TypeRef::void(),
                vec![Parameter::new("s", TypeRef::string()).with_ref_kind(RefKind::Ref)],
            );
            f.arena
                .add_property(iface, "P", PropertySignature::get_set(TypeRef::int()));
            let handler = TypeRef::named(f.core.event_handler);
            f.arena
                .build_member(iface, "E", MemberKind::Event(EventSignature { ty: handler }))
                .finish();
        },
        interface_typed,
    );

    let expected = with_field(
        "IInterface",
        "    public event EventHandler E
    {
        add
        {
            inner.E += value;
        }

        remove
        {
            inner.E -= value;
        }
    }

    public int P
    {
        get
        {
            return inner.P;
        }

        set
        {
            inner.P = value;
        }
    }

    public int Get(int x)
    {
        return inner.Get(x);
    }

    public void Set(ref string s)
    {
        inner.Set(ref s);
    }",
    );
    assert_eq!(f.apply_titled(&diagnostic, THROUGH_INNER), expected);
}

#[test]
fn test_forwarding_prefers_expression_bodies() {
    let (mut f, diagnostic) = class_with_field(
        |f, iface| {
            f.arena.add_method(
                iface,
                "Get",
                TypeRef::int(),
                vec![Parameter::new("x", TypeRef::int())],
            );
            f.arena
                .add_property(iface, "Count", PropertySignature::get_only(TypeRef::int()));
        },
        interface_typed,
    );
    f.options.expression_body_preferences = ExpressionBodyPreferences::all_when_possible();

    let expected = with_field(
        "IInterface",
        "    public int Count => inner.Count;

    public int Get(int x) => inner.Get(x);",
    );
    assert_eq!(f.apply_titled(&diagnostic, THROUGH_INNER), expected);
}

#[test]
fn test_explicitly_implemented_target_is_cast() {
    let (f, diagnostic) = class_with_field(
        |f, iface| {
            f.arena.add_method(iface, "M", TypeRef::void(), Vec::new());
        },
        |f, iface| {
            let m = f
                .arena
                .members_named(iface, "M")
                .first()
                .map(|(id, _)| *id)
                .expect("interface method");
            let implementation = f
                .arena
                .build_type("Impl", TypeKind::Class)
                .interface(TypeRef::named(iface))
                .finish();
            f.arena
                .build_member(
                    implementation,
                    "M",
                    MemberKind::Method(MethodSignature::new(TypeRef::void(), Vec::new())),
                )
                .accessibility(Accessibility::Private)
                .implements_explicitly(TypeRef::named(iface), m)
                .finish();
            (TypeRef::named(implementation), "Impl")
        },
    );

    let expected = with_field(
        "Impl",
        "    public void M()
    {
        ((IInterface)inner).M();
    }",
    );
    assert_eq!(f.apply_titled(&diagnostic, THROUGH_INNER), expected);
}

#[test]
fn test_partial_target_forwards_what_it_has() {
    let (f, diagnostic) = class_with_field(
        |f, iface| {
            f.arena.add_method(iface, "A", TypeRef::void(), Vec::new());
            f.arena.add_method(iface, "B", TypeRef::void(), Vec::new());
        },
        |f, _| {
            let partial = f.arena.add_class("Partial");
            f.arena.add_method(partial, "A", TypeRef::void(), Vec::new());
            (TypeRef::named(partial), "Partial")
        },
    );

    let expected = with_field(
        "Partial",
        "    public void A()
    {
        inner.A();
    }

    public void B()
    {
        throw new NotImplementedException();
    }",
    );
    assert_eq!(f.apply_titled(&diagnostic, THROUGH_INNER), expected);
}

#[test]
fn test_unrelated_fields_are_not_candidates() {
    let (f, diagnostic) = class_with_field(
        |f, iface| {
            f.arena.add_method(iface, "A", TypeRef::void(), Vec::new());
        },
        |_, _| (TypeRef::int(), "int"),
    );

    assert_eq!(
        f.titles(&diagnostic),
        vec!["Implement interface", "Implement all members explicitly"]
    );
}

#[test]
fn test_field_of_own_type_is_skipped() {
    let (mut f, diagnostic) = empty_class(|f, iface| {
        f.arena.add_method(iface, "A", TypeRef::void(), Vec::new());
    });
    let class = f.document("Program.cs").types[0].symbol;
    f.arena
        .add_field(class, "next", TypeRef::named(class), Accessibility::Private);

    assert_eq!(
        f.titles(&diagnostic),
        vec!["Implement interface", "Implement all members explicitly"]
    );
}

#[test]
fn test_primary_constructor_parameter_is_a_candidate() {
    let mut f = Fixture::new();
    let iface = f.arena.add_interface("IInterface");
    f.arena.add_method(iface, "A", TypeRef::void(), Vec::new());
    let class = f
        .arena
        .build_type("Class", TypeKind::Class)
        .interface(TypeRef::named(iface))
        .primary_constructor(vec![Parameter::new("inner", TypeRef::named(iface))])
        .finish();
    f.add_document(
        OutlineBuilder::new("Program.cs", PROGRAM)
            .type_decl(TypeAnchor::new(class, "class Class").base("IInterface")),
    );
    let diagnostic = f.diagnostic("Program.cs", "IInterface");

    let candidates = f.service().strategies(&diagnostic).expect("strategies");
    let through: Vec<_> = candidates
        .iter()
        .filter_map(|s| s.delegation.as_ref())
        .collect();

    assert_eq!(through.len(), 1);
    assert_eq!(through[0].kind, DelegationKind::PrimaryConstructorParameter);
    assert_eq!(
        f.apply_titled(&diagnostic, THROUGH_INNER),
        program_with(
            "    public void A()
    {
        inner.A();
    }"
        )
    );
}

#[test]
fn test_static_members_are_not_forwarded() {
    let (f, diagnostic) = class_with_field(
        |f, iface| {
            f.arena
                .build_member(
                    iface,
                    "Create",
                    MemberKind::Method(MethodSignature::new(TypeRef::void(), Vec::new())),
                )
                .modifiers(MemberModifiers::STATIC | MemberModifiers::ABSTRACT)
                .finish();
            f.arena.add_method(iface, "Run", TypeRef::void(), Vec::new());
        },
        interface_typed,
    );

    let expected = with_field(
        "IInterface",
        "    public static void Create()
    {
        throw new NotImplementedException();
    }

    public void Run()
    {
        inner.Run();
    }",
    );
    assert_eq!(f.apply_titled(&diagnostic, THROUGH_INNER), expected);
}

#[test]
fn test_ref_returns_forward_by_reference() {
    let (mut f, diagnostic) = class_with_field(
        |f, iface| {
            let mut slot = MethodSignature::new(
                TypeRef::int(),
                vec![Parameter::new("i", TypeRef::int())],
            );
            slot.return_ref_kind = RefKind::Ref;
            f.arena
                .build_member(iface, "Slot", MemberKind::Method(slot))
                .finish();
        },
        interface_typed,
    );

    let expected = with_field(
        "IInterface",
        "    public ref int Slot(int i)
    {
        return ref inner.Slot(i);
    }",
    );
    assert_eq!(f.apply_titled(&diagnostic, THROUGH_INNER), expected);

    f.options.expression_body_preferences = ExpressionBodyPreferences::all_when_possible();
    assert!(
        f.apply_titled(&diagnostic, THROUGH_INNER)
            .contains("public ref int Slot(int i) => ref inner.Slot(i);")
    );
}
