use super::*;
use sharpfix_symbols::{
    Accessibility, CoreLibrary, MemberKind, MemberModifiers, MethodSignature, Parameter,
    PropertySignature, SymbolArena, TypeKind, TypeRef,
};

fn names(members: &[InterfaceMember]) -> Vec<&str> {
    members.iter().map(|m| m.name.as_str()).collect()
}

#[test]
fn test_interface_chain_lists_base_members_first() {
    let mut arena = SymbolArena::new();
    let base = arena.add_interface("IBase");
    arena.add_method(base, "A", TypeRef::void(), Vec::new());
    let derived = arena
        .build_type("IDerived", TypeKind::Interface)
        .interface(TypeRef::named(base))
        .finish();
    arena.add_method(derived, "B", TypeRef::void(), Vec::new());
    let class = arena
        .build_type("C", TypeKind::Class)
        .interface(TypeRef::named(derived))
        .finish();

    let members = unimplemented_members(&arena, class, &TypeRef::named(derived));

    assert_eq!(names(&members), vec!["A", "B"]);
    assert_eq!(members[0].interface, TypeRef::named(base));
    assert_eq!(members[1].interface, TypeRef::named(derived));
}

#[test]
fn test_existing_public_member_counts_as_implemented() {
    let mut arena = SymbolArena::new();
    let iface = arena.add_interface("I");
    arena.add_method(iface, "A", TypeRef::void(), Vec::new());
    arena.add_method(iface, "B", TypeRef::int(), vec![Parameter::new("x", TypeRef::string())]);
    let class = arena
        .build_type("C", TypeKind::Class)
        .interface(TypeRef::named(iface))
        .finish();
    arena.add_method(class, "A", TypeRef::void(), Vec::new());
    // Same name, different parameter type: does not implement B.
    arena.add_method(class, "B", TypeRef::int(), vec![Parameter::new("x", TypeRef::int())]);

    let members = unimplemented_members(&arena, class, &TypeRef::named(iface));

    assert_eq!(names(&members), vec!["B"]);
}

#[test]
fn test_non_public_member_does_not_implement() {
    let mut arena = SymbolArena::new();
    let iface = arena.add_interface("I");
    arena.add_method(iface, "A", TypeRef::void(), Vec::new());
    let class = arena
        .build_type("C", TypeKind::Class)
        .interface(TypeRef::named(iface))
        .finish();
    arena
        .build_member(
            class,
            "A",
            MemberKind::Method(MethodSignature::new(TypeRef::void(), Vec::new())),
        )
        .accessibility(Accessibility::Private)
        .finish();

    let members = unimplemented_members(&arena, class, &TypeRef::named(iface));

    assert_eq!(names(&members), vec!["A"]);
}

#[test]
fn test_explicit_implementation_in_base_class_is_honored() {
    let mut arena = SymbolArena::new();
    let iface = arena.add_interface("I");
    let a = arena.add_method(iface, "A", TypeRef::void(), Vec::new());
    arena.add_method(iface, "B", TypeRef::void(), Vec::new());
    let base = arena.add_class("Base");
    arena
        .build_member(
            base,
            "A",
            MemberKind::Method(MethodSignature::new(TypeRef::void(), Vec::new())),
        )
        .accessibility(Accessibility::Private)
        .implements_explicitly(TypeRef::named(iface), a)
        .finish();
    let class = arena
        .build_type("C", TypeKind::Class)
        .base(TypeRef::named(base))
        .interface(TypeRef::named(iface))
        .finish();

    let members = unimplemented_members(&arena, class, &TypeRef::named(iface));

    assert_eq!(names(&members), vec!["B"]);
}

#[test]
fn test_property_needs_every_required_accessor() {
    let mut arena = SymbolArena::new();
    let iface = arena.add_interface("I");
    arena.add_property(iface, "P", PropertySignature::get_set(TypeRef::int()));
    let class = arena
        .build_type("C", TypeKind::Class)
        .interface(TypeRef::named(iface))
        .finish();
    arena.add_property(class, "P", PropertySignature::get_only(TypeRef::int()));

    let members = unimplemented_members(&arena, class, &TypeRef::named(iface));

    assert_eq!(names(&members), vec!["P"]);
}

#[test]
fn test_default_and_static_members_are_filtered() {
    let mut arena = SymbolArena::new();
    let iface = arena.add_interface("I");
    arena
        .build_member(
            iface,
            "WithBody",
            MemberKind::Method(MethodSignature::new(TypeRef::void(), Vec::new())),
        )
        .with_body()
        .finish();
    arena
        .build_member(
            iface,
            "Helper",
            MemberKind::Method(MethodSignature::new(TypeRef::void(), Vec::new())),
        )
        .modifiers(MemberModifiers::STATIC)
        .finish();
    arena
        .build_member(
            iface,
            "Create",
            MemberKind::Method(MethodSignature::new(TypeRef::void(), Vec::new())),
        )
        .modifiers(MemberModifiers::STATIC | MemberModifiers::ABSTRACT)
        .finish();
    arena.add_method(iface, "Run", TypeRef::void(), Vec::new());

    let class = arena
        .build_type("C", TypeKind::Class)
        .interface(TypeRef::named(iface))
        .finish();
    let other = arena
        .build_type("IOther", TypeKind::Interface)
        .interface(TypeRef::named(iface))
        .finish();

    let for_class = unimplemented_members(&arena, class, &TypeRef::named(iface));
    let for_interface = unimplemented_members(&arena, other, &TypeRef::named(iface));

    assert_eq!(names(&for_class), vec!["Create", "Run"]);
    assert!(for_class[0].is_static());
    assert_eq!(names(&for_interface), vec!["Run"]);
}

#[test]
fn test_same_signature_from_two_interfaces_is_flattened_once() {
    let mut arena = SymbolArena::new();
    let left = arena.add_interface("ILeft");
    arena.add_method(left, "M", TypeRef::void(), Vec::new());
    let right = arena.add_interface("IRight");
    arena.add_method(right, "M", TypeRef::void(), Vec::new());
    let both = arena
        .build_type("IBoth", TypeKind::Interface)
        .interface(TypeRef::named(left))
        .interface(TypeRef::named(right))
        .finish();
    let class = arena
        .build_type("C", TypeKind::Class)
        .interface(TypeRef::named(both))
        .finish();

    let groups = unimplemented_member_groups(&arena, class, &TypeRef::named(both));
    let members = unimplemented_members(&arena, class, &TypeRef::named(both));

    assert_eq!(groups.len(), 2);
    assert_eq!(names(&members), vec!["M"]);
}

#[test]
fn test_members_are_substituted_through_the_instantiation() {
    let mut arena = SymbolArena::new();
    let core = CoreLibrary::install(&mut arena);
    let class = arena
        .build_type("C", TypeKind::Class)
        .interface(TypeRef::generic(core.ireadonly_list, vec![TypeRef::string()]))
        .finish();

    let members = unimplemented_members(
        &arena,
        class,
        &TypeRef::generic(core.ireadonly_list, vec![TypeRef::string()]),
    );

    assert_eq!(
        names(&members),
        vec!["GetEnumerator", "GetEnumerator", "Count", "this[]"]
    );
    assert_eq!(
        members[1].kind.value_type(),
        &TypeRef::generic(core.ienumerator_t, vec![TypeRef::string()])
    );
    assert_eq!(members[3].kind.value_type(), &TypeRef::string());
}

#[test]
fn test_value_type_argument_drops_nullable_annotation() {
    let mut arena = SymbolArena::new();
    let core = CoreLibrary::install(&mut arena);
    let iequatable_int = TypeRef::generic(core.iequatable, vec![TypeRef::int()]);
    let class = arena
        .build_type("C", TypeKind::Class)
        .interface(iequatable_int.clone())
        .finish();

    let members = unimplemented_members(&arena, class, &iequatable_int);

    assert_eq!(members.len(), 1);
    assert_eq!(members[0].kind.parameters()[0].ty, TypeRef::int());
}

#[test]
fn test_nothing_missing_is_empty_not_an_error() {
    let mut arena = SymbolArena::new();
    let iface = arena.add_interface("I");
    arena.add_method(iface, "A", TypeRef::void(), Vec::new());
    let class = arena
        .build_type("C", TypeKind::Class)
        .interface(TypeRef::named(iface))
        .finish();
    arena.add_method(class, "A", TypeRef::void(), Vec::new());

    assert!(unimplemented_member_groups(&arena, class, &TypeRef::named(iface)).is_empty());
}
