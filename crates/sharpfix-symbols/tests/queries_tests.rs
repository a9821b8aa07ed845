use super::*;
use crate::queries::{all_interfaces, base_class_chain, implements_interface, interface_closure};

#[test]
fn test_interface_closure_lists_bases_first() {
    let mut arena = SymbolArena::new();
    let core = CoreLibrary::install(&mut arena);

    let list_of_int = TypeRef::generic(core.ireadonly_list, vec![TypeRef::int()]);
    let closure = interface_closure(&arena, &list_of_int);

    assert_eq!(
        closure,
        vec![
            TypeRef::named(core.ienumerable),
            TypeRef::generic(core.ienumerable_t, vec![TypeRef::int()]),
            TypeRef::generic(core.ireadonly_collection, vec![TypeRef::int()]),
            list_of_int,
        ]
    );
}

#[test]
fn test_diamond_interfaces_appear_once() {
    let mut arena = SymbolArena::new();
    let root = arena.add_interface("IRoot");
    let left = arena
        .build_type("ILeft", TypeKind::Interface)
        .interface(TypeRef::named(root))
        .finish();
    let right = arena
        .build_type("IRight", TypeKind::Interface)
        .interface(TypeRef::named(root))
        .finish();
    let both = arena
        .build_type("IBoth", TypeKind::Interface)
        .interface(TypeRef::named(left))
        .interface(TypeRef::named(right))
        .finish();

    let closure = interface_closure(&arena, &TypeRef::named(both));

    assert_eq!(
        closure,
        vec![
            TypeRef::named(root),
            TypeRef::named(left),
            TypeRef::named(right),
            TypeRef::named(both),
        ]
    );
}

#[test]
fn test_cyclic_interfaces_terminate() {
    let mut arena = SymbolArena::new();
    let a = arena.add_interface("IA");
    let b = arena
        .build_type("IB", TypeKind::Interface)
        .interface(TypeRef::named(a))
        .finish();
    if let Some(symbol) = arena.type_mut(a) {
        symbol.interfaces.push(TypeRef::named(b));
    }

    let closure = interface_closure(&arena, &TypeRef::named(a));

    assert!(closure.contains(&TypeRef::named(a)));
    assert!(closure.contains(&TypeRef::named(b)));
}

#[test]
fn test_interfaces_inherited_from_base_class() {
    let mut arena = SymbolArena::new();
    let core = CoreLibrary::install(&mut arena);
    let base = arena
        .build_type("Base", TypeKind::Class)
        .interface(TypeRef::named(core.idisposable))
        .finish();
    let derived = arena
        .build_type("Derived", TypeKind::Class)
        .base(TypeRef::named(base))
        .finish();

    let derived_ref = TypeRef::named(derived);
    assert_eq!(base_class_chain(&arena, &derived_ref), vec![TypeRef::named(base)]);
    assert_eq!(
        all_interfaces(&arena, &derived_ref),
        vec![TypeRef::named(core.idisposable)]
    );
    assert!(implements_interface(
        &arena,
        &derived_ref,
        &TypeRef::named(core.idisposable)
    ));
}

#[test]
fn test_equivalence_ignores_sugar() {
    let mut arena = SymbolArena::new();
    let core = CoreLibrary::install(&mut arena);

    let named = TypeRef::tuple([(TypeRef::int(), Some("a")), (TypeRef::int(), Some("b"))]);
    let unnamed = TypeRef::tuple([(TypeRef::int(), None), (TypeRef::int(), None)]);
    assert!(types_equivalent(&arena, &named, &unnamed));

    assert!(types_equivalent(
        &arena,
        &TypeRef::special(SpecialType::Dynamic),
        &TypeRef::object()
    ));
    let exception = TypeRef::named(core.exception);
    assert!(types_equivalent(
        &arena,
        &TypeRef::nullable(exception.clone()),
        &exception
    ));
    assert!(!types_equivalent(
        &arena,
        &TypeRef::nullable(TypeRef::int()),
        &TypeRef::int()
    ));
}

#[test]
fn test_method_type_parameters_match_by_position() {
    let arena = SymbolArena::new();
    let a = SymbolArena::method_param_ref(MemberId(1), 0, "T");
    let b = SymbolArena::method_param_ref(MemberId(7), 0, "U");
    let c = SymbolArena::method_param_ref(MemberId(7), 1, "V");

    assert!(types_equivalent(&arena, &a, &b));
    assert!(!types_equivalent(&arena, &a, &c));
}

#[test]
fn test_collision_requires_matching_ref_kinds() {
    let arena = SymbolArena::new();
    let by_value = MemberKind::Method(MethodSignature::new(
        TypeRef::void(),
        vec![Parameter::new("x", TypeRef::int())],
    ));
    let by_ref = MemberKind::Method(MethodSignature::new(
        TypeRef::int(),
        vec![Parameter::new("y", TypeRef::int()).with_ref_kind(RefKind::Ref)],
    ));
    let other_return = MemberKind::Method(MethodSignature::new(
        TypeRef::string(),
        vec![Parameter::new("z", TypeRef::int())],
    ));

    assert!(!signatures_collide(&arena, &by_value, &by_ref));
    assert!(signatures_collide(&arena, &by_value, &other_return));
    assert!(!signatures_equivalent(&arena, &by_value, &other_return));
}

#[test]
fn test_friend_assembly_sees_internals() {
    let mut arena = SymbolArena::new();
    arena.add_assembly(AssemblySymbol {
        name: "Lib".to_string(),
        is_core_library: false,
        internals_visible_to: vec!["App".to_string()],
    });
    let hidden = arena
        .build_type("Hidden", TypeKind::Class)
        .assembly("Lib")
        .accessibility(Accessibility::Internal)
        .finish();

    assert!(is_type_accessible_from(&arena, hidden, "App"));
    assert!(!is_type_accessible_from(&arena, hidden, "Other"));
}
