//! A small slice of the framework's core library.
//!
//! Hosts with a real compilation map these types from metadata. Fixtures and
//! the CLI install this slice so that well-known types (`IDisposable`,
//! `NotImplementedException`, the attribute classes) resolve.

use crate::arena::SymbolArena;
use crate::symbols::{
    AssemblySymbol, MemberKind, MethodSignature, Parameter, PropertySignature, TypeKind,
    TypeParameter, Variance,
};
use crate::types::{
    MemberId, MemberModifiers, TypeModifiers, TypeParameterOwner, TypeRef, TypeSymbolId,
};
use crate::well_known::{COMPILER_SERVICES, INTEROP_SERVICES, SYSTEM};

pub const CORE_ASSEMBLY: &str = "System.Runtime";

const COLLECTIONS: &str = "System.Collections";
const GENERIC_COLLECTIONS: &str = "System.Collections.Generic";

/// Ids of the installed types.
#[derive(Clone, Copy, Debug)]
pub struct CoreLibrary {
    pub exception: TypeSymbolId,
    pub not_implemented_exception: TypeSymbolId,
    pub idisposable: TypeSymbolId,
    pub idisposable_dispose: MemberId,
    pub gc: TypeSymbolId,
    pub event_handler: TypeSymbolId,
    pub attribute: TypeSymbolId,
    pub obsolete_attribute: TypeSymbolId,
    pub flags_attribute: TypeSymbolId,
    pub param_array_attribute: TypeSymbolId,
    pub iequatable: TypeSymbolId,
    pub ienumerable: TypeSymbolId,
    pub ienumerator: TypeSymbolId,
    pub ienumerable_t: TypeSymbolId,
    pub ienumerator_t: TypeSymbolId,
    pub ireadonly_collection: TypeSymbolId,
    pub ireadonly_list: TypeSymbolId,
    pub tuple_element_names_attribute: TypeSymbolId,
    pub nullable_attribute: TypeSymbolId,
    pub date_time_constant_attribute: TypeSymbolId,
    pub com_import_attribute: TypeSymbolId,
    pub guid_attribute: TypeSymbolId,
    pub optional_attribute: TypeSymbolId,
}

impl CoreLibrary {
    pub fn install(arena: &mut SymbolArena) -> Self {
        arena.add_assembly(AssemblySymbol {
            name: CORE_ASSEMBLY.to_string(),
            is_core_library: true,
            internals_visible_to: Vec::new(),
        });

        let class = |arena: &mut SymbolArena, ns: &str, name: &str| {
            arena
                .build_type(name, TypeKind::Class)
                .namespace(ns)
                .assembly(CORE_ASSEMBLY)
                .finish()
        };
        let interface = |arena: &mut SymbolArena, ns: &str, name: &str| {
            arena
                .build_type(name, TypeKind::Interface)
                .namespace(ns)
                .assembly(CORE_ASSEMBLY)
                .finish()
        };

        let exception = class(arena, SYSTEM, "Exception");
        let not_implemented_exception = arena
            .build_type("NotImplementedException", TypeKind::Class)
            .namespace(SYSTEM)
            .assembly(CORE_ASSEMBLY)
            .base(TypeRef::named(exception))
            .finish();

        let idisposable = interface(arena, SYSTEM, "IDisposable");
        let idisposable_dispose = arena
            .build_member(
                idisposable,
                "Dispose",
                MemberKind::Method(MethodSignature::new(TypeRef::void(), Vec::new())),
            )
            .modifiers(MemberModifiers::ABSTRACT)
            .finish();

        let gc = arena
            .build_type("GC", TypeKind::Class)
            .namespace(SYSTEM)
            .assembly(CORE_ASSEMBLY)
            .modifiers(TypeModifiers::STATIC | TypeModifiers::ABSTRACT | TypeModifiers::SEALED)
            .finish();

        let event_handler = arena
            .build_type("EventHandler", TypeKind::Delegate)
            .namespace(SYSTEM)
            .assembly(CORE_ASSEMBLY)
            .finish();

        let attribute = class(arena, SYSTEM, "Attribute");
        let attribute_class = |arena: &mut SymbolArena, ns: &str, name: &str| {
            arena
                .build_type(name, TypeKind::Class)
                .namespace(ns)
                .assembly(CORE_ASSEMBLY)
                .modifiers(TypeModifiers::SEALED)
                .base(TypeRef::named(attribute))
                .finish()
        };
        let obsolete_attribute = attribute_class(arena, SYSTEM, "ObsoleteAttribute");
        let flags_attribute = attribute_class(arena, SYSTEM, "FlagsAttribute");
        let param_array_attribute = attribute_class(arena, SYSTEM, "ParamArrayAttribute");
        let tuple_element_names_attribute =
            attribute_class(arena, COMPILER_SERVICES, "TupleElementNamesAttribute");
        let nullable_attribute = attribute_class(arena, COMPILER_SERVICES, "NullableAttribute");
        let date_time_constant_attribute =
            attribute_class(arena, COMPILER_SERVICES, "DateTimeConstantAttribute");
        let com_import_attribute = attribute_class(arena, INTEROP_SERVICES, "ComImportAttribute");
        let guid_attribute = attribute_class(arena, INTEROP_SERVICES, "GuidAttribute");
        let optional_attribute = attribute_class(arena, INTEROP_SERVICES, "OptionalAttribute");

        let iequatable = generic_interface(arena, SYSTEM, "IEquatable", Variance::In);
        let t = type_param(iequatable);
        let equals = arena.add_method(
            iequatable,
            "Equals",
            TypeRef::bool(),
            vec![Parameter::new("other", TypeRef::nullable(t))],
        );
        mark_abstract(arena, equals);

        let ienumerator = interface(arena, COLLECTIONS, "IEnumerator");
        let current = arena.add_property(ienumerator, "Current", PropertySignature::get_only(TypeRef::object()));
        let move_next = arena.add_method(ienumerator, "MoveNext", TypeRef::bool(), Vec::new());
        let reset = arena.add_method(ienumerator, "Reset", TypeRef::void(), Vec::new());
        for m in [current, move_next, reset] {
            mark_abstract(arena, m);
        }

        let ienumerable = interface(arena, COLLECTIONS, "IEnumerable");
        let get_enumerator =
            arena.add_method(ienumerable, "GetEnumerator", TypeRef::named(ienumerator), Vec::new());
        mark_abstract(arena, get_enumerator);

        let ienumerator_t = generic_interface(arena, GENERIC_COLLECTIONS, "IEnumerator", Variance::Out);
        if let Some(symbol) = arena.type_mut(ienumerator_t) {
            symbol.interfaces = vec![TypeRef::named(idisposable), TypeRef::named(ienumerator)];
        }
        let current_t = arena.add_property(
            ienumerator_t,
            "Current",
            PropertySignature::get_only(type_param(ienumerator_t)),
        );
        mark_abstract(arena, current_t);

        let ienumerable_t = generic_interface(arena, GENERIC_COLLECTIONS, "IEnumerable", Variance::Out);
        if let Some(symbol) = arena.type_mut(ienumerable_t) {
            symbol.interfaces = vec![TypeRef::named(ienumerable)];
        }
        let get_enumerator_t = arena.add_method(
            ienumerable_t,
            "GetEnumerator",
            TypeRef::generic(ienumerator_t, vec![type_param(ienumerable_t)]),
            Vec::new(),
        );
        mark_abstract(arena, get_enumerator_t);

        let ireadonly_collection =
            generic_interface(arena, GENERIC_COLLECTIONS, "IReadOnlyCollection", Variance::Out);
        if let Some(symbol) = arena.type_mut(ireadonly_collection) {
            symbol.interfaces = vec![TypeRef::generic(
                ienumerable_t,
                vec![type_param(ireadonly_collection)],
            )];
        }
        let count = arena.add_property(
            ireadonly_collection,
            "Count",
            PropertySignature::get_only(TypeRef::int()),
        );
        mark_abstract(arena, count);

        let ireadonly_list = generic_interface(arena, GENERIC_COLLECTIONS, "IReadOnlyList", Variance::Out);
        if let Some(symbol) = arena.type_mut(ireadonly_list) {
            symbol.interfaces = vec![TypeRef::generic(
                ireadonly_collection,
                vec![type_param(ireadonly_list)],
            )];
        }
        arena
            .build_member(
                ireadonly_list,
                "this[]",
                MemberKind::Indexer(
                    PropertySignature::get_only(type_param(ireadonly_list))
                        .with_parameters(vec![Parameter::new("index", TypeRef::int())]),
                ),
            )
            .modifiers(MemberModifiers::ABSTRACT)
            .finish();

        Self {
            exception,
            not_implemented_exception,
            idisposable,
            idisposable_dispose,
            gc,
            event_handler,
            attribute,
            obsolete_attribute,
            flags_attribute,
            param_array_attribute,
            iequatable,
            ienumerable,
            ienumerator,
            ienumerable_t,
            ienumerator_t,
            ireadonly_collection,
            ireadonly_list,
            tuple_element_names_attribute,
            nullable_attribute,
            date_time_constant_attribute,
            com_import_attribute,
            guid_attribute,
            optional_attribute,
        }
    }
}

fn generic_interface(arena: &mut SymbolArena, ns: &str, name: &str, variance: Variance) -> TypeSymbolId {
    let mut param = TypeParameter::new("T");
    param.variance = variance;
    arena
        .build_type(name, TypeKind::Interface)
        .namespace(ns)
        .assembly(CORE_ASSEMBLY)
        .type_parameter(param)
        .finish()
}

fn type_param(owner: TypeSymbolId) -> TypeRef {
    TypeRef::type_param(TypeParameterOwner::Type { symbol: owner }, 0, "T")
}

fn mark_abstract(arena: &mut SymbolArena, member: MemberId) {
    if let Some(m) = arena.member_mut(member) {
        m.modifiers |= MemberModifiers::ABSTRACT;
    }
}
