use crate::fixtures::{empty_class, program_with};
use crate::synthesis::defaults::{render_char, render_default, render_integral, render_string};
use sharpfix_symbols::{
    AttributeData, ConstantValue, CoreLibrary, NameScope, Parameter, SpecialType, SymbolArena,
    TypeDisplay, TypeKind, TypeRef, TypeSymbolId,
};

struct Enums {
    arena: SymbolArena,
    color: TypeSymbolId,
    options: TypeSymbolId,
}

/// `Color { Red = 0, Green = 1, Blue = 2 }` and
/// `[Flags] Options { A = 1, B = 2, C = 4 }`.
fn enums() -> Enums {
    let mut arena = SymbolArena::new();
    let core = CoreLibrary::install(&mut arena);
    let color = arena
        .build_type("Color", TypeKind::Enum)
        .enum_underlying(SpecialType::Int32)
        .finish();
    for (name, value) in [("Red", 0), ("Green", 1), ("Blue", 2)] {
        arena.add_enum_member(color, name, ConstantValue::Int(value));
    }
    let options = arena
        .build_type("Options", TypeKind::Enum)
        .enum_underlying(SpecialType::Int32)
        .attribute(AttributeData::new(core.flags_attribute))
        .finish();
    for (name, value) in [("A", 1), ("B", 2), ("C", 4)] {
        arena.add_enum_member(options, name, ConstantValue::Int(value));
    }
    Enums {
        arena,
        color,
        options,
    }
}

fn render(arena: &SymbolArena, ty: &TypeRef, value: ConstantValue) -> String {
    let scope = NameScope::default();
    let mut display = TypeDisplay::new(arena, &scope);
    render_default(arena, &mut display, ty, &value)
}

#[test]
fn test_integral_bounds_use_named_constants() {
    assert_eq!(render_integral(SpecialType::Int32, i128::from(i32::MAX)), "int.MaxValue");
    assert_eq!(render_integral(SpecialType::Int32, i128::from(i32::MIN)), "int.MinValue");
    assert_eq!(render_integral(SpecialType::Int64, i128::from(i64::MIN)), "long.MinValue");
    assert_eq!(render_integral(SpecialType::Byte, 255), "byte.MaxValue");
    assert_eq!(render_integral(SpecialType::UInt32, 0), "0");
    assert_eq!(render_integral(SpecialType::Int16, -3), "-3");
    assert_eq!(render_integral(SpecialType::NInt, 7), "7");
}

#[test]
fn test_unsigned_constant_for_ulong() {
    let arena = SymbolArena::new();
    let ulong = TypeRef::special(SpecialType::UInt64);

    assert_eq!(render(&arena, &ulong, ConstantValue::UInt(u64::MAX)), "ulong.MaxValue");
    assert_eq!(render(&arena, &ulong, ConstantValue::UInt(10)), "10");
}

#[test]
fn test_char_and_string_escapes() {
    assert_eq!(render_char('a'), "'a'");
    assert_eq!(render_char('\''), "'\\''");
    assert_eq!(render_char('\n'), "'\\n'");
    assert_eq!(render_char('\0'), "'\\0'");
    assert_eq!(render_char('\u{1}'), "'\\u0001'");
    assert_eq!(render_string("say \"hi\"\n"), "\"say \\\"hi\\\"\\n\"");
    assert_eq!(render_string("it's"), "\"it's\"");
    assert_eq!(render_string("C:\\tmp"), "\"C:\\\\tmp\"");
}

#[test]
fn test_null_is_default_for_value_types() {
    let arena = SymbolArena::new();

    assert_eq!(render(&arena, &TypeRef::string(), ConstantValue::Null), "null");
    assert_eq!(render(&arena, &TypeRef::int(), ConstantValue::Null), "default");
    assert_eq!(
        render(&arena, &TypeRef::nullable(TypeRef::int()), ConstantValue::Null),
        "null"
    );
}

#[test]
fn test_real_literals() {
    let arena = SymbolArena::new();
    let float = TypeRef::special(SpecialType::Single);
    let double = TypeRef::special(SpecialType::Double);
    let decimal = TypeRef::special(SpecialType::Decimal);

    assert_eq!(render(&arena, &double, ConstantValue::Double(1.5)), "1.5");
    assert_eq!(render(&arena, &double, ConstantValue::Double(1e20)), "1E+20");
    assert_eq!(render(&arena, &double, ConstantValue::Double(f64::NAN)), "double.NaN");
    assert_eq!(
        render(&arena, &double, ConstantValue::Double(f64::NEG_INFINITY)),
        "double.NegativeInfinity"
    );
    assert_eq!(render(&arena, &float, ConstantValue::Single(0.5)), "0.5F");
    assert_eq!(render(&arena, &float, ConstantValue::Single(2.0)), "2");
    assert_eq!(render(&arena, &float, ConstantValue::Single(f32::MAX)), "float.MaxValue");
    assert_eq!(
        render(&arena, &decimal, ConstantValue::Decimal("1.50".to_string())),
        "1.50M"
    );
    assert_eq!(
        render(
            &arena,
            &decimal,
            ConstantValue::Decimal("79228162514264337593543950335".to_string())
        ),
        "decimal.MaxValue"
    );
}

#[test]
fn test_enum_member_by_value() {
    let e = enums();
    let color = TypeRef::named(e.color);

    assert_eq!(render(&e.arena, &color, ConstantValue::Int(1)), "Color.Green");
    assert_eq!(render(&e.arena, &color, ConstantValue::Int(0)), "Color.Red");
    assert_eq!(render(&e.arena, &color, ConstantValue::Int(7)), "(Color)7");
    assert_eq!(render(&e.arena, &color, ConstantValue::Int(-1)), "(Color)(-1)");
    assert_eq!(
        render(&e.arena, &TypeRef::nullable(color), ConstantValue::Null),
        "null"
    );
}

#[test]
fn test_flags_enum_combines_members() {
    let e = enums();
    let options = TypeRef::named(e.options);

    assert_eq!(render(&e.arena, &options, ConstantValue::Int(4)), "Options.C");
    assert_eq!(
        render(&e.arena, &options, ConstantValue::Int(3)),
        "Options.A | Options.B"
    );
    assert_eq!(
        render(&e.arena, &options, ConstantValue::Int(7)),
        "Options.A | Options.B | Options.C"
    );
    assert_eq!(render(&e.arena, &options, ConstantValue::Int(8)), "(Options)8");
    assert_eq!(render(&e.arena, &options, ConstantValue::Int(0)), "0");
}

#[test]
fn test_defaults_written_for_implicit_members_only() {
    let (f, diagnostic) = empty_class(|f, iface| {
        f.arena.add_method(
            iface,
            "M",
            TypeRef::void(),
            vec![
                Parameter::new("count", TypeRef::int()).with_default(ConstantValue::Int(i64::from(i32::MAX))),
                Parameter::new("name", TypeRef::string()).with_default(ConstantValue::String("x".to_string())),
                Parameter::new("flag", TypeRef::bool()).with_default(ConstantValue::Bool(true)),
            ],
        );
    });

    assert_eq!(
        f.apply(&diagnostic, 0),
        program_with(
            "    public void M(int count = int.MaxValue, string name = \"x\", bool flag = true)
    {
        throw new NotImplementedException();
    }"
        )
    );
    assert_eq!(
        f.apply_titled(&diagnostic, "Implement all members explicitly"),
        program_with(
            "    void IInterface.M(int count, string name, bool flag)
    {
        throw new NotImplementedException();
    }"
        )
    );
}

#[test]
fn test_explicit_member_drops_default_without_marker() {
    let (f, diagnostic) = empty_class(|f, iface| {
        f.arena.add_method(
            iface,
            "M",
            TypeRef::void(),
            vec![Parameter::new("x", TypeRef::int()).with_default(ConstantValue::Int(5))],
        );
    });

    assert_eq!(
        f.apply_titled(&diagnostic, "Implement all members explicitly"),
        program_with(
            "    void IInterface.M(int x)
    {
        throw new NotImplementedException();
    }"
        )
    );
}

#[test]
fn test_optional_without_default_gets_marker_and_import() {
    let (f, diagnostic) = empty_class(|f, iface| {
        f.arena.add_method(
            iface,
            "M",
            TypeRef::void(),
            vec![Parameter::new("x", TypeRef::int()).optional()],
        );
    });

    let expected = "using System;
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
