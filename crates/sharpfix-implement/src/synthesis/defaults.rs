//! Default parameter values as C# expressions.
//!
//! Values arrive as constants; rendering picks the spelling a person would
//! write: named bounds (`int.MaxValue`), enum members, `null`/`default`.

use sharpfix_symbols::queries::{is_reference_type, is_value_type};
use sharpfix_symbols::well_known::has_flags_attribute;
use sharpfix_symbols::{
    ConstantValue, MemberKind, SpecialType, SymbolDatabase, TypeDisplay, TypeKind, TypeRef,
    TypeSymbolId,
};
use std::fmt::Write as _;

const DECIMAL_MAX: &str = "79228162514264337593543950335";

/// Render `value` as the default of a parameter of type `ty`.
pub fn render_default(
    db: &dyn SymbolDatabase,
    display: &mut TypeDisplay<'_>,
    ty: &TypeRef,
    value: &ConstantValue,
) -> String {
    if matches!(value, ConstantValue::Null) {
        return render_null(db, ty);
    }
    let underlying = ty.without_nullable();
    if let Some((symbol, _)) = underlying.as_named()
        && db.type_symbol(symbol).is_some_and(|s| s.kind == TypeKind::Enum)
        && let Some(raw) = value.as_integral()
    {
        return render_enum(db, display, symbol, raw);
    }
    match underlying.as_special() {
        Some(special) => render_special(special, value),
        None => render_constant(value),
    }
}

/// `null` for references and nullable value types; `default` for value
/// types and type parameters not known to be references.
fn render_null(db: &dyn SymbolDatabase, ty: &TypeRef) -> String {
    let is_default = match ty {
        TypeRef::Nullable { .. } => false,
        TypeRef::TypeParameter { .. } => !is_reference_type(db, ty),
        _ => is_value_type(db, ty),
    };
    let text = if is_default { "default" } else { "null" };
    text.to_string()
}

fn render_special(special: SpecialType, value: &ConstantValue) -> String {
    match (special, value) {
        (SpecialType::Single, ConstantValue::Single(v)) => render_single(*v),
        (SpecialType::Single, ConstantValue::Double(v)) => render_single(*v as f32),
        (SpecialType::Double, ConstantValue::Double(v)) => render_double(*v),
        (SpecialType::Double, ConstantValue::Single(v)) => render_double(f64::from(*v)),
        (SpecialType::Decimal, ConstantValue::Decimal(text)) => render_decimal(text),
        (SpecialType::Char, ConstantValue::Char(c)) => render_char(*c),
        (special, _) if special.is_integral() => match value.as_integral() {
            Some(v) => render_integral(special, v),
            None => render_constant(value),
        },
        (SpecialType::Single | SpecialType::Double | SpecialType::Decimal, _) => {
            match value.as_integral() {
                Some(v) => v.to_string(),
                None => render_constant(value),
            }
        }
        _ => render_constant(value),
    }
}

/// Literal spelling of a constant without a target type.
fn render_constant(value: &ConstantValue) -> String {
    match value {
        ConstantValue::Null => "null".to_string(),
        ConstantValue::Bool(b) => b.to_string(),
        ConstantValue::Char(c) => render_char(*c),
        ConstantValue::String(s) => render_string(s),
        ConstantValue::Int(v) => v.to_string(),
        ConstantValue::UInt(v) => v.to_string(),
        ConstantValue::Single(v) => render_single(*v),
        ConstantValue::Double(v) => render_double(*v),
        ConstantValue::Decimal(text) => render_decimal(text),
    }
}

/// Signed bounds use `MinValue`; every integral type uses `MaxValue`.
/// Unsigned minimums are plain `0`.
pub fn render_integral(special: SpecialType, value: i128) -> String {
    if let Some((min, max)) = special.integral_range() {
        if special.is_signed_integral() && value == min {
            return format!("{}.MinValue", special.keyword());
        }
        if value == max {
            return format!("{}.MaxValue", special.keyword());
        }
    }
    value.to_string()
}

fn render_single(v: f32) -> String {
    if v.is_nan() {
        return "float.NaN".to_string();
    }
    if v == f32::INFINITY {
        return "float.PositiveInfinity".to_string();
    }
    if v == f32::NEG_INFINITY {
        return "float.NegativeInfinity".to_string();
    }
    if v == f32::MIN {
        return "float.MinValue".to_string();
    }
    if v == f32::MAX {
        return "float.MaxValue".to_string();
    }
    if v == f32::from_bits(1) {
        return "float.Epsilon".to_string();
    }
    let text = real_literal(format!("{v}"), format!("{v:e}"), f64::from(v).abs());
    if text.contains(['.', 'E']) {
        format!("{text}F")
    } else {
        text
    }
}

fn render_double(v: f64) -> String {
    if v.is_nan() {
        return "double.NaN".to_string();
    }
    if v == f64::INFINITY {
        return "double.PositiveInfinity".to_string();
    }
    if v == f64::NEG_INFINITY {
        return "double.NegativeInfinity".to_string();
    }
    if v == f64::MIN {
        return "double.MinValue".to_string();
    }
    if v == f64::MAX {
        return "double.MaxValue".to_string();
    }
    if v == f64::from_bits(1) {
        return "double.Epsilon".to_string();
    }
    real_literal(format!("{v}"), format!("{v:e}"), v.abs())
}

/// Shortest round-trip text. Very large or very small magnitudes switch to
/// `1.5E+20` notation.
fn real_literal(plain: String, scientific: String, magnitude: f64) -> String {
    if magnitude != 0.0 && !(1e-5..1e15).contains(&magnitude) {
        let (mantissa, exponent) = scientific
            .split_once('e')
            .unwrap_or((scientific.as_str(), "0"));
        let (sign, digits) = match exponent.strip_prefix('-') {
            Some(rest) => ('-', rest),
            None => ('+', exponent),
        };
        return format!("{mantissa}E{sign}{digits:0>2}");
    }
    plain
}

fn render_decimal(text: &str) -> String {
    let trimmed = text.trim();
    match trimmed.strip_prefix('-') {
        Some(DECIMAL_MAX) => "decimal.MinValue".to_string(),
        _ if trimmed == DECIMAL_MAX => "decimal.MaxValue".to_string(),
        _ => format!("{trimmed}M"),
    }
}

pub fn render_char(c: char) -> String {
    match c {
        '\'' => "'\\''".to_string(),
        other => format!("'{}'", escape_char(other)),
    }
}

pub fn render_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\'' => out.push('\''),
            other => out.push_str(&escape_char(other)),
        }
    }
    out.push('"');
    out
}

/// Escapes shared by char and string literals. Quotes are handled by the
/// caller.
fn escape_char(c: char) -> String {
    match c {
        '\0' => "\\0".to_string(),
        '\u{7}' => "\\a".to_string(),
        '\u{8}' => "\\b".to_string(),
        '\u{c}' => "\\f".to_string(),
        '\n' => "\\n".to_string(),
        '\r' => "\\r".to_string(),
        '\t' => "\\t".to_string(),
        '\u{b}' => "\\v".to_string(),
        '\\' => "\\\\".to_string(),
        '\u{2028}' | '\u{2029}' => format!("\\u{:04x}", u32::from(c)),
        c if c.is_control() => format!("\\u{:04x}", u32::from(c)),
        c => c.to_string(),
    }
}

/// Enum default: a member with exactly the value, then an OR of `[Flags]`
/// members, then `0`, then a cast.
fn render_enum(
    db: &dyn SymbolDatabase,
    display: &mut TypeDisplay<'_>,
    symbol: TypeSymbolId,
    value: i128,
) -> String {
    let enum_members = enum_constants(db, symbol);
    if let Some((name, _)) = enum_members.iter().find(|(_, v)| *v == value) {
        let enum_name = display.display_symbol(symbol);
        return format!("{enum_name}.{name}");
    }
    if has_flags_attribute(db, symbol)
        && let Some(parts) = flags_decomposition(&enum_members, value)
    {
        let enum_name = display.display_symbol(symbol);
        let mut out = String::new();
        for (i, name) in parts.iter().enumerate() {
            if i > 0 {
                out.push_str(" | ");
            }
            let _ = write!(out, "{enum_name}.{name}");
        }
        return out;
    }
    if value == 0 {
        return "0".to_string();
    }
    let enum_name = display.display_symbol(symbol);
    if value < 0 {
        format!("({enum_name})({value})")
    } else {
        format!("({enum_name}){value}")
    }
}

fn enum_constants(db: &dyn SymbolDatabase, symbol: TypeSymbolId) -> Vec<(String, i128)> {
    db.members_of(symbol)
        .into_iter()
        .filter_map(|(_, m)| match &m.kind {
            MemberKind::Field(field) => field
                .constant
                .as_ref()
                .and_then(ConstantValue::as_integral)
                .map(|v| (m.name.clone(), v)),
            _ => None,
        })
        .collect()
}

/// Members whose bits OR to exactly `value`, largest first when picking and
/// listed in ascending value order. `None` when no exact cover exists.
fn flags_decomposition(members: &[(String, i128)], value: i128) -> Option<Vec<String>> {
    if value <= 0 {
        return None;
    }
    let mut candidates: Vec<&(String, i128)> = members
        .iter()
        .filter(|(_, v)| *v > 0 && (*v & value) == *v)
        .collect();
    candidates.sort_by(|a, b| b.1.cmp(&a.1));

    let mut remaining = value;
    let mut picked: Vec<&(String, i128)> = Vec::new();
    for candidate in candidates {
        if remaining & candidate.1 != 0 {
            remaining &= !candidate.1;
            picked.push(candidate);
        }
        if remaining == 0 {
            break;
        }
    }
    if remaining != 0 {
        return None;
    }
    picked.sort_by_key(|(_, v)| *v);
    Some(picked.into_iter().map(|(name, _)| name.clone()).collect())
}
