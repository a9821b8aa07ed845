//! Which attributes travel from an interface member to its implementation.

use sharpfix_symbols::well_known::{
    INTEROP_SERVICES, is_date_time_constant_attribute, is_optional_attribute, is_sugar_attribute,
};
use sharpfix_symbols::{AttributeData, SymbolDatabase, TypeDisplay, is_type_accessible_from};

/// Attributes to restate, rendered without brackets.
///
/// Attributes the target assembly cannot see are dropped, as are those that
/// encode signature sugar. `[Optional]` and `[DateTimeConstant]` are dropped
/// when the default value is written out, since the default says the same.
pub fn copied_attributes(
    db: &dyn SymbolDatabase,
    display: &mut TypeDisplay<'_>,
    attributes: &[AttributeData],
    from_assembly: &str,
    default_rendered: bool,
) -> Vec<String> {
    attributes
        .iter()
        .filter(|a| is_type_accessible_from(db, a.attribute_class, from_assembly))
        .filter(|a| !is_sugar_attribute(db, a.attribute_class))
        .filter(|a| {
            !(default_rendered
                && (is_optional_attribute(db, a.attribute_class)
                    || is_date_time_constant_attribute(db, a.attribute_class)))
        })
        .map(|a| render_attribute(display, a))
        .collect()
}

/// `[Optional]` for an optional parameter whose default cannot be written.
pub fn optional_marker(display: &mut TypeDisplay<'_>) -> String {
    short_name(display.display_name(INTEROP_SERVICES, "OptionalAttribute"))
}

pub fn is_optional(db: &dyn SymbolDatabase, attribute: &AttributeData) -> bool {
    is_optional_attribute(db, attribute.attribute_class)
}

fn render_attribute(display: &mut TypeDisplay<'_>, attribute: &AttributeData) -> String {
    let mut out = short_name(display.display_symbol(attribute.attribute_class));
    let args: Vec<String> = attribute
        .arguments
        .iter()
        .cloned()
        .chain(
            attribute
                .named_arguments
                .iter()
                .map(|(name, value)| format!("{name} = {value}")),
        )
        .collect();
    if !args.is_empty() {
        out.push('(');
        out.push_str(&args.join(", "));
        out.push(')');
    }
    out
}

/// `System.ObsoleteAttribute` is written `System.Obsolete`.
fn short_name(name: String) -> String {
    let last = name.rsplit('.').next().unwrap_or(&name);
    match last.strip_suffix("Attribute") {
        Some(stem) if !stem.is_empty() => {
            let cut = name.len() - "Attribute".len();
            name[..cut].to_string()
        }
        _ => name,
    }
}
