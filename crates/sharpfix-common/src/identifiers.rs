//! C# identifier escaping.
//!
//! Symbol names are stored unescaped. Generated code escapes a name with `@`
//! only when it is a reserved keyword; contextual keywords (`var`, `async`,
//! `record`, ...) are valid identifiers and stay as-is.

/// Reserved C# keywords, sorted for binary search.
const RESERVED_KEYWORDS: &[&str] = &[
    "abstract",
    "as",
    "base",
    "bool",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "checked",
    "class",
    "const",
    "continue",
    "decimal",
    "default",
    "delegate",
    "do",
    "double",
    "else",
    "enum",
    "event",
    "explicit",
    "extern",
    "false",
    "finally",
    "fixed",
    "float",
    "for",
    "foreach",
    "goto",
    "if",
    "implicit",
    "in",
    "int",
    "interface",
    "internal",
    "is",
    "lock",
    "long",
    "namespace",
    "new",
    "null",
    "object",
    "operator",
    "out",
    "override",
    "params",
    "private",
    "protected",
    "public",
    "readonly",
    "ref",
    "return",
    "sbyte",
    "sealed",
    "short",
    "sizeof",
    "stackalloc",
    "static",
    "string",
    "struct",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "uint",
    "ulong",
    "unchecked",
    "unsafe",
    "ushort",
    "using",
    "virtual",
    "void",
    "volatile",
    "while",
];

pub fn is_reserved_keyword(name: &str) -> bool {
    RESERVED_KEYWORDS.binary_search(&name).is_ok()
}

/// Render `name` as it must appear in source.
///
/// A leading `@` on an ordinary identifier is dropped; reserved keywords get
/// one.
pub fn escape_identifier(name: &str) -> String {
    let bare = name.strip_prefix('@').unwrap_or(name);
    if is_reserved_keyword(bare) {
        format!("@{bare}")
    } else {
        bare.to_string()
    }
}
