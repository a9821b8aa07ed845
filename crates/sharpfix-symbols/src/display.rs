//! Rendering type references as C# source text.
//!
//! Rendering is relative to a `NameScope`: the namespaces imported by the
//! target document and the namespace the target type lives in. A type whose
//! namespace is not in scope is either qualified or, when imports are being
//! added, recorded as a required import and rendered by its simple name.

use crate::database::SymbolDatabase;
use crate::queries::is_value_type;
use crate::types::{TypeRef, TypeSymbolId};
use indexmap::IndexSet;
use sharpfix_common::escape_identifier;
use sharpfix_common::limits::MAX_TYPE_NESTING_DEPTH;

/// Names visible at the insertion point.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameScope {
    /// Namespaces named by `using` directives in the document.
    pub imported_namespaces: Vec<String>,
    /// Namespace of the target type declaration (empty for global).
    pub containing_namespace: String,
    /// Add `using` directives instead of qualifying names.
    pub add_imports: bool,
    /// Nullable reference types are enabled in the document.
    pub nullable_enabled: bool,
}

impl NameScope {
    /// Whether types in `namespace` can be named without qualification.
    pub fn is_namespace_in_scope(&self, namespace: &str) -> bool {
        if namespace.is_empty() || self.imported_namespaces.iter().any(|n| n == namespace) {
            return true;
        }
        let containing = self.containing_namespace.as_str();
        containing == namespace
            || containing
                .strip_prefix(namespace)
                .is_some_and(|rest| rest.starts_with('.'))
    }
}

/// Renders types and collects the imports the rendered text relies on.
pub struct TypeDisplay<'a> {
    db: &'a dyn SymbolDatabase,
    scope: &'a NameScope,
    required_imports: IndexSet<String>,
}

impl<'a> TypeDisplay<'a> {
    pub fn new(db: &'a dyn SymbolDatabase, scope: &'a NameScope) -> Self {
        Self {
            db,
            scope,
            required_imports: IndexSet::new(),
        }
    }

    pub fn scope(&self) -> &NameScope {
        self.scope
    }

    /// Namespaces that must be imported for the rendered text to bind, in
    /// first-use order.
    pub fn required_imports(&self) -> &IndexSet<String> {
        &self.required_imports
    }

    pub fn into_required_imports(self) -> IndexSet<String> {
        self.required_imports
    }

    pub fn display(&mut self, ty: &TypeRef) -> String {
        let mut out = String::new();
        self.write_type(ty, &mut out, 0);
        out
    }

    /// Name of a named type (no type arguments), qualified as needed.
    pub fn display_symbol(&mut self, symbol: TypeSymbolId) -> String {
        let mut out = String::new();
        self.write_symbol_name(symbol, &mut out);
        out
    }

    /// Name of a top-level type given by namespace and name, for types the
    /// database may not contain (`System.GC`).
    pub fn display_name(&mut self, namespace: &str, name: &str) -> String {
        if let Some(id) = self.db.find_type(namespace, name, 0) {
            return self.display_symbol(id);
        }
        if self.scope.is_namespace_in_scope(namespace) {
            name.to_string()
        } else if self.scope.add_imports {
            self.required_imports.insert(namespace.to_string());
            name.to_string()
        } else {
            format!("{namespace}.{name}")
        }
    }

    fn write_type(&mut self, ty: &TypeRef, out: &mut String, depth: u32) {
        if depth > MAX_TYPE_NESTING_DEPTH {
            out.push('?');
            return;
        }
        let depth = depth + 1;
        match ty {
            TypeRef::Special { special } => out.push_str(special.keyword()),
            TypeRef::Named { symbol, args } => {
                self.write_symbol_name(*symbol, out);
                if !args.is_empty() {
                    out.push('<');
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            out.push_str(", ");
                        }
                        self.write_type(arg, out, depth);
                    }
                    out.push('>');
                }
            }
            TypeRef::TypeParameter { param } => out.push_str(&escape_identifier(&param.name)),
            TypeRef::Array { element, rank } => {
                self.write_type(element, out, depth);
                out.push('[');
                for _ in 1..*rank {
                    out.push(',');
                }
                out.push(']');
            }
            TypeRef::Pointer { pointee } => {
                self.write_type(pointee, out, depth);
                out.push('*');
            }
            TypeRef::Nullable { underlying } => {
                self.write_type(underlying, out, depth);
                if self.scope.nullable_enabled || is_value_type(self.db, underlying) {
                    out.push('?');
                }
            }
            TypeRef::Tuple { elements } => {
                out.push('(');
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        out.push_str(", ");
                    }
                    self.write_type(&element.ty, out, depth);
                    if let Some(name) = &element.name {
                        out.push(' ');
                        out.push_str(&escape_identifier(name));
                    }
                }
                out.push(')');
            }
            TypeRef::Error { name } => out.push_str(name),
        }
    }

    fn write_symbol_name(&mut self, symbol: TypeSymbolId, out: &mut String) {
        let Some(decl) = self.db.type_symbol(symbol) else {
            out.push_str("object");
            return;
        };
        match decl.containing_type {
            Some(outer) => {
                self.write_symbol_name(outer, out);
                out.push('.');
            }
            None => {
                if !self.scope.is_namespace_in_scope(&decl.namespace) {
                    if self.scope.add_imports {
                        self.required_imports.insert(decl.namespace.clone());
                    } else {
                        out.push_str(&decl.namespace);
                        out.push('.');
                    }
                }
            }
        }
        out.push_str(&escape_identifier(&decl.name));
    }
}
