//! Per-request context: the target type, the interface being implemented
//! and the scope generated text is rendered in.

use crate::error::ImplementError;
use crate::options::ImplementOptions;
use rustc_hash::FxHashSet;
use sharpfix_common::Span;
use sharpfix_symbols::{
    NameScope, NamedTypeSymbol, SymbolDatabase, TypeDisplay, TypeKind, TypeRef, TypeSymbolId,
};
use sharpfix_syntax::{SourceDocument, TypeDeclaration};

pub struct ImplementContext<'a> {
    pub db: &'a dyn SymbolDatabase,
    pub document: &'a SourceDocument,
    /// The declaration part whose base list names the interface.
    pub declaration: &'a TypeDeclaration,
    pub target: TypeSymbolId,
    pub symbol: &'a NamedTypeSymbol,
    /// The requested interface, instantiated.
    pub interface: TypeRef,
    pub options: &'a ImplementOptions,
    pub scope: NameScope,
}

impl<'a> ImplementContext<'a> {
    pub fn new(
        db: &'a dyn SymbolDatabase,
        document: &'a SourceDocument,
        declaration: &'a TypeDeclaration,
        interface: TypeRef,
        options: &'a ImplementOptions,
    ) -> Result<Self, ImplementError> {
        let target = declaration.symbol;
        let symbol = db
            .type_symbol(target)
            .ok_or(ImplementError::UnknownType { symbol: target })?;
        let is_interface = interface
            .as_named()
            .and_then(|(id, _)| db.type_symbol(id))
            .is_some_and(|s| s.is_interface());
        if !is_interface {
            return Err(ImplementError::NotAnInterface {
                name: qualified_display(db, &interface),
            });
        }
        let scope = NameScope {
            imported_namespaces: document.imported_namespaces(),
            containing_namespace: declaration.namespace.clone(),
            add_imports: options.add_imports,
            nullable_enabled: document.nullable_enabled,
        };
        Ok(Self {
            db,
            document,
            declaration,
            target,
            symbol,
            interface,
            options,
            scope,
        })
    }

    /// The target type instantiated with its own type parameters.
    pub fn target_type(&self) -> TypeRef {
        crate::query::self_instantiation(self.db, self.target)
    }

    pub fn assembly(&self) -> &'a str {
        &self.symbol.assembly
    }

    pub fn is_class(&self) -> bool {
        self.symbol.kind == TypeKind::Class
    }

    pub fn is_abstract_class(&self) -> bool {
        self.is_class() && self.symbol.is_abstract()
    }

    /// Type parameter names in scope inside the target: its own and those
    /// of every containing type.
    pub fn type_parameter_names(&self) -> FxHashSet<String> {
        let mut names = FxHashSet::default();
        let mut current = Some(self.symbol);
        let mut depth = 0;
        while let Some(symbol) = current {
            names.extend(symbol.type_parameters.iter().map(|p| p.name.clone()));
            depth += 1;
            if depth > sharpfix_common::limits::MAX_TYPE_NESTING_DEPTH {
                break;
            }
            current = symbol.containing_type.and_then(|id| self.db.type_symbol(id));
        }
        names
    }

    /// A renderer for the target document's scope.
    pub fn display(&self) -> TypeDisplay<'_> {
        TypeDisplay::new(self.db, &self.scope)
    }
}

/// Fully qualified rendering, independent of any document.
pub fn qualified_display(db: &dyn SymbolDatabase, ty: &TypeRef) -> String {
    let scope = NameScope {
        nullable_enabled: true,
        ..NameScope::default()
    };
    TypeDisplay::new(db, &scope).display(ty)
}

/// Bind the base-list entry at `span` to one of the target's declared
/// interfaces.
///
/// The host's binding is used when the entry carries one. Otherwise the
/// entry's text is compared with each declared base type rendered in the
/// document's scope and fully qualified, and finally by simple name and
/// arity.
pub fn resolve_base_entry(
    db: &dyn SymbolDatabase,
    document: &SourceDocument,
    declaration: &TypeDeclaration,
    span: Span,
) -> Result<TypeRef, ImplementError> {
    let entry = declaration
        .base_list
        .iter()
        .find(|b| b.span.intersects(span))
        .ok_or_else(|| ImplementError::DiagnosticNotInBaseList {
            document: document.name.clone(),
            span,
        })?;
    if let Some(ty) = &entry.ty {
        return Ok(ty.clone());
    }
    let symbol = db
        .type_symbol(declaration.symbol)
        .ok_or(ImplementError::UnknownType {
            symbol: declaration.symbol,
        })?;

    let written_text = entry.span.text(&document.text);
    let written = normalize(written_text);
    let local_scope = NameScope {
        imported_namespaces: document.imported_namespaces(),
        containing_namespace: declaration.namespace.clone(),
        add_imports: false,
        nullable_enabled: true,
    };
    let candidates: Vec<&TypeRef> = symbol
        .interfaces
        .iter()
        .chain(symbol.base_type.iter())
        .collect();

    let exact = candidates.iter().find(|cand| {
        let local = normalize(&TypeDisplay::new(db, &local_scope).display(cand));
        let qualified = normalize(&qualified_display(db, cand));
        local == written || qualified == written || qualified.ends_with(&format!(".{written}"))
    });
    let found = exact.or_else(|| {
        let (name, arity) = simple_name(&written);
        candidates.iter().find(|cand| {
            cand.as_named()
                .and_then(|(id, _)| db.type_symbol(id))
                .is_some_and(|s| s.name == name && s.arity() == arity)
        })
    });

    match found {
        Some(ty) => {
            let is_interface = ty
                .as_named()
                .and_then(|(id, _)| db.type_symbol(id))
                .is_some_and(|s| s.is_interface());
            if is_interface {
                Ok((**ty).clone())
            } else {
                Err(ImplementError::NotAnInterface {
                    name: written_text.to_string(),
                })
            }
        }
        None => Err(ImplementError::no_action(format!(
            "cannot bind base-list entry '{written_text}'"
        ))),
    }
}

fn normalize(text: &str) -> String {
    let text = text.trim();
    let text = text.strip_prefix("global::").unwrap_or(text);
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != '@')
        .collect()
}

/// Simple name and generic arity of a normalized type name.
fn simple_name(text: &str) -> (&str, usize) {
    let (head, args) = match text.find('<') {
        Some(i) => (&text[..i], Some(&text[i..])),
        None => (text, None),
    };
    let name = head.rsplit('.').next().unwrap_or(head);
    let arity = args.map_or(0, |args| {
        let mut depth = 0i32;
        let mut count = 1;
        for c in args.chars() {
            match c {
                '<' | '(' | '[' => depth += 1,
                '>' | ')' | ']' => depth -= 1,
                ',' if depth == 1 => count += 1,
                _ => {}
            }
        }
        count
    });
    (name, arity)
}
