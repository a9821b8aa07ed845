use crate::fixtures::{Fixture, empty_class, implementing, program_with};
use sharpfix_symbols::{Accessibility, TypeKind, TypeModifiers, TypeRef, TypeSymbolId};
use sharpfix_syntax::{MemberDeclarationKind, OutlineBuilder, TypeAnchor};

const PATTERN_TITLE: &str = "Implement interface with Dispose pattern";

/// Make `IInterface` extend `IDisposable`.
fn disposable(f: &mut Fixture, iface: TypeSymbolId) {
    if let Some(symbol) = f.arena.type_mut(iface) {
        symbol.interfaces.push(TypeRef::named(f.core.idisposable));
    }
}

/// The generated pattern for `Class`, with the guard field `field`.
fn pattern(field: &str, dispose_bool_modifiers: &str, dispose_header: &str) -> String {
    format!(
        "    private bool {field};

    {dispose_bool_modifiers} void Dispose(bool disposing)
    {{
        if (!{field})
        {{
            if (disposing)
            {{
                // TODO: dispose managed state (managed objects)
            }}

            // TODO: free unmanaged resources (unmanaged objects) and override finalizer
            // TODO: set large fields to null
            {field} = true;
        }}
    }}

    // // TODO: override finalizer only if 'Dispose(bool disposing)' has code to free unmanaged resources
    // ~Class()
    // {{
    //     // Do not change this code. Put cleanup code in 'Dispose(bool disposing)' method
    //     Dispose(disposing: false);
    // }}

    {dispose_header}
    {{
        // Do not change this code. Put cleanup code in 'Dispose(bool disposing)' method
        Dispose(disposing: true);
        GC.SuppressFinalize(this);
    }}"
    )
}

#[test]
fn test_dispose_pattern_for_idisposable() {
    let mut f = Fixture::new();
    let class = f
        .arena
        .build_type("Class", TypeKind::Class)
        .interface(TypeRef::named(f.core.idisposable))
        .finish();
    let text = "using System;\n\nclass Class : IDisposable\n{\n}\n";
    f.add_document(
        OutlineBuilder::new("Program.cs", text)
            .type_decl(TypeAnchor::new(class, "class Class").base("IDisposable")),
    );
    let diagnostic = f.diagnostic("Program.cs", "IDisposable");

    let expected = format!(
        "using System;\n\nclass Class : IDisposable\n{{\n{}\n}}\n",
        pattern("disposedValue", "protected virtual", "public void Dispose()")
    );
    assert_eq!(f.apply_titled(&diagnostic, PATTERN_TITLE), expected);
}

#[test]
fn test_dispose_pattern_through_derived_interface() {
    let (f, diagnostic) = empty_class(disposable);

    assert_eq!(
        f.apply_titled(&diagnostic, PATTERN_TITLE),
        program_with(&pattern(
            "disposedValue",
            "protected virtual",
            "public void Dispose()"
        ))
    );
}

#[test]
fn test_sealed_class_gets_private_dispose_bool() {
    let (f, diagnostic) = implementing(|class| class.modifiers(TypeModifiers::SEALED), disposable);

    assert_eq!(
        f.apply_titled(&diagnostic, PATTERN_TITLE),
        program_with(&pattern("disposedValue", "private", "public void Dispose()"))
    );
}

#[test]
fn test_explicit_dispose_pattern() {
    let (f, diagnostic) = empty_class(disposable);

    assert_eq!(
        f.apply_titled(&diagnostic, "Implement interface explicitly with Dispose pattern"),
        program_with(&pattern(
            "disposedValue",
            "protected virtual",
            "void IDisposable.Dispose()"
        ))
    );
}

#[test]
fn test_guard_field_name_avoids_existing_member() {
    let text = "using System;

class Class : IInterface
{
    private int disposedValue;
}
";
    let mut f = Fixture::new();
    let iface = f.arena.add_interface("IInterface");
    disposable(&mut f, iface);
    let class = f
        .arena
        .build_type("Class", TypeKind::Class)
        .interface(TypeRef::named(iface))
        .finish();
    f.arena
        .add_field(class, "disposedValue", TypeRef::int(), Accessibility::Private);
    f.add_document(
        OutlineBuilder::new("Program.cs", text).type_decl(
            TypeAnchor::new(class, "class Class")
                .base("IInterface")
                .member(MemberDeclarationKind::Field, "private int disposedValue;"),
        ),
    );
    let diagnostic = f.diagnostic("Program.cs", "IInterface");

    let applied = f.apply_titled(&diagnostic, PATTERN_TITLE);

    assert!(applied.contains(
        "    private int disposedValue;\n\n    private bool disposedValue1;\n\n    protected virtual void Dispose(bool disposing)"
    ));
    assert!(applied.contains("        if (!disposedValue1)\n"));
    assert!(applied.contains("            disposedValue1 = true;\n"));
}

#[test]
fn test_guard_field_uses_private_field_prefix() {
    let (mut f, diagnostic) = empty_class(disposable);
    f.options.naming.private_field_prefix = "_".to_string();

    assert_eq!(
        f.apply_titled(&diagnostic, PATTERN_TITLE),
        program_with(&pattern(
            "_disposedValue",
            "protected virtual",
            "public void Dispose()"
        ))
    );
}

#[test]
fn test_other_members_come_before_pattern() {
    let (f, diagnostic) = empty_class(|f, iface| {
        disposable(f, iface);
        f.arena.add_method(iface, "Run", TypeRef::void(), Vec::new());
    });

    let applied = f.apply_titled(&diagnostic, PATTERN_TITLE);

    let field = applied.find("private bool disposedValue;").expect("field");
    let run = applied.find("public void Run()").expect("run");
    let dispose_bool = applied
        .find("protected virtual void Dispose(bool disposing)")
        .expect("dispose(bool)");
    let dispose = applied.find("public void Dispose()").expect("dispose");
    assert!(field < run && run < dispose_bool && dispose_bool < dispose);
}

#[test]
fn test_plain_strategy_throws_from_dispose() {
    let (f, diagnostic) = empty_class(disposable);

    assert_eq!(
        f.apply_titled(&diagnostic, "Implement interface"),
        program_with(
            "    public void Dispose()
    {
        throw new NotImplementedException();
    }"
        )
    );
}
