//! The `IDisposable` pattern: a guard field, `Dispose(bool)`, a commented
//! finalizer and a `Dispose()` that calls into both.

use crate::context::ImplementContext;
use crate::ir::{ArgNode, BodyNode, DeclNode, ExprNode, MemberNode, ParamNode, StmtNode};
use crate::query::InterfaceMember;
use crate::synthesis::{BodyKind, SynthesizedMember};
use rustc_hash::FxHashSet;
use sharpfix_common::escape_identifier;
use sharpfix_common::limits::MAX_NAME_SUFFIX;
use sharpfix_symbols::well_known::{SYSTEM, is_idisposable};
use sharpfix_symbols::{
    Accessibility, ExplicitImplementation, FieldSignature, MemberKind, MemberModifiers,
    MemberSymbol, MethodSignature, Parameter, SpecialType, SymbolDatabase, TypeDisplay, TypeRef,
};
use sharpfix_syntax::MemberDeclarationKind;
use tracing::debug;

const GUARD_FIELD: &str = "disposedValue";
const DISPOSE: &str = "Dispose";
const DISPOSING: &str = "disposing";
const DO_NOT_CHANGE: &str =
    "Do not change this code. Put cleanup code in 'Dispose(bool disposing)' method";

/// `void Dispose()` of `System.IDisposable`.
pub fn is_dispose_member(db: &dyn SymbolDatabase, member: &InterfaceMember) -> bool {
    member.name == DISPOSE
        && !member.is_static()
        && is_idisposable(db, &member.interface)
        && matches!(
            &member.kind,
            MemberKind::Method(sig)
                if sig.parameters.is_empty()
                    && sig.type_parameters.is_empty()
                    && sig.return_type.is_void()
        )
}

/// The pattern is offered for classes implementing `IDisposable.Dispose()`
/// that do not declare `Dispose(bool)` already.
pub fn applies(ctx: &ImplementContext<'_>, members: &[InterfaceMember]) -> bool {
    ctx.is_class()
        && members.iter().any(|m| is_dispose_member(ctx.db, m))
        && !declares_dispose_bool(ctx)
}

fn declares_dispose_bool(ctx: &ImplementContext<'_>) -> bool {
    ctx.db
        .members_named(ctx.target, DISPOSE)
        .into_iter()
        .any(|(_, m)| match &m.kind {
            MemberKind::Method(sig) => {
                sig.parameters.len() == 1
                    && sig.parameters[0].ty.as_special() == Some(SpecialType::Bool)
            }
            _ => false,
        })
}

/// Name of the guard field. `disposedValue` (with the configured private
/// field prefix) unless a member already uses it, then `disposedValue1`,
/// `disposedValue2`, ...
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisposeState {
    pub field_name: String,
}

impl DisposeState {
    pub fn choose(ctx: &ImplementContext<'_>, taken: &FxHashSet<String>) -> Self {
        let base = format!("{}{GUARD_FIELD}", ctx.options.naming.private_field_prefix);
        let in_use = |name: &str| {
            taken.contains(name)
                || ctx.db.members_named(ctx.target, name).into_iter().next().is_some()
        };
        let field_name = if in_use(&base) {
            (1..=MAX_NAME_SUFFIX)
                .map(|n| format!("{base}{n}"))
                .find(|name| !in_use(name))
                .unwrap_or(base)
        } else {
            base
        };
        Self { field_name }
    }
}

/// The three pattern members plus the guard field, in that order of
/// appearance: field, `Dispose(bool)`, `Dispose()`.
pub fn pattern_members(
    ctx: &ImplementContext<'_>,
    display: &mut TypeDisplay<'_>,
    member: &InterfaceMember,
    explicit: bool,
    taken: &FxHashSet<String>,
) -> Vec<SynthesizedMember> {
    let state = DisposeState::choose(ctx, taken);
    debug!(field = %state.field_name, explicit, "dispose pattern");
    vec![
        guard_field(ctx, &state),
        dispose_bool(ctx, &state),
        dispose(ctx, display, member, explicit),
    ]
}

fn guard_field(ctx: &ImplementContext<'_>, state: &DisposeState) -> SynthesizedMember {
    let mut symbol = MemberSymbol::new(
        state.field_name.clone(),
        ctx.target,
        MemberKind::Field(FieldSignature {
            ty: TypeRef::bool(),
            constant: None,
        }),
    );
    symbol.accessibility = Accessibility::Private;
    SynthesizedMember {
        node: MemberNode {
            leading_comments: Vec::new(),
            attributes: Vec::new(),
            modifiers: vec!["private"],
            decl: DeclNode::Field {
                ty: "bool".to_string(),
                name: escape_identifier(&state.field_name),
                initializer: None,
            },
        },
        group: MemberDeclarationKind::Field,
        name: state.field_name.clone(),
        symbol,
        body: BodyKind::None,
    }
}

fn dispose_bool(ctx: &ImplementContext<'_>, state: &DisposeState) -> SynthesizedMember {
    let sealed = ctx.symbol.is_sealed();
    let guard = escape_identifier(&state.field_name);
    let body = vec![StmtNode::If {
        condition: ExprNode::Not(Box::new(ExprNode::ident(guard.clone()))),
        then: vec![
            StmtNode::If {
                condition: ExprNode::ident(DISPOSING),
                then: vec![StmtNode::Comment(
                    "TODO: dispose managed state (managed objects)".to_string(),
                )],
            },
            StmtNode::Blank,
            StmtNode::Comment(
                "TODO: free unmanaged resources (unmanaged objects) and override finalizer"
                    .to_string(),
            ),
            StmtNode::Comment("TODO: set large fields to null".to_string()),
            StmtNode::Expr(ExprNode::assign(
                ExprNode::ident(guard),
                "=",
                ExprNode::Literal("true".to_string()),
            )),
        ],
    }];

    let mut symbol = MemberSymbol::new(
        DISPOSE,
        ctx.target,
        MemberKind::Method(MethodSignature::new(
            TypeRef::void(),
            vec![Parameter::new(DISPOSING, TypeRef::bool())],
        )),
    );
    if sealed {
        symbol.accessibility = Accessibility::Private;
    } else {
        symbol.accessibility = Accessibility::Protected;
        symbol.modifiers = MemberModifiers::VIRTUAL;
    }

    SynthesizedMember {
        node: MemberNode {
            leading_comments: Vec::new(),
            attributes: Vec::new(),
            modifiers: if sealed {
                vec!["private"]
            } else {
                vec!["protected", "virtual"]
            },
            decl: DeclNode::Method {
                return_type: "void".to_string(),
                explicit_interface: None,
                name: DISPOSE.to_string(),
                type_parameters: Vec::new(),
                parameters: vec![ParamNode {
                    attributes: Vec::new(),
                    modifier: "",
                    ty: "bool".to_string(),
                    name: DISPOSING.to_string(),
                    default: None,
                }],
                constraints: Vec::new(),
                body: BodyNode::Block(body),
            },
        },
        group: MemberDeclarationKind::Method,
        name: DISPOSE.to_string(),
        symbol,
        body: BodyKind::Statements,
    }
}

fn dispose(
    ctx: &ImplementContext<'_>,
    display: &mut TypeDisplay<'_>,
    member: &InterfaceMember,
    explicit: bool,
) -> SynthesizedMember {
    let type_name = escape_identifier(&ctx.symbol.name);
    let leading_comments = vec![
        "// // TODO: override finalizer only if 'Dispose(bool disposing)' has code to free unmanaged resources".to_string(),
        format!("// ~{type_name}()"),
        "// {".to_string(),
        format!("//     // {DO_NOT_CHANGE}"),
        "//     Dispose(disposing: false);".to_string(),
        "// }".to_string(),
        String::new(),
    ];
    let gc = display.display_name(SYSTEM, "GC");
    let body = vec![
        StmtNode::Comment(DO_NOT_CHANGE.to_string()),
        StmtNode::Expr(ExprNode::call(
            ExprNode::ident(DISPOSE),
            vec![ArgNode::named(DISPOSING, ExprNode::Literal("true".to_string()))],
        )),
        StmtNode::Expr(ExprNode::call(
            ExprNode::member(ExprNode::ident(gc), "SuppressFinalize"),
            vec![ArgNode::positional(ExprNode::This)],
        )),
    ];

    let mut symbol = MemberSymbol::new(DISPOSE, ctx.target, member.kind.clone());
    if explicit {
        symbol.accessibility = Accessibility::Private;
        symbol.explicit_implementations.push(ExplicitImplementation {
            interface: member.interface.clone(),
            member: member.id,
        });
    }

    SynthesizedMember {
        node: MemberNode {
            leading_comments,
            attributes: Vec::new(),
            modifiers: if explicit { Vec::new() } else { vec!["public"] },
            decl: DeclNode::Method {
                return_type: "void".to_string(),
                explicit_interface: explicit.then(|| display.display(&member.interface)),
                name: DISPOSE.to_string(),
                type_parameters: Vec::new(),
                parameters: Vec::new(),
                constraints: Vec::new(),
                body: BodyNode::Block(body),
            },
        },
        group: MemberDeclarationKind::Method,
        name: DISPOSE.to_string(),
        symbol,
        body: BodyKind::Statements,
    }
}
