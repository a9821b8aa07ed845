//! Member declaration IR.
//!
//! Synthesis produces these nodes instead of strings; the printer turns
//! them into C# text at a given indentation. Types arrive already rendered
//! (with imports recorded) so the printer never touches the symbol model.
//!
//! # IR Structure
//!
//! A `MemberNode` is one declaration plus its leading comments, attributes
//! and modifiers. Bodies are `BodyNode`s: a `;`, a block of `StmtNode`s or
//! an `=> expression`. Expressions cover what generated bodies need:
//! `throw new X()`, forwarding calls and member access through casts, and
//! the assignments in the dispose pattern.

use sharpfix_symbols::OperatorKind;

/// A generated member declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MemberNode {
    /// Whole comment lines placed above the declaration, `//` included. An
    /// empty entry is a blank line.
    pub leading_comments: Vec<String>,
    /// Attribute lists, each rendered without brackets (`Obsolete("x")`).
    pub attributes: Vec<String>,
    pub modifiers: Vec<&'static str>,
    pub decl: DeclNode,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeclNode {
    // =========================================================================
    // Data
    // =========================================================================
    /// Field: `bool disposedValue;`
    Field {
        ty: String,
        name: String,
        initializer: Option<ExprNode>,
    },

    // =========================================================================
    // Callables
    // =========================================================================
    /// Method: `ret I.Name<T>(params) where T : class { ... }`
    Method {
        /// Return type including any `ref`/`ref readonly` prefix.
        return_type: String,
        explicit_interface: Option<String>,
        name: String,
        type_parameters: Vec<String>,
        parameters: Vec<ParamNode>,
        constraints: Vec<ConstraintNode>,
        body: BodyNode,
    },

    /// Operator or conversion: `C operator +(C x, C y)`,
    /// `implicit operator int(C x)`.
    Operator {
        return_type: String,
        explicit_interface: Option<String>,
        operator: OperatorKind,
        parameters: Vec<ParamNode>,
        body: BodyNode,
    },

    // =========================================================================
    // Properties and events
    // =========================================================================
    /// Property, or an indexer when `parameters` is non-empty.
    Property {
        ty: String,
        explicit_interface: Option<String>,
        name: String,
        parameters: Vec<ParamNode>,
        body: PropertyBody,
    },

    /// Event. Without accessors it is field-like: `event EventHandler E;`
    Event {
        ty: String,
        explicit_interface: Option<String>,
        name: String,
        accessors: Option<Vec<AccessorNode>>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParamNode {
    pub attributes: Vec<String>,
    /// `ref `, `out `, `in `, `ref readonly `, `params `, or empty.
    pub modifier: &'static str,
    pub ty: String,
    pub name: String,
    /// Rendered default value expression.
    pub default: Option<String>,
}

/// `where T : class, IComparable<T>, new()`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConstraintNode {
    pub parameter: String,
    pub constraints: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyBody {
    /// `{ get ...; set ...; }`
    Accessors(Vec<AccessorNode>),
    /// `=> expr;` for get-only properties and indexers.
    Expression(ExprNode),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessorKeyword {
    Get,
    Set,
    Init,
    Add,
    Remove,
}

impl AccessorKeyword {
    pub const fn as_str(self) -> &'static str {
        match self {
            AccessorKeyword::Get => "get",
            AccessorKeyword::Set => "set",
            AccessorKeyword::Init => "init",
            AccessorKeyword::Add => "add",
            AccessorKeyword::Remove => "remove",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessorNode {
    pub keyword: AccessorKeyword,
    pub body: BodyNode,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BodyNode {
    /// No body: abstract members and auto-accessors.
    Semicolon,
    Block(Vec<StmtNode>),
    /// `=> expr;`
    Expression(ExprNode),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StmtNode {
    /// Expression statement: `Dispose(disposing: true);`
    Expr(ExprNode),
    Return(ExprNode),
    Throw(ExprNode),
    If {
        condition: ExprNode,
        then: Vec<StmtNode>,
    },
    /// A `//` comment line, text excluding the slashes.
    Comment(String),
    /// An empty line between statements.
    Blank,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExprNode {
    // =========================================================================
    // Primary
    // =========================================================================
    /// Identifier, already escaped: `value`, `@class`
    Identifier(String),

    /// `this`
    This,

    /// Literal text as it should be printed: `true`, `0`
    Literal(String),

    // =========================================================================
    // Compound
    // =========================================================================
    /// `new T(args)`
    New { ty: String, args: Vec<ArgNode> },

    /// Throw expression: `throw new T()`
    Throw(Box<ExprNode>),

    /// `receiver.name`
    Member { receiver: Box<ExprNode>, name: String },

    /// `callee(args)`
    Call {
        callee: Box<ExprNode>,
        args: Vec<ArgNode>,
    },

    /// `receiver[args]`
    Element {
        receiver: Box<ExprNode>,
        args: Vec<ArgNode>,
    },

    /// `(T)expr`; parenthesized again when used as a receiver.
    Cast { ty: String, expr: Box<ExprNode> },

    /// `!expr`
    Not(Box<ExprNode>),

    /// `ref expr`, the operand of a by-reference return.
    Ref(Box<ExprNode>),

    /// `target op value` with `op` one of `=`, `+=`, `-=`.
    Assign {
        target: Box<ExprNode>,
        operator: &'static str,
        value: Box<ExprNode>,
    },
}

impl ExprNode {
    pub fn ident(name: impl Into<String>) -> Self {
        ExprNode::Identifier(name.into())
    }

    pub fn member(receiver: ExprNode, name: impl Into<String>) -> Self {
        ExprNode::Member {
            receiver: Box::new(receiver),
            name: name.into(),
        }
    }

    pub fn call(callee: ExprNode, args: Vec<ArgNode>) -> Self {
        ExprNode::Call {
            callee: Box::new(callee),
            args,
        }
    }

    pub fn assign(target: ExprNode, operator: &'static str, value: ExprNode) -> Self {
        ExprNode::Assign {
            target: Box::new(target),
            operator,
            value: Box::new(value),
        }
    }

    /// `throw new T()`
    pub fn throw_new(ty: impl Into<String>) -> Self {
        ExprNode::Throw(Box::new(ExprNode::New {
            ty: ty.into(),
            args: Vec::new(),
        }))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArgNode {
    /// Named argument label (`disposing:`).
    pub name: Option<String>,
    /// `ref `, `out `, `in ` or empty.
    pub modifier: &'static str,
    pub value: ExprNode,
}

impl ArgNode {
    pub const fn positional(value: ExprNode) -> Self {
        Self {
            name: None,
            modifier: "",
            value,
        }
    }

    pub fn named(name: impl Into<String>, value: ExprNode) -> Self {
        Self {
            name: Some(name.into()),
            modifier: "",
            value,
        }
    }
}
