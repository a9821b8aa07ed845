//! Bodies of generated members.

use crate::ir::{AccessorKeyword, AccessorNode, BodyNode, ExprNode, PropertyBody, StmtNode};

/// What a body or accessor does, independent of block or `=>` form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BodyAction {
    /// `throw new X();` where the expression is the `new X()`.
    Throw(ExprNode),
    /// `return expr;`
    Return(ExprNode),
    /// `expr;`
    Run(ExprNode),
}

impl BodyAction {
    fn statement(self) -> StmtNode {
        match self {
            BodyAction::Throw(expr) => StmtNode::Throw(expr),
            BodyAction::Return(expr) => StmtNode::Return(expr),
            BodyAction::Run(expr) => StmtNode::Expr(expr),
        }
    }

    fn expression(self) -> ExprNode {
        match self {
            BodyAction::Throw(expr) => ExprNode::Throw(Box::new(expr)),
            BodyAction::Return(expr) | BodyAction::Run(expr) => expr,
        }
    }

    /// `{ stmt; }` or `=> expr;`
    pub fn into_body(self, expression_bodied: bool) -> BodyNode {
        if expression_bodied {
            BodyNode::Expression(self.expression())
        } else {
            BodyNode::Block(vec![self.statement()])
        }
    }
}

/// `new NotImplementedException()`, given the rendered exception type.
pub fn not_implemented(exception: &str) -> ExprNode {
    ExprNode::New {
        ty: exception.to_string(),
        args: Vec::new(),
    }
}

/// Body of a property or indexer from per-accessor actions.
///
/// A get-only member collapses to `=> expr;` when `member_expression` is
/// set; otherwise each accessor follows `accessor_expression`.
pub fn property_body(
    mut accessors: Vec<(AccessorKeyword, BodyAction)>,
    member_expression: bool,
    accessor_expression: bool,
) -> PropertyBody {
    let get_only = matches!(accessors.as_slice(), [(AccessorKeyword::Get, _)]);
    if member_expression
        && get_only
        && let Some((_, action)) = accessors.pop()
    {
        return PropertyBody::Expression(action.expression());
    }
    PropertyBody::Accessors(
        accessors
            .into_iter()
            .map(|(keyword, action)| AccessorNode {
                keyword,
                body: action.into_body(accessor_expression),
            })
            .collect(),
    )
}

/// Accessors without bodies: `{ get; set; }`.
pub fn auto_accessors(keywords: &[AccessorKeyword]) -> PropertyBody {
    PropertyBody::Accessors(
        keywords
            .iter()
            .map(|&keyword| AccessorNode {
                keyword,
                body: BodyNode::Semicolon,
            })
            .collect(),
    )
}
