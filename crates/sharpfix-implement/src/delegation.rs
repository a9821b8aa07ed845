//! Implementing an interface by forwarding to a member of the type.
//!
//! A field `IList<int> inner;` lets `class C : IList<int>` implement every
//! member as `inner.Member(...)`. A candidate whose type only has some of
//! the members forwards those and throws for the rest.

use crate::context::ImplementContext;
use crate::ir::{ArgNode, ExprNode};
use crate::query::InterfaceMember;
use serde::{Deserialize, Serialize};
use sharpfix_common::escape_identifier;
use sharpfix_symbols::queries::{base_class_chain, implements_interface};
use sharpfix_symbols::{
    Accessibility, MemberKind, MemberModifiers, Parameter, SymbolDatabase, TypeDisplay, TypeKind,
    TypeRef, TypeSubstitution, signatures_equivalent, types_equivalent,
};
use smallvec::SmallVec;
use tracing::{debug, trace};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DelegationKind {
    Field,
    Property,
    PrimaryConstructorParameter,
}

/// A member of the target type that generated members can forward to.
#[derive(Clone, Debug, PartialEq)]
pub struct DelegationCandidate {
    pub name: String,
    pub ty: TypeRef,
    pub kind: DelegationKind,
    pub is_static: bool,
    /// The candidate's type implements the requested interface.
    pub implements_interface: bool,
    /// Forwarding goes through `((I)name)` because some member is only
    /// reachable through the interface.
    pub needs_cast: bool,
}

impl DelegationCandidate {
    /// Whether `member` can be forwarded to this candidate. Static
    /// interface members are never forwarded.
    pub fn forwards(&self, db: &dyn SymbolDatabase, member: &InterfaceMember) -> bool {
        if member.is_static() || self.is_static {
            return false;
        }
        self.implements_interface || has_public_member(db, self.ty.without_nullable(), member)
    }

    /// The receiver expression: `name` or `((I)name)`.
    pub fn receiver(&self, display: &mut TypeDisplay<'_>, interface: &TypeRef) -> ExprNode {
        let target = ExprNode::ident(escape_identifier(&self.name));
        if self.needs_cast {
            ExprNode::Cast {
                ty: display.display(interface),
                expr: Box::new(target),
            }
        } else {
            target
        }
    }
}

/// Candidates in declaration order: fields and properties, then primary
/// constructor parameters.
pub fn find_targets(ctx: &ImplementContext<'_>, members: &[InterfaceMember]) -> Vec<DelegationCandidate> {
    let db = ctx.db;
    let target_type = ctx.target_type();

    let mut raw: Vec<(String, TypeRef, DelegationKind, bool)> = Vec::new();
    for (_, member) in db.members_of(ctx.target) {
        if member.is_explicit_implementation() {
            continue;
        }
        let is_static = member.is_static() || member.modifiers.contains(MemberModifiers::CONST);
        match &member.kind {
            MemberKind::Field(field) => {
                raw.push((member.name.clone(), field.ty.clone(), DelegationKind::Field, is_static));
            }
            MemberKind::Property(prop) if prop.getter.is_some() => {
                raw.push((member.name.clone(), prop.ty.clone(), DelegationKind::Property, is_static));
            }
            _ => {}
        }
    }
    for param in &ctx.symbol.primary_constructor {
        raw.push((
            param.name.clone(),
            param.ty.clone(),
            DelegationKind::PrimaryConstructorParameter,
            false,
        ));
    }

    let instance_members: SmallVec<[&InterfaceMember; 8]> =
        members.iter().filter(|m| !m.is_static()).collect();
    let mut candidates = Vec::new();
    for (name, ty, kind, is_static) in raw {
        if types_equivalent(db, ty.without_nullable(), &target_type) {
            trace!(candidate = %name, "skipped: forwarding would recurse");
            continue;
        }
        let implements = implements_interface(db, ty.without_nullable(), &ctx.interface);
        let needs_cast = implements
            && instance_members
                .iter()
                .any(|m| !has_public_member(db, ty.without_nullable(), m));
        let candidate = DelegationCandidate {
            name,
            ty,
            kind,
            is_static,
            implements_interface: implements,
            needs_cast,
        };
        if instance_members.iter().any(|m| candidate.forwards(db, m)) {
            candidates.push(candidate);
        }
    }
    debug!(
        target = %db.qualified_name(ctx.target),
        candidates = candidates.len(),
        "delegation candidates"
    );
    candidates
}

/// Whether `ty` has a public member that `receiver.Member` would bind to
/// for `member`. Interface-typed receivers expose every member of their
/// closure; type parameters and arrays expose none without a cast.
fn has_public_member(db: &dyn SymbolDatabase, ty: &TypeRef, member: &InterfaceMember) -> bool {
    let Some((symbol, _)) = ty.as_named() else {
        return false;
    };
    let Some(decl) = db.type_symbol(symbol) else {
        return false;
    };
    if decl.kind == TypeKind::Interface {
        return implements_interface(db, ty, &member.interface);
    }
    let mut chain = vec![ty.clone()];
    chain.extend(base_class_chain(db, ty));
    chain.iter().any(|current| {
        let Some((id, _)) = current.as_named() else {
            return false;
        };
        let subst = TypeSubstitution::for_type(db, current);
        db.members_of(id).into_iter().any(|(_, candidate)| {
            candidate.accessibility == Accessibility::Public
                && !candidate.is_explicit_implementation()
                && candidate.name == member.name
                && candidate.is_static() == member.is_static()
                && signatures_equivalent(db, &subst.apply_member(db, &candidate.kind), &member.kind)
        })
    })
}

/// `receiver.Name<T>(a, ref b)`
pub fn forward_call(
    receiver: ExprNode,
    name: &str,
    type_arguments: &[String],
    parameters: &[Parameter],
) -> ExprNode {
    let callee_name = if type_arguments.is_empty() {
        escape_identifier(name)
    } else {
        format!("{}<{}>", escape_identifier(name), type_arguments.join(", "))
    };
    ExprNode::call(ExprNode::member(receiver, callee_name), arguments(parameters))
}

/// `receiver[a, b]`
pub fn forward_element(receiver: ExprNode, parameters: &[Parameter]) -> ExprNode {
    ExprNode::Element {
        receiver: Box::new(receiver),
        args: arguments(parameters),
    }
}

fn arguments(parameters: &[Parameter]) -> Vec<ArgNode> {
    parameters
        .iter()
        .map(|p| ArgNode {
            name: None,
            modifier: p.ref_kind.argument_prefix(),
            value: ExprNode::ident(escape_identifier(&p.name)),
        })
        .collect()
}
