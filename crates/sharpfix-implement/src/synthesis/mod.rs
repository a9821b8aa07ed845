//! Member synthesis: one declaration per missing interface member.
//!
//! Synthesis works on substituted signatures and produces `MemberNode`s
//! with every type already rendered for the target document. Each generated
//! member also carries the `MemberSymbol` it declares, so fix-all can commit
//! it to the symbol overlay before the next fix runs.
//!
//! Implicit members can be forced to explicit form when the implicit form
//! would not compile: the member is not accessible from the target's
//! assembly, its name is the type's name, a constraint stops being
//! expressible after substitution, or the name clashes with an existing or
//! earlier generated member.

pub mod attributes;
pub mod body;
pub mod constraints;
pub mod defaults;
pub mod generics;

use crate::context::ImplementContext;
use crate::delegation::{DelegationCandidate, forward_call, forward_element};
use crate::dispose;
use crate::ir::{AccessorKeyword, AccessorNode, BodyNode, DeclNode, ExprNode, MemberNode, ParamNode};
use crate::options::PropertyGenerationBehavior;
use crate::query::{InterfaceMember, InterfaceMemberGroup};
use crate::strategy::Strategy;
use attributes::{copied_attributes, is_optional, optional_marker};
use body::{BodyAction, auto_accessors, not_implemented, property_body};
use defaults::render_default;
use indexmap::IndexSet;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use sharpfix_common::escape_identifier;
use sharpfix_symbols::well_known::SYSTEM;
use sharpfix_symbols::{
    Accessibility, ExplicitImplementation, MemberKind, MemberModifiers, MemberSymbol,
    Parameter, PropertySignature, RefKind, SymbolDatabase, TypeDisplay, signatures_collide,
    signatures_equivalent,
};
use sharpfix_syntax::MemberDeclarationKind;
use std::mem::discriminant;
use tracing::{debug, trace};

/// What a generated member's body does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BodyKind {
    Throw,
    Abstract,
    AutoAccessors,
    Forward,
    /// Hand-written statements (the dispose pattern).
    Statements,
    /// Fields and field-like events.
    None,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SynthesizedMember {
    pub node: MemberNode,
    /// Placement group.
    pub group: MemberDeclarationKind,
    pub name: String,
    /// The symbol the declaration introduces.
    pub symbol: MemberSymbol,
    pub body: BodyKind,
}

impl SynthesizedMember {
    pub fn is_explicit(&self) -> bool {
        self.symbol.is_explicit_implementation()
    }
}

/// Generated members in declaration order plus the namespaces their text
/// needs imported.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Synthesis {
    pub members: Vec<SynthesizedMember>,
    pub required_imports: IndexSet<String>,
}

/// Generate members for `groups` under `strategy`.
pub fn synthesize(
    ctx: &ImplementContext<'_>,
    groups: &[InterfaceMemberGroup],
    strategy: &Strategy,
) -> Synthesis {
    let mut display = ctx.display();
    let mut synthesizer = Synthesizer {
        ctx,
        strategy,
        reserved: ctx.type_parameter_names(),
        implicit: Vec::new(),
        exception: None,
    };

    let mut members = Vec::new();
    let mut dispose_member = None;
    for group in groups {
        for member in &group.members {
            if strategy.uses_dispose_pattern()
                && dispose_member.is_none()
                && dispose::is_dispose_member(ctx.db, member)
            {
                dispose_member = Some(member);
                continue;
            }
            if let Some(generated) = synthesizer.member(&mut display, member) {
                members.push(generated);
            }
        }
    }
    if let Some(member) = dispose_member {
        let taken: FxHashSet<String> = members.iter().map(|m| m.name.clone()).collect();
        members.extend(dispose::pattern_members(
            ctx,
            &mut display,
            member,
            strategy.is_explicit(),
            &taken,
        ));
    }

    debug!(
        target = %ctx.db.qualified_name(ctx.target),
        strategy = %strategy.title,
        members = members.len(),
        "synthesized"
    );
    Synthesis {
        members,
        required_imports: display.into_required_imports(),
    }
}

/// How one member is being generated.
#[derive(Clone, Copy)]
struct Form<'s> {
    explicit: bool,
    abstractly: bool,
    forward: Option<&'s DelegationCandidate>,
}

struct Synthesizer<'c, 's> {
    ctx: &'c ImplementContext<'c>,
    strategy: &'s Strategy,
    /// Type parameter names of the target and its containing types.
    reserved: FxHashSet<String>,
    /// Implicit members generated so far: name, static, signature.
    implicit: Vec<(String, bool, MemberKind)>,
    /// Rendered `NotImplementedException`, once needed.
    exception: Option<String>,
}

impl<'c, 's> Synthesizer<'c, 's> {
    fn db(&self) -> &'c dyn SymbolDatabase {
        self.ctx.db
    }

    fn member(
        &mut self,
        display: &mut TypeDisplay<'_>,
        member: &InterfaceMember,
    ) -> Option<SynthesizedMember> {
        let db = self.db();
        let kind = generics::rename_type_parameters(db, member.id, &member.kind, &self.reserved);
        let explicit = self.strategy.is_explicit() || self.forced_explicit(member, &kind);
        if !explicit {
            let merged = self.implicit.iter().any(|(name, is_static, earlier)| {
                *name == member.name
                    && *is_static == member.is_static()
                    && signatures_equivalent(db, earlier, &kind)
            });
            if merged {
                trace!(member = %member.name, "merged with an earlier implicit member");
                return None;
            }
            self.implicit
                .push((member.name.clone(), member.is_static(), kind.clone()));
        }
        let strategy: &'s Strategy = self.strategy;
        let form = Form {
            explicit,
            abstractly: strategy.is_abstract() && !explicit && !member.is_static(),
            forward: strategy
                .delegation
                .as_ref()
                .filter(|candidate| candidate.forwards(db, member)),
        };
        trace!(
            member = %member.name,
            kind = member.kind.describe(),
            explicit = form.explicit,
            abstractly = form.abstractly,
            forward = form.forward.is_some(),
            "synthesizing"
        );

        let (decl, group, body) = match &kind {
            MemberKind::Method(_) => self.method(display, member, &kind, form),
            MemberKind::Operator(_) => self.operator(display, member, &kind, form),
            MemberKind::Property(prop) => {
                self.property(display, member, prop, MemberDeclarationKind::Property, form)
            }
            MemberKind::Indexer(prop) => {
                self.property(display, member, prop, MemberDeclarationKind::Indexer, form)
            }
            MemberKind::Event(_) => self.event(display, member, &kind, form),
            MemberKind::Field(_) | MemberKind::Constructor(_) => {
                trace!(member = %member.name, "not an implementable member shape");
                return None;
            }
        }?;

        let mut attributes = copied_attributes(
            db,
            display,
            &member.attributes,
            self.ctx.assembly(),
            false,
        );
        if let MemberKind::Method(sig) = &kind {
            attributes.extend(
                copied_attributes(db, display, &sig.return_attributes, self.ctx.assembly(), false)
                    .into_iter()
                    .map(|a| format!("return: {a}")),
            );
        }

        Some(SynthesizedMember {
            node: MemberNode {
                leading_comments: Vec::new(),
                attributes,
                modifiers: modifiers(member, &kind, form),
                decl,
            },
            group,
            name: member.name.clone(),
            symbol: self.symbol(member, kind, form),
            body,
        })
    }

    /// Whether the implicit form of `member` would not compile.
    fn forced_explicit(&self, member: &InterfaceMember, kind: &MemberKind) -> bool {
        let db = self.db();
        let reason = if !member.is_accessible_from(db, self.ctx.assembly()) {
            Some("inaccessible")
        } else if member.name == self.ctx.symbol.name {
            Some("named like the type")
        } else if let MemberKind::Method(sig) = kind
            && sig
                .type_parameters
                .iter()
                .any(|p| constraints::is_inexpressible(db, &p.constraints))
        {
            Some("inexpressible constraint")
        } else if self.conflicts_with_existing(member, kind) {
            Some("conflicts with an existing member")
        } else if self.conflicts_with_earlier(member, kind) {
            Some("conflicts with another generated member")
        } else {
            None
        };
        if let Some(reason) = reason {
            debug!(member = %member.name, reason, "implementing explicitly");
        }
        reason.is_some()
    }

    fn conflicts_with_existing(&self, member: &InterfaceMember, kind: &MemberKind) -> bool {
        let db = self.db();
        db.members_named(self.ctx.target, &member.name)
            .into_iter()
            .any(|(_, existing)| {
                !existing.is_explicit_implementation()
                    && (discriminant(&existing.kind) != discriminant(kind)
                        || signatures_collide(db, &existing.kind, kind))
            })
    }

    fn conflicts_with_earlier(&self, member: &InterfaceMember, kind: &MemberKind) -> bool {
        let db = self.db();
        self.implicit.iter().any(|(name, is_static, earlier)| {
            *name == member.name
                && (discriminant(earlier) != discriminant(kind)
                    || (signatures_collide(db, earlier, kind)
                        && !(*is_static == member.is_static()
                            && signatures_equivalent(db, earlier, kind))))
        })
    }

    fn throw(&mut self, display: &mut TypeDisplay<'_>) -> BodyAction {
        let exception = self
            .exception
            .get_or_insert_with(|| display.display_name(SYSTEM, "NotImplementedException"));
        BodyAction::Throw(not_implemented(exception))
    }

    // =========================================================================
    // Member shapes
    // =========================================================================

    fn method(
        &mut self,
        display: &mut TypeDisplay<'_>,
        member: &InterfaceMember,
        kind: &MemberKind,
        form: Form<'_>,
    ) -> Option<(DeclNode, MemberDeclarationKind, BodyKind)> {
        let MemberKind::Method(sig) = kind else {
            return None;
        };
        let nullable_enabled = self.ctx.document.nullable_enabled;
        let type_parameters: Vec<String> = sig
            .type_parameters
            .iter()
            .map(|p| escape_identifier(&p.name))
            .collect();
        let constraints = sig
            .type_parameters
            .iter()
            .enumerate()
            .filter_map(|(ordinal, param)| {
                if form.explicit {
                    let mentions =
                        generics::mentions_nullable_type_parameter(kind, member.id, ordinal as u32);
                    constraints::explicit_clause(param, mentions)
                } else {
                    constraints::implicit_clause(display, param, nullable_enabled)
                }
            })
            .collect();
        let parameters = self.parameters(display, &sig.parameters, form.explicit);
        let return_type = format!(
            "{}{}",
            sig.return_ref_kind.return_prefix(),
            display.display(&sig.return_type)
        );

        let prefer_expression = self
            .ctx
            .options
            .expression_body_preferences
            .methods
            .when_possible();
        let (body, body_kind) = if form.abstractly {
            (BodyNode::Semicolon, BodyKind::Abstract)
        } else if let Some(candidate) = form.forward {
            let receiver = candidate.receiver(display, &member.interface);
            let call = forward_call(receiver, &member.name, &type_parameters, &sig.parameters);
            let action = if sig.return_type.is_void() {
                BodyAction::Run(call)
            } else if sig.return_ref_kind != RefKind::None {
                BodyAction::Return(ExprNode::Ref(Box::new(call)))
            } else {
                BodyAction::Return(call)
            };
            (action.into_body(prefer_expression), BodyKind::Forward)
        } else {
            (
                self.throw(display).into_body(prefer_expression),
                BodyKind::Throw,
            )
        };

        Some((
            DeclNode::Method {
                return_type,
                explicit_interface: form
                    .explicit
                    .then(|| display.display(&member.interface)),
                name: escape_identifier(&member.name),
                type_parameters,
                parameters,
                constraints,
                body,
            },
            MemberDeclarationKind::Method,
            body_kind,
        ))
    }

    /// Operators and conversions always get a throwing body.
    fn operator(
        &mut self,
        display: &mut TypeDisplay<'_>,
        member: &InterfaceMember,
        kind: &MemberKind,
        form: Form<'_>,
    ) -> Option<(DeclNode, MemberDeclarationKind, BodyKind)> {
        let MemberKind::Operator(op) = kind else {
            return None;
        };
        let parameters = self.parameters(display, &op.signature.parameters, form.explicit);
        let return_type = display.display(&op.signature.return_type);
        let prefer_expression = self
            .ctx
            .options
            .expression_body_preferences
            .operators
            .when_possible();
        let body = self.throw(display).into_body(prefer_expression);
        Some((
            DeclNode::Operator {
                return_type,
                explicit_interface: form
                    .explicit
                    .then(|| display.display(&member.interface)),
                operator: op.operator,
                parameters,
                body,
            },
            MemberDeclarationKind::Operator,
            BodyKind::Throw,
        ))
    }

    fn property(
        &mut self,
        display: &mut TypeDisplay<'_>,
        member: &InterfaceMember,
        prop: &PropertySignature,
        group: MemberDeclarationKind,
        form: Form<'_>,
    ) -> Option<(DeclNode, MemberDeclarationKind, BodyKind)> {
        let is_indexer = group == MemberDeclarationKind::Indexer;
        let ty = format!("{}{}", prop.ref_kind.return_prefix(), display.display(&prop.ty));
        let parameters = if is_indexer {
            self.parameters(display, &prop.parameters, form.explicit)
        } else {
            Vec::new()
        };
        let mut keywords: Vec<AccessorKeyword> = Vec::with_capacity(2);
        if prop.getter.is_some() {
            keywords.push(AccessorKeyword::Get);
        }
        if let Some(setter) = &prop.setter {
            keywords.push(if setter.is_init {
                AccessorKeyword::Init
            } else {
                AccessorKeyword::Set
            });
        }

        let options = self.ctx.options;
        let prefs = options.expression_body_preferences;
        let member_expression = if is_indexer {
            prefs.indexers.when_possible()
        } else {
            prefs.properties.when_possible()
        };
        let accessor_expression = prefs.accessors.when_possible();
        let auto = options.property_generation_behavior
            == PropertyGenerationBehavior::PreferAutoProperties
            && !form.explicit
            && !is_indexer
            && !member.is_static()
            && form.forward.is_none()
            && prop.ref_kind == RefKind::None;

        let (body, body_kind) = if form.abstractly {
            (auto_accessors(&keywords), BodyKind::Abstract)
        } else if let Some(candidate) = form.forward {
            let receiver = candidate.receiver(display, &member.interface);
            let access = if is_indexer {
                forward_element(receiver, &prop.parameters)
            } else {
                ExprNode::member(receiver, escape_identifier(&member.name))
            };
            let actions = keywords
                .iter()
                .map(|&keyword| {
                    let action = match keyword {
                        AccessorKeyword::Get if prop.ref_kind != RefKind::None => {
                            BodyAction::Return(ExprNode::Ref(Box::new(access.clone())))
                        }
                        AccessorKeyword::Get => BodyAction::Return(access.clone()),
                        _ => BodyAction::Run(ExprNode::assign(
                            access.clone(),
                            "=",
                            ExprNode::ident("value"),
                        )),
                    };
                    (keyword, action)
                })
                .collect();
            (
                property_body(actions, member_expression, accessor_expression),
                BodyKind::Forward,
            )
        } else if auto {
            (auto_accessors(&keywords), BodyKind::AutoAccessors)
        } else {
            let actions = keywords
                .iter()
                .map(|&keyword| (keyword, self.throw(display)))
                .collect();
            (
                property_body(actions, member_expression, accessor_expression),
                BodyKind::Throw,
            )
        };

        Some((
            DeclNode::Property {
                ty,
                explicit_interface: form
                    .explicit
                    .then(|| display.display(&member.interface)),
                name: if is_indexer {
                    "this".to_string()
                } else {
                    escape_identifier(&member.name)
                },
                parameters,
                body,
            },
            group,
            body_kind,
        ))
    }

    /// Implicit events are field-like unless they forward; explicit events
    /// need `add`/`remove`.
    fn event(
        &mut self,
        display: &mut TypeDisplay<'_>,
        member: &InterfaceMember,
        kind: &MemberKind,
        form: Form<'_>,
    ) -> Option<(DeclNode, MemberDeclarationKind, BodyKind)> {
        let MemberKind::Event(ev) = kind else {
            return None;
        };
        let ty = display.display(&ev.ty);
        let name = escape_identifier(&member.name);
        let accessor_expression = self
            .ctx
            .options
            .expression_body_preferences
            .accessors
            .when_possible();

        let (accessors, body_kind) = if form.abstractly {
            (None, BodyKind::Abstract)
        } else if let Some(candidate) = form.forward {
            let receiver = candidate.receiver(display, &member.interface);
            let target = ExprNode::member(receiver, name.clone());
            let accessor = |keyword: AccessorKeyword, operator: &'static str| AccessorNode {
                keyword,
                body: BodyAction::Run(ExprNode::assign(
                    target.clone(),
                    operator,
                    ExprNode::ident("value"),
                ))
                .into_body(accessor_expression),
            };
            (
                Some(vec![
                    accessor(AccessorKeyword::Add, "+="),
                    accessor(AccessorKeyword::Remove, "-="),
                ]),
                BodyKind::Forward,
            )
        } else if !form.explicit {
            (None, BodyKind::None)
        } else {
            let accessors = [AccessorKeyword::Add, AccessorKeyword::Remove]
                .into_iter()
                .map(|keyword| AccessorNode {
                    keyword,
                    body: self.throw(display).into_body(accessor_expression),
                })
                .collect();
            (Some(accessors), BodyKind::Throw)
        };

        Some((
            DeclNode::Event {
                ty,
                explicit_interface: form
                    .explicit
                    .then(|| display.display(&member.interface)),
                name,
                accessors,
            },
            MemberDeclarationKind::Event,
            body_kind,
        ))
    }

    /// Parameters with defaults (implicit only), copied attributes and the
    /// `[Optional]` marker for optional parameters that carry no constant.
    fn parameters(
        &self,
        display: &mut TypeDisplay<'_>,
        parameters: &[Parameter],
        explicit: bool,
    ) -> Vec<ParamNode> {
        let db = self.db();
        parameters
            .iter()
            .map(|param| {
                let default = match &param.default_value {
                    Some(value) if !explicit => {
                        Some(render_default(db, display, &param.ty, value))
                    }
                    _ => None,
                };
                let mut attributes = copied_attributes(
                    db,
                    display,
                    &param.attributes,
                    self.ctx.assembly(),
                    default.is_some(),
                );
                if param.is_optional
                    && param.default_value.is_none()
                    && !param.attributes.iter().any(|a| is_optional(db, a))
                {
                    attributes.push(optional_marker(display));
                }
                ParamNode {
                    attributes,
                    modifier: if param.is_params {
                        "params "
                    } else {
                        param.ref_kind.parameter_prefix()
                    },
                    ty: display.display(&param.ty),
                    name: escape_identifier(&param.name),
                    default,
                }
            })
            .collect()
    }

    /// The symbol a generated member declares on the target.
    fn symbol(&self, member: &InterfaceMember, mut kind: MemberKind, form: Form<'_>) -> MemberSymbol {
        if let MemberKind::Property(prop) | MemberKind::Indexer(prop) = &mut kind {
            for accessor in [&mut prop.getter, &mut prop.setter].into_iter().flatten() {
                accessor.accessibility = None;
                accessor.has_body = !form.abstractly;
            }
        }
        let mut symbol = MemberSymbol::new(member.name.clone(), self.ctx.target, kind);
        if member.is_static() {
            symbol.modifiers |= MemberModifiers::STATIC;
        }
        if form.abstractly {
            symbol.modifiers |= MemberModifiers::ABSTRACT;
        }
        if form.explicit {
            symbol.accessibility = Accessibility::Private;
            symbol.explicit_implementations.push(ExplicitImplementation {
                interface: member.interface.clone(),
                member: member.id,
            });
        } else {
            symbol.accessibility = Accessibility::Public;
        }
        symbol
    }
}

/// Declaration modifiers. Explicit members carry no accessibility; static
/// members stay static in both forms.
fn modifiers(member: &InterfaceMember, kind: &MemberKind, form: Form<'_>) -> Vec<&'static str> {
    let is_static = member.is_static() || matches!(kind, MemberKind::Operator(_));
    let mut out = Vec::with_capacity(3);
    if !form.explicit {
        out.push("public");
    }
    if is_static {
        out.push("static");
    }
    if form.abstractly {
        out.push("abstract");
    }
    out
}
