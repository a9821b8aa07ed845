//! The code actions offered for one missing interface, in presentation
//! order.

use crate::context::{ImplementContext, qualified_display};
use crate::delegation::{self, DelegationCandidate};
use crate::dispose;
use crate::options::ImplementOptions;
use crate::query::InterfaceMember;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    ImplementInterface,
    ImplementInterfaceWithDisposePattern,
}

impl ActionKind {
    pub const fn name(self) -> &'static str {
        match self {
            ActionKind::ImplementInterface => "ImplementInterfaceCodeAction",
            ActionKind::ImplementInterfaceWithDisposePattern => {
                "ImplementInterfaceWithDisposePatternCodeAction"
            }
        }
    }
}

/// The interface a strategy implements, independent of any document.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceIdentity {
    /// Fully qualified rendering, `System.Collections.Generic.IList<int>`.
    pub display: String,
    pub assembly: String,
}

/// Stable identity of a strategy. Fix-all applies the strategy with the
/// same identity to every diagnostic.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyIdentity {
    pub explicitly: bool,
    pub abstractly: bool,
    pub throw_only: bool,
    pub interface: InterfaceIdentity,
    pub action: ActionKind,
    pub through_member: Option<String>,
}

impl StrategyIdentity {
    /// `explicit;abstract;throwOnly:interface;assembly;Action;through`
    pub fn key(&self) -> String {
        fn flag(value: bool) -> &'static str {
            if value { "True" } else { "False" }
        }
        format!(
            "{};{};{}:{};{};{};{}",
            flag(self.explicitly),
            flag(self.abstractly),
            flag(self.throw_only),
            self.interface.display,
            self.interface.assembly,
            self.action.name(),
            self.through_member.as_deref().unwrap_or_default(),
        )
    }
}

impl fmt::Display for StrategyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Strategy {
    pub title: String,
    pub identity: StrategyIdentity,
    pub delegation: Option<DelegationCandidate>,
}

impl Strategy {
    pub fn is_explicit(&self) -> bool {
        self.identity.explicitly
    }

    pub fn is_abstract(&self) -> bool {
        self.identity.abstractly
    }

    pub fn uses_dispose_pattern(&self) -> bool {
        self.identity.action == ActionKind::ImplementInterfaceWithDisposePattern
    }

    /// Whether this is the strategy `options` asks for.
    pub fn matches(&self, options: &ImplementOptions) -> bool {
        self.identity.explicitly == options.explicitly
            && self.identity.abstractly == options.abstractly
            && self.identity.through_member == options.through_member
            && self.uses_dispose_pattern() == options.dispose_pattern
    }
}

/// Strategies for the missing `members` of `ctx.interface`.
///
/// Order: implicit, implicit with the dispose pattern, abstract, one per
/// delegation target, explicit, explicit with the dispose pattern. When no
/// member can be implemented implicitly only the explicit forms remain.
pub fn strategies(ctx: &ImplementContext<'_>, members: &[InterfaceMember]) -> Vec<Strategy> {
    if members.is_empty() {
        return Vec::new();
    }
    let interface = InterfaceIdentity {
        display: qualified_display(ctx.db, &ctx.interface),
        assembly: ctx
            .interface
            .as_named()
            .and_then(|(id, _)| ctx.db.type_symbol(id))
            .map(|s| s.assembly.clone())
            .unwrap_or_default(),
    };
    let strategy = |title: String,
                    explicitly: bool,
                    abstractly: bool,
                    action: ActionKind,
                    delegation: Option<DelegationCandidate>| Strategy {
        title,
        identity: StrategyIdentity {
            explicitly,
            abstractly,
            throw_only: !abstractly && delegation.is_none(),
            interface: interface.clone(),
            action,
            through_member: delegation.as_ref().map(|d| d.name.clone()),
        },
        delegation,
    };

    let with_dispose = dispose::applies(ctx, members);
    let assembly = ctx.assembly();
    let any_accessible = members.iter().any(|m| m.is_accessible_from(ctx.db, assembly));

    let mut out = Vec::new();
    if any_accessible {
        out.push(strategy(
            "Implement interface".to_string(),
            false,
            false,
            ActionKind::ImplementInterface,
            None,
        ));
        if with_dispose {
            out.push(strategy(
                "Implement interface with Dispose pattern".to_string(),
                false,
                false,
                ActionKind::ImplementInterfaceWithDisposePattern,
                None,
            ));
        }
        if ctx.is_abstract_class() && members.iter().any(|m| !m.is_static()) {
            out.push(strategy(
                "Implement interface abstractly".to_string(),
                false,
                true,
                ActionKind::ImplementInterface,
                None,
            ));
        }
        for candidate in delegation::find_targets(ctx, members) {
            out.push(strategy(
                format!("Implement interface through '{}'", candidate.name),
                false,
                false,
                ActionKind::ImplementInterface,
                Some(candidate),
            ));
        }
    }
    out.push(strategy(
        "Implement all members explicitly".to_string(),
        true,
        false,
        ActionKind::ImplementInterface,
        None,
    ));
    if with_dispose {
        out.push(strategy(
            "Implement interface explicitly with Dispose pattern".to_string(),
            true,
            false,
            ActionKind::ImplementInterfaceWithDisposePattern,
            None,
        ));
    }
    debug!(
        interface = %interface.display,
        count = out.len(),
        "strategies"
    );
    out
}

/// The strategy `options` selects, if offered.
pub fn select<'s>(strategies: &'s [Strategy], options: &ImplementOptions) -> Option<&'s Strategy> {
    strategies.iter().find(|s| s.matches(options))
}
