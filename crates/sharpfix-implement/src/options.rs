//! Options that shape generated members.
//!
//! All options deserialize from camelCase JSON and every field has a
//! default, so `{}` is a valid options object.

use serde::{Deserialize, Serialize};

/// Where new members go relative to existing ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InsertionBehavior {
    /// After the last member of the same kind (fields with fields, methods
    /// with methods, ...).
    #[default]
    WithOtherMembersOfTheSameKind,
    /// After the last member of the type.
    AtTheEnd,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyGenerationBehavior {
    /// Accessors throw `NotImplementedException`.
    #[default]
    PreferThrowingProperties,
    /// Simple implicit properties become `{ get; set; }`.
    PreferAutoProperties,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpressionBodyPreference {
    #[default]
    Never,
    WhenPossible,
}

impl ExpressionBodyPreference {
    pub const fn when_possible(self) -> bool {
        matches!(self, ExpressionBodyPreference::WhenPossible)
    }
}

/// `=>` preferences per member kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpressionBodyPreferences {
    pub methods: ExpressionBodyPreference,
    pub constructors: ExpressionBodyPreference,
    pub operators: ExpressionBodyPreference,
    pub accessors: ExpressionBodyPreference,
    pub properties: ExpressionBodyPreference,
    pub indexers: ExpressionBodyPreference,
}

impl ExpressionBodyPreferences {
    /// `WhenPossible` everywhere.
    pub const fn all_when_possible() -> Self {
        Self {
            methods: ExpressionBodyPreference::WhenPossible,
            constructors: ExpressionBodyPreference::WhenPossible,
            operators: ExpressionBodyPreference::WhenPossible,
            accessors: ExpressionBodyPreference::WhenPossible,
            properties: ExpressionBodyPreference::WhenPossible,
            indexers: ExpressionBodyPreference::WhenPossible,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NamingOptions {
    /// Prefix for generated private fields (`_` gives `_disposedValue`).
    pub private_field_prefix: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IndentationOptions {
    pub tab_size: u32,
    pub insert_spaces: bool,
}

impl Default for IndentationOptions {
    fn default() -> Self {
        Self {
            tab_size: 4,
            insert_spaces: true,
        }
    }
}

impl IndentationOptions {
    /// Text of one indentation level.
    pub fn unit(&self) -> String {
        if self.insert_spaces {
            " ".repeat(self.tab_size as usize)
        } else {
            "\t".to_string()
        }
    }
}

/// Everything a caller can configure about one implement-interface fix.
///
/// The first four fields pick a strategy when the caller does not address
/// one by index.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImplementOptions {
    pub explicitly: bool,
    pub abstractly: bool,
    pub through_member: Option<String>,
    pub dispose_pattern: bool,
    pub insertion_behavior: InsertionBehavior,
    pub property_generation_behavior: PropertyGenerationBehavior,
    pub expression_body_preferences: ExpressionBodyPreferences,
    /// Add `using` directives for types from other namespaces instead of
    /// qualifying them.
    pub add_imports: bool,
    pub naming: NamingOptions,
    pub indentation: IndentationOptions,
}

impl Default for ImplementOptions {
    fn default() -> Self {
        Self {
            explicitly: false,
            abstractly: false,
            through_member: None,
            dispose_pattern: false,
            insertion_behavior: InsertionBehavior::default(),
            property_generation_behavior: PropertyGenerationBehavior::default(),
            expression_body_preferences: ExpressionBodyPreferences::default(),
            add_imports: true,
            naming: NamingOptions::default(),
            indentation: IndentationOptions::default(),
        }
    }
}
