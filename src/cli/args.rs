use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use sharpfix_implement::{ImplementOptions, InsertionBehavior, PropertyGenerationBehavior};

/// CLI arguments for the sharpfix binary.
#[derive(Parser, Debug)]
#[command(
    name = "sharpfix",
    version,
    about = "Implement-interface code fixes for C# declarations"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Disable colored output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the code actions offered for a diagnostic.
    Actions(ActionArgs),
    /// Apply one code action and print the rewritten document.
    Apply(ApplyArgs),
    /// Apply one code action to every diagnostic in the fixture.
    FixAll(FixAllArgs),
}

#[derive(Args, Debug)]
pub struct ActionArgs {
    /// Fixture file with symbols, documents and diagnostics.
    pub fixture: PathBuf,

    /// Which diagnostic of the fixture to use.
    #[arg(short = 'd', long, default_value_t = 0)]
    pub diagnostic: usize,

    /// Print JSON instead of a listing.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub options: OptionArgs,
}

#[derive(Args, Debug)]
pub struct ApplyArgs {
    pub fixture: PathBuf,

    #[arg(short = 'd', long, default_value_t = 0)]
    pub diagnostic: usize,

    /// Index of the action as listed by `actions`. Without it the action is
    /// picked by the option flags.
    #[arg(short = 'i', long)]
    pub index: Option<usize>,

    /// Print the code action as JSON instead of the rewritten text.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub options: OptionArgs,
}

#[derive(Args, Debug)]
pub struct FixAllArgs {
    pub fixture: PathBuf,

    /// Index of the action, as offered for the first diagnostic.
    #[arg(short = 'i', long, default_value_t = 0)]
    pub index: usize,

    /// Print the per-document edits as JSON.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub options: OptionArgs,
}

/// Flags layered over the fixture's `options` object.
#[derive(Args, Debug, Default, Clone)]
pub struct OptionArgs {
    /// Prefer explicit implementations.
    #[arg(long)]
    pub explicitly: bool,

    /// Prefer abstract members (abstract classes only).
    #[arg(long)]
    pub abstractly: bool,

    /// Prefer forwarding through this field, property or parameter.
    #[arg(long = "through", value_name = "MEMBER")]
    pub through_member: Option<String>,

    /// Prefer the `IDisposable` dispose pattern.
    #[arg(long = "dispose-pattern")]
    pub dispose_pattern: bool,

    /// Insert after the last member instead of next to members of the same
    /// kind.
    #[arg(long = "at-the-end")]
    pub at_the_end: bool,

    /// Generate `{ get; set; }` for simple properties.
    #[arg(long = "auto-properties")]
    pub auto_properties: bool,

    /// Qualify type names instead of adding `using` directives.
    #[arg(long = "no-imports")]
    pub no_imports: bool,
}

impl OptionArgs {
    /// Apply the flags that were given on top of `options`.
    pub fn apply_to(&self, options: &mut ImplementOptions) {
        options.explicitly |= self.explicitly;
        options.abstractly |= self.abstractly;
        options.dispose_pattern |= self.dispose_pattern;
        if let Some(member) = &self.through_member {
            options.through_member = Some(member.clone());
        }
        if self.at_the_end {
            options.insertion_behavior = InsertionBehavior::AtTheEnd;
        }
        if self.auto_properties {
            options.property_generation_behavior = PropertyGenerationBehavior::PreferAutoProperties;
        }
        if self.no_imports {
            options.add_imports = false;
        }
    }
}
