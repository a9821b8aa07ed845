use colored::Colorize;

use sharpfix_implement::{ImplementError, Strategy};

/// Human-readable output for the CLI commands.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub const fn new(color: bool) -> Self {
        Reporter { color }
    }

    /// One line per action: index, title and identity key.
    pub fn actions(&self, strategies: &[Strategy]) -> String {
        if strategies.is_empty() {
            return "no actions offered\n".to_string();
        }
        let mut out = String::new();
        for (index, strategy) in strategies.iter().enumerate() {
            let index = format!("{index:>3}");
            let key = strategy.identity.key();
            if self.color {
                out.push_str(&format!(
                    "{}  {}  {}\n",
                    index.cyan(),
                    strategy.title.bold(),
                    key.dimmed()
                ));
            } else {
                out.push_str(&format!("{index}  {}  {key}\n", strategy.title));
            }
        }
        out
    }

    /// Header line printed before each document's text.
    pub fn document_header(&self, name: &str, applied: usize) -> String {
        let header = format!("==> {name} ({applied} fixed) <==");
        if self.color {
            format!("{}\n", header.green())
        } else {
            format!("{header}\n")
        }
    }

    pub fn failure(&self, document: &str, error: &ImplementError) -> String {
        let label = if self.color {
            "error".red().bold().to_string()
        } else {
            "error".to_string()
        };
        format!("{label}: {document}: {error}")
    }
}
