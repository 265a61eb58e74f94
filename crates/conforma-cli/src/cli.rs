//! Command-line interface argument parsing and definitions
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Conforma CLI - declarative JSON shape validation
///
/// Validates JSON or YAML documents against declarative schema definitions
/// and reports structural violations with fully-qualified paths.
#[derive(Parser, Debug)]
#[command(
    name = "conforma",
    version,
    author,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Enable verbose output (can be used multiple times for increased verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output format for results
    #[arg(short, long, value_enum, global = true, default_value = "human")]
    pub output: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Validate a document against a schema definition
    Validate(ValidateArgs),

    /// Check that a schema definition file is well-formed
    CheckSchema(CheckSchemaArgs),

    /// Generate shell completions for the specified shell
    Completions(CompletionsArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to the document to validate (JSON or YAML)
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Path to the schema definition file (JSON or YAML)
    #[arg(short, long, value_name = "SCHEMA", env = "CONFORMA_SCHEMA")]
    pub schema: PathBuf,

    /// Collect every violation instead of stopping at the first
    #[arg(long)]
    pub all: bool,
}

/// Arguments for the check-schema command
#[derive(Parser, Debug)]
pub struct CheckSchemaArgs {
    /// Path to the schema definition file (JSON or YAML)
    #[arg(value_name = "SCHEMA")]
    pub schema: PathBuf,
}

/// Arguments for generating shell completions
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Output format options
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable formatted output
    Human,
    /// JSON output
    Json,
    /// Pretty-printed JSON output
    JsonPretty,
    /// YAML output
    Yaml,
}

/// Supported shells for completion generation
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    PowerShell,
    /// Elvish shell
    Elvish,
}

impl Cli {
    /// Parse command-line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the effective verbosity level (considering quiet flag)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }

    /// Check if colored output should be used
    pub fn use_color(&self) -> bool {
        !self.no_color && std::io::stdout().is_terminal()
    }
}

impl Shell {
    /// Convert to clap_complete shell type
    pub fn to_clap_shell(self) -> clap_complete::Shell {
        match self {
            Shell::Bash => clap_complete::Shell::Bash,
            Shell::Zsh => clap_complete::Shell::Zsh,
            Shell::Fish => clap_complete::Shell::Fish,
            Shell::PowerShell => clap_complete::Shell::PowerShell,
            Shell::Elvish => clap_complete::Shell::Elvish,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        // Verify that the CLI structure is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbosity_level() {
        let cli = Cli::parse_from([
            "conforma", "-vv", "validate", "doc.json", "--schema", "schema.json",
        ]);
        assert_eq!(cli.verbosity_level(), 2);

        let quiet = Cli::parse_from([
            "conforma", "--quiet", "validate", "doc.json", "--schema", "schema.json",
        ]);
        assert_eq!(quiet.verbosity_level(), 0);
    }

    #[test]
    fn test_validate_args() {
        let cli = Cli::parse_from([
            "conforma", "validate", "doc.yaml", "--schema", "shape.yaml", "--all",
        ]);
        let Commands::Validate(args) = cli.command else {
            panic!("expected validate subcommand");
        };
        assert!(args.all);
        assert_eq!(args.document.to_str(), Some("doc.yaml"));
        assert_eq!(args.schema.to_str(), Some("shape.yaml"));
    }
}
