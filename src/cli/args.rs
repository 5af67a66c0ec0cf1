//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::domain::Lead;

/// Assign sales leads across a salesperson hierarchy, minimizing company risk
#[derive(Parser, Debug)]
#[command(name = "salestree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global one
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a hierarchy with each rep's success rate
    Tree {
        /// Hierarchy in legacy format, e.g. "0{Blake|Sociopath}0{Ricky|Clueless}"
        spec: Option<String>,
    },

    /// Assign leads to the best reps, in order
    Assign {
        /// Hierarchy in legacy format (default: from config)
        #[arg(short = 'H', long)]
        hierarchy: Option<String>,

        /// Leads as NAME=VALUE
        #[arg(required = true, value_parser = parse_lead)]
        leads: Vec<Lead>,
    },

    /// Run a TOML scenario file
    Run {
        /// Scenario file with `hierarchy` and `[[leads]]`
        #[arg(value_hint = ValueHint::FilePath)]
        scenario: String,

        /// Hierarchy overriding the one in the scenario
        #[arg(short = 'H', long)]
        hierarchy: Option<String>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Show global config file location
    Path,
    /// Write a default global config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Parse `NAME=VALUE` into a lead.
pub fn parse_lead(s: &str) -> Result<Lead, String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("lead name missing in '{}'", s));
    }
    let value: f64 = value
        .trim()
        .replace('_', "")
        .parse()
        .map_err(|e| format!("invalid lead value in '{}': {}", s, e))?;
    Lead::new(name, value).map_err(|e| e.to_string())
}
