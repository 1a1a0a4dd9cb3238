//! CLI argument definitions using clap

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// S-expression outline viewer: project documents into a navigable display tree with breadcrumb paths
#[derive(Parser, Debug)]
#[command(name = "sxv")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d, -dd, -ddd)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Maximum list nesting accepted during projection
    #[arg(long, global = true)]
    pub max_depth: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the document's outline as a tree of labels
    Tree {
        /// Document to load
        #[arg(value_hint = ValueHint::FilePath)]
        file: String,
    },

    /// Print the breadcrumb path of a node
    Path {
        /// Document to load
        #[arg(value_hint = ValueHint::FilePath)]
        file: String,
        /// Child indexes from the root, e.g. `0.2` (omit for the root)
        #[arg(long)]
        at: Option<String>,
    },

    /// Print a node's serialized source list
    Show {
        /// Document to load
        #[arg(value_hint = ValueHint::FilePath)]
        file: String,
        /// Child indexes from the root, e.g. `0.2` (omit for the root)
        #[arg(long)]
        at: Option<String>,
    },

    /// Print breadcrumb paths of nodes whose label matches a pattern
    Find {
        /// Document to load
        #[arg(value_hint = ValueHint::FilePath)]
        file: String,
        /// Regular expression matched against node labels
        pattern: String,
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

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Show config file path
    Path,
}
