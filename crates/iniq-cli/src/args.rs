use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "iniq")]
#[command(about = "Query and edit INI-style settings files")]
#[command(version)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Settings file to operate on (default: $INIQ_FILE)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the value of a key under a category (empty when absent)
    Get {
        /// Category name (exact match)
        category: String,

        /// Key name (exact match)
        key: String,
    },

    /// Print every value under categories whose name contains the string
    List {
        /// Category name fragment (contains match)
        category: String,
    },

    /// Print category names, one per setting line, in file order
    Categories {
        /// Only names containing this fragment
        fragment: Option<String>,
    },

    /// Add a key=value line under a category
    Set {
        /// Category name (header prefix match)
        category: String,

        /// Key name
        key: String,

        /// Value
        value: String,
    },

    /// Remove a key from a category
    Delete {
        /// Category name (header prefix match)
        category: String,

        /// Key name (line prefix match)
        key: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
