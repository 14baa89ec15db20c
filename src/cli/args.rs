//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

use crate::config::{LookupStrategy, RenderStyle};

/// Ordered binary search tree playground: build, query, render and benchmark trees
#[derive(Parser, Debug)]
#[command(name = "ordtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global one
    #[arg(short, long, global = true, env = "ORDTREE_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare list scan against tree lookups on a word list
    Bench {
        /// Whitespace-separated word list
        #[arg(value_hint = ValueHint::FilePath)]
        words: PathBuf,
        /// Probe words per scenario
        #[arg(short, long)]
        lookups: Option<usize>,
        /// Shuffle seed for reproducible runs
        #[arg(short, long)]
        seed: Option<u64>,
        /// Lookup routine on the random and balanced trees
        #[arg(long, value_enum)]
        strategy: Option<LookupStrategy>,
        /// Keep word case when building the alphabetical tree
        #[arg(long)]
        keep_case: bool,
    },

    /// Build a tree from integers and print it
    Show {
        /// Values, inserted in the given order
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<i64>,
        /// Sort the values and build with ordered appends
        #[arg(long)]
        sorted: bool,
        /// Rebalance before printing
        #[arg(short, long)]
        rebalance: bool,
        /// Output style
        #[arg(long, value_enum)]
        style: Option<RenderStyle>,
    },

    /// Run order queries against a tree built from integers
    Query {
        /// Values, inserted in the given order
        #[arg(allow_negative_numbers = true)]
        values: Vec<i64>,
        /// Sort the values and build with ordered appends
        #[arg(long)]
        sorted: bool,
        /// Remove a value before querying (repeatable)
        #[arg(long, allow_negative_numbers = true)]
        remove: Vec<i64>,
        /// Look up a value
        #[arg(long, allow_negative_numbers = true)]
        find: Option<i64>,
        /// Smallest value greater than this one
        #[arg(long, allow_negative_numbers = true)]
        successor: Option<i64>,
        /// Largest value smaller than this one
        #[arg(long, allow_negative_numbers = true)]
        predecessor: Option<i64>,
        /// Values in the inclusive range
        #[arg(long, num_args = 2, value_names = ["LOW", "HIGH"], allow_negative_numbers = true)]
        range: Option<Vec<i64>>,
    },

    /// Show effective settings
    Config {
        /// Print a commented template instead
        #[arg(long)]
        template: bool,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
