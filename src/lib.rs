//! Ordered binary search tree with rebalancing, traversals and a lookup benchmark.
//!
//! The core is [`OrderedTree`]; the other layers wrap it into a small
//! command-line tool that renders, queries and benchmarks trees.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;

pub use domain::{OrderedTree, TreeError, TreeRender, TreeResult};
