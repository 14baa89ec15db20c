//! Domain layer: the ordered tree, its traversals and renderings
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod error;
pub mod iter;
pub mod render;
pub mod tree;

pub use error::{TreeError, TreeResult};
pub use iter::{InOrder, LevelOrder, PostOrder, PreOrder};
pub use render::{TreeRender, MISSING_CHILD};
pub use tree::OrderedTree;
