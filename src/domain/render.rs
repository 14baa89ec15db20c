//! Text renderings of an `OrderedTree`.

use std::collections::HashMap;
use std::fmt;

use generational_arena::Index;
use termtree::Tree;

use crate::domain::tree::OrderedTree;

/// Placeholder label for an absent child next to a present sibling.
pub const MISSING_CHILD: &str = "·";

/// Rotated 90 degrees counter-clockwise: the right subtree is printed above
/// its parent, the left subtree below, each line indented by `"| "` per level.
impl<T: fmt::Display> fmt::Display for OrderedTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack: Vec<(Index, usize)> = Vec::new();
        let mut current = self.root_index().map(|idx| (idx, 0));

        loop {
            while let Some((idx, level)) = current {
                stack.push((idx, level));
                current = self.node(idx).right.map(|child| (child, level + 1));
            }
            let Some((idx, level)) = stack.pop() else {
                break;
            };
            let node = self.node(idx);
            writeln!(f, "{}{}", "| ".repeat(level), node.value)?;
            current = node.left.map(|child| (child, level + 1));
        }

        Ok(())
    }
}

pub trait TreeRender {
    fn to_tree_string(&self) -> Tree<String>;
}

impl<T: fmt::Display> TreeRender for OrderedTree<T> {
    /// Children are listed left then right.
    ///
    /// Subtrees are assembled bottom-up from an explicit postorder stack, so
    /// a degenerate chain renders without deep recursion.
    fn to_tree_string(&self) -> Tree<String> {
        let Some(root_idx) = self.root_index() else {
            return Tree::new("Empty tree".to_string());
        };

        let mut built: HashMap<Index, Tree<String>> = HashMap::new();
        let mut stack = vec![(root_idx, false)];

        while let Some((idx, expanded)) = stack.pop() {
            let node = self.node(idx);
            if !expanded {
                stack.push((idx, true));
                stack.extend(node.right.map(|child| (child, false)));
                stack.extend(node.left.map(|child| (child, false)));
                continue;
            }

            let mut subtree = Tree::new(node.value.to_string());
            if node.left.is_some() || node.right.is_some() {
                for child in [node.left, node.right] {
                    let child_tree = child
                        .and_then(|child_idx| built.remove(&child_idx))
                        .unwrap_or_else(|| Tree::new(MISSING_CHILD.to_string()));
                    subtree.push(child_tree);
                }
            }
            built.insert(idx, subtree);
        }

        built
            .remove(&root_idx)
            .unwrap_or_else(|| Tree::new("Empty tree".to_string()))
    }
}
