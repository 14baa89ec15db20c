//! Traversal iterators over `OrderedTree`.
//!
//! All walks use an explicit stack or queue, so degenerate trees (height equal
//! to size) cannot exhaust the call stack. Each iterator is single-pass; ask
//! the tree for a new one to walk again.

use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::vec;

use generational_arena::Index;

use crate::domain::tree::OrderedTree;

impl<T> OrderedTree<T> {
    /// Values in sorted order (left, node, right).
    ///
    /// The sequence is materialized up front, so it can also be walked backwards.
    pub fn inorder(&self) -> InOrder<'_, T> {
        let values: Vec<&T> = self
            .inorder_indices()
            .into_iter()
            .map(|idx| &self.node(idx).value)
            .collect();
        InOrder {
            values: values.into_iter(),
        }
    }

    /// Lazy node, left, right walk.
    pub fn preorder(&self) -> PreOrder<'_, T> {
        PreOrder::new(self)
    }

    /// Lazy left, right, node walk.
    pub fn postorder(&self) -> PostOrder<'_, T> {
        PostOrder::new(self)
    }

    /// Lazy breadth-first walk, top level first, left to right within a level.
    pub fn levelorder(&self) -> LevelOrder<'_, T> {
        LevelOrder::new(self)
    }
}

#[derive(Debug)]
pub struct InOrder<'a, T> {
    values: vec::IntoIter<&'a T>,
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.values.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<T> DoubleEndedIterator for InOrder<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.values.next_back()
    }
}

impl<T> ExactSizeIterator for InOrder<'_, T> {}

impl<T> FusedIterator for InOrder<'_, T> {}

pub struct PreOrder<'a, T> {
    tree: &'a OrderedTree<T>,
    stack: Vec<Index>,
}

impl<'a, T> PreOrder<'a, T> {
    fn new(tree: &'a OrderedTree<T>) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root_index() {
            stack.push(root);
        }
        Self { tree, stack }
    }
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let current_idx = self.stack.pop()?;
        let node = self.tree.node(current_idx);
        // Right goes on first so the left subtree is walked first
        self.stack.extend(node.right);
        self.stack.extend(node.left);
        Some(&node.value)
    }
}

impl<T> FusedIterator for PreOrder<'_, T> {}

pub struct PostOrder<'a, T> {
    tree: &'a OrderedTree<T>,
    stack: Vec<(Index, bool)>,
}

impl<'a, T> PostOrder<'a, T> {
    fn new(tree: &'a OrderedTree<T>) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = tree.root_index() {
            stack.push((root, false));
        }
        Self { tree, stack }
    }
}

impl<'a, T> Iterator for PostOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            let node = self.tree.node(current_idx);
            if visited {
                return Some(&node.value);
            }
            self.stack.push((current_idx, true));
            self.stack.extend(node.right.map(|child| (child, false)));
            self.stack.extend(node.left.map(|child| (child, false)));
        }
        None
    }
}

impl<T> FusedIterator for PostOrder<'_, T> {}

pub struct LevelOrder<'a, T> {
    tree: &'a OrderedTree<T>,
    queue: VecDeque<Index>,
}

impl<'a, T> LevelOrder<'a, T> {
    fn new(tree: &'a OrderedTree<T>) -> Self {
        let mut queue = VecDeque::new();
        if let Some(root) = tree.root_index() {
            queue.push_back(root);
        }
        Self { tree, queue }
    }
}

impl<'a, T> Iterator for LevelOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let current_idx = self.queue.pop_front()?;
        let node = self.tree.node(current_idx);
        self.queue.extend(node.left);
        self.queue.extend(node.right);
        Some(&node.value)
    }
}

impl<T> FusedIterator for LevelOrder<'_, T> {}

impl<'a, T> IntoIterator for &'a OrderedTree<T> {
    type Item = &'a T;
    type IntoIter = InOrder<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.inorder()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OrderedTree<i32> {
        [50, 30, 70, 20, 40].into_iter().collect()
    }

    #[test]
    fn given_tree_when_walking_preorder_then_node_before_children() {
        let tree = sample();
        assert_eq!(tree.preorder().copied().collect::<Vec<_>>(), vec![50, 30, 20, 40, 70]);
    }

    #[test]
    fn given_tree_when_walking_postorder_then_children_before_node() {
        let tree = sample();
        assert_eq!(tree.postorder().copied().collect::<Vec<_>>(), vec![20, 40, 30, 70, 50]);
    }

    #[test]
    fn given_tree_when_walking_levelorder_then_level_by_level() {
        let tree = sample();
        assert_eq!(tree.levelorder().copied().collect::<Vec<_>>(), vec![50, 30, 70, 20, 40]);
    }

    #[test]
    fn given_tree_when_walking_inorder_backwards_then_descending() {
        let tree = sample();
        let inorder = tree.inorder();
        assert_eq!(inorder.len(), 5);
        assert_eq!(inorder.rev().copied().collect::<Vec<_>>(), vec![70, 50, 40, 30, 20]);
    }

    #[test]
    fn given_exhausted_preorder_when_polled_again_then_stays_empty() {
        let tree = sample();
        let mut walk = tree.preorder();
        assert_eq!(walk.by_ref().count(), 5);
        assert_eq!(walk.next(), None);
        assert_eq!(tree.preorder().count(), 5);
    }

    #[test]
    fn given_deep_chain_when_walking_then_no_recursion_limit() {
        let tree = OrderedTree::from_sorted(0..200_000).unwrap();
        assert_eq!(tree.preorder().count(), 200_000);
        assert_eq!(tree.postorder().count(), 200_000);
        assert_eq!(tree.inorder().next_back(), Some(&199_999));
        assert_eq!(tree.height(), 199_999);
    }

    #[test]
    fn given_borrowed_tree_when_iterating_then_uses_inorder() {
        let tree = sample();
        let mut seen = Vec::new();
        for value in &tree {
            seen.push(*value);
        }
        assert_eq!(seen, vec![20, 30, 40, 50, 70]);
    }
}
