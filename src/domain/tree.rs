//! Arena-backed binary search tree.
//!
//! Nodes live in a generational arena and link to their children by index.
//! Each index is held by exactly one link (the root link or a parent's child
//! slot), so the node graph is a strict hierarchy: no parent pointers, no sharing.
//! Duplicates descend right on insert, so a tree grown by `insert` keeps
//! strictly smaller values on the left. Rebalancing and the predecessor lift
//! in `remove` may put an equal value on the left side of its twin; the order
//! every operation relies on is `left <= node <= right`.

use std::cmp::Ordering;
use std::mem;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::error::{TreeError, TreeResult};

/// Tree node in the arena.
#[derive(Debug, Clone)]
pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) left: Option<Index>,
    pub(crate) right: Option<Index>,
}

impl<T> Node<T> {
    fn leaf(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }
}

/// The slot owning a node: the root link or one of a parent's child links.
///
/// `Root` acts as the left slot of a placeholder parent sitting above the
/// real root, so splicing at the top of the tree needs no special case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Link {
    Root,
    Left(Index),
    Right(Index),
}

/// Ordered container over any totally ordered `T`.
///
/// No balancing happens on insert; call [`OrderedTree::rebalance`] to rebuild
/// a degenerate tree into a perfectly balanced one.
#[derive(Debug, Clone)]
pub struct OrderedTree<T> {
    /// Arena storage for all tree nodes
    arena: Arena<Node<T>>,
    /// Index of the root node, None for empty trees
    root: Option<Index>,
    size: usize,
    /// Last node attached by `insert_ordered`; cleared by every other mutation
    append_cursor: Option<Index>,
}

impl<T> Default for OrderedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> OrderedTree<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            size: 0,
            append_cursor: None,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drops every node at once and resets the size.
    ///
    /// Also resets the ordered-append cursor, so a fresh `insert_ordered`
    /// build may start afterwards.
    #[instrument(level = "trace", skip_all, fields(size = self.size))]
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.size = 0;
        self.append_cursor = None;
    }

    /// Number of edges on the longest root-to-leaf path.
    ///
    /// An empty tree has height -1 and a single leaf has height 0.
    pub fn height(&self) -> isize {
        let mut height = -1;
        let mut stack: Vec<(Index, isize)> = self.root.map(|idx| (idx, 0)).into_iter().collect();

        while let Some((idx, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.arena[idx];
            stack.extend(node.left.map(|child| (child, depth + 1)));
            stack.extend(node.right.map(|child| (child, depth + 1)));
        }

        height
    }

    /// Diagnostic check: `height < 2 * log2(size + 1) - 1`.
    ///
    /// Never triggers a rebalance.
    ///
    /// An empty tree counts as balanced. The bare formula would say otherwise
    /// (`-1 < -1` is false), so the empty case is answered before it is applied.
    pub fn is_balanced(&self) -> bool {
        if self.is_empty() {
            return true;
        }
        let bound = 2.0 * ((self.size + 1) as f64).log2() - 1.0;
        (self.height() as f64) < bound
    }

    /// Rebuilds the tree as a perfectly balanced one holding the same values.
    ///
    /// The lower-middle element of each sorted run becomes the subtree root,
    /// giving height `ceil(log2(n + 1)) - 1`.
    #[instrument(level = "trace", skip_all, fields(size = self.size))]
    pub fn rebalance(&mut self) {
        self.append_cursor = None;
        let order = self.inorder_indices();
        let mut values = Vec::with_capacity(order.len());
        for idx in order {
            if let Some(node) = self.arena.remove(idx) {
                values.push(node.value);
            }
        }
        self.arena.clear();

        let count = values.len();
        self.root = self.build_balanced(count, &mut values.into_iter());
        self.size = count;
        debug!(size = count, height = self.height(), "rebalanced");
    }

    fn build_balanced<I>(&mut self, count: usize, values: &mut I) -> Option<Index>
    where
        I: Iterator<Item = T>,
    {
        if count == 0 {
            return None;
        }
        let mid = count / 2;
        let left = self.build_balanced(mid, values);
        let value = values.next()?;
        let right = self.build_balanced(count - mid - 1, values);
        Some(self.arena.insert(Node { value, left, right }))
    }

    pub(crate) fn root_index(&self) -> Option<Index> {
        self.root
    }

    pub(crate) fn node(&self, idx: Index) -> &Node<T> {
        &self.arena[idx]
    }

    /// Node indices in sorted order, collected with an explicit stack.
    pub(crate) fn inorder_indices(&self) -> Vec<Index> {
        let mut order = Vec::with_capacity(self.size);
        let mut stack = Vec::new();
        let mut current = self.root;

        loop {
            while let Some(idx) = current {
                stack.push(idx);
                current = self.arena[idx].left;
            }
            let Some(idx) = stack.pop() else {
                break;
            };
            order.push(idx);
            current = self.arena[idx].right;
        }

        order
    }

    fn link_mut(&mut self, link: Link) -> &mut Option<Index> {
        match link {
            Link::Root => &mut self.root,
            Link::Left(parent) => &mut self.arena[parent].left,
            Link::Right(parent) => &mut self.arena[parent].right,
        }
    }

    /// Frees a node that no link points at any more and hands back its value.
    fn take_value(&mut self, idx: Index) -> TreeResult<T> {
        self.arena
            .remove(idx)
            .map(|node| node.value)
            .ok_or_else(|| TreeError::Internal(format!("dangling node index {idx:?}")))
    }

    fn min_index(&self, mut idx: Index) -> Index {
        while let Some(left) = self.arena[idx].left {
            idx = left;
        }
        idx
    }

    fn max_index(&self, mut idx: Index) -> Index {
        while let Some(right) = self.arena[idx].right {
            idx = right;
        }
        idx
    }
}

impl<T: Ord> OrderedTree<T> {
    /// Builds a tree from input that is already sorted, via `insert_ordered`.
    pub fn from_sorted<I>(items: I) -> TreeResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = Self::new();
        for item in items {
            tree.insert_ordered(item)?;
        }
        Ok(tree)
    }

    /// Adds `item` at the first free slot on its search path (ties go right).
    #[instrument(level = "trace", skip_all, fields(size = self.size))]
    pub fn insert(&mut self, item: T) {
        self.append_cursor = None;
        let mut link = Link::Root;
        let mut current = self.root;

        while let Some(idx) = current {
            let node = &self.arena[idx];
            if item < node.value {
                link = Link::Left(idx);
                current = node.left;
            } else {
                link = Link::Right(idx);
                current = node.right;
            }
        }

        let idx = self.arena.insert(Node::leaf(item));
        *self.link_mut(link) = Some(idx);
        self.size += 1;
    }

    /// Appends `item` as the right child of the previously appended node.
    ///
    /// Meant for bulk loading sorted input: the result is a right-leaning chain.
    /// Any other mutation between two calls ends the ordered build; further
    /// appends fail until the tree is cleared.
    ///
    /// # Errors
    /// * [`TreeError::OrderedAppendInterleaved`] - the tree is non-empty and
    ///   was not built by an uninterrupted run of ordered appends.
    /// * [`TreeError::OutOfOrder`] - `item` is smaller than the last appended item.
    #[instrument(level = "trace", skip_all, fields(size = self.size))]
    pub fn insert_ordered(&mut self, item: T) -> TreeResult<()> {
        let link = match (self.root, self.append_cursor) {
            (None, _) => Link::Root,
            (Some(_), Some(last)) => {
                let node = self
                    .arena
                    .get(last)
                    .ok_or(TreeError::OrderedAppendInterleaved)?;
                if item < node.value {
                    return Err(TreeError::OutOfOrder);
                }
                Link::Right(last)
            }
            (Some(_), None) => {
                debug!("ordered append rejected: cursor invalidated by a general mutation");
                return Err(TreeError::OrderedAppendInterleaved);
            }
        };

        let idx = self.arena.insert(Node::leaf(item));
        *self.link_mut(link) = Some(idx);
        self.append_cursor = Some(idx);
        self.size += 1;
        Ok(())
    }

    /// Recursive lookup returning the stored value equal to `item`.
    ///
    /// Stack depth grows with tree height; prefer [`OrderedTree::find_iterative`]
    /// on trees that may be degenerate.
    pub fn find(&self, item: &T) -> Option<&T> {
        self.find_from(self.root, item)
    }

    fn find_from(&self, link: Option<Index>, item: &T) -> Option<&T> {
        let node = &self.arena[link?];
        match item.cmp(&node.value) {
            Ordering::Equal => Some(&node.value),
            Ordering::Less => self.find_from(node.left, item),
            Ordering::Greater => self.find_from(node.right, item),
        }
    }

    pub fn find_iterative(&self, item: &T) -> Option<&T> {
        let mut current = self.root;
        while let Some(idx) = current {
            let node = &self.arena[idx];
            match item.cmp(&node.value) {
                Ordering::Equal => return Some(&node.value),
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
            }
        }
        None
    }

    pub fn contains(&self, item: &T) -> bool {
        self.find_iterative(item).is_some()
    }

    /// Finds the node holding `item` together with the link that owns it.
    fn locate(&self, item: &T) -> Option<(Index, Link)> {
        let mut link = Link::Root;
        let mut current = self.root;
        while let Some(idx) = current {
            let node = &self.arena[idx];
            match item.cmp(&node.value) {
                Ordering::Equal => return Some((idx, link)),
                Ordering::Less => {
                    link = Link::Left(idx);
                    current = node.left;
                }
                Ordering::Greater => {
                    link = Link::Right(idx);
                    current = node.right;
                }
            }
        }
        None
    }

    /// Removes one occurrence of `item` and returns the stored value.
    ///
    /// A node with two children takes over the maximum of its left subtree,
    /// and that maximum node is spliced out instead. Otherwise the node's only
    /// child (or nothing) is linked straight into its parent's slot.
    ///
    /// # Errors
    /// [`TreeError::NotFound`] if `item` is absent; the tree is left unchanged.
    #[instrument(level = "trace", skip_all, fields(size = self.size))]
    pub fn remove(&mut self, item: &T) -> TreeResult<T> {
        let Some((target, link)) = self.locate(item) else {
            debug!("remove: item absent, tree unchanged");
            return Err(TreeError::NotFound);
        };
        self.append_cursor = None;

        let (left, right) = {
            let node = &self.arena[target];
            (node.left, node.right)
        };
        let removed = match (left, right) {
            (Some(left), Some(_)) => {
                let lifted = self.lift_max(target, left)?;
                mem::replace(&mut self.arena[target].value, lifted)
            }
            (only, None) | (None, only) => {
                *self.link_mut(link) = only;
                self.take_value(target)?
            }
        };

        self.size -= 1;
        Ok(removed)
    }

    /// Detaches the maximum node of `top`'s left subtree and returns its value.
    ///
    /// The maximum has no right child, so its parent adopts its left child.
    fn lift_max(&mut self, top: Index, left: Index) -> TreeResult<T> {
        let mut link = Link::Left(top);
        let mut current = left;
        while let Some(next) = self.arena[current].right {
            link = Link::Right(current);
            current = next;
        }
        let orphan = self.arena[current].left;
        *self.link_mut(link) = orphan;
        self.take_value(current)
    }

    /// Swaps the stored value equal to `item` for `new_item` in place.
    ///
    /// The tree shape is not touched and the order is not re-validated: the
    /// caller guarantees `new_item` sorts into the same position. Use
    /// [`OrderedTree::replace_checked`] when that is not known.
    pub fn replace(&mut self, item: &T, new_item: T) -> Option<T> {
        let (idx, _) = self.locate(item)?;
        self.append_cursor = None;
        Some(mem::replace(&mut self.arena[idx].value, new_item))
    }

    /// Like [`OrderedTree::replace`], but refuses values that would break the order.
    ///
    /// `new_item` must respect every ancestor on the search path, be no smaller
    /// than the whole left subtree and no greater than the whole right subtree.
    ///
    /// # Errors
    /// [`TreeError::OrderViolation`]; the tree is left unchanged.
    pub fn replace_checked(&mut self, item: &T, new_item: T) -> TreeResult<Option<T>> {
        // new_item >= lower, new_item < upper
        let mut lower: Option<Index> = None;
        let mut upper: Option<Index> = None;
        let mut current = self.root;

        let target = loop {
            let Some(idx) = current else {
                return Ok(None);
            };
            let node = &self.arena[idx];
            match item.cmp(&node.value) {
                Ordering::Equal => break idx,
                Ordering::Less => {
                    upper = Some(idx);
                    current = node.left;
                }
                Ordering::Greater => {
                    lower = Some(idx);
                    current = node.right;
                }
            }
        };

        let node = &self.arena[target];
        let fits_path = lower.map_or(true, |idx| new_item >= self.arena[idx].value)
            && upper.map_or(true, |idx| new_item < self.arena[idx].value);
        let fits_subtrees = node
            .left
            .map_or(true, |idx| new_item >= self.arena[self.max_index(idx)].value)
            && node
                .right
                .map_or(true, |idx| new_item <= self.arena[self.min_index(idx)].value);
        if !(fits_path && fits_subtrees) {
            debug!("replace_checked: new value does not fit the node's position");
            return Err(TreeError::OrderViolation);
        }

        self.append_cursor = None;
        Ok(Some(mem::replace(&mut self.arena[target].value, new_item)))
    }

    /// Values in `[low, high]`, ascending. Empty when `low > high`.
    pub fn range_find(&self, low: &T, high: &T) -> Vec<&T> {
        if low > high {
            return Vec::new();
        }
        self.inorder()
            .skip_while(|item| *item < low)
            .take_while(|item| *item <= high)
            .collect()
    }

    /// Smallest stored value strictly greater than `item`.
    pub fn successor(&self, item: &T) -> Option<&T> {
        self.inorder().find(|candidate| *candidate > item)
    }

    /// Largest stored value strictly less than `item`.
    pub fn predecessor(&self, item: &T) -> Option<&T> {
        self.inorder().rev().find(|candidate| *candidate < item)
    }

    /// Walks the whole node graph and verifies search order and size bookkeeping.
    ///
    /// Order is checked as `left <= node <= right`.
    pub fn check_invariants(&self) -> TreeResult<()> {
        let mut reachable = 0usize;
        // (node, inclusive lower bound, inclusive upper bound)
        let mut stack: Vec<(Index, Option<&T>, Option<&T>)> =
            self.root.map(|idx| (idx, None, None)).into_iter().collect();

        while let Some((idx, lower, upper)) = stack.pop() {
            let node = self
                .arena
                .get(idx)
                .ok_or_else(|| TreeError::Internal(format!("dangling link {idx:?}")))?;
            reachable += 1;
            if reachable > self.arena.len() {
                return Err(TreeError::Internal("node reachable twice".into()));
            }
            if lower.is_some_and(|low| node.value < *low)
                || upper.is_some_and(|high| node.value > *high)
            {
                return Err(TreeError::Internal(format!(
                    "search order broken at node {idx:?}"
                )));
            }
            stack.extend(node.left.map(|child| (child, lower, Some(&node.value))));
            stack.extend(node.right.map(|child| (child, Some(&node.value), upper)));
        }

        if reachable != self.size || self.arena.len() != self.size {
            return Err(TreeError::Internal(format!(
                "size {} but {} reachable and {} allocated nodes",
                self.size,
                reachable,
                self.arena.len()
            )));
        }
        Ok(())
    }
}

impl<T: Ord> FromIterator<T> for OrderedTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: Ord> Extend<T> for OrderedTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

/// Two trees are equal when they hold the same values, whatever their shape.
impl<T: PartialEq> PartialEq for OrderedTree<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.inorder().eq(other.inorder())
    }
}

impl<T: Eq> Eq for OrderedTree<T> {}

impl<T> IntoIterator for OrderedTree<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let order = self.inorder_indices();
        let values: Vec<T> = order
            .into_iter()
            .filter_map(|idx| self.arena.remove(idx))
            .map(|node| node.value)
            .collect();
        values.into_iter()
    }
}
