//! An ordered, unbalanced BST. Each node exclusively owns its two children through a `Box`, so
//! there are no parent pointers and no shared ownership anywhere in the tree.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::OrderedTree;
//!
//! let mut tree = OrderedTree::new();
//!
//! // Nothing in here yet.
//! assert!(tree.find(&1).is_none());
//!
//! tree.insert(1).insert(2);
//! assert_eq!(tree.find(&1).map(|node| node.value()), Some(&1));
//!
//! // Removing a node returns its value.
//! assert_eq!(tree.remove(&1), Some(1));
//! assert!(tree.find(&1).is_none());
//!
//! // Removing something that isn't there does nothing.
//! assert_eq!(tree.remove(&1), None);
//! assert_eq!(tree.len(), 1);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use tracing::{debug, trace};

use crate::util::Height;

/// An exclusively owned, possibly empty, subtree.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// A Binary Search Tree that never rebalances itself. This can be used for inserting, finding,
/// and removing values, for walking the values in several orders, and for asking a few
/// questions about the shape of the tree.
///
/// Everything except [`insert_recursively`][Self::insert_recursively] and
/// [`find_recursively`][Self::find_recursively] walks the tree with a loop or a heap allocated
/// stack, so a tree that has degenerated into one long chain is still safe to use.
pub struct OrderedTree<T> {
    root: Link<T>,
    len: usize,
}

/// One stored value and its (possibly empty) left and right subtrees.
pub struct Node<T> {
    value: T,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Default for OrderedTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for OrderedTree<T> {
    // The derived drop glue would recurse once per level which overflows the stack for long,
    // list-shaped trees. Unlink every node onto a heap allocated stack instead.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<T> Clone for OrderedTree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        let mut root = None;
        {
            // Each entry is a node to copy and the empty slot its copy goes into.
            let mut stack: Vec<(&Node<T>, &mut Link<T>)> = Vec::new();
            if let Some(node) = self.root() {
                stack.push((node, &mut root));
            }
            while let Some((source, slot)) = stack.pop() {
                let Node { left, right, .. } =
                    &mut **slot.insert(Node::new_boxed(source.value.clone()));
                if let Some(source_left) = source.left() {
                    stack.push((source_left, left));
                }
                if let Some(source_right) = source.right() {
                    stack.push((source_right, right));
                }
            }
        }

        Self {
            root,
            len: self.len,
        }
    }
}

/// Two trees are equal when they have the same shape and hold equal values in the same places.
impl<T> PartialEq for OrderedTree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }

        let mut stack = vec![(self.root(), other.root())];
        while let Some(pair) = stack.pop() {
            match pair {
                (None, None) => {}
                (Some(a), Some(b)) if a.value == b.value => {
                    stack.push((a.left(), b.left()));
                    stack.push((a.right(), b.right()));
                }
                _ => return false,
            }
        }
        true
    }
}

impl<T> Eq for OrderedTree<T> where T: Eq {}

impl<T> fmt::Debug for OrderedTree<T>
where
    T: fmt::Debug,
{
    // Pre-order is enough to rebuild the shape of the tree and doesn't need recursion.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedTree")
            .field("len", &self.len)
            .field("pre_order", &self.dfs_pre_order())
            .finish()
    }
}

/// Only shows the values of the node's children, not whole subtrees.
impl<T> fmt::Debug for Node<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("left", &self.left().map(Node::value))
            .field("right", &self.right().map(Node::value))
            .finish()
    }
}

impl<T> OrderedTree<T> {
    /// Generate a new, empty `OrderedTree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// The number of values stored in the tree, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree has no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of levels in the tree. An empty tree has a height of 0 and a tree with just a
    /// root has a height of 1.
    pub fn height(&self) -> usize {
        // Walk a level at a time so degenerate trees don't recurse deeply.
        let mut height = 0;
        let mut level: Vec<&Node<T>> = self.root().into_iter().collect();
        while !level.is_empty() {
            height += 1;
            level = level
                .into_iter()
                .flat_map(|node| node.left().into_iter().chain(node.right()))
                .collect();
        }
        height
    }

    /// Inserts `value` by walking down from the root in a loop and returns the tree so calls can
    /// be chained.
    ///
    /// Values strictly greater than a node go right and everything else goes left. That means
    /// inserting a value that is already present stores a second copy of it in the left subtree
    /// of the first one. See [`insert_recursively`][Self::insert_recursively] for a variant that
    /// ignores duplicates instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(2).insert(1).insert(3).insert(2);
    ///
    /// assert_eq!(tree.len(), 4);
    /// assert_eq!(tree.dfs_in_order(), [&1, &2, &2, &3]);
    /// ```
    pub fn insert(&mut self, value: T) -> &mut Self
    where
        T: Ord,
    {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match value.cmp(&node.value) {
                Ordering::Greater => &mut node.right,
                Ordering::Less | Ordering::Equal => &mut node.left,
            };
        }
        *slot = Some(Node::new_boxed(value));
        self.len += 1;

        trace!(len = self.len, "inserted value");
        self
    }

    /// Inserts `value` by recursing down from the root and returns the tree so calls can be
    /// chained.
    ///
    /// Unlike [`insert`][Self::insert], inserting a value that is already present leaves the
    /// tree untouched. For sequences without repeated values both build the same tree.
    ///
    /// This recurses once per level, so on a tree tens of thousands of levels deep it can run
    /// out of stack. Prefer [`insert`][Self::insert] when the input may be sorted.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert_recursively(2)
    ///     .insert_recursively(1)
    ///     .insert_recursively(3)
    ///     .insert_recursively(2);
    ///
    /// assert_eq!(tree.len(), 3);
    /// assert_eq!(tree.dfs_in_order(), [&1, &2, &3]);
    /// ```
    pub fn insert_recursively(&mut self, value: T) -> &mut Self
    where
        T: Ord,
    {
        if Node::insert_recursively(&mut self.root, value) {
            self.len += 1;
            trace!(len = self.len, "inserted value");
        } else {
            debug!(len = self.len, "value already present, recursive insert ignored it");
        }
        self
    }

    /// Potentially finds the node holding `value` by walking down from the root in a loop. If no
    /// node has the value, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// tree.insert(2).insert(1);
    ///
    /// let node = tree.find(&2).unwrap();
    /// assert_eq!(node.value(), &2);
    /// assert_eq!(node.left().map(|left| left.value()), Some(&1));
    /// assert!(tree.find(&42).is_none());
    /// ```
    pub fn find(&self, value: &T) -> Option<&Node<T>>
    where
        T: Ord,
    {
        let mut current = self.root();
        while let Some(node) = current {
            current = match value.cmp(&node.value) {
                Ordering::Equal => return Some(node),
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
            };
        }
        None
    }

    /// The recursive twin of [`find`][Self::find]. Both always return the same node.
    ///
    /// Like [`insert_recursively`][Self::insert_recursively] this recurses once per level.
    pub fn find_recursively(&self, value: &T) -> Option<&Node<T>>
    where
        T: Ord,
    {
        self.root().and_then(|root| root.find_recursively(value))
    }

    /// Removes one node holding `value` and returns the value. If the tree never contained
    /// `value`, the tree is left alone and `None` is returned.
    ///
    /// The walk down keeps a cursor on the link that owns the current node, which plays the part
    /// of a parent pointer: once the node is found, whatever replaces it is written back through
    /// that link. A node with two children isn't unlinked itself. Its in-order successor (the
    /// smallest node in its right subtree) is unlinked instead and the successor's value moves
    /// into the node.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let mut tree: OrderedTree<_> = [5, 3, 8, 7, 9].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&5), Some(5));
    /// assert_eq!(tree.dfs_pre_order(), [&7, &3, &8, &9]);
    /// assert_eq!(tree.remove(&5), None);
    /// ```
    pub fn remove(&mut self, value: &T) -> Option<T>
    where
        T: Ord,
    {
        let mut slot = &mut self.root;
        let removed = loop {
            let ordering = match slot.as_deref() {
                Some(node) => value.cmp(&node.value),
                None => break None,
            };
            if ordering == Ordering::Equal {
                break Node::unlink(slot);
            }

            match slot {
                Some(node) => {
                    slot = if ordering == Ordering::Less {
                        &mut node.left
                    } else {
                        &mut node.right
                    }
                }
                None => break None,
            }
        };

        if removed.is_some() {
            self.len -= 1;
            trace!(len = self.len, "removed value");
        } else {
            debug!(len = self.len, "value to remove not found");
        }
        removed
    }

    /// Whether, for every node, the heights of its left and right subtrees differ by at most
    /// one. An empty tree is balanced.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let bushy: OrderedTree<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    /// let stringy: OrderedTree<_> = [1, 2, 3, 4, 5].into_iter().collect();
    ///
    /// assert!(bushy.is_balanced());
    /// assert!(!stringy.is_balanced());
    /// ```
    pub fn is_balanced(&self) -> bool {
        Node::checked_height(self.root()) != Height::Unbalanced
    }

    /// Finds the second largest value in the tree. Trees with fewer than two nodes don't have
    /// one and return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = [5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    /// assert_eq!(tree.find_second_highest(), Some(&8));
    ///
    /// let tree: OrderedTree<_> = [5].into_iter().collect();
    /// assert_eq!(tree.find_second_highest(), None);
    /// ```
    pub fn find_second_highest(&self) -> Option<&T> {
        let mut largest = self.root()?;
        let mut parent = None;
        while let Some(right) = largest.right() {
            parent = Some(largest);
            largest = right;
        }

        // With no left subtree, nothing sits between the largest node and its parent.
        match largest.left() {
            Some(left) => Some(&left.rightmost().value),
            None => parent.map(|parent| &parent.value),
        }
    }

    pub(crate) fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }
}

impl<T> FromIterator<T> for OrderedTree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for OrderedTree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T> Node<T> {
    fn new_boxed(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            left: None,
            right: None,
        })
    }

    /// The value stored in this node.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The root of this node's left subtree, if it has one.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The root of this node's right subtree, if it has one.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// The largest node in the subtree rooted here.
    fn rightmost(&self) -> &Self {
        let mut current = self;
        while let Some(right) = current.right() {
            current = right;
        }
        current
    }

    /// Returns whether `value` was added to the subtree behind `link`.
    fn insert_recursively(link: &mut Link<T>, value: T) -> bool
    where
        T: Ord,
    {
        match link {
            None => {
                *link = Some(Self::new_boxed(value));
                true
            }
            Some(node) => match value.cmp(&node.value) {
                Ordering::Less => Self::insert_recursively(&mut node.left, value),
                Ordering::Greater => Self::insert_recursively(&mut node.right, value),
                Ordering::Equal => false,
            },
        }
    }

    fn find_recursively(&self, value: &T) -> Option<&Self>
    where
        T: Ord,
    {
        match value.cmp(&self.value) {
            Ordering::Equal => Some(self),
            Ordering::Less => self.left().and_then(|left| left.find_recursively(value)),
            Ordering::Greater => self.right().and_then(|right| right.find_recursively(value)),
        }
    }

    /// Removes the node owned by `link` and writes whatever should take its place back into
    /// `link`. Returns the removed value, or `None` if `link` was empty.
    fn unlink(link: &mut Link<T>) -> Option<T> {
        let node = link.as_mut()?;
        if node.left.is_some() && node.right.is_some() {
            // The node stays where it is and only its value is swapped out.
            let successor = Self::take_leftmost(&mut node.right)?;
            return Some(mem::replace(&mut node.value, successor));
        }

        let mut node = link.take()?;
        *link = node.left.take().or_else(|| node.right.take());
        Some(node.value)
    }

    /// Unlinks the smallest node of the subtree owned by `link`, moving its right subtree up into
    /// its place, and returns its value.
    fn take_leftmost(link: &mut Link<T>) -> Option<T> {
        let mut slot = link;
        while slot.as_ref().map_or(false, |node| node.left.is_some()) {
            slot = &mut slot.as_mut()?.left;
        }

        let node = slot.take()?;
        let Self { value, right, .. } = *node;
        *slot = right;
        Some(value)
    }

    /// Computes the height of the subtree rooted at `root` bottom up, giving up as soon as any
    /// node in it is found to be unbalanced.
    fn checked_height(root: Option<&Self>) -> Height {
        // Nodes are pushed once on the way down and again, marked `true`, to be measured after
        // both their subtrees. Measured subtree heights wait on `heights`, left below right.
        let mut stack: Vec<(&Self, bool)> = root.into_iter().map(|node| (node, false)).collect();
        let mut heights: Vec<usize> = Vec::new();

        while let Some((node, children_measured)) = stack.pop() {
            if !children_measured {
                stack.push((node, true));
                stack.extend(node.right().map(|right| (right, false)));
                stack.extend(node.left().map(|left| (left, false)));
                continue;
            }

            let right = match node.right() {
                Some(_) => heights.pop().unwrap_or(0),
                None => 0,
            };
            let left = match node.left() {
                Some(_) => heights.pop().unwrap_or(0),
                None => 0,
            };
            if left.abs_diff(right) > 1 {
                return Height::Unbalanced;
            }
            heights.push(left.max(right) + 1);
        }

        Height::Balanced(heights.pop().unwrap_or(0))
    }
}

#[cfg(test)]
impl OrderedTree<u32> {
    /// Builds `0..len` as one long chain of left children. Inserting this many sorted values
    /// would take quadratic time, so the nodes are linked up by hand.
    pub(crate) fn left_chain(len: u32) -> Self {
        let mut root: Link<u32> = None;
        for value in 0..len {
            root = Some(Box::new(Node {
                value,
                left: root,
                right: None,
            }));
        }
        Self {
            root,
            len: len as usize,
        }
    }
}
