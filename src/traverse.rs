//! Walking an [`OrderedTree`] in depth first and breadth first orders.
//!
//! Each traversal builds a fresh `Vec` of references into the tree, so it reflects the tree as
//! it was at the time of the call. Every traversal of an empty tree is an empty `Vec`. None of
//! them recurse: pending nodes wait on a heap allocated stack (or queue, for [`bfs`]), so very
//! deep trees are fine.
//!
//! [`bfs`]: OrderedTree::bfs
//!
//! # Examples
//!
//! ```
//! use ordered_tree::OrderedTree;
//!
//! //        10
//! //      /    \
//! //     5      15
//! //    / \    /  \
//! //   3   7  12  18
//! let tree: OrderedTree<_> = [10, 5, 15, 3, 7, 12, 18].into_iter().collect();
//!
//! assert_eq!(tree.dfs_pre_order(), [&10, &5, &3, &7, &15, &12, &18]);
//! assert_eq!(tree.dfs_in_order(), [&3, &5, &7, &10, &12, &15, &18]);
//! assert_eq!(tree.dfs_post_order(), [&3, &7, &5, &12, &18, &15, &10]);
//! assert_eq!(tree.bfs(), [&10, &5, &15, &3, &7, &12, &18]);
//! ```

use std::collections::VecDeque;
use std::fmt;

use crate::tree::{Node, OrderedTree};

impl<T> OrderedTree<T> {
    /// Visits each node before its left subtree and then its right subtree.
    pub fn dfs_pre_order(&self) -> Vec<&T> {
        let mut values = Vec::new();
        let mut stack: Vec<&Node<T>> = self.root().into_iter().collect();

        while let Some(node) = stack.pop() {
            values.push(node.value());
            // Right goes on first so the left subtree is finished before it.
            stack.extend(node.right());
            stack.extend(node.left());
        }

        values
    }

    /// Visits each node's left subtree, then the node, then its right subtree. This yields the
    /// values in ascending order.
    pub fn dfs_in_order(&self) -> Vec<&T> {
        self.iter().collect()
    }

    /// Visits each node after both of its subtrees.
    pub fn dfs_post_order(&self) -> Vec<&T> {
        // Node, right, left is exactly post-order backwards.
        let mut values = Vec::new();
        let mut stack: Vec<&Node<T>> = self.root().into_iter().collect();

        while let Some(node) = stack.pop() {
            values.push(node.value());
            stack.extend(node.left());
            stack.extend(node.right());
        }

        values.reverse();
        values
    }

    /// Visits the nodes level by level, left to right within a level.
    pub fn bfs(&self) -> Vec<&T> {
        let mut values = Vec::new();
        let mut queue: VecDeque<&Node<T>> = self.root().into_iter().collect();

        while let Some(node) = queue.pop_front() {
            values.push(node.value());
            queue.extend(node.left());
            queue.extend(node.right());
        }

        values
    }

    /// A lazy iterator over the values in ascending order, the same order as
    /// [`dfs_in_order`][Self::dfs_in_order] without collecting them first.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = [2, 3, 1].into_iter().collect();
    /// let doubled: Vec<_> = tree.iter().map(|x| x * 2).collect();
    ///
    /// assert_eq!(doubled, [2, 4, 6]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left_spine(self.root());
        iter
    }
}

impl<'a, T> IntoIterator for &'a OrderedTree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An in-order iterator over the values of an [`OrderedTree`], created by
/// [`OrderedTree::iter`].
pub struct Iter<'a, T> {
    /// Nodes whose value hasn't been yielded yet and whose left subtree has been, topmost last.
    stack: Vec<&'a Node<T>>,
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
        }
    }
}

impl<T> fmt::Debug for Iter<'_, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> Iter<'a, T> {
    fn push_left_spine(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(node.value())
    }
}
