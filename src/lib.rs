//! This crate exposes an ordered, unbalanced Binary Search Tree (BST) along with the usual
//! traversals and a couple of classic queries on its shape.
//!
//! ## Shape
//!
//! Every value in a node's left subtree sorts no higher than the node and every value in its
//! right subtree sorts no lower, so an in-order walk comes out sorted and a lookup only ever
//! follows one path down. How long that path is depends entirely on the order values went in:
//! [`OrderedTree`] never rotates anything. Inserting `1, 2, 3, 4, 5` builds a chain where every
//! node hangs off the right of the one before, while inserting `3, 2, 4, 1, 5` gives two short
//! branches. [`OrderedTree::is_balanced`] tells the two apart.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::OrderedTree;
//!
//! let mut tree = OrderedTree::new();
//! tree.insert(10).insert(5).insert(15).insert(3).insert(7);
//!
//! assert_eq!(tree.dfs_in_order(), [&3, &5, &7, &10, &15]);
//! assert_eq!(tree.bfs(), [&10, &5, &15, &3, &7]);
//! assert_eq!(tree.find_second_highest(), Some(&10));
//! assert!(tree.is_balanced());
//!
//! assert_eq!(tree.remove(&10), Some(10));
//! assert!(tree.find(&10).is_none());
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod traverse;
pub mod tree;
mod util;

pub use traverse::Iter;
pub use tree::{Node, OrderedTree};
