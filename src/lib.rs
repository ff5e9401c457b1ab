//! This crate exposes an ordered collection built on a linked Binary Search Tree (BST), mostly
//! to show how searching an unbalanced BST degrades and how rebuilding it restores the cost.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to insert, find, and delete
//! stored items. BSTs are typically defined recursively using the notion of a `Node`. A `Node`
//! stores one item and has up to two child `Node`s. The invariants of this BST are:
//!
//! 1. For every `Node`, all the `Node`s in its left subtree hold an item less than its own,
//!    except that after [`Tree::rebalance`] or [`Tree::remove`] the left subtree may end in
//!    items equal to it.
//! 2. For every `Node`, all the `Node`s in its right subtree hold an item greater than or equal
//!    to its own. Equal items are therefore stored again rather than merged.
//!
//! Searches step left only for strictly smaller items and right only for strictly larger ones,
//! so they stay correct wherever the equal items ended up.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching takes `O(height)`, where `height` is the longest path from the root `Node` to a leaf
//! `Node`. Nothing here keeps the height near `O(lg N)` on every mutation: inserting items in
//! ascending order builds a chain of height `N - 1`. [`Tree::rebalance`] rebuilds the tree from its
//! sorted contents, bringing the height back down to `ceil(lg (N + 1)) - 1`.
//!
//! BSTs also naturally support sorted iteration by visiting the left subtree, then the subtree
//! root, then the right subtree (see [`Tree::inorder`]).

#![deny(missing_docs)]

pub mod error;
pub mod iter;
pub mod linked;

pub use error::{Error, Result};
pub use linked::Tree;
