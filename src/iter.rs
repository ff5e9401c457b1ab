//! Borrowing traversals over a [`Tree`][crate::Tree]. Both keep an explicit stack of pending
//! nodes instead of recursing, so a tree that degraded into a long chain is walked in constant
//! native stack space.
//!
//! Mutating the tree while one of these is alive is rejected by the borrow checker.

use std::iter::FusedIterator;

use crate::linked::Node;

/// A pre-order iterator over the items of a tree, created by [`Tree::iter`][crate::Tree::iter].
///
/// Popping a node pushes its right child and then its left child, so the whole left subtree is
/// drained before the right one is touched.
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        Self {
            stack: root.into_iter().collect(),
            remaining: len,
        }
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.right.as_deref());
        self.stack.extend(node.left.as_deref());
        self.remaining -= 1;

        Some(&node.data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// An in-order iterator over the items of a tree, created by
/// [`Tree::inorder`][crate::Tree::inorder]. Items come out in ascending order.
pub struct InOrder<'a, T> {
    /// Nodes whose left subtree is being visited.
    stack: Vec<&'a Node<T>>,
    /// The next subtree to descend into.
    current: Option<&'a Node<T>>,
    remaining: usize,
}

impl<'a, T> InOrder<'a, T> {
    pub(crate) fn new(root: Option<&'a Node<T>>, len: usize) -> Self {
        Self {
            stack: Vec::new(),
            current: root,
            remaining: len,
        }
    }
}

impl<T> Clone for InOrder<'_, T> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
            current: self.current,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> Iterator for InOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.stack.push(node);
            self.current = node.left.as_deref();
        }

        let node = self.stack.pop()?;
        self.current = node.right.as_deref();
        self.remaining -= 1;

        Some(&node.data)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for InOrder<'_, T> {}
impl<T> FusedIterator for InOrder<'_, T> {}
