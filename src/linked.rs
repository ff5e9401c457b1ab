//! A linked BST. Every node exclusively owns its two children through `Option<Box<_>>` slots and
//! there are no parent pointers, so all restructuring happens by moving boxes between slots.
//!
//! The tree never balances itself. Ascending inserts degrade it into a list and
//! [`rebalance`][Tree::rebalance] rebuilds it from its sorted contents on demand.
//!
//! # Examples
//!
//! ```
//! use linked_bst::{Error, Tree};
//!
//! let mut tree: Tree<_> = (1..=7).collect();
//!
//! // Ascending inserts make a stick.
//! assert_eq!(tree.height(), Some(6));
//! assert!(!tree.is_balanced());
//!
//! tree.rebalance();
//! assert_eq!(tree.height(), Some(2));
//! assert!(tree.is_balanced());
//!
//! assert_eq!(tree.remove(&4), Ok(4));
//! assert_eq!(tree.remove(&4), Err(Error::ItemNotFound));
//! assert_eq!(tree.find(&4), None);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::mem;

use crate::error::{Error, Result};
use crate::iter::{InOrder, Iter};

/// An owning slot for a subtree. `None` is an empty subtree.
pub(crate) type Link<T> = Option<Box<Node<T>>>;

/// A Binary Search Tree over comparable items. Items less than a node's item live in its left
/// subtree and items greater than *or equal to* it live in its right subtree, so duplicates are
/// kept as separate nodes rather than counted.
///
/// **Note** [`rebalance`][Tree::rebalance] and [`remove`][Tree::remove] can leave items *equal*
/// to a node at the end of its left subtree: the middle of a sorted run of duplicates becomes a
/// root with its equals on both sides, and a lifted donor leaves its other copies behind. Every
/// lookup only steps left past a node for strictly smaller items and right for strictly larger
/// ones, so none of them depend on where equal items sit.
pub struct Tree<T> {
    root: Link<T>,
    size: usize,
}

/// A single stored item. A node with two empty slots is a leaf.
pub(crate) struct Node<T> {
    pub(crate) data: T,
    pub(crate) left: Link<T>,
    pub(crate) right: Link<T>,
}

impl<T> Node<T> {
    fn new_boxed(data: T) -> Box<Self> {
        Box::new(Node {
            data,
            left: None,
            right: None,
        })
    }

    /// Splices the largest node out of the subtree in `slot` and returns its item. The largest
    /// node has no right child, so its left child (if any) takes over its slot.
    fn take_max(mut slot: &mut Link<T>) -> Option<T> {
        while slot.as_ref().map_or(false, |node| node.right.is_some()) {
            slot = &mut slot.as_mut().expect("loop condition saw a node").right;
        }

        let max = slot.take()?;
        let Node { data, left, .. } = *max;
        *slot = left;
        Some(data)
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        drop_nodes(self.root.take());
    }
}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            root: None,
            size: 0,
        }
    }

    /// The number of items stored in the tree, counting duplicates.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the tree holds no items.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Removes every item from the tree.
    pub fn clear(&mut self) {
        log::trace!("clearing tree of {} items", self.size);
        drop_nodes(self.root.take());
        self.size = 0;
    }

    /// Inserts `item` into the tree. This never fails and never rejects duplicates: an item equal
    /// to an existing one is placed in that node's right subtree.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.insert(5);
    /// tree.insert(5);
    ///
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.find(&5), Some(&5));
    /// ```
    pub fn insert(&mut self, item: T)
    where
        T: Ord,
    {
        let mut slot = &mut self.root;
        while slot.is_some() {
            let node = slot.as_mut().expect("loop condition saw a node");
            slot = if item < node.data {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *slot = Some(Node::new_boxed(item));
        self.size += 1;
    }

    /// Potentially finds the stored item equal to `item`. If no node holds such an item, `None`
    /// is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = vec![5, 3, 8].into_iter().collect();
    ///
    /// assert_eq!(tree.find(&3), Some(&3));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut link = self.root.as_deref();
        while let Some(node) = link {
            match item.cmp(&node.data) {
                Ordering::Less => link = node.left.as_deref(),
                Ordering::Equal => return Some(&node.data),
                Ordering::Greater => link = node.right.as_deref(),
            }
        }
        None
    }

    /// Whether an item equal to `item` is stored in the tree.
    pub fn contains(&self, item: &T) -> bool
    where
        T: Ord,
    {
        self.find(item).is_some()
    }

    /// Removes one item equal to `item` from the tree and returns it.
    ///
    /// A node with two children keeps its place in the tree: it takes over the largest item of
    /// its left subtree and that item's node is spliced out instead. Any other node is replaced
    /// in its parent's slot by its only child, if it has one.
    ///
    /// # Errors
    ///
    /// [`Error::ItemNotFound`] if no stored item equals `item`.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::{Error, Tree};
    ///
    /// let mut tree: Tree<_> = vec![5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    ///
    /// assert_eq!(tree.remove(&5), Ok(5));
    /// assert_eq!(tree.inorder().copied().collect::<Vec<_>>(), [1, 3, 4, 7, 8, 9]);
    ///
    /// assert_eq!(tree.remove(&5), Err(Error::ItemNotFound));
    /// ```
    pub fn remove(&mut self, item: &T) -> Result<T>
    where
        T: Ord,
    {
        let slot = self.slot_of(item);
        let node = slot.as_mut().ok_or(Error::ItemNotFound)?;

        let removed = if node.left.is_some() && node.right.is_some() {
            let donor = Node::take_max(&mut node.left).expect("left subtree is not empty");
            mem::replace(&mut node.data, donor)
        } else {
            let node = slot.take().expect("matched node is in its slot");
            let Node { data, left, right } = *node;
            *slot = left.or(right);
            data
        };

        self.size -= 1;
        log::trace!("removed item, {} items remain", self.size);
        Ok(removed)
    }

    /// Overwrites the stored item equal to `item` with `new_item` and returns the old one, or
    /// `None` if there is no such item.
    ///
    /// The node is not moved. If `new_item` doesn't belong at that node's position the tree no
    /// longer satisfies the search order: later lookups may miss items and
    /// [`rebalance`][Tree::rebalance] keeps them where in-order traversal finds them.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree: Tree<_> = vec![2, 1, 3].into_iter().collect();
    ///
    /// assert_eq!(tree.replace(&1, 0), Some(1));
    /// assert_eq!(tree.replace(&1, 0), None);
    /// assert_eq!(tree.find(&0), Some(&0));
    /// ```
    pub fn replace(&mut self, item: &T, new_item: T) -> Option<T>
    where
        T: Ord,
    {
        let mut link = self.root.as_deref_mut();
        while let Some(node) = link {
            match item.cmp(&node.data) {
                Ordering::Less => link = node.left.as_deref_mut(),
                Ordering::Equal => return Some(mem::replace(&mut node.data, new_item)),
                Ordering::Greater => link = node.right.as_deref_mut(),
            }
        }
        None
    }

    /// The number of edges on the longest path from the root down to a leaf. A single node has
    /// height `Some(0)` and the empty tree has no height at all.
    pub fn height(&self) -> Option<usize> {
        let mut height = None;
        let mut stack: Vec<(&Node<T>, usize)> =
            self.root.as_deref().map(|n| (n, 0)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            height = height.max(Some(depth));
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }
        height
    }

    /// A rough balance check: the tree is balanced when its height is below `2 * log2(len + 1)`.
    /// This bounds the cost of a search rather than checking the height of every subtree, so it
    /// accepts trees an AVL tree would rotate. The empty tree is balanced.
    pub fn is_balanced(&self) -> bool {
        match self.height() {
            Some(height) => (height as f64) < 2.0 * ((self.size + 1) as f64).log2(),
            None => true,
        }
    }

    /// Every item `x` with `low <= x <= high`, in the order [`iter`][Tree::iter] visits them.
    ///
    /// **Note** When nothing falls in the range, the result is `[low, high]` rather than empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = vec![5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    ///
    /// let mut found = tree.range_find(&2, &6);
    /// found.sort();
    /// assert_eq!(found, [&3, &4, &5]);
    ///
    /// assert_eq!(tree.range_find(&20, &30), [&20, &30]);
    /// ```
    pub fn range_find<'a>(&'a self, low: &'a T, high: &'a T) -> Vec<&'a T>
    where
        T: Ord,
    {
        let found: Vec<&T> = self
            .iter()
            .filter(|&item| low <= item && item <= high)
            .collect();

        if found.is_empty() {
            vec![low, high]
        } else {
            found
        }
    }

    /// Rebuilds the tree from its sorted contents so that its height is `ceil(log2(len + 1)) - 1`.
    /// The same items stay in the tree in the same ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let mut tree: Tree<_> = (1..=7).collect();
    /// tree.rebalance();
    ///
    /// // The middle item becomes the root.
    /// assert_eq!(tree.iter().next(), Some(&4));
    /// assert_eq!(tree.height(), Some(2));
    /// ```
    pub fn rebalance(&mut self) {
        let height_before = log::log_enabled!(log::Level::Debug).then(|| self.height());

        let items = self.take_sorted();
        let size = items.len();
        self.root = build_balanced(&mut items.into_iter(), size);
        self.size = size;

        if let Some(before) = height_before {
            log::debug!(
                "rebalanced {} items: height {:?} -> {:?}",
                size,
                before,
                self.height()
            );
        }
    }

    /// The smallest item strictly greater than `item`, or `None` if there isn't one.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = vec![5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    ///
    /// assert_eq!(tree.successor(&5), Some(&7));
    /// assert_eq!(tree.successor(&6), Some(&7));
    /// assert_eq!(tree.successor(&9), None);
    /// ```
    pub fn successor(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut best = None;
        let mut link = self.root.as_deref();
        while let Some(node) = link {
            if node.data > *item {
                best = Some(&node.data);
                link = node.left.as_deref();
            } else {
                link = node.right.as_deref();
            }
        }
        best
    }

    /// The largest item strictly less than `item`, or `None` if there isn't one.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = vec![5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    ///
    /// assert_eq!(tree.predecessor(&5), Some(&4));
    /// assert_eq!(tree.predecessor(&1), None);
    /// ```
    pub fn predecessor(&self, item: &T) -> Option<&T>
    where
        T: Ord,
    {
        let mut best = None;
        let mut link = self.root.as_deref();
        while let Some(node) = link {
            if node.data < *item {
                best = Some(&node.data);
                link = node.right.as_deref();
            } else {
                link = node.left.as_deref();
            }
        }
        best
    }

    /// A pre-order iterator: each item comes before its left subtree, which comes before its
    /// right subtree. Every call starts over from the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = vec![5, 3, 8, 1, 4].into_iter().collect();
    ///
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [5, 3, 1, 4, 8]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.as_deref(), self.size)
    }

    /// An in-order iterator, yielding items in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use linked_bst::Tree;
    ///
    /// let tree: Tree<_> = vec![5, 3, 8, 1, 4].into_iter().collect();
    ///
    /// assert_eq!(tree.inorder().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 8]);
    /// ```
    pub fn inorder(&self) -> InOrder<'_, T> {
        InOrder::new(self.root.as_deref(), self.size)
    }

    /// Consumes the tree and returns its items in ascending order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        self.take_sorted()
    }

    /// Moves every item out of the tree in in-order sequence, leaving the tree empty.
    fn take_sorted(&mut self) -> Vec<T> {
        let mut items = Vec::with_capacity(self.size);
        let mut stack = Vec::new();
        let mut current = self.root.take();
        self.size = 0;

        loop {
            while let Some(mut node) = current {
                current = node.left.take();
                stack.push(node);
            }
            let Some(node) = stack.pop() else {
                break;
            };
            let Node { data, right, .. } = *node;
            items.push(data);
            current = right;
        }

        items
    }

    /// The slot holding the first node on the search path whose item equals `item`, or the empty
    /// slot where the search fell off the tree.
    fn slot_of(&mut self, item: &T) -> &mut Link<T>
    where
        T: Ord,
    {
        let mut slot = &mut self.root;
        loop {
            let go_left = match slot.as_deref() {
                Some(node) if *item != node.data => *item < node.data,
                _ => return slot,
            };
            let node = slot.as_mut().expect("matched a node above");
            slot = if go_left {
                &mut node.left
            } else {
                &mut node.right
            };
        }
    }
}

/// Builds a tree of minimal height from the next `len` items of `items`, which must be sorted.
/// The middle item becomes the root with the items before it on the left and those after it on
/// the right. Recursion depth is the height of the result.
fn build_balanced<T>(items: &mut impl Iterator<Item = T>, len: usize) -> Link<T> {
    if len == 0 {
        return None;
    }

    let mid = len / 2;
    let left = build_balanced(items, mid);
    let data = items.next().expect("iterator yields `len` items");
    let right = build_balanced(items, len - mid - 1);

    Some(Box::new(Node { data, left, right }))
}

/// Drops a subtree one node at a time so long chains don't recurse through `Box`'s destructor.
fn drop_nodes<T>(root: Link<T>) {
    let mut stack: Vec<Box<Node<T>>> = root.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

impl<T> Clone for Tree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        // Visit node, right, left so that reversing the visit gives a post-order: every subtree
        // is cloned before its parent, which then pops its right and left clones off `built`.
        let mut visited = Vec::with_capacity(self.size);
        let mut stack: Vec<&Node<T>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            visited.push(node);
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }

        let mut built: Vec<Box<Node<T>>> = Vec::new();
        for node in visited.into_iter().rev() {
            let right = node
                .right
                .as_ref()
                .map(|_| built.pop().expect("right subtree is cloned before its parent"));
            let left = node
                .left
                .as_ref()
                .map(|_| built.pop().expect("left subtree is cloned before its parent"));
            built.push(Box::new(Node {
                data: node.data.clone(),
                left,
                right,
            }));
        }

        Self {
            root: built.pop(),
            size: self.size,
        }
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("size", &self.size)
            .field("items", &self.inorder().collect::<Vec<_>>())
            .finish()
    }
}

/// Draws the tree rotated a quarter turn counterclockwise: the right subtree is above its parent,
/// the left subtree below, and every level is indented by one more `"| "`.
impl<T> fmt::Display for Tree<T>
where
    T: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = Vec::new();
        let mut current = self.root.as_deref().map(|n| (n, 0usize));

        loop {
            while let Some((node, level)) = current {
                stack.push((node, level));
                current = node.right.as_deref().map(|n| (n, level + 1));
            }
            let Some((node, level)) = stack.pop() else {
                return Ok(());
            };
            for _ in 0..level {
                f.write_str("| ")?;
            }
            writeln!(f, "{}", node.data)?;
            current = node.left.as_deref().map(|n| (n, level + 1));
        }
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
