//! Errors surfaced by [`Tree`][crate::Tree] operations.
//!
//! Only removal can fail. Lookups that come up empty (`find`, `replace`, `successor`,
//! `predecessor`) return `None` instead since a missing item is an expected outcome there.

/// Errors triggered by tree operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// [`Tree::remove`][crate::Tree::remove] was asked for an item the tree doesn't hold.
    #[error("item not found in tree")]
    ItemNotFound,
}

/// Shorthand for results whose error is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
