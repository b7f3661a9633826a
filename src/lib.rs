//! Implements a width-limited N-ary tree which fills itself breadth-first and grows from the root upward, together with the traversal machinery needed to give every node a readable position.
//!
//! # Overview
//! A [`BoundedTree`] is made of *container* nodes, which own up to `width` children, and *leaf* nodes, which carry an optional context payload. Leaves are inserted one at a time. Every leaf lands on the deepest container level; space on that level is used up before the tree gets any deeper, and when the root itself is full the tree grows by putting a new root above the old one. The resulting shape depends only on the width and the order of insertions, so two trees fed the same sequence are always identical.
//!
//! Positions are reported as *materialized paths*: the sibling indices from the root down to a node, joined with `/`, with the root always being `0`. Paths are not stored in the nodes. Instead, a [`PathTracker`] updates a single path incrementally while a depth-first pre-order walk moves through the tree.
//!
//! ```rust
//! use canopy::BoundedTree;
//!
//! let mut tree = BoundedTree::new(2).unwrap();
//! for i in 1..=3 {
//!     tree.add_leaf(i).unwrap();
//! }
//! assert_eq!(tree.depth(), 1);
//! assert_eq!(
//!     tree.to_string(),
//!     "0\n0/0\n0/0/0/1\n0/0/1/2\n0/1\n0/1/0/3\nAdded: 3\nRejected: 0\n",
//! );
//! ```
//!
//! # Storage
//! Nodes are kept in an arena. Children are stored as ordered lists of keys into that arena and the link to the parent is a key as well, so there are no reference cycles and no reference counting. The arena type is chosen with the [`Storage`] trait; [`ListStorage`] allows defining one in terms of a list-like collection. Out of the box, [`Vec`], [`VecDeque`] and [`ArrayVec`] work as storages, plus [`SmallVec`], [`SlotMap`] and [`DenseSlotMap`] behind feature flags. Since trees never shrink, storages never need to support removal.
//!
//! # Feature flags
//! - `std` (**enabled by default**): enables the full standard library, disabling `no_std` for the crate. Currently, this only adds [`Error`] trait implementations for some types. Without it the crate still needs `alloc`.
//! - `unwind_safety` (**enabled by default**): when an internal invariant check fails in a debug build, abort the process instead of unwinding through a possibly corrupted tree.
//! - `smallvec`: adds a `ListStorage` trait implementation for [`SmallVec`].
//! - `slotmap`: adds `Storage` trait implementations for [`SlotMap`] and [`DenseSlotMap`].
//! - `tracing`: emits `tracing` events when the tree is re-rooted (debug level) and when leaves are placed or rejected (trace level).
//!
//! # Public dependencies
//! - `arrayvec` (**required**): `^0.5`
//! - `smallvec` (*optional*): `^1.4`
//! - `slotmap` (*optional*): `^1.0`
//!
//! [`BoundedTree`]: bounded_tree/struct.BoundedTree.html " "
//! [`PathTracker`]: traversal/struct.PathTracker.html " "
//! [`Storage`]: storage/trait.Storage.html " "
//! [`ListStorage`]: storage/trait.ListStorage.html " "
//! [`Error`]: https://doc.rust-lang.org/std/error/trait.Error.html " "
//! [`Vec`]: https://doc.rust-lang.org/std/vec/struct.Vec.html " "
//! [`VecDeque`]: https://doc.rust-lang.org/std/collections/struct.VecDeque.html " "
//! [`SmallVec`]: https://docs.rs/smallvec/*/smallvec/struct.SmallVec.html " "
//! [`ArrayVec`]: https://docs.rs/arrayvec/*/arrayvec/struct.ArrayVec.html " "
//! [`SlotMap`]: https://docs.rs/slotmap/*/slotmap/struct.SlotMap.html " "
//! [`DenseSlotMap`]: https://docs.rs/slotmap/*/slotmap/dense/struct.DenseSlotMap.html " "

#![warn(
    rust_2018_idioms,
    clippy::cargo,
    clippy::nursery,
    missing_debug_implementations,
    missing_docs,
    unused_qualifications,
    clippy::explicit_iter_loop,
    clippy::items_after_statements,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::redundant_closure_for_method_calls,
    clippy::similar_names,
    clippy::too_many_lines,
    clippy::trivially_copy_pass_by_ref,
    clippy::unused_self,
    clippy::dbg_macro,
    clippy::get_unwrap,
    clippy::unwrap_used,
    clippy::use_debug,
)]
#![deny(anonymous_parameters, bare_trait_objects)]
#![allow(clippy::use_self)]
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(feature = "doc_cfg", feature(doc_cfg))]

extern crate alloc;

#[macro_use]
mod tracing_helpers;

pub mod storage;
#[doc(no_inline)]
pub use storage::{Storage, ListStorage, DefaultStorage};

pub mod traversal;
pub use traversal::{Visitor, Traversable, PathTracker};

pub mod bounded_tree;
pub use bounded_tree::{BoundedTree, NodeRef, Listener, DuplicateKey};

/// A prelude for using Canopy, containing the most used types in a renamed form for safe glob-importing.
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::storage::{
        Storage as TreeStorage,
        DefaultStorage as DefaultTreeStorage,
    };
    #[doc(no_inline)]
    pub use crate::bounded_tree::{
        BoundedTree,
        NodeRef as BoundedTreeNodeRef,
        Listener as BoundedTreeListener,
        DuplicateKey,
        Insertion,
        Comparison,
    };
    #[doc(no_inline)]
    pub use crate::traversal::PathTracker;
}

pub(crate) mod util;

use core::fmt::{self, Formatter, Display};

/// The payload of a node of a tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeValue<L> {
    /// A container node, i.e. one which owns children and carries no payload. Those are also sometimes referred to as internal nodes or branch nodes.
    Container,
    /// A leaf node with its context, if it was given one.
    Leaf(Option<L>),
}
impl<L> NodeValue<L> {
    /// Converts from `&NodeValue<L>` to `NodeValue<&L>`.
    #[inline]
    pub fn as_ref(&self) -> NodeValue<&L> {
        match self {
            Self::Container => NodeValue::Container,
            Self::Leaf(x) => NodeValue::Leaf(x.as_ref()),
        }
    }
    /// Returns `true` for leaf nodes, `false` for containers.
    #[inline]
    pub const fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(..))
    }
    /// Extracts the context of a leaf node. Returns `None` for containers and for leaves without context.
    #[inline]
    #[allow(clippy::missing_const_for_fn)] // const fn cannot evaluate drop
    pub fn into_context(self) -> Option<L> {
        match self {
            Self::Container => None,
            Self::Leaf(x) => x,
        }
    }
}

/// The error type returned when a tree is created with a width which cannot hold it.
///
/// A container which owns the previous root is already full if the width is 1, so such a tree could never grow past its first leaf; widths below 2 are rejected for that reason.
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub struct InvalidWidthError {
    /// The width which was requested.
    pub width: usize,
}
impl Display for InvalidWidthError {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(&alloc::format!(
            "tree width must be at least 2, got {}",
            self.width,
        ))
    }
}
#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl std::error::Error for InvalidWidthError {}

/// The error type returned by [`add_leaf`].
///
/// Neither variant is atomic with respect to the tree. A listener failure is reported *after* the node that triggered it was linked, and that node stays in the tree; see the [`Listener`] documentation for what exactly is kept.
///
/// [`add_leaf`]: bounded_tree/struct.BoundedTree.html#method.add_leaf " "
/// [`Listener`]: bounded_tree/trait.Listener.html " "
#[derive(Copy, Clone, Debug, Hash, PartialEq, Eq)]
pub enum AddLeafError<E> {
    /// Duplicate rejection is enabled and the leaf had no context to extract a key from. Nothing was changed.
    InvalidContext,
    /// The listener attached to the tree failed.
    Listener(E),
}
impl<E> AddLeafError<E> {
    /// Returns the listener error, or `None` for other kinds of failure.
    #[inline]
    #[allow(clippy::missing_const_for_fn)]
    pub fn into_listener_error(self) -> Option<E> {
        match self {
            Self::Listener(e) => Some(e),
            Self::InvalidContext => None,
        }
    }
}
impl<E: Display> Display for AddLeafError<E> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidContext => {
                f.pad("a leaf without context cannot be checked for duplicates")
            }
            Self::Listener(e) => f.pad(&alloc::format!("tree listener failed: {}", e)),
        }
    }
}
#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl<E> std::error::Error for AddLeafError<E>
where E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Listener(e) => Some(e),
            Self::InvalidContext => None,
        }
    }
}
