use alloc::{borrow::ToOwned, string::String, vec::Vec};
use core::{
    convert::Infallible,
    fmt::{self, Formatter, Debug, Display},
};
use crate::storage::Storage;
use super::{BoundedTree, Node};

/// The outcome of comparing two bounded trees with [`compare`].
///
/// Trees are equal if a pre-order walk of both produces the same paths in the same order with equal contexts at every position. Width, depth, duplicate policy and statistics are not compared.
///
/// [`compare`]: struct.BoundedTree.html#method.compare " "
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Comparison {
    /// The trees have the same structure and the same contexts.
    Equal,
    /// The trees differ, for the specified reason.
    Unequal(Mismatch),
}
impl Comparison {
    /// Returns `true` for `Equal`.
    #[inline]
    pub const fn is_equal(&self) -> bool {
        matches!(self, Self::Equal)
    }
    /// Returns the reason the trees differ, or `None` if they are equal.
    #[inline]
    pub const fn reason(&self) -> Option<Mismatch> {
        match self {
            Self::Equal => None,
            Self::Unequal(mismatch) => Some(*mismatch),
        }
    }
}
impl Display for Comparison {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equal => f.pad("trees are equal"),
            Self::Unequal(mismatch) => Display::fmt(mismatch, f),
        }
    }
}

/// The first difference found between two trees.
///
/// Positions count nodes in pre-order, the root being at position 0.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mismatch {
    /// The trees have a different number of nodes.
    SizeOrStructure {
        /// Number of nodes in the tree `compare` was called on.
        left: usize,
        /// Number of nodes in the other tree.
        right: usize,
    },
    /// The nodes at this position have different paths, meaning that the shapes differ even though the node counts match.
    Path {
        /// Pre-order position of the differing nodes.
        position: usize,
    },
    /// The nodes at this position are in the same place but their contexts differ, or only one of them has a context.
    Context {
        /// Pre-order position of the differing nodes.
        position: usize,
    },
}
impl Display for Mismatch {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::SizeOrStructure { .. } => "trees have different sizes or structures",
            Self::Path { .. } => "paths don't match",
            Self::Context { .. } => "contexts don't match",
        })
    }
}

impl<C, D, N, K, S> BoundedTree<C, D, N, K, S>
where
    S: Storage<Element = Node<C, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    /// Compares the tree with another one, reporting the first difference.
    ///
    /// The other tree may use a different storage, duplicate policy and listener. Contexts are compared with `PartialEq`; two leaves without context are equal.
    ///
    /// # Example
    /// ```rust
    /// use canopy::{BoundedTree, bounded_tree::Mismatch};
    ///
    /// let mut narrow = BoundedTree::rejecting_duplicates(2).unwrap();
    /// let mut wide = BoundedTree::rejecting_duplicates(4).unwrap();
    /// for i in 1..100_u32 {
    ///     narrow.add_leaf(i).unwrap();
    ///     wide.add_leaf(i).unwrap();
    /// }
    /// let comparison = narrow.compare(&wide);
    /// assert!(matches!(comparison.reason(), Some(Mismatch::SizeOrStructure { .. })));
    /// assert_eq!(comparison.to_string(), "trees have different sizes or structures");
    /// ```
    pub fn compare<D2, N2, K2, S2>(&self, other: &BoundedTree<C, D2, N2, K2, S2>) -> Comparison
    where
        C: PartialEq,
        S2: Storage<Element = Node<C, K2>, Key = K2>,
        K2: Clone + Debug + Eq,
    {
        let left = self.snapshot();
        let right = other.snapshot();
        if left.len() != right.len() {
            return Comparison::Unequal(Mismatch::SizeOrStructure {
                left: left.len(),
                right: right.len(),
            });
        }
        for (position, ((left_path, left_context), (right_path, right_context))) in
            left.iter().zip(&right).enumerate()
        {
            if left_path != right_path {
                return Comparison::Unequal(Mismatch::Path { position });
            }
            if left_context != right_context {
                return Comparison::Unequal(Mismatch::Context { position });
            }
        }
        Comparison::Equal
    }

    /// Every node's path and context, in pre-order.
    fn snapshot(&self) -> Vec<(String, Option<&C>)> {
        let mut items = Vec::with_capacity(self.len());
        let walked = self.walk(|node, tracker| {
            items.push((tracker.path().to_owned(), node.context()));
            Ok::<(), Infallible>(())
        });
        match walked {
            Ok(()) => {}
            Err(never) => match never {},
        }
        items
    }
}

impl<C, D, N, K, S, D2, N2, K2, S2> PartialEq<BoundedTree<C, D2, N2, K2, S2>>
    for BoundedTree<C, D, N, K, S>
where
    C: PartialEq,
    S: Storage<Element = Node<C, K>, Key = K>,
    K: Clone + Debug + Eq,
    S2: Storage<Element = Node<C, K2>, Key = K2>,
    K2: Clone + Debug + Eq,
{
    #[inline]
    fn eq(&self, other: &BoundedTree<C, D2, N2, K2, S2>) -> bool {
        self.compare(other).is_equal()
    }
}
impl<C, D, N, K, S> Eq for BoundedTree<C, D, N, K, S>
where
    C: Eq,
    S: Storage<Element = Node<C, K>, Key = K>,
    K: Clone + Debug + Eq,
{
}
