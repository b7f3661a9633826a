//! Duplicate detection for leaf contexts.

use alloc::{
    collections::{btree_set, BTreeSet},
    string::String,
    borrow::ToOwned,
};

/// Contexts from which a key for duplicate detection can be extracted.
///
/// Two leaves are duplicates if their contexts produce equal keys; the rest of the context is not compared. Of several duplicates, the one inserted first is kept.
///
/// # Example
/// ```rust
/// use canopy::{BoundedTree, DuplicateKey, bounded_tree::Insertion};
///
/// #[derive(Debug)]
/// struct Measurement {
///     sensor: u16,
///     reading: f64,
/// }
/// impl DuplicateKey for Measurement {
///     type Key = u16;
///     fn duplicate_key(&self) -> u16 {
///         self.sensor
///     }
/// }
///
/// let mut tree = BoundedTree::rejecting_duplicates(4).unwrap();
/// let first = tree.add_leaf(Measurement { sensor: 7, reading: 0.5 }).unwrap();
/// let second = tree.add_leaf(Measurement { sensor: 7, reading: 0.25 }).unwrap();
/// assert_eq!((first, second), (Insertion::Added, Insertion::Rejected));
/// assert_eq!(tree.stats().rejected, 1);
/// ```
pub trait DuplicateKey {
    /// The type of the key. It only needs to be ordered, since seen keys are kept in a sorted set.
    type Key: Ord;
    /// Extracts the key from the context.
    fn duplicate_key(&self) -> Self::Key;
}

macro_rules! impl_duplicate_key_by_value {
    ($($ty:ty),+ $(,)?) => {$(
        impl DuplicateKey for $ty {
            type Key = Self;
            #[inline(always)]
            fn duplicate_key(&self) -> Self {
                *self
            }
        }
    )+};
}
impl_duplicate_key_by_value!(
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    char, bool,
);
impl DuplicateKey for String {
    type Key = String;
    #[inline]
    fn duplicate_key(&self) -> String {
        self.clone()
    }
}
impl DuplicateKey for &str {
    type Key = String;
    #[inline]
    fn duplicate_key(&self) -> String {
        (*self).to_owned()
    }
}

/// The verdict of a [`DuplicatePolicy`] on a leaf which is about to be inserted.
///
/// [`DuplicatePolicy`]: trait.DuplicatePolicy.html " "
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Admission {
    /// The leaf should be placed into the tree.
    Admit,
    /// The leaf is a duplicate and must be counted as rejected.
    Duplicate,
    /// The policy needs a key, but the leaf has no context to take it from.
    NoKey,
}

/// Decides which leaves get into a tree.
///
/// A policy sees every leaf before it is placed and is free to remember it: a leaf which is admitted counts as seen even if placing it fails afterwards.
pub trait DuplicatePolicy<C> {
    /// Inspects the context of a leaf which is about to be inserted.
    fn admit(&mut self, context: Option<&C>) -> Admission;
    /// Returns `true` if the policy can ever return [`Admission::Duplicate`].
    ///
    /// [`Admission::Duplicate`]: enum.Admission.html#variant.Duplicate " "
    fn rejects_duplicates(&self) -> bool;
}

/// The policy which lets every leaf in, including leaves without context.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct AcceptDuplicates;
impl<C> DuplicatePolicy<C> for AcceptDuplicates {
    #[inline(always)]
    fn admit(&mut self, _: Option<&C>) -> Admission {
        Admission::Admit
    }
    #[inline(always)]
    fn rejects_duplicates(&self) -> bool {
        false
    }
}

/// The policy which rejects a leaf if a leaf with the same [`DuplicateKey`] has been admitted before.
///
/// Leaves without context are refused with [`Admission::NoKey`].
///
/// [`DuplicateKey`]: trait.DuplicateKey.html " "
/// [`Admission::NoKey`]: enum.Admission.html#variant.NoKey " "
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RejectDuplicates<Q: Ord> {
    seen: BTreeSet<Q>,
}
impl<Q: Ord> RejectDuplicates<Q> {
    /// Creates a policy which has not seen any keys yet.
    #[inline]
    pub const fn new() -> Self {
        Self {
            seen: BTreeSet::new(),
        }
    }
    /// Returns the number of distinct keys seen so far.
    #[inline]
    pub fn len(&self) -> usize {
        self.seen.len()
    }
    /// Returns `true` if no keys have been seen yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
    /// Returns `true` if the key has been seen.
    #[inline]
    pub fn contains(&self, key: &Q) -> bool {
        self.seen.contains(key)
    }
    /// Returns an iterator over the seen keys in ascending order.
    #[inline]
    pub fn keys(&self) -> btree_set::Iter<'_, Q> {
        self.seen.iter()
    }
}
impl<Q: Ord> Default for RejectDuplicates<Q> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
impl<C: DuplicateKey> DuplicatePolicy<C> for RejectDuplicates<C::Key> {
    #[inline]
    fn admit(&mut self, context: Option<&C>) -> Admission {
        match context {
            Some(context) => {
                if self.seen.insert(context.duplicate_key()) {
                    Admission::Admit
                } else {
                    Admission::Duplicate
                }
            }
            None => Admission::NoKey,
        }
    }
    #[inline(always)]
    fn rejects_duplicates(&self) -> bool {
        true
    }
}
