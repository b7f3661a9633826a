//! Utilities for treating the backing storage for trees generically.
//!
//! This module is home for the following items:
//! - [`Storage`], the main trait for the backing storages for trees
//! - [`ListStorage`], a trait used for implementing `Storage` for list-like collections
//! - [`DefaultStorage`], a type definition for the default backing storage used by trees unless a different one is specified
//!
//! Trees in this crate only ever grow: nodes are added to the storage and never taken out of it. Because of that, storages do not need to support removal, and a key handed out by [`add`] stays valid for as long as the storage lives.
//!
//! [`Storage`]: trait.Storage.html " "
//! [`ListStorage`]: trait.ListStorage.html " "
//! [`DefaultStorage`]: type.DefaultStorage.html " "
//! [`add`]: trait.Storage.html#tymethod.add " "

mod list;
pub use list::*;

#[cfg(feature = "slotmap")]
mod slotmap_impl;

use alloc::vec::Vec;
use core::fmt::Debug;

/// A keyed arena which trees keep their nodes in.
///
/// # Safety
/// Trees hand out the keys they get from `add` and later dereference them without checks, so implementors must uphold the following:
/// - `new` and `with_capacity` return storages with no elements;
/// - a key returned by `add` refers to the same element, unchanged unless mutated through `get_unchecked_mut` or `get_mut`, for as long as the storage lives;
/// - `get_unchecked` and `get_unchecked_mut` are sound for every key for which `contains_key` returns `true`;
/// - the number of elements only changes through `add`.
pub unsafe trait Storage: Sized {
    /// The key naming an element.
    type Key: Clone + Debug + Eq;
    /// The type of the elements stored.
    type Element;

    /// Stores an element and returns the key it can be found at.
    ///
    /// # Panics
    /// Fixed-capacity storages panic when full.
    fn add(&mut self, element: Self::Element) -> Self::Key;
    /// Returns the number of elements in the storage.
    fn len(&self) -> usize;
    /// Creates an empty storage with room for `capacity` elements.
    ///
    /// # Panics
    /// Fixed-capacity storages panic if `capacity` is not their actual capacity. They should also override `new`.
    fn with_capacity(capacity: usize) -> Self;
    /// Returns the element at `key` without checking that it exists.
    ///
    /// # Safety
    /// `contains_key(key)` must be `true`.
    unsafe fn get_unchecked(&self, key: &Self::Key) -> &Self::Element;
    /// Returns the element at `key` mutably without checking that it exists.
    ///
    /// # Safety
    /// `contains_key(key)` must be `true`.
    unsafe fn get_unchecked_mut(&mut self, key: &Self::Key) -> &mut Self::Element;
    /// Returns `true` if `key` names an element of this storage.
    fn contains_key(&self, key: &Self::Key) -> bool;

    /// Returns the element at `key`, or `None` if there is none.
    #[inline]
    fn get(&self, key: &Self::Key) -> Option<&Self::Element> {
        if self.contains_key(key) {
            // SAFETY: presence was just checked
            Some(unsafe { self.get_unchecked(key) })
        } else {
            None
        }
    }
    /// Returns the element at `key` mutably, or `None` if there is none.
    #[inline]
    fn get_mut(&mut self, key: &Self::Key) -> Option<&mut Self::Element> {
        if self.contains_key(key) {
            // SAFETY: presence was just checked
            Some(unsafe { self.get_unchecked_mut(key) })
        } else {
            None
        }
    }
    /// Creates an empty storage. Defaults to `with_capacity(0)`.
    #[inline(always)]
    fn new() -> Self {
        Self::with_capacity(0)
    }
    /// Returns `true` if there are no elements in the storage.
    #[inline(always)]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Returns the number of elements the storage can hold before it has to reallocate or, for fixed-capacity storages, before it is full. Defaults to the length.
    #[inline(always)]
    fn capacity(&self) -> usize {
        self.len()
    }
}

/// The default storage type used by the tree types when a storage type is not provided.
///
/// This is always a [`Vec`], since growing trees need a storage which can grow with them.
///
/// [`Vec`]: https://doc.rust-lang.org/std/vec/struct.Vec.html " "
pub type DefaultStorage<T> = Vec<T>;

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::{vec::Vec, collections::VecDeque};
    use arrayvec::ArrayVec;

    fn fill<S: Storage<Element = u32>>(storage: &mut S) -> Vec<S::Key> {
        (0..4).map(|x| storage.add(x * 10)).collect()
    }

    #[test]
    fn vec_keys_stay_valid() {
        let mut storage = Vec::<u32>::new();
        let keys = fill(&mut storage);
        assert_eq!(keys, [0, 1, 2, 3]);
        assert_eq!(Storage::len(&storage), 4);
        assert_eq!(Storage::get(&storage, &2), Some(&20));
        assert_eq!(Storage::get(&storage, &4), None);
        *Storage::get_mut(&mut storage, &3).unwrap() += 1;
        assert_eq!(Storage::get(&storage, &3), Some(&31));
    }

    #[test]
    fn vec_deque_appends() {
        let mut storage = VecDeque::<u32>::new();
        let keys = fill(&mut storage);
        assert_eq!(keys, [0, 1, 2, 3]);
        assert!(Storage::contains_key(&storage, &3));
        assert!(!Storage::contains_key(&storage, &4));
    }

    #[test]
    fn arrayvec_has_fixed_capacity() {
        let mut storage = <ArrayVec<[u32; 4]> as Storage>::new();
        fill(&mut storage);
        assert_eq!(Storage::capacity(&storage), 4);
        assert_eq!(Storage::get(&storage, &1), Some(&10));
    }

    #[test]
    #[should_panic]
    fn arrayvec_overflow_panics() {
        let mut storage = <ArrayVec<[u32; 2]> as Storage>::new();
        fill(&mut storage);
    }

    #[cfg(feature = "smallvec")]
    #[test]
    fn smallvec_spills() {
        let mut storage = <smallvec::SmallVec<[u32; 2]> as Storage>::new();
        let keys = fill(&mut storage);
        assert_eq!(keys, [0, 1, 2, 3]);
        assert!(storage.spilled());
    }

    #[cfg(feature = "slotmap")]
    #[test]
    fn slotmap_keys() {
        let mut storage = <slotmap::SlotMap<slotmap::DefaultKey, u32> as Storage>::new();
        let keys = fill(&mut storage);
        assert_eq!(Storage::get(&storage, &keys[2]), Some(&20));
    }
}
