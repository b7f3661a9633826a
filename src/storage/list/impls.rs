use alloc::{vec::Vec, collections::VecDeque};
use arrayvec::ArrayVec;
use crate::util::unreachable_debugchecked;
use super::ListStorage;

// Collections which deref to a slice and have the usual growable-vector constructors.
macro_rules! impl_list_storage_for_vectors {
    ($(
        $(#[$attr:meta])*
        [$($generics:tt)*] $ty:ty => $element:ty;
    )+) => {$(
        $(#[$attr])*
        unsafe impl<$($generics)*> ListStorage for $ty {
            type Element = $element;

            #[inline(always)]
            fn with_capacity(capacity: usize) -> Self {
                <$ty>::with_capacity(capacity)
            }
            #[inline(always)]
            fn push(&mut self, element: $element) {
                <$ty>::push(self, element)
            }
            #[inline(always)]
            fn len(&self) -> usize {
                <$ty>::len(self)
            }
            #[inline(always)]
            unsafe fn get_unchecked(&self, index: usize) -> &$element {
                <[$element]>::get_unchecked(self, index)
            }
            #[inline(always)]
            unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut $element {
                <[$element]>::get_unchecked_mut(self, index)
            }
            #[inline(always)]
            fn new() -> Self {
                <$ty>::new()
            }
            #[inline(always)]
            fn capacity(&self) -> usize {
                <$ty>::capacity(self)
            }
        }
    )+};
}
impl_list_storage_for_vectors! {
    [T] Vec<T> => T;
    #[cfg(feature = "smallvec")]
    #[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "smallvec")))]
    [A: smallvec::Array] smallvec::SmallVec<A> => A::Item;
}

unsafe impl<T> ListStorage for VecDeque<T> {
    type Element = T;

    #[inline(always)]
    fn with_capacity(capacity: usize) -> Self {
        VecDeque::with_capacity(capacity)
    }
    #[inline(always)]
    fn push(&mut self, element: T) {
        self.push_back(element)
    }
    #[inline(always)]
    fn len(&self) -> usize {
        VecDeque::len(self)
    }
    // A deque is not one slice, so these go through the checked accessors.
    #[inline(always)]
    unsafe fn get_unchecked(&self, index: usize) -> &T {
        match VecDeque::get(self, index) {
            Some(x) => x,
            None => unreachable_debugchecked("deque index out of bounds"),
        }
    }
    #[inline(always)]
    unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        match VecDeque::get_mut(self, index) {
            Some(x) => x,
            None => unreachable_debugchecked("deque index out of bounds"),
        }
    }
    #[inline(always)]
    fn new() -> Self {
        VecDeque::new()
    }
    #[inline(always)]
    fn capacity(&self) -> usize {
        VecDeque::capacity(self)
    }
}

unsafe impl<A: arrayvec::Array> ListStorage for ArrayVec<A> {
    type Element = A::Item;

    #[inline(always)]
    fn with_capacity(capacity: usize) -> Self {
        assert_eq!(
            capacity,
            A::CAPACITY,
            "an array-backed storage can only be created with the capacity of its array",
        );
        ArrayVec::new()
    }
    #[inline(always)]
    fn push(&mut self, element: A::Item) {
        ArrayVec::push(self, element)
    }
    #[inline(always)]
    fn len(&self) -> usize {
        ArrayVec::len(self)
    }
    #[inline(always)]
    unsafe fn get_unchecked(&self, index: usize) -> &A::Item {
        self.as_slice().get_unchecked(index)
    }
    #[inline(always)]
    unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut A::Item {
        self.as_mut_slice().get_unchecked_mut(index)
    }
    #[inline(always)]
    fn new() -> Self {
        ArrayVec::new()
    }
    #[inline(always)]
    fn capacity(&self) -> usize {
        A::CAPACITY
    }
}
