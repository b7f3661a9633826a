mod impls;

use super::Storage;

/// Trait for list-like containers which can be the backing storage for trees.
///
/// Every `ListStorage` is also a [`Storage`] keyed by `usize` indices: the key of an element is the index `push` put it at.
///
/// # Safety
/// Implementors guarantee the following, and trees rely on it for memory safety:
/// - `new` and `with_capacity` return empty collections;
/// - `push` puts the element at index `len()`, as measured right before the call, and never moves other elements;
/// - `get_unchecked` and `get_unchecked_mut` are sound for every index below `len()`;
/// - the length only changes through `push`.
///
/// [`Storage`]: ../trait.Storage.html " "
pub unsafe trait ListStorage: Sized {
    /// The type of values in the container.
    type Element;

    /// Creates an empty collection with room for `capacity` elements.
    ///
    /// # Panics
    /// Fixed-capacity collections panic if `capacity` is not their actual capacity. They should also override `new`.
    fn with_capacity(capacity: usize) -> Self;
    /// Appends an element.
    ///
    /// # Panics
    /// Fixed-capacity collections panic when full.
    fn push(&mut self, element: Self::Element);
    /// Returns the number of elements in the collection.
    fn len(&self) -> usize;
    /// Returns a reference to the element at `index` without bounds checking.
    ///
    /// # Safety
    /// `index` must be less than `len()`.
    unsafe fn get_unchecked(&self, index: usize) -> &Self::Element;
    /// Returns a mutable reference to the element at `index` without bounds checking.
    ///
    /// # Safety
    /// `index` must be less than `len()`.
    unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut Self::Element;

    /// Creates an empty collection, without allocating if the collection allocates at all.
    #[inline(always)]
    fn new() -> Self {
        <Self as ListStorage>::with_capacity(0)
    }
    /// Returns the number of elements the collection can hold without reallocating. Defaults to the length.
    #[inline(always)]
    fn capacity(&self) -> usize {
        <Self as ListStorage>::len(self)
    }
}
unsafe impl<T, E> Storage for T
where
    T: ListStorage<Element = E>,
{
    type Key = usize;
    type Element = E;

    #[inline(always)]
    fn add(&mut self, element: E) -> usize {
        let index = <Self as ListStorage>::len(self);
        <Self as ListStorage>::push(self, element);
        index
    }
    #[inline(always)]
    fn len(&self) -> usize {
        <Self as ListStorage>::len(self)
    }
    #[inline(always)]
    fn with_capacity(capacity: usize) -> Self {
        <Self as ListStorage>::with_capacity(capacity)
    }
    #[inline(always)]
    unsafe fn get_unchecked(&self, index: &usize) -> &E {
        <Self as ListStorage>::get_unchecked(self, *index)
    }
    #[inline(always)]
    unsafe fn get_unchecked_mut(&mut self, index: &usize) -> &mut E {
        <Self as ListStorage>::get_unchecked_mut(self, *index)
    }
    #[inline(always)]
    fn contains_key(&self, index: &usize) -> bool {
        *index < <Self as ListStorage>::len(self)
    }
    #[inline(always)]
    fn new() -> Self {
        <Self as ListStorage>::new()
    }
    #[inline(always)]
    fn capacity(&self) -> usize {
        <Self as ListStorage>::capacity(self)
    }
}
