use alloc::vec::Vec;
use core::fmt::{self, Formatter, Debug};
use crate::traversal::{
    Visitor,
    Traversable,
    VisitorDirection,
    CursorResult,
    PathTracker,
};

/// A `Visitor` which walks a tree depth-first in pre-order, keeping a [`PathTracker`] up to date and handing every node to a callback.
///
/// Children are visited in their stored order, and every node, container and leaf alike, is visited exactly once. The callback receives the tree, the cursor of the node and the tracker, whose path is the node's materialized path at that moment. If the callback fails, the walk stops right away and its error becomes the output of the traversal; otherwise the output is `Ok(())`.
///
/// The walk has to start at the root, which is what [`Traversable::traverse`] does. Starting it anywhere else makes the tracked paths meaningless.
///
/// # Example
/// ```rust
/// use canopy::{BoundedTree, Traversable, traversal::algorithms::PreOrder};
///
/// let mut tree = BoundedTree::new(3).unwrap();
/// for letter in "abcd".chars() {
///     tree.add_leaf(letter).unwrap();
/// }
/// let mut paths = Vec::new();
/// let walk = PreOrder::new(|_: &BoundedTree<char>, _: &usize, tracker: &canopy::PathTracker| {
///     paths.push(tracker.path().to_owned());
///     Ok::<(), ()>(())
/// });
/// tree.traverse(walk).unwrap();
/// assert_eq!(paths, ["0", "0/0", "0/0/0", "0/0/1", "0/0/2", "0/1", "0/1/0"]);
/// ```
///
/// [`PathTracker`]: ../struct.PathTracker.html " "
/// [`Traversable::traverse`]: ../trait.Traversable.html#method.traverse " "
pub struct PreOrder<T: Traversable, F> {
    callback: F,
    tracker: PathTracker,
    // Ancestors of the node about to be visited, each paired with the index of the child currently being explored.
    ancestors: Vec<(T::Cursor, usize)>,
    next_index: usize,
}
impl<T, F, E> PreOrder<T, F>
where
    T: Traversable,
    F: FnMut(&T, &T::Cursor, &PathTracker) -> Result<(), E>,
{
    /// Creates a pre-order walk which will call `callback` on every node.
    #[inline]
    pub fn new(callback: F) -> Self {
        Self {
            callback,
            tracker: PathTracker::new(),
            ancestors: Vec::new(),
            next_index: 0,
        }
    }
}
impl<T: Traversable, F> PreOrder<T, F> {
    /// Returns the path tracker, describing the node visited last.
    #[inline(always)]
    pub const fn tracker(&self) -> &PathTracker {
        &self.tracker
    }
}
impl<T, F, E> Visitor for PreOrder<T, F>
where
    T: Traversable,
    F: FnMut(&T, &T::Cursor, &PathTracker) -> Result<(), E>,
{
    type Target = T;
    type Output = Result<(), E>;

    fn visit(
        &mut self,
        traversable: &T,
        cursor: CursorResult<T::Cursor>,
    ) -> VisitorDirection<T::Cursor, Self::Output> {
        let cursor = cursor.unwrap_or_else(|error| {
            panic!(
                "pre-order walk was driven off the tree after {:?}",
                error.previous_state,
            )
        });
        let is_root = self.ancestors.is_empty();
        self.tracker
            .update(is_root, traversable.level_of(&cursor), self.next_index);
        if let Err(error) = (self.callback)(traversable, &cursor, &self.tracker) {
            return VisitorDirection::Stop(Err(error));
        }

        if traversable.num_children_of(&cursor) > 0 {
            self.ancestors.push((cursor, 0));
            self.next_index = 0;
            return VisitorDirection::Child(0);
        }
        let mut climbed = false;
        while let Some((ancestor, explored)) = self.ancestors.pop() {
            let next = explored + 1;
            if let Some(sibling) = traversable.nth_child_of(&ancestor, next) {
                self.ancestors.push((ancestor, next));
                self.next_index = next;
                return if climbed {
                    VisitorDirection::SetTo(sibling)
                } else {
                    VisitorDirection::NextSibling
                };
            }
            climbed = true;
        }
        VisitorDirection::Stop(Ok(()))
    }
}
impl<T, F> Debug for PreOrder<T, F>
where
    T: Traversable,
{
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreOrder")
            .field("tracker", &self.tracker)
            .field("ancestors", &self.ancestors)
            .field("next_index", &self.next_index)
            .finish()
    }
}
