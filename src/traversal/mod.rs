//! Everything related to traversing trees in general.
//!
//! The module is home to the following items:
//! - [`Visitor`]: a *trait for types which describe algorithms with state*
//! - [`Traversable`]: a *trait for types which describe tree-like structures* which can be traversed by `Visitor` algorithms
//! - [`PathTracker`]: the incrementally maintained materialized path of the node a pre-order traversal is currently at
//! - Implementations of ubiquitous algorithms for trees (see the [`algorithms`] module for more)
//! - The niche [`TraverseIter`] helper, wrapping a [`Visitor`]/[`Traversable`] pair into an iterator interface
//! - Helper types: [`Step`], [`VisitorDirection`] and [`CursorDirectionError`]
//!
//! Traversals never mutate the tree they are walking. Running a traversal concurrently with an insertion is ruled out by the borrow checker, since insertion takes the tree by `&mut`.
//!
//! [`algorithms`]: algorithms/index.html " "
//! [`Visitor`]: trait.Visitor.html " "
//! [`Traversable`]: trait.Traversable.html " "
//! [`PathTracker`]: struct.PathTracker.html " "
//! [`TraverseIter`]: struct.TraverseIter.html " "
//! [`Step`]: enum.Step.html " "
//! [`VisitorDirection`]: enum.VisitorDirection.html " "
//! [`CursorDirectionError`]: struct.CursorDirectionError.html " "

pub mod algorithms;
mod path;
pub use path::PathTracker;

use core::{
    iter::FusedIterator,
    fmt::{self, Formatter, Debug, Display},
};
use crate::NodeValue;

/// A stateful algorithm which walks a [`Traversable`] by telling it where to move its cursor next.
///
/// [`Traversable`]: trait.Traversable.html " "
pub trait Visitor {
    /// The tree type this visitor walks.
    type Target: Traversable;
    /// What the visitor produces when it stops.
    type Output;
    /// Looks at the node under `cursor` and decides where to go next.
    ///
    /// # Panics
    /// Implementations panic if called again after returning `Stop`.
    fn visit(
        &mut self,
        traversable: &Self::Target,
        cursor: CursorResult<<Self::Target as Traversable>::Cursor>,
    ) -> VisitorDirection<<Self::Target as Traversable>::Cursor, Self::Output>;
}
impl<V: Visitor> Visitor for &mut V {
    type Target = V::Target;
    type Output = V::Output;
    #[inline(always)]
    fn visit(
        &mut self,
        traversable: &Self::Target,
        cursor: CursorResult<<Self::Target as Traversable>::Cursor>,
    ) -> VisitorDirection<<Self::Target as Traversable>::Cursor, Self::Output> {
        (**self).visit(traversable, cursor)
    }
}

/// Where a visitor moves the cursor after a visit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VisitorDirection<C: Clone + Debug + Eq, V> {
    /// Go to the parent.
    Parent,
    /// Go to the next sibling.
    NextSibling,
    /// Go to the `n`-th child.
    Child(u32),
    /// Jump to the given cursor, for example when a pre-order walk climbs back up several levels at once.
    SetTo(C),
    /// End the traversal with a final value.
    Stop(V),
}

/// A tree which [`Visitor`]s can walk by means of a cursor.
///
/// [`Visitor`]: trait.Visitor.html " "
pub trait Traversable: Sized {
    /// The payload of leaf nodes.
    type Leaf;
    /// Identifies a node during traversal. Cloned on every step, so it should be cheap to clone.
    type Cursor: Clone + Debug + Eq;

    /// Moves `cursor` as `direction` says, or returns an error holding the unmoved cursor if the move is impossible.
    fn advance_cursor<V>(
        &self,
        cursor: Self::Cursor,
        direction: VisitorDirection<Self::Cursor, V>,
    ) -> CursorResult<Self::Cursor>;
    /// Returns a cursor at the root.
    fn cursor_to_root(&self) -> Self::Cursor;
    /// Returns what the node at `cursor` holds.
    fn value_of(&self, cursor: &Self::Cursor) -> NodeValue<&'_ Self::Leaf>;
    /// Returns a cursor at the parent of the node, or `None` for the root.
    fn parent_of(&self, cursor: &Self::Cursor) -> Option<Self::Cursor>;
    /// Returns the number of children of the node.
    fn num_children_of(&self, cursor: &Self::Cursor) -> usize;
    /// Returns a cursor at the child with index `child_num`, or `None` if there is no such child.
    fn nth_child_of(&self, cursor: &Self::Cursor, child_num: usize) -> Option<Self::Cursor>;
    /// Returns the number of parent links between the node and the root.
    ///
    /// Trees which store levels in their nodes should override the default, which walks up to the root.
    fn level_of(&self, cursor: &Self::Cursor) -> usize {
        let mut level = 0;
        let mut current = self.parent_of(cursor);
        while let Some(parent) = current {
            level += 1;
            current = self.parent_of(&parent);
        }
        level
    }

    /// Lets `visitor` visit the node at `cursor` and applies its decision.
    fn step<V>(
        &self,
        mut visitor: V,
        cursor: CursorResult<Self::Cursor>,
    ) -> Step<Self::Cursor, V::Output>
    where
        V: Visitor<Target = Self>,
    {
        match visitor.visit(self, cursor.clone()) {
            VisitorDirection::Stop(val) => Step::End(val),
            other => Step::NextCursor(self.advance_cursor(
                match cursor {
                    Ok(val) => val,
                    Err(err) => return Step::NextCursor(Err(err)),
                },
                other,
            )),
        }
    }
    /// Runs `visitor` from the root until it stops, returning its output.
    #[inline(always)]
    fn traverse<V>(&self, visitor: V) -> V::Output
    where
        V: Visitor<Target = Self>,
    {
        self.traverse_from(self.cursor_to_root(), visitor)
    }
    /// Runs `visitor` from `starting_cursor` until it stops, returning its output.
    fn traverse_from<V>(&self, starting_cursor: Self::Cursor, mut visitor: V) -> V::Output
    where
        V: Visitor<Target = Self>,
    {
        let mut cursor = Ok(starting_cursor);
        loop {
            match self.step(&mut visitor, cursor.clone()) {
                Step::NextCursor(c) => cursor = c,
                Step::End(f) => return f,
            }
        }
    }
}

/// The outcome of [`Traversable::step`].
///
/// [`Traversable::step`]: trait.Traversable.html#method.step " "
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step<C: Clone + Debug + Eq, V> {
    /// The visitor wants another step at this cursor.
    NextCursor(CursorResult<C>),
    /// The visitor stopped with this value.
    End(V),
}

/// A visitor asked for a move which does not exist, such as the parent of the root.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CursorDirectionError<C: Clone + Debug + Eq> {
    /// The cursor before the failed move.
    pub previous_state: C,
}
/// A cursor, or the error from the move which failed to produce it.
pub type CursorResult<C> = Result<C, CursorDirectionError<C>>;
impl<C: Clone + Debug + Eq> CursorDirectionError<C> {
    /// Returns the cursor before the failed move, as in `result.unwrap_or_else(CursorDirectionError::recover)`.
    #[inline(always)]
    #[allow(clippy::missing_const_for_fn)]
    pub fn recover(self) -> C {
        self.previous_state
    }
}
impl<C: Clone + Debug + Eq> Display for CursorDirectionError<C> {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad("the cursor cannot move in the requested direction")
    }
}
#[cfg(feature = "std")]
#[cfg_attr(feature = "doc_cfg", doc(cfg(feature = "std")))]
impl<C: Clone + Debug + Eq> std::error::Error for CursorDirectionError<C> {}

/// Runs a [`Visitor`] over a [`Traversable`] one step per call to `next`.
///
/// Yields `None` for every step after which the visitor is still going, then `Some(output)` once it stops, and is exhausted afterwards.
///
/// [`Visitor`]: trait.Visitor.html " "
/// [`Traversable`]: trait.Traversable.html " "
pub struct TraverseIter<'t, V>
where
    V: Visitor,
{
    visitor: V,
    traversable: &'t V::Target,
    cursor: Option<CursorResult<<V::Target as Traversable>::Cursor>>,
    finished: bool,
}
impl<'t, V> TraverseIter<'t, V>
where
    V: Visitor,
{
    /// Starts a traversal at the root of `traversable`.
    #[inline(always)]
    pub fn new(visitor: V, traversable: &'t V::Target) -> Self {
        Self {
            visitor,
            traversable,
            cursor: None,
            finished: false,
        }
    }
    /// Returns the visitor and whatever state it has built up so far.
    #[inline(always)]
    #[allow(clippy::missing_const_for_fn)]
    pub fn into_visitor(self) -> V {
        self.visitor
    }
}
impl<V> Iterator for TraverseIter<'_, V>
where
    V: Visitor,
{
    type Item = Option<V::Output>;
    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let cursor = Option::take(&mut self.cursor)
            .unwrap_or_else(|| Ok(self.traversable.cursor_to_root()));
        match self.traversable.step(&mut self.visitor, cursor) {
            Step::NextCursor(c) => {
                self.cursor = Some(c);
                Some(None)
            }
            Step::End(f) => {
                self.finished = true;
                Some(Some(f))
            }
        }
    }
}
impl<V> Debug for TraverseIter<'_, V>
where
    V: Visitor + Debug,
    V::Target: Debug,
{
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraverseIter")
            .field("visitor", &self.visitor)
            .field("traversable", &self.traversable)
            .field("cursor", &self.cursor)
            .field("finished", &self.finished)
            .finish()
    }
}
impl<V> FusedIterator for TraverseIter<'_, V>
where
    V: Visitor,
{
}
