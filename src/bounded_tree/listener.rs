use core::{convert::Infallible, fmt::Debug};
use crate::storage::Storage;
use super::{Node, NodeRef};

/// Hooks which a bounded tree calls synchronously while inserting leaves.
///
/// Both hooks are called *after* the node they report has been linked into the tree. If a hook fails, the insertion stops right there and the error is returned from [`add_leaf`] wrapped in [`AddLeafError::Listener`], with no rollback:
/// - if `leaf_added` fails, the leaf stays in the tree but is not counted in the `added` statistic;
/// - if `new_root_inserted` fails, the new root stays and the tree is one level deeper, but the leaf which caused the growth is dropped without being placed.
///
/// In both cases, a duplicate-detection key taken from the leaf stays recorded, so inserting the same leaf again will be rejected.
///
/// The unit type is the listener which does nothing, and is the default. Both methods have empty default implementations, so a listener only needs to implement the ones it cares about.
///
/// # Example
/// ```rust
/// use canopy::{BoundedTree, Listener, bounded_tree::Node};
/// use core::convert::Infallible;
///
/// #[derive(Debug, Default)]
/// struct RootCounter(usize);
/// impl Listener<u32, usize, Vec<Node<u32>>> for RootCounter {
///     type Error = Infallible;
///     fn new_root_inserted(&mut self, _: canopy::NodeRef<'_, u32>) -> Result<(), Infallible> {
///         self.0 += 1;
///         Ok(())
///     }
/// }
///
/// let mut tree = BoundedTree::<u32>::new(2).unwrap().with_listener(RootCounter::default());
/// for i in 0..5 {
///     tree.add_leaf(i).unwrap();
/// }
/// assert_eq!(tree.listener().0, tree.depth());
/// ```
///
/// [`add_leaf`]: struct.BoundedTree.html#method.add_leaf " "
/// [`AddLeafError::Listener`]: ../enum.AddLeafError.html#variant.Listener " "
pub trait Listener<C, K, S>
where
    S: Storage<Element = Node<C, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    /// The error type returned by the hooks.
    type Error;
    /// Called after a leaf has been linked to its parent.
    #[inline(always)]
    fn leaf_added(&mut self, leaf: NodeRef<'_, C, K, S>) -> Result<(), Self::Error> {
        let _ = leaf;
        Ok(())
    }
    /// Called after the tree has grown by putting a new root above the old one.
    #[inline(always)]
    fn new_root_inserted(&mut self, root: NodeRef<'_, C, K, S>) -> Result<(), Self::Error> {
        let _ = root;
        Ok(())
    }
}
impl<C, K, S> Listener<C, K, S> for ()
where
    S: Storage<Element = Node<C, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    type Error = Infallible;
}
impl<C, K, S, L> Listener<C, K, S> for &mut L
where
    S: Storage<Element = Node<C, K>, Key = K>,
    K: Clone + Debug + Eq,
    L: Listener<C, K, S> + ?Sized,
{
    type Error = L::Error;
    #[inline(always)]
    fn leaf_added(&mut self, leaf: NodeRef<'_, C, K, S>) -> Result<(), Self::Error> {
        (**self).leaf_added(leaf)
    }
    #[inline(always)]
    fn new_root_inserted(&mut self, root: NodeRef<'_, C, K, S>) -> Result<(), Self::Error> {
        (**self).new_root_inserted(root)
    }
}
