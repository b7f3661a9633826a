use core::{fmt::Debug, iter::FusedIterator, slice};
use crate::{
    storage::{Storage, DefaultStorage},
    util::unreachable_debugchecked,
    NodeValue,
};
use super::{Node, NodeData};

/// A read-only handle to a node of a bounded tree.
///
/// Holds the storage and the node's key rather than the node itself, so it can step to the parent, children and siblings.
#[derive(Debug)]
pub struct NodeRef<'a, C, K = usize, S = DefaultStorage<Node<C, K>>>
where
    S: Storage<Element = Node<C, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    pub(super) storage: &'a S,
    pub(super) key: K,
}
impl<'a, C, K, S> NodeRef<'a, C, K, S>
where
    C: 'a,
    S: Storage<Element = Node<C, K>, Key = K>,
    K: Clone + Debug + Eq,
    K: 'a,
{
    /// Returns `None` if `key` is not in `storage`.
    pub(crate) fn new_raw(storage: &'a S, key: K) -> Option<Self> {
        if storage.contains_key(&key) {
            Some(unsafe {
                // SAFETY: presence was just checked
                Self::new_raw_unchecked(storage, key)
            })
        } else {
            None
        }
    }
    /// # Safety
    /// `key` must be present in `storage`.
    pub(crate) unsafe fn new_raw_unchecked(storage: &'a S, key: K) -> Self {
        Self { storage, key }
    }
    /// Returns the storage key of the node.
    pub fn raw_key(&self) -> &K {
        &self.key
    }
    /// Returns the storage key of the node by value.
    #[allow(clippy::missing_const_for_fn)]
    pub fn into_raw_key(self) -> K {
        self.key
    }
    /// Returns the parent, or `None` for the root.
    pub fn parent(&self) -> Option<Self> {
        self.node().parent.as_ref().map(|x| unsafe {
            // SAFETY: parent keys come from the same storage
            Self::new_raw_unchecked(self.storage, x.clone())
        })
    }
    /// Iterates over the children in order. Empty for leaves.
    pub fn children(&self) -> NodeChildrenIter<'a, C, K, S> {
        NodeChildrenIter {
            storage: self.storage,
            keys: self.children_keys().iter(),
        }
    }
    /// Returns the storage keys of the children in order.
    pub fn children_keys(&self) -> &'a [K] {
        self.node().children()
    }
    /// Returns the `n`-th child, counting from 0.
    pub fn nth_child(&self, n: usize) -> Option<Self> {
        self.children_keys().get(n).map(|x| unsafe {
            // SAFETY: child keys come from the same storage
            Self::new_raw_unchecked(self.storage, x.clone())
        })
    }
    /// Returns the number of children, at most the width of the tree.
    pub fn num_children(&self) -> usize {
        self.node().num_children()
    }
    /// Returns the sibling right after this node, if any.
    pub fn next_sibling(&self) -> Option<Self> {
        self.parent()?.nth_child(self.index() + 1)
    }
    /// Returns the position of the node among the children of its parent. The root is at position 0.
    pub fn index(&self) -> usize {
        let parent = match self.parent() {
            Some(x) => x,
            None => return 0,
        };
        parent
            .children_keys()
            .iter()
            .position(|x| *x == self.key)
            .unwrap_or_else(|| unsafe {
                // SAFETY: every node is listed by its parent
                unreachable_debugchecked("failed to find node in parent's child list")
            })
    }
    /// Returns the distance from the root to the node, the root being at level 0.
    ///
    /// Levels are kept up to date when the tree is re-rooted, so all leaves are always on the level right below the deepest containers.
    pub fn level(&self) -> usize {
        self.node().level
    }
    /// Returns `true` for the root.
    #[allow(clippy::missing_const_for_fn)]
    pub fn is_root(&self) -> bool {
        self.node().parent.is_none()
    }
    /// Returns `true` for leaves.
    pub fn is_leaf(&self) -> bool {
        matches!(self.node().value, NodeData::Leaf(..))
    }
    /// Returns `true` for containers, including the childless root of an empty tree.
    pub fn is_container(&self) -> bool {
        matches!(self.node().value, NodeData::Container { .. })
    }
    /// Returns the context of a leaf, or `None` for containers and for leaves which were added without one.
    pub fn context(&self) -> Option<&'a C> {
        self.value().into_context()
    }
    /// Returns the payload of the node.
    pub fn value(&self) -> NodeValue<&'a C> {
        self.node().value.as_value()
    }

    pub(super) fn node(&self) -> &'a Node<C, K> {
        debug_assert!(
            self.storage.contains_key(&self.key),
            "node handle with key {:?} outlived its storage entry",
            &self.key,
        );
        unsafe {
            // SAFETY: handles are only created for keys in the storage
            self.storage.get_unchecked(&self.key)
        }
    }
}
impl<C, K, S> Copy for NodeRef<'_, C, K, S>
where
    S: Storage<Element = Node<C, K>, Key = K>,
    K: Copy + Debug + Eq,
{
}
impl<C, K, S> Clone for NodeRef<'_, C, K, S>
where
    S: Storage<Element = Node<C, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn clone(&self) -> Self {
        Self {
            storage: self.storage,
            key: self.key.clone(),
        }
    }
}
impl<'a, C, K, S> From<NodeRef<'a, C, K, S>> for NodeValue<&'a C>
where
    C: 'a,
    S: Storage<Element = Node<C, K>, Key = K>,
    K: Clone + Debug + Eq,
    K: 'a,
{
    fn from(node: NodeRef<'a, C, K, S>) -> Self {
        node.value()
    }
}

/// Iterator over the children of a node, returned by [`NodeRef::children`].
///
/// [`NodeRef::children`]: struct.NodeRef.html#method.children " "
#[derive(Debug)]
pub struct NodeChildrenIter<'a, C, K = usize, S = DefaultStorage<Node<C, K>>>
where
    S: Storage<Element = Node<C, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    storage: &'a S,
    keys: slice::Iter<'a, K>,
}
impl<C, K, S> Clone for NodeChildrenIter<'_, C, K, S>
where
    S: Storage<Element = Node<C, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn clone(&self) -> Self {
        Self {
            storage: self.storage,
            keys: self.keys.clone(),
        }
    }
}
impl<'a, C, K, S> Iterator for NodeChildrenIter<'a, C, K, S>
where
    C: 'a,
    S: Storage<Element = Node<C, K>, Key = K>,
    K: Clone + Debug + Eq,
    K: 'a,
{
    type Item = NodeRef<'a, C, K, S>;
    fn next(&mut self) -> Option<Self::Item> {
        let storage = self.storage;
        self.keys.next().map(|key| unsafe {
            // SAFETY: child keys come from the same storage
            NodeRef::new_raw_unchecked(storage, key.clone())
        })
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.keys.size_hint()
    }
}
impl<'a, C, K, S> DoubleEndedIterator for NodeChildrenIter<'a, C, K, S>
where
    C: 'a,
    S: Storage<Element = Node<C, K>, Key = K>,
    K: Clone + Debug + Eq,
    K: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        let storage = self.storage;
        self.keys.next_back().map(|key| unsafe {
            // SAFETY: as above
            NodeRef::new_raw_unchecked(storage, key.clone())
        })
    }
}
impl<'a, C, K, S> ExactSizeIterator for NodeChildrenIter<'a, C, K, S>
where
    C: 'a,
    S: Storage<Element = Node<C, K>, Key = K>,
    K: Clone + Debug + Eq,
    K: 'a,
{
}
impl<'a, C, K, S> FusedIterator for NodeChildrenIter<'a, C, K, S>
where
    C: 'a,
    S: Storage<Element = Node<C, K>, Key = K>,
    K: Clone + Debug + Eq,
    K: 'a,
{
}
