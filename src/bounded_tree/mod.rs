//! Bounded trees, ones in which every container node owns at most a fixed number of children, and which are filled strictly one leaf at a time.
//!
//! A bounded tree starts out as a lone, empty root container. Leaves are always placed on the level right below the deepest containers, in the first container along the way which still has room. When every container on the path from the most recently used one up to the root is full, the tree grows *upward*: a new root is created, the old root becomes its first child, and every existing node moves one level down. Insertion never splits nodes and never inserts a level in the middle of the tree.
//!
//! As a result, the shape of the tree depends only on its width and on the order of insertions.
//!
//! # Example
//! ```rust
//! use canopy::bounded_tree::{BoundedTree, Insertion};
//!
//! // A tree whose containers hold at most 2 children, and which keeps only the first leaf for
//! // every distinct context.
//! let mut tree = BoundedTree::rejecting_duplicates(2).unwrap();
//! for i in (1..=6).chain(1..=6) {
//!     tree.add_leaf(i).unwrap();
//! }
//! assert_eq!(tree.added(), 6);
//! assert_eq!(tree.rejected(), 6);
//! // Another occurrence of a context is still a normal outcome, not an error:
//! assert_eq!(tree.add_leaf(3), Ok(Insertion::Rejected));
//!
//! // Every leaf sits right below the deepest containers.
//! let mut leaf_levels = Vec::new();
//! tree.walk(|node, _| {
//!     if node.is_leaf() {
//!         leaf_levels.push(node.level());
//!     }
//!     Ok::<_, ()>(())
//! }).unwrap();
//! assert!(leaf_levels.iter().all(|&level| level == tree.depth() + 1));
//!
//! // Paths are assigned during the walk.
//! let rendered = tree.to_string();
//! assert!(rendered.starts_with("0\n0/0\n0/0/0\n0/0/0/0/1\n"));
//! assert!(rendered.ends_with("Added: 6\nRejected: 7\n"));
//! ```

use alloc::vec;
use core::{
    fmt::{self, Formatter, Debug, Display, Write},
};
use crate::{
    storage::{Storage, DefaultStorage},
    traversal::{algorithms::PreOrder, PathTracker, Traversable},
    AddLeafError,
    InvalidWidthError,
};

mod node;
mod node_ref;
mod impl_traversable;
mod listener;
mod compare;
pub mod duplicates;

pub use node::Node;
use node::NodeData;
pub use node_ref::{NodeRef, NodeChildrenIter};
pub use listener::Listener;
pub use compare::{Comparison, Mismatch};
pub use duplicates::{DuplicateKey, DuplicatePolicy, Admission, AcceptDuplicates, RejectDuplicates};

/// A bounded tree.
///
/// `C` is the type of leaf contexts, `D` is the [duplicate policy], `N` is the [listener], and `K` and `S` select the [storage] the nodes are kept in.
///
/// See the [module-level documentation] for more.
///
/// [module-level documentation]: index.html " "
/// [duplicate policy]: duplicates/trait.DuplicatePolicy.html " "
/// [listener]: trait.Listener.html " "
/// [storage]: ../storage/trait.Storage.html " "
#[derive(Clone, Debug)]
pub struct BoundedTree<C, D = AcceptDuplicates, N = (), K = usize, S = DefaultStorage<Node<C, K>>>
where
    S: Storage<Element = Node<C, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    storage: S,
    root: K,
    // Where the search for room starts. Only a hint: a full container bubbles the search up.
    last_touched: K,
    width: usize,
    depth: usize,
    added: usize,
    rejected: usize,
    policy: D,
    listener: N,
}

/// The outcome of a successful call to [`add_leaf`].
///
/// [`add_leaf`]: struct.BoundedTree.html#method.add_leaf " "
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Insertion {
    /// The leaf was placed into the tree.
    Added,
    /// The leaf was a duplicate of one inserted before and was counted as rejected.
    Rejected,
}
impl Insertion {
    /// Returns `true` for `Added`.
    #[inline]
    pub const fn is_added(self) -> bool {
        matches!(self, Self::Added)
    }
}

/// Insertion statistics of a tree.
///
/// Displayed as two lines, `Added: n` and `Rejected: n`, each followed by a line feed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Stats {
    /// The number of leaves placed into the tree.
    pub added: usize,
    /// The number of leaves turned away as duplicates.
    pub rejected: usize,
}
impl Stats {
    /// Returns the number of insertions which succeeded in either way.
    #[inline]
    pub const fn total(self) -> usize {
        self.added + self.rejected
    }
}
impl Display for Stats {
    #[inline]
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "Added: {}\nRejected: {}\n", self.added, self.rejected)
    }
}

impl<C> BoundedTree<C> {
    /// Creates an empty tree with the specified width, which accepts duplicate leaves and stores its nodes in a `Vec`.
    ///
    /// # Errors
    /// Fails if `width` is less than 2.
    ///
    /// # Example
    /// ```rust
    /// # use canopy::BoundedTree;
    /// let tree = BoundedTree::<&str>::new(3).unwrap();
    /// assert_eq!(tree.depth(), 0);
    /// assert!(tree.root().is_container());
    ///
    /// assert!(BoundedTree::<&str>::new(1).is_err());
    /// ```
    #[inline]
    pub fn new(width: usize) -> Result<Self, InvalidWidthError> {
        Self::with_parts(width, AcceptDuplicates, ())
    }
}
impl<C: DuplicateKey> BoundedTree<C, RejectDuplicates<C::Key>> {
    /// Creates an empty tree with the specified width, which rejects leaves whose [`DuplicateKey`] has been seen before and stores its nodes in a `Vec`.
    ///
    /// # Errors
    /// Fails if `width` is less than 2.
    ///
    /// [`DuplicateKey`]: duplicates/trait.DuplicateKey.html " "
    #[inline]
    pub fn rejecting_duplicates(width: usize) -> Result<Self, InvalidWidthError> {
        Self::with_parts(width, RejectDuplicates::new(), ())
    }
}
impl<C, D, N, K, S> BoundedTree<C, D, N, K, S>
where
    S: Storage<Element = Node<C, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    /// Creates an empty tree from its duplicate policy and listener, using any storage.
    ///
    /// # Errors
    /// Fails if `width` is less than 2.
    ///
    /// # Example
    /// ```rust
    /// use canopy::bounded_tree::{BoundedTree, Node, AcceptDuplicates};
    /// use std::collections::VecDeque;
    ///
    /// let mut tree = BoundedTree::<_, _, _, _, VecDeque<Node<char>>>::with_parts(
    ///     2, AcceptDuplicates, (),
    /// ).unwrap();
    /// tree.add_leaf('x').unwrap();
    /// assert_eq!(tree.len(), 2);
    /// ```
    #[inline]
    pub fn with_parts(width: usize, policy: D, listener: N) -> Result<Self, InvalidWidthError> {
        Self::from_storage(S::new(), width, policy, listener)
    }
    /// Creates an empty tree like [`with_parts`], with the specified capacity for the storage.
    ///
    /// # Errors
    /// Fails if `width` is less than 2.
    ///
    /// # Panics
    /// The storage may panic if it has fixed capacity and the specified value does not match it.
    ///
    /// [`with_parts`]: #method.with_parts " "
    #[inline]
    pub fn with_capacity(
        width: usize,
        policy: D,
        listener: N,
        capacity: usize,
    ) -> Result<Self, InvalidWidthError> {
        Self::from_storage(S::with_capacity(capacity), width, policy, listener)
    }
    fn from_storage(
        mut storage: S,
        width: usize,
        policy: D,
        listener: N,
    ) -> Result<Self, InvalidWidthError> {
        if width < 2 {
            return Err(InvalidWidthError { width });
        }
        let root = storage.add(Node::container(0, None));
        Ok(Self {
            storage,
            last_touched: root.clone(),
            root,
            width,
            depth: 0,
            added: 0,
            rejected: 0,
            policy,
            listener,
        })
    }
    /// Replaces the listener, returning a tree which calls the new one.
    #[inline]
    pub fn with_listener<M>(self, listener: M) -> BoundedTree<C, D, M, K, S> {
        BoundedTree {
            storage: self.storage,
            root: self.root,
            last_touched: self.last_touched,
            width: self.width,
            depth: self.depth,
            added: self.added,
            rejected: self.rejected,
            policy: self.policy,
            listener,
        }
    }

    /// Inserts a leaf carrying the specified context.
    ///
    /// Returns `Ok(Insertion::Rejected)` if the duplicate policy turned the leaf away, which is a normal outcome.
    ///
    /// # Errors
    /// Fails only if the listener fails. The insertion is not undone in that case; see the [`Listener`] documentation for what the tree looks like afterwards.
    ///
    /// # Example
    /// ```rust
    /// # use canopy::BoundedTree;
    /// let mut tree = BoundedTree::new(2).unwrap();
    /// for word in ["alpha", "beta", "gamma"].iter() {
    ///     tree.add_leaf(*word).unwrap();
    /// }
    /// // The third leaf did not fit into the root, so the tree grew upward.
    /// assert_eq!(tree.depth(), 1);
    /// let first = tree.root().children().next().unwrap();
    /// let contexts: Vec<_> = first.children().filter_map(|leaf| leaf.context()).collect();
    /// assert_eq!(contexts, [&"alpha", &"beta"]);
    /// ```
    ///
    /// [`Listener`]: trait.Listener.html " "
    #[inline]
    pub fn add_leaf(&mut self, context: C) -> Result<Insertion, AddLeafError<N::Error>>
    where
        D: DuplicatePolicy<C>,
        N: Listener<C, K, S>,
    {
        self.insert(Some(context))
    }
    /// Inserts a leaf without context.
    ///
    /// # Errors
    /// Fails with [`AddLeafError::InvalidContext`] if the tree rejects duplicates, since there is no key to check; nothing is changed then. Otherwise fails only if the listener fails, like [`add_leaf`].
    ///
    /// [`add_leaf`]: #method.add_leaf " "
    /// [`AddLeafError::InvalidContext`]: ../enum.AddLeafError.html#variant.InvalidContext " "
    #[inline]
    pub fn add_contextless_leaf(&mut self) -> Result<Insertion, AddLeafError<N::Error>>
    where
        D: DuplicatePolicy<C>,
        N: Listener<C, K, S>,
    {
        self.insert(None)
    }

    fn insert(&mut self, context: Option<C>) -> Result<Insertion, AddLeafError<N::Error>>
    where
        D: DuplicatePolicy<C>,
        N: Listener<C, K, S>,
    {
        match self.policy.admit(context.as_ref()) {
            Admission::Admit => {}
            Admission::Duplicate => {
                self.rejected += 1;
                trace_log!(rejected = self.rejected, "duplicate leaf rejected");
                return Ok(Insertion::Rejected);
            }
            Admission::NoKey => return Err(AddLeafError::InvalidContext),
        }
        // The leaf only exists once linked; until then, its level follows the depth.
        let mut leaf_level = self.depth + 1;
        let mut at = self.last_touched.clone();
        loop {
            let (level, num_children, parent) = {
                let node = self.node(&at);
                (node.level, node.num_children(), node.parent.clone())
            };
            if num_children < self.width {
                if level == self.depth {
                    let leaf = self
                        .storage
                        .add(Node::leaf(context, leaf_level, at.clone()));
                    unsafe {
                        // SAFETY: only containers are ever visited here
                        self.node_mut(&at).push_child(leaf.clone());
                    }
                    trace_log!(level = leaf_level, parent = ?at, "leaf placed");
                    self.listener
                        .leaf_added(unsafe {
                            // SAFETY: the key was just returned by the storage
                            NodeRef::new_raw_unchecked(&self.storage, leaf)
                        })
                        .map_err(AddLeafError::Listener)?;
                    self.added += 1;
                    return Ok(Insertion::Added);
                }
                let child = self.child_with_room(&at, level);
                self.last_touched = child.clone();
                at = child;
            } else if let Some(parent) = parent {
                at = parent;
            } else {
                let new_root = self.grow();
                leaf_level += 1;
                self.listener
                    .new_root_inserted(unsafe {
                        // SAFETY: as above
                        NodeRef::new_raw_unchecked(&self.storage, new_root.clone())
                    })
                    .map_err(AddLeafError::Listener)?;
                at = new_root;
            }
        }
    }
    /// Returns the first child of the container at `at` which has room, appending a new container child if none does.
    fn child_with_room(&mut self, at: &K, level: usize) -> K {
        let found = self
            .node(at)
            .children()
            .iter()
            .find(|&child| self.node(child).num_children() < self.width)
            .cloned();
        if let Some(child) = found {
            return child;
        }
        let child = self.storage.add(Node::container(level + 1, Some(at.clone())));
        unsafe {
            // SAFETY: `at` has children below the leaf level, so it's a container
            self.node_mut(at).push_child(child.clone());
        }
        child
    }
    /// Puts a new root above the current one, moving every node one level down. Returns the key of the new root.
    fn grow(&mut self) -> K {
        let old_root = self.root.clone();
        let new_root = self.storage.add(Node::container(0, None));
        unsafe {
            // SAFETY: just created as a container
            self.node_mut(&new_root).push_child(old_root.clone());
        }
        self.node_mut(&old_root).parent = Some(new_root.clone());
        self.root = new_root.clone();

        let mut stack = vec![old_root];
        while let Some(key) = stack.pop() {
            let node = self.node_mut(&key);
            node.level += 1;
            stack.extend(node.children().iter().cloned());
        }
        self.depth += 1;
        debug_log!(depth = self.depth, nodes = self.storage.len(), "tree re-rooted");
        new_root
    }

    /// Walks the whole tree in depth-first pre-order, calling `visitor` with every node and the path tracker describing it.
    ///
    /// Containers and leaves are both visited, children in their stored order. The first error returned by the visitor stops the walk and is returned.
    ///
    /// # Example
    /// ```rust
    /// # use canopy::BoundedTree;
    /// let mut tree = BoundedTree::new(2).unwrap();
    /// for i in 0..4 {
    ///     tree.add_leaf(i).unwrap();
    /// }
    /// // Find the path of the leaf carrying 2, stopping as soon as it's found.
    /// let found = tree.walk(|node, tracker| match node.context() {
    ///     Some(2) => Err(tracker.path().to_owned()),
    ///     _ => Ok(()),
    /// });
    /// assert_eq!(found, Err("0/1/0".to_owned()));
    /// ```
    pub fn walk<'a, E, F>(&'a self, mut visitor: F) -> Result<(), E>
    where
        F: FnMut(NodeRef<'a, C, K, S>, &PathTracker) -> Result<(), E>,
    {
        self.traverse(PreOrder::new(
            |_: &Self, key: &K, tracker: &PathTracker| {
                visitor(
                    unsafe {
                        // SAFETY: the walk only hands out cursors into this tree
                        NodeRef::new_raw_unchecked(&self.storage, key.clone())
                    },
                    tracker,
                )
            },
        ))
    }

    /// Returns the maximum number of children a container can have.
    #[inline(always)]
    pub const fn width(&self) -> usize {
        self.width
    }
    /// Returns the level of the deepest containers. Leaves are one level below. Starts at 0 and grows by one every time the tree is re-rooted.
    #[inline(always)]
    pub const fn depth(&self) -> usize {
        self.depth
    }
    /// Returns the number of leaves placed into the tree.
    #[inline(always)]
    pub const fn added(&self) -> usize {
        self.added
    }
    /// Returns the number of leaves rejected as duplicates.
    #[inline(always)]
    pub const fn rejected(&self) -> usize {
        self.rejected
    }
    /// Returns both insertion counters.
    #[inline(always)]
    pub const fn stats(&self) -> Stats {
        Stats {
            added: self.added,
            rejected: self.rejected,
        }
    }
    /// Returns the number of nodes in the tree, containers included.
    #[inline]
    #[allow(clippy::len_without_is_empty)] // there is always a root
    pub fn len(&self) -> usize {
        self.storage.len()
    }
    /// Returns `true` if the duplicate policy rejects duplicates.
    #[inline]
    pub fn rejects_duplicates(&self) -> bool
    where
        D: DuplicatePolicy<C>,
    {
        self.policy.rejects_duplicates()
    }
    /// Returns a reference to the duplicate policy, which holds the keys seen so far if duplicates are rejected.
    #[inline(always)]
    pub const fn policy(&self) -> &D {
        &self.policy
    }
    /// Returns a reference to the listener.
    #[inline(always)]
    pub const fn listener(&self) -> &N {
        &self.listener
    }
    /// Returns a mutable reference to the listener.
    #[inline(always)]
    pub fn listener_mut(&mut self) -> &mut N {
        &mut self.listener
    }
    /// Returns a reference to the root node of the tree.
    #[inline(always)]
    pub fn root(&self) -> NodeRef<'_, C, K, S> {
        unsafe {
            // SAFETY: bounded trees cannot be created without a root
            NodeRef::new_raw_unchecked(&self.storage, self.root.clone())
        }
    }
    /// Returns a reference to the container where the next insertion will start looking for room.
    #[inline(always)]
    pub fn last_touched(&self) -> NodeRef<'_, C, K, S> {
        unsafe {
            // SAFETY: only keys of existing containers are stored there
            NodeRef::new_raw_unchecked(&self.storage, self.last_touched.clone())
        }
    }
    /// Returns a reference to the node with the specified raw key, or `None` if there is no such node.
    #[inline]
    pub fn get(&self, key: K) -> Option<NodeRef<'_, C, K, S>> {
        NodeRef::new_raw(&self.storage, key)
    }

    #[inline]
    fn node(&self, key: &K) -> &Node<C, K> {
        debug_assert!(
            self.storage.contains_key(key),
            "debug key check failed: tried to reference key {:?} which is not present in the storage",
            key,
        );
        unsafe {
            // SAFETY: the tree only keeps keys which it got from its storage
            self.storage.get_unchecked(key)
        }
    }
    #[inline]
    fn node_mut(&mut self, key: &K) -> &mut Node<C, K> {
        debug_assert!(
            self.storage.contains_key(key),
            "debug key check failed: tried to reference key {:?} which is not present in the storage",
            key,
        );
        unsafe {
            // SAFETY: as above
            self.storage.get_unchecked_mut(key)
        }
    }
}

/// Renders one line per node in pre-order, `path` for containers and leaves without context and `path/context` for other leaves, followed by the [`Stats`].
///
/// [`Stats`]: struct.Stats.html " "
impl<C, D, N, K, S> Display for BoundedTree<C, D, N, K, S>
where
    C: Display,
    S: Storage<Element = Node<C, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.walk(|node, tracker| {
            f.write_str(tracker.path())?;
            if let Some(context) = node.context() {
                write!(f, "/{}", context)?;
            }
            f.write_char('\n')
        })?;
        Display::fmt(&self.stats(), f)
    }
}

#[cfg(test)]
mod tests;
