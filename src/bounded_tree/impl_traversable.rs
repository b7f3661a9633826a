use core::fmt::Debug;
use crate::{
    storage::Storage,
    traversal::{Traversable, VisitorDirection, CursorResult, CursorDirectionError},
    NodeValue,
};
use super::{BoundedTree, Node, NodeRef};

impl<C, D, N, K, S> BoundedTree<C, D, N, K, S>
where
    S: Storage<Element = Node<C, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    #[track_caller]
    fn node_at_cursor(&self, cursor: &K) -> NodeRef<'_, C, K, S> {
        match self.get(cursor.clone()) {
            Some(node) => node,
            None => panic!("cursor {:?} does not point into this tree", cursor),
        }
    }
}

impl<C, D, N, K, S> Traversable for BoundedTree<C, D, N, K, S>
where
    S: Storage<Element = Node<C, K>, Key = K>,
    K: Clone + Debug + Eq,
{
    type Leaf = C;
    type Cursor = K;

    fn advance_cursor<V>(
        &self,
        cursor: K,
        direction: VisitorDirection<K, V>,
    ) -> CursorResult<K> {
        let moved = self.get(cursor.clone()).and_then(|node| match direction {
            VisitorDirection::Parent => node.parent().map(NodeRef::into_raw_key),
            VisitorDirection::NextSibling => node.next_sibling().map(NodeRef::into_raw_key),
            VisitorDirection::Child(n) => node.nth_child(n as usize).map(NodeRef::into_raw_key),
            // Jumps are only allowed to nodes which exist.
            VisitorDirection::SetTo(target) => self.get(target).map(NodeRef::into_raw_key),
            VisitorDirection::Stop(..) => None,
        });
        moved.ok_or(CursorDirectionError {
            previous_state: cursor,
        })
    }
    fn cursor_to_root(&self) -> K {
        self.root().into_raw_key()
    }
    #[track_caller]
    fn value_of(&self, cursor: &K) -> NodeValue<&'_ C> {
        self.node_at_cursor(cursor).value()
    }
    #[track_caller]
    fn parent_of(&self, cursor: &K) -> Option<K> {
        self.node_at_cursor(cursor).parent().map(NodeRef::into_raw_key)
    }
    #[track_caller]
    fn num_children_of(&self, cursor: &K) -> usize {
        self.node_at_cursor(cursor).num_children()
    }
    #[track_caller]
    fn nth_child_of(&self, cursor: &K, child_num: usize) -> Option<K> {
        self.node_at_cursor(cursor)
            .nth_child(child_num)
            .map(NodeRef::into_raw_key)
    }
    #[track_caller]
    fn level_of(&self, cursor: &K) -> usize {
        self.node_at_cursor(cursor).level()
    }
}
