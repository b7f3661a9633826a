#![allow(clippy::unwrap_used)]

use super::*;
use alloc::{format, string::String, vec::Vec, collections::VecDeque};
use core::convert::Infallible;
use arrayvec::ArrayVec;
use crate::{
    traversal::{TraverseIter, VisitorDirection},
    NodeValue,
};

fn filled(width: usize, contexts: impl IntoIterator<Item = u32>) -> BoundedTree<u32> {
    let mut tree = BoundedTree::new(width).unwrap();
    for context in contexts {
        tree.add_leaf(context).unwrap();
    }
    tree
}
fn filled_rejecting(
    width: usize,
    contexts: impl IntoIterator<Item = u32>,
) -> BoundedTree<u32, RejectDuplicates<u32>> {
    let mut tree = BoundedTree::rejecting_duplicates(width).unwrap();
    for context in contexts {
        tree.add_leaf(context).unwrap();
    }
    tree
}
fn lines(lines: &[&str]) -> String {
    let mut rendered = lines.join("\n");
    rendered.push('\n');
    rendered
}

#[test]
fn accepting_duplicates() {
    let tree = filled(2, (1..=6).chain(1..=6));
    assert_eq!(
        tree.to_string(),
        lines(&[
            "0",
            "0/0",
            "0/0/0",
            "0/0/0/0",
            "0/0/0/0/0/1",
            "0/0/0/0/1/2",
            "0/0/0/1",
            "0/0/0/1/0/3",
            "0/0/0/1/1/4",
            "0/0/1",
            "0/0/1/0",
            "0/0/1/0/0/5",
            "0/0/1/0/1/6",
            "0/0/1/1",
            "0/0/1/1/0/1",
            "0/0/1/1/1/2",
            "0/1",
            "0/1/0",
            "0/1/0/0",
            "0/1/0/0/0/3",
            "0/1/0/0/1/4",
            "0/1/0/1",
            "0/1/0/1/0/5",
            "0/1/0/1/1/6",
            "Added: 12",
            "Rejected: 0",
        ]),
    );
    assert_eq!(tree.depth(), 3);
    assert!(!tree.rejects_duplicates());
}

#[test]
fn rejecting_duplicates() {
    let tree = filled_rejecting(2, (1..=6).chain(1..=6));
    assert_eq!(
        tree.to_string(),
        lines(&[
            "0",
            "0/0",
            "0/0/0",
            "0/0/0/0/1",
            "0/0/0/1/2",
            "0/0/1",
            "0/0/1/0/3",
            "0/0/1/1/4",
            "0/1",
            "0/1/0",
            "0/1/0/0/5",
            "0/1/0/1/6",
            "Added: 6",
            "Rejected: 6",
        ]),
    );
    assert_eq!(tree.stats(), Stats { added: 6, rejected: 6 });
    assert!(tree.rejects_duplicates());
    assert_eq!(tree.policy().len(), 6);
}

#[test]
fn later_rejections_show_in_the_rendering() {
    let mut tree = filled_rejecting(2, (1..=6).chain(1..=6));
    assert_eq!(tree.add_leaf(3), Ok(Insertion::Rejected));
    assert!(!tree.add_leaf(3).unwrap().is_added());
    assert!(tree.add_leaf(7).unwrap().is_added());
    assert_eq!(tree.stats(), Stats { added: 7, rejected: 8 });
    assert!(tree.to_string().ends_with("0/1/1/0/7\nAdded: 7\nRejected: 8\n"));
}

#[test]
fn depth_grows_only_when_the_root_is_full() {
    let mut tree = BoundedTree::new(2).unwrap();
    let mut depths = Vec::new();
    for i in 1..=9_u32 {
        tree.add_leaf(i).unwrap();
        depths.push(tree.depth());
    }
    assert_eq!(depths, [0, 0, 1, 1, 2, 2, 2, 2, 3]);

    let mut tree = BoundedTree::new(3).unwrap();
    let mut depths = Vec::new();
    for i in 1..=10_u32 {
        tree.add_leaf(i).unwrap();
        depths.push(tree.depth());
    }
    assert_eq!(depths, [0, 0, 0, 1, 1, 1, 1, 1, 1, 2]);
}

#[test]
fn last_touched_follows_the_newest_container() {
    let mut tree = filled(2, 1..=3);
    let last = tree.last_touched();
    assert_eq!((last.level(), last.index()), (1, 1));
    assert_eq!(last.num_children(), 1);

    tree.add_leaf(4).unwrap();
    let last = tree.last_touched();
    assert_eq!(last.num_children(), 2);
    // The next leaf bubbles up from here to the new root.
    tree.add_leaf(5).unwrap();
    assert_eq!(tree.depth(), 2);
    assert_eq!(tree.last_touched().level(), 2);
}

#[test]
fn equal_trees() {
    let left = filled_rejecting(2, 1..100);
    let right = filled_rejecting(2, 1..100);
    assert_eq!(left.compare(&right), Comparison::Equal);
    assert_eq!(left.compare(&right).reason(), None);
    assert!(left == right);
    assert!(left.compare(&left).is_equal());
}

#[test]
fn widths_differ() {
    let left = filled_rejecting(4, 1..100);
    let right = filled_rejecting(2, 1..100);
    let comparison = left.compare(&right);
    assert!(matches!(
        comparison,
        Comparison::Unequal(Mismatch::SizeOrStructure { .. }),
    ));
    assert_eq!(comparison.to_string(), "trees have different sizes or structures");
    assert!(left != right);
}

#[test]
fn sizes_differ() {
    let left = filled_rejecting(2, 1..100);
    let right = filled_rejecting(2, 1..101);
    let comparison = left.compare(&right);
    assert_eq!(
        comparison,
        Comparison::Unequal(Mismatch::SizeOrStructure {
            left: left.len(),
            right: right.len(),
        }),
    );
    assert_eq!(comparison.to_string(), "trees have different sizes or structures");
}

#[test]
fn contexts_differ() {
    let left = filled_rejecting(2, 1..100);
    let right = filled_rejecting(2, 2..101);
    let comparison = left.compare(&right);
    // The first leaf comes right after the root and the containers above it.
    let first_leaf = left.depth() + 1;
    assert_eq!(
        comparison,
        Comparison::Unequal(Mismatch::Context {
            position: first_leaf,
        }),
    );
    assert_eq!(comparison.to_string(), "contexts don't match");
}

#[test]
fn shapes_differ_at_equal_sizes() {
    let left = filled(3, 1..=4);
    let right = filled(2, 1..=4);
    assert_eq!(left.len(), right.len());
    let comparison = left.compare(&right);
    assert_eq!(comparison, Comparison::Unequal(Mismatch::Path { position: 4 }));
    assert_eq!(comparison.to_string(), "paths don't match");
}

#[test]
fn adds_every_distinct_leaf() {
    let tree = filled_rejecting(4, 0..100);
    assert_eq!(tree.added(), 100);
    assert_eq!(tree.rejected(), 0);
}

#[test]
fn contextless_leaves() {
    let mut tree = BoundedTree::<u32>::new(2).unwrap();
    assert_eq!(tree.add_contextless_leaf(), Ok(Insertion::Added));
    tree.add_leaf(5).unwrap();
    assert_eq!(tree.to_string(), "0\n0/0\n0/1/5\nAdded: 2\nRejected: 0\n");
    assert_eq!(tree.root().nth_child(0).unwrap().value(), NodeValue::Leaf(None));

    let mut other = BoundedTree::<u32>::new(2).unwrap();
    other.add_contextless_leaf().unwrap();
    other.add_contextless_leaf().unwrap();
    assert_eq!(
        tree.compare(&other),
        Comparison::Unequal(Mismatch::Context { position: 2 }),
    );
    assert_eq!(other.compare(&other.clone()), Comparison::Equal);
}

#[test]
fn contextless_leaf_cannot_be_checked_for_duplicates() {
    let mut tree = BoundedTree::<u32, RejectDuplicates<u32>>::rejecting_duplicates(2).unwrap();
    let error = tree.add_contextless_leaf().unwrap_err();
    assert_eq!(error, AddLeafError::InvalidContext);
    assert_eq!(
        error.to_string(),
        "a leaf without context cannot be checked for duplicates",
    );
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.stats(), Stats::default());
    assert!(tree.policy().is_empty());
}

#[test]
fn invalid_width() {
    assert_eq!(
        BoundedTree::<u32>::new(1).unwrap_err(),
        InvalidWidthError { width: 1 },
    );
    assert!(BoundedTree::<u32>::new(0).is_err());
    assert!(BoundedTree::<u32, RejectDuplicates<u32>>::rejecting_duplicates(1).is_err());
    assert_eq!(
        InvalidWidthError { width: 1 }.to_string(),
        "tree width must be at least 2, got 1",
    );
}

#[test]
fn stats() {
    let stats = Stats {
        added: 3,
        rejected: 1,
    };
    assert_eq!(stats.total(), 4);
    assert_eq!(stats.to_string(), "Added: 3\nRejected: 1\n");
    assert_eq!(filled(2, 1..=3).stats().to_string(), "Added: 3\nRejected: 0\n");
}

#[derive(Debug, Default)]
struct Recorder {
    events: Vec<String>,
}
impl Listener<u32, usize, DefaultStorage<Node<u32>>> for Recorder {
    type Error = Infallible;
    fn leaf_added(&mut self, leaf: NodeRef<'_, u32>) -> Result<(), Infallible> {
        self.events.push(format!(
            "leaf {:?} at level {}",
            leaf.context(),
            leaf.level(),
        ));
        Ok(())
    }
    fn new_root_inserted(&mut self, root: NodeRef<'_, u32>) -> Result<(), Infallible> {
        assert!(root.is_root());
        self.events
            .push(format!("new root with {} child", root.num_children()));
        Ok(())
    }
}

#[test]
fn listener_sees_every_link() {
    let mut recorder = Recorder::default();
    {
        let mut tree = BoundedTree::<u32>::new(2)
            .unwrap()
            .with_listener(&mut recorder);
        for i in 1..=3 {
            tree.add_leaf(i).unwrap();
        }
    }
    assert_eq!(
        recorder.events,
        [
            "leaf Some(1) at level 1",
            "leaf Some(2) at level 1",
            "new root with 1 child",
            "leaf Some(3) at level 2",
        ],
    );
}

#[derive(Debug, Default)]
struct Refuse {
    leaves: bool,
    roots: bool,
}
impl Listener<u32, usize, DefaultStorage<Node<u32>>> for Refuse {
    type Error = &'static str;
    fn leaf_added(&mut self, _: NodeRef<'_, u32>) -> Result<(), Self::Error> {
        if self.leaves {
            Err("leaf refused")
        } else {
            Ok(())
        }
    }
    fn new_root_inserted(&mut self, _: NodeRef<'_, u32>) -> Result<(), Self::Error> {
        if self.roots {
            Err("root refused")
        } else {
            Ok(())
        }
    }
}

#[test]
fn failed_leaf_hook_keeps_the_leaf() {
    let mut tree = BoundedTree::<u32, RejectDuplicates<u32>>::rejecting_duplicates(2)
        .unwrap()
        .with_listener(Refuse {
            leaves: true,
            roots: false,
        });
    let error = tree.add_leaf(7).unwrap_err();
    assert_eq!(error, AddLeafError::Listener("leaf refused"));
    assert_eq!(error.to_string(), "tree listener failed: leaf refused");
    assert_eq!(tree.len(), 2);
    assert_eq!(tree.added(), 0);
    assert_eq!(tree.root().nth_child(0).unwrap().context(), Some(&7));

    tree.listener_mut().leaves = false;
    // The key was recorded before the hook failed.
    assert_eq!(tree.add_leaf(7), Ok(Insertion::Rejected));
    assert_eq!(tree.add_leaf(8), Ok(Insertion::Added));
    assert_eq!(tree.stats(), Stats { added: 1, rejected: 1 });
}

#[test]
fn failed_root_hook_keeps_the_new_root() {
    let mut tree = BoundedTree::<u32>::new(2)
        .unwrap()
        .with_listener(Refuse::default());
    tree.add_leaf(1).unwrap();
    tree.add_leaf(2).unwrap();

    tree.listener_mut().roots = true;
    let error = tree.add_leaf(3).unwrap_err();
    assert_eq!(error.into_listener_error(), Some("root refused"));
    assert_eq!(tree.depth(), 1);
    assert_eq!(tree.len(), 4);
    assert_eq!(tree.added(), 2);

    tree.listener_mut().roots = false;
    tree.add_leaf(4).unwrap();
    assert_eq!(
        tree.to_string(),
        lines(&["0", "0/0", "0/0/0/1", "0/0/1/2", "0/1", "0/1/0/4", "Added: 3", "Rejected: 0"]),
    );
}

#[test]
fn walk_stops_at_the_first_error() {
    let tree = filled(2, 1..=6);
    let mut visited = 0;
    let result = tree.walk(|node, _| {
        visited += 1;
        if node.context() == Some(&4) {
            Err(node.level())
        } else {
            Ok(())
        }
    });
    assert_eq!(result, Err(3));
    assert_eq!(visited, 8);
}

#[test]
fn walk_paths_match_node_positions() {
    let tree = filled(3, 0..40);
    tree.walk(|node, tracker| {
        let mut indices = Vec::new();
        let mut current = node;
        while let Some(parent) = current.parent() {
            indices.push(current.index());
            current = parent;
        }
        indices.push(0);
        indices.reverse();
        let expected = indices
            .iter()
            .map(|index| format!("{}", index))
            .collect::<Vec<_>>()
            .join("/");
        assert_eq!(tracker.path(), expected);
        assert_eq!(tracker.len(), node.level() + 1);
        Ok::<(), Infallible>(())
    })
    .unwrap();
}

fn contexts_below<'a, C, K, S>(node: NodeRef<'a, C, K, S>, out: &mut Vec<C>)
where
    C: Clone + 'a,
    K: Clone + Debug + Eq + 'a,
    S: Storage<Element = Node<C, K>, Key = K>,
{
    if let Some(context) = node.context() {
        out.push(context.clone());
    }
    for child in node.children() {
        contexts_below(child, out);
    }
}

#[test]
fn generic_node_handles() {
    let tree = filled(3, 1..=10);
    let mut from_vec = Vec::new();
    contexts_below(tree.root(), &mut from_vec);
    assert_eq!(from_vec, (1..=10).collect::<Vec<_>>());

    let mut deque = BoundedTree::<u32, _, _, _, VecDeque<Node<u32>>>::with_parts(
        3,
        AcceptDuplicates,
        (),
    )
    .unwrap();
    for i in 1..=10 {
        deque.add_leaf(i).unwrap();
    }
    let mut from_deque = Vec::new();
    contexts_below(deque.root(), &mut from_deque);
    assert_eq!(from_deque, from_vec);
}

#[test]
fn node_navigation() {
    let tree = filled(2, 1..=6);
    let root = tree.root();
    assert!(root.is_root() && root.is_container());
    assert_eq!((root.index(), root.level(), root.num_children()), (0, 0, 2));
    assert_eq!(root.next_sibling().map(NodeRef::into_raw_key), None);

    let second = root.nth_child(1).unwrap();
    assert_eq!(second.index(), 1);
    assert_eq!(second.parent().unwrap().raw_key(), root.raw_key());
    let leaves = second.nth_child(0).unwrap();
    let contexts: Vec<_> = leaves.children().map(|leaf| *leaf.context().unwrap()).collect();
    assert_eq!(contexts, [5, 6]);
    assert_eq!(leaves.children().len(), 2);

    let five = leaves.nth_child(0).unwrap();
    assert!(five.is_leaf() && !five.is_container());
    assert_eq!(five.children().next().map(NodeRef::into_raw_key), None);
    assert_eq!(five.next_sibling().unwrap().context(), Some(&6));
    assert_eq!(NodeValue::from(five), NodeValue::Leaf(Some(&5)));
    assert!(tree.get(*five.raw_key()).is_some());
    assert!(tree.get(tree.len()).is_none());
}

#[test]
fn cursor_directions() {
    let tree = filled(2, 1..=3);
    let root = tree.cursor_to_root();
    assert!(tree
        .advance_cursor(root, VisitorDirection::<_, ()>::Parent)
        .is_err());
    let first = tree
        .advance_cursor(root, VisitorDirection::<_, ()>::Child(0))
        .unwrap();
    let second = tree
        .advance_cursor(first, VisitorDirection::<_, ()>::NextSibling)
        .unwrap();
    assert_eq!(tree.get(second).unwrap().index(), 1);
    assert!(tree
        .advance_cursor(second, VisitorDirection::<_, ()>::NextSibling)
        .is_err());
    assert!(tree
        .advance_cursor(root, VisitorDirection::<_, ()>::Child(2))
        .is_err());
    assert_eq!(
        tree.advance_cursor(root, VisitorDirection::<_, ()>::SetTo(999))
            .unwrap_err()
            .recover(),
        root,
    );
    assert_eq!(
        tree.advance_cursor(second, VisitorDirection::<_, ()>::Parent),
        Ok(root),
    );
    assert_eq!(tree.value_of(&first), NodeValue::Container);
    assert_eq!(tree.level_of(&second), 1);
    assert_eq!(tree.parent_of(&root), None);
    assert_eq!(tree.num_children_of(&second), 1);
}

#[test]
fn traversal_one_step_at_a_time() {
    let tree = filled(2, 1..=3);
    let visitor = PreOrder::new(|_: &BoundedTree<u32>, _: &usize, _: &PathTracker| {
        Ok::<(), ()>(())
    });
    let mut iter = TraverseIter::new(visitor, &tree);
    let steps: Vec<_> = iter.by_ref().collect();
    assert_eq!(steps.len(), tree.len());
    assert!(steps[..steps.len() - 1].iter().all(Option::is_none));
    assert_eq!(steps.last(), Some(&Some(Ok(()))));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.into_visitor().tracker().path(), "0/1/0");
}

#[test]
fn deque_storage() {
    let mut tree = BoundedTree::<u32, _, _, _, VecDeque<Node<u32>>>::with_capacity(
        2,
        AcceptDuplicates,
        (),
        32,
    )
    .unwrap();
    for i in (1..=6).chain(1..=6) {
        tree.add_leaf(i).unwrap();
    }
    let reference = filled(2, (1..=6).chain(1..=6));
    assert_eq!(tree.to_string(), reference.to_string());
    assert!(tree == reference);
}

#[test]
fn array_storage() {
    let mut tree =
        BoundedTree::<u32, _, _, _, ArrayVec<[Node<u32>; 16]>>::with_parts(2, AcceptDuplicates, ())
            .unwrap();
    for i in 1..=5 {
        tree.add_leaf(i).unwrap();
    }
    assert!(tree == filled(2, 1..=5));
}

#[test]
#[should_panic]
fn array_storage_overflow() {
    let mut tree =
        BoundedTree::<u32, _, _, _, ArrayVec<[Node<u32>; 2]>>::with_parts(2, AcceptDuplicates, ())
            .unwrap();
    tree.add_leaf(1).unwrap();
    tree.add_leaf(2).unwrap();
}

#[cfg(feature = "slotmap")]
#[test]
fn slotmap_storage() {
    use slotmap::{SlotMap, DefaultKey};
    let mut tree = BoundedTree::<
        u32,
        AcceptDuplicates,
        (),
        DefaultKey,
        SlotMap<DefaultKey, Node<u32, DefaultKey>>,
    >::with_parts(2, AcceptDuplicates, ())
    .unwrap();
    for i in 1..=6 {
        tree.add_leaf(i).unwrap();
    }
    let reference = filled(2, 1..=6);
    assert_eq!(tree.to_string(), reference.to_string());
    assert!(tree == reference);
}
