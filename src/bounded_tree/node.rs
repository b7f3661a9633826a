use alloc::vec::Vec;
use core::fmt::Debug;
use crate::{util::unreachable_debugchecked, NodeValue};

/// A node of a bounded tree.
///
/// Created by the bounded tree internally and only publicly exposed so that bounded tree storages' generic arguments could be specified.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Node<C, K = usize>
where
    K: Clone + Debug + Eq,
{
    pub(super) value: NodeData<C, K>,
    pub(super) parent: Option<K>,
    pub(super) level: usize,
}
impl<C, K> Node<C, K>
where
    K: Clone + Debug + Eq,
{
    #[inline(always)]
    pub(super) fn container(level: usize, parent: Option<K>) -> Self {
        Self {
            value: NodeData::Container {
                children: Vec::new(),
            },
            parent,
            level,
        }
    }
    #[inline(always)]
    pub(super) fn leaf(context: Option<C>, level: usize, parent: K) -> Self {
        Self {
            value: NodeData::Leaf(context),
            parent: Some(parent),
            level,
        }
    }

    /// Keys of the children in order. Empty for leaves.
    #[inline]
    pub(super) fn children(&self) -> &[K] {
        match &self.value {
            NodeData::Container { children } => children,
            NodeData::Leaf(..) => &[],
        }
    }
    #[inline]
    pub(super) fn num_children(&self) -> usize {
        self.children().len()
    }
    /// Appends a child key.
    ///
    /// # Safety
    /// The node must be a container.
    #[inline]
    pub(super) unsafe fn push_child(&mut self, child: K) {
        match &mut self.value {
            NodeData::Container { children } => children.push(child),
            NodeData::Leaf(..) => {
                // SAFETY: guaranteed by the caller
                unreachable_debugchecked("leaves cannot own children")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(super) enum NodeData<C, K>
where
    K: Clone + Debug + Eq,
{
    Container { children: Vec<K> },
    Leaf(Option<C>),
}
impl<C, K> NodeData<C, K>
where
    K: Clone + Debug + Eq,
{
    #[inline]
    pub(super) fn as_value(&self) -> NodeValue<&C> {
        match self {
            Self::Container { .. } => NodeValue::Container,
            Self::Leaf(context) => NodeValue::Leaf(context.as_ref()),
        }
    }
}
