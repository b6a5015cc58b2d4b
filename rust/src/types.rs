//! Core types and data structures for BPlusTreeMap.
//!
//! This module contains the fundamental data structures, type definitions,
//! and constants used throughout the B+ tree implementation.

use crate::compact_arena::CompactArena;
use std::marker::PhantomData;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Smallest order that still lets a split leave both halves non-empty.
pub const MIN_ORDER: usize = 3;

/// Order used by `with_default_order` and `Default`.
pub const DEFAULT_ORDER: usize = 4;

// ============================================================================
// TYPE DEFINITIONS
// ============================================================================

pub use crate::compact_arena::{NodeId, NULL_NODE};

/// Minimum key count of a non-root node for the given order: `ceil(order / 2) - 1`.
pub(crate) fn min_keys_for(order: usize) -> usize {
    order.div_ceil(2) - 1
}

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// In-memory B+ tree index.
///
/// Values live in the leaves only; leaves are chained left to right so range
/// scans walk sideways instead of re-descending the tree. Nodes are stored in
/// two arenas and refer to each other by [`NodeId`].
///
/// Duplicate keys are allowed. A new entry is placed in front of the equal
/// keys already in its leaf, and [`search`](BPlusTreeMap::search) returns the
/// first match in the leaf.
///
/// # Examples
///
/// ```
/// use bplus_index::BPlusTreeMap;
///
/// let mut tree = BPlusTreeMap::new(4).unwrap();
/// tree.insert(10, "ten");
/// tree.insert(20, "twenty");
/// tree.insert(30, "thirty");
///
/// assert_eq!(tree.search(&20), Some(&"twenty"));
/// assert_eq!(tree.search_greater(&10), vec![&"twenty", &"thirty"]);
/// assert_eq!(tree.search_less(&30), vec![&"ten", &"twenty"]);
/// assert!(tree.delete(&20));
/// assert_eq!(tree.search(&20), None);
/// ```
///
/// # Order
///
/// A node splits once it holds `order` keys, so every node keeps at most
/// `order - 1` keys. Non-root nodes keep at least `ceil(order / 2) - 1`.
/// The order must be at least [`MIN_ORDER`].
#[derive(Debug)]
pub struct BPlusTreeMap<K, V> {
    /// Maximum branching factor.
    pub(crate) order: usize,
    /// The root node of the tree.
    pub(crate) root: NodeRef<K, V>,
    /// Arena storage for leaf nodes.
    pub(crate) leaf_arena: CompactArena<LeafNode<K, V>>,
    /// Arena storage for branch nodes.
    pub(crate) branch_arena: CompactArena<BranchNode<K, V>>,
}

/// Leaf node containing key-value pairs.
#[derive(Debug, Clone)]
pub struct LeafNode<K, V> {
    /// Order of the owning tree.
    pub(crate) order: usize,
    /// Sorted list of keys.
    pub(crate) keys: Vec<K>,
    /// Values parallel to `keys`.
    pub(crate) values: Vec<V>,
    /// Next leaf in the chain, `NULL_NODE` for the rightmost leaf.
    pub(crate) next: NodeId,
}

/// Internal (branch) node containing routing keys and child references.
#[derive(Debug, Clone)]
pub struct BranchNode<K, V> {
    /// Order of the owning tree.
    pub(crate) order: usize,
    /// Sorted list of routing keys.
    pub(crate) keys: Vec<K>,
    /// Child nodes, always one more than `keys`.
    pub(crate) children: Vec<NodeRef<K, V>>,
}

// ============================================================================
// NODE REFERENCES
// ============================================================================

/// Node reference that can be either a leaf or branch node.
///
/// Equality is identity: two references are equal when they name the same
/// arena slot of the same kind.
#[derive(Debug)]
pub enum NodeRef<K, V> {
    Leaf(NodeId, PhantomData<(K, V)>),
    Branch(NodeId, PhantomData<(K, V)>),
}

impl<K, V> Clone for NodeRef<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for NodeRef<K, V> {}

impl<K, V> PartialEq for NodeRef<K, V> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NodeRef::Leaf(a, _), NodeRef::Leaf(b, _)) => a == b,
            (NodeRef::Branch(a, _), NodeRef::Branch(b, _)) => a == b,
            _ => false,
        }
    }
}

impl<K, V> Eq for NodeRef<K, V> {}

impl<K, V> NodeRef<K, V> {
    pub(crate) fn leaf(id: NodeId) -> Self {
        NodeRef::Leaf(id, PhantomData)
    }

    pub(crate) fn branch(id: NodeId) -> Self {
        NodeRef::Branch(id, PhantomData)
    }

    /// Return the raw node ID.
    pub fn id(&self) -> NodeId {
        match *self {
            NodeRef::Leaf(id, _) => id,
            NodeRef::Branch(id, _) => id,
        }
    }

    /// Returns true if this reference points to a leaf node.
    pub fn is_leaf(&self) -> bool {
        matches!(self, NodeRef::Leaf(_, _))
    }
}
