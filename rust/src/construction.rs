//! Construction and initialization logic for BPlusTreeMap and nodes.
//!
//! Order validation, arena setup and the `Default` implementations live here.

use crate::compact_arena::{CompactArena, FIRST_NODE};
use crate::error::{BPlusTreeError, InitResult};
use crate::types::{
    BPlusTreeMap, BranchNode, LeafNode, NodeRef, DEFAULT_ORDER, MIN_ORDER, NULL_NODE,
};

impl<K, V> BPlusTreeMap<K, V> {
    /// Create an empty B+ tree with the given order.
    ///
    /// # Arguments
    ///
    /// * `order` - Maximum branching factor; a node splits once it holds
    ///   `order` keys (minimum 3)
    ///
    /// # Examples
    ///
    /// ```
    /// use bplus_index::BPlusTreeMap;
    ///
    /// let tree = BPlusTreeMap::<u64, String>::new(4).unwrap();
    /// assert!(tree.is_empty());
    /// assert!(BPlusTreeMap::<u64, String>::new(2).is_err());
    /// ```
    pub fn new(order: usize) -> InitResult<Self> {
        validate_order(order)?;
        Ok(Self::fresh(order))
    }

    /// Create a B+ tree with the default order (4).
    pub fn with_default_order() -> Self {
        Self::fresh(DEFAULT_ORDER)
    }

    /// Build the single-empty-leaf tree for an order known to be valid.
    fn fresh(order: usize) -> Self {
        Self {
            order,
            root: NodeRef::leaf(FIRST_NODE),
            leaf_arena: CompactArena::with_first(LeafNode::new(order)),
            branch_arena: CompactArena::new(),
        }
    }

    /// The order this tree was built with.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Remove every entry, leaving a single empty root leaf.
    pub fn clear(&mut self) {
        *self = Self::fresh(self.order);
    }
}

impl<K, V> LeafNode<K, V> {
    /// Creates a new, unlinked leaf node for a tree of the given order.
    pub fn new(order: usize) -> Self {
        // one slot of headroom for the transient overflow before a split
        Self {
            order,
            keys: Vec::with_capacity(order),
            values: Vec::with_capacity(order),
            next: NULL_NODE,
        }
    }
}

impl<K, V> BranchNode<K, V> {
    /// Creates a new branch node for a tree of the given order.
    pub fn new(order: usize) -> Self {
        Self {
            order,
            keys: Vec::with_capacity(order),
            children: Vec::with_capacity(order + 1),
        }
    }
}

/// Check that an order is usable for a B+ tree.
pub fn validate_order(order: usize) -> InitResult<()> {
    if order < MIN_ORDER {
        Err(BPlusTreeError::invalid_order(order, MIN_ORDER))
    } else {
        Ok(())
    }
}

impl<K, V> Default for BPlusTreeMap<K, V> {
    fn default() -> Self {
        Self::with_default_order()
    }
}

// Freed arena slots are back-filled with these.
impl<K, V> Default for LeafNode<K, V> {
    fn default() -> Self {
        Self {
            order: 0,
            keys: Vec::new(),
            values: Vec::new(),
            next: NULL_NODE,
        }
    }
}

impl<K, V> Default for BranchNode<K, V> {
    fn default() -> Self {
        Self {
            order: 0,
            keys: Vec::new(),
            children: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_btree_construction() {
        let tree = BPlusTreeMap::<i32, String>::new(16).unwrap();
        assert_eq!(tree.order(), 16);
        assert!(tree.is_leaf_root());
        assert_eq!(tree.leaf_arena.len(), 1);
        assert!(tree.branch_arena.is_empty());
    }

    #[test]
    fn test_btree_invalid_order() {
        let result = BPlusTreeMap::<i32, String>::new(2);
        assert!(matches!(result, Err(BPlusTreeError::InvalidOrder(_))));
        assert!(BPlusTreeMap::<i32, String>::new(0).is_err());
        assert!(BPlusTreeMap::<i32, String>::new(MIN_ORDER).is_ok());
    }

    #[test]
    fn test_btree_default() {
        let tree = BPlusTreeMap::<i32, String>::default();
        assert_eq!(tree.order(), DEFAULT_ORDER);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_clear_resets_to_single_leaf() {
        let mut tree = BPlusTreeMap::new(3).unwrap();
        for i in 0..50 {
            tree.insert(i, i);
        }
        assert!(!tree.is_leaf_root());

        tree.clear();
        assert!(tree.is_empty());
        assert!(tree.is_leaf_root());
        assert_eq!(tree.order(), 3);
        assert_eq!(tree.count_nodes_in_tree(), (1, 0));
        assert_eq!(tree.leaf_arena.len(), 1);
        assert!(tree.branch_arena.is_empty());
    }

    #[test]
    fn test_node_construction() {
        let leaf = LeafNode::<i32, String>::new(5);
        assert_eq!(leaf.order, 5);
        assert!(leaf.keys.is_empty());
        assert_eq!(leaf.next, NULL_NODE);

        let branch = BranchNode::<i32, String>::new(5);
        assert_eq!(branch.order, 5);
        assert!(branch.children.is_empty());
    }

    #[test]
    fn test_validate_order() {
        assert!(validate_order(4).is_ok());
        assert!(validate_order(3).is_ok());
        assert!(validate_order(2).is_err());
    }
}
