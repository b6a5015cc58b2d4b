//! GET operations for BPlusTreeMap.
//!
//! Leaf location, point lookup and the arena accessors the other modules
//! build on.

use crate::error::{BPlusTreeError, KeyResult, TreeResult};
use crate::types::{BPlusTreeMap, BranchNode, LeafNode, NodeId, NodeRef};

impl<K: Ord + Clone, V> BPlusTreeMap<K, V> {
    // ============================================================================
    // PUBLIC GET OPERATIONS
    // ============================================================================

    /// Look up the value stored under `key`.
    ///
    /// When the key was inserted more than once, the first match in its leaf
    /// is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use bplus_index::BPlusTreeMap;
    ///
    /// let mut tree = BPlusTreeMap::new(4).unwrap();
    /// tree.insert(1, "one");
    /// assert_eq!(tree.search(&1), Some(&"one"));
    /// assert_eq!(tree.search(&2), None);
    /// ```
    pub fn search(&self, key: &K) -> Option<&V> {
        let leaf_id = self.find_leaf_id(key)?;
        self.get_leaf(leaf_id)?.get(key)
    }

    /// Check if key exists in the tree.
    pub fn contains_key(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// Like [`search`](Self::search), but a missing key is a `KeyNotFound` error.
    ///
    /// # Examples
    ///
    /// ```
    /// use bplus_index::{BPlusTreeError, BPlusTreeMap};
    ///
    /// let mut tree = BPlusTreeMap::new(4).unwrap();
    /// tree.insert(1, "one");
    /// assert_eq!(tree.search_item(&1), Ok(&"one"));
    /// assert_eq!(tree.search_item(&2), Err(BPlusTreeError::KeyNotFound));
    /// ```
    pub fn search_item(&self, key: &K) -> KeyResult<&V> {
        self.search(key).ok_or(BPlusTreeError::KeyNotFound)
    }

    // ============================================================================
    // LEAF LOCATION
    // ============================================================================

    /// Descend from the root to the leaf whose range covers `key`.
    pub(crate) fn find_leaf_id(&self, key: &K) -> Option<NodeId> {
        let mut current = self.root;

        loop {
            match current {
                NodeRef::Leaf(id, _) => return Some(id),
                NodeRef::Branch(id, _) => current = self.get_branch(id)?.get_child(key)?,
            }
        }
    }

    /// [`find_leaf_id`](Self::find_leaf_id) for callers that go on to mutate.
    pub(crate) fn locate_leaf(&self, key: &K) -> TreeResult<NodeId> {
        self.find_leaf_id(key).ok_or_else(|| {
            BPlusTreeError::corrupted_tree("Descent", "no leaf reachable from the root")
        })
    }
}

impl<K, V> BPlusTreeMap<K, V> {
    // ============================================================================
    // ARENA ACCESS METHODS
    // ============================================================================

    /// Get a reference to a leaf node in the arena.
    pub fn get_leaf(&self, id: NodeId) -> Option<&LeafNode<K, V>> {
        self.leaf_arena.get(id)
    }

    /// Get a mutable reference to a leaf node in the arena.
    pub(crate) fn get_leaf_mut(&mut self, id: NodeId) -> Option<&mut LeafNode<K, V>> {
        self.leaf_arena.get_mut(id)
    }

    /// Get a reference to a branch node in the arena.
    pub fn get_branch(&self, id: NodeId) -> Option<&BranchNode<K, V>> {
        self.branch_arena.get(id)
    }

    /// Get a mutable reference to a branch node in the arena.
    pub(crate) fn get_branch_mut(&mut self, id: NodeId) -> Option<&mut BranchNode<K, V>> {
        self.branch_arena.get_mut(id)
    }

    pub(crate) fn leaf_ref(&self, id: NodeId) -> TreeResult<&LeafNode<K, V>> {
        self.get_leaf(id)
            .ok_or_else(|| BPlusTreeError::missing_node("Leaf", id))
    }

    pub(crate) fn leaf_mut(&mut self, id: NodeId) -> TreeResult<&mut LeafNode<K, V>> {
        self.get_leaf_mut(id)
            .ok_or_else(|| BPlusTreeError::missing_node("Leaf", id))
    }

    pub(crate) fn branch_ref(&self, id: NodeId) -> TreeResult<&BranchNode<K, V>> {
        self.get_branch(id)
            .ok_or_else(|| BPlusTreeError::missing_node("Branch", id))
    }

    pub(crate) fn branch_mut(&mut self, id: NodeId) -> TreeResult<&mut BranchNode<K, V>> {
        self.get_branch_mut(id)
            .ok_or_else(|| BPlusTreeError::missing_node("Branch", id))
    }

    /// Get the ID of the first (leftmost) leaf in the tree
    pub(crate) fn get_first_leaf_id(&self) -> Option<NodeId> {
        let mut current = self.root;

        loop {
            match current {
                NodeRef::Leaf(id, _) => return Some(id),
                NodeRef::Branch(id, _) => current = *self.get_branch(id)?.children.first()?,
            }
        }
    }
}
