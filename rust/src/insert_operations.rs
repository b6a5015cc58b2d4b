//! INSERT operations for BPlusTreeMap.
//!
//! Insertion into the target leaf, node splitting, and upward propagation of
//! splits until a node fits or a new root is created.

use crate::error::{BPlusTreeError, ModifyResult, TreeResult};
use crate::types::{BPlusTreeMap, BranchNode, LeafNode, NodeId, NodeRef};
use tracing::debug;

impl<K: Ord + Clone, V> BPlusTreeMap<K, V> {
    /// Insert a key-value pair.
    ///
    /// Duplicate keys are kept; the newest entry sits in front of the older
    /// equal keys of its leaf.
    ///
    /// # Panics
    ///
    /// Panics if the node graph is found corrupted, which can only follow from
    /// a bug in split bookkeeping. Use [`try_insert`](Self::try_insert) to get
    /// the error instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use bplus_index::BPlusTreeMap;
    ///
    /// let mut tree = BPlusTreeMap::new(4).unwrap();
    /// for k in 0..10 {
    ///     tree.insert(k, k * 2);
    /// }
    /// assert_eq!(tree.len(), 10);
    /// assert_eq!(tree.search(&7), Some(&14));
    /// ```
    pub fn insert(&mut self, key: K, value: V) {
        if let Err(err) = self.try_insert(key, value) {
            panic!("B+ tree invariant violated during insert: {}", err);
        }
    }

    /// Insert a key-value pair, reporting structural corruption as an error.
    pub fn try_insert(&mut self, key: K, value: V) -> ModifyResult<()> {
        let leaf_id = self.locate_leaf(&key)?;
        if self.leaf_mut(leaf_id)?.insert(key, value) {
            self.split_upward(NodeRef::leaf(leaf_id))?;
        }
        Ok(())
    }

    // ============================================================================
    // HELPERS FOR INSERT OPERATIONS
    // ============================================================================

    /// Split `node` and keep splitting ancestors while they overflow.
    fn split_upward(&mut self, node: NodeRef<K, V>) -> TreeResult<()> {
        let mut current = node;

        loop {
            let (separator, sibling) = match current {
                NodeRef::Leaf(id, _) => self.split_leaf(id)?,
                NodeRef::Branch(id, _) => self.split_branch(id)?,
            };

            if current == self.root {
                self.new_root(current, separator, sibling)?;
                return Ok(());
            }

            let parent_id = self.find_parent(current).ok_or_else(|| {
                BPlusTreeError::corrupted_tree("Split", "non-root node has no parent")
            })?;
            let parent = self.branch_mut(parent_id)?;
            let index = parent.child_position(current).ok_or_else(|| {
                BPlusTreeError::corrupted_tree("Split", "parent does not list the split node")
            })?;

            if !parent.insert_child(index, separator, sibling) {
                return Ok(());
            }
            current = NodeRef::branch(parent_id);
        }
    }

    /// Split a leaf, splice the new right half into the leaf chain, and
    /// return the routing key for the parent with the new node.
    fn split_leaf(&mut self, id: NodeId) -> TreeResult<(K, NodeRef<K, V>)> {
        let right = self.leaf_mut(id)?.split();
        let separator = right.first_key().cloned().ok_or_else(|| {
            BPlusTreeError::corrupted_tree("Split", "leaf split produced an empty right half")
        })?;

        let right_id = self.allocate_leaf(right)?;
        self.leaf_mut(id)?.next = right_id;
        debug!(leaf = id, new_leaf = right_id, "leaf split");

        Ok((separator, NodeRef::leaf(right_id)))
    }

    fn split_branch(&mut self, id: NodeId) -> TreeResult<(K, NodeRef<K, V>)> {
        let (right, promoted) = self.branch_mut(id)?.split().ok_or_else(|| {
            BPlusTreeError::corrupted_tree("Split", "branch too small to split")
        })?;

        let right_id = self.allocate_branch(right)?;
        debug!(branch = id, new_branch = right_id, "branch split");

        Ok((promoted, NodeRef::branch(right_id)))
    }

    /// Grow the tree by one level after the root split.
    fn new_root(
        &mut self,
        left: NodeRef<K, V>,
        separator: K,
        right: NodeRef<K, V>,
    ) -> TreeResult<()> {
        let mut root = BranchNode::new(self.order);
        root.keys.push(separator);
        root.children.push(left);
        root.children.push(right);

        let root_id = self.allocate_branch(root)?;
        self.root = NodeRef::branch(root_id);
        debug!(root = root_id, height = self.height(), "new root");
        Ok(())
    }

    // ============================================================================
    // ARENA ALLOCATION
    // ============================================================================

    /// Allocate a new leaf node in the arena and return its ID.
    pub(crate) fn allocate_leaf(&mut self, leaf: LeafNode<K, V>) -> TreeResult<NodeId> {
        self.leaf_arena
            .allocate(leaf)
            .ok_or_else(|| BPlusTreeError::corrupted_tree("Arena", "leaf id space exhausted"))
    }

    /// Allocate a new branch node in the arena and return its ID.
    pub(crate) fn allocate_branch(&mut self, branch: BranchNode<K, V>) -> TreeResult<NodeId> {
        self.branch_arena
            .allocate(branch)
            .ok_or_else(|| BPlusTreeError::corrupted_tree("Arena", "branch id space exhausted"))
    }
}
