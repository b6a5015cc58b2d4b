//! DELETE operations for BPlusTreeMap.
//!
//! Removal from the target leaf followed by rebalancing: borrow from a
//! sibling with spare keys, otherwise merge with a sibling, walking up while
//! parents become underfull, and collapsing the root once it runs out of keys.

use crate::error::{BPlusTreeError, ModifyResult, TreeResult};
use crate::types::{BPlusTreeMap, NodeId, NodeRef};
use tracing::{debug, trace};

impl<K: Ord + Clone, V> BPlusTreeMap<K, V> {
    /// Remove the first entry stored under `key`.
    ///
    /// Returns `false` and leaves the tree untouched when the key is absent.
    ///
    /// # Panics
    ///
    /// Panics if the node graph is found corrupted. Use
    /// [`try_delete`](Self::try_delete) to get the error instead.
    ///
    /// # Examples
    ///
    /// ```
    /// use bplus_index::BPlusTreeMap;
    ///
    /// let mut tree = BPlusTreeMap::new(4).unwrap();
    /// tree.insert(1, "one");
    /// assert!(tree.delete(&1));
    /// assert!(!tree.delete(&1));
    /// assert!(tree.is_empty());
    /// ```
    pub fn delete(&mut self, key: &K) -> bool {
        match self.try_delete(key) {
            Ok(removed) => removed,
            Err(err) => panic!("B+ tree invariant violated during delete: {}", err),
        }
    }

    /// Remove the first entry stored under `key`, reporting structural
    /// corruption as an error.
    pub fn try_delete(&mut self, key: &K) -> ModifyResult<bool> {
        let leaf_id = self.locate_leaf(key)?;
        let leaf = self.leaf_mut(leaf_id)?;
        if leaf.remove(key).is_none() {
            return Ok(false);
        }
        let (is_empty, is_underfull) = (leaf.is_empty(), leaf.is_underfull());

        let leaf_ref = NodeRef::leaf(leaf_id);
        if leaf_ref == self.root {
            if is_empty {
                self.clear();
            }
            return Ok(true);
        }

        if is_underfull {
            self.rebalance(leaf_ref)?;
        }
        Ok(true)
    }

    // ============================================================================
    // REBALANCING
    // ============================================================================

    /// Restore minimum occupancy of `node`, then of each ancestor a merge
    /// leaves underfull.
    fn rebalance(&mut self, node: NodeRef<K, V>) -> TreeResult<()> {
        let mut current = node;

        loop {
            // the root may stay underfull
            let Some(parent_id) = self.find_parent(current) else {
                return Ok(());
            };

            let (index, left, right) = {
                let parent = self.branch_ref(parent_id)?;
                let index = parent.child_position(current).ok_or_else(|| {
                    BPlusTreeError::corrupted_tree("Rebalance", "parent does not list the node")
                })?;
                let left = index.checked_sub(1).map(|i| parent.children[i]);
                let right = parent.children.get(index + 1).copied();
                (index, left, right)
            };

            if let Some(left) = left {
                if self.borrow_from_left(parent_id, index, current, left)? {
                    return Ok(());
                }
            }
            if let Some(right) = right {
                if self.borrow_from_right(parent_id, index, current, right)? {
                    return Ok(());
                }
            }

            match (left, right) {
                (Some(left), _) => self.merge_nodes(parent_id, index - 1, left, current)?,
                (None, Some(right)) => self.merge_nodes(parent_id, index, current, right)?,
                (None, None) => {
                    return Err(BPlusTreeError::corrupted_tree(
                        "Rebalance",
                        "non-root node has no siblings",
                    ));
                }
            }

            let parent_ref = NodeRef::branch(parent_id);
            let parent = self.branch_ref(parent_id)?;
            if parent_ref == self.root {
                if parent.is_empty() {
                    self.collapse_root(parent_id)?;
                }
                return Ok(());
            }
            if !parent.is_underfull() {
                return Ok(());
            }
            current = parent_ref;
        }
    }

    /// Move the left sibling's last entry into `node`.
    ///
    /// Returns false when the sibling has no entry to spare.
    fn borrow_from_left(
        &mut self,
        parent_id: NodeId,
        index: usize,
        node: NodeRef<K, V>,
        left: NodeRef<K, V>,
    ) -> TreeResult<bool> {
        match (node, left) {
            (NodeRef::Leaf(node_id, _), NodeRef::Leaf(left_id, _)) => {
                let Some((key, value)) = self.leaf_mut(left_id)?.borrow_last() else {
                    return Ok(false);
                };
                self.leaf_mut(node_id)?.accept_from_left(key.clone(), value);
                self.branch_mut(parent_id)?.keys[index - 1] = key;
            }
            (NodeRef::Branch(node_id, _), NodeRef::Branch(left_id, _)) => {
                let Some((moved_key, moved_child)) = self.branch_mut(left_id)?.borrow_last() else {
                    return Ok(false);
                };
                let separator = self.branch_ref(parent_id)?.keys[index - 1].clone();
                let new_separator = self
                    .branch_mut(node_id)?
                    .accept_from_left(separator, moved_key, moved_child);
                self.branch_mut(parent_id)?.keys[index - 1] = new_separator;
            }
            _ => return Err(mismatched_siblings()),
        }
        trace!(node = node.id(), sibling = left.id(), "borrowed from left sibling");
        Ok(true)
    }

    /// Move the right sibling's first entry into `node`.
    fn borrow_from_right(
        &mut self,
        parent_id: NodeId,
        index: usize,
        node: NodeRef<K, V>,
        right: NodeRef<K, V>,
    ) -> TreeResult<bool> {
        match (node, right) {
            (NodeRef::Leaf(node_id, _), NodeRef::Leaf(right_id, _)) => {
                let sibling = self.leaf_mut(right_id)?;
                let Some((key, value)) = sibling.borrow_first() else {
                    return Ok(false);
                };
                let new_separator = sibling.first_key().cloned().ok_or_else(|| {
                    BPlusTreeError::corrupted_tree("Borrow", "right sibling emptied by borrow")
                })?;
                self.leaf_mut(node_id)?.accept_from_right(key, value);
                self.branch_mut(parent_id)?.keys[index] = new_separator;
            }
            (NodeRef::Branch(node_id, _), NodeRef::Branch(right_id, _)) => {
                let borrowed = self.branch_mut(right_id)?.borrow_first();
                let Some((moved_key, moved_child)) = borrowed else {
                    return Ok(false);
                };
                let separator = self.branch_ref(parent_id)?.keys[index].clone();
                let new_separator = self
                    .branch_mut(node_id)?
                    .accept_from_right(separator, moved_key, moved_child);
                self.branch_mut(parent_id)?.keys[index] = new_separator;
            }
            _ => return Err(mismatched_siblings()),
        }
        trace!(node = node.id(), sibling = right.id(), "borrowed from right sibling");
        Ok(true)
    }

    /// Fold `right` into `left`, its immediate left neighbour under `parent_id`.
    ///
    /// `separator_index` is the parent's routing key between the two; it and
    /// the slot of `right` are removed from the parent and `right` is freed.
    fn merge_nodes(
        &mut self,
        parent_id: NodeId,
        separator_index: usize,
        left: NodeRef<K, V>,
        right: NodeRef<K, V>,
    ) -> TreeResult<()> {
        let parent = self.branch_mut(parent_id)?;
        let separator = parent.keys.remove(separator_index);
        parent.children.remove(separator_index + 1);

        match (left, right) {
            (NodeRef::Leaf(left_id, _), NodeRef::Leaf(right_id, _)) => {
                let mut absorbed = self
                    .leaf_arena
                    .deallocate(right_id)
                    .ok_or_else(|| BPlusTreeError::missing_node("Leaf", right_id))?;
                self.leaf_mut(left_id)?.merge_from(&mut absorbed);
            }
            (NodeRef::Branch(left_id, _), NodeRef::Branch(right_id, _)) => {
                let mut absorbed = self
                    .branch_arena
                    .deallocate(right_id)
                    .ok_or_else(|| BPlusTreeError::missing_node("Branch", right_id))?;
                self.branch_mut(left_id)?.merge_from(separator, &mut absorbed);
            }
            _ => return Err(mismatched_siblings()),
        }

        debug!(parent = parent_id, node = left.id(), absorbed = right.id(), "merged siblings");
        Ok(())
    }

    /// Replace a key-less branch root with its only child.
    fn collapse_root(&mut self, root_id: NodeId) -> TreeResult<()> {
        let old_root = self
            .branch_arena
            .deallocate(root_id)
            .ok_or_else(|| BPlusTreeError::missing_node("Branch", root_id))?;
        self.root = old_root.children.first().copied().ok_or_else(|| {
            BPlusTreeError::corrupted_tree("Collapse", "root branch has no children")
        })?;
        debug!(new_root = self.root.id(), height = self.height(), "root collapsed");
        Ok(())
    }
}

fn mismatched_siblings() -> BPlusTreeError {
    BPlusTreeError::corrupted_tree("Rebalance", "siblings at one level differ in node kind")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree_with(order: usize, keys: impl IntoIterator<Item = i32>) -> BPlusTreeMap<i32, i32> {
        let mut tree = BPlusTreeMap::new(order).unwrap();
        for k in keys {
            tree.insert(k, k * 10);
        }
        tree
    }

    #[test]
    fn test_delete_missing_key_changes_nothing() {
        let mut tree = tree_with(4, 0..20);
        let before: Vec<_> = tree.items().map(|(k, v)| (*k, *v)).collect();
        let sizes = tree.leaf_sizes();

        assert!(!tree.delete(&100));
        assert!(!tree.delete(&-1));

        let after: Vec<_> = tree.items().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(before, after);
        assert_eq!(sizes, tree.leaf_sizes());
    }

    #[test]
    fn test_delete_last_entry_resets_root() {
        let mut tree = tree_with(4, [5]);
        assert!(tree.delete(&5));
        assert!(tree.is_empty());
        assert!(tree.is_leaf_root());
        assert_eq!(tree.search(&5), None);

        tree.insert(6, 60);
        assert_eq!(tree.search(&6), Some(&60));
    }

    #[test]
    fn test_borrow_from_left_leaf() {
        // order 4: leaves [1, 2] [3, 4]; grow left to three entries
        let mut tree = tree_with(4, [1, 2, 3, 4]);
        tree.insert(0, 0);
        assert_eq!(tree.leaf_sizes(), vec![3, 2]);

        assert!(tree.delete(&3));
        assert!(tree.delete(&4));
        assert_eq!(tree.leaf_sizes(), vec![2, 1]);
        let root = tree.get_branch(tree.root.id()).unwrap();
        assert_eq!(root.keys, vec![2]);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_borrow_from_right_leaf() {
        let mut tree = tree_with(4, [1, 2, 3, 4, 5]);
        assert_eq!(tree.leaf_sizes(), vec![2, 3]);

        assert!(tree.delete(&1));
        assert!(tree.delete(&2));
        assert_eq!(tree.leaf_sizes(), vec![1, 2]);
        let root = tree.get_branch(tree.root.id()).unwrap();
        assert_eq!(root.keys, vec![4]);
        assert_eq!(tree.search(&3), Some(&30));
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_merge_collapses_root() {
        // leaves [1, 2] [3, 4] thinned to [2] [3]: no sibling can lend
        let mut tree = tree_with(4, [1, 2, 3, 4]);
        assert!(tree.delete(&4));
        assert!(tree.delete(&1));
        assert_eq!(tree.leaf_sizes(), vec![1, 1]);

        assert!(tree.delete(&3));
        assert!(tree.is_leaf_root());
        assert_eq!(tree.count_nodes_in_tree(), (1, 0));
        assert_eq!(tree.branch_arena.len(), 0);
        assert_eq!(tree.leaf_arena.len(), 1);
        assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![2]);
        assert!(tree.check_invariants());
    }

    #[test]
    fn test_cascading_merges_shrink_height() {
        let mut tree = tree_with(3, 0..64);
        let tall = tree.height();
        assert!(tall >= 4);

        for k in 0..60 {
            assert!(tree.delete(&k), "failed to delete {}", k);
            assert!(tree.check_invariants(), "invalid after deleting {}", k);
        }
        assert!(tree.height() < tall);
        assert_eq!(tree.keys().copied().collect::<Vec<_>>(), vec![60, 61, 62, 63]);
    }

    #[test]
    fn test_delete_everything_in_mixed_order() {
        let mut tree = tree_with(5, 0..200);
        let order: Vec<i32> = (0..200).map(|i| (i * 37) % 200).collect();
        for (n, k) in order.iter().enumerate() {
            assert!(tree.delete(k));
            assert_eq!(tree.len(), 199 - n);
            assert!(tree.check_invariants(), "invalid after deleting {}", k);
        }
        assert!(tree.is_empty());
        assert!(tree.is_leaf_root());
    }

    #[test]
    fn test_try_delete_reports_presence() {
        let mut tree = tree_with(4, 0..10);
        assert_eq!(tree.try_delete(&3), Ok(true));
        assert_eq!(tree.try_delete(&3), Ok(false));
    }
}
