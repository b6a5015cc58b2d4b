//! Validation and debugging utilities for BPlusTreeMap.
//!
//! Invariant checks used by the test suites, plus a few introspection helpers.

use crate::compact_arena::CompactArenaStats;
use crate::error::{BPlusTreeError, BTreeResult};
use crate::types::{BPlusTreeMap, NodeId, NodeRef};

// ============================================================================
// VALIDATION METHODS
// ============================================================================

impl<K: Ord + Clone, V> BPlusTreeMap<K, V> {
    /// Check if the tree maintains B+ tree invariants.
    /// Returns true if all invariants are satisfied.
    pub fn check_invariants(&self) -> bool {
        self.check_invariants_detailed().is_ok()
    }

    /// Check invariants with detailed error reporting.
    ///
    /// Covers key order and routing bounds, node occupancy, uniform leaf
    /// depth, the leaf chain, and arena bookkeeping.
    pub fn check_invariants_detailed(&self) -> BTreeResult<()> {
        let mut leaf_depth = None;
        self.check_node(&self.root, None, None, true, 1, &mut leaf_depth)?;
        self.check_linked_list()?;
        self.check_arena_tree_consistency()
    }

    /// Alias for check_invariants_detailed (for test compatibility).
    pub fn validate(&self) -> BTreeResult<()> {
        self.check_invariants_detailed()
    }

    /// Recursively check a node and its subtree.
    ///
    /// Every key must satisfy `min_key <= key <= max_key`; the upper bound is
    /// inclusive because runs of duplicate keys may straddle a split.
    fn check_node(
        &self,
        node: &NodeRef<K, V>,
        min_key: Option<&K>,
        max_key: Option<&K>,
        is_root: bool,
        depth: usize,
        leaf_depth: &mut Option<usize>,
    ) -> BTreeResult<()> {
        let max_keys = self.order - 1;
        match node {
            NodeRef::Leaf(id, _) => {
                let leaf = self.get_leaf(*id).ok_or_else(|| missing("Leaf", *id))?;

                if leaf.keys.len() != leaf.values.len() {
                    return Err(violation(*id, "keys and values differ in length"));
                }
                check_sorted(*id, &leaf.keys)?;
                check_bounds(*id, &leaf.keys, min_key, max_key)?;
                if leaf.keys.len() > max_keys {
                    return Err(violation(*id, "leaf exceeds order - 1 keys"));
                }
                if !is_root && leaf.is_underfull() {
                    return Err(violation(*id, "non-root leaf is underfull"));
                }

                match *leaf_depth {
                    None => *leaf_depth = Some(depth),
                    Some(expected) if expected != depth => {
                        return Err(violation(*id, "leaves at different depths"));
                    }
                    Some(_) => {}
                }
                Ok(())
            }
            NodeRef::Branch(id, _) => {
                let branch = self.get_branch(*id).ok_or_else(|| missing("Branch", *id))?;

                if branch.keys.len() + 1 != branch.children.len() {
                    return Err(violation(*id, "branch must have one more child than keys"));
                }
                if branch.keys.is_empty() {
                    return Err(violation(*id, "branch has no routing keys"));
                }
                check_sorted(*id, &branch.keys)?;
                check_bounds(*id, &branch.keys, min_key, max_key)?;
                if branch.keys.len() > max_keys {
                    return Err(violation(*id, "branch exceeds order - 1 keys"));
                }
                if !is_root && branch.is_underfull() {
                    return Err(violation(*id, "non-root branch is underfull"));
                }

                for (i, child) in branch.children.iter().enumerate() {
                    let child_min = if i == 0 { min_key } else { branch.keys.get(i - 1) };
                    let child_max = if i == branch.keys.len() {
                        max_key
                    } else {
                        branch.keys.get(i)
                    };
                    self.check_node(child, child_min, child_max, false, depth + 1, leaf_depth)?;
                }
                Ok(())
            }
        }
    }

    /// Check that the leaf chain yields every entry in non-decreasing order.
    fn check_linked_list(&self) -> BTreeResult<()> {
        let keys: Vec<&K> = self.keys().collect();

        if let Some(i) = (1..keys.len()).find(|&i| keys[i - 1] > keys[i]) {
            return Err(BPlusTreeError::data_integrity(
                "Leaf chain",
                &format!("unsorted keys at position {}", i),
            ));
        }

        if keys.len() != self.len() {
            return Err(BPlusTreeError::data_integrity(
                "Leaf chain",
                &format!("chain holds {} keys but tree has {}", keys.len(), self.len()),
            ));
        }

        Ok(())
    }

    /// Check that arena allocation matches the tree structure and that the
    /// leaf chain visits exactly the leaves of the tree, left to right.
    fn check_arena_tree_consistency(&self) -> BTreeResult<()> {
        let (tree_leaf_count, tree_branch_count) = self.count_nodes_in_tree();

        if tree_leaf_count != self.leaf_arena.len() {
            return Err(BPlusTreeError::data_integrity(
                "Leaf arena",
                &format!("{} in tree vs {} allocated", tree_leaf_count, self.leaf_arena.len()),
            ));
        }
        if tree_branch_count != self.branch_arena.len() {
            return Err(BPlusTreeError::data_integrity(
                "Branch arena",
                &format!("{} in tree vs {} allocated", tree_branch_count, self.branch_arena.len()),
            ));
        }

        let mut tree_leaf_ids = Vec::new();
        self.collect_leaf_ids(&self.root, &mut tree_leaf_ids);

        let mut chain_ids = Vec::new();
        let mut current = self.get_first_leaf_id();
        while let Some(id) = current {
            if chain_ids.len() > tree_leaf_ids.len() {
                return Err(BPlusTreeError::data_integrity("Leaf chain", "cycle detected"));
            }
            chain_ids.push(id);
            current = self.get_leaf(id).and_then(|leaf| leaf.next_id());
        }

        if tree_leaf_ids != chain_ids {
            return Err(BPlusTreeError::data_integrity(
                "Leaf chain",
                &format!("tree order {:?}, chain order {:?}", tree_leaf_ids, chain_ids),
            ));
        }

        Ok(())
    }

    /// Collect leaf ids in left-to-right tree order.
    fn collect_leaf_ids(&self, node: &NodeRef<K, V>, ids: &mut Vec<NodeId>) {
        match node {
            NodeRef::Leaf(id, _) => ids.push(*id),
            NodeRef::Branch(id, _) => {
                if let Some(branch) = self.get_branch(*id) {
                    for child in &branch.children {
                        self.collect_leaf_ids(child, ids);
                    }
                }
            }
        }
    }
}

// ============================================================================
// DEBUGGING AND TESTING UTILITIES
// ============================================================================

impl<K, V> BPlusTreeMap<K, V> {
    /// Returns the sizes of all leaf nodes in chain order (for testing/debugging).
    pub fn leaf_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::new();
        let mut current = self.get_first_leaf_id();
        while let Some(leaf) = current.and_then(|id| self.get_leaf(id)) {
            sizes.push(leaf.len());
            current = leaf.next_id();
        }
        sizes
    }

    /// Get statistics for the leaf node arena.
    pub fn leaf_arena_stats(&self) -> CompactArenaStats {
        self.leaf_arena.stats()
    }

    /// Get statistics for the branch node arena.
    pub fn branch_arena_stats(&self) -> CompactArenaStats {
        self.branch_arena.stats()
    }
}

fn missing(kind: &str, id: NodeId) -> BPlusTreeError {
    BPlusTreeError::data_integrity("Tree", &format!("{} node {} is not allocated", kind, id))
}

fn violation(id: NodeId, details: &str) -> BPlusTreeError {
    BPlusTreeError::data_integrity(&format!("Node {}", id), details)
}

fn check_sorted<K: Ord>(id: NodeId, keys: &[K]) -> BTreeResult<()> {
    if keys.windows(2).any(|w| w[0] > w[1]) {
        return Err(violation(id, "keys out of order"));
    }
    Ok(())
}

fn check_bounds<K: Ord>(
    id: NodeId,
    keys: &[K],
    min_key: Option<&K>,
    max_key: Option<&K>,
) -> BTreeResult<()> {
    if let (Some(min), Some(first)) = (min_key, keys.first()) {
        if first < min {
            return Err(violation(id, "key below the routing key on its left"));
        }
    }
    if let (Some(max), Some(last)) = (max_key, keys.last()) {
        if last > max {
            return Err(violation(id, "key above the routing key on its right"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_tree_is_valid() {
        let tree: BPlusTreeMap<i32, i32> = BPlusTreeMap::new(4).unwrap();
        assert!(tree.check_invariants());
        assert_eq!(tree.leaf_sizes(), vec![0]);
    }

    #[test]
    fn test_detects_unsorted_leaf() {
        let mut tree = BPlusTreeMap::new(4).unwrap();
        for k in [1, 2, 3] {
            tree.insert(k, k);
        }
        let root = tree.root.id();
        tree.get_leaf_mut(root).unwrap().keys.swap(0, 2);
        assert!(!tree.check_invariants());
    }

    #[test]
    fn test_detects_broken_leaf_chain() {
        let mut tree = BPlusTreeMap::new(4).unwrap();
        for k in 0..12 {
            tree.insert(k, k);
        }
        let first = tree.get_first_leaf_id().unwrap();
        tree.get_leaf_mut(first).unwrap().next = crate::types::NULL_NODE;
        let err = tree.check_invariants_detailed().unwrap_err();
        assert!(matches!(err, BPlusTreeError::DataIntegrityError(_)));
    }

    #[test]
    fn test_detects_underfull_node() {
        let mut tree = BPlusTreeMap::new(5).unwrap();
        for k in 0..10 {
            tree.insert(k, k);
        }
        let first = tree.get_first_leaf_id().unwrap();
        tree.get_leaf_mut(first).unwrap().keys.truncate(1);
        tree.get_leaf_mut(first).unwrap().values.truncate(1);
        assert!(!tree.check_invariants());
    }

    #[test]
    fn test_arena_stats_follow_merges() {
        let mut tree = BPlusTreeMap::new(3).unwrap();
        for k in 0..30 {
            tree.insert(k, k);
        }
        let grown = tree.leaf_arena_stats().allocated_count;
        assert_eq!(grown, tree.leaf_count());

        for k in 0..25 {
            tree.delete(&k);
        }
        let stats = tree.leaf_arena_stats();
        assert_eq!(stats.allocated_count, tree.leaf_count());
        assert!(stats.free_count > 0);
        assert_eq!(tree.branch_arena_stats().allocated_count, tree.count_nodes_in_tree().1);
    }
}
