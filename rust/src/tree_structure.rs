//! Tree structure management operations for BPlusTreeMap.
//!
//! Parent discovery, size queries and node counting.

use crate::types::{BPlusTreeMap, NodeId, NodeRef};

impl<K, V> BPlusTreeMap<K, V> {
    // ============================================================================
    // PARENT DISCOVERY
    // ============================================================================

    /// Find the branch whose children list holds `child`.
    ///
    /// Nodes carry no parent links, so this re-descends from the root and
    /// compares children by identity, never by key: routing keys do not pin
    /// down a node's slot while a rebalance is in flight. Returns `None` for
    /// the root and for nodes that are not in the tree. O(n) worst case.
    pub(crate) fn find_parent(&self, child: NodeRef<K, V>) -> Option<NodeId> {
        self.find_parent_from(self.root, child)
    }

    fn find_parent_from(&self, candidate: NodeRef<K, V>, child: NodeRef<K, V>) -> Option<NodeId> {
        let NodeRef::Branch(id, _) = candidate else {
            return None;
        };
        let branch = self.get_branch(id)?;
        if branch.children.contains(&child) {
            return Some(id);
        }
        // only branch children have anything below them
        branch
            .children
            .iter()
            .filter(|c| !c.is_leaf())
            .find_map(|c| self.find_parent_from(*c, child))
    }

    // ============================================================================
    // SIZE QUERIES
    // ============================================================================

    /// Returns the number of entries in the tree.
    pub fn len(&self) -> usize {
        self.len_recursive(&self.root)
    }

    fn len_recursive(&self, node: &NodeRef<K, V>) -> usize {
        match node {
            NodeRef::Leaf(id, _) => self.get_leaf(*id).map(|leaf| leaf.keys.len()).unwrap_or(0),
            NodeRef::Branch(id, _) => self
                .get_branch(*id)
                .map(|branch| {
                    branch
                        .children
                        .iter()
                        .map(|child| self.len_recursive(child))
                        .sum()
                })
                .unwrap_or(0),
        }
    }

    /// Returns true if the tree holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the root is a leaf node.
    pub fn is_leaf_root(&self) -> bool {
        self.root.is_leaf()
    }

    /// Number of levels, counting the leaf level (a lone root leaf is height 1).
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut current = self.root;
        while let NodeRef::Branch(id, _) = current {
            match self.get_branch(id).and_then(|b| b.children.first()) {
                Some(child) => current = *child,
                None => break,
            }
            height += 1;
        }
        height
    }

    /// Returns the number of leaf nodes in the tree.
    pub fn leaf_count(&self) -> usize {
        self.count_nodes_in_tree().0
    }

    /// Count the (leaf, branch) nodes reachable from the root.
    pub fn count_nodes_in_tree(&self) -> (usize, usize) {
        self.count_nodes_recursive(&self.root)
    }

    fn count_nodes_recursive(&self, node: &NodeRef<K, V>) -> (usize, usize) {
        match node {
            NodeRef::Leaf(_, _) => (1, 0),
            NodeRef::Branch(id, _) => match self.get_branch(*id) {
                Some(branch) => branch.children.iter().fold((0, 1), |(leaves, branches), child| {
                    let (l, b) = self.count_nodes_recursive(child);
                    (leaves + l, branches + b)
                }),
                None => (0, 0),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_parent_of_root_is_none() {
        let mut tree = BPlusTreeMap::new(4).unwrap();
        assert_eq!(tree.find_parent(tree.root), None);
        for i in 0..20 {
            tree.insert(i, i);
        }
        assert_eq!(tree.find_parent(tree.root), None);
    }

    #[test]
    fn test_find_parent_for_every_leaf() {
        let mut tree = BPlusTreeMap::new(3).unwrap();
        for i in 0..60 {
            tree.insert(i, i);
        }
        assert!(tree.height() >= 3);

        let mut leaf = tree.get_first_leaf_id();
        while let Some(id) = leaf {
            let parent = tree.find_parent(NodeRef::leaf(id)).unwrap();
            let branch = tree.get_branch(parent).unwrap();
            assert!(branch.child_position(NodeRef::leaf(id)).is_some());
            leaf = tree.get_leaf(id).unwrap().next_id();
        }
    }

    #[test]
    fn test_find_parent_of_branch_child_of_root() {
        let mut tree = BPlusTreeMap::new(3).unwrap();
        for i in 0..30 {
            tree.insert(i, i);
        }
        let root_id = tree.root.id();
        let first_child = tree.get_branch(root_id).unwrap().children[0];
        assert!(!first_child.is_leaf());
        assert_eq!(tree.find_parent(first_child), Some(root_id));
    }

    #[test]
    fn test_find_parent_of_detached_node() {
        let mut tree = BPlusTreeMap::new(4).unwrap();
        for i in 0..10 {
            tree.insert(i, i);
        }
        assert_eq!(tree.find_parent(NodeRef::leaf(999)), None);
    }

    #[test]
    fn test_size_queries() {
        let mut tree = BPlusTreeMap::new(4).unwrap();
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 1);
        assert_eq!(tree.leaf_count(), 1);

        for i in 0..4 {
            tree.insert(i, i);
        }
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.height(), 2);
        assert_eq!(tree.count_nodes_in_tree(), (2, 1));
    }
}
