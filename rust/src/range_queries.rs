//! Range query operations for BPlusTreeMap.
//!
//! Both directions walk the leaf chain and sort what they collect by key
//! before handing the values back.

use crate::types::{BPlusTreeMap, NodeId};

impl<K: Ord + Clone, V> BPlusTreeMap<K, V> {
    /// Values of every entry whose key is strictly greater than `key`, in key order.
    ///
    /// The scan starts at the leaf that would hold `key` and follows the leaf
    /// chain to its end.
    ///
    /// # Examples
    ///
    /// ```
    /// use bplus_index::BPlusTreeMap;
    ///
    /// let mut tree = BPlusTreeMap::new(4).unwrap();
    /// for k in [5, 1, 4, 2, 3] {
    ///     tree.insert(k, k * 100);
    /// }
    /// assert_eq!(tree.search_greater(&3), vec![&400, &500]);
    /// assert!(tree.search_greater(&5).is_empty());
    /// ```
    pub fn search_greater(&self, key: &K) -> Vec<&V> {
        self.collect_sorted(self.find_leaf_id(key), |k| k > key)
    }

    /// Values of every entry whose key is strictly less than `key`, in key order.
    ///
    /// Always scans from the leftmost leaf across the whole chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use bplus_index::BPlusTreeMap;
    ///
    /// let mut tree = BPlusTreeMap::new(4).unwrap();
    /// for k in [5, 1, 4, 2, 3] {
    ///     tree.insert(k, k * 100);
    /// }
    /// assert_eq!(tree.search_less(&3), vec![&100, &200]);
    /// assert!(tree.search_less(&1).is_empty());
    /// ```
    pub fn search_less(&self, key: &K) -> Vec<&V> {
        self.collect_sorted(self.get_first_leaf_id(), |k| k < key)
    }

    /// Walk the leaf chain from `start`, keep matching entries, and return
    /// their values ordered by key.
    fn collect_sorted<F>(&self, start: Option<NodeId>, matches: F) -> Vec<&V>
    where
        F: Fn(&K) -> bool,
    {
        let mut found: Vec<(&K, &V)> = Vec::new();
        let mut current = start;

        while let Some(leaf) = current.and_then(|id| self.get_leaf(id)) {
            found.extend(leaf.entries().filter(|(k, _)| matches(*k)));
            current = leaf.next_id();
        }

        // stable, so equal keys keep their leaf-chain order
        found.sort_by(|a, b| a.0.cmp(b.0));
        found.into_iter().map(|(_, v)| v).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(order: usize, n: i32) -> BPlusTreeMap<i32, i32> {
        let mut tree = BPlusTreeMap::new(order).unwrap();
        // scattered insertion order
        for i in 0..n {
            let k = (i * 7) % n;
            tree.insert(k, k);
        }
        tree
    }

    #[test]
    fn test_search_greater_across_leaves() {
        let tree = sample(4, 50);
        let greater: Vec<i32> = tree.search_greater(&30).into_iter().copied().collect();
        assert_eq!(greater, (31..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_search_less_across_leaves() {
        let tree = sample(4, 50);
        let less: Vec<i32> = tree.search_less(&30).into_iter().copied().collect();
        assert_eq!(less, (0..30).collect::<Vec<_>>());
    }

    #[test]
    fn test_bounds_outside_key_range() {
        let tree = sample(3, 20);
        assert_eq!(tree.search_greater(&-1).len(), 20);
        assert!(tree.search_greater(&19).is_empty());
        assert_eq!(tree.search_less(&100).len(), 20);
        assert!(tree.search_less(&0).is_empty());
    }

    #[test]
    fn test_absent_pivot_key() {
        let mut tree = BPlusTreeMap::new(4).unwrap();
        for k in (0..40).step_by(2) {
            tree.insert(k, k);
        }
        let greater: Vec<i32> = tree.search_greater(&21).into_iter().copied().collect();
        assert_eq!(greater, (22..40).step_by(2).collect::<Vec<_>>());
        let less: Vec<i32> = tree.search_less(&21).into_iter().copied().collect();
        assert_eq!(less, (0..21).step_by(2).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_tree_ranges() {
        let tree: BPlusTreeMap<i32, i32> = BPlusTreeMap::new(4).unwrap();
        assert!(tree.search_greater(&0).is_empty());
        assert!(tree.search_less(&0).is_empty());
    }
}
