//! Iterator implementations for BPlusTreeMap.
//!
//! All iterators follow the leaf chain, so they see entries in key order.

use crate::types::{BPlusTreeMap, LeafNode, NodeId};

// ============================================================================
// ITERATOR STRUCTS
// ============================================================================

/// Iterator over key-value pairs in the B+ tree using the leaf linked list.
pub struct ItemIterator<'a, K, V> {
    tree: &'a BPlusTreeMap<K, V>,
    current_leaf: Option<&'a LeafNode<K, V>>,
    current_leaf_index: usize,
}

/// Iterator over keys in the B+ tree.
pub struct KeyIterator<'a, K, V> {
    items: ItemIterator<'a, K, V>,
}

/// Iterator over values in the B+ tree.
pub struct ValueIterator<'a, K, V> {
    items: ItemIterator<'a, K, V>,
}

// ============================================================================
// BPLUSTREE ITERATOR METHODS
// ============================================================================

impl<K, V> BPlusTreeMap<K, V> {
    /// Returns an iterator over all key-value pairs in sorted order.
    pub fn items(&self) -> ItemIterator<'_, K, V> {
        ItemIterator::new(self)
    }

    /// Returns an iterator over all keys in sorted order.
    pub fn keys(&self) -> KeyIterator<'_, K, V> {
        KeyIterator { items: self.items() }
    }

    /// Returns an iterator over all values in key order.
    pub fn values(&self) -> ValueIterator<'_, K, V> {
        ValueIterator { items: self.items() }
    }
}

// ============================================================================
// ITEMITERATOR IMPLEMENTATION
// ============================================================================

impl<'a, K, V> ItemIterator<'a, K, V> {
    pub fn new(tree: &'a BPlusTreeMap<K, V>) -> Self {
        let current_leaf = tree.get_first_leaf_id().and_then(|id| tree.get_leaf(id));
        Self {
            tree,
            current_leaf,
            current_leaf_index: 0,
        }
    }

    fn advance_leaf(&mut self, next: NodeId) {
        self.current_leaf = self.tree.get_leaf(next);
        self.current_leaf_index = 0;
    }
}

impl<'a, K, V> Iterator for ItemIterator<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let leaf = self.current_leaf?;
            let index = self.current_leaf_index;

            if let (Some(key), Some(value)) = (leaf.keys.get(index), leaf.values.get(index)) {
                self.current_leaf_index += 1;
                return Some((key, value));
            }

            // leaf exhausted (or empty): hop along the chain
            match leaf.next_id() {
                Some(next) => self.advance_leaf(next),
                None => {
                    self.current_leaf = None;
                    return None;
                }
            }
        }
    }
}

impl<'a, K, V> Iterator for KeyIterator<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(|(k, _)| k)
    }
}

impl<'a, K, V> Iterator for ValueIterator<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next().map(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_cross_leaf_boundaries() {
        let mut tree = BPlusTreeMap::new(4).unwrap();
        for i in (0..20).rev() {
            tree.insert(i, i * 100);
        }
        assert!(tree.leaf_count() > 1);

        let items: Vec<_> = tree.items().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(items, (0..20).map(|i| (i, i * 100)).collect::<Vec<_>>());
    }

    #[test]
    fn test_keys_and_values() {
        let mut tree = BPlusTreeMap::new(3).unwrap();
        for i in 0..10 {
            tree.insert(i, format!("v{}", i));
        }
        assert_eq!(tree.keys().count(), 10);
        assert_eq!(tree.values().next(), Some(&"v0".to_string()));
        assert_eq!(tree.keys().last(), Some(&9));
    }

    #[test]
    fn test_empty_tree_iterates_nothing() {
        let tree: BPlusTreeMap<i32, i32> = BPlusTreeMap::new(4).unwrap();
        assert_eq!(tree.items().next(), None);
    }
}
