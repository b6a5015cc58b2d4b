//! Node implementations for BPlusTreeMap.
//!
//! Node-local work lives here: positioning, splitting, borrowing and merging.
//! Anything that touches more than one node through the arenas is done by the
//! tree in the insert and delete modules.

use crate::types::{min_keys_for, BranchNode, LeafNode, NodeId, NodeRef, NULL_NODE};

// ============================================================================
// LEAF NODE IMPLEMENTATION
// ============================================================================

impl<K, V> LeafNode<K, V> {
    /// Returns the number of key-value pairs in this leaf.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Get a reference to the keys in this leaf node.
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Get a reference to the values in this leaf node.
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Key-value pairs of this leaf in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.keys.iter().zip(self.values.iter())
    }

    /// Smallest key in this leaf.
    pub fn first_key(&self) -> Option<&K> {
        self.keys.first()
    }

    /// Id of the next leaf in the chain.
    pub fn next_id(&self) -> Option<NodeId> {
        (self.next != NULL_NODE).then_some(self.next)
    }

    /// Returns true if this leaf node is empty.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<K: Ord, V> LeafNode<K, V> {
    // ============================================================================
    // GET OPERATIONS
    // ============================================================================

    /// Index of the first entry whose key equals `key`.
    fn position_of(&self, key: &K) -> Option<usize> {
        let index = self.keys.partition_point(|k| k < key);
        (self.keys.get(index) == Some(key)).then_some(index)
    }

    /// Get the value of the first entry with this key.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.position_of(key).map(|index| &self.values[index])
    }

    // ============================================================================
    // INSERT OPERATIONS
    // ============================================================================

    /// Insert a key-value pair in sorted position.
    ///
    /// The entry goes in front of any equal keys. Returns true when the leaf
    /// now overflows and must be split.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let index = self.keys.partition_point(|k| k < &key);
        self.keys.insert(index, key);
        self.values.insert(index, value);
        self.is_overfull()
    }

    /// Split this leaf at `len / 2`, returning the new right node.
    ///
    /// The right node inherits this leaf's `next`; the caller links this leaf
    /// to the right node once it has an arena id.
    pub fn split(&mut self) -> LeafNode<K, V> {
        let mid = self.keys.len() / 2;

        let new_right = LeafNode {
            order: self.order,
            keys: self.keys.split_off(mid),
            values: self.values.split_off(mid),
            next: self.next,
        };
        self.next = NULL_NODE;

        new_right
    }

    // ============================================================================
    // DELETE OPERATIONS
    // ============================================================================

    /// Remove the first entry with this key, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let index = self.position_of(key)?;
        self.keys.remove(index);
        Some(self.values.remove(index))
    }

    // ============================================================================
    // STATUS CHECKS
    // ============================================================================

    /// Returns true once the leaf holds `order` keys.
    pub fn is_overfull(&self) -> bool {
        self.keys.len() >= self.order
    }

    /// Returns true if this leaf node is below minimum occupancy.
    pub fn is_underfull(&self) -> bool {
        self.keys.len() < self.min_keys()
    }

    /// Returns true if this leaf can give an entry to a sibling.
    pub fn can_donate(&self) -> bool {
        self.keys.len() > self.min_keys()
    }

    /// Returns the minimum number of keys a non-root leaf must keep.
    pub fn min_keys(&self) -> usize {
        min_keys_for(self.order)
    }

    // ============================================================================
    // BORROWING AND MERGING HELPERS
    // ============================================================================

    /// Take the last entry (this leaf is the left sibling of the borrower).
    pub fn borrow_last(&mut self) -> Option<(K, V)> {
        if !self.can_donate() {
            return None;
        }
        let key = self.keys.pop()?;
        let value = self.values.pop()?;
        Some((key, value))
    }

    /// Take the first entry (this leaf is the right sibling of the borrower).
    pub fn borrow_first(&mut self) -> Option<(K, V)> {
        if !self.can_donate() || self.keys.is_empty() {
            return None;
        }
        Some((self.keys.remove(0), self.values.remove(0)))
    }

    /// Accept a borrowed entry at the front (from the left sibling).
    pub fn accept_from_left(&mut self, key: K, value: V) {
        self.keys.insert(0, key);
        self.values.insert(0, value);
    }

    /// Accept a borrowed entry at the back (from the right sibling).
    pub fn accept_from_right(&mut self, key: K, value: V) {
        self.keys.push(key);
        self.values.push(value);
    }

    /// Append every entry of the right-hand `other` and take over its `next` link.
    pub fn merge_from(&mut self, other: &mut LeafNode<K, V>) {
        self.keys.append(&mut other.keys);
        self.values.append(&mut other.values);
        self.next = other.next;
        other.next = NULL_NODE;
    }
}

// ============================================================================
// BRANCH NODE IMPLEMENTATION
// ============================================================================

impl<K: Ord, V> BranchNode<K, V> {
    /// Index of the child to descend into for `key`.
    ///
    /// This is the count of routing keys `<= key`, so ties route right.
    pub fn find_child_index(&self, key: &K) -> usize {
        self.keys.partition_point(|k| k <= key)
    }

    /// Get the child node for a given key.
    pub fn get_child(&self, key: &K) -> Option<NodeRef<K, V>> {
        self.children.get(self.find_child_index(key)).copied()
    }

    /// Slot of `child` in this branch, compared by identity.
    pub fn child_position(&self, child: NodeRef<K, V>) -> Option<usize> {
        self.children.iter().position(|c| *c == child)
    }

    // ============================================================================
    // INSERT OPERATIONS
    // ============================================================================

    /// Insert a routing key and the new child that follows the child at `child_index`.
    ///
    /// Returns true when the branch now overflows and must be split.
    pub fn insert_child(
        &mut self,
        child_index: usize,
        separator: K,
        new_child: NodeRef<K, V>,
    ) -> bool {
        self.keys.insert(child_index, separator);
        self.children.insert(child_index + 1, new_child);
        self.is_overfull()
    }

    /// Split this branch, returning the new right node and the promoted key.
    ///
    /// With `mid = len / 2` the left keeps keys `[0, mid)` and children
    /// `[0, mid]`; key `mid` moves up; the right takes the rest.
    pub fn split(&mut self) -> Option<(BranchNode<K, V>, K)> {
        let mid = self.keys.len() / 2;
        let mut right_keys = self.keys.split_off(mid);
        if right_keys.is_empty() {
            return None;
        }
        let promoted_key = right_keys.remove(0);
        let right_children = self.children.split_off(mid + 1);

        let new_right = BranchNode {
            order: self.order,
            keys: right_keys,
            children: right_children,
        };

        Some((new_right, promoted_key))
    }

    // ============================================================================
    // STATUS CHECKS
    // ============================================================================

    /// Returns the number of keys in this branch node.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns true if this branch node has no routing keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns true once the branch holds `order` keys.
    pub fn is_overfull(&self) -> bool {
        self.keys.len() >= self.order
    }

    /// Returns true if this branch node is below minimum occupancy.
    pub fn is_underfull(&self) -> bool {
        self.keys.len() < self.min_keys()
    }

    /// Returns true if this branch can give a key to a sibling.
    pub fn can_donate(&self) -> bool {
        self.keys.len() > self.min_keys()
    }

    /// Returns the minimum number of keys a non-root branch must keep.
    pub fn min_keys(&self) -> usize {
        min_keys_for(self.order)
    }

    // ============================================================================
    // BORROWING AND MERGING HELPERS
    // ============================================================================

    /// Borrow the last key and child (this branch is the left sibling).
    pub fn borrow_last(&mut self) -> Option<(K, NodeRef<K, V>)> {
        if !self.can_donate() {
            return None;
        }
        let key = self.keys.pop()?;
        let child = self.children.pop()?;
        Some((key, child))
    }

    /// Borrow the first key and child (this branch is the right sibling).
    pub fn borrow_first(&mut self) -> Option<(K, NodeRef<K, V>)> {
        if !self.can_donate() || self.keys.is_empty() {
            return None;
        }
        let key = self.keys.remove(0);
        let child = self.children.remove(0);
        Some((key, child))
    }

    /// Accept a child moved from the left sibling.
    ///
    /// The parent's separator comes down as the new first key; the key moved
    /// out of the sibling is returned as the parent's new separator.
    pub fn accept_from_left(
        &mut self,
        separator: K,
        moved_key: K,
        moved_child: NodeRef<K, V>,
    ) -> K {
        self.keys.insert(0, separator);
        self.children.insert(0, moved_child);
        moved_key
    }

    /// Accept a child moved from the right sibling.
    pub fn accept_from_right(
        &mut self,
        separator: K,
        moved_key: K,
        moved_child: NodeRef<K, V>,
    ) -> K {
        self.keys.push(separator);
        self.children.push(moved_child);
        moved_key
    }

    /// Merge the right-hand `other` into this branch, pulling `separator` down from the parent.
    pub fn merge_from(&mut self, separator: K, other: &mut BranchNode<K, V>) {
        self.keys.push(separator);
        self.keys.append(&mut other.keys);
        self.children.append(&mut other.children);
    }
}
