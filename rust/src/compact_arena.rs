//! Compact arena storing nodes in a `Vec<T>` with a free list.
//!
//! Nodes refer to each other by [`NodeId`] rather than by pointer, so the
//! tree's children and leaf-chain links never fight the borrow checker.

use std::convert::TryFrom;

/// Index of a node inside an arena.
pub type NodeId = u32;

/// Sentinel id meaning "no node".
pub const NULL_NODE: NodeId = u32::MAX;

/// Id handed out for the item passed to [`CompactArena::with_first`].
pub const FIRST_NODE: NodeId = 0;

/// Statistics for a compact arena
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompactArenaStats {
    pub total_slots: usize,
    pub allocated_count: usize,
    pub free_count: usize,
    pub fragmentation: f64,
}

/// Arena allocator over a plain `Vec<T>` plus an allocation mask.
///
/// Freed slots are replaced by `T::default()` and recycled by later
/// allocations, so ids stay stable for the lifetime of a node.
#[derive(Debug)]
pub struct CompactArena<T> {
    /// Direct storage without Option wrapper
    storage: Vec<T>,
    /// Free slot indices for reuse
    free_list: Vec<usize>,
    /// Track which slots are actually allocated
    allocated_mask: Vec<bool>,
}

impl<T> CompactArena<T> {
    /// Create a new empty compact arena
    pub fn new() -> Self {
        Self {
            storage: Vec::new(),
            free_list: Vec::new(),
            allocated_mask: Vec::new(),
        }
    }

    /// Create an arena holding a single item at [`FIRST_NODE`].
    pub fn with_first(item: T) -> Self {
        Self {
            storage: vec![item],
            free_list: Vec::new(),
            allocated_mask: vec![true],
        }
    }

    /// Allocate a new item in the arena and return its ID.
    ///
    /// Returns `None` once the arena holds more slots than a `NodeId` can name.
    #[inline]
    pub fn allocate(&mut self, item: T) -> Option<NodeId> {
        if let Some(free_index) = self.free_list.pop() {
            self.storage[free_index] = item;
            self.allocated_mask[free_index] = true;
            return NodeId::try_from(free_index).ok();
        }

        let index = self.storage.len();
        let id = NodeId::try_from(index).ok().filter(|&id| id != NULL_NODE)?;
        self.storage.push(item);
        self.allocated_mask.push(true);
        Some(id)
    }

    /// Get a reference to an item in the arena
    #[inline]
    pub fn get(&self, id: NodeId) -> Option<&T> {
        let index = self.live_index(id)?;
        self.storage.get(index)
    }

    /// Get a mutable reference to an item in the arena
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        let index = self.live_index(id)?;
        self.storage.get_mut(index)
    }

    /// Check if an ID is valid and allocated
    pub fn contains(&self, id: NodeId) -> bool {
        self.live_index(id).is_some()
    }

    fn live_index(&self, id: NodeId) -> Option<usize> {
        if id == NULL_NODE {
            return None;
        }
        let index = usize::try_from(id).ok()?;
        self.allocated_mask
            .get(index)
            .copied()
            .unwrap_or(false)
            .then_some(index)
    }

    /// Get arena statistics
    pub fn stats(&self) -> CompactArenaStats {
        let allocated_count = self.len();
        let free_count = self.free_list.len();
        let fragmentation = if allocated_count > 0 {
            free_count as f64 / (allocated_count + free_count) as f64
        } else {
            0.0
        };

        CompactArenaStats {
            total_slots: self.storage.len(),
            allocated_count,
            free_count,
            fragmentation,
        }
    }

    /// Get the number of allocated items
    pub fn len(&self) -> usize {
        self.allocated_mask
            .iter()
            .filter(|&&allocated| allocated)
            .count()
    }

    /// Check if the arena is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all items from the arena
    pub fn clear(&mut self) {
        self.storage.clear();
        self.allocated_mask.clear();
        self.free_list.clear();
    }

    /// Get the number of free slots
    pub fn free_count(&self) -> usize {
        self.free_list.len()
    }
}

impl<T> Default for CompactArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Default> CompactArena<T> {
    /// Free a slot and hand back the item it held.
    pub fn deallocate(&mut self, id: NodeId) -> Option<T> {
        let index = self.live_index(id)?;

        self.allocated_mask[index] = false;
        self.free_list.push(index);

        Some(std::mem::take(&mut self.storage[index]))
    }
}
