//! Error handling and result types for BPlusTreeMap operations.

/// Error type for B+ tree operations.
#[derive(Debug, Clone, PartialEq)]
pub enum BPlusTreeError {
    /// Key not found in the tree.
    KeyNotFound,
    /// Invalid order specified at construction.
    InvalidOrder(String),
    /// A validation pass found a violated invariant.
    DataIntegrityError(String),
    /// Split or merge bookkeeping left the node graph inconsistent.
    CorruptedTree(String),
}

impl BPlusTreeError {
    /// Create an InvalidOrder error with context
    pub fn invalid_order(order: usize, min_required: usize) -> Self {
        Self::InvalidOrder(format!(
            "Order {} is invalid (minimum required: {})",
            order, min_required
        ))
    }

    /// Create a DataIntegrityError with context
    pub fn data_integrity(context: &str, details: &str) -> Self {
        Self::DataIntegrityError(format!("{}: {}", context, details))
    }

    /// Create a CorruptedTree error with context
    pub fn corrupted_tree(component: &str, details: &str) -> Self {
        Self::CorruptedTree(format!("{} corruption: {}", component, details))
    }

    /// Error for an arena id that no longer names a live node.
    pub(crate) fn missing_node(kind: &str, id: u32) -> Self {
        Self::corrupted_tree("Arena", &format!("{} node {} is not allocated", kind, id))
    }

    /// Check if this error is an order error
    pub fn is_order_error(&self) -> bool {
        matches!(self, Self::InvalidOrder(_))
    }

    /// Check if this error reports structural corruption
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::CorruptedTree(_))
    }
}

impl std::fmt::Display for BPlusTreeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BPlusTreeError::KeyNotFound => write!(f, "Key not found in tree"),
            BPlusTreeError::InvalidOrder(msg) => write!(f, "Invalid order: {}", msg),
            BPlusTreeError::DataIntegrityError(msg) => write!(f, "Data integrity error: {}", msg),
            BPlusTreeError::CorruptedTree(msg) => write!(f, "Corrupted tree: {}", msg),
        }
    }
}

impl std::error::Error for BPlusTreeError {}

/// Internal result type for tree operations
pub(crate) type TreeResult<T> = Result<T, BPlusTreeError>;

/// Public result type for tree operations that may fail
pub type BTreeResult<T> = Result<T, BPlusTreeError>;

/// Result type for key lookup operations
pub type KeyResult<T> = Result<T, BPlusTreeError>;

/// Result type for tree modification operations
pub type ModifyResult<T> = Result<T, BPlusTreeError>;

/// Result type for tree construction
pub type InitResult<T> = Result<T, BPlusTreeError>;
