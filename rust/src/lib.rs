//! In-memory B+ tree index.
//!
//! [`BPlusTreeMap`] keeps integer-like keys with opaque values and supports
//! insertion, point lookup, strict greater-than / less-than range lookups and
//! deletion with sibling borrow/merge rebalancing. [`NameHasher`] derives
//! integer keys from names for the bundled demo.
//!
//! ```
//! use bplus_index::{BPlusTreeMap, NameHasher};
//!
//! let hasher = NameHasher::new();
//! let mut tree = BPlusTreeMap::new(4).unwrap();
//! for name in ["Курча", "Андрій", "Оксана"] {
//!     tree.insert(hasher.hash_name(name), name);
//! }
//!
//! let pivot = hasher.hash_name("Курча");
//! assert_eq!(tree.search(&pivot), Some(&"Курча"));
//! assert_eq!(tree.search_less(&pivot), vec![&"Андрій"]);
//! assert_eq!(tree.search_greater(&pivot), vec![&"Оксана"]);
//! ```

mod compact_arena;
mod construction;
mod delete_operations;
mod error;
mod get_operations;
mod insert_operations;
mod iteration;
mod name_key;
mod node;
mod range_queries;
mod tree_structure;
mod types;
mod validation;

pub use compact_arena::{CompactArena, CompactArenaStats};
pub use construction::validate_order;
pub use error::{BPlusTreeError, BTreeResult, InitResult, KeyResult, ModifyResult};
pub use iteration::{ItemIterator, KeyIterator, ValueIterator};
pub use name_key::{NameHasher, UKRAINIAN_ALPHABET};
pub use types::{
    BPlusTreeMap, BranchNode, LeafNode, NodeId, NodeRef, DEFAULT_ORDER, MIN_ORDER, NULL_NODE,
};
