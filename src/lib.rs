//! twin-maps: two single-threaded ordered-key maps with checked,
//! bidirectional cursors.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: two independent associative containers with the same surface
//!   (insert, lookup, removal, equality, cursors) and different engines.
//! - Containers:
//!   - ChainedHashMap<K, V, S, N>: `N` fixed buckets with separate
//!     chaining; caches the lowest and highest occupied bucket so cursors
//!     and iterators only walk the occupied range.
//!   - TreeMap<K, V>: unbalanced binary search tree whose nodes live in a
//!     slot arena linked by parent/left/right keys.
//! - Cursors: both maps implement `BidirectionalCursor` for a read-only
//!   `Cursor` and a `CursorMut`. Stepping past either sentinel and
//!   dereferencing the end sentinel are reported as errors, never UB.
//!
//! Constraints
//! - Single-threaded; no internal locking.
//! - Keys are immutable once inserted; only values are handed out mutably.
//! - Keys are unique. `insert` rejects a duplicate without touching the
//!   stored value; the `get_or_insert_*` accessors return it instead.
//! - The hash map never rehashes. Under heavy load chains grow and lookups
//!   degrade to a linear scan of one bucket.
//! - The tree never rebalances. Sorted insertion degrades it into a list.
//!
//! Positions and invalidation
//! - `Position` is a copyable location token. Taking one from a cursor and
//!   handing it back to `remove_at`/`cursor_at` is how an entry found
//!   through a shared borrow is removed through a mutable one.
//! - A tree position to a removed node never resolves again (generational
//!   keys). A hash map position into a modified bucket may resolve to a
//!   neighbour; callers must not reuse positions across mutations of the
//!   same bucket.
//!
//! Failure model
//! - `MapError::NotFound`: `value_of*` and `remove*` on an empty map, an
//!   absent key, or the end sentinel.
//! - `MapError::InvalidOperation`: cursor dereference at end, stepping
//!   forward from end, stepping backward from the first entry.
//! - `InsertError::DuplicateKey`: `insert` of a present key.
//! - Every fallible operation validates before mutating.
//!
//! Diagnostics
//! - Structural changes (occupied-range shrinking, tree deletion cases)
//!   emit `tracing` events at trace level. The crate installs no subscriber.

mod bucket_hasher;
pub mod chained_hash_map;
mod chained_hash_map_proptest;
pub mod cursor;
mod error;
pub mod tree_map;
mod tree_map_proptest;

// Public surface
pub use bucket_hasher::{BucketHasher, BuildBucketHasher};
pub use chained_hash_map::{ChainedHashMap, DEFAULT_CAPACITY};
pub use cursor::BidirectionalCursor;
pub use error::{InsertError, MapError};
pub use tree_map::TreeMap;
