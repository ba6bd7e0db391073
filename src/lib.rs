//! # Prime Hash Maps
//!
//! Two string-keyed hash maps that keep their tables at prime sizes.
//!
//! This crate provides two hash map implementations:
//!
//! - `OpenAddressingMap`: quadratic probing over a flat table, with tombstones marking
//!   removed entries; grows once the load factor reaches 0.5
//! - `ChainedMap`: one linked list per bucket; grows once the load factor reaches 1.0
//!
//! Both take their hash function at construction and share the [`StringMap`] operations,
//! which [`find_mode`] builds on.
//!
//! ## Basic Usage
//!
//! ```rust
//! use primemap::{OpenAddressingMap, hashing::additive_hash};
//!
//! // Create a map with 11 slots and an injected hash function
//! let mut map = OpenAddressingMap::with_capacity_and_hasher(11, additive_hash)?;
//!
//! // Insert values
//! map.put("apple".to_string(), 1)?;
//! map.put("banana".to_string(), 2)?;
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values
//! map.put("apple".to_string(), 10)?;
//! assert_eq!(map.get("apple"), Some(&10));
//!
//! // Remove values
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//! # Ok::<(), primemap::MapError>(())
//! ```
//!
//! ## Finding Modes
//!
//! ```rust
//! use primemap::find_mode;
//!
//! let mode = find_mode(["apple", "apple", "grape", "melon", "peach"])?;
//! assert_eq!(mode.values, vec!["apple".to_string()]);
//! assert_eq!(mode.frequency, 2);
//! # Ok::<(), primemap::MapError>(())
//! ```
//!
//! Neither map is thread-safe. Resizing logs through the `log` facade at debug level.

/// Singly-linked list used for chained buckets
pub mod chain;
/// Module implementing a hash map with separate chaining
mod chained;
/// Error type shared by the maps
mod error;
/// Hash functions that can be injected into the maps
pub mod hashing;
/// Mode finding on top of the shared map operations
mod mode;
/// Module implementing a hash map with quadratic probing
mod open_addressing;
/// Prime table sizing
pub mod prime;
/// The operations shared by both maps
mod utils;

pub use chained::{ChainedMap, Iter as ChainedIter};
pub use error::MapError;
pub use mode::{Mode, find_mode, find_mode_with};
pub use open_addressing::{Iter as OpenAddressingIter, OpenAddressingMap};
pub use utils::StringMap;

/// Capacity used by `new()` and `Default` for both maps
pub const DEFAULT_CAPACITY: usize = 11;
