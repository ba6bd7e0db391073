//! Error type shared by both map implementations

use thiserror::Error;

/// Failures reported by map construction, growth and insertion.
///
/// Looking up or removing a missing key is not an error; those operations
/// return `None` or `false` instead.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapError {
    /// No prime at or above the requested capacity fits in `usize`, or a table of that many
    /// slots cannot be allocated
    #[error("no table with a prime capacity of at least {requested} can be allocated")]
    CapacityOverflow {
        /// The capacity that was asked for
        requested: usize,
    },
    /// No slot or bucket of the table could take the key
    #[error("no usable slot for the key among all {capacity} slots")]
    ProbeExhausted {
        /// Capacity of the table that was probed
        capacity: usize,
    },
}
