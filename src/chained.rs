use std::{fmt, iter, mem, slice};

use log::{debug, trace, warn};

use crate::{
    DEFAULT_CAPACITY, MapError,
    chain::{self, Chain},
    hashing::{HashFunction, std_hash},
    prime,
};

/// A hash map resolving collisions with one linked list per bucket.
///
/// A key always lives in bucket `hash(key) % capacity`. The table doubles (to the next prime)
/// whenever an insertion finds the load factor at or above [`Self::MAX_LOAD`].
///
/// Note: This implementation is not thread-safe.
#[derive(Clone)]
pub struct ChainedMap<V, F = HashFunction> {
    /// One independently owned list per bucket; the length is always prime
    buckets: Vec<Chain<V>>,
    /// Number of entries across all buckets
    size: usize,
    /// Injected hash function, fixed for the life of the map
    hash_fn: F,
}

impl<V> ChainedMap<V> {
    /// Creates an empty map with [`DEFAULT_CAPACITY`] buckets hashed by [`std_hash`]
    #[must_use]
    pub fn new() -> Self {
        let buckets = iter::repeat_with(Chain::new).take(DEFAULT_CAPACITY).collect();
        Self { buckets, size: 0, hash_fn: std_hash }
    }

    /// Creates an empty map hashed by [`std_hash`] whose capacity is
    /// [`prime::next_prime`]`(capacity)`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::CapacityOverflow`] if that prime does not fit in `usize` or a table
    /// of that many slots cannot be allocated.
    pub fn with_capacity(capacity: usize) -> Result<Self, MapError> {
        Self::with_capacity_and_hasher(capacity, std_hash)
    }
}

impl<V> Default for ChainedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, F> fmt::Debug for ChainedMap<V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainedMap")
            .field("size", &self.size)
            .field("capacity", &self.buckets.len())
            .finish_non_exhaustive()
    }
}

impl<V, F> Extend<(String, V)> for ChainedMap<V, F>
where
    F: Fn(&str) -> u64,
{
    /// Inserts every pair, stopping at the first growth failure
    fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            if let Err(err) = self.put(key, value) {
                warn!("chained extend stopped early: {err}");
                return;
            }
        }
    }
}

impl<V> FromIterator<(String, V)> for ChainedMap<V> {
    fn from_iter<T: IntoIterator<Item = (String, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

/// Allocates `capacity` empty buckets without aborting on a table too large for memory
fn empty_buckets<V>(capacity: usize) -> Result<Vec<Chain<V>>, MapError> {
    let mut buckets = Vec::new();
    buckets
        .try_reserve_exact(capacity)
        .map_err(|_| MapError::CapacityOverflow { requested: capacity })?;
    buckets.resize_with(capacity, Chain::new);
    Ok(buckets)
}

impl<V, F> ChainedMap<V, F>
where
    F: Fn(&str) -> u64,
{
    /// Load factor at or above which the next insertion grows the table
    pub const MAX_LOAD: f64 = 1.0;

    /// Creates an empty map using `hash_fn` whose capacity is
    /// [`prime::next_prime`]`(capacity)`.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::CapacityOverflow`] if that prime does not fit in `usize` or a table
    /// of that many slots cannot be allocated.
    pub fn with_capacity_and_hasher(capacity: usize, hash_fn: F) -> Result<Self, MapError> {
        let capacity = prime::next_prime(capacity)?;
        Self::with_prime_capacity(capacity, hash_fn)
    }

    /// Builds the map around an already prime capacity
    fn with_prime_capacity(capacity: usize, hash_fn: F) -> Result<Self, MapError> {
        Ok(Self { buckets: empty_buckets(capacity)?, size: 0, hash_fn })
    }

    /// Gets the index of the bucket `key` belongs to
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn bucket_index(&self, key: &str) -> usize {
        let hash = (self.hash_fn)(key);
        // the remainder is below buckets.len(), so it fits back into usize
        (u128::from(hash) % self.buckets.len() as u128) as usize
    }

    /// The bucket `key` belongs to
    fn bucket(&self, key: &str) -> Option<&Chain<V>> {
        self.buckets.get(self.bucket_index(key))
    }

    /// Mutable access to the bucket `key` belongs to
    fn bucket_mut(&mut self, key: &str) -> Option<&mut Chain<V>> {
        let index = self.bucket_index(key);
        self.buckets.get_mut(index)
    }

    /// Inserts a key-value pair, returning the previous value if the key was present.
    ///
    /// If the load factor is at least [`Self::MAX_LOAD`] the table first grows to the next
    /// prime at or above twice its capacity. A new key is appended to the end of its bucket.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::CapacityOverflow`] if the table needs to grow but cannot, and
    /// [`MapError::ProbeExhausted`] if no bucket of the table holds the key's index.
    pub fn put(&mut self, key: String, value: V) -> Result<Option<V>, MapError> {
        if self.table_load() >= Self::MAX_LOAD {
            let doubled = self
                .capacity()
                .checked_mul(2)
                .ok_or(MapError::CapacityOverflow { requested: usize::MAX })?;
            self.resize(doubled)?;
        }

        let capacity = self.capacity();
        let Some(bucket) = self.bucket_mut(&key) else {
            return Err(MapError::ProbeExhausted { capacity });
        };
        if let Some(existing) = bucket.find_mut(&key) {
            return Ok(Some(mem::replace(existing, value)));
        }
        bucket.push_back(key, value);
        self.size = self.size.saturating_add(1);
        Ok(None)
    }

    /// Retrieve a value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.bucket(key)?.find(key)
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.bucket_mut(key)?.find_mut(key)
    }

    /// Returns true if the map holds an entry for `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.bucket(key).is_some_and(|bucket| bucket.contains(key))
    }

    /// Unlinks `key` from its bucket and returns its value.
    ///
    /// Removing a missing key changes nothing.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let removed = self.bucket_mut(key)?.remove(key)?;
        self.size = self.size.saturating_sub(1);
        Some(removed)
    }

    /// Rebuilds the table with at least `new_capacity` buckets.
    ///
    /// Does nothing if `new_capacity` is zero. Otherwise the capacity becomes `new_capacity`
    /// rounded up to a prime and every entry is re-inserted through [`Self::put`], which may
    /// grow the table further if the requested capacity is too small for the entries.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::CapacityOverflow`] if no prime at or above `new_capacity` fits in
    /// `usize` or its table cannot be allocated; the map is left untouched in that case.
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), MapError> {
        if new_capacity < 1 {
            trace!("chained resize to {new_capacity} skipped");
            return Ok(());
        }

        let new_capacity = prime::prime_at_least(new_capacity)?;
        debug!(
            "chained resize {} -> {new_capacity} moving {} entries",
            self.capacity(),
            self.size
        );

        let new_buckets = empty_buckets(new_capacity)?;
        let old_buckets = mem::replace(&mut self.buckets, new_buckets);
        self.size = 0;
        for (key, value) in old_buckets.into_iter().flatten() {
            self.put(key, value)?;
        }
        Ok(())
    }

    /// Returns the current load factor of the hash map
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Number of chain nodes examined by a lookup of `key`
    #[must_use]
    pub fn probe_length(&self, key: &str) -> usize {
        let Some(bucket) = self.bucket(key) else {
            return 0;
        };
        bucket
            .iter()
            .position(|(node_key, _)| node_key == key)
            .map_or(bucket.len(), |position| position.saturating_add(1))
    }
}

impl<V, F> ChainedMap<V, F> {
    /// Returns the number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Number of buckets holding no entries
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|bucket| bucket.is_empty()).count()
    }

    /// Replaces every bucket with an empty list, keeping the capacity
    pub fn clear(&mut self) {
        debug!("chained clear, dropping {} entries", self.size);
        for bucket in &mut self.buckets {
            *bucket = Chain::new();
        }
        self.size = 0;
    }

    /// Returns an iterator over the entries, bucket by bucket and in insertion order within
    /// a bucket
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { buckets: self.buckets.iter(), chain: None }
    }

    /// Copies every entry out, in the same order as [`Self::iter`]
    #[must_use]
    pub fn keys_and_values(&self) -> Vec<(String, V)>
    where
        V: Clone,
    {
        self.iter().map(|(key, value)| (key.to_owned(), value.clone())).collect()
    }
}

impl<'a, V, F> IntoIterator for &'a ChainedMap<V, F> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of a [`ChainedMap`]
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Buckets not yet started
    buckets: slice::Iter<'a, Chain<V>>,
    /// Position within the current bucket
    chain: Option<chain::Iter<'a, V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.chain.as_mut().and_then(Iterator::next) {
                return Some(item);
            }
            self.chain = Some(self.buckets.next()?.iter());
        }
    }
}
