use std::{fmt, iter, mem};

use log::{debug, trace, warn};

use crate::{
    DEFAULT_CAPACITY, MapError,
    hashing::{HashFunction, std_hash},
    prime,
};

/// A key-value pair stored in an occupied slot
#[derive(Debug, Clone)]
struct Entry<V> {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: V,
}

/// One position of the table.
///
/// A removed entry leaves a `Tombstone` behind so probe sequences that passed through this
/// slot when later keys were inserted still reach those keys.
#[derive(Debug, Clone)]
enum Slot<V> {
    /// Never used since the table was allocated or cleared
    Empty,
    /// Holds a live entry
    Occupied(Entry<V>),
    /// Held an entry that has since been removed
    Tombstone,
}

/// Where a probe sequence for a key ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    /// The slot holding the live entry for the key
    Found(usize),
    /// The first tombstone or empty slot on the key's probe sequence
    Vacant(usize),
    /// Every position was visited without finding the key or a free slot
    Exhausted,
}

/// A hash map resolving collisions with quadratic probing over a prime-sized table.
///
/// The `j`-th probe for a key lands on `(hash(key) + j²) % capacity`. The table doubles
/// (to the next prime) whenever an insertion finds the load factor at or above
/// [`Self::MAX_LOAD`], which keeps a free slot reachable on every probe sequence.
///
/// Note: This implementation is not thread-safe.
#[derive(Clone)]
pub struct OpenAddressingMap<V, F = HashFunction> {
    /// The table; its length is the capacity and is always prime
    slots: Vec<Slot<V>>,
    /// Number of live entries; tombstones are not counted
    size: usize,
    /// Injected hash function, fixed for the life of the map
    hash_fn: F,
}

impl<V> OpenAddressingMap<V> {
    /// Creates an empty map with [`DEFAULT_CAPACITY`] slots hashed by [`std_hash`]
    #[must_use]
    pub fn new() -> Self {
        let slots = iter::repeat_with(|| Slot::Empty).take(DEFAULT_CAPACITY).collect();
        Self { slots, size: 0, hash_fn: std_hash }
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

impl<V> Default for OpenAddressingMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, F> fmt::Debug for OpenAddressingMap<V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAddressingMap")
            .field("size", &self.size)
            .field("capacity", &self.slots.len())
            .finish_non_exhaustive()
    }
}

impl<V, F> Extend<(String, V)> for OpenAddressingMap<V, F>
where
    F: Fn(&str) -> u64,
{
    /// Inserts every pair, stopping at the first growth failure
    fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            if let Err(err) = self.put(key, value) {
                warn!("open addressing extend stopped early: {err}");
                return;
            }
        }
    }
}

impl<V> FromIterator<(String, V)> for OpenAddressingMap<V> {
    fn from_iter<T: IntoIterator<Item = (String, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

/// Allocates `capacity` empty slots without aborting on a table too large for memory
fn empty_slots<V>(capacity: usize) -> Result<Vec<Slot<V>>, MapError> {
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(capacity)
        .map_err(|_| MapError::CapacityOverflow { requested: capacity })?;
    slots.resize_with(capacity, || Slot::Empty);
    Ok(slots)
}

/// Index of the `step`-th probe for `hash` in a table of `capacity` slots.
///
/// Always computed from the key's hash, never from the previous index.
#[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
fn probe_index(hash: u64, step: usize, capacity: usize) -> usize {
    // (2^64 - 1)^2 + 2^64 - 1 < 2^128, so this cannot overflow
    let step = step as u128;
    ((u128::from(hash) + step * step) % capacity as u128) as usize
}

impl<V, F> OpenAddressingMap<V, F>
where
    F: Fn(&str) -> u64,
{
    /// Load factor at or above which the next insertion grows the table
    pub const MAX_LOAD: f64 = 0.5;

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
        Ok(Self { slots: empty_slots(capacity)?, size: 0, hash_fn })
    }

    /// Walks the probe sequence of `key`.
    ///
    /// Returns where it ended and how many slots were examined.
    fn probe(&self, key: &str) -> (Probe, usize) {
        let capacity = self.slots.len();
        let hash = (self.hash_fn)(key);
        let mut first_free = None;

        for step in 0..capacity {
            let index = probe_index(hash, step, capacity);
            let probes = step.saturating_add(1);
            match self.slots.get(index) {
                None | Some(Slot::Empty) => {
                    return (Probe::Vacant(first_free.unwrap_or(index)), probes);
                }
                Some(Slot::Tombstone) => {
                    if first_free.is_none() {
                        first_free = Some(index);
                    }
                }
                Some(Slot::Occupied(entry)) => {
                    if entry.key == key {
                        return (Probe::Found(index), probes);
                    }
                }
            }
        }

        let outcome = first_free.map_or(Probe::Exhausted, Probe::Vacant);
        (outcome, capacity)
    }

    /// Inserts a key-value pair, returning the previous value if the key was present.
    ///
    /// If the load factor is at least [`Self::MAX_LOAD`] the table first grows to the next
    /// prime at or above twice its capacity. A new key takes the first tombstone or empty
    /// slot on its probe sequence.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::CapacityOverflow`] if the table needs to grow but cannot, and
    /// [`MapError::ProbeExhausted`] if no slot on the probe sequence is usable.
    pub fn put(&mut self, key: String, value: V) -> Result<Option<V>, MapError> {
        if self.table_load() >= Self::MAX_LOAD {
            let doubled = self
                .capacity()
                .checked_mul(2)
                .ok_or(MapError::CapacityOverflow { requested: usize::MAX })?;
            self.resize(doubled)?;
        }

        let capacity = self.capacity();
        let index = match self.probe(&key).0 {
            Probe::Found(index) | Probe::Vacant(index) => index,
            Probe::Exhausted => return Err(MapError::ProbeExhausted { capacity }),
        };

        match self.slots.get_mut(index) {
            Some(Slot::Occupied(entry)) => Ok(Some(mem::replace(&mut entry.value, value))),
            Some(slot) => {
                *slot = Slot::Occupied(Entry { key, value });
                self.size = self.size.saturating_add(1);
                Ok(None)
            }
            None => Err(MapError::ProbeExhausted { capacity }),
        }
    }

    /// Retrieve a value for a given key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        if self.size == 0 {
            return None;
        }
        match self.probe(key).0 {
            Probe::Found(index) => match self.slots.get(index) {
                Some(Slot::Occupied(entry)) => Some(&entry.value),
                _ => None,
            },
            Probe::Vacant(_) | Probe::Exhausted => None,
        }
    }

    /// Get a mutable reference to a value for a given key
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        if self.size == 0 {
            return None;
        }
        match self.probe(key).0 {
            Probe::Found(index) => match self.slots.get_mut(index) {
                Some(Slot::Occupied(entry)) => Some(&mut entry.value),
                _ => None,
            },
            Probe::Vacant(_) | Probe::Exhausted => None,
        }
    }

    /// Returns true if the map holds a live entry for `key`
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key`, leaving a tombstone in its slot, and returns its value.
    ///
    /// Removing a missing key changes nothing.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        if self.size == 0 {
            return None;
        }
        let Probe::Found(index) = self.probe(key).0 else {
            return None;
        };
        let slot = self.slots.get_mut(index)?;
        match mem::replace(slot, Slot::Tombstone) {
            Slot::Occupied(entry) => {
                self.size = self.size.saturating_sub(1);
                Some(entry.value)
            }
            other => {
                *slot = other;
                None
            }
        }
    }

    /// Rebuilds the table with at least `new_capacity` slots.
    ///
    /// Does nothing if `new_capacity` is below the number of live entries. Otherwise the
    /// capacity becomes `new_capacity` rounded up to a prime, and every live entry is
    /// re-inserted through [`Self::put`], which drops tombstones and may grow the table
    /// further if the new capacity is too tight for the load bound.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::CapacityOverflow`] if no prime at or above `new_capacity` fits in
    /// `usize` or its table cannot be allocated; the map is left untouched in that case.
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), MapError> {
        if new_capacity < self.size {
            trace!("open addressing resize to {new_capacity} skipped, {} live entries", self.size);
            return Ok(());
        }

        let new_capacity = prime::prime_at_least(new_capacity)?;
        debug!(
            "open addressing resize {} -> {new_capacity} moving {} entries",
            self.capacity(),
            self.size
        );

        let new_slots = empty_slots(new_capacity)?;
        let old_slots = mem::replace(&mut self.slots, new_slots);
        self.size = 0;
        for slot in old_slots {
            if let Slot::Occupied(Entry { key, value }) = slot {
                self.put(key, value)?;
            }
        }
        Ok(())
    }

    /// Returns the current load factor of the hash map
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.slots.len() as f64
    }

    /// Number of slots not holding a live entry.
    ///
    /// Tombstones count as empty here: this is `capacity - size`.
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.capacity().saturating_sub(self.size)
    }

    /// Number of slots currently holding a tombstone
    #[must_use]
    pub fn tombstones(&self) -> usize {
        self.slots.iter().filter(|slot| matches!(slot, Slot::Tombstone)).count()
    }

    /// Number of slots examined by a lookup of `key`
    #[must_use]
    pub fn probe_length(&self, key: &str) -> usize {
        self.probe(key).1
    }
}

impl<V, F> OpenAddressingMap<V, F> {
    /// Returns the number of live entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no live entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots in the table
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Empties every slot, tombstones included, keeping the capacity
    pub fn clear(&mut self) {
        debug!("open addressing clear, dropping {} entries", self.size);
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
        self.size = 0;
    }

    /// Returns an iterator over live entries in slot order.
    ///
    /// Each call starts from the first slot; iterators are independent of each other.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { slots: &self.slots, index: 0 }
    }

    /// Copies every live entry out, in slot order
    #[must_use]
    pub fn keys_and_values(&self) -> Vec<(String, V)>
    where
        V: Clone,
    {
        self.iter().map(|(key, value)| (key.to_owned(), value.clone())).collect()
    }
}

impl<'a, V, F> IntoIterator for &'a OpenAddressingMap<V, F> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the live entries of an [`OpenAddressingMap`]
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Slots of the map being iterated
    slots: &'a [Slot<V>],
    /// Next slot to look at
    index: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.get(self.index) {
            self.index = self.index.saturating_add(1);
            if let Slot::Occupied(entry) = slot {
                return Some((entry.key.as_str(), &entry.value));
            }
        }
        None
    }
}
