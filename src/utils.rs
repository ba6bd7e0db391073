//! The operations both map implementations share, so algorithms such as
//! [`crate::find_mode_with`] can run on either one

use crate::{ChainedMap, MapError, OpenAddressingMap};

/// A map from owned string keys to values with a prime-sized, growable table
pub trait StringMap<V> {
    /// Inserts or updates `key`, returning the previous value.
    ///
    /// # Errors
    ///
    /// Fails only if the table has to grow and cannot.
    fn put(&mut self, key: String, value: V) -> Result<Option<V>, MapError>;

    /// Returns the value stored under `key`
    fn get(&self, key: &str) -> Option<&V>;

    /// Returns a mutable reference to the value stored under `key`
    fn get_mut(&mut self, key: &str) -> Option<&mut V>;

    /// Removes `key`, returning its value; a missing key is a no-op
    fn remove(&mut self, key: &str) -> Option<V>;

    /// Rebuilds the table with at least `new_capacity` slots, subject to the
    /// implementation's lower bound
    ///
    /// # Errors
    ///
    /// Fails if no prime capacity at or above `new_capacity` fits in `usize`.
    fn resize(&mut self, new_capacity: usize) -> Result<(), MapError>;

    /// Removes every entry, keeping the capacity
    fn clear(&mut self);

    /// Returns the number of entries
    fn len(&self) -> usize;

    /// Returns the number of slots or buckets
    fn capacity(&self) -> usize;

    /// Returns `len() / capacity()`
    fn table_load(&self) -> f64;

    /// Returns the number of empty slots or buckets, as the implementation counts them
    fn empty_buckets(&self) -> usize;

    /// Borrows every entry in the implementation's enumeration order
    fn entries(&self) -> Vec<(&str, &V)>;

    /// Returns true if the map holds an entry for `key`
    fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Returns true if the map holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the keys as a Vec
    fn keys(&self) -> Vec<String> {
        self.entries().into_iter().map(|(key, _)| key.to_owned()).collect()
    }

    /// Returns the values as a Vec
    fn values(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.entries().into_iter().map(|(_, value)| value.clone()).collect()
    }

    /// Copies every entry out as owned pairs
    fn keys_and_values(&self) -> Vec<(String, V)>
    where
        V: Clone,
    {
        self.entries().into_iter().map(|(key, value)| (key.to_owned(), value.clone())).collect()
    }
}

impl<V, F> StringMap<V> for OpenAddressingMap<V, F>
where
    F: Fn(&str) -> u64,
{
    fn put(&mut self, key: String, value: V) -> Result<Option<V>, MapError> {
        Self::put(self, key, value)
    }

    fn get(&self, key: &str) -> Option<&V> {
        Self::get(self, key)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        Self::get_mut(self, key)
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        Self::remove(self, key)
    }

    fn resize(&mut self, new_capacity: usize) -> Result<(), MapError> {
        Self::resize(self, new_capacity)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn capacity(&self) -> usize {
        Self::capacity(self)
    }

    fn table_load(&self) -> f64 {
        Self::table_load(self)
    }

    fn empty_buckets(&self) -> usize {
        Self::empty_buckets(self)
    }

    fn entries(&self) -> Vec<(&str, &V)> {
        self.iter().collect()
    }
}

impl<V, F> StringMap<V> for ChainedMap<V, F>
where
    F: Fn(&str) -> u64,
{
    fn put(&mut self, key: String, value: V) -> Result<Option<V>, MapError> {
        Self::put(self, key, value)
    }

    fn get(&self, key: &str) -> Option<&V> {
        Self::get(self, key)
    }

    fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        Self::get_mut(self, key)
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        Self::remove(self, key)
    }

    fn resize(&mut self, new_capacity: usize) -> Result<(), MapError> {
        Self::resize(self, new_capacity)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn capacity(&self) -> usize {
        Self::capacity(self)
    }

    fn table_load(&self) -> f64 {
        Self::table_load(self)
    }

    fn empty_buckets(&self) -> usize {
        Self::empty_buckets(self)
    }

    fn entries(&self) -> Vec<(&str, &V)> {
        self.iter().collect()
    }
}
