//! Singly-linked list used as a bucket by [`crate::ChainedMap`].
//!
//! Nodes are appended at the tail, so iteration yields entries in the order their keys were
//! first inserted into the bucket. Keys are unique only because the map checks before it
//! appends; the list itself does not enforce it.

/// A node of the list
#[derive(Debug, Clone)]
struct Node<V> {
    /// The key stored in this node
    key: String,
    /// The value associated with the key
    value: V,
    /// The rest of the list
    next: Option<Box<Node<V>>>,
}

/// An owned, singly-linked list of key-value pairs
#[derive(Debug, Clone)]
pub struct Chain<V> {
    /// First node, if any
    head: Option<Box<Node<V>>>,
    /// Number of nodes
    len: usize,
}

impl<V> Default for Chain<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Chain<V> {
    /// Creates an empty list
    #[must_use]
    pub const fn new() -> Self {
        Self { head: None, len: 0 }
    }

    /// Returns the number of nodes
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list has no nodes
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Appends a node at the tail
    pub fn push_back(&mut self, key: String, value: V) {
        let mut cursor = &mut self.head;
        while let Some(node) = cursor {
            cursor = &mut node.next;
        }
        *cursor = Some(Box::new(Node { key, value, next: None }));
        self.len = self.len.saturating_add(1);
    }

    /// Returns the value stored under `key`
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&V> {
        self.iter().find(|(node_key, _)| *node_key == key).map(|(_, value)| value)
    }

    /// Returns a mutable reference to the value stored under `key`
    pub fn find_mut(&mut self, key: &str) -> Option<&mut V> {
        let mut cursor = self.head.as_deref_mut();
        while let Some(node) = cursor {
            if node.key == key {
                return Some(&mut node.value);
            }
            cursor = node.next.as_deref_mut();
        }
        None
    }

    /// Returns true if some node holds `key`
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Unlinks the first node holding `key` and returns its value
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let mut cursor = &mut self.head;
        while cursor.as_ref().is_some_and(|node| node.key != key) {
            cursor = &mut cursor.as_mut()?.next;
        }

        let mut removed = cursor.take()?;
        *cursor = removed.next.take();
        self.len = self.len.saturating_sub(1);
        Some(removed.value)
    }

    /// Returns an iterator over the nodes from head to tail
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { next: self.head.as_deref() }
    }
}

impl<V> Drop for Chain<V> {
    fn drop(&mut self) {
        // Unlink iteratively so a long chain does not recurse once per node
        let mut cursor = self.head.take();
        while let Some(mut node) = cursor {
            cursor = node.next.take();
        }
    }
}

impl<'a, V> IntoIterator for &'a Chain<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V> IntoIterator for Chain<V> {
    type Item = (String, V);
    type IntoIter = IntoIter<V>;

    fn into_iter(mut self) -> Self::IntoIter {
        IntoIter { next: self.head.take() }
    }
}

/// Borrowing iterator over a [`Chain`]
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Node to yield next
    next: Option<&'a Node<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            (node.key.as_str(), &node.value)
        })
    }
}

/// Owning iterator over a [`Chain`]
#[derive(Debug)]
pub struct IntoIter<V> {
    /// Node to yield next
    next: Option<Box<Node<V>>>,
}

impl<V> Drop for IntoIter<V> {
    fn drop(&mut self) {
        while self.next().is_some() {}
    }
}

impl<V> Iterator for IntoIter<V> {
    type Item = (String, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.next.take().map(|mut node| {
            self.next = node.next.take();
            (node.key, node.value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_of(keys: &[&str]) -> Chain<usize> {
        let mut chain = Chain::new();
        for (i, key) in keys.iter().enumerate() {
            chain.push_back((*key).to_string(), i);
        }
        chain
    }

    #[test]
    fn test_push_back_keeps_insertion_order() {
        let chain = chain_of(&["a", "b", "c"]);
        let keys: Vec<&str> = chain.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(chain.len(), 3);
        assert!(!chain.is_empty());
    }

    #[test]
    fn test_find_and_find_mut() {
        let mut chain = chain_of(&["a", "b"]);
        assert_eq!(chain.find("b"), Some(&1));
        assert_eq!(chain.find("z"), None);
        assert!(chain.contains("a"));

        if let Some(value) = chain.find_mut("a") {
            *value = 10;
        }
        assert_eq!(chain.find("a"), Some(&10));
    }

    #[test]
    fn test_remove_head_middle_and_tail() {
        let mut chain = chain_of(&["a", "b", "c", "d"]);
        assert_eq!(chain.remove("b"), Some(1));
        assert_eq!(chain.remove("a"), Some(0));
        assert_eq!(chain.remove("d"), Some(3));
        assert_eq!(chain.remove("d"), None);

        let keys: Vec<&str> = chain.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["c"]);
        assert_eq!(chain.len(), 1);

        assert_eq!(chain.remove("c"), Some(2));
        assert!(chain.is_empty());
        assert_eq!(chain.len(), 0);
    }

    #[test]
    fn test_into_iter_moves_entries() {
        let chain = chain_of(&["x", "y"]);
        let pairs: Vec<(String, usize)> = chain.into_iter().collect();
        assert_eq!(pairs, vec![("x".to_string(), 0), ("y".to_string(), 1)]);
    }

    #[test]
    fn test_long_chain_drops() {
        let mut chain: Chain<usize> = Chain::new();
        for i in 0..100_000 {
            chain.push_front_for_test(i);
        }
        assert_eq!(chain.len(), 100_000);
        drop(chain);
    }

    impl Chain<usize> {
        /// Builds long chains without the quadratic cost of `push_back`
        fn push_front_for_test(&mut self, value: usize) {
            let next = self.head.take();
            self.head = Some(Box::new(Node { key: value.to_string(), value, next }));
            self.len += 1;
        }
    }
}
