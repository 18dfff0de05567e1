//! Storage
//!
//! Ordered, append-only collection of shared entities.
//!
//! A `Storage` only holds handles: the same entity may sit in several
//! storages at once (a batch result and the community cache, for example),
//! and pushing into one never implies membership in another.
//!
//! # Example
//!
//! ```rust,ignore
//! use amino_client::domain::Member;
//! use amino_client::infrastructure::cache::Storage;
//!
//! let mut members = Storage::new();
//! let index = members.push(Member::new("U1").into_shared());
//! assert_eq!(members[index].read().id, "U1");
//! assert!(members.find("U1").is_some());
//! ```

use std::ops::Index;

use crate::domain::entities::{share, Identified, Shared};

/// Insertion-ordered sequence of shared entities.
///
/// Each handle is stored next to the id it had when pushed. Lookups compare
/// those ids and never lock an entity, so a caller may hold a `write()`
/// guard on one stored entity while searching for another.
#[derive(Debug)]
pub struct Storage<T> {
    items: Vec<Shared<T>>,
    keys: Vec<String>,
}

impl<T> Storage<T> {
    /// Creates an empty storage.
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            keys: Vec::new(),
        }
    }

    /// Returns the handle at `index`.
    pub fn get(&self, index: usize) -> Option<&Shared<T>> {
        self.items.get(index)
    }

    /// Iterates over handles in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Shared<T>> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Finds the first entity with the given id (linear scan, exact match).
    pub fn find(&self, id: &str) -> Option<Shared<T>> {
        self.position(id).map(|index| self.items[index].clone())
    }

    /// Index of the first entity with the given id.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.keys.iter().position(|key| key == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Ids of all held entities, in order.
    pub fn ids(&self) -> Vec<String> {
        self.keys.clone()
    }
}

impl<T: Identified> Storage<T> {
    /// Appends a handle and returns its index.
    ///
    /// The entity is read once to record its id.
    pub fn push(&mut self, item: Shared<T>) -> usize {
        let key = item.read().entity_id().to_string();
        self.keys.push(key);
        self.items.push(item);
        self.items.len() - 1
    }
}

impl<T> Default for Storage<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Clones the handles, not the entities.
impl<T> Clone for Storage<T> {
    fn clone(&self) -> Self {
        Self {
            items: self.items.clone(),
            keys: self.keys.clone(),
        }
    }
}

impl<T> Index<usize> for Storage<T> {
    type Output = Shared<T>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<'a, T> IntoIterator for &'a Storage<T> {
    type Item = &'a Shared<T>;
    type IntoIter = std::slice::Iter<'a, Shared<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Identified> FromIterator<T> for Storage<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut storage = Self::new();
        for item in iter {
            storage.push(share(item));
        }
        storage
    }
}
