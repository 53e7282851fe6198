//! Entity store
//!
//! Canonical in-memory collections of teams, stations, routes and users as
//! last received from the backend. No dedup is enforced on `append`; callers
//! only append records the server just accepted.

use crate::types::{Named, Route, Station, Team, User};

/// Ordered collection of named records
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    items: Vec<T>,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Named> Collection<T> {
    /// Create empty collection
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every record with `items`, keeping their order
    pub fn replace_all(&mut self, items: Vec<T>) {
        self.items = items;
    }

    /// Append a record
    pub fn append(&mut self, item: T) {
        self.items.push(item);
    }

    /// Remove the first record named `name`
    ///
    /// Returns the removed record, or `None` when absent.
    pub fn remove_by_name(&mut self, name: &str) -> Option<T> {
        let idx = self.items.iter().position(|item| item.name() == name)?;
        Some(self.items.remove(idx))
    }

    /// First record named `name`
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&T> {
        self.items.iter().find(|item| item.name() == name)
    }

    /// Mutable access to the first record named `name`
    pub fn find_mut(&mut self, name: &str) -> Option<&mut T> {
        self.items.iter_mut().find(|item| item.name() == name)
    }

    /// Check if a record named `name` exists
    #[inline]
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// All records in order
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Names of all records in order
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.items.iter().map(|item| item.name().to_string()).collect()
    }

    /// Iterate over records
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Number of records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<'a, T> IntoIterator for &'a Collection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// The four entity collections
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntityStore {
    /// Teams
    pub teams: Collection<Team>,
    /// Stations
    pub stations: Collection<Station>,
    /// Routes
    pub routes: Collection<Route>,
    /// Users
    pub users: Collection<User>,
}

impl EntityStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
