//! CAD symbol tables

use crate::types::Handle;
use indexmap::IndexMap;

pub mod block_record;
pub mod layer;

pub use block_record::{BlockFlags, BlockRecord};
pub use layer::{Layer, LayerFlags};

/// Base trait for all table entries
pub trait TableEntry {
    /// Get the entry's unique handle
    fn handle(&self) -> Handle;

    /// Get the entry's name
    fn name(&self) -> &str;

    /// Check if this is a standard/default entry
    fn is_standard(&self) -> bool {
        false
    }
}

/// Generic table for storing named entries.
///
/// Entries keep the order in which they were added; that order is the
/// enumeration order every consumer sees.
#[derive(Debug, Clone)]
pub struct Table<T: TableEntry> {
    /// Entries stored by name (case-insensitive)
    entries: IndexMap<String, T>,
}

impl<T: TableEntry> Table<T> {
    /// Create a new empty table
    pub fn new() -> Self {
        Table {
            entries: IndexMap::new(),
        }
    }

    /// Add an entry to the table
    pub fn add(&mut self, entry: T) -> Result<(), String> {
        let name = entry.name().to_uppercase();
        if self.entries.contains_key(&name) {
            return Err(format!("Entry '{}' already exists in table", entry.name()));
        }
        self.entries.insert(name, entry);
        Ok(())
    }

    /// Get an entry by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(&name.to_uppercase())
    }

    /// Get a mutable entry by name (case-insensitive)
    pub fn get_mut(&mut self, name: &str) -> Option<&mut T> {
        self.entries.get_mut(&name.to_uppercase())
    }

    /// Enumeration position of an entry (case-insensitive)
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.get_index_of(&name.to_uppercase())
    }

    /// Check if an entry exists (case-insensitive)
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(&name.to_uppercase())
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    /// Iterate over all entries mutably
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.values_mut()
    }
}

impl<T: TableEntry> Default for Table<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct MockEntry {
        handle: Handle,
        name: String,
    }

    impl TableEntry for MockEntry {
        fn handle(&self) -> Handle {
            self.handle
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    fn entry(handle: u64, name: &str) -> MockEntry {
        MockEntry {
            handle: Handle::new(handle),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_table_add_and_get() {
        let mut table = Table::new();
        assert!(table.add(entry(1, "Test")).is_ok());
        assert!(table.contains("Test"));
        assert!(table.contains("test"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("TEST").map(|e| e.handle()), Some(Handle::new(1)));
    }

    #[test]
    fn test_table_duplicate_entry() {
        let mut table = Table::new();
        assert!(table.add(entry(1, "Test")).is_ok());
        assert!(table.add(entry(2, "test")).is_err());
    }

    #[test]
    fn test_table_keeps_insertion_order() {
        let mut table = Table::new();
        for (i, name) in ["Walls", "0", "Doors"].iter().enumerate() {
            table.add(entry(i as u64 + 1, name)).unwrap();
        }
        let names: Vec<&str> = table.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["Walls", "0", "Doors"]);
        assert_eq!(table.position("doors"), Some(2));
        assert_eq!(table.position("Roof"), None);
    }
}
