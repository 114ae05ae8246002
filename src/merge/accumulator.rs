//! Insertion-ordered per-user merge state.

use std::collections::HashMap;

/// Output column name -> value for one user.
pub type UserRow = HashMap<String, String>;

/// Merged values keyed by username.
///
/// Usernames keep the order in which they were first inserted, across all
/// sources and the patch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accumulator {
    order: Vec<String>,
    rows: HashMap<String, UserRow>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, username: &str) -> bool {
        self.rows.contains_key(username)
    }

    /// Row for `username`, created empty at the end of the order if new.
    pub fn entry(&mut self, username: &str) -> &mut UserRow {
        if !self.rows.contains_key(username) {
            self.order.push(username.to_string());
        }
        self.rows.entry(username.to_string()).or_default()
    }

    /// Set one cell, returning the value it replaced.
    pub fn set(&mut self, username: &str, column: &str, value: impl Into<String>) -> Option<String> {
        self.entry(username).insert(column.to_string(), value.into())
    }

    pub fn get(&self, username: &str, column: &str) -> Option<&str> {
        self.rows.get(username)?.get(column).map(String::as_str)
    }

    /// Usernames in first-insertion order.
    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// `(username, row)` pairs in first-insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &UserRow)> {
        self.usernames().filter_map(|name| self.rows.get(name).map(|row| (name, row)))
    }
}
