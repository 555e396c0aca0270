//! User entity sourced from the upstream API.

use std::collections::HashMap;

/// A user as reported by the upstream API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Flattens an upstream `id -> name` mapping into users ordered by id.
    pub fn from_mapping(mapping: &HashMap<String, String>) -> Vec<Self> {
        let mut users: Vec<Self> = mapping
            .iter()
            .map(|(id, name)| Self::new(id.clone(), name.clone()))
            .collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        users
    }
}
