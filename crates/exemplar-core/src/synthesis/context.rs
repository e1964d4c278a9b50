//! Traversal context for one synthesis call
//!
//! Copyright (c) 2025 Exemplar Team
//! Licensed under the Apache-2.0 license

/// Models currently being resolved, outermost first.
///
/// A fresh context is created for every top-level generation call. A model
/// name is on the path only while its resolution is active, so the path
/// length never exceeds the depth of the reference chain.
#[derive(Debug, Clone, Default)]
pub struct TraversalContext {
    path: Vec<String>,
}

impl TraversalContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `name` is being resolved by an enclosing call
    pub fn contains(&self, name: &str) -> bool {
        self.path.iter().any(|entry| entry == name)
    }

    /// Push `name` onto the path. Returns `false` without pushing when it is
    /// already there.
    pub fn enter(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.path.push(name.to_string());
        true
    }

    /// Pop `name` if it is the innermost entry
    pub fn leave(&mut self, name: &str) {
        if self.path.last().map(String::as_str) == Some(name) {
            self.path.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }
}
