//! Navigation context handed to views: the active route's parameters and
//! the history the user can step back through.

use crate::types::{HeroId, UNKNOWN_HERO_ID};
use parking_lot::Mutex;
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteSnapshot {
    params: HashMap<String, String>,
}

impl RouteSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Matches `path` against a pattern such as `detail/:id`, capturing the
    /// `:name` segments. Returns `None` when the shapes differ.
    pub fn from_path(pattern: &str, path: &str) -> Option<Self> {
        let pattern: Vec<&str> = pattern.trim_matches('/').split('/').collect();
        let path: Vec<&str> = path.trim_matches('/').split('/').collect();
        if pattern.len() != path.len() {
            return None;
        }

        let mut snapshot = Self::new();
        for (expected, actual) in pattern.iter().zip(&path) {
            match expected.strip_prefix(':') {
                Some(name) => {
                    snapshot.params.insert(name.to_string(), actual.to_string());
                }
                None if expected == actual => {}
                None => return None,
            }
        }
        Some(snapshot)
    }

    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Parses a base-10 id parameter. Missing or non-numeric values yield
    /// [`UNKNOWN_HERO_ID`].
    pub fn id_param(&self, name: &str) -> HeroId {
        self.param(name)
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(UNKNOWN_HERO_ID)
    }
}

/// Host navigation the views can ask to step back.
pub trait Location: Send + Sync {
    /// Returns to the previous view. What happens with no previous view is
    /// up to the host.
    fn back(&self);
}

/// A stack of visited paths.
#[derive(Debug, Default)]
pub struct History {
    stack: Mutex<Vec<String>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, path: impl Into<String>) {
        self.stack.lock().push(path.into());
    }

    pub fn current(&self) -> Option<String> {
        self.stack.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.stack.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.lock().is_empty()
    }
}

impl Location for History {
    /// Pops the current path; the first entry is never popped.
    fn back(&self) {
        let mut stack = self.stack.lock();
        if stack.len() > 1 {
            stack.pop();
        } else {
            tracing::debug!("no previous view to go back to");
        }
    }
}
