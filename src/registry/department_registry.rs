//! Registry of known administrative jurisdiction codes.
//!
//! Intake consults this registry before accepting an application. Codes are
//! normalized (trimmed) on both registration and lookup so a stray space in
//! configuration or input does not split a jurisdiction in two.

use parking_lot::RwLock;
use std::collections::HashSet;

/// Thread-safe set of known department codes.
#[derive(Debug, Default)]
pub struct DepartmentRegistry {
    codes: RwLock<HashSet<String>>,
}

impl DepartmentRegistry {
    /// Create an empty registry; everything is unknown until seeded
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with the given codes
    pub fn with_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let registry = Self::new();
        for code in codes {
            registry.register(code.as_ref());
        }
        registry
    }

    /// Register a jurisdiction code
    pub fn register(&self, code: &str) {
        let normalized = Self::normalize(code);
        if !normalized.is_empty() {
            self.codes.write().insert(normalized);
        }
    }

    /// Check whether a jurisdiction code is known
    pub fn is_known(&self, code: &str) -> bool {
        self.codes.read().contains(&Self::normalize(code))
    }

    /// Number of registered codes
    pub fn len(&self) -> usize {
        self.codes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.read().is_empty()
    }

    fn normalize(code: &str) -> String {
        code.trim().to_string()
    }
}
