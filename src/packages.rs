// ABOUTME: Inert package/namespace registry (spec.md §9(c))
//!
//! The original source carries a `struct pack` package identifier on
//! every binding but never consults it when resolving a symbol — `def`
//! and `get` walk the `syms`/`vals` arrays by name alone. This registry
//! reproduces that: it records package ids, but nothing in `eval.rs` or
//! `env.rs` ever reads from it.

use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackageId(u32);

/// Tracks package identifiers by name. Entirely decorative: no builtin
/// or environment lookup consults this registry.
pub struct PackageRegistry {
    packages: HashMap<String, PackageId>,
    next_id: u32,
}

impl PackageRegistry {
    pub fn new() -> Self {
        Self {
            packages: HashMap::new(),
            next_id: 0,
        }
    }

    /// Registers `name`, returning its existing id if already present.
    pub fn register(&mut self, name: &str) -> PackageId {
        if let Some(id) = self.packages.get(name) {
            return *id;
        }
        let id = PackageId(self.next_id);
        self.next_id += 1;
        self.packages.insert(name.to_string(), id);
        id
    }

    pub fn get(&self, name: &str) -> Option<PackageId> {
        self.packages.get(name).copied()
    }
}

impl Default for PackageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registering_the_same_name_twice_returns_the_same_id() {
        let mut reg = PackageRegistry::new();
        let a = reg.register("core");
        let b = reg.register("core");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_names_get_distinct_ids() {
        let mut reg = PackageRegistry::new();
        let a = reg.register("core");
        let b = reg.register("math");
        assert_ne!(a, b);
    }
}
