//! Check registry.
//!
//! The [`CheckRegistry`] holds checks in registration order, which is the
//! order they are reported in. It is built once at startup; there is no
//! discovery or reflection.

use std::sync::Arc;

use super::check::{CheckId, UpgradeCheck};
use super::rules::{HostMaintenanceModeCheck, HostsRepositoryVersionCheck, InstallPackagesCheck};
use crate::store::{TopologyProvider, VersionStore};

/// Ordered collection of upgrade checks.
pub struct CheckRegistry {
    checks: Vec<Box<dyn UpgradeCheck>>,
}

impl CheckRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Create a registry with all built-in checks wired to the given stores.
    pub fn with_builtins(topology: Arc<dyn TopologyProvider>, store: Arc<dyn VersionStore>) -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(HostsRepositoryVersionCheck::new(
            topology.clone(),
            store.clone(),
        )));
        registry.register(Box::new(InstallPackagesCheck::new(topology.clone(), store)));
        registry.register(Box::new(HostMaintenanceModeCheck::new(topology)));
        registry
    }

    /// Register a check at the end of the order.
    ///
    /// A check with the same id replaces the earlier one in place.
    pub fn register(&mut self, check: Box<dyn UpgradeCheck>) {
        let id = check.id();
        match self.checks.iter().position(|c| c.id() == id) {
            Some(index) => self.checks[index] = check,
            None => self.checks.push(check),
        }
    }

    /// Remove the checks with the given ids. Unknown ids are returned.
    pub fn remove_all(&mut self, ids: &[CheckId]) -> Vec<CheckId> {
        let unknown = ids
            .iter()
            .filter(|id| self.get(id).is_none())
            .cloned()
            .collect();
        self.checks.retain(|c| !ids.contains(&c.id()));
        unknown
    }

    /// Get a check by ID.
    pub fn get(&self, id: &CheckId) -> Option<&dyn UpgradeCheck> {
        self.checks
            .iter()
            .find(|c| &c.id() == id)
            .map(|c| c.as_ref())
    }

    /// Iterate over all checks in order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn UpgradeCheck> {
        self.checks.iter().map(|c| c.as_ref())
    }

    /// Get the number of registered checks.
    pub fn len(&self) -> usize {
        self.checks.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty()
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::new()
    }
}
