//! Clusters, hosts and maintenance state.

use std::collections::HashMap;
use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::stack::StackId;

/// Whether a host is excluded from lifecycle operations on a cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MaintenanceState {
    /// Host is in maintenance mode and excluded.
    #[serde(alias = "on")]
    On,
    /// Host participates normally.
    #[default]
    #[serde(alias = "off")]
    Off,
}

impl MaintenanceState {
    /// Whether the host is excluded from checks.
    pub fn is_on(&self) -> bool {
        matches!(self, MaintenanceState::On)
    }
}

impl fmt::Display for MaintenanceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaintenanceState::On => write!(f, "ON"),
            MaintenanceState::Off => write!(f, "OFF"),
        }
    }
}

/// A named collection of hosts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    /// Numeric cluster id; maintenance state is keyed by it.
    pub id: u64,
    /// Cluster name.
    pub name: String,
    /// Stack the cluster currently runs, if known.
    pub desired_stack: Option<StackId>,
}

impl Cluster {
    /// Create a cluster.
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            desired_stack: None,
        }
    }
}

/// A cluster member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    /// Host name.
    pub name: String,
    maintenance: HashMap<u64, MaintenanceState>,
}

impl Host {
    /// Create a host with no maintenance entries.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            maintenance: HashMap::new(),
        }
    }

    /// Set the maintenance state for a cluster.
    pub fn with_maintenance(mut self, cluster_id: u64, state: MaintenanceState) -> Self {
        self.maintenance.insert(cluster_id, state);
        self
    }

    /// Maintenance state of this host within the given cluster.
    ///
    /// Hosts without an entry for the cluster are `Off`.
    pub fn maintenance_state(&self, cluster_id: u64) -> MaintenanceState {
        self.maintenance
            .get(&cluster_id)
            .copied()
            .unwrap_or_default()
    }
}
