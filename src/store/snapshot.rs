//! In-memory fleet state.
//!
//! A [`FleetSnapshot`] is a point-in-time copy of everything the checks
//! read: clusters with their hosts, registered repository versions and host
//! version records. It deserializes from YAML:
//!
//! ```yaml
//! clusters:
//!   c1:
//!     id: 1
//!     stack: HDP-2.6
//!     hosts:
//!       h1: {}
//!       h2: { maintenance: ON }
//! repository_versions:
//!   - stack: HDP-2.6
//!     version: 2.6.4.0-91
//!     type: STANDARD
//! host_versions:
//!   - { cluster: c1, host: h1, stack: HDP-2.6, version: 2.6.4.0-91, state: INSTALLED }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{TopologyProvider, VersionStore};
use crate::error::{Result, UpgateError};
use crate::model::{
    Cluster, Host, HostVersionRecord, HostVersionState, MaintenanceState, RepositoryVersion,
    StackId,
};

/// A cluster as described in a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClusterEntry {
    /// Numeric cluster id.
    pub id: u64,
    /// Stack the cluster runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<StackId>,
    /// Member hosts keyed by host name.
    #[serde(default)]
    pub hosts: HashMap<String, HostEntry>,
}

/// A host's membership in one cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HostEntry {
    /// Maintenance state within this cluster.
    #[serde(default)]
    pub maintenance: MaintenanceState,
}

/// Point-in-time fleet state implementing both store traits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct FleetSnapshot {
    /// Clusters keyed by name.
    pub clusters: HashMap<String, ClusterEntry>,
    /// Registered repository versions.
    pub repository_versions: Vec<RepositoryVersion>,
    /// Host version records.
    pub host_versions: Vec<HostVersionRecord>,
}

impl FleetSnapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a snapshot from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns `StateNotFound` if the file doesn't exist.
    /// Returns `StateParseError` if the YAML is invalid.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                UpgateError::StateNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                UpgateError::Io(e)
            }
        })?;

        Self::parse(&content, path)
    }

    /// Parse YAML content into a snapshot.
    ///
    /// Repository versions without an id get one above the highest id in
    /// the list, in list order.
    ///
    /// # Errors
    ///
    /// Returns `StateParseError` if the YAML is invalid or no ids are left
    /// to assign.
    pub fn parse(content: &str, source_path: &Path) -> Result<Self> {
        let mut snapshot: FleetSnapshot =
            serde_yaml::from_str(content).map_err(|e| UpgateError::StateParseError {
                path: source_path.to_path_buf(),
                message: e.to_string(),
            })?;
        snapshot.assign_repository_ids(source_path)?;
        Ok(snapshot)
    }

    fn max_repository_id(&self) -> u64 {
        self.repository_versions
            .iter()
            .filter_map(|r| r.id)
            .max()
            .unwrap_or(0)
    }

    fn assign_repository_ids(&mut self, source_path: &Path) -> Result<()> {
        let mut next = self.max_repository_id();
        for repo in self.repository_versions.iter_mut().filter(|r| r.id.is_none()) {
            next = next
                .checked_add(1)
                .ok_or_else(|| UpgateError::StateParseError {
                    path: source_path.to_path_buf(),
                    message: "repository version ids exhausted".to_string(),
                })?;
            repo.id = Some(next);
        }
        Ok(())
    }

    /// Add a cluster.
    pub fn with_cluster(mut self, name: &str, id: u64) -> Self {
        self.clusters.entry(name.to_string()).or_default().id = id;
        self
    }

    /// Add a host to a cluster, creating the cluster if needed.
    ///
    /// A new cluster gets an id above every existing cluster id.
    pub fn with_host(mut self, cluster: &str, host: &str, maintenance: MaintenanceState) -> Self {
        let next_id = self
            .clusters
            .values()
            .map(|c| c.id)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        self.clusters
            .entry(cluster.to_string())
            .or_insert_with(|| ClusterEntry {
                id: next_id,
                ..Default::default()
            })
            .hosts
            .insert(host.to_string(), HostEntry { maintenance });
        self
    }

    /// Register a repository version.
    ///
    /// A version without an id gets the next free one; it stays unresolved
    /// only when every id is taken.
    pub fn with_repository_version(mut self, repo: RepositoryVersion) -> Self {
        let repo = match (repo.id, self.max_repository_id().checked_add(1)) {
            (None, Some(id)) => repo.with_id(id),
            _ => repo,
        };
        self.repository_versions.push(repo);
        self
    }

    /// Record a host's state for a repository version.
    pub fn with_host_version(
        mut self,
        cluster: &str,
        host: &str,
        repo: &RepositoryVersion,
        state: HostVersionState,
    ) -> Self {
        self.host_versions.push(HostVersionRecord {
            cluster: cluster.to_string(),
            host: host.to_string(),
            stack: repo.stack.clone(),
            version: repo.version.clone(),
            state,
        });
        self
    }
}

impl TopologyProvider for FleetSnapshot {
    fn cluster(&self, name: &str) -> Result<Option<Cluster>> {
        Ok(self.clusters.get(name).map(|entry| Cluster {
            desired_stack: entry.stack.clone(),
            ..Cluster::new(entry.id, name)
        }))
    }

    fn hosts_for_cluster(&self, name: &str) -> Result<HashMap<String, Host>> {
        let Some(entry) = self.clusters.get(name) else {
            return Ok(HashMap::new());
        };
        Ok(entry
            .hosts
            .iter()
            .map(|(host_name, host)| {
                (
                    host_name.clone(),
                    Host::new(host_name.clone()).with_maintenance(entry.id, host.maintenance),
                )
            })
            .collect())
    }
}

impl VersionStore for FleetSnapshot {
    fn find_repository_version(
        &self,
        stack: &StackId,
        version: &str,
    ) -> Result<Option<RepositoryVersion>> {
        Ok(self
            .repository_versions
            .iter()
            .find(|r| &r.stack == stack && r.version == version)
            .cloned())
    }

    fn find_host_version(
        &self,
        cluster: &str,
        stack: &StackId,
        version: &str,
        host: &str,
    ) -> Result<Option<HostVersionRecord>> {
        Ok(self
            .host_versions
            .iter()
            .find(|r| r.matches(cluster, stack, version, host))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RepositoryType;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const FLEET: &str = r#"
clusters:
  c1:
    id: 7
    stack: HDP-2.6
    hosts:
      h1: {}
      h2:
        maintenance: ON
repository_versions:
  - stack: HDP-2.6
    version: 2.6.4.0-91
  - stack: HDP-2.6
    version: 2.6.4.1-3
    type: PATCH
    definition:
      available_services: [HDFS]
host_versions:
  - cluster: c1
    host: h1
    stack: HDP-2.6
    version: 2.6.4.0-91
    state: INSTALLED
"#;

    fn parsed() -> FleetSnapshot {
        FleetSnapshot::parse(FLEET, &PathBuf::from("fleet.yml")).unwrap()
    }

    #[test]
    fn parses_clusters_and_hosts() {
        let snapshot = parsed();
        let cluster = snapshot.cluster("c1").unwrap().unwrap();
        assert_eq!(cluster.id, 7);
        assert_eq!(cluster.desired_stack, Some(StackId::new("HDP", "2.6")));

        let hosts = snapshot.hosts_for_cluster("c1").unwrap();
        assert_eq!(hosts.len(), 2);
        assert!(!hosts["h1"].maintenance_state(7).is_on());
        assert!(hosts["h2"].maintenance_state(7).is_on());
    }

    #[test]
    fn unknown_cluster_is_none() {
        let snapshot = parsed();
        assert!(snapshot.cluster("nope").unwrap().is_none());
        assert!(snapshot.hosts_for_cluster("nope").unwrap().is_empty());
    }

    #[test]
    fn assigns_missing_repository_ids() {
        let snapshot = parsed();
        let ids: Vec<_> = snapshot.repository_versions.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2)]);
    }

    #[test]
    fn assigned_ids_continue_after_explicit_ones() {
        let yaml = r#"
repository_versions:
  - { stack: HDP-2.6, version: "1", id: 40 }
  - { stack: HDP-2.6, version: "2" }
  - { stack: HDP-2.6, version: "3", id: 12 }
  - { stack: HDP-2.6, version: "4" }
"#;
        let snapshot = FleetSnapshot::parse(yaml, Path::new("fleet.yml")).unwrap();
        let ids: Vec<_> = snapshot.repository_versions.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![Some(40), Some(41), Some(12), Some(42)]);
    }

    #[test]
    fn exhausted_repository_ids_are_a_parse_error() {
        let yaml = r#"
repository_versions:
  - { stack: HDP-2.6, version: "1", id: 18446744073709551615 }
  - { stack: HDP-2.6, version: "2" }
"#;
        let err = FleetSnapshot::parse(yaml, Path::new("fleet.yml")).unwrap_err();
        assert!(matches!(err, UpgateError::StateParseError { .. }));
        assert!(err.to_string().contains("repository version ids exhausted"));
    }

    #[test]
    fn highest_possible_id_without_gaps_still_parses() {
        let yaml = r#"
repository_versions:
  - { stack: HDP-2.6, version: "1", id: 18446744073709551615 }
"#;
        let snapshot = FleetSnapshot::parse(yaml, Path::new("fleet.yml")).unwrap();
        assert_eq!(snapshot.repository_versions[0].id, Some(u64::MAX));
    }

    #[test]
    fn builder_assigns_next_repository_id() {
        let stack = StackId::new("HDP", "2.6");
        let snapshot = FleetSnapshot::new()
            .with_repository_version(RepositoryVersion::new(stack.clone(), "1").with_id(5))
            .with_repository_version(RepositoryVersion::new(stack, "2"));
        let ids: Vec<_> = snapshot.repository_versions.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![Some(5), Some(6)]);
    }

    #[test]
    fn finds_repository_version_by_stack_and_version() {
        let snapshot = parsed();
        let stack = StackId::new("HDP", "2.6");
        let repo = snapshot
            .find_repository_version(&stack, "2.6.4.1-3")
            .unwrap()
            .unwrap();
        assert_eq!(repo.repository_type, RepositoryType::Patch);
        assert!(snapshot
            .find_repository_version(&stack, "9.9")
            .unwrap()
            .is_none());
        assert!(snapshot
            .find_repository_version(&StackId::new("HDP", "3.0"), "2.6.4.0-91")
            .unwrap()
            .is_none());
    }

    #[test]
    fn finds_host_version_record() {
        let snapshot = parsed();
        let stack = StackId::new("HDP", "2.6");
        let record = snapshot
            .find_host_version("c1", &stack, "2.6.4.0-91", "h1")
            .unwrap()
            .unwrap();
        assert_eq!(record.state, HostVersionState::Installed);
        assert!(snapshot
            .find_host_version("c1", &stack, "2.6.4.0-91", "h2")
            .unwrap()
            .is_none());
    }

    #[test]
    fn builder_creates_cluster_for_host() {
        let snapshot = FleetSnapshot::new()
            .with_host("c1", "h1", MaintenanceState::Off)
            .with_host("c1", "h2", MaintenanceState::On);
        let hosts = snapshot.hosts_for_cluster("c1").unwrap();
        assert_eq!(hosts.len(), 2);
        let id = snapshot.cluster("c1").unwrap().unwrap().id;
        assert!(hosts["h2"].maintenance_state(id).is_on());
    }

    #[test]
    fn builder_cluster_ids_do_not_collide() {
        let snapshot = FleetSnapshot::new()
            .with_cluster("c1", 2)
            .with_host("c2", "h1", MaintenanceState::Off);
        assert_eq!(snapshot.cluster("c1").unwrap().unwrap().id, 2);
        assert_eq!(snapshot.cluster("c2").unwrap().unwrap().id, 3);
    }

    #[test]
    fn load_reports_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = FleetSnapshot::load(&temp.path().join("fleet.yml")).unwrap_err();
        assert!(matches!(err, UpgateError::StateNotFound { .. }));
    }

    #[test]
    fn load_reports_parse_errors() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("fleet.yml");
        fs::write(&path, "clusters: [not, a, map]").unwrap();
        let err = FleetSnapshot::load(&path).unwrap_err();
        assert!(matches!(err, UpgateError::StateParseError { .. }));
    }

    #[test]
    fn load_reads_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("fleet.yml");
        fs::write(&path, FLEET).unwrap();
        let snapshot = FleetSnapshot::load(&path).unwrap();
        assert_eq!(snapshot.host_versions.len(), 1);
    }
}
