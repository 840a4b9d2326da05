//! Host version evaluation.
//!
//! Classifies every host of a cluster against a target repository version:
//!
//! - hosts in maintenance mode for the cluster are exempt
//! - hosts whose record is `INSTALLED` or `NOT_REQUIRED` are satisfied
//! - hosts with any other state, or no record at all, are unsatisfied
//!
//! The target is first resolved against the [`VersionStore`]; an unknown
//! target can never be satisfied. Host lookups use the stack and version of
//! the *stored* entity. Classification is per host and the cluster outcome
//! is a conjunction, so host iteration order cannot change the result.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use super::cancel::CancelToken;
use super::check::CheckRequest;
use crate::error::{Result, UpgateError};
use crate::model::{HostVersionRecord, HostVersionState, MaintenanceState, RepositoryVersion};
use crate::store::{TopologyProvider, VersionStore};

/// Why a host does not satisfy the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsatisfiedReason {
    /// No record exists for the host and target.
    NoRecord,
    /// A record exists in a state that does not satisfy the target.
    State(HostVersionState),
}

impl fmt::Display for UnsatisfiedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsatisfiedReason::NoRecord => write!(f, "no version record"),
            UnsatisfiedReason::State(state) => write!(f, "{}", state),
        }
    }
}

/// How one host relates to the target version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostClassification {
    /// The host is ready for the target.
    Satisfied,
    /// The host is in maintenance mode and imposes no constraint.
    Exempt,
    /// The host blocks the target.
    Unsatisfied(UnsatisfiedReason),
}

/// Classify a single host from its maintenance state and version record.
pub fn classify_host(
    maintenance: MaintenanceState,
    record: Option<&HostVersionRecord>,
) -> HostClassification {
    if maintenance.is_on() {
        return HostClassification::Exempt;
    }

    match record {
        None => HostClassification::Unsatisfied(UnsatisfiedReason::NoRecord),
        Some(record) if record.state.satisfies_target() => HostClassification::Satisfied,
        Some(record) => HostClassification::Unsatisfied(UnsatisfiedReason::State(record.state)),
    }
}

/// Per-host classification of a cluster against a resolved target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterEvaluation {
    /// The target as stored.
    pub target: RepositoryVersion,
    /// Hosts that are ready.
    pub satisfied: BTreeSet<String>,
    /// Hosts excluded by maintenance mode.
    pub exempt: BTreeSet<String>,
    /// Hosts that block the target, with the reason.
    pub unsatisfied: BTreeMap<String, UnsatisfiedReason>,
}

impl ClusterEvaluation {
    fn new(target: RepositoryVersion) -> Self {
        Self {
            target,
            satisfied: BTreeSet::new(),
            exempt: BTreeSet::new(),
            unsatisfied: BTreeMap::new(),
        }
    }

    /// Whether no host blocks the target. Vacuously true with no hosts.
    pub fn passed(&self) -> bool {
        self.unsatisfied.is_empty()
    }

    /// Unsatisfied hosts whose record is in the given state.
    pub fn hosts_in_state(&self, state: HostVersionState) -> impl Iterator<Item = &str> {
        self.unsatisfied
            .iter()
            .filter(move |(_, reason)| **reason == UnsatisfiedReason::State(state))
            .map(|(host, _)| host.as_str())
    }
}

/// Outcome of evaluating a cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    /// Every host was classified.
    Completed(ClusterEvaluation),
    /// The target version is not registered; lists every host of the cluster.
    UnknownTarget {
        /// All hosts of the cluster.
        hosts: BTreeSet<String>,
    },
    /// Cancellation was observed before all hosts were classified.
    Cancelled,
}

/// Evaluates a cluster's hosts against a target repository version.
pub struct HostVersionEvaluator {
    topology: Arc<dyn TopologyProvider>,
    store: Arc<dyn VersionStore>,
}

impl HostVersionEvaluator {
    /// Create an evaluator over the given collaborators.
    pub fn new(topology: Arc<dyn TopologyProvider>, store: Arc<dyn VersionStore>) -> Self {
        Self { topology, store }
    }

    /// Classify every host of the request's cluster.
    ///
    /// # Errors
    ///
    /// Returns `ClusterNotFound` if the cluster does not exist, and
    /// propagates lookup failures from the collaborators.
    pub fn evaluate(&self, request: &CheckRequest, cancel: &CancelToken) -> Result<Evaluation> {
        let cluster = self
            .topology
            .cluster(&request.cluster)?
            .ok_or_else(|| UpgateError::ClusterNotFound {
                cluster: request.cluster.clone(),
            })?;
        let hosts = self.topology.hosts_for_cluster(&cluster.name)?;

        let target = match self
            .store
            .find_repository_version(&request.target.stack, &request.target.version)?
        {
            Some(target) => target,
            None => {
                warn!(
                    cluster = %cluster.name,
                    target = %request.target,
                    "target repository version is not registered"
                );
                return Ok(Evaluation::UnknownTarget {
                    hosts: hosts.into_keys().collect(),
                });
            }
        };

        let mut evaluation = ClusterEvaluation::new(target);
        for (name, host) in &hosts {
            if cancel.is_cancelled() {
                warn!(cluster = %cluster.name, "host evaluation cancelled");
                return Ok(Evaluation::Cancelled);
            }

            let maintenance = host.maintenance_state(cluster.id);
            let record = if maintenance.is_on() {
                None
            } else {
                self.store.find_host_version(
                    &cluster.name,
                    &evaluation.target.stack,
                    &evaluation.target.version,
                    name,
                )?
            };

            let classification = classify_host(maintenance, record.as_ref());
            debug!(host = %name, ?classification, "classified host");
            match classification {
                HostClassification::Satisfied => {
                    evaluation.satisfied.insert(name.clone());
                }
                HostClassification::Exempt => {
                    evaluation.exempt.insert(name.clone());
                }
                HostClassification::Unsatisfied(reason) => {
                    evaluation.unsatisfied.insert(name.clone(), reason);
                }
            }
        }

        Ok(Evaluation::Completed(evaluation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StackId;
    use crate::store::FleetSnapshot;

    fn record(state: HostVersionState) -> HostVersionRecord {
        HostVersionRecord {
            cluster: "c1".into(),
            host: "h1".into(),
            stack: StackId::new("HDP", "1.0"),
            version: "1.0.0-1234".into(),
            state,
        }
    }

    fn target() -> RepositoryVersion {
        RepositoryVersion::new(StackId::new("HDP", "1.0"), "1.0.0-1234")
    }

    fn evaluator(snapshot: FleetSnapshot) -> HostVersionEvaluator {
        let snapshot = Arc::new(snapshot);
        HostVersionEvaluator::new(snapshot.clone(), snapshot)
    }

    #[test]
    fn maintenance_exempts_regardless_of_record() {
        assert_eq!(
            classify_host(MaintenanceState::On, None),
            HostClassification::Exempt
        );
        assert_eq!(
            classify_host(
                MaintenanceState::On,
                Some(&record(HostVersionState::InstallFailed))
            ),
            HostClassification::Exempt
        );
    }

    #[test]
    fn missing_record_is_unsatisfied() {
        assert_eq!(
            classify_host(MaintenanceState::Off, None),
            HostClassification::Unsatisfied(UnsatisfiedReason::NoRecord)
        );
    }

    #[test]
    fn installed_and_not_required_are_satisfied() {
        for state in [HostVersionState::Installed, HostVersionState::NotRequired] {
            assert_eq!(
                classify_host(MaintenanceState::Off, Some(&record(state))),
                HostClassification::Satisfied
            );
        }
    }

    #[test]
    fn failed_states_are_unsatisfied() {
        for state in [
            HostVersionState::InstallFailed,
            HostVersionState::OutOfSync,
            HostVersionState::Installing,
        ] {
            assert_eq!(
                classify_host(MaintenanceState::Off, Some(&record(state))),
                HostClassification::Unsatisfied(UnsatisfiedReason::State(state))
            );
        }
    }

    #[test]
    fn unknown_cluster_is_an_error() {
        let err = evaluator(FleetSnapshot::new())
            .evaluate(&CheckRequest::new("c1", target()), &CancelToken::new())
            .unwrap_err();
        assert!(matches!(err, UpgateError::ClusterNotFound { .. }));
    }

    #[test]
    fn unknown_target_lists_every_host() {
        let snapshot = FleetSnapshot::new()
            .with_host("c1", "h1", MaintenanceState::Off)
            .with_host("c1", "h2", MaintenanceState::On);
        let evaluation = evaluator(snapshot)
            .evaluate(&CheckRequest::new("c1", target()), &CancelToken::new())
            .unwrap();
        let Evaluation::UnknownTarget { hosts } = evaluation else {
            panic!("expected unknown target, got {evaluation:?}");
        };
        assert_eq!(hosts.into_iter().collect::<Vec<_>>(), vec!["h1", "h2"]);
    }

    #[test]
    fn classifies_mixed_cluster() {
        let repo = target();
        let snapshot = FleetSnapshot::new()
            .with_host("c1", "ok", MaintenanceState::Off)
            .with_host("c1", "skip", MaintenanceState::On)
            .with_host("c1", "broken", MaintenanceState::Off)
            .with_host("c1", "missing", MaintenanceState::Off)
            .with_repository_version(repo.clone())
            .with_host_version("c1", "ok", &repo, HostVersionState::Installed)
            .with_host_version("c1", "broken", &repo, HostVersionState::InstallFailed);

        let evaluation = evaluator(snapshot)
            .evaluate(&CheckRequest::new("c1", repo), &CancelToken::new())
            .unwrap();
        let Evaluation::Completed(evaluation) = evaluation else {
            panic!("expected completed evaluation");
        };

        assert!(!evaluation.passed());
        assert!(evaluation.satisfied.contains("ok"));
        assert!(evaluation.exempt.contains("skip"));
        assert_eq!(
            evaluation.unsatisfied.get("broken"),
            Some(&UnsatisfiedReason::State(HostVersionState::InstallFailed))
        );
        assert_eq!(
            evaluation.unsatisfied.get("missing"),
            Some(&UnsatisfiedReason::NoRecord)
        );
        assert_eq!(
            evaluation
                .hosts_in_state(HostVersionState::InstallFailed)
                .collect::<Vec<_>>(),
            vec!["broken"]
        );
        assert_eq!(evaluation.target.id, Some(1));
    }

    #[test]
    fn cancelled_token_stops_before_classifying() {
        let repo = target();
        let snapshot = FleetSnapshot::new()
            .with_host("c1", "h1", MaintenanceState::Off)
            .with_repository_version(repo.clone());
        let cancel = CancelToken::new();
        cancel.cancel();

        let evaluation = evaluator(snapshot)
            .evaluate(&CheckRequest::new("c1", repo), &cancel)
            .unwrap();
        assert_eq!(evaluation, Evaluation::Cancelled);
    }
}
