//! Per-host version records.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::stack::StackId;

/// A host's relationship to one repository version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HostVersionState {
    /// Bits are installed and ready.
    Installed,
    /// The host runs nothing the version touches.
    NotRequired,
    /// Installation is in progress.
    Installing,
    /// Installation was attempted and failed.
    InstallFailed,
    /// Installed bits no longer match what the host runs.
    OutOfSync,
    /// The version is the one the host is running.
    Current,
}

impl HostVersionState {
    /// Whether a host in this state is ready for the version to roll out.
    pub fn satisfies_target(&self) -> bool {
        matches!(
            self,
            HostVersionState::Installed | HostVersionState::NotRequired
        )
    }
}

impl fmt::Display for HostVersionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HostVersionState::Installed => "INSTALLED",
            HostVersionState::NotRequired => "NOT_REQUIRED",
            HostVersionState::Installing => "INSTALLING",
            HostVersionState::InstallFailed => "INSTALL_FAILED",
            HostVersionState::OutOfSync => "OUT_OF_SYNC",
            HostVersionState::Current => "CURRENT",
        };
        write!(f, "{}", s)
    }
}

/// Recorded state of a host for a stack/version in a cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct HostVersionRecord {
    /// Cluster name.
    pub cluster: String,
    /// Host name.
    pub host: String,
    /// Stack of the version.
    pub stack: StackId,
    /// Version string.
    pub version: String,
    /// Recorded state.
    pub state: HostVersionState,
}

impl HostVersionRecord {
    /// Whether this record is for the given cluster, stack, version and host.
    pub fn matches(&self, cluster: &str, stack: &StackId, version: &str, host: &str) -> bool {
        self.cluster == cluster && &self.stack == stack && self.version == version && self.host == host
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installed_and_not_required_satisfy() {
        assert!(HostVersionState::Installed.satisfies_target());
        assert!(HostVersionState::NotRequired.satisfies_target());
    }

    #[test]
    fn other_states_do_not_satisfy() {
        for state in [
            HostVersionState::Installing,
            HostVersionState::InstallFailed,
            HostVersionState::OutOfSync,
            HostVersionState::Current,
        ] {
            assert!(!state.satisfies_target(), "{state} should not satisfy");
        }
    }

    #[test]
    fn state_serializes_screaming_snake() {
        let json = serde_json::to_string(&HostVersionState::NotRequired).unwrap();
        assert_eq!(json, "\"NOT_REQUIRED\"");
        assert_eq!(HostVersionState::InstallFailed.to_string(), "INSTALL_FAILED");
    }

    #[test]
    fn record_matching_is_exact() {
        let record = HostVersionRecord {
            cluster: "c1".into(),
            host: "h1".into(),
            stack: StackId::new("HDP", "1.0"),
            version: "1.0.0-1234".into(),
            state: HostVersionState::Installed,
        };
        let stack = StackId::new("HDP", "1.0");
        assert!(record.matches("c1", &stack, "1.0.0-1234", "h1"));
        assert!(!record.matches("c1", &stack, "1.0.0-1235", "h1"));
        assert!(!record.matches("c2", &stack, "1.0.0-1234", "h1"));
        assert!(!record.matches("c1", &StackId::new("HDP", "2.0"), "1.0.0-1234", "h1"));
    }
}
