//! Hosts in maintenance mode are left out of the upgrade.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::checks::{
    CancelToken, CheckId, CheckKind, CheckRequest, CheckResult, CheckStatus, UpgradeCheck,
    UpgradeType,
};
use crate::error::{Result, UpgateError};
use crate::store::TopologyProvider;

/// Reports hosts that the upgrade will skip because of maintenance mode.
///
/// A warning for rolling and non-rolling upgrades. Host-ordered upgrades
/// walk every host, so there it is a failure.
pub struct HostMaintenanceModeCheck {
    topology: Arc<dyn TopologyProvider>,
}

impl HostMaintenanceModeCheck {
    /// Create the check over the given topology.
    pub fn new(topology: Arc<dyn TopologyProvider>) -> Self {
        Self { topology }
    }
}

impl UpgradeCheck for HostMaintenanceModeCheck {
    fn id(&self) -> CheckId {
        CheckId::new("host-maintenance-mode")
    }

    fn description(&self) -> &str {
        "Hosts in maintenance mode will be excluded from the upgrade"
    }

    fn kind(&self) -> CheckKind {
        CheckKind::Host
    }

    fn perform(&self, request: &CheckRequest, cancel: &CancelToken) -> Result<CheckResult> {
        let cluster = self.topology.cluster(&request.cluster)?.ok_or_else(|| {
            UpgateError::ClusterNotFound {
                cluster: request.cluster.clone(),
            }
        })?;

        let mut in_maintenance = BTreeSet::new();
        for (name, host) in self.topology.hosts_for_cluster(&cluster.name)? {
            if cancel.is_cancelled() {
                return Ok(CheckResult::for_check(self, CheckStatus::Cancelled)
                    .with_reason("Host evaluation was cancelled before all hosts were read"));
            }
            if host.maintenance_state(cluster.id).is_on() {
                in_maintenance.insert(name);
            }
        }

        if in_maintenance.is_empty() {
            return Ok(CheckResult::for_check(self, CheckStatus::Pass));
        }

        let hosts = in_maintenance.iter().cloned().collect::<Vec<_>>().join(", ");
        let result = match request.upgrade_type {
            UpgradeType::HostOrdered => CheckResult::for_check(self, CheckStatus::Fail)
                .with_reason(format!(
                    "Host-ordered upgrades require every host; take these hosts out of maintenance mode: {}",
                    hosts
                )),
            UpgradeType::Rolling | UpgradeType::NonRolling => {
                CheckResult::for_check(self, CheckStatus::Warning).with_reason(format!(
                    "The following hosts are in maintenance mode and will be excluded from the upgrade: {}",
                    hosts
                ))
            }
        };

        Ok(result.with_failed_on(in_maintenance))
    }
}
