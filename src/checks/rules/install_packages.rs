//! Package installation must not have failed.

use std::sync::Arc;

use crate::checks::evaluator::{Evaluation, HostVersionEvaluator};
use crate::checks::{
    CancelToken, CheckId, CheckKind, CheckRequest, CheckResult, CheckStatus, UpgradeCheck,
};
use crate::error::Result;
use crate::model::HostVersionState;
use crate::store::{TopologyProvider, VersionStore};

/// Fails when installing the target version failed on any active host.
pub struct InstallPackagesCheck {
    evaluator: HostVersionEvaluator,
}

impl InstallPackagesCheck {
    /// Create the check over the given collaborators.
    pub fn new(topology: Arc<dyn TopologyProvider>, store: Arc<dyn VersionStore>) -> Self {
        Self {
            evaluator: HostVersionEvaluator::new(topology, store),
        }
    }
}

impl UpgradeCheck for InstallPackagesCheck {
    fn id(&self) -> CheckId {
        CheckId::new("install-packages")
    }

    fn description(&self) -> &str {
        "Package installation of the target version must not have failed"
    }

    fn kind(&self) -> CheckKind {
        CheckKind::Host
    }

    fn perform(&self, request: &CheckRequest, cancel: &CancelToken) -> Result<CheckResult> {
        let result = match self.evaluator.evaluate(request, cancel)? {
            Evaluation::Cancelled => CheckResult::for_check(self, CheckStatus::Cancelled)
                .with_reason("Host evaluation was cancelled before all hosts were read"),
            Evaluation::UnknownTarget { .. } => CheckResult::for_check(self, CheckStatus::Fail)
                .with_reason(format!(
                    "Repository version {} is not registered; install it before upgrading",
                    request.target
                ))
                .with_failed_on([request.cluster.clone()]),
            Evaluation::Completed(evaluation) => {
                let failed: Vec<&str> = evaluation
                    .hosts_in_state(HostVersionState::InstallFailed)
                    .collect();
                if failed.is_empty() {
                    CheckResult::for_check(self, CheckStatus::Pass)
                } else {
                    CheckResult::for_check(self, CheckStatus::Fail)
                        .with_reason(format!(
                            "Installation of {} failed on: {}. Re-run package installation on these hosts.",
                            evaluation.target.version,
                            failed.join(", ")
                        ))
                        .with_failed_on(failed)
                }
            }
        };

        Ok(result)
    }
}
