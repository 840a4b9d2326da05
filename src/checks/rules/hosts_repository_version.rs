//! Target version must be ready on every host.
//!
//! Every host not in maintenance mode must have a record for the target
//! version in `INSTALLED` or `NOT_REQUIRED` state.

use std::sync::Arc;

use crate::checks::evaluator::{Evaluation, HostVersionEvaluator};
use crate::checks::{
    CancelToken, CheckId, CheckKind, CheckRequest, CheckResult, CheckStatus, UpgradeCheck,
};
use crate::error::Result;
use crate::store::{TopologyProvider, VersionStore};

/// Verifies the target version is installed (or not required) on all hosts.
pub struct HostsRepositoryVersionCheck {
    evaluator: HostVersionEvaluator,
}

impl HostsRepositoryVersionCheck {
    /// Create the check over the given collaborators.
    pub fn new(topology: Arc<dyn TopologyProvider>, store: Arc<dyn VersionStore>) -> Self {
        Self {
            evaluator: HostVersionEvaluator::new(topology, store),
        }
    }
}

impl UpgradeCheck for HostsRepositoryVersionCheck {
    fn id(&self) -> CheckId {
        CheckId::new("hosts-repository-version")
    }

    fn description(&self) -> &str {
        "All hosts should have the target version installed"
    }

    fn kind(&self) -> CheckKind {
        CheckKind::Host
    }

    /// Standard versions always apply. Partial versions apply only when their
    /// version definition names services to upgrade.
    fn is_applicable(&self, request: &CheckRequest) -> bool {
        !request.target.repository_type.is_partial()
            || request.target.available_services().next().is_some()
    }

    fn perform(&self, request: &CheckRequest, cancel: &CancelToken) -> Result<CheckResult> {
        let result = match self.evaluator.evaluate(request, cancel)? {
            Evaluation::Cancelled => CheckResult::for_check(self, CheckStatus::Cancelled)
                .with_reason("Host evaluation was cancelled before all hosts were read"),
            Evaluation::UnknownTarget { hosts } => {
                CheckResult::for_check(self, CheckStatus::Fail)
                    .with_reason(format!(
                        "Repository version {} is not registered",
                        request.target
                    ))
                    .with_failed_on(hosts)
            }
            Evaluation::Completed(evaluation) if evaluation.passed() => {
                CheckResult::for_check(self, CheckStatus::Pass)
            }
            Evaluation::Completed(evaluation) => {
                let hosts: Vec<&str> = evaluation.unsatisfied.keys().map(String::as_str).collect();
                CheckResult::for_check(self, CheckStatus::Fail)
                    .with_reason(format!(
                        "The following hosts must have version {} installed: {}",
                        evaluation.target.version,
                        hosts.join(", ")
                    ))
                    .with_failed_on(hosts)
            }
        };

        Ok(result)
    }
}
