//! Check execution.
//!
//! [`CheckRunner::run`] validates the request and resolves the cluster, then
//! executes every applicable check on a bounded pool of scoped threads.
//!
//! - Structural problems (malformed request, unknown cluster) are returned
//!   as `Err` before any check runs.
//! - Every check runs; a failure never short-circuits its siblings.
//! - A check that returns `Err` or panics is reported as `FAIL` with the
//!   internal error as its reason.
//! - Results come back in registry order, whatever order checks finish in.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use tracing::{debug, info, warn};

use super::cancel::CancelToken;
use super::check::{CheckRequest, UpgradeCheck};
use super::registry::CheckRegistry;
use super::result::{CheckReport, CheckResult, CheckStatus};
use crate::error::{Result, UpgateError};
use crate::store::TopologyProvider;

/// Default number of checks evaluated concurrently.
pub const DEFAULT_MAX_PARALLEL: usize = 4;

/// Runs the checks of a registry against a request.
pub struct CheckRunner {
    topology: Arc<dyn TopologyProvider>,
    max_parallel: usize,
}

impl CheckRunner {
    /// Create a runner that resolves clusters through `topology`.
    pub fn new(topology: Arc<dyn TopologyProvider>) -> Self {
        Self {
            topology,
            max_parallel: DEFAULT_MAX_PARALLEL,
        }
    }

    /// Bound the worker pool. Values below one are treated as one.
    pub fn with_max_parallel(mut self, max_parallel: usize) -> Self {
        self.max_parallel = max_parallel.max(1);
        self
    }

    /// Configured worker bound.
    pub fn max_parallel(&self) -> usize {
        self.max_parallel
    }

    /// Run every check in `registry` against `request`.
    ///
    /// # Errors
    ///
    /// Returns `MalformedRequest` or `ClusterNotFound` without running any
    /// check, and propagates a failing topology lookup for the cluster.
    pub fn run(
        &self,
        registry: &CheckRegistry,
        request: &CheckRequest,
        cancel: &CancelToken,
    ) -> Result<CheckReport> {
        request.validate()?;
        if self.topology.cluster(&request.cluster)?.is_none() {
            return Err(UpgateError::ClusterNotFound {
                cluster: request.cluster.clone(),
            });
        }

        let checks: Vec<&dyn UpgradeCheck> = registry.iter().collect();
        let mut slots: Vec<Option<CheckResult>> = vec![None; checks.len()];
        let mut applicable = Vec::new();
        for (index, check) in checks.iter().enumerate() {
            if check.is_applicable(request) {
                applicable.push(index);
            } else {
                debug!(check = %check.id(), "check not applicable");
                slots[index] = Some(CheckResult::for_check(*check, CheckStatus::NotApplicable));
            }
        }

        for (index, result) in self.execute(&checks, &applicable, request, cancel) {
            slots[index] = Some(result);
        }

        let report = CheckReport::new(request, slots.into_iter().flatten().collect());
        info!(
            cluster = %request.cluster,
            target = %request.target,
            verdict = %report.verdict(),
            "upgrade checks finished"
        );
        Ok(report)
    }

    fn execute(
        &self,
        checks: &[&dyn UpgradeCheck],
        indices: &[usize],
        request: &CheckRequest,
        cancel: &CancelToken,
    ) -> Vec<(usize, CheckResult)> {
        let workers = self.max_parallel.min(indices.len());
        if workers <= 1 {
            return indices
                .iter()
                .map(|&index| (index, run_check(checks[index], request, cancel)))
                .collect();
        }

        let next = AtomicUsize::new(0);
        let (tx, rx) = mpsc::channel();
        thread::scope(|scope| {
            for _ in 0..workers {
                let tx = tx.clone();
                let next = &next;
                scope.spawn(move || loop {
                    let slot = next.fetch_add(1, Ordering::Relaxed);
                    let Some(&index) = indices.get(slot) else {
                        break;
                    };
                    let result = run_check(checks[index], request, cancel);
                    if tx.send((index, result)).is_err() {
                        break;
                    }
                });
            }
        });
        drop(tx);

        rx.into_iter().collect()
    }
}

/// Run one check, converting errors and panics into failures.
fn run_check(check: &dyn UpgradeCheck, request: &CheckRequest, cancel: &CancelToken) -> CheckResult {
    let id = check.id();
    if cancel.is_cancelled() {
        warn!(check = %id, "skipping check, run was cancelled");
        return CheckResult::for_check(check, CheckStatus::Cancelled)
            .with_reason("Run was cancelled before this check started");
    }

    debug!(check = %id, "running check");
    match panic::catch_unwind(AssertUnwindSafe(|| check.perform(request, cancel))) {
        Ok(Ok(result)) => {
            debug!(check = %id, status = %result.status, "check finished");
            result
        }
        Ok(Err(err)) => {
            warn!(check = %id, error = %err, "check could not complete");
            CheckResult::for_check(check, CheckStatus::Fail)
                .with_reason(format!("Internal error while running check: {}", err))
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(check = %id, panic = %message, "check panicked");
            CheckResult::for_check(check, CheckStatus::Fail)
                .with_reason(format!("Internal error while running check: {}", message))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&'static str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
