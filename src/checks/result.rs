//! Check results and the aggregated report.
//!
//! Each check produces one immutable [`CheckResult`]. The runner collects
//! them into a [`CheckReport`], whose [`Verdict`] is a pure reduction over
//! the result statuses.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::check::{CheckId, CheckKind, CheckRequest, UpgradeCheck, UpgradeType};

/// Outcome of a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckStatus {
    /// The precondition holds.
    Pass,
    /// The precondition holds but something deserves operator attention.
    Warning,
    /// The precondition does not hold; the upgrade is blocked.
    Fail,
    /// The check does not apply to this request and was not executed.
    NotApplicable,
    /// Evaluation stopped before a verdict was reached.
    Cancelled,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CheckStatus::Pass => "PASS",
            CheckStatus::Warning => "WARNING",
            CheckStatus::Fail => "FAIL",
            CheckStatus::NotApplicable => "NOT_APPLICABLE",
            CheckStatus::Cancelled => "CANCELLED",
        };
        write!(f, "{}", s)
    }
}

/// Structured outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// Check that produced this result.
    pub check_id: CheckId,
    /// What `failed_on` names.
    pub kind: CheckKind,
    /// What the check verifies.
    pub description: String,
    /// Outcome.
    pub status: CheckStatus,
    /// Human-readable explanation for anything but a pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    /// Entities that caused a failure or warning, sorted.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub failed_on: BTreeSet<String>,
}

impl CheckResult {
    /// Create a result with no reason and nothing failed.
    pub fn new(
        check_id: CheckId,
        kind: CheckKind,
        description: impl Into<String>,
        status: CheckStatus,
    ) -> Self {
        Self {
            check_id,
            kind,
            description: description.into(),
            status,
            reason: None,
            failed_on: BTreeSet::new(),
        }
    }

    /// Create a result carrying a check's identity.
    pub fn for_check(check: &dyn UpgradeCheck, status: CheckStatus) -> Self {
        Self::new(check.id(), check.kind(), check.description(), status)
    }

    /// Add a reason.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Add entities to `failed_on`.
    pub fn with_failed_on<I, S>(mut self, entities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.failed_on.extend(entities.into_iter().map(Into::into));
        self
    }

    /// Whether this result blocks the upgrade.
    pub fn is_blocking(&self, strict: bool) -> bool {
        match self.status {
            CheckStatus::Fail | CheckStatus::Cancelled => true,
            CheckStatus::Warning => strict,
            CheckStatus::Pass | CheckStatus::NotApplicable => false,
        }
    }
}

/// Overall readiness of a cluster for the requested upgrade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// Every applicable check passed.
    Pass,
    /// No failures, at least one warning.
    Warning,
    /// At least one check failed.
    Fail,
    /// At least one check was cancelled; no verdict on partial data.
    Cancelled,
}

impl Verdict {
    /// Reduce result statuses to a verdict.
    pub fn from_results(results: &[CheckResult]) -> Self {
        let has = |status: CheckStatus| results.iter().any(|r| r.status == status);

        if has(CheckStatus::Cancelled) {
            Verdict::Cancelled
        } else if has(CheckStatus::Fail) {
            Verdict::Fail
        } else if has(CheckStatus::Warning) {
            Verdict::Warning
        } else {
            Verdict::Pass
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "PASS"),
            Verdict::Warning => write!(f, "WARNING"),
            Verdict::Fail => write!(f, "FAIL"),
            Verdict::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Counts of results by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    /// Every result in the report.
    pub total: usize,
    /// Results with status `PASS`.
    pub passed: usize,
    /// Results with status `WARNING`.
    pub warnings: usize,
    /// Results with status `FAIL`.
    pub failed: usize,
    /// Checks that did not apply and were not executed.
    pub not_applicable: usize,
    /// Checks stopped before reaching a verdict.
    pub cancelled: usize,
}

/// Every check's result for one request, in registry order.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    /// Cluster the checks ran against.
    pub cluster: String,
    /// Target version, as `STACK VERSION`.
    pub target: String,
    /// Requested upgrade type.
    pub upgrade_type: UpgradeType,
    /// When the run finished.
    pub generated_at: DateTime<Utc>,
    /// One result per registered check.
    pub results: Vec<CheckResult>,
}

impl CheckReport {
    /// Build a report for a request.
    pub fn new(request: &CheckRequest, results: Vec<CheckResult>) -> Self {
        Self {
            cluster: request.cluster.clone(),
            target: request.target.to_string(),
            upgrade_type: request.upgrade_type,
            generated_at: Utc::now(),
            results,
        }
    }

    /// Overall verdict.
    pub fn verdict(&self) -> Verdict {
        Verdict::from_results(&self.results)
    }

    /// Whether the upgrade must not start.
    pub fn blocks_upgrade(&self, strict: bool) -> bool {
        self.results.iter().any(|r| r.is_blocking(strict))
    }

    /// Look up a result by check id.
    pub fn result(&self, id: &str) -> Option<&CheckResult> {
        self.results.iter().find(|r| r.check_id.as_str() == id)
    }

    /// Results with the given status.
    pub fn with_status(&self, status: CheckStatus) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(move |r| r.status == status)
    }

    /// Counts by status.
    pub fn summary(&self) -> ReportSummary {
        let count = |status| self.with_status(status).count();
        ReportSummary {
            total: self.results.len(),
            passed: count(CheckStatus::Pass),
            warnings: count(CheckStatus::Warning),
            failed: count(CheckStatus::Fail),
            not_applicable: count(CheckStatus::NotApplicable),
            cancelled: count(CheckStatus::Cancelled),
        }
    }
}
