//! Health reporting for the running service
//!
//! Checks are supplied by the binary (catalog loaded, configuration sane);
//! this module only aggregates them into a serializable report.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

/// Health check status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// All checks passed
    Healthy,
    /// Some optional checks failed
    Degraded,
    /// Required checks failed
    Unhealthy,
}

impl HealthStatus {
    /// Returns true if status is healthy
    #[must_use] pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }

    /// Returns true if status is healthy or degraded (still operational)
    #[must_use] pub fn is_operational(&self) -> bool {
        matches!(self, HealthStatus::Healthy | HealthStatus::Degraded)
    }
}

/// Individual health check result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    /// Name of the check
    pub name: String,
    /// Status of the check
    pub status: HealthStatus,
    /// Optional message with details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Duration of the check in milliseconds
    pub duration_ms: u64,
    /// Additional details as key-value pairs
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, String>,
}

impl CheckResult {
    /// Create a healthy check result
    pub fn healthy(name: impl Into<String>) -> Self {
        Self::with_status(name, HealthStatus::Healthy, None)
    }

    /// Create an unhealthy check result with a message
    pub fn unhealthy(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_status(name, HealthStatus::Unhealthy, Some(message.into()))
    }

    /// Create a degraded check result with a message
    pub fn degraded(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::with_status(name, HealthStatus::Degraded, Some(message.into()))
    }

    fn with_status(name: impl Into<String>, status: HealthStatus, message: Option<String>) -> Self {
        Self {
            name: name.into(),
            status,
            message,
            duration_ms: 0,
            details: BTreeMap::new(),
        }
    }

    /// Add a detail key-value pair
    pub fn with_detail(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.details.insert(key.into(), value.to_string());
        self
    }
}

/// Overall health report containing all check results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthReport {
    /// Overall status based on all checks
    pub status: HealthStatus,
    /// Individual check results
    pub checks: Vec<CheckResult>,
    /// Total duration of all checks in milliseconds
    pub total_duration_ms: u64,
    /// Timestamp when the report was generated
    pub timestamp: String,
    /// Version of the service
    pub version: String,
}

impl HealthReport {
    /// Create a new health report from check results
    #[must_use] pub fn new(checks: Vec<CheckResult>, duration: Duration) -> Self {
        let status = if checks.iter().all(|c| c.status == HealthStatus::Healthy) {
            HealthStatus::Healthy
        } else if checks.iter().any(|c| c.status == HealthStatus::Unhealthy) {
            HealthStatus::Unhealthy
        } else {
            HealthStatus::Degraded
        };

        Self {
            status,
            checks,
            total_duration_ms: duration.as_millis() as u64,
            timestamp: chrono::Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Returns true if overall status is healthy
    #[must_use] pub fn is_healthy(&self) -> bool {
        self.status.is_healthy()
    }

    /// Get all checks that failed (not healthy)
    #[must_use] pub fn failed_checks(&self) -> Vec<&CheckResult> {
        self.checks
            .iter()
            .filter(|c| !c.status.is_healthy())
            .collect()
    }
}

/// Trait for implementing health checks
pub trait HealthCheck: Send + Sync {
    /// Perform the health check and return a result
    fn check(&self) -> CheckResult;
}

/// Health checker with configurable checks
#[derive(Default)]
pub struct HealthChecker {
    checks: Vec<Box<dyn HealthCheck>>,
}

impl HealthChecker {
    /// Create a new health checker with no checks
    #[must_use] pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Add a health check
    #[must_use]
    pub fn add_check(mut self, check: impl HealthCheck + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Run all health checks
    #[must_use] pub fn run(&self) -> HealthReport {
        let start = Instant::now();
        let mut results = Vec::with_capacity(self.checks.len());

        for check in &self.checks {
            let check_start = Instant::now();
            let mut result = check.check();
            result.duration_ms = check_start.elapsed().as_millis() as u64;
            results.push(result);
        }

        HealthReport::new(results, start.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(CheckResult);

    impl HealthCheck for Fixed {
        fn check(&self) -> CheckResult {
            self.0.clone()
        }
    }

    #[test]
    fn test_all_healthy() {
        let report = HealthChecker::new()
            .add_check(Fixed(CheckResult::healthy("catalog").with_detail("records", 42)))
            .run();

        assert!(report.is_healthy());
        assert_eq!(report.checks[0].details["records"], "42");
        assert!(report.failed_checks().is_empty());
    }

    #[test]
    fn test_degraded_when_only_optional_fail() {
        let report = HealthChecker::new()
            .add_check(Fixed(CheckResult::healthy("catalog")))
            .add_check(Fixed(CheckResult::degraded("config", "no config file")))
            .run();

        assert_eq!(report.status, HealthStatus::Degraded);
        assert!(report.status.is_operational());
        assert_eq!(report.failed_checks().len(), 1);
    }

    #[test]
    fn test_unhealthy_wins() {
        let report = HealthChecker::new()
            .add_check(Fixed(CheckResult::degraded("config", "no config file")))
            .add_check(Fixed(CheckResult::unhealthy("catalog", "no records loaded")))
            .run();

        assert_eq!(report.status, HealthStatus::Unhealthy);
        assert!(!report.status.is_operational());
    }

    #[test]
    fn test_report_serialization() {
        let report = HealthChecker::new()
            .add_check(Fixed(CheckResult::healthy("catalog")))
            .run();

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"], "healthy");
        assert_eq!(json["checks"][0]["name"], "catalog");
        assert!(json["checks"][0].get("message").is_none());
    }
}
