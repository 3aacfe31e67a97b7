//! Authentication outcome metrics.
//!
//! Providers report every authentication attempt through an injected
//! [`AuthenticationMetrics`] sink instead of a global registry, which keeps
//! the extraction logic testable and lets hosts route the counts into
//! whatever telemetry pipeline they already run. [`TelemetryMetrics`] is the
//! default sink and emits process-wide counters via the `metrics` facade.

/// Sink for per-attempt authentication outcomes.
///
/// Implementations must be cheap and non-blocking: providers call them
/// synchronously on the session path.
pub trait AuthenticationMetrics: Send + Sync {
    /// Record one successful authentication for `provider` / `method`.
    fn record_success(&self, provider: &str, method: &str);

    /// Record one failed authentication for `provider` / `method`, with a
    /// stable low-cardinality `reason` label.
    fn record_failure(&self, provider: &str, method: &str, reason: &str);
}

/// Default sink: emits counters through the `metrics` facade.
///
/// Counter names:
/// - `peerauth_authn_success_total{provider, method}`
/// - `peerauth_authn_failure_total{provider, method, reason}`
///
/// Without an installed recorder these calls are no-ops, so the sink is
/// safe in tests and in hosts that do not export metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct TelemetryMetrics;

impl AuthenticationMetrics for TelemetryMetrics {
    fn record_success(&self, provider: &str, method: &str) {
        metrics::counter!(
            "peerauth_authn_success_total",
            "provider" => provider.to_owned(),
            "method" => method.to_owned()
        )
        .increment(1);
    }

    fn record_failure(&self, provider: &str, method: &str, reason: &str) {
        metrics::counter!(
            "peerauth_authn_failure_total",
            "provider" => provider.to_owned(),
            "method" => method.to_owned(),
            "reason" => reason.to_owned()
        )
        .increment(1);
    }
}

/// Sink that drops everything, for hosts that track outcomes elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl AuthenticationMetrics for NoopMetrics {
    fn record_success(&self, _provider: &str, _method: &str) {}

    fn record_failure(&self, _provider: &str, _method: &str, _reason: &str) {}
}
