//! Authentication providers.
//!
//! A provider turns session data into a verified [`Principal`] for one
//! authentication method. [`TlsAuthenticationProvider`] implements the
//! `"tls"` method: it takes the peer certificate chain captured at
//! handshake time and derives the principal from the Common Name in the
//! leaf certificate's subject.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};
use x509_parser::certificate::X509Certificate;
use x509_parser::prelude::FromDer;

use crate::metrics::{AuthenticationMetrics, TelemetryMetrics};
use crate::session::AuthenticationData;
use crate::{Error, Result, dn};

/// Method identifier for TLS certificate authentication.
pub const TLS_METHOD_NAME: &str = "tls";

/// Name under which the TLS provider reports metrics.
const PROVIDER_NAME: &str = "TlsAuthenticationProvider";

// ─────────────────────────────────────────────────────────────────────────────
// Principal
// ─────────────────────────────────────────────────────────────────────────────

/// A verified peer identity.
///
/// Always non-empty: construction rejects empty names, and the TLS
/// provider only produces principals from non-empty Common Names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Principal(String);

impl Principal {
    /// Wrap a non-empty name. Returns `None` for the empty string.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        if name.is_empty() { None } else { Some(Self(name)) }
    }

    /// The principal as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the principal and return the owned name.
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Principal {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Provider trait
// ─────────────────────────────────────────────────────────────────────────────

/// One authentication method.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync + 'static` so they can be stored
/// as `Arc<dyn AuthenticationProvider>` and shared across connection
/// handlers. [`authenticate`](Self::authenticate) takes `&self` and must
/// not keep per-session state.
pub trait AuthenticationProvider: Send + Sync + 'static {
    /// Stable identifier of the method this provider implements,
    /// e.g. `"tls"`.
    fn method_name(&self) -> &str;

    /// Authenticate one session.
    ///
    /// # Errors
    ///
    /// Returns an error for which
    /// [`is_authentication_failure`](Error::is_authentication_failure)
    /// holds when the peer could not prove an identity.
    fn authenticate(&self, data: &dyn AuthenticationData) -> Result<Principal>;
}

// ─────────────────────────────────────────────────────────────────────────────
// TLS provider
// ─────────────────────────────────────────────────────────────────────────────

/// Derives the peer principal from the leaf certificate of a mutually
/// authenticated TLS session.
///
/// The leaf's subject DN is rendered per RFC 2253 and scanned for the
/// first non-empty `CN` attribute; that value becomes the principal.
/// The provider is stateless apart from its metrics sink, so one instance
/// serves any number of concurrent sessions.
pub struct TlsAuthenticationProvider {
    metrics: Arc<dyn AuthenticationMetrics>,
}

impl TlsAuthenticationProvider {
    /// Provider with the default telemetry sink.
    #[must_use]
    pub fn new() -> Self {
        Self::with_metrics(Arc::new(TelemetryMetrics))
    }

    /// Provider reporting outcomes to the given sink.
    #[must_use]
    pub fn with_metrics(metrics: Arc<dyn AuthenticationMetrics>) -> Self {
        Self { metrics }
    }

    /// Walk the session data down to a Common Name.
    ///
    /// Sessions without TLS data and sessions whose leaf yields no usable
    /// CN both end in `UnauthenticatedPeer`; only a TLS session with no
    /// captured chain is `MissingCertificates`.
    fn extract_principal(data: &dyn AuthenticationData) -> Result<Principal> {
        let mut principal = None;

        if data.has_tls_data() {
            let chain = data.tls_certificates().ok_or(Error::MissingCertificates)?;
            let leaf = chain.first().ok_or(Error::MissingCertificates)?;
            if let Ok((_, cert)) = X509Certificate::from_der(leaf) {
                let subject = dn::format_rfc2253(cert.subject());
                principal = dn::common_name(&subject).and_then(Principal::new);
            }
        }

        principal.ok_or(Error::UnauthenticatedPeer)
    }
}

impl Default for TlsAuthenticationProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthenticationProvider for TlsAuthenticationProvider {
    fn method_name(&self) -> &str {
        TLS_METHOD_NAME
    }

    fn authenticate(&self, data: &dyn AuthenticationData) -> Result<Principal> {
        match Self::extract_principal(data) {
            Ok(principal) => {
                debug!(principal = %principal, method = TLS_METHOD_NAME, "Peer authenticated");
                self.metrics.record_success(PROVIDER_NAME, TLS_METHOD_NAME);
                Ok(principal)
            }
            Err(e) => {
                warn!(method = TLS_METHOD_NAME, error = %e, "Peer authentication failed");
                self.metrics
                    .record_failure(PROVIDER_NAME, TLS_METHOD_NAME, e.metric_reason());
                Err(e)
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
