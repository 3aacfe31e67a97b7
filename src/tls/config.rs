//! TLS listener configuration types.
//!
//! Defines the YAML-deserialisable configuration for a mutually
//! authenticated listener: service certificate paths and the CA trust
//! store used to verify peer certificates.
//!
//! # Example YAML
//!
//! ```yaml
//! tls:
//!   cert:    "/etc/peerauth/tls/service.crt"
//!   key:     "/etc/peerauth/tls/service.key"
//!   ca_cert: "/etc/peerauth/tls/ca.crt"
//!   require_client_cert: true
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for a TLS listener that authenticates its peers.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TlsConfig {
    /// Path to the PEM-encoded service certificate file.
    pub cert: String,

    /// Path to the PEM-encoded service private key file.
    pub key: String,

    /// Path to the PEM-encoded CA certificate used to verify peer certs.
    pub ca_cert: String,

    /// When `true` (recommended), peers that do not present a valid
    /// certificate signed by `ca_cert` are rejected at the TLS handshake.
    ///
    /// When `false`, peer certificates are requested but not required.
    /// Peers that skip the certificate still complete the handshake and
    /// then fail certificate authentication with a missing-certificates
    /// error instead of a TLS alert.
    #[serde(default = "default_require_client_cert")]
    pub require_client_cert: bool,
}

// Manual impl so `..TlsConfig::default()` agrees with the serde default:
// strict client-certificate checking unless explicitly disabled.
impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            cert: String::new(),
            key: String::new(),
            ca_cert: String::new(),
            require_client_cert: default_require_client_cert(),
        }
    }
}

fn default_require_client_cert() -> bool {
    true
}
