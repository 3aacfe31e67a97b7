//! Certificate-based peer authentication.
//!
//! Derives a verified peer identity (a [`Principal`]) from a mutually
//! authenticated TLS session: the peer certificate chain captured at
//! handshake time is parsed, the leaf's subject DN is rendered per
//! RFC 2253, and the first non-empty Common Name becomes the principal.
//!
//! # Features
//!
//! - **`"tls"` method**: [`TlsAuthenticationProvider`] turns session data into principals
//! - **Method routing**: [`AuthenticationRegistry`] dispatches sessions by method name
//! - **rustls plumbing**: [`tls`] builds TLS 1.3 server/client configs with CA-verified peers
//! - **Observability**: tracing events plus success/failure counters through an injected sink
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use peerauth::{AuthenticationRegistry, TlsAuthenticationProvider, TlsSessionData};
//!
//! let registry = AuthenticationRegistry::new();
//! registry.register(Arc::new(TlsAuthenticationProvider::new()));
//!
//! // A session that never did a TLS handshake cannot prove an identity.
//! let err = registry
//!     .authenticate("tls", &TlsSessionData::without_tls())
//!     .unwrap_err();
//! assert!(err.is_authentication_failure());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod dn;
pub mod error;
pub mod metrics;
pub mod provider;
pub mod registry;
pub mod session;
pub mod tls;

pub use error::{Error, Result};
pub use metrics::{AuthenticationMetrics, NoopMetrics, TelemetryMetrics};
pub use provider::{AuthenticationProvider, Principal, TLS_METHOD_NAME, TlsAuthenticationProvider};
pub use registry::AuthenticationRegistry;
pub use session::{AuthenticationData, TlsSessionData};
pub use tls::TlsConfig;
