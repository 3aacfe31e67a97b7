//! Mutually authenticated TLS plumbing.
//!
//! Builds the rustls configs that put verified peer certificates in front
//! of the [`TlsAuthenticationProvider`](crate::TlsAuthenticationProvider):
//! the server side verifies peers against a configured CA during the
//! handshake, and the captured chain is what the provider later reads the
//! principal from.
//!
//! # Modules
//!
//! - [`config`] — YAML configuration types ([`TlsConfig`])
//! - [`builder`] — rustls config building and PEM loading
//!
//! # Quick start
//!
//! ```yaml
//! tls:
//!   cert:    "/etc/peerauth/tls/service.crt"
//!   key:     "/etc/peerauth/tls/service.key"
//!   ca_cert: "/etc/peerauth/tls/ca.crt"
//!   require_client_cert: true
//! ```

pub mod builder;
pub mod config;

pub use builder::{build_client_config, build_server_config, load_certs, load_private_key};
pub use config::TlsConfig;
