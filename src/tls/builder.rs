//! rustls config building and PEM loading.
//!
//! Provides:
//! - [`build_server_config`] — build a `rustls::ServerConfig` from [`TlsConfig`]
//! - [`build_client_config`] — build a `rustls::ClientConfig` for a connecting peer
//! - [`load_certs`] / [`load_private_key`] — PEM file loading
//!
//! # File format
//!
//! All certificate and key files are expected in **PEM format**.  DER is not
//! supported to keep operator tooling simple (openssl, cfssl, cert-manager all
//! default to PEM).
//!
//! Both builders pin the protocol to TLS 1.3; client certificates sent during
//! a 1.3 handshake are encrypted, so peer principals never cross the wire in
//! the clear.

use std::fs;
use std::sync::Arc;

use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls::server::WebPkiClientVerifier;
use rustls::{ClientConfig, RootCertStore, ServerConfig};
use tracing::debug;

use crate::tls::config::TlsConfig;
use crate::{Error, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Public: build TLS configs
// ─────────────────────────────────────────────────────────────────────────────

/// Build a `rustls::ServerConfig` for a peer-authenticating listener.
///
/// When `config.require_client_cert` is `true`, peers without a valid
/// certificate signed by the configured CA are rejected at the TLS
/// handshake.
///
/// When `config.require_client_cert` is `false`, peer certificates are
/// requested but not required; sessions without one surface as a
/// missing-certificates failure at authentication time instead.
///
/// # Errors
///
/// Returns an error if any certificate or key file cannot be read or parsed,
/// or if the rustls config cannot be built (e.g. mismatched cert/key pair).
pub fn build_server_config(config: &TlsConfig) -> Result<ServerConfig> {
    let certs = load_certs(&config.cert)?;
    let key = load_private_key(&config.key)?;
    let roots = load_trust_store(&config.ca_cert)?;

    let verifier = build_client_verifier(config, roots)?;

    let tls_cfg = ServerConfig::builder_with_protocol_versions(&[&rustls::version::TLS13])
        .with_client_cert_verifier(verifier)
        .with_single_cert(certs, key)
        .map_err(|e| Error::Config(format!("TLS config error (cert/key mismatch?): {e}")))?;

    debug!(
        cert = %config.cert,
        ca_cert = %config.ca_cert,
        require_client_cert = config.require_client_cert,
        "TLS server config built"
    );

    Ok(tls_cfg)
}

/// Build a `rustls::ClientConfig` for a peer that connects to such a
/// listener.
///
/// `ca_cert` is the PEM file the client trusts for the server certificate.
/// `identity` is the optional `(cert_path, key_path)` pair the client
/// presents for its own authentication; pass `None` to connect without a
/// certificate.
///
/// # Errors
///
/// Returns an error if any certificate or key file cannot be read or
/// parsed, or if the cert/key pair does not match.
pub fn build_client_config(
    ca_cert: &str,
    identity: Option<(&str, &str)>,
) -> Result<ClientConfig> {
    let roots = load_trust_store(ca_cert)?;

    let builder = ClientConfig::builder_with_protocol_versions(&[&rustls::version::TLS13])
        .with_root_certificates(roots);

    let tls_cfg = match identity {
        Some((cert_path, key_path)) => {
            let certs = load_certs(cert_path)?;
            let key = load_private_key(key_path)?;
            builder
                .with_client_auth_cert(certs, key)
                .map_err(|e| Error::Config(format!("TLS config error (cert/key mismatch?): {e}")))?
        }
        None => builder.with_no_client_auth(),
    };

    Ok(tls_cfg)
}

// ─────────────────────────────────────────────────────────────────────────────
// Public: PEM loading
// ─────────────────────────────────────────────────────────────────────────────

/// Load all certificates from a PEM file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or contains no valid PEM
/// certificate blocks.
pub fn load_certs(path: &str) -> Result<Vec<CertificateDer<'static>>> {
    let pem_data = read_file(path)?;
    let certs: Vec<CertificateDer<'static>> = rustls_pemfile::certs(&mut pem_data.as_slice())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::Config(format!("Failed to parse certs from '{path}': {e}")))?;

    if certs.is_empty() {
        return Err(Error::Config(format!("No certificates found in '{path}'")));
    }

    Ok(certs)
}

/// Load the first private key from a PEM file.
///
/// Supports RSA (`RSA PRIVATE KEY`), PKCS#8 (`PRIVATE KEY`), and EC keys.
///
/// # Errors
///
/// Returns an error if the file cannot be read, contains no private key, or
/// the key format is unsupported.
pub fn load_private_key(path: &str) -> Result<PrivateKeyDer<'static>> {
    let pem_data = read_file(path)?;
    let key = rustls_pemfile::private_key(&mut pem_data.as_slice())
        .map_err(|e| Error::Config(format!("Failed to parse private key from '{path}': {e}")))?
        .ok_or_else(|| Error::Config(format!("No private key found in '{path}'")))?;

    Ok(key)
}

// ─────────────────────────────────────────────────────────────────────────────
// Private helpers
// ─────────────────────────────────────────────────────────────────────────────

fn read_file(path: &str) -> Result<Vec<u8>> {
    fs::read(path).map_err(|e| Error::Config(format!("Cannot read '{path}': {e}")))
}

/// Load the CA PEM into a fresh trust store.
fn load_trust_store(path: &str) -> Result<RootCertStore> {
    let ca_certs = load_certs(path)?;

    let mut roots = RootCertStore::empty();
    for cert in ca_certs {
        roots
            .add(cert)
            .map_err(|e| Error::Config(format!("Failed to add CA cert to trust store: {e}")))?;
    }

    Ok(roots)
}

/// Build a `WebPkiClientVerifier` that requires or merely requests certs.
fn build_client_verifier(
    config: &TlsConfig,
    roots: RootCertStore,
) -> Result<Arc<dyn rustls::server::danger::ClientCertVerifier>> {
    let builder = WebPkiClientVerifier::builder(Arc::new(roots));

    let verifier = if config.require_client_cert {
        builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to build client verifier: {e}")))?
    } else {
        builder
            .allow_unauthenticated()
            .build()
            .map_err(|e| Error::Config(format!("Failed to build client verifier: {e}")))?
    };

    Ok(verifier)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
