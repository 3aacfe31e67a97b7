//! Session-scoped authentication data.
//!
//! An [`AuthenticationData`] source tells a provider what the transport
//! learned about the peer. For TLS transports that is the peer certificate
//! chain captured at handshake time; for everything else there is simply no
//! TLS data to report.

use rustls::ServerConnection;
use rustls::pki_types::CertificateDer;

/// What a transport session can report about its peer.
pub trait AuthenticationData {
    /// Whether this session went through a TLS handshake at all.
    fn has_tls_data(&self) -> bool;

    /// The peer certificate chain, leaf first, as captured at handshake
    /// time. `None` means the handshake completed without the peer
    /// presenting a certificate.
    fn tls_certificates(&self) -> Option<&[CertificateDer<'static>]>;
}

/// A live server-side rustls connection is itself a source of
/// authentication data. Zero-copy: the chain stays inside the connection.
impl AuthenticationData for ServerConnection {
    fn has_tls_data(&self) -> bool {
        true
    }

    fn tls_certificates(&self) -> Option<&[CertificateDer<'static>]> {
        self.peer_certificates()
    }
}

/// Owned snapshot of the TLS-visible peer data for one session.
///
/// Use this when the session must outlive the connection borrow, or to
/// carry the plaintext-transport case through the same provider path.
#[derive(Debug, Clone, Default)]
pub struct TlsSessionData {
    from_tls: bool,
    chain: Option<Vec<CertificateDer<'static>>>,
}

impl TlsSessionData {
    /// Session data for a connection that never did a TLS handshake.
    #[must_use]
    pub fn without_tls() -> Self {
        Self {
            from_tls: false,
            chain: None,
        }
    }

    /// Session data for a TLS handshake that completed without the peer
    /// presenting any certificate.
    #[must_use]
    pub fn without_certificates() -> Self {
        Self {
            from_tls: true,
            chain: None,
        }
    }

    /// Session data for a TLS handshake that captured a peer chain,
    /// leaf first.
    #[must_use]
    pub fn from_chain(chain: Vec<CertificateDer<'static>>) -> Self {
        Self {
            from_tls: true,
            chain: Some(chain),
        }
    }

    /// Snapshot the peer chain of a server-side rustls connection.
    #[must_use]
    pub fn from_server_connection(conn: &ServerConnection) -> Self {
        Self {
            from_tls: true,
            chain: conn.peer_certificates().map(|certs| certs.to_vec()),
        }
    }
}

impl AuthenticationData for TlsSessionData {
    fn has_tls_data(&self) -> bool {
        self.from_tls
    }

    fn tls_certificates(&self) -> Option<&[CertificateDer<'static>]> {
        self.chain.as_deref()
    }
}
