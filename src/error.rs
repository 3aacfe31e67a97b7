//! Error types for peer authentication

use thiserror::Error;

/// Result type alias for peer authentication
pub type Result<T> = std::result::Result<T, Error>;

/// Peer authentication errors
#[derive(Error, Debug)]
pub enum Error {
    /// The session is TLS but no peer certificate chain was captured
    #[error("Failed to get TLS certificates from client")]
    MissingCertificates,

    /// A chain was presented but no usable identity could be derived from it
    #[error("Client unable to authenticate with TLS certificate")]
    UnauthenticatedPeer,

    /// No provider is registered for the requested authentication method
    #[error("Unsupported authentication method: {0}")]
    UnsupportedAuthMethod(String),

    /// Configuration error
    ///
    /// Covers every operational problem on our side, including file reads
    /// that fail before PEM parsing starts; the offending path is part of
    /// the message.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error means the peer failed to prove an identity,
    /// as opposed to an operational problem on our side.
    ///
    /// Callers that map errors onto a wire protocol should surface every
    /// authentication failure the same way and keep the distinction for
    /// logs and metrics only.
    #[must_use]
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            Self::MissingCertificates | Self::UnauthenticatedPeer | Self::UnsupportedAuthMethod(_)
        )
    }

    /// Stable low-cardinality label for failure metrics
    #[must_use]
    pub fn metric_reason(&self) -> &'static str {
        match self {
            Self::MissingCertificates => "missing_certificates",
            Self::UnauthenticatedPeer => "unauthenticated_peer",
            Self::UnsupportedAuthMethod(_) => "unsupported_auth_method",
            Self::Config(_) => "config",
        }
    }
}
