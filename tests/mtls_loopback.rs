//! Loopback mTLS handshake tests
//!
//! Spins up a real rustls listener on an ephemeral port, connects with
//! tokio-rustls clients, and checks the principal the server derives from
//! the handshake-captured certificate chain.

mod common;

use std::sync::Arc;

use peerauth::tls::{TlsConfig, build_client_config, build_server_config};
use peerauth::{
    AuthenticationProvider, Error, NoopMetrics, Principal, TlsAuthenticationProvider,
    TlsSessionData,
};
use rcgen::{DistinguishedName, DnType};
use rustls::pki_types::ServerName;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio_rustls::{TlsAcceptor, TlsConnector};

use common::{TestPki, cn_subject};

// ─── helpers ─────────────────────────────────────────────────────────────────

fn server_tls_config(pki: &TestPki, require_client_cert: bool) -> TlsConfig {
    let (cert, key) = pki.issue("server", cn_subject("service.test"), &["localhost"]);
    TlsConfig {
        cert: cert.to_str().unwrap().to_string(),
        key: key.to_str().unwrap().to_string(),
        ca_cert: pki.ca_path().to_str().unwrap().to_string(),
        require_client_cert,
    }
}

/// Accept one connection, authenticate the peer off the live connection,
/// write the outcome back, and return it.
async fn serve_one(listener: TcpListener, acceptor: TlsAcceptor) -> peerauth::Result<Principal> {
    let (stream, _) = listener.accept().await.expect("accept failed");
    let mut tls = acceptor.accept(stream).await.expect("handshake failed");

    let provider = TlsAuthenticationProvider::with_metrics(Arc::new(NoopMetrics));

    // Authenticate straight off the connection, then check the owned
    // snapshot agrees with the zero-copy path.
    let (_, conn) = tls.get_ref();
    let outcome = provider.authenticate(conn);
    let snapshot = TlsSessionData::from_server_connection(conn);
    let snapshot_outcome = provider.authenticate(&snapshot);
    assert_eq!(outcome.as_ref().ok(), snapshot_outcome.as_ref().ok());

    let reply = match &outcome {
        Ok(principal) => principal.as_str().to_owned(),
        Err(e) => format!("error: {e}"),
    };
    tls.write_all(reply.as_bytes()).await.expect("write failed");
    tls.shutdown().await.ok();

    outcome
}

async fn connect(
    addr: std::net::SocketAddr,
    ca_path: &str,
    identity: Option<(&str, &str)>,
) -> tokio_rustls::client::TlsStream<TcpStream> {
    let client_config = build_client_config(ca_path, identity).unwrap();
    let connector = TlsConnector::from(Arc::new(client_config));
    let tcp = TcpStream::connect(addr).await.unwrap();
    let server_name = ServerName::try_from("localhost").unwrap();
    connector.connect(server_name, tcp).await.unwrap()
}

// ─── handshake to principal ──────────────────────────────────────────────────

/// A client certificate presented during the handshake comes out the other
/// side as its CN.
#[tokio::test]
async fn handshake_yields_client_principal() {
    let pki = TestPki::new();
    let config = server_tls_config(&pki, true);

    let mut client_dn = DistinguishedName::new();
    client_dn.push(DnType::OrganizationName, "Example Corp");
    client_dn.push(DnType::CommonName, "client-1");
    let (client_cert, client_key) = pki.issue("client", client_dn, &[]);

    let acceptor = TlsAcceptor::from(Arc::new(build_server_config(&config).unwrap()));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(serve_one(listener, acceptor));

    let mut tls = connect(
        addr,
        &config.ca_cert,
        Some((client_cert.to_str().unwrap(), client_key.to_str().unwrap())),
    )
    .await;

    let mut reply = String::new();
    tls.read_to_string(&mut reply).await.unwrap();
    assert_eq!(reply, "client-1");

    let principal = server.await.unwrap().unwrap();
    assert_eq!(principal.as_str(), "client-1");
}

/// With optional client certs, a certificate-less peer completes the
/// handshake but fails certificate authentication afterwards.
#[tokio::test]
async fn optional_mode_without_client_cert_is_missing_certificates() {
    let pki = TestPki::new();
    let config = server_tls_config(&pki, false);

    let acceptor = TlsAcceptor::from(Arc::new(build_server_config(&config).unwrap()));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(serve_one(listener, acceptor));

    let mut tls = connect(addr, &config.ca_cert, None).await;

    let mut reply = String::new();
    tls.read_to_string(&mut reply).await.unwrap();
    assert_eq!(reply, "error: Failed to get TLS certificates from client");

    let outcome = server.await.unwrap();
    assert!(matches!(outcome, Err(Error::MissingCertificates)));
}

/// In strict mode the TLS layer itself rejects certificate-less peers, so
/// no session ever reaches a provider.
#[tokio::test]
async fn strict_mode_rejects_certificateless_peers_in_handshake() {
    let pki = TestPki::new();
    let config = server_tls_config(&pki, true);

    let acceptor = TlsAcceptor::from(Arc::new(build_server_config(&config).unwrap()));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.expect("accept failed");
        acceptor.accept(stream).await
    });

    let client_config = build_client_config(&config.ca_cert, None).unwrap();
    let connector = TlsConnector::from(Arc::new(client_config));
    let tcp = TcpStream::connect(addr).await.unwrap();
    let server_name = ServerName::try_from("localhost").unwrap();

    // The client may notice only when the server's alert arrives
    if let Ok(mut tls) = connector.connect(server_name, tcp).await {
        let mut buf = [0u8; 16];
        let read = tls.read(&mut buf).await;
        assert!(matches!(read, Err(_) | Ok(0)));
    }

    let server_result = server.await.unwrap();
    assert!(server_result.is_err());
}
