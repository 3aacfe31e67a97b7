//! Shared test PKI helpers built with rcgen.

use std::fs;
use std::path::PathBuf;

use rcgen::string::Ia5String;
use rcgen::{
    BasicConstraints, CertificateParams, DistinguishedName, DnType, IsCa, Issuer, KeyPair, SanType,
};
use tempfile::TempDir;

/// A throwaway CA that issues leaf certificates into a temp directory.
pub struct TestPki {
    dir: TempDir,
    ca_cert_pem: String,
    ca_key: KeyPair,
}

impl TestPki {
    /// Self-signed CA written to `ca.crt` in a fresh temp dir.
    pub fn new() -> Self {
        let ca_key = KeyPair::generate().expect("CA key generation failed");
        let mut params = CertificateParams::default();
        let mut dn = DistinguishedName::new();
        dn.push(DnType::CommonName, "peerauth test CA");
        params.distinguished_name = dn;
        params.is_ca = IsCa::Ca(BasicConstraints::Unconstrained);
        let ca_cert_pem = params
            .self_signed(&ca_key)
            .expect("CA cert generation failed")
            .pem();

        let dir = TempDir::new().expect("tempdir creation failed");
        fs::write(dir.path().join("ca.crt"), &ca_cert_pem).expect("CA pem write failed");

        Self {
            dir,
            ca_cert_pem,
            ca_key,
        }
    }

    /// Path of the CA certificate PEM.
    pub fn ca_path(&self) -> PathBuf {
        self.dir.path().join("ca.crt")
    }

    /// Issue a CA-signed leaf with the given subject and DNS SANs, writing
    /// `<stem>.crt` / `<stem>.key`. Returns the (cert, key) paths.
    pub fn issue(&self, stem: &str, dn: DistinguishedName, san_dns: &[&str]) -> (PathBuf, PathBuf) {
        let key = KeyPair::generate().expect("leaf key generation failed");
        let mut params = CertificateParams::default();
        params.distinguished_name = dn;
        params.subject_alt_names = san_dns
            .iter()
            .map(|dns| {
                Ia5String::try_from((*dns).to_string())
                    .map(SanType::DnsName)
                    .expect("invalid DNS SAN")
            })
            .collect();

        let issuer = Issuer::from_ca_cert_pem(&self.ca_cert_pem, &self.ca_key)
            .expect("issuer construction failed");
        let cert = params.signed_by(&key, &issuer).expect("leaf signing failed");

        let cert_path = self.dir.path().join(format!("{stem}.crt"));
        let key_path = self.dir.path().join(format!("{stem}.key"));
        fs::write(&cert_path, cert.pem()).expect("leaf pem write failed");
        fs::write(&key_path, key.serialize_pem()).expect("leaf key write failed");

        (cert_path, key_path)
    }
}

/// Subject with a single CN attribute.
pub fn cn_subject(cn: &str) -> DistinguishedName {
    let mut dn = DistinguishedName::new();
    dn.push(DnType::CommonName, cn);
    dn
}
