use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rcgen::{CertificateParams, DnType, KeyPair};

const VALIDITY_DAYS: i64 = 365;

/// Returns the certificate/key pair the HTTPS server should load, generating
/// a self-signed pair on first run.
///
/// An existing pair is reused as-is, with no expiry or content check; delete
/// the two files to force regeneration. On failure the HTTPS server refuses
/// to start and the caller points the operator at the plain HTTP binary.
pub fn ensure_certificate(cert_path: &Path, key_path: &Path) -> Result<(PathBuf, PathBuf)> {
    if cert_path.exists() && key_path.exists() {
        log::debug!("reusing certificate at {}", cert_path.display());
        return Ok((cert_path.to_path_buf(), key_path.to_path_buf()));
    }

    println!("Creating self-signed certificate...");
    let (cert_pem, key_pem) = self_signed_pem()?;

    fs::write(cert_path, cert_pem)
        .with_context(|| format!("failed to write {}", cert_path.display()))?;
    fs::write(key_path, key_pem)
        .with_context(|| format!("failed to write {}", key_path.display()))?;
    println!("Certificate created successfully!");

    Ok((cert_path.to_path_buf(), key_path.to_path_buf()))
}

/// The abort path for the HTTPS entry point: on provisioning failure prints
/// the operator diagnostic recommending the plain HTTP server and returns
/// `None`, in which case no listener may be bound.
pub fn provision_or_abort(cert_path: &Path, key_path: &Path) -> Option<(PathBuf, PathBuf)> {
    match ensure_certificate(cert_path, key_path) {
        Ok(paths) => Some(paths),
        Err(err) => {
            eprintln!("Cannot start HTTPS server without a certificate: {err:#}");
            eprintln!("Use the plain HTTP server instead: cargo run --bin http-server");
            None
        }
    }
}

/// Self-signed cert for `CN=localhost`, valid for a year. Browsers on the LAN
/// will show a warning the user has to click through once.
fn self_signed_pem() -> Result<(String, String)> {
    let mut params = CertificateParams::new(vec!["localhost".to_string()])
        .context("invalid certificate params")?;
    params.distinguished_name.push(DnType::CommonName, "localhost");
    let now = time::OffsetDateTime::now_utc();
    params.not_before = now;
    params.not_after = now + time::Duration::days(VALIDITY_DAYS);

    let key_pair = KeyPair::generate().context("failed to generate key pair")?;
    let cert = params
        .self_signed(&key_pair)
        .context("failed to self-sign certificate")?;

    Ok((cert.pem(), key_pair.serialize_pem()))
}
