//! TLS configuration and certificate loading.

use std::io::{self, BufReader};
use std::path::Path;

use axum_server::tls_rustls::RustlsConfig;

/// Load TLS configuration from PEM certificate chain and private key files.
pub async fn load_tls_config(cert_path: &Path, key_path: &Path) -> Result<RustlsConfig, io::Error> {
    let certs = read_cert_chain(cert_path)?;
    let key = read_private_key(key_path)?;

    RustlsConfig::from_der(certs, key).await
}

fn read_cert_chain(path: &Path) -> Result<Vec<Vec<u8>>, io::Error> {
    let file = std::fs::File::open(path).map_err(|e| {
        io::Error::new(e.kind(), format!("certificate file {:?}: {}", path, e))
    })?;
    let mut reader = BufReader::new(file);

    let certs: Vec<Vec<u8>> = rustls_pemfile::certs(&mut reader)
        .map(|cert| cert.map(|der| der.as_ref().to_vec()))
        .collect::<Result<_, _>>()?;

    if certs.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("no certificates found in {:?}", path),
        ));
    }
    Ok(certs)
}

fn read_private_key(path: &Path) -> Result<Vec<u8>, io::Error> {
    let file = std::fs::File::open(path).map_err(|e| {
        io::Error::new(e.kind(), format!("private key file {:?}: {}", path, e))
    })?;
    let mut reader = BufReader::new(file);

    match rustls_pemfile::private_key(&mut reader)? {
        Some(key) => Ok(key.secret_der().to_vec()),
        None => Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("no private key found in {:?}", path),
        )),
    }
}
