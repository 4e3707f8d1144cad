use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum_server::tls_rustls::RustlsConfig;
use dotenv::dotenv;
use walkie_server::{
    config::Config,
    routes,
    server::{self, Scheme},
    tls,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::default();

    // No certificate, no listener. Exit status stays 0, matching the
    // original behavior of recommending the HTTP server and returning.
    let Some((cert_path, key_path)) = tls::provision_or_abort(&config.cert_path, &config.key_path)
    else {
        return Ok(());
    };

    let tls_config = RustlsConfig::from_pem_file(&cert_path, &key_path)
        .await
        .with_context(|| format!("failed to load TLS config from {}", cert_path.display()))?;

    let addr: SocketAddr = format!("{}:{}", config.host, config.https_port)
        .parse()
        .context("invalid HTTPS address")?;

    let app = routes::router(&config.doc_root, &config.client_page);
    server::run(Scheme::Https, addr, app, Some(tls_config)).await
}
