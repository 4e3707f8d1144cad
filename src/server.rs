use std::fmt;
use std::net::SocketAddr;

use anyhow::{bail, Context, Result};
use axum::Router;
use axum_server::{tls_rustls::RustlsConfig, Handle};

use crate::net;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn localhost_url(scheme: Scheme, port: u16) -> String {
    format!("{scheme}://localhost:{port}")
}

/// Runs a server until Ctrl+C. With a TLS config every connection is
/// terminated by rustls before the router sees it; without one the listener
/// serves plain HTTP. A bind failure (port in use, privileged port) is fatal.
pub async fn run(
    scheme: Scheme,
    addr: SocketAddr,
    app: Router,
    tls: Option<RustlsConfig>,
) -> Result<()> {
    let handle = Handle::new();
    tokio::spawn(shutdown_on_interrupt(handle.clone()));

    let server = tokio::spawn({
        let handle = handle.clone();
        async move {
            match tls {
                Some(tls) => {
                    axum_server::bind_rustls(addr, tls)
                        .handle(handle)
                        .serve(app.into_make_service())
                        .await
                }
                None => {
                    axum_server::bind(addr)
                        .handle(handle)
                        .serve(app.into_make_service())
                        .await
                }
            }
        }
    });

    // The listener comes up only once serve() is polled; hold the banner and
    // the browser tab until the bind has actually succeeded. None here means
    // serve() already failed.
    match handle.listening().await {
        Some(bound) => {
            print_banner(scheme, bound.port());
            // No browser available is not an error.
            let _ = open::that(localhost_url(scheme, bound.port()));
        }
        None => {
            server
                .await
                .context("server task failed")?
                .with_context(|| format!("failed to bind {addr}"))?;
            bail!("server exited before binding {addr}");
        }
    }

    server
        .await
        .context("server task failed")?
        .with_context(|| format!("failed to serve on {addr}"))?;

    println!("\nServer stopped");
    Ok(())
}

async fn shutdown_on_interrupt(handle: Handle) {
    if tokio::signal::ctrl_c().await.is_ok() {
        println!("\nShutting down...");
        handle.shutdown();
    }
}

fn print_banner(scheme: Scheme, port: u16) {
    let lan_ip = net::local_ip();
    let rule = "=".repeat(50);
    let title = match scheme {
        Scheme::Http => "Walkie-Talkie Server (HTTP)",
        Scheme::Https => "Secure Walkie-Talkie Server (HTTPS)",
    };

    println!("{rule}");
    println!("{title}");
    println!("{rule}");
    println!("Server running on port {port}");
    println!("Local access:  {}", localhost_url(scheme, port));
    println!("LAN access:    {scheme}://{lan_ip}:{port}");
    println!("{rule}");
    println!("Instructions for team members:");
    println!("  1. Open a browser on your phone or tablet");
    println!("  2. Enter: {scheme}://{lan_ip}:{port}");
    match scheme {
        Scheme::Http => {
            println!("  3. Enter your name and click Connect");
            println!("  4. Grant microphone permissions");
        }
        Scheme::Https => {
            println!("  3. Accept the security warning (self-signed certificate)");
            println!("  4. Enter your name and click Connect");
            println!("  5. Grant microphone permissions");
        }
    }
    println!("{rule}");
    println!("Make sure all devices are on the same WiFi network");
    println!("Press Ctrl+C to stop the server");
    println!("{rule}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scheme_strings_match_urls() {
        assert_eq!(Scheme::Http.as_str(), "http");
        assert_eq!(Scheme::Https.as_str(), "https");
    }

    #[test]
    fn localhost_url_uses_scheme_and_port() {
        assert_eq!(localhost_url(Scheme::Http, 3000), "http://localhost:3000");
        assert_eq!(localhost_url(Scheme::Https, 3443), "https://localhost:3443");
    }

    #[tokio::test]
    async fn occupied_port_fails_before_announcing() {
        // Hold the port so the bind inside run() fails. run() must surface
        // the bind error instead of reaching the banner/browser branch,
        // which is only entered once listening() reports a bound address.
        let occupied = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = occupied.local_addr().unwrap();

        let err = run(Scheme::Http, addr, Router::new(), None)
            .await
            .unwrap_err();
        assert!(err.to_string().contains(&format!("failed to bind {addr}")));
    }
}
