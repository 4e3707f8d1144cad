use std::net::SocketAddr;

use anyhow::{Context, Result};
use dotenv::dotenv;
use walkie_server::{
    config::Config,
    routes,
    server::{self, Scheme},
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::default();
    let addr: SocketAddr = format!("{}:{}", config.host, config.http_port)
        .parse()
        .context("invalid HTTP address")?;

    let app = routes::router(&config.doc_root, &config.client_page);
    server::run(Scheme::Http, addr, app, None).await
}
