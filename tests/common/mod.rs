//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use nested_router::config::SiteConfig;
use nested_router::{HttpServer, Shutdown};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// A site running on an ephemeral local port.
#[allow(dead_code)]
pub struct TestSite {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    pub config_tx: mpsc::UnboundedSender<SiteConfig>,
    pub handle: tokio::task::JoinHandle<()>,
}

#[allow(dead_code)]
impl TestSite {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Start the site with `config`, bound to 127.0.0.1:0.
#[allow(dead_code)]
pub async fn start_site(config: SiteConfig) -> TestSite {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let (config_tx, config_rx) = mpsc::unbounded_channel();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();

    let handle = tokio::spawn(async move {
        let _ = server.run(listener, config_rx, server_shutdown).await;
    });

    // The listener is already bound; give the accept loop a moment.
    tokio::time::sleep(Duration::from_millis(50)).await;

    TestSite {
        addr,
        shutdown,
        config_tx,
        handle,
    }
}

#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
