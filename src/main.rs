use anyhow::Result;
use depot::config::Config;
use depot::hostdir::HostDir;
use depot::http::middleware::AccessLog;
use depot::http::router::Router;
use depot::http::server::Server;
use depot::routes;
use std::sync::Arc;
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let config = Config::load();
    let store = config
        .directory
        .clone()
        .map(|root| Arc::new(HostDir::new(root)));
    if let Some(store) = &store {
        info!(root = %store.root().display(), "serving host directory");
    }

    let mut router = Router::new();
    router.add_middleware(Box::new(AccessLog));
    routes::register(&mut router, store);

    let server = Server::bind(&config.listen_addr, config.workers, router)?;
    info!("listening on {}", config.listen_addr);
    server.run()
}
