use anyhow::Context;
use claimlens_core::config::{Config, WarnLevel};
use claimlens_core::{HttpResourceClient, ResourceClient};
use std::sync::Arc;

pub fn run(config: &Config, host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    let mut server = config.server.clone();
    if let Some(host) = host {
        server.host = host;
    }
    if let Some(port) = port {
        server.port = port;
    }

    for w in config.validate() {
        match w.level {
            WarnLevel::Warning => tracing::warn!("{}", w.message),
            WarnLevel::Error => tracing::error!("{}", w.message),
        }
    }
    if config.has_errors() {
        anyhow::bail!("config validation found errors; run `claimlens config check`");
    }

    // The blocking client owns its own runtime; it must be built, and
    // finally dropped, outside the server's.
    let client: Arc<dyn ResourceClient> = Arc::new(
        HttpResourceClient::new(&config.backend.base_url, config.backend.timeout())
            .context("failed to build backend client")?,
    );
    let server_client = Arc::clone(&client);

    tracing::info!(backend = %config.backend.base_url, "starting orchestrator");

    let rt = tokio::runtime::Runtime::new()?;
    let addr = server.addr();

    let result = rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        println!("ClaimLens orchestrator → http://{}", listener.local_addr()?);

        tokio::select! {
            res = claimlens_server::serve_on(listener, server_client) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    });

    drop(rt);
    drop(client);
    result
}
