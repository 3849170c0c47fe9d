use crate::conf::RuntimeConfig;
use crate::server::gateway::StaticGateway;
use crate::server::state::{RuntimeState, build_runtime_state};
use anyhow::{Context, Result};
use pingora::prelude::*;
use pingora::server::Server;
use pingora::server::configuration::ServerConf;
use std::sync::Arc;

/// Builds the runtime state and blocks serving requests.
pub fn run(config: RuntimeConfig) -> Result<()> {
    let state = Arc::new(build_runtime_state(&config));
    let server = build_pingora_server(&config, state)?;

    tracing::info!(listen = %config.server.listen, "gzserve listening");

    server.run_forever();
}

/// A bootstrapped pingora server with the static gateway bound to the configured address.
///
/// Nothing is served until the caller runs it.
pub fn build_pingora_server(config: &RuntimeConfig, state: Arc<RuntimeState>) -> Result<Server> {
    let mut server = match config.server.threads {
        Some(threads) => {
            let mut conf =
                ServerConf::new().context("pingora rejected its default server configuration")?;
            conf.threads = threads;
            tracing::debug!(threads, "using configured worker thread count");
            Server::new_with_opt_and_conf(None, conf)
        }
        None => Server::new(None)?,
    };
    server.bootstrap();

    let mut gateway = http_proxy_service(&server.configuration, StaticGateway::new(state));
    gateway.add_tcp(&config.server.listen);
    server.add_service(gateway);

    Ok(server)
}
