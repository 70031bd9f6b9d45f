//! Gateway entry-point: loads settings, wires the upstream directory client
//! into the GraphQL schema, and serves it over Actix.

mod server;

use std::sync::Arc;

use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use person_gateway::config::GatewaySettings;
use person_gateway::inbound::graphql::{GraphQlState, build_schema};
use person_gateway::inbound::http::health::HealthState;
use person_gateway::outbound::directory::HttpPersonDirectory;
use server::{ServerConfig, create_server, drain_on_shutdown_signal};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = GatewaySettings::load_from_iter(std::env::args_os())
        .map_err(|e| eyre!("failed to load gateway settings: {e}"))?;
    let bind_addr = settings.bind_addr()?;
    let upstream_url = settings.upstream_url()?;
    let upstream_timeout = settings.upstream_timeout()?;

    let directory = HttpPersonDirectory::new(upstream_url.clone(), upstream_timeout)
        .wrap_err("failed to build upstream directory client")?;
    let schema = build_schema(GraphQlState::from_directory(Arc::new(directory)));

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, schema).with_playground(settings.playground);
    let server = create_server(health_state.clone(), config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    actix_web::rt::spawn(drain_on_shutdown_signal(health_state, server.handle()));

    info!(
        %bind_addr,
        upstream = %upstream_url,
        timeout_ms = upstream_timeout.as_millis(),
        playground = settings.playground,
        "person gateway listening"
    );
    server.await.wrap_err("server terminated with an error")
}
