/*!
 * Tablegate Gateway - Main Entry Point
 *
 * Wires the in-memory store, admin façade, and authorization engine,
 * applies deployment seed data, and idles until shutdown. The HTTP/admin
 * layer is a separate component that consumes this crate's library API.
 */

use anyhow::Context;
use tracing::{info, warn};

use tablegate::core::limits::HEALTH_LOG_INTERVAL;
use tablegate::{init_tracing, probe, AdminFacade, AuthzEngine, GatewayConfig, StateHandle};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    info!("Tablegate permissions gateway starting...");

    // Deployment configuration: explicit file wins, demo seed as fallback
    let config = match std::env::var("GATEWAY_CONFIG") {
        Ok(path) => GatewayConfig::from_json_file(&path)
            .with_context(|| format!("loading config from {path}"))?,
        Err(_) => {
            let demo = std::env::var("GATEWAY_SEED_DEMO")
                .map(|v| v == "1" || v == "true")
                .unwrap_or(false);
            if demo {
                info!("No GATEWAY_CONFIG set; using built-in demo dataset");
                GatewayConfig::demo()
            } else {
                GatewayConfig::default()
            }
        }
    };

    info!("Initializing state handle...");
    let state = StateHandle::new();

    info!("Initializing admin façade...");
    let admin = AdminFacade::new(state.clone()).with_unique_names(config.require_unique_names);

    info!("Initializing authorization engine...");
    let engine = AuthzEngine::with_policy(state.clone(), config.role_defaults.clone());

    if let Some(seed) = &config.seed {
        if admin.seed(seed)? {
            info!(
                users = seed.users.len(),
                resources = seed.resources.len(),
                grants = seed.grants.len(),
                "Seed data applied"
            );
        }
    }

    let report = probe(&state);
    info!(status = ?report.status, "Gateway initialization complete");
    info!("Press Ctrl+C to exit");

    let health_state = state.clone();
    let health_engine = engine.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(HEALTH_LOG_INTERVAL);
        loop {
            interval.tick().await;
            let report = probe(&health_state);
            let stats = health_engine.audit_stats();
            info!(
                status = ?report.status,
                audited = stats.total_events,
                denials = stats.total_denials,
                "Gateway running"
            );
        }
    });

    tokio::signal::ctrl_c()
        .await
        .context("waiting for shutdown signal")?;

    warn!("Shutdown signal received; closing stores");
    state.close();
    info!("Gateway stopped");
    Ok(())
}
