//! # Mosaic Host
//!
//! Entry point for the host shell: boots the shared providers, mounts the
//! configured remotes through their isolation boundaries, and runs the
//! observation loops until interrupted.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use host_runtime::wiring::wire_diagnostics;
use host_runtime::{telemetry, HostConfig, HostContainer, RemoteRegistry};
use mosaic_boundary::BoundaryView;
use mosaic_loader::StaticModule;
use mosaic_monitor::{PerformanceSampler, ProcessTimingSource};

// The runtime is deliberately single-threaded: concurrency here is
// overlapping in-flight async operations, not parallelism.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    telemetry::init_tracing();
    let boot_timing = Arc::new(ProcessTimingSource::new());

    let config = HostConfig::default();
    config.validate().context("invalid host configuration")?;

    let container = HostContainer::new(config);
    let _diagnostics = wire_diagnostics(&container.bus());

    // Local stand-ins keep every configured remote mountable when its
    // origin is unreachable.
    for name in container.config().remotes.keys() {
        container.local_modules().register(Arc::new(StaticModule::new(
            name.clone(),
            format!("{name} (local stand-in)"),
        )));
    }

    let snapshot = container.session().restore().await;
    info!(
        authenticated = snapshot.is_authenticated,
        "session restored"
    );

    let monitor = container.start_monitor();

    let registry = RemoteRegistry::new(&container);
    let ctx = container.module_context();
    for name in registry.names() {
        let boundary = registry
            .outlet(&name)
            .context("configured remote disappeared from registry")?;
        match boundary.mount(&ctx).await {
            BoundaryView::Ready(view) => {
                info!(module = %view.module, body = %view.body, "remote mounted");
            }
            BoundaryView::Recovery { module, detail } => {
                warn!(module = %module, %detail, "showing recovery affordance");
            }
        }
    }

    // Boot is the host's page load; sample it once.
    let sampler = PerformanceSampler::new(boot_timing, container.bus());
    sampler.sample("host");

    info!("mosaic host running; press ctrl-c to stop");
    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for shutdown signal")?;

    if let Some(handle) = monitor {
        handle.stop();
    }
    info!("mosaic host shut down");
    Ok(())
}
