use anyhow::Result;
use netspeed::*;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout carries only readings.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let app_config = config::AppConfig::load()?;
    let host = host::HostInfo::detect();
    tracing::info!(
        version = %version::banner(),
        host = %host.host_name,
        os = %host.os_family,
        os_version = %host.os_version,
        interval_secs = app_config.monitoring.interval_secs,
        "starting"
    );

    let poller = poller::InterfacePoller::with_capacity(
        poller::SysctlTable::new(),
        app_config.monitoring.initial_buffer_bytes,
    );
    let (tx, mut rx) = mpsc::channel(worker::READING_CHANNEL_CAPACITY);
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let worker_handle = worker::spawn(
        worker::WorkerDeps {
            poller,
            tx,
            shutdown_rx,
        },
        worker::WorkerConfig {
            interval_ms: app_config.monitoring.interval_secs.saturating_mul(1000),
            stats_log_interval_secs: app_config.monitoring.stats_log_interval_secs,
        },
    );

    let renderer = display::Renderer::new(app_config.display.clone());
    let render_loop = async {
        while let Some(reading) = rx.recv().await {
            match renderer.render(&reading) {
                Ok(line) => println!("{}", line),
                Err(e) => tracing::warn!(error = %e, operation = "render", "render failed"),
            }
        }
    };

    tokio::select! {
        _ = render_loop => {
            tracing::debug!("Worker stopped");
        }
        _ = shutdown_signal() => {
            tracing::info!("Received shutdown signal");
            let _ = shutdown_tx.send(());
        }
    }
    // Unblock a worker waiting on a full channel.
    drop(rx);
    worker_handle.await?;

    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut sigterm =
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(s) => s,
                Err(_) => {
                    let _ = tokio::signal::ctrl_c().await;
                    return;
                }
            };
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
