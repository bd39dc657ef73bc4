// Background poll loop. Owns the poller and calls it once per tick on the
// blocking pool; readings go to the display task over a channel.

use crate::models::RateReading;
use crate::poller::{Clock, InterfacePoller, InterfaceTable};
use tokio::sync::{mpsc, oneshot};
use tokio::time::{Duration, interval};
use tracing::Instrument;

/// Channel capacity between the worker and the display task.
pub const READING_CHANNEL_CAPACITY: usize = 16;

/// Poller, output channel, and shutdown for the worker.
pub struct WorkerDeps<T, C> {
    pub poller: InterfacePoller<T, C>,
    pub tx: mpsc::Sender<RateReading>,
    pub shutdown_rx: oneshot::Receiver<()>,
}

/// Worker timing and logging config.
pub struct WorkerConfig {
    pub interval_ms: u64,
    /// How often to log poller stats (real seconds).
    pub stats_log_interval_secs: u64,
}

/// Spawns the poll loop. It ends on shutdown, when the display side drops its
/// receiver, or if a poll panics.
pub fn spawn<T, C>(deps: WorkerDeps<T, C>, config: WorkerConfig) -> tokio::task::JoinHandle<()>
where
    T: InterfaceTable + Send + 'static,
    C: Clock + Send + 'static,
{
    let WorkerDeps {
        poller,
        tx,
        mut shutdown_rx,
    } = deps;
    let WorkerConfig {
        interval_ms,
        stats_log_interval_secs,
    } = config;

    let worker_span = tracing::span!(tracing::Level::DEBUG, "worker", interval_ms);

    let task = async move {
        let mut tick = interval(Duration::from_millis(interval_ms));
        tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut stats_log_tick = interval(Duration::from_secs(stats_log_interval_secs));
        stats_log_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // First tick completes immediately; skip it so the first stats line is a real interval in.
        stats_log_tick.tick().await;

        let mut poller = Some(poller);
        let mut polls_total: u64 = 0;
        let mut zero_readings_total: u64 = 0;

        loop {
            tokio::select! {
                _ = tick.tick() => {
                    let Some(mut p) = poller.take() else { break };
                    let result = tokio::task::spawn_blocking(move || {
                        let reading = p.reading();
                        (p, reading)
                    })
                    .await;
                    let reading = match result {
                        Ok((p, reading)) => {
                            poller = Some(p);
                            reading
                        }
                        Err(e) => {
                            tracing::warn!(
                                error = %e,
                                operation = "poll",
                                "poll task failed; stopping worker"
                            );
                            break;
                        }
                    };
                    polls_total += 1;
                    if reading.upload_bytes_per_sec == 0.0 && reading.download_bytes_per_sec == 0.0 {
                        zero_readings_total += 1;
                    }
                    if tx.send(reading).await.is_err() {
                        tracing::debug!("Display channel closed");
                        break;
                    }
                }
                _ = &mut shutdown_rx => {
                    tracing::debug!("Worker shutting down");
                    break;
                }
                _ = stats_log_tick.tick() => {
                    tracing::info!(
                        polls_total,
                        zero_readings_total,
                        buffer_bytes = poller.as_ref().map_or(0, |p| p.capacity()),
                        "poller stats"
                    );
                }
            }
        }
    };

    tokio::spawn(task.instrument(worker_span))
}
