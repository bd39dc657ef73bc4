// Interface statistics poller: fetch the kernel interface table, total the
// counted interfaces, and turn the change since the last poll into rates.

pub mod records;
mod table;

pub use table::{FetchError, InterfaceTable, SysctlTable};

use std::time::{Duration, Instant};
use thiserror::Error;

use crate::models::{AggregateCounters, RateReading, Throughput};

/// Samples closer together than this produce no rate and leave state untouched.
pub const MIN_SAMPLE_INTERVAL: Duration = Duration::from_millis(100);

/// Starting size of the raw table buffer.
pub const DEFAULT_BUFFER_BYTES: usize = 2048;

/// Monotonic time source, swappable so elapsed time can be driven in tests.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Debug, Error)]
pub enum PollError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

#[derive(Debug, Clone, Copy)]
enum PollState {
    Uninitialized,
    Primed {
        totals: AggregateCounters,
        at: Instant,
    },
}

/// Polls the interface table and reports aggregate upload/download rates.
///
/// Not synchronized: calls are expected to come from one context at a time.
/// The raw buffer only ever grows; it doubles whenever the kernel reports
/// that the table does not fit.
pub struct InterfacePoller<T, C = MonotonicClock> {
    table: T,
    clock: C,
    buf: Vec<u8>,
    state: PollState,
    failing: bool,
}

impl<T: InterfaceTable> InterfacePoller<T> {
    pub fn new(table: T) -> Self {
        Self::with_clock(table, MonotonicClock, DEFAULT_BUFFER_BYTES)
    }

    pub fn with_capacity(table: T, initial_buffer_bytes: usize) -> Self {
        Self::with_clock(table, MonotonicClock, initial_buffer_bytes)
    }
}

impl<T: InterfaceTable, C: Clock> InterfacePoller<T, C> {
    pub fn with_clock(table: T, clock: C, initial_buffer_bytes: usize) -> Self {
        Self {
            table,
            clock,
            buf: vec![0; initial_buffer_bytes.max(1)],
            state: PollState::Uninitialized,
            failing: false,
        }
    }

    /// Current raw buffer size in bytes.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn is_primed(&self) -> bool {
        matches!(self.state, PollState::Primed { .. })
    }

    /// Totals stored by the last poll that updated state.
    pub fn last_totals(&self) -> Option<AggregateCounters> {
        match self.state {
            PollState::Primed { totals, .. } => Some(totals),
            PollState::Uninitialized => None,
        }
    }

    /// Time of the last poll that updated state.
    pub fn last_sample_at(&self) -> Option<Instant> {
        match self.state {
            PollState::Primed { at, .. } => Some(at),
            PollState::Uninitialized => None,
        }
    }

    /// Returns `(upload, download)` labels. Every failure reads as `"0 KB/s"`.
    pub fn poll(&mut self) -> (String, String) {
        let reading = self.reading();
        (reading.upload, reading.download)
    }

    /// Like [`poll`](Self::poll) but keeps the raw rates next to the labels.
    pub fn reading(&mut self) -> RateReading {
        match self.sample() {
            Ok(rates) => {
                if self.failing {
                    tracing::info!(operation = "poll", "interface table readable again");
                    self.failing = false;
                }
                rates.map(RateReading::from).unwrap_or_else(RateReading::zero)
            }
            Err(e) => {
                if self.failing {
                    tracing::debug!(error = %e, operation = "poll", "interface poll failed");
                } else {
                    tracing::warn!(error = %e, operation = "poll", "interface poll failed");
                    self.failing = true;
                }
                RateReading::zero()
            }
        }
    }

    /// One poll cycle.
    ///
    /// `Ok(None)` on the priming poll and when the previous sample is no more
    /// than [`MIN_SAMPLE_INTERVAL`] old; in the latter case state is left as is.
    /// On `Err` state is untouched.
    pub fn sample(&mut self) -> Result<Option<Throughput>, PollError> {
        let len = self.fetch_table()?;
        let (current, counted) = records::aggregate(&self.buf[..len]);
        let now = self.clock.now();

        let (previous, at) = match self.state {
            PollState::Uninitialized => {
                tracing::debug!(operation = "sample", counted, "priming interface totals");
                self.state = PollState::Primed {
                    totals: current,
                    at: now,
                };
                return Ok(None);
            }
            PollState::Primed { totals, at } => (totals, at),
        };

        let elapsed = now.saturating_duration_since(at);
        if elapsed <= MIN_SAMPLE_INTERVAL {
            return Ok(None);
        }

        let delta = current.delta_since(&previous);
        let secs = elapsed.as_secs_f64();
        self.state = PollState::Primed {
            totals: current,
            at: now,
        };
        tracing::trace!(
            operation = "sample",
            counted,
            received_delta = delta.total_received_bytes,
            sent_delta = delta.total_sent_bytes,
            elapsed_ms = elapsed.as_millis() as u64,
            "interface rates computed"
        );
        Ok(Some(Throughput {
            upload_bytes_per_sec: delta.total_sent_bytes as f64 / secs,
            download_bytes_per_sec: delta.total_received_bytes as f64 / secs,
        }))
    }

    /// Fill the buffer, doubling it until the table fits. Returns the reply length.
    fn fetch_table(&mut self) -> Result<usize, FetchError> {
        loop {
            match self.table.fetch(&mut self.buf) {
                Ok(len) => return Ok(len.min(self.buf.len())),
                Err(FetchError::BufferTooSmall { .. }) => {
                    let capacity = self.buf.len();
                    let grown = capacity
                        .checked_mul(2)
                        .ok_or(FetchError::BufferOverflow { capacity })?;
                    tracing::debug!(
                        operation = "fetch_table",
                        old_capacity = capacity,
                        new_capacity = grown,
                        "growing interface table buffer"
                    );
                    self.buf = vec![0; grown];
                }
                Err(e) => return Err(e),
            }
        }
    }
}
