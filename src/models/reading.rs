// Rates produced by one poll and the labels handed to the display

use serde::Serialize;

use crate::formatter::{ZERO_RATE, format_rate_f64};

/// Upload/download rates in bytes per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Throughput {
    pub upload_bytes_per_sec: f64,
    pub download_bytes_per_sec: f64,
}

/// What the display surface renders for one poll.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateReading {
    pub upload: String,
    pub download: String,
    pub upload_bytes_per_sec: f64,
    pub download_bytes_per_sec: f64,
}

impl RateReading {
    /// The degraded "0 KB/s" pair.
    pub fn zero() -> Self {
        Self {
            upload: ZERO_RATE.to_string(),
            download: ZERO_RATE.to_string(),
            upload_bytes_per_sec: 0.0,
            download_bytes_per_sec: 0.0,
        }
    }

    pub fn labels(&self) -> (&str, &str) {
        (&self.upload, &self.download)
    }
}

impl From<Throughput> for RateReading {
    fn from(t: Throughput) -> Self {
        Self {
            upload: format_rate_f64(t.upload_bytes_per_sec),
            download: format_rate_f64(t.download_bytes_per_sec),
            upload_bytes_per_sec: t.upload_bytes_per_sec,
            download_bytes_per_sec: t.download_bytes_per_sec,
        }
    }
}
