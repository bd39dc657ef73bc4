// Byte-rate labels for the display surface. Binary units (1 KB = 1024 bytes).

const KIB: u64 = 1024;
const MIB: u64 = 1024 * 1024;

/// Label shown for any rate below 1 KB/s, and for every degraded poll.
pub const ZERO_RATE: &str = "0 KB/s";

/// Format a byte rate (bytes/second) as a short label.
///
/// Below 1 KB/s the label is always `"0 KB/s"` so idle links read as zero.
/// Kilobytes are rounded to the nearest whole number, megabytes to one decimal.
pub fn format_rate(bytes_per_sec: u64) -> String {
    if bytes_per_sec < KIB {
        ZERO_RATE.to_string()
    } else if bytes_per_sec < MIB {
        let kb = (bytes_per_sec as f64 / KIB as f64).round() as u64;
        format!("{} KB/s", kb)
    } else {
        let mb = (bytes_per_sec as f64 / MIB as f64 * 10.0).round() / 10.0;
        format!("{:.1} MB/s", mb)
    }
}

/// Format a computed rate. Negative and NaN rates format as zero.
pub fn format_rate_f64(bytes_per_sec: f64) -> String {
    // `as` saturates: NaN and negatives become 0, +inf becomes u64::MAX.
    format_rate(bytes_per_sec as u64)
}
