// Reading rendering and serialization

use netspeed::config::{DisplayConfig, OutputFormat};
use netspeed::display::{Renderer, render_text};
use netspeed::models::{RateReading, Throughput};

fn reading() -> RateReading {
    RateReading::from(Throughput {
        upload_bytes_per_sec: 2048.0,
        download_bytes_per_sec: 1_572_864.0,
    })
}

#[test]
fn test_text_line_uses_prefixes() {
    let line = Renderer::new(DisplayConfig::default())
        .render(&reading())
        .unwrap();
    assert_eq!(line, "↑ 2 KB/s  ↓ 1.5 MB/s");
}

#[test]
fn test_text_line_without_prefixes() {
    assert_eq!(render_text(&reading(), "", ""), "2 KB/s  1.5 MB/s");
}

#[test]
fn test_json_line_is_camel_case() {
    let renderer = Renderer::new(DisplayConfig {
        format: OutputFormat::Json,
        ..DisplayConfig::default()
    });
    let line = renderer.render(&reading()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&line).unwrap();
    assert_eq!(value["upload"], "2 KB/s");
    assert_eq!(value["download"], "1.5 MB/s");
    assert_eq!(value["downloadBytesPerSec"], 1_572_864.0);
    assert!(!line.contains('\n'));
}

#[test]
fn test_zero_reading_labels() {
    let zero = RateReading::zero();
    assert_eq!(zero.labels(), ("0 KB/s", "0 KB/s"));
    assert_eq!(zero.upload_bytes_per_sec, 0.0);
}
