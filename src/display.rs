// Render readings for stdout.

use crate::config::{DisplayConfig, OutputFormat};
use crate::models::RateReading;

/// Turns readings into output lines per the display config.
#[derive(Debug, Clone)]
pub struct Renderer {
    config: DisplayConfig,
}

impl Renderer {
    pub fn new(config: DisplayConfig) -> Self {
        Self { config }
    }

    /// One line, without the trailing newline.
    pub fn render(&self, reading: &RateReading) -> anyhow::Result<String> {
        match self.config.format {
            OutputFormat::Text => Ok(render_text(
                reading,
                &self.config.upload_prefix,
                &self.config.download_prefix,
            )),
            OutputFormat::Json => Ok(serde_json::to_string(reading)?),
        }
    }
}

/// `"<up> <upload>  <down> <download>"`; an empty prefix drops its space.
pub fn render_text(reading: &RateReading, upload_prefix: &str, download_prefix: &str) -> String {
    format!(
        "{}  {}",
        labelled(upload_prefix, &reading.upload),
        labelled(download_prefix, &reading.download)
    )
}

fn labelled(prefix: &str, label: &str) -> String {
    if prefix.is_empty() {
        label.to_string()
    } else {
        format!("{} {}", prefix, label)
    }
}
