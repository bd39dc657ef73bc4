// Static host identity for the startup banner (via sysinfo)

use serde::Serialize;
use sysinfo::System;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostInfo {
    pub os_family: String,
    pub os_version: String,
    pub host_name: String,
}

impl HostInfo {
    pub fn detect() -> Self {
        Self {
            os_family: System::name().unwrap_or_else(|| std::env::consts::OS.into()),
            os_version: System::os_version().unwrap_or_default(),
            host_name: System::host_name().unwrap_or_default(),
        }
    }
}
