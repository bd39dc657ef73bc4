// Build-time identity for the startup banner

/// Package version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name (from Cargo.toml).
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// `"<name> <version>"`.
pub fn banner() -> String {
    format!("{} {}", NAME, VERSION)
}
