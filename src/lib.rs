// Library for the binary and tests

pub mod config;
pub mod display;
pub mod formatter;
pub mod host;
pub mod models;
pub mod poller;
pub mod version;
pub mod worker;
