// Domain models

mod interface;
mod reading;

pub use interface::{AggregateCounters, InterfaceRecord};
pub use reading::{RateReading, Throughput};
