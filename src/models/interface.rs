// Interface table entries and system-wide byte totals

use serde::Serialize;

/// One extended interface entry from the routing table. Lives for a single poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceRecord {
    pub index: u16,
    pub flags: i32,
    pub received_bytes: u64,
    pub sent_bytes: u64,
}

/// Sum of byte counters over the interfaces that pass the up/non-loopback filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateCounters {
    pub total_received_bytes: u64,
    pub total_sent_bytes: u64,
}

impl AggregateCounters {
    /// Add one interface's counters. Saturates instead of wrapping.
    pub fn add(&mut self, record: &InterfaceRecord) {
        self.total_received_bytes = self
            .total_received_bytes
            .saturating_add(record.received_bytes);
        self.total_sent_bytes = self.total_sent_bytes.saturating_add(record.sent_bytes);
    }

    /// Per-direction growth since `previous`, clamped at zero when a counter went backwards.
    pub fn delta_since(&self, previous: &AggregateCounters) -> AggregateCounters {
        AggregateCounters {
            total_received_bytes: self
                .total_received_bytes
                .saturating_sub(previous.total_received_bytes),
            total_sent_bytes: self.total_sent_bytes.saturating_sub(previous.total_sent_bytes),
        }
    }
}
