// Walk the NET_RT_IFLIST2 reply: a run of variable-length routing messages.
//
// Every message starts with `{ msglen: u16, version: u8, type: u8 }`. Extended
// interface messages (RTM_IFINFO2) carry an `if_msghdr2` whose `if_data64`
// holds 64-bit byte counters. Fields are read in native byte order.

use crate::models::{AggregateCounters, InterfaceRecord};

/// Routing message type for `if_msghdr2`.
pub const RTM_IFINFO2: u8 = 0x12;
pub const IFF_UP: i32 = 0x1;
pub const IFF_LOOPBACK: i32 = 0x8;

/// `ifm_msglen` + `ifm_version` + `ifm_type`.
pub const HEADER_LEN: usize = 4;

const FLAGS_OFFSET: usize = 8;
const INDEX_OFFSET: usize = 12;
// if_msghdr2 puts if_data64 at 32; ifi_ibytes/ifi_obytes sit 64/72 bytes into it.
const IBYTES_OFFSET: usize = 96;
const OBYTES_OFFSET: usize = 104;

/// Shortest RTM_IFINFO2 message that still holds both byte counters.
pub const MIN_IFINFO2_LEN: usize = OBYTES_OFFSET + 8;

/// Iterator over the extended interface entries in a raw table.
///
/// Stops at the end of the data, at a zero-length message, or at a message
/// whose declared length runs past the data. Those last two leave
/// [`truncated`](Self::truncated) set.
pub struct InterfaceRecords<'a> {
    data: &'a [u8],
    offset: usize,
    truncated: bool,
}

impl<'a> InterfaceRecords<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            offset: 0,
            truncated: false,
        }
    }

    /// True once the walk stopped early on a malformed message.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    fn stop(&mut self) -> Option<InterfaceRecord> {
        self.truncated = true;
        self.offset = self.data.len();
        None
    }
}

impl Iterator for InterfaceRecords<'_> {
    type Item = InterfaceRecord;

    fn next(&mut self) -> Option<InterfaceRecord> {
        let data = self.data;
        loop {
            let rest = data.get(self.offset..)?;
            if rest.is_empty() {
                return None;
            }
            if rest.len() < HEADER_LEN {
                return self.stop();
            }
            let msg_len = read_u16(rest, 0)? as usize;
            if msg_len == 0 || msg_len < HEADER_LEN || msg_len > rest.len() {
                return self.stop();
            }
            let msg = &rest[..msg_len];
            self.offset += msg_len;

            if msg[3] != RTM_IFINFO2 {
                continue;
            }
            if msg_len < MIN_IFINFO2_LEN {
                return self.stop();
            }
            return Some(InterfaceRecord {
                index: read_u16(msg, INDEX_OFFSET)?,
                flags: read_i32(msg, FLAGS_OFFSET)?,
                received_bytes: read_u64(msg, IBYTES_OFFSET)?,
                sent_bytes: read_u64(msg, OBYTES_OFFSET)?,
            });
        }
    }
}

/// Up and not loopback.
pub fn is_counted(record: &InterfaceRecord) -> bool {
    record.flags & IFF_UP != 0 && record.flags & IFF_LOOPBACK == 0
}

/// Totals over the counted interfaces in `data`, plus how many were counted.
pub fn aggregate(data: &[u8]) -> (AggregateCounters, usize) {
    let mut totals = AggregateCounters::default();
    let mut counted = 0;
    let mut records = InterfaceRecords::new(data);
    for record in records.by_ref().filter(is_counted) {
        totals.add(&record);
        counted += 1;
    }
    if records.truncated() {
        tracing::debug!(
            operation = "walk_interface_table",
            counted,
            "interface table ended on a malformed record; using partial totals"
        );
    }
    (totals, counted)
}

fn read_u16(buf: &[u8], at: usize) -> Option<u16> {
    let bytes = buf.get(at..at + 2)?;
    Some(u16::from_ne_bytes(bytes.try_into().ok()?))
}

fn read_i32(buf: &[u8], at: usize) -> Option<i32> {
    let bytes = buf.get(at..at + 4)?;
    Some(i32::from_ne_bytes(bytes.try_into().ok()?))
}

fn read_u64(buf: &[u8], at: usize) -> Option<u64> {
    let bytes = buf.get(at..at + 8)?;
    Some(u64::from_ne_bytes(bytes.try_into().ok()?))
}
