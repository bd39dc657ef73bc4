// Shared test helpers: raw table builders, a scripted interface table, a manual clock

#![allow(dead_code)]

use netspeed::poller::records::{IFF_LOOPBACK, IFF_UP, RTM_IFINFO2};
use netspeed::poller::{Clock, FetchError, InterfaceTable};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

pub const IFINFO2_LEN: usize = 160;
pub const UP: i32 = IFF_UP;
pub const UP_LOOPBACK: i32 = IFF_UP | IFF_LOOPBACK;
pub const DOWN: i32 = 0;

/// One `if_msghdr2` message with the given counters.
pub fn ifinfo2(index: u16, flags: i32, rx: u64, tx: u64) -> Vec<u8> {
    let mut msg = vec![0u8; IFINFO2_LEN];
    msg[0..2].copy_from_slice(&(IFINFO2_LEN as u16).to_ne_bytes());
    msg[2] = 5;
    msg[3] = RTM_IFINFO2;
    msg[8..12].copy_from_slice(&flags.to_ne_bytes());
    msg[12..14].copy_from_slice(&index.to_ne_bytes());
    msg[96..104].copy_from_slice(&rx.to_ne_bytes());
    msg[104..112].copy_from_slice(&tx.to_ne_bytes());
    msg
}

#[derive(Debug, Clone, Copy)]
pub struct FakeInterface {
    pub index: u16,
    pub flags: i32,
    pub rx: u64,
    pub tx: u64,
}

#[derive(Debug, Default)]
struct FakeState {
    interfaces: Vec<FakeInterface>,
    trailing: Vec<u8>,
    fail_remaining: usize,
    capacities_seen: Vec<usize>,
}

/// Interface table backed by in-memory counters. Replies `BufferTooSmall`
/// whenever the encoded table does not fit, like the kernel does.
#[derive(Clone, Default)]
pub struct FakeTable {
    state: Arc<Mutex<FakeState>>,
}

impl FakeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, index: u16, flags: i32, rx: u64, tx: u64) {
        let mut state = self.state.lock().unwrap();
        match state.interfaces.iter_mut().find(|i| i.index == index) {
            Some(iface) => {
                iface.flags = flags;
                iface.rx = rx;
                iface.tx = tx;
            }
            None => state.interfaces.push(FakeInterface {
                index,
                flags,
                rx,
                tx,
            }),
        }
    }

    /// Bytes appended after the interface messages.
    pub fn set_trailing(&self, bytes: Vec<u8>) {
        self.state.lock().unwrap().trailing = bytes;
    }

    /// Make the next `n` fetches fail with an OS error.
    pub fn fail_next(&self, n: usize) {
        self.state.lock().unwrap().fail_remaining = n;
    }

    /// Buffer sizes passed to every fetch so far.
    pub fn capacities_seen(&self) -> Vec<usize> {
        self.state.lock().unwrap().capacities_seen.clone()
    }

    fn encode(state: &FakeState) -> Vec<u8> {
        let mut out = Vec::new();
        for i in &state.interfaces {
            out.extend(ifinfo2(i.index, i.flags, i.rx, i.tx));
        }
        out.extend(&state.trailing);
        out
    }
}

impl InterfaceTable for FakeTable {
    fn fetch(&mut self, buf: &mut [u8]) -> Result<usize, FetchError> {
        let mut state = self.state.lock().unwrap();
        state.capacities_seen.push(buf.len());
        if state.fail_remaining > 0 {
            state.fail_remaining -= 1;
            return Err(FetchError::Os(std::io::Error::other("sysctl: EIO")));
        }
        let data = Self::encode(&state);
        if data.len() > buf.len() {
            return Err(FetchError::BufferTooSmall {
                capacity: buf.len(),
            });
        }
        buf[..data.len()].copy_from_slice(&data);
        Ok(data.len())
    }
}

/// Clock that only moves when told to.
#[derive(Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap()
    }
}
