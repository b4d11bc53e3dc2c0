//! Per-user generation gate.
//!
//! Two rules guard the Idle -> Generating -> Idle cycle: overlapping
//! requests from the same user are rejected while one is in flight, and
//! permitted invocations are separated by a minimum interval.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Minimum spacing between permitted generations.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_secs(2);

/// Entries idle longer than this are dropped on cleanup.
const STALE_THRESHOLD: Duration = Duration::from_secs(300);

/// Why a generation request was not admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    /// A generation is already in flight for this user.
    Busy,
    /// The minimum interval since the last permitted request has not
    /// elapsed yet.
    Throttled,
}

#[derive(Debug)]
struct UserGateState {
    in_flight: bool,
    last_permitted: Instant,
}

/// Tracks in-flight and last-permitted state per user.
#[derive(Debug)]
pub struct GenerationGate {
    min_interval: Duration,
    states: Mutex<HashMap<usize, UserGateState>>,
}

impl GenerationGate {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            states: Mutex::new(HashMap::new()),
        }
    }

    /// Try to admit a generation for `user_id`.
    ///
    /// On success the returned permit marks the user as generating until
    /// it is dropped.
    pub fn begin(&self, user_id: usize) -> Result<GatePermit<'_>, GateRejection> {
        let mut states = self.states.lock().unwrap();
        let now = Instant::now();

        if let Some(state) = states.get(&user_id) {
            if state.in_flight {
                return Err(GateRejection::Busy);
            }
            if now.duration_since(state.last_permitted) < self.min_interval {
                return Err(GateRejection::Throttled);
            }
        }

        states.insert(
            user_id,
            UserGateState {
                in_flight: true,
                last_permitted: now,
            },
        );
        Ok(GatePermit {
            gate: self,
            user_id,
        })
    }

    fn finish(&self, user_id: usize) {
        let mut states = self.states.lock().unwrap();
        if let Some(state) = states.get_mut(&user_id) {
            state.in_flight = false;
        }
    }

    /// Drop entries for users idle past the stale threshold.
    pub fn cleanup_stale_entries(&self) {
        let mut states = self.states.lock().unwrap();
        states.retain(|_, state| {
            state.in_flight || state.last_permitted.elapsed() < STALE_THRESHOLD
        });
    }
}

impl Default for GenerationGate {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}

/// Marks one user's generation as in flight; releases on drop.
#[derive(Debug)]
pub struct GatePermit<'a> {
    gate: &'a GenerationGate,
    user_id: usize,
}

impl Drop for GatePermit<'_> {
    fn drop(&mut self) {
        self.gate.finish(self.user_id);
    }
}
