//! Discrete key-phase state machine.
//!
//! Each key walks `NotHeld → JustHeld → Held → JustReleased → NotHeld`.
//! Edge events park a key in `JustHeld`/`JustReleased`; the per-fixed-step
//! settle pass advances those to `Held`/`NotHeld`. Settling *before* the
//! event pump guarantees every edge is observable for exactly one settle
//! window, no matter how many fixed steps run back to back.

use crate::controllers::interactive::events::Key;
use fnv::FnvHashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    NotHeld,
    JustHeld,
    Held,
    JustReleased,
}

/// Owned by the control loop instance; no process-wide singleton.
#[derive(Debug, Default)]
pub struct InputState {
    phases: FnvHashMap<Key, KeyPhase>,
}

impl InputState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, key: Key) {
        self.phases.insert(key, KeyPhase::JustHeld);
    }

    pub fn key_up(&mut self, key: Key) {
        self.phases.insert(key, KeyPhase::JustReleased);
    }

    /// Advances edge phases to their steady states.
    pub fn settle(&mut self) {
        for phase in self.phases.values_mut() {
            match *phase {
                KeyPhase::JustHeld => *phase = KeyPhase::Held,
                KeyPhase::JustReleased => *phase = KeyPhase::NotHeld,
                KeyPhase::NotHeld | KeyPhase::Held => {}
            }
        }
    }

    #[must_use]
    pub fn phase(&self, key: Key) -> KeyPhase {
        self.phases.get(&key).copied().unwrap_or(KeyPhase::NotHeld)
    }

    /// True while the key is down, edge step included.
    #[must_use]
    pub fn is_held(&self, key: Key) -> bool {
        matches!(self.phase(key), KeyPhase::JustHeld | KeyPhase::Held)
    }

    /// True only on the settle window containing the down edge.
    #[must_use]
    pub fn just_pressed(&self, key: Key) -> bool {
        self.phase(key) == KeyPhase::JustHeld
    }

    /// True only on the settle window containing the up edge.
    #[must_use]
    pub fn just_released(&self, key: Key) -> bool {
        self.phase(key) == KeyPhase::JustReleased
    }
}
