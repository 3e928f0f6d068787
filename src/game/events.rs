//! Ambient world events — currently just the blackout that follows the
//! stone door grinding open.
//!
//! An event ages by one per recognized input tick while the session is in
//! play; wall-clock time never advances it. With threshold `T`, ages
//! `0..T` are a quiet fuse, ages `T..2T` suppress the room view, and the
//! event clears itself on the tick its age reaches `2T` — one
//! threshold-width window of darkness, then gone.

pub const BLACKOUT_THRESHOLD: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AmbientKind {
    Blackout,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AmbientEvent {
    pub kind: AmbientKind,
    pub age: u32,
}

impl AmbientEvent {
    pub fn blackout() -> Self {
        Self {
            kind: AmbientKind::Blackout,
            age: 0,
        }
    }

    /// True while the renderer should black out the room view.
    pub fn suppresses_render(&self) -> bool {
        match self.kind {
            AmbientKind::Blackout => {
                self.age >= BLACKOUT_THRESHOLD && self.age < 2 * BLACKOUT_THRESHOLD
            }
        }
    }
}

/// Age the active event by one input tick, clearing it once its window
/// has fully elapsed.
pub fn advance(slot: &mut Option<AmbientEvent>) {
    if let Some(event) = slot {
        event.age += 1;
        if event.age >= 2 * BLACKOUT_THRESHOLD {
            *slot = None;
        }
    }
}
