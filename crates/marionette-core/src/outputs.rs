//! Output contracts from the core engine.
//!
//! Playback notifications are explicit values collected per advance rather
//! than callbacks: the caller inspects the event list returned from
//! `Engine::advance_time` and reacts synchronously.

use serde::{Deserialize, Serialize};

use crate::clip::Ticks;
use crate::ids::ClipId;

/// Discrete semantic signals emitted while advancing playback.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[non_exhaustive]
pub enum PlaybackEvent {
    /// A looping animation crossed its duration boundary and wrapped.
    Looped { clip: ClipId },
    /// A non-looping animation reached its duration. Fired exactly once per
    /// Play -> Finished transition.
    Ended { clip: ClipId },
    /// A precomputed table was requested with a timestep at or beyond the
    /// clip duration and degraded to a single frame.
    TableQuantized { clip: ClipId, timestep: Ticks },
    /// Catch-all for forward-compatible payloads.
    Custom {
        kind: String,
        data: serde_json::Value,
    },
}

/// Events collected by the engine since the last `advance_time`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub events: Vec<PlaybackEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.events.clear();
    }

    #[inline]
    pub fn push_event(&mut self, event: PlaybackEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
