//! Playback state: per-clip running animation and the optional blend
//! relationship layered on top of it.

use serde::{Deserialize, Serialize};

use crate::clip::Ticks;
use crate::ids::ClipId;
use crate::outputs::{Outputs, PlaybackEvent};
use crate::sampling::TrackCursor;

/// Playback state machine: Play -> Playing; a non-looping animation that
/// reaches its duration transitions to Finished; `stop` parks it at Stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Finished,
}

/// Stateful cursor over one playing clip: elapsed time, loop flag, speed
/// factor, and the per-track bracket cursors.
#[derive(Debug)]
pub struct RunningAnimation {
    pub clip: ClipId,
    pub elapsed: Ticks,
    pub looping: bool,
    pub speed: f32,
    pub state: PlaybackState,
    pub(crate) cursors: Vec<TrackCursor>,
}

impl RunningAnimation {
    /// `Play(clip)`: elapsed = 0, state = Playing.
    pub fn new(clip: ClipId, track_count: usize) -> Self {
        Self {
            clip,
            elapsed: 0,
            looping: true,
            speed: 1.0,
            state: PlaybackState::Playing,
            cursors: vec![TrackCursor::default(); track_count],
        }
    }

    /// Advance elapsed time by `delta * speed` against the owning clip's
    /// `duration`, applying loop wrap or end clamp and emitting events.
    ///
    /// Looping: elapsed wraps modulo duration (negative results wrap forward),
    /// raising one `Looped` per boundary crossed, so a delta spanning several
    /// full loops still reports every wrap. Non-looping: elapsed clamps to
    /// duration, transitions to Finished, and `Ended` fires exactly once per
    /// Play -> Finished transition.
    pub fn advance(&mut self, delta: Ticks, duration: Ticks, outputs: &mut Outputs) {
        if self.state != PlaybackState::Playing {
            return;
        }
        let scaled = (delta as f64 * self.speed as f64).round() as Ticks;
        let raw = self.elapsed + scaled;

        if self.looping {
            if duration <= 0 {
                self.elapsed = 0;
                return;
            }
            let crossings = raw.div_euclid(duration).unsigned_abs();
            for _ in 0..crossings {
                outputs.push_event(PlaybackEvent::Looped { clip: self.clip });
            }
            self.elapsed = raw.rem_euclid(duration);
        } else if raw >= duration {
            self.elapsed = duration;
            self.state = PlaybackState::Finished;
            outputs.push_event(PlaybackEvent::Ended { clip: self.clip });
        } else {
            self.elapsed = raw.max(0);
        }
    }

    /// Back to elapsed = 0, state = Playing. Track cursors self-correct on the
    /// next sample (backward time resets them), but clear them anyway so a
    /// reset animation carries no stale search state.
    pub fn reset(&mut self) {
        self.elapsed = 0;
        self.state = PlaybackState::Playing;
        for cursor in &mut self.cursors {
            cursor.reset();
        }
    }

    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
    }
}

/// A secondary animation mixed over the primary with a caller-owned blend
/// factor in [0,1]. The core never auto-animates the factor; crossfades are
/// driven by the caller updating it frame to frame.
#[derive(Debug)]
pub struct BlendState {
    pub anim: RunningAnimation,
    factor: f32,
}

impl BlendState {
    pub fn new(anim: RunningAnimation, factor: f32) -> Self {
        Self {
            anim,
            factor: factor.clamp(0.0, 1.0),
        }
    }

    #[inline]
    pub fn factor(&self) -> f32 {
        self.factor
    }

    #[inline]
    pub fn set_factor(&mut self, factor: f32) {
        self.factor = factor.clamp(0.0, 1.0);
    }
}
