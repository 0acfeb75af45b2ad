//! Track sampling: cursor-seeded bracket search plus interpolation.
//!
//! Playback time is strictly increasing in the common case, so the bracket
//! search advances a cached per-track cursor instead of re-scanning from the
//! start; a backward jump (loop restart, seek) resets the cursor to 0 first.

use glam::Mat4;

use crate::clip::{AnimationClip, Keyframe, KeyframeTrack, Ticks};
use crate::hierarchy::BoneHierarchy;
use crate::interp::InterpolationMethod;
use crate::pose::Pose;

/// Monotonic per-track cursor. Valid only while sample times advance forward;
/// [`find_bracket`] resets it when time moves backward.
#[derive(Clone, Copy, Debug, Default)]
pub struct TrackCursor {
    frame: usize,
    last_time: Ticks,
}

impl TrackCursor {
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Find the keyframe pair with `lower.time <= time < upper.time`.
///
/// Edge cases:
/// - single-keyframe (static) tracks return that keyframe for both ends;
/// - `time` before the first keyframe holds the first keyframe;
/// - `time` at/after the last keyframe holds the last keyframe.
///
/// Tracks are validated non-empty at clip load.
pub fn find_bracket<'a>(
    track: &'a KeyframeTrack,
    cursor: &mut TrackCursor,
    time: Ticks,
) -> (&'a Keyframe, &'a Keyframe) {
    let keys = &track.keyframes;
    let last = keys.len() - 1;

    if time < cursor.last_time {
        cursor.frame = 0;
    }
    cursor.last_time = time;

    if last == 0 || time <= keys[0].time {
        cursor.frame = 0;
        return (&keys[0], &keys[0]);
    }
    if time >= keys[last].time {
        cursor.frame = last - 1;
        return (&keys[last], &keys[last]);
    }

    let mut i = cursor.frame.min(last - 1);
    if keys[i].time > time {
        i = 0;
    }
    while keys[i + 1].time <= time {
        i += 1;
    }
    cursor.frame = i;
    (&keys[i], &keys[i + 1])
}

/// Sample one track: bracket lookup + interpolation fraction, clamped to [0,1].
pub fn sample_track(
    track: &KeyframeTrack,
    cursor: &mut TrackCursor,
    time: Ticks,
    method: InterpolationMethod,
) -> Mat4 {
    let (lower, upper) = find_bracket(track, cursor, time);
    if lower.time == upper.time {
        return lower.transform;
    }
    let f = (time - lower.time) as f32 / (upper.time - lower.time) as f32;
    method.interpolate(&lower.transform, &upper.transform, f.clamp(0.0, 1.0))
}

/// Sample a whole clip into `out`: bones with no track keep the hierarchy's
/// default transform. `cursors` must have one entry per clip track.
pub fn sample_clip_pose(
    hierarchy: &BoneHierarchy,
    clip: &AnimationClip,
    cursors: &mut [TrackCursor],
    time: Ticks,
    method: InterpolationMethod,
    out: &mut Pose,
) {
    debug_assert_eq!(cursors.len(), clip.tracks.len());
    out.reset_to_defaults(hierarchy);
    for (track, cursor) in clip.tracks.iter().zip(cursors.iter_mut()) {
        out.transforms[track.bone] = sample_track(track, cursor, time, method);
    }
}
