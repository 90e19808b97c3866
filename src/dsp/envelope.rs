/*
Breakpoint Envelopes
====================

Every envelope in the synth is a short list of (time, level) breakpoints
joined by straight lines. Nothing is stateful here: the caller passes the
time since the envelope started and gets the level back.

    level
     1.0 ┐      ●─────────────●
         │     ╱               ╲
         │    ╱                 ╲
     0.0 ●───╱───────────────────●──→ time (s)
         0  0.1             len-0.1  len

    held note intro:   (0, 0) → (0.1, 1)
    held note outro:   (0, 1) → (0.1, 0)          time measured from release
    rhythm pluck:      (0, 0) → (0.1, 1) → (beat, 0)
    sample playback:   (0, 0) → (0.1, 1) → (len - 0.1, 1) → (len, 0)

Before the first breakpoint the level is the first value; after the last it
is the last value. A segment whose end time is not after its start (a clip
shorter than both fades, say) jumps straight to the end value instead of
dividing by zero.
*/

/// Attack and release time shared by held notes and the sample fades.
pub const ENVELOPE_TIME: f32 = 0.1;

/// Evaluate a piecewise-linear envelope at `time` seconds.
pub fn envelope_points(time: f32, points: &[(f32, f32)]) -> f32 {
    let Some(&(first_time, first_level)) = points.first() else {
        return 0.0;
    };
    if time <= first_time {
        return first_level;
    }

    for segment in points.windows(2) {
        let (t0, v0) = segment[0];
        let (t1, v1) = segment[1];
        if time < t1 {
            if t1 <= t0 {
                return v1;
            }
            let progress = ((time - t0) / (t1 - t0)).clamp(0.0, 1.0);
            return v0 + (v1 - v0) * progress;
        }
    }

    points.last().map_or(0.0, |&(_, level)| level)
}

/// Linear 0 → 1 fade over [`ENVELOPE_TIME`].
#[inline]
pub fn intro(time: f32) -> f32 {
    envelope_points(time, &[(0.0, 0.0), (ENVELOPE_TIME, 1.0)])
}

/// Linear 1 → 0 fade over [`ENVELOPE_TIME`], `time` measured from release.
#[inline]
pub fn outro(time: f32) -> f32 {
    envelope_points(time, &[(0.0, 1.0), (ENVELOPE_TIME, 0.0)])
}
