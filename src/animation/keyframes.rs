use crate::foundation::error::{FadeError, FadeResult};

/// One point of the time → blend-position mapping, both axes in percent.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Keyframe {
    /// Position in the animation cycle, `[0, 100]`.
    pub time_percent: f64,
    /// Blend position reached at `time_percent`, `[0, 100]`.
    pub position_percent: f64,
}

impl Keyframe {
    /// Build a keyframe from its two coordinates.
    pub const fn new(time_percent: f64, position_percent: f64) -> Self {
        Self {
            time_percent,
            position_percent,
        }
    }
}

/// Piecewise-linear keyframe table, always starting at `(0, 0)`.
///
/// Tables are only produced by [`build_keyframes`], so they hold at least two keys.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(transparent)]
pub struct KeyframeTable {
    keys: Vec<Keyframe>, // sorted by time_percent
}

/// Build the keyframe table for a milestone list.
///
/// Milestone `i` maps to blend position `(i + 1) / len * 100`. The caller guarantees
/// `milestones.len() == image_count - 1`, each value in `(0, 100]`, strictly increasing; the
/// builder does not re-check this. With fewer than two images or no milestones the table
/// degenerates to `[(0, 0), (100, 100)]`.
pub fn build_keyframes(milestones: &[f64], image_count: usize) -> KeyframeTable {
    if image_count < 2 || milestones.is_empty() {
        return KeyframeTable {
            keys: vec![Keyframe::new(0.0, 0.0), Keyframe::new(100.0, 100.0)],
        };
    }

    let len = milestones.len() as f64;
    let mut keys = Vec::with_capacity(milestones.len() + 2);
    keys.push(Keyframe::new(0.0, 0.0));
    keys.extend(
        milestones
            .iter()
            .enumerate()
            .map(|(i, &t)| Keyframe::new(t, ((i + 1) as f64 / len) * 100.0)),
    );
    if milestones[milestones.len() - 1] < 100.0 {
        keys.push(Keyframe::new(100.0, 100.0));
    }
    KeyframeTable { keys }
}

impl KeyframeTable {
    /// Borrow the keys in time order.
    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always `false` for tables built by [`build_keyframes`].
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Check the table is usable for sampling: finite values, strictly increasing times
    /// spanning exactly `[0, 100]`.
    pub fn validate(&self) -> FadeResult<()> {
        if self.keys.len() < 2 {
            return Err(FadeError::animation(
                "keyframe table needs at least two keys",
            ));
        }
        if self
            .keys
            .iter()
            .any(|k| !k.time_percent.is_finite() || !k.position_percent.is_finite())
        {
            return Err(FadeError::animation("keyframe values must be finite"));
        }
        if !self
            .keys
            .windows(2)
            .all(|w| w[0].time_percent < w[1].time_percent)
        {
            return Err(FadeError::animation(
                "keyframe times must be strictly increasing",
            ));
        }
        let first = self.keys[0].time_percent;
        let last = self.keys[self.keys.len() - 1].time_percent;
        if first != 0.0 || last != 100.0 {
            return Err(FadeError::animation("keyframe times must span [0, 100]"));
        }
        Ok(())
    }

    /// Find the active segment for `time_percent`.
    ///
    /// Scans in order for `[start.time, end.time)`; at or past the last key both ends pin to
    /// the last key. A time matching no segment falls back to the first pair.
    pub fn segment(&self, time_percent: f64) -> (Keyframe, Keyframe) {
        let keys = &self.keys;
        let last = keys[keys.len() - 1];
        let mut start = keys[0];
        let mut end = keys.get(1).copied().unwrap_or(start);
        for w in keys.windows(2) {
            if time_percent >= w[0].time_percent && time_percent < w[1].time_percent {
                start = w[0];
                end = w[1];
                break;
            }
        }
        if time_percent >= last.time_percent {
            start = last;
            end = last;
        }
        (start, end)
    }

    /// Linearly interpolate the blend position at `time_percent`.
    pub fn sample(&self, time_percent: f64) -> f64 {
        let (start, end) = self.segment(time_percent);
        let segment_duration = end.time_percent - start.time_percent;
        let time_into_segment = time_percent - start.time_percent;
        let progress = if segment_duration > 0.0 {
            time_into_segment / segment_duration
        } else {
            0.0
        };
        start.position_percent + (end.position_percent - start.position_percent) * progress
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframes.rs"]
mod tests;
