//! Frame-driven animation clock.
//!
//! The clock never sleeps or spawns; a host delivers display-refresh ticks through
//! [`AnimationClock::tick`] and the clock asks a [`FrameScheduler`] for the next one. At most
//! one tick is pending at any time.

use crate::animation::keyframes::{KeyframeTable, build_keyframes};
use crate::foundation::error::{FadeError, FadeResult};
use crate::timing::duration::{parse_duration, start_offset_ms};

/// Opaque handle for one scheduled frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host-side frame scheduling, e.g. a wrapper over `requestAnimationFrame`.
pub trait FrameScheduler {
    /// Request one callback on the next display refresh.
    fn schedule(&mut self) -> FrameHandle;
    /// Cancel a previously requested callback. Unknown handles are ignored.
    fn cancel(&mut self, handle: FrameHandle);
}

/// Deterministic scheduler for tests and headless hosts.
///
/// Handles are issued in increasing order; the host decides when (and with which timestamp)
/// to fire them.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: Vec<FrameHandle>,
}

impl ManualScheduler {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Handles requested and not yet taken or cancelled.
    pub fn pending(&self) -> &[FrameHandle] {
        &self.pending
    }

    /// Remove and return the oldest pending handle.
    pub fn take_next(&mut self) -> Option<FrameHandle> {
        if self.pending.is_empty() {
            None
        } else {
            Some(self.pending.remove(0))
        }
    }
}

impl FrameScheduler for ManualScheduler {
    fn schedule(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id);
        self.next_id += 1;
        self.pending.push(handle);
        handle
    }

    fn cancel(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
    }
}

/// Timing inputs frozen when the clock is armed.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct ClockParams {
    /// Length of one animation cycle.
    pub total_duration_ms: f64,
    /// Time → position mapping.
    pub keyframes: KeyframeTable,
    /// Elapsed time the first tick starts from.
    pub initial_offset_ms: f64,
}

impl ClockParams {
    /// Resolve clock inputs from configuration values.
    ///
    /// Fails when the duration does not parse or is zero, or when the milestones do not form
    /// a usable keyframe table for `image_count` images.
    pub fn new(
        duration: &str,
        milestones: &[f64],
        image_count: usize,
        start_at: &str,
    ) -> FadeResult<Self> {
        let total_duration_ms = parse_duration(duration).ok_or_else(|| {
            FadeError::animation(format!("invalid duration format \"{duration}\""))
        })?;
        if total_duration_ms <= 0.0 {
            return Err(FadeError::animation("duration must be greater than zero"));
        }
        if image_count >= 2 && milestones.len() != image_count - 1 {
            return Err(FadeError::animation(format!(
                "expected {} milestones for {image_count} images, got {}",
                image_count - 1,
                milestones.len()
            )));
        }
        if milestones.iter().any(|m| !(*m > 0.0 && *m <= 100.0)) {
            return Err(FadeError::animation(
                "milestones must lie in (0, 100]",
            ));
        }

        let keyframes = build_keyframes(milestones, image_count);
        keyframes.validate()?;

        Ok(Self {
            total_duration_ms,
            keyframes,
            initial_offset_ms: start_offset_ms(start_at, total_duration_ms),
        })
    }

    /// Position within the cycle, in percent, after `elapsed_ms`. Wraps indefinitely.
    pub fn time_percent(&self, elapsed_ms: f64) -> f64 {
        ((elapsed_ms % self.total_duration_ms) / self.total_duration_ms) * 100.0
    }

    /// Blend position after `elapsed_ms`.
    pub fn position_at(&self, elapsed_ms: f64) -> f64 {
        self.keyframes.sample(self.time_percent(elapsed_ms))
    }
}

#[derive(Clone, Debug)]
struct Armed {
    params: ClockParams,
    origin_ms: Option<f64>,
    pending: Option<FrameHandle>,
}

/// The animation clock. Disarmed until [`AnimationClock::arm`] is called.
#[derive(Clone, Debug, Default)]
pub struct AnimationClock {
    armed: Option<Armed>,
}

impl AnimationClock {
    /// Create a disarmed clock.
    pub fn new() -> Self {
        Self::default()
    }

    /// `true` while ticks are being scheduled.
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Parameters the clock was armed with.
    pub fn params(&self) -> Option<&ClockParams> {
        self.armed.as_ref().map(|a| &a.params)
    }

    /// Handle of the tick the clock is waiting for, if any.
    pub fn pending(&self) -> Option<FrameHandle> {
        self.armed.as_ref().and_then(|a| a.pending)
    }

    /// Start scheduling ticks. Re-arming an armed clock restarts it from the offset.
    #[tracing::instrument(skip(self, params, scheduler), fields(duration_ms = params.total_duration_ms))]
    pub fn arm<S: FrameScheduler + ?Sized>(&mut self, params: ClockParams, scheduler: &mut S) {
        self.disarm(scheduler);
        let pending = Some(scheduler.schedule());
        self.armed = Some(Armed {
            params,
            origin_ms: None,
            pending,
        });
        tracing::debug!("animation clock armed");
    }

    /// Stop scheduling ticks and forget the origin. Safe to call at any time.
    pub fn disarm<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if let Some(armed) = self.armed.take()
            && let Some(handle) = armed.pending
        {
            scheduler.cancel(handle);
        }
    }

    /// Deliver a scheduled tick. Returns the new blend position, or `None` when the clock is
    /// disarmed or `handle` is not the tick it is waiting for.
    pub fn tick<S: FrameScheduler + ?Sized>(
        &mut self,
        handle: FrameHandle,
        timestamp_ms: f64,
        scheduler: &mut S,
    ) -> Option<f64> {
        let armed = self.armed.as_mut()?;
        if armed.pending != Some(handle) {
            return None;
        }
        let offset = armed.params.initial_offset_ms;
        let origin = *armed.origin_ms.get_or_insert(timestamp_ms - offset);
        let position = armed.params.position_at(timestamp_ms - origin);
        armed.pending = Some(scheduler.schedule());
        Some(position)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/clock.rs"]
mod tests;
