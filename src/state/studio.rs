//! Application state: the image sequence, the editable configuration, the preview position
//! and the animation clock, behind named operations.

use crate::animation::clock::{AnimationClock, FrameHandle, FrameScheduler};
use crate::animation::resolve::{BlendState, blend_label, resolve_position};
use crate::config::model::{AnimationConfig, MilestoneMode, format_percent, percent_of_duration};
use crate::config::validate::validate_config;
use crate::emit::generator::generate;
use crate::foundation::error::{FadeError, FadeResult};
use crate::ingest::batch::ingest_batch;
use crate::ingest::decode::{ImageInfo, IngestFile};
use crate::timing::duration::{ms_to_friendly_string, parse_duration};

/// One editing session.
///
/// The preview position is written either by [`Studio::set_slider`] or, while the clock is
/// armed, by [`Studio::on_frame`]; never both.
#[derive(Debug)]
pub struct Studio<S: FrameScheduler> {
    images: Vec<ImageInfo>,
    config: AnimationConfig,
    slider_value: f64,
    clock: AnimationClock,
    scheduler: S,
    error: Option<String>,
    generated: Option<String>,
    generation_error: Option<String>,
    next_seq: u64,
}

impl<S: FrameScheduler> Studio<S> {
    /// Empty session driven by `scheduler`.
    pub fn new(scheduler: S) -> Self {
        Self {
            images: Vec::new(),
            config: AnimationConfig::default(),
            slider_value: 0.0,
            clock: AnimationClock::new(),
            scheduler,
            error: None,
            generated: None,
            generation_error: None,
            next_seq: 0,
        }
    }

    /// Images in sequence order.
    pub fn images(&self) -> &[ImageInfo] {
        &self.images
    }

    /// Current configuration.
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Preview position, `0..=100`.
    pub fn slider_value(&self) -> f64 {
        self.slider_value
    }

    /// Last ingestion or animation error.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Last generated snippet.
    pub fn generated(&self) -> Option<&str> {
        self.generated.as_deref()
    }

    /// Last generation error.
    pub fn generation_error(&self) -> Option<&str> {
        self.generation_error.as_deref()
    }

    /// `true` while the clock drives the preview.
    pub fn is_animating(&self) -> bool {
        self.clock.is_armed()
    }

    /// The scheduler ticks are requested from.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable access to the scheduler, for hosts that fire ticks.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Append a batch of uploads.
    ///
    /// All-or-nothing: on failure the sequence is unchanged and the message is kept in
    /// [`Studio::error`]. On success milestones are reset to even spacing. Returns the number of
    /// images added.
    pub fn add_images(&mut self, files: &[IngestFile]) -> FadeResult<usize> {
        if files.is_empty() {
            return Ok(0);
        }
        let batch = match ingest_batch(files, &self.images, self.next_seq) {
            Ok(batch) => batch,
            Err(e) => {
                tracing::warn!(error = %e, "image batch rejected");
                self.error = Some(e.user_message());
                return Err(e);
            }
        };

        let added = batch.len();
        self.next_seq += added as u64;
        self.stop_animation();
        self.images.extend(batch);
        self.config.reset_milestones(self.images.len());
        self.error = None;
        Ok(added)
    }

    /// Remove the image with `id`. Dropping below two images resets the session.
    pub fn remove_image(&mut self, id: &str) -> bool {
        let Some(pos) = self.images.iter().position(|img| img.id == id) else {
            return false;
        };
        self.images.remove(pos);
        if self.images.len() < 2 {
            self.reset();
        } else {
            self.stop_animation();
            self.config.reset_milestones(self.images.len());
        }
        true
    }

    /// Move the image at `from` so it ends up at `to`.
    pub fn reorder_images(&mut self, from: usize, to: usize) -> FadeResult<()> {
        let len = self.images.len();
        if from >= len || to >= len {
            return Err(FadeError::validation(format!(
                "reorder {from} -> {to} out of range for {len} images"
            )));
        }
        let img = self.images.remove(from);
        self.images.insert(to, img);
        Ok(())
    }

    /// Back to an empty session with the default configuration.
    pub fn reset(&mut self) {
        self.stop_animation();
        self.images.clear();
        self.config = AnimationConfig::default();
        self.slider_value = 0.0;
        self.error = None;
        self.generated = None;
        self.generation_error = None;
    }

    /// Replace the configuration. Validation happens at arm and generation time.
    pub fn set_config(&mut self, config: AnimationConfig) {
        self.config = config;
    }

    /// Switch milestone input mode.
    ///
    /// Switching to time mode fills the time inputs from the current percentages when the
    /// duration parses; unparsable percentages become empty inputs.
    pub fn set_milestone_mode(&mut self, mode: MilestoneMode) {
        if mode == MilestoneMode::Time
            && let Some(total) = parse_duration(&self.config.duration)
        {
            self.config.time_milestone_inputs = self
                .config
                .milestones
                .iter()
                .map(|m| {
                    m.trim()
                        .parse::<f64>()
                        .ok()
                        .filter(|p| p.is_finite())
                        .map(|p| ms_to_friendly_string((p / 100.0) * total))
                        .unwrap_or_default()
                })
                .collect();
        }
        self.config.milestone_mode = mode;
    }

    /// Edit one time-mode milestone. When both it and the duration parse, the matching
    /// percentage milestone follows.
    pub fn set_time_milestone(&mut self, index: usize, value: &str) -> FadeResult<()> {
        let Some(slot) = self.config.time_milestone_inputs.get_mut(index) else {
            return Err(FadeError::validation(format!(
                "time milestone index {index} out of range"
            )));
        };
        value.clone_into(slot);

        if let Some(total) = parse_duration(&self.config.duration)
            && total > 0.0
            && let Some(time_ms) = parse_duration(value)
            && let Some(percent) = self.config.milestones.get_mut(index)
        {
            *percent = format_percent(percent_of_duration(time_ms, total));
        }
        Ok(())
    }

    /// Scrub the preview. Rejected while the animation runs.
    pub fn set_slider(&mut self, value: f64) -> FadeResult<()> {
        if self.clock.is_armed() {
            return Err(FadeError::animation(
                "the preview position is driven by the animation while it runs",
            ));
        }
        if !value.is_finite() {
            return Err(FadeError::validation("slider value must be finite"));
        }
        self.slider_value = value.clamp(0.0, 100.0);
        Ok(())
    }

    /// Arm the clock with the current configuration.
    ///
    /// On failure the clock stays disarmed and the message is kept in [`Studio::error`].
    #[tracing::instrument(skip(self), fields(images = self.images.len()))]
    pub fn start_animation(&mut self) -> FadeResult<()> {
        let params = self.animation_params();
        match params {
            Ok(params) => {
                self.clock.arm(params, &mut self.scheduler);
                self.error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "animation not started");
                self.clock.disarm(&mut self.scheduler);
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    fn animation_params(&self) -> FadeResult<crate::animation::clock::ClockParams> {
        let count = self.images.len();
        if count < 2 {
            return Err(FadeError::animation(
                "at least two images are required to animate",
            ));
        }
        validate_config(&self.config, count)?.clock_params(count)
    }

    /// Disarm the clock. The preview keeps its last position.
    pub fn stop_animation(&mut self) {
        self.clock.disarm(&mut self.scheduler);
    }

    /// Start when stopped, stop when running. Returns whether the animation now runs.
    pub fn toggle_animation(&mut self) -> FadeResult<bool> {
        if self.clock.is_armed() {
            self.stop_animation();
            Ok(false)
        } else {
            self.start_animation().map(|()| true)
        }
    }

    /// Deliver a scheduled frame. Returns the new preview position, or `None` for stale ticks.
    pub fn on_frame(&mut self, handle: FrameHandle, timestamp_ms: f64) -> Option<f64> {
        let position = self.clock.tick(handle, timestamp_ms, &mut self.scheduler)?;
        self.slider_value = position;
        Some(position)
    }

    /// Images to draw for the current preview position.
    pub fn blend_state(&self) -> BlendState {
        resolve_position(self.slider_value, self.images.len(), self.config.is_cycling)
    }

    /// Caption for the current preview position.
    pub fn slider_label(&self) -> String {
        blend_label(self.slider_value, self.images.len(), self.config.is_cycling)
    }

    /// Validate `config`, commit it, and generate the snippet for its target.
    ///
    /// Invalid configurations are not committed; use [`validate_config`] for the per-field
    /// messages. The snippet or the generation error is kept on the studio.
    #[tracing::instrument(skip(self, config), fields(target = config.output_target.as_str()))]
    pub fn generate_code(&mut self, config: AnimationConfig) -> FadeResult<String> {
        self.generated = None;
        self.generation_error = None;

        let normalized = validate_config(&config, self.images.len())?;
        self.config = config;

        match generate(&normalized, &self.images) {
            Ok(code) => {
                self.generated = Some(code.clone());
                Ok(code)
            }
            Err(e) => {
                self.generation_error = Some(e.user_message());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/state/studio.rs"]
mod tests;
