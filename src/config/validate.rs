use std::fmt;

use crate::animation::clock::ClockParams;
use crate::config::model::{AnimationConfig, MilestoneMode, OutputTarget, percent_of_duration};
use crate::foundation::error::{FadeError, FadeResult};
use crate::timing::duration::{StartAt, is_decimal, parse_duration};

/// One message attached to one form field.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FieldError {
    /// Field path, e.g. `duration`, `milestones.1`, `startAt`.
    pub field: String,
    /// User-facing message.
    pub message: String,
}

/// All field errors found in one validation pass, in form order.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    errors: Vec<FieldError>,
}

impl FieldErrors {
    fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// First message recorded for `field`.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Every message recorded for `field`.
    pub fn all_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.errors
            .iter()
            .filter(move |e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Iterate over all errors.
    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.errors.iter()
    }

    /// Number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// `true` when validation passed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", e.field, e.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl From<FieldErrors> for FadeError {
    fn from(e: FieldErrors) -> Self {
        FadeError::validation(e.to_string())
    }
}

/// Configuration accepted by [`validate_config`]; everything the engine and emitters need.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedConfig {
    /// Duration string as entered.
    pub duration: String,
    /// Parsed cycle length.
    pub total_duration_ms: f64,
    /// Milestones as cycle percentages, strictly increasing in `(0, 100]`.
    pub milestones: Vec<f64>,
    /// Loop back to the first image.
    pub is_cycling: bool,
    /// Start offset as entered (empty when unset).
    pub start_at: String,
    /// Start offset resolved against the total duration.
    pub initial_offset_ms: f64,
    /// URL prefix for exported images.
    pub image_prefix: String,
    /// Trimmed container class.
    pub class_name: String,
    /// Export flavour.
    pub output_target: OutputTarget,
    /// Inline images as data URIs.
    pub embed_images: bool,
}

impl NormalizedConfig {
    /// Clock inputs for a sequence of `image_count` images.
    pub fn clock_params(&self, image_count: usize) -> FadeResult<ClockParams> {
        ClockParams::new(&self.duration, &self.milestones, image_count, &self.start_at)
    }
}

/// Validate a configuration for a sequence of `image_count` images.
///
/// Pure: collects every field error instead of stopping at the first, and never touches
/// application state.
#[tracing::instrument(skip(config), fields(mode = ?config.milestone_mode))]
pub fn validate_config(
    config: &AnimationConfig,
    image_count: usize,
) -> Result<NormalizedConfig, FieldErrors> {
    let mut errors = FieldErrors::default();

    let total_duration_ms = match parse_duration(&config.duration) {
        Some(ms) if ms > 0.0 => Some(ms),
        Some(_) => {
            errors.push("duration", "Duration must be greater than zero");
            None
        }
        None => {
            errors.push(
                "duration",
                "Invalid duration format. Use 's', 'm', 'h', or 'd'",
            );
            None
        }
    };

    let mut milestones = Vec::new();
    let mut initial_offset_ms = 0.0;
    if let Some(total) = total_duration_ms {
        milestones = validate_milestones(config, total, &mut errors);
        if image_count >= 2 && config.active_milestones().len() != image_count - 1 {
            errors.push(
                milestone_list_field(config.milestone_mode),
                format!("Expected {} milestones", image_count - 1),
            );
        }
        initial_offset_ms = validate_start_at(&config.start_at, total, &mut errors);
    }

    if config.output_target == OutputTarget::Script
        && !config.embed_images
        && config.image_prefix.trim().is_empty()
    {
        errors.push("imagePrefix", "Image prefix is required.");
    }

    match total_duration_ms {
        Some(total_duration_ms) if errors.is_empty() => Ok(NormalizedConfig {
            duration: config.duration.clone(),
            total_duration_ms,
            milestones,
            is_cycling: config.is_cycling,
            start_at: config.start_at.clone(),
            initial_offset_ms,
            image_prefix: config.image_prefix.clone(),
            class_name: config.class_name.trim().to_owned(),
            output_target: config.output_target,
            embed_images: config.embed_images,
        }),
        _ => {
            tracing::debug!(errors = errors.len(), "config rejected");
            Err(errors)
        }
    }
}

fn milestone_list_field(mode: MilestoneMode) -> &'static str {
    match mode {
        MilestoneMode::Percentage => "milestones",
        MilestoneMode::Time => "timeMilestoneInputs",
    }
}

fn validate_milestones(
    config: &AnimationConfig,
    total_duration_ms: f64,
    errors: &mut FieldErrors,
) -> Vec<f64> {
    let list = milestone_list_field(config.milestone_mode);
    let mut out = Vec::with_capacity(config.active_milestones().len());
    let mut prev = 0.0;

    for (i, raw) in config.active_milestones().iter().enumerate() {
        let field = format!("{list}.{i}");
        let value = raw.trim();
        if value.is_empty() {
            errors.push(field, "Required");
            continue;
        }

        let percent = match config.milestone_mode {
            MilestoneMode::Percentage => match value.parse::<f64>() {
                Ok(p) if p.is_finite() => p,
                _ => {
                    errors.push(field, "Must be a number");
                    continue;
                }
            },
            MilestoneMode::Time => {
                let Some(time_ms) = parse_duration(value) else {
                    errors.push(field, "Invalid time format");
                    continue;
                };
                if time_ms > total_duration_ms {
                    errors.push(field, "Exceeds total duration");
                    continue;
                }
                percent_of_duration(time_ms, total_duration_ms)
            }
        };

        if percent <= 0.0 || percent > 100.0 {
            errors.push(field.clone(), "Must be between 0% and 100%");
        }
        if percent <= prev {
            errors.push(field, "Must be greater than previous");
        }
        prev = percent;
        out.push(percent);
    }
    out
}

fn validate_start_at(start_at: &str, total_duration_ms: f64, errors: &mut FieldErrors) -> f64 {
    if start_at.is_empty() {
        return 0.0;
    }
    let bare = start_at.strip_suffix('%').unwrap_or(start_at);
    if is_decimal(bare) {
        let percent = bare.parse::<f64>().unwrap_or(f64::NAN);
        if !(0.0..=100.0).contains(&percent) {
            errors.push("startAt", "Must be between 0% and 100%");
            return 0.0;
        }
        return StartAt::Percent(percent).offset_ms(total_duration_ms);
    }
    match parse_duration(start_at) {
        None => {
            errors.push(
                "startAt",
                "Invalid format. Use percentage (e.g., 50%) or time (e.g., 30s)",
            );
            0.0
        }
        Some(ms) if ms > total_duration_ms => {
            errors.push("startAt", "Exceeds total duration");
            0.0
        }
        Some(ms) => ms,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/validate.rs"]
mod tests;
