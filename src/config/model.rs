use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::error::{FadeError, FadeResult};
use crate::timing::round::round_fixed;

/// Default cycle length for a fresh configuration.
pub const DEFAULT_DURATION: &str = "60s";
/// Default URL prefix for exported image references.
pub const DEFAULT_IMAGE_PREFIX: &str = "/images/slider-";

/// How milestones are entered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MilestoneMode {
    /// Direct percentages of the cycle (`"25"`).
    #[default]
    Percentage,
    /// Duration strings converted against the total duration (`"15s"`).
    Time,
}

/// Snippet flavour produced by an export.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputTarget {
    /// Self-executing `<script>` tag configured through data attributes.
    #[default]
    Script,
    /// React function component (JSX).
    React,
    /// Vue single-file component.
    Vue,
    /// Svelte component.
    Svelte,
}

impl OutputTarget {
    /// All targets in display order.
    pub const ALL: [Self; 4] = [Self::Script, Self::React, Self::Vue, Self::Svelte];

    /// Lowercase identifier, as used in JSON configs and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::React => "react",
            Self::Vue => "vue",
            Self::Svelte => "svelte",
        }
    }
}

/// User-editable animation configuration.
///
/// Milestones are kept as the strings the user typed; they become numbers only after
/// [`crate::validate_config`] accepts them.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnimationConfig {
    /// Cycle length, e.g. `"60s"`.
    pub duration: String,
    /// Milestone percentages, one per image after the first.
    pub milestones: Vec<String>,
    /// Milestone durations, used when `milestone_mode` is [`MilestoneMode::Time`].
    pub time_milestone_inputs: Vec<String>,
    /// Which of the two milestone lists is authoritative.
    pub milestone_mode: MilestoneMode,
    /// Export flavour.
    #[serde(alias = "framework")]
    pub output_target: OutputTarget,
    /// URL prefix for exported images (`prefix + N + extension`).
    pub image_prefix: String,
    /// CSS class applied to the exported container.
    pub class_name: String,
    /// Loop back to the first image instead of stopping at the last.
    pub is_cycling: bool,
    /// Optional start offset: percent (`"50"`, `"50%"`) or duration (`"30s"`).
    pub start_at: String,
    /// Inline images as data URIs instead of prefix URLs.
    pub embed_images: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION.to_owned(),
            milestones: Vec::new(),
            time_milestone_inputs: Vec::new(),
            milestone_mode: MilestoneMode::Percentage,
            output_target: OutputTarget::Script,
            image_prefix: DEFAULT_IMAGE_PREFIX.to_owned(),
            class_name: String::new(),
            is_cycling: false,
            start_at: String::new(),
            embed_images: false,
        }
    }
}

impl AnimationConfig {
    /// Parse a configuration from a JSON reader. Missing fields take their defaults.
    pub fn from_reader<R: std::io::Read>(r: R) -> FadeResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| FadeError::serde(format!("parse animation config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FadeResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FadeError::validation(format!("open config JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Replace both milestone lists with evenly spaced defaults for `image_count` images.
    pub fn reset_milestones(&mut self, image_count: usize) {
        self.milestones = default_milestones(image_count);
        self.time_milestone_inputs = vec![String::new(); self.milestones.len()];
    }

    /// Milestone strings for the active mode.
    pub fn active_milestones(&self) -> &[String] {
        match self.milestone_mode {
            MilestoneMode::Percentage => &self.milestones,
            MilestoneMode::Time => &self.time_milestone_inputs,
        }
    }
}

/// Evenly spaced milestone percentages (`round((i + 1) / (n - 1) * 100)`).
pub fn default_milestones(image_count: usize) -> Vec<String> {
    if image_count < 2 {
        return Vec::new();
    }
    let len = image_count - 1;
    (0..len)
        .map(|i| format!("{}", (((i + 1) as f64 / len as f64) * 100.0).round()))
        .collect()
}

/// Convert a time milestone into a cycle percentage, rounded to four decimals.
pub fn percent_of_duration(time_ms: f64, total_duration_ms: f64) -> f64 {
    round_fixed((time_ms / total_duration_ms) * 100.0, 4)
}

/// Format a percentage the way milestone strings are stored (`50`, `12.5`).
pub fn format_percent(percent: f64) -> String {
    format!("{percent}")
}

#[cfg(test)]
#[path = "../../tests/unit/config/model.rs"]
mod tests;
