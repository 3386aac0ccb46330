//! fadeshift is a keyframed cross-fade engine for image sequences.
//!
//! A sequence of equal-sized images is blended by a single position in `0..=100`. Milestones
//! place each image on a timeline; the [`AnimationClock`] turns display-refresh timestamps into
//! positions, and [`resolve_position`] turns a position into the pair of images to draw.
//!
//! The same engine is exported as a self-executing `<script>` tag or as a React, Vue or Svelte
//! component via [`generate`]. Exported code samples the same positions the preview does.
//!
//! - Edit an [`AnimationConfig`] and check it with [`validate_config`]
//! - Drive a preview with a [`Studio`]
//! - Export a snippet for the configured [`OutputTarget`]
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod config;
pub(crate) mod emit;
pub(crate) mod ingest;
pub(crate) mod state;
pub(crate) mod timing;

pub use crate::foundation::error::{FadeError, FadeResult};

pub use crate::animation::clock::{
    AnimationClock, ClockParams, FrameHandle, FrameScheduler, ManualScheduler,
};
pub use crate::animation::keyframes::{Keyframe, KeyframeTable, build_keyframes};
pub use crate::animation::resolve::{
    BOUNDARY_EPSILON, BlendState, Layer, blend_label, resolve_position,
};
pub use crate::config::model::{
    AnimationConfig, DEFAULT_DURATION, DEFAULT_IMAGE_PREFIX, MilestoneMode, OutputTarget,
    default_milestones, format_percent, percent_of_duration,
};
pub use crate::config::validate::{FieldError, FieldErrors, NormalizedConfig, validate_config};
pub use crate::emit::generator::{
    EmitContext, SnippetGenerator, generate, generator_for, resolve_image_urls,
};
pub use crate::emit::runtime::{ENGINE_IDENT, engine_source};
pub use crate::emit::script::{loader_source, loader_src};
pub use crate::ingest::batch::{MIN_FIRST_BATCH, ingest_batch};
pub use crate::ingest::decode::{ImageInfo, IngestFile, data_uri, extension_for_src};
pub use crate::state::studio::Studio;
pub use crate::timing::duration::{
    DurationUnit, StartAt, ms_to_friendly_string, parse_duration, split_duration,
    start_offset_ms,
};
