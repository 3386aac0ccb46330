use crate::config::model::OutputTarget;
use crate::config::validate::NormalizedConfig;
use crate::emit::{components, script};
use crate::foundation::error::{FadeError, FadeResult};
use crate::ingest::decode::{ImageInfo, extension_for_src};

/// Everything a generator needs, resolved from a validated configuration and the image
/// sequence.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmitContext {
    /// One URL or data URI per image, in sequence order.
    pub image_urls: Vec<String>,
    /// Duration string, re-parsed by the generated engine.
    pub duration: String,
    /// Milestone percentages.
    pub milestones: Vec<f64>,
    /// Loop back to the first image.
    pub is_cycling: bool,
    /// Container class, already trimmed.
    pub class_name: String,
    /// Raw start offset, empty when unset.
    pub start_at: String,
}

impl EmitContext {
    /// Build a context for `images`. Fails with fewer than two images.
    pub fn new(config: &NormalizedConfig, images: &[ImageInfo]) -> FadeResult<Self> {
        if images.len() < 2 {
            return Err(FadeError::emission(
                "At least two images are required to generate code.",
            ));
        }
        Ok(Self {
            image_urls: resolve_image_urls(images, &config.image_prefix, config.embed_images),
            duration: config.duration.trim().to_owned(),
            milestones: config.milestones.clone(),
            is_cycling: config.is_cycling,
            class_name: config.class_name.clone(),
            start_at: config.start_at.trim().to_owned(),
        })
    }
}

/// Image URLs for export: inline data URIs, or `prefix + (i + 1) + extension` with the
/// extension taken from the first image.
pub fn resolve_image_urls(images: &[ImageInfo], prefix: &str, embed: bool) -> Vec<String> {
    if embed {
        return images.iter().map(|img| img.src.clone()).collect();
    }
    let ext = images.first().map_or(".jpg", |img| extension_for_src(&img.src));
    (1..=images.len())
        .map(|i| format!("{prefix}{i}{ext}"))
        .collect()
}

/// One export flavour.
pub trait SnippetGenerator: Sync {
    /// Target this generator produces.
    fn target(&self) -> OutputTarget;
    /// Render the snippet.
    fn generate(&self, ctx: &EmitContext) -> FadeResult<String>;
}

/// Generator for `target`.
pub fn generator_for(target: OutputTarget) -> &'static dyn SnippetGenerator {
    match target {
        OutputTarget::Script => &script::ScriptTagGenerator,
        OutputTarget::React => &components::ReactGenerator,
        OutputTarget::Vue => &components::VueGenerator,
        OutputTarget::Svelte => &components::SvelteGenerator,
    }
}

/// Generate the snippet for the configured target.
#[tracing::instrument(skip(config, images), fields(target = config.output_target.as_str(), images = images.len()))]
pub fn generate(config: &NormalizedConfig, images: &[ImageInfo]) -> FadeResult<String> {
    let ctx = EmitContext::new(config, images)?;
    let out = generator_for(config.output_target).generate(&ctx)?;
    tracing::debug!(bytes = out.len(), "snippet generated");
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/emit/generator.rs"]
mod tests;
