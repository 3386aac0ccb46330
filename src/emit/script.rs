//! Self-executing `<script>` export.
//!
//! The loader is shipped base64-encoded in the tag's `src`; configuration travels in `data-*`
//! attributes and is re-validated by the loader at page load.

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};

use crate::config::model::OutputTarget;
use crate::emit::generator::{EmitContext, SnippetGenerator};
use crate::emit::js::{escape_attr, fill, json_number_array, json_string_array};
use crate::emit::runtime::{ENGINE_IDENT, engine_source};
use crate::foundation::error::FadeResult;

const LOADER_TEMPLATE: &str = r#"(function () {
  "use strict";
  const script = document.currentScript;
  if (!script) {
    console.error("fadeshift: could not find the script tag to initialize from.");
    return;
  }

__ENGINE__

  const data = script.dataset;
  if (!data.duration || !data.milestones || !data.images) {
    console.error("fadeshift: missing required data attributes (data-duration, data-milestones, data-images).");
    return;
  }

  let milestones;
  let images;
  try {
    milestones = JSON.parse(data.milestones);
    images = JSON.parse(data.images);
  } catch (e) {
    console.error("fadeshift: failed to parse data-milestones or data-images.", e);
    return;
  }
  if (!Array.isArray(milestones) || !Array.isArray(images) || images.length < 2) {
    console.error("fadeshift: invalid configuration in data attributes.");
    return;
  }
  if (__IDENT__.parseDuration(data.duration) === null) {
    console.error(`fadeshift: invalid duration format "${data.duration}". Use 's', 'm', 'h', or 'd'.`);
    return;
  }

  const container = document.createElement("div");
  if (data.class) container.className = data.class;
  container.style.position = "relative";
  container.style.overflow = "hidden";
  container.style.lineHeight = "0";
  script.parentNode.replaceChild(container, script);

  const first = new Image();
  first.onload = () => {
    container.style.aspectRatio = `${first.naturalWidth} / ${first.naturalHeight}`;
    const elements = images.map((src, index) => {
      const img = document.createElement("img");
      img.src = src;
      img.alt = `Image ${index + 1}`;
      img.style.position = "absolute";
      img.style.top = "0";
      img.style.left = "0";
      img.style.width = "100%";
      img.style.height = "100%";
      img.style.objectFit = "cover";
      img.style.opacity = index === 0 ? "1" : "0";
      container.appendChild(img);
      return img;
    });
    __IDENT__.preload(images).then(() => {
      __IDENT__.start(elements, {
        duration: data.duration,
        milestones: milestones,
        isCycling: data.cycle === "true",
        startAt: data.startAt || "",
      });
    });
  };
  first.onerror = () => {
    console.error(`fadeshift: failed to load first image to determine aspect ratio: ${images[0]}`);
  };
  first.src = images[0];
})();"#;

/// Loader source before base64 encoding.
pub fn loader_source() -> String {
    fill(
        LOADER_TEMPLATE,
        &[("ENGINE", &engine_source()), ("IDENT", ENGINE_IDENT)],
    )
}

/// `data:` URI carrying the loader.
pub fn loader_src() -> String {
    format!(
        "data:application/javascript;base64,{}",
        BASE64_STANDARD.encode(loader_source())
    )
}

pub(crate) struct ScriptTagGenerator;

impl SnippetGenerator for ScriptTagGenerator {
    fn target(&self) -> OutputTarget {
        OutputTarget::Script
    }

    fn generate(&self, ctx: &EmitContext) -> FadeResult<String> {
        let mut tag = format!(
            "<script src=\"{}\" data-duration=\"{}\" data-milestones='{}' data-images='{}'",
            loader_src(),
            escape_attr(&ctx.duration, '"'),
            escape_attr(&json_number_array(&ctx.milestones), '\''),
            escape_attr(&json_string_array(&ctx.image_urls), '\''),
        );
        if !ctx.class_name.is_empty() {
            tag.push_str(&format!(
                " data-class=\"{}\"",
                escape_attr(&ctx.class_name, '"')
            ));
        }
        if ctx.is_cycling {
            tag.push_str(" data-cycle=\"true\"");
        }
        if !ctx.start_at.is_empty() {
            tag.push_str(&format!(
                " data-start-at=\"{}\"",
                escape_attr(&ctx.start_at, '"')
            ));
        }
        tag.push_str("></script>");
        Ok(tag)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/emit/script.rs"]
mod tests;
