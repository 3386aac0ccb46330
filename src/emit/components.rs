//! Single-file component exports for React, Vue and Svelte.
//!
//! Each component takes `images`, `duration`, `milestones`, `className`, `isCycling` and
//! `startAt` as inputs, defaulting to the exported configuration, and drives its `<img>`
//! stack with the shared engine.

use crate::config::model::OutputTarget;
use crate::emit::generator::{EmitContext, SnippetGenerator};
use crate::emit::js::{fill, js_number_array, js_string, js_string_array};
use crate::emit::runtime::{ENGINE_IDENT, engine_source};
use crate::foundation::error::FadeResult;

const REACT_TEMPLATE: &str = r#"import { useEffect, useRef, useState } from "react";

__ENGINE__

const DEFAULT_IMAGES = __IMAGES__;
const DEFAULT_MILESTONES = __MILESTONES__;

export default function CrossFade({
  images = DEFAULT_IMAGES,
  duration = __DURATION__,
  milestones = DEFAULT_MILESTONES,
  className = __CLASS__,
  isCycling = __CYCLING__,
  startAt = __START_AT__,
}) {
  const containerRef = useRef(null);
  const [aspectRatio, setAspectRatio] = useState("16 / 9");

  useEffect(() => {
    const container = containerRef.current;
    if (!container || images.length < 2) return undefined;
    const elements = Array.from(container.querySelectorAll("img"));
    let stop = null;
    let cancelled = false;
    const first = new Image();
    first.onload = () => {
      if (cancelled) return;
      setAspectRatio(`${first.naturalWidth} / ${first.naturalHeight}`);
      __IDENT__.preload(images).then(() => {
        if (cancelled) return;
        stop = __IDENT__.start(elements, { duration, milestones, isCycling, startAt });
      });
    };
    first.src = images[0];
    return () => {
      cancelled = true;
      if (stop) stop();
    };
  }, [images, duration, milestones, isCycling, startAt]);

  return (
    <div
      ref={containerRef}
      className={className}
      style={{ position: "relative", overflow: "hidden", lineHeight: 0, aspectRatio }}
    >
      {images.map((src, index) => (
        <img
          key={index}
          src={src}
          alt={`Image ${index + 1}`}
          style={{
            position: "absolute",
            top: 0,
            left: 0,
            width: "100%",
            height: "100%",
            objectFit: "cover",
            opacity: index === 0 ? 1 : 0,
          }}
        />
      ))}
    </div>
  );
}
"#;

const VUE_TEMPLATE: &str = r#"<script setup>
import { computed, onBeforeUnmount, onMounted, ref } from "vue";

__ENGINE__

const props = defineProps({
  images: { type: Array, default: () => __IMAGES__ },
  duration: { type: String, default: __DURATION__ },
  milestones: { type: Array, default: () => __MILESTONES__ },
  className: { type: String, default: __CLASS__ },
  isCycling: { type: Boolean, default: __CYCLING__ },
  startAt: { type: String, default: __START_AT__ },
});

const containerRef = ref(null);
const aspectRatio = ref("16 / 9");
let stop = null;
let cancelled = false;

onMounted(() => {
  const container = containerRef.value;
  if (!container || props.images.length < 2) return;
  const elements = Array.from(container.querySelectorAll("img"));
  const first = new Image();
  first.onload = () => {
    if (cancelled) return;
    aspectRatio.value = `${first.naturalWidth} / ${first.naturalHeight}`;
    __IDENT__.preload(props.images).then(() => {
      if (cancelled) return;
      stop = __IDENT__.start(elements, {
        duration: props.duration,
        milestones: props.milestones,
        isCycling: props.isCycling,
        startAt: props.startAt,
      });
    });
  };
  first.src = props.images[0];
});

onBeforeUnmount(() => {
  cancelled = true;
  if (stop) stop();
});

const containerStyle = computed(() => ({
  position: "relative",
  overflow: "hidden",
  lineHeight: "0",
  aspectRatio: aspectRatio.value,
}));
</script>

<template>
  <div ref="containerRef" :class="className" :style="containerStyle">
    <img
      v-for="(src, index) in images"
      :key="index"
      :src="src"
      :alt="`Image ${index + 1}`"
      :style="{
        position: 'absolute',
        top: '0',
        left: '0',
        width: '100%',
        height: '100%',
        objectFit: 'cover',
        opacity: index === 0 ? 1 : 0,
      }"
    />
  </div>
</template>
"#;

const SVELTE_TEMPLATE: &str = r#"<script>
  import { onDestroy, onMount } from "svelte";

__ENGINE__

  export let images = __IMAGES__;
  export let duration = __DURATION__;
  export let milestones = __MILESTONES__;
  export let className = __CLASS__;
  export let isCycling = __CYCLING__;
  export let startAt = __START_AT__;

  let container;
  let aspectRatio = "16 / 9";
  let stop = null;
  let cancelled = false;

  onMount(() => {
    if (!container || images.length < 2) return;
    const elements = Array.from(container.querySelectorAll("img"));
    const first = new Image();
    first.onload = () => {
      if (cancelled) return;
      aspectRatio = `${first.naturalWidth} / ${first.naturalHeight}`;
      __IDENT__.preload(images).then(() => {
        if (cancelled) return;
        stop = __IDENT__.start(elements, { duration, milestones, isCycling, startAt });
      });
    };
    first.src = images[0];
  });

  onDestroy(() => {
    cancelled = true;
    if (stop) stop();
  });
</script>

<div
  bind:this={container}
  class={className}
  style="position: relative; overflow: hidden; line-height: 0; aspect-ratio: {aspectRatio};"
>
  {#each images as src, index}
    <img
      {src}
      alt={`Image ${index + 1}`}
      style="position: absolute; top: 0; left: 0; width: 100%; height: 100%; object-fit: cover; opacity: {index === 0 ? 1 : 0};"
    />
  {/each}
</div>
"#;

fn render(template: &str, ctx: &EmitContext) -> String {
    let engine = engine_source();
    let images = js_string_array(&ctx.image_urls);
    let milestones = js_number_array(&ctx.milestones);
    let duration = js_string(&ctx.duration);
    let class_name = js_string(&ctx.class_name);
    let start_at = js_string(&ctx.start_at);
    let cycling = if ctx.is_cycling { "true" } else { "false" };
    fill(
        template,
        &[
            ("ENGINE", &engine),
            ("IDENT", ENGINE_IDENT),
            ("IMAGES", &images),
            ("MILESTONES", &milestones),
            ("DURATION", &duration),
            ("CLASS", &class_name),
            ("CYCLING", cycling),
            ("START_AT", &start_at),
        ],
    )
}

pub(crate) struct ReactGenerator;

impl SnippetGenerator for ReactGenerator {
    fn target(&self) -> OutputTarget {
        OutputTarget::React
    }

    fn generate(&self, ctx: &EmitContext) -> FadeResult<String> {
        Ok(render(REACT_TEMPLATE, ctx))
    }
}

pub(crate) struct VueGenerator;

impl SnippetGenerator for VueGenerator {
    fn target(&self) -> OutputTarget {
        OutputTarget::Vue
    }

    fn generate(&self, ctx: &EmitContext) -> FadeResult<String> {
        Ok(render(VUE_TEMPLATE, ctx))
    }
}

pub(crate) struct SvelteGenerator;

impl SnippetGenerator for SvelteGenerator {
    fn target(&self) -> OutputTarget {
        OutputTarget::Svelte
    }

    fn generate(&self, ctx: &EmitContext) -> FadeResult<String> {
        Ok(render(SVELTE_TEMPLATE, ctx))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/emit/components.rs"]
mod tests;
