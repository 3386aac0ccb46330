//! Browser-side engine shared by every export target.
//!
//! One JavaScript source, rendered from the same constants the Rust engine uses, is embedded
//! verbatim in the script loader and in each component. The function bodies follow
//! [`crate::animation`] operation for operation so that preview and export sample identical
//! positions for identical inputs.

use crate::animation::resolve::BOUNDARY_EPSILON;
use crate::timing::duration::DurationUnit;

/// Global name the engine object is bound to in generated code.
pub const ENGINE_IDENT: &str = "fadeEngine";

const ENGINE_TEMPLATE: &str = r#"const __IDENT__ = (function () {
  "use strict";
  const UNIT_MS = { s: __UNIT_S__, m: __UNIT_M__, h: __UNIT_H__, d: __UNIT_D__ };
  const BOUNDARY_EPSILON = __EPSILON__;

  function parseDuration(text) {
    const match = /^\s*(\d+(?:\.\d+)?)\s*([smhd])\s*$/i.exec(String(text));
    if (!match) return null;
    return parseFloat(match[1]) * UNIT_MS[match[2].toLowerCase()];
  }

  function startOffset(startAt, totalMs) {
    if (!startAt) return 0;
    const percent = /^(\d+(?:\.\d+)?)%?$/.exec(startAt);
    if (percent) return (parseFloat(percent[1]) / 100) * totalMs;
    const ms = parseDuration(startAt);
    return ms === null ? 0 : ms;
  }

  function buildKeyframes(milestones, imageCount) {
    if (imageCount < 2 || milestones.length === 0) return [[0, 0], [100, 100]];
    const keys = [[0, 0]];
    for (let i = 0; i < milestones.length; i++) {
      keys.push([milestones[i], ((i + 1) / milestones.length) * 100]);
    }
    if (milestones[milestones.length - 1] < 100) keys.push([100, 100]);
    return keys;
  }

  function sample(keys, t) {
    const last = keys[keys.length - 1];
    let start = keys[0];
    let end = keys[1];
    for (let i = 0; i < keys.length - 1; i++) {
      if (t >= keys[i][0] && t < keys[i + 1][0]) {
        start = keys[i];
        end = keys[i + 1];
        break;
      }
    }
    if (t >= last[0]) {
      start = last;
      end = last;
    }
    const segment = end[0] - start[0];
    const progress = segment > 0 ? (t - start[0]) / segment : 0;
    return start[1] + (end[1] - start[1]) * progress;
  }

  function timePercent(elapsed, totalMs) {
    return ((elapsed % totalMs) / totalMs) * 100;
  }

  function wrap(index, count) {
    return ((index % count) + count) % count;
  }

  function resolve(position, imageCount, cycling) {
    if (imageCount < 2) return [0, 0, 0];
    const segments = cycling ? imageCount : imageCount - 1;
    const raw = (position / 100) * segments;
    if (!cycling && (position >= 100 || raw >= imageCount - 1 - BOUNDARY_EPSILON)) {
      return [imageCount - 1, imageCount - 1, 0];
    }
    const lower = Math.floor(raw);
    return [wrap(lower, imageCount), wrap(lower + 1, imageCount), raw - lower];
  }

  function render(images, state) {
    for (const img of images) {
      img.style.opacity = "0";
      img.style.zIndex = "0";
    }
    const lower = images[state[0]];
    if (lower) {
      lower.style.opacity = "1";
      lower.style.zIndex = "1";
    }
    const upper = images[state[1]];
    if (upper && state[0] !== state[1]) {
      upper.style.opacity = String(state[2]);
      upper.style.zIndex = "2";
    }
  }

  function preload(urls) {
    return Promise.all(urls.map((src) => new Promise((done) => {
      const img = new Image();
      img.onload = img.onerror = done;
      img.src = src;
    })));
  }

  function start(images, options) {
    const totalMs = parseDuration(options.duration);
    if (totalMs === null || !(totalMs > 0)) {
      console.error(`fadeshift: invalid duration "${options.duration}". Use 's', 'm', 'h', or 'd'.`);
      return () => {};
    }
    const count = images.length;
    const keys = buildKeyframes(options.milestones, count);
    const offset = startOffset(options.startAt || "", totalMs);
    const cycling = Boolean(options.isCycling);
    let origin = null;
    let handle = 0;
    const tick = (timestamp) => {
      if (origin === null) origin = timestamp - offset;
      const position = sample(keys, timePercent(timestamp - origin, totalMs));
      render(images, resolve(position, count, cycling));
      handle = requestAnimationFrame(tick);
    };
    handle = requestAnimationFrame(tick);
    return () => cancelAnimationFrame(handle);
  }

  return { parseDuration, startOffset, buildKeyframes, sample, timePercent, resolve, render, preload, start };
})();"#;

/// The engine source, exactly as embedded in every target.
pub fn engine_source() -> String {
    ENGINE_TEMPLATE
        .replace("__IDENT__", ENGINE_IDENT)
        .replace("__UNIT_S__", &DurationUnit::Seconds.millis().to_string())
        .replace("__UNIT_M__", &DurationUnit::Minutes.millis().to_string())
        .replace("__UNIT_H__", &DurationUnit::Hours.millis().to_string())
        .replace("__UNIT_D__", &DurationUnit::Days.millis().to_string())
        .replace("__EPSILON__", &format!("{BOUNDARY_EPSILON:e}"))
}

#[cfg(test)]
#[path = "../../tests/unit/emit/runtime.rs"]
mod tests;
