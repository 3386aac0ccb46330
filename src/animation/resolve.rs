/// Tolerance under which a bounded traversal counts as having reached the last image.
pub const BOUNDARY_EPSILON: f64 = 1e-9;

/// Which two images to draw for a blend position, and how far the upper one has faded in.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct BlendState {
    /// Image drawn at full opacity.
    pub lower_index: usize,
    /// Image drawn on top at opacity [`BlendState::fade`].
    pub upper_index: usize,
    /// Opacity of the upper image, `[0, 1)`.
    pub fade: f64,
}

/// A single image draw in painter's order.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Layer {
    /// Index into the image sequence.
    pub index: usize,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Stacking order; higher draws on top.
    pub z: u8,
}

impl BlendState {
    /// State showing only the image at `index`.
    pub const fn resting(index: usize) -> Self {
        Self {
            lower_index: index,
            upper_index: index,
            fade: 0.0,
        }
    }

    /// `true` when only one image is visible (single image, or bounded traversal at its end).
    pub fn is_resting(&self) -> bool {
        self.lower_index == self.upper_index
    }

    /// Images to draw: lower at full opacity, then upper at `fade` unless resting.
    pub fn layers(&self) -> Vec<Layer> {
        let mut out = vec![Layer {
            index: self.lower_index,
            opacity: 1.0,
            z: 1,
        }];
        if !self.is_resting() {
            out.push(Layer {
                index: self.upper_index,
                opacity: self.fade,
                z: 2,
            });
        }
        out
    }

    /// Per-image opacity for a sequence of `image_count` images; undrawn images are `0`.
    pub fn opacities(&self, image_count: usize) -> Vec<f64> {
        let mut out = vec![0.0; image_count];
        for layer in self.layers() {
            if let Some(slot) = out.get_mut(layer.index) {
                *slot = layer.opacity;
            }
        }
        out
    }
}

/// Resolve a blend position (`0..=100`) to the pair of images to draw.
///
/// Bounded traversal spans `image_count - 1` segments and clamps to the last image at
/// `100` (or within [`BOUNDARY_EPSILON`] of the last segment end), so image 1 never wraps in
/// at the end. Cycling traversal spans `image_count` segments and wraps back to the first.
pub fn resolve_position(position_percent: f64, image_count: usize, is_cycling: bool) -> BlendState {
    if image_count < 2 {
        return BlendState::resting(0);
    }

    let n = image_count as f64;
    let num_segments = if is_cycling { n } else { n - 1.0 };
    let raw = (position_percent / 100.0) * num_segments;

    if !is_cycling && (position_percent >= 100.0 || raw >= n - 1.0 - BOUNDARY_EPSILON) {
        return BlendState::resting(image_count - 1);
    }

    let lower = raw.floor();
    let fade = raw - lower;
    let lower = lower as i64;
    let count = image_count as i64;
    BlendState {
        lower_index: lower.rem_euclid(count) as usize,
        upper_index: (lower + 1).rem_euclid(count) as usize,
        fade,
    }
}

/// Human-readable description of what a blend position shows.
pub fn blend_label(position_percent: f64, image_count: usize, is_cycling: bool) -> String {
    if image_count < 2 {
        return "Image 1".to_owned();
    }
    let state = resolve_position(position_percent, image_count, is_cycling);
    if state.is_resting() || state.fade.abs() < BOUNDARY_EPSILON {
        return format!("Showing Image {}", state.lower_index + 1);
    }
    format!(
        "Merging Image {} and Image {} ({}%)",
        state.lower_index + 1,
        state.upper_index + 1,
        (state.fade * 100.0).round()
    )
}

#[cfg(test)]
#[path = "../../tests/unit/animation/resolve.rs"]
mod tests;
