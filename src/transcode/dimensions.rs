/// Bounding box for a transcoded image.
///
/// A missing side places no constraint on that axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TranscodeBounds {
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
}

impl TranscodeBounds {
    /// Bound both sides.
    pub fn new(max_width: u32, max_height: u32) -> Self {
        Self {
            max_width: Some(max_width),
            max_height: Some(max_height),
        }
    }

    /// No bounds: images pass through at their native size.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Whether either side is bounded.
    pub fn is_bounded(&self) -> bool {
        self.max_width.is_some() || self.max_height.is_some()
    }
}

/// Largest scale factor that fits `src` inside `bounds`, capped at 1.0.
fn scale_factor(src_w: u32, src_h: u32, bounds: TranscodeBounds) -> f64 {
    let scale_w = bounds
        .max_width
        .map(|w| w as f64 / src_w as f64)
        .unwrap_or(1.0);
    let scale_h = bounds
        .max_height
        .map(|h| h as f64 / src_h as f64)
        .unwrap_or(1.0);

    scale_w.min(scale_h).min(1.0)
}

/// Compute the output dimensions for an image of `src_w × src_h` that must
/// fit inside `bounds`.
///
/// Aspect ratio is preserved and images are never enlarged. Each side is at
/// least one pixel.
pub fn fit_within(src_w: u32, src_h: u32, bounds: TranscodeBounds) -> (u32, u32) {
    if src_w == 0 || src_h == 0 {
        return (src_w, src_h);
    }

    let scale = scale_factor(src_w, src_h, bounds);
    if scale >= 1.0 {
        return (src_w, src_h);
    }

    let new_w = (src_w as f64 * scale).round() as u32;
    let new_h = (src_h as f64 * scale).round() as u32;

    (new_w.clamp(1, src_w), new_h.clamp(1, src_h))
}
