/// Viewports narrower than this get scaled-down bubbles.
pub const NARROW_VIEWPORT_WIDTH: f32 = 640.0;

const NARROW_RADIUS_SCALE: f32 = 0.7;
const MIN_RADIUS: f32 = 20.0;
const MAX_RADIUS: f32 = 30.0;
const RADIUS_SCALE: f32 = 25.0;

/// Target vertical coordinate for a risk score: one of five fixed lanes
/// with symmetric 5% padding. A step function, not a gradient — risk
/// tiers stay visually separated.
pub fn band_y(risk: f32, height: f32) -> f32 {
    let pad = height * 0.05;
    if risk >= 80.0 {
        height * 0.10 + pad
    } else if risk >= 60.0 {
        height * 0.30 + pad
    } else if risk >= 40.0 {
        height * 0.50 + pad
    } else if risk >= 20.0 {
        height * 0.70 + pad
    } else {
        height * 0.90 - pad
    }
}

pub fn bubble_radius(bubble_size: Option<f32>, viewport_width: f32) -> f32 {
    let base = match bubble_size {
        Some(size) if size > 0.0 => (size * RADIUS_SCALE).clamp(MIN_RADIUS, MAX_RADIUS),
        _ => MAX_RADIUS,
    };

    if viewport_width < NARROW_VIEWPORT_WIDTH {
        base * NARROW_RADIUS_SCALE
    } else {
        base
    }
}
