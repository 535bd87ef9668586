mod bands;
mod forces;

use std::collections::HashMap;

use eframe::egui::{Vec2, vec2};

use crate::market::AssetRecord;
use crate::util::stable_pair;

pub use bands::{NARROW_VIEWPORT_WIDTH, band_y, bubble_radius};

/// Tunable physics surface. Defaults are the one consistent constant set
/// the dashboard ships with; every value can be adjusted live from the
/// controls panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimConfig {
    pub spread_strength: f32,
    pub band_strength: f32,
    pub collide_strength: f32,
    pub collide_margin: f32,
    pub charge_strength: f32,
    pub alpha_decay: f32,
    pub friction: f32,
    pub alpha_min: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            spread_strength: 0.08,
            band_strength: 0.5,
            collide_strength: 0.8,
            collide_margin: 3.0,
            charge_strength: -40.0,
            alpha_decay: 0.02,
            friction: 0.3,
            alpha_min: 1e-3,
        }
    }
}

/// Chart-area size in points. Zero or negative extents mean the
/// container has not been measured yet.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportBounds {
    pub width: f32,
    pub height: f32,
}

impl ViewportBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn is_measurable(self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn approx_eq(self, other: Self) -> bool {
        (self.width - other.width).abs() <= 0.5 && (self.height - other.height).abs() <= 0.5
    }
}

/// One simulated asset. `radius` and `band_y` are fixed at seeding;
/// `pos`/`vel` are the only mutable tick state.
pub struct Bubble {
    pub symbol: String,
    pub pos: Vec2,
    vel: Vec2,
    pub radius: f32,
    pub band_y: f32,
}

fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    if max < min {
        (min + max) * 0.5
    } else {
        value.clamp(min, max)
    }
}

/// Keeps a bubble's full circle inside the viewport. Clamping, not
/// reflection: a bubble pressed against the edge simply stops there.
pub fn clamp_center(pos: Vec2, radius: f32, bounds: ViewportBounds) -> Vec2 {
    vec2(
        clamp_axis(pos.x, radius, bounds.width - radius),
        clamp_axis(pos.y, radius, bounds.height - radius),
    )
}

/// Force-relaxed bubble layout over the currently-visible asset set.
///
/// The arena is owned exclusively here: every visible-set or viewport
/// change discards and reseeds all bubbles (no incremental diffing), and
/// the epoch counter invalidates anything keyed to a previous arena.
/// With no bubbles, or before the viewport is measurable, the engine is
/// idle and ticking is a no-op.
pub struct Simulation {
    bubbles: Vec<Bubble>,
    index_by_symbol: HashMap<String, usize>,
    bounds: ViewportBounds,
    alpha: f32,
    epoch: u64,
    scratch: Vec<Vec2>,
}

impl Simulation {
    pub fn new() -> Self {
        Self {
            bubbles: Vec::new(),
            index_by_symbol: HashMap::new(),
            bounds: ViewportBounds::default(),
            alpha: 0.0,
            epoch: 0,
            scratch: Vec::new(),
        }
    }

    /// Discards the whole arena and reseeds it from `records`: x at the
    /// viewport center plus a per-symbol deterministic jitter across the
    /// middle 60% of the width, y at the risk band target, zero
    /// velocity, full energy. Empty input or unmeasured bounds leave the
    /// engine idle.
    pub fn restart(&mut self, records: &[AssetRecord], bounds: ViewportBounds) {
        self.epoch = self.epoch.wrapping_add(1);
        self.bubbles.clear();
        self.index_by_symbol.clear();
        self.bounds = bounds;
        self.alpha = 0.0;

        if records.is_empty() || !bounds.is_measurable() {
            return;
        }

        self.bubbles.reserve(records.len());
        for record in records {
            let radius = bubble_radius(record.bubble_size, bounds.width);
            let band = band_y(record.risk, bounds.height);
            let (jitter, _) = stable_pair(&record.symbol);
            let seed_x = bounds.width * 0.5 + jitter * bounds.width * 0.3;
            let pos = clamp_center(vec2(seed_x, band), radius, bounds);

            let index = self.bubbles.len();
            self.bubbles.push(Bubble {
                symbol: record.symbol.clone(),
                pos,
                vel: Vec2::ZERO,
                radius,
                band_y: band,
            });
            self.index_by_symbol.insert(record.symbol.clone(), index);
        }

        self.alpha = 1.0;
    }

    pub fn is_idle(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn bubble_index(&self, symbol: &str) -> Option<usize> {
        self.index_by_symbol.get(symbol).copied()
    }

    /// Restores full energy without reseeding, so tuning changes become
    /// visible on a settled layout.
    pub fn reheat(&mut self) {
        if !self.bubbles.is_empty() {
            self.alpha = 1.0;
        }
    }

    /// One relaxation tick. The four constraints accumulate into a
    /// scratch buffer and apply simultaneously: velocity picks up the
    /// alpha-scaled force sum, friction damps it, positions integrate
    /// and clamp to the viewport. Returns whether anything can still be
    /// moving; once alpha decays below `alpha_min` the layout is treated
    /// as static.
    pub fn step(&mut self, config: &SimConfig) -> bool {
        if self.bubbles.is_empty() || self.alpha < config.alpha_min {
            return false;
        }

        let count = self.bubbles.len();
        self.scratch.resize(count, Vec2::ZERO);
        self.scratch.fill(Vec2::ZERO);

        forces::accumulate_spread(
            &self.bubbles,
            self.bounds.width,
            config.spread_strength,
            &mut self.scratch,
        );
        forces::accumulate_band_pull(&self.bubbles, config.band_strength, &mut self.scratch);
        forces::accumulate_charge(&self.bubbles, config.charge_strength, &mut self.scratch);
        forces::accumulate_collisions(
            &self.bubbles,
            config.collide_strength,
            config.collide_margin,
            &mut self.scratch,
        );

        let keep = 1.0 - config.friction.clamp(0.0, 0.95);
        for (bubble, force) in self.bubbles.iter_mut().zip(self.scratch.iter()) {
            bubble.vel = (bubble.vel + *force * self.alpha) * keep;
            bubble.pos += bubble.vel;
            bubble.pos = clamp_center(bubble.pos, bubble.radius, self.bounds);
        }

        self.alpha *= 1.0 - config.alpha_decay.clamp(0.0, 1.0);
        true
    }
}
