use eframe::egui::{Vec2, vec2};

use super::Bubble;

fn separation_direction(delta: Vec2, distance: f32, from: usize, to: usize) -> Vec2 {
    if distance > 0.0001 {
        delta / distance
    } else {
        let angle =
            ((from as f32) * 0.618_034 + (to as f32) * 0.414_214) * std::f32::consts::TAU;
        vec2(angle.cos(), angle.sin())
    }
}

/// Fans bubbles left-to-right by index order: each is pulled toward an
/// x target spread across the middle 40% of the viewport. Weak on
/// purpose — it breaks up initial clustering without fighting the
/// collision pass.
pub(super) fn accumulate_spread(
    bubbles: &[Bubble],
    viewport_width: f32,
    strength: f32,
    forces: &mut [Vec2],
) {
    let count = bubbles.len() as f32;
    for (index, bubble) in bubbles.iter().enumerate() {
        let offset = ((index as f32 / count) - 0.5) * viewport_width * 0.4;
        let target = viewport_width * 0.5 + offset;
        forces[index].x += (target - bubble.pos.x) * strength;
    }
}

/// Dominant vertical constraint: every bubble is pulled toward its risk
/// band's lane.
pub(super) fn accumulate_band_pull(bubbles: &[Bubble], strength: f32, forces: &mut [Vec2]) {
    for (index, bubble) in bubbles.iter().enumerate() {
        forces[index].y += (bubble.band_y - bubble.pos.y) * strength;
    }
}

/// Weak all-pairs repulsion with inverse-distance falloff. Negative
/// strength repels; this is what keeps coincident bubbles from locking
/// together.
pub(super) fn accumulate_charge(bubbles: &[Bubble], strength: f32, forces: &mut [Vec2]) {
    let count = bubbles.len();
    for i in 0..count {
        for j in (i + 1)..count {
            let delta = bubbles[j].pos - bubbles[i].pos;
            let distance_sq = delta.length_sq().max(1.0);
            let weight = strength / distance_sq;

            forces[i] += delta * weight;
            forces[j] -= delta * weight;
        }
    }
}

/// Pairwise overlap resolution: bubbles closer than the sum of their
/// radii plus `margin` are pushed apart proportionally to the overlap
/// depth, split evenly between the pair.
pub(super) fn accumulate_collisions(
    bubbles: &[Bubble],
    strength: f32,
    margin: f32,
    forces: &mut [Vec2],
) {
    let count = bubbles.len();
    for i in 0..count {
        for j in (i + 1)..count {
            let delta = bubbles[i].pos - bubbles[j].pos;
            let distance = delta.length();
            let min_distance = bubbles[i].radius + bubbles[j].radius + margin;
            if distance >= min_distance {
                continue;
            }

            let direction = separation_direction(delta, distance, i, j);
            let push = (min_distance - distance) * strength * 0.5;
            forces[i] += direction * push;
            forces[j] -= direction * push;
        }
    }
}
