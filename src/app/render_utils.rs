use eframe::egui::Color32;

/// Risk gradient: dark-to-light green below 50, a neutral grey dead zone
/// through 50–55, then light-to-dark red up to 100.
pub(super) fn risk_color(risk: f32) -> Color32 {
    if (50.0..=55.0).contains(&risk) {
        return hsl_color(0.0, 0.0, 10.0);
    }

    if risk < 50.0 {
        let intensity = ((risk.max(0.0) / 50.0) * 100.0).min(100.0);
        return hsl_color(
            120.0 - intensity * 0.5,
            70.0 - intensity * 0.3,
            30.0 + intensity * 0.4,
        );
    }

    let intensity = (((risk - 55.0) / 45.0) * 100.0).clamp(0.0, 100.0);
    hsl_color(0.0, 50.0 + intensity * 0.5, 50.0 - intensity * 0.3)
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

pub(super) fn change_color(value: f32) -> Color32 {
    if value >= 0.0 {
        Color32::from_rgb(95, 200, 125)
    } else {
        Color32::from_rgb(235, 110, 100)
    }
}

fn hsl_color(hue: f32, saturation_pct: f32, lightness_pct: f32) -> Color32 {
    let hue = hue.rem_euclid(360.0);
    let saturation = (saturation_pct / 100.0).clamp(0.0, 1.0);
    let lightness = (lightness_pct / 100.0).clamp(0.0, 1.0);

    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r1, g1, b1) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    let offset = lightness - chroma * 0.5;
    Color32::from_rgb(
        ((r1 + offset) * 255.0).round() as u8,
        ((g1 + offset) * 255.0).round() as u8,
        ((b1 + offset) * 255.0).round() as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_risk_reads_green_high_risk_reads_red() {
        let low = risk_color(5.0);
        assert!(low.g() > low.r(), "low risk should lean green: {low:?}");

        let high = risk_color(95.0);
        assert!(high.r() > high.g(), "high risk should lean red: {high:?}");
    }

    #[test]
    fn dead_zone_is_neutral_grey() {
        for risk in [50.0, 52.5, 55.0] {
            let color = risk_color(risk);
            assert_eq!(color.r(), color.g());
            assert_eq!(color.g(), color.b());
        }
    }

    #[test]
    fn out_of_range_risk_still_produces_a_color() {
        // Values beyond the score domain clamp inside the HSL helper
        // instead of wrapping into unrelated hues.
        let above = risk_color(140.0);
        assert!(above.r() > above.g());
        let below = risk_color(-10.0);
        assert!(below.g() > below.r());
    }
}
