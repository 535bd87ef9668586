use eframe::egui::{Align2, Color32, FontId, RichText, Sense, Stroke, Ui, vec2};

use crate::util::{format_compact, format_percent, format_price};

use super::render_utils::{change_color, risk_color};
use super::{PricePoint, Timeframe, ViewModel};

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Asset Details");
        ui.add_space(6.0);

        let Some(symbol) = self.selected.clone() else {
            ui.label("Click a bubble to inspect an asset.");
            return;
        };

        let Some(record) = self.snapshot.get(&symbol) else {
            ui.label(format!("{symbol} is no longer in the latest snapshot."));
            if ui.button("Clear selection").clicked() {
                self.set_selected(None);
            }
            return;
        };
        let record = record.clone();

        ui.horizontal(|ui| {
            ui.label(RichText::new(&record.symbol).strong().size(18.0));
            let (swatch, _) = ui.allocate_exact_size(vec2(14.0, 14.0), Sense::hover());
            ui.painter()
                .circle_filled(swatch.center(), 6.0, risk_color(record.risk));
            ui.label(format!("risk {:.1}/100", record.risk));
        });
        ui.add_space(4.0);

        ui.label(format!("Price: {}", format_price(record.price)));
        ui.label(format!("Volume: ${}", format_compact(record.volume)));

        for (label, value) in [
            ("1m", record.change_1m),
            ("2w", record.change_2w),
            ("3m", record.change_3m),
        ] {
            if let Some(value) = value {
                ui.colored_label(
                    change_color(value),
                    format!("{label} change: {}", format_percent(value)),
                );
            }
        }

        if !record.warnings.is_empty() {
            ui.add_space(4.0);
            ui.label(RichText::new("Warnings").strong());
            for warning in &record.warnings {
                ui.colored_label(Color32::from_rgb(235, 180, 90), format!("- {warning}"));
            }
        }

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.hyperlink_to(
                "CoinGecko",
                format!(
                    "https://www.coingecko.com/en/coins/{}",
                    record.symbol.to_lowercase()
                ),
            );
            ui.hyperlink_to(
                "TradingView",
                format!(
                    "https://www.tradingview.com/chart/?symbol={}USDT",
                    record.symbol
                ),
            );
            if let Some(link) = &record.moralis_link {
                ui.hyperlink_to("Moralis", link.clone());
            }
        });

        ui.separator();
        ui.label(RichText::new("Observed price history").strong());
        ui.horizontal(|ui| {
            for timeframe in Timeframe::ALL {
                ui.selectable_value(&mut self.timeframe, timeframe, timeframe.label());
            }
        });
        ui.add_space(4.0);
        self.draw_price_history(ui, &record.symbol);

        ui.add_space(8.0);
        if ui.button("Close").clicked() {
            self.set_selected(None);
        }
    }

    /// Sparkline over the price samples observed for `symbol`, windowed
    /// by the selected timeframe. History accrues one sample per
    /// applied refresh, so young sessions show a short line.
    fn draw_price_history(&self, ui: &mut Ui, symbol: &str) {
        let window = self.timeframe.window();
        let points: Vec<PricePoint> = self
            .price_history
            .get(symbol)
            .map(|history| {
                history
                    .iter()
                    .filter(|point| point.at.elapsed() <= window)
                    .copied()
                    .collect()
            })
            .unwrap_or_default();

        let desired = vec2(ui.available_width().max(120.0), 140.0);
        let (rect, _response) = ui.allocate_exact_size(desired, Sense::hover());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 4.0, Color32::from_rgb(24, 28, 34));

        if points.len() < 2 {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "Collecting price history...",
                FontId::proportional(12.0),
                Color32::from_gray(170),
            );
            return;
        }

        let mut min_price = f64::MAX;
        let mut max_price = f64::MIN;
        for point in &points {
            min_price = min_price.min(point.price);
            max_price = max_price.max(point.price);
        }
        let span = max_price - min_price;

        let inner = rect.shrink(10.0);
        let first_at = points[0].at;
        let last_at = points[points.len() - 1].at;
        let total_secs = (last_at - first_at).as_secs_f32().max(1e-6);

        let mut previous = None;
        for point in &points {
            let t = (point.at - first_at).as_secs_f32() / total_secs;
            let level = if span > 0.0 {
                ((point.price - min_price) / span) as f32
            } else {
                0.5
            };
            let screen = eframe::egui::pos2(
                inner.left() + t * inner.width(),
                inner.bottom() - level * inner.height(),
            );
            if let Some(previous) = previous {
                painter.line_segment(
                    [previous, screen],
                    Stroke::new(1.5, Color32::from_rgb(120, 140, 245)),
                );
            }
            previous = Some(screen);
        }

        painter.text(
            rect.left_top() + vec2(6.0, 4.0),
            Align2::LEFT_TOP,
            format!("${max_price:.4}"),
            FontId::proportional(11.0),
            Color32::from_rgb(95, 200, 125),
        );
        painter.text(
            rect.left_bottom() + vec2(6.0, -4.0),
            Align2::LEFT_BOTTOM,
            format!("${min_price:.4}"),
            FontId::proportional(11.0),
            Color32::from_rgb(235, 110, 100),
        );
    }
}
