use std::collections::HashSet;

use eframe::egui::{Align2, Color32, FontId, Sense, Stroke, Ui, pos2, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::sim::{ViewportBounds, clamp_center};

use super::render_utils::{dim_color, risk_color};
use super::{SearchMatchCache, ViewModel};

const COLLAPSED_MARGIN: f32 = 24.0;
const EXPANDED_MARGIN: f32 = 48.0;
const LABEL_MIN_RADIUS: f32 = 14.0;
const RISK_LEVELS: [u32; 6] = [100, 80, 60, 40, 20, 0];

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl ViewModel {
    pub(in crate::app) fn draw_chart(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click());
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, Color32::from_rgb(10, 12, 16));

        if rect.width() < 80.0 || rect.height() < 40.0 {
            return;
        }

        for level in RISK_LEVELS {
            let y = rect.top() + rect.height() * (1.0 - level as f32 / 100.0);
            let y = y.clamp(rect.top() + 8.0, rect.bottom() - 8.0);
            painter.line_segment(
                [pos2(rect.left() + 34.0, y), pos2(rect.right(), y)],
                Stroke::new(1.0, Color32::from_rgba_unmultiplied(255, 255, 255, 24)),
            );
            painter.text(
                pos2(rect.left() + 6.0, y),
                Align2::LEFT_CENTER,
                format!("{level} -"),
                FontId::proportional(10.0),
                Color32::from_gray(180),
            );
        }
        painter.text(
            pos2(rect.left() + 44.0, rect.top() + 8.0),
            Align2::LEFT_TOP,
            "Risk Levels",
            FontId::proportional(14.0),
            Color32::WHITE,
        );
        painter.text(
            pos2(rect.right() - 12.0, rect.top() + 8.0),
            Align2::RIGHT_TOP,
            "OVERVALUED",
            FontId::proportional(12.0),
            Color32::from_gray(220),
        );
        painter.text(
            pos2(rect.right() - 12.0, rect.bottom() - 8.0),
            Align2::RIGHT_BOTTOM,
            "UNDERVALUED",
            FontId::proportional(12.0),
            Color32::from_gray(220),
        );

        // Viewport controller: bounds derive from the measured rect
        // minus the side-panel margin; any real change restarts the
        // simulation. Unmeasured (zero) extents are withheld entirely.
        let margin = if self.side_collapsed {
            COLLAPSED_MARGIN
        } else {
            EXPANDED_MARGIN
        };
        let bounds = ViewportBounds::new((rect.width() - margin).max(0.0), rect.height());
        if bounds.is_measurable() && !bounds.approx_eq(self.bounds) {
            self.bounds = bounds;
            self.rebuild_visible();
        }

        if self.visible.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No data available for the selected filters",
                FontId::proportional(15.0),
                Color32::from_gray(200),
            );
            return;
        }

        if self.sim.is_idle() {
            return;
        }

        if self.sim.step(&self.sim_config) {
            ui.ctx().request_repaint();
        }

        self.refresh_search_matches();

        let origin = rect.left_top() + vec2(margin * 0.5, 0.0);
        let chart_bounds = self.bounds;
        let pointer = ui.input(|input| input.pointer.hover_pos());

        self.hovered = pointer.and_then(|pointer| {
            self.sim
                .bubbles()
                .iter()
                .enumerate()
                .filter_map(|(index, bubble)| {
                    let center = origin + clamp_center(bubble.pos, bubble.radius, chart_bounds);
                    let distance = center.distance(pointer);
                    (distance <= bubble.radius).then_some((index, distance))
                })
                .min_by(|a, b| a.1.total_cmp(&b.1))
                .map(|(index, _)| index)
        });

        if response.clicked()
            && let Some(index) = self.hovered
        {
            let symbol = self
                .sim
                .bubbles()
                .get(index)
                .map(|bubble| bubble.symbol.clone());
            self.set_selected(symbol);
        }

        let matches = self
            .search_match_cache
            .as_ref()
            .map(|cache| &cache.matches);
        let selected_index = self
            .selected
            .as_deref()
            .and_then(|symbol| self.sim.bubble_index(symbol));

        for (index, bubble) in self.sim.bubbles().iter().enumerate() {
            let Some(record) = self.visible.get(index) else {
                continue;
            };

            let center = origin + clamp_center(bubble.pos, bubble.radius, chart_bounds);
            let dimmed = matches.is_some_and(|matches| !matches.contains(&index));
            let mut fill = risk_color(record.risk);
            if dimmed {
                fill = dim_color(fill, 0.25);
            }
            painter.circle_filled(center, bubble.radius, fill);

            if Some(index) == selected_index {
                painter.circle_stroke(
                    center,
                    bubble.radius + 2.0,
                    Stroke::new(2.0, Color32::from_rgb(250, 200, 90)),
                );
            } else if Some(index) == self.hovered {
                painter.circle_stroke(center, bubble.radius + 1.0, Stroke::new(1.5, Color32::WHITE));
            }

            if !dimmed && bubble.radius >= LABEL_MIN_RADIUS {
                painter.text(
                    center - vec2(0.0, 6.0),
                    Align2::CENTER_CENTER,
                    &record.symbol,
                    FontId::proportional(10.0),
                    Color32::WHITE,
                );
                painter.text(
                    center + vec2(0.0, 6.0),
                    Align2::CENTER_CENTER,
                    format!("{:.1}%", record.risk),
                    FontId::proportional(10.0),
                    Color32::WHITE,
                );
            }
        }
    }

    /// Fuzzy-matches the search query against visible symbols, cached by
    /// (query, simulation epoch) so a settled chart costs nothing.
    fn refresh_search_matches(&mut self) {
        let query = self.search.trim();
        if query.is_empty() {
            self.search_match_cache = None;
            return;
        }

        let epoch = self.sim.epoch();
        if let Some(cache) = &self.search_match_cache
            && cache.epoch == epoch
            && cache.query == query
        {
            return;
        }

        let matcher = SkimMatcherV2::default();
        let matches = self
            .visible
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                fuzzy_match_score(&matcher, &record.symbol, query).map(|_| index)
            })
            .collect::<HashSet<_>>();

        self.search_match_cache = Some(SearchMatchCache {
            query: query.to_owned(),
            epoch,
            matches,
        });
    }
}
