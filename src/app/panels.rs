use std::time::Instant;

use eframe::egui::{self, Align, Color32, Context, Layout};

use crate::market::{DEFAULT_RANGE, Snapshot, visible_records};

use super::{PricePoint, Timeframe, ViewModel};
use crate::sim::{SimConfig, Simulation, ViewportBounds};

impl ViewModel {
    const PRICE_HISTORY_CAP: usize = 8640;

    pub(in crate::app) fn new(snapshot: Snapshot) -> Self {
        let mut model = Self {
            snapshot: Snapshot::default(),
            visible: Vec::new(),
            range_label: DEFAULT_RANGE.to_owned(),
            filters: Default::default(),
            search: String::new(),
            selected: None,
            timeframe: Timeframe::Hour,
            side_collapsed: false,
            sim: Simulation::new(),
            sim_config: SimConfig::default(),
            bounds: ViewportBounds::default(),
            price_history: Default::default(),
            last_refresh: Instant::now(),
            refresh_error: None,
            hovered: None,
            search_match_cache: None,
        };
        model.apply_snapshot(snapshot);
        model
    }

    /// Applies a freshly-fetched snapshot: appends one price sample per
    /// asset to the observed history, swaps the snapshot in, and
    /// rebuilds the visible set (which restarts the simulation).
    pub(in crate::app) fn apply_snapshot(&mut self, snapshot: Snapshot) {
        let now = Instant::now();
        for record in &snapshot.records {
            let history = self
                .price_history
                .entry(record.symbol.clone())
                .or_default();
            history.push_back(PricePoint {
                at: now,
                price: record.price,
            });
            while history.len() > Self::PRICE_HISTORY_CAP {
                history.pop_front();
            }
        }

        self.snapshot = snapshot;
        self.last_refresh = Instant::now();
        self.refresh_error = None;
        self.rebuild_visible();
    }

    pub(in crate::app) fn note_refresh_failure(&mut self, error: String) {
        self.refresh_error = Some(error);
        self.last_refresh = Instant::now();
    }

    /// Re-derives the visible set from snapshot + range + filters and
    /// hard-restarts the simulation over it. Any state keyed to the old
    /// bubble arena is dropped here.
    pub(in crate::app) fn rebuild_visible(&mut self) {
        self.visible = visible_records(&self.snapshot.records, &self.range_label, self.filters);
        self.sim.restart(&self.visible, self.bounds);
        self.search_match_cache = None;
        self.hovered = None;
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        refresh_requested: &mut bool,
        is_refreshing: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("coinrisk");
                    ui.separator();
                    ui.label(format!("assets: {}", self.snapshot.len()));
                    ui.label(format!("visible: {}", self.visible.len()));
                    ui.label(format!(
                        "updated {}s ago",
                        self.last_refresh.elapsed().as_secs()
                    ));
                    let refresh_button =
                        ui.add_enabled(!is_refreshing, egui::Button::new("Refresh now"));
                    if refresh_button.clicked() {
                        *refresh_requested = true;
                    }
                    let toggle_text = if self.side_collapsed {
                        "Show side panel"
                    } else {
                        "Hide side panel"
                    };
                    if ui.button(toggle_text).clicked() {
                        self.side_collapsed = !self.side_collapsed;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if is_refreshing {
                            ui.spinner();
                        }
                        if let Some(error) = &self.refresh_error {
                            ui.colored_label(
                                Color32::from_rgb(235, 110, 100),
                                format!("refresh failed: {error}"),
                            );
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        if !self.side_collapsed {
            egui::SidePanel::right("details")
                .resizable(true)
                .default_width(340.0)
                .show(ctx, |ui| self.draw_details(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_chart(ui);
        });
    }

    pub(in crate::app) fn set_selected(&mut self, selected: Option<String>) {
        if self.selected == selected {
            return;
        }
        self.selected = selected;
    }
}
