use eframe::egui::{self, Slider, Ui};

use crate::market::RANGE_LABELS;
use crate::sim::SimConfig;

use super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Filters");
        ui.add_space(6.0);

        let mut range_changed = false;
        egui::ComboBox::from_label("Rank range")
            .selected_text(self.range_label.clone())
            .show_ui(ui, |ui| {
                for label in RANGE_LABELS {
                    if ui
                        .selectable_value(&mut self.range_label, label.to_owned(), label)
                        .changed()
                    {
                        range_changed = true;
                    }
                }
            });

        ui.add_space(6.0);
        let mut filters_changed = false;
        filters_changed |= ui
            .checkbox(&mut self.filters.skip_traps, "Skip potential traps")
            .changed();
        filters_changed |= ui
            .checkbox(&mut self.filters.avoid_hype, "Avoid overhyped tokens")
            .changed();
        filters_changed |= ui
            .checkbox(&mut self.filters.market_cap_guard, "Market cap guard")
            .changed();
        ui.small("Hides assets whose warnings match the trap, hype, or failed-cycle heuristics.");

        if range_changed || filters_changed {
            self.rebuild_visible();
        }

        ui.add_space(10.0);
        ui.label("Search");
        ui.add(egui::TextEdit::singleline(&mut self.search).hint_text("Search Crypto..."));
        ui.small("Matching bubbles stay lit; the rest dim.");

        ui.add_space(12.0);
        ui.separator();

        egui::CollapsingHeader::new("Simulation tuning")
            .default_open(false)
            .show(ui, |ui| {
                let mut tuned = false;
                tuned |= ui
                    .add(
                        Slider::new(&mut self.sim_config.spread_strength, 0.0..=0.3)
                            .text("horizontal spread"),
                    )
                    .changed();
                tuned |= ui
                    .add(Slider::new(&mut self.sim_config.band_strength, 0.05..=1.0).text("band pull"))
                    .changed();
                tuned |= ui
                    .add(
                        Slider::new(&mut self.sim_config.collide_strength, 0.0..=2.0)
                            .text("collision push"),
                    )
                    .changed();
                tuned |= ui
                    .add(
                        Slider::new(&mut self.sim_config.collide_margin, 0.0..=12.0)
                            .text("collision margin"),
                    )
                    .changed();
                tuned |= ui
                    .add(
                        Slider::new(&mut self.sim_config.charge_strength, -120.0..=0.0)
                            .text("charge"),
                    )
                    .changed();
                tuned |= ui
                    .add(
                        Slider::new(&mut self.sim_config.alpha_decay, 0.005..=0.1)
                            .text("alpha decay"),
                    )
                    .changed();
                tuned |= ui
                    .add(Slider::new(&mut self.sim_config.friction, 0.05..=0.9).text("friction"))
                    .changed();
                if tuned {
                    self.sim.reheat();
                }

                ui.add_space(4.0);
                ui.label(format!("alpha: {:.3}", self.sim.alpha()));
                ui.horizontal(|ui| {
                    if ui.button("Reset tuning").clicked() {
                        self.sim_config = SimConfig::default();
                        self.sim.reheat();
                    }
                    if ui.button("Restart layout").clicked() {
                        self.rebuild_visible();
                    }
                });
            });
    }
}
