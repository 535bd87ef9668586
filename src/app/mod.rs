use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use eframe::egui::{self, Context};

use crate::market::{AssetRecord, Snapshot, WarningFilters, fetch_snapshot};
use crate::sim::{SimConfig, Simulation, ViewportBounds};

mod chart;
mod controls;
mod details;
mod panels;
mod render_utils;

pub struct CoinRiskApp {
    api_url: String,
    refresh_interval: Duration,
    state: AppState,
    refresh_rx: Option<Receiver<Result<Snapshot, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<Snapshot, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    snapshot: Snapshot,
    visible: Vec<AssetRecord>,
    range_label: String,
    filters: WarningFilters,
    search: String,
    selected: Option<String>,
    timeframe: Timeframe,
    side_collapsed: bool,
    sim: Simulation,
    sim_config: SimConfig,
    bounds: ViewportBounds,
    price_history: HashMap<String, VecDeque<PricePoint>>,
    last_refresh: Instant,
    refresh_error: Option<String>,
    hovered: Option<usize>,
    search_match_cache: Option<SearchMatchCache>,
}

#[derive(Clone, Copy)]
struct PricePoint {
    at: Instant,
    price: f64,
}

struct SearchMatchCache {
    query: String,
    epoch: u64,
    matches: HashSet<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Timeframe {
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Timeframe {
    const ALL: [Timeframe; 5] = [
        Timeframe::Hour,
        Timeframe::Day,
        Timeframe::Week,
        Timeframe::Month,
        Timeframe::Year,
    ];

    fn label(self) -> &'static str {
        match self {
            Timeframe::Hour => "Hour",
            Timeframe::Day => "Day",
            Timeframe::Week => "Week",
            Timeframe::Month => "Month",
            Timeframe::Year => "Year",
        }
    }

    fn window(self) -> Duration {
        match self {
            Timeframe::Hour => Duration::from_secs(60 * 60),
            Timeframe::Day => Duration::from_secs(24 * 60 * 60),
            Timeframe::Week => Duration::from_secs(7 * 24 * 60 * 60),
            Timeframe::Month => Duration::from_secs(30 * 24 * 60 * 60),
            Timeframe::Year => Duration::from_secs(365 * 24 * 60 * 60),
        }
    }
}

impl CoinRiskApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, api_url: String, refresh_secs: u64) -> Self {
        let state = Self::start_load(api_url.clone());
        Self {
            api_url,
            refresh_interval: Duration::from_secs(refresh_secs.max(5)),
            state,
            refresh_rx: None,
        }
    }

    fn spawn_fetch(api_url: String) -> Receiver<Result<Snapshot, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = fetch_snapshot(&api_url).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(api_url: String) -> AppState {
        AppState::Loading {
            rx: Self::spawn_fetch(api_url),
        }
    }
}

impl eframe::App for CoinRiskApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(match result {
                        Ok(snapshot) => AppState::Ready(Box::new(ViewModel::new(snapshot))),
                        Err(error) => AppState::Error(error),
                    });
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading market risk snapshot...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
                ctx.request_repaint_after(Duration::from_millis(150));
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load market risk snapshot");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.api_url.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut refresh_requested = false;
                let is_refreshing = self.refresh_rx.is_some();
                model.show(ctx, &mut refresh_requested, is_refreshing);

                let refresh_due = model.last_refresh.elapsed() >= self.refresh_interval;
                if (refresh_requested || refresh_due) && self.refresh_rx.is_none() {
                    self.refresh_rx = Some(Self::spawn_fetch(self.api_url.clone()));
                }

                if let Some(rx) = self.refresh_rx.take() {
                    match rx.try_recv() {
                        Ok(Ok(snapshot)) => model.apply_snapshot(snapshot),
                        Ok(Err(error)) => model.note_refresh_failure(error),
                        Err(TryRecvError::Empty) => {
                            self.refresh_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            model.note_refresh_failure(
                                "background fetch worker disconnected".to_owned(),
                            );
                        }
                    }
                }

                ctx.request_repaint_after(Duration::from_secs(1));
            }
        }

        if let Some(next_state) = transition {
            self.refresh_rx = None;
            self.state = next_state;
        }
    }
}
