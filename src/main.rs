mod app;
mod market;
mod sim;
mod util;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Risk feed endpoint returning a symbol-keyed JSON snapshot.
    #[arg(long, default_value = "http://3.75.231.25/dex_risks")]
    api_url: String,

    /// Seconds between automatic snapshot refreshes.
    #[arg(long, default_value_t = 60)]
    refresh_secs: u64,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 840.0]),
        ..Default::default()
    };

    eframe::run_native(
        "coinrisk",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::CoinRiskApp::new(
                cc,
                args.api_url.clone(),
                args.refresh_secs,
            )))
        }),
    )
}
