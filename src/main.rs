use eframe::{NativeOptions, egui};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use query_builder::{App, BuilderConfig};

fn main() -> eframe::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 680.0])
            .with_min_inner_size([720.0, 480.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "Query Builder",
        native_options,
        Box::new(|cc| {
            let app = App::new(cc, BuilderConfig::default())?;
            Ok(Box::new(app) as Box<dyn eframe::App>)
        }),
    )
}
