mod app;
mod r2ta;
mod util;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use app::ViewerConfig;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Graph description (DOT/xdot) whose tooltips carry r2ta element identifiers
    source_file: PathBuf,

    /// Tracer executable used to render charts and extract data
    tracer_cmd: PathBuf,

    /// Trace data directory handed to the tracer
    data_dir: PathBuf,

    /// Directory receiving rendered charts [default: <temp dir>/r2ta]
    #[arg(long)]
    scratch_dir: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log: String,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ViewerConfig {
        source_file: args.source_file,
        tracer_cmd: args.tracer_cmd,
        data_dir: args.data_dir,
        scratch_dir: args.scratch_dir.unwrap_or_else(r2ta::default_scratch_dir),
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };

    eframe::run_native(
        "r2ta viewer",
        options,
        Box::new(move |cc| Ok(Box::new(app::R2taViewerApp::new(cc, config)))),
    )
}
