mod app;
mod family;
mod util;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Family snapshot JSON with members and relationships.
    #[arg(long, default_value = "family.json")]
    family: PathBuf,

    /// Member id to root the tree on instead of the file's default.
    #[arg(long)]
    root: Option<String>,

    /// Generations of descendants expanded below the root.
    #[arg(long, default_value_t = 2)]
    max_depth: u32,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "kinfolk",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::FamilyTreeApp::new(
                cc,
                args.family.clone(),
                args.root.clone(),
                args.max_depth,
            )))
        }),
    )
}
