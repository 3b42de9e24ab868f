#![warn(clippy::all)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use table_view::{Arguments, TableViewApp};
use tracing::error;

/*
cargo fmt
cargo test -- --nocapture
cargo run -- --help
cargo run -- --page-size 25 data.json
RUST_LOG=debug cargo run
*/

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    // Initialize the tracing subscriber for logging.
    // Use RUST_LOG environment variable to set logging level.  eg `export RUST_LOG=info`
    tracing_subscriber::fmt::init();

    // Parse command-line arguments.
    let args = Arguments::build();
    tracing::debug!("main()\nArguments: {args:#?}");

    let native_options = eframe::NativeOptions {
        centered: true,
        persist_window: true,
        vsync: true,
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 720.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Table View",
        native_options,
        Box::new(move |creation_context| match TableViewApp::new(creation_context, &args) {
            Ok(app) => Ok(Box::new(app)),
            Err(err) => {
                error!("Failed to initialize TableViewApp: {err}");
                Err(err.into())
            }
        }),
    )
}
