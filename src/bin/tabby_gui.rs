use std::path::PathBuf;

use eframe::{egui, NativeOptions};

use tabby::gui::TabbyApp;
use tabby::logging::{init_logging, LoggingConfig};

fn main() -> Result<(), eframe::Error> {
    if let Err(error) = init_logging(&LoggingConfig::default()) {
        eprintln!("warning: {error}");
    }

    // optional startup argument: auto-load and display this file
    let startup_file = std::env::args().nth(1).map(PathBuf::from);

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 500.0])
            .with_resizable(true)
            .with_title("tabby"),
        ..Default::default()
    };

    eframe::run_native(
        "tabby",
        options,
        Box::new(move |cc| Ok(Box::new(TabbyApp::new(cc, startup_file)))),
    )
}
