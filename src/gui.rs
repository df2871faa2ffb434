use std::path::PathBuf;

use eframe::egui;
use tracing::error;

use crate::error::TabbyError;
use crate::viewer::Viewer;

const TOTAL_ROWS_PLACEHOLDER: &str = "Total Rows Available: ???? rows";

/// The presentation shell: a window with an open-file button, a row-limit
/// entry, display/save/count actions, a scrollable read-only output area
/// and a status line. All operations run synchronously on the UI thread.
pub struct TabbyApp {
    viewer: Viewer,
    limit_input: String,
    table_text: String,
    total_rows_text: String,
    status_message: String,
    error_message: Option<String>,
}

impl TabbyApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, startup_file: Option<PathBuf>) -> Self {
        let mut app = Self {
            viewer: Viewer::new(),
            limit_input: String::new(),
            table_text: String::new(),
            total_rows_text: TOTAL_ROWS_PLACEHOLDER.to_string(),
            status_message: "Open a CSV or XLSX file to preview it".to_string(),
            error_message: None,
        };

        if let Some(path) = startup_file {
            app.open_path(path);
        }
        app
    }

    /// Blank or non-numeric input means "use the default", never an error.
    fn limit(&self) -> Option<usize> {
        self.limit_input.trim().parse().ok()
    }

    fn current_file_name(&self) -> Option<String> {
        self.viewer
            .session()
            .current()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned())
    }

    fn open_dialog(&mut self) {
        if let Some(file) = rfd::FileDialog::new()
            .add_filter("Tabular files", &["csv", "xlsx"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            self.open_path(file);
        }
    }

    fn open_path(&mut self, path: PathBuf) {
        self.viewer.open(path);
        // a fresh file resets the limit entry, the output area and the count
        self.limit_input.clear();
        self.table_text.clear();
        self.total_rows_text = TOTAL_ROWS_PLACEHOLDER.to_string();
        self.display();
    }

    fn display(&mut self) {
        let limit = self.limit();
        match self.viewer.display(limit) {
            Ok(Some(grid)) => {
                self.table_text = grid;
                if let Some(name) = self.current_file_name() {
                    self.status_message = format!("Showing {name}");
                }
            }
            Ok(None) => {}
            Err(e) => self.report(e),
        }
    }

    fn show_total_rows(&mut self) {
        match self.viewer.count_rows() {
            Ok(Some(total)) => {
                self.total_rows_text = format!("Total Rows Available: {total} rows");
            }
            Ok(None) => {}
            Err(e) => self.report(e),
        }
    }

    fn save_table(&mut self) {
        let limit = self.limit();
        match self.viewer.export(limit) {
            Ok(Some(output)) => {
                self.status_message = format!("Table saved to {}", output.display());
            }
            Ok(None) => {}
            Err(e) => self.report(e),
        }
    }

    fn report(&mut self, e: TabbyError) {
        error!(error = %e, "operation failed");
        if e.is_load_rejection() {
            // nothing is considered loaded anymore
            self.table_text.clear();
            self.total_rows_text = TOTAL_ROWS_PLACEHOLDER.to_string();
        }
        self.status_message = "Operation failed".to_string();
        self.error_message = Some(e.user_message());
    }
}

impl eframe::App for TabbyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Number of Lines:");
                ui.add(egui::TextEdit::singleline(&mut self.limit_input).desired_width(80.0));
                if ui.button("Display Table").clicked() {
                    self.display();
                }
                if ui.button("Save Table").clicked() {
                    self.save_table();
                }
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Open File").clicked() {
                    self.open_dialog();
                }
                ui.label(&self.total_rows_text);
                if ui.button("Show Total Rows").clicked() {
                    self.show_total_rows();
                }
            });
            ui.label(&self.status_message);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::both()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    // read-only, selectable text
                    ui.add(
                        egui::TextEdit::multiline(&mut self.table_text.as_str())
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY),
                    );
                });
        });

        // blocking informational dialog, dismissed with OK
        if let Some(message) = self.error_message.clone() {
            egui::Window::new("Error")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(message);
                    if ui.button("OK").clicked() {
                        self.error_message = None;
                    }
                });
        }
    }
}
