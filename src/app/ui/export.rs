use std::path::PathBuf;

use crate::r2ta::{ExportFormat, InteractionController, TracerProcess};

use super::super::ChartWindow;

/// Picks the export format from the chosen file's extension, falling back to
/// PNG (and appending its extension) when there is none we know.
fn resolve_export_target(path: PathBuf) -> (PathBuf, ExportFormat) {
    match ExportFormat::from_path(&path) {
        Some(format) => (path, format),
        None => {
            let format = ExportFormat::default();
            let mut file_name = path.file_name().map(|name| name.to_os_string()).unwrap_or_default();
            file_name.push(".");
            file_name.push(format.extensions()[0]);
            (path.with_file_name(file_name), format)
        }
    }
}

fn save_dialog(title: &str) -> rfd::FileDialog {
    let dialog = rfd::FileDialog::new().set_title(title);
    match std::env::current_dir() {
        Ok(cwd) => dialog.set_directory(cwd),
        Err(_) => dialog,
    }
}

impl ChartWindow {
    pub(super) fn save_as(&mut self, controller: &InteractionController<TracerProcess>) {
        let mut dialog = save_dialog("Save chart as");
        for format in ExportFormat::ALL {
            dialog = dialog.add_filter(format.label(), format.extensions());
        }
        let Some(path) = dialog.save_file() else {
            return;
        };

        let (path, format) = resolve_export_target(path);
        self.status = Some(match controller.export_chart(&self.state, format, &path) {
            Ok(()) => format!("Saved chart to {}", path.display()),
            Err(error) => error.to_string(),
        });
    }

    pub(super) fn export_data(&mut self, controller: &InteractionController<TracerProcess>) {
        let Some(path) = save_dialog("Export data").save_file() else {
            return;
        };

        self.status = Some(match controller.export_data(&self.state, &path) {
            Ok(()) => format!("Exported data to {}", path.display()),
            Err(error) => error.to_string(),
        });
    }
}
