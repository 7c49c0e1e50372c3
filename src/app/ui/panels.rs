use eframe::egui::{self, Align, Context, Layout};

use crate::r2ta::{ElementEntry, HoverState, InteractionController, TracerProcess};

use super::super::{ViewModel, ViewerConfig};

impl ViewModel {
    pub(in crate::app) fn new(entries: Vec<ElementEntry>) -> Self {
        Self {
            entries,
            search: String::new(),
            hover: HoverState::default(),
            hover_error: None,
            chart_windows: Vec::new(),
            next_window_id: 0,
        }
    }

    pub(in crate::app) fn replace_entries(&mut self, entries: Vec<ElementEntry>) {
        self.entries = entries;
        self.hover = HoverState::default();
        self.hover_error = None;
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        config: &ViewerConfig,
        controller: &InteractionController<TracerProcess>,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("r2ta viewer");
                    ui.separator();
                    ui.label(format!("graph: {}", config.source_file.display()));
                    ui.label(format!("tracer: {}", config.tracer_cmd.display()));
                    ui.label(format!("data: {}", config.data_dir.display()));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload graph"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(format!(
                            "elements: {} | open charts: {}",
                            self.entries.len(),
                            self.chart_windows.len()
                        ));
                    });
                });
            });

        egui::SidePanel::left("elements")
            .resizable(true)
            .default_width(380.0)
            .show(ctx, |ui| self.draw_elements(ui, controller));

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Reloading ROS2 computation graph...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else if self.chart_windows.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.label("Hover an element for a quick histogram, click it to open a chart.");
                    ui.label(format!("Charts are rendered into {}", config.scratch_dir.display()));
                });
            }
        });

        self.draw_chart_windows(ctx, controller);
    }
}
