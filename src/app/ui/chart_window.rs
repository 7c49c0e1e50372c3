use eframe::egui::{self, Context, Ui};
use tracing::debug;

use crate::r2ta::{
    ChartKind, InteractionController, ParamChange, RenderOutcome, TracerProcess, ViewerError,
};

use super::super::{ChartWindow, ViewModel, artifact_uri};

const MAX_BINS: u32 = 2000;
const AWAITING_METRIC: &str = "Select a metric to render a chart.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ChartAction {
    Change(ParamChange),
    SaveAs,
    ExportData,
}

// One frame of the bin count field. Keystrokes and intermediate drag values
// are not committed; only the value left behind when the edit ends is.
#[derive(Clone, Copy, Debug, Default)]
struct BinsEdit {
    changed: bool,
    dragging: bool,
    editing: bool,
    drag_stopped: bool,
    lost_focus: bool,
}

impl BinsEdit {
    fn committed(self, input: u32) -> Option<Option<u32>> {
        let settled = self.changed && !self.dragging && !self.editing;
        (self.drag_stopped || self.lost_focus || settled).then_some((input > 0).then_some(input))
    }
}

impl ViewModel {
    pub(in crate::app) fn open_chart_window(
        &mut self,
        ctx: &Context,
        controller: &InteractionController<TracerProcess>,
        entry_index: usize,
    ) {
        let Some(entry) = self.entries.get(entry_index) else {
            return;
        };

        let (state, outcome) = controller.open_view(entry.element.clone());
        let mut window = ChartWindow {
            id: self.next_window_id,
            title: entry.title.clone(),
            state,
            bins_input: 0,
            open: true,
            status: None,
        };
        window.record_outcome(ctx, outcome);

        self.next_window_id += 1;
        self.chart_windows.push(window);
    }

    pub(in crate::app) fn draw_chart_windows(
        &mut self,
        ctx: &Context,
        controller: &InteractionController<TracerProcess>,
    ) {
        for window in &mut self.chart_windows {
            window.show(ctx, controller);
        }

        self.chart_windows.retain(|window| {
            if !window.open {
                debug!(element = %window.state.element.identifier, "chart view closed");
            }
            window.open
        });
    }
}

impl ChartWindow {
    fn show(&mut self, ctx: &Context, controller: &InteractionController<TracerProcess>) {
        let mut open = self.open;
        let mut action = None;

        egui::Window::new(self.title.clone())
            .id(egui::Id::new(("chart_window", self.id)))
            .open(&mut open)
            .default_size([840.0, 900.0])
            .resizable(true)
            .show(ctx, |ui| {
                action = self.draw_toolbar(ui);
                ui.separator();
                if let Some(status) = &self.status {
                    ui.colored_label(ui.visuals().warn_fg_color, status.as_str());
                }
                self.draw_chart(ui);
            });

        self.open = open;
        if let Some(action) = action {
            self.handle_action(ctx, controller, action);
        }
    }

    fn draw_toolbar(&mut self, ui: &mut Ui) -> Option<ChartAction> {
        let mut action = None;

        ui.horizontal_wrapped(|ui| {
            for chart_kind in [ChartKind::Scatter, ChartKind::Histogram] {
                let selected = self.state.chart_kind == chart_kind;
                if ui.selectable_label(selected, chart_kind.label()).clicked() {
                    action = Some(ChartAction::Change(ParamChange::ChartKind(chart_kind)));
                }
            }

            let bins = ui
                .add_enabled(
                    self.state.chart_kind == ChartKind::Histogram,
                    egui::DragValue::new(&mut self.bins_input)
                        .range(0..=MAX_BINS)
                        .speed(1.0)
                        .update_while_editing(false)
                        .prefix("bins: "),
                )
                .on_hover_text("Histogram bin count, 0 lets the tracer decide");
            let edit = BinsEdit {
                changed: bins.changed(),
                dragging: bins.dragged(),
                editing: bins.has_focus(),
                drag_stopped: bins.drag_stopped(),
                lost_focus: bins.lost_focus(),
            };
            if let Some(bin_count) = edit.committed(self.bins_input) {
                action = Some(ChartAction::Change(ParamChange::Bins(bin_count)));
            }

            let metrics = self.state.element.selectable_metrics();
            if !metrics.is_empty() {
                ui.separator();
                for &metric in metrics {
                    let selected = self.state.metric == Some(metric);
                    if ui.selectable_label(selected, metric.label()).clicked() {
                        action = Some(ChartAction::Change(ParamChange::Metric(metric)));
                    }
                }
            }

            ui.separator();
            let has_metric = self.state.metric.is_some();
            if ui
                .add_enabled(has_metric, egui::Button::new("Save as"))
                .clicked()
            {
                action = Some(ChartAction::SaveAs);
            }
            if ui
                .add_enabled(has_metric, egui::Button::new("Export data"))
                .clicked()
            {
                action = Some(ChartAction::ExportData);
            }
        });

        action
    }

    fn draw_chart(&self, ui: &mut Ui) {
        match &self.state.artifact_path {
            Some(path) => {
                egui::ScrollArea::both()
                    .id_salt(("chart_scroll", self.id))
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.add(egui::Image::new(artifact_uri(path)).shrink_to_fit());
                    });
            }
            None if self.state.metric.is_none() => {
                ui.label(AWAITING_METRIC);
            }
            None => {
                ui.label("No chart rendered yet.");
            }
        }
    }

    fn handle_action(
        &mut self,
        ctx: &Context,
        controller: &InteractionController<TracerProcess>,
        action: ChartAction,
    ) {
        match action {
            ChartAction::Change(change) => {
                let outcome = controller.change(&mut self.state, change);
                self.record_outcome(ctx, outcome);
            }
            ChartAction::SaveAs => self.save_as(controller),
            ChartAction::ExportData => self.export_data(controller),
        }
    }

    fn record_outcome(&mut self, ctx: &Context, outcome: Result<RenderOutcome, ViewerError>) {
        match outcome {
            Ok(RenderOutcome::Rendered(path)) => {
                ctx.forget_image(&artifact_uri(&path));
                self.status = None;
            }
            Ok(RenderOutcome::Unchanged) => {}
            Ok(RenderOutcome::AwaitingMetric) => self.status = Some(AWAITING_METRIC.to_owned()),
            Err(error) => self.status = Some(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typing() -> BinsEdit {
        BinsEdit {
            changed: true,
            editing: true,
            ..BinsEdit::default()
        }
    }

    #[test]
    fn typed_digits_commit_only_when_the_field_is_left() {
        let committed = [1, 15, 150]
            .into_iter()
            .filter_map(|input| typing().committed(input))
            .collect::<Vec<_>>();
        assert!(committed.is_empty());

        let leave = BinsEdit {
            changed: true,
            lost_focus: true,
            ..BinsEdit::default()
        };
        assert_eq!(leave.committed(150), Some(Some(150)));
    }

    #[test]
    fn drags_commit_the_value_they_stop_on() {
        let dragging = BinsEdit {
            changed: true,
            dragging: true,
            ..BinsEdit::default()
        };
        assert_eq!(dragging.committed(40), None);

        let stopped = BinsEdit {
            drag_stopped: true,
            ..BinsEdit::default()
        };
        assert_eq!(stopped.committed(64), Some(Some(64)));
    }

    #[test]
    fn zero_clears_the_bin_count() {
        let stepped = BinsEdit {
            changed: true,
            ..BinsEdit::default()
        };
        assert_eq!(stepped.committed(0), Some(None));
        assert_eq!(BinsEdit::default().committed(12), None);
    }
}
