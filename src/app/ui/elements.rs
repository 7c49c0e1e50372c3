use eframe::egui::{self, Context, RichText, Ui};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::r2ta::{
    ElementEntry, HoverOutcome, HoverState, InteractionController, TracerProcess,
};

use super::super::{ViewModel, artifact_uri};

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

fn filter_entries(entries: &[ElementEntry], query: &str) -> Vec<usize> {
    let query = query.trim();
    if query.is_empty() {
        return (0..entries.len()).collect();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored = entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let score = fuzzy_match_score(&matcher, &entry.label, query)
                .max(fuzzy_match_score(&matcher, &entry.title, query))?;
            Some((index, score))
        })
        .collect::<Vec<_>>();
    scored.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    scored.into_iter().map(|(index, _)| index).collect()
}

fn apply_hover(
    ctx: &Context,
    controller: &InteractionController<TracerProcess>,
    hover: &mut HoverState,
    hover_error: &mut Option<String>,
    target: Option<&str>,
) {
    match controller.hover(hover, target) {
        Ok(HoverOutcome::Shown(path)) => {
            ctx.forget_image(&artifact_uri(&path));
            *hover_error = None;
        }
        Ok(HoverOutcome::Hidden) => *hover_error = None,
        Ok(HoverOutcome::Unchanged) => {}
        Err(error) => *hover_error = Some(error.to_string()),
    }
}

impl ViewModel {
    pub(in crate::app) fn draw_elements(
        &mut self,
        ui: &mut Ui,
        controller: &InteractionController<TracerProcess>,
    ) {
        ui.heading("Traced elements");
        ui.add_space(4.0);
        ui.add(
            egui::TextEdit::singleline(&mut self.search)
                .hint_text("Filter by node, topic or interface")
                .desired_width(f32::INFINITY),
        );
        ui.add_space(6.0);

        if self.entries.is_empty() {
            ui.label("The graph description names no r2ta elements.");
            return;
        }

        let visible = filter_entries(&self.entries, &self.search);
        let ctx = ui.ctx().clone();
        let mut clicked = None;
        let mut any_hovered = false;

        egui::ScrollArea::vertical()
            .id_salt("elements_scroll")
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for index in visible {
                    let Some(entry) = self.entries.get(index) else {
                        continue;
                    };

                    let text = format!("[{}] {}", entry.element.kind_label(), entry.label);
                    let response = ui.selectable_label(false, text);
                    if response.clicked() {
                        clicked = Some(index);
                    }
                    if !response.hovered() {
                        continue;
                    }

                    any_hovered = true;
                    apply_hover(
                        &ctx,
                        controller,
                        &mut self.hover,
                        &mut self.hover_error,
                        Some(&entry.raw),
                    );

                    let title = entry.title.clone();
                    if let Some(path) = self.hover.artifact_path().filter(|_| self.hover.managed()) {
                        let uri = artifact_uri(path);
                        response.on_hover_ui(|ui| {
                            ui.label(RichText::new(title).small());
                            ui.add(egui::Image::new(uri).max_width(400.0));
                        });
                    } else if let Some(error) = &self.hover_error {
                        response.on_hover_text(format!("{title}\n{error}"));
                    } else {
                        response.on_hover_text(title);
                    }
                }
            });

        if !any_hovered {
            apply_hover(
                &ctx,
                controller,
                &mut self.hover,
                &mut self.hover_error,
                None,
            );
        }

        if let Some(index) = clicked {
            self.open_chart_window(&ctx, controller, index);
        }
    }
}
