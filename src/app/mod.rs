use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context};
use tracing::{info, warn};

use crate::r2ta::{
    ElementEntry, HoverState, InteractionController, InteractionState, TracerProcess,
    load_elements,
};

mod ui;

#[derive(Clone, Debug)]
pub struct ViewerConfig {
    pub source_file: PathBuf,
    pub tracer_cmd: PathBuf,
    pub data_dir: PathBuf,
    pub scratch_dir: PathBuf,
}

pub struct R2taViewerApp {
    config: ViewerConfig,
    controller: InteractionController<TracerProcess>,
    state: AppState,
    reload_rx: Option<Receiver<Result<Vec<ElementEntry>, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<Vec<ElementEntry>, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    entries: Vec<ElementEntry>,
    search: String,
    hover: HoverState,
    hover_error: Option<String>,
    chart_windows: Vec<ChartWindow>,
    next_window_id: u64,
}

struct ChartWindow {
    id: u64,
    title: String,
    state: InteractionState,
    bins_input: u32,
    open: bool,
    status: Option<String>,
}

fn artifact_uri(path: &Path) -> String {
    format!("file://{}", path.display())
}

impl R2taViewerApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: ViewerConfig) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let tracer = TracerProcess::new(&config.tracer_cmd, &config.data_dir)
            .with_out_dir(&config.scratch_dir);
        info!(
            tracer = %tracer.program().display(),
            data_dir = %tracer.data_dir().display(),
            scratch_dir = %tracer.out_dir().display(),
            "viewer configured"
        );

        let state = Self::start_load(config.source_file.clone());
        Self {
            config,
            controller: InteractionController::new(tracer),
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(source_file: PathBuf) -> Receiver<Result<Vec<ElementEntry>, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_elements(&source_file).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(source_file: PathBuf) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(source_file),
        }
    }

    fn loaded(result: Result<Vec<ElementEntry>, String>) -> AppState {
        match result {
            Ok(entries) => AppState::Ready(Box::new(ViewModel::new(entries))),
            Err(error) => {
                warn!(%error, "failed to load graph description");
                AppState::Error(error)
            }
        }
    }
}

impl eframe::App for R2taViewerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(Self::loaded(result));
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading ROS2 computation graph...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the computation graph");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.config.source_file.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(
                    ctx,
                    &self.config,
                    &self.controller,
                    &mut reload_requested,
                    is_reloading,
                );

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.config.source_file.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(Ok(entries)) => {
                            info!(elements = entries.len(), "graph description reloaded");
                            model.replace_entries(entries);
                        }
                        Ok(Err(error)) => {
                            transition = Some(Self::loaded(Err(error)));
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition = Some(AppState::Error(
                                "Background load worker disconnected".to_owned(),
                            ));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
