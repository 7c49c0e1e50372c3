use std::cell::{Cell, RefCell};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use super::element::{ChartRequest, MetricKind};
use super::error::ViewerError;
use super::tracer_cmd::ChartTracer;

pub(crate) struct RecordingTracer {
    out_dir: TempDir,
    renders: RefCell<Vec<ChartRequest>>,
    exports: RefCell<Vec<(String, MetricKind, PathBuf)>>,
    fail_launches: Cell<bool>,
    print_nothing: Cell<bool>,
}

impl RecordingTracer {
    pub(crate) fn new() -> Self {
        Self {
            out_dir: tempfile::tempdir().expect("scratch dir for fake tracer"),
            renders: RefCell::new(Vec::new()),
            exports: RefCell::new(Vec::new()),
            fail_launches: Cell::new(false),
            print_nothing: Cell::new(false),
        }
    }

    pub(crate) fn fail_launches(&self, fail: bool) {
        self.fail_launches.set(fail);
    }

    pub(crate) fn print_nothing(&self, empty: bool) {
        self.print_nothing.set(empty);
    }

    pub(crate) fn renders(&self) -> Vec<ChartRequest> {
        self.renders.borrow().clone()
    }

    pub(crate) fn render_count(&self) -> usize {
        self.renders.borrow().len()
    }

    pub(crate) fn exports(&self) -> Vec<(String, MetricKind, PathBuf)> {
        self.exports.borrow().clone()
    }

    fn launch(&self) -> Result<(), ViewerError> {
        if self.fail_launches.get() {
            return Err(ViewerError::LaunchFailure {
                program: "r2ta-tracer".to_owned(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
            });
        }
        Ok(())
    }
}

impl ChartTracer for RecordingTracer {
    fn render(&self, request: &ChartRequest) -> Result<String, ViewerError> {
        self.renders.borrow_mut().push(request.clone());
        self.launch()?;
        if self.print_nothing.get() {
            return Ok(String::new());
        }

        let index = self.render_count();
        let artifact = self.out_dir.path().join(format!(
            "chart_{index}.{}",
            request.output_format.token()
        ));
        fs::write(&artifact, request.metric.token()).expect("fake artifact is writable");
        Ok(artifact.display().to_string())
    }

    fn export_data(
        &self,
        element_id: &str,
        metric: MetricKind,
        destination: &Path,
    ) -> Result<(), ViewerError> {
        self.exports
            .borrow_mut()
            .push((element_id.to_owned(), metric, destination.to_path_buf()));
        self.launch()
    }
}
