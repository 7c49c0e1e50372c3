use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::{debug, warn};

use super::element::{ChartRequest, MetricKind, OutputFormat};
use super::error::ViewerError;

/// Boundary to the external tracer. Every call is one blocking process spawn.
pub trait ChartTracer {
    /// Renders a chart and returns the path the tracer printed, trimmed.
    /// An empty string means the tracer produced nothing usable.
    fn render(&self, request: &ChartRequest) -> Result<String, ViewerError>;

    fn export_data(
        &self,
        element_id: &str,
        metric: MetricKind,
        destination: &Path,
    ) -> Result<(), ViewerError>;
}

#[derive(Clone, Debug)]
pub struct TracerProcess {
    program: PathBuf,
    data_dir: PathBuf,
    out_dir: PathBuf,
}

impl TracerProcess {
    pub fn new(program: impl Into<PathBuf>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            data_dir: data_dir.into(),
            out_dir: default_scratch_dir(),
        }
    }

    pub fn with_out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = out_dir.into();
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    fn ensure_out_dir(&self) -> Result<(), ViewerError> {
        fs::create_dir_all(&self.out_dir).map_err(|source| ViewerError::ResourceUnavailable {
            path: self.out_dir.clone(),
            source,
        })
    }

    fn run(&self, args: &[OsString]) -> Result<Output, ViewerError> {
        debug!(program = %self.program.display(), ?args, "invoking tracer");
        let output = Command::new(&self.program)
            .args(args)
            .output()
            .map_err(|source| ViewerError::LaunchFailure {
                program: self.program.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!(status = %output.status, stderr = %stderr.trim(), "tracer exited unsuccessfully");
        }

        Ok(output)
    }
}

impl ChartTracer for TracerProcess {
    fn render(&self, request: &ChartRequest) -> Result<String, ViewerError> {
        self.ensure_out_dir()?;
        let args = render_args(request, &self.data_dir, &self.out_dir);
        let output = self.run(&args)?;
        Ok(String::from_utf8_lossy(&output.stdout).trim().to_owned())
    }

    fn export_data(
        &self,
        element_id: &str,
        metric: MetricKind,
        destination: &Path,
    ) -> Result<(), ViewerError> {
        let args = export_args(element_id, metric, &self.data_dir, destination);
        self.run(&args).map(|_| ())
    }
}

pub fn default_scratch_dir() -> PathBuf {
    std::env::temp_dir().join("r2ta")
}

pub(super) fn render_args(request: &ChartRequest, data_dir: &Path, out_dir: &Path) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "chart".into(),
        "--element-id".into(),
        request.element_id.as_str().into(),
        "--property".into(),
        request.metric.token().into(),
        "-i".into(),
        data_dir.into(),
        "-o".into(),
        out_dir.into(),
        "--size".into(),
        request.render_size.to_string().into(),
    ];

    if request.output_format != OutputFormat::default() {
        args.push("--output-format".into());
        args.push(request.output_format.token().into());
    }

    // The chart kind is a tracer subcommand; `--bins` belongs to `histogram`.
    args.push(request.chart_kind.token().into());
    if let Some(bins) = request.effective_bins() {
        args.push("--bins".into());
        args.push(bins.to_string().into());
    }

    args
}

pub(super) fn export_args(
    element_id: &str,
    metric: MetricKind,
    data_dir: &Path,
    destination: &Path,
) -> Vec<OsString> {
    vec![
        "extract".into(),
        "--element-id".into(),
        element_id.into(),
        "--property".into(),
        metric.token().into(),
        "-i".into(),
        data_dir.into(),
        "-o".into(),
        destination.into(),
    ]
}
