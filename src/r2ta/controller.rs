use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::element::{ChartKind, ChartRequest, ElementRef, MetricKind, OutputFormat};
use super::error::ViewerError;
use super::tracer_cmd::ChartTracer;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteractionState {
    pub element: ElementRef,
    pub metric: Option<MetricKind>,
    pub chart_kind: ChartKind,
    pub bin_count: Option<u32>,
    pub artifact_path: Option<PathBuf>,
}

impl InteractionState {
    pub fn new(element: ElementRef) -> Self {
        Self {
            metric: element.default_metric(),
            element,
            chart_kind: ChartKind::Histogram,
            bin_count: None,
            artifact_path: None,
        }
    }

    pub fn request(&self) -> Option<ChartRequest> {
        self.metric.map(|metric| {
            ChartRequest::new(self.element.identifier.clone(), metric, self.chart_kind)
                .with_bins(self.bin_count)
        })
    }

    fn require_metric(&self) -> Result<MetricKind, ViewerError> {
        self.metric.ok_or(ViewerError::UnresolvedDefaultMetric {
            kind: self.element.kind_label(),
        })
    }

    fn apply(&mut self, change: ParamChange) -> bool {
        match change {
            ParamChange::Metric(metric) => replace_if_changed(&mut self.metric, Some(metric)),
            ParamChange::ChartKind(chart_kind) => {
                replace_if_changed(&mut self.chart_kind, chart_kind)
            }
            ParamChange::Bins(bin_count) => replace_if_changed(&mut self.bin_count, bin_count),
        }
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamChange {
    Metric(MetricKind),
    ChartKind(ChartKind),
    Bins(Option<u32>),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered(PathBuf),
    Unchanged,
    AwaitingMetric,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Png,
    Svg,
    Jpg,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [Self::Png, Self::Svg, Self::Jpg];

    pub fn label(self) -> &'static str {
        match self {
            Self::Png => "PNG image",
            Self::Svg => "SVG image",
            Self::Jpg => "JPG image",
        }
    }

    pub fn extensions(self) -> &'static [&'static str] {
        match self {
            Self::Png => &["png"],
            Self::Svg => &["svg"],
            Self::Jpg => &["jpg", "jpeg"],
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.extensions().contains(&extension.as_str()))
    }

    fn output_format(self) -> Result<OutputFormat, ViewerError> {
        match self {
            Self::Png => Ok(OutputFormat::Png),
            Self::Svg => Ok(OutputFormat::Svg),
            Self::Jpg => Err(ViewerError::UnsupportedExportFormat("JPG")),
        }
    }
}

pub struct InteractionController<T> {
    tracer: T,
}

impl<T: ChartTracer> InteractionController<T> {
    pub fn new(tracer: T) -> Self {
        Self { tracer }
    }

    #[cfg(test)]
    pub fn tracer(&self) -> &T {
        &self.tracer
    }

    pub fn open_view(
        &self,
        element: ElementRef,
    ) -> (InteractionState, Result<RenderOutcome, ViewerError>) {
        let mut state = InteractionState::new(element);
        info!(element = %state.element.identifier, "opening chart view");
        let outcome = self.render(&mut state);
        (state, outcome)
    }

    pub fn change(
        &self,
        state: &mut InteractionState,
        change: ParamChange,
    ) -> Result<RenderOutcome, ViewerError> {
        if !state.apply(change) {
            debug!(?change, "parameter unchanged, skipping render");
            return Ok(RenderOutcome::Unchanged);
        }
        self.render(state)
    }

    fn render(&self, state: &mut InteractionState) -> Result<RenderOutcome, ViewerError> {
        let Some(request) = state.request() else {
            debug!(element = %state.element.identifier, "no metric selected, render deferred");
            return Ok(RenderOutcome::AwaitingMetric);
        };

        let artifact = self.render_request(&request).inspect_err(|error| {
            warn!(element = %request.element_id, %error, "chart render failed");
        })?;
        state.artifact_path = Some(artifact.clone());
        Ok(RenderOutcome::Rendered(artifact))
    }

    pub(super) fn render_request(&self, request: &ChartRequest) -> Result<PathBuf, ViewerError> {
        let printed = self.tracer.render(request)?;
        if printed.is_empty() {
            return Err(ViewerError::EmptyArtifact {
                element_id: request.element_id.clone(),
            });
        }
        Ok(PathBuf::from(printed))
    }

    /// Renders the current configuration afresh in `format` and copies it to
    /// `destination`. The view's displayed artifact is left alone.
    pub fn export_chart(
        &self,
        state: &InteractionState,
        format: ExportFormat,
        destination: &Path,
    ) -> Result<(), ViewerError> {
        let metric = state.require_metric()?;
        let output_format = format.output_format()?;
        let request = ChartRequest::new(state.element.identifier.clone(), metric, state.chart_kind)
            .with_bins(state.bin_count)
            .with_output_format(output_format);

        let artifact = self.render_request(&request)?;
        fs::copy(&artifact, destination).map_err(|source| ViewerError::ArtifactCopy {
            from: artifact.clone(),
            to: destination.to_path_buf(),
            source,
        })?;
        info!(destination = %destination.display(), "chart exported");
        Ok(())
    }

    pub fn export_data(
        &self,
        state: &InteractionState,
        destination: &Path,
    ) -> Result<(), ViewerError> {
        let metric = state.require_metric()?;
        self.tracer
            .export_data(&state.element.identifier, metric, destination)?;
        info!(destination = %destination.display(), metric = metric.token(), "data exported");
        Ok(())
    }
}
