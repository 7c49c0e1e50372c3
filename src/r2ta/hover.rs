use std::path::PathBuf;

use tracing::{debug, warn};

use super::codec::decode;
use super::element::{ChartKind, ChartRequest};
use super::error::ViewerError;
use super::controller::InteractionController;
use super::tracer_cmd::ChartTracer;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverState {
    previous: Option<String>,
    managed: bool,
    artifact_path: Option<PathBuf>,
}

impl HoverState {
    pub fn managed(&self) -> bool {
        self.managed
    }

    pub fn artifact_path(&self) -> Option<&PathBuf> {
        self.artifact_path.as_ref()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HoverOutcome {
    Unchanged,
    Hidden,
    Shown(PathBuf),
}

impl<T: ChartTracer> InteractionController<T> {
    /// `target` is the tooltip text under the pointer, or `None` over empty
    /// space. Surrounding whitespace is ignored.
    pub fn hover(
        &self,
        state: &mut HoverState,
        target: Option<&str>,
    ) -> Result<HoverOutcome, ViewerError> {
        let target = target.map(str::trim);
        if state.previous.as_deref() == target {
            return Ok(HoverOutcome::Unchanged);
        }

        state.previous = target.map(str::to_owned);
        state.managed = false;
        state.artifact_path = None;

        let Some(element) = target.and_then(decode) else {
            return Ok(HoverOutcome::Hidden);
        };
        let Some(metric) = element.default_metric() else {
            debug!(element = %element.identifier, "no default metric, tooltip chart omitted");
            return Ok(HoverOutcome::Hidden);
        };

        let request = ChartRequest::new(element.identifier, metric, ChartKind::Histogram)
            .with_size(ChartRequest::TOOLTIP_RENDER_SIZE);
        let artifact = self.render_request(&request).inspect_err(|error| {
            warn!(element = %request.element_id, %error, "tooltip render failed");
        })?;

        state.managed = true;
        state.artifact_path = Some(artifact.clone());
        Ok(HoverOutcome::Shown(artifact))
    }
}
