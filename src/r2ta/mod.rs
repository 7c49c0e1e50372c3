mod codec;
mod controller;
mod element;
mod error;
#[cfg(test)]
mod fake;
mod hover;
mod scan;
mod tracer_cmd;

pub use controller::{
    ExportFormat, InteractionController, InteractionState, ParamChange, RenderOutcome,
};
pub use element::ChartKind;
pub use error::ViewerError;
pub use hover::{HoverOutcome, HoverState};
pub use scan::{ElementEntry, load_elements};
#[cfg(test)]
pub(crate) use scan::scan_elements;
pub use tracer_cmd::{TracerProcess, default_scratch_dir};
