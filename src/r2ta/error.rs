use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("failed to launch tracer `{program}`: {source}")]
    LaunchFailure {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("output directory {} is unavailable: {source}", path.display())]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("tracer produced no chart for {element_id}")]
    EmptyArtifact { element_id: String },

    #[error("{kind} elements have no default metric; pick one explicitly")]
    UnresolvedDefaultMetric { kind: &'static str },

    #[error("{0} export is not supported by the tracer")]
    UnsupportedExportFormat(&'static str),

    #[error("failed to copy {} to {}: {source}", from.display(), to.display())]
    ArtifactCopy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}
