use std::path::PathBuf;

/// Errors that can occur while loading the samples
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The input file could not be opened or read
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The line is not valid JSON
    #[error("line {line} is not valid JSON: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The line is JSON but `channel`, `time` or `value` is missing or mistyped
    #[error("line {line} is not a valid sample: {source}")]
    Field {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

impl LoadError {
    /// Sorts a serde_json failure on the given (1-based) line into syntax or field errors.
    pub fn from_json(line: usize, source: serde_json::Error) -> LoadError {
        if source.is_data() {
            LoadError::Field { line, source }
        } else {
            LoadError::Json { line, source }
        }
    }
}

/// Errors that can occur while drawing or showing the chart
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// plotters backend failure
    #[error("drawing error: {0}")]
    Backend(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The viewer command could not be started
    #[error("could not launch viewer `{viewer}`: {source}")]
    Viewer {
        viewer: String,
        #[source]
        source: std::io::Error,
    },

    #[error("viewer `{viewer}` exited with {status}")]
    ViewerStatus {
        viewer: String,
        status: std::process::ExitStatus,
    },
}

impl RenderError {
    pub fn backend<E: std::fmt::Display>(e: E) -> RenderError {
        RenderError::Backend(e.to_string())
    }
}
