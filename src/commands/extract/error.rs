use std::path::PathBuf;

use thiserror::Error;

/// Failures that abort an extraction run before any output is replaced.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("input file not found: {}", .path.display())]
    InputUnavailable { path: PathBuf },

    #[error("failed to read input {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no candidate encoding could decode {}", .path.display())]
    Decode { path: PathBuf },

    #[error("no section headers found in {}", .path.display())]
    NoSections { path: PathBuf },

    #[error("failed to write output {}: {source}", .path.display())]
    Serialization {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },
}
