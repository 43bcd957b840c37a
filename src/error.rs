use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a run before the crystal is written out
#[derive(Debug, Error)]
pub enum DlaError {
    /// Wrong number of arguments or an unrecognised flag; carries clap's rendered usage
    #[error("{0}")]
    Usage(String),

    #[error("Grid Size and Number of Particles must be positive integers")]
    BadArgumentFormat,

    #[error("Grid Size must be odd")]
    EvenGridSize,

    #[error("Failed to write {}: {source}", .path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to export image {}: {source}", .path.display())]
    ImageExport {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write config file {}: {source}", .path.display())]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl DlaError {
    pub fn write_failure(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DlaError::WriteFailure {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(
            DlaError::BadArgumentFormat.to_string(),
            "Grid Size and Number of Particles must be positive integers"
        );
        assert_eq!(DlaError::EvenGridSize.to_string(), "Grid Size must be odd");
    }

    #[test]
    fn test_write_failure_names_path() {
        let err = DlaError::write_failure(
            "out/parallel_result.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let msg = err.to_string();
        assert!(msg.contains("out/parallel_result.txt"));
        assert!(msg.contains("denied"));
    }
}
