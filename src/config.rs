use crate::error::DlaError;
use crate::settings::{ConsoleView, ExecutionMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Optional run settings, persisted as JSON.
///
/// Grid size and particle count are not stored here; they always come from
/// the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Version field for future compatibility
    pub version: u32,
    pub mode: ExecutionMode,
    /// Worker count for parallel mode (None = hardware parallelism)
    pub threads: Option<usize>,
    /// Generator seed (None = derived from the system clock)
    pub seed: Option<u64>,
    /// Directory receiving `<mode>_result.txt`
    pub output_dir: PathBuf,
    pub console: Option<ConsoleView>,
    pub png: Option<PathBuf>,
    pub summary: Option<PathBuf>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            version: 1,
            mode: ExecutionMode::default(),
            threads: None,
            seed: None,
            output_dir: PathBuf::from("."),
            console: None,
            png: None,
            summary: None,
        }
    }
}

impl RunConfig {
    /// `<config dir>/dla-crystal/config.json`, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dla-crystal").join("config.json"))
    }

    /// Load the explicitly named file, or the default one if it exists, or fall back to defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self, DlaError> {
        match explicit {
            Some(path) => Self::load_from_file(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::load_from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Export config to a JSON file
    pub fn save_to_file(&self, path: &Path) -> Result<(), DlaError> {
        let json = serde_json::to_string_pretty(self).map_err(|e| DlaError::ConfigWrite {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        fs::write(path, json).map_err(|source| DlaError::ConfigWrite {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Import config from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, DlaError> {
        let content = fs::read_to_string(path).map_err(|source| DlaError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| DlaError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Workers to start in parallel mode
    pub fn worker_count(&self) -> usize {
        self.threads
            .filter(|&n| n > 0)
            .unwrap_or_else(|| std::thread::available_parallelism().map_or(1, |n| n.get()))
    }

    pub fn result_path(&self) -> PathBuf {
        self.output_dir.join(self.mode.result_file_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = RunConfig {
            version: 1,
            mode: ExecutionMode::Sequential,
            threads: Some(6),
            seed: Some(424242),
            output_dir: PathBuf::from("runs/today"),
            console: Some(ConsoleView::Braille),
            png: Some(PathBuf::from("crystal.png")),
            summary: Some(PathBuf::from("summary.json")),
        };

        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: RunConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_config_file_save_and_load() {
        let config = RunConfig {
            seed: Some(7),
            ..Default::default()
        };

        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();

        config.save_to_file(&path).unwrap();
        let loaded = RunConfig::load(Some(&path)).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed: RunConfig = serde_json::from_str(r#"{ "mode": "sequential" }"#).unwrap();
        assert_eq!(parsed.mode, ExecutionMode::Sequential);
        assert_eq!(parsed.version, 1);
        assert_eq!(parsed.threads, None);
        assert_eq!(parsed.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_invalid_config_file() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "not valid json").unwrap();

        let result = RunConfig::load_from_file(temp_file.path());
        assert!(matches!(result, Err(DlaError::ConfigParse { .. })));
    }

    #[test]
    fn test_missing_config_file() {
        let result = RunConfig::load(Some(Path::new("/nonexistent/path/config.json")));
        assert!(matches!(result, Err(DlaError::ConfigRead { .. })));
    }

    #[test]
    fn test_worker_count() {
        let mut config = RunConfig::default();
        assert!(config.worker_count() >= 1);
        config.threads = Some(3);
        assert_eq!(config.worker_count(), 3);
        config.threads = Some(0);
        assert!(config.worker_count() >= 1);
    }

    #[test]
    fn test_result_path() {
        let config = RunConfig {
            mode: ExecutionMode::Sequential,
            output_dir: PathBuf::from("out"),
            ..Default::default()
        };
        assert_eq!(config.result_path(), PathBuf::from("out/sequential_result.txt"));
    }
}
