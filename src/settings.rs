use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How the particle loop is executed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// One walker at a time on the main thread
    Sequential,
    /// Walkers spread over a worker pool, one particle per task
    #[default]
    Parallel,
}

impl ExecutionMode {
    pub fn name(&self) -> &str {
        match self {
            ExecutionMode::Sequential => "sequential",
            ExecutionMode::Parallel => "parallel",
        }
    }

    /// Output file written into the output directory
    pub fn result_file_name(&self) -> String {
        format!("{}_result.txt", self.name())
    }
}

/// Optional console dump of the finished crystal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleView {
    /// `X` for stuck cells, `-` for empty ones, one lattice row per line
    Plain,
    /// Unicode braille, a 2x4 block of cells per glyph
    Braille,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_file_names() {
        assert_eq!(
            ExecutionMode::Sequential.result_file_name(),
            "sequential_result.txt"
        );
        assert_eq!(ExecutionMode::Parallel.result_file_name(), "parallel_result.txt");
    }

    #[test]
    fn test_default_mode_is_parallel() {
        assert_eq!(ExecutionMode::default(), ExecutionMode::Parallel);
    }

    #[test]
    fn test_serde_names_match_cli_names() {
        for mode in [ExecutionMode::Sequential, ExecutionMode::Parallel] {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.name()));
            let parsed = ExecutionMode::from_str(mode.name(), true).unwrap();
            assert_eq!(parsed, mode);
        }
        assert_eq!(serde_json::to_string(&ConsoleView::Plain).unwrap(), "\"plain\"");
        assert_eq!(
            serde_json::from_str::<ConsoleView>("\"braille\"").unwrap(),
            ConsoleView::Braille
        );
    }
}
