use crate::settings::ExecutionMode;
use crate::simulation::Tally;
use serde::Serialize;
use std::path::PathBuf;

/// End-of-run report, logged and optionally written as JSON
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub grid_size: usize,
    pub num_particles: usize,
    pub mode: ExecutionMode,
    pub threads: usize,
    pub seed: u64,
    pub released: usize,
    pub stuck: usize,
    pub lost: usize,
    pub total_steps: u64,
    /// Radius held by the tracker when the run ended
    pub final_radius: usize,
    /// Radius measured over the stuck cells of the finished lattice
    pub crystal_radius: usize,
    pub stuck_cells: usize,
    pub saturated: bool,
    pub elapsed_secs: f64,
    pub output: PathBuf,
}

impl RunSummary {
    pub fn record_tally(&mut self, tally: Tally) {
        self.released = tally.released;
        self.stuck = tally.stuck;
        self.lost = tally.lost;
        self.total_steps = tally.steps;
    }

    /// Average walk length, zero when nothing was released
    pub fn mean_steps(&self) -> f64 {
        if self.released == 0 {
            0.0
        } else {
            self.total_steps as f64 / self.released as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> RunSummary {
        RunSummary {
            grid_size: 21,
            num_particles: 100,
            mode: ExecutionMode::Parallel,
            threads: 4,
            seed: 1,
            released: 0,
            stuck: 0,
            lost: 0,
            total_steps: 0,
            final_radius: 0,
            crystal_radius: 0,
            stuck_cells: 1,
            saturated: false,
            elapsed_secs: 0.0,
            output: PathBuf::from("parallel_result.txt"),
        }
    }

    #[test]
    fn test_record_tally_and_mean() {
        let mut summary = blank();
        assert_eq!(summary.mean_steps(), 0.0);

        summary.record_tally(Tally {
            released: 4,
            stuck: 3,
            lost: 1,
            steps: 100,
        });
        assert_eq!(summary.released, 4);
        assert_eq!(summary.stuck, 3);
        assert_eq!(summary.lost, 1);
        assert_eq!(summary.mean_steps(), 25.0);
    }

    #[test]
    fn test_serializes_mode_by_name() {
        let json = serde_json::to_value(blank()).unwrap();
        assert_eq!(json["mode"], "parallel");
        assert_eq!(json["grid_size"], 21);
    }
}
