use crate::lattice::Lattice;
use crate::radius::RadiusTracker;
use crate::rng::{SeedStreams, WalkerRng};
use crate::spawner;
use crate::walker::{self, WalkOutcome};
use rayon::prelude::*;
use rayon::ThreadPool;

/// Counts accumulated over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    /// Particles actually spawned (never more than the budget)
    pub released: usize,
    pub stuck: usize,
    pub lost: usize,
    /// Total random-walk steps over all particles
    pub steps: u64,
}

impl Tally {
    fn record(mut self, outcome: WalkOutcome) -> Self {
        self.released += 1;
        self.steps += outcome.steps();
        match outcome {
            WalkOutcome::Stuck { .. } => self.stuck += 1,
            WalkOutcome::Lost { .. } => self.lost += 1,
        }
        self
    }

    fn merge(self, other: Tally) -> Tally {
        Tally {
            released: self.released + other.released,
            stuck: self.stuck + other.stuck,
            lost: self.lost + other.lost,
            steps: self.steps + other.steps,
        }
    }
}

/// DLA simulation state: the shared lattice and the radius tracker.
///
/// Both are created per simulation and handed to workers by reference.
pub struct DlaSimulation {
    lattice: Lattice,
    radius: RadiusTracker,
}

impl DlaSimulation {
    /// Fresh `grid_size x grid_size` lattice holding only the center seed
    pub fn new(grid_size: usize) -> Self {
        Self {
            lattice: Lattice::new(grid_size),
            radius: RadiusTracker::new(grid_size),
        }
    }

    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Current tracked crystal radius
    pub fn radius(&self) -> usize {
        self.radius.snapshot()
    }

    /// Radius at which spawning stops (`grid_size / 2 - 1`)
    pub fn radius_limit(&self) -> isize {
        self.radius.limit()
    }

    /// True once the spawn exclusion square covers the whole lattice
    pub fn is_saturated(&self) -> bool {
        self.radius.is_saturated(self.radius.snapshot())
    }

    /// Spawn one particle and walk it to completion.
    ///
    /// Returns `None` without spawning when the radius snapshot is saturated.
    pub fn release_particle(&self, rng: &mut WalkerRng) -> Option<WalkOutcome> {
        let radius = self.radius.snapshot();
        if self.radius.is_saturated(radius) {
            return None;
        }

        let start = spawner::spawn(&self.lattice, radius, rng);
        let outcome = walker::walk(&self.lattice, start, rng);

        if let WalkOutcome::Stuck { at, .. } = outcome {
            self.radius.propose(self.lattice.chebyshev_from_center(at));
        }
        Some(outcome)
    }

    /// Run up to `num_particles` walks one after another on the calling thread
    pub fn run_sequential(&self, num_particles: usize, rng: &mut WalkerRng) -> Tally {
        let mut tally = Tally::default();
        for _ in 0..num_particles {
            match self.release_particle(rng) {
                Some(outcome) => tally = tally.record(outcome),
                None => break,
            }
        }
        tally
    }

    /// Run up to `num_particles` walks on `pool`, one particle per task.
    ///
    /// Every task owns a generator drawn from `streams`. Once any worker sees a
    /// saturated radius, no further particles are spawned; walks already in
    /// flight finish normally.
    pub fn run_parallel(
        &self,
        num_particles: usize,
        pool: &ThreadPool,
        streams: &SeedStreams,
    ) -> Tally {
        pool.install(|| {
            (0..num_particles)
                .into_par_iter()
                .with_max_len(1)
                .map_init(
                    || streams.worker_rng(),
                    |rng, _| self.release_particle(rng),
                )
                .while_some()
                .fold(Tally::default, Tally::record)
                .reduce(Tally::default, Tally::merge)
        })
    }
}
