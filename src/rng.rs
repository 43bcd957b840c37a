use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Odd 64-bit constant used to spread worker ids and stream indices across the seed space
const SEED_SPREAD: u64 = 0x9E37_79B9_7F4A_7C15;

/// Per-worker random source. Never shared between threads.
pub struct WalkerRng {
    rng: StdRng,
}

impl WalkerRng {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform coordinate in `0..size`
    pub fn coordinate(&mut self, size: usize) -> usize {
        self.rng.gen_range(0..size)
    }

    /// One lattice move; each axis is drawn independently from {-1, 0, +1},
    /// so staying in place is one of the nine outcomes.
    pub fn step(&mut self) -> (isize, isize) {
        (self.rng.gen_range(-1..=1), self.rng.gen_range(-1..=1))
    }
}

/// Seed derived from the system clock
pub fn entropy_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(SEED_SPREAD)
}

/// Hands out independent generators to parallel workers.
///
/// Each call mixes the base seed with the calling rayon worker's index and a
/// running stream counter, so two generators never start from the same state
/// even when a worker asks for more than one.
pub struct SeedStreams {
    base: u64,
    next_stream: AtomicU64,
}

impl SeedStreams {
    pub fn new(base: u64) -> Self {
        Self {
            base,
            next_stream: AtomicU64::new(0),
        }
    }

    pub fn worker_rng(&self) -> WalkerRng {
        let worker = rayon::current_thread_index().unwrap_or(0) as u64;
        let stream = self.next_stream.fetch_add(1, Ordering::Relaxed);
        WalkerRng::seeded(self.stream_seed(worker, stream))
    }

    fn stream_seed(&self, worker: u64, stream: u64) -> u64 {
        self.base
            ^ worker.wrapping_add(1).wrapping_mul(SEED_SPREAD).rotate_left(32)
            ^ stream.wrapping_add(1).wrapping_mul(SEED_SPREAD)
    }
}
