use std::sync::atomic::{AtomicUsize, Ordering};

/// Monotone record of the crystal's Chebyshev radius.
///
/// `propose` is an atomic max, so concurrent updates can never lower the stored
/// value. A `snapshot` taken while another walker is sticking may lag behind;
/// that only widens the next spawn region by a ring.
pub struct RadiusTracker {
    radius: AtomicUsize,
    limit: isize,
}

impl RadiusTracker {
    /// Tracker for a `grid_size x grid_size` lattice holding only the seed
    pub fn new(grid_size: usize) -> Self {
        Self {
            radius: AtomicUsize::new(0),
            limit: (grid_size / 2) as isize - 1,
        }
    }

    pub fn snapshot(&self) -> usize {
        self.radius.load(Ordering::Acquire)
    }

    pub fn propose(&self, distance: usize) {
        self.radius.fetch_max(distance, Ordering::AcqRel);
    }

    /// Radius at which the spawn exclusion square covers the whole lattice
    pub fn limit(&self) -> isize {
        self.limit
    }

    pub fn is_saturated(&self, radius: usize) -> bool {
        radius as isize >= self.limit
    }
}
