use crate::lattice::{Lattice, Point};
use crate::rng::WalkerRng;

/// How a single particle's walk ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkOutcome {
    /// Joined the crystal at `at`
    Stuck { at: Point, steps: u64 },
    /// Stepped off the lattice
    Lost { steps: u64 },
}

impl WalkOutcome {
    pub fn steps(&self) -> u64 {
        match *self {
            WalkOutcome::Stuck { steps, .. } | WalkOutcome::Lost { steps } => steps,
        }
    }
}

/// Random-walk a particle from `start` until it sticks or leaves the lattice.
///
/// Before every move the 3x3 block around the particle is checked for stuck
/// cells. Moves onto stuck cells are not avoided: if another walker commits the
/// cell we land on, the next stick check sees it and we stick there.
pub fn walk(lattice: &Lattice, start: Point, rng: &mut WalkerRng) -> WalkOutcome {
    let (mut x, mut y) = (start.x, start.y);
    let mut steps = 0;

    loop {
        if lattice.touches_stuck(x, y) {
            lattice.mark_stuck(x, y);
            return WalkOutcome::Stuck {
                at: Point::new(x, y),
                steps,
            };
        }

        let (dx, dy) = rng.step();
        let nx = x as isize + dx;
        let ny = y as isize + dy;
        steps += 1;

        if !lattice.in_bounds(nx, ny) {
            return WalkOutcome::Lost { steps };
        }
        x = nx as usize;
        y = ny as usize;
    }
}
