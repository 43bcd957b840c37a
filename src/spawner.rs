use crate::lattice::{Cell, Lattice, Point};
use crate::rng::WalkerRng;

/// Draw a start position by rejection sampling.
///
/// Points inside the square of half-side `radius + 1` around the center are
/// rejected, as are cells that are already stuck. The caller must only ask
/// while `radius` is below the tracker's saturation limit; otherwise no point
/// survives and the loop never ends.
pub fn spawn(lattice: &Lattice, radius: usize, rng: &mut WalkerRng) -> Point {
    let center = lattice.center();
    let exclusion = radius + 1;
    debug_assert!(exclusion < center, "spawn region is empty at radius {radius}");

    loop {
        let x = rng.coordinate(lattice.size());
        let y = rng.coordinate(lattice.size());

        if x.abs_diff(center) <= exclusion && y.abs_diff(center) <= exclusion {
            continue;
        }
        if lattice.read(x, y) == Cell::Empty {
            return Point::new(x, y);
        }
    }
}
