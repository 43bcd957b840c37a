use std::sync::atomic::{AtomicU8, Ordering};

/// State of a single lattice cell. Cells only ever move from `Empty` to `Stuck`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty = 0,
    Stuck = 1,
}

impl Cell {
    fn from_u8(value: u8) -> Cell {
        if value == Cell::Empty as u8 {
            Cell::Empty
        } else {
            Cell::Stuck
        }
    }

    /// Value used by the CSV and image writers
    pub fn bit(self) -> u8 {
        self as u8
    }
}

/// An in-bounds lattice position; `x` is the row, `y` the column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub fn new(x: usize, y: usize) -> Self {
        Point { x, y }
    }
}

/// Square lattice shared by every walker.
///
/// Each cell is an `AtomicU8`. Because the only transition is `Empty -> Stuck`,
/// a relaxed load that returns `Stuck` is final and a stale `Empty` is caught
/// by the next stick check, so no per-cell lock is needed.
pub struct Lattice {
    size: usize,
    cells: Vec<AtomicU8>,
}

impl Lattice {
    /// Create an empty `size x size` lattice with the seed stuck at the center
    pub fn new(size: usize) -> Self {
        let lattice = Self {
            size,
            cells: (0..size * size)
                .map(|_| AtomicU8::new(Cell::Empty as u8))
                .collect(),
        };
        if size > 0 {
            let c = lattice.center();
            lattice.mark_stuck(c, c);
        }
        lattice
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Row and column index of the seed (`size / 2`)
    pub fn center(&self) -> usize {
        self.size / 2
    }

    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.size && y < self.size, "({x}, {y}) outside lattice");
        x * self.size + y
    }

    pub fn in_bounds(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.size && (y as usize) < self.size
    }

    pub fn read(&self, x: usize, y: usize) -> Cell {
        Cell::from_u8(self.cells[self.index(x, y)].load(Ordering::Relaxed))
    }

    /// Idempotent: two walkers committing the same cell leave the same state
    pub fn mark_stuck(&self, x: usize, y: usize) {
        self.cells[self.index(x, y)].store(Cell::Stuck as u8, Ordering::Relaxed);
    }

    /// True if `(x, y)` or any of its eight in-bounds neighbours is stuck
    pub fn touches_stuck(&self, x: usize, y: usize) -> bool {
        let x_lo = x.saturating_sub(1);
        let y_lo = y.saturating_sub(1);
        let x_hi = (x + 1).min(self.size - 1);
        let y_hi = (y + 1).min(self.size - 1);

        (x_lo..=x_hi).any(|nx| (y_lo..=y_hi).any(|ny| self.read(nx, ny) == Cell::Stuck))
    }

    /// Chebyshev distance from the center
    pub fn chebyshev_from_center(&self, p: Point) -> usize {
        let c = self.center();
        p.x.abs_diff(c).max(p.y.abs_diff(c))
    }

    pub fn count_stuck(&self) -> usize {
        self.rows()
            .map(|row| row.iter().filter(|&&cell| cell == Cell::Stuck).count())
            .sum()
    }

    /// Largest Chebyshev distance of any stuck cell, measured from the lattice itself
    pub fn crystal_radius(&self) -> usize {
        let mut radius = 0;
        for x in 0..self.size {
            for y in 0..self.size {
                if self.read(x, y) == Cell::Stuck {
                    radius = radius.max(self.chebyshev_from_center(Point::new(x, y)));
                }
            }
        }
        radius
    }

    /// Snapshot of each row, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = Vec<Cell>> + '_ {
        (0..self.size).map(move |x| (0..self.size).map(|y| self.read(x, y)).collect())
    }
}
