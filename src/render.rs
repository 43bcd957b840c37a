use crate::lattice::{Cell, Lattice};
use crate::settings::ConsoleView;

/// Braille character rendering for a compact console view of the crystal.
/// Each Braille character represents a 2x4 block of cells (8 dots total).
///
/// Dot positions and their bit values:
/// ```text
/// (0,0)=0x01  (1,0)=0x08
/// (0,1)=0x02  (1,1)=0x10
/// (0,2)=0x04  (1,2)=0x20
/// (0,3)=0x40  (1,3)=0x80
/// ```
///
/// Unicode Braille patterns: U+2800 to U+28FF (256 patterns)
const BRAILLE_BASE: u32 = 0x2800;

/// Dot position to bit mapping for Braille characters
const BRAILLE_DOTS: [[u8; 4]; 2] = [
    [0x01, 0x02, 0x04, 0x40], // Left column: rows 0,1,2,3
    [0x08, 0x10, 0x20, 0x80], // Right column: rows 0,1,2,3
];

/// Render the lattice in the requested console style
pub fn render(lattice: &Lattice, view: ConsoleView) -> String {
    match view {
        ConsoleView::Plain => render_plain(lattice),
        ConsoleView::Braille => render_braille(lattice),
    }
}

/// `X` for stuck cells and `-` for empty ones, each followed by a space
pub fn render_plain(lattice: &Lattice) -> String {
    let mut out = String::with_capacity(lattice.size() * (lattice.size() * 2 + 1));
    for row in lattice.rows() {
        for cell in row {
            out.push(if cell == Cell::Stuck { 'X' } else { '-' });
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

/// Pack each 2-column by 4-row block of cells into one braille glyph
pub fn render_braille(lattice: &Lattice) -> String {
    let size = lattice.size();
    let rows: Vec<Vec<Cell>> = lattice.rows().collect();
    let glyph_rows = size.div_ceil(4);
    let glyph_cols = size.div_ceil(2);

    let mut out = String::with_capacity(glyph_rows * (glyph_cols * 3 + 1));
    for gy in 0..glyph_rows {
        for gx in 0..glyph_cols {
            let mut pattern: u8 = 0;
            for (dx, column) in BRAILLE_DOTS.iter().enumerate() {
                for (dy, &bit) in column.iter().enumerate() {
                    let row = gy * 4 + dy;
                    let col = gx * 2 + dx;
                    if row < size && col < size && rows[row][col] == Cell::Stuck {
                        pattern |= bit;
                    }
                }
            }
            // Always a valid braille code point
            out.push(char::from_u32(BRAILLE_BASE + pattern as u32).unwrap_or(' '));
        }
        out.push('\n');
    }
    out
}
