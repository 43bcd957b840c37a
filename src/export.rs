use crate::error::DlaError;
use crate::lattice::{Cell, Lattice};
use crate::summary::RunSummary;
use image::{GrayImage, Luma};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Write the lattice as `size` lines of comma-separated `0`/`1` values.
///
/// Lines are joined with `\n` and the last line has no trailing newline.
pub fn write_csv<W: Write>(lattice: &Lattice, writer: &mut W) -> io::Result<()> {
    for (x, row) in lattice.rows().enumerate() {
        if x > 0 {
            writer.write_all(b"\n")?;
        }
        for (y, cell) in row.iter().enumerate() {
            if y > 0 {
                writer.write_all(b",")?;
            }
            write!(writer, "{}", cell.bit())?;
        }
    }
    Ok(())
}

/// Write the CSV grid to `path`, creating or truncating the file
pub fn save_csv(lattice: &Lattice, path: &Path) -> Result<(), DlaError> {
    let file = File::create(path).map_err(|e| DlaError::write_failure(path, e))?;
    let mut writer = BufWriter::new(file);
    write_csv(lattice, &mut writer).map_err(|e| DlaError::write_failure(path, e))?;
    writer.flush().map_err(|e| DlaError::write_failure(path, e))
}

/// Grayscale PNG, one pixel per cell, stuck cells white
pub fn save_png(lattice: &Lattice, path: &Path) -> Result<(), DlaError> {
    let size = lattice.size() as u32;
    let mut image = GrayImage::new(size, size);
    for (x, row) in lattice.rows().enumerate() {
        for (y, cell) in row.into_iter().enumerate() {
            let value = if cell == Cell::Stuck { 255 } else { 0 };
            // Rows run down the image, columns across
            image.put_pixel(y as u32, x as u32, Luma([value]));
        }
    }
    image.save(path).map_err(|source| DlaError::ImageExport {
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty-printed JSON run report
pub fn save_summary(summary: &RunSummary, path: &Path) -> Result<(), DlaError> {
    let json =
        serde_json::to_string_pretty(summary).map_err(|e| DlaError::write_failure(path, e.into()))?;
    fs::write(path, json).map_err(|e| DlaError::write_failure(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::WalkerRng;
    use crate::simulation::DlaSimulation;
    use tempfile::{tempdir, NamedTempFile};

    fn parse_csv(text: &str) -> Vec<Vec<u8>> {
        text.split('\n')
            .map(|line| {
                line.split(',')
                    .map(|v| v.parse::<u8>().expect("cell value"))
                    .collect()
            })
            .collect()
    }

    fn csv_string(lattice: &Lattice) -> String {
        let mut buf = Vec::new();
        write_csv(lattice, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_single_cell_csv() {
        assert_eq!(csv_string(&Lattice::new(1)), "1");
    }

    #[test]
    fn test_three_grid_csv() {
        assert_eq!(csv_string(&Lattice::new(3)), "0,0,0\n0,1,0\n0,0,0");
    }

    #[test]
    fn test_row_is_x_column_is_y() {
        let lattice = Lattice::new(3);
        lattice.mark_stuck(0, 2);
        assert_eq!(csv_string(&lattice), "0,0,1\n0,1,0\n0,0,0");
    }

    #[test]
    fn test_csv_round_trip_after_run() {
        let sim = DlaSimulation::new(25);
        sim.run_sequential(200, &mut WalkerRng::seeded(8));

        let temp_file = NamedTempFile::new().unwrap();
        save_csv(sim.lattice(), temp_file.path()).unwrap();
        let text = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(!text.ends_with('\n'));

        let parsed = parse_csv(&text);
        assert_eq!(parsed.len(), 25);
        for (row, cells) in parsed.iter().zip(sim.lattice().rows()) {
            assert_eq!(row.len(), 25);
            let expected: Vec<u8> = cells.iter().map(|c| c.bit()).collect();
            assert_eq!(row, &expected);
        }
    }

    #[test]
    fn test_save_csv_reports_write_failure() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("parallel_result.txt");
        let err = save_csv(&Lattice::new(3), &path).unwrap_err();
        assert!(matches!(err, DlaError::WriteFailure { .. }));
    }

    #[test]
    fn test_save_png_dimensions() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("crystal.png");
        let lattice = Lattice::new(9);
        lattice.mark_stuck(0, 8);
        save_png(&lattice, &path).unwrap();

        let image = image::open(&path).unwrap().to_luma8();
        assert_eq!(image.dimensions(), (9, 9));
        assert_eq!(image.get_pixel(4, 4)[0], 255);
        assert_eq!(image.get_pixel(8, 0)[0], 255);
        assert_eq!(image.get_pixel(0, 8)[0], 0);
    }
}
