//! Bridge to the `image` crate: any readable format in, 8-bit grayscale out.

use crate::{Error, Grid, Result};
use image::GrayImage;
use std::path::Path;

/// Reads an image file and converts it to 8-bit grayscale.
pub fn load_grayscale(path: &Path) -> Result<Grid> {
    let img = image::open(path)?.into_luma8();
    let rows = img.height() as usize;
    let cols = img.width() as usize;
    debug!("loaded {} as {rows}x{cols}", path.display());
    Grid::from_raw(rows, cols, img.into_raw())
}

/// Writes `grid` as a grayscale image; the format follows the file extension.
pub fn save_grayscale(grid: &Grid, path: &Path) -> Result<()> {
    let oversized = || Error::OversizedImage {
        rows: grid.rows(),
        cols: grid.cols(),
    };
    let width = u32::try_from(grid.cols()).map_err(|_| oversized())?;
    let height = u32::try_from(grid.rows()).map_err(|_| oversized())?;
    let img = GrayImage::from_raw(width, height, grid.as_raw().to_vec()).ok_or(
        Error::DimensionMismatch {
            expected: grid.rows() * grid.cols(),
            actual: grid.pixel_count(),
        },
    )?;
    img.save(path)?;
    debug!("saved {}x{} to {}", grid.rows(), grid.cols(), path.display());
    Ok(())
}
