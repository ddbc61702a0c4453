//! The full compression path: optional thresholding, then run-length coding.

use crate::{decode, encode_to_vec, multi_level_threshold, Grid, Header, Result, ThresholdParams};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct CompressOptions {
    /// Quantize to histogram peaks before encoding.
    pub multi_level: bool,
    pub params: ThresholdParams,
}

pub fn compress(grid: Grid, options: &CompressOptions) -> Result<Vec<u8>> {
    // reject before spending time on the histogram
    Header::new(grid.rows(), grid.cols())?;
    let grid = if options.multi_level {
        multi_level_threshold(&grid, &options.params)?
    } else {
        grid
    };
    encode_to_vec(&grid)
}

pub fn decompress(bytes: &[u8]) -> Result<Grid> {
    decode(bytes)
}
