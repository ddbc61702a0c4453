//! Multi-level thresholding.
//!
//! Peaks of the intensity histogram become quantization levels, and every
//! pixel snaps to its nearest level. `0` and `255` are always levels.

use crate::{Error, Grid, Pdf, Result, INTENSITIES};

pub const DEFAULT_WINDOW: usize = 5;
pub const DEFAULT_THRESHOLD: f32 = 0.0003;

/// Peaks that fit between the two boundary levels.
const MAX_PEAKS: usize = INTENSITIES - 2;
const MAX_WINDOW: usize = 127;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ThresholdParams {
    /// Half-width of the sliding window.
    pub window: usize,
    /// How far above the window mean a peak must rise.
    pub threshold: f32,
}

impl Default for ThresholdParams {
    fn default() -> Self {
        ThresholdParams {
            window: DEFAULT_WINDOW,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl ThresholdParams {
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 || self.window > MAX_WINDOW {
            return Err(Error::Configuration(format!(
                "window half-width must be in 1..={MAX_WINDOW}, got {}",
                self.window
            )));
        }
        if !self.threshold.is_finite() {
            return Err(Error::Configuration(format!(
                "threshold must be finite, got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}

/// Strictly ascending quantization levels, first `0`, last `255`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelSet {
    levels: Vec<u8>,
}

impl LevelSet {
    pub fn levels(&self) -> &[u8] {
        &self.levels
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Closest level to `value`; on a tie the lower level wins.
    pub fn nearest(&self, value: u8) -> u8 {
        let mut best = self.levels[0];
        let mut min = u16::MAX;
        for &level in self.levels.iter() {
            let distance = (value as i16 - level as i16).unsigned_abs();
            if distance < min {
                min = distance;
                best = level;
            }
        }
        best
    }

    fn lookup_table(&self) -> [u8; INTENSITIES] {
        let mut lut = [0u8; INTENSITIES];
        for (value, slot) in lut.iter_mut().enumerate() {
            *slot = self.nearest(value as u8);
        }
        lut
    }
}

/// Scans the histogram for peaks and returns them between the boundary levels.
pub fn select_levels(pdf: &Pdf, params: &ThresholdParams) -> Result<LevelSet> {
    params.validate()?;
    let w = params.window;
    let pdf = pdf.as_slice();

    let mut levels = Vec::with_capacity(INTENSITIES);
    levels.push(0u8);
    for k in w..(INTENSITIES - 1 - w) {
        let window = &pdf[k - w..=k + w];
        let avg = window.iter().sum::<f32>() / (2 * w + 1) as f32;
        if pdf[k] <= avg + params.threshold {
            continue;
        }
        let local_max = window.iter().copied().fold(0f32, f32::max);
        if pdf[k] != local_max {
            continue;
        }
        if levels.len() - 1 == MAX_PEAKS {
            return Err(Error::TooManyLevels {
                count: levels.len(),
            });
        }
        trace!("peak at {k}: pdf={} avg={avg}", pdf[k]);
        levels.push(k as u8);
    }
    levels.push(u8::MAX);

    debug!("selected {} levels: {:?}", levels.len(), levels);
    Ok(LevelSet { levels })
}

/// Replaces every pixel with its nearest level.
pub fn quantize(grid: &Grid, levels: &LevelSet) -> Grid {
    let lut = levels.lookup_table();
    grid.map(|px| lut[px as usize])
}

/// Histogram, level selection and quantization in one pass over `grid`.
pub fn multi_level_threshold(grid: &Grid, params: &ThresholdParams) -> Result<Grid> {
    let pdf = Pdf::from_grid(grid)?;
    let levels = select_levels(&pdf, params)?;
    Ok(quantize(grid, &levels))
}
