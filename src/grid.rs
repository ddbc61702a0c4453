use crate::{Error, Result};

/// Single-channel 8-bit image stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    data: Vec<u8>,
}

impl Grid {
    /// Wraps a row-major buffer, which must hold exactly `rows * cols` bytes.
    pub fn from_raw(rows: usize, cols: usize, data: Vec<u8>) -> Result<Self> {
        let expected = rows
            .checked_mul(cols)
            .ok_or(Error::OversizedImage { rows, cols })?;
        if data.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Grid { rows, cols, data })
    }

    pub fn filled(rows: usize, cols: usize, value: u8) -> Result<Self> {
        let len = rows
            .checked_mul(cols)
            .ok_or(Error::OversizedImage { rows, cols })?;
        Ok(Grid {
            rows,
            cols,
            data: vec![value; len],
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.data[row * self.cols + col]
    }

    #[inline]
    pub fn row(&self, row: usize) -> &[u8] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Pixels in row-major order.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Applies `f` to every pixel, keeping the dimensions.
    pub(crate) fn map(&self, f: impl Fn(u8) -> u8) -> Grid {
        Grid {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&px| f(px)).collect(),
        }
    }
}
