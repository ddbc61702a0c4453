use crate::{Error, Grid, Result, INTENSITIES};

/// Normalized intensity histogram of a grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Pdf([f32; INTENSITIES]);

impl Pdf {
    /// `pdf[v]` is the share of pixels with intensity `v`.
    pub fn from_grid(grid: &Grid) -> Result<Self> {
        if grid.is_empty() {
            return Err(Error::EmptyImage);
        }
        let mut counts = [0u64; INTENSITIES];
        for &px in grid.as_raw() {
            counts[px as usize] += 1;
        }
        let total = grid.pixel_count() as f32;
        let mut pdf = [0f32; INTENSITIES];
        for (p, &count) in pdf.iter_mut().zip(counts.iter()) {
            *p = count as f32 / total;
        }
        Ok(Pdf(pdf))
    }

    #[inline]
    pub fn get(&self, value: u8) -> f32 {
        self.0[value as usize]
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.0.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::Pdf;
    use crate::{Error, Grid};

    #[test]
    fn test_pdf_counts() {
        let grid = Grid::from_raw(2, 2, vec![0, 0, 0, 200]).unwrap();
        let pdf = Pdf::from_grid(&grid).unwrap();
        assert_eq!(pdf.get(0), 0.75);
        assert_eq!(pdf.get(200), 0.25);
        assert_eq!(pdf.iter().filter(|&p| p != 0.0).count(), 2);
    }

    #[test]
    fn test_pdf_empty() {
        assert!(matches!(
            Pdf::from_grid(&Grid::filled(0, 3, 0).unwrap()),
            Err(Error::EmptyImage)
        ));
    }
}
