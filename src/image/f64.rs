//! Owned single-channel f64 grid in row-major layout (stride == width).
//!
//! Holds normalized intensities for the blur engine. Construction validates
//! that the grid is non-empty and that the backing storage matches the
//! declared shape, so downstream code can index without further checks.
use super::traits::ImageView;
use thiserror::Error;

/// Shape violations rejected by the [`PixelGrid`] constructors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("grid dimensions must be at least 1x1, got {w}x{h}")]
    EmptyDimensions { w: usize, h: usize },
    #[error("grid data has {actual} values, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}

#[derive(Clone, Debug, PartialEq)]
pub struct PixelGrid {
    /// Grid width in pixels (columns)
    pub(crate) w: usize,
    /// Grid height in pixels (rows)
    pub(crate) h: usize,
    /// Backing storage in row-major order
    pub(crate) data: Vec<f64>,
}

impl PixelGrid {
    /// Construct a zero-initialized grid of size `w × h`.
    pub fn new(w: usize, h: usize) -> Result<Self, GridError> {
        Self::filled(w, h, 0.0)
    }

    /// Construct a grid of size `w × h` with every pixel set to `value`.
    pub fn filled(w: usize, h: usize, value: f64) -> Result<Self, GridError> {
        check_dims(w, h)?;
        Ok(Self {
            w,
            h,
            data: vec![value; w * h],
        })
    }

    /// Wrap row-major `data` as a `w × h` grid.
    pub fn from_vec(w: usize, h: usize, data: Vec<f64>) -> Result<Self, GridError> {
        check_dims(w, h)?;
        let expected = w * h;
        if data.len() != expected {
            return Err(GridError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { w, h, data })
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    /// `(width, height)`
    pub fn dims(&self) -> (usize, usize) {
        (self.w, self.h)
    }

    #[inline]
    /// Convert (row, col) to a linear index into the backing storage.
    pub fn idx(&self, row: usize, col: usize) -> usize {
        row * self.w + col
    }

    #[inline]
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.data[self.idx(row, col)]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, v: f64) {
        let i = self.idx(row, col);
        self.data[i] = v;
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Smallest and largest value in the grid (NaN samples are ignored).
    pub fn min_max(&self) -> (f64, f64) {
        self.data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    pub fn mean(&self) -> f64 {
        self.sum() / self.data.len() as f64
    }
}

fn check_dims(w: usize, h: usize) -> Result<(), GridError> {
    if w == 0 || h == 0 {
        return Err(GridError::EmptyDimensions { w, h });
    }
    Ok(())
}

impl ImageView for PixelGrid {
    type Pixel = f64;

    #[inline]
    fn width(&self) -> usize {
        self.w
    }
    #[inline]
    fn height(&self) -> usize {
        self.h
    }
    #[inline]
    fn row(&self, y: usize) -> &[f64] {
        let start = y * self.w;
        &self.data[start..start + self.w]
    }
}
