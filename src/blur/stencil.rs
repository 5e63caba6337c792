//! Single stencil pass with border clamping (replicate).
//!
//! Each output pixel is the weighted sum of its 3×3 neighbourhood in the
//! source grid. Out-of-range neighbour coordinates are pinned to the nearest
//! valid row/column. The nine products are accumulated left to right, top
//! row first, so results are reproducible bit for bit.
//!
//! With the `parallel` feature the rows of one pass are evaluated on the
//! rayon pool. Every row reads only the immutable source grid and writes a
//! disjoint slice of the destination, so the output does not depend on the
//! feature.
use super::kernel::Kernel3;
use crate::image::{ImageView, PixelGrid};

/// Evaluate the stencil for every column of `row`, writing into `out`.
#[inline]
pub(crate) fn stencil_row(src: &PixelGrid, row: usize, kernel: &Kernel3, out: &mut [f64]) {
    let w = src.w;
    let h = src.h;
    debug_assert_eq!(out.len(), w);

    let up = src.row(row.saturating_sub(1));
    let mid = src.row(row);
    let down = src.row((row + 1).min(h - 1));
    let [k_up, k_mid, k_down] = kernel;

    for (col, dst) in out.iter_mut().enumerate() {
        let c1 = col.saturating_sub(1);
        let c2 = (col + 1).min(w - 1);
        *dst = up[c1] * k_up[0]
            + up[col] * k_up[1]
            + up[c2] * k_up[2]
            + mid[c1] * k_mid[0]
            + mid[col] * k_mid[1]
            + mid[c2] * k_mid[2]
            + down[c1] * k_down[0]
            + down[col] * k_down[1]
            + down[c2] * k_down[2];
    }
}

/// Write one full pass of `kernel` over `src` into `dst`.
///
/// Both grids must have the same shape.
pub(crate) fn stencil_pass(src: &PixelGrid, dst: &mut PixelGrid, kernel: &Kernel3) {
    assert_eq!(src.dims(), dst.dims(), "stencil buffers must share a shape");
    fill_rows(src, dst, kernel);
}

#[cfg(not(feature = "parallel"))]
fn fill_rows(src: &PixelGrid, dst: &mut PixelGrid, kernel: &Kernel3) {
    for (row, out) in dst.data.chunks_mut(src.w).enumerate() {
        stencil_row(src, row, kernel, out);
    }
}

#[cfg(feature = "parallel")]
fn fill_rows(src: &PixelGrid, dst: &mut PixelGrid, kernel: &Kernel3) {
    use rayon::prelude::*;

    dst.data
        .par_chunks_mut(src.w)
        .enumerate()
        .for_each(|(row, out)| stencil_row(src, row, kernel, out));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blur::kernel::{GAUSSIAN_3X3, IDENTITY_3X3};

    fn grid(w: usize, h: usize, data: &[f64]) -> PixelGrid {
        PixelGrid::from_vec(w, h, data.to_vec()).unwrap()
    }

    #[test]
    fn identity_kernel_copies_source() {
        let src = grid(3, 2, &[0.1, 0.2, 0.3, 0.4, 0.5, 0.6]);
        let mut dst = PixelGrid::new(3, 2).unwrap();
        stencil_pass(&src, &mut dst, &IDENTITY_3X3);
        assert_eq!(dst, src);
    }

    #[test]
    fn left_neighbour_kernel_replicates_first_column() {
        let pick_left = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 0.0]];
        let src = grid(4, 1, &[1.0, 2.0, 3.0, 4.0]);
        let mut dst = PixelGrid::new(4, 1).unwrap();
        stencil_pass(&src, &mut dst, &pick_left);
        assert_eq!(dst.as_slice(), &[1.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn bottom_neighbour_kernel_replicates_last_row() {
        let pick_down = [[0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let src = grid(1, 3, &[1.0, 2.0, 3.0]);
        let mut dst = PixelGrid::new(1, 3).unwrap();
        stencil_pass(&src, &mut dst, &pick_down);
        assert_eq!(dst.as_slice(), &[2.0, 3.0, 3.0]);
    }

    #[test]
    fn gaussian_matches_hand_computed_corner() {
        // Top-left corner of a 2x2 grid: r1 = row, c1 = col.
        let src = grid(2, 2, &[1.0, 0.0, 0.0, 0.0]);
        let mut dst = PixelGrid::new(2, 2).unwrap();
        stencil_pass(&src, &mut dst, &GAUSSIAN_3X3);
        // (0,0): 1/16 + 1/8 + 1/8 + 1/4 = 9/16
        assert_eq!(dst.at(0, 0), 0.5625);
        // (0,1): neighbours at col 0 contribute 1/16 + 1/8
        assert_eq!(dst.at(0, 1), 0.1875);
        assert_eq!(dst.at(1, 0), 0.1875);
        // (1,1): only the (r1, c1) tap sees the spike
        assert_eq!(dst.at(1, 1), 0.0625);
    }

    #[test]
    fn term_order_matches_division_form() {
        let values = [0.3, 0.7, 0.1, 0.9, 0.55, 0.2, 0.45, 0.05, 0.8];
        let src = grid(3, 3, &values);
        let mut dst = PixelGrid::new(3, 3).unwrap();
        stencil_pass(&src, &mut dst, &GAUSSIAN_3X3);
        let p = |r: usize, c: usize| src.at(r, c);
        let expected = p(0, 0) / 16.0
            + p(0, 1) / 8.0
            + p(0, 2) / 16.0
            + p(1, 0) / 8.0
            + p(1, 1) / 4.0
            + p(1, 2) / 8.0
            + p(2, 0) / 16.0
            + p(2, 1) / 8.0
            + p(2, 2) / 16.0;
        assert_eq!(dst.at(1, 1).to_bits(), expected.to_bits());
    }
}
