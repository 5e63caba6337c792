//! Fixed 3×3 weight tables consumed by the stencil evaluator.
//!
//! Rows are ordered top to bottom (`row - 1`, `row`, `row + 1`) and columns
//! left to right (`col - 1`, `col`, `col + 1`).

pub type Kernel3 = [[f64; 3]; 3];

/// Binomial approximation of a Gaussian: `[1 2 1; 2 4 2; 1 2 1] / 16`.
///
/// Every weight is a power of two, so multiplying by a weight rounds exactly
/// like dividing by its reciprocal.
pub const GAUSSIAN_3X3: Kernel3 = [
    [0.0625, 0.125, 0.0625],
    [0.125, 0.25, 0.125],
    [0.0625, 0.125, 0.0625],
];

/// Passes the centre sample through unchanged.
pub const IDENTITY_3X3: Kernel3 = [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]];

/// Sum of all nine weights, accumulated in row-major order.
pub fn kernel_sum(kernel: &Kernel3) -> f64 {
    kernel.iter().flatten().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gaussian_weights_are_normalized() {
        assert_eq!(kernel_sum(&GAUSSIAN_3X3), 1.0);
        assert_eq!(kernel_sum(&IDENTITY_3X3), 1.0);
    }

    #[test]
    fn gaussian_is_symmetric() {
        for r in 0..3 {
            for c in 0..3 {
                assert_eq!(GAUSSIAN_3X3[r][c], GAUSSIAN_3X3[c][r]);
                assert_eq!(GAUSSIAN_3X3[r][c], GAUSSIAN_3X3[2 - r][2 - c]);
            }
        }
    }
}
