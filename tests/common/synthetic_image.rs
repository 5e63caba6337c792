use std::fs;
use std::path::{Path, PathBuf};
use stencil_blur::PixelGrid;

/// Zero grid with a single pixel set to `value`.
pub fn spike(width: usize, height: usize, row: usize, col: usize, value: f64) -> PixelGrid {
    assert!(row < height && col < width, "spike must lie inside the grid");
    let mut grid = PixelGrid::new(width, height).expect("non-empty grid");
    grid.set(row, col, value);
    grid
}

/// Alternating two-level pattern with square cells of `cell` pixels.
pub fn checkerboard(width: usize, height: usize, cell: usize) -> PixelGrid {
    assert!(cell > 0, "cell size must be positive");
    let data = (0..height)
        .flat_map(|y| {
            (0..width).map(move |x| {
                if ((x / cell) + (y / cell)) & 1 == 0 {
                    0.125
                } else {
                    0.875
                }
            })
        })
        .collect();
    PixelGrid::from_vec(width, height, data).expect("shape matches data")
}

/// Reproducible pseudo-random values in `[lo, hi)` (xorshift64).
pub fn noise(width: usize, height: usize, seed: u64, lo: f64, hi: f64) -> PixelGrid {
    let mut state = seed.max(1);
    let data = (0..width * height)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let unit = (state >> 11) as f64 / (1u64 << 53) as f64;
            lo + unit * (hi - lo)
        })
        .collect();
    PixelGrid::from_vec(width, height, data).expect("shape matches data")
}

/// Per-test directory under the system temp dir, removed again on drop.
pub struct ScratchDir {
    root: PathBuf,
}

impl ScratchDir {
    pub fn new(name: &str) -> Self {
        let root =
            std::env::temp_dir().join(format!("stencil_blur_{}_{name}", std::process::id()));
        let _ = fs::remove_dir_all(&root);
        fs::create_dir_all(&root).expect("create scratch dir");
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.root.join(file)
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}
