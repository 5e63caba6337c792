//! Double-buffered iterative blur engine.
//!
//! The engine owns two grids of identical shape. One holds the latest values
//! (the source of the next pass), the other receives the pass output; an
//! index flips after every complete pass. Buffers are allocated when the
//! engine first sees a shape and reused for all passes and for later runs on
//! grids of the same shape.
use super::kernel::{Kernel3, GAUSSIAN_3X3};
use super::stencil::stencil_pass;
use crate::image::PixelGrid;

/// Source/destination pair with a flip index.
#[derive(Clone, Debug)]
pub struct DoubleBuffer {
    buffers: [PixelGrid; 2],
    current: usize,
}

impl DoubleBuffer {
    /// Take ownership of `grid` as the current buffer and allocate a scratch
    /// buffer of the same shape.
    pub fn from_grid(grid: PixelGrid) -> Self {
        let scratch = PixelGrid {
            w: grid.w,
            h: grid.h,
            data: vec![0.0; grid.data.len()],
        };
        Self {
            buffers: [grid, scratch],
            current: 0,
        }
    }

    pub fn dims(&self) -> (usize, usize) {
        self.buffers[0].dims()
    }

    /// Overwrite the current buffer with `grid`. Shapes must match.
    fn load(&mut self, grid: &PixelGrid) {
        debug_assert_eq!(self.dims(), grid.dims());
        self.current = 0;
        self.buffers[0].data.copy_from_slice(&grid.data);
    }

    /// Move `grid` in as the current buffer; the other buffer stays as
    /// scratch. Shapes must match.
    fn adopt(&mut self, grid: PixelGrid) {
        debug_assert_eq!(self.dims(), grid.dims());
        self.buffers[0] = grid;
        self.current = 0;
    }

    /// Apply one pass of `kernel`, then swap roles.
    pub fn step(&mut self, kernel: &Kernel3) {
        let (head, tail) = self.buffers.split_at_mut(1);
        let (src, dst) = if self.current == 0 {
            (&head[0], &mut tail[0])
        } else {
            (&tail[0], &mut head[0])
        };
        stencil_pass(src, dst, kernel);
        self.current ^= 1;
    }

    /// Buffer holding the most recently written values.
    pub fn latest(&self) -> &PixelGrid {
        &self.buffers[self.current]
    }

    /// Consume the pair, keeping only the latest buffer.
    pub fn into_latest(self) -> PixelGrid {
        let [a, b] = self.buffers;
        if self.current == 0 {
            a
        } else {
            b
        }
    }
}

/// Applies a fixed 3×3 stencil to a grid a given number of times.
///
/// ```
/// use stencil_blur::{BlurEngine, PixelGrid};
///
/// let input = PixelGrid::filled(3, 3, 1.0).unwrap();
/// let mut engine = BlurEngine::new();
/// let out = engine.run(&input, 10);
/// assert_eq!(out, input);
/// ```
#[derive(Clone, Debug)]
pub struct BlurEngine {
    kernel: Kernel3,
    state: Option<DoubleBuffer>,
}

impl Default for BlurEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl BlurEngine {
    /// Engine using [`GAUSSIAN_3X3`].
    pub fn new() -> Self {
        Self::with_kernel(GAUSSIAN_3X3)
    }

    pub fn with_kernel(kernel: Kernel3) -> Self {
        Self {
            kernel,
            state: None,
        }
    }

    /// Blur `input` with `passes` applications of the kernel.
    ///
    /// The returned grid is an independent copy; the engine keeps its
    /// buffers for the next call. `passes == 0` returns a copy of `input`.
    pub fn run(&mut self, input: &PixelGrid, passes: usize) -> PixelGrid {
        let kernel = self.kernel;
        let state = self.prepare(input);
        for _ in 0..passes {
            state.step(&kernel);
        }
        state.latest().clone()
    }

    /// Like [`BlurEngine::run`] but takes the input by value and consumes
    /// the engine: `input` becomes the first source buffer and the final
    /// buffer is moved out instead of copied.
    pub fn run_owned(mut self, input: PixelGrid, passes: usize) -> PixelGrid {
        let kernel = self.kernel;
        let mut state = match self.state.take() {
            Some(mut state) if state.dims() == input.dims() => {
                state.adopt(input);
                state
            }
            _ => DoubleBuffer::from_grid(input),
        };
        for _ in 0..passes {
            state.step(&kernel);
        }
        state.into_latest()
    }

    fn prepare(&mut self, input: &PixelGrid) -> &mut DoubleBuffer {
        let reuse = matches!(&self.state, Some(state) if state.dims() == input.dims());
        if !reuse {
            self.state = None;
        }
        let state = self
            .state
            .get_or_insert_with(|| DoubleBuffer::from_grid(input.clone()));
        if reuse {
            state.load(input);
        }
        state
    }
}

/// Blur `input` with `passes` applications of [`GAUSSIAN_3X3`].
pub fn blur(input: &PixelGrid, passes: usize) -> PixelGrid {
    let mut state = DoubleBuffer::from_grid(input.clone());
    for _ in 0..passes {
        state.step(&GAUSSIAN_3X3);
    }
    state.into_latest()
}
