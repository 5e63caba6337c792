//! Iterative 3×3 stencil smoothing.
//!
//! - `kernel`: weight tables (`GAUSSIAN_3X3` and friends).
//! - `stencil`: one border-clamped pass from a source grid into a
//!   destination grid.
//! - `engine`: double-buffered repetition of the pass without per-pass
//!   allocation.
//!
//! The engine is pure computation: it performs no I/O and emits no log
//! records. Because the kernel weights sum to one, each pass is a convex
//! combination of the previous values and cannot leave the input's range
//! beyond rounding.

pub mod engine;
pub mod kernel;
pub(crate) mod stencil;

pub use engine::{blur, BlurEngine, DoubleBuffer};
pub use kernel::{kernel_sum, Kernel3, GAUSSIAN_3X3, IDENTITY_3X3};
