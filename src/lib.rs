//! Iterative 3×3 weighted-average smoothing of grayscale rasters.
//!
//! The crate is split into a pure numeric core and the plumbing around it:
//!
//! - [`blur`]: the double-buffered stencil engine. It consumes a normalized
//!   [`PixelGrid`] and returns a grid of the same shape after `b` passes of
//!   the fixed `[1 2 1; 2 4 2; 1 2 1] / 16` kernel with replicated borders.
//! - [`pgm`]: binary PGM (`P5`) decode/encode, 8- or 16-bit samples.
//! - [`image`]: the grid type, row views and auxiliary PNG/JSON output.
//! - [`config`], [`diagnostics`]: driver configuration and run report.
//!
//! ```
//! use stencil_blur::{blur, PixelGrid};
//!
//! let mut spike = PixelGrid::new(5, 5).unwrap();
//! spike.set(2, 2, 1.0);
//! let out = blur(&spike, 4);
//! assert_eq!(out.dims(), (5, 5));
//! assert!(out.at(2, 2) < 1.0);
//! ```

pub mod blur;
pub mod config;
pub mod diagnostics;
pub mod image;
pub mod pgm;

pub use crate::blur::{blur, BlurEngine, Kernel3, GAUSSIAN_3X3};
pub use crate::image::{GridError, PixelGrid};
pub use crate::pgm::{CodecError, CodecErrorKind, EncodeOptions, FormatError, Quantization};
