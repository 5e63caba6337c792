//! Binary grayscale PGM (`P5`) codec.
//!
//! - `decode` / `decode_file`: parse the textual header (magic, width,
//!   height, maxval ≤ 65535) and the raw sample stream into a normalized
//!   [`PixelGrid`](crate::image::PixelGrid).
//! - `encode` / `encode_file`: quantize a grid against a configurable maxval
//!   and write it back.
//!
//! Samples take one byte when maxval ≤ 255 and two big-endian bytes
//! otherwise, in both directions.

pub mod decode;
pub mod encode;
pub mod error;
pub mod header;

pub use decode::{decode, decode_file, DecodedPgm};
pub use encode::{encode, encode_file, quantize, EncodeOptions, Quantization, PGM_OUTPUT_MAX};
pub use error::{CodecError, CodecErrorKind, FormatError};
pub use header::{PgmHeader, MAX_SAMPLE_VALUE};
