use super::error::{CodecError, FormatError};
use super::header::{bytes_per_sample, PgmHeader};
use crate::image::{ImageView, PixelGrid};
use crate::image::io::ensure_parent_dir;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Maxval written by default; output is always 16-bit.
pub const PGM_OUTPUT_MAX: u16 = 65535;

/// Float-to-sample conversion applied before clamping to `[0, maxval]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantization {
    /// Round half away from zero.
    #[default]
    Round,
    /// Drop the fractional part.
    Truncate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Declared maxval of the output (>= 1).
    pub max_value: u16,
    pub quantization: Quantization,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            max_value: PGM_OUTPUT_MAX,
            quantization: Quantization::Round,
        }
    }
}

impl EncodeOptions {
    pub fn new(max_value: u16) -> Self {
        Self {
            max_value,
            ..Self::default()
        }
    }

    pub fn with_quantization(mut self, quantization: Quantization) -> Self {
        self.quantization = quantization;
        self
    }
}

/// Map a normalized value to an integer sample in `[0, max_value]`.
///
/// NaN maps to 0.
#[inline]
pub fn quantize(value: f64, max_value: u16, quantization: Quantization) -> u16 {
    let max = f64::from(max_value);
    let scaled = value * max;
    let q = match quantization {
        Quantization::Round => scaled.round(),
        Quantization::Truncate => scaled.trunc(),
    };
    // Float-to-int `as` saturates and sends NaN to 0.
    q.clamp(0.0, max) as u16
}

/// Write `grid` as a binary PGM to `writer`.
pub fn encode<W: Write>(
    grid: &PixelGrid,
    writer: &mut W,
    options: EncodeOptions,
) -> Result<(), CodecError> {
    if options.max_value == 0 {
        return Err(FormatError::ZeroMaxValue.into());
    }
    let (w, h) = grid.dims();
    let (width, height) = match (u32::try_from(w), u32::try_from(h)) {
        (Ok(width), Ok(height)) => (width, height),
        _ => {
            return Err(FormatError::TooLarge {
                width: u32::try_from(w).unwrap_or(u32::MAX),
                height: u32::try_from(h).unwrap_or(u32::MAX),
            }
            .into())
        }
    };
    let header = PgmHeader {
        width,
        height,
        max_value: options.max_value,
    };
    header.write_to(writer)?;

    let bpp = bytes_per_sample(options.max_value);
    let mut row_bytes = Vec::with_capacity(w * bpp);
    for row in grid.rows() {
        row_bytes.clear();
        for &v in row {
            let sample = quantize(v, options.max_value, options.quantization);
            if bpp == 2 {
                row_bytes.extend_from_slice(&sample.to_be_bytes());
            } else {
                row_bytes.push(sample as u8);
            }
        }
        writer.write_all(&row_bytes)?;
    }
    Ok(())
}

/// Create `path` (and missing parent directories) and encode `grid` into it.
pub fn encode_file(grid: &PixelGrid, path: &Path, options: EncodeOptions) -> Result<(), CodecError> {
    ensure_parent_dir(path).map_err(|msg| CodecError::File {
        path: path.to_path_buf(),
        source: io::Error::other(msg),
    })?;
    let file = File::create(path).map_err(|source| CodecError::File {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    encode(grid, &mut writer, options).map_err(|e| e.at_path(path))?;
    writer.flush().map_err(|source| CodecError::File {
        path: path.to_path_buf(),
        source,
    })
}
