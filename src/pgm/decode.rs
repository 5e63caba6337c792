use super::error::{CodecError, FormatError};
use super::header::{read_header, PgmHeader};
use crate::image::PixelGrid;
use log::debug;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

const INITIAL_READ_CAPACITY: usize = 1 << 20;

/// Grid decoded from a PGM stream together with the declared maxval.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedPgm {
    pub grid: PixelGrid,
    pub max_value: u16,
}

/// Decode a binary PGM from `reader`.
///
/// Samples are normalized to `sample / maxval`. Values above maxval are kept
/// as-is (normalized above 1.0) rather than clamped.
pub fn decode<R: BufRead>(mut reader: R) -> Result<DecodedPgm, CodecError> {
    let header = read_header(&mut reader)?;
    debug!(
        "PGM header: {}x{}, maxval {}",
        header.width, header.height, header.max_value
    );
    let grid = read_samples(&mut reader, &header)?;
    Ok(DecodedPgm {
        grid,
        max_value: header.max_value,
    })
}

/// Open `path` and decode it as a binary PGM.
pub fn decode_file(path: &Path) -> Result<DecodedPgm, CodecError> {
    let file = File::open(path).map_err(|source| CodecError::File {
        path: path.to_path_buf(),
        source,
    })?;
    decode(BufReader::new(file)).map_err(|e| e.at_path(path))
}

fn read_samples<R: Read>(reader: &mut R, header: &PgmHeader) -> Result<PixelGrid, CodecError> {
    let (width, height) = (header.width, header.height);
    let too_large = || FormatError::TooLarge { width, height };
    let w = usize::try_from(width).map_err(|_| too_large())?;
    let h = usize::try_from(height).map_err(|_| too_large())?;
    let count = w.checked_mul(h).ok_or_else(too_large)?;
    let bpp = header.bytes_per_sample();
    let byte_len = count.checked_mul(bpp).ok_or_else(too_large)?;

    // The header is untrusted: grow with the bytes actually read.
    let mut raw = Vec::with_capacity(byte_len.min(INITIAL_READ_CAPACITY));
    reader.by_ref().take(byte_len as u64).read_to_end(&mut raw)?;
    if raw.len() < byte_len {
        return Err(FormatError::TruncatedPixels {
            expected: count,
            read: raw.len() / bpp,
        }
        .into());
    }

    let scale = f64::from(header.max_value);
    let data: Vec<f64> = if bpp == 2 {
        raw.chunks_exact(2)
            .map(|pair| f64::from(u16::from_be_bytes([pair[0], pair[1]])) / scale)
            .collect()
    } else {
        raw.iter().map(|&b| f64::from(b) / scale).collect()
    };

    PixelGrid::from_vec(w, h, data).map_err(|_| FormatError::EmptyImage { width, height }.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pgm::CodecErrorKind;
    use std::io::Cursor;

    #[test]
    fn decodes_8bit_samples() {
        let bytes = b"P5\n2 2\n255\n\x00\xff\x80\x40";
        let decoded = decode(Cursor::new(&bytes[..])).unwrap();
        assert_eq!(decoded.max_value, 255);
        assert_eq!(decoded.grid.dims(), (2, 2));
        assert_eq!(decoded.grid.at(0, 0), 0.0);
        assert_eq!(decoded.grid.at(0, 1), 1.0);
        assert_eq!(decoded.grid.at(1, 0), 128.0 / 255.0);
        assert_eq!(decoded.grid.at(1, 1), 64.0 / 255.0);
    }

    #[test]
    fn decodes_16bit_big_endian_samples() {
        let bytes = b"P5\n3 1\n65535\n\x00\x00\x01\x00\xff\xff";
        let decoded = decode(Cursor::new(&bytes[..])).unwrap();
        assert_eq!(decoded.grid.as_slice(), &[0.0, 256.0 / 65535.0, 1.0]);
    }

    #[test]
    fn samples_above_maxval_are_not_clamped() {
        let bytes = b"P5\n1 1\n100\n\xc8";
        let decoded = decode(Cursor::new(&bytes[..])).unwrap();
        assert_eq!(decoded.grid.at(0, 0), 2.0);
    }

    #[test]
    fn reports_truncated_pixel_stream() {
        let bytes = b"P5\n2 2\n1000\n\x00\x01\x00\x02\x00";
        let err = decode(Cursor::new(&bytes[..])).unwrap_err();
        assert_eq!(err.kind(), CodecErrorKind::Format);
        assert!(matches!(
            err,
            CodecError::Format(FormatError::TruncatedPixels {
                expected: 4,
                read: 2
            })
        ));
    }

    #[test]
    fn oversized_header_on_short_stream_is_truncation() {
        let bytes = b"P5\n2000000 2000000\n65535\n\x00";
        let err = decode(Cursor::new(&bytes[..])).unwrap_err();
        assert!(matches!(
            err,
            CodecError::Format(FormatError::TruncatedPixels {
                expected: 4_000_000_000_000,
                read: 0
            })
        ));

        let bytes = b"P5\n4000000000 4000000000\n255\n\x00";
        let err = decode(Cursor::new(&bytes[..])).unwrap_err();
        assert_eq!(err.kind(), CodecErrorKind::Format);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = Path::new("definitely/not/here.pgm");
        let err = decode_file(path).unwrap_err();
        assert_eq!(err.kind(), CodecErrorKind::Io);
        assert!(err.to_string().contains("here.pgm"));
    }
}
