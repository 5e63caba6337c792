//! Textual `P5` header tokenizer.
//!
//! Tokens are ASCII decimal integers separated by whitespace. A `#` starts a
//! comment that runs to the end of the line. The header ends with exactly
//! one whitespace byte after the maxval token.
use super::error::{CodecError, FormatError};
use std::io::{self, BufRead, Write};

pub const MAGIC: &[u8; 2] = b"P5";
/// Largest maxval a binary PGM may declare.
pub const MAX_SAMPLE_VALUE: u32 = 65535;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PgmHeader {
    pub width: u32,
    pub height: u32,
    pub max_value: u16,
}

impl PgmHeader {
    /// Bytes per sample: 2 when `max_value > 255`, else 1.
    pub fn bytes_per_sample(&self) -> usize {
        bytes_per_sample(self.max_value)
    }

    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(
            writer,
            "P5\n{} {}\n{}\n",
            self.width, self.height, self.max_value
        )
    }
}

pub fn bytes_per_sample(max_value: u16) -> usize {
    if max_value > 255 {
        2
    } else {
        1
    }
}

/// Parse and validate the header, leaving `reader` at the first sample byte.
pub fn read_header<R: BufRead>(reader: &mut R) -> Result<PgmHeader, CodecError> {
    let mut magic = [0u8; 2];
    for byte in &mut magic {
        *byte = next_byte(reader)?.ok_or(FormatError::BadMagic)?;
    }
    if &magic != MAGIC {
        return Err(FormatError::BadMagic.into());
    }
    match peek_byte(reader)? {
        Some(b) if b.is_ascii_whitespace() || b == b'#' => {}
        _ => return Err(FormatError::BadMagic.into()),
    }

    let width = read_uint(reader, "width")?;
    let height = read_uint(reader, "height")?;
    let max_value = read_uint(reader, "maxval")?;

    // Single separator byte before the raster.
    match next_byte(reader)? {
        Some(b) if b.is_ascii_whitespace() => {}
        Some(_) => return Err(FormatError::MalformedHeader { field: "maxval" }.into()),
        None => {}
    }

    if max_value > MAX_SAMPLE_VALUE {
        return Err(FormatError::MaxValueTooLarge(max_value).into());
    }
    if max_value == 0 {
        return Err(FormatError::ZeroMaxValue.into());
    }
    if width == 0 || height == 0 {
        return Err(FormatError::EmptyImage { width, height }.into());
    }

    Ok(PgmHeader {
        width,
        height,
        max_value: max_value as u16,
    })
}

fn read_uint<R: BufRead>(reader: &mut R, field: &'static str) -> Result<u32, CodecError> {
    skip_separators(reader)?;
    let mut value: u32 = 0;
    let mut digits = 0usize;
    while let Some(b) = peek_byte(reader)? {
        if !b.is_ascii_digit() {
            break;
        }
        reader.consume(1);
        digits += 1;
        value = value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u32::from(b - b'0')))
            .ok_or(FormatError::MalformedHeader { field })?;
    }
    if digits == 0 {
        return Err(FormatError::MalformedHeader { field }.into());
    }
    Ok(value)
}

fn skip_separators<R: BufRead>(reader: &mut R) -> Result<(), CodecError> {
    let mut in_comment = false;
    while let Some(b) = peek_byte(reader)? {
        if in_comment {
            in_comment = b != b'\n' && b != b'\r';
        } else if b == b'#' {
            in_comment = true;
        } else if !b.is_ascii_whitespace() {
            break;
        }
        reader.consume(1);
    }
    Ok(())
}

fn peek_byte<R: BufRead>(reader: &mut R) -> io::Result<Option<u8>> {
    loop {
        match reader.fill_buf() {
            Ok(buf) => return Ok(buf.first().copied()),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

fn next_byte<R: BufRead>(reader: &mut R) -> io::Result<Option<u8>> {
    let b = peek_byte(reader)?;
    if b.is_some() {
        reader.consume(1);
    }
    Ok(b)
}
