//! Binary PGM (P5) format.
//!
//! ```text
//! Header (ASCII, whitespace separated, `#` starts a comment to end of line):
//!   Magic: "P5"
//!   Width
//!   Height
//!   Max value: 255
//!   One whitespace byte
//!
//! Pixel data:
//!   width * height bytes, row-major
//! ```

use std::io::{BufRead, Read, Write};

use super::IoError;

/// Magic bytes identifying a binary greymap.
pub const PGM_MAGIC: &str = "P5";

/// The only max value cells are stored with.
pub const PGM_MAX_VALUE: u16 = 255;

/// Parsed PGM header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PgmHeader {
    pub width: usize,
    pub height: usize,
    pub max_value: u16,
}

impl PgmHeader {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            max_value: PGM_MAX_VALUE,
        }
    }

    /// Size of the pixel payload in bytes.
    ///
    /// Fails if `width * height` does not fit in `usize`.
    pub fn frame_size(&self) -> Result<usize, IoError> {
        self.width.checked_mul(self.height).ok_or_else(|| {
            IoError::InvalidHeader(format!(
                "{}x{} image is too large",
                self.width, self.height
            ))
        })
    }

    /// Write header to output.
    pub fn write_to<W: Write>(&self, w: &mut W) -> Result<(), IoError> {
        write!(
            w,
            "{}\n{} {}\n{}\n",
            PGM_MAGIC, self.width, self.height, self.max_value
        )?;
        Ok(())
    }

    /// Read header from input, leaving the reader at the first pixel byte.
    pub fn read_from<R: BufRead>(r: &mut R) -> Result<Self, IoError> {
        let magic = read_token(r)?;
        if magic != PGM_MAGIC {
            return Err(IoError::InvalidHeader(format!(
                "expected magic {}, found {:?}",
                PGM_MAGIC, magic
            )));
        }

        let width = parse_number(&read_token(r)?, "width")?;
        let height = parse_number(&read_token(r)?, "height")?;
        let max_value = parse_number(&read_token(r)?, "max value")?;
        if max_value != PGM_MAX_VALUE as usize {
            return Err(IoError::UnsupportedMaxValue(max_value));
        }

        let header = Self::new(width, height);
        header.frame_size()?;
        Ok(header)
    }
}

/// Write a complete image.
pub fn write_pgm<W: Write>(w: &mut W, width: usize, height: usize, cells: &[u8]) -> Result<(), IoError> {
    let header = PgmHeader::new(width, height);
    let expected = header.frame_size()?;
    if cells.len() != expected {
        return Err(IoError::Truncated {
            expected,
            found: cells.len(),
        });
    }
    header.write_to(w)?;
    w.write_all(cells)?;
    w.flush()?;
    Ok(())
}

/// Read a complete image.
pub fn read_pgm<R: BufRead>(r: &mut R) -> Result<(PgmHeader, Vec<u8>), IoError> {
    let header = PgmHeader::read_from(r)?;
    let cells = read_payload(r, &header)?;
    Ok((header, cells))
}

/// Read the pixel data that follows `header`.
///
/// The buffer grows with the bytes actually present, so a header claiming
/// a huge image cannot force a huge allocation.
pub fn read_payload<R: Read>(r: &mut R, header: &PgmHeader) -> Result<Vec<u8>, IoError> {
    let expected = header.frame_size()?;
    let mut cells = Vec::new();
    r.take(expected as u64).read_to_end(&mut cells)?;
    if cells.len() != expected {
        return Err(IoError::Truncated {
            expected,
            found: cells.len(),
        });
    }
    Ok(cells)
}

fn parse_number(token: &str, field: &str) -> Result<usize, IoError> {
    token
        .parse()
        .map_err(|_| IoError::InvalidHeader(format!("bad {}: {:?}", field, token)))
}

/// Read one whitespace-delimited header token, skipping comments. Consumes
/// the single whitespace byte that terminates the token.
fn read_token<R: BufRead>(r: &mut R) -> Result<String, IoError> {
    let mut token = String::new();
    let mut in_comment = false;
    let mut byte = [0u8; 1];

    loop {
        if r.read(&mut byte)? == 0 {
            if token.is_empty() {
                return Err(IoError::InvalidHeader("unexpected end of header".into()));
            }
            return Ok(token);
        }
        let b = byte[0];

        if in_comment {
            if b == b'\n' {
                in_comment = false;
            }
            continue;
        }
        if b == b'#' && token.is_empty() {
            in_comment = true;
            continue;
        }
        if b.is_ascii_whitespace() {
            if token.is_empty() {
                continue;
            }
            return Ok(token);
        }
        token.push(b as char);
    }
}
