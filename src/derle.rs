use crate::{Error, Grid, Header, Result, Run, HEADER_LEN, MAX_RUN_LENGTH};
use std::io;

/// Fills a grid of known dimensions from run records, row-major.
pub struct DeRle {
    header: Header,
    data: Vec<u8>,
}

impl DeRle {
    /// Allocates as runs arrive, not from the header.
    pub fn new(header: Header) -> DeRle {
        DeRle {
            header,
            data: Vec::new(),
        }
    }

    /// Pixels still missing before the grid is full.
    pub fn remaining(&self) -> usize {
        self.header.pixel_count() - self.data.len()
    }

    pub fn is_complete(&self) -> bool {
        self.remaining() == 0
    }

    #[inline(always)]
    pub fn update(&mut self, run: Run) -> Result<()> {
        trace!("decode {run:?} at pixel {}", self.data.len());
        if run.length == 0 {
            return Err(Error::MalformedStream(format!(
                "zero-length run of value {} after {} pixels",
                run.value,
                self.data.len()
            )));
        }
        let remaining = self.remaining();
        if run.length as usize > remaining {
            return Err(Error::MalformedStream(format!(
                "run of {} pixels overflows the {}x{} grid ({remaining} left)",
                run.length, self.header.rows, self.header.cols
            )));
        }
        let len = self.data.len() + run.length as usize;
        self.data.resize(len, run.value);
        Ok(())
    }

    /// Feeds a slice of 2-byte run records.
    pub fn feed(&mut self, buf: &[u8]) -> Result<()> {
        let iter = buf.chunks_exact(2);
        if !iter.remainder().is_empty() {
            return Err(Error::MalformedStream(
                "truncated run record".to_string(),
            ));
        }
        for bytes in iter {
            self.update(Run::from_bytes([bytes[0], bytes[1]]))?;
        }
        Ok(())
    }

    pub fn finalize(self) -> Result<Grid> {
        let remaining = self.remaining();
        if remaining != 0 {
            return Err(Error::MalformedStream(format!(
                "stream ended with {remaining} of {} pixels missing",
                self.header.pixel_count()
            )));
        }
        Grid::from_raw(
            self.header.rows as usize,
            self.header.cols as usize,
            self.data,
        )
    }
}

/// Reconstructs a grid from a complete compressed file.
pub fn decode(bytes: &[u8]) -> Result<Grid> {
    let header = Header::from_bytes(bytes)?;
    let body = &bytes[HEADER_LEN..];
    if body.len() % 2 != 0 {
        return Err(Error::MalformedStream(
            "truncated run record".to_string(),
        ));
    }
    let max_pixels = body.len() / 2 * MAX_RUN_LENGTH as usize;
    if max_pixels < header.pixel_count() {
        return Err(Error::MalformedStream(format!(
            "stream ended early: {} run records cannot cover {} pixels",
            body.len() / 2,
            header.pixel_count()
        )));
    }
    let mut derle = DeRle::new(header);
    derle.data.reserve(header.pixel_count());
    for (i, bytes) in body.chunks_exact(2).enumerate() {
        if derle.is_complete() {
            return Err(Error::MalformedStream(format!(
                "{} trailing bytes after the last pixel",
                body.len() - i * 2
            )));
        }
        derle.update(Run::from_bytes([bytes[0], bytes[1]]))?;
    }
    derle.finalize()
}

pub fn decode_from<R: io::Read>(mut reader: R) -> Result<Grid> {
    let mut buf = vec![];
    reader.read_to_end(&mut buf)?;
    decode(&buf)
}
