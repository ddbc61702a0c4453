use crate::{Error, Result, HEADER_LEN, MAX_DIMENSION};
use std::io;

/// Grid dimensions as stored in the first four bytes of a compressed file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Header {
    pub rows: u16,
    pub cols: u16,
}

impl Header {
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows > MAX_DIMENSION || cols > MAX_DIMENSION {
            return Err(Error::OversizedImage { rows, cols });
        }
        Ok(Header {
            rows: rows as u16,
            cols: cols as u16,
        })
    }

    pub fn pixel_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    #[inline(always)]
    pub fn to_bytes(self) -> [u8; HEADER_LEN] {
        let [r0, r1] = self.rows.to_le_bytes();
        let [c0, c1] = self.cols.to_le_bytes();
        [r0, r1, c0, c1]
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(Error::MalformedStream(format!(
                "header needs {HEADER_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        let header = Header {
            rows: u16::from_le_bytes([bytes[0], bytes[1]]),
            cols: u16::from_le_bytes([bytes[2], bytes[3]]),
        };
        debug!(
            "header {} -> {}x{}",
            hex::encode(&bytes[..HEADER_LEN]),
            header.rows,
            header.cols
        );
        Ok(header)
    }

    pub fn write_to<W: io::Write>(self, writer: &mut W) -> io::Result<()> {
        let bytes = self.to_bytes();
        debug!("header {}x{} -> {}", self.rows, self.cols, hex::encode(bytes));
        writer.write_all(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::Header;
    use crate::Error;

    #[test]
    fn test_header_little_endian() {
        let header = Header::new(0x0102, 0xFF00).unwrap();
        assert_eq!(hex::encode(header.to_bytes()), "020100ff");
        assert_eq!(Header::from_bytes(&header.to_bytes()).unwrap(), header);
    }

    #[test]
    fn test_header_bounds() {
        assert!(Header::new(65535, 65535).is_ok());
        assert!(matches!(
            Header::new(65536, 1),
            Err(Error::OversizedImage { rows: 65536, cols: 1 })
        ));
        assert!(matches!(
            Header::new(1, 70000),
            Err(Error::OversizedImage { .. })
        ));
    }

    #[test]
    fn test_header_truncated() {
        assert!(matches!(
            Header::from_bytes(&[1, 0, 2]),
            Err(Error::MalformedStream(_))
        ));
    }
}
