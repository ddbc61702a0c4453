use crate::{Grid, Header, Result, HEADER_LEN, MAX_RUN_LENGTH};
use std::fmt::Debug;
use std::io::Write;
use std::{fmt, io};

/// One `(value, length)` record of the stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Run {
    pub value: u8,
    pub length: u8,
}

impl Run {
    #[inline(always)]
    pub fn to_bytes(self) -> [u8; 2] {
        [self.value, self.length]
    }

    #[inline(always)]
    pub fn from_bytes(bytes: [u8; 2]) -> Self {
        Run {
            value: bytes[0],
            length: bytes[1],
        }
    }
}

/// Streaming run-length encoder over row-major pixels.
///
/// Only the run records are written; the header is the caller's business,
/// see [`encode`].
pub struct Rle<W> {
    status: RleStatus,
    writer: W,
}

#[derive(Copy, Clone)]
enum RleStatus {
    Run { value: u8, counter: u8 },
    Wait,
}

impl<W: io::Write> Rle<W> {
    pub fn new(writer: W) -> Self {
        Rle {
            status: RleStatus::Wait,
            writer,
        }
    }

    #[inline(always)]
    pub fn update(&mut self, byte: u8) -> io::Result<()> {
        trace!("update byte {byte:02X}");
        trace!("current status {:?}", self.status);
        match self.status {
            RleStatus::Wait => {
                self.status = RleStatus::Run {
                    value: byte,
                    counter: 1,
                };
                trace!("transit to {:?}", self.status);
            }
            RleStatus::Run { value, counter } if value == byte => {
                let counter = counter + 1;
                self.status = RleStatus::Run { value, counter };
                if counter == MAX_RUN_LENGTH {
                    trace!("cut! counter: {counter}");
                    self.flush_run()?;
                }
            }
            RleStatus::Run { .. } => {
                self.flush_run()?;
                self.status = RleStatus::Run {
                    value: byte,
                    counter: 1,
                };
                trace!("transit to {:?}", self.status);
            }
        }
        Ok(())
    }

    #[inline(always)]
    fn flush_run(&mut self) -> io::Result<()> {
        if let Some(encode) = self.status.try_encode() {
            self.writer.write_all(&encode)?;
        }
        self.status = RleStatus::Wait;
        trace!("transit to {:?}", self.status);
        Ok(())
    }

    pub fn finalize(mut self) -> io::Result<()> {
        trace!("last block: {:?}", self.status);
        self.flush_run()?;
        self.writer.flush()
    }
}

impl RleStatus {
    #[inline(always)]
    fn try_encode(self) -> Option<[u8; 2]> {
        match self {
            RleStatus::Wait => None,
            RleStatus::Run { value, counter } => {
                debug_assert!(counter >= 1);
                let run = Run {
                    value,
                    length: counter,
                };
                trace!("encode {run:?}");
                Some(run.to_bytes())
            }
        }
    }
}

impl Debug for RleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RleStatus::Run { value, counter } => f
                .debug_struct("Run")
                .field("value", &format!("{value:02X}"))
                .field("counter", &counter)
                .finish(),
            RleStatus::Wait => f.write_str("Wait"),
        }
    }
}

impl<W: io::Write> io::Write for Rle<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for byte in buf.iter() {
            self.update(*byte)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Writes the header and the run records of `grid` to `writer`.
///
/// Dimensions are checked before anything is written.
pub fn encode<W: io::Write>(grid: &Grid, mut writer: W) -> Result<()> {
    let header = Header::new(grid.rows(), grid.cols())?;
    header.write_to(&mut writer)?;
    let mut rle = Rle::new(writer);
    rle.write_all(grid.as_raw())?;
    rle.finalize()?;
    Ok(())
}

pub fn encode_to_vec(grid: &Grid) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(HEADER_LEN + grid.pixel_count() / 4);
    encode(grid, &mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{encode_to_vec, Rle};
    use crate::{Error, Grid};
    use std::io::Write;
    use std::sync::Once;

    const TEST_VECTOR: [(&str, &str); 9] = [
        ("", ""),
        ("00", "0001"),
        ("05050505", "0504"),
        ("0a1414", "0a011402"),
        ("0102030303", "010102010303"),
        ("ff00ff", "ff010001ff01"),
        ("7f7f7f7f7f80", "7f058001"),
        ("0000ffff0000", "0002ff020002"),
        ("11223344", "1101220133014401"),
    ];

    static INIT: Once = Once::new();

    /// Setup function that is only run once, even if called multiple times.
    fn setup() {
        INIT.call_once(|| {
            let _ = pretty_env_logger::try_init();
        });
    }

    fn rle(input: &[u8]) -> Vec<u8> {
        let mut out = vec![];
        let mut rle = Rle::new(&mut out);
        rle.write_all(input).unwrap();
        rle.finalize().unwrap();
        out
    }

    #[test]
    fn test_rle_encode() {
        setup();
        for (input, expected) in TEST_VECTOR.into_iter() {
            let input = hex::decode(input).unwrap();
            let expected = hex::decode(expected).unwrap();
            assert_eq!(expected, rle(&input));
        }
    }

    #[test]
    fn test_rle_split_writes() {
        setup();
        let mut out = vec![];
        let mut rle = Rle::new(&mut out);
        rle.write_all(&[9, 9]).unwrap();
        rle.write_all(&[9]).unwrap();
        rle.write_all(&[3, 3]).unwrap();
        rle.finalize().unwrap();
        assert_eq!(out, [9, 3, 3, 2]);
    }

    #[test]
    fn test_rle_run_cap() {
        setup();
        assert_eq!(rle(&[0xAB; 254]), [0xAB, 254]);
        assert_eq!(rle(&[0xAB; 255]), [0xAB, 255]);
        assert_eq!(rle(&[0xAB; 256]), [0xAB, 255, 0xAB, 1]);
        assert_eq!(rle(&[0xAB; 510]), [0xAB, 255, 0xAB, 255]);

        // a capped run followed by a different value never emits a zero-length run
        let mut input = vec![7u8; 255];
        input.push(8);
        assert_eq!(rle(&input), [7, 255, 8, 1]);
    }

    #[test]
    fn test_encode_grid() {
        setup();
        let grid = Grid::from_raw(2, 2, vec![5, 5, 5, 5]).unwrap();
        assert_eq!(hex::encode(encode_to_vec(&grid).unwrap()), "020002000504");

        let grid = Grid::from_raw(1, 3, vec![10, 20, 20]).unwrap();
        assert_eq!(hex::encode(encode_to_vec(&grid).unwrap()), "010003000a011402");

        // runs continue across row boundaries
        let grid = Grid::from_raw(3, 2, vec![1, 1, 1, 2, 2, 2]).unwrap();
        assert_eq!(hex::encode(encode_to_vec(&grid).unwrap()), "0300020001030203");
    }

    #[test]
    fn test_encode_oversized() {
        setup();
        let grid = Grid::filled(70000, 1, 0).unwrap();
        let mut out = vec![];
        assert!(matches!(
            super::encode(&grid, &mut out),
            Err(Error::OversizedImage { rows: 70000, cols: 1 })
        ));
        assert!(out.is_empty());
    }

    #[test]
    fn test_encode_zero_dimension() {
        setup();
        let grid = Grid::filled(0, 4, 0).unwrap();
        assert_eq!(hex::encode(encode_to_vec(&grid).unwrap()), "00000400");
    }
}
