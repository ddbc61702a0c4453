//! # Compressed File Layout
//!
//! ```text
//!         byte 0   byte 1   byte 2   byte 3
//!        ┌────────┬────────┬────────┬────────┐
//!        │  rows (u16 LE)  │  cols (u16 LE)  │
//!        └────────┴────────┴────────┴────────┘
//! ```
//!
//! The header is followed by run records until the end of the file:
//!
//! ```text
//!        ┌────────┬────────┐
//!        │ value  │ length │   length in 1..=255
//!        └────────┴────────┘
//! ```
//!
//! Pixels are scanned row-major and runs carry over from one row to the next.
//! A run reaching 255 pixels is written out at once, and the same value
//! continues as a fresh run. A length of 0 never appears.
//!
//! Both dimensions are limited to 65535 by the header. The records must cover
//! exactly `rows * cols` pixels; anything short of or past that is malformed.
//!
//! # Multi-level Thresholding
//!
//! Before encoding, pixels may optionally be snapped to a few dominant
//! intensities picked from the histogram (see [`threshold`]). Longer runs
//! follow, at the price of fidelity. The codec itself stays lossless with
//! respect to the grid it is given.

#[macro_use]
extern crate log;

pub mod codec;
pub mod config;
mod derle;
mod error;
mod grid;
mod header;
mod histogram;
pub mod image_io;
mod rle;
pub mod threshold;

pub use codec::{compress, decompress, CompressOptions};
pub use derle::{decode, decode_from, DeRle};
pub use error::{Error, Result};
pub use grid::Grid;
pub use header::Header;
pub use histogram::Pdf;
pub use rle::{encode, encode_to_vec, Rle, Run};
pub use threshold::{
    multi_level_threshold, quantize, select_levels, LevelSet, ThresholdParams,
};

/// size of the dimension header in bytes
pub const HEADER_LEN: usize = 4;
pub const MAX_RUN_LENGTH: u8 = u8::MAX;
pub const MAX_DIMENSION: usize = u16::MAX as usize;
/// number of distinct 8-bit intensities
pub const INTENSITIES: usize = 256;
