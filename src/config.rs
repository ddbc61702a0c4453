//! Command line surface and the jobs it resolves to.

use crate::threshold::{DEFAULT_THRESHOLD, DEFAULT_WINDOW};
use crate::{compress, decode, image_io, CompressOptions, Error, Result, ThresholdParams};
use clap::Parser;
use std::fs;
use std::path::PathBuf;

/// Output file used by `--compress` when `--output` is not given.
pub const DEFAULT_COMPRESSED_PATH: &str = "compressedImage.rle";

#[derive(Parser, Debug)]
#[command(name = "grayrle", version, about = "Run-length codec for grayscale images", long_about = None)]
pub struct Cli {
    /// Compress an image file into the RLE format
    #[arg(long)]
    pub compress: bool,

    /// Decompress an RLE file into an image file
    #[arg(long)]
    pub decompress: bool,

    /// Input path (image for --compress, RLE file for --decompress)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output path (defaults to compressedImage.rle for --compress)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Quantize to dominant intensities before compressing (lossy)
    #[arg(long = "multi-level", alias = "multiLevel")]
    pub multi_level: bool,

    /// Half-width of the histogram peak window
    #[arg(long, default_value_t = DEFAULT_WINDOW)]
    pub window: usize,

    /// Minimum rise of a peak above its window mean
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Job {
    Compress {
        input: PathBuf,
        output: PathBuf,
        options: CompressOptions,
    },
    Decompress {
        input: PathBuf,
        output: PathBuf,
    },
}

impl Cli {
    /// Checks the options without touching the filesystem.
    pub fn into_job(self) -> Result<Job> {
        let config_error = |cause: &str| Error::Configuration(cause.to_string());
        let input = match (self.compress, self.decompress) {
            (false, false) => return Err(config_error("invalid or missing operation")),
            (true, true) => {
                return Err(config_error(
                    "--compress and --decompress are mutually exclusive",
                ))
            }
            _ => self
                .input
                .ok_or_else(|| config_error("invalid or missing input file path"))?,
        };

        if self.compress {
            let params = ThresholdParams {
                window: self.window,
                threshold: self.threshold,
            };
            if self.multi_level {
                params.validate()?;
            }
            Ok(Job::Compress {
                input,
                output: self
                    .output
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_COMPRESSED_PATH)),
                options: CompressOptions {
                    multi_level: self.multi_level,
                    params,
                },
            })
        } else {
            if self.multi_level {
                warn!("--multi-level only applies to --compress, ignoring");
            }
            let output = self
                .output
                .ok_or_else(|| config_error("invalid or missing output file path"))?;
            Ok(Job::Decompress { input, output })
        }
    }
}

impl Job {
    pub fn run(&self) -> Result<()> {
        match self {
            Job::Compress {
                input,
                output,
                options,
            } => {
                info!(
                    "operation: COMPRESS, input: {}, output: {}, multi-level: {}",
                    input.display(),
                    output.display(),
                    options.multi_level
                );
                let grid = image_io::load_grayscale(input)?;
                let (rows, cols) = (grid.rows(), grid.cols());
                let raw_len = grid.pixel_count();
                let bytes = compress(grid, options)?;
                fs::write(output, &bytes)?;
                info!(
                    "compressed {rows}x{cols} image: {raw_len} -> {} bytes ({:.2}x)",
                    bytes.len(),
                    raw_len as f64 / bytes.len() as f64
                );
            }
            Job::Decompress { input, output } => {
                info!(
                    "operation: DECOMPRESS, input: {}, output: {}",
                    input.display(),
                    output.display()
                );
                let bytes = fs::read(input)?;
                let grid = decode(&bytes)?;
                image_io::save_grayscale(&grid, output)?;
                info!(
                    "decompressed {} bytes into {}x{} image",
                    bytes.len(),
                    grid.rows(),
                    grid.cols()
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Cli, Job, DEFAULT_COMPRESSED_PATH};
    use crate::{CompressOptions, Error, ThresholdParams};
    use clap::Parser;
    use std::path::PathBuf;

    fn job(args: &[&str]) -> crate::Result<Job> {
        let args = std::iter::once("grayrle").chain(args.iter().copied());
        Cli::try_parse_from(args).unwrap().into_job()
    }

    fn config_error(args: &[&str]) -> bool {
        matches!(job(args), Err(Error::Configuration(_)))
    }

    #[test]
    fn test_compress_defaults() {
        assert_eq!(
            job(&["--compress", "--input", "cat.png"]).unwrap(),
            Job::Compress {
                input: PathBuf::from("cat.png"),
                output: PathBuf::from(DEFAULT_COMPRESSED_PATH),
                options: CompressOptions::default(),
            }
        );
    }

    #[test]
    fn test_compress_multi_level() {
        let parsed = job(&[
            "--compress",
            "-i",
            "cat.png",
            "-o",
            "cat.rle",
            "--multiLevel",
            "--window",
            "3",
        ])
        .unwrap();
        assert_eq!(
            parsed,
            Job::Compress {
                input: PathBuf::from("cat.png"),
                output: PathBuf::from("cat.rle"),
                options: CompressOptions {
                    multi_level: true,
                    params: ThresholdParams {
                        window: 3,
                        ..Default::default()
                    },
                },
            }
        );
    }

    #[test]
    fn test_decompress() {
        assert_eq!(
            job(&["--decompress", "--input", "a.rle", "--output", "a.png"]).unwrap(),
            Job::Decompress {
                input: PathBuf::from("a.rle"),
                output: PathBuf::from("a.png"),
            }
        );
    }

    #[test]
    fn test_configuration_errors() {
        assert!(config_error(&["--input", "a.png"]));
        assert!(config_error(&["--compress", "--decompress", "--input", "a.png"]));
        assert!(config_error(&["--compress"]));
        assert!(config_error(&["--decompress", "--input", "a.rle"]));
        assert!(config_error(&[
            "--compress",
            "--input",
            "a.png",
            "--multi-level",
            "--window",
            "0"
        ]));
    }
}
