//! Command-line and library configuration.
//!
//! Every flag can also be given through an environment variable with the
//! `SLICE_` prefix. The defaults reproduce the original gallery layout:
//! `public/images/binfengtu_small.jpg` cut into 10 tiles under
//! `public/images/tiles`.

use clap::Parser;
use std::path::PathBuf;

/// Default source image.
pub const DEFAULT_IMAGE: &str = "public/images/binfengtu_small.jpg";

/// Default directory tiles are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "public/images/tiles";

/// Default number of vertical slices.
pub const DEFAULT_SLICES: u32 = 10;

/// Default JPEG quality (1-100).
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Minimum allowed JPEG quality.
pub const MIN_JPEG_QUALITY: u8 = 1;

/// Maximum allowed JPEG quality.
pub const MAX_JPEG_QUALITY: u8 = 100;

/// Upper bound on the number of pixels a source image may have.
///
/// Source images are assumed to be local and trusted, so the default is
/// `Unlimited`: the decoder's allocation limits are switched off and images
/// of any size are accepted. `Max` restores a cap for untrusted input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PixelLimit {
    /// Accept images of any size.
    #[default]
    Unlimited,
    /// Reject images with more pixels than this.
    Max(u64),
}

impl PixelLimit {
    /// Whether an image of the given size is within the limit.
    pub fn allows(&self, width: u32, height: u32) -> bool {
        match self {
            PixelLimit::Unlimited => true,
            PixelLimit::Max(max) => u64::from(width) * u64::from(height) <= *max,
        }
    }
}

impl From<Option<u64>> for PixelLimit {
    fn from(max: Option<u64>) -> Self {
        max.map_or(PixelLimit::Unlimited, PixelLimit::Max)
    }
}

/// Settings for a slicing run beyond the source, destination and count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceOptions {
    /// JPEG quality of the written tiles (1-100).
    pub quality: u8,
    /// Size guard applied before decoding the source.
    pub pixel_limit: PixelLimit,
}

impl Default for SliceOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_JPEG_QUALITY,
            pixel_limit: PixelLimit::Unlimited,
        }
    }
}

/// Slice an image into vertical JPEG tiles.
#[derive(Parser, Debug, Clone)]
#[command(name = "slice")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source image to slice.
    #[arg(default_value = DEFAULT_IMAGE, env = "SLICE_IMAGE")]
    pub image: PathBuf,

    /// Directory the tiles are written to; created if missing.
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR, env = "SLICE_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Number of vertical slices.
    #[arg(short = 'n', long, default_value_t = DEFAULT_SLICES, env = "SLICE_COUNT")]
    pub slices: u32,

    /// JPEG quality of the written tiles (1-100).
    #[arg(short, long, default_value_t = DEFAULT_JPEG_QUALITY, env = "SLICE_QUALITY")]
    pub quality: u8,

    /// Refuse source images with more pixels than this.
    ///
    /// Unset by default: inputs are trusted and no size limit applies.
    #[arg(long, env = "SLICE_MAX_PIXELS")]
    pub max_pixels: Option<u64>,

    /// Enable debug logging.
    #[arg(short, long, default_value_t = false, env = "SLICE_VERBOSE")]
    pub verbose: bool,
}

impl Cli {
    /// Check the arguments before anything touches the filesystem.
    pub fn validate(&self) -> Result<(), String> {
        if self.slices == 0 {
            return Err("--slices must be greater than 0".to_string());
        }

        if !(MIN_JPEG_QUALITY..=MAX_JPEG_QUALITY).contains(&self.quality) {
            return Err(format!(
                "--quality must be between {} and {}, got {}",
                MIN_JPEG_QUALITY, MAX_JPEG_QUALITY, self.quality
            ));
        }

        if self.max_pixels == Some(0) {
            return Err("--max-pixels must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Library settings derived from the flags.
    pub fn options(&self) -> SliceOptions {
        SliceOptions {
            quality: self.quality,
            pixel_limit: self.max_pixels.into(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn test_cli() -> Cli {
        Cli {
            image: PathBuf::from("in.jpg"),
            output_dir: PathBuf::from("out"),
            slices: 4,
            quality: 85,
            max_pixels: None,
            verbose: false,
        }
    }

    #[test]
    fn test_defaults_match_gallery_layout() {
        let cli = Cli::parse_from(["slice"]);

        assert_eq!(cli.image, PathBuf::from(DEFAULT_IMAGE));
        assert_eq!(cli.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(cli.slices, 10);
        assert_eq!(cli.quality, 90);
        assert_eq!(cli.options().pixel_limit, PixelLimit::Unlimited);
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "slice",
            "scroll.png",
            "-o",
            "tiles",
            "-n",
            "3",
            "--quality",
            "70",
            "--max-pixels",
            "1000000",
        ]);

        assert_eq!(cli.image, PathBuf::from("scroll.png"));
        assert_eq!(cli.output_dir, PathBuf::from("tiles"));
        assert_eq!(cli.slices, 3);
        assert_eq!(
            cli.options(),
            SliceOptions {
                quality: 70,
                pixel_limit: PixelLimit::Max(1_000_000),
            }
        );
    }

    #[test]
    fn test_negative_slice_count_is_rejected_by_parser() {
        let result = Cli::try_parse_from(["slice", "-n", "-1"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_valid_cli() {
        assert!(test_cli().validate().is_ok());
    }

    #[test]
    fn test_zero_slices_is_invalid() {
        let mut cli = test_cli();
        cli.slices = 0;

        let result = cli.validate();
        assert!(result.unwrap_err().contains("slices"));
    }

    #[test]
    fn test_quality_out_of_range_is_invalid() {
        let mut cli = test_cli();
        cli.quality = 0;
        assert!(cli.validate().is_err());

        cli.quality = 101;
        assert!(cli.validate().unwrap_err().contains("101"));
    }

    #[test]
    fn test_zero_max_pixels_is_invalid() {
        let mut cli = test_cli();
        cli.max_pixels = Some(0);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_pixel_limit_allows() {
        assert!(PixelLimit::Unlimited.allows(u32::MAX, u32::MAX));
        assert!(PixelLimit::Max(5000).allows(100, 50));
        assert!(!PixelLimit::Max(4999).allows(100, 50));
    }
}
