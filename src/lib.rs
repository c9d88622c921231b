//! Vertical image slicer.
//!
//! Cuts a single source image into a fixed number of full-height strips
//! and writes each one as a JPEG, ready to be served by a tiled viewer.

#![warn(missing_docs)]

pub mod config;
mod core;
pub mod error;
pub mod tiling;

use image::codecs::jpeg::JpegEncoder;
use image::io::Reader;
use image::{imageops, DynamicImage, ImageError, ImageResult, RgbImage};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub use crate::config::{PixelLimit, SliceOptions};
pub use crate::core::{Dimensions, Rectangle};
pub use crate::error::{SliceError, SliceResult};
pub use crate::tiling::{plan_slices, SlicePlan, TileSpec};

use crate::config::{MAX_JPEG_QUALITY, MIN_JPEG_QUALITY};

/// A tile that has been written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedTile {
    /// Position of the tile, counting from the left.
    pub index: u32,
    /// Where the tile was written.
    pub path: PathBuf,
    /// Tile width in pixels.
    pub width: u32,
    /// Tile height in pixels, always the source height.
    pub height: u32,
}

/// Outcome of a slicing run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliceReport {
    /// Size of the source image.
    pub dimensions: Dimensions,
    /// Width of every tile but the last.
    pub base_width: u32,
    /// Written tiles, left to right.
    pub tiles: Vec<SavedTile>,
}

// Public actions

/// Slice the image at `image_path` into `count` vertical tiles under
/// `output_dir`.
///
/// Tiles are named `tile_0.jpg` through `tile_{count-1}.jpg` and existing
/// files are overwritten. The first failure aborts the run, leaving any
/// tiles already written in place.
pub fn slice_image(
    image_path: &Path,
    output_dir: &Path,
    count: u32,
    options: &SliceOptions,
) -> SliceResult<SliceReport> {
    check_arguments(count, options)?;

    ensure_dir(output_dir)?;

    let img = load_image(image_path, options.pixel_limit)?;
    let plan = plan_slices(img.dimensions(), count)?;

    let (width, height) = plan.dimensions;
    info!("Image size: {}x{}", width, height);
    info!(
        "Slicing into {} parts, approx width: {}",
        count, plan.base_width
    );

    let tiles = plan
        .tiles
        .iter()
        .map(|spec| write_tile(&img, spec, output_dir, options.quality))
        .collect::<SliceResult<Vec<_>>>()?;

    Ok(SliceReport {
        dimensions: plan.dimensions,
        base_width: plan.base_width,
        tiles,
    })
}

/// Load an image from a file as an owned RGB buffer.
///
/// Decoder allocation limits are disabled; `limit` is the only guard
/// against oversized input and is checked from the header before decoding.
pub fn load_image(path: &Path, limit: PixelLimit) -> SliceResult<RgbImage> {
    let decode_error = |source: ImageError| SliceError::Decode {
        path: path.to_path_buf(),
        source,
    };

    if let PixelLimit::Max(max) = limit {
        let (width, height) = image::image_dimensions(path).map_err(decode_error)?;
        if !limit.allows(width, height) {
            return Err(SliceError::TooLarge {
                path: path.to_path_buf(),
                width,
                height,
                limit: max,
            });
        }
    }

    let mut reader = Reader::open(path)
        .and_then(Reader::with_guessed_format)
        .map_err(|e| decode_error(ImageError::IoError(e)))?;
    reader.no_limits();

    reader
        .decode()
        .map(DynamicImage::into_rgb8)
        .map_err(decode_error)
}

/// Save the given image as a JPEG file.
pub fn save_jpeg(img: &RgbImage, path: &Path, quality: u8) -> SliceResult<()> {
    let io_error = |source| SliceError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(io_error)?);
    write_jpeg(img, &mut writer, quality).map_err(|source| SliceError::Encode {
        path: path.to_path_buf(),
        source,
    })?;
    writer.flush().map_err(io_error)
}

/// Encode the given image as a JPEG into any writer.
pub fn write_jpeg<W: Write>(img: &RgbImage, writer: &mut W, quality: u8) -> ImageResult<()> {
    JpegEncoder::new_with_quality(writer, quality).encode_image(img)
}

// Argument handling

fn check_arguments(count: u32, options: &SliceOptions) -> SliceResult<()> {
    if count == 0 {
        return Err(SliceError::InvalidArgument(
            "slice count must be greater than 0".to_string(),
        ));
    }
    if !(MIN_JPEG_QUALITY..=MAX_JPEG_QUALITY).contains(&options.quality) {
        return Err(SliceError::InvalidArgument(format!(
            "JPEG quality must be between {} and {}, got {}",
            MIN_JPEG_QUALITY, MAX_JPEG_QUALITY, options.quality
        )));
    }
    Ok(())
}

// Path handling

fn ensure_dir(path: &Path) -> SliceResult<()> {
    if !path.is_dir() {
        debug!("Creating output directory {}", path.display());
    }
    create_dir_all(path).map_err(|source| SliceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// Tile construction

/// Crop one tile out of the source and write it to the output directory.
fn write_tile(
    img: &RgbImage,
    spec: &TileSpec,
    output_dir: &Path,
    quality: u8,
) -> SliceResult<SavedTile> {
    let region = spec.region();
    debug!("Cropping tile {} at {:?}", spec.index, region);

    let tile = extract_region(img, &region);
    let path = output_dir.join(spec.file_name());
    save_jpeg(&tile, &path, quality)?;

    let (width, height) = region.dimensions();
    info!("Saved {} ({}x{})", path.display(), width, height);

    Ok(SavedTile {
        index: spec.index,
        path,
        width,
        height,
    })
}

/// Copy the given region out of an image.
fn extract_region(img: &RgbImage, r: &Rectangle) -> RgbImage {
    imageops::crop_imm(img, r.x, r.y, r.width, r.height).to_image()
}
