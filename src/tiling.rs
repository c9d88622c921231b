//! Partitioning of an image width into vertical slices.

use num::Integer;

use crate::core::{Dimensions, Rectangle};
use crate::error::{SliceError, SliceResult};

/// One vertical strip of the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSpec {
    /// Position counting from the left, starting at 0.
    pub index: u32,
    /// First column of the tile.
    pub left: u32,
    /// Column just past the tile.
    pub right: u32,
    /// Always the full source height.
    pub height: u32,
}

impl TileSpec {
    /// Width in pixels; zero when there are more slices than columns.
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    /// The region of the source image covered by this tile.
    pub fn region(&self) -> Rectangle {
        Rectangle::new(self.left, 0, self.width(), self.height)
    }

    /// File name the tile is written under, e.g. `tile_3.jpg`.
    pub fn file_name(&self) -> String {
        format!("tile_{}.jpg", self.index)
    }
}

/// All tiles for one image, in left-to-right order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlicePlan {
    /// Size of the source image.
    pub dimensions: Dimensions,
    /// `width / count`, the width of every tile but the last.
    pub base_width: u32,
    /// Extra columns taken by the last tile.
    pub remainder: u32,
    /// Tiles in left-to-right order.
    pub tiles: Vec<TileSpec>,
}

/// Partition an image of the given size into `count` vertical strips.
///
/// Every strip is `width / count` wide except the last, which runs to the
/// right edge. When `count` exceeds the width the leading strips are empty.
pub fn plan_slices((width, height): Dimensions, count: u32) -> SliceResult<SlicePlan> {
    if count == 0 {
        return Err(SliceError::InvalidArgument(
            "slice count must be greater than 0".to_string(),
        ));
    }

    let (base_width, remainder) = width.div_rem(&count);
    let last = count - 1;

    let tiles = (0..count)
        .map(|index| {
            let left = index * base_width;
            let right = if index < last {
                (index + 1) * base_width
            } else {
                width
            };
            TileSpec {
                index,
                left,
                right,
                height,
            }
        })
        .collect();

    Ok(SlicePlan {
        dimensions: (width, height),
        base_width,
        remainder,
        tiles,
    })
}
