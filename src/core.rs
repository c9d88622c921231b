/// Alias for width and height
pub type Dimensions = (u32, u32);

/// An axis-aligned pixel region within an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rectangle {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    #[allow(missing_docs)]
    pub width: u32,
    #[allow(missing_docs)]
    pub height: u32,
}

impl Rectangle {
    /// Region with its top-left corner at `(x, y)`.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Width and height of the region.
    pub fn dimensions(&self) -> Dimensions {
        (self.width, self.height)
    }
}
