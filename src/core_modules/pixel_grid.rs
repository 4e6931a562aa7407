// THEORY:
// The `PixelGrid` is the decoded image as the estimator sees it: a height x width
// block of interleaved 8-bit channels stored row-major in one flat buffer. Like the
// `Pixel`, it is a "dumb" container. It checks only that its buffer is the size its
// dimensions claim; whether the layout is acceptable for analysis (exactly three
// channels, at least one pixel) is the estimator's call, so the grid can faithfully
// carry whatever an external decoder handed over.
//
// A grid is owned by a single estimation call and never mutated after construction.

use crate::core_modules::pixel::pixel::{Byte, CHANNELS, Pixel};
use crate::error::AgentError;

/// A decoded image as a flat, row-major buffer of interleaved channels.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    /// The width of the image in pixels.
    width: u32,
    /// The height of the image in pixels.
    height: u32,
    /// Number of interleaved channels per pixel.
    channels: usize,
    /// `width * height * channels` bytes, row-major.
    data: Vec<Byte>,
}

impl PixelGrid {
    /// Wraps a raw buffer, failing if its length disagrees with the dimensions.
    pub fn new(width: u32, height: u32, channels: usize, data: Vec<Byte>) -> Result<Self, AgentError> {
        let expected = width as usize * height as usize * channels;
        if data.len() != expected {
            return Err(AgentError::ImageFormat(format!(
                "buffer holds {} bytes but {}x{}x{} needs {}",
                data.len(),
                width,
                height,
                channels,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Builds an RGB grid where every pixel has the same color.
    pub fn filled(width: u32, height: u32, pixel: Pixel) -> Self {
        let total = width as usize * height as usize;
        let mut data = Vec::with_capacity(total * CHANNELS);
        for _ in 0..total {
            data.extend_from_slice(&[pixel.red, pixel.green, pixel.blue]);
        }
        Self {
            width,
            height,
            channels: CHANNELS,
            data,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Total number of pixels (`height * width`).
    pub fn total_pixels(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Iterates the pixels in row-major order.
    ///
    /// Only meaningful for 3-channel grids; callers check `channels()` first.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|bytes| Pixel::new(bytes[0], bytes[1], bytes[2]))
    }
}

impl From<image::RgbImage> for PixelGrid {
    fn from(image: image::RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            channels: CHANNELS,
            data: image.into_raw(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_buffer_of_wrong_length() {
        let result = PixelGrid::new(2, 2, 3, vec![0; 11]);
        assert!(matches!(result, Err(AgentError::ImageFormat(_))));
    }

    #[test]
    fn accepts_other_channel_counts() {
        let grid = PixelGrid::new(2, 1, 4, vec![0; 8]).unwrap();
        assert_eq!(grid.channels(), 4);
        assert_eq!(grid.total_pixels(), 2);
    }

    #[test]
    fn iterates_pixels_row_major() {
        let grid = PixelGrid::new(2, 1, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let pixels: Vec<Pixel> = grid.pixels().collect();
        assert_eq!(pixels, vec![Pixel::new(1, 2, 3), Pixel::new(4, 5, 6)]);
    }

    #[test]
    fn filled_grid_repeats_the_pixel() {
        let grid = PixelGrid::filled(3, 2, Pixel::new(9, 8, 7));
        assert_eq!(grid.total_pixels(), 6);
        assert!(grid.pixels().all(|p| p == Pixel::new(9, 8, 7)));
    }

    #[test]
    fn converts_from_rgb_image() {
        let image = image::RgbImage::from_pixel(4, 3, image::Rgb([10, 20, 30]));
        let grid = PixelGrid::from(image);
        assert_eq!((grid.width(), grid.height(), grid.channels()), (4, 3, 3));
        assert_eq!(grid.pixels().count(), 12);
    }
}
