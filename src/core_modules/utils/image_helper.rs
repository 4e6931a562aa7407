// Loading and saving of farm images on disk. Everything the `image` crate can decode
// is accepted and flattened to 8-bit RGB before it reaches the estimator.

use crate::core_modules::pixel_grid::PixelGrid;
use crate::error::AgentError;
use image::{ImageEncoder, ImageError, ImageReader};
use std::path::Path;
use tracing::debug;

/// Decodes the image at `path` into an RGB `PixelGrid`.
pub fn load(path: &Path) -> Result<PixelGrid, AgentError> {
    if !path.exists() {
        return Err(AgentError::ImageNotFound(path.to_path_buf()));
    }

    let decode_error = |source: ImageError| AgentError::ImageDecode {
        path: path.to_path_buf(),
        source,
    };

    let image = ImageReader::open(path)
        .map_err(|e| decode_error(ImageError::IoError(e)))?
        .with_guessed_format()
        .map_err(|e| decode_error(ImageError::IoError(e)))?
        .decode()
        .map_err(decode_error)?;

    debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        color = ?image.color(),
        "decoded image"
    );

    Ok(PixelGrid::from(image.to_rgb8()))
}

/// Writes a tightly packed RGB buffer to `path` as PNG.
pub fn save(path: &Path, width: u32, height: u32, buffer: &[u8]) -> Result<(), ImageError> {
    let output = std::fs::File::create(path)?;
    let encoder = image::codecs::png::PngEncoder::new(output);

    encoder.write_image(buffer, width, height, image::ExtendedColorType::Rgb8)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.png");
        match load(&path) {
            Err(AgentError::ImageNotFound(reported)) => assert_eq!(reported, path),
            other => panic!("expected ImageNotFound, got {:?}", other),
        }
    }

    #[test]
    fn garbage_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaf.png");
        std::fs::write(&path, b"definitely not an image").unwrap();
        let error = load(&path).unwrap_err();
        assert_eq!(error.kind(), "ImageDecodeError");
    }

    #[test]
    fn saved_png_loads_back_as_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gradient.png");
        let (width, height) = (16u32, 8u32);
        let mut buffer = vec![0u8; (width * height * 3) as usize];
        for (i, pixel) in buffer.chunks_mut(3).enumerate() {
            let intensity = (i % 256) as u8;
            pixel.copy_from_slice(&[intensity, intensity, intensity]);
        }

        save(&path, width, height, &buffer).expect("Error Saving File.");
        let grid = load(&path).unwrap();

        assert_eq!((grid.width(), grid.height(), grid.channels()), (16, 8, 3));
        assert_eq!(grid, PixelGrid::new(width, height, 3, buffer).unwrap());
    }

    #[test]
    fn rgba_images_are_flattened_to_rgb() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgba.png");
        image::RgbaImage::from_pixel(2, 2, image::Rgba([200, 10, 10, 128]))
            .save(&path)
            .unwrap();

        let grid = load(&path).unwrap();
        assert_eq!(grid.channels(), 3);
        assert!(grid.pixels().all(|p| (p.red, p.green, p.blue) == (200, 10, 10)));
    }
}
