use fast_image_resize::Resizer;
use fast_image_resize::images::Image;
use image::RgbaImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageProcessingError {
    #[error("Failed to resize image: {0}")]
    ResizeError(String),

    #[error("Invalid image dimensions")]
    InvalidDimensions,
}

pub type ImageResult<T> = Result<T, ImageProcessingError>;

/// Centered square crop of the source plus the side of the final thumbnail.
/// Grid cells are square, so thumbnails fill them the way `object-fit: cover`
/// would.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverDimensions {
    pub crop_x: u32,
    pub crop_y: u32,
    pub crop_size: u32,
    pub final_size: u32,
}

impl CoverDimensions {
    pub fn calculate(original_width: u32, original_height: u32, max_size: u32) -> Self {
        let crop_size = original_width.min(original_height);
        let crop_x = (original_width - crop_size) / 2;
        let crop_y = (original_height - crop_size) / 2;

        // Never upscale
        let final_size = crop_size.min(max_size);

        Self {
            crop_x,
            crop_y,
            crop_size,
            final_size,
        }
    }

    pub fn needs_resize(&self) -> bool {
        self.final_size != self.crop_size
    }
}

/// Crops the centered square out of `source` and scales it down to at most
/// `max_size` pixels per side.
pub fn resize_to_cover(source: RgbaImage, max_size: u32) -> ImageResult<RgbaImage> {
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 || max_size == 0 {
        return Err(ImageProcessingError::InvalidDimensions);
    }

    let dims = CoverDimensions::calculate(width, height, max_size);

    let cropped = if dims.crop_size == width && dims.crop_size == height {
        source
    } else {
        image::imageops::crop_imm(
            &source,
            dims.crop_x,
            dims.crop_y,
            dims.crop_size,
            dims.crop_size,
        )
        .to_image()
    };

    if !dims.needs_resize() {
        return Ok(cropped);
    }

    // Use fast_image_resize for better performance
    let src_image = Image::from_vec_u8(
        dims.crop_size,
        dims.crop_size,
        cropped.into_raw(),
        fast_image_resize::PixelType::U8x4,
    )
    .map_err(|e| ImageProcessingError::ResizeError(e.to_string()))?;

    let mut dst_image = Image::new(
        dims.final_size,
        dims.final_size,
        fast_image_resize::PixelType::U8x4,
    );

    let mut resizer = Resizer::new();
    resizer
        .resize(&src_image, &mut dst_image, None)
        .map_err(|e| ImageProcessingError::ResizeError(e.to_string()))?;

    RgbaImage::from_raw(dims.final_size, dims.final_size, dst_image.into_vec())
        .ok_or(ImageProcessingError::InvalidDimensions)
}
