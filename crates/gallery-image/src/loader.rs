use cosmic::widget::image::Handle;
use shared::{
    LOAD_TIMEOUT,
    image::{ImageProcessingError, resize_to_cover},
};
use std::{
    fmt::{self, Debug, Formatter},
    path::{Path, PathBuf},
    time::Duration,
};
use thiserror::Error;
use tokio::sync::oneshot;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
    #[error("Unsupported image source: {0:?}")]
    UnsupportedSource(String),
    #[error(transparent)]
    Processing(#[from] ImageProcessingError),
    #[error("Task cancelled")]
    Cancelled,
    #[error("Timed out after {0:?}")]
    TimedOut(Duration),
}

#[derive(Clone)]
pub struct LoadedImage {
    pub handle: Handle,
    pub width: u32,
    pub height: u32,
    pub path: PathBuf,
}

impl Debug for LoadedImage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("path", &self.path)
            .finish()
    }
}

/// Decodes a full-size photo off the UI thread.
pub async fn load_image(path: PathBuf) -> Result<LoadedImage, LoadError> {
    let (tx, rx) = oneshot::channel();

    rayon::spawn(move || {
        let result = decode_rgba(&path).map(|(width, height, pixels)| LoadedImage {
            handle: Handle::from_rgba(width, height, pixels),
            width,
            height,
            path,
        });
        let _ = tx.send(result);
    });

    receive(rx, LOAD_TIMEOUT).await
}

/// Decodes a photo and crops it to a square thumbnail of at most
/// `max_size` pixels per side.
pub async fn load_thumbnail(path: PathBuf, max_size: u32) -> Result<LoadedImage, LoadError> {
    let (tx, rx) = oneshot::channel();

    rayon::spawn(move || {
        let result = load_thumbnail_sync(&path, max_size).map(|thumbnail| {
            let (width, height) = thumbnail.dimensions();
            LoadedImage {
                handle: Handle::from_rgba(width, height, thumbnail.into_raw()),
                width,
                height,
                path,
            }
        });
        let _ = tx.send(result);
    });

    receive(rx, LOAD_TIMEOUT).await
}

/// Waits for a decode running on the rayon pool. A decode that never reports
/// back within `limit` is abandoned.
async fn receive<T>(
    rx: oneshot::Receiver<Result<T, LoadError>>,
    limit: Duration,
) -> Result<T, LoadError> {
    match tokio::time::timeout(limit, rx).await {
        Ok(Ok(result)) => result,
        Ok(Err(_)) => Err(LoadError::Cancelled),
        Err(_) => Err(LoadError::TimedOut(limit)),
    }
}

fn load_thumbnail_sync(path: &Path, max_size: u32) -> Result<image::RgbaImage, LoadError> {
    let (width, height, pixels) = decode_rgba(path)?;
    let rgba = image::RgbaImage::from_raw(width, height, pixels)
        .ok_or_else(|| LoadError::UnsupportedFormat("Failed to create image buffer".into()))?;
    Ok(resize_to_cover(rgba, max_size)?)
}

/// Tries zune-image first for the formats it handles, then falls back to the
/// `image` crate.
fn decode_rgba(path: &Path) -> Result<(u32, u32, Vec<u8>), LoadError> {
    if !path.exists() {
        return Err(LoadError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            path.display().to_string(),
        )));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default();

    if is_zune_supported(&extension) {
        match decode_with_zune(path) {
            Ok(decoded) => return Ok(decoded),
            Err(e) => tracing::debug!("zune-image could not decode {}: {e}", path.display()),
        }
    }

    decode_with_image(path)
}

fn is_zune_supported(extension: &str) -> bool {
    matches!(
        extension,
        "jpg" | "jpeg" | "png" | "ppm" | "pgm" | "pbm" | "pnm" | "bmp" | "qoi"
    )
}

fn decode_with_zune(path: &Path) -> Result<(u32, u32, Vec<u8>), LoadError> {
    use zune_image::image::Image;

    let mut img = Image::open(path).map_err(|e| LoadError::UnsupportedFormat(e.to_string()))?;

    img.convert_color(zune_image::codecs::bmp::zune_core::colorspace::ColorSpace::RGBA)
        .map_err(|e| LoadError::UnsupportedFormat(e.to_string()))?;

    let (width, height) = img.dimensions();

    let pixels = img
        .flatten_to_u8()
        .into_iter()
        .next()
        .ok_or_else(|| LoadError::UnsupportedFormat("No pixel data".into()))?;

    Ok((width as u32, height as u32, pixels))
}

fn decode_with_image(path: &Path) -> Result<(u32, u32, Vec<u8>), LoadError> {
    let rgba = image::open(path)?.into_rgba8();
    let (width, height) = rgba.dimensions();
    Ok((width, height, rgba.into_raw()))
}
