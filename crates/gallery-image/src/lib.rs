pub mod cache;
pub mod loader;
pub mod source;

pub use cache::{CachedImage, ImageCache, preload_window};
pub use loader::{LoadError, LoadedImage, load_image, load_thumbnail};
pub use source::{default_asset_root, resolve_source};
