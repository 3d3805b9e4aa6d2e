use crate::loader::LoadError;
use std::path::{Path, PathBuf};

/// Root used for `/images/...` style sources when none is configured.
pub fn default_asset_root() -> PathBuf {
    dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join("keepsake")
}

/// Maps a catalog source to a local file.
///
/// `file://` URIs and relative paths are used as-is, site-absolute paths
/// such as `/images/photo1.jpg` are looked up under `asset_root`. Remote
/// schemes are rejected.
pub fn resolve_source(source: &str, asset_root: &Path) -> Result<PathBuf, LoadError> {
    let source = source.trim();
    if source.is_empty() {
        return Err(LoadError::UnsupportedSource(String::new()));
    }

    if let Some(path) = source.strip_prefix("file://") {
        return Ok(PathBuf::from(path));
    }

    if source.contains("://") {
        return Err(LoadError::UnsupportedSource(source.to_string()));
    }

    match source.strip_prefix('/') {
        Some(relative) => Ok(asset_root.join(relative)),
        None => Ok(PathBuf::from(source)),
    }
}
