use cosmic::cosmic_config::{self, Config, ConfigGet, ConfigSet, CosmicConfigEntry};
use gallery_types::{CatalogError, PhotoCatalog};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub const CONFIG_VERSION: u64 = 1;
const APP_ID: &str = "org.codeberg.keepsake.Keepsake";

/// How a released drag decides whether to move to the neighbouring photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CommitPolicy {
    /// Commit only when the drag travelled past the distance threshold.
    DistanceOnly,
    /// Also commit short flicks that are faster than the velocity threshold.
    #[default]
    DistanceOrVelocity,
}

impl CommitPolicy {
    pub const ALL: &'static [Self] = &[Self::DistanceOnly, Self::DistanceOrVelocity];
}

impl fmt::Display for CommitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitPolicy::DistanceOnly => write!(f, "Distance only"),
            CommitPolicy::DistanceOrVelocity => write!(f, "Distance or velocity"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ThumbnailSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl ThumbnailSize {
    pub fn pixels(self) -> u32 {
        match self {
            ThumbnailSize::Small => 128,
            ThumbnailSize::Medium => 256,
            ThumbnailSize::Large => 384,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoEntry {
    pub full: String,
    pub thumbnail: String,
    pub label: String,
}

impl PhotoEntry {
    pub fn new(full: impl Into<String>, thumbnail: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            full: full.into(),
            thumbnail: thumbnail.into(),
            label: label.into(),
        }
    }

    /// The six photos shipped with the event page.
    pub fn defaults() -> Vec<Self> {
        (1..=6)
            .map(|n| {
                let source = format!("/images/photo{n}.jpg");
                PhotoEntry::new(source.clone(), source, format!("婚纱照{n}"))
            })
            .collect()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Distance threshold must be positive, got {0}")]
    DistanceThreshold(f32),
    #[error("Velocity threshold must be positive, got {0}")]
    VelocityThreshold(f32),
    #[error("Animation duration must be at least 1ms")]
    AnimationDuration,
    #[error("The photo list is empty")]
    EmptyCatalog,
    #[error("Invalid photo list: {0}")]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryConfig {
    pub commit_policy: CommitPolicy,
    /// Pixels a drag must travel to commit.
    pub distance_threshold: f32,
    /// Pixels per millisecond a short flick must exceed to commit.
    pub velocity_threshold: f32,
    pub animation_ms: u32,
    pub grid_spacing: u16,
    pub thumbnail_size: ThumbnailSize,
    /// Directory that `/images/...` style sources are resolved against.
    pub asset_root: Option<String>,
    pub photos: Vec<PhotoEntry>,
    pub audio_enabled: bool,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            commit_policy: CommitPolicy::default(),
            distance_threshold: 50.0,
            velocity_threshold: 0.5,
            animation_ms: 300,
            grid_spacing: 8,
            thumbnail_size: ThumbnailSize::default(),
            asset_root: None,
            photos: PhotoEntry::defaults(),
            audio_enabled: true,
        }
    }
}

impl GalleryConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.distance_threshold.is_finite() && self.distance_threshold > 0.0) {
            return Err(ConfigError::DistanceThreshold(self.distance_threshold));
        }

        if !(self.velocity_threshold.is_finite() && self.velocity_threshold > 0.0) {
            return Err(ConfigError::VelocityThreshold(self.velocity_threshold));
        }

        if self.animation_ms == 0 {
            return Err(ConfigError::AnimationDuration);
        }

        if self.photos.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }

        self.catalog().map(|_| ())
    }

    /// Catalog in configured order, ids numbered from 1.
    pub fn catalog(&self) -> Result<PhotoCatalog, ConfigError> {
        let catalog = PhotoCatalog::from_sources(
            self.photos
                .iter()
                .map(|entry| (entry.full.clone(), entry.thumbnail.clone(), entry.label.clone())),
        )?;
        Ok(catalog)
    }
}

impl CosmicConfigEntry for GalleryConfig {
    const VERSION: u64 = CONFIG_VERSION;

    fn write_entry(&self, config: &cosmic_config::Config) -> Result<(), cosmic_config::Error> {
        config.set("commit_policy", self.commit_policy)?;
        config.set("distance_threshold", self.distance_threshold)?;
        config.set("velocity_threshold", self.velocity_threshold)?;
        config.set("animation_ms", self.animation_ms)?;
        config.set("grid_spacing", self.grid_spacing)?;
        config.set("thumbnail_size", self.thumbnail_size)?;
        config.set("asset_root", self.asset_root.clone())?;
        config.set("photos", self.photos.clone())?;
        config.set("audio_enabled", self.audio_enabled)?;
        Ok(())
    }

    fn get_entry(
        config: &cosmic_config::Config,
    ) -> Result<Self, (Vec<cosmic_config::Error>, Self)> {
        let mut errors = Vec::new();
        let mut cfg = GalleryConfig::default();

        macro_rules! get_field {
            ($name:literal, $field:ident, $type:ty) => {
                match config.get::<$type>($name) {
                    Ok(val) => cfg.$field = val,
                    Err(e) => errors.push(e),
                }
            };
        }

        get_field!("commit_policy", commit_policy, CommitPolicy);
        get_field!("distance_threshold", distance_threshold, f32);
        get_field!("velocity_threshold", velocity_threshold, f32);
        get_field!("animation_ms", animation_ms, u32);
        get_field!("grid_spacing", grid_spacing, u16);
        get_field!("thumbnail_size", thumbnail_size, ThumbnailSize);
        get_field!("asset_root", asset_root, Option<String>);
        get_field!("photos", photos, Vec<PhotoEntry>);
        get_field!("audio_enabled", audio_enabled, bool);

        if errors.is_empty() {
            Ok(cfg)
        } else {
            Err((errors, cfg))
        }
    }

    fn update_keys<T: AsRef<str>>(
        &mut self,
        config: &cosmic_config::Config,
        changed_keys: &[T],
    ) -> (Vec<cosmic_config::Error>, Vec<&'static str>) {
        let mut errors = Vec::new();
        let mut updated = Vec::new();

        for key in changed_keys {
            match key.as_ref() {
                "commit_policy" => match config.get::<CommitPolicy>("commit_policy") {
                    Ok(val) => {
                        self.commit_policy = val;
                        updated.push("commit_policy");
                    }
                    Err(e) => errors.push(e),
                },
                "distance_threshold" => match config.get::<f32>("distance_threshold") {
                    Ok(val) => {
                        self.distance_threshold = val;
                        updated.push("distance_threshold");
                    }
                    Err(e) => errors.push(e),
                },
                "velocity_threshold" => match config.get::<f32>("velocity_threshold") {
                    Ok(val) => {
                        self.velocity_threshold = val;
                        updated.push("velocity_threshold");
                    }
                    Err(e) => errors.push(e),
                },
                "animation_ms" => match config.get::<u32>("animation_ms") {
                    Ok(val) => {
                        self.animation_ms = val;
                        updated.push("animation_ms");
                    }
                    Err(e) => errors.push(e),
                },
                "audio_enabled" => match config.get::<bool>("audio_enabled") {
                    Ok(val) => {
                        self.audio_enabled = val;
                        updated.push("audio_enabled");
                    }
                    Err(e) => errors.push(e),
                },
                _ => {}
            }
        }

        (errors, updated)
    }
}

pub fn config() -> Result<Config, cosmic_config::Error> {
    Config::new(APP_ID, CONFIG_VERSION)
}
