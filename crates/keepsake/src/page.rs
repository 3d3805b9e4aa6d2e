//! Page shell around the gallery: background music, the venue map and the
//! share card. The gallery never talks to these directly.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct Venue {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for Venue {
    fn default() -> Self {
        Self {
            name: "Reception hall".to_string(),
            address: "1 Garden Road".to_string(),
            latitude: 31.2304,
            longitude: 121.4737,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShareInfo {
    pub title: String,
    pub description: String,
    pub link: String,
    pub image: String,
}

impl Default for ShareInfo {
    fn default() -> Self {
        Self {
            title: "Our day".to_string(),
            description: "Photos from the celebration".to_string(),
            link: "https://example.org/keepsake".to_string(),
            image: "/images/cover.jpg".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ShareError {
    #[error("Share target unavailable: {0}")]
    Unavailable(String),
    #[error("Invalid share info: {0}")]
    Invalid(String),
}

pub trait AudioController {
    fn play(&mut self);
    fn pause(&mut self);
    fn is_playing(&self) -> bool;
}

pub trait MapRenderer {
    fn render_venue(&mut self, venue: &Venue);
}

pub trait ShareConfigurer {
    fn configure(&mut self, info: &ShareInfo) -> Result<(), ShareError>;
}

#[derive(Debug, Default)]
pub struct LogOnlyAudio {
    playing: bool,
}

impl AudioController for LogOnlyAudio {
    fn play(&mut self) {
        tracing::info!("Background music playing");
        self.playing = true;
    }

    fn pause(&mut self) {
        tracing::info!("Background music paused");
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}

#[derive(Debug, Default)]
pub struct LogOnlyMap;

impl MapRenderer for LogOnlyMap {
    fn render_venue(&mut self, venue: &Venue) {
        tracing::info!(
            "Venue {} at {} ({:.4}, {:.4})",
            venue.name,
            venue.address,
            venue.latitude,
            venue.longitude
        );
    }
}

#[derive(Debug, Default)]
pub struct LogOnlyShare;

impl ShareConfigurer for LogOnlyShare {
    fn configure(&mut self, info: &ShareInfo) -> Result<(), ShareError> {
        if info.link.is_empty() {
            return Err(ShareError::Invalid("empty link".to_string()));
        }
        tracing::info!("Share card configured: {} -> {}", info.title, info.link);
        Ok(())
    }
}

pub struct PageShell {
    audio: Box<dyn AudioController>,
    map: Box<dyn MapRenderer>,
    share: Box<dyn ShareConfigurer>,
    venue: Venue,
    share_info: ShareInfo,
    mounted: bool,
    interacted: bool,
    wants_audio: bool,
}

impl PageShell {
    pub fn new(
        audio: Box<dyn AudioController>,
        map: Box<dyn MapRenderer>,
        share: Box<dyn ShareConfigurer>,
        wants_audio: bool,
    ) -> Self {
        Self {
            audio,
            map,
            share,
            venue: Venue::default(),
            share_info: ShareInfo::default(),
            mounted: false,
            interacted: false,
            wants_audio,
        }
    }

    /// Shell with collaborators that only log.
    pub fn logging(wants_audio: bool) -> Self {
        Self::new(
            Box::new(LogOnlyAudio::default()),
            Box::new(LogOnlyMap),
            Box::new(LogOnlyShare),
            wants_audio,
        )
    }

    /// Renders the map and configures sharing. Only the first call does
    /// anything.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;

        self.map.render_venue(&self.venue);
        if let Err(err) = self.share.configure(&self.share_info) {
            tracing::warn!("Failed to configure sharing: {}", err);
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Autoplay stays blocked until the first interaction.
    pub fn user_interacted(&mut self) {
        if self.interacted {
            return;
        }
        self.interacted = true;

        if self.wants_audio && !self.audio.is_playing() {
            self.audio.play();
        }
    }

    /// Returns whether music is now wanted.
    pub fn toggle_audio(&mut self) -> bool {
        self.interacted = true;
        self.wants_audio = !self.wants_audio;

        if self.wants_audio {
            self.audio.play();
        } else {
            self.audio.pause();
        }

        self.wants_audio
    }

    pub fn audio_wanted(&self) -> bool {
        self.wants_audio
    }

    pub fn is_playing(&self) -> bool {
        self.audio.is_playing()
    }
}
