use crate::carousel::{CarouselEvent, FALLBACK_VIEWPORT_WIDTH, GestureCarousel};
use crate::gesture::GestureSettings;
use tracing::{debug, info};

/// One dot of the position indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    pub index: usize,
    pub active: bool,
}

/// Fullscreen preview. Open means it owns a carousel; closing drops it, so
/// every open starts from a fresh state.
#[derive(Debug, Clone)]
pub struct PreviewOverlay {
    carousel: Option<GestureCarousel>,
    settings: GestureSettings,
    viewport_width: f32,
}

impl Default for PreviewOverlay {
    fn default() -> Self {
        Self::new(GestureSettings::default(), FALLBACK_VIEWPORT_WIDTH)
    }
}

impl PreviewOverlay {
    pub fn new(settings: GestureSettings, viewport_width: f32) -> Self {
        Self {
            carousel: None,
            settings,
            viewport_width,
        }
    }

    /// Opens at `index`, replacing whatever was open before.
    pub fn open(&mut self, len: usize, index: usize) -> bool {
        match GestureCarousel::new(len, index, self.viewport_width, self.settings) {
            Some(carousel) => {
                info!("Opened preview at photo {} of {}", index + 1, len);
                self.carousel = Some(carousel);
                true
            }
            None => {
                debug!("Cannot open preview at {} with {} photos", index, len);
                false
            }
        }
    }

    /// Returns `false` when nothing was open.
    pub fn close(&mut self) -> bool {
        let was_open = self.carousel.take().is_some();
        if was_open {
            info!("Closed preview");
        }
        was_open
    }

    pub fn is_open(&self) -> bool {
        self.carousel.is_some()
    }

    pub fn carousel(&self) -> Option<&GestureCarousel> {
        self.carousel.as_ref()
    }

    pub fn carousel_mut(&mut self) -> Option<&mut GestureCarousel> {
        self.carousel.as_mut()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.carousel.as_ref().map(GestureCarousel::current_index)
    }

    pub fn tap_indicator(&mut self, index: usize) -> Option<CarouselEvent> {
        self.carousel.as_mut()?.jump_to(index)
    }

    pub fn indicators(&self) -> Vec<Indicator> {
        let Some(carousel) = &self.carousel else {
            return Vec::new();
        };

        (0..carousel.len())
            .map(|index| Indicator {
                index,
                active: index == carousel.current_index(),
            })
            .collect()
    }

    pub fn settings(&self) -> &GestureSettings {
        &self.settings
    }

    /// Applies to the next open.
    pub fn set_settings(&mut self, settings: GestureSettings) {
        self.settings = settings;
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        if !(width.is_finite() && width > 0.0) {
            return;
        }
        self.viewport_width = width;
        if let Some(carousel) = &mut self.carousel {
            carousel.set_viewport_width(width);
        }
    }
}
