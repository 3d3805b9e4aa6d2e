use crate::carousel::{AnimationId, CarouselEvent, GestureOutcome, TickOutcome};
use crate::gesture::{Direction, GestureSettings};
use crate::grid::{GridCell, GridView};
use crate::layers::Layer;
use crate::overlay::PreviewOverlay;
use gallery_types::{Photo, PhotoCatalog, PhotoId};
use shared::{GridCellConfiguration, LoadOutcome, PreloadCoordinator, PreloadPlan, Ready};
use std::time::Instant;
use tracing::info;

/// Page state: the catalog, the thumbnail readiness gate, the grid and the
/// preview overlay.
#[derive(Debug, Clone)]
pub struct Gallery {
    catalog: PhotoCatalog,
    preload: PreloadCoordinator<PhotoId>,
    grid: GridView,
    overlay: PreviewOverlay,
}

impl Gallery {
    pub fn new(catalog: PhotoCatalog, settings: GestureSettings, layout: GridCellConfiguration) -> Self {
        Self {
            catalog,
            preload: PreloadCoordinator::new(),
            grid: GridView::new(layout),
            overlay: PreviewOverlay::new(settings, crate::carousel::FALLBACK_VIEWPORT_WIDTH),
        }
    }

    pub fn catalog(&self) -> &PhotoCatalog {
        &self.catalog
    }

    pub fn grid(&self) -> &GridView {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut GridView {
        &mut self.grid
    }

    pub fn overlay(&self) -> &PreviewOverlay {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut PreviewOverlay {
        &mut self.overlay
    }

    /// Thumbnails to request. Only the first call returns anything.
    pub fn start_preload(&mut self) -> PreloadPlan<PhotoId> {
        let plan = self.preload.start(self.catalog.ids());
        if !plan.requests.is_empty() {
            info!("Preloading {} thumbnails", plan.requests.len());
        }
        plan
    }

    pub fn thumbnail_settled(&mut self, id: PhotoId, outcome: LoadOutcome) -> Option<Ready> {
        self.preload.settle(&id, outcome)
    }

    pub fn is_ready(&self) -> bool {
        self.preload.is_ready()
    }

    /// `(settled, total)` thumbnail count.
    pub fn preload_progress(&self) -> (usize, usize) {
        self.preload.progress()
    }

    pub fn thumbnail_failed(&self, id: PhotoId) -> bool {
        self.preload
            .state(&id)
            .is_some_and(|state| state.is_failed())
    }

    pub fn cells(&self) -> Vec<GridCell<'_>> {
        self.grid.cells(&self.catalog, self.is_ready())
    }

    /// Opens the preview on the tapped photo. Returns its index.
    pub fn select(&mut self, id: PhotoId) -> Option<usize> {
        let index = self.grid.select(&self.catalog, self.is_ready(), id)?;
        self.overlay
            .open(self.catalog.len(), index)
            .then_some(index)
    }

    pub fn select_index(&mut self, index: usize) -> Option<usize> {
        let id = self.catalog.get(index)?.id();
        self.select(id)
    }

    pub fn close_preview(&mut self) -> bool {
        self.overlay.close()
    }

    pub fn current_photo(&self) -> Option<&Photo> {
        self.catalog.get(self.overlay.current_index()?)
    }

    /// Photos to draw in the preview, back to front.
    pub fn visible_layers(&self) -> Vec<(Layer, &Photo)> {
        let Some(carousel) = self.overlay.carousel() else {
            return Vec::new();
        };

        carousel
            .layers()
            .into_iter()
            .filter_map(|layer| Some((layer, self.catalog.get(layer.index)?)))
            .collect()
    }

    pub fn pointer_down(&mut self, x: f32, now: Instant) -> bool {
        self.overlay
            .carousel_mut()
            .is_some_and(|carousel| carousel.pointer_down(x, now))
    }

    pub fn pointer_move(&mut self, x: f32) -> Option<f32> {
        self.overlay.carousel_mut()?.pointer_move(x)
    }

    pub fn pointer_up(&mut self, x: f32, now: Instant) -> Option<GestureOutcome> {
        self.overlay.carousel_mut()?.pointer_up(x, now)
    }

    pub fn pointer_cancel(&mut self) {
        if let Some(carousel) = self.overlay.carousel_mut() {
            carousel.pointer_cancel();
        }
    }

    pub fn step(&mut self, direction: Direction, now: Instant) -> Option<CarouselEvent> {
        self.overlay.carousel_mut()?.step(direction, now)
    }

    pub fn jump_to(&mut self, index: usize) -> Option<CarouselEvent> {
        self.overlay.tap_indicator(index)
    }

    pub fn animation_id(&self) -> Option<AnimationId> {
        self.overlay.carousel()?.animation_id()
    }

    pub fn tick_animation(&mut self, id: AnimationId, now: Instant) -> TickOutcome {
        match self.overlay.carousel_mut() {
            Some(carousel) => carousel.tick_animation(id, now),
            None => TickOutcome::Stale,
        }
    }

    pub fn set_viewport_width(&mut self, width: f32) {
        self.overlay.set_viewport_width(width);
    }
}
