pub mod carousel;
pub mod easing;
pub mod gallery;
pub mod gesture;
pub mod grid;
pub mod layers;
pub mod overlay;

pub use carousel::{
    AnimationId, CarouselEvent, CarouselState, GestureCarousel, GestureOutcome, Phase,
    SnapReason, TickOutcome,
};
pub use gallery::Gallery;
pub use gesture::{Direction, GestureSettings};
pub use grid::{FocusMove, GridCell, GridView};
pub use layers::{Layer, LayerRole};
pub use overlay::{Indicator, PreviewOverlay};
