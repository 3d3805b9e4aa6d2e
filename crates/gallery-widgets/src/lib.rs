pub mod carousel;
pub mod fit;
pub mod photo_grid;

pub use carousel::{CarouselSurface, PointerEvent, SlideImage, SlideLayer, carousel_surface};
pub use photo_grid::{GridThumbnail, PhotoGrid, photo_grid};
