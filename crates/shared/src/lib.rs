pub mod grid_config;
pub mod image;
pub mod loading_state;
pub mod preload;
pub mod screen_reader_labels;

pub use grid_config::{GRID_COLUMNS, GridCellConfiguration};
pub use loading_state::{LoadingEvent, LoadingState};
pub use preload::{LOAD_TIMEOUT, LoadOutcome, PreloadCoordinator, PreloadPlan, Ready, preload_all};
