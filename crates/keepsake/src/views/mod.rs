mod grid;
mod preview;

pub use grid::{grid_view, status_text};
pub use preview::preview_dialog;
