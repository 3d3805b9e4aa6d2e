use serde::{Deserialize, Serialize};
use std::fmt;

/// Load status of a single image slot (thumbnail or full image).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LoadingState {
    #[default]
    Pending,
    Loaded,
    Failed(String),
}

impl LoadingState {
    pub fn is_pending(&self) -> bool {
        matches!(self, LoadingState::Pending)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadingState::Loaded)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, LoadingState::Failed(_))
    }

    /// Loaded and failed slots both count as settled.
    pub fn is_settled(&self) -> bool {
        !self.is_pending()
    }
}

impl fmt::Display for LoadingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadingState::Pending => write!(f, "Pending"),
            LoadingState::Loaded => write!(f, "Loaded"),
            LoadingState::Failed(msg) => write!(f, "Failed: {}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadingEvent {
    LoadComplete,
    LoadError(String),
}

impl LoadingEvent {
    pub fn apply_to_state(self, current_state: LoadingState) -> LoadingState {
        match (self, current_state) {
            // Settled slots never change again
            (_, state) if state.is_settled() => state,
            (LoadingEvent::LoadComplete, _) => LoadingState::Loaded,
            (LoadingEvent::LoadError(msg), _) => LoadingState::Failed(msg),
        }
    }
}
