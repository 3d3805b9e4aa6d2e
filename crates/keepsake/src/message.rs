use cosmic::widget::image::Handle;
use gallery_nav::AnimationId;
use gallery_types::PhotoId;
use gallery_widgets::PointerEvent;
use std::time::Instant;

pub use crate::key_binds::MenuAction;

#[derive(Debug, Clone)]
pub enum Message {
    Image(ImageMessage),
    Grid(GridMessage),
    Preview(PreviewMessage),
    /// Animation frame for the carousel animation with this id.
    Frame(AnimationId, Instant),
    ToggleAudio,
    KeyBind(MenuAction),
    Quit,
}

#[derive(Debug, Clone)]
pub enum ImageMessage {
    ThumbnailReady {
        id: PhotoId,
        handle: Handle,
        width: u32,
        height: u32,
    },
    ThumbnailFailed {
        id: PhotoId,
        error: String,
    },
    FullReady {
        id: PhotoId,
        handle: Handle,
        width: u32,
        height: u32,
    },
    FullFailed {
        id: PhotoId,
        error: String,
    },
}

#[derive(Debug, Clone, Copy)]
pub enum GridMessage {
    Activate(usize),
    Focus(usize),
}

#[derive(Debug, Clone, Copy)]
pub enum PreviewMessage {
    Pointer(PointerEvent),
    Resized(f32),
    Previous,
    Next,
    First,
    Last,
    JumpTo(usize),
    Close,
    /// Swallows presses on the preview frame so they don't reach the backdrop.
    Ignore,
}
