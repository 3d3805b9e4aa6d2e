use crate::gesture::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerRole {
    Previous,
    Current,
    Next,
}

/// One photo positioned in the preview. `translate_x` is relative to the
/// centered resting position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    pub index: usize,
    pub role: LayerRole,
    pub translate_x: f32,
    pub z_index: u8,
}

/// The current photo plus whichever neighbours exist, sorted back to front.
/// Neighbours sit one viewport width away and move with the drag offset.
pub fn compose(current_index: usize, len: usize, drag_offset: f32, viewport_width: f32) -> Vec<Layer> {
    if current_index >= len {
        return Vec::new();
    }

    let mut layers = Vec::with_capacity(3);

    if let Some(index) = Direction::Backward.neighbour(current_index, len) {
        layers.push(Layer {
            index,
            role: LayerRole::Previous,
            translate_x: drag_offset - viewport_width,
            z_index: 1,
        });
    }

    if let Some(index) = Direction::Forward.neighbour(current_index, len) {
        layers.push(Layer {
            index,
            role: LayerRole::Next,
            translate_x: drag_offset + viewport_width,
            z_index: 1,
        });
    }

    layers.push(Layer {
        index: current_index,
        role: LayerRole::Current,
        translate_x: drag_offset,
        z_index: 2,
    });

    layers
}
