use serde::{Deserialize, Serialize};

/// The gallery grid always lays photos out in two columns.
pub const GRID_COLUMNS: usize = 2;

/// Geometry of the fixed two-column thumbnail grid. Cells are square and
/// share the available width evenly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridCellConfiguration {
    pub spacing: f32,
    pub padding: f32,
    pub keyboard_focus_index: Option<usize>,
}

impl GridCellConfiguration {
    pub fn new(spacing: f32) -> Self {
        Self {
            spacing,
            padding: 8.0, // Default 8px outer padding
            keyboard_focus_index: None,
        }
    }

    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_keyboard_focus(mut self, index: Option<usize>) -> Self {
        self.keyboard_focus_index = index;
        self
    }

    /// Side length of a cell for the given container width.
    pub fn cell_size(&self, container_width: f32) -> f32 {
        let gaps = self.spacing * (GRID_COLUMNS - 1) as f32;
        ((container_width - 2.0 * self.padding - gaps) / GRID_COLUMNS as f32).max(0.0)
    }

    pub fn total_cell_size(&self, container_width: f32) -> f32 {
        self.cell_size(container_width) + self.spacing
    }

    pub fn grid_dimensions(&self, total_items: usize) -> (usize, usize) {
        (GRID_COLUMNS, total_items.div_ceil(GRID_COLUMNS))
    }

    /// Height needed to show every row, including the outer padding.
    pub fn content_height(&self, total_items: usize, container_width: f32) -> f32 {
        let (_, rows) = self.grid_dimensions(total_items);
        if rows == 0 {
            return 0.0;
        }
        let cell = self.cell_size(container_width);
        rows as f32 * cell + (rows - 1) as f32 * self.spacing + 2.0 * self.padding
    }

    /// Top-left corner of a cell, relative to the grid origin.
    pub fn cell_position(&self, index: usize, container_width: f32) -> (f32, f32) {
        let row = index / GRID_COLUMNS;
        let col = index % GRID_COLUMNS;
        let step = self.total_cell_size(container_width);

        (
            self.padding + col as f32 * step,
            self.padding + row as f32 * step,
        )
    }

    /// Index of the cell under a point, or `None` for padding, gaps and empty
    /// trailing slots.
    pub fn item_at_position(
        &self,
        position: (f32, f32),
        total_items: usize,
        container_width: f32,
    ) -> Option<usize> {
        let cell = self.cell_size(container_width);
        if cell <= 0.0 {
            return None;
        }

        let x = position.0 - self.padding;
        let y = position.1 - self.padding;
        if x < 0.0 || y < 0.0 {
            return None;
        }

        let step = cell + self.spacing;
        let col = (x / step).floor() as usize;
        let row = (y / step).floor() as usize;
        if col >= GRID_COLUMNS {
            return None;
        }

        // In the gap between cells
        if x - col as f32 * step > cell || y - row as f32 * step > cell {
            return None;
        }

        let index = row * GRID_COLUMNS + col;
        (index < total_items).then_some(index)
    }

    pub fn move_focus_up(&mut self, current_index: usize) -> Option<usize> {
        let new_index = current_index.checked_sub(GRID_COLUMNS)?;
        self.keyboard_focus_index = Some(new_index);
        Some(new_index)
    }

    pub fn move_focus_down(&mut self, current_index: usize, total_items: usize) -> Option<usize> {
        let new_index = current_index + GRID_COLUMNS;
        if new_index < total_items {
            self.keyboard_focus_index = Some(new_index);
            return Some(new_index);
        }
        None
    }

    pub fn move_focus_left(&mut self, current_index: usize) -> Option<usize> {
        if current_index % GRID_COLUMNS > 0 {
            let new_index = current_index - 1;
            self.keyboard_focus_index = Some(new_index);
            return Some(new_index);
        }
        None
    }

    pub fn move_focus_right(&mut self, current_index: usize, total_items: usize) -> Option<usize> {
        if current_index % GRID_COLUMNS < GRID_COLUMNS - 1 && current_index + 1 < total_items {
            let new_index = current_index + 1;
            self.keyboard_focus_index = Some(new_index);
            return Some(new_index);
        }
        None
    }
}

impl Default for GridCellConfiguration {
    fn default() -> Self {
        Self::new(8.0)
    }
}
