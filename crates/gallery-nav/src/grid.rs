use gallery_types::{Photo, PhotoCatalog, PhotoId};
use shared::GridCellConfiguration;
use tracing::debug;

/// One thumbnail slot in the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell<'a> {
    pub index: usize,
    pub photo: &'a Photo,
    /// Cells only react to activation once every thumbnail has settled.
    pub interactive: bool,
    pub focused: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMove {
    Up,
    Down,
    Left,
    Right,
}

/// The two-column thumbnail grid.
#[derive(Debug, Clone, Default)]
pub struct GridView {
    layout: GridCellConfiguration,
}

impl GridView {
    pub fn new(layout: GridCellConfiguration) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &GridCellConfiguration {
        &self.layout
    }

    pub fn cells<'a>(&self, catalog: &'a PhotoCatalog, ready: bool) -> Vec<GridCell<'a>> {
        catalog
            .iter()
            .enumerate()
            .map(|(index, photo)| GridCell {
                index,
                photo,
                interactive: ready,
                focused: self.layout.keyboard_focus_index == Some(index),
            })
            .collect()
    }

    /// Resolves a tapped photo to its catalog index. Taps before the grid is
    /// ready are dropped.
    pub fn select(&self, catalog: &PhotoCatalog, ready: bool, id: PhotoId) -> Option<usize> {
        if !ready {
            debug!("Ignoring selection of {} before thumbnails settled", id);
            return None;
        }
        catalog.index_of(id)
    }

    pub fn focused(&self) -> Option<usize> {
        self.layout.keyboard_focus_index
    }

    pub fn set_focus(&mut self, index: Option<usize>, total: usize) {
        self.layout.keyboard_focus_index = index.filter(|index| *index < total);
    }

    /// Moves keyboard focus, starting at the first cell when nothing is
    /// focused yet.
    pub fn move_focus(&mut self, movement: FocusMove, total: usize) -> Option<usize> {
        if total == 0 {
            return None;
        }

        let Some(current) = self.layout.keyboard_focus_index.filter(|i| *i < total) else {
            self.layout.keyboard_focus_index = Some(0);
            return Some(0);
        };

        match movement {
            FocusMove::Up => self.layout.move_focus_up(current),
            FocusMove::Down => self.layout.move_focus_down(current, total),
            FocusMove::Left => self.layout.move_focus_left(current),
            FocusMove::Right => self.layout.move_focus_right(current, total),
        }
    }

    pub fn activate_focused(&self, catalog: &PhotoCatalog, ready: bool) -> Option<usize> {
        let photo = catalog.get(self.focused()?)?;
        self.select(catalog, ready, photo.id())
    }
}
