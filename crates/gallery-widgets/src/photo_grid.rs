//! PhotoGrid - the two-column thumbnail grid
//!
//! Cells are square and split the available width evenly. Until the grid is
//! marked interactive, thumbnails are drawn dimmed and taps are ignored.

use std::cell::Cell;

use cosmic::{
    Element, Renderer,
    iced::{
        Color, Length, Point, Rectangle, Size,
        advanced::{
            Clipboard, Layout, Shell, Widget,
            image::Renderer as ImageRenderer,
            layout::{Limits, Node},
            overlay,
            renderer::{self as iced_renderer, Quad, Renderer as QuadRenderer},
            widget::{Operation, Tree},
        },
        event::{Event, Status},
        keyboard::{self, Key},
        mouse::{self, Button, Cursor},
        touch,
    },
    widget::image::Handle,
};
use shared::GridCellConfiguration;

use crate::fit;

/// Opacity of thumbnails while the grid is still waiting on loads.
const LOADING_OPACITY: f32 = 0.5;

/// What a cell shows.
#[derive(Debug, Clone)]
pub enum GridThumbnail {
    Pending,
    Ready {
        handle: Handle,
        width: u32,
        height: u32,
    },
    /// Load failed; an empty slot is shown instead.
    Unavailable,
}

pub struct PhotoGrid<'a, M> {
    thumbnails: Vec<GridThumbnail>,
    layout: GridCellConfiguration,
    interactive: bool,
    keyboard_nav_enabled: bool,
    width: Length,
    on_activate: Option<Box<dyn Fn(usize) -> M + 'a>>,
    on_focus: Option<Box<dyn Fn(usize) -> M + 'a>>,
    cached_width: Cell<f32>,
}

impl<'a, M: Clone + 'static> PhotoGrid<'a, M> {
    pub fn new(thumbnails: Vec<GridThumbnail>, layout: GridCellConfiguration) -> Self {
        Self {
            thumbnails,
            layout,
            interactive: true,
            keyboard_nav_enabled: true,
            width: Length::Fill,
            on_activate: None,
            on_focus: None,
            cached_width: Cell::new(0.0),
        }
    }

    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Disable while the preview covers the grid.
    pub fn keyboard_navigation(mut self, enabled: bool) -> Self {
        self.keyboard_nav_enabled = enabled;
        self
    }

    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.width = width.into();
        self
    }

    /// Called with the cell index on click, tap or Enter.
    pub fn on_activate<F>(mut self, f: F) -> Self
    where
        F: Fn(usize) -> M + 'a,
    {
        self.on_activate = Some(Box::new(f));
        self
    }

    /// Called when keyboard navigation moves the focus ring.
    pub fn on_focus<F>(mut self, f: F) -> Self
    where
        F: Fn(usize) -> M + 'a,
    {
        self.on_focus = Some(Box::new(f));
        self
    }

    fn item_at(&self, position: Point, bounds: Rectangle) -> Option<usize> {
        self.layout.item_at_position(
            (position.x - bounds.x, position.y - bounds.y),
            self.thumbnails.len(),
            self.cached_width.get(),
        )
    }

    fn cell_rect(&self, index: usize, bounds: Rectangle) -> Rectangle {
        let width = self.cached_width.get();
        let (x, y) = self.layout.cell_position(index, width);
        let side = self.layout.cell_size(width);
        Rectangle::new(
            Point::new(bounds.x + x, bounds.y + y),
            Size::new(side, side),
        )
    }

    fn activate(&self, index: usize, shell: &mut Shell<'_, M>) -> Status {
        if !self.interactive {
            return Status::Captured;
        }
        if let Some(on_activate) = &self.on_activate {
            shell.publish(on_activate(index));
        }
        Status::Captured
    }
}

impl<'a, M: Clone + 'static> Widget<M, cosmic::Theme, Renderer> for PhotoGrid<'a, M> {
    fn children(&self) -> Vec<Tree> {
        Vec::new()
    }

    fn diff(&mut self, _tree: &mut Tree) {}

    fn size(&self) -> Size<Length> {
        Size::new(self.width, Length::Shrink)
    }

    fn layout(&self, _tree: &mut Tree, _renderer: &Renderer, limits: &Limits) -> Node {
        let limits = limits.width(self.width);
        let width = limits.max().width;
        self.cached_width.set(width);

        let height = self.layout.content_height(self.thumbnails.len(), width);
        Node::new(limits.resolve(self.width, Length::Shrink, Size::new(width, height)))
    }

    fn draw(
        &self,
        _tree: &Tree,
        renderer: &mut Renderer,
        theme: &cosmic::Theme,
        _style: &iced_renderer::Style,
        layout: Layout<'_>,
        cursor: Cursor,
        _viewport: &Rectangle,
    ) {
        let bounds = layout.bounds();
        let cosmic_theme = theme.cosmic();

        let hovered = cursor
            .position()
            .filter(|pos| self.interactive && bounds.contains(*pos))
            .and_then(|pos| self.item_at(pos, bounds));
        let opacity = if self.interactive { 1.0 } else { LOADING_OPACITY };

        for (index, thumbnail) in self.thumbnails.iter().enumerate() {
            let cell = self.cell_rect(index, bounds);
            let focused = self.layout.keyboard_focus_index == Some(index);

            let background = if focused {
                cosmic_theme.accent_color().into()
            } else if hovered == Some(index) {
                Color::from_rgba(1.0, 1.0, 1.0, 0.1)
            } else {
                Color::from_rgba(0.5, 0.5, 0.5, 0.15)
            };

            renderer.fill_quad(
                Quad {
                    bounds: cell,
                    border: cosmic::iced::Border {
                        radius: 8.0.into(),
                        width: 0.0,
                        color: Color::TRANSPARENT,
                    },
                    shadow: Default::default(),
                },
                background,
            );

            match thumbnail {
                GridThumbnail::Ready {
                    handle,
                    width,
                    height,
                } => {
                    let inset = if focused { 3.0 } else { 0.0 };
                    let area = cell.shrink(inset);
                    renderer.draw_image(
                        handle.clone().into(),
                        cosmic::iced::widget::image::FilterMethod::Linear,
                        fit::contain(area, *width as f32, *height as f32),
                        cosmic::iced::Radians(0.0),
                        opacity,
                        [0.0; 4],
                    );
                }
                GridThumbnail::Pending => {
                    renderer.fill_quad(
                        Quad {
                            bounds: fit::centered_square(cell, cell.width / 2.0),
                            border: cosmic::iced::Border::default(),
                            shadow: Default::default(),
                        },
                        Color::from_rgba(0.5, 0.5, 0.5, 0.3),
                    );
                }
                GridThumbnail::Unavailable => {
                    renderer.fill_quad(
                        Quad {
                            bounds: fit::centered_square(cell, cell.width / 4.0),
                            border: cosmic::iced::Border {
                                radius: 4.0.into(),
                                width: 1.0,
                                color: Color::from_rgba(0.5, 0.5, 0.5, 0.6),
                            },
                            shadow: Default::default(),
                        },
                        Color::TRANSPARENT,
                    );
                }
            }
        }
    }

    fn on_event(
        &mut self,
        _tree: &mut Tree,
        event: Event,
        layout: Layout<'_>,
        cursor: Cursor,
        _renderer: &Renderer,
        _clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, M>,
        _viewport: &Rectangle,
    ) -> Status {
        let bounds = layout.bounds();

        match event {
            Event::Mouse(mouse::Event::ButtonPressed(Button::Left)) => {
                if let Some(position) = cursor.position()
                    && bounds.contains(position)
                    && let Some(index) = self.item_at(position, bounds)
                {
                    return self.activate(index, shell);
                }
            }

            Event::Touch(touch::Event::FingerPressed { position, .. }) => {
                if bounds.contains(position)
                    && let Some(index) = self.item_at(position, bounds)
                {
                    return self.activate(index, shell);
                }
            }

            Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => {
                if !self.keyboard_nav_enabled || self.thumbnails.is_empty() {
                    return Status::Ignored;
                }

                let total = self.thumbnails.len();
                let Some(current) = self.layout.keyboard_focus_index.filter(|i| *i < total)
                else {
                    if let Key::Named(
                        keyboard::key::Named::ArrowLeft
                        | keyboard::key::Named::ArrowRight
                        | keyboard::key::Named::ArrowUp
                        | keyboard::key::Named::ArrowDown,
                    ) = key
                    {
                        self.layout.keyboard_focus_index = Some(0);
                        if let Some(on_focus) = &self.on_focus {
                            shell.publish(on_focus(0));
                        }
                        return Status::Captured;
                    }
                    return Status::Ignored;
                };

                let moved = match key {
                    Key::Named(keyboard::key::Named::ArrowLeft) => {
                        self.layout.move_focus_left(current)
                    }
                    Key::Named(keyboard::key::Named::ArrowRight) => {
                        self.layout.move_focus_right(current, total)
                    }
                    Key::Named(keyboard::key::Named::ArrowUp) => self.layout.move_focus_up(current),
                    Key::Named(keyboard::key::Named::ArrowDown) => {
                        self.layout.move_focus_down(current, total)
                    }
                    Key::Named(keyboard::key::Named::Enter) => {
                        return self.activate(current, shell);
                    }
                    _ => return Status::Ignored,
                };

                if let Some(index) = moved {
                    if let Some(on_focus) = &self.on_focus {
                        shell.publish(on_focus(index));
                    }
                    return Status::Captured;
                }
            }

            _ => {}
        }

        Status::Ignored
    }

    fn mouse_interaction(
        &self,
        _tree: &Tree,
        layout: Layout<'_>,
        cursor: Cursor,
        _viewport: &Rectangle,
        _renderer: &Renderer,
    ) -> mouse::Interaction {
        let bounds = layout.bounds();
        match cursor.position() {
            Some(position)
                if bounds.contains(position) && self.item_at(position, bounds).is_some() =>
            {
                if self.interactive {
                    mouse::Interaction::Pointer
                } else {
                    mouse::Interaction::NotAllowed
                }
            }
            _ => mouse::Interaction::default(),
        }
    }

    fn operate(
        &self,
        _tree: &mut Tree,
        _layout: Layout<'_>,
        _renderer: &Renderer,
        _operation: &mut dyn Operation,
    ) {
    }

    fn overlay<'b>(
        &'b mut self,
        _tree: &'b mut Tree,
        _layout: Layout<'_>,
        _renderer: &Renderer,
        _translation: cosmic::iced::Vector,
    ) -> Option<overlay::Element<'b, M, cosmic::Theme, Renderer>> {
        None
    }
}

impl<'a, M: Clone + 'static> From<PhotoGrid<'a, M>> for Element<'a, M> {
    fn from(grid: PhotoGrid<'a, M>) -> Self {
        Element::new(grid)
    }
}

pub fn photo_grid<'a, M: Clone + 'static>(
    thumbnails: Vec<GridThumbnail>,
    layout: GridCellConfiguration,
) -> PhotoGrid<'a, M> {
    PhotoGrid::new(thumbnails, layout)
}
