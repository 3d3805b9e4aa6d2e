//! CarouselSurface - draws the preview layers and reports pointer input
//!
//! The surface holds no gesture logic. It turns mouse and single-finger
//! touch input into [`PointerEvent`]s and draws whatever layers the caller
//! passes in, clipped to its bounds.

use std::time::Instant;

use cosmic::{
    Element, Renderer,
    iced::{
        Color, Length, Rectangle, Size,
        advanced::{
            Clipboard, Layout, Shell, Widget,
            image::Renderer as ImageRenderer,
            layout::{Limits, Node},
            overlay,
            renderer::{self as iced_renderer, Quad, Renderer as QuadRenderer},
            widget::{Operation, Tree, tree},
        },
        event::{Event, Status},
        mouse::{self, Button, Cursor},
        touch,
    },
    widget::image::Handle,
};

use crate::fit;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, at: Instant },
    Move { x: f32 },
    Up { x: f32, at: Instant },
    Cancel,
}

/// One photo to draw, offset horizontally from the centered position.
#[derive(Debug, Clone)]
pub struct SlideLayer {
    pub image: Option<SlideImage>,
    pub translate_x: f32,
}

#[derive(Debug, Clone)]
pub struct SlideImage {
    pub handle: Handle,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Default)]
struct SurfaceState {
    finger: Option<touch::Finger>,
}

pub struct CarouselSurface<'a, M> {
    layers: Vec<SlideLayer>,
    dragging: bool,
    known_width: f32,
    width: Length,
    height: Length,
    on_pointer: Option<Box<dyn Fn(PointerEvent) -> M + 'a>>,
    on_resize: Option<Box<dyn Fn(f32) -> M + 'a>>,
}

impl<'a, M: Clone + 'static> CarouselSurface<'a, M> {
    /// `layers` are drawn in order, so the current photo goes last.
    pub fn new(layers: Vec<SlideLayer>) -> Self {
        Self {
            layers,
            dragging: false,
            known_width: 0.0,
            width: Length::Fill,
            height: Length::Fill,
            on_pointer: None,
            on_resize: None,
        }
    }

    /// Whether the owner considers a drag active. Moves and releases are
    /// only reported while this is set.
    pub fn dragging(mut self, dragging: bool) -> Self {
        self.dragging = dragging;
        self
    }

    /// Viewport width the owner last saw; a different laid-out width is
    /// reported through `on_resize`.
    pub fn known_width(mut self, width: f32) -> Self {
        self.known_width = width;
        self
    }

    pub fn width(mut self, width: impl Into<Length>) -> Self {
        self.width = width.into();
        self
    }

    pub fn height(mut self, height: impl Into<Length>) -> Self {
        self.height = height.into();
        self
    }

    pub fn on_pointer<F>(mut self, f: F) -> Self
    where
        F: Fn(PointerEvent) -> M + 'a,
    {
        self.on_pointer = Some(Box::new(f));
        self
    }

    pub fn on_resize<F>(mut self, f: F) -> Self
    where
        F: Fn(f32) -> M + 'a,
    {
        self.on_resize = Some(Box::new(f));
        self
    }

    fn publish(&self, event: PointerEvent, shell: &mut Shell<'_, M>) -> Status {
        if let Some(on_pointer) = &self.on_pointer {
            shell.publish(on_pointer(event));
        }
        Status::Captured
    }
}

impl<'a, M: Clone + 'static> Widget<M, cosmic::Theme, Renderer> for CarouselSurface<'a, M> {
    fn tag(&self) -> tree::Tag {
        tree::Tag::of::<SurfaceState>()
    }

    fn state(&self) -> tree::State {
        tree::State::new(SurfaceState::default())
    }

    fn children(&self) -> Vec<Tree> {
        Vec::new()
    }

    fn diff(&mut self, _tree: &mut Tree) {}

    fn size(&self) -> Size<Length> {
        Size::new(self.width, self.height)
    }

    fn layout(&self, _tree: &mut Tree, _renderer: &Renderer, limits: &Limits) -> Node {
        let limits = limits.width(self.width).height(self.height);
        Node::new(limits.resolve(self.width, self.height, limits.max()))
    }

    fn draw(
        &self,
        _tree: &Tree,
        renderer: &mut Renderer,
        _theme: &cosmic::Theme,
        _style: &iced_renderer::Style,
        layout: Layout<'_>,
        _cursor: Cursor,
        _viewport: &Rectangle,
    ) {
        let bounds = layout.bounds();

        renderer.with_layer(bounds, |renderer| {
            for layer in &self.layers {
                let slot = fit::shifted(bounds, layer.translate_x);
                if !slot.intersects(&bounds) {
                    continue;
                }

                match &layer.image {
                    Some(image) => renderer.draw_image(
                        image.handle.clone().into(),
                        cosmic::iced::widget::image::FilterMethod::Linear,
                        fit::contain(slot, image.width as f32, image.height as f32),
                        cosmic::iced::Radians(0.0),
                        1.0,
                        [0.0; 4],
                    ),
                    None => {
                        let side = slot.width.min(slot.height) / 3.0;
                        renderer.fill_quad(
                            Quad {
                                bounds: fit::centered_square(slot, side),
                                border: cosmic::iced::Border {
                                    radius: 8.0.into(),
                                    width: 0.0,
                                    color: Color::TRANSPARENT,
                                },
                                shadow: Default::default(),
                            },
                            Color::from_rgba(1.0, 1.0, 1.0, 0.08),
                        );
                    }
                }
            }
        });
    }

    fn on_event(
        &mut self,
        tree: &mut Tree,
        event: Event,
        layout: Layout<'_>,
        cursor: Cursor,
        _renderer: &Renderer,
        _clipboard: &mut dyn Clipboard,
        shell: &mut Shell<'_, M>,
        _viewport: &Rectangle,
    ) -> Status {
        let bounds = layout.bounds();
        let state = tree.state.downcast_mut::<SurfaceState>();

        if let Some(on_resize) = &self.on_resize
            && bounds.width > 0.0
            && (bounds.width - self.known_width).abs() > 0.5
        {
            shell.publish(on_resize(bounds.width));
            self.known_width = bounds.width;
        }

        match event {
            Event::Mouse(mouse::Event::ButtonPressed(Button::Left)) => {
                if let Some(position) = cursor.position_over(bounds) {
                    return self.publish(
                        PointerEvent::Down {
                            x: position.x,
                            at: Instant::now(),
                        },
                        shell,
                    );
                }
            }
            Event::Mouse(mouse::Event::CursorMoved { position }) if self.dragging => {
                return self.publish(PointerEvent::Move { x: position.x }, shell);
            }
            Event::Mouse(mouse::Event::ButtonReleased(Button::Left)) if self.dragging => {
                let event = match cursor.position() {
                    Some(position) => PointerEvent::Up {
                        x: position.x,
                        at: Instant::now(),
                    },
                    None => PointerEvent::Cancel,
                };
                return self.publish(event, shell);
            }
            Event::Mouse(mouse::Event::CursorLeft) if self.dragging => {
                return self.publish(PointerEvent::Cancel, shell);
            }

            Event::Touch(touch::Event::FingerPressed { id, position }) => {
                if state.finger.is_none() && bounds.contains(position) {
                    state.finger = Some(id);
                    return self.publish(
                        PointerEvent::Down {
                            x: position.x,
                            at: Instant::now(),
                        },
                        shell,
                    );
                }
            }
            Event::Touch(touch::Event::FingerMoved { id, position })
                if state.finger == Some(id) =>
            {
                return self.publish(PointerEvent::Move { x: position.x }, shell);
            }
            Event::Touch(touch::Event::FingerLifted { id, position })
                if state.finger == Some(id) =>
            {
                state.finger = None;
                return self.publish(
                    PointerEvent::Up {
                        x: position.x,
                        at: Instant::now(),
                    },
                    shell,
                );
            }
            Event::Touch(touch::Event::FingerLost { id, .. }) if state.finger == Some(id) => {
                state.finger = None;
                return self.publish(PointerEvent::Cancel, shell);
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
        if self.dragging {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(layout.bounds()) {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
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

impl<'a, M: Clone + 'static> From<CarouselSurface<'a, M>> for Element<'a, M> {
    fn from(surface: CarouselSurface<'a, M>) -> Self {
        Element::new(surface)
    }
}

pub fn carousel_surface<'a, M: Clone + 'static>(layers: Vec<SlideLayer>) -> CarouselSurface<'a, M> {
    CarouselSurface::new(layers)
}
