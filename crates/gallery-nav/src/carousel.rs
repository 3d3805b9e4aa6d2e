//! Swipe state machine for the fullscreen preview.
//!
//! The carousel is driven entirely by the caller: pointer events and frame
//! ticks carry their own timestamps, which keeps every transition
//! deterministic and testable without a real clock.

use crate::easing::Tween;
use crate::gesture::{Direction, GestureSettings};
use crate::layers::{self, Layer};
use std::time::Instant;
use tracing::debug;

/// Width used until the real viewport size is known.
pub const FALLBACK_VIEWPORT_WIDTH: f32 = 800.0;

/// Identifies one running animation. Frames tagged with an older id are
/// ignored once that animation has been replaced or cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Dragging,
    AnimatingCommit(Direction),
    AnimatingSnapBack,
}

impl Phase {
    pub fn is_animating(self) -> bool {
        matches!(self, Phase::AnimatingCommit(_) | Phase::AnimatingSnapBack)
    }

    pub fn is_dragging(self) -> bool {
        self == Phase::Dragging
    }
}

/// Observable carousel state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CarouselState {
    pub current_index: usize,
    /// Horizontal displacement of the current photo, in pixels.
    pub drag_offset: f32,
    pub phase: Phase,
    /// Set only while a commit animation is running.
    pub pending_direction: Option<Direction>,
}

impl CarouselState {
    fn at(index: usize) -> Self {
        Self {
            current_index: index,
            drag_offset: 0.0,
            phase: Phase::Idle,
            pending_direction: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapReason {
    BelowThreshold,
    /// The gesture would have moved past the first or last photo.
    Boundary,
}

/// What a released drag turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    Commit(Direction),
    SnapBack(SnapReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselEvent {
    IndexChanged { from: usize, to: usize },
    /// An animation finished without changing the index.
    Settled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TickOutcome {
    Stale,
    Running(f32),
    Completed(CarouselEvent),
}

#[derive(Debug, Clone, Copy)]
struct DragStart {
    /// Pointer x at which the drag offset would be zero.
    start_x: f32,
    /// Pointer x at pointer down.
    origin_x: f32,
    started_at: Instant,
}

#[derive(Debug, Clone, Copy)]
struct Animation {
    id: AnimationId,
    tween: Tween,
}

#[derive(Debug, Clone)]
pub struct GestureCarousel {
    state: CarouselState,
    len: usize,
    viewport_width: f32,
    settings: GestureSettings,
    drag: Option<DragStart>,
    animation: Option<Animation>,
    next_animation_id: u64,
}

impl GestureCarousel {
    /// Returns `None` when `initial_index` is not a valid index into `len`
    /// photos.
    pub fn new(
        len: usize,
        initial_index: usize,
        viewport_width: f32,
        settings: GestureSettings,
    ) -> Option<Self> {
        if initial_index >= len {
            return None;
        }

        Some(Self {
            state: CarouselState::at(initial_index),
            len,
            viewport_width: if valid_width(viewport_width) {
                viewport_width
            } else {
                FALLBACK_VIEWPORT_WIDTH
            },
            settings,
            drag: None,
            animation: None,
            next_animation_id: 0,
        })
    }

    pub fn state(&self) -> CarouselState {
        self.state
    }

    pub fn current_index(&self) -> usize {
        self.state.current_index
    }

    pub fn drag_offset(&self) -> f32 {
        self.state.drag_offset
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.state.pending_direction
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn viewport_width(&self) -> f32 {
        self.viewport_width
    }

    pub fn settings(&self) -> &GestureSettings {
        &self.settings
    }

    pub fn animation_id(&self) -> Option<AnimationId> {
        self.animation.map(|animation| animation.id)
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Layers to draw, back to front.
    pub fn layers(&self) -> Vec<Layer> {
        layers::compose(
            self.state.current_index,
            self.len,
            self.state.drag_offset,
            self.viewport_width,
        )
    }

    /// Ignores widths that are not positive and finite.
    pub fn set_viewport_width(&mut self, width: f32) -> bool {
        if !valid_width(width) || width == self.viewport_width {
            return false;
        }
        self.viewport_width = width;
        true
    }

    /// Starts a drag. Grabbing the photo mid-animation cancels the animation
    /// and continues from where the photo currently is. Returns `false` when
    /// a drag is already in progress.
    pub fn pointer_down(&mut self, x: f32, now: Instant) -> bool {
        match self.state.phase {
            Phase::Dragging => {
                debug!("Ignoring pointer down, drag already in progress");
                return false;
            }
            Phase::Idle => {
                self.state.drag_offset = 0.0;
            }
            Phase::AnimatingCommit(_) | Phase::AnimatingSnapBack => {
                let offset = self.animated_offset(now);
                self.cancel_animation();
                self.state.drag_offset = offset;
            }
        }

        self.state.phase = Phase::Dragging;
        self.state.pending_direction = None;
        self.drag = Some(DragStart {
            start_x: x - self.state.drag_offset,
            origin_x: x,
            started_at: now,
        });
        true
    }

    /// Follows the pointer. Returns the new offset, or `None` when no drag is
    /// active.
    pub fn pointer_move(&mut self, x: f32) -> Option<f32> {
        if self.state.phase != Phase::Dragging {
            return None;
        }
        let drag = self.drag?;
        self.state.drag_offset = x - drag.start_x;
        Some(self.state.drag_offset)
    }

    /// Ends the drag and starts either a commit or a snap-back animation.
    pub fn pointer_up(&mut self, x: f32, now: Instant) -> Option<GestureOutcome> {
        if self.state.phase != Phase::Dragging {
            return None;
        }
        let Some(drag) = self.drag.take() else {
            self.reset();
            return None;
        };

        let distance = x - drag.start_x;
        let travel = x - drag.origin_x;
        let elapsed = now.saturating_duration_since(drag.started_at);
        self.state.drag_offset = distance;

        let outcome = match self.settings.decide(distance, travel, elapsed) {
            Some(direction)
                if direction
                    .neighbour(self.state.current_index, self.len)
                    .is_some() =>
            {
                self.animate_commit(direction, now);
                GestureOutcome::Commit(direction)
            }
            Some(_) => {
                self.animate_snap_back(now);
                GestureOutcome::SnapBack(SnapReason::Boundary)
            }
            None => {
                self.animate_snap_back(now);
                GestureOutcome::SnapBack(SnapReason::BelowThreshold)
            }
        };

        debug!(
            "Drag released at {:.1}px after {:?}: {:?}",
            distance, elapsed, outcome
        );
        Some(outcome)
    }

    /// Abandons the drag or animation and returns to rest at the current
    /// index.
    pub fn pointer_cancel(&mut self) {
        if self.state.phase != Phase::Idle {
            debug!("Gesture cancelled at photo {}", self.state.current_index);
        }
        self.reset();
    }

    /// Advances the running animation, if any.
    pub fn tick(&mut self, now: Instant) -> Option<CarouselEvent> {
        let animation = self.animation?;
        self.advance(animation, now)
    }

    /// Advances the animation only if `id` still names it.
    pub fn tick_animation(&mut self, id: AnimationId, now: Instant) -> TickOutcome {
        match self.animation {
            Some(animation) if animation.id == id => match self.advance(animation, now) {
                Some(event) => TickOutcome::Completed(event),
                None => TickOutcome::Running(self.state.drag_offset),
            },
            _ => TickOutcome::Stale,
        }
    }

    /// Moves straight to `index`, abandoning any gesture in flight.
    pub fn jump_to(&mut self, index: usize) -> Option<CarouselEvent> {
        if index >= self.len {
            return None;
        }

        self.reset();
        if index == self.state.current_index {
            return None;
        }

        let from = self.state.current_index;
        self.state.current_index = index;
        debug!("Jumped from photo {} to {}", from, index);
        Some(CarouselEvent::IndexChanged { from, to: index })
    }

    /// Animated move to a neighbour, as triggered by buttons or keys.
    ///
    /// A step during a commit finishes that commit first, so repeated steps
    /// never lose an index change. Returns the index change that was
    /// completed early, if any.
    pub fn step(&mut self, direction: Direction, now: Instant) -> Option<CarouselEvent> {
        match self.state.phase {
            Phase::Dragging => None,
            Phase::Idle => {
                if direction
                    .neighbour(self.state.current_index, self.len)
                    .is_some()
                {
                    self.animate_commit(direction, now);
                }
                None
            }
            Phase::AnimatingSnapBack => {
                if direction
                    .neighbour(self.state.current_index, self.len)
                    .is_some()
                {
                    self.state.drag_offset = self.animated_offset(now);
                    self.cancel_animation();
                    self.animate_commit(direction, now);
                }
                None
            }
            Phase::AnimatingCommit(in_flight) => {
                let offset = self.animated_offset(now);
                let event = self.finish_animation();
                // The photo that just became current keeps its position on screen.
                self.state.drag_offset = offset - in_flight.target_offset(self.viewport_width);

                if direction
                    .neighbour(self.state.current_index, self.len)
                    .is_some()
                {
                    self.animate_commit(direction, now);
                } else {
                    self.animate_snap_back(now);
                }
                Some(event)
            }
        }
    }

    fn animated_offset(&self, now: Instant) -> f32 {
        self.animation
            .map(|animation| animation.tween.sample(now))
            .unwrap_or(self.state.drag_offset)
    }

    fn advance(&mut self, animation: Animation, now: Instant) -> Option<CarouselEvent> {
        if animation.tween.is_finished(now) {
            return Some(self.finish_animation());
        }
        self.state.drag_offset = animation.tween.sample(now);
        None
    }

    fn animate_commit(&mut self, direction: Direction, now: Instant) {
        let target = direction.target_offset(self.viewport_width);
        self.start_animation(target, now);
        self.state.phase = Phase::AnimatingCommit(direction);
        self.state.pending_direction = Some(direction);
    }

    fn animate_snap_back(&mut self, now: Instant) {
        self.start_animation(0.0, now);
        self.state.phase = Phase::AnimatingSnapBack;
        self.state.pending_direction = None;
    }

    fn start_animation(&mut self, target: f32, now: Instant) {
        let id = AnimationId(self.next_animation_id);
        self.next_animation_id = self.next_animation_id.wrapping_add(1);
        self.animation = Some(Animation {
            id,
            tween: Tween::new(
                self.state.drag_offset,
                target,
                now,
                self.settings.animation_duration,
            ),
        });
    }

    fn cancel_animation(&mut self) {
        if let Some(animation) = self.animation.take() {
            debug!("Cancelled animation {:?}", animation.id);
        }
    }

    fn finish_animation(&mut self) -> CarouselEvent {
        let event = match self.state.phase {
            Phase::AnimatingCommit(direction) => {
                let from = self.state.current_index;
                match direction.neighbour(from, self.len) {
                    Some(to) => {
                        self.state.current_index = to;
                        debug!("Committed from photo {} to {}", from, to);
                        CarouselEvent::IndexChanged { from, to }
                    }
                    None => CarouselEvent::Settled,
                }
            }
            _ => CarouselEvent::Settled,
        };

        self.animation = None;
        self.drag = None;
        self.state.drag_offset = 0.0;
        self.state.phase = Phase::Idle;
        self.state.pending_direction = None;
        event
    }

    fn reset(&mut self) {
        self.cancel_animation();
        self.drag = None;
        self.state.drag_offset = 0.0;
        self.state.phase = Phase::Idle;
        self.state.pending_direction = None;
    }
}

fn valid_width(width: f32) -> bool {
    width.is_finite() && width > 0.0
}
