//! Commit decision for a released drag.

use gallery_config::{CommitPolicy, GalleryConfig};
use std::time::Duration;

/// Minimum drag distance, in pixels, that always commits.
pub const DISTANCE_THRESHOLD: f32 = 50.0;

/// Flick speed, in pixels per millisecond, that commits a short drag.
pub const VELOCITY_THRESHOLD: f32 = 0.5;

/// Duration of commit and snap-back animations.
pub const ANIMATION_DURATION: Duration = Duration::from_millis(300);

/// Which neighbour a gesture moves to. Dragging left (negative delta)
/// reveals the next photo, dragging right reveals the previous one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn from_delta(delta: f32) -> Option<Self> {
        if delta < 0.0 {
            Some(Direction::Forward)
        } else if delta > 0.0 {
            Some(Direction::Backward)
        } else {
            None
        }
    }

    /// Index of the neighbour in this direction, if it exists.
    pub fn neighbour(self, index: usize, len: usize) -> Option<usize> {
        match self {
            Direction::Forward => index.checked_add(1).filter(|next| *next < len),
            Direction::Backward => index.checked_sub(1).filter(|_| index < len),
        }
    }

    /// Offset the current photo slides to when this direction commits.
    pub fn target_offset(self, viewport_width: f32) -> f32 {
        match self {
            Direction::Forward => -viewport_width,
            Direction::Backward => viewport_width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSettings {
    pub commit_policy: CommitPolicy,
    pub distance_threshold: f32,
    pub velocity_threshold: f32,
    pub animation_duration: Duration,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            commit_policy: CommitPolicy::default(),
            distance_threshold: DISTANCE_THRESHOLD,
            velocity_threshold: VELOCITY_THRESHOLD,
            animation_duration: ANIMATION_DURATION,
        }
    }
}

impl GestureSettings {
    pub fn from_config(config: &GalleryConfig) -> Self {
        Self {
            commit_policy: config.commit_policy,
            distance_threshold: config.distance_threshold,
            velocity_threshold: config.velocity_threshold,
            animation_duration: Duration::from_millis(u64::from(config.animation_ms)),
        }
    }

    pub fn with_policy(mut self, policy: CommitPolicy) -> Self {
        self.commit_policy = policy;
        self
    }

    /// `distance` is the total drag offset at release, `travel` the pointer
    /// movement during this gesture and `elapsed` its duration. A flick only
    /// counts when `travel` points the same way as `distance`. Elapsed time
    /// below 1ms is treated as 1ms.
    pub fn should_commit(&self, distance: f32, travel: f32, elapsed: Duration) -> bool {
        if distance == 0.0 {
            return false;
        }

        if distance.abs() > self.distance_threshold {
            return true;
        }

        match self.commit_policy {
            CommitPolicy::DistanceOnly => false,
            CommitPolicy::DistanceOrVelocity => {
                if travel * distance <= 0.0 {
                    return false;
                }
                let elapsed_ms = (elapsed.as_micros() as f32 / 1000.0).max(1.0);
                travel.abs() / elapsed_ms > self.velocity_threshold
            }
        }
    }

    pub fn decide(&self, distance: f32, travel: f32, elapsed: Duration) -> Option<Direction> {
        if self.should_commit(distance, travel, elapsed) {
            Direction::from_delta(distance)
        } else {
            None
        }
    }
}
