//! Swipe detection from touch start/end samples

use serde::{Deserialize, Serialize};

/// Minimum horizontal travel for a swipe, in pixels (exclusive)
pub const SWIPE_MIN_DISTANCE: f64 = 50.0;

/// Maximum vertical drift still accepted as a horizontal swipe (inclusive)
pub const SWIPE_MAX_VERTICAL_DRIFT: f64 = 100.0;

/// One touch point as delivered by the platform
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    /// Platform identifier, stable for the lifetime of a finger-down
    #[serde(default)]
    pub id: u64,
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(id: u64, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }
}

/// Start and end coordinates of a single finger-down/finger-up sequence
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSample {
    pub start_x: f64,
    pub start_y: f64,
    pub end_x: f64,
    pub end_y: f64,
}

/// Recognized swipe direction
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Swipe {
    Left,
    Right,
}

/// Classify a finished sample. `dx = start_x - end_x`, so a finger moving
/// towards smaller x yields a positive `dx` and a left swipe.
pub fn classify(sample: &GestureSample) -> Option<Swipe> {
    let dx = sample.start_x - sample.end_x;
    let dy = (sample.start_y - sample.end_y).abs();

    if dy > SWIPE_MAX_VERTICAL_DRIFT {
        return None;
    }
    if dx > SWIPE_MIN_DISTANCE {
        Some(Swipe::Left)
    } else if dx < -SWIPE_MIN_DISTANCE {
        Some(Swipe::Right)
    } else {
        None
    }
}

/// Tracks the initiating touch of the current sequence
#[derive(Debug, Clone, Default)]
pub struct GestureInterpreter {
    active: Option<TouchPoint>,
    /// Fingers seen going down and not yet lifted
    down: Vec<u64>,
}

impl GestureInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a sequence is in progress
    pub fn is_tracking(&self) -> bool {
        self.active.is_some()
    }

    /// Record the start of a sequence. Only the first touch of a fresh
    /// sequence is tracked; extra fingers are ignored.
    pub fn touch_start(&mut self, touches: &[TouchPoint]) {
        for touch in touches {
            if !self.down.contains(&touch.id) {
                self.down.push(touch.id);
            }
        }
        if self.active.is_none() {
            self.active = touches.first().copied();
        }
    }

    /// Finish the sequence if the tracked finger was lifted and classify it.
    ///
    /// Lifting another known finger leaves the sequence open. An end that
    /// names no finger seen going down means the tracked end was lost, so
    /// the stale sample is discarded.
    pub fn touch_end(&mut self, touches: &[TouchPoint]) -> Option<Swipe> {
        let known = touches.iter().any(|t| self.down.contains(&t.id));
        self.down.retain(|id| touches.iter().all(|t| t.id != *id));

        let start = self.active?;
        let Some(end) = touches.iter().find(|t| t.id == start.id) else {
            if !known {
                ::log::debug!("Discarding touch sequence for #{}, its end was lost", start.id);
                self.cancel();
            }
            return None;
        };
        self.active = None;

        classify(&GestureSample {
            start_x: start.x,
            start_y: start.y,
            end_x: end.x,
            end_y: end.y,
        })
    }

    /// Drop the current sequence without interpreting it
    pub fn cancel(&mut self) {
        self.active = None;
        self.down.clear();
    }
}
