//! Desktop/mobile mode detection

use serde::{Deserialize, Serialize};

/// Widest viewport still treated as mobile, in CSS pixels
pub const MOBILE_MAX_WIDTH: f64 = 768.0;

/// Interaction mode, selects which transition table drives the sidebar
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Desktop,
    Mobile,
}

/// Mobile when the viewport is narrow or the pointer cannot hover.
pub fn detect_mode(viewport_width: f64, pointer_is_coarse: bool) -> Mode {
    if viewport_width <= MOBILE_MAX_WIDTH || pointer_is_coarse {
        Mode::Mobile
    } else {
        Mode::Desktop
    }
}

/// Tracks the last detected mode and reports only actual changes.
///
/// Resize events arrive undebounced, so `observe` must be cheap and idempotent.
#[derive(Debug, Clone)]
pub struct ResponsiveModeDetector {
    current: Mode,
}

impl ResponsiveModeDetector {
    /// Create a detector seeded with the initial viewport.
    pub fn new(viewport_width: f64, pointer_is_coarse: bool) -> Self {
        Self {
            current: detect_mode(viewport_width, pointer_is_coarse),
        }
    }

    pub fn current(&self) -> Mode {
        self.current
    }

    /// Re-evaluate after a viewport change. Returns the new mode only when it
    /// differs from the recorded one.
    pub fn observe(&mut self, viewport_width: f64, pointer_is_coarse: bool) -> Option<Mode> {
        let mode = detect_mode(viewport_width, pointer_is_coarse);
        if mode == self.current {
            return None;
        }
        ::log::debug!("Mode changed {:?} -> {:?} (width {})", self.current, mode, viewport_width);
        self.current = mode;
        Some(mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_threshold_is_inclusive() {
        assert_eq!(detect_mode(768.0, false), Mode::Mobile);
        assert_eq!(detect_mode(768.5, false), Mode::Desktop);
        assert_eq!(detect_mode(1920.0, false), Mode::Desktop);
        assert_eq!(detect_mode(320.0, false), Mode::Mobile);
    }

    #[test]
    fn test_coarse_pointer_forces_mobile() {
        assert_eq!(detect_mode(2560.0, true), Mode::Mobile);
    }

    #[test]
    fn test_observe_fires_only_on_change() {
        let mut detector = ResponsiveModeDetector::new(1280.0, false);
        assert_eq!(detector.current(), Mode::Desktop);

        assert_eq!(detector.observe(1100.0, false), None);
        assert_eq!(detector.observe(1000.0, false), None);
        assert_eq!(detector.observe(700.0, false), Some(Mode::Mobile));
        assert_eq!(detector.observe(600.0, false), None);
        assert_eq!(detector.observe(600.0, false), None);
        assert_eq!(detector.observe(900.0, true), None);
        assert_eq!(detector.observe(900.0, false), Some(Mode::Desktop));
        assert_eq!(detector.current(), Mode::Desktop);
    }
}
