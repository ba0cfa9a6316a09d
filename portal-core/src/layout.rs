//! Sidebar layout state machine
//!
//! Desktop and mobile follow different transition tables. Each table is a
//! total function over [`LayoutEvent`]: an event that has no meaning in the
//! current state yields `None` and leaves the state untouched, so observers
//! are only notified on effective changes.
//!
//! | Event                  | Desktop                                         | Mobile              |
//! |------------------------|-------------------------------------------------|---------------------|
//! | `ToggleLock`           | flip `locked`, reset `expanded` (and `collapsed` on unlock) | no-op   |
//! | `ToggleButtonActivated`| locked: flip `collapsed`, else flip `expanded`  | flip `visible`      |
//! | `OverlayActivated`     | close when expanded and unlocked                | hide                |
//! | `SwipeLeft`            | no-op                                           | hide when visible   |
//! | `SwipeRight`           | no-op                                           | show when hidden    |
//! | `ContentSelected`      | no-op                                           | hide                |
//! | `ModeChanged(m)`       | fresh state for `m` when the mode differs       | same                |

use crate::mode::Mode;
use serde::Serialize;

/// Current sidebar state, one variant per mode
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LayoutState {
    /// `expanded` only ever holds while unlocked; a locked sidebar uses
    /// `collapsed` instead.
    Desktop {
        locked: bool,
        collapsed: bool,
        expanded: bool,
    },
    Mobile {
        visible: bool,
    },
}

impl LayoutState {
    /// Fresh state for a mode
    pub fn initial(mode: Mode) -> Self {
        match mode {
            Mode::Desktop => LayoutState::Desktop {
                locked: false,
                collapsed: false,
                expanded: false,
            },
            Mode::Mobile => LayoutState::Mobile { visible: false },
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            LayoutState::Desktop { .. } => Mode::Desktop,
            LayoutState::Mobile { .. } => Mode::Mobile,
        }
    }

    /// Direction of the toggle indicator
    pub fn indicator(&self) -> IndicatorDirection {
        match *self {
            LayoutState::Desktop {
                locked: true,
                collapsed: false,
                ..
            } => IndicatorDirection::TowardSidebar,
            LayoutState::Desktop { .. } => IndicatorDirection::AwayFromSidebar,
            LayoutState::Mobile { visible: true } => IndicatorDirection::TowardSidebar,
            LayoutState::Mobile { visible: false } => IndicatorDirection::AwayFromSidebar,
        }
    }

    /// Whether the dimming overlay behind the sidebar is active
    pub fn overlay_active(&self) -> bool {
        match *self {
            LayoutState::Desktop {
                locked, expanded, ..
            } => expanded && !locked,
            LayoutState::Mobile { visible } => visible,
        }
    }
}

/// Which way the sidebar toggle indicator points
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorDirection {
    TowardSidebar,
    AwayFromSidebar,
}

/// Inputs to the layout machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutEvent {
    ToggleLock,
    ToggleButtonActivated,
    OverlayActivated,
    SwipeLeft,
    SwipeRight,
    /// Home or a service was selected
    ContentSelected,
    ModeChanged(Mode),
}

/// Compute the state following `event`, or `None` when the event is a no-op.
pub fn transition(state: &LayoutState, event: LayoutEvent) -> Option<LayoutState> {
    let next = match (*state, event) {
        (current, LayoutEvent::ModeChanged(mode)) => {
            if current.mode() == mode {
                return None;
            }
            LayoutState::initial(mode)
        }

        (LayoutState::Desktop { locked, collapsed, expanded }, event) => match event {
            LayoutEvent::ToggleLock => {
                if locked {
                    LayoutState::Desktop {
                        locked: false,
                        collapsed: false,
                        expanded: false,
                    }
                } else {
                    LayoutState::Desktop {
                        locked: true,
                        collapsed,
                        expanded: false,
                    }
                }
            }
            LayoutEvent::ToggleButtonActivated => {
                if locked {
                    LayoutState::Desktop {
                        locked,
                        collapsed: !collapsed,
                        expanded,
                    }
                } else {
                    LayoutState::Desktop {
                        locked,
                        collapsed,
                        expanded: !expanded,
                    }
                }
            }
            LayoutEvent::OverlayActivated if expanded && !locked => LayoutState::Desktop {
                locked,
                collapsed,
                expanded: false,
            },
            _ => return None,
        },

        (LayoutState::Mobile { visible }, event) => match event {
            LayoutEvent::ToggleButtonActivated => LayoutState::Mobile { visible: !visible },
            LayoutEvent::OverlayActivated | LayoutEvent::ContentSelected => {
                LayoutState::Mobile { visible: false }
            }
            LayoutEvent::SwipeLeft if visible => LayoutState::Mobile { visible: false },
            LayoutEvent::SwipeRight if !visible => LayoutState::Mobile { visible: true },
            _ => return None,
        },
    };

    (next != *state).then_some(next)
}

/// Owns the live layout state and applies events to it in place
#[derive(Debug, Clone)]
pub struct LayoutStateMachine {
    state: LayoutState,
}

impl LayoutStateMachine {
    pub fn new(mode: Mode) -> Self {
        Self {
            state: LayoutState::initial(mode),
        }
    }

    pub fn state(&self) -> &LayoutState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode()
    }

    /// Apply an event. Returns the new state when it changed.
    pub fn apply(&mut self, event: LayoutEvent) -> Option<LayoutState> {
        let next = transition(&self.state, event)?;
        ::log::debug!("Layout {:?}: {:?} -> {:?}", event, self.state, next);
        self.state = next;
        Some(next)
    }
}
