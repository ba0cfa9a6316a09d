//! Single dispatch point for normalized shell input
//!
//! Every input runs to completion inside [`ShellDispatcher::dispatch`] and
//! yields the list of effects the host must reflect. Nothing is shared
//! between calls except the dispatcher's own state, so no intermediate state
//! is ever observable.

use crate::error::ShellError;
use crate::gesture::{GestureInterpreter, Swipe, TouchPoint};
use crate::layout::{IndicatorDirection, LayoutEvent, LayoutState, LayoutStateMachine};
use crate::mode::{Mode, ResponsiveModeDetector};
use crate::router::{ContentViewRouter, RouteOutcome, Selection, ViewHandle};
use crate::service::{ServiceId, ServiceRegistry};
use serde::{Deserialize, Serialize};

/// Interactive controls of the shell chrome
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Control {
    Lock,
    Toggle,
    Overlay,
    Home,
    Service(ServiceId),
}

/// How a control was triggered
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Trigger {
    #[default]
    PointerUp,
    Key {
        key: String,
    },
}

impl Trigger {
    /// Pointer-up always activates; of the keys only Enter and Space do.
    pub fn activates(&self) -> bool {
        match self {
            Trigger::PointerUp => true,
            Trigger::Key { key } => matches!(key.as_str(), "Enter" | " " | "Space" | "Spacebar"),
        }
    }
}

/// Normalized events delivered by the host
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShellInput {
    Control {
        control: Control,
        #[serde(default)]
        trigger: Trigger,
    },
    TouchStart {
        touches: Vec<TouchPoint>,
    },
    TouchEnd {
        touches: Vec<TouchPoint>,
    },
    TouchCancel,
    /// Viewport resized or pointer capability re-queried
    Viewport {
        width: f64,
        #[serde(default)]
        pointer_is_coarse: bool,
    },
    ContentLoaded {
        handle: ViewHandle,
    },
    ContentLoadFailed {
        handle: ViewHandle,
        reason: String,
    },
}

impl ShellInput {
    /// Pointer-up on a control
    pub fn click(control: Control) -> Self {
        ShellInput::Control {
            control,
            trigger: Trigger::PointerUp,
        }
    }

    pub fn select_service(id: &str) -> Self {
        Self::click(Control::Service(ServiceId::new(id)))
    }
}

/// Changes the host must reflect
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShellEffect {
    LayoutChanged {
        state: LayoutState,
        indicator: IndicatorDirection,
        overlay_active: bool,
    },
    SelectionChanged {
        selection: Selection,
    },
    CreateView {
        handle: ViewHandle,
        service_id: ServiceId,
    },
    LoadView {
        handle: ViewHandle,
        link: String,
    },
    ViewLoaded {
        handle: ViewHandle,
        service_id: ServiceId,
    },
    ViewLoadFailed {
        handle: ViewHandle,
        service_id: ServiceId,
        reason: String,
    },
    OpenExternal {
        service_id: ServiceId,
        link: String,
    },
    DisposeView {
        handle: ViewHandle,
    },
}

/// Load status of one cached view
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ViewStatus {
    pub service_id: ServiceId,
    pub handle: ViewHandle,
    pub loaded: bool,
    /// Last load failure while the view is still loading
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Declarative output state for the rendering layer
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShellSnapshot {
    pub layout: LayoutState,
    pub indicator: IndicatorDirection,
    pub overlay_active: bool,
    pub selection: Selection,
    pub views: Vec<ViewStatus>,
}

/// Routes shell input to the layout machine, gesture interpreter and router
pub struct ShellDispatcher {
    detector: ResponsiveModeDetector,
    layout: LayoutStateMachine,
    gestures: GestureInterpreter,
    router: ContentViewRouter,
}

impl ShellDispatcher {
    /// Create a dispatcher for the initial viewport
    pub fn new(services: ServiceRegistry, viewport_width: f64, pointer_is_coarse: bool) -> Self {
        let detector = ResponsiveModeDetector::new(viewport_width, pointer_is_coarse);
        let layout = LayoutStateMachine::new(detector.current());
        ::log::info!(
            "Shell starting in {:?} mode with {} services",
            detector.current(),
            services.len()
        );

        Self {
            detector,
            layout,
            gestures: GestureInterpreter::new(),
            router: ContentViewRouter::new(services),
        }
    }

    pub fn mode(&self) -> Mode {
        self.layout.mode()
    }

    pub fn layout(&self) -> &LayoutState {
        self.layout.state()
    }

    pub fn router(&self) -> &ContentViewRouter {
        &self.router
    }

    /// Process one input to completion.
    pub fn dispatch(&mut self, input: ShellInput) -> Vec<ShellEffect> {
        let mut effects = Vec::new();

        match input {
            ShellInput::Control { control, trigger } => {
                if trigger.activates() {
                    self.handle_control(control, &mut effects);
                }
            }
            ShellInput::TouchStart { touches } => self.gestures.touch_start(&touches),
            ShellInput::TouchEnd { touches } => {
                if let Some(swipe) = self.gestures.touch_end(&touches) {
                    let event = match swipe {
                        Swipe::Left => LayoutEvent::SwipeLeft,
                        Swipe::Right => LayoutEvent::SwipeRight,
                    };
                    self.apply_layout(event, &mut effects);
                }
            }
            ShellInput::TouchCancel => self.gestures.cancel(),
            ShellInput::Viewport {
                width,
                pointer_is_coarse,
            } => {
                if let Some(mode) = self.detector.observe(width, pointer_is_coarse) {
                    ::log::info!("Switching to {:?} mode", mode);
                    self.gestures.cancel();
                    self.apply_layout(LayoutEvent::ModeChanged(mode), &mut effects);
                }
            }
            ShellInput::ContentLoaded { handle } => {
                if let Err(e) = self.router.mark_loaded(handle, &mut effects) {
                    ::log::warn!("Ignoring load completion: {}", e);
                }
            }
            ShellInput::ContentLoadFailed { handle, reason } => {
                if let Err(e) = self.router.mark_load_failed(handle, reason, &mut effects) {
                    ::log::warn!("Ignoring load failure: {}", e);
                }
            }
        }

        effects
    }

    /// Dispose every cached view. The dispatcher keeps handling layout input
    /// afterwards but no longer routes content.
    pub fn teardown(&mut self) -> Vec<ShellEffect> {
        let mut effects = Vec::new();
        self.router.teardown(&mut effects);
        effects
    }

    pub fn snapshot(&self) -> ShellSnapshot {
        let layout = *self.layout.state();
        ShellSnapshot {
            layout,
            indicator: layout.indicator(),
            overlay_active: layout.overlay_active(),
            selection: self.router.selection().clone(),
            views: self
                .router
                .entries()
                .map(|entry| ViewStatus {
                    service_id: entry.service_id().clone(),
                    handle: entry.handle(),
                    loaded: entry.is_loaded(),
                    error: entry.load_error().map(str::to_string),
                })
                .collect(),
        }
    }

    fn handle_control(&mut self, control: Control, effects: &mut Vec<ShellEffect>) {
        let routed = match control {
            Control::Lock => return self.apply_layout(LayoutEvent::ToggleLock, effects),
            Control::Toggle => {
                return self.apply_layout(LayoutEvent::ToggleButtonActivated, effects)
            }
            Control::Overlay => return self.apply_layout(LayoutEvent::OverlayActivated, effects),
            Control::Home => self.router.activate_home(effects),
            Control::Service(id) => self.router.activate_service(id.as_str(), effects),
        };

        match routed {
            Ok(RouteOutcome::Home)
            | Ok(RouteOutcome::Embedded { .. })
            | Ok(RouteOutcome::External) => {
                self.apply_layout(LayoutEvent::ContentSelected, effects)
            }
            Err(ShellError::UnknownService(id)) => {
                ::log::debug!("Ignoring activation of unknown service '{}'", id);
            }
            Err(e) => ::log::debug!("Ignoring content selection: {}", e),
        }
    }

    fn apply_layout(&mut self, event: LayoutEvent, effects: &mut Vec<ShellEffect>) {
        if let Some(state) = self.layout.apply(event) {
            effects.push(ShellEffect::LayoutChanged {
                state,
                indicator: state.indicator(),
                overlay_active: state.overlay_active(),
            });
        }
    }
}
