//! # Portal Core
//!
//! Navigation and content routing for the portal launcher shell: a sidebar
//! that switches the main area between a home view and embedded service views,
//! adapting to desktop (pointer, lock-based) and mobile (touch, swipe-based)
//! interaction.
//!
//! ## Architecture Overview
//!
//! ```text
//!   viewport events      touch events        control activations     load events
//!         │                   │                      │                    │
//!         ▼                   ▼                      │                    │
//! ┌────────────────┐ ┌──────────────────┐            │                    │
//! │ ResponsiveMode │ │ Gesture          │            │                    │
//! │ Detector       │ │ Interpreter      │            │                    │
//! └───────┬────────┘ └────────┬─────────┘            │                    │
//!         │ ModeChanged       │ SwipeLeft/Right      │                    │
//!         ▼                   ▼                      ▼                    ▼
//! ┌─────────────────────────────────────┐   ┌───────────────────────────────────┐
//! │ LayoutStateMachine                  │◄──│ ContentViewRouter                 │
//! │  Desktop{locked,collapsed,expanded} │   │  service id -> cached view        │
//! │  Mobile{visible}                    │   │  selection: Home | Service(id)    │
//! └──────────────────┬──────────────────┘   └─────────────────┬─────────────────┘
//!                    │        ContentSelected                 │
//!                    ▼                                        ▼
//!              ShellEffect list returned by ShellDispatcher::dispatch
//! ```
//!
//! All input goes through [`ShellDispatcher::dispatch`], which runs a single
//! event to completion and returns the [`ShellEffect`]s the host must
//! reflect. The core never touches a rendering surface itself.
//!
//! ## Usage Example
//!
//! ```rust
//! use portal_core::{LauncherConfig, ConfigFormat, ShellDispatcher, ShellInput, Control};
//!
//! let config = LauncherConfig::parse(
//!     r#"{ "services": [ { "name": "Wiki", "icon": "wiki.svg", "link": "http://wiki.lan" } ] }"#,
//!     ConfigFormat::Json,
//! ).unwrap();
//!
//! let mut shell = ShellDispatcher::new(config.services, 1280.0, false);
//! let effects = shell.dispatch(ShellInput::select_service("Wiki"));
//! assert_eq!(effects.len(), 3); // create, load, select
//!
//! shell.dispatch(ShellInput::click(Control::Toggle));
//! assert!(shell.snapshot().overlay_active);
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod gesture;
pub mod layout;
pub mod mode;
pub mod router;
pub mod service;

// Re-exports
pub use config::{resolve_config_path, ConfigFormat, LauncherConfig, SkippedEntry};
pub use dispatcher::{
    Control, ShellDispatcher, ShellEffect, ShellInput, ShellSnapshot, Trigger, ViewStatus,
};
pub use error::{ShellError, ShellResult};
pub use gesture::{classify, GestureInterpreter, GestureSample, Swipe, TouchPoint};
pub use layout::{transition, IndicatorDirection, LayoutEvent, LayoutState, LayoutStateMachine};
pub use mode::{detect_mode, Mode, ResponsiveModeDetector};
pub use router::{ContentViewEntry, ContentViewRouter, RouteOutcome, Selection, ViewHandle};
pub use service::{ServiceDescriptor, ServiceId, ServiceRegistry};
