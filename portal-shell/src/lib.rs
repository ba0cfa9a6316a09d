//! # Portal Shell
//!
//! Headless host for [`portal_core`]. Reads normalized input events as JSON
//! lines, keeps a view table standing in for the embedded frames, and writes
//! the declarative shell state back as JSON lines.
//!
//! ## Modules
//!
//! - [`app`] - event loop and output
//! - [`input`] - stdin reader thread
//! - [`surface`] - headless views and external opener
//! - [`greeting`] - time-of-day greeting

pub mod app;
pub mod greeting;
pub mod input;
pub mod surface;

pub use app::{App, Viewport};
pub use input::{spawn_reader, HostEvent};
pub use surface::{ExternalOpener, HeadlessSurface, SystemOpener};
