//! Headless rendering surface
//!
//! Keeps the table of concrete views the core asked for and simulates their
//! asynchronous loading: a load request is answered with a completion event
//! that the host dispatches after the current one has finished.

use portal_core::{ServiceId, ShellEffect, ShellInput, ViewHandle};
use std::collections::{HashMap, VecDeque};
use std::io;

/// Link prefixes the headless surface can "load"
const LOADABLE_PREFIXES: &[&str] = &["http://", "https://", "file://", "/"];

/// Opens a link in a new browsing context
pub trait ExternalOpener {
    fn open(&mut self, link: &str) -> io::Result<()>;
}

/// Opens links with the system default handler
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl ExternalOpener for SystemOpener {
    fn open(&mut self, link: &str) -> io::Result<()> {
        open::that(link)
    }
}

/// A view created on behalf of the router
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessView {
    pub service_id: ServiceId,
    pub link: Option<String>,
}

/// Surface without a display, driven entirely by [`ShellEffect`]s
pub struct HeadlessSurface<O: ExternalOpener> {
    views: HashMap<ViewHandle, HeadlessView>,
    completions: VecDeque<ShellInput>,
    opener: O,
}

impl<O: ExternalOpener> HeadlessSurface<O> {
    pub fn new(opener: O) -> Self {
        Self {
            views: HashMap::new(),
            completions: VecDeque::new(),
            opener,
        }
    }

    pub fn view(&self, handle: ViewHandle) -> Option<&HeadlessView> {
        self.views.get(&handle)
    }

    pub fn view_count(&self) -> usize {
        self.views.len()
    }

    pub fn opener(&self) -> &O {
        &self.opener
    }

    /// Reflect one effect
    pub fn apply(&mut self, effect: &ShellEffect) {
        match effect {
            ShellEffect::CreateView { handle, service_id } => {
                let view = HeadlessView {
                    service_id: service_id.clone(),
                    link: None,
                };
                if self.views.insert(*handle, view).is_some() {
                    ::log::warn!("{} was created twice", handle);
                }
            }
            ShellEffect::LoadView { handle, link } => self.load(*handle, link),
            ShellEffect::OpenExternal { service_id, link } => {
                if let Err(e) = self.opener.open(link) {
                    ::log::warn!("Failed to open {} ({}): {}", service_id, link, e);
                }
            }
            ShellEffect::DisposeView { handle } => {
                if self.views.remove(handle).is_none() {
                    ::log::warn!("Dispose requested for unknown {}", handle);
                }
            }
            ShellEffect::LayoutChanged { .. }
            | ShellEffect::SelectionChanged { .. }
            | ShellEffect::ViewLoaded { .. }
            | ShellEffect::ViewLoadFailed { .. } => {}
        }
    }

    /// Completion events produced since the last call
    pub fn take_completions(&mut self) -> Vec<ShellInput> {
        self.completions.drain(..).collect()
    }

    fn load(&mut self, handle: ViewHandle, link: &str) {
        let Some(view) = self.views.get_mut(&handle) else {
            ::log::warn!("Load requested for unknown {}", handle);
            return;
        };
        view.link = Some(link.to_string());
        ::log::info!("Loading {} into {}", link, handle);

        let completion = if LOADABLE_PREFIXES.iter().any(|p| link.starts_with(p)) {
            ShellInput::ContentLoaded { handle }
        } else {
            ShellInput::ContentLoadFailed {
                handle,
                reason: format!("unsupported link '{}'", link),
            }
        };
        self.completions.push_back(completion);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::{ServiceDescriptor, ServiceRegistry, ShellDispatcher};

    #[derive(Default)]
    struct RecordingOpener {
        opened: Vec<String>,
        fail: bool,
    }

    impl ExternalOpener for RecordingOpener {
        fn open(&mut self, link: &str) -> io::Result<()> {
            self.opened.push(link.to_string());
            if self.fail {
                Err(io::Error::new(io::ErrorKind::NotFound, "no handler"))
            } else {
                Ok(())
            }
        }
    }

    fn dispatcher() -> ShellDispatcher {
        let services: ServiceRegistry = [
            ServiceDescriptor::new("Web", "w.svg", "https://web.lan", false),
            ServiceDescriptor::new("Odd", "o.svg", "gopher.lan", false),
            ServiceDescriptor::new("Ext", "e.svg", "https://ext.lan", true),
        ]
        .into_iter()
        .collect();
        ShellDispatcher::new(services, 1280.0, false)
    }

    fn apply_all(surface: &mut HeadlessSurface<RecordingOpener>, effects: &[ShellEffect]) {
        for effect in effects {
            surface.apply(effect);
        }
    }

    #[test]
    fn test_load_posts_completion() {
        let mut shell = dispatcher();
        let mut surface = HeadlessSurface::new(RecordingOpener::default());

        apply_all(&mut surface, &shell.dispatch(ShellInput::select_service("Web")));
        let handle = shell.router().entry("Web").unwrap().handle();
        assert_eq!(surface.view(handle).unwrap().link.as_deref(), Some("https://web.lan"));

        let completions = surface.take_completions();
        assert_eq!(completions, vec![ShellInput::ContentLoaded { handle }]);
        assert!(surface.take_completions().is_empty());
    }

    #[test]
    fn test_unloadable_link_reports_failure() {
        let mut shell = dispatcher();
        let mut surface = HeadlessSurface::new(RecordingOpener::default());

        apply_all(&mut surface, &shell.dispatch(ShellInput::select_service("Odd")));
        let completions = surface.take_completions();
        assert!(matches!(completions.as_slice(), [ShellInput::ContentLoadFailed { .. }]));
    }

    #[test]
    fn test_external_open_failure_is_tolerated() {
        let mut shell = dispatcher();
        let mut surface = HeadlessSurface::new(RecordingOpener {
            fail: true,
            ..Default::default()
        });

        apply_all(&mut surface, &shell.dispatch(ShellInput::select_service("Ext")));
        assert_eq!(surface.opener().opened, vec!["https://ext.lan".to_string()]);
        assert_eq!(surface.view_count(), 0);
    }

    #[test]
    fn test_dispose_removes_views() {
        let mut shell = dispatcher();
        let mut surface = HeadlessSurface::new(RecordingOpener::default());
        apply_all(&mut surface, &shell.dispatch(ShellInput::select_service("Web")));
        apply_all(&mut surface, &shell.dispatch(ShellInput::select_service("Odd")));
        assert_eq!(surface.view_count(), 2);

        apply_all(&mut surface, &shell.teardown());
        assert_eq!(surface.view_count(), 0);
    }
}
