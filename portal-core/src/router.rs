//! Content view router
//!
//! Owns one persistent view per service the user has opened. Views are
//! created lazily on first activation, hidden (never destroyed) when another
//! region is shown, and disposed only at teardown. Exactly one region, Home or
//! a single service view, is visible at any time: the selection is a single
//! value and a service is only selected once its entry exists.

use crate::dispatcher::ShellEffect;
use crate::error::{ShellError, ShellResult};
use crate::service::{ServiceId, ServiceRegistry};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Opaque handle to a rendering surface owned by the router
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewHandle(u64);

impl ViewHandle {
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ViewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

/// The visible primary content
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Selection {
    Home,
    Service(ServiceId),
}

/// Cached view of a service that has been activated at least once
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentViewEntry {
    service_id: ServiceId,
    handle: ViewHandle,
    is_loaded: bool,
    load_error: Option<String>,
}

impl ContentViewEntry {
    pub fn service_id(&self) -> &ServiceId {
        &self.service_id
    }

    pub fn handle(&self) -> ViewHandle {
        self.handle
    }

    /// Flips to `true` once, when the content first finishes loading
    pub fn is_loaded(&self) -> bool {
        self.is_loaded
    }

    /// Last load failure reported before the first successful load
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }
}

/// Result of an activation request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Home is now visible
    Home,
    /// The service's embedded view is now visible
    Embedded { handle: ViewHandle, created: bool },
    /// The service was handed to the external opener
    External,
}

/// Maps service ids to cached views and tracks the visible region
pub struct ContentViewRouter {
    services: ServiceRegistry,
    entries: HashMap<ServiceId, ContentViewEntry>,
    /// Service ids in view creation order
    creation_order: Vec<ServiceId>,
    handles: HashMap<ViewHandle, ServiceId>,
    selection: Selection,
    next_handle: u64,
    torn_down: bool,
}

impl ContentViewRouter {
    pub fn new(services: ServiceRegistry) -> Self {
        Self {
            services,
            entries: HashMap::new(),
            creation_order: Vec::new(),
            handles: HashMap::new(),
            selection: Selection::Home,
            next_handle: 1,
            torn_down: false,
        }
    }

    pub fn services(&self) -> &ServiceRegistry {
        &self.services
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn entry(&self, service_id: &str) -> Option<&ContentViewEntry> {
        self.entries.get(&ServiceId::new(service_id))
    }

    /// Entries in creation order
    pub fn entries(&self) -> impl Iterator<Item = &ContentViewEntry> + '_ {
        self.creation_order
            .iter()
            .filter_map(move |id| self.entries.get(id))
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_home_visible(&self) -> bool {
        self.selection == Selection::Home
    }

    /// Whether the cached view of `service_id` is the visible region
    pub fn is_view_visible(&self, service_id: &str) -> bool {
        matches!(&self.selection, Selection::Service(id) if id.as_str() == service_id)
            && self.entries.contains_key(&ServiceId::new(service_id))
    }

    /// Number of regions (Home plus every cached view) currently visible
    pub fn visible_count(&self) -> usize {
        let views = self
            .entries
            .keys()
            .filter(|id| self.is_view_visible(id.as_str()))
            .count();
        usize::from(self.is_home_visible()) + views
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Show Home and hide whatever service view was visible.
    pub fn activate_home(&mut self, effects: &mut Vec<ShellEffect>) -> ShellResult<RouteOutcome> {
        self.ensure_live()?;
        self.select(Selection::Home, effects);
        Ok(RouteOutcome::Home)
    }

    /// Show a service, creating its view on first use.
    ///
    /// External services are only handed to the opener; the visible region
    /// does not change.
    pub fn activate_service(
        &mut self,
        service_id: &str,
        effects: &mut Vec<ShellEffect>,
    ) -> ShellResult<RouteOutcome> {
        self.ensure_live()?;
        let descriptor = self
            .services
            .find_by_id(service_id)
            .ok_or_else(|| ShellError::UnknownService(service_id.to_string()))?;

        if descriptor.open_externally {
            ::log::info!("Opening {} externally: {}", descriptor.id, descriptor.target_link);
            effects.push(ShellEffect::OpenExternal {
                service_id: descriptor.id.clone(),
                link: descriptor.target_link.clone(),
            });
            return Ok(RouteOutcome::External);
        }

        let id = descriptor.id.clone();
        let link = descriptor.target_link.clone();
        let (handle, created) = match self.entries.get(&id) {
            Some(entry) => (entry.handle, false),
            None => {
                let handle = ViewHandle(self.next_handle);
                self.next_handle += 1;
                ::log::info!("Creating {} for service {}", handle, id);

                self.entries.insert(
                    id.clone(),
                    ContentViewEntry {
                        service_id: id.clone(),
                        handle,
                        is_loaded: false,
                        load_error: None,
                    },
                );
                self.creation_order.push(id.clone());
                self.handles.insert(handle, id.clone());

                effects.push(ShellEffect::CreateView {
                    handle,
                    service_id: id.clone(),
                });
                effects.push(ShellEffect::LoadView { handle, link });
                (handle, true)
            }
        };

        self.select(Selection::Service(id), effects);
        Ok(RouteOutcome::Embedded { handle, created })
    }

    /// Record that a view finished loading. Returns `true` the first time only.
    pub fn mark_loaded(
        &mut self,
        handle: ViewHandle,
        effects: &mut Vec<ShellEffect>,
    ) -> ShellResult<bool> {
        let entry = self.entry_by_handle_mut(handle)?;
        if entry.is_loaded {
            return Ok(false);
        }
        entry.is_loaded = true;
        entry.load_error = None;
        ::log::debug!("{} loaded for {}", handle, entry.service_id);

        effects.push(ShellEffect::ViewLoaded {
            handle,
            service_id: entry.service_id.clone(),
        });
        Ok(true)
    }

    /// Record a load failure. The entry keeps its "not loaded" state.
    pub fn mark_load_failed(
        &mut self,
        handle: ViewHandle,
        reason: String,
        effects: &mut Vec<ShellEffect>,
    ) -> ShellResult<()> {
        let entry = self.entry_by_handle_mut(handle)?;
        if entry.is_loaded {
            ::log::debug!("Ignoring late load failure for loaded {}: {}", handle, reason);
            return Ok(());
        }
        ::log::warn!("{} failed to load for {}: {}", handle, entry.service_id, reason);
        entry.load_error = Some(reason.clone());

        effects.push(ShellEffect::ViewLoadFailed {
            handle,
            service_id: entry.service_id.clone(),
            reason,
        });
        Ok(())
    }

    /// Dispose every cached view in creation order. Later activations fail
    /// with [`ShellError::ShellTornDown`].
    pub fn teardown(&mut self, effects: &mut Vec<ShellEffect>) -> usize {
        if self.torn_down {
            return 0;
        }
        self.torn_down = true;

        let mut disposed = 0;
        for id in self.creation_order.drain(..) {
            if let Some(entry) = self.entries.remove(&id) {
                self.handles.remove(&entry.handle);
                effects.push(ShellEffect::DisposeView {
                    handle: entry.handle,
                });
                disposed += 1;
            }
        }
        self.selection = Selection::Home;
        ::log::info!("Disposed {} content views", disposed);
        disposed
    }

    fn ensure_live(&self) -> ShellResult<()> {
        if self.torn_down {
            Err(ShellError::ShellTornDown)
        } else {
            Ok(())
        }
    }

    fn select(&mut self, selection: Selection, effects: &mut Vec<ShellEffect>) {
        if self.selection == selection {
            return;
        }
        self.selection = selection.clone();
        effects.push(ShellEffect::SelectionChanged { selection });
    }

    fn entry_by_handle_mut(&mut self, handle: ViewHandle) -> ShellResult<&mut ContentViewEntry> {
        self.handles
            .get(&handle)
            .and_then(|id| self.entries.get_mut(id))
            .ok_or(ShellError::UnknownViewHandle(handle.raw()))
    }
}
