//! Service descriptors and the ordered registry the sidebar is built from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a service (the configured `name`)
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(String);

impl ServiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ServiceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A service the launcher can show, read-only once loaded
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ServiceDescriptor {
    /// Unique identifier, also used as the lookup key
    pub id: ServiceId,
    /// Label shown next to the icon
    pub display_name: String,
    /// Icon resource reference
    pub icon_ref: String,
    /// Navigation target loaded into the embedded view
    pub target_link: String,
    /// Open in a new browsing context instead of an embedded view
    pub open_externally: bool,
}

impl ServiceDescriptor {
    /// Descriptor whose display name is its id, as the config format does it
    pub fn new(
        name: impl Into<String>,
        icon_ref: impl Into<String>,
        target_link: impl Into<String>,
        open_externally: bool,
    ) -> Self {
        let name = name.into();
        Self {
            id: ServiceId::new(name.clone()),
            display_name: name,
            icon_ref: icon_ref.into(),
            target_link: target_link.into(),
            open_externally,
        }
    }
}

/// Ordered set of loaded services
///
/// Order is the config order and drives the sidebar button order.
#[derive(Clone, Debug, Default)]
pub struct ServiceRegistry {
    services: Vec<ServiceDescriptor>,
}

impl ServiceRegistry {
    pub const fn new() -> Self {
        Self {
            services: Vec::new(),
        }
    }

    /// Register a service. Returns `false` and leaves the registry untouched
    /// when the id is already taken.
    pub fn register(&mut self, descriptor: ServiceDescriptor) -> bool {
        if self.contains(descriptor.id.as_str()) {
            return false;
        }
        self.services.push(descriptor);
        true
    }

    pub fn services(&self) -> &[ServiceDescriptor] {
        &self.services
    }

    pub fn find_by_id(&self, id: &str) -> Option<&ServiceDescriptor> {
        self.services.iter().find(|s| s.id.as_str() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find_by_id(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl FromIterator<ServiceDescriptor> for ServiceRegistry {
    fn from_iter<I: IntoIterator<Item = ServiceDescriptor>>(iter: I) -> Self {
        let mut registry = Self::new();
        for descriptor in iter {
            registry.register(descriptor);
        }
        registry
    }
}
