//! Launcher configuration loading
//!
//! The config document lists the services shown in the sidebar:
//!
//! ```json
//! {
//!   "greeting_name": "kitty",
//!   "services": [
//!     { "name": "Jellyfin", "icon": "static/jellyfin.svg", "link": "http://media.lan" },
//!     { "name": "Router", "icon": "static/router.svg", "link": "http://192.168.1.1", "new_tab": true }
//!   ]
//! }
//! ```
//!
//! JSON, YAML and TOML are accepted, picked by file extension. Entries are
//! validated one by one; a bad entry is skipped with a warning, it never
//! takes the rest of the document down with it.

use crate::error::{ShellError, ShellResult};
use crate::service::{ServiceDescriptor, ServiceRegistry};
use serde::Deserialize;
use serde_json::Value;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config location
pub const CONFIG_PATH_ENV: &str = "PORTAL_CONFIG_PATH";

/// Config file name looked up in the working directory and the user config dir
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Directory under the platform config dir
const CONFIG_DIR_NAME: &str = "portal";

/// Supported config document formats
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
    Toml,
}

impl ConfigFormat {
    /// Pick the format from the file extension. Files without an extension
    /// are read as JSON.
    pub fn from_path(path: &Path) -> ShellResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            None | Some("json") => Ok(ConfigFormat::Json),
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("toml") => Ok(ConfigFormat::Toml),
            Some(other) => Err(ShellError::UnsupportedConfigFormat(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            ConfigFormat::Yaml => "yaml",
            ConfigFormat::Toml => "toml",
        }
    }

    fn parse_document(&self, content: &str) -> ShellResult<Value> {
        let parsed = match self {
            ConfigFormat::Json => serde_json::from_str::<Value>(content).map_err(|e| e.to_string()),
            ConfigFormat::Yaml => serde_yaml::from_str::<Value>(content).map_err(|e| e.to_string()),
            ConfigFormat::Toml => toml::from_str::<Value>(content).map_err(|e| e.to_string()),
        };
        parsed.map_err(|message| ShellError::ConfigParse {
            format: self.name(),
            message,
        })
    }
}

/// Top-level document. Entries stay untyped until validated individually.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    services: Vec<Value>,
    #[serde(default)]
    greeting_name: Option<Value>,
}

/// One service entry as written in the config file
#[derive(Debug, Deserialize)]
struct RawServiceEntry {
    name: String,
    icon: String,
    link: String,
    #[serde(default)]
    new_tab: Option<bool>,
}

/// A config entry that was dropped during validation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedEntry {
    /// Position in the `services` list
    pub index: usize,
    /// Why the entry was rejected
    pub reason: String,
}

/// Validated launcher configuration
#[derive(Clone, Debug, Default)]
pub struct LauncherConfig {
    /// Services in config order
    pub services: ServiceRegistry,
    /// Name appended to the home greeting
    pub greeting_name: Option<String>,
    /// Entries rejected during validation
    pub skipped: Vec<SkippedEntry>,
}

impl LauncherConfig {
    /// Parse a config document, skipping invalid service entries.
    pub fn parse(content: &str, format: ConfigFormat) -> ShellResult<Self> {
        let document = format.parse_document(content)?;
        let raw: RawConfig =
            serde_json::from_value(document).map_err(|e| ShellError::ConfigParse {
                format: format.name(),
                message: e.to_string(),
            })?;

        let mut config = LauncherConfig {
            greeting_name: raw.greeting_name.and_then(validate_greeting_name),
            ..Default::default()
        };

        for (index, entry) in raw.services.into_iter().enumerate() {
            match validate_entry(entry) {
                Ok(descriptor) => {
                    let id = descriptor.id.clone();
                    if !config.services.register(descriptor) {
                        config.skip(index, format!("duplicate service name '{}'", id));
                    }
                }
                Err(reason) => config.skip(index, reason),
            }
        }

        ::log::info!(
            "Loaded {} services ({} skipped)",
            config.services.len(),
            config.skipped.len()
        );
        Ok(config)
    }

    /// Read and parse a config file.
    pub fn load(path: &Path) -> ShellResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ShellError::ConfigNotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };
        Self::parse(&content, format)
    }

    /// Load a config file, starting with no services when it cannot be used.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                ::log::error!(
                    "Error loading config from {}: {}, starting with no services",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    fn skip(&mut self, index: usize, reason: String) {
        ::log::warn!("Skipping service entry #{}: {}", index, reason);
        self.skipped.push(SkippedEntry { index, reason });
    }
}

fn validate_greeting_name(value: Value) -> Option<String> {
    match value {
        Value::String(name) => Some(name.trim().to_string()).filter(|n| !n.is_empty()),
        Value::Null => None,
        other => {
            ::log::warn!("Ignoring 'greeting_name', expected a string but got {}", other);
            None
        }
    }
}

fn validate_entry(entry: Value) -> Result<ServiceDescriptor, String> {
    let raw: RawServiceEntry = serde_json::from_value(entry).map_err(|e| e.to_string())?;

    let name = raw.name.trim();
    if name.is_empty() {
        return Err("empty 'name'".to_string());
    }
    let link = raw.link.trim();
    if link.is_empty() {
        return Err(format!("service '{}' has an empty 'link'", name));
    }

    Ok(ServiceDescriptor::new(
        name,
        raw.icon,
        link,
        raw.new_tab.unwrap_or(false),
    ))
}

/// Resolve the config location.
///
/// Order: explicit path, `PORTAL_CONFIG_PATH`, `./config.json` when it exists,
/// then `<config dir>/portal/config.json`.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> PathBuf {
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    let local_exists = local.exists();
    resolve_with(
        explicit,
        std::env::var_os(CONFIG_PATH_ENV),
        local_exists,
        dirs::config_dir(),
    )
}

fn resolve_with(
    explicit: Option<PathBuf>,
    env_path: Option<OsString>,
    local_exists: bool,
    config_dir: Option<PathBuf>,
) -> PathBuf {
    if let Some(path) = explicit {
        return path;
    }
    if let Some(path) = env_path.filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    if local_exists {
        return PathBuf::from(DEFAULT_CONFIG_FILE);
    }
    match config_dir {
        Some(mut dir) => {
            dir.push(CONFIG_DIR_NAME);
            dir.push(DEFAULT_CONFIG_FILE);
            dir
        }
        None => PathBuf::from(DEFAULT_CONFIG_FILE),
    }
}
