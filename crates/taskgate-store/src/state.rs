//! Server state model
//!
//! One `ServerState` captures a server's durable identity: its id, its
//! ordered configuration items, and the container resources it knows about.
//! A state is replaced wholesale on store, never partially updated.

use serde::{Deserialize, Serialize};

/// Environment variables with this prefix seed the default configuration of
/// a server that has no durable snapshot yet
pub const CONFIG_ENV_PREFIX: &str = "TASKGATE_";

/// One configuration entry: name, value, and a declared-type label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigItem {
    pub name: String,
    pub value: String,
    /// Declared type label, e.g. "String"; seeded items are always "String"
    pub value_type: String,
}

impl ConfigItem {
    /// Create a string-typed config item
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            value_type: "String".to_string(),
        }
    }
}

/// Ordered configuration of one server
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    items: Vec<ConfigItem>,
}

impl ServerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an item; replacement keeps the item's position
    pub fn add_item(&mut self, item: ConfigItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.name == item.name) {
            *existing = item;
        } else {
            self.items.push(item);
        }
    }

    /// Value of the named item, if present
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.name == name)
            .map(|item| item.value.as_str())
    }

    /// All items in insertion order
    pub fn items(&self) -> &[ConfigItem] {
        &self.items
    }
}

/// Lifecycle status of a deployed container resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerStatus {
    Started,
    Stopped,
}

/// A deployed unit known to the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerResource {
    pub container_id: String,
    pub release_id: String,
    pub status: ContainerStatus,
}

/// A server's durable identity: configuration plus known containers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerState {
    pub server_id: String,
    pub configuration: ServerConfig,
    pub containers: Vec<ContainerResource>,
}

impl ServerState {
    /// Empty state for a server id
    pub fn new(server_id: impl Into<String>) -> Self {
        Self {
            server_id: server_id.into(),
            configuration: ServerConfig::new(),
            containers: Vec::new(),
        }
    }

    /// Default state for a server with no durable snapshot
    ///
    /// Every process environment variable whose name starts with
    /// [`CONFIG_ENV_PREFIX`] becomes one string-typed config item.
    pub fn seeded_from_env(server_id: impl Into<String>) -> Self {
        let mut state = Self::new(server_id);
        let mut seeded: Vec<(String, String)> = std::env::vars()
            .filter(|(name, _)| name.starts_with(CONFIG_ENV_PREFIX))
            .collect();
        // Deterministic item order regardless of environment iteration order
        seeded.sort();
        for (name, value) in seeded {
            state.configuration.add_item(ConfigItem::string(name, value));
        }
        state
    }
}
