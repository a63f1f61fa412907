//! binci.yml configuration parsing

use crate::{ConfigError, Result};
use serde::de::{self, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

/// Default project config file name
pub const CONFIG_FILE_NAME: &str = "binci.yml";

/// One container described by binci.yml (the project itself or a service)
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Base image
    pub from: Option<String>,

    /// Keep a stable container name across invocations
    pub persist: Option<bool>,

    /// User to run as inside the container
    pub user: Option<String>,

    /// Working directory inside the container
    pub work_dir: Option<String>,

    /// Run privileged (default true, only an explicit `false` disables it)
    pub privileged: Option<bool>,

    /// Share the host network stack
    pub network_host: Option<bool>,

    /// Keep a service container after it is stopped
    pub rm_on_shutdown: Option<bool>,

    /// Inline command, takes precedence over `run`
    pub exec: Option<String>,

    /// Named tasks
    pub tasks: Option<BTreeMap<String, Option<TaskEntry>>>,

    /// Task name(s) to run
    pub run: Option<StringOrArray>,

    /// Shell text run before the command body
    pub before: Option<String>,

    /// Shell text run after the command body
    pub after: Option<String>,

    /// Linked service containers
    pub services: Option<Vec<ServiceEntry>>,

    // Flag-bearing fields stay untyped so their shape is checked when
    // arguments are built.
    pub expose: Option<serde_yaml::Value>,
    pub volumes: Option<serde_yaml::Value>,
    pub env: Option<serde_yaml::Value>,
    pub hosts: Option<serde_yaml::Value>,

    /// Keys binci does not interpret
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

/// A task is either plain shell text or a mapping carrying `cmd`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum TaskEntry {
    PlainCommand(String),
    StructuredCommand(StructuredTask),
}

/// Mapping form of a task
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredTask {
    pub cmd: Option<String>,
    pub description: Option<String>,
}

// Derived struct impls also accept sequences; a task list is not a task.
impl<'de> Deserialize<'de> for StructuredTask {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StructuredTaskVisitor;

        impl<'de> Visitor<'de> for StructuredTaskVisitor {
            type Value = StructuredTask;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a task mapping with `cmd` and optional `description`")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<StructuredTask, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut task = StructuredTask::default();
                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "cmd" => task.cmd = map.next_value()?,
                        "description" => task.description = map.next_value()?,
                        _ => {
                            map.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(task)
            }
        }

        deserializer.deserialize_map(StructuredTaskVisitor)
    }
}

impl TaskEntry {
    /// Shell text to run, if the entry carries any
    pub fn command(&self) -> Option<&str> {
        match self {
            TaskEntry::PlainCommand(cmd) => Some(cmd),
            TaskEntry::StructuredCommand(task) => task.cmd.as_deref().filter(|c| !c.is_empty()),
        }
    }

    /// Short text for task listings
    pub fn summary(&self) -> &str {
        match self {
            TaskEntry::PlainCommand(cmd) => cmd,
            TaskEntry::StructuredCommand(task) => task
                .description
                .as_deref()
                .or(task.cmd.as_deref())
                .unwrap_or(""),
        }
    }

    /// An empty plain string does not name anything to run
    pub fn is_empty(&self) -> bool {
        matches!(self, TaskEntry::PlainCommand(cmd) if cmd.is_empty())
    }
}

/// String or array of strings
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum StringOrArray {
    String(String),
    Array(Vec<String>),
}

impl StringOrArray {
    pub fn as_slice(&self) -> &[String] {
        match self {
            StringOrArray::String(s) => std::slice::from_ref(s),
            StringOrArray::Array(arr) => arr,
        }
    }
}

/// One `services` item: `{alias: sub-config}`
///
/// Only the first key/value pair of the mapping is kept.
#[derive(Debug, Clone)]
pub struct ServiceEntry {
    pub alias: String,
    pub config: Config,
}

impl<'de> Deserialize<'de> for ServiceEntry {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ServiceEntryVisitor;

        impl<'de> Visitor<'de> for ServiceEntryVisitor {
            type Value = ServiceEntry;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of service alias to service config")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<ServiceEntry, A::Error>
            where
                A: MapAccess<'de>,
            {
                let (alias, config) = map
                    .next_entry::<String, Config>()?
                    .ok_or_else(|| de::Error::custom("service entry is empty"))?;

                let mut ignored = 0usize;
                while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {
                    ignored += 1;
                }
                if ignored > 0 {
                    tracing::warn!(
                        "Service entry '{}' has {} extra key(s); only the first is used",
                        alias,
                        ignored
                    );
                }

                Ok(ServiceEntry { alias, config })
            }
        }

        deserializer.deserialize_map(ServiceEntryVisitor)
    }
}

impl Config {
    /// Load binci.yml from a directory
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        Self::load_from(&dir.join(CONFIG_FILE_NAME))
    }

    /// Load a config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!("Loaded project config from {:?}", path);
        Self::parse(&content, path)
    }

    /// Parse binci.yml content
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| ConfigError::YamlParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Look up a task, treating null and empty entries as absent
    pub fn task(&self, name: &str) -> Option<&TaskEntry> {
        self.tasks
            .as_ref()?
            .get(name)?
            .as_ref()
            .filter(|entry| !entry.is_empty())
    }

    /// Task names selected by `run`
    pub fn run_targets(&self) -> &[String] {
        self.run.as_ref().map(StringOrArray::as_slice).unwrap_or(&[])
    }

    /// Raw value of a flag-bearing field by its config key
    pub fn flag_field(&self, key: &str) -> Option<&serde_yaml::Value> {
        match key {
            "expose" => self.expose.as_ref(),
            "volumes" => self.volumes.as_ref(),
            "env" => self.env.as_ref(),
            "hosts" => self.hosts.as_ref(),
            _ => None,
        }
    }

    /// Services in declaration order
    pub fn services(&self) -> &[ServiceEntry] {
        self.services.as_deref().unwrap_or(&[])
    }

    pub fn is_persistent(&self) -> bool {
        self.persist.unwrap_or(false)
    }
}
