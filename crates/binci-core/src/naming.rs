//! Container naming

use binci_config::Config;

/// Prefix of ephemeral container names
pub const EPHEMERAL_PREFIX: &str = "bc";

/// Per-invocation token shared by every container started in one run
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstanceId(String);

impl InstanceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh short id
    pub fn generate() -> Self {
        let uuid = uuid::Uuid::new_v4().simple().to_string();
        Self(uuid[..8].to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Name of the container for `logical_name`
///
/// Persisted containers keep the logical name verbatim; all others get
/// `bc_<name>_<instance>`.
pub fn container_name(logical_name: &str, config: &Config, instance: &InstanceId) -> String {
    if config.is_persistent() {
        logical_name.to_string()
    } else {
        format!("{}_{}_{}", EPHEMERAL_PREFIX, logical_name, instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persisted_name_is_verbatim() {
        let config = Config {
            persist: Some(true),
            ..Default::default()
        };
        let instance = InstanceId::new("abc123");
        assert_eq!(container_name("web", &config, &instance), "web");
    }

    #[test]
    fn test_ephemeral_name() {
        let instance = InstanceId::new("abc123");
        let config = Config {
            persist: Some(false),
            ..Default::default()
        };
        assert_eq!(container_name("web", &config, &instance), "bc_web_abc123");
        assert_eq!(
            container_name("web", &Config::default(), &instance),
            "bc_web_abc123"
        );
    }

    #[test]
    fn test_generated_ids() {
        let a = InstanceId::generate();
        let b = InstanceId::generate();
        assert_eq!(a.as_str().len(), 8);
        assert!(a.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
