//! Every container of one invocation, assembled up front

use crate::{assemble, Assembled, InvocationContext, Result, Role};
use binci_config::Config;
use std::path::PathBuf;

/// Logical name of the project container
pub const PRIMARY_NAME: &str = "primary";

/// A service ready to be started
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceLaunch {
    pub alias: String,
    /// Persisted services are left running after the primary exits
    pub persist: bool,
    pub assembled: Assembled,
}

/// Services (in config order) followed by the primary container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub services: Vec<ServiceLaunch>,
    pub primary: Assembled,
}

impl LaunchPlan {
    /// Assemble all containers; any error aborts the whole plan
    pub fn build(config: &Config, ctx: &InvocationContext, tmp_dir: PathBuf) -> Result<Self> {
        let services = config
            .services()
            .iter()
            .map(|service| {
                let assembled = assemble(&service.config, &service.alias, &Role::Service, ctx)?;
                Ok(ServiceLaunch {
                    alias: service.alias.clone(),
                    persist: service.config.is_persistent(),
                    assembled,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let primary = assemble(config, PRIMARY_NAME, &Role::Primary { tmp_dir }, ctx)?;

        Ok(Self { services, primary })
    }

    /// Services to stop once the primary container exits
    pub fn ephemeral_services(&self) -> impl Iterator<Item = &ServiceLaunch> {
        self.services.iter().filter(|s| !s.persist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CoreError, InstanceId};
    use std::collections::HashMap;
    use std::path::Path;

    fn ctx() -> InvocationContext {
        InvocationContext::new(InstanceId::new("r1"), "/src", HashMap::new())
    }

    fn parse(yaml: &str) -> Config {
        Config::parse(yaml, Path::new("binci.yml")).unwrap()
    }

    const WITH_SERVICES: &str = r#"
from: node
exec: npm test
services:
  - mongo:
      from: mongo
      persist: true
  - redis:
      from: redis
"#;

    #[test]
    fn test_plan_with_services() {
        let config = parse(WITH_SERVICES);
        let plan = LaunchPlan::build(&config, &ctx(), PathBuf::from("/tmp/b")).unwrap();

        let aliases: Vec<_> = plan.services.iter().map(|s| s.alias.as_str()).collect();
        assert_eq!(aliases, ["mongo", "redis"]);
        assert_eq!(plan.services[0].assembled.container_name(), "mongo");
        assert_eq!(plan.services[1].assembled.container_name(), "bc_redis_r1");
        assert_eq!(plan.primary.container_name(), "bc_primary_r1");

        let ephemeral: Vec<_> = plan.ephemeral_services().map(|s| s.alias.as_str()).collect();
        assert_eq!(ephemeral, ["redis"]);
    }

    #[test]
    fn test_plan_without_services() {
        let mut config = parse(WITH_SERVICES);
        config.services = None;
        let plan = LaunchPlan::build(&config, &ctx(), PathBuf::from("/tmp/b")).unwrap();
        assert!(plan.services.is_empty());
        assert!(!plan.primary.args().iter().any(|a| a == "--link"));
    }

    #[test]
    fn test_service_error_aborts_plan() {
        let config = parse("from: node\nexec: ls\nservices:\n  - db:\n      persist: true\n");
        assert_eq!(
            LaunchPlan::build(&config, &ctx(), PathBuf::from("/tmp/b")).unwrap_err(),
            CoreError::MissingBaseImage
        );
    }
}
