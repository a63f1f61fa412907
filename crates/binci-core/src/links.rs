//! `--link` flags for linked services

use crate::{container_name, InstanceId};
use binci_config::Config;

/// `--link <service container>:<alias>` for every service, in config order
pub fn links(config: &Config, instance: &InstanceId) -> Vec<String> {
    config
        .services()
        .iter()
        .flat_map(|service| {
            let name = container_name(&service.alias, &service.config, instance);
            ["--link".to_string(), format!("{}:{}", name, service.alias)]
        })
        .collect()
}
