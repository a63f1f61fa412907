//! Mapping of flag-bearing config fields to runtime arguments

use crate::{resolve_volumes, CoreError, InvocationContext, Result};
use binci_config::Config;
use serde_yaml::Value;

/// Config fields that turn into repeated runtime flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgumentType {
    Expose,
    Volumes,
    Env,
    Hosts,
}

impl ArgumentType {
    /// Every argument type, in the order fields are emitted
    pub const ALL: [ArgumentType; 4] = [
        ArgumentType::Expose,
        ArgumentType::Volumes,
        ArgumentType::Env,
        ArgumentType::Hosts,
    ];

    /// Config key of this field
    pub fn key(self) -> &'static str {
        match self {
            ArgumentType::Expose => "expose",
            ArgumentType::Volumes => "volumes",
            ArgumentType::Env => "env",
            ArgumentType::Hosts => "hosts",
        }
    }

    /// Runtime flag emitted before each value
    pub fn flag(self) -> &'static str {
        match self {
            ArgumentType::Expose => "-p",
            ArgumentType::Volumes => "-v",
            ArgumentType::Env => "-e",
            ArgumentType::Hosts => "--add-host",
        }
    }
}

/// Interleave `values` with the flag for `arg_type`
///
/// Volumes are path-resolved before interpolation; every other type is only
/// interpolated.
pub fn map_field(arg_type: ArgumentType, values: &[String], ctx: &InvocationContext) -> Vec<String> {
    let values = match arg_type {
        ArgumentType::Volumes => resolve_volumes(values, &ctx.cwd),
        _ => values.to_vec(),
    };

    values
        .iter()
        .flat_map(|value| [arg_type.flag().to_string(), ctx.interpolate(value)])
        .collect()
}

/// Flags for every flag-bearing field present in `config`
pub fn map_all(config: &Config, ctx: &InvocationContext) -> Result<Vec<String>> {
    let mut args = Vec::new();

    for arg_type in ArgumentType::ALL {
        let Some(value) = config.flag_field(arg_type.key()) else {
            continue;
        };
        let values = sequence_values(arg_type.key(), value)?;
        args.extend(map_field(arg_type, &values, ctx));
    }

    Ok(args)
}

/// Items of a sequence field rendered as strings
fn sequence_values(key: &str, value: &Value) -> Result<Vec<String>> {
    let shape_error = || CoreError::ConfigShape {
        key: key.to_string(),
    };

    let items = value.as_sequence().ok_or_else(shape_error)?;
    items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            _ => Err(shape_error()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InstanceId;
    use std::collections::HashMap;
    use std::path::Path;

    fn ctx_with(vars: &[(&str, &str)]) -> InvocationContext {
        let env: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        InvocationContext::new(InstanceId::new("test"), "/home/user/project", env)
    }

    fn parse(yaml: &str) -> Config {
        Config::parse(yaml, Path::new("binci.yml")).unwrap()
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_flag_table() {
        let table: Vec<_> = ArgumentType::ALL
            .into_iter()
            .map(|t| (t.key(), t.flag()))
            .collect();
        assert_eq!(
            table,
            [
                ("expose", "-p"),
                ("volumes", "-v"),
                ("env", "-e"),
                ("hosts", "--add-host"),
            ]
        );
    }

    #[test]
    fn test_map_field_interleaves() {
        let ctx = ctx_with(&[("HOST_IP", "10.0.0.1")]);
        let args = map_field(
            ArgumentType::Hosts,
            &strings(&["db:${HOST_IP}", "cache:127.0.0.1"]),
            &ctx,
        );
        assert_eq!(
            args,
            vec!["--add-host", "db:10.0.0.1", "--add-host", "cache:127.0.0.1"]
        );
    }

    #[test]
    fn test_map_field_volumes_resolved_then_interpolated() {
        let ctx = ctx_with(&[("CACHE", "/var/cache")]);
        let args = map_field(
            ArgumentType::Volumes,
            &strings(&["./src:/src", "${CACHE}:/cache"]),
            &ctx,
        );
        assert_eq!(
            args,
            vec!["-v", "/home/user/project/src:/src", "-v", "/var/cache:/cache"]
        );
    }

    #[test]
    fn test_map_all_expose_and_env() {
        let ctx = ctx_with(&[]);
        let config = parse(
            r#"
from: alpine
expose: ["3000"]
env: ["FOO=${BAR:-baz}"]
"#,
        );
        assert_eq!(map_all(&config, &ctx).unwrap(), vec!["-p", "3000", "-e", "FOO=baz"]);
    }

    #[test]
    fn test_map_all_scalar_items_rendered() {
        let ctx = ctx_with(&[]);
        let config = parse("expose: [8080, \"9000:9000\"]");
        assert_eq!(
            map_all(&config, &ctx).unwrap(),
            vec!["-p", "8080", "-p", "9000:9000"]
        );
    }

    #[test]
    fn test_map_all_ignores_unrecognized_keys() {
        let ctx = ctx_with(&[]);
        let config = parse("from: alpine\nports: [\"80\"]\nlabels: [a]");
        assert!(map_all(&config, &ctx).unwrap().is_empty());
    }

    #[test]
    fn test_map_all_non_sequence_is_shape_error() {
        let ctx = ctx_with(&[]);
        let config = parse("expose: \"3000\"");
        assert_eq!(
            map_all(&config, &ctx).unwrap_err(),
            CoreError::ConfigShape {
                key: "expose".to_string()
            }
        );

        let config = parse("env:\n  FOO: bar");
        let err = map_all(&config, &ctx).unwrap_err();
        assert_eq!(err.to_string(), "Config key 'env' must be a list");
    }

    #[test]
    fn test_map_all_nested_item_is_shape_error() {
        let ctx = ctx_with(&[]);
        let config = parse("hosts: [[a, b]]");
        assert!(matches!(
            map_all(&config, &ctx),
            Err(CoreError::ConfigShape { key }) if key == "hosts"
        ));
    }

    #[test]
    fn test_map_all_is_deterministic() {
        let ctx = ctx_with(&[("P", "1")]);
        let config = parse(
            r#"
hosts: ["a:1.1.1.1"]
env: ["X=${P}"]
volumes: ["./a:/a"]
expose: ["1"]
"#,
        );
        let first = map_all(&config, &ctx).unwrap();
        assert_eq!(first, map_all(&config, &ctx).unwrap());
        assert_eq!(
            first,
            vec![
                "-p", "1",
                "-v", "/home/user/project/a:/a",
                "-e", "X=1",
                "--add-host", "a:1.1.1.1",
            ]
        );
    }
}
