//! Environment variable interpolation for config values
//!
//! Supports two placeholder forms:
//! - `${VAR}`: value of `VAR`, or empty string when unset
//! - `${VAR:-default}`: value of `VAR`, or `default` when unset
//!
//! A variable set to the empty string is considered present, so
//! `${VAR:-x}` yields `""` rather than `x` in that case.

use std::collections::HashMap;

/// Read-only source of environment variables
pub trait EnvSource: Send + Sync {
    /// Look up a variable. `None` means unset; `Some("")` means set but empty.
    fn var(&self, name: &str) -> Option<String>;
}

/// The environment of the current process
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        if name.is_empty() || name.contains(['=', '\0']) {
            return None;
        }
        std::env::var_os(name).map(|v| v.to_string_lossy().into_owned())
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Replace every `${...}` placeholder in `input`
pub fn interpolate(input: &str, env: &dyn EnvSource) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '$' && chars.peek() == Some(&'{') {
            chars.next(); // consume '{'
            let mut body = String::new();
            let mut depth = 1;
            let mut closed = false;
            while let Some(&nc) = chars.peek() {
                if nc == '}' {
                    depth -= 1;
                    if depth == 0 {
                        chars.next(); // consume '}'
                        closed = true;
                        break;
                    }
                } else if nc == '{' {
                    depth += 1;
                }
                body.push(nc);
                chars.next();
            }

            if closed {
                result.push_str(&resolve_placeholder(&body, env));
            } else {
                // Unterminated placeholder, keep the text as written
                result.push_str("${");
                result.push_str(&body);
            }
        } else {
            result.push(c);
        }
    }

    result
}

fn resolve_placeholder(body: &str, env: &dyn EnvSource) -> String {
    let (name, default) = match body.split_once(":-") {
        Some((name, default)) => (name, default),
        None => (body, ""),
    };
    env.var(name).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_env() -> HashMap<String, String> {
        let mut env = HashMap::new();
        env.insert("HOME".to_string(), "/home/user".to_string());
        env.insert("PORT".to_string(), "8080".to_string());
        env.insert("EMPTY".to_string(), String::new());
        env
    }

    #[test]
    fn test_set_variable() {
        let env = test_env();
        assert_eq!(interpolate("${HOME}", &env), "/home/user");
        assert_eq!(interpolate("${PORT}:${PORT}", &env), "8080:8080");
    }

    #[test]
    fn test_unset_without_default_is_empty() {
        let env = test_env();
        assert_eq!(interpolate("${MISSING}", &env), "");
        assert_eq!(interpolate("a${MISSING}b", &env), "ab");
    }

    #[test]
    fn test_unset_with_default() {
        let env = test_env();
        assert_eq!(interpolate("FOO=${BAR:-baz}", &env), "FOO=baz");
        assert_eq!(interpolate("${MISSING:-}", &env), "");
    }

    #[test]
    fn test_set_variable_ignores_default() {
        let env = test_env();
        assert_eq!(interpolate("${PORT:-3000}", &env), "8080");
    }

    #[test]
    fn test_empty_value_counts_as_present() {
        let env = test_env();
        assert_eq!(interpolate("${EMPTY:-fallback}", &env), "");
    }

    #[test]
    fn test_default_splits_on_first_separator() {
        let env = test_env();
        assert_eq!(interpolate("${MISSING:-a:-b}", &env), "a:-b");
        assert_eq!(interpolate("${MISSING:-http://x}", &env), "http://x");
    }

    #[test]
    fn test_text_outside_placeholders_untouched() {
        let env = test_env();
        assert_eq!(interpolate("plain $HOME text", &env), "plain $HOME text");
        assert_eq!(interpolate("", &env), "");
        assert_eq!(interpolate("cost: $5 {x}", &env), "cost: $5 {x}");
    }

    #[test]
    fn test_unterminated_placeholder_kept() {
        let env = test_env();
        assert_eq!(interpolate("x${HOME", &env), "x${HOME");
    }

    #[test]
    fn test_mixed_text_and_variables() {
        let env = test_env();
        assert_eq!(
            interpolate("${HOME}/.cache:/root/.cache:${MODE:-ro}", &env),
            "/home/user/.cache:/root/.cache:ro"
        );
    }

    #[test]
    fn test_process_env_rejects_invalid_names() {
        assert_eq!(ProcessEnv.var(""), None);
        assert_eq!(ProcessEnv.var("A=B"), None);
    }
}
