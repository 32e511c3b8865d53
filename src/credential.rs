//! Credential resolution: explicit value first, then the binding's environment variable.

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

use crate::error::ConfigError;

/// Resolved vendor API key.
///
/// Always non-empty. `Debug` never prints the key.
#[derive(Clone)]
pub struct ApiKey(SecretString);

impl ApiKey {
    pub(crate) fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

/// Resolves the credential for `provider` from `explicit`, falling back to
/// `lookup(env_var)`.
///
/// A blank explicit value counts as absent, as does a blank environment variable.
pub fn resolve_api_key_with<F>(
    provider: &'static str,
    explicit: Option<&str>,
    env_var: &'static str,
    lookup: F,
) -> Result<ApiKey, ConfigError>
where
    F: FnOnce(&str) -> Option<String>,
{
    let key = match non_blank(explicit) {
        Some(key) => key.to_string(),
        None => lookup(env_var)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::MissingCredential { provider, env_var })?,
    };
    Ok(ApiKey(SecretString::from(key)))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_key_skips_environment() {
        let key = resolve_api_key_with("openai", Some("sk-explicit"), "OPENAI_API_KEY", |_| {
            panic!("environment must not be consulted")
        })
        .expect("explicit key");
        assert_eq!(key.expose(), "sk-explicit");
    }

    #[test]
    fn blank_explicit_key_falls_back_to_environment() {
        let key = resolve_api_key_with("gemini", Some("  "), "GEMINI_API_KEY", |name| {
            assert_eq!(name, "GEMINI_API_KEY");
            Some("from-env".to_string())
        })
        .expect("env key");
        assert_eq!(key.expose(), "from-env");
    }

    #[test]
    fn missing_everywhere_is_a_config_error() {
        let err = resolve_api_key_with("claude", None, "CLAUDE_API_KEY", |_| None)
            .expect_err("no credential");
        assert!(matches!(
            err,
            ConfigError::MissingCredential {
                provider: "claude",
                env_var: "CLAUDE_API_KEY"
            }
        ));

        let err = resolve_api_key_with("claude", None, "CLAUDE_API_KEY", |_| Some(String::new()))
            .expect_err("empty env value");
        assert!(matches!(err, ConfigError::MissingCredential { .. }));
    }

    #[test]
    fn debug_output_is_redacted() {
        let key = resolve_api_key_with("openai", Some("sk-very-secret"), "OPENAI_API_KEY", |_| None)
            .expect("key");
        let rendered = format!("{key:?}");
        assert!(!rendered.contains("sk-very-secret"));
        assert!(rendered.contains("REDACTED"));
    }
}
