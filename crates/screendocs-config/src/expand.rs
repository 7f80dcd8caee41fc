//! Environment variable expansion for configuration strings.
//!
//! A value is expanded only when it contains `${`. Expansion then follows
//! shell rules for the whole string:
//! - `${VAR}` - value of VAR, error if unset or empty
//! - `${VAR:-default}` - value of VAR if set, otherwise `default`
//! - `$VAR` - same as `${VAR}`

use crate::ConfigError;

/// Expand `${VAR}` references in a configuration value.
///
/// `field` names the config key for error messages (e.g. `notion.api_key`).
/// Values without `${` are returned unchanged, bare `$VAR` included. An empty variable counts as
/// unset so that `NOTION_API_KEY=` fails the same way as a missing one.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, UnsetVar> {
        match std::env::var(var) {
            Ok(val) if !val.is_empty() => Ok(Some(val)),
            _ => Err(UnsetVar {
                name: var.to_owned(),
            }),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("{} is not set", e.cause.name),
    })
}

/// Lookup failure for a referenced variable.
struct UnsetVar {
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_whole_value() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("SCREENDOCS_TEST_KEY", "secret_abc");
        }
        let result = expand_env("${SCREENDOCS_TEST_KEY}", "notion.api_key").unwrap();
        assert_eq!(result, "secret_abc");
        unsafe {
            std::env::remove_var("SCREENDOCS_TEST_KEY");
        }
    }

    #[test]
    fn test_expand_default_when_unset() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("SCREENDOCS_TEST_UNSET_URL");
        }
        let result = expand_env(
            "${SCREENDOCS_TEST_UNSET_URL:-https://api.notion.com}",
            "notion.base_url",
        )
        .unwrap();
        assert_eq!(result, "https://api.notion.com");
    }

    #[test]
    fn test_expand_missing_names_variable_and_field() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::remove_var("SCREENDOCS_TEST_MISSING_DB");
        }
        let err = expand_env("${SCREENDOCS_TEST_MISSING_DB}", "notion.database_id").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        let message = err.to_string();
        assert!(message.contains("SCREENDOCS_TEST_MISSING_DB is not set"));
        assert!(message.contains("notion.database_id"));
    }

    #[test]
    fn test_expand_empty_variable_is_unset() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("SCREENDOCS_TEST_EMPTY", "");
        }
        let result = expand_env("${SCREENDOCS_TEST_EMPTY}", "notion.api_key");
        assert!(result.is_err());
        unsafe {
            std::env::remove_var("SCREENDOCS_TEST_EMPTY");
        }
    }

    #[test]
    fn test_expand_literal_unchanged() {
        let result = expand_env("2022-06-28", "notion.version").unwrap();
        assert_eq!(result, "2022-06-28");
    }

    #[test]
    fn test_expand_bare_reference_only_alongside_braced() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("SCREENDOCS_TEST_BARE", "v1");
        }
        let result = expand_env("$SCREENDOCS_TEST_BARE", "notion.version").unwrap();
        assert_eq!(result, "$SCREENDOCS_TEST_BARE");

        let result = expand_env(
            "${SCREENDOCS_TEST_BARE}/$SCREENDOCS_TEST_BARE",
            "notion.version",
        )
        .unwrap();
        assert_eq!(result, "v1/v1");
        unsafe {
            std::env::remove_var("SCREENDOCS_TEST_BARE");
        }
    }

    #[test]
    fn test_expand_embedded_reference() {
        // SAFETY: variable name is unique to this test
        unsafe {
            std::env::set_var("SCREENDOCS_TEST_HOST", "notion.internal");
        }
        let result = expand_env("https://${SCREENDOCS_TEST_HOST}/api", "notion.base_url").unwrap();
        assert_eq!(result, "https://notion.internal/api");
        unsafe {
            std::env::remove_var("SCREENDOCS_TEST_HOST");
        }
    }
}
