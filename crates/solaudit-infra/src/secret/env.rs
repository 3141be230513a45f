//! Environment variable credential lookup.

use secrecy::SecretString;

/// Read the API key from the environment variable named `var_name`.
///
/// Returns `None` when the variable is unset, empty, or not valid Unicode.
pub fn resolve_api_key(var_name: &str) -> Option<SecretString> {
    match std::env::var(var_name) {
        Ok(val) if !val.trim().is_empty() => Some(SecretString::from(val)),
        Ok(_) => {
            tracing::debug!(var = var_name, "API key variable is set but empty");
            None
        }
        Err(std::env::VarError::NotPresent) => None,
        Err(std::env::VarError::NotUnicode(_)) => {
            tracing::warn!(var = var_name, "API key variable is not valid Unicode, ignoring");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_resolve_existing_key() {
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var("SOLAUDIT_TEST_KEY_PRESENT", "sk-test-123") };

        let key = resolve_api_key("SOLAUDIT_TEST_KEY_PRESENT").unwrap();
        assert_eq!(key.expose_secret(), "sk-test-123");

        // SAFETY: the var was just set above.
        unsafe { std::env::remove_var("SOLAUDIT_TEST_KEY_PRESENT") };
    }

    #[test]
    fn test_resolve_missing_key() {
        assert!(resolve_api_key("SOLAUDIT_TEST_KEY_DEFINITELY_UNSET").is_none());
    }

    #[test]
    fn test_resolve_blank_key() {
        // SAFETY: the variable name is unique to this test.
        unsafe { std::env::set_var("SOLAUDIT_TEST_KEY_BLANK", "   ") };
        assert!(resolve_api_key("SOLAUDIT_TEST_KEY_BLANK").is_none());
        unsafe { std::env::remove_var("SOLAUDIT_TEST_KEY_BLANK") };
    }
}
