//! Model credential lookup.
//!
//! The API key is read once at startup from the process environment.
//! Absence is a user-visible configuration error, not a crash: the chat
//! surface still loads, it just cannot invoke the agent.

use secrecy::SecretString;

use tabletalk_types::error::ConfigError;

/// Environment variable holding the Groq API key.
pub const API_KEY_VAR: &str = "GROQ_API_KEY";

/// Read the model API key from the environment.
pub fn api_key_from_env() -> Result<SecretString, ConfigError> {
    read_key(API_KEY_VAR)
}

fn read_key(var: &str) -> Result<SecretString, ConfigError> {
    match std::env::var(var) {
        Ok(val) if !val.trim().is_empty() => Ok(SecretString::from(val)),
        _ => Err(ConfigError::MissingApiKey {
            key: var.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_key_present() {
        // SAFETY: Unique var name; this test cleans up after itself.
        unsafe { std::env::set_var("TABLETALK_TEST_KEY_1", "gsk-test-123") };
        let key = read_key("TABLETALK_TEST_KEY_1").unwrap();
        assert_eq!(key.expose_secret(), "gsk-test-123");
        // SAFETY: The var was just set above.
        unsafe { std::env::remove_var("TABLETALK_TEST_KEY_1") };
    }

    #[test]
    fn test_key_missing() {
        let err = read_key("TABLETALK_TEST_KEY_ABSENT").unwrap_err();
        assert!(err.to_string().contains("TABLETALK_TEST_KEY_ABSENT"));
    }

    #[test]
    fn test_key_blank_counts_as_missing() {
        // SAFETY: Unique var name; this test cleans up after itself.
        unsafe { std::env::set_var("TABLETALK_TEST_KEY_2", "   ") };
        assert!(read_key("TABLETALK_TEST_KEY_2").is_err());
        // SAFETY: The var was just set above.
        unsafe { std::env::remove_var("TABLETALK_TEST_KEY_2") };
    }
}
