//! API credential loading from the environment.

use crate::error::{CoreError, CoreResult};

/// Environment variable holding the numeric application ID.
pub const API_ID_VAR: &str = "TELEGRAM_API_ID";
/// Environment variable holding the application secret.
pub const API_HASH_VAR: &str = "TELEGRAM_API_HASH";

/// Telegram API credentials, obtained from <https://my.telegram.org/auth>.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    /// Numeric application ID
    pub api_id: i32,
    /// Application secret
    pub api_hash: String,
}

impl ApiCredentials {
    /// Reads credentials from `TELEGRAM_API_ID` and `TELEGRAM_API_HASH`.
    ///
    /// Fails with [`CoreError::Config`] if either variable is missing or the
    /// ID does not parse, before any network activity takes place.
    pub fn from_env() -> CoreResult<Self> {
        Self::from_values(
            std::env::var(API_ID_VAR).ok(),
            std::env::var(API_HASH_VAR).ok(),
        )
    }

    fn from_values(api_id: Option<String>, api_hash: Option<String>) -> CoreResult<Self> {
        let (Some(api_id_str), Some(api_hash)) = (api_id, api_hash) else {
            return Err(CoreError::Config(format!(
                "{API_ID_VAR} and {API_HASH_VAR} must be set in environment. \
                 Get these from https://my.telegram.org/auth"
            )));
        };

        if api_id_str.is_empty() || api_hash.is_empty() {
            return Err(CoreError::Config(format!(
                "{API_ID_VAR} and {API_HASH_VAR} must be set in environment. \
                 Get these from https://my.telegram.org/auth"
            )));
        }

        let api_id = api_id_str
            .parse::<i32>()
            .map_err(|_| CoreError::Config(format!("{API_ID_VAR} must be a number: {api_id_str}")))?;

        Ok(Self { api_id, api_hash })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_pair() {
        let creds =
            ApiCredentials::from_values(Some("12345".to_string()), Some("abcdef".to_string()))
                .unwrap();
        assert_eq!(creds.api_id, 12345);
        assert_eq!(creds.api_hash, "abcdef");
    }

    #[test]
    fn missing_id_is_config_error() {
        let err = ApiCredentials::from_values(None, Some("abcdef".to_string())).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn missing_hash_is_config_error() {
        let err = ApiCredentials::from_values(Some("12345".to_string()), None).unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn empty_values_are_config_errors() {
        let err = ApiCredentials::from_values(Some(String::new()), Some("abcdef".to_string()))
            .unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn non_numeric_id_is_config_error_naming_the_value() {
        let err =
            ApiCredentials::from_values(Some("twelve".to_string()), Some("abcdef".to_string()))
                .unwrap_err();
        assert!(matches!(err, CoreError::Config(ref msg) if msg.contains("twelve")));
    }
}
