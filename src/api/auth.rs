//! Session token handling for outgoing requests.

use crate::storage::{TokenStorage, TOKEN_KEY};

/// Wrapper for sensitive strings that prevents accidental logging.
///
/// The inner value is never exposed via Debug or Display traits.
/// Use `expose()` to access the actual value when building a request.
#[derive(Clone)]
pub struct SecureString(String);

impl SecureString {
    pub fn new(value: String) -> Self {
        Self(value)
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SecureString(••••••••)")
    }
}

impl std::fmt::Display for SecureString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "••••••••")
    }
}

/// Header name and value for authentication.
pub type AuthHeader = (&'static str, SecureString);

/// Build the authorization header from the persisted session token.
///
/// The server expects the raw token, without a scheme prefix. Returns `None`
/// when no token is stored, the stored token is empty (signed out), or the
/// storage cannot be read.
pub fn build_auth_header(storage: &dyn TokenStorage) -> Option<AuthHeader> {
    match storage.get_item(TOKEN_KEY) {
        Ok(Some(token)) if !token.is_empty() => {
            Some(("authorization", SecureString::new(token)))
        }
        Ok(_) => None,
        Err(e) => {
            tracing::warn!("Sending request without session token: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_secure_string_does_not_leak() {
        let secret = SecureString::new("tok123".to_string());
        assert!(!format!("{:?}", secret).contains("tok123"));
        assert!(!format!("{}", secret).contains("tok123"));
        assert_eq!(secret.expose(), "tok123");
    }

    #[test]
    fn test_no_token_no_header() {
        let storage = MemoryStorage::new();
        assert!(build_auth_header(&storage).is_none());
    }

    #[test]
    fn test_empty_token_means_signed_out() {
        let storage = MemoryStorage::new();
        storage.set_item(TOKEN_KEY, "").unwrap();
        assert!(build_auth_header(&storage).is_none());
    }

    #[test]
    fn test_token_is_sent_raw() {
        let storage = MemoryStorage::new();
        storage.set_item(TOKEN_KEY, "tok123").unwrap();
        let (name, value) = build_auth_header(&storage).expect("header");
        assert_eq!(name, "authorization");
        assert_eq!(value.expose(), "tok123");
    }
}
