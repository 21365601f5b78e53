use std::fmt;

use crate::errors::CredentialError;

/// A caller supplied API key.
///
/// Credentials are passed by reference into every call that reaches the
/// completion endpoint and are never stored by the router or the providers.
/// The `Debug` implementation is redacted so the key cannot leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new<S: Into<String>>(key: S) -> Result<Self, CredentialError> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(CredentialError::Empty);
        }
        Ok(Credential(key))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}
