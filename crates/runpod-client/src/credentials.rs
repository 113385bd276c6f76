use std::fmt;
use std::str::FromStr;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "RUNPOD_API_KEY";

/// Credentials to authenticate against the RunPod API
#[derive(Clone, PartialEq, Eq)]
pub struct RunpodCredentials {
    api_key: String,
}

impl RunpodCredentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Creates a new instance of `RunpodCredentials` from environment variables.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        let api_key = std::env::var(API_KEY_ENV)?;
        Ok(Self::new(api_key))
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn is_empty(&self) -> bool {
        self.api_key.trim().is_empty()
    }
}

impl fmt::Debug for RunpodCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RunpodCredentials")
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl FromStr for RunpodCredentials {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            Err("API key cannot be empty".to_string())
        } else {
            Ok(Self::new(s))
        }
    }
}
