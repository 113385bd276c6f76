#[derive(thiserror::Error, Debug)]
pub enum ProviderError {
    #[error("Resource type '{0}' is not registered")]
    UnknownResource(String),
    #[error("Resource type '{0}' is already registered")]
    DuplicateResource(String),
    #[error("Invalid arguments for '{token}': {source}")]
    InvalidArgs {
        token: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize state of '{token}': {source}")]
    InvalidState {
        token: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Resource name is required")]
    MissingName,
    #[error("Provider is not configured")]
    NotConfigured,
}
