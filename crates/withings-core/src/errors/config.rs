// ABOUTME: Configuration error types for missing credentials and invalid values
// ABOUTME: Raised before any network activity takes place

/// Invalid or incomplete exporter configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required credential was neither passed nor found in the environment
    #[error("Missing required credential '{name}' (pass --{flag} or set {env})")]
    MissingCredential {
        /// Credential name
        name: &'static str,
        /// Command line flag
        flag: &'static str,
        /// Environment variable
        env: &'static str,
    },

    /// A value was present but unusable
    #[error("Invalid value for '{name}': {reason}")]
    InvalidValue {
        /// Option name
        name: &'static str,
        /// Why it was rejected
        reason: String,
    },
}
