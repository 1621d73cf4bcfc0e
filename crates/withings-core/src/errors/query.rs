// ABOUTME: Error types for signed data queries against the provider API
// ABOUTME: Transport, HTTP status, envelope parsing and provider status failures

/// Errors of one signed activity query; none are retried
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    /// The query URL could not be built
    #[error("Invalid query URL '{url}'")]
    InvalidUrl {
        /// Offending URL
        url: String,
        /// Parse failure
        #[source]
        source: url::ParseError,
    },

    /// The provider could not be reached
    #[cfg(feature = "provider-errors")]
    #[error("Query to {endpoint} failed")]
    Transport {
        /// Endpoint that was called
        endpoint: String,
        /// Underlying HTTP error
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-success HTTP status
    #[error("Query failed with HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body, for the operator
        body: String,
    },

    /// The response was not a valid envelope
    #[error("Query response is not a valid envelope")]
    Envelope {
        /// JSON failure
        #[source]
        source: serde_json::Error,
    },

    /// The envelope reported a provider-side error
    #[error("Provider reported status {status}")]
    ProviderStatus {
        /// Status field of the envelope
        status: i64,
    },

    /// The envelope had no activities collection
    #[error("Query response has no '{field}' collection")]
    MissingCollection {
        /// Expected field name
        field: &'static str,
    },
}
