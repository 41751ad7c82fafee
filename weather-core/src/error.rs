use thiserror::Error;

/// Why a provider lookup produced no usable observation.
///
/// The lookup service never surfaces these to callers; they are logged and
/// replaced with the fallback record.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no API key configured for provider '{0}'")]
    MissingApiKey(&'static str),

    #[error("failed to send request to {provider}: {source}")]
    Request {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} request failed with status {status}: {body}")]
    Status {
        provider: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("failed to parse {provider} response: {source}")]
    Decode {
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },
}
