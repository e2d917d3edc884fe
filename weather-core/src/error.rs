use reqwest::StatusCode;

/// Generic text shown for every provider-side failure.
pub const UNAVAILABLE_MESSAGE: &str = "City not found or API unavailable.";

/// Text shown when a search is attempted with a blank city name.
pub const INVALID_INPUT_MESSAGE: &str = "Please enter a city name.";

/// Failures of a single weather query.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("City name must not be empty")]
    InvalidInput,

    #[error("City not found: {city}")]
    CityNotFound { city: String },

    #[error("Weather provider unavailable (status {status}): {message}")]
    ProviderUnavailable { status: StatusCode, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

impl QueryError {
    /// The single line shown to the user. Provider-side kinds are not
    /// distinguished; the detailed error is logged instead.
    pub fn user_message(&self) -> &'static str {
        match self {
            QueryError::InvalidInput => INVALID_INPUT_MESSAGE,
            QueryError::CityNotFound { .. }
            | QueryError::ProviderUnavailable { .. }
            | QueryError::Network(_)
            | QueryError::MalformedResponse(_) => UNAVAILABLE_MESSAGE,
        }
    }
}
