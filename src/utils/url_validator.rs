//! Acceptance rules for long URLs.

use thiserror::Error;
use url::Url;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("invalid URL: {0}")]
    Malformed(#[from] url::ParseError),

    #[error("unsupported scheme '{0}', only http and https are allowed")]
    UnsupportedScheme(String),

    /// The stored string is sent verbatim as the `Location` header.
    #[error("URL must not contain control characters")]
    ControlCharacter,
}

/// Accepts `input` only if it is an absolute `http` or `https` URL free of
/// control characters.
///
/// The caller stores the original string; the parsed [`Url`] is returned for
/// inspection only. An accepted string is always a valid HTTP header value.
pub fn validate_long_url(input: &str) -> Result<Url, UrlValidationError> {
    if input.chars().any(char::is_control) {
        return Err(UrlValidationError::ControlCharacter);
    }

    let url = Url::parse(input)?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(UrlValidationError::UnsupportedScheme(other.to_string())),
    }
}
