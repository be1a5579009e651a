use thiserror::Error;
use url::Url;

/// Reasons a link is refused before being handed to the system opener.
#[derive(Error, Debug)]
pub enum LinkError {
    /// The link could not be parsed as an absolute URL.
    #[error("Invalid link: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// Only web links are opened; `file:`, `javascript:` and the like are not.
    #[error("Refusing to open {0}: link (only http/https allowed)")]
    UnsupportedScheme(String),
}

/// Validate an article or share link before `open::that()`.
///
/// Article links come from the remote API, so anything other than an
/// http(s) URL is refused rather than passed to the platform opener.
///
/// ```
/// use broadsheet::util::validate_link;
///
/// assert!(validate_link("https://example.com/story").is_ok());
/// assert!(validate_link("file:///etc/passwd").is_err());
/// ```
pub fn validate_link(link: &str) -> Result<Url, LinkError> {
    let url = Url::parse(link.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        scheme => Err(LinkError::UnsupportedScheme(scheme.to_owned())),
    }
}
