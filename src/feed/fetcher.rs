use crate::feed::model::Article;
use futures::StreamExt;
use thiserror::Error;
use url::Url;

/// Number of articles requested per load.
pub const DEFAULT_ARTICLE_LIMIT: usize = 30;

const MAX_RESPONSE_SIZE: usize = 5 * 1024 * 1024; // 5MB

/// Errors that can occur while loading the article list.
///
/// Every variant is a total failure of the load: there is no partial
/// recovery and no retry.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The configured API URL could not be parsed
    #[error("Invalid API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// Network-level error (DNS, connection, TLS, timeout)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Response body exceeded the size limit
    #[error("Response too large")]
    ResponseTooLarge,
    /// Response body was not a JSON array of article records
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Build `<api_url>?limit=<limit>`, keeping any query pairs already present.
pub fn articles_url(api_url: &str, limit: usize) -> Result<Url, FetchError> {
    let mut url = Url::parse(api_url)?;
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "limit")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (k, v) in &retained {
            pairs.append_pair(k, v);
        }
        pairs.append_pair("limit", &limit.to_string());
    }
    Ok(url)
}

/// Fetch up to `limit` articles from the API with a single GET request.
///
/// # Errors
///
/// - [`FetchError::InvalidUrl`] - `api_url` is not a valid absolute URL
/// - [`FetchError::Network`] - Connection, TLS or timeout errors
/// - [`FetchError::HttpStatus`] - Non-2xx HTTP response
/// - [`FetchError::ResponseTooLarge`] - Body exceeded 5MB
/// - [`FetchError::Decode`] - Body was not a JSON array of articles
pub async fn fetch_articles(
    client: &reqwest::Client,
    api_url: &str,
    limit: usize,
) -> Result<Vec<Article>, FetchError> {
    let url = articles_url(api_url, limit)?;
    tracing::debug!(url = %url, "Fetching articles");

    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(FetchError::HttpStatus(response.status().as_u16()));
    }

    let bytes = read_limited_bytes(response, MAX_RESPONSE_SIZE).await?;
    let articles: Vec<Article> = serde_json::from_slice(&bytes)?;

    tracing::debug!(count = articles.len(), "Decoded article records");
    Ok(articles)
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(FetchError::Network)?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
