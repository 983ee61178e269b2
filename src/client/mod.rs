use crate::models::listing::ListingKind;
use crate::search::SearchService;
use chrono::{DateTime, TimeDelta, Utc};
use log::debug;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, Request, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Base URL used once an OAuth token is available
pub const OAUTH_BASE_URL: &str = "https://oauth.reddit.com/";
/// Base URL for unauthenticated requests (paths get a `.json` suffix)
pub const PUBLIC_BASE_URL: &str = "https://www.reddit.com/";
/// Endpoint for obtaining access tokens
pub const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";

pub const DEFAULT_USER_AGENT: &str = "redsearch/0.1 (Reddit search client)";

// Custom error type for handling Reddit API errors
#[derive(Debug, Error)]
pub enum RedditClientError {
    /// The request path could not be resolved against the API base.
    #[error("Invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// Network failure or timeout before any response arrived.
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
    /// Reddit answered with a non-2xx status.
    #[error("Reddit API error ({}): {message}", .response.status)]
    Status { response: Response, message: String },
    /// The body could not be decoded into the expected envelope.
    #[error("Parse error: {source}")]
    Decode {
        response: Response,
        source: serde_json::Error,
    },
    /// The envelope's top-level kind was not `Listing`.
    #[error("Expected a listing, got `{kind}`")]
    NotAListing {
        kind: String,
        response: Option<Response>,
    },
    /// The listing holds a different entity kind than the one requested.
    #[error("Expected a {expected}, got a {found}")]
    UnexpectedListing {
        expected: ListingKind,
        found: ListingKind,
        response: Option<Response>,
    },
    #[error("Reddit API error: {0}")]
    Api(String),
}

impl RedditClientError {
    /// Response metadata attached to the failure, if the server answered at all
    pub fn response(&self) -> Option<&Response> {
        match self {
            RedditClientError::Status { response, .. }
            | RedditClientError::Decode { response, .. } => Some(response),
            RedditClientError::NotAListing { response, .. }
            | RedditClientError::UnexpectedListing { response, .. } => response.as_ref(),
            _ => None,
        }
    }

    /// Attach the metadata of the response a decoded envelope came from
    pub(crate) fn with_response(self, response: Response) -> Self {
        match self {
            RedditClientError::NotAListing { kind, .. } => RedditClientError::NotAListing {
                kind,
                response: Some(response),
            },
            RedditClientError::UnexpectedListing {
                expected, found, ..
            } => RedditClientError::UnexpectedListing {
                expected,
                found,
                response: Some(response),
            },
            other => other,
        }
    }
}

/// Rate limit state reported by Reddit in the `x-ratelimit-*` headers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rate {
    /// Requests used in the current period
    pub used: u32,
    /// Requests left in the current period
    pub remaining: u32,
    /// When the current period ends
    pub reset: DateTime<Utc>,
}

impl Rate {
    fn from_headers(headers: &HeaderMap, now: DateTime<Utc>) -> Option<Self> {
        let header = |name: &str| headers.get(name)?.to_str().ok().map(str::trim);

        // Reddit reports these as floats, e.g. "598.0"
        let used = header("x-ratelimit-used")?.parse::<f64>().ok()?;
        let remaining = header("x-ratelimit-remaining")?.parse::<f64>().ok()?;
        let reset_secs = header("x-ratelimit-reset")?.parse::<i64>().ok()?;

        Some(Self {
            used: used as u32,
            remaining: remaining as u32,
            reset: now.checked_add_signed(TimeDelta::try_seconds(reset_secs)?)?,
        })
    }
}

/// Transport metadata for a completed HTTP round-trip
#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub rate: Option<Rate>,
}

impl Response {
    fn from_reqwest(res: &reqwest::Response) -> Self {
        let headers = res.headers().clone();
        let rate = Rate::from_headers(&headers, Utc::now());
        Self {
            status: res.status(),
            headers,
            rate,
        }
    }
}

#[derive(Clone)]
pub struct RedditClient {
    pub client: Client,
    pub access_token: Option<String>,
    pub user_agent: String,
    base_url: Option<Url>,
}

impl RedditClient {
    pub fn new() -> Result<Self, RedditClientError> {
        Self::with_user_agent(DEFAULT_USER_AGENT.to_string())
    }

    pub fn with_user_agent(user_agent: String) -> Result<Self, RedditClientError> {
        Self::build(user_agent, None)
    }

    /// Create a client from a configuration object
    pub fn from_config(config: &crate::config::AppConfig) -> Result<Self, RedditClientError> {
        debug!(
            "Creating RedditClient with user_agent: {}",
            config.user_agent
        );
        let mut client = Self::build(config.user_agent.clone(), Some(config.timeout))?;
        client.access_token = config.access_token.clone();

        if let Some(base_url) = &config.api_base {
            client = client.with_base_url(base_url.clone());
        }

        Ok(client)
    }

    fn build(user_agent: String, timeout: Option<Duration>) -> Result<Self, RedditClientError> {
        Ok(Self {
            client: Self::get_client(&user_agent, timeout)?,
            access_token: None,
            user_agent,
            base_url: None,
        })
    }

    fn get_client(user_agent: &str, timeout: Option<Duration>) -> Result<Client, RedditClientError> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }

    /// Send every request to `base_url` instead of the Reddit hosts
    pub fn with_base_url(mut self, mut base_url: Url) -> Self {
        // Url::join drops the last segment unless the base ends in a slash
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        self.base_url = Some(base_url);
        self
    }

    /// Use a bearer token obtained elsewhere
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Search posts, subreddits and users
    pub fn search(&self) -> SearchService<'_> {
        SearchService::new(self)
    }

    fn api_base(&self) -> Result<Url, RedditClientError> {
        match &self.base_url {
            Some(url) => Ok(url.clone()),
            None if self.access_token.is_some() => {
                debug!("Using OAuth API endpoint with access token");
                Ok(Url::parse(OAUTH_BASE_URL)?)
            }
            None => {
                debug!("Using public API endpoint (no access token)");
                Ok(Url::parse(PUBLIC_BASE_URL)?)
            }
        }
    }

    /// Resolve a relative API path (query string included) into a full URL.
    ///
    /// Without a token the public endpoints only serve JSON when the path
    /// carries a `.json` suffix, so one is added to the path component.
    pub fn resolve(&self, path: &str) -> Result<Url, RedditClientError> {
        let mut url = self.api_base()?.join(path)?;
        if self.access_token.is_none() {
            let json_path = format!("{}.json", url.path().trim_end_matches('/'));
            url.set_path(&json_path);
        }
        Ok(url)
    }

    /// Build a request for `path`, relative to the API base.
    ///
    /// No network activity happens here; a path that does not resolve to a
    /// valid URL is rejected immediately.
    pub fn new_request(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
    ) -> Result<Request, RedditClientError> {
        let url = self.resolve(path)?;
        debug!("Building {} request for {}", method, url);

        let mut req_builder = self.client.request(method, url);

        // Add authorization header if we have a token
        if let Some(token) = &self.access_token {
            req_builder = req_builder.bearer_auth(token);
        }
        if let Some(body) = body {
            req_builder = req_builder.body(body);
        }

        Ok(req_builder.build()?)
    }

    /// Send a request and decode the JSON body into `T`.
    ///
    /// Status and rate-limit metadata is returned with the decoded value, and
    /// attached to the error when the server answered but the call failed.
    pub async fn execute<T: DeserializeOwned>(
        &self,
        request: Request,
    ) -> Result<(T, Response), RedditClientError> {
        debug!("Using User-Agent: {}", self.user_agent);

        let res = self.client.execute(request).await?;
        let response = Response::from_reqwest(&res);
        debug!("Response status: {}", response.status);
        if let Some(rate) = &response.rate {
            debug!(
                "Rate limit: {} used, {} remaining, resets at {}",
                rate.used, rate.remaining, rate.reset
            );
        }

        let body = res.text().await?;
        debug!("Response body length: {} bytes", body.len());

        if !response.status.is_success() {
            let message = error_message(response.status, &body);
            return Err(RedditClientError::Status { response, message });
        }

        match serde_json::from_str::<T>(&body) {
            Ok(parsed) => Ok((parsed, response)),
            Err(source) => {
                debug!("Error parsing response: {}", source);
                debug!("First 100 chars: {}", body.chars().take(100).collect::<String>());
                Err(RedditClientError::Decode { response, source })
            }
        }
    }

    /// Get an application-only access token for reading public data.
    ///
    /// This token cannot be used for actions that require a user account,
    /// but it is enough for searching.
    pub async fn get_access_token(&mut self, client_id: &str) -> Result<String, RedditClientError> {
        let params = [
            (
                "grant_type",
                "https://oauth.reddit.com/grants/installed_client",
            ),
            ("device_id", "DO_NOT_TRACK_THIS_DEVICE"),
        ];

        // Note: Since there is no client secret, the authorization is created using your client_id followed by a colon.
        let auth = base64::encode(format!("{}:", client_id));

        let res = self
            .client
            .post(TOKEN_URL)
            .header("Authorization", format!("Basic {}", auth))
            .form(&params)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await?;
            return Err(RedditClientError::Api(format!(
                "Token request failed: HTTP {}: {}",
                status, body
            )));
        }

        let json: serde_json::Value = res.json().await?;
        if let Some(error) = json["error"].as_str() {
            return Err(RedditClientError::Api(format!(
                "Token request rejected: {}",
                error
            )));
        }

        let token = json["access_token"]
            .as_str()
            .ok_or_else(|| {
                RedditClientError::Api("Failed to extract access token from response".to_string())
            })?
            .to_string();

        // Store the token for future use
        self.access_token = Some(token.clone());
        debug!("Application-only access token successfully obtained");

        Ok(token)
    }
}

/// Pull a human-readable message out of a Reddit error body
fn error_message(status: StatusCode, body: &str) -> String {
    let from_json = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json["message"].as_str().map(str::to_string));

    match from_json {
        Some(message) => message,
        None if !body.trim().is_empty() => body.trim().chars().take(200).collect(),
        None => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn rate_is_parsed_from_headers() {
        let now = Utc::now();
        let map = headers(&[
            ("x-ratelimit-used", "2"),
            ("x-ratelimit-remaining", "598.0"),
            ("x-ratelimit-reset", "120"),
        ]);

        let rate = Rate::from_headers(&map, now).unwrap();
        assert_eq!(rate.used, 2);
        assert_eq!(rate.remaining, 598);
        assert_eq!(rate.reset, now + TimeDelta::try_seconds(120).unwrap());
    }

    #[test]
    fn rate_is_none_when_headers_missing_or_garbled() {
        let now = Utc::now();
        assert!(Rate::from_headers(&HeaderMap::new(), now).is_none());

        let map = headers(&[
            ("x-ratelimit-used", "2"),
            ("x-ratelimit-remaining", "lots"),
            ("x-ratelimit-reset", "120"),
        ]);
        assert!(Rate::from_headers(&map, now).is_none());
    }

    #[test]
    fn rate_is_none_when_reset_is_out_of_range() {
        let map = headers(&[
            ("x-ratelimit-used", "2"),
            ("x-ratelimit-remaining", "598.0"),
            ("x-ratelimit-reset", "9000000000000"),
        ]);
        assert!(Rate::from_headers(&map, Utc::now()).is_none());
    }

    #[test]
    fn default_user_agent_names_only_this_client() {
        assert!(DEFAULT_USER_AGENT.starts_with("redsearch/"));
        assert!(!DEFAULT_USER_AGENT.contains("/u/"));
    }

    #[test]
    fn projection_errors_take_the_response_metadata() {
        let response = Response {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            rate: None,
        };
        let err = RedditClientError::UnexpectedListing {
            expected: ListingKind::Users,
            found: ListingKind::Posts,
            response: None,
        };
        assert!(err.response().is_none());

        let err = err.with_response(response);
        assert_eq!(err.response().map(|r| r.status), Some(StatusCode::OK));

        let err = RedditClientError::Api("nope".to_string()).with_response(Response {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            rate: None,
        });
        assert!(err.response().is_none());
    }

    #[test]
    fn resolve_uses_oauth_host_with_token() {
        let client = RedditClient::new().unwrap().with_access_token("abc");
        let url = client.resolve("r/rust+golang/search?q=async").unwrap();
        assert_eq!(
            url.as_str(),
            "https://oauth.reddit.com/r/rust+golang/search?q=async"
        );
    }

    #[test]
    fn resolve_adds_json_suffix_without_token() {
        let client = RedditClient::new().unwrap();
        let url = client.resolve("search?q=async&type=link").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.reddit.com/search.json?q=async&type=link"
        );
    }

    #[test]
    fn base_url_without_trailing_slash_keeps_its_path() {
        let client = RedditClient::new()
            .unwrap()
            .with_access_token("abc")
            .with_base_url(Url::parse("http://localhost:9000/api").unwrap());
        let url = client.resolve("search?q=x").unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/api/search?q=x");
    }

    #[test]
    fn new_request_attaches_bearer_token() {
        let client = RedditClient::new().unwrap().with_access_token("abc");
        let req = client.new_request(Method::GET, "search?q=x", None).unwrap();
        assert_eq!(req.method(), &Method::GET);
        assert_eq!(
            req.headers().get("authorization").unwrap(),
            "Bearer abc"
        );
    }

    #[test]
    fn error_message_prefers_reddit_json_message() {
        let message = error_message(StatusCode::FORBIDDEN, r#"{"message": "Forbidden", "error": 403}"#);
        assert_eq!(message, "Forbidden");
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, ""), "Bad Gateway");
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, " upstream down \n"), "upstream down");
    }
}
