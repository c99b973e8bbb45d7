//! Storefront order-history client
//!
//! Replays an authenticated browser session against the storefront's
//! order-history endpoint, one GET per (year, month). The channel
//! (base URL, headers, cookies, session query parameters) is captured
//! externally and used opaquely; this client never refreshes it.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, COOKIE};
use serde::Deserialize;
use url::Url;

use crate::config::SessionChannel;
use crate::domain::result::{Error, Result};
use crate::domain::Period;
use crate::ports::{MonthFetch, OrderSource, RawOrder};

/// How much of an undecodable body to keep for diagnostics.
const BODY_EXCERPT_CHARS: usize = 500;

/// Decoded order-history payload. Unknown fields are ignored; the
/// classification rules only look at these three.
#[derive(Debug, Deserialize)]
struct OrdersPayload {
    #[serde(default)]
    success: Option<i64>,
    #[serde(default)]
    data: Vec<RawOrder>,
    #[serde(default)]
    count: Option<i64>,
}

/// Storefront API client
pub struct StorefrontClient {
    client: Client,
    base_url: String,
    headers: HeaderMap,
    cookie_header: Option<String>,
    extra_params: Vec<(String, String)>,
    page_size: u32,
}

impl StorefrontClient {
    /// Create a client from an externally captured session channel.
    ///
    /// The base URL and header set are validated here so a bad capture
    /// fails before the walk starts, not on the first fetch.
    pub fn new(channel: &SessionChannel, page_size: u32, timeout_secs: u64) -> Result<Self> {
        let url = Url::parse(&channel.base_url)
            .map_err(|e| Error::Config(format!("Invalid base URL '{}': {}", channel.base_url, e)))?;
        if url.scheme() != "https" && url.scheme() != "http" {
            return Err(Error::Config(format!(
                "Base URL must be http(s), got '{}'",
                channel.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        for (name, value) in &channel.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| Error::Config(format!("Invalid header name '{}'", name)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| Error::Config(format!("Invalid value for header '{}'", name)))?;
            headers.insert(name, value);
        }

        let cookie_header = if channel.cookies.is_empty() {
            None
        } else {
            let pairs: Vec<String> = channel
                .cookies
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect();
            Some(pairs.join("; "))
        };

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: channel.base_url.clone(),
            headers,
            cookie_header,
            extra_params: channel
                .params
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
            page_size,
        })
    }
}

impl OrderSource for StorefrontClient {
    fn name(&self) -> &str {
        "storefront"
    }

    /// Issue exactly one request for the period and classify the
    /// outcome. No retries: the walker treats transport and malformed
    /// outcomes as fatal for the run.
    fn fetch_month(&self, period: Period) -> MonthFetch {
        let mut query = self.extra_params.clone();
        query.push(("page".to_string(), "1".to_string()));
        query.push(("limit".to_string(), self.page_size.to_string()));
        query.push(("year".to_string(), period.year.to_string()));
        query.push(("month".to_string(), format!("{:02}", period.month)));

        let mut request = self
            .client
            .get(&self.base_url)
            .headers(self.headers.clone())
            .query(&query);
        if let Some(cookies) = &self.cookie_header {
            request = request.header(COOKIE, cookies);
        }

        let response = match request.send() {
            Ok(response) => response,
            Err(e) => {
                return MonthFetch::Transport {
                    error: describe_request_error(&e),
                }
            }
        };

        let status = response.status();
        if !status.is_success() {
            return MonthFetch::Transport {
                error: format!("HTTP {}", status),
            };
        }

        let body = match response.text() {
            Ok(body) => body,
            Err(e) => {
                return MonthFetch::Transport {
                    error: format!("Failed to read response body: {}", e),
                }
            }
        };

        classify_body(&body)
    }
}

/// Classify a 2xx response body.
///
/// Rules, in priority order: undecodable body is malformed; a success
/// flag with a non-empty order list carries orders; an explicit zero
/// count is an empty month; everything else is an unexpected shape and
/// stays malformed rather than guessing.
fn classify_body(body: &str) -> MonthFetch {
    let payload: OrdersPayload = match serde_json::from_str(body) {
        Ok(payload) => payload,
        Err(e) => {
            return MonthFetch::Malformed {
                reason: format!("Undecodable response: {}", e),
                excerpt: excerpt(body),
            }
        }
    };

    if payload.success == Some(1) && !payload.data.is_empty() {
        MonthFetch::Orders(payload.data)
    } else if payload.count == Some(0) {
        MonthFetch::Empty
    } else {
        MonthFetch::Malformed {
            reason: "Unexpected response shape".to_string(),
            excerpt: excerpt(body),
        }
    }
}

/// Map request errors to user-friendly messages
fn describe_request_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "Request timed out".to_string()
    } else if error.is_connect() {
        "Unable to connect to the storefront".to_string()
    } else {
        format!("Request failed: {}", error)
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}
