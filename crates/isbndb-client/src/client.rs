// SPDX-License-Identifier: GPL-3.0-or-later

use crate::config::IsbndbConfig;
use crate::error::{IsbndbError, Result};
use crate::models::{
    Author, AuthorPage, Book, BookEnvelope, Publisher, PublisherPage, SearchPage, SearchQuery,
    SearchResults,
};
use crate::rate_limiter::RateLimiter;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, trace};
use url::Url;

const USER_AGENT: &str = concat!("isbndb-client/", env!("CARGO_PKG_VERSION"));

/// Delay applied when a throttled response carries no usable Retry-After.
const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// ISBNdb subscription plan, selecting the API host and request ceiling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Default,
    Premium,
    Pro,
}

impl Plan {
    /// API host serving this plan.
    pub fn base_url(self) -> &'static str {
        match self {
            Plan::Default => "https://api2.isbndb.com",
            Plan::Premium => "https://api.premium.isbndb.com",
            Plan::Pro => "https://api.pro.isbndb.com",
        }
    }

    /// Requests-per-second ceiling for this plan.
    pub fn requests_per_second(self) -> u32 {
        match self {
            Plan::Default => 1,
            Plan::Premium => 3,
            Plan::Pro => 5,
        }
    }

    /// Minimum spacing between consecutive requests under this plan.
    pub fn min_interval(self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.requests_per_second()))
    }
}

/// ISBNdb API client with per-plan rate limiting.
#[derive(Debug, Clone)]
pub struct IsbndbClient {
    client: Client,
    base_url: String,
    rate_limiter: RateLimiter,
}

impl IsbndbClient {
    /// Create a client on the default plan.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::builder(api_key).build()
    }

    /// Create a client builder for custom configuration.
    pub fn builder(api_key: impl Into<String>) -> IsbndbClientBuilder {
        IsbndbClientBuilder::new(api_key)
    }

    /// Build a client from a loaded configuration.
    pub fn from_config(config: &IsbndbConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_deref()
            .ok_or_else(|| IsbndbError::InvalidArgument("API key is not configured".to_string()))?;

        let mut builder = Self::builder(api_key)
            .plan(config.plan)
            .timeout(Duration::from_secs(config.timeout_secs));
        if let Some(base_url) = &config.base_url {
            builder = builder.base_url(base_url);
        }
        builder.build()
    }

    /// Look up a book by ISBN.
    ///
    /// # Arguments
    /// * `isbn` - ISBN-10 or ISBN-13 of the book.
    /// * `with_prices` - Also fetch current merchant price offers.
    ///
    /// # Example
    /// ```no_run
    /// # use isbndb_client::IsbndbClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = IsbndbClient::new("my-api-key")?;
    /// let book = client.get_book("9780134093413", false).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_book(&self, isbn: &str, with_prices: bool) -> Result<Book> {
        require_non_empty(isbn, "isbn")?;

        let mut url = self.endpoint(&["book", isbn])?;
        if with_prices {
            url.query_pairs_mut().append_pair("with_prices", "1");
        }

        let envelope: BookEnvelope = self.get(url.as_str()).await?;
        Ok(envelope.book)
    }

    /// Search books matching a query string.
    ///
    /// Results come back in the relevance order chosen by the API and are not
    /// re-sorted locally.
    ///
    /// # Arguments
    /// * `query` - Search query parameters (query string, page, page size,
    ///   language filter).
    ///
    /// # Example
    /// ```no_run
    /// # use isbndb_client::{IsbndbClient, SearchQuery};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = IsbndbClient::new("my-api-key")?;
    /// let query = SearchQuery::new("python programming").page_size(5);
    /// let results = client.search_books(query).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn search_books(&self, query: SearchQuery) -> Result<SearchResults> {
        require_non_empty(&query.query, "query")?;
        require_positive(query.page, "page")?;
        require_positive(query.page_size, "page_size")?;

        let mut url = self.endpoint(&["books", &query.query])?;
        url.query_pairs_mut().append_pair("query", &query.query);
        append_paging(&mut url, query.page, query.page_size);

        if let Some(language) = &query.language {
            url.query_pairs_mut().append_pair("language", language);
        }

        let page: SearchPage = self.get(url.as_str()).await?;
        Ok(SearchResults {
            total: page.total,
            books: page.books.into_iter().map(|entry| entry.book).collect(),
        })
    }

    /// Look up an author by name, with a paginated list of their books.
    ///
    /// # Example
    /// ```no_run
    /// # use isbndb_client::IsbndbClient;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = IsbndbClient::new("my-api-key")?;
    /// let author = client.get_author("Agatha Christie", Some(1), Some(20)).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_author(
        &self,
        name: &str,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<Author> {
        require_non_empty(name, "name")?;
        require_positive(page, "page")?;
        require_positive(page_size, "page_size")?;

        let mut url = self.endpoint(&["author", name])?;
        append_paging(&mut url, page, page_size);

        let payload: AuthorPage = self.get(url.as_str()).await?;
        Ok(Author {
            name: payload.author,
            total: payload.total,
            books: payload.books.into_iter().map(|entry| entry.book).collect(),
        })
    }

    /// Look up a publisher by name, with the ISBNs of their books.
    pub async fn get_publisher(
        &self,
        name: &str,
        page: Option<u32>,
        page_size: Option<u32>,
    ) -> Result<Publisher> {
        require_non_empty(name, "name")?;
        require_positive(page, "page")?;
        require_positive(page_size, "page_size")?;

        let mut url = self.endpoint(&["publisher", name])?;
        append_paging(&mut url, page, page_size);

        let payload: PublisherPage = self.get(url.as_str()).await?;
        Ok(Publisher {
            name: payload.name,
            books: payload.books.into_iter().map(|book| book.isbn).collect(),
        })
    }

    /// Build an endpoint URL, percent-encoding each path segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| IsbndbError::InvalidArgument(format!("invalid base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| IsbndbError::InvalidArgument("base URL cannot be a base".to_string()))?
            .extend(segments);
        Ok(url)
    }

    /// Perform a rate-limited GET, retrying exactly once when throttled.
    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.send(url).await?;

        if response.status() == 429 {
            let delay = retry_after_delay(response.headers());
            debug!(target: "isbndb", "throttled by API, retrying in {:?}", delay);
            sleep(delay).await;

            let response = self.send(url).await?;
            if response.status() == 429 {
                return Err(IsbndbError::RateLimitExhausted);
            }
            return decode(url, response).await;
        }

        decode(url, response).await
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response> {
        self.rate_limiter.acquire().await;

        trace!(target: "isbndb", "GET {}", url);

        Ok(self.client.get(url).send().await?)
    }
}

async fn decode<T: DeserializeOwned>(url: &str, response: reqwest::Response) -> Result<T> {
    let status = response.status();
    debug!(target: "isbndb", "response status: {}", status);

    if status == 404 {
        return Err(IsbndbError::NotFound(url.to_string()));
    }

    if !status.is_success() {
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(IsbndbError::ApiError {
            status: status.as_u16(),
            message,
        });
    }

    let body = response.text().await?;
    trace!(target: "isbndb", "response body: {}", body);

    serde_json::from_str(&body)
        .map_err(|e| IsbndbError::InvalidResponse(format!("Failed to parse response: {}", e)))
}

/// Seconds to wait before retrying a throttled request, from the Retry-After
/// header. Accepts whole or fractional seconds; falls back to one second when
/// the header is missing or unparsable.
pub(crate) fn retry_after_delay(headers: &HeaderMap) -> Duration {
    headers
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|secs| secs.is_finite() && *secs >= 0.0)
        .map(Duration::from_secs_f64)
        .unwrap_or(DEFAULT_RETRY_DELAY)
}

fn require_non_empty(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(IsbndbError::InvalidArgument(format!(
            "{} must not be empty",
            what
        )));
    }
    Ok(())
}

fn require_positive(value: Option<u32>, what: &str) -> Result<()> {
    if value == Some(0) {
        return Err(IsbndbError::InvalidArgument(format!(
            "{} must be at least 1",
            what
        )));
    }
    Ok(())
}

fn append_paging(url: &mut Url, page: Option<u32>, page_size: Option<u32>) {
    if let Some(page) = page {
        url.query_pairs_mut().append_pair("page", &page.to_string());
    }
    if let Some(page_size) = page_size {
        url.query_pairs_mut()
            .append_pair("pageSize", &page_size.to_string());
    }
}

/// Builder for configuring an ISBNdb client.
#[derive(Debug)]
pub struct IsbndbClientBuilder {
    api_key: String,
    plan: Plan,
    base_url: Option<String>,
    timeout: Duration,
    rate_limit_interval: Option<Duration>,
}

impl IsbndbClientBuilder {
    fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            plan: Plan::Default,
            base_url: None,
            timeout: Duration::from_secs(30),
            rate_limit_interval: None,
        }
    }

    /// Set the subscription plan.
    pub fn plan(mut self, plan: Plan) -> Self {
        self.plan = plan;
        self
    }

    /// Set a custom base URL (useful for testing with mock servers).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set request timeout duration.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Override the spacing between requests (defaults to the plan interval).
    pub fn rate_limit_interval(mut self, interval: Duration) -> Self {
        self.rate_limit_interval = Some(interval);
        self
    }

    /// Build the ISBNdb client.
    pub fn build(self) -> Result<IsbndbClient> {
        require_non_empty(&self.api_key, "api_key")?;

        let mut headers = HeaderMap::new();
        let auth = HeaderValue::from_str(&self.api_key).map_err(|_| {
            IsbndbError::InvalidArgument("API key is not a valid header value".to_string())
        })?;
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        let rate_limiter = match self.rate_limit_interval {
            Some(interval) => RateLimiter::new(interval),
            None => RateLimiter::for_plan(self.plan),
        };

        Ok(IsbndbClient {
            client,
            base_url: self
                .base_url
                .unwrap_or_else(|| self.plan.base_url().to_string()),
            rate_limiter,
        })
    }
}
