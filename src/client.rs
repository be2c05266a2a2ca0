//! Autotask API client.
//!
//! Low-level HTTP client that handles authentication, JSON decoding, and
//! pagination. Higher-level operations are implemented via traits on entity
//! types.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::error::{AutotaskError, Result};
use crate::filter::Search;
use crate::record::{ItemRef, Record};

const USER_AGENT: &str = concat!("autotask-api/", env!("CARGO_PKG_VERSION"));

/// Requests hang indefinitely without this; the vendor's slowest sane
/// responses are multi-page queries well under this bound.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum pages to follow on a single query (safety limit).
const MAX_PAGES: u32 = 1000;

/// Transient read failures are retried this many additional times.
const READ_RETRIES: u32 = 2;
const RETRY_DELAY: Duration = Duration::from_millis(500);

/// Static credentials identifying an Autotask API integration.
///
/// Sent as the `ApiIntegrationCode`, `UserName`, and `Secret` headers on
/// every request. Immutable once the client is constructed; there is no
/// token exchange or renewal.
#[derive(Clone)]
pub struct Credentials {
    pub host: String,
    pub username: String,
    pub secret: String,
    pub integration_code: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("host", &self.host)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    pub fn new(
        host: impl Into<String>,
        username: impl Into<String>,
        secret: impl Into<String>,
        integration_code: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            username: username.into(),
            secret: secret.into(),
            integration_code: integration_code.into(),
        }
    }

    /// Read credentials from the `AUTOTASK_HOST`, `AUTOTASK_USERNAME`,
    /// `AUTOTASK_SECRET`, and `AUTOTASK_INTEGRATION_CODE` environment
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any of the variables is not set.
    pub fn from_env() -> Result<Self> {
        fn var(name: &str) -> Result<String> {
            env::var(name).map_err(|_| {
                AutotaskError::ConfigMissing(format!("{name} environment variable not set"))
            })
        }

        Ok(Self {
            host: var("AUTOTASK_HOST")?,
            username: var("AUTOTASK_USERNAME")?,
            secret: var("AUTOTASK_SECRET")?,
            integration_code: var("AUTOTASK_INTEGRATION_CODE")?,
        })
    }
}

/// Result of a raw read: either a merged paged collection or a single
/// decoded entity.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// The body carried an `items` collection; all pages merged in fetch
    /// order.
    Items(Vec<Record>),
    /// Any other body, returned as-is.
    Entity(Record),
}

impl Payload {
    /// Unwrap a paged collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the response was a single entity.
    pub fn into_items(self) -> Result<Vec<Record>> {
        match self {
            Self::Items(items) => Ok(items),
            Self::Entity(_) => Err(AutotaskError::UnexpectedResponse(
                "expected an items collection, got a single entity".to_string(),
            )),
        }
    }

    /// Unwrap a single entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the response was a paged collection.
    pub fn into_entity(self) -> Result<Record> {
        match self {
            Self::Entity(record) => Ok(record),
            Self::Items(_) => Err(AutotaskError::UnexpectedResponse(
                "expected a single entity, got an items collection".to_string(),
            )),
        }
    }
}

/// Low-level Autotask API client.
///
/// Owns the base URL and the static auth header set, and exposes the three
/// request primitives: [`read`](Self::read) (GET), [`create`](Self::create)
/// (POST), and [`update`](Self::update) (PATCH). Entity-specific operations
/// are implemented via the `Query`, `Create`, and `Update` traits on entity
/// types.
///
/// This struct is cheaply cloneable; clones reference the same underlying
/// connection pool.
///
/// # Example
///
/// ```no_run
/// use autotask_api::{AutotaskClient, Credentials};
///
/// # async fn example() -> autotask_api::Result<()> {
/// // Create from environment variables
/// let client = AutotaskClient::from_env()?;
///
/// // Or configure manually
/// let creds = Credentials::new("webservices5.autotask.net", "api@example.com", "s3cret", "INTEGRATION");
/// let client = AutotaskClient::new(&creds)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AutotaskClient {
    http: Client,
    base_url: Arc<Url>,
}

impl std::fmt::Debug for AutotaskClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutotaskClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl AutotaskClient {
    /// Create a client from environment variables (see
    /// [`Credentials::from_env`]).
    pub fn from_env() -> Result<Self> {
        Self::new(&Credentials::from_env()?)
    }

    /// Create a client for the zone host in the credentials.
    ///
    /// The base URL is `https://<host>/ATServicesRest/V1.0/`.
    ///
    /// # Errors
    ///
    /// Returns an error if the host does not form a valid URL or the
    /// credentials contain characters not permitted in HTTP headers.
    pub fn new(credentials: &Credentials) -> Result<Self> {
        let base_url = format!("https://{}/ATServicesRest/V1.0/", credentials.host);
        Self::with_base_url(credentials, &base_url)
    }

    /// Create a client against an explicit base URL.
    ///
    /// Useful for non-standard zone routing and for pointing the client at
    /// a local test server.
    pub fn with_base_url(credentials: &Credentials, base_url: &str) -> Result<Self> {
        Self::with_timeout(credentials, base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit per-request timeout.
    pub fn with_timeout(
        credentials: &Credentials,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self> {
        // Ensure base URL ends with / so joins keep the API prefix
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str)?;

        let mut headers = HeaderMap::new();
        headers.insert(
            "ApiIntegrationCode",
            header_value("ApiIntegrationCode", &credentials.integration_code)?,
        );
        headers.insert("UserName", header_value("UserName", &credentials.username)?);
        let mut secret = header_value("Secret", &credentials.secret)?;
        secret.set_sensitive(true);
        headers.insert("Secret", secret);

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(timeout)
            .build()
            .map_err(AutotaskError::Http)?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Make a GET request against a path relative to the base URL.
    ///
    /// A body carrying an `items` key is treated as a paged collection:
    /// `pageDetails.nextPageUrl` links are followed and the pages' items
    /// appended in fetch order. Any other body is returned unmodified.
    #[tracing::instrument(skip(self))]
    pub async fn read(&self, path: &str) -> Result<Payload> {
        let url = self.base_url.join(path)?;
        let first = self.get_value(url).await?;

        if first.get("items").is_none() {
            return Ok(Payload::Entity(Record::from_value(first)?));
        }
        Ok(Payload::Items(self.collect_pages(first).await?))
    }

    /// Run a filtered list query against an entity endpoint, merging all
    /// pages.
    #[tracing::instrument(skip(self, search))]
    pub async fn query(&self, endpoint: &str, search: &Search) -> Result<Vec<Record>> {
        let mut url = self.base_url.join(&format!("{endpoint}/query"))?;
        url.query_pairs_mut()
            .append_pair("search", &search.to_query()?);

        let first = self.get_value(url).await?;
        if first.get("items").is_none() {
            return Err(AutotaskError::UnexpectedResponse(format!(
                "query response for {endpoint} has no items collection"
            )));
        }
        self.collect_pages(first).await
    }

    /// Make a POST request creating a new entity record.
    ///
    /// Never retried: a create is not idempotent.
    #[tracing::instrument(skip(self, payload))]
    pub async fn create<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        payload: &B,
    ) -> Result<ItemRef> {
        let url = self.base_url.join(endpoint)?;
        let response = self
            .http
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(AutotaskError::Http)?;
        let value = Self::decode(response).await?;
        Self::item_ref(endpoint, value)
    }

    /// Make a PATCH request updating an existing entity record.
    ///
    /// The record id travels in the body, per the vendor's update contract.
    #[tracing::instrument(skip(self, payload))]
    pub async fn update<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        payload: &B,
    ) -> Result<ItemRef> {
        let url = self.base_url.join(endpoint)?;
        let response = self
            .http
            .patch(url)
            .json(payload)
            .send()
            .await
            .map_err(AutotaskError::Http)?;
        let value = Self::decode(response).await?;
        Self::item_ref(endpoint, value)
    }

    /// Fetch an entity's standard-field metadata
    /// (`<endpoint>/entityInformation/fields`).
    pub async fn field_info(&self, endpoint: &str) -> Result<Vec<Record>> {
        self.entity_information(endpoint, "fields").await
    }

    /// Fetch an entity's user-defined-field metadata
    /// (`<endpoint>/entityInformation/userDefinedFields`).
    pub async fn udf_info(&self, endpoint: &str) -> Result<Vec<Record>> {
        self.entity_information(endpoint, "userDefinedFields").await
    }

    async fn entity_information(&self, endpoint: &str, kind: &str) -> Result<Vec<Record>> {
        let path = format!("{endpoint}/entityInformation/{kind}");
        let mut record = self.read(&path).await?.into_entity()?;
        let fields = record.remove("fields").ok_or_else(|| {
            AutotaskError::UnexpectedResponse(format!("{path} response has no fields key"))
        })?;
        Ok(serde_json::from_value(fields)?)
    }

    /// Follow `pageDetails.nextPageUrl` links, appending each page's items
    /// in fetch order. A failed later page fails the whole call.
    async fn collect_pages(&self, first: Value) -> Result<Vec<Record>> {
        let mut page: QueryPage = serde_json::from_value(first)?;
        let mut items = std::mem::take(&mut page.items);
        let mut fetched = 1u32;

        while let Some(next) = page.next_page_url() {
            if fetched >= MAX_PAGES {
                tracing::warn!("reached pagination limit of {MAX_PAGES} pages, stopping");
                break;
            }
            let url = Url::parse(&next)?;
            let value = self.get_value(url).await?;
            page = serde_json::from_value(value)?;
            items.append(&mut page.items);
            fetched += 1;
        }

        Ok(items)
    }

    /// GET and decode, retrying transient failures.
    ///
    /// Reads are idempotent, so a timeout, connect failure, or 5xx is
    /// retried a bounded number of times. API-level errors never retry.
    async fn get_value(&self, url: Url) -> Result<Value> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let result = async {
                let response = self
                    .http
                    .get(url.clone())
                    .send()
                    .await
                    .map_err(AutotaskError::Http)?;
                Self::decode(response).await
            }
            .await;

            match result {
                Ok(value) => return Ok(value),
                Err(err) if attempt <= READ_RETRIES && is_transient(&err) => {
                    tracing::warn!(%url, attempt, error = %err, "retrying read");
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Decode a response body, surfacing API-level errors.
    ///
    /// A decoded body carrying an `errors` key fails with the vendor
    /// payload verbatim, whatever the HTTP status. A non-2xx status without
    /// one is a transport error.
    async fn decode(response: Response) -> Result<Value> {
        let status = response.status();
        let status_error = response.error_for_status_ref().err();
        let body = response.text().await.map_err(AutotaskError::Http)?;

        match serde_json::from_str::<Value>(&body) {
            Ok(value) => {
                if let Some(errors) = value.get("errors") {
                    let errors = match errors {
                        Value::Array(list) => list.clone(),
                        other => vec![other.clone()],
                    };
                    return Err(AutotaskError::Api {
                        errors,
                        status_code: Some(status.as_u16()),
                    });
                }
                match status_error {
                    Some(err) => Err(AutotaskError::Http(err)),
                    None => Ok(value),
                }
            }
            Err(json_err) => match status_error {
                Some(err) => Err(AutotaskError::Http(err)),
                None => Err(AutotaskError::Json(json_err)),
            },
        }
    }

    fn item_ref(endpoint: &str, value: Value) -> Result<ItemRef> {
        serde_json::from_value(value).map_err(|_| {
            AutotaskError::UnexpectedResponse(format!(
                "write response for {endpoint} has no itemId"
            ))
        })
    }
}

fn header_value(name: &str, value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| {
        AutotaskError::ConfigMissing(format!(
            "{name} contains characters not permitted in an HTTP header"
        ))
    })
}

fn is_transient(err: &AutotaskError) -> bool {
    match err {
        AutotaskError::Http(err) => {
            err.is_timeout()
                || err.is_connect()
                || err.status().map_or(false, |s| s.is_server_error())
        }
        _ => false,
    }
}

/// Envelope of one page of a list query.
#[derive(Debug, Deserialize)]
struct QueryPage {
    #[serde(default)]
    items: Vec<Record>,
    #[serde(rename = "pageDetails", default)]
    page_details: Option<PageDetails>,
}

#[derive(Debug, Deserialize)]
struct PageDetails {
    #[serde(rename = "nextPageUrl", default)]
    next_page_url: Option<String>,
}

impl QueryPage {
    fn next_page_url(&self) -> Option<String> {
        self.page_details
            .as_ref()?
            .next_page_url
            .clone()
            .filter(|url| !url.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> Credentials {
        Credentials::new("example.autotask.net", "api@example.com", "hunter2", "CODE")
    }

    #[test]
    fn test_base_url_derived_from_host() {
        let client = AutotaskClient::new(&credentials()).unwrap();
        assert_eq!(
            client.base_url().as_str(),
            "https://example.autotask.net/ATServicesRest/V1.0/"
        );
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client1 = AutotaskClient::with_base_url(&credentials(), "https://host/api").unwrap();
        let client2 = AutotaskClient::with_base_url(&credentials(), "https://host/api/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn test_debug_never_reveals_secret() {
        let client = AutotaskClient::new(&credentials()).unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("AutotaskClient"));
        assert!(!debug.contains("hunter2"));

        let debug = format!("{:?}", credentials());
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_next_page_url_ignores_empty_links() {
        let page: QueryPage =
            serde_json::from_value(serde_json::json!({"items": [], "pageDetails": {"nextPageUrl": ""}}))
                .unwrap();
        assert_eq!(page.next_page_url(), None);

        let page: QueryPage =
            serde_json::from_value(serde_json::json!({"items": [], "pageDetails": {"nextPageUrl": null}}))
                .unwrap();
        assert_eq!(page.next_page_url(), None);
    }
}
