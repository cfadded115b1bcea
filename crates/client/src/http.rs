//! Blocking HTTP delegate for the inventory REST service.
//!
//! Resource layout, relative to the configured host:
//!
//! - `GET    /health`
//! - `GET    /products`
//! - `POST   /products`
//! - `GET    /products/{id}`
//! - `PUT    /products/{id}`
//! - `DELETE /products/{id}`

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Method, StatusCode, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use stockline_core::{
    Deleted, InventoryError, InventoryResult, ProductId, ProductRecord, ServiceHealth,
};
use tracing::debug;

use crate::api::InventoryApi;
use crate::config::ClientConfig;

/// Header carrying the client secret.
pub const API_KEY_HEADER: &str = "x-api-key";

const HEALTH_PATH: &str = "health";
const PRODUCTS_PATH: &str = "products";

/// [`InventoryApi`] over HTTP, using a blocking `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpInventoryApi {
    config: ClientConfig,
    http: Client,
    headers: HeaderMap,
}

/// `GET /products` answers either a bare array or `{"products": [...]}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum ProductList {
    Bare(Vec<ProductRecord>),
    Wrapped { products: Vec<ProductRecord> },
}

impl ProductList {
    fn into_records(self) -> Vec<ProductRecord> {
        match self {
            Self::Bare(records) | Self::Wrapped { products: records } => records,
        }
    }
}

impl HttpInventoryApi {
    pub fn new(config: ClientConfig) -> InventoryResult<Self> {
        let headers = default_headers(&config)?;

        let http = Client::builder()
            .default_headers(headers.clone())
            .timeout(config.timeout())
            .build()
            .map_err(|e| InventoryError::configuration(format!("build http client: {e}")))?;

        Ok(Self {
            config,
            http,
            headers,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Headers attached to every request this delegate sends.
    pub fn default_headers(&self) -> &HeaderMap {
        &self.headers
    }

    fn url(&self, segments: &[&str]) -> InventoryResult<Url> {
        resource_url(self.config.host(), segments)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "building inventory request");
        self.http.request(method, url)
    }

    /// Send a request and turn non-success statuses into errors.
    ///
    /// `subject` names what a 404 refers to.
    fn execute(&self, request: RequestBuilder, subject: &str) -> InventoryResult<Response> {
        let response = request
            .send()
            .map_err(|e| InventoryError::transport(format!("request failed: {e}")))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = body_or_read_error(response.text());
        debug!(%status, subject, "inventory request rejected");
        Err(error_for_status(status, subject, body))
    }
}

impl InventoryApi for HttpInventoryApi {
    fn check_health(&self) -> InventoryResult<ServiceHealth> {
        let url = self.url(&[HEALTH_PATH])?;
        let response = self.execute(self.request(Method::GET, url), HEALTH_PATH)?;
        decode(response)
    }

    fn create_product(&self, product: ProductRecord) -> InventoryResult<ProductRecord> {
        let url = self.url(&[PRODUCTS_PATH])?;
        let response = self.execute(
            self.request(Method::POST, url).json(&product),
            PRODUCTS_PATH,
        )?;
        decode(response)
    }

    fn list_products(&self) -> InventoryResult<Vec<ProductRecord>> {
        let url = self.url(&[PRODUCTS_PATH])?;
        let response = self.execute(self.request(Method::GET, url), PRODUCTS_PATH)?;
        decode::<ProductList>(response).map(ProductList::into_records)
    }

    fn get_product(&self, id: &ProductId) -> InventoryResult<ProductRecord> {
        let url = self.url(&[PRODUCTS_PATH, id.as_str()])?;
        let response = self.execute(self.request(Method::GET, url), id.as_str())?;
        decode(response)
    }

    fn update_product(&self, product: ProductRecord) -> InventoryResult<ProductRecord> {
        let id = product
            .id()
            .ok_or_else(|| InventoryError::validation("product record must include an id"))?;

        let url = self.url(&[PRODUCTS_PATH, id.as_str()])?;
        let response = self.execute(
            self.request(Method::PUT, url).json(&product),
            id.as_str(),
        )?;
        decode(response)
    }

    fn delete_product(&self, id: &ProductId) -> InventoryResult<Deleted> {
        let url = self.url(&[PRODUCTS_PATH, id.as_str()])?;
        self.execute(self.request(Method::DELETE, url), id.as_str())?;
        Ok(Deleted { id: id.clone() })
    }
}

/// Headers derived from the config; empty when `use_empty_header` is set.
fn default_headers(config: &ClientConfig) -> InventoryResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    if config.use_empty_header() {
        return Ok(headers);
    }

    let mut api_key = HeaderValue::from_str(config.client_secret()).map_err(|_| {
        InventoryError::configuration("client secret is not a valid header value")
    })?;
    api_key.set_sensitive(true);

    headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("application/json"),
    );
    Ok(headers)
}

/// Append path segments to the host, keeping any base path and
/// percent-encoding each segment.
fn resource_url(host: &Url, segments: &[&str]) -> InventoryResult<Url> {
    let mut url = host.clone();
    {
        let mut path = url.path_segments_mut().map_err(|_| {
            InventoryError::configuration(format!("inventory host '{host}' cannot be a base URL"))
        })?;
        path.pop_if_empty();
        path.extend(segments);
    }
    Ok(url)
}

fn error_for_status(status: StatusCode, subject: &str, body: String) -> InventoryError {
    match status {
        StatusCode::NOT_FOUND => InventoryError::not_found(subject),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            if body.trim().is_empty() {
                InventoryError::validation(status.to_string())
            } else {
                InventoryError::validation(body)
            }
        }
        _ => InventoryError::transport(format!("HTTP {}: {}", status.as_u16(), body)),
    }
}

/// Error bodies are best effort; a failed read is reported in their place.
fn body_or_read_error<E: std::fmt::Display>(body: Result<String, E>) -> String {
    body.unwrap_or_else(|e| format!("<failed to read response body: {e}>"))
}

fn decode<T: DeserializeOwned>(response: Response) -> InventoryResult<T> {
    response
        .json::<T>()
        .map_err(|e| InventoryError::transport(format!("invalid response body: {e}")))
}
