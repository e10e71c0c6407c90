//! HTTP client for the customer REST API

use crate::{ClientConfig, ClientError, ClientResult};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::response::{
    InvoiceListResponse, OrderListResponse, ProductListResponse, SubmitOrderResponse,
};
use shared::{CustomerInvoice, CustomerOrder, OrderDraft, Product};

/// HTTP client for making network requests to the billing backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.clone(),
            token: config.token.clone(),
        }
    }

    /// Set the session token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    /// Make a GET request and decode the response body
    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> ClientResult<(StatusCode, T)> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");
        let mut request = self.client.get(url).query(query);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::decode(response).await
    }

    /// Make a POST request with JSON body and decode the response body
    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<(StatusCode, T)> {
        let url = self.url(path);
        tracing::debug!(%url, "POST");
        let mut request = self.client.post(url).json(body);

        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        Self::decode(response).await
    }

    /// Decode a response body, classifying failures
    ///
    /// Reads the body as text first so a non-JSON body (proxy error
    /// page, stack trace) can be reported with its raw snippet instead
    /// of a bare parse error. Non-2xx statuses are resolved by the
    /// caller, which knows the envelope's error fields.
    async fn decode<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> ClientResult<(StatusCode, T)> {
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthorized);
        }

        let text = response.text().await?;
        let parsed = serde_json::from_str::<T>(&text).map_err(|_| {
            tracing::warn!(status = status.as_u16(), "non-JSON response body");
            ClientError::malformed(status.as_u16(), &text)
        })?;
        Ok((status, parsed))
    }

    /// Resolve the envelope's success flag against the HTTP status
    fn accept(status: StatusCode, success: bool, error: Option<String>) -> ClientResult<()> {
        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: error.unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
            });
        }
        if !success {
            return Err(ClientError::Rejected(
                error.unwrap_or_else(|| "request rejected".to_string()),
            ));
        }
        Ok(())
    }

    // ========== Customer API ==========

    /// Fetch the product catalog, optionally filtered by a search term
    pub async fn products(&self, search: Option<&str>) -> ClientResult<Vec<Product>> {
        let query: Vec<(&str, &str)> = match search {
            Some(term) if !term.is_empty() => vec![("search", term)],
            _ => vec![],
        };

        let (status, envelope): (_, ProductListResponse) =
            self.get("/customer-auth/products", &query).await?;
        Self::accept(status, envelope.success, envelope.error)?;
        Ok(envelope.products)
    }

    /// Fetch the customer's order history
    pub async fn orders(&self) -> ClientResult<Vec<CustomerOrder>> {
        let (status, envelope): (_, OrderListResponse) =
            self.get("/customer-auth/orders", &[]).await?;
        Self::accept(status, envelope.success, envelope.error)?;
        Ok(envelope.orders)
    }

    /// Fetch the customer's invoice history
    pub async fn invoices(&self) -> ClientResult<Vec<CustomerInvoice>> {
        let (status, envelope): (_, InvoiceListResponse) =
            self.get("/customer-auth/invoices", &[]).await?;
        Self::accept(status, envelope.success, envelope.error)?;
        Ok(envelope.invoices)
    }

    /// Submit an order built from the cart
    pub async fn submit_order(&self, draft: &OrderDraft) -> ClientResult<SubmitOrderResponse> {
        let (status, envelope): (_, SubmitOrderResponse) =
            self.post("/customer-auth/orders", draft).await?;

        if !status.is_success() {
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: envelope.error_text(),
            });
        }
        if !envelope.success {
            return Err(ClientError::Rejected(envelope.error_text()));
        }
        Ok(envelope)
    }
}
