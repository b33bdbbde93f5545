//! `reqwest`-backed content API client.

use crate::config::RemoteConfig;
use crate::model::catalog::{CatalogEntry, CatalogKind};
use crate::model::employee::EmployeeId;
use crate::repo::content_api::{ContentApi, RemoteError};
use crate::repo::wire::{
    CatalogResource, EmployeePage, EmployeePayload, EmployeeResource, Envelope, PagedEnvelope,
    Resource,
};
use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::IgnoredAny;
use serde_json::Value;

const EMPLOYEE_COLLECTION: &str = "employees";
const EMPLOYEE_RELATIONS: &str = "department,position";

/// HTTP client for the remote content API.
#[derive(Debug, Clone)]
pub struct HttpContentApi {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

impl HttpContentApi {
    /// Builds a client from remote settings.
    ///
    /// # Errors
    /// - Returns `RemoteError::Transport` when the TLS backend fails to
    ///   initialize.
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_token: config.api_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let builder = self.client.request(method, url);
        match self.api_token.as_deref() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

/// Sends a request and converts non-success statuses into `RemoteError`.
pub(crate) async fn send_checked(builder: RequestBuilder) -> Result<Response, RemoteError> {
    let response = builder.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body)
        .or_else(|| status.canonical_reason().map(str::to_string))
        .unwrap_or_else(|| "request failed".to_string());
    warn!(
        "event=content_api_request module=repo status=error http_status={}",
        status.as_u16()
    );
    Err(RemoteError::status(status.as_u16(), message))
}

/// Extracts `error.message` from a content API error body.
pub(crate) fn error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .pointer("/error/message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[async_trait]
impl ContentApi for HttpContentApi {
    async fn fetch_employees(&self, page: u32, page_size: u32) -> Result<EmployeePage, RemoteError> {
        let page = page.to_string();
        let page_size = page_size.to_string();
        let request = self.request(Method::GET, EMPLOYEE_COLLECTION).query(&[
            ("populate", EMPLOYEE_RELATIONS),
            ("pagination[page]", page.as_str()),
            ("pagination[pageSize]", page_size.as_str()),
        ]);
        let envelope: PagedEnvelope<EmployeeResource> = send_checked(request).await?.json().await?;
        let fetched = EmployeePage::from(envelope);
        debug!(
            "event=content_api_fetch module=repo status=ok collection={} page={} page_count={} count={}",
            EMPLOYEE_COLLECTION,
            page,
            fetched.page_count,
            fetched.records.len()
        );
        Ok(fetched)
    }

    async fn create_employee(&self, payload: &EmployeePayload) -> Result<EmployeeId, RemoteError> {
        let request = self
            .request(Method::POST, EMPLOYEE_COLLECTION)
            .json(&Envelope { data: payload });
        let envelope: Envelope<Resource<IgnoredAny>> = send_checked(request).await?.json().await?;
        Ok(EmployeeId::new(envelope.data.id.0))
    }

    async fn update_employee(
        &self,
        id: &EmployeeId,
        payload: &EmployeePayload,
    ) -> Result<(), RemoteError> {
        let request = self
            .request(Method::PUT, &format!("{EMPLOYEE_COLLECTION}/{id}"))
            .json(&Envelope { data: payload });
        send_checked(request).await?;
        Ok(())
    }

    async fn delete_employee(&self, id: &EmployeeId) -> Result<(), RemoteError> {
        let request = self.request(Method::DELETE, &format!("{EMPLOYEE_COLLECTION}/{id}"));
        send_checked(request).await?;
        Ok(())
    }

    async fn fetch_catalog(
        &self,
        kind: CatalogKind,
        page_size: u32,
    ) -> Result<Vec<CatalogEntry>, RemoteError> {
        let page_size = page_size.to_string();
        let request = self
            .request(Method::GET, kind.collection())
            .query(&[("pagination[pageSize]", page_size.as_str())]);
        let envelope: Envelope<Vec<CatalogResource>> = send_checked(request).await?.json().await?;
        Ok(envelope.data.into_iter().map(CatalogEntry::from).collect())
    }
}
