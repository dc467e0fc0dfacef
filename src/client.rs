use crate::company::CompanyApi;
use crate::config::Config;
use crate::email::EmailApi;
use crate::errors::{map_status, NymeriaError, Result};
use crate::legacy::LegacyApi;
use crate::person::PersonApi;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, Request, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// Header carrying the API key (`X-Api-Key`; header names are case-insensitive).
pub const API_KEY_HEADER: &str = "x-api-key";

/// Client for the Nymeria API.
///
/// Cheap to clone; clones share one connection pool and configuration, so a
/// single client can serve many concurrent callers.
#[derive(Clone)]
pub struct NymeriaClient {
    http: reqwest::Client,
    config: Arc<Config>,
}

impl NymeriaClient {
    /// Creates a new `NymeriaClient` using the timeout from `config`.
    pub fn new(config: Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Person search, enrichment, identification and retrieval.
    pub fn person(&self) -> PersonApi<'_> {
        PersonApi::new(self)
    }

    /// Company search and enrichment.
    pub fn company(&self) -> CompanyApi<'_> {
        CompanyApi::new(self)
    }

    /// Email verification.
    pub fn email(&self) -> EmailApi<'_> {
        EmailApi::new(self)
    }

    /// Endpoints of the status-string API generation.
    pub fn legacy(&self) -> LegacyApi<'_> {
        LegacyApi::new(self)
    }

    /// Builds a fully addressed request for `path` (which may already carry
    /// its query string), with the API key, content type and user agent
    /// headers and an optional JSON body.
    pub fn request<B>(&self, method: Method, path: &str, body: Option<&B>) -> Result<Request>
    where
        B: Serialize + ?Sized,
    {
        let url = Url::parse(&format!("{}{}", self.config.base_url, path))?;
        let mut request = Request::new(method, url);

        let mut headers = HeaderMap::with_capacity(3);
        headers.insert(
            HeaderName::from_static(API_KEY_HEADER),
            HeaderValue::from_str(self.config.api_key())
                .map_err(|_| NymeriaError::InvalidAuthKey)?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&self.config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static(crate::config::USER_AGENT)),
        );
        *request.headers_mut() = headers;

        if let Some(body) = body {
            *request.body_mut() = Some(serde_json::to_vec(body)?.into());
        }

        Ok(request)
    }

    /// Sends a request, maps the status code and decodes the JSON body.
    pub(crate) async fn call<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(method, path, body)?;
        tracing::debug!("Nymeria request: {} {}", request.method(), path);

        let response = self.http.execute(request).await?;
        let status = response.status();
        tracing::debug!("Nymeria response: {} for {}", status, path);
        map_status(status.as_u16())?;

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Sends a request and decodes the JSON body without consulting the
    /// status code. Legacy endpoints signal failure in the body instead.
    pub(crate) async fn call_unchecked<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(method, path, body)?;
        tracing::debug!("Nymeria legacy request: {} {}", request.method(), path);

        let response = self.http.execute(request).await?;
        tracing::debug!("Nymeria legacy response: {} for {}", response.status(), path);

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.call::<(), T>(Method::GET, path, None).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(Method::POST, path, Some(body)).await
    }
}
