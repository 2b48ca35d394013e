//! Authenticated REST client and its factory.

use crate::api::failure::RemoteFailure;
use crate::api::uri::{agile_uri, classic_uri, Endpoint};
use crate::config::ConfigRecord;
use crate::error::ApiError;
use crate::settings::HttpSettings;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, Proxy};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// How the HTTP transport reaches the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportRoute {
    /// Straight to the host; environment proxy variables are ignored.
    Direct,
    /// Every request goes through the given proxy URI.
    Proxy(String),
}

/// Method, query string and JSON body of a single request.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub query: Option<String>,
    pub body: Option<Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self {
            method: Method::GET,
            query: None,
            body: None,
        }
    }

    pub fn post(body: Value) -> Self {
        Self {
            method: Method::POST,
            query: None,
            body: Some(body),
        }
    }

    pub fn put(body: Value) -> Self {
        Self {
            method: Method::PUT,
            query: None,
            body: Some(body),
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = Some(query.into());
        self
    }
}

/// The one authenticated client of a session, bound to a record's host,
/// protocol, credentials, API version and SSL policy.
pub struct JiraClient {
    http: Client,
    endpoint: Endpoint,
    api_version: String,
    username: String,
    password: String,
    route: TransportRoute,
}

impl std::fmt::Debug for JiraClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraClient")
            .field("endpoint", &self.endpoint)
            .field("api_version", &self.api_version)
            .field("username", &self.username)
            .field("route", &self.route)
            .finish_non_exhaustive()
    }
}

/// Turns a loaded configuration record into a client.
pub struct ClientFactory;

impl ClientFactory {
    /// Build the client. The proxy setting is the only axis construction varies on.
    pub fn build(record: &ConfigRecord, http: &HttpSettings) -> Result<JiraClient, ApiError> {
        let endpoint = Endpoint::parse(record.protocol, &record.host)?;

        let mut builder = Client::builder().user_agent(http.user_agent.clone());
        if let Some(secs) = http.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = http.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if !record.strict_ssl {
            warn!(host = %endpoint, "strictSSL is disabled; certificates will not be verified");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let proxy = record
            .proxy
            .as_deref()
            .map(str::trim)
            .filter(|proxy| !proxy.is_empty());
        let route = match proxy {
            Some(proxy) => {
                let scheme = Proxy::all(proxy).map_err(|source| ApiError::InvalidProxy {
                    proxy: proxy.to_string(),
                    source,
                })?;
                builder = builder.proxy(scheme);
                TransportRoute::Proxy(proxy.to_string())
            }
            None => {
                builder = builder.no_proxy();
                TransportRoute::Direct
            }
        };

        let client = builder.build().map_err(ApiError::ClientBuild)?;
        info!(host = %endpoint, route = ?route, "Jira client constructed");

        Ok(JiraClient {
            http: client,
            endpoint,
            api_version: record.api_version.clone(),
            username: record.username.clone(),
            password: record.password.clone(),
            route,
        })
    }
}

impl JiraClient {
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn route(&self) -> &TransportRoute {
        &self.route
    }

    pub fn classic_uri(&self, pathname: &str, query: Option<&str>) -> String {
        classic_uri(&self.endpoint, &self.api_version, pathname, query)
    }

    pub fn agile_uri(&self, pathname: &str, query: Option<&str>) -> String {
        agile_uri(&self.endpoint, pathname, query)
    }

    /// Browser URL of an issue.
    pub fn browse_url(&self, issue_key: &str) -> String {
        format!(
            "{}/browse/{}",
            self.endpoint.origin(),
            crate::api::uri::encode_segment(issue_key)
        )
    }

    /// Send a request to a fully built URI. Non-success statuses are classified;
    /// an empty success body decodes to `Value::Null`.
    pub async fn send(&self, uri: &str, options: &RequestOptions) -> Result<Value, RemoteFailure> {
        let mut request = self
            .http
            .request(options.method.clone(), uri)
            .basic_auth(&self.username, Some(&self.password))
            .header(ACCEPT, "application/json");
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        debug!(method = %options.method, uri, "Sending Jira request");
        let response = request
            .send()
            .await
            .map_err(|e| RemoteFailure::transport(&e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RemoteFailure::transport(&e))?;
        debug!(method = %options.method, uri, status = status.as_u16(), "Jira response received");

        if !status.is_success() {
            warn!(method = %options.method, uri, status = status.as_u16(), "Jira request failed");
            return Err(RemoteFailure::classify(status.as_u16(), &text));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text)
            .map_err(|e| RemoteFailure::Unknown(format!("Failed to parse response: {}", e)))
    }
}
