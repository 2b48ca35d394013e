//! Request URI construction for the classic and agile REST surfaces.
//!
//! Both builders are pure functions of the connection endpoint, the pathname
//! and an optional query string. Callers supply a pathname starting with `/`.

use crate::config::Protocol;
use crate::error::ApiError;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Url;
use std::fmt;

/// Root of the agile (board/sprint) surface. Versioned independently of the classic API.
pub const AGILE_API_PATH: &str = "/rest/agile/1.0";

/// Characters left intact when a value is embedded as a single path segment.
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Protocol, hostname and optional port of the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub protocol: Protocol,
    pub host: String,
    pub port: Option<u16>,
}

impl Endpoint {
    /// Parse a configured host (`example.atlassian.net` or `jira.local:8080`).
    pub fn parse(protocol: Protocol, host: &str) -> Result<Self, ApiError> {
        let trimmed = host.trim();
        let invalid = || ApiError::InvalidEndpoint(host.to_string());

        let url = Url::parse(&format!("{}://{}", protocol, trimmed)).map_err(|_| invalid())?;
        let hostname = url
            .host_str()
            .filter(|name| !name.is_empty())
            .ok_or_else(invalid)?;
        if url.path() != "/" || url.query().is_some() || !url.username().is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            protocol,
            host: hostname.to_string(),
            port: url.port(),
        })
    }

    /// `protocol://host[:port]` with no trailing slash.
    pub fn origin(&self) -> String {
        match self.port {
            Some(port) => format!("{}://{}:{}", self.protocol, self.host, port),
            None => format!("{}://{}", self.protocol, self.host),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.origin())
    }
}

/// Classic surface: `origin + /rest/api/{api_version} + pathname [?query]`.
pub fn classic_uri(
    endpoint: &Endpoint,
    api_version: &str,
    pathname: &str,
    query: Option<&str>,
) -> String {
    let mut uri = format!("{}/rest/api/{}{}", endpoint.origin(), api_version, pathname);
    append_query(&mut uri, query);
    uri
}

/// Agile surface: `origin + /rest/agile/1.0 + pathname [?query]`, percent-decoded once.
///
/// The URI is normalized (encoded) first and decoded afterwards, so query
/// fragments the caller already encoded come out verbatim.
pub fn agile_uri(endpoint: &Endpoint, pathname: &str, query: Option<&str>) -> String {
    let mut raw = format!("{}{}{}", endpoint.origin(), AGILE_API_PATH, pathname);
    append_query(&mut raw, query);

    let encoded = match Url::parse(&raw) {
        Ok(url) => url.to_string(),
        Err(_) => raw,
    };
    percent_decode_str(&encoded).decode_utf8_lossy().into_owned()
}

/// Encode a user-supplied value (issue key, project key) as one path segment.
pub fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

fn append_query(uri: &mut String, query: Option<&str>) {
    let query = query
        .map(|q| q.trim().trim_start_matches('?'))
        .filter(|q| !q.is_empty());
    if let Some(query) = query {
        uri.push('?');
        uri.push_str(query);
    }
}
