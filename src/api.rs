//! Jira REST access
//!
//! Builds the single authenticated client for a loaded configuration record,
//! constructs request URIs for the classic (`/rest/api/{version}`) and agile
//! (`/rest/agile/1.0`) surfaces, and classifies failed responses into a closed
//! set of failure variants at the client boundary.

pub mod client;
pub mod failure;
pub mod uri;

pub use client::{ClientFactory, JiraClient, RequestOptions, TransportRoute};
pub use failure::RemoteFailure;
pub use uri::{agile_uri, classic_uri, encode_segment, Endpoint, AGILE_API_PATH};
