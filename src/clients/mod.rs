//! HTTP client types for Drupal JSON:API communication.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`DrupalClient`]: the resource client
//! - [`Transport`]: the seam between the client and the network
//! - [`HttpClient`]: the `reqwest`-backed [`Transport`]
//! - [`HttpRequest`] / [`HttpResponse`]: one exchange with the server
//! - [`build_url`]: request URL construction
//! - [`classify`]: per-operation handling of non-success responses
//! - [`FetchError`], [`HttpError`], [`IndexError`]: what can go wrong
//!
//! # Example
//!
//! ```rust,ignore
//! use drupal_fetch::{DrupalClient, DrupalConfig};
//! use drupal_fetch::clients::RequestOptions;
//!
//! let client = DrupalClient::new(DrupalConfig::from_base_url("https://cms.example.com")?);
//! let menu = client.get_menu("main", RequestOptions::new()).await?;
//! ```
//!
//! # Failure Behavior
//!
//! Requests are attempted once; there are no retries.
//!
//! - **Resources, collections, menus, views**: a non-2xx status fails with the status text
//! - **Path translation**: a non-2xx status yields `None`
//! - **Index**: any failure is logged and yields `None`

pub mod drupal;
mod errors;
mod http_client;
mod http_request;
mod http_response;
pub mod policy;
mod url_builder;

pub use drupal::{DrupalClient, FetchOptions, IndexError, RequestOptions};
pub use errors::{FetchError, HttpError, HttpResponseError};
pub use http_client::{HttpClient, Transport, JSON_API_MEDIA_TYPE, SDK_VERSION};
pub use http_request::{CacheMode, HttpRequest, HttpRequestBuilder};
pub use http_response::HttpResponse;
pub use policy::{classify, FailurePolicy, Operation};
pub use url_builder::build_url;
