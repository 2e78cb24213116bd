//! # drupal-fetch
//!
//! An async client for reading content from a headless Drupal site over
//! JSON:API.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`DrupalConfig`] and [`DrupalConfigBuilder`]
//! - Validated newtypes for the site origin, API prefix and locale
//! - Nested query parameter building and encoding via [`query::QueryParams`]
//! - Resource endpoint discovery through the site's JSON:API index
//! - Compound document deserialization into a connected [`ResourceGraph`]
//! - Menu tree assembly, view results and path translation
//!
//! ## Quick Start
//!
//! ```rust
//! use drupal_fetch::{BaseUrl, DrupalConfig};
//!
//! let config = DrupalConfig::builder()
//!     .base_url(BaseUrl::new("https://cms.example.com").unwrap())
//!     .debug(true)
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Fetching Resources
//!
//! ```rust,ignore
//! use drupal_fetch::{DrupalClient, DrupalConfig};
//! use drupal_fetch::clients::RequestOptions;
//! use drupal_fetch::query::QueryParams;
//!
//! let client = DrupalClient::new(DrupalConfig::from_base_url("https://cms.example.com")?);
//!
//! let params = QueryParams::new()
//!     .add_filter("status", "1")
//!     .add_include(["uid", "field_image"])
//!     .add_sort("created", true)
//!     .add_page_limit(10);
//!
//! let articles = client
//!     .get_resource_collection("node--article", RequestOptions::new().params(params))
//!     .await?;
//!
//! for article in articles.primary_resources() {
//!     println!("{:?}", article.attribute_str("title"));
//! }
//! ```
//!
//! ## Static Site Generation
//!
//! ```rust,ignore
//! // [["blog", "hello-world"], ["about"], ...]
//! let paths = client.get_static_paths(&["node--article", "node--page"]).await?;
//!
//! // Resolve a front-end path to its entity
//! if let Some(data) = client.get_path_data("/blog/hello-world", RequestOptions::new()).await? {
//!     let page = client
//!         .get_resource(&data.jsonapi.unwrap().resource_name, &data.entity.uuid, RequestOptions::new())
//!         .await?;
//! }
//! ```
//!
//! ## Menus and Views
//!
//! ```rust,ignore
//! let main_menu = client.get_menu("main", RequestOptions::new()).await?;
//! let featured = client.get_view("featured_articles--page_1", RequestOptions::new()).await?;
//! println!("{:?} results", featured.meta.and_then(|m| m.get("count").cloned()));
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events and installs no subscriber. With
//! [`DrupalConfigBuilder::debug`] enabled, request URLs are logged at
//! `debug` level.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: The client and its configuration are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **No hidden caching**: The index is fetched fresh for every lookup

pub mod clients;
pub mod config;
pub mod error;
pub mod jsonapi;
pub mod menu;
pub mod query;
pub mod types;

// Re-export public types at crate root for convenience
pub use config::{ApiPrefix, BaseUrl, DrupalConfig, DrupalConfigBuilder, Locale};
pub use error::ConfigError;

// Re-export client types
pub use clients::{
    CacheMode, DrupalClient, FetchError, FetchOptions, HttpClient, HttpError, HttpRequest,
    HttpResponse, HttpResponseError, IndexError, RequestOptions, Transport,
};

// Re-export data types
pub use jsonapi::{deserialize, IndexDocument, Resource, ResourceGraph};
pub use menu::{build_menu_tree, MenuItem};
pub use query::{QueryParams, QueryValue};
pub use types::{PathAlias, PathData, ViewResult};
