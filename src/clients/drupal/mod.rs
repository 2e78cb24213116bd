//! The Drupal JSON:API resource client.
//!
//! - [`DrupalClient`]: resources, collections, static paths, path
//!   translation, menus and views
//! - [`RequestOptions`] / [`FetchOptions`]: per-call options
//! - [`IndexError`]: why the JSON:API index lookup failed

mod client;
mod index;
mod options;

pub use client::DrupalClient;
pub use index::IndexError;
pub use options::{FetchOptions, RequestOptions};
