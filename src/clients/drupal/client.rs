//! The resource client.

use std::fmt;

use futures::future::try_join_all;
use url::Url;

use crate::clients::errors::FetchError;
use crate::clients::http_client::{HttpClient, Transport};
use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::clients::policy::{classify, Operation};
use crate::clients::url_builder::build_url;
use crate::config::DrupalConfig;
use crate::jsonapi::{deserialize, ErrorObject, ResourceGraph};
use crate::menu::{build_menu_tree, MenuItem};
use crate::query::QueryParams;
use crate::types::{PathAlias, PathData, ViewResult};

use super::options::{FetchOptions, RequestOptions};

/// Client for reading content from a Drupal site over JSON:API.
///
/// Resource and collection requests first look up the resource endpoint in
/// the site's JSON:API index. Menus, views and path translation use fixed
/// routes. Every response is deserialized into a [`ResourceGraph`].
///
/// The configuration is fixed at construction; all operations take `&self`
/// and may run concurrently.
///
/// # Example
///
/// ```rust,ignore
/// use drupal_fetch::{DrupalClient, DrupalConfig};
/// use drupal_fetch::clients::RequestOptions;
/// use drupal_fetch::query::QueryParams;
///
/// let client = DrupalClient::new(DrupalConfig::from_base_url("https://cms.example.com")?);
///
/// let articles = client
///     .get_resource_collection(
///         "node--article",
///         RequestOptions::new().params(QueryParams::new().add_include(["uid"])),
///     )
///     .await?;
///
/// for article in articles.primary_resources() {
///     let author = articles.related(article, "uid");
///     println!("{:?} by {:?}", article.attribute_str("title"), author.first().and_then(|a| a.attribute_str("name")));
/// }
/// ```
#[derive(Debug)]
pub struct DrupalClient<T: Transport = HttpClient> {
    pub(super) config: DrupalConfig,
    pub(super) transport: T,
}

// Verify DrupalClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<DrupalClient>();
};

impl DrupalClient<HttpClient> {
    /// Creates a client that talks HTTPS through [`HttpClient`].
    ///
    /// # Panics
    ///
    /// Panics if the underlying HTTP client cannot be created (see
    /// [`HttpClient::new`]).
    #[must_use]
    pub fn new(config: DrupalConfig) -> Self {
        let transport = HttpClient::new(&config);
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> DrupalClient<T> {
    /// Creates a client that sends requests through `transport`.
    pub fn with_transport(config: DrupalConfig, transport: T) -> Self {
        let client = Self { config, transport };
        client.log_debug(format_args!("Debug mode is on."));
        client
    }

    /// Returns the client configuration.
    #[must_use]
    pub const fn config(&self) -> &DrupalConfig {
        &self.config
    }

    /// Returns the transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches a single resource by type and id.
    ///
    /// When both query parameters and a version are given, the version is
    /// sent as `resourceVersion`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::InvalidUrl`] if the type has no endpoint in the index
    /// - [`FetchError::Http`] on transport failure or a non-2xx status
    /// - [`FetchError::Json`] or [`FetchError::Document`] for unusable bodies
    pub async fn get_resource(
        &self,
        resource_type: &str,
        id: &str,
        options: RequestOptions,
    ) -> Result<ResourceGraph, FetchError> {
        let endpoint = self
            .resource_endpoint(resource_type, options.locale.as_ref())
            .await;
        let params = options.versioned_params();
        let url = self.endpoint_url(
            resource_type,
            endpoint.map(|endpoint| format!("{endpoint}/{id}")),
            params.as_ref(),
        )?;

        self.log_debug(format_args!("Fetching resource {resource_type} with id {id}."));
        self.log_debug(format_args!("{url}"));

        let response = self
            .fetch(Operation::GetResource, url, &options.fetch)
            .await?;
        Self::parse_graph(response)
    }

    /// Fetches a collection of resources of one type.
    ///
    /// # Errors
    ///
    /// Same as [`get_resource`](Self::get_resource).
    pub async fn get_resource_collection(
        &self,
        resource_type: &str,
        options: RequestOptions,
    ) -> Result<ResourceGraph, FetchError> {
        let endpoint = self
            .resource_endpoint(resource_type, options.locale.as_ref())
            .await;
        let url = self.endpoint_url(resource_type, endpoint, options.params.as_ref())?;

        self.log_debug(format_args!("Fetching resource collection of type {resource_type}"));
        self.log_debug(format_args!("{url}"));

        let response = self
            .fetch(Operation::GetCollection, url, &options.fetch)
            .await?;
        Self::parse_graph(response)
    }

    /// Collects the path aliases of every resource of the given types, split
    /// into segments (`/blog/hello` becomes `["blog", "hello"]`).
    ///
    /// One collection request per type is issued concurrently, each limited
    /// to the `path` field. Results keep the order of `types`. Resources
    /// without a string alias are skipped.
    ///
    /// # Errors
    ///
    /// Fails with the first error of any collection request.
    pub async fn get_static_paths<S: AsRef<str>>(
        &self,
        types: &[S],
    ) -> Result<Vec<Vec<String>>, FetchError> {
        let requests = types.iter().map(|resource_type| async move {
            let resource_type = resource_type.as_ref();
            let options = RequestOptions::new()
                .params(QueryParams::new().add_fields(resource_type, ["path"]));
            let graph = self.get_resource_collection(resource_type, options).await?;
            Ok::<_, FetchError>(Self::alias_segments(resource_type, &graph))
        });

        let per_type = try_join_all(requests).await?;
        Ok(per_type.into_iter().flatten().collect())
    }

    /// Translates a front-end path through the decoupled router.
    ///
    /// Returns `None` when the router does not know the path.
    ///
    /// # Errors
    ///
    /// Transport failures and unparseable bodies are errors; non-2xx
    /// statuses are not.
    pub async fn get_path_data(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Option<PathData>, FetchError> {
        let params = QueryParams::new().add_custom_param("path", path);
        let url = build_url(
            "/router/translate-path",
            self.config.base_url().as_ref(),
            Some(&params),
        )?;

        self.log_debug(format_args!("Translating path {path}"));
        self.log_debug(format_args!("{url}"));

        let Some(response) = self
            .fetch(Operation::GetPathData, url, &options.fetch)
            .await?
        else {
            return Ok(None);
        };
        Ok(Some(serde_json::from_value(response.json()?)?))
    }

    /// Fetches the items of a menu and assembles them into a tree.
    ///
    /// # Errors
    ///
    /// Same as [`get_resource`](Self::get_resource), minus the index lookup.
    pub async fn get_menu(
        &self,
        name: &str,
        options: RequestOptions,
    ) -> Result<Vec<MenuItem>, FetchError> {
        let path = format!("{}/menu_items/{name}", self.config.api_prefix());
        let url = build_url(&path, self.config.base_url().as_ref(), options.params.as_ref())?;

        self.log_debug(format_args!("Fetching menu items for {name}."));
        self.log_debug(format_args!("{url}"));

        let response = self.fetch(Operation::GetMenu, url, &options.fetch).await?;
        let graph = Self::parse_graph(response)?;
        let items: Option<Vec<MenuItem>> = graph.primary_as()?;
        Ok(build_menu_tree(&items.unwrap_or_default()))
    }

    /// Fetches the results of a view display.
    ///
    /// `name` has the form `view_id--display_id`; it is split on the first
    /// `--`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidViewName`] if `name` has no `--`, and
    /// otherwise fails like [`get_menu`](Self::get_menu).
    pub async fn get_view(
        &self,
        name: &str,
        options: RequestOptions,
    ) -> Result<ViewResult<ResourceGraph>, FetchError> {
        let Some((view_id, display_id)) = name.split_once("--") else {
            return Err(FetchError::InvalidViewName {
                name: name.to_string(),
            });
        };
        let path = format!("{}/views/{view_id}/{display_id}", self.config.api_prefix());
        let url = build_url(&path, self.config.base_url().as_ref(), options.params.as_ref())?;

        self.log_debug(format_args!("Fetching view {view_id} display {display_id}."));
        self.log_debug(format_args!("{url}"));

        let response = self.fetch(Operation::GetView, url, &options.fetch).await?;
        let results = Self::parse_graph(response)?;
        Ok(ViewResult {
            id: name.to_string(),
            meta: results.meta().cloned(),
            links: results.links().cloned(),
            results,
        })
    }

    /// Emits a debug event when the client runs in debug mode.
    pub(super) fn log_debug(&self, message: fmt::Arguments<'_>) {
        if self.config.debug() {
            tracing::debug!("{message}");
        }
    }

    /// Builds a request URL from a resolved endpoint path.
    fn endpoint_url(
        &self,
        resource_type: &str,
        path: Option<String>,
        params: Option<&QueryParams>,
    ) -> Result<Url, FetchError> {
        let Some(path) = path else {
            return Err(FetchError::InvalidUrl {
                url: resource_type.to_string(),
                reason: format!("no JSON:API endpoint found for resource type '{resource_type}'"),
            });
        };
        build_url(&path, self.config.base_url().as_ref(), params)
    }

    /// Sends a `GET` and applies the operation's failure policy.
    async fn fetch(
        &self,
        operation: Operation,
        url: Url,
        options: &FetchOptions,
    ) -> Result<Option<HttpResponse>, FetchError> {
        let request = HttpRequest::builder(url)
            .headers(&options.headers)
            .cache(options.cache)
            .timeout(options.timeout)
            .build();
        let response = self.transport.send(request).await?;
        Ok(classify(operation, response)?)
    }

    /// Parses a JSON:API body into a graph.
    ///
    /// Error documents fail even under a 2xx status. A missing or falsy body
    /// becomes an empty graph.
    fn parse_graph(response: Option<HttpResponse>) -> Result<ResourceGraph, FetchError> {
        let Some(response) = response else {
            return Ok(ResourceGraph::default());
        };
        let value = response.json()?;

        if let Some(errors) = value
            .get("errors")
            .filter(|errors| errors.as_array().is_some_and(|list| !list.is_empty()))
        {
            let errors: Vec<ErrorObject> = serde_json::from_value(errors.clone())?;
            return Err(FetchError::Document { errors });
        }

        Ok(deserialize(value)?.unwrap_or_default())
    }

    /// Extracts split alias segments from a `path`-only collection.
    fn alias_segments(resource_type: &str, graph: &ResourceGraph) -> Vec<Vec<String>> {
        graph
            .primary_resources()
            .into_iter()
            .filter_map(|resource| {
                let alias = resource
                    .attribute_as::<PathAlias>("path")
                    .ok()
                    .flatten()
                    .and_then(|path| path.alias);
                if alias.is_none() {
                    tracing::warn!(
                        "Skipping {resource_type} {}: no path alias",
                        resource.id
                    );
                }
                alias
            })
            .map(|alias| {
                let trimmed = alias.strip_prefix('/').unwrap_or(&alias);
                trimmed.split('/').map(String::from).collect()
            })
            .collect()
    }
}
