//! Menu items and hierarchical menu tree assembly.
//!
//! Drupal's menu items endpoint returns a flat list in which each item names
//! its `parent` by id (the empty string for top-level links). [`build_menu_tree`]
//! turns that list into a nested tree.
//!
//! # Example
//!
//! ```rust
//! use drupal_fetch::menu::{build_menu_tree, MenuItem};
//!
//! let items = vec![
//!     MenuItem::new("home", "", "Home"),
//!     MenuItem::new("about", "", "About"),
//!     MenuItem::new("team", "about", "Team"),
//! ];
//!
//! let tree = build_menu_tree(&items);
//! assert_eq!(tree.len(), 2);
//! assert_eq!(tree[1].items[0].title, "Team");
//! assert!(tree[0].items.is_empty());
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::jsonapi::JsonMap;

/// A menu link, optionally with its nested children.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Plugin id of the link, e.g. `menu_link_content:<uuid>`.
    pub id: String,
    /// Id of the parent link; empty for top-level links.
    #[serde(default)]
    pub parent: String,
    /// Link text.
    #[serde(default)]
    pub title: String,
    /// Link description.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the link is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// Whether the link is shown expanded.
    #[serde(default)]
    pub expanded: bool,
    /// Machine name of the owning menu.
    #[serde(default)]
    pub menu_name: String,
    /// Module providing the link.
    #[serde(default)]
    pub provider: Option<String>,
    /// Link target.
    #[serde(default)]
    pub url: String,
    /// Route the link points to.
    #[serde(default)]
    pub route: Option<MenuRoute>,
    /// Sort weight, as reported by the server (number or numeric string).
    #[serde(default)]
    pub weight: Value,
    /// Link options.
    #[serde(default)]
    pub options: Option<Value>,
    /// Link meta.
    #[serde(default)]
    pub meta: Option<Value>,
    /// Any further attributes.
    #[serde(flatten)]
    pub extra: JsonMap,
    /// Child links; filled in by [`build_menu_tree`].
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

/// The route of a [`MenuItem`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuRoute {
    /// Route name, e.g. `entity.node.canonical`.
    #[serde(default)]
    pub name: String,
    /// Route parameters.
    #[serde(default)]
    pub parameters: JsonMap,
}

impl MenuItem {
    /// Creates a bare menu item.
    #[must_use]
    pub fn new(id: impl Into<String>, parent: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent: parent.into(),
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Builds a menu tree from a flat list, starting at top-level links.
///
/// Equivalent to [`build_menu_tree_from`] with an empty root parent.
#[must_use]
pub fn build_menu_tree(items: &[MenuItem]) -> Vec<MenuItem> {
    build_menu_tree_from(items, "")
}

/// Builds a menu tree from a flat list, starting at children of `root_parent`.
///
/// Siblings keep their input order. Items whose parent never appears are
/// dropped. An item whose id already occurs on the path from the root is
/// dropped with a warning, so duplicate or cyclic ids cannot loop.
#[must_use]
pub fn build_menu_tree_from(items: &[MenuItem], root_parent: &str) -> Vec<MenuItem> {
    let mut children: HashMap<&str, Vec<&MenuItem>> = HashMap::new();
    for item in items {
        children.entry(item.parent.as_str()).or_default().push(item);
    }

    let mut path = HashSet::new();
    attach(&children, root_parent, &mut path)
}

fn attach<'a>(
    children: &HashMap<&str, Vec<&'a MenuItem>>,
    parent: &str,
    path: &mut HashSet<&'a str>,
) -> Vec<MenuItem> {
    let Some(siblings) = children.get(parent) else {
        return Vec::new();
    };

    let mut nodes = Vec::with_capacity(siblings.len());
    for item in siblings {
        if !path.insert(item.id.as_str()) {
            tracing::warn!(
                "Dropping menu item '{}': it already appears above itself in the tree",
                item.id
            );
            continue;
        }
        let mut node = (*item).clone();
        node.items = attach(children, &item.id, path);
        path.remove(item.id.as_str());
        nodes.push(node);
    }
    nodes
}
