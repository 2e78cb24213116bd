//! Property-based tests for menu tree assembly.
//!
//! Menu lists are generated with arbitrary parent links, including orphans,
//! self references, cycles and duplicate ids.

use std::collections::HashSet;

use drupal_fetch::menu::{build_menu_tree, MenuItem};
use proptest::prelude::*;

/// Generates a flat menu list whose ids and parents are drawn from a small
/// pool, so that collisions, cycles and orphans are common.
fn arb_menu(unique_ids: bool) -> impl Strategy<Value = Vec<MenuItem>> {
    prop::collection::vec((0usize..12, prop::option::of(0usize..14)), 0..24).prop_map(
        move |pairs| {
            pairs
                .into_iter()
                .enumerate()
                .map(|(position, (id, parent))| {
                    let id = if unique_ids {
                        format!("m{position}")
                    } else {
                        format!("m{id}")
                    };
                    let parent = parent.map_or(String::new(), |p| format!("m{p}"));
                    MenuItem::new(id.clone(), parent, format!("Item {id}"))
                })
                .collect()
        },
    )
}

fn count(tree: &[MenuItem]) -> usize {
    tree.iter().map(|item| 1 + count(&item.items)).sum()
}

fn children_point_at_parents(tree: &[MenuItem], parent: &str) -> bool {
    tree.iter()
        .all(|item| item.parent == parent && children_point_at_parents(&item.items, &item.id))
}

fn no_id_repeats_on_a_path(tree: &[MenuItem], path: &mut HashSet<String>) -> bool {
    tree.iter().all(|item| {
        if !path.insert(item.id.clone()) {
            return false;
        }
        let ok = no_id_repeats_on_a_path(&item.items, path);
        path.remove(&item.id);
        ok
    })
}

proptest! {
    /// Every node hangs under the item named by its `parent`.
    #[test]
    fn prop_children_point_at_their_parent(items in arb_menu(false)) {
        let tree = build_menu_tree(&items);
        prop_assert!(children_point_at_parents(&tree, ""));
    }

    /// Duplicate or cyclic ids never repeat along a root-to-leaf path.
    #[test]
    fn prop_no_id_repeats_along_a_path(items in arb_menu(false)) {
        let tree = build_menu_tree(&items);
        prop_assert!(no_id_repeats_on_a_path(&tree, &mut HashSet::new()));
    }

    /// With unique ids, every item appears at most once.
    #[test]
    fn prop_unique_ids_appear_at_most_once(items in arb_menu(true)) {
        let tree = build_menu_tree(&items);
        prop_assert!(count(&tree) <= items.len());
    }

    /// Top-level items are exactly the parentless ones, in input order.
    #[test]
    fn prop_roots_keep_input_order(items in arb_menu(true)) {
        let tree = build_menu_tree(&items);
        let expected: Vec<&str> = items
            .iter()
            .filter(|item| item.parent.is_empty())
            .map(|item| item.id.as_str())
            .collect();
        let roots: Vec<&str> = tree.iter().map(|item| item.id.as_str()).collect();
        prop_assert_eq!(roots, expected);
    }
}
