//! Effective (inherited) visibility.
//!
//! A category is shown on the storefront only when it and every ancestor
//! are active. The value is always computed from the current snapshot and
//! never written back to a record.

use std::collections::{HashMap, HashSet};

use crate::features::categories::models::{Category, CategoryId};
use crate::features::categories::tree::forest::{CategoryForest, Node};

/// Own flag AND every ancestor's flag, walked over forest parent links
pub fn effective_visible(node: Node<'_>) -> bool {
    node.category().is_active && node.ancestors().all(|a| a.category().is_active)
}

/// Same rule over raw `parent_id` links.
///
/// A missing parent ends the walk like a root does. A parent cycle ends the
/// walk at the first repeated id; every record seen up to that point counts.
pub fn effective_visible_in(category: &Category, by_id: &HashMap<CategoryId, &Category>) -> bool {
    let mut visited = HashSet::new();
    let mut current = Some(category);

    while let Some(c) = current {
        if !visited.insert(c.id) {
            break;
        }
        if !c.is_active {
            return false;
        }
        current = c.parent_id.and_then(|pid| by_id.get(&pid).copied());
    }
    true
}

/// Fold the forest top-down, handing each node its effective visibility.
///
/// `render` receives the node, its effective visibility and its already
/// rendered children. Visibility is pushed down from the parent so the whole
/// forest is resolved in one pass.
pub fn render_tree<T, F>(forest: &CategoryForest, mut render: F) -> Vec<T>
where
    F: FnMut(Node<'_>, bool, Vec<T>) -> T,
{
    fn walk<T, F>(node: Node<'_>, parent_visible: bool, render: &mut F) -> T
    where
        F: FnMut(Node<'_>, bool, Vec<T>) -> T,
    {
        let visible = parent_visible && node.category().is_active;
        let children = node
            .children()
            .map(|child| walk(child, visible, &mut *render))
            .collect();
        render(node, visible, children)
    }

    forest
        .roots()
        .map(|root| walk(root, true, &mut render))
        .collect()
}
