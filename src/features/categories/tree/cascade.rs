use std::collections::HashSet;

use crate::features::categories::models::CategoryId;
use crate::features::categories::tree::forest::Node;

/// Ids a visibility toggle on `node` must touch.
///
/// The node itself followed by all descendants in pre-order, siblings in
/// display order. Current flags are not consulted, so already matching
/// descendants are still listed. A snapshot carrying the same id twice
/// still yields that id once, at its first position.
pub fn plan_cascade(node: Node<'_>) -> Vec<CategoryId> {
    let mut ids = Vec::new();
    let mut seen = HashSet::new();
    let mut stack = vec![node];

    while let Some(current) = stack.pop() {
        if seen.insert(current.id()) {
            ids.push(current.id());
        }
        let children: Vec<_> = current.children().collect();
        stack.extend(children.into_iter().rev());
    }

    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::categories::tree::forest::build_tree;
    use crate::shared::test_helpers::category;

    #[test]
    fn test_leaf_plans_only_itself() {
        let forest = build_tree(vec![
            category(1, "Root", true, None),
            category(2, "Leaf", false, Some(1)),
        ]);
        assert_eq!(plan_cascade(forest.node(2).unwrap()), vec![2]);
    }

    #[test]
    fn test_subtree_in_pre_order() {
        let forest = build_tree(vec![
            category(1, "Root", true, None),
            category(2, "Beta", false, Some(1)),
            category(3, "Alpha", true, Some(1)),
            category(4, "Alpha child", true, Some(3)),
            category(5, "Elsewhere", true, None),
        ]);

        let ids = plan_cascade(forest.node(1).unwrap());
        assert_eq!(ids, vec![1, 3, 4, 2]);
    }

    #[test]
    fn test_plan_has_no_duplicates() {
        let forest = build_tree(vec![
            category(1, "A", true, Some(2)),
            category(2, "B", true, Some(1)),
            category(3, "C", true, Some(1)),
        ]);
        let mut ids = plan_cascade(forest.node(1).unwrap());
        let len = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), len);
        assert_eq!(len, 3);
    }

    #[test]
    fn test_duplicate_ids_are_planned_once() {
        let forest = build_tree(vec![
            category(1, "Root", true, None),
            category(2, "Shirts", true, Some(1)),
            category(2, "Shirts", true, Some(1)),
            category(3, "Tees", true, Some(2)),
        ]);

        assert_eq!(plan_cascade(forest.node(1).unwrap()), vec![1, 2, 3]);
    }
}
