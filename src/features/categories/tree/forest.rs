use std::collections::HashMap;

use crate::features::categories::models::{Category, CategoryId};
use crate::features::categories::tree::ordering::compare_names;

/// Ordered forest built from a flat parent-pointer snapshot.
///
/// Records live in an arena indexed by slot; parent and child links are
/// slot indices, never references. A forest is rebuilt from scratch for
/// every fetched snapshot and is never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct CategoryForest {
    records: Vec<Category>,
    slots: HashMap<CategoryId, usize>,
    parents: Vec<Option<usize>>,
    children: Vec<Vec<usize>>,
    roots: Vec<usize>,
}

/// A category together with its ordered children
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    forest: &'a CategoryForest,
    slot: usize,
}

/// Build the forest for a fetched snapshot
pub fn build_tree(categories: Vec<Category>) -> CategoryForest {
    CategoryForest::build(categories)
}

impl CategoryForest {
    /// Never fails and never drops a record.
    ///
    /// A record whose parent is missing becomes a root. Records trapped in
    /// a parent cycle (including self-references) are promoted to roots as
    /// well, cutting the edge that closed the cycle.
    pub fn build(categories: Vec<Category>) -> Self {
        let len = categories.len();
        let mut slots = HashMap::with_capacity(len);
        for (slot, category) in categories.iter().enumerate() {
            slots.entry(category.id).or_insert(slot);
        }

        let mut parents = vec![None; len];
        let mut children = vec![Vec::new(); len];
        let mut roots = Vec::new();

        for (slot, category) in categories.iter().enumerate() {
            match category.parent_id.and_then(|pid| slots.get(&pid).copied()) {
                Some(parent) if parent != slot => {
                    parents[slot] = Some(parent);
                    children[parent].push(slot);
                }
                _ => roots.push(slot),
            }
        }

        let mut forest = Self {
            records: categories,
            slots,
            parents,
            children,
            roots,
        };
        forest.promote_unreachable();
        forest.sort_levels();
        forest
    }

    fn promote_unreachable(&mut self) {
        let mut reachable = vec![false; self.records.len()];
        let mut stack: Vec<usize> = self.roots.clone();
        self.mark(&mut reachable, &mut stack);

        for slot in 0..self.records.len() {
            if reachable[slot] {
                continue;
            }
            if let Some(parent) = self.parents[slot].take() {
                self.children[parent].retain(|&child| child != slot);
            }
            tracing::warn!(
                "Category {} is part of a parent cycle, showing it as a root",
                self.records[slot].id
            );
            self.roots.push(slot);
            stack.push(slot);
            self.mark(&mut reachable, &mut stack);
        }
    }

    fn mark(&self, reachable: &mut [bool], stack: &mut Vec<usize>) {
        while let Some(slot) = stack.pop() {
            if reachable[slot] {
                continue;
            }
            reachable[slot] = true;
            stack.extend(self.children[slot].iter().copied());
        }
    }

    fn sort_levels(&mut self) {
        let records = &self.records;
        let by_name = |a: &usize, b: &usize| {
            compare_names(&records[*a].name, &records[*b].name)
                .then_with(|| records[*a].id.cmp(&records[*b].id))
        };
        self.roots.sort_by(by_name);
        for list in &mut self.children {
            list.sort_by(by_name);
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Flat snapshot the forest was built from, in fetch order
    pub fn categories(&self) -> &[Category] {
        &self.records
    }

    pub fn roots(&self) -> impl Iterator<Item = Node<'_>> + '_ {
        self.roots.iter().map(move |&slot| Node { forest: self, slot })
    }

    pub fn node(&self, id: CategoryId) -> Option<Node<'_>> {
        self.slots.get(&id).map(|&slot| Node { forest: self, slot })
    }

    /// Number of nodes reachable from the roots
    pub fn count_nodes(&self) -> usize {
        fn count(node: Node<'_>) -> usize {
            1 + node.children().map(count).sum::<usize>()
        }
        self.roots().map(count).sum()
    }
}

impl<'a> Node<'a> {
    pub fn category(&self) -> &'a Category {
        &self.forest.records[self.slot]
    }

    pub fn id(&self) -> CategoryId {
        self.category().id
    }

    pub fn children(&self) -> impl Iterator<Item = Node<'a>> + 'a {
        let forest = self.forest;
        forest.children[self.slot]
            .iter()
            .map(move |&slot| Node { forest, slot })
    }

    pub fn child_count(&self) -> usize {
        self.forest.children[self.slot].len()
    }

    pub fn is_leaf(&self) -> bool {
        self.child_count() == 0
    }

    pub fn parent(&self) -> Option<Node<'a>> {
        self.forest.parents[self.slot].map(|slot| Node {
            forest: self.forest,
            slot,
        })
    }

    /// Parent, grandparent, ... up to the root
    pub fn ancestors(&self) -> impl Iterator<Item = Node<'a>> + 'a {
        std::iter::successors(self.parent(), |node| node.parent())
    }

    /// Root node whose `parent_id` points at a record missing from the snapshot
    pub fn is_orphaned(&self) -> bool {
        self.parent().is_none() && self.category().parent_id.is_some()
    }

    pub fn depth(&self) -> usize {
        self.ancestors().count()
    }
}
