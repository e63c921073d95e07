//! Category hierarchy resolution over a flat row set.
//!
//! Parent references come from admin-edited data, so nothing here assumes
//! they are acyclic or even resolvable. Every traversal keeps a visited set
//! and stops on the first repeat.

use std::collections::{HashMap, HashSet, VecDeque};

use storefront_core::types::CategoryId;
use storefront_entity::category::{Category, CategoryNode, CategoryTree};

/// Lookup structure built once per request from every category row.
#[derive(Debug, Clone)]
pub struct CategoryIndex {
    /// Rows in input order.
    rows: Vec<Category>,
    /// id → row position. The first row wins on duplicate ids.
    by_id: HashMap<CategoryId, usize>,
    /// slug → row position.
    by_slug: HashMap<String, usize>,
    /// parent id → child row positions, in input order.
    children: HashMap<CategoryId, Vec<usize>>,
}

impl CategoryIndex {
    /// Index a flat set of category rows.
    pub fn new(rows: Vec<Category>) -> Self {
        let mut by_id = HashMap::with_capacity(rows.len());
        let mut by_slug = HashMap::with_capacity(rows.len());
        for (pos, row) in rows.iter().enumerate() {
            by_id.entry(row.id).or_insert(pos);
            by_slug.entry(row.slug.clone()).or_insert(pos);
        }

        let mut children: HashMap<CategoryId, Vec<usize>> = HashMap::new();
        for (pos, row) in rows.iter().enumerate() {
            if by_id.get(&row.id) != Some(&pos) {
                continue;
            }
            if let Some(parent) = row.parent_id {
                if parent != row.id && by_id.contains_key(&parent) {
                    children.entry(parent).or_default().push(pos);
                }
            }
        }

        Self {
            rows,
            by_id,
            by_slug,
            children,
        }
    }

    /// Number of distinct categories.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Whether there are no categories.
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Every row in input order.
    pub fn rows(&self) -> &[Category] {
        &self.rows
    }

    /// Look up a category by id.
    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.by_id.get(&id).map(|&pos| &self.rows[pos])
    }

    /// Look up a category by slug.
    pub fn by_slug(&self, slug: &str) -> Option<&Category> {
        self.by_slug.get(slug).map(|&pos| &self.rows[pos])
    }

    /// Direct children of `id`, in input order.
    pub fn children_of(&self, id: CategoryId) -> Vec<&Category> {
        self.children
            .get(&id)
            .map(|positions| positions.iter().map(|&pos| &self.rows[pos]).collect())
            .unwrap_or_default()
    }

    /// Whether `row` hangs directly off the forest: no parent, a parent that
    /// does not exist, or itself as parent.
    fn is_root(&self, row: &Category) -> bool {
        match row.parent_id {
            None => true,
            Some(parent) => parent == row.id || !self.by_id.contains_key(&parent),
        }
    }

    /// Build the category forest.
    ///
    /// Every category appears exactly once. Categories whose parent is
    /// missing become roots. A cycle with no path to a root is cut at its
    /// member that comes first in input order, which becomes a root.
    pub fn build_forest(&self) -> CategoryTree {
        let mut visited: HashSet<CategoryId> = HashSet::with_capacity(self.len());
        let mut roots = Vec::new();

        for (pos, row) in self.rows.iter().enumerate() {
            if self.by_id.get(&row.id) == Some(&pos) && self.is_root(row) {
                roots.push(self.build_node(pos, &mut visited));
            }
        }

        for pos in 0..self.rows.len() {
            let row = &self.rows[pos];
            if self.by_id.get(&row.id) != Some(&pos) || visited.contains(&row.id) {
                continue;
            }
            let entry = self.cycle_entry(pos);
            roots.push(self.build_node(entry, &mut visited));
        }

        CategoryTree {
            total_categories: visited.len() as u64,
            roots,
        }
    }

    fn build_node(&self, pos: usize, visited: &mut HashSet<CategoryId>) -> CategoryNode {
        let row = &self.rows[pos];
        visited.insert(row.id);

        let mut children = Vec::new();
        for &child in self.children.get(&row.id).into_iter().flatten() {
            if !visited.contains(&self.rows[child].id) {
                children.push(self.build_node(child, visited));
            }
        }

        CategoryNode {
            id: row.id,
            name: row.name.clone(),
            slug: row.slug.clone(),
            parent_id: row.parent_id,
            children,
        }
    }

    /// Walk up from an unplaced row to the cycle it hangs off, and return the
    /// cycle member with the lowest input position.
    fn cycle_entry(&self, start: usize) -> usize {
        let mut order: Vec<usize> = Vec::new();
        let mut seen: HashMap<usize, usize> = HashMap::new();
        let mut pos = start;

        loop {
            if let Some(&first) = seen.get(&pos) {
                return order[first..].iter().copied().min().unwrap_or(start);
            }
            seen.insert(pos, order.len());
            order.push(pos);

            match self.rows[pos].parent_id.and_then(|p| self.by_id.get(&p)) {
                Some(&parent) => pos = parent,
                None => return start,
            }
        }
    }

    /// The ids of `id` and everything beneath it.
    ///
    /// The target comes first, followed by descendants in breadth-first
    /// order. An unknown id yields an empty list, which callers must treat
    /// as "not found" rather than "no products".
    pub fn descendant_ids(&self, id: CategoryId) -> Vec<CategoryId> {
        if !self.by_id.contains_key(&id) {
            return Vec::new();
        }

        let mut result = vec![id];
        let mut seen: HashSet<CategoryId> = HashSet::from([id]);
        let mut queue = VecDeque::from([id]);

        while let Some(current) = queue.pop_front() {
            for &child in self.children.get(&current).into_iter().flatten() {
                let child_id = self.rows[child].id;
                if seen.insert(child_id) {
                    result.push(child_id);
                    queue.push_back(child_id);
                }
            }
        }

        result
    }

    /// Ancestors of `category`, ordered root first, excluding the category
    /// itself.
    ///
    /// The walk stops at a missing parent or at the first id it has already
    /// seen.
    pub fn ancestor_path(&self, category: &Category) -> Vec<Category> {
        let mut seen: HashSet<CategoryId> = HashSet::from([category.id]);
        let mut path = Vec::new();
        let mut next = category.parent_id;

        while let Some(parent_id) = next {
            if !seen.insert(parent_id) {
                break;
            }
            let Some(parent) = self.get(parent_id) else {
                break;
            };
            path.push(parent.clone());
            next = parent.parent_id;
        }

        path.reverse();
        path
    }

    /// Whether `candidate` is `id` or lies beneath it.
    pub fn is_in_subtree(&self, id: CategoryId, candidate: CategoryId) -> bool {
        self.descendant_ids(id).contains(&candidate)
    }
}
