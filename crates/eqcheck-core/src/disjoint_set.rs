//! Disjoint-set (union-find) forest over named elements.
//!
//! Elements are stored in a flat `Vec` and refer to their tree parent by
//! index; a root is an element whose parent index is its own. Union-by-rank
//! keeps every tree at height `O(log n)`, so [`DisjointSet::find_representative`]
//! walks the parent chain iteratively and never compresses it. Queries take
//! `&self` and leave the forest untouched.
//!
//! When two roots of equal rank are merged, the root of the **first** operand
//! survives and its rank grows by one.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::{debug, trace};

// ---------------------------------------------------------------------------
// ElementId
// ---------------------------------------------------------------------------

/// Handle to an element of a [`DisjointSet`].
///
/// Handles are issued by [`DisjointSet::find_or_create`] and are only
/// meaningful for the set that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ElementId(usize);

impl ElementId {
    /// Returns the creation-order position of this element.
    pub fn index(self) -> usize {
        self.0
    }
}

// ---------------------------------------------------------------------------
// UnknownElementError
// ---------------------------------------------------------------------------

/// A query named an element that was never created.
///
/// Only [`DisjointSet::find_or_create`] brings elements into existence; every
/// name-based query against an absent name fails with this error instead of
/// answering `true` or `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownElementError {
    /// The name with no element in the registry.
    pub name: String,
}

impl UnknownElementError {
    /// Creates an error for `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for UnknownElementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown element `{}`", self.name)
    }
}

impl std::error::Error for UnknownElementError {}

// ---------------------------------------------------------------------------
// DisjointSet
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Element {
    name: String,
    parent: ElementId,
    rank: u32,
}

/// A growable disjoint-set forest keyed by element name.
///
/// The set owns every element. Elements point at each other only through
/// [`ElementId`] indices, so the forest contains no ownership cycles.
#[derive(Debug, Clone, Default)]
pub struct DisjointSet {
    elements: Vec<Element>,
    by_name: HashMap<String, ElementId>,
    class_count: usize,
}

impl DisjointSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty set with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
            by_name: HashMap::with_capacity(capacity),
            class_count: 0,
        }
    }

    /// Returns the element called `name`, creating it first if needed.
    ///
    /// A new element starts as its own root with rank 0, forming a singleton
    /// class.
    pub fn find_or_create(&mut self, name: &str) -> ElementId {
        if let Some(&id) = self.by_name.get(name) {
            return id;
        }

        let id = ElementId(self.elements.len());
        self.elements.push(Element {
            name: name.to_owned(),
            parent: id,
            rank: 0,
        });
        self.by_name.insert(name.to_owned(), id);
        self.class_count += 1;
        trace!(name, index = id.0, "created element");
        id
    }

    /// Returns the element called `name`, if it exists.
    pub fn lookup(&self, name: &str) -> Option<ElementId> {
        self.by_name.get(name).copied()
    }

    /// Returns the element called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownElementError`] if no element has this name.
    pub fn require(&self, name: &str) -> Result<ElementId, UnknownElementError> {
        self.lookup(name).ok_or_else(|| UnknownElementError::new(name))
    }

    /// Returns the root of the tree containing `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not handed out by this set.
    pub fn find_representative(&self, id: ElementId) -> ElementId {
        let mut current = id;
        loop {
            let parent = self.elements[current.0].parent;
            if parent == current {
                return current;
            }
            current = parent;
        }
    }

    /// Merges the classes containing `a` and `b`.
    ///
    /// The lower-rank root is attached under the higher-rank one. On a tie the
    /// root of `a` survives and its rank is incremented. Merging two elements
    /// that already share a root does nothing.
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` was not handed out by this set.
    pub fn union(&mut self, a: ElementId, b: ElementId) {
        let ra = self.find_representative(a);
        let rb = self.find_representative(b);

        if ra == rb {
            return;
        }

        let rank_a = self.elements[ra.0].rank;
        let rank_b = self.elements[rb.0].rank;

        match rank_a.cmp(&rank_b) {
            Ordering::Less => {
                debug!(
                    child = %self.elements[ra.0].name,
                    child_rank = rank_a,
                    root = %self.elements[rb.0].name,
                    root_rank = rank_b,
                    "attached lower-rank root"
                );
                self.elements[ra.0].parent = rb;
            }
            Ordering::Greater => {
                debug!(
                    child = %self.elements[rb.0].name,
                    child_rank = rank_b,
                    root = %self.elements[ra.0].name,
                    root_rank = rank_a,
                    "attached lower-rank root"
                );
                self.elements[rb.0].parent = ra;
            }
            Ordering::Equal => {
                self.elements[rb.0].parent = ra;
                self.elements[ra.0].rank += 1;
                debug!(
                    child = %self.elements[rb.0].name,
                    root = %self.elements[ra.0].name,
                    root_rank = rank_a + 1,
                    "attached equal-rank root and promoted survivor"
                );
            }
        }

        self.class_count -= 1;
    }

    /// Returns `true` if `a` and `b` belong to the same class.
    ///
    /// # Panics
    ///
    /// Panics if `a` or `b` was not handed out by this set.
    pub fn same_class(&self, a: ElementId, b: ElementId) -> bool {
        self.find_representative(a) == self.find_representative(b)
    }

    /// Name-based form of [`DisjointSet::same_class`].
    ///
    /// # Errors
    ///
    /// Returns [`UnknownElementError`] for the first of `a`, `b` that was
    /// never created.
    pub fn same_class_by_name(&self, a: &str, b: &str) -> Result<bool, UnknownElementError> {
        let a = self.require(a)?;
        let b = self.require(b)?;
        Ok(self.same_class(a, b))
    }

    /// Returns the name of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not handed out by this set.
    pub fn name(&self, id: ElementId) -> &str {
        &self.elements[id.0].name
    }

    /// Returns the current rank of `id`.
    ///
    /// Only a root's rank takes part in later unions; a non-root keeps the
    /// rank it had when it was attached.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not handed out by this set.
    pub fn rank(&self, id: ElementId) -> u32 {
        self.elements[id.0].rank
    }

    /// Returns `true` if `id` is the root of its tree.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not handed out by this set.
    pub fn is_root(&self, id: ElementId) -> bool {
        self.elements[id.0].parent == id
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the number of equivalence classes.
    pub fn class_count(&self) -> usize {
        self.class_count
    }

    /// Iterates over every element handle in creation order.
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        (0..self.elements.len()).map(ElementId)
    }

    /// Returns the partition as lists of names.
    ///
    /// Names within a class are sorted, and classes are sorted by their first
    /// name, so two sets describing the same partition compare equal
    /// regardless of tree shape.
    pub fn classes(&self) -> Vec<Vec<&str>> {
        let mut grouped: HashMap<ElementId, Vec<&str>> = HashMap::new();
        for id in self.ids() {
            grouped
                .entry(self.find_representative(id))
                .or_default()
                .push(self.name(id));
        }

        let mut classes: Vec<Vec<&str>> = grouped
            .into_values()
            .map(|mut names| {
                names.sort_unstable();
                names
            })
            .collect();
        classes.sort_unstable();
        classes
    }
}

impl fmt::Display for DisjointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, class) in self.classes().iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{{{}}}", class.join(", "))?;
        }
        f.write_str("}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn set_with(names: &[&str]) -> (DisjointSet, Vec<ElementId>) {
        let mut set = DisjointSet::new();
        let ids = names.iter().map(|n| set.find_or_create(n)).collect();
        (set, ids)
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn id_from_another_set_panics() {
        let (_, ids) = set_with(&["A", "B", "C"]);
        let (small, _) = set_with(&["A"]);
        let _root = small.find_representative(ids[2]);
    }

    #[test]
    fn new_elements_are_singleton_roots() {
        let (set, ids) = set_with(&["a", "b", "c"]);
        for &id in &ids {
            assert!(set.is_root(id), "{} should be its own root", set.name(id));
            assert_eq!(set.rank(id), 0);
            assert_eq!(set.find_representative(id), id);
        }
        assert_eq!(set.len(), 3);
        assert_eq!(set.class_count(), 3);
    }

    #[test]
    fn find_or_create_returns_existing_element() {
        let mut set = DisjointSet::new();
        let first = set.find_or_create("x");
        let second = set.find_or_create("x");
        assert_eq!(first, second);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn lookup_does_not_create() {
        let set = DisjointSet::new();
        assert_eq!(set.lookup("ghost"), None);
        assert!(set.is_empty());
    }

    #[test]
    fn require_unknown_name_fails() {
        let (set, _) = set_with(&["a"]);
        let err = set.require("b").expect_err("b was never created");
        assert_eq!(err, UnknownElementError::new("b"));
        assert_eq!(err.to_string(), "unknown element `b`");
    }

    #[test]
    fn union_two_elements_same_class() {
        let (mut set, ids) = set_with(&["a", "b", "c", "d"]);
        set.union(ids[0], ids[1]);
        assert!(set.same_class(ids[0], ids[1]));
        assert!(!set.same_class(ids[0], ids[2]));
        assert!(!set.same_class(ids[2], ids[3]));
        assert_eq!(set.class_count(), 3);
    }

    #[test]
    fn transitive_closure() {
        let (mut set, ids) = set_with(&["a", "b", "c"]);
        set.union(ids[0], ids[1]);
        set.union(ids[1], ids[2]);
        assert!(set.same_class(ids[0], ids[2]));
        assert_eq!(set.class_count(), 1);
    }

    #[test]
    fn equal_rank_tie_keeps_first_operand_root() {
        let (mut set, ids) = set_with(&["b", "a"]);
        set.union(ids[0], ids[1]);
        assert_eq!(set.find_representative(ids[1]), ids[0]);
        assert_eq!(set.rank(ids[0]), 1);
        assert_eq!(set.rank(ids[1]), 0);
        assert!(!set.is_root(ids[1]));
    }

    #[test]
    fn tie_break_follows_argument_order_not_creation_order() {
        let (mut set, ids) = set_with(&["a", "b"]);
        set.union(ids[1], ids[0]);
        assert_eq!(set.find_representative(ids[0]), ids[1]);
        assert_eq!(set.rank(ids[1]), 1);
    }

    #[test]
    fn higher_rank_root_absorbs_lower_rank_root() {
        let (mut set, ids) = set_with(&["a", "b", "c"]);
        set.union(ids[0], ids[1]);
        // c (rank 0) is the first operand but a's root has rank 1.
        set.union(ids[2], ids[0]);
        assert_eq!(set.find_representative(ids[2]), ids[0]);
        assert_eq!(set.rank(ids[0]), 1, "unequal merge must not bump rank");
    }

    #[test]
    fn union_of_same_class_is_noop() {
        let (mut set, ids) = set_with(&["a", "b"]);
        set.union(ids[0], ids[1]);
        let before = set.clone();
        set.union(ids[1], ids[0]);
        set.union(ids[0], ids[0]);
        assert_eq!(set.rank(ids[0]), before.rank(ids[0]));
        assert_eq!(set.class_count(), before.class_count());
        assert_eq!(set.classes(), before.classes());
    }

    #[test]
    fn find_representative_does_not_compress() {
        let (mut set, ids) = set_with(&["a", "b", "c", "d"]);
        set.union(ids[0], ids[1]);
        set.union(ids[2], ids[3]);
        set.union(ids[0], ids[2]);
        // d -> c -> a
        assert_eq!(set.find_representative(ids[3]), ids[0]);
        assert_eq!(set.elements[ids[3].0].parent, ids[2]);
    }

    #[test]
    fn star_unions_keep_root_rank_low() {
        let mut set = DisjointSet::new();
        let first = set.find_or_create("n0");
        for i in 1..1024 {
            let next = set.find_or_create(&format!("n{i}"));
            set.union(next, first);
        }
        let root = set.find_representative(first);
        assert_eq!(set.rank(root), 1);
        assert_eq!(set.class_count(), 1);
    }

    #[test]
    fn same_class_by_name_reports_unknown_operand() {
        let (mut set, ids) = set_with(&["a", "b"]);
        set.union(ids[0], ids[1]);
        assert_eq!(set.same_class_by_name("a", "b"), Ok(true));
        assert_eq!(
            set.same_class_by_name("a", "c"),
            Err(UnknownElementError::new("c"))
        );
    }

    #[test]
    fn classes_are_sorted_partition() {
        let (mut set, ids) = set_with(&["d", "c", "b", "a"]);
        set.union(ids[0], ids[3]);
        set.union(ids[1], ids[2]);
        assert_eq!(set.classes(), vec![vec!["a", "d"], vec!["b", "c"]]);
    }

    #[test]
    fn display_prints_partition() {
        let (mut set, ids) = set_with(&["a", "b", "c"]);
        set.union(ids[0], ids[2]);
        assert_eq!(set.to_string(), "{{a, c}, {b}}");
        assert_eq!(DisjointSet::new().to_string(), "{}");
    }
}
