//! Set-intersection grouping.
//!
//! Every element is assigned the [`Group`] of categories that contain it, and
//! groups are counted. Group identity is the sorted, deduplicated list of
//! category names, so the same membership always yields the same group no
//! matter the order categories were supplied in.
//!
//! ```
//! use upset_viz::intersection::{intersection_sizes, Categories, Group};
//!
//! let categories = Categories::new()
//!     .with("A", [1, 2, 3])
//!     .with("B", [2, 3, 4])
//!     .with("C", [4, 5]);
//!
//! let sizes = intersection_sizes(&categories);
//! assert_eq!(sizes.get(&Group::new(["A", "B"])), 2);
//! assert_eq!(sizes.total(), 5);
//! ```

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

/// Named categories of elements, kept in insertion order.
///
/// Insertion order fixes the vertical order of category rows in a plot.
#[derive(Debug, Clone)]
pub struct Categories<E> {
    entries: Vec<(String, HashSet<E>)>,
}

impl<E> Default for Categories<E> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<E: Eq + Hash> Categories<E> {
    /// Create an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with<I>(mut self, name: impl Into<String>, elements: I) -> Self
    where
        I: IntoIterator<Item = E>,
    {
        self.insert(name, elements);
        self
    }

    /// Insert a category.
    ///
    /// Re-inserting an existing name replaces its elements in place and
    /// returns the previous set; the category keeps its original position.
    pub fn insert<I>(&mut self, name: impl Into<String>, elements: I) -> Option<HashSet<E>>
    where
        I: IntoIterator<Item = E>,
    {
        let name = name.into();
        let elements: HashSet<E> = elements.into_iter().collect();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, elements)),
            None => {
                self.entries.push((name, elements));
                None
            }
        }
    }

    /// Number of categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no categories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Category names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Elements of a category.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&HashSet<E>> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, elements)| elements)
    }

    /// Position of a category in insertion order.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }

    /// Number of distinct elements in a category.
    #[must_use]
    pub fn count(&self, name: &str) -> Option<usize> {
        self.get(name).map(HashSet::len)
    }

    /// Per-category element counts, in insertion order.
    #[must_use]
    pub fn counts(&self) -> Vec<usize> {
        self.entries.iter().map(|(_, elements)| elements.len()).collect()
    }

    /// Iterate `(name, elements)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HashSet<E>)> {
        self.entries.iter().map(|(name, elements)| (name.as_str(), elements))
    }

    /// Number of distinct elements across all categories.
    #[must_use]
    pub fn distinct_elements(&self) -> usize {
        self.entries.iter().flat_map(|(_, elements)| elements.iter()).collect::<HashSet<_>>().len()
    }
}

impl<N, I, E> FromIterator<(N, I)> for Categories<E>
where
    N: Into<String>,
    I: IntoIterator<Item = E>,
    E: Eq + Hash,
{
    fn from_iter<T: IntoIterator<Item = (N, I)>>(iter: T) -> Self {
        let mut categories = Self::new();
        for (name, elements) in iter {
            categories.insert(name, elements);
        }
        categories
    }
}

/// The set of categories an element belongs to.
///
/// Names are stored sorted and deduplicated. Groups order lexicographically
/// by their names, which is the tie-break when two groups have equal counts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Group(Vec<String>);

impl Group {
    /// Build a group from category names in any order.
    #[must_use]
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names.into_iter().map(Into::into).collect();
        names.sort_unstable();
        names.dedup();
        Self(names)
    }

    /// Member category names, sorted.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Number of member categories.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.0.len()
    }

    /// Whether the group has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `category` is a member.
    #[must_use]
    pub fn contains(&self, category: &str) -> bool {
        self.0.binary_search_by(|name| name.as_str().cmp(category)).is_ok()
    }

    /// Whether every one of `categories` is a member.
    #[must_use]
    pub fn is_superset_of<S: AsRef<str>>(&self, categories: &[S]) -> bool {
        categories.iter().all(|c| self.contains(c.as_ref()))
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("(none)");
        }
        f.write_str(&self.0.join(" & "))
    }
}

/// Element counts per realized group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Intersections {
    counts: HashMap<Group, usize>,
}

impl Intersections {
    /// Count for a group (0 if the group is not realized).
    #[must_use]
    pub fn get(&self, group: &Group) -> usize {
        self.counts.get(group).copied().unwrap_or(0)
    }

    /// Number of realized groups.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no group is realized (no elements at all).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all group counts; equals the number of distinct elements.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterate `(group, count)` in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&Group, usize)> {
        self.counts.iter().map(|(group, &count)| (group, count))
    }

    /// Groups by descending count, ties broken by group order.
    #[must_use]
    pub fn ordered(&self) -> Vec<(Group, usize)> {
        let mut ordered: Vec<(Group, usize)> =
            self.counts.iter().map(|(group, &count)| (group.clone(), count)).collect();
        ordered.sort_by(|(ga, ca), (gb, cb)| cb.cmp(ca).then_with(|| ga.cmp(gb)));
        ordered
    }
}

/// Map every element to the group of categories containing it.
#[must_use]
pub fn element_groups<E>(categories: &Categories<E>) -> HashMap<E, Group>
where
    E: Eq + Hash + Clone,
{
    let mut matches: HashMap<E, Vec<&str>> = HashMap::new();
    for (name, elements) in categories.iter() {
        for element in elements {
            matches.entry(element.clone()).or_default().push(name);
        }
    }

    matches.into_iter().map(|(element, names)| (element, Group::new(names))).collect()
}

/// Count the elements realizing each distinct group.
#[must_use]
pub fn intersection_sizes<E>(categories: &Categories<E>) -> Intersections
where
    E: Eq + Hash + Clone,
{
    let mut counts: HashMap<Group, usize> = HashMap::new();
    for group in element_groups(categories).into_values() {
        *counts.entry(group).or_insert(0) += 1;
    }
    Intersections { counts }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_categories() -> impl Strategy<Value = Vec<Vec<u8>>> {
        prop::collection::vec(prop::collection::vec(0u8..40, 0..25), 0..6)
    }

    fn build(raw: &[Vec<u8>]) -> Categories<u8> {
        raw.iter().enumerate().map(|(i, elems)| (format!("cat{i}"), elems.clone())).collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_counts_sum_to_distinct_elements(raw in arb_categories()) {
            let categories = build(&raw);
            let distinct: HashSet<u8> = raw.iter().flatten().copied().collect();

            prop_assert_eq!(intersection_sizes(&categories).total(), distinct.len());
        }

        #[test]
        fn prop_each_element_in_its_membership_group(raw in arb_categories()) {
            let categories = build(&raw);
            let groups = element_groups(&categories);

            for (element, group) in &groups {
                let expected = Group::new(
                    categories.iter().filter(|(_, elems)| elems.contains(element)).map(|(n, _)| n),
                );
                prop_assert_eq!(group, &expected);
                prop_assert!(!group.is_empty());
            }
        }

        #[test]
        fn prop_ordered_is_non_increasing_and_deterministic(raw in arb_categories()) {
            let categories = build(&raw);
            let first = intersection_sizes(&categories).ordered();
            let second = intersection_sizes(&categories).ordered();

            prop_assert!(first.windows(2).all(|w| w[0].1 >= w[1].1));
            prop_assert_eq!(first, second);
        }
    }
}
