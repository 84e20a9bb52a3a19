//! Regions: ordered sets of site indices.
//!
//! A `Region` keeps sites in first-seen order and never holds the same
//! site twice. The order-preserving set helpers at the bottom of this file
//! are shared with the integer-array algebra.

use std::hash::Hash;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// An immutable, ordered, duplicate-free set of sites.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    sites: Vec<usize>,
}

impl Region {
    /// Create an empty region.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a region from sites, dropping repeats.
    pub fn from_sites(sites: impl IntoIterator<Item = usize>) -> Self {
        let sites: Vec<usize> = sites.into_iter().collect();
        Self {
            sites: dedup_ordered(&sites),
        }
    }

    /// Create a region from signed values, ignoring negative ones.
    pub fn from_values(values: &[i32]) -> Self {
        Self::from_sites(values.iter().filter_map(|&v| usize::try_from(v).ok()))
    }

    /// Sites in first-seen order.
    #[must_use]
    pub fn sites(&self) -> &[usize] {
        &self.sites
    }

    /// Iterate over the sites.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.sites.iter().copied()
    }

    /// Number of sites.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    /// Check if the region has no sites.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Check if a site belongs to the region.
    #[must_use]
    pub fn contains(&self, site: usize) -> bool {
        self.sites.contains(&site)
    }

    /// Sites as signed values.
    #[must_use]
    pub fn to_values(&self) -> Vec<i32> {
        self.sites.iter().map(|&s| s as i32).collect()
    }

    /// Sites of `self` followed by unseen sites of `other`.
    #[must_use]
    pub fn union(&self, other: &Region) -> Region {
        Region {
            sites: ordered_union(&self.sites, &other.sites),
        }
    }

    /// Sites of `self` that are also in `other`.
    #[must_use]
    pub fn intersection(&self, other: &Region) -> Region {
        Region {
            sites: ordered_intersection(&self.sites, &other.sites),
        }
    }

    /// Sites of `self` that are not in `other`.
    #[must_use]
    pub fn difference(&self, other: &Region) -> Region {
        Region {
            sites: ordered_difference(&self.sites, &other.sites),
        }
    }

    /// Same sites, ignoring order.
    #[must_use]
    pub fn set_eq(&self, other: &Region) -> bool {
        self.len() == other.len() && self.sites.iter().all(|s| other.contains(*s))
    }
}

impl FromIterator<usize> for Region {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self::from_sites(iter)
    }
}

impl<'a> IntoIterator for &'a Region {
    type Item = usize;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, usize>>;

    fn into_iter(self) -> Self::IntoIter {
        self.sites.iter().copied()
    }
}

/// Drop repeated values, keeping the first occurrence of each.
pub fn dedup_ordered<T: Copy + Eq + Hash>(values: &[T]) -> Vec<T> {
    let mut seen = FxHashSet::default();
    values.iter().copied().filter(|v| seen.insert(*v)).collect()
}

/// Values of `a` then unseen values of `b`, without repeats.
pub fn ordered_union<T: Copy + Eq + Hash>(a: &[T], b: &[T]) -> Vec<T> {
    let mut seen = FxHashSet::default();
    a.iter()
        .chain(b.iter())
        .copied()
        .filter(|v| seen.insert(*v))
        .collect()
}

/// Values of `a` present in `b`, in `a`'s order, without repeats.
pub fn ordered_intersection<T: Copy + Eq + Hash>(a: &[T], b: &[T]) -> Vec<T> {
    let keep: FxHashSet<T> = b.iter().copied().collect();
    let mut seen = FxHashSet::default();
    a.iter()
        .copied()
        .filter(|v| keep.contains(v) && seen.insert(*v))
        .collect()
}

/// Values of `source` absent from `sub`; repeats in `source` are kept.
pub fn ordered_difference<T: Copy + Eq + Hash>(source: &[T], sub: &[T]) -> Vec<T> {
    let remove: FxHashSet<T> = sub.iter().copied().collect();
    source.iter().copied().filter(|v| !remove.contains(v)).collect()
}
