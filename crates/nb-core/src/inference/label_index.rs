//! Label indexer: groups sample positions by class label.

use super::LabelMap;
use std::collections::HashMap;
use std::hash::Hash;

/// Label → ascending sample positions carrying that label.
///
/// Produced by [`index_by_label`], it is a full disjoint cover of `0..N`.
pub type LabelIndex<L> = LabelMap<L, Vec<usize>>;

impl<L> LabelMap<L, Vec<usize>> {
    /// Total number of indexed samples N.
    pub fn sample_count(&self) -> usize {
        self.values().map(Vec::len).sum()
    }

    /// Number of samples carrying each label, in label order.
    pub fn class_sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.values().map(Vec::len)
    }
}

/// Group sample indices by label.
///
/// Keys appear in first-encounter order and each index list is ascending.
/// An empty label slice yields an empty index.
///
/// # Example
/// ```
/// use nb_core::index_by_label;
///
/// let index = index_by_label(&["Y", "N", "Y", "Y"]);
/// assert_eq!(index.get(&"Y"), Some(&vec![0, 2, 3]));
/// assert_eq!(index.get(&"N"), Some(&vec![1]));
/// ```
pub fn index_by_label<L: Clone + Eq + Hash>(labels: &[L]) -> LabelIndex<L> {
    let mut slots: HashMap<&L, usize> = HashMap::new();
    let mut entries: Vec<(L, Vec<usize>)> = Vec::new();

    for (index, label) in labels.iter().enumerate() {
        match slots.get(label) {
            Some(&slot) => entries[slot].1.push(index),
            None => {
                slots.insert(label, entries.len());
                entries.push((label.clone(), vec![index]));
            }
        }
    }

    LabelMap::from_distinct(entries)
}
