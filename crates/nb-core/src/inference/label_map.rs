//! Insertion-ordered mapping from class label to a per-class value.

use super::InferenceError;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt::Debug;

/// A small label → value map that iterates in insertion order.
///
/// Class counts are tiny, so lookups scan linearly; insertion order keeps
/// printed and serialized output reproducible.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelMap<L, V> {
    entries: Vec<(L, V)>,
}

impl<L, V> LabelMap<L, V> {
    /// Build from entries whose labels are already known to be distinct.
    pub(crate) fn from_distinct(entries: Vec<(L, V)>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&L, &V)> {
        self.entries.iter().map(|(l, v)| (l, v))
    }

    pub fn labels(&self) -> impl Iterator<Item = &L> {
        self.entries.iter().map(|(l, _)| l)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Entry at insertion position `index`.
    pub fn get_index(&self, index: usize) -> Option<(&L, &V)> {
        self.entries.get(index).map(|(l, v)| (l, v))
    }

    /// Apply `f` to every value, keeping labels and order.
    pub fn map_values<W>(&self, mut f: impl FnMut(&V) -> W) -> LabelMap<L, W>
    where
        L: Clone,
    {
        LabelMap {
            entries: self.entries.iter().map(|(l, v)| (l.clone(), f(v))).collect(),
        }
    }
}

impl<L: PartialEq, V> LabelMap<L, V> {
    /// Build from caller-supplied pairs, rejecting duplicate labels.
    pub fn from_pairs(pairs: Vec<(L, V)>) -> Result<Self, InferenceError>
    where
        L: Debug,
    {
        for (i, (label, _)) in pairs.iter().enumerate() {
            if pairs[..i].iter().any(|(other, _)| other == label) {
                return Err(InferenceError::invalid(
                    "labels",
                    format!("duplicate label {label:?}"),
                ));
            }
        }
        Ok(Self { entries: pairs })
    }

    pub fn get(&self, label: &L) -> Option<&V> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v)
    }

    pub fn contains(&self, label: &L) -> bool {
        self.get(label).is_some()
    }

    /// Position of `label` in insertion order.
    pub fn position(&self, label: &L) -> Option<usize> {
        self.entries.iter().position(|(l, _)| l == label)
    }
}

impl<L: Serialize, V: Serialize> Serialize for LabelMap<L, V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}
