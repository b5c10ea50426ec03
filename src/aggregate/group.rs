//! Grouping of hydrated items.

use std::collections::BTreeMap;

/// A closed set of group keys.
///
/// Groups are emitted in the key's `Ord` order, which should match
/// [`ALL`](GroupKey::ALL).
pub trait GroupKey: Copy + Ord + 'static {
    /// Every key, in display order.
    const ALL: &'static [Self];

    /// Display label of the group.
    fn label(self) -> &'static str;
}

/// One labelled group of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<K, T> {
    /// Group key.
    pub key: K,
    /// Display label.
    pub label: &'static str,
    /// Members, in input order.
    pub items: Vec<T>,
}

impl<K, T> Group<K, T> {
    /// Number of members.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the group has no members.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Group `items` by `key_fn`.
///
/// Groups are ordered by key and only non-empty groups are returned. Within
/// a group, items keep their input order, so the same input always yields
/// the same output.
pub fn group<K, T, F>(items: &[T], key_fn: F) -> Vec<Group<K, T>>
where
    K: GroupKey,
    T: Clone,
    F: Fn(&T) -> K,
{
    let mut buckets: BTreeMap<K, Vec<T>> = BTreeMap::new();
    for item in items {
        buckets.entry(key_fn(item)).or_default().push(item.clone());
    }
    buckets
        .into_iter()
        .map(|(key, items)| Group {
            key,
            label: key.label(),
            items,
        })
        .collect()
}

/// Like [`group`], but emits a group for every key, empty or not.
///
/// Tabbed screens use this so the tab set does not depend on the data.
pub fn group_all<K, T, F>(items: &[T], key_fn: F) -> Vec<Group<K, T>>
where
    K: GroupKey,
    T: Clone,
    F: Fn(&T) -> K,
{
    let mut buckets: BTreeMap<K, Vec<T>> = K::ALL.iter().map(|&key| (key, Vec::new())).collect();
    for item in items {
        buckets.entry(key_fn(item)).or_default().push(item.clone());
    }
    buckets
        .into_iter()
        .map(|(key, items)| Group {
            key,
            label: key.label(),
            items,
        })
        .collect()
}
