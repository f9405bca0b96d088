/// Hostname diffing between poll snapshots
use std::collections::HashSet;

/// Hostnames that appeared or disappeared between two snapshots.
/// Membership is set-based; order follows the source list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChangeSet {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl ChangeSet {
    pub fn has_changes(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }

    /// Everything in `previous` went away
    pub fn all_removed(previous: &[String]) -> ChangeSet {
        ChangeSet {
            added: Vec::new(),
            removed: dedup_in_order(previous),
        }
    }
}

/// Compare two hostname lists as sets. `added` preserves the order of
/// `current`, `removed` the order of `previous`; duplicates within a
/// list count once.
pub fn detect_changes(previous: &[String], current: &[String]) -> ChangeSet {
    let prev_set: HashSet<&str> = previous.iter().map(String::as_str).collect();
    let curr_set: HashSet<&str> = current.iter().map(String::as_str).collect();

    let added = dedup_in_order(current)
        .into_iter()
        .filter(|name| !prev_set.contains(name.as_str()))
        .collect();

    let removed = dedup_in_order(previous)
        .into_iter()
        .filter(|name| !curr_set.contains(name.as_str()))
        .collect();

    ChangeSet { added, removed }
}

fn dedup_in_order(names: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .filter(|name| seen.insert(name.as_str()))
        .cloned()
        .collect()
}
