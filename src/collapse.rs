/// Collapsed/expanded state of domain groups
///
/// The default display depends on the total host count: above the
/// threshold every group starts collapsed, at or below it every group
/// starts expanded. Explicit user toggles are tracked as two disjoint
/// marker sets so either default can be overridden per domain.
use std::collections::HashSet;

pub const COLLAPSE_THRESHOLD: usize = 8;

const EXPANDED_PREFIX: &str = "expanded:";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CollapseState {
    collapsed: HashSet<String>,
    expanded: HashSet<String>,
}

impl CollapseState {
    pub fn new() -> CollapseState {
        CollapseState::default()
    }

    /// Effective display state of a group given the current host count
    pub fn is_collapsed(&self, domain: &str, total_host_count: usize) -> bool {
        if self.collapsed.contains(domain) {
            return true;
        }
        total_host_count > COLLAPSE_THRESHOLD && !self.expanded.contains(domain)
    }

    /// Flip the effective state of a group. The marker sets stay
    /// disjoint: a domain is never both collapsed and expanded.
    pub fn toggle(&mut self, domain: &str, total_host_count: usize) {
        if self.is_collapsed(domain, total_host_count) {
            self.collapsed.remove(domain);
            if total_host_count > COLLAPSE_THRESHOLD {
                self.expanded.insert(domain.to_string());
            }
        } else {
            self.expanded.remove(domain);
            self.collapsed.insert(domain.to_string());
        }
    }

    /// Drop all explicit markers so the default regime applies cleanly
    pub fn reset(&mut self) {
        self.collapsed.clear();
        self.expanded.clear();
    }

    /// Encode as the persisted list: plain keys are collapsed domains,
    /// "expanded:"-prefixed keys are expanded markers
    pub fn encode(&self) -> Vec<String> {
        let mut items: Vec<String> = self.collapsed.iter().cloned().collect();
        items.sort();

        let mut expanded: Vec<String> = self
            .expanded
            .iter()
            .map(|domain| format!("{}{}", EXPANDED_PREFIX, domain))
            .collect();
        expanded.sort();

        items.extend(expanded);
        items
    }

    pub fn decode(items: &[String]) -> CollapseState {
        let mut state = CollapseState::new();
        for item in items {
            match item.strip_prefix(EXPANDED_PREFIX) {
                Some(domain) => {
                    state.expanded.insert(domain.to_string());
                }
                None => {
                    state.collapsed.insert(item.clone());
                }
            }
        }
        // Disjointness: an explicit collapse wins over a stale marker
        state.expanded = &state.expanded - &state.collapsed;
        state
    }
}

/// Whether the host count moved across the collapse threshold between
/// two polls, in either direction
pub fn crossed_threshold(prev_total: usize, new_total: usize) -> bool {
    (prev_total <= COLLAPSE_THRESHOLD) != (new_total <= COLLAPSE_THRESHOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_expanded_below_threshold() {
        let state = CollapseState::new();
        assert!(!state.is_collapsed("foo.com", COLLAPSE_THRESHOLD));
    }

    #[test]
    fn test_default_collapsed_above_threshold() {
        let state = CollapseState::new();
        assert!(state.is_collapsed("foo.com", COLLAPSE_THRESHOLD + 1));
    }

    #[test]
    fn test_toggle_below_threshold() {
        let mut state = CollapseState::new();
        state.toggle("foo.com", 3);
        assert!(state.is_collapsed("foo.com", 3));

        state.toggle("foo.com", 3);
        assert!(!state.is_collapsed("foo.com", 3));
        // Below the threshold re-expanding needs no marker
        assert!(state.encode().is_empty());
    }

    #[test]
    fn test_toggle_above_threshold_records_expanded_marker() {
        let mut state = CollapseState::new();
        state.toggle("foo.com", 20);
        assert!(!state.is_collapsed("foo.com", 20));
        assert_eq!(state.encode(), vec!["expanded:foo.com".to_string()]);

        state.toggle("foo.com", 20);
        assert!(state.is_collapsed("foo.com", 20));
    }

    #[test]
    fn test_toggle_keeps_marker_sets_disjoint() {
        let mut state = CollapseState::new();
        state.toggle("foo.com", 20); // expanded marker
        state.toggle("foo.com", 20); // back to collapsed
        let encoded = state.encode();
        assert_eq!(encoded, vec!["foo.com".to_string()]);
    }

    #[test]
    fn test_reset_clears_all_markers() {
        let mut state = CollapseState::new();
        state.toggle("foo.com", 3);
        state.toggle("bar.com", 20);
        state.reset();
        assert!(state.encode().is_empty());
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let mut state = CollapseState::new();
        state.toggle("foo.com", 3); // collapsed
        state.toggle("bar.com", 20); // expanded marker

        let restored = CollapseState::decode(&state.encode());
        assert_eq!(restored, state);
        assert!(restored.is_collapsed("foo.com", 3));
        assert!(!restored.is_collapsed("bar.com", 20));
    }

    #[test]
    fn test_decode_drops_conflicting_expanded_marker() {
        let items = vec!["foo.com".to_string(), "expanded:foo.com".to_string()];
        let state = CollapseState::decode(&items);
        assert!(state.is_collapsed("foo.com", 20));
        assert_eq!(state.encode(), vec!["foo.com".to_string()]);
    }

    #[test]
    fn test_crossed_threshold_both_directions() {
        assert!(crossed_threshold(8, 9));
        assert!(crossed_threshold(9, 8));
        assert!(!crossed_threshold(8, 8));
        assert!(!crossed_threshold(9, 12));
        assert!(!crossed_threshold(0, 8));
    }
}
