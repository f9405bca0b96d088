/// Notification formatting for host changes
///
/// Turns a ChangeSet into at most two notices (one for additions, one
/// for removals). Displaying them is the background script's job; the
/// popup only formats and forwards.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::changes::ChangeSet;

const CONTEXT_MESSAGE: &str = "DevProxy Virtual Hosts";
const PREVIEW_LIMIT: usize = 3;

/// One notification event for the external sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub id: String,
    pub title: String,
    pub message: String,
    pub context_message: String,
}

impl Notice {
    fn new(title: String, message: String) -> Notice {
        Notice {
            id: format!("devproxy-notification-{}", Uuid::new_v4()),
            title,
            message,
            context_message: CONTEXT_MESSAGE.to_string(),
        }
    }
}

/// Format notices for a change set. Empty input yields no notices;
/// additions and removals may both fire in the same cycle.
pub fn notices_for(changes: &ChangeSet) -> Vec<Notice> {
    let mut notices = Vec::new();

    if !changes.added.is_empty() {
        let title = if changes.added.len() == 1 {
            "New Host Available".to_string()
        } else {
            format!("{} New Hosts Available", changes.added.len())
        };
        let message = if changes.added.len() == 1 {
            format!("{} is now available", changes.added[0])
        } else {
            format!("New hosts: {}", preview(&changes.added))
        };
        notices.push(Notice::new(title, message));
    }

    if !changes.removed.is_empty() {
        let title = if changes.removed.len() == 1 {
            "Host Removed".to_string()
        } else {
            format!("{} Hosts Removed", changes.removed.len())
        };
        let message = if changes.removed.len() == 1 {
            format!("{} is no longer available", changes.removed[0])
        } else {
            format!("Removed hosts: {}", preview(&changes.removed))
        };
        notices.push(Notice::new(title, message));
    }

    notices
}

/// First three names joined with ", ", with an ellipsis when truncated
fn preview(names: &[String]) -> String {
    let shown = names
        .iter()
        .take(PREVIEW_LIMIT)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");

    if names.len() > PREVIEW_LIMIT {
        format!("{}...", shown)
    } else {
        shown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_notices_for_empty_changes() {
        assert!(notices_for(&ChangeSet::default()).is_empty());
    }

    #[test]
    fn test_single_added_host() {
        let changes = ChangeSet {
            added: names(&["api.foo.com"]),
            removed: vec![],
        };
        let notices = notices_for(&changes);

        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].title, "New Host Available");
        assert_eq!(notices[0].message, "api.foo.com is now available");
        assert_eq!(notices[0].context_message, "DevProxy Virtual Hosts");
        assert!(notices[0].id.starts_with("devproxy-notification-"));
    }

    #[test]
    fn test_plural_added_hosts_with_ellipsis() {
        let changes = ChangeSet {
            added: names(&["a.foo.com", "b.foo.com", "c.foo.com", "d.foo.com"]),
            removed: vec![],
        };
        let notices = notices_for(&changes);

        assert_eq!(notices[0].title, "4 New Hosts Available");
        assert_eq!(
            notices[0].message,
            "New hosts: a.foo.com, b.foo.com, c.foo.com..."
        );
    }

    #[test]
    fn test_three_added_hosts_without_ellipsis() {
        let changes = ChangeSet {
            added: names(&["a.foo.com", "b.foo.com", "c.foo.com"]),
            removed: vec![],
        };
        let notices = notices_for(&changes);

        assert_eq!(notices[0].title, "3 New Hosts Available");
        assert_eq!(notices[0].message, "New hosts: a.foo.com, b.foo.com, c.foo.com");
    }

    #[test]
    fn test_single_removed_host() {
        let changes = ChangeSet {
            added: vec![],
            removed: names(&["api.foo.com"]),
        };
        let notices = notices_for(&changes);

        assert_eq!(notices[0].title, "Host Removed");
        assert_eq!(notices[0].message, "api.foo.com is no longer available");
    }

    #[test]
    fn test_plural_removed_hosts() {
        let changes = ChangeSet {
            added: vec![],
            removed: names(&["a.foo.com", "b.foo.com"]),
        };
        let notices = notices_for(&changes);

        assert_eq!(notices[0].title, "2 Hosts Removed");
        assert_eq!(notices[0].message, "Removed hosts: a.foo.com, b.foo.com");
    }

    #[test]
    fn test_added_and_removed_fire_together() {
        let changes = ChangeSet {
            added: names(&["new.foo.com"]),
            removed: names(&["old.foo.com"]),
        };
        let notices = notices_for(&changes);

        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].title, "New Host Available");
        assert_eq!(notices[1].title, "Host Removed");
    }

    #[test]
    fn test_notice_ids_are_unique() {
        let changes = ChangeSet {
            added: names(&["a.foo.com"]),
            removed: names(&["b.foo.com"]),
        };
        let notices = notices_for(&changes);
        assert_ne!(notices[0].id, notices[1].id);
    }
}
