/// Domain extraction and grouping logic for DevProxy
use std::collections::HashMap;
use std::fmt;

use url::Url;

use crate::vhost::{DomainGroup, Host, VhostEntry};

/// A payload entry whose url could not be parsed into a host
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidHostUrl {
    pub url: String,
    pub reason: String,
}

impl fmt::Display for InvalidHostUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid host url {:?}: {}", self.url, self.reason)
    }
}

/// Grouping result: valid hosts grouped by base domain, plus the
/// entries that were skipped. Skipped entries never abort the batch;
/// the caller is expected to log them.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupOutcome {
    pub groups: Vec<DomainGroup>,
    pub invalid: Vec<InvalidHostUrl>,
}

impl GroupOutcome {
    pub fn total_hosts(&self) -> usize {
        self.groups.iter().map(|g| g.hosts.len()).sum()
    }
}

/// Extract the base domain from a hostname: the last two dot-separated
/// labels, or the whole hostname when it has two or fewer labels.
///
/// Examples:
/// - api.foo.com → foo.com
/// - foo.com → foo.com
/// - localhost → localhost
pub fn base_domain(hostname: &str) -> String {
    let parts: Vec<&str> = hostname.split('.').collect();
    if parts.len() <= 2 {
        return hostname.to_string();
    }
    parts[parts.len() - 2..].join(".")
}

/// Parse one payload entry into a Host, extracting the hostname
pub fn parse_host(entry: &VhostEntry) -> Result<Host, InvalidHostUrl> {
    let parsed = Url::parse(&entry.url).map_err(|e| InvalidHostUrl {
        url: entry.url.clone(),
        reason: e.to_string(),
    })?;

    match parsed.host_str() {
        Some(hostname) => Ok(Host::new(hostname.to_string(), entry.url.clone())),
        None => Err(InvalidHostUrl {
            url: entry.url.clone(),
            reason: "url has no hostname".to_string(),
        }),
    }
}

/// Group hosts by base domain, sorted by domain key ascending.
/// Input order is preserved within each group and duplicates are kept.
pub fn group_hosts(entries: &[VhostEntry]) -> GroupOutcome {
    let mut by_domain: HashMap<String, Vec<Host>> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    let mut invalid = Vec::new();

    for entry in entries {
        match parse_host(entry) {
            Ok(host) => {
                let domain = base_domain(&host.name);
                if !by_domain.contains_key(&domain) {
                    order.push(domain.clone());
                }
                by_domain.entry(domain).or_default().push(host);
            }
            Err(e) => invalid.push(e),
        }
    }

    order.sort();

    let groups = order
        .into_iter()
        .map(|domain| {
            let hosts = by_domain.remove(&domain).unwrap_or_default();
            DomainGroup { domain, hosts }
        })
        .collect();

    GroupOutcome { groups, invalid }
}

/// Hostnames of the valid entries, in payload order. Invalid entries
/// are skipped, consistent with group_hosts.
pub fn extract_hostnames(entries: &[VhostEntry]) -> Vec<String> {
    entries
        .iter()
        .filter_map(|entry| parse_host(entry).ok())
        .map(|host| host.name)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(url: &str) -> VhostEntry {
        VhostEntry {
            url: url.to_string(),
        }
    }

    #[test]
    fn test_base_domain_subdomains() {
        assert_eq!(base_domain("api.foo.com"), "foo.com");
        assert_eq!(base_domain("deep.api.foo.com"), "foo.com");
    }

    #[test]
    fn test_base_domain_short_hostnames() {
        assert_eq!(base_domain("foo.com"), "foo.com");
        assert_eq!(base_domain("localhost"), "localhost");
    }

    #[test]
    fn test_parse_host_extracts_hostname() {
        let host = parse_host(&entry("https://api.foo.com:8443/path")).unwrap();
        assert_eq!(host.name, "api.foo.com");
        assert_eq!(host.url, "https://api.foo.com:8443/path");
    }

    #[test]
    fn test_parse_host_rejects_malformed_url() {
        let err = parse_host(&entry("not a url")).unwrap_err();
        assert_eq!(err.url, "not a url");
        assert!(!err.reason.is_empty());
    }

    #[test]
    fn test_group_hosts_by_base_domain() {
        let outcome = group_hosts(&[entry("https://api.foo.com"), entry("https://fe.foo.com")]);

        assert!(outcome.invalid.is_empty());
        assert_eq!(outcome.groups.len(), 1);
        assert_eq!(outcome.groups[0].domain, "foo.com");
        assert_eq!(outcome.groups[0].hosts[0].name, "api.foo.com");
        assert_eq!(outcome.groups[0].hosts[1].name, "fe.foo.com");
    }

    #[test]
    fn test_group_hosts_sorted_by_domain_key() {
        let outcome = group_hosts(&[
            entry("https://api.zeta.io"),
            entry("https://api.alpha.io"),
            entry("https://docs.zeta.io"),
        ]);

        let domains: Vec<&str> = outcome.groups.iter().map(|g| g.domain.as_str()).collect();
        assert_eq!(domains, vec!["alpha.io", "zeta.io"]);
        assert_eq!(outcome.groups[1].hosts.len(), 2);
    }

    #[test]
    fn test_group_hosts_keeps_duplicates() {
        let outcome = group_hosts(&[entry("https://api.foo.com"), entry("https://api.foo.com")]);

        assert_eq!(outcome.groups[0].hosts.len(), 2);
        assert_eq!(outcome.total_hosts(), 2);
    }

    #[test]
    fn test_group_hosts_skips_invalid_entries() {
        let outcome = group_hosts(&[
            entry("https://api.foo.com"),
            entry("::nope::"),
            entry("https://fe.foo.com"),
        ]);

        // The bad entry is reported but the rest of the batch survives
        assert_eq!(outcome.invalid.len(), 1);
        assert_eq!(outcome.invalid[0].url, "::nope::");
        assert_eq!(outcome.groups[0].hosts.len(), 2);
    }

    #[test]
    fn test_extract_hostnames_matches_grouping_policy() {
        let names = extract_hostnames(&[
            entry("https://api.foo.com"),
            entry("::nope::"),
            entry("https://fe.bar.com"),
        ]);

        assert_eq!(names, vec!["api.foo.com", "fe.bar.com"]);
    }

    #[test]
    fn test_group_hosts_empty_input() {
        let outcome = group_hosts(&[]);
        assert!(outcome.groups.is_empty());
        assert!(outcome.invalid.is_empty());
        assert_eq!(outcome.total_hosts(), 0);
    }
}
