/// Data structures for DevProxy
use serde::{Deserialize, Serialize};

/// One entry of the vhosts.json payload. Extra fields are tolerated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VhostEntry {
    pub url: String,
}

/// A virtual host derived from a payload entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Host {
    pub name: String,
    pub url: String,
}

impl Host {
    pub fn new(name: String, url: String) -> Host {
        Host { name, url }
    }
}

/// Hosts sharing a base domain, in fetch order
#[derive(Debug, Clone, PartialEq)]
pub struct DomainGroup {
    pub domain: String,
    pub hosts: Vec<Host>,
}

/// Icon class for a host row, keyed on the first hostname label
pub fn service_icon_class(hostname: &str) -> &'static str {
    let prefix = hostname
        .split('.')
        .next()
        .unwrap_or_default()
        .to_lowercase();

    match prefix.as_str() {
        "api" => "icon-api",
        "fe" => "icon-fe",
        "cdn" => "icon-cdn",
        "docs" => "icon-docs",
        "admin" | "is" => "icon-admin",
        "mailpit" | "mailhog" | "mailtrap" | "smtp" | "mail" => "icon-mailpit",
        "npm" | "node" => "icon-npm",
        "rabbitmq" | "rabbit" | "rmq" => "icon-rabbitmq",
        "kadeck" | "kafka" => "icon-kafka",
        _ => "icon-default",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_deserialization_tolerates_extra_fields() {
        let json = r#"{"url": "https://api.foo.com", "comment": "staging"}"#;
        let entry: VhostEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.url, "https://api.foo.com");
    }

    #[test]
    fn test_entry_missing_url_is_an_error() {
        let json = r#"{"name": "api.foo.com"}"#;
        assert!(serde_json::from_str::<VhostEntry>(json).is_err());
    }

    #[test]
    fn test_service_icon_class_known_prefixes() {
        assert_eq!(service_icon_class("api.foo.com"), "icon-api");
        assert_eq!(service_icon_class("fe.foo.com"), "icon-fe");
        assert_eq!(service_icon_class("mailpit.foo.com"), "icon-mailpit");
        assert_eq!(service_icon_class("smtp.foo.com"), "icon-mailpit");
        assert_eq!(service_icon_class("rmq.foo.com"), "icon-rabbitmq");
        assert_eq!(service_icon_class("kafka.foo.com"), "icon-kafka");
    }

    #[test]
    fn test_service_icon_class_is_case_insensitive() {
        assert_eq!(service_icon_class("API.foo.com"), "icon-api");
    }

    #[test]
    fn test_service_icon_class_default() {
        assert_eq!(service_icon_class("grafana.foo.com"), "icon-default");
        assert_eq!(service_icon_class(""), "icon-default");
    }
}
