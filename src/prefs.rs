/// User preferences: storage keys, theme choice, endpoint URL
pub const DEFAULT_VHOSTS_URL: &str = "https://localhost/vhosts.json";
pub const REFRESH_INTERVAL_MS: u32 = 5000;

pub const THEME_KEY: &str = "devproxy-theme";
pub const COLLAPSED_GROUPS_KEY: &str = "devproxy-collapsed-groups";
pub const VHOSTS_URL_KEY: &str = "devproxy-vhosts-url";

/// Theme choice; `System` means no stored preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    /// Stored representation; `System` is represented by removing the key
    pub fn stored_value(&self) -> Option<&'static str> {
        match self {
            Theme::Light => Some("light"),
            Theme::Dark => Some("dark"),
            Theme::System => None,
        }
    }

    pub fn from_stored(value: Option<&str>) -> Theme {
        match value {
            Some("light") => Theme::Light,
            Some("dark") => Theme::Dark,
            _ => Theme::System,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }
}

/// Endpoint to poll: the saved override when present and non-blank,
/// the default otherwise
pub fn resolve_vhosts_url(saved: Option<&str>) -> String {
    match saved.map(str::trim) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => DEFAULT_VHOSTS_URL.to_string(),
    }
}
