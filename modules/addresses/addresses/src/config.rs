use serde::{Deserialize, Serialize};

/// Configuration for the addresses module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddressesConfig {
    /// First path segment of every admin route (`/{admin_prefix}/api/address`).
    #[serde(default = "default_admin_prefix")]
    pub admin_prefix: String,
    /// Language used to resolve city labels in `full_address`.
    #[serde(default = "default_locale")]
    pub locale: String,
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
    /// Capacity of the event fan-out channel behind the SSE stream.
    #[serde(default = "default_event_buffer")]
    pub event_buffer: usize,
}

impl Default for AddressesConfig {
    fn default() -> Self {
        Self {
            admin_prefix: default_admin_prefix(),
            locale: default_locale(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            event_buffer: default_event_buffer(),
        }
    }
}

fn default_admin_prefix() -> String {
    "admin".to_owned()
}

fn default_locale() -> String {
    "en".to_owned()
}

fn default_page_size() -> u64 {
    25
}

fn default_max_page_size() -> u64 {
    100
}

fn default_event_buffer() -> usize {
    1024
}
