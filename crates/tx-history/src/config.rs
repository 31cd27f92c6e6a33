//! # History Engine Configuration

use serde::{Deserialize, Serialize};

/// Default largest accepted page size.
pub const DEFAULT_MAX_PAGE_SIZE: usize = 1000;

/// History engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Search text starting with any of these is treated as an address.
    pub address_prefixes: Vec<String>,

    /// Fixed UTC offset, in seconds, in which a searched calendar day
    /// starts. Must lie strictly within one day either way.
    pub utc_offset_secs: i32,

    /// Largest page size a caller may request.
    pub max_page_size: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            address_prefixes: vec!["ckb".to_string(), "ckt".to_string()],
            utc_offset_secs: 0,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
        }
    }
}

impl HistoryConfig {
    /// Create a config for testing (small pages).
    pub fn for_testing() -> Self {
        Self {
            max_page_size: 50,
            ..Self::default()
        }
    }

    pub fn with_address_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.address_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_utc_offset_secs(mut self, secs: i32) -> Self {
        self.utc_offset_secs = secs;
        self
    }

    pub fn with_max_page_size(mut self, size: usize) -> Self {
        self.max_page_size = size;
        self
    }
}
