//! Server-wide timer/pagination configuration. Loading this from a file or CLI is the
//! embedder's job; this crate only owns the struct and its defaults.

use opcua_types::constants::{LIFETIME_COUNT, MAX_KEEP_ALIVE_COUNT, MAX_NO_OF_RETURNED_REFERENCES, PUBLISHING_INTERVAL_MS};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub publishing_interval_ms: u64,
    pub max_keep_alive_count: u32,
    pub lifetime_count: u32,
    pub max_no_of_returned_references: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            publishing_interval_ms: PUBLISHING_INTERVAL_MS,
            max_keep_alive_count: MAX_KEEP_ALIVE_COUNT,
            lifetime_count: LIFETIME_COUNT,
            max_no_of_returned_references: MAX_NO_OF_RETURNED_REFERENCES,
        }
    }
}
