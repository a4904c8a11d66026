// Configuration types module
// Defines the configuration data structures

use serde::Deserialize;

/// Main configuration structure
///
/// Only `port` is read from the environment. Every other environment
/// variable deserializes to an unknown key and is ignored.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
}
