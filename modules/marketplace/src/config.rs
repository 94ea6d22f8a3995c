use serde::{Deserialize, Serialize};

use crate::domain::service::ServiceConfig;

/// Module configuration read from the `modules.marketplace` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MarketplaceConfig {
    /// Maximum allowed length of a venue name.
    #[serde(default = "default_max_venue_name_length")]
    pub max_venue_name_length: usize,
}

fn default_max_venue_name_length() -> usize {
    100
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            max_venue_name_length: default_max_venue_name_length(),
        }
    }
}

impl From<MarketplaceConfig> for ServiceConfig {
    fn from(cfg: MarketplaceConfig) -> Self {
        Self {
            max_venue_name_length: cfg.max_venue_name_length,
        }
    }
}
