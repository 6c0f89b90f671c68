//! Pagination limits and defaults
//!
//! The constants are the wire contract shared by the server and every client
//! that builds list URLs. `PaginationConfig` carries the tunable subset per
//! resource so two resources can use different limits without touching
//! global state.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::params::SortOrder;

/// Lowest valid page number.
pub const PAGE_MIN: u64 = 1;

/// Page used when the request carries no usable `page`.
pub const DEFAULT_PAGE: u64 = 1;

/// Lowest valid page size.
pub const LIMIT_MIN: u64 = 1;

/// Highest page size a client may request.
pub const LIMIT_MAX: u64 = 100;

/// Page size used when the request carries no usable `limit`.
pub const DEFAULT_LIMIT: u64 = 10;

/// What to do with a `limit` above `max_limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverLimitPolicy {
    /// Serve `max_limit` rows.
    #[default]
    Clamp,
    /// Ignore the request and serve `default_limit` rows.
    Fallback,
}

/// Per-resource pagination settings.
///
/// `Default` yields the contract constants: page 1, 10 rows, at most 100,
/// over-limit requests clamped, newest-first ordering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_limits"))]
pub struct PaginationConfig {
    #[validate(range(min = 1))]
    pub default_page: u64,
    #[validate(range(min = 1))]
    pub default_limit: u64,
    #[validate(range(min = 1))]
    pub max_limit: u64,
    pub over_limit: OverLimitPolicy,
    pub default_order: SortOrder,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page: DEFAULT_PAGE,
            default_limit: DEFAULT_LIMIT,
            max_limit: LIMIT_MAX,
            over_limit: OverLimitPolicy::Clamp,
            default_order: SortOrder::Desc,
        }
    }
}

impl PaginationConfig {
    /// Same defaults with a different ceiling.
    pub fn with_max_limit(mut self, max_limit: u64) -> Self {
        self.max_limit = max_limit;
        self
    }

    pub fn with_default_limit(mut self, default_limit: u64) -> Self {
        self.default_limit = default_limit;
        self
    }

    pub fn with_over_limit(mut self, policy: OverLimitPolicy) -> Self {
        self.over_limit = policy;
        self
    }

    pub fn with_default_order(mut self, order: SortOrder) -> Self {
        self.default_order = order;
        self
    }
}

fn validate_limits(config: &PaginationConfig) -> Result<(), ValidationError> {
    if config.max_limit > LIMIT_MAX {
        let mut err = ValidationError::new("max_limit_above_contract");
        err.message = Some(format!("max_limit must not exceed {LIMIT_MAX}").into());
        return Err(err);
    }
    if config.default_limit > config.max_limit {
        let mut err = ValidationError::new("default_limit_above_max");
        err.message = Some("default_limit must not exceed max_limit".into());
        return Err(err);
    }
    Ok(())
}
