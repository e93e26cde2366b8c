//! Offset pagination for outcome listings.

use serde::{Deserialize, Serialize};

use synthpop_core::constants::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
use synthpop_core::errors::{SynthpopError, SynthpopResult};

/// `?limit&offset` query parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageRequest {
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: usize,
}

impl PageRequest {
    pub fn new(limit: Option<usize>, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// [`DEFAULT_PAGE_LIMIT`] when absent; otherwise must be in `1..=MAX_PAGE_LIMIT`.
    pub fn resolved_limit(&self) -> SynthpopResult<usize> {
        match self.limit {
            None => Ok(DEFAULT_PAGE_LIMIT),
            Some(limit) if (1..=MAX_PAGE_LIMIT).contains(&limit) => Ok(limit),
            Some(limit) => Err(SynthpopError::validation(
                "limit",
                format!("must be within 1..={MAX_PAGE_LIMIT}, got {limit}"),
            )),
        }
    }
}

/// One page of a listing plus the size of the whole listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

impl<T> Page<T> {
    pub fn has_more(&self) -> bool {
        self.offset + self.items.len() < self.total
    }
}
