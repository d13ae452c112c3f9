//! # HTTP Handlers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Handler shape                                                          │
//! │                                                                         │
//! │  Path / Query / Json ──► parse + validate ──► repository ──► envelope  │
//! │                               │                    │                    │
//! │                               └──── ApiError ◄─────┘                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Path ids and paging parameters arrive as strings and go through
//! `bikeshop_core::validation`, so a malformed value is a
//! `VALIDATION_ERROR` body rather than a framework rejection.

pub mod health;
pub mod promo_code;
pub mod staff;
pub mod stock;

use bikeshop_core::validation::parse_list_params;
use bikeshop_core::{ListRequest, ValidationError};
use serde::Deserialize;

/// `?offset=&limit=&search=` on list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub offset: Option<String>,
    pub limit: Option<String>,
    pub search: Option<String>,
}

impl ListParams {
    pub fn into_request(self) -> Result<ListRequest, ValidationError> {
        parse_list_params(
            self.offset.as_deref(),
            self.limit.as_deref(),
            self.search.as_deref(),
        )
    }
}
