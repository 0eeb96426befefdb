use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, Copy, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct LimitOffsetParams {
    /// Maximum number of items per page
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Number of items to skip
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    10
}

impl Default for LimitOffsetParams {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl LimitOffsetParams {
    pub fn validate(&self) -> Result<(), String> {
        if self.limit < 1 || self.limit > MAX_LIMIT {
            return Err(format!("limit must be between 1 and {MAX_LIMIT}"));
        }
        if self.offset < 0 {
            return Err("offset must be >= 0".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub limit: i64,
    pub offset: i64,
    pub total_items: i64,
    pub total_pages: i64,
}

impl PaginationMeta {
    pub fn new(limit: i64, offset: i64, total_items: i64) -> Self {
        let total_pages = if limit > 0 {
            (total_items + limit - 1) / limit
        } else {
            0
        };
        Self {
            limit,
            offset,
            total_items,
            total_pages,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub items: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(items: Vec<T>, params: LimitOffsetParams, total_items: i64) -> Self {
        Self {
            items,
            pagination: PaginationMeta::new(params.limit, params.offset, total_items),
        }
    }
}
