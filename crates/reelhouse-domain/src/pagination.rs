//! Pagination parameters for list endpoints.

use serde::{Deserialize, Serialize};

/// Zero-based page request shared by admin list endpoints.
///
/// - `page_no`: ≥ 0, default 0 (query key `pageNo`)
/// - `limit`: 1–100, default 10
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    #[serde(default)]
    pub page_no: u32,
    #[serde(default = "default_limit")]
    pub limit: u32,
}

fn default_limit() -> u32 {
    10
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_no: 0,
            limit: default_limit(),
        }
    }
}

impl PageRequest {
    /// Clamp `limit` to the valid range 1–100.
    ///
    /// Call after deserializing from query params to enforce bounds.
    pub fn clamped(self) -> Self {
        Self {
            page_no: self.page_no,
            limit: self.limit.clamp(1, 100),
        }
    }

    pub fn offset(self) -> u64 {
        self.page_no as u64 * self.limit as u64
    }
}
