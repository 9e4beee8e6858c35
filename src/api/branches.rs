//! Branch API endpoint.

use super::{success, ApiResult};
use crate::models::{all_branches, Branch};

/// GET /api/branches - The static branch list.
pub async fn list_branches() -> ApiResult<Vec<Branch>> {
    success(all_branches())
}
