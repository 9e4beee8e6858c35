//! Dashboard API endpoint.

use axum::extract::{Query, State};
use chrono::NaiveDate;
use serde::Deserialize;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::all_branches;
use crate::workflow::{self, DashboardSummary};
use crate::AppState;

/// Query parameters for the dashboard report.
#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// GET /api/dashboard?start&end - Aggregate orders over a request-date range.
pub async fn dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> ApiResult<DashboardSummary> {
    if query.end < query.start {
        return Err(AppError::Validation(
            "End date must not precede start date".to_string(),
        ));
    }

    let orders = state.repo.list_orders().await?;
    let branches = all_branches();

    success(workflow::dashboard_summary(
        &orders,
        &branches,
        query.start,
        query.end,
    ))
}
