//! Order API endpoints.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use serde::Deserialize;

use super::{success, ApiResult};
use crate::auth::USER_ID_HEADER;
use crate::errors::AppError;
use crate::models::{CreateOrderRequest, Order, UpdateOrderStatusRequest, User};
use crate::workflow::{self, ApprovalsQueue, CalendarDay};
use crate::AppState;

/// GET /api/orders - List all orders.
pub async fn list_orders(State(state): State<AppState>) -> ApiResult<Vec<Order>> {
    let orders = state.repo.list_orders().await?;
    success(orders)
}

/// GET /api/orders/:id - Get a single order.
pub async fn get_order(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Order> {
    match state.repo.get_order(&id).await? {
        Some(order) => success(order),
        None => Err(AppError::NotFound(format!("Order {} not found", id))),
    }
}

/// POST /api/orders - Submit a new pour order.
///
/// The status is forced to `Pending` regardless of input. On success a
/// best-effort notification is fired; its failure never affects the response.
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> ApiResult<Order> {
    // Validate required fields
    if request.client.trim().is_empty() {
        return Err(AppError::Validation("Client is required".to_string()));
    }
    if request.branch.trim().is_empty() {
        return Err(AppError::Validation("Branch is required".to_string()));
    }
    if request.consultant_id.trim().is_empty() {
        return Err(AppError::Validation("Consultant id is required".to_string()));
    }
    if request.volume <= 0.0 {
        return Err(AppError::Validation(
            "Volume must be greater than zero".to_string(),
        ));
    }

    let order = state.repo.create_order(&request).await?;

    state.notifier.order_created(&order, &order.consultant_name);

    success(order)
}

/// PUT /api/orders/:id/status - Transition an order to a new status.
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateOrderStatusRequest>,
) -> ApiResult<Order> {
    let order = state.repo.update_order_status(&id, request.status).await?;
    success(order)
}

/// GET /api/orders/approvals - The approvals queue partition.
pub async fn approvals_queue(State(state): State<AppState>) -> ApiResult<ApprovalsQueue> {
    let orders = state.repo.list_orders().await?;
    success(workflow::partition_approvals(&orders))
}

/// Query parameters for the calendar view.
#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: i32,
    pub month: u32,
}

/// GET /api/orders/calendar?year&month - Role-gated day buckets for a month.
///
/// The viewer is identified by the `x-user-id` header and resolved against
/// the users table to apply role gating.
pub async fn calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
    headers: HeaderMap,
) -> ApiResult<Vec<CalendarDay>> {
    if !(1..=12).contains(&query.month) {
        return Err(AppError::Validation(format!(
            "Invalid month: {}",
            query.month
        )));
    }

    let viewer = resolve_viewer(&state, &headers).await?;
    let orders = state.repo.list_orders().await?;

    success(workflow::bucket_by_day(
        &orders,
        &viewer,
        query.year,
        query.month,
    ))
}

/// Resolve the acting user from the `x-user-id` header.
async fn resolve_viewer(state: &AppState, headers: &HeaderMap) -> Result<User, AppError> {
    let id = headers
        .get(USER_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing x-user-id header".to_string()))?;

    state
        .repo
        .get_user(id)
        .await?
        .ok_or_else(|| AppError::Unauthorized(format!("Unknown user {}", id)))
}
