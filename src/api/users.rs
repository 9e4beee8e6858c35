//! User API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateUserRequest, ProvisionUserRequest, Role, User};
use crate::AppState;

/// GET /api/users - List all users.
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let users = state.repo.list_users().await?;
    success(users)
}

/// GET /api/users/:id - Get a single user.
pub async fn get_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<User> {
    match state.repo.get_user(&id).await? {
        Some(user) => success(user),
        None => Err(AppError::NotFound(format!("User {} not found", id))),
    }
}

/// POST /api/users - Create a user through admin user management.
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<User> {
    // Validate required fields
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if request.email.trim().is_empty() {
        return Err(AppError::Validation("Email is required".to_string()));
    }

    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        name: request.name,
        email: request.email,
        role: request.role,
        phone: request.phone,
        branch: request.branch,
    };

    state.repo.create_user(&user).await?;
    success(user)
}

/// DELETE /api/users/:id - Delete a user.
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    state.repo.delete_user(&id).await?;
    success(())
}

/// POST /api/users/provision - Auto-provision a profile on first sign-in.
///
/// Returns the stored profile when one exists. Otherwise synthesizes a
/// default profile (name from the email local-part, admin role only for the
/// configured bootstrap address) and persists it. A failed insert is logged
/// and the synthesized profile is returned anyway so access is never blocked
/// on a profile write.
pub async fn provision_user(
    State(state): State<AppState>,
    Json(request): Json<ProvisionUserRequest>,
) -> ApiResult<User> {
    if request.id.trim().is_empty() || request.email.trim().is_empty() {
        return Err(AppError::Validation("Id and email are required".to_string()));
    }

    if let Some(existing) = state.repo.get_user(&request.id).await? {
        return success(existing);
    }

    let role = if request.email == state.config.admin_email {
        Role::Admin
    } else {
        Role::Consultant
    };

    let name = request
        .email
        .split('@')
        .next()
        .unwrap_or(&request.email)
        .to_string();

    let user = User {
        id: request.id,
        name,
        email: request.email,
        role,
        phone: None,
        branch: None,
    };

    if let Err(e) = state.repo.create_user(&user).await {
        tracing::warn!("Failed to persist provisioned profile {}: {}", user.id, e);
    }

    success(user)
}
