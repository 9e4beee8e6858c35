//! Database repository for CRUD operations.
//!
//! Uses prepared statements; writes are last-write-wins at the store layer.

use chrono::NaiveDate;
use sqlx::{Row, SqlitePool};

use crate::errors::AppError;
use crate::models::{CreateOrderRequest, Order, OrderStatus, Role, User};

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ==================== USER OPERATIONS ====================

    /// List all users.
    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        let rows = sqlx::query("SELECT id, name, email, role, phone, branch FROM users")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(user_from_row).collect())
    }

    /// Get a user by ID.
    pub async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query("SELECT id, name, email, role, phone, branch FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Insert a user record.
    ///
    /// Used both by admin user management (with a generated id) and by
    /// first-sign-in provisioning (with the identity provider's id).
    pub async fn create_user(&self, user: &User) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO users (id, name, email, role, phone, branch) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role.as_str())
        .bind(&user.phone)
        .bind(&user.branch)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete a user.
    pub async fn delete_user(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("User {} not found", id)));
        }

        Ok(())
    }

    // ==================== ORDER OPERATIONS ====================

    /// List all orders in store return order.
    pub async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        let rows = sqlx::query(
            r#"SELECT id, date_request, status, branch, consultant_id, consultant_name,
                      client, client_phone, volume, pump_type, concrete_date, concrete_time,
                      fck, contract, notes, observations
               FROM orders"#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(order_from_row).collect())
    }

    /// Get an order by ID.
    pub async fn get_order(&self, id: &str) -> Result<Option<Order>, AppError> {
        let row = sqlx::query(
            r#"SELECT id, date_request, status, branch, consultant_id, consultant_name,
                      client, client_phone, volume, pump_type, concrete_date, concrete_time,
                      fck, contract, notes, observations
               FROM orders WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(order_from_row))
    }

    /// Create a new order. Assigns a fresh id and forces the status to `Pending`.
    pub async fn create_order(&self, request: &CreateOrderRequest) -> Result<Order, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let date_request = request
            .date_request
            .unwrap_or_else(|| chrono::Utc::now().date_naive());

        sqlx::query(
            r#"INSERT INTO orders (
                id, date_request, status, branch, consultant_id, consultant_name,
                client, client_phone, volume, pump_type, concrete_date, concrete_time,
                fck, contract, notes, observations
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(&id)
        .bind(date_request)
        .bind(OrderStatus::Pending.as_str())
        .bind(&request.branch)
        .bind(&request.consultant_id)
        .bind(&request.consultant_name)
        .bind(&request.client)
        .bind(&request.client_phone)
        .bind(request.volume)
        .bind(&request.pump_type)
        .bind(request.concrete_date)
        .bind(&request.concrete_time)
        .bind(request.fck)
        .bind(request.contract)
        .bind(&request.notes)
        .bind(&request.observations)
        .execute(&self.pool)
        .await?;

        Ok(Order {
            id,
            date_request,
            status: OrderStatus::Pending,
            branch: request.branch.clone(),
            consultant_id: request.consultant_id.clone(),
            consultant_name: request.consultant_name.clone(),
            client: request.client.clone(),
            client_phone: request.client_phone.clone(),
            volume: request.volume,
            pump_type: request.pump_type.clone(),
            concrete_date: request.concrete_date,
            concrete_time: request.concrete_time.clone(),
            fck: request.fck,
            contract: request.contract,
            notes: request.notes.clone(),
            observations: request.observations.clone(),
        })
    }

    /// Update only the status column of an order.
    ///
    /// Any status can transition to any other; no source-state guard exists.
    pub async fn update_order_status(
        &self,
        id: &str,
        status: OrderStatus,
    ) -> Result<Order, AppError> {
        let result = sqlx::query("UPDATE orders SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Order {} not found", id)));
        }

        self.get_order(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Order {} not found", id)))
    }
}

// Helper functions for row conversion

fn user_from_row(row: &sqlx::sqlite::SqliteRow) -> User {
    let role: String = row.get("role");
    User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        role: Role::from_str(&role).unwrap_or(Role::Consultant),
        phone: row.get("phone"),
        branch: row.get("branch"),
    }
}

fn order_from_row(row: &sqlx::sqlite::SqliteRow) -> Order {
    let status: String = row.get("status");
    let date_request: NaiveDate = row.get("date_request");
    let concrete_date: NaiveDate = row.get("concrete_date");

    Order {
        id: row.get("id"),
        date_request,
        status: OrderStatus::from_str(&status).unwrap_or(OrderStatus::Pending),
        branch: row.get("branch"),
        consultant_id: row.get("consultant_id"),
        consultant_name: row.get("consultant_name"),
        client: row.get("client"),
        client_phone: row.get("client_phone"),
        volume: row.get("volume"),
        pump_type: row.get("pump_type"),
        concrete_date,
        concrete_time: row.get("concrete_time"),
        fck: row.get("fck"),
        contract: row.get("contract"),
        notes: row.get("notes"),
        observations: row.get("observations"),
    }
}
