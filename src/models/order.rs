//! Pour order model and request bodies.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a pour order.
///
/// `Scheduled` is part of the wire contract but no operation currently
/// assigns it; orders only move from `Pending` to `Approved` or `Rejected`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Approved,
    Rejected,
    Scheduled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Approved => "Approved",
            OrderStatus::Rejected => "Rejected",
            OrderStatus::Scheduled => "Scheduled",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(OrderStatus::Pending),
            "Approved" => Some(OrderStatus::Approved),
            "Rejected" => Some(OrderStatus::Rejected),
            "Scheduled" => Some(OrderStatus::Scheduled),
            _ => None,
        }
    }
}

/// A concrete-pour request submitted by a consultant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    /// Date the request was submitted.
    pub date_request: NaiveDate,
    pub status: OrderStatus,
    pub branch: String,
    pub consultant_id: String,
    pub consultant_name: String,
    pub client: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_phone: Option<String>,
    /// Requested volume in cubic meters.
    pub volume: f64,
    /// Discharge method (conventional, pumped, boom).
    pub pump_type: String,
    /// Date the pour is scheduled for.
    pub concrete_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub concrete_time: Option<String>,
    /// Concrete compressive-strength specification.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fck: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
}

/// Request body for submitting a new pour order.
///
/// The server assigns the id and forces the status to `Pending`; neither can
/// be supplied by the caller.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    /// Defaults to today when omitted.
    #[serde(default)]
    pub date_request: Option<NaiveDate>,
    pub branch: String,
    pub consultant_id: String,
    pub consultant_name: String,
    pub client: String,
    #[serde(default)]
    pub client_phone: Option<String>,
    pub volume: f64,
    pub pump_type: String,
    pub concrete_date: NaiveDate,
    #[serde(default)]
    pub concrete_time: Option<String>,
    #[serde(default)]
    pub fck: Option<f64>,
    #[serde(default)]
    pub contract: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub observations: Option<String>,
}

/// Request body for an order status transition.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}
