//! Order workflow and reporting logic.
//!
//! Pure filtering and aggregation over in-memory order lists: the approvals
//! queue partition, role-gated calendar bucketing, and the dashboard summary.
//! The order list is the single source of truth for every derived view.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::models::{Branch, Order, OrderStatus, Role, User};

/// Minimum rendered bar height for a branch with any volume.
const MIN_BAR_HEIGHT_PX: f64 = 40.0;
/// Maximum rendered bar height.
const MAX_BAR_HEIGHT_PX: f64 = 240.0;

/// The approvals queue: pending orders on one side, everything else on the other.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalsQueue {
    pub pending: Vec<Order>,
    pub history: Vec<Order>,
}

/// Orders bucketed onto a single day cell of the displayed month.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub day: u32,
    pub orders: Vec<Order>,
}

/// Per-branch volume total with its scaled bar height.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchVolume {
    pub name: String,
    pub volume: f64,
    pub bar_height: f64,
}

/// Aggregated dashboard figures for a request-date range.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_volume: f64,
    pub order_count: usize,
    pub average_volume: i64,
    pub branches: Vec<BranchVolume>,
    pub orders: Vec<Order>,
}

/// Partition the order list into pending and history.
///
/// Every order lands in exactly one side; store return order is preserved.
pub fn partition_approvals(orders: &[Order]) -> ApprovalsQueue {
    let (pending, history) = orders
        .iter()
        .cloned()
        .partition(|o| o.status == OrderStatus::Pending);

    ApprovalsQueue { pending, history }
}

/// Whether an order is visible on the viewer's calendar.
///
/// Administrators see only approved orders; consultants see all of their own
/// orders regardless of status and nobody else's.
pub fn calendar_visible(order: &Order, viewer: &User) -> bool {
    match viewer.role {
        Role::Admin => order.status == OrderStatus::Approved,
        Role::Consultant => order.consultant_id == viewer.id,
    }
}

/// Bucket the viewer's visible orders onto the day cells of the displayed month.
///
/// An order appears on a day cell iff its concrete date's day, month and year
/// match that cell. Days without orders are omitted.
pub fn bucket_by_day(orders: &[Order], viewer: &User, year: i32, month: u32) -> Vec<CalendarDay> {
    let mut days: BTreeMap<u32, Vec<Order>> = BTreeMap::new();

    for order in orders {
        if !calendar_visible(order, viewer) {
            continue;
        }
        if order.concrete_date.year() == year && order.concrete_date.month() == month {
            days.entry(order.concrete_date.day())
                .or_default()
                .push(order.clone());
        }
    }

    days.into_iter()
        .map(|(day, orders)| CalendarDay { day, orders })
        .collect()
}

/// Compute the dashboard summary for the inclusive [start, end] range.
///
/// Orders are selected by request date, not concrete date. The average is
/// integer-rounded and 0 for an empty selection.
pub fn dashboard_summary(
    orders: &[Order],
    branches: &[Branch],
    start: NaiveDate,
    end: NaiveDate,
) -> DashboardSummary {
    let filtered: Vec<Order> = orders
        .iter()
        .filter(|o| o.date_request >= start && o.date_request <= end)
        .cloned()
        .collect();

    let total_volume: f64 = filtered.iter().map(|o| o.volume).sum();
    let order_count = filtered.len();
    let average_volume = if order_count > 0 {
        (total_volume / order_count as f64).round() as i64
    } else {
        0
    };

    let volumes: Vec<(String, f64)> = branches
        .iter()
        .map(|branch| {
            let volume: f64 = filtered
                .iter()
                .filter(|o| o.branch == branch.name)
                .map(|o| o.volume)
                .sum();
            (branch.name.clone(), volume)
        })
        .collect();

    let max_volume = volumes.iter().map(|(_, v)| *v).fold(1.0_f64, f64::max);

    let branches = volumes
        .into_iter()
        .map(|(name, volume)| BranchVolume {
            name,
            volume,
            bar_height: bar_height(volume, max_volume),
        })
        .collect();

    DashboardSummary {
        total_volume,
        order_count,
        average_volume,
        branches,
        orders: filtered,
    }
}

/// Scale a branch volume against the maximum, clamped to the pixel range.
/// A zero-volume branch renders no bar at all.
fn bar_height(volume: f64, max_volume: f64) -> f64 {
    if volume > 0.0 {
        ((volume / max_volume) * MAX_BAR_HEIGHT_PX).clamp(MIN_BAR_HEIGHT_PX, MAX_BAR_HEIGHT_PX)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::all_branches;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn order(id: &str, consultant_id: &str, status: OrderStatus) -> Order {
        Order {
            id: id.to_string(),
            date_request: date(2025, 12, 3),
            status,
            branch: "PIRACICABA".to_string(),
            consultant_id: consultant_id.to_string(),
            consultant_name: "Carlos".to_string(),
            client: "Acme".to_string(),
            client_phone: None,
            volume: 30.0,
            pump_type: "CONVENCIONAL".to_string(),
            concrete_date: date(2025, 12, 10),
            concrete_time: None,
            fck: None,
            contract: None,
            notes: None,
            observations: None,
        }
    }

    fn viewer(id: &str, role: Role) -> User {
        User {
            id: id.to_string(),
            name: "viewer".to_string(),
            email: "viewer@example.com".to_string(),
            role,
            phone: None,
            branch: None,
        }
    }

    #[test]
    fn approvals_partition_is_a_strict_bipartition() {
        let orders = vec![
            order("a", "c1", OrderStatus::Pending),
            order("b", "c1", OrderStatus::Approved),
            order("c", "c2", OrderStatus::Rejected),
            order("d", "c2", OrderStatus::Pending),
        ];

        let queue = partition_approvals(&orders);

        assert_eq!(queue.pending.len() + queue.history.len(), orders.len());
        assert!(queue.pending.iter().all(|o| o.status == OrderStatus::Pending));
        assert!(queue.history.iter().all(|o| o.status != OrderStatus::Pending));
        // Store order preserved within each side
        assert_eq!(queue.pending[0].id, "a");
        assert_eq!(queue.pending[1].id, "d");
        assert_eq!(queue.history[0].id, "b");
    }

    #[test]
    fn admin_calendar_shows_only_approved_orders() {
        let admin = viewer("admin-1", Role::Admin);

        assert!(calendar_visible(&order("a", "c1", OrderStatus::Approved), &admin));
        assert!(!calendar_visible(&order("b", "c1", OrderStatus::Pending), &admin));
        assert!(!calendar_visible(&order("c", "c2", OrderStatus::Rejected), &admin));
    }

    #[test]
    fn consultant_calendar_shows_own_orders_in_any_status() {
        let consultant = viewer("c1", Role::Consultant);

        assert!(calendar_visible(&order("a", "c1", OrderStatus::Pending), &consultant));
        assert!(calendar_visible(&order("b", "c1", OrderStatus::Rejected), &consultant));
        assert!(!calendar_visible(&order("c", "c2", OrderStatus::Approved), &consultant));
    }

    #[test]
    fn orders_bucket_onto_matching_day_cells_only() {
        let consultant = viewer("c1", Role::Consultant);
        let mut inside = order("a", "c1", OrderStatus::Pending);
        inside.concrete_date = date(2025, 12, 10);
        let mut same_day_other_month = order("b", "c1", OrderStatus::Pending);
        same_day_other_month.concrete_date = date(2025, 11, 10);
        let mut same_day_other_year = order("c", "c1", OrderStatus::Pending);
        same_day_other_year.concrete_date = date(2024, 12, 10);

        let days = bucket_by_day(
            &[inside, same_day_other_month, same_day_other_year],
            &consultant,
            2025,
            12,
        );

        assert_eq!(days.len(), 1);
        assert_eq!(days[0].day, 10);
        assert_eq!(days[0].orders.len(), 1);
        assert_eq!(days[0].orders[0].id, "a");
    }

    #[test]
    fn empty_dashboard_average_is_zero() {
        let summary = dashboard_summary(&[], &all_branches(), date(2025, 12, 1), date(2025, 12, 6));

        assert_eq!(summary.order_count, 0);
        assert_eq!(summary.total_volume, 0.0);
        assert_eq!(summary.average_volume, 0);
        assert!(summary.branches.iter().all(|b| b.bar_height == 0.0));
    }

    #[test]
    fn dashboard_aggregates_over_the_inclusive_request_date_range() {
        let mut a = order("a", "c1", OrderStatus::Pending);
        a.date_request = date(2025, 12, 1);
        a.volume = 30.0;
        let mut b = order("b", "c1", OrderStatus::Approved);
        b.date_request = date(2025, 12, 6);
        b.volume = 25.0;
        b.branch = "RIO CLARO".to_string();
        let mut outside = order("c", "c1", OrderStatus::Pending);
        outside.date_request = date(2025, 12, 7);

        let summary = dashboard_summary(
            &[a, b, outside],
            &all_branches(),
            date(2025, 12, 1),
            date(2025, 12, 6),
        );

        assert_eq!(summary.order_count, 2);
        assert_eq!(summary.total_volume, 55.0);
        // round(55 / 2) = 28
        assert_eq!(summary.average_volume, 28);

        let piracicaba = summary.branches.iter().find(|b| b.name == "PIRACICABA").unwrap();
        assert_eq!(piracicaba.volume, 30.0);
        assert_eq!(piracicaba.bar_height, MAX_BAR_HEIGHT_PX);

        let rio_claro = summary.branches.iter().find(|b| b.name == "RIO CLARO").unwrap();
        assert_eq!(rio_claro.volume, 25.0);
        assert_eq!(rio_claro.bar_height, 25.0 / 30.0 * MAX_BAR_HEIGHT_PX);

        let santa_barbara = summary
            .branches
            .iter()
            .find(|b| b.name == "SANTA BARBARA")
            .unwrap();
        assert_eq!(santa_barbara.volume, 0.0);
        assert_eq!(santa_barbara.bar_height, 0.0);
    }

    #[test]
    fn tiny_volumes_render_at_the_minimum_bar_height() {
        let mut small = order("a", "c1", OrderStatus::Pending);
        small.volume = 1.0;
        let mut big = order("b", "c1", OrderStatus::Pending);
        big.volume = 500.0;
        big.branch = "RIO CLARO".to_string();

        let summary = dashboard_summary(
            &[small, big],
            &all_branches(),
            date(2025, 12, 1),
            date(2025, 12, 6),
        );

        let piracicaba = summary.branches.iter().find(|b| b.name == "PIRACICABA").unwrap();
        assert_eq!(piracicaba.bar_height, MIN_BAR_HEIGHT_PX);
        let rio_claro = summary.branches.iter().find(|b| b.name == "RIO CLARO").unwrap();
        assert_eq!(rio_claro.bar_height, MAX_BAR_HEIGHT_PX);
    }
}
