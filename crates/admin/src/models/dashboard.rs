//! Dashboard view: catalog size, latest orders and their totals.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use kynship_core::{OrderId, OrderStatus};

/// Number of orders shown on the dashboard.
pub const RECENT_ORDER_LIMIT: i64 = 5;

/// One row of the recent-orders table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentOrder {
    pub id: OrderId,
    pub order_number: String,
    pub customer_name: String,
    pub total: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Counters computed over the recent orders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_orders: usize,
    pub pending_orders: usize,
    pub revenue: Decimal,
}

impl DashboardStats {
    #[must_use]
    pub fn from_orders(orders: &[RecentOrder]) -> Self {
        Self {
            total_orders: orders.len(),
            pending_orders: orders.iter().filter(|o| o.status.is_pending()).count(),
            revenue: orders.iter().map(|o| o.total).sum(),
        }
    }
}

/// Recent order as rendered, with its Arabic status label.
#[derive(Debug, Clone, Serialize)]
pub struct RecentOrderView {
    #[serde(flatten)]
    pub order: RecentOrder,
    pub status_label: String,
}

impl From<RecentOrder> for RecentOrderView {
    fn from(order: RecentOrder) -> Self {
        Self {
            status_label: order.status.label().to_string(),
            order,
        }
    }
}

/// Body of `GET /api/dashboard`.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub product_count: i64,
    pub stats: DashboardStats,
    pub recent_orders: Vec<RecentOrderView>,
}

impl Dashboard {
    #[must_use]
    pub fn new(product_count: i64, orders: Vec<RecentOrder>) -> Self {
        Self {
            product_count,
            stats: DashboardStats::from_orders(&orders),
            recent_orders: orders.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn order(id: i32, total: &str, status: &str) -> RecentOrder {
        RecentOrder {
            id: OrderId::new(id),
            order_number: format!("ORD-{id:04}"),
            customer_name: "أحمد".to_string(),
            total: Decimal::from_str(total).unwrap_or_default(),
            status: OrderStatus::from(status.to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_stats_over_orders() {
        let orders = vec![
            order(1, "1500.50", "pending"),
            order(2, "200.25", "delivered"),
            order(3, "99.25", "pending"),
        ];

        let stats = DashboardStats::from_orders(&orders);
        assert_eq!(stats.total_orders, 3);
        assert_eq!(stats.pending_orders, 2);
        assert_eq!(stats.revenue, Decimal::from_str("1800.00").unwrap_or_default());
    }

    #[test]
    fn test_empty_dashboard() {
        let dashboard = Dashboard::new(0, Vec::new());
        assert_eq!(dashboard.stats, DashboardStats::default());
        assert!(dashboard.recent_orders.is_empty());
    }

    #[test]
    fn test_view_carries_status_label() {
        let dashboard = Dashboard::new(12, vec![order(7, "10", "shipped")]);
        let json = serde_json::to_value(&dashboard).unwrap_or_default();
        assert_eq!(json["product_count"], 12);
        assert_eq!(json["recent_orders"][0]["status"], "shipped");
        assert_eq!(json["recent_orders"][0]["status_label"], "تم الشحن");
        assert_eq!(json["recent_orders"][0]["order_number"], "ORD-0007");
    }
}
