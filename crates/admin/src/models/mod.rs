//! Domain models for admin.

pub mod dashboard;
pub mod session;

pub use dashboard::{Dashboard, DashboardStats, RECENT_ORDER_LIMIT, RecentOrder, RecentOrderView};
pub use session::{CurrentAdmin, keys as session_keys};
