//! Status enums for orders.

use serde::{Deserialize, Serialize};

/// Order lifecycle status as stored in `orders.status`.
///
/// Unknown values written by other tools are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Other(String),
}

impl OrderStatus {
    /// Arabic label shown on the admin dashboard.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "قيد المراجعة",
            Self::Confirmed => "مؤكد",
            Self::Shipped => "تم الشحن",
            Self::Delivered => "تم التسليم",
            Self::Other(raw) => raw,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Other(raw) => raw,
        }
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl From<String> for OrderStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => Self::Pending,
            "confirmed" => Self::Confirmed,
            "shipped" => Self::Shipped,
            "delivered" => Self::Delivered,
            _ => Self::Other(s),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_statuses_have_arabic_labels() {
        assert_eq!(OrderStatus::from("pending".to_string()).label(), "قيد المراجعة");
        assert_eq!(OrderStatus::from("delivered".to_string()).label(), "تم التسليم");
    }

    #[test]
    fn test_unknown_status_kept_raw() {
        let status = OrderStatus::from("cancelled".to_string());
        assert_eq!(status, OrderStatus::Other("cancelled".to_string()));
        assert_eq!(status.label(), "cancelled");
        assert_eq!(String::from(status), "cancelled");
    }

    #[test]
    fn test_serde_uses_raw_string() {
        let json = serde_json::to_string(&OrderStatus::Shipped).unwrap_or_default();
        assert_eq!(json, "\"shipped\"");
    }
}
