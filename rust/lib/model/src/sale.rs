use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Resource, WithId};

/// Lifecycle tag of a sale. Any status may follow any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum SaleStatus {
    Pending,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
    Unknown(i64),
}

impl From<i64> for SaleStatus {
    fn from(v: i64) -> Self {
        match v {
            1 => SaleStatus::Pending,
            2 => SaleStatus::Confirmed,
            3 => SaleStatus::Shipped,
            4 => SaleStatus::Delivered,
            5 => SaleStatus::Cancelled,
            other => SaleStatus::Unknown(other),
        }
    }
}

impl From<SaleStatus> for i64 {
    fn from(s: SaleStatus) -> Self {
        match s {
            SaleStatus::Pending => 1,
            SaleStatus::Confirmed => 2,
            SaleStatus::Shipped => 3,
            SaleStatus::Delivered => 4,
            SaleStatus::Cancelled => 5,
            SaleStatus::Unknown(v) => v,
        }
    }
}

impl fmt::Display for SaleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaleStatus::Pending => f.write_str("pending"),
            SaleStatus::Confirmed => f.write_str("confirmed"),
            SaleStatus::Shipped => f.write_str("shipped"),
            SaleStatus::Delivered => f.write_str("delivered"),
            SaleStatus::Cancelled => f.write_str("cancelled"),
            SaleStatus::Unknown(_) => f.write_str("unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub quantity_items: u32,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub discount: f64,
    pub status: SaleStatus,
    #[serde(default)]
    pub sale_date: String,
    pub customer_id: String,
    pub user_id: String,
    pub product_variation_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Sale {
    /// Amount actually charged.
    pub fn net_value(&self) -> f64 {
        self.value - self.discount
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSale {
    #[serde(default)]
    pub sku: Option<String>,
    pub quantity_items: u32,
    pub value: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default = "pending")]
    pub status: SaleStatus,
    /// Defaults to today (`YYYY-MM-DD`, local time).
    #[serde(default = "today")]
    pub sale_date: String,
    pub customer_id: String,
    pub user_id: String,
    pub product_variation_id: String,
}

fn pending() -> SaleStatus {
    SaleStatus::Pending
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

impl Resource for Sale {
    type Create = NewSale;
    type Update = WithId<NewSale>;

    const PATH: &'static str = "/sale";
    const NAME: &'static str = "sale";
    const PLURAL: &'static str = "sales";

    fn id(&self) -> &str {
        &self.id
    }

    fn label(&self) -> String {
        self.sku.clone().unwrap_or_else(|| self.id.clone())
    }
}

// ── Dashboard metrics ───────────────────────────────────────────────

/// Aggregates shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesMetrics {
    pub total_sales: usize,
    /// Σ (value − discount).
    pub total_revenue: f64,
    pub pending_sales: usize,
    /// Delivered sales.
    pub completed_sales: usize,
}

impl SalesMetrics {
    pub fn from_sales(sales: &[Sale]) -> Self {
        Self {
            total_sales: sales.len(),
            total_revenue: sales.iter().map(Sale::net_value).sum(),
            pending_sales: sales.iter().filter(|s| s.status == SaleStatus::Pending).count(),
            completed_sales: sales
                .iter()
                .filter(|s| s.status == SaleStatus::Delivered)
                .count(),
        }
    }

    /// The first `n` sales, in the order the API returned them.
    pub fn recent(sales: &[Sale], n: usize) -> &[Sale] {
        &sales[..sales.len().min(n)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sale(id: &str, value: f64, discount: f64, status: SaleStatus) -> Sale {
        Sale {
            id: id.into(),
            sku: None,
            quantity_items: 1,
            value,
            discount,
            status,
            sale_date: "2024-05-01".into(),
            customer_id: "c1".into(),
            user_id: "u1".into(),
            product_variation_id: "pv1".into(),
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn status_wire_format() {
        let s: SaleStatus = serde_json::from_value(json!(3)).unwrap();
        assert_eq!(s, SaleStatus::Shipped);
        assert_eq!(serde_json::to_value(SaleStatus::Cancelled).unwrap(), json!(5));

        let odd: SaleStatus = serde_json::from_value(json!(9)).unwrap();
        assert_eq!(odd, SaleStatus::Unknown(9));
        assert_eq!(serde_json::to_value(odd).unwrap(), json!(9));
        assert_eq!(odd.to_string(), "unknown");
    }

    #[test]
    fn out_of_range_status_keeps_the_list() {
        let row = |id: &str, status: i64| {
            json!({
                "id": id,
                "quantityItems": 1,
                "value": 10.0,
                "discount": 0.0,
                "status": status,
                "saleDate": "2024-05-01",
                "customerId": "c1",
                "userId": "u1",
                "productVariationId": "pv1"
            })
        };
        let sales: Vec<Sale> =
            serde_json::from_value(json!([row("s1", 1), row("s2", 300), row("s3", -1)])).unwrap();
        let statuses: Vec<SaleStatus> = sales.iter().map(|s| s.status).collect();
        assert_eq!(
            statuses,
            [SaleStatus::Pending, SaleStatus::Unknown(300), SaleStatus::Unknown(-1)]
        );
        assert_eq!(serde_json::to_value(&sales[1]).unwrap()["status"], json!(300));
        assert_eq!(serde_json::to_value(&sales[2]).unwrap()["status"], json!(-1));
    }

    #[test]
    fn new_sale_defaults() {
        let s: NewSale = serde_json::from_value(json!({
            "quantityItems": 2,
            "value": 100.0,
            "customerId": "c1",
            "userId": "u1",
            "productVariationId": "pv1"
        }))
        .unwrap();
        assert_eq!(s.status, SaleStatus::Pending);
        assert_eq!(s.discount, 0.0);
        assert_eq!(s.sale_date.len(), 10);
    }

    #[test]
    fn metrics() {
        let sales = vec![
            sale("1", 100.0, 10.0, SaleStatus::Pending),
            sale("2", 50.0, 0.0, SaleStatus::Delivered),
            sale("3", 30.0, 5.0, SaleStatus::Delivered),
            sale("4", 20.0, 0.0, SaleStatus::Cancelled),
        ];
        let m = SalesMetrics::from_sales(&sales);
        assert_eq!(m.total_sales, 4);
        assert_eq!(m.total_revenue, 185.0);
        assert_eq!(m.pending_sales, 1);
        assert_eq!(m.completed_sales, 2);
    }

    #[test]
    fn recent_is_a_prefix() {
        let sales: Vec<Sale> = (1..=7)
            .map(|i| sale(&i.to_string(), 1.0, 0.0, SaleStatus::Pending))
            .collect();
        let recent = SalesMetrics::recent(&sales, 5);
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].id, "1");
        assert_eq!(SalesMetrics::recent(&sales[..2], 5).len(), 2);
    }

    #[test]
    fn metrics_empty() {
        assert_eq!(SalesMetrics::from_sales(&[]), SalesMetrics::default());
    }
}
