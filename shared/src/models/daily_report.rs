//! Daily Report Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// End-of-day summary over the tabs opened on one business date
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    /// Business date (YYYY-MM-DD format)
    pub business_date: String,
    pub total_tabs: usize,
    pub open_tabs: usize,
    pub paid_tabs: usize,
    pub ready_tabs: usize,
    /// Σ totals of `pago` and `pronto` tabs
    pub revenue: Decimal,
    /// Σ totals of tabs still `novo`
    pub open_amount: Decimal,
    /// When the report was generated (Unix millis)
    pub generated_at: i64,
}

/// Query string for the daily report endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DailyReportQuery {
    /// Business date (YYYY-MM-DD); today when absent
    pub date: Option<String>,
}
