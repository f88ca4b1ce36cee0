//! Daily report over the timestamp index

use chrono::NaiveDate;
use chrono_tz::Tz;
use shared::models::{DailyReport, TabStatus};
use shared::util::now_millis;

use crate::store::{Store, StoreResult};
use crate::utils::time::{day_end_millis, day_start_millis};

/// Summarize the tabs whose timestamp falls on `date` in `tz`
///
/// Revenue counts `pago` and `pronto` tabs; the open amount counts `novo`.
pub fn daily_report(store: &Store, date: NaiveDate, tz: Tz) -> StoreResult<DailyReport> {
    let start = day_start_millis(date, tz);
    let end = day_end_millis(date, tz);
    let tabs = store.list_tabs_in_range(start, end)?;

    let mut report = DailyReport {
        business_date: date.format("%Y-%m-%d").to_string(),
        total_tabs: tabs.len(),
        generated_at: now_millis(),
        ..Default::default()
    };

    for tab in &tabs {
        match tab.status {
            TabStatus::New => {
                report.open_tabs += 1;
                report.open_amount += tab.total;
            }
            TabStatus::Paid => {
                report.paid_tabs += 1;
                report.revenue += tab.total;
            }
            TabStatus::Ready => {
                report.ready_tabs += 1;
                report.revenue += tab.total;
            }
        }
    }
    report.revenue = report.revenue.round_dp(2);
    report.open_amount = report.open_amount.round_dp(2);

    Ok(report)
}
