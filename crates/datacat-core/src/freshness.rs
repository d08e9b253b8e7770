//! Update-month tracking and the three-window freshness report.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::Result;
use crate::month::Month;
use crate::types::TableId;

/// The calendar windows a freshness report covers for a given date.
///
/// The report always covers the current month. During the first ten days of
/// the month it also looks back at the previous month; after the twentieth it
/// also looks ahead to the next one. Days 11-20 cover the current month only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindows {
    /// The month of the report date.
    pub this_month: Month,
    /// The previous month, when the date falls on day 10 or earlier.
    pub last_month: Option<Month>,
    /// The next month, when the date falls after day 20.
    pub next_month: Option<Month>,
}

/// Compute which calendar windows a report for `today` includes.
///
/// Pure function of the date; the neighbor months wrap across the year
/// boundary.
pub fn report_windows(today: NaiveDate) -> ReportWindows {
    // Calendar months are always 1-12, so this indexing cannot fail.
    let this_month = Month::ALL[today.month0() as usize];
    ReportWindows {
        this_month,
        last_month: (today.day() <= 10).then(|| this_month.prev()),
        next_month: (today.day() > 20).then(|| this_month.next()),
    }
}

/// Tables expected to refresh in the current, previous and next month
/// windows. Structured output; text formatting belongs to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FreshnessReport {
    /// Tables updating this month.
    pub this_month: Vec<TableId>,
    /// Tables updating last month; present during the first ten days.
    pub last_month: Option<Vec<TableId>>,
    /// Tables updating next month; present after the twentieth.
    pub next_month: Option<Vec<TableId>>,
}

/// Tables whose annotated month set contains `month`, ordered by
/// `(schema, table)`.
pub async fn tables_for_month(db: &PgPool, month: Month) -> Result<Vec<TableId>> {
    let rows = sqlx::query(
        "SELECT table_schema, table_name
         FROM public.datacat
         WHERE $1 = ANY (update_months)
         ORDER BY table_schema, table_name",
    )
    .bind(month)
    .fetch_all(db)
    .await?;

    Ok(rows.iter().map(TableId::from_row).collect())
}

/// Compose the freshness report for `today`.
pub async fn report(db: &PgPool, today: NaiveDate) -> Result<FreshnessReport> {
    let windows = report_windows(today);

    let this_month = tables_for_month(db, windows.this_month).await?;
    let last_month = match windows.last_month {
        Some(month) => Some(tables_for_month(db, month).await?),
        None => None,
    };
    let next_month = match windows.next_month {
        Some(month) => Some(tables_for_month(db, month).await?),
        None => None,
    };

    Ok(FreshnessReport {
        this_month,
        last_month,
        next_month,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_windows_early_month_adds_last() {
        let windows = report_windows(date(2026, 6, 5));
        assert_eq!(windows.this_month, Month::June);
        assert_eq!(windows.last_month, Some(Month::May));
        assert_eq!(windows.next_month, None);
    }

    #[test]
    fn test_windows_mid_month_only_this() {
        let windows = report_windows(date(2026, 6, 15));
        assert_eq!(windows.this_month, Month::June);
        assert_eq!(windows.last_month, None);
        assert_eq!(windows.next_month, None);
    }

    #[test]
    fn test_windows_late_month_adds_next() {
        let windows = report_windows(date(2026, 6, 25));
        assert_eq!(windows.this_month, Month::June);
        assert_eq!(windows.last_month, None);
        assert_eq!(windows.next_month, Some(Month::July));
    }

    #[test]
    fn test_windows_day_thresholds_exact() {
        assert!(report_windows(date(2026, 6, 10)).last_month.is_some());
        assert!(report_windows(date(2026, 6, 11)).last_month.is_none());
        assert!(report_windows(date(2026, 6, 20)).next_month.is_none());
        assert!(report_windows(date(2026, 6, 21)).next_month.is_some());
    }

    #[test]
    fn test_windows_wrap_year_boundary() {
        let january = report_windows(date(2026, 1, 3));
        assert_eq!(january.last_month, Some(Month::December));

        let december = report_windows(date(2026, 12, 28));
        assert_eq!(december.next_month, Some(Month::January));
    }
}
