//! Plain-text digests of the core report structures.

use datacat_core::{FreshnessReport, TableId};

/// One `schema.table` per line.
pub fn table_list(tables: &[TableId]) -> String {
    let mut out = String::new();
    for table in tables {
        out.push_str(&table.to_string());
        out.push('\n');
    }
    out
}

/// Digest of a reconciliation run.
pub fn reconcile(inserted: &[TableId]) -> String {
    if inserted.is_empty() {
        return String::from("No missing tables; annotation store already complete.\n");
    }
    let mut out = format!("# Tables added to the annotation store: {}\n", inserted.len());
    out.push_str(&table_list(inserted));
    out
}

/// Three-window updates digest: last month first when present, then this
/// month, then next month, with a blank line between sections.
pub fn updates(report: &FreshnessReport) -> String {
    let mut sections = Vec::new();
    if let Some(last) = &report.last_month {
        sections.push(section("# Last month updates:", last));
    }
    sections.push(section("# This month updates:", &report.this_month));
    if let Some(next) = &report.next_month {
        sections.push(section("# Next month updates:", next));
    }
    sections.join("\n\n") + "\n"
}

fn section(header: &str, tables: &[TableId]) -> String {
    let mut out = String::from(header);
    for table in tables {
        out.push('\n');
        out.push_str(&table.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(schema: &str, name: &str) -> TableId {
        TableId::new(schema, name)
    }

    #[test]
    fn test_table_list() {
        let tables = vec![id("weather", "readings"), id("weather", "stations")];
        assert_eq!(table_list(&tables), "weather.readings\nweather.stations\n");
        assert_eq!(table_list(&[]), "");
    }

    #[test]
    fn test_reconcile_digest() {
        assert_eq!(
            reconcile(&[]),
            "No missing tables; annotation store already complete.\n"
        );
        let out = reconcile(&[id("weather", "stations")]);
        assert_eq!(
            out,
            "# Tables added to the annotation store: 1\nweather.stations\n"
        );
    }

    #[test]
    fn test_updates_all_windows() {
        let report = FreshnessReport {
            this_month: vec![id("weather", "stations")],
            last_month: Some(vec![id("weather", "readings")]),
            next_month: None,
        };
        assert_eq!(
            updates(&report),
            "# Last month updates:\nweather.readings\n\n\
             # This month updates:\nweather.stations\n"
        );
    }

    #[test]
    fn test_updates_this_month_only() {
        let report = FreshnessReport {
            this_month: vec![],
            last_month: None,
            next_month: None,
        };
        assert_eq!(updates(&report), "# This month updates:\n");
    }

    #[test]
    fn test_updates_next_window() {
        let report = FreshnessReport {
            this_month: vec![id("weather", "stations")],
            last_month: None,
            next_month: Some(vec![id("weather", "forecasts")]),
        };
        assert_eq!(
            updates(&report),
            "# This month updates:\nweather.stations\n\n\
             # Next month updates:\nweather.forecasts\n"
        );
    }
}
