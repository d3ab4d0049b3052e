/// CSV export of the history ledger
///
/// One row per (day, tracker) pair across all archived records, oldest day
/// first. The format is consumed by external spreadsheet tooling.

use crate::domain::{calendar, HistoryLog};

/// Render the full history as CSV with a `Date,Name,Count` header.
pub fn history_to_csv(history: &HistoryLog) -> String {
    let mut csv = String::from("Date,Name,Count\n");

    for record in history.sorted() {
        for detail in &record.details {
            csv.push_str(&format!(
                "{},{},{}\n",
                calendar::format_key(record.date),
                csv_field(&detail.tracker_name),
                detail.count
            ));
        }
    }

    csv
}

/// Quote a field containing a comma or quote; embedded quotes are doubled.
fn csv_field(raw: &str) -> String {
    if raw.contains(',') || raw.contains('"') {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}
