//! Display helpers for content dates.

use time::{Date, format_description::FormatItem, macros::format_description};

pub const HUMAN_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");
pub const ISO_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// `March 5, 2024`.
pub fn format_human_date(date: Date) -> String {
    date.format(HUMAN_DATE_FORMAT)
        .unwrap_or_else(|_| format_iso_date(date))
}

/// `2024-03-05`, used for `<time datetime>` attributes.
pub fn format_iso_date(date: Date) -> String {
    date.format(ISO_DATE_FORMAT).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn formats_dates_for_humans_and_machines() {
        assert_eq!(format_human_date(date!(2024 - 03 - 05)), "March 5, 2024");
        assert_eq!(format_iso_date(date!(2024 - 03 - 05)), "2024-03-05");
    }
}
