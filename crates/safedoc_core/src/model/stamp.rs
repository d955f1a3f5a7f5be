//! Date/time stamps printed on signed documents.
//!
//! Forms are filled on site in Brazil; stamps use `dd/mm/yyyy` dates and
//! issue timestamps pinned to UTC-3.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// Signature date, `dd/mm/yyyy`.
pub fn signature_date(at: NaiveDateTime) -> String {
    at.format("%d/%m/%Y").to_string()
}

/// Signature time, `HH:MM`.
pub fn signature_time(at: NaiveDateTime) -> String {
    at.format("%H:%M").to_string()
}

/// Document issue timestamp, `dd/mm/yyyy HH:MM:SS (UTC-3)`.
pub fn issue_timestamp(now: DateTime<Utc>) -> String {
    let local = now.naive_utc() - Duration::hours(3);
    format!("{} (UTC-3)", local.format("%d/%m/%Y %H:%M:%S"))
}

/// Current local wall-clock time.
pub fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

#[cfg(test)]
mod tests {
    use super::{issue_timestamp, signature_date, signature_time};
    use chrono::{NaiveDate, TimeZone, Utc};

    #[test]
    fn signature_stamps_use_brazilian_format() {
        let at = NaiveDate::from_ymd_opt(2025, 10, 31)
            .unwrap()
            .and_hms_opt(7, 5, 59)
            .unwrap();
        assert_eq!(signature_date(at), "31/10/2025");
        assert_eq!(signature_time(at), "07:05");
    }

    #[test]
    fn issue_timestamp_shifts_to_utc_minus_three() {
        let now = Utc.with_ymd_and_hms(2025, 11, 1, 1, 40, 20).unwrap();
        assert_eq!(issue_timestamp(now), "31/10/2025 22:40:20 (UTC-3)");
    }
}
