//! Display formatting for entry dates

use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

use crate::feed::Entry;

/// Label for entries without any usable date
pub const JUST_NOW: &str = "Gerade eben";

/// Date label of an entry: the hand-written label when present, otherwise
/// the creation time in local time
pub fn date_label(entry: &Entry) -> String {
    date_label_in(entry, &Local)
}

/// [`date_label`] with an explicit time zone
pub fn date_label_in<Tz>(entry: &Entry, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if let Some(label) = entry
        .date_label
        .as_deref()
        .map(str::trim)
        .filter(|l| !l.is_empty())
    {
        return label.to_string();
    }

    match entry.created_at {
        Some(ts) => format_timestamp(ts, tz),
        None => JUST_NOW.to_string(),
    }
}

/// Medium date plus short time, German style (`18.10.2026, 14:05`)
pub fn format_timestamp<Tz>(ts: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    ts.with_timezone(tz).format("%d.%m.%Y, %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn test_label_wins() {
        let mut entry = Entry::new("1").created_at(Utc::now());
        entry.date_label = Some("Ostern 2024".to_string());
        assert_eq!(date_label_in(&entry, &Utc), "Ostern 2024");
    }

    #[test]
    fn test_blank_label_falls_back_to_timestamp() {
        let ts = Utc.with_ymd_and_hms(2026, 10, 18, 12, 5, 0).unwrap();
        let mut entry = Entry::new("1").created_at(ts);
        entry.date_label = Some("  ".to_string());

        assert_eq!(date_label_in(&entry, &Utc), "18.10.2026, 12:05");

        let berlin = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(date_label_in(&entry, &berlin), "18.10.2026, 14:05");
    }

    #[test]
    fn test_no_date_at_all() {
        let entry = Entry::new("1");
        assert_eq!(date_label_in(&entry, &Utc), JUST_NOW);
        assert_eq!(date_label(&entry), JUST_NOW);
    }
}
