//! Human-readable labels for testimonial timestamps.

use std::fmt;

use chrono::{DateTime, Days, TimeZone, Utc};
use folio_core::clock::Clock;

/// Formats `created_at` relative to `now`, in `now`'s time zone:
///
/// - `Today at 3:07 PM`
/// - `Yesterday at 9:30 AM`
/// - `Jan 5, 2026 at 11:45 PM` for anything else
#[must_use]
pub fn format_created_at<Tz>(created_at: DateTime<Utc>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let created = created_at.with_timezone(&now.timezone());
    let time = created.format("%-I:%M %p");
    let today = now.date_naive();
    let day = created.date_naive();

    if day == today {
        format!("Today at {time}")
    } else if today.checked_sub_days(Days::new(1)) == Some(day) {
        format!("Yesterday at {time}")
    } else {
        format!("{} at {time}", created.format("%b %-d, %Y"))
    }
}

/// Formats `created_at` in the viewer's local time zone.
#[must_use]
pub fn format_created_at_local(created_at: DateTime<Utc>, clock: &dyn Clock) -> String {
    format_created_at(created_at, &clock.local_now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_same_day_is_today() {
        let now = utc(2026, 3, 10, 18, 0);
        assert_eq!(format_created_at(utc(2026, 3, 10, 15, 7), &now), "Today at 3:07 PM");
    }

    #[test]
    fn test_previous_day_is_yesterday() {
        let now = utc(2026, 3, 10, 1, 0);
        assert_eq!(
            format_created_at(utc(2026, 3, 9, 9, 30), &now),
            "Yesterday at 9:30 AM"
        );
    }

    #[test]
    fn test_older_dates_use_month_day_year() {
        let now = utc(2026, 3, 10, 12, 0);
        assert_eq!(
            format_created_at(utc(2026, 1, 5, 23, 45), &now),
            "Jan 5, 2026 at 11:45 PM"
        );
    }

    #[test]
    fn test_midnight_and_noon_use_twelve() {
        let now = utc(2026, 3, 10, 23, 0);
        assert_eq!(format_created_at(utc(2026, 3, 10, 0, 5), &now), "Today at 12:05 AM");
        assert_eq!(format_created_at(utc(2026, 3, 10, 12, 0), &now), "Today at 12:00 PM");
    }

    #[test]
    fn test_day_boundaries_follow_viewer_time_zone() {
        // 2026-03-10 02:00 UTC is still 2026-03-09 in UTC-5.
        let offset = FixedOffset::west_opt(5 * 3600).unwrap();
        let now = utc(2026, 3, 10, 12, 0).with_timezone(&offset);

        assert_eq!(
            format_created_at(utc(2026, 3, 10, 2, 0), &now),
            "Yesterday at 9:00 PM"
        );
    }

    #[test]
    fn test_year_boundary_yesterday() {
        let now = utc(2026, 1, 1, 8, 0);
        assert_eq!(
            format_created_at(utc(2025, 12, 31, 20, 15), &now),
            "Yesterday at 8:15 PM"
        );
    }

    #[test]
    fn test_future_dates_use_full_date() {
        let now = utc(2026, 3, 10, 12, 0);
        assert_eq!(
            format_created_at(utc(2026, 3, 11, 12, 0), &now),
            "Mar 11, 2026 at 12:00 PM"
        );
    }
}
