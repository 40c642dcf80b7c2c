use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};

/// Render the calendar distance between two instants
///
/// Breaks the distance into whole years, months and days, skips zero
/// components, and appends " ago": `"2 years 3 months 5 days ago"`.
/// Hours and minutes are dropped entirely, so anything under one full day
/// renders `"today"`. Month arithmetic clamps at month end (Jan 31 is one
/// month before Feb 28). The direction of the interval is ignored.
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let (earlier, later) = if then <= now { (then, now) } else { (now, then) };

    let years = later.years_since(earlier).unwrap_or(0);
    let base = earlier
        .checked_add_months(Months::new(years * 12))
        .unwrap_or(earlier);

    let mut months =
        ((later.year() - base.year()) * 12 + later.month() as i32 - base.month() as i32).max(0)
            as u32;
    if months > 0 {
        let overshoots = base
            .checked_add_months(Months::new(months))
            .map(|candidate| candidate > later)
            .unwrap_or(true);
        if overshoots {
            months -= 1;
        }
    }
    let base = base.checked_add_months(Months::new(months)).unwrap_or(base);

    let days = (later - base).num_days().max(0);

    let mut parts: Vec<String> = Vec::new();
    push_unit(&mut parts, years as i64, "year");
    push_unit(&mut parts, months as i64, "month");
    push_unit(&mut parts, days, "day");

    if parts.is_empty() {
        "today".to_string()
    } else {
        format!("{} ago", parts.join(" "))
    }
}

fn push_unit(parts: &mut Vec<String>, value: i64, unit: &str) {
    if value == 1 {
        parts.push(format!("1 {unit}"));
    } else if value > 1 {
        parts.push(format!("{value} {unit}s"));
    }
}

/// Parse a deposit timestamp and render it relative to `now`
///
/// Accepts RFC 3339 datetimes and plain `YYYY-MM-DD` dates (taken as
/// midnight UTC). Unparseable input yields `None` and callers skip the
/// badge.
pub fn deposited_ago(raw: &str, now: DateTime<Utc>) -> Option<String> {
    Some(time_ago(parse_timestamp(raw)?, now))
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = raw.parse::<DateTime<Utc>>() {
        return Some(dt);
    }

    let date: NaiveDate = raw.parse().ok()?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_time_ago_single_year() {
        let rendered = time_ago(utc(2022, 6, 15, 12, 0), utc(2023, 6, 15, 12, 0));
        assert_eq!(rendered, "1 year ago");
    }

    #[test]
    fn test_time_ago_years_months_days() {
        let rendered = time_ago(utc(2021, 3, 10, 12, 0), utc(2023, 6, 15, 12, 0));
        assert_eq!(rendered, "2 years 3 months 5 days ago");
    }

    #[test]
    fn test_time_ago_months_only() {
        let rendered = time_ago(utc(2023, 3, 15, 12, 0), utc(2023, 6, 15, 12, 0));
        assert_eq!(rendered, "3 months ago");
    }

    #[test]
    fn test_time_ago_single_day() {
        let rendered = time_ago(utc(2023, 6, 14, 10, 0), utc(2023, 6, 15, 12, 0));
        assert_eq!(rendered, "1 day ago");
    }

    #[test]
    fn test_time_ago_same_day_is_today() {
        let rendered = time_ago(utc(2023, 6, 15, 8, 0), utc(2023, 6, 15, 12, 0));
        assert_eq!(rendered, "today");
    }

    #[test]
    fn test_time_ago_under_one_full_day_is_today() {
        // Crosses midnight but spans less than 24 hours.
        let rendered = time_ago(utc(2023, 6, 14, 20, 0), utc(2023, 6, 15, 8, 0));
        assert_eq!(rendered, "today");
    }

    #[test]
    fn test_time_ago_clamps_at_month_end() {
        let rendered = time_ago(utc(2023, 1, 31, 0, 0), utc(2023, 3, 1, 0, 0));
        assert_eq!(rendered, "1 month 1 day ago");
    }

    #[test]
    fn test_time_ago_direction_insensitive() {
        let a = utc(2021, 3, 10, 12, 0);
        let b = utc(2023, 6, 15, 12, 0);
        assert_eq!(time_ago(a, b), time_ago(b, a));
    }

    #[test]
    fn test_deposited_ago_rfc3339() {
        let now = utc(2023, 6, 15, 12, 0);
        let rendered = deposited_ago("2023-04-01T00:00:00Z", now);
        assert_eq!(rendered, Some("2 months 14 days ago".to_string()));
    }

    #[test]
    fn test_deposited_ago_plain_date() {
        let now = utc(2023, 6, 15, 12, 0);
        let rendered = deposited_ago("2023-06-01", now);
        assert_eq!(rendered, Some("14 days ago".to_string()));
    }

    #[test]
    fn test_deposited_ago_unparseable() {
        let now = utc(2023, 6, 15, 12, 0);
        assert_eq!(deposited_ago("soon", now), None);
        assert_eq!(deposited_ago("", now), None);
    }
}
