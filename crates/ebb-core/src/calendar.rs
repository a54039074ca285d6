//! Local calendar bucketing
//!
//! Entries carry UTC instants. Every day/week/hour decision goes through a
//! [`Calendar`] so the time zone and first weekday are chosen in one place.

use chrono::{
    DateTime, Datelike, Duration, Local, NaiveDate, NaiveTime, TimeZone, Timelike, Utc, Weekday,
};

/// Time zone plus first weekday used for bucketing
#[derive(Debug, Clone)]
pub struct Calendar<Tz: TimeZone> {
    tz: Tz,
    week_start: Weekday,
}

impl Calendar<Local> {
    /// The system's local time zone
    pub fn local(week_start: Weekday) -> Self {
        Self::new(Local, week_start)
    }
}

impl<Tz: TimeZone> Calendar<Tz> {
    pub fn new(tz: Tz, week_start: Weekday) -> Self {
        Self { tz, week_start }
    }

    pub fn week_start(&self) -> Weekday {
        self.week_start
    }

    /// Local calendar day of an instant
    pub fn day(&self, ts: &DateTime<Utc>) -> NaiveDate {
        ts.with_timezone(&self.tz).date_naive()
    }

    /// Local hour (0-23) of an instant
    pub fn hour(&self, ts: &DateTime<Utc>) -> u32 {
        ts.with_timezone(&self.tz).hour()
    }

    /// Local weekday of an instant
    pub fn weekday(&self, ts: &DateTime<Utc>) -> Weekday {
        ts.with_timezone(&self.tz).weekday()
    }

    /// First day of the week containing `date`
    pub fn week_start_of(&self, date: NaiveDate) -> NaiveDate {
        let offset = (date.weekday().num_days_from_monday() + 7
            - self.week_start.num_days_from_monday())
            % 7;
        date - Duration::days(i64::from(offset))
    }

    /// Local week containing `now` as (first day, day after last day)
    pub fn week_range(&self, now: &DateTime<Utc>) -> (NaiveDate, NaiveDate) {
        let start = self.week_start_of(self.day(now));
        (start, start + Duration::days(7))
    }

    /// Instant at which a local day begins
    ///
    /// When midnight falls in a DST gap the first valid instant after it is used.
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        let midnight = date.and_time(NaiveTime::MIN);
        let local = self.tz.from_local_datetime(&midnight).earliest().or_else(|| {
            (1..=3)
                .map(|h| midnight + Duration::hours(h))
                .find_map(|t| self.tz.from_local_datetime(&t).earliest())
        });
        match local {
            Some(dt) => dt.with_timezone(&Utc),
            None => Utc.from_utc_datetime(&midnight),
        }
    }

    /// The seven weekdays starting at the configured first weekday
    pub fn ordered_weekdays(&self) -> [Weekday; 7] {
        let mut days = [self.week_start; 7];
        for i in 1..7 {
            days[i] = days[i - 1].succ();
        }
        days
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_day_respects_offset() {
        let tokyo = Calendar::new(FixedOffset::east_opt(9 * 3600).unwrap(), Weekday::Mon);
        // 20:00 UTC on the 4th is 05:00 on the 5th in UTC+9
        let ts = utc(2024, 3, 4, 20);
        assert_eq!(tokyo.day(&ts), date(2024, 3, 5));
        assert_eq!(tokyo.hour(&ts), 5);
        assert_eq!(tokyo.weekday(&ts), Weekday::Tue);
    }

    #[test]
    fn test_week_range_monday_start() {
        let cal = Calendar::new(Utc, Weekday::Mon);
        // 2024-03-07 is a Thursday
        let (start, end) = cal.week_range(&utc(2024, 3, 7, 12));
        assert_eq!(start, date(2024, 3, 4));
        assert_eq!(end, date(2024, 3, 11));
    }

    #[test]
    fn test_week_range_sunday_start() {
        let cal = Calendar::new(Utc, Weekday::Sun);
        let (start, end) = cal.week_range(&utc(2024, 3, 7, 12));
        assert_eq!(start, date(2024, 3, 3));
        assert_eq!(end, date(2024, 3, 10));

        // On the first weekday itself the week starts today
        let (start, _) = cal.week_range(&utc(2024, 3, 3, 0));
        assert_eq!(start, date(2024, 3, 3));
    }

    #[test]
    fn test_start_of_day() {
        let cal = Calendar::new(FixedOffset::west_opt(5 * 3600).unwrap(), Weekday::Mon);
        assert_eq!(cal.start_of_day(date(2024, 3, 4)), utc(2024, 3, 4, 5));
    }

    #[test]
    fn test_ordered_weekdays() {
        let cal = Calendar::new(Utc, Weekday::Sat);
        let days = cal.ordered_weekdays();
        assert_eq!(days[0], Weekday::Sat);
        assert_eq!(days[1], Weekday::Sun);
        assert_eq!(days[6], Weekday::Fri);
    }
}
