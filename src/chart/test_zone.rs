//! A timezone with US Eastern daylight-saving rules, for exercising DST transitions in tests.

use chrono::{Datelike, FixedOffset, MappedLocalTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Weekday};

const EST_SECONDS: i32 = -5 * 3600;
const EDT_SECONDS: i32 = -4 * 3600;

/// UTC-5 in winter, UTC-4 from the second Sunday of March to the first Sunday of November.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eastern;

impl Eastern {
    fn est() -> FixedOffset {
        FixedOffset::east_opt(EST_SECONDS).unwrap()
    }

    fn edt() -> FixedOffset {
        FixedOffset::east_opt(EDT_SECONDS).unwrap()
    }

    /// UTC instants at which daylight time starts and ends in `year`
    fn dst_bounds(year: i32) -> (NaiveDateTime, NaiveDateTime) {
        let start = NaiveDate::from_weekday_of_month_opt(year, 3, Weekday::Sun, 2).unwrap();
        let end = NaiveDate::from_weekday_of_month_opt(year, 11, Weekday::Sun, 1).unwrap();

        // 02:00 local standard time, and 02:00 local daylight time
        (
            start.and_time(NaiveTime::from_hms_opt(7, 0, 0).unwrap()),
            end.and_time(NaiveTime::from_hms_opt(6, 0, 0).unwrap()),
        )
    }

    /// Wall-clock time in this zone
    pub fn at(date: &str, time: &str) -> chrono::DateTime<Self> {
        let naive = NaiveDateTime::parse_from_str(&format!("{date} {time}"), "%Y-%m-%d %H:%M:%S").unwrap();
        Self.from_local_datetime(&naive).earliest().unwrap()
    }
}

impl TimeZone for Eastern {
    type Offset = FixedOffset;

    fn from_offset(_offset: &FixedOffset) -> Self {
        Self
    }

    fn offset_from_local_date(&self, local: &NaiveDate) -> MappedLocalTime<FixedOffset> {
        self.offset_from_local_datetime(&local.and_time(NaiveTime::MIN))
    }

    fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> MappedLocalTime<FixedOffset> {
        let is_consistent = |offset: FixedOffset| {
            let utc = *local - TimeDelta::seconds(i64::from(offset.local_minus_utc()));
            self.offset_from_utc_datetime(&utc) == offset
        };

        match (is_consistent(Self::edt()), is_consistent(Self::est())) {
            (true, true) => MappedLocalTime::Ambiguous(Self::edt(), Self::est()),
            (true, false) => MappedLocalTime::Single(Self::edt()),
            (false, true) => MappedLocalTime::Single(Self::est()),
            (false, false) => MappedLocalTime::None,
        }
    }

    fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
        self.offset_from_utc_datetime(&utc.and_time(NaiveTime::MIN))
    }

    fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
        let (start, end) = Self::dst_bounds(utc.year());
        if *utc >= start && *utc < end { Self::edt() } else { Self::est() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_around_2024_transitions() {
        assert_eq!(Eastern::at("2024-03-09", "12:00:00").offset().local_minus_utc(), EST_SECONDS);
        assert_eq!(Eastern::at("2024-03-10", "12:00:00").offset().local_minus_utc(), EDT_SECONDS);
        assert_eq!(Eastern::at("2024-11-02", "12:00:00").offset().local_minus_utc(), EDT_SECONDS);
        assert_eq!(Eastern::at("2024-11-03", "12:00:00").offset().local_minus_utc(), EST_SECONDS);
    }

    #[test]
    fn test_spring_forward_gap_has_no_local_time() {
        let naive = NaiveDateTime::parse_from_str("2024-03-10 02:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
        assert!(matches!(Eastern.from_local_datetime(&naive), MappedLocalTime::None));
    }

    #[test]
    fn test_fall_back_hour_is_ambiguous() {
        let naive = NaiveDateTime::parse_from_str("2024-11-03 01:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
        assert!(matches!(Eastern.from_local_datetime(&naive), MappedLocalTime::Ambiguous(_, _)));
    }
}
