use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use mongodb::bson::DateTime as BsonDateTime;

pub fn chrono_to_bson(dt: DateTime<Utc>) -> BsonDateTime {
    BsonDateTime::from_millis(dt.timestamp_millis())
}

/// First instant of the given calendar date.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Last representable millisecond of the given calendar date, so inclusive
/// `to` bounds cover the whole day.
pub fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    start_of_day(date) + Duration::days(1) - Duration::milliseconds(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_bounds() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let start = start_of_day(date);
        let end = end_of_day(date);
        assert_eq!(start.to_rfc3339(), "2024-03-07T00:00:00+00:00");
        assert!(end > start);
        assert_eq!(end.date_naive(), date);
        assert_eq!(
            (end + Duration::milliseconds(1)).date_naive(),
            date.succ_opt().unwrap()
        );
    }
}
