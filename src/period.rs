//! The calendar month that the dashboard and budget pages aggregate over.

use std::{fmt::Display, ops::RangeInclusive, str::FromStr};

use serde::{Deserialize, Serialize};
use time::{Date, Month, OffsetDateTime};

use crate::{Error, timezone::get_local_offset};

/// A calendar month, from its first day to its last day inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    first_day: Date,
    last_day: Date,
}

impl Period {
    /// Create the period for `month` of `year`.
    ///
    /// # Errors
    /// Returns [Error::InvalidPeriod] if the year is outside of the range `time` supports.
    pub fn new(year: i32, month: Month) -> Result<Self, Error> {
        let invalid = |_| Error::InvalidPeriod(format!("{year}-{:02}", u8::from(month)));

        let first_day = Date::from_calendar_date(year, month, 1).map_err(invalid)?;
        let last_day =
            Date::from_calendar_date(year, month, last_day_of_month(year, month)).map_err(invalid)?;

        Ok(Self {
            first_day,
            last_day,
        })
    }

    /// The period that contains `date`.
    pub fn containing(date: Date) -> Self {
        let first_day = date.replace_day(1).unwrap_or(date);
        let last_day = date
            .replace_day(last_day_of_month(date.year(), date.month()))
            .unwrap_or(date);

        Self {
            first_day,
            last_day,
        }
    }

    /// The period containing the current date in `local_timezone`.
    ///
    /// # Errors
    /// Returns [Error::InvalidTimezoneError] if `local_timezone` is not a canonical timezone name.
    pub fn current(local_timezone: &str) -> Result<Self, Error> {
        let Some(local_offset) = get_local_offset(local_timezone) else {
            tracing::error!("Invalid timezone {}", local_timezone);
            return Err(Error::InvalidTimezoneError(local_timezone.to_owned()));
        };

        Ok(Self::containing(
            OffsetDateTime::now_utc().to_offset(local_offset).date(),
        ))
    }

    /// Use the `month` query parameter if given, otherwise the current month.
    ///
    /// # Errors
    /// Returns an error if `month` is not in the format YYYY-MM or the timezone is invalid.
    pub fn from_query(query: &PeriodQuery, local_timezone: &str) -> Result<Self, Error> {
        match query.month.as_deref() {
            Some(month) if !month.is_empty() => month.parse(),
            _ => Self::current(local_timezone),
        }
    }

    pub fn first_day(&self) -> Date {
        self.first_day
    }

    pub fn last_day(&self) -> Date {
        self.last_day
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> Month {
        self.first_day.month()
    }

    /// The month as a number from 1 to 12, the way budgets store it.
    pub fn month_number(&self) -> u8 {
        u8::from(self.month())
    }

    pub fn date_range(&self) -> RangeInclusive<Date> {
        self.first_day..=self.last_day
    }

    pub fn contains(&self, date: Date) -> bool {
        self.date_range().contains(&date)
    }

    /// The month after this one, if it can be represented.
    pub fn next(&self) -> Option<Self> {
        self.last_day.next_day().map(Self::containing)
    }

    /// The month before this one, if it can be represented.
    pub fn previous(&self) -> Option<Self> {
        self.first_day.previous_day().map(Self::containing)
    }

    /// A human readable label, e.g. "March 2025".
    pub fn label(&self) -> String {
        format!("{} {}", self.month(), self.year())
    }

    /// The query string that selects this period, e.g. "month=2025-03".
    pub fn to_query_string(&self) -> String {
        serde_urlencoded::to_string(PeriodQuery {
            month: Some(self.to_string()),
        })
        .unwrap_or_default()
    }
}

impl FromStr for Period {
    type Err = Error;

    /// Parse a period in the format YYYY-MM.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidPeriod(s.to_owned());

        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;
        let month = Month::try_from(month).map_err(|_| invalid())?;

        Self::new(year, month)
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}", self.year(), self.month_number())
    }
}

impl Serialize for Period {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// The query parameters for pages that show a single month.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct PeriodQuery {
    /// The month to show in the format YYYY-MM, defaults to the current month.
    pub month: Option<String>,
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if time::util::is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::date};

    use crate::Error;

    use super::{Period, PeriodQuery};

    #[test]
    fn parses_year_and_month() {
        let period: Period = "2025-03".parse().unwrap();

        assert_eq!(period.first_day(), date!(2025 - 03 - 01));
        assert_eq!(period.last_day(), date!(2025 - 03 - 31));
        assert_eq!(period.month_number(), 3);
    }

    #[test]
    fn february_ends_on_leap_day() {
        let period = Period::new(2024, Month::February).unwrap();

        assert_eq!(period.last_day(), date!(2024 - 02 - 29));
        assert_eq!(
            Period::new(2025, Month::February).unwrap().last_day(),
            date!(2025 - 02 - 28)
        );
    }

    #[test]
    fn rejects_malformed_months() {
        for input in ["2025-13", "2025-00", "2025-3", "25-03", "March", "", "2025-03-01"] {
            let got = input.parse::<Period>();

            assert_eq!(
                got,
                Err(Error::InvalidPeriod(input.to_owned())),
                "expected {input:?} to be rejected"
            );
        }
    }

    #[test]
    fn display_round_trips() {
        let period = Period::containing(date!(2025 - 11 - 17));

        assert_eq!(period.to_string(), "2025-11");
        assert_eq!(period.label(), "November 2025");
        assert_eq!(period.to_query_string(), "month=2025-11");
    }

    #[test]
    fn next_and_previous_cross_year_boundaries() {
        let december = Period::new(2024, Month::December).unwrap();
        let january = Period::new(2025, Month::January).unwrap();

        assert_eq!(december.next(), Some(january));
        assert_eq!(january.previous(), Some(december));
    }

    #[test]
    fn contains_first_and_last_day_only() {
        let period = Period::new(2025, Month::April).unwrap();

        assert!(period.contains(date!(2025 - 04 - 01)));
        assert!(period.contains(date!(2025 - 04 - 30)));
        assert!(!period.contains(date!(2025 - 03 - 31)));
        assert!(!period.contains(date!(2025 - 05 - 01)));
    }

    #[test]
    fn query_month_takes_precedence_over_now() {
        let query = PeriodQuery {
            month: Some("2023-07".to_owned()),
        };

        let got = Period::from_query(&query, "Etc/UTC").unwrap();

        assert_eq!(got, Period::new(2023, Month::July).unwrap());
    }

    #[test]
    fn empty_query_uses_current_month() {
        let got = Period::from_query(&PeriodQuery::default(), "Etc/UTC").unwrap();

        assert!(got.contains(time::OffsetDateTime::now_utc().date()));
    }

    #[test]
    fn invalid_timezone_is_an_error() {
        let got = Period::current("Middle/Earth");

        assert_eq!(got, Err(Error::InvalidTimezoneError("Middle/Earth".to_owned())));
    }
}
