use std::iter::successors;
use time::{Date, Month, Weekday};

pub(crate) const DAYS_IN_WEEK: usize = 7;

pub(crate) trait WeekdayExt {
    /// Zero-based position of the weekday in a Monday-first week
    fn index0(&self) -> u8;
}

impl WeekdayExt for Weekday {
    fn index0(&self) -> u8 {
        self.number_days_from_monday()
    }
}

/// Returns the first day of the month lying `offset` months after the month
/// containing `date`, or `None` if that month is outside the range of `Date`
pub(crate) fn first_of_month_after(date: Date, offset: i32) -> Option<Date> {
    let months = i64::from(date.year()) * 12 + i64::from(u8::from(date.month())) - 1
        + i64::from(offset);
    let year = i32::try_from(months.div_euclid(12)).ok()?;
    let month = u8::try_from(months.rem_euclid(12) + 1).ok()?;
    let month = Month::try_from(month).ok()?;
    Date::from_calendar_date(year, month, 1).ok()
}

pub(crate) fn last_of_month(date: Date) -> Date {
    iter_days_from(date)
        .take_while(|d| d.month() == date.month())
        .last()
        .unwrap_or(date)
}

/// Number of whole months from the month containing `from` to the month
/// containing `to`
pub(crate) fn months_between(from: Date, to: Date) -> i64 {
    (i64::from(to.year()) - i64::from(from.year())) * 12 + i64::from(u8::from(to.month()))
        - i64::from(u8::from(from.month()))
}

pub(crate) fn iter_days_from(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.next_day())
}

pub(crate) fn iter_days_before(date: Date) -> impl Iterator<Item = Date> {
    successors(Some(date), |&d| d.previous_day()).skip(1)
}

/// Dates lying strictly between `a` and `b`, in ascending order regardless of
/// which of the two is earlier
pub(crate) fn days_strictly_between(a: Date, b: Date) -> impl Iterator<Item = Date> {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    iter_days_from(lo).skip(1).take_while(move |&d| d < hi)
}
