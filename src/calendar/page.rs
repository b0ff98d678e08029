use super::util::{
    first_of_month_after, iter_days_before, iter_days_from, last_of_month, WeekdayExt,
};
use crate::error::CalendarError;
use crate::selection::{CellId, Click};
use time::{Date, Month};

/// Number of day cells on every page: six full weeks
pub const CELLS_PER_PAGE: usize = 42;

/// Pages may lie at most this many months before or after the anchor month
pub const MAX_PAGE_OFFSET: i32 = 1200;

/// One month's worth of calendar cells, starting on the Monday on or before
/// the first of the month
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Page {
    offset: i32,
    first_of_month: Date,
    last_of_month: Date,
    dates: [Date; CELLS_PER_PAGE],
}

/// Computes the page lying `offset` months after the month containing
/// `anchor`.
///
/// The result depends only on the arguments, so a page that the host has
/// dropped can be regenerated at any time.
pub fn generate_page(anchor: Date, offset: i32) -> Result<Page, CalendarError> {
    if !(-MAX_PAGE_OFFSET..=MAX_PAGE_OFFSET).contains(&offset) {
        return Err(CalendarError::OutOfRangePage { offset });
    }
    let first = first_of_month_after(anchor, offset).ok_or(CalendarError::OutOfTime)?;
    let lead = usize::from(first.weekday().index0());
    let start = if lead == 0 {
        first
    } else {
        iter_days_before(first)
            .nth(lead - 1)
            .ok_or(CalendarError::OutOfTime)?
    };
    let mut days = iter_days_from(start);
    let mut dates = [start; CELLS_PER_PAGE];
    for slot in &mut dates {
        *slot = days.next().ok_or(CalendarError::OutOfTime)?;
    }
    tracing::trace!(offset, %first, %start, "Generated calendar page");
    Ok(Page {
        offset,
        first_of_month: first,
        last_of_month: last_of_month(first),
        dates,
    })
}

impl Page {
    pub fn offset(&self) -> i32 {
        self.offset
    }

    pub fn year(&self) -> i32 {
        self.first_of_month.year()
    }

    pub fn month(&self) -> Month {
        self.first_of_month.month()
    }

    pub fn first_of_month(&self) -> Date {
        self.first_of_month
    }

    pub fn last_of_month(&self) -> Date {
        self.last_of_month
    }

    pub fn dates(&self) -> &[Date; CELLS_PER_PAGE] {
        &self.dates
    }

    pub fn get(&self, index: usize) -> Option<Date> {
        self.dates.get(index).copied()
    }

    pub fn contains(&self, date: Date) -> bool {
        self.dates[0] <= date && date <= self.dates[CELLS_PER_PAGE - 1]
    }

    /// Returns true if `date` belongs to this page's month rather than to one
    /// of the adjacent months shown in the leading or trailing cells
    pub fn is_current_month(&self, date: Date) -> bool {
        self.first_of_month <= date && date <= self.last_of_month
    }

    pub fn index_of(&self, date: Date) -> Option<usize> {
        if self.contains(date) {
            usize::try_from((date - self.dates[0]).whole_days()).ok()
        } else {
            None
        }
    }

    /// Index of the cell holding the first day of the page's month
    pub fn first_index(&self) -> usize {
        usize::from(self.first_of_month.weekday().index0())
    }

    /// Describes a click on the cell at `index`
    pub fn click(&self, index: usize) -> Option<Click> {
        let date = self.get(index)?;
        Some(Click {
            date,
            in_current_month: self.is_current_month(date),
            cell: Some(CellId {
                page: self.offset,
                index,
            }),
        })
    }
}
