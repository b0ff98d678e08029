//! Paged month calendar with Monday-first six-week pages and a choice of
//! selection behaviors: a plain classic calendar, a single-day picker, a
//! many-days picker, and a contiguous range picker.
//!
//! [`CalendarPicker`] owns the selection state and turns clicks on page cells
//! into repaint requests; [`PageHost`] keeps the pages around the one being
//! shown materialized and rebuilds them when those requests reach them.  The
//! terminal front end in [`App`] drives both from key presses.
mod app;
mod calendar;
mod error;
mod event;
mod help;
mod jumpto;
mod pager;
mod picker;
mod render;
mod selection;
mod theme;
pub use crate::app::{App, AppExit};
pub use crate::calendar::{generate_page, MonthView, Page, CELLS_PER_PAGE, MAX_PAGE_OFFSET};
pub use crate::error::{CalendarError, ConfigError};
pub use crate::event::{EventDay, EventDays};
pub use crate::pager::PageHost;
pub use crate::picker::{
    CalendarBuilder, CalendarMode, CalendarPicker, DayClickListener, Labels,
};
pub use crate::render::{CellAttrs, PageRenderModel};
pub use crate::selection::{
    CellId, Click, ClickOutcome, Repaint, SelectedDay, SelectionAbilityListener, SelectionPolicy,
    SelectionStore,
};
use time::{macros::format_description, Date};

/// Parses a date in `YYYY-MM-DD` format
pub fn parse_date(s: &str) -> Result<Date, time::error::Parse> {
    Date::parse(s, format_description!("[year]-[month]-[day]"))
}
