mod page;
pub(crate) mod util;
mod widget;
pub use self::page::{generate_page, Page, CELLS_PER_PAGE, MAX_PAGE_OFFSET};
pub use self::widget::MonthView;
pub(crate) use self::widget::MONTH_VIEW_HEIGHT;
