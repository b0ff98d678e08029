use crate::calendar::Page;
use crate::event::{EventDay, EventDays};
use crate::selection::SelectionStore;
use time::Date;

/// Semantic display attributes of one day cell.  How they translate into
/// colors and text is up to the renderer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CellAttrs {
    pub date: Date,
    pub is_current_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    /// The cell most recently clicked in classic mode
    pub is_highlighted: bool,
    pub event: Option<EventDay>,
}

/// Snapshot of a page's cell attributes.  Rebuilt rather than updated
/// whenever anything it was computed from changes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PageRenderModel {
    page: Page,
    cells: Vec<CellAttrs>,
}

impl PageRenderModel {
    pub fn build(
        page: Page,
        today: Date,
        store: &SelectionStore,
        events: &EventDays,
        highlighted: Option<Date>,
    ) -> PageRenderModel {
        let cells = page
            .dates()
            .iter()
            .map(|&date| CellAttrs {
                date,
                is_current_month: page.is_current_month(date),
                is_today: date == today,
                is_selected: store.contains(date),
                is_highlighted: highlighted == Some(date),
                event: events.get(date).cloned(),
            })
            .collect();
        PageRenderModel { page, cells }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn cells(&self) -> &[CellAttrs] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&CellAttrs> {
        self.cells.get(index)
    }

    pub fn shows(&self, date: Date) -> bool {
        self.page.contains(date)
    }
}
