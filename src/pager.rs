use crate::calendar::MAX_PAGE_OFFSET;
use crate::error::CalendarError;
use crate::picker::CalendarPicker;
use crate::render::PageRenderModel;
use crate::selection::Repaint;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

#[derive(Clone, Debug, Eq, PartialEq)]
struct HostedPage {
    model: PageRenderModel,
    dirty: bool,
}

/// Paging container that keeps the page being shown plus a few neighbours on
/// either side materialized, and rebuilds those whose cells have gone stale
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PageHost {
    retain: u16,
    pages: BTreeMap<i32, HostedPage>,
}

impl PageHost {
    /// `retain` is the number of pages kept on each side of the shown page
    pub fn new(retain: u16) -> PageHost {
        PageHost {
            retain,
            pages: BTreeMap::new(),
        }
    }

    pub fn is_materialized(&self, offset: i32) -> bool {
        self.pages.contains_key(&offset)
    }

    pub fn materialized(&self) -> impl Iterator<Item = i32> + '_ {
        self.pages.keys().copied()
    }

    pub fn is_dirty(&self, offset: i32) -> bool {
        self.pages.get(&offset).is_some_and(|hp| hp.dirty)
    }

    /// Returns the model for the page at `offset`, materializing it and its
    /// neighbours as needed and dropping pages outside the window
    pub fn show(
        &mut self,
        offset: i32,
        picker: &CalendarPicker,
    ) -> Result<&PageRenderModel, CalendarError> {
        if !(-MAX_PAGE_OFFSET..=MAX_PAGE_OFFSET).contains(&offset) {
            return Err(CalendarError::OutOfRangePage { offset });
        }
        let window = self.window(offset);
        self.pages.retain(|o, _| window.contains(o));
        for o in window {
            match self.pages.get_mut(&o) {
                Some(hp) if hp.dirty => {
                    tracing::trace!(offset = o, "Rebuilding stale page");
                    hp.model = picker.render_page(hp.model.page().clone());
                    hp.dirty = false;
                }
                Some(_) => (),
                None => match picker.page(o) {
                    Ok(model) => {
                        self.pages.insert(
                            o,
                            HostedPage {
                                model,
                                dirty: false,
                            },
                        );
                    }
                    Err(e) if o == offset => return Err(e),
                    Err(e) => tracing::debug!(offset = o, error = %e, "Skipping neighbour page"),
                },
            }
        }
        self.pages
            .get(&offset)
            .map(|hp| &hp.model)
            .ok_or(CalendarError::OutOfRangePage { offset })
    }

    /// Marks every materialized page showing one of the repaint targets as
    /// stale.  Targets that are not on any materialized page are dropped;
    /// such pages are built fresh whenever they are shown again.  Returns the
    /// number of pages marked.
    pub fn invalidate(&mut self, repaint: &Repaint) -> usize {
        let mut marked = 0;
        for (&offset, hp) in &mut self.pages {
            let stale = repaint.is_everything()
                || repaint.targets().iter().any(|t| {
                    t.cell().is_some_and(|c| c.page == offset) || hp.model.shows(t.date())
                });
            if stale && !hp.dirty {
                hp.dirty = true;
                marked += 1;
            }
        }
        if marked == 0 && !repaint.is_empty() {
            tracing::trace!(
                targets = repaint.targets().len(),
                "Dropped repaint for pages that are not materialized"
            );
        }
        marked
    }

    fn window(&self, offset: i32) -> RangeInclusive<i32> {
        let retain = i32::from(self.retain);
        let lo = offset.saturating_sub(retain).max(-MAX_PAGE_OFFSET);
        let hi = offset.saturating_add(retain).min(MAX_PAGE_OFFSET);
        lo..=hi
    }
}

impl Default for PageHost {
    fn default() -> PageHost {
        PageHost::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventDay;
    use crate::picker::{CalendarBuilder, CalendarMode};
    use time::macros::date;
    use time::Date;

    fn range_picker() -> CalendarPicker {
        CalendarBuilder::new(date!(2024 - 06 - 12))
            .mode(CalendarMode::RangePicker)
            .build()
            .unwrap()
    }

    fn click(picker: &mut CalendarPicker, offset: i32, date: Date) -> Repaint {
        let page = picker.generate(offset).unwrap();
        let click = page.click(page.index_of(date).unwrap()).unwrap();
        picker.click(click)
    }

    #[test]
    fn test_window() {
        let picker = range_picker();
        let mut host = PageHost::default();
        host.show(0, &picker).unwrap();
        assert_eq!(host.materialized().collect::<Vec<_>>(), [-1, 0, 1]);
        host.show(5, &picker).unwrap();
        assert_eq!(host.materialized().collect::<Vec<_>>(), [4, 5, 6]);
        host.show(MAX_PAGE_OFFSET, &picker).unwrap();
        assert_eq!(
            host.materialized().collect::<Vec<_>>(),
            [MAX_PAGE_OFFSET - 1, MAX_PAGE_OFFSET]
        );
        assert_eq!(
            host.show(MAX_PAGE_OFFSET + 1, &picker),
            Err(CalendarError::OutOfRangePage {
                offset: MAX_PAGE_OFFSET + 1
            })
        );
    }

    #[test]
    fn test_repaint_reaches_neighbour_page() {
        let mut picker = range_picker();
        let mut host = PageHost::default();
        host.show(2, &picker).unwrap();
        click(&mut picker, 2, date!(2024 - 08 - 28));
        let repaint = click(&mut picker, 2, date!(2024 - 08 - 30));
        // September 2024 starts on a Sunday, so its page leads with August 26th
        // through 31st
        assert_eq!(host.invalidate(&repaint), 2);
        assert!(host.is_dirty(2));
        assert!(host.is_dirty(3));
        assert!(!host.is_dirty(1));
        let september = host.show(3, &picker).unwrap();
        let cell = september.cell(4).unwrap();
        assert_eq!(cell.date, date!(2024 - 08 - 30));
        assert!(cell.is_selected);
        assert!(!cell.is_current_month);
        assert!(!host.is_dirty(3));
    }

    #[test]
    fn test_offscreen_repaint_dropped() {
        let mut picker = range_picker();
        let mut host = PageHost::default();
        host.show(0, &picker).unwrap();
        click(&mut picker, 3, date!(2024 - 09 - 10));
        let repaint = click(&mut picker, 3, date!(2024 - 09 - 12));
        assert_eq!(host.invalidate(&repaint), 0);
        // Materializing September later reflects the selection anyway
        let september = host.show(3, &picker).unwrap();
        let selected = september
            .cells()
            .iter()
            .filter(|c| c.is_selected)
            .count();
        assert_eq!(selected, 3);
    }

    #[test]
    fn test_invalidate_everything() {
        let mut picker = range_picker();
        let mut host = PageHost::new(2);
        host.show(0, &picker).unwrap();
        let repaint = picker.set_events([EventDay::new(date!(2024 - 08 - 15))]);
        assert_eq!(host.invalidate(&repaint), 5);
        let august = host.show(2, &picker).unwrap();
        assert!(august.cells().iter().any(|c| c.event.is_some()));
    }
}
