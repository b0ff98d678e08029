mod policy;
pub use self::policy::{ClickOutcome, Repaint, SelectionPolicy};
use crate::error::CalendarError;
use std::fmt;
use time::Date;

/// Key of a rendered cell in the page host's registry
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CellId {
    pub page: i32,
    pub index: usize,
}

/// A click on a rendered day cell
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Click {
    pub date: Date,
    /// False if the cell shows a day from one of the adjacent months
    pub in_current_month: bool,
    pub cell: Option<CellId>,
}

/// A selected date together with the cell it was last shown in, if known.
///
/// Two `SelectedDay`s are equal whenever their dates are equal; the cell is
/// only a repaint hint.
#[derive(Clone, Copy, Debug)]
pub struct SelectedDay {
    date: Date,
    cell: Option<CellId>,
}

impl SelectedDay {
    pub fn new(date: Date) -> SelectedDay {
        SelectedDay { date, cell: None }
    }

    pub fn with_cell(date: Date, cell: CellId) -> SelectedDay {
        SelectedDay {
            date,
            cell: Some(cell),
        }
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn cell(&self) -> Option<CellId> {
        self.cell
    }
}

impl From<Click> for SelectedDay {
    fn from(click: Click) -> SelectedDay {
        SelectedDay {
            date: click.date,
            cell: click.cell,
        }
    }
}

impl PartialEq for SelectedDay {
    fn eq(&self, other: &SelectedDay) -> bool {
        self.date == other.date
    }
}

impl Eq for SelectedDay {}

/// Receives whether the selection is non-empty after every change, e.g. to
/// enable or disable a confirmation action
pub trait SelectionAbilityListener {
    fn on_change(&mut self, can_select: bool);
}

impl<F: FnMut(bool)> SelectionAbilityListener for F {
    fn on_change(&mut self, can_select: bool) {
        self(can_select);
    }
}

/// Ordered set of selected days.  Insertion order is preserved, and no two
/// entries share a date.
#[derive(Default)]
pub struct SelectionStore {
    days: Vec<SelectedDay>,
    listener: Option<Box<dyn SelectionAbilityListener>>,
}

impl SelectionStore {
    pub fn new() -> SelectionStore {
        SelectionStore::default()
    }

    pub fn set_listener<L: SelectionAbilityListener + 'static>(&mut self, listener: L) {
        self.listener = Some(Box::new(listener));
    }

    pub fn contains(&self, date: Date) -> bool {
        self.position(date).is_some()
    }

    pub fn get(&self, date: Date) -> Option<&SelectedDay> {
        self.days.iter().find(|sd| sd.date == date)
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn all(&self) -> &[SelectedDay] {
        &self.days
    }

    pub fn dates(&self) -> Vec<Date> {
        self.days.iter().map(SelectedDay::date).collect()
    }

    pub fn first(&self) -> Result<&SelectedDay, CalendarError> {
        self.days.first().ok_or(CalendarError::EmptyStore)
    }

    /// Removes the entry with the same date as `day` if there is one, and
    /// appends `day` otherwise.  Returns true if the day is now selected.
    pub fn toggle(&mut self, day: SelectedDay) -> bool {
        let selected = match self.position(day.date) {
            Some(i) => {
                self.days.remove(i);
                false
            }
            None => {
                self.days.push(day);
                true
            }
        };
        tracing::debug!(date = %day.date, selected, "Toggled selected day");
        self.notify();
        selected
    }

    pub fn replace_with(&mut self, day: SelectedDay) {
        self.days.clear();
        self.days.push(day);
        self.notify();
    }

    /// Replaces the whole selection with `days`, dropping later duplicates
    pub fn replace_with_all<I: IntoIterator<Item = SelectedDay>>(&mut self, days: I) {
        self.days.clear();
        for day in days {
            if !self.contains(day.date) {
                self.days.push(day);
            }
        }
        self.notify();
    }

    /// Appends each day whose date is not yet selected.  Returns the number of
    /// days added.
    pub fn extend<I: IntoIterator<Item = SelectedDay>>(&mut self, days: I) -> usize {
        let before = self.days.len();
        for day in days {
            if !self.contains(day.date) {
                self.days.push(day);
            }
        }
        let added = self.days.len() - before;
        if added > 0 {
            self.notify();
        }
        added
    }

    pub fn clear(&mut self) {
        if !self.days.is_empty() {
            self.days.clear();
            self.notify();
        }
    }

    fn position(&self, date: Date) -> Option<usize> {
        self.days.iter().position(|sd| sd.date == date)
    }

    fn notify(&mut self) {
        let can_select = !self.days.is_empty();
        if let Some(listener) = self.listener.as_mut() {
            listener.on_change(can_select);
        }
    }
}

impl fmt::Debug for SelectionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionStore")
            .field("days", &self.days)
            .field("listener", &self.listener.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;
    use time::macros::date;

    fn recording_store() -> (SelectionStore, Rc<RefCell<Vec<bool>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut store = SelectionStore::new();
        let sink = Rc::clone(&calls);
        store.set_listener(move |can_select: bool| sink.borrow_mut().push(can_select));
        (store, calls)
    }

    #[test]
    fn test_equality_ignores_cell() {
        let a = SelectedDay::new(date!(2024 - 03 - 10));
        let b = SelectedDay::with_cell(date!(2024 - 03 - 10), CellId { page: 3, index: 20 });
        assert_eq!(a, b);
        assert_ne!(a, SelectedDay::new(date!(2024 - 03 - 11)));
    }

    #[test]
    fn test_toggle_is_involution() {
        let (mut store, calls) = recording_store();
        let d1 = SelectedDay::new(date!(2024 - 03 - 01));
        store.toggle(d1);
        let before = store.dates();
        assert!(store.toggle(SelectedDay::new(date!(2024 - 03 - 05))));
        assert!(!store.toggle(SelectedDay::with_cell(
            date!(2024 - 03 - 05),
            CellId { page: 0, index: 9 }
        )));
        assert_eq!(store.dates(), before);
        assert_eq!(*calls.borrow(), [true, true, true]);
    }

    #[test]
    fn test_toggle_keeps_order() {
        let mut store = SelectionStore::new();
        for d in [
            date!(2024 - 03 - 01),
            date!(2024 - 03 - 02),
            date!(2024 - 03 - 03),
        ] {
            store.toggle(SelectedDay::new(d));
        }
        store.toggle(SelectedDay::new(date!(2024 - 03 - 02)));
        assert_eq!(store.dates(), [date!(2024 - 03 - 01), date!(2024 - 03 - 03)]);
    }

    #[test]
    fn test_replace_with() {
        let (mut store, calls) = recording_store();
        store.toggle(SelectedDay::new(date!(2024 - 03 - 01)));
        store.toggle(SelectedDay::new(date!(2024 - 03 - 02)));
        store.replace_with(SelectedDay::new(date!(2024 - 04 - 01)));
        assert_eq!(store.dates(), [date!(2024 - 04 - 01)]);
        assert_eq!(calls.borrow().len(), 3);
    }

    #[test]
    fn test_clear_notifies_only_on_change() {
        let (mut store, calls) = recording_store();
        store.clear();
        assert!(calls.borrow().is_empty());
        store.toggle(SelectedDay::new(date!(2024 - 03 - 01)));
        store.clear();
        assert!(store.is_empty());
        assert_eq!(*calls.borrow(), [true, false]);
    }

    #[test]
    fn test_first_of_empty_store() {
        let mut store = SelectionStore::new();
        assert_eq!(store.first(), Err(CalendarError::EmptyStore));
        store.toggle(SelectedDay::new(date!(2024 - 03 - 09)));
        store.toggle(SelectedDay::new(date!(2024 - 03 - 01)));
        assert_eq!(store.first().map(SelectedDay::date), Ok(date!(2024 - 03 - 09)));
    }

    #[test]
    fn test_extend_skips_existing() {
        let (mut store, calls) = recording_store();
        store.toggle(SelectedDay::new(date!(2024 - 03 - 02)));
        let added = store.extend(
            [
                date!(2024 - 03 - 01),
                date!(2024 - 03 - 02),
                date!(2024 - 03 - 03),
            ]
            .map(SelectedDay::new),
        );
        assert_eq!(added, 2);
        assert_eq!(
            store.dates(),
            [
                date!(2024 - 03 - 02),
                date!(2024 - 03 - 01),
                date!(2024 - 03 - 03)
            ]
        );
        assert_eq!(store.extend([SelectedDay::new(date!(2024 - 03 - 01))]), 0);
        assert_eq!(calls.borrow().len(), 2);
    }

    #[test]
    fn test_replace_with_all_drops_duplicates() {
        let mut store = SelectionStore::new();
        store.replace_with_all(
            [
                date!(2024 - 03 - 05),
                date!(2024 - 03 - 01),
                date!(2024 - 03 - 05),
            ]
            .map(SelectedDay::new),
        );
        assert_eq!(store.dates(), [date!(2024 - 03 - 05), date!(2024 - 03 - 01)]);
        assert!(store.contains(date!(2024 - 03 - 01)));
        assert!(!store.contains(date!(2024 - 03 - 02)));
    }
}
