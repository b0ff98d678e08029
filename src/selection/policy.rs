use super::{Click, SelectedDay, SelectionStore};
use crate::calendar::util::days_strictly_between;
use crate::event::{EventDay, EventDays};
use std::iter::once;
use time::Date;

/// Cells whose display attributes are stale after a state change
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Repaint {
    everything: bool,
    targets: Vec<SelectedDay>,
}

impl Repaint {
    pub fn none() -> Repaint {
        Repaint::default()
    }

    /// Every materialized page must be rebuilt
    pub fn everything() -> Repaint {
        Repaint {
            everything: true,
            targets: Vec::new(),
        }
    }

    pub fn is_everything(&self) -> bool {
        self.everything
    }

    pub fn is_empty(&self) -> bool {
        !self.everything && self.targets.is_empty()
    }

    pub fn targets(&self) -> &[SelectedDay] {
        &self.targets
    }

    pub fn dates(&self) -> Vec<Date> {
        self.targets.iter().map(SelectedDay::date).collect()
    }

    pub fn push(&mut self, target: SelectedDay) {
        self.targets.push(target);
    }

    pub fn merge(&mut self, other: Repaint) {
        self.everything |= other.everything;
        self.targets.extend(other.targets);
    }
}

impl FromIterator<SelectedDay> for Repaint {
    fn from_iter<I: IntoIterator<Item = SelectedDay>>(iter: I) -> Repaint {
        Repaint {
            everything: false,
            targets: iter.into_iter().collect(),
        }
    }
}

impl Extend<SelectedDay> for Repaint {
    fn extend<I: IntoIterator<Item = SelectedDay>>(&mut self, iter: I) {
        self.targets.extend(iter);
    }
}

/// Result of applying a click to the selection
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ClickOutcome {
    pub repaint: Repaint,
    /// In classic mode, the event day to hand to the day-click listener
    pub clicked: Option<EventDay>,
}

impl ClickOutcome {
    fn repaint<I: IntoIterator<Item = SelectedDay>>(targets: I) -> ClickOutcome {
        ClickOutcome {
            repaint: targets.into_iter().collect(),
            clicked: None,
        }
    }
}

/// How clicks on day cells change the selection.  One variant per calendar
/// mode; the variant is fixed when the picker is built.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SelectionPolicy {
    /// At most one day is selected, and clicking it again keeps it selected
    OneDay,
    /// Each click toggles the clicked day
    ManyDays,
    /// The first click picks an anchor, the second completes the span, and a
    /// third starts over
    Range,
    /// Nothing is selected; clicks are reported to the host and the clicked
    /// cell is highlighted
    Classic { highlighted: Option<SelectedDay> },
}

impl SelectionPolicy {
    pub fn highlighted(&self) -> Option<Date> {
        match self {
            SelectionPolicy::Classic { highlighted } => highlighted.map(|sd| sd.date()),
            _ => None,
        }
    }

    pub(crate) fn clear_highlight(&mut self) -> Option<SelectedDay> {
        match self {
            SelectionPolicy::Classic { highlighted } => highlighted.take(),
            _ => None,
        }
    }

    pub fn apply(
        &mut self,
        click: Click,
        store: &mut SelectionStore,
        events: &EventDays,
    ) -> ClickOutcome {
        let day = SelectedDay::from(click);
        match self {
            SelectionPolicy::OneDay => {
                if !click.in_current_month {
                    return ClickOutcome::default();
                }
                let previous = store.first().ok().copied();
                if previous.is_some_and(|p| p == day) {
                    return ClickOutcome::default();
                }
                store.replace_with(day);
                tracing::debug!(date = %click.date, "Selected single day");
                ClickOutcome::repaint(previous.into_iter().chain(once(day)))
            }
            SelectionPolicy::ManyDays => {
                if !click.in_current_month {
                    return ClickOutcome::default();
                }
                store.toggle(day);
                ClickOutcome::repaint([day])
            }
            SelectionPolicy::Range => {
                if !click.in_current_month {
                    return ClickOutcome::default();
                }
                Self::apply_range(day, store)
            }
            SelectionPolicy::Classic { highlighted } => {
                let previous = highlighted.replace(day).filter(|&p| p != day);
                let event = events
                    .get(click.date)
                    .cloned()
                    .unwrap_or_else(|| EventDay::new(click.date));
                tracing::debug!(date = %click.date, bare = event.is_bare(), "Day clicked");
                ClickOutcome {
                    repaint: previous.into_iter().chain(once(day)).collect(),
                    clicked: Some(event),
                }
            }
        }
    }

    fn apply_range(day: SelectedDay, store: &mut SelectionStore) -> ClickOutcome {
        match store.all() {
            [] => {
                store.replace_with(day);
                tracing::debug!(anchor = %day.date(), "Started range");
                ClickOutcome::repaint([day])
            }
            [anchor] => {
                let anchor = *anchor;
                if anchor == day {
                    return ClickOutcome::default();
                }
                let added = days_strictly_between(anchor.date(), day.date())
                    .map(SelectedDay::new)
                    .chain(once(day))
                    .collect::<Vec<_>>();
                store.extend(added.iter().copied());
                tracing::debug!(
                    anchor = %anchor.date(),
                    end = %day.date(),
                    days = store.len(),
                    "Completed range"
                );
                ClickOutcome::repaint(added)
            }
            _ => {
                let previous = store.all().to_vec();
                store.replace_with(day);
                tracing::debug!(anchor = %day.date(), "Restarted range");
                ClickOutcome::repaint(previous.into_iter().chain(once(day)))
            }
        }
    }
}
