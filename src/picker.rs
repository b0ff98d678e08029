use crate::calendar::{generate_page, Page};
use crate::error::{CalendarError, ConfigError};
use crate::event::{EventDay, EventDays};
use crate::render::PageRenderModel;
use crate::selection::{
    Click, Repaint, SelectedDay, SelectionAbilityListener, SelectionPolicy, SelectionStore,
};
use std::fmt;
use std::str::FromStr;
use time::{Date, Month};

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum CalendarMode {
    #[default]
    Classic,
    OneDayPicker,
    ManyDaysPicker,
    RangePicker,
}

impl CalendarMode {
    fn policy(self) -> SelectionPolicy {
        match self {
            CalendarMode::Classic => SelectionPolicy::Classic { highlighted: None },
            CalendarMode::OneDayPicker => SelectionPolicy::OneDay,
            CalendarMode::ManyDaysPicker => SelectionPolicy::ManyDays,
            CalendarMode::RangePicker => SelectionPolicy::Range,
        }
    }

    pub fn is_picker(self) -> bool {
        self != CalendarMode::Classic
    }
}

impl fmt::Display for CalendarMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CalendarMode::Classic => "classic",
            CalendarMode::OneDayPicker => "one-day",
            CalendarMode::ManyDaysPicker => "many-days",
            CalendarMode::RangePicker => "range",
        };
        f.write_str(name)
    }
}

impl FromStr for CalendarMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<CalendarMode, ConfigError> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "classic" => Ok(CalendarMode::Classic),
            "one-day" | "oneday" | "one-day-picker" => Ok(CalendarMode::OneDayPicker),
            "many-days" | "manydays" | "many-days-picker" => Ok(CalendarMode::ManyDaysPicker),
            "range" | "range-picker" => Ok(CalendarMode::RangePicker),
            _ => Err(ConfigError::UnknownMode(s.to_owned())),
        }
    }
}

/// Month and weekday names handed to the renderer.  Weekdays are listed
/// Monday first.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Labels {
    months: [String; 12],
    weekdays: [String; 7],
}

impl Labels {
    pub fn new(months: Vec<String>, weekdays: Vec<String>) -> Result<Labels, ConfigError> {
        Labels::default().with_months(months)?.with_weekdays(weekdays)
    }

    /// Replaces the month names, which must be given January first
    pub fn with_months(mut self, months: Vec<String>) -> Result<Labels, ConfigError> {
        self.months = <[String; 12]>::try_from(months).map_err(|v| ConfigError::LabelCount {
            what: "month",
            expected: 12,
            got: v.len(),
        })?;
        Ok(self)
    }

    /// Replaces the weekday names, which must be given Monday first
    pub fn with_weekdays(mut self, weekdays: Vec<String>) -> Result<Labels, ConfigError> {
        self.weekdays = <[String; 7]>::try_from(weekdays).map_err(|v| ConfigError::LabelCount {
            what: "weekday",
            expected: 7,
            got: v.len(),
        })?;
        Ok(self)
    }

    pub fn month(&self, month: Month) -> &str {
        &self.months[usize::from(u8::from(month)) - 1]
    }

    /// Name of the weekday at the given Monday-first column
    pub fn weekday(&self, column: usize) -> &str {
        self.weekdays.get(column).map_or("", String::as_str)
    }
}

impl Default for Labels {
    fn default() -> Labels {
        Labels {
            months: [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]
            .map(String::from),
            weekdays: ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"].map(String::from),
        }
    }
}

/// Receives the event day resolved for each click in classic mode
pub trait DayClickListener {
    fn on_day_click(&mut self, day: &EventDay);
}

impl<F: FnMut(&EventDay)> DayClickListener for F {
    fn on_day_click(&mut self, day: &EventDay) {
        self(day);
    }
}

/// Assembles a [`CalendarPicker`], validating the options up front
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CalendarBuilder {
    mode: CalendarMode,
    today: Date,
    selected: Option<Date>,
    events: Vec<EventDay>,
    labels: Labels,
}

impl CalendarBuilder {
    pub fn new(today: Date) -> CalendarBuilder {
        CalendarBuilder {
            mode: CalendarMode::default(),
            today,
            selected: None,
            events: Vec::new(),
            labels: Labels::default(),
        }
    }

    pub fn mode(mut self, mode: CalendarMode) -> CalendarBuilder {
        self.mode = mode;
        self
    }

    /// Initially selected date; only meaningful for the one-day picker
    pub fn selected_date(mut self, date: Date) -> CalendarBuilder {
        self.selected = Some(date);
        self
    }

    pub fn events<I: IntoIterator<Item = EventDay>>(mut self, events: I) -> CalendarBuilder {
        self.events = events.into_iter().collect();
        self
    }

    pub fn labels(mut self, labels: Labels) -> CalendarBuilder {
        self.labels = labels;
        self
    }

    pub fn build(self) -> Result<CalendarPicker, ConfigError> {
        let mut store = SelectionStore::new();
        match (self.mode, self.selected) {
            (CalendarMode::OneDayPicker, selected) => {
                store.replace_with(SelectedDay::new(selected.unwrap_or(self.today)));
            }
            (mode, Some(_)) => return Err(ConfigError::SelectionNotSupported { mode }),
            (_, None) => (),
        }
        tracing::info!(mode = %self.mode, today = %self.today, "Building calendar picker");
        Ok(CalendarPicker {
            mode: self.mode,
            anchor: self.today,
            today: self.today,
            policy: self.mode.policy(),
            store,
            events: self.events.into_iter().collect(),
            labels: self.labels,
            day_click_listener: None,
        })
    }
}

/// The calendar's state: selection, events, and the date used for today
/// highlighting.  Page offsets are counted from the month containing the
/// date that was "today" at construction.
pub struct CalendarPicker {
    mode: CalendarMode,
    anchor: Date,
    today: Date,
    policy: SelectionPolicy,
    store: SelectionStore,
    events: EventDays,
    labels: Labels,
    day_click_listener: Option<Box<dyn DayClickListener>>,
}

impl CalendarPicker {
    pub fn mode(&self) -> CalendarMode {
        self.mode
    }

    pub fn anchor(&self) -> Date {
        self.anchor
    }

    pub fn today(&self) -> Date {
        self.today
    }

    pub fn labels(&self) -> &Labels {
        &self.labels
    }

    pub fn events(&self) -> &EventDays {
        &self.events
    }

    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    pub fn set_selection_ability_listener<L: SelectionAbilityListener + 'static>(
        &mut self,
        listener: L,
    ) {
        self.store.set_listener(listener);
    }

    pub fn set_day_click_listener<L: DayClickListener + 'static>(&mut self, listener: L) {
        self.day_click_listener = Some(Box::new(listener));
    }

    pub fn generate(&self, offset: i32) -> Result<Page, CalendarError> {
        generate_page(self.anchor, offset)
    }

    pub fn render_page(&self, page: Page) -> PageRenderModel {
        PageRenderModel::build(
            page,
            self.today,
            &self.store,
            &self.events,
            self.policy.highlighted(),
        )
    }

    pub fn page(&self, offset: i32) -> Result<PageRenderModel, CalendarError> {
        Ok(self.render_page(self.generate(offset)?))
    }

    /// Applies a click on a day cell and returns the cells to repaint
    pub fn click(&mut self, click: Click) -> Repaint {
        let outcome = self.policy.apply(click, &mut self.store, &self.events);
        if let Some(day) = outcome.clicked {
            if let Some(listener) = self.day_click_listener.as_mut() {
                listener.on_day_click(&day);
            }
        }
        outcome.repaint
    }

    /// Replaces the event list wholesale
    pub fn set_events<I: IntoIterator<Item = EventDay>>(&mut self, events: I) -> Repaint {
        self.events = events.into_iter().collect();
        tracing::debug!(events = self.events.len(), "Replaced event list");
        Repaint::everything()
    }

    pub fn set_today(&mut self, today: Date) -> Repaint {
        let old = std::mem::replace(&mut self.today, today);
        [old, today].into_iter().map(SelectedDay::new).collect()
    }

    pub fn can_confirm(&self) -> bool {
        !self.store.is_empty()
    }

    pub fn selected_dates(&self) -> Vec<Date> {
        self.store.dates()
    }

    /// Returns the one-day picker's selected date
    pub fn selected_date(&self) -> Result<Date, CalendarError> {
        if self.mode != CalendarMode::OneDayPicker {
            return Err(CalendarError::InvalidModeOperation {
                mode: self.mode,
                operation: "getting the single selected date",
            });
        }
        self.store.first().map(SelectedDay::date)
    }

    /// Replaces the selection with `dates`, subject to the mode's shape
    /// constraints
    pub fn set_selected_dates<I: IntoIterator<Item = Date>>(
        &mut self,
        dates: I,
    ) -> Result<Repaint, CalendarError> {
        let mut dates = dates.into_iter().collect::<Vec<_>>();
        match self.mode {
            CalendarMode::Classic => {
                return Err(CalendarError::InvalidModeOperation {
                    mode: self.mode,
                    operation: "setting the selection",
                })
            }
            CalendarMode::OneDayPicker if dates.len() > 1 => {
                return Err(CalendarError::InvalidModeOperation {
                    mode: self.mode,
                    operation: "selecting more than one date",
                })
            }
            CalendarMode::RangePicker => {
                dates.sort_unstable();
                dates.dedup();
                if dates
                    .windows(2)
                    .any(|w| matches!(w, [a, b] if a.next_day() != Some(*b)))
                {
                    return Err(CalendarError::NonContiguousRange);
                }
            }
            _ => (),
        }
        let mut repaint = self.store.all().iter().copied().collect::<Repaint>();
        if dates.is_empty() {
            self.store.clear();
        } else {
            self.store
                .replace_with_all(dates.iter().copied().map(SelectedDay::new));
        }
        repaint.merge(dates.into_iter().map(SelectedDay::new).collect());
        tracing::debug!(days = self.store.len(), "Selection set programmatically");
        Ok(repaint)
    }

    pub fn clear_selection(&mut self) -> Repaint {
        let mut repaint = self.store.all().iter().copied().collect::<Repaint>();
        repaint.extend(self.policy.clear_highlight());
        self.store.clear();
        repaint
    }
}

impl fmt::Debug for CalendarPicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CalendarPicker")
            .field("mode", &self.mode)
            .field("anchor", &self.anchor)
            .field("today", &self.today)
            .field("policy", &self.policy)
            .field("store", &self.store)
            .field("events", &self.events)
            .finish_non_exhaustive()
    }
}
