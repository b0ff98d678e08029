use crate::calendar::{util::months_between, MonthView, MONTH_VIEW_HEIGHT};
use crate::event::EventDay;
use crate::help::Help;
use crate::jumpto::{JumpTo, JumpToInput, JumpToOutput, JumpToState};
use crate::pager::PageHost;
use crate::picker::CalendarPicker;
use crate::theme::{BASE_STYLE, STATUS_STYLE};
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    text::Line,
    widgets::{StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use std::sync::mpsc::{channel, Receiver, Sender};
use time::{Date, Duration};

/// Terminal front end: shows one page at a time with a keyboard cursor on one
/// of its cells and feeds clicks on that cell to the picker
#[derive(Debug)]
pub struct App {
    picker: CalendarPicker,
    host: PageHost,
    offset: i32,
    cursor: usize,
    state: AppState,
    notices: Receiver<Notice>,
    confirmable: bool,
    last_clicked: Option<EventDay>,
}

/// How the user left the calendar
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AppExit {
    Quit,
    /// The selection was confirmed; holds the selected dates in the order they
    /// were added
    Confirmed(Vec<Date>),
}

/// Messages sent by the picker's listeners
#[derive(Clone, Debug, Eq, PartialEq)]
enum Notice {
    SelectionAbility(bool),
    DayClicked(EventDay),
}

fn notify(sender: &Sender<Notice>, notice: Notice) {
    if let Err(e) = sender.send(notice) {
        tracing::debug!(notice = ?e.0, "Listener notice dropped");
    }
}

impl App {
    pub fn new(mut picker: CalendarPicker) -> App {
        let (sender, notices) = channel();
        let ability_sender = sender.clone();
        picker.set_selection_ability_listener(move |can_select: bool| {
            notify(&ability_sender, Notice::SelectionAbility(can_select));
        });
        picker.set_day_click_listener(move |day: &EventDay| {
            notify(&sender, Notice::DayClicked(day.clone()));
        });
        let confirmable = picker.can_confirm();
        let mut app = App {
            picker,
            host: PageHost::default(),
            offset: 0,
            cursor: 0,
            state: AppState::Calendar,
            notices,
            confirmable,
            last_clicked: None,
        };
        app.reset();
        app
    }

    pub fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<AppExit> {
        loop {
            if let Some(exit) = self.exit() {
                return Ok(exit);
            }
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn exit(&self) -> Option<AppExit> {
        match self.state {
            AppState::Quitting => Some(AppExit::Quit),
            AppState::Confirmed => Some(AppExit::Confirmed(self.picker.selected_dates())),
            _ => None,
        }
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.move_cursor(-1),
                KeyCode::Char('l') | KeyCode::Right => self.move_cursor(1),
                KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-7),
                KeyCode::Char('j') | KeyCode::Down => self.move_cursor(7),
                KeyCode::Char('p') | KeyCode::PageUp => self.change_page(-1),
                KeyCode::Char('n') | KeyCode::PageDown => self.change_page(1),
                KeyCode::Char('0') | KeyCode::Home => self.reset(),
                KeyCode::Char(' ') | KeyCode::Enter => self.click(),
                KeyCode::Char('x') => {
                    self.clear();
                    true
                }
                KeyCode::Char('y') => self.confirm(),
                KeyCode::Char('g') => {
                    self.state = AppState::Jumping(JumpToState::new());
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Jumping(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Calendar;
                    true
                } else {
                    let output = match key {
                        KeyCode::Char('-') => state.handle_input(JumpToInput::Negative),
                        KeyCode::Char('+') => state.handle_input(JumpToInput::Positive),
                        KeyCode::Char(c) => match c.to_digit(10).map(u8::try_from) {
                            Some(Ok(d)) => state.handle_input(JumpToInput::Digit(d)),
                            _ => JumpToOutput::Invalid,
                        },
                        KeyCode::Backspace | KeyCode::Delete => {
                            state.handle_input(JumpToInput::Backspace)
                        }
                        KeyCode::Enter => state.handle_input(JumpToInput::Enter),
                        _ => JumpToOutput::Invalid,
                    };
                    match output {
                        JumpToOutput::Ok => true,
                        JumpToOutput::Invalid => false,
                        JumpToOutput::Jump(date) => {
                            self.state = AppState::Calendar;
                            self.jump_to(date)
                        }
                    }
                }
            }
            AppState::Quitting | AppState::Confirmed => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn cursor_date(&mut self) -> Option<Date> {
        let model = self.host.show(self.offset, &self.picker).ok()?;
        model.page().get(self.cursor)
    }

    /// Moves the cursor by `days`.  Leaving the grid turns to the page of the
    /// month the cursor lands in.
    fn move_cursor(&mut self, days: i64) -> bool {
        let Some(target) = self
            .cursor_date()
            .and_then(|date| date.checked_add(Duration::days(days)))
        else {
            return false;
        };
        let within = self
            .host
            .show(self.offset, &self.picker)
            .ok()
            .and_then(|model| model.page().index_of(target));
        match within {
            Some(index) => {
                self.cursor = index;
                true
            }
            None => self.jump_to(target),
        }
    }

    /// Turns `delta` pages, keeping the cursor on the same day of the month
    /// where possible
    fn change_page(&mut self, delta: i32) -> bool {
        let Some(day) = self.cursor_date().map(Date::day) else {
            return false;
        };
        let Some(offset) = self.offset.checked_add(delta) else {
            return false;
        };
        match self.host.show(offset, &self.picker) {
            Ok(model) => {
                let page = model.page();
                let day = day.min(page.last_of_month().day());
                self.cursor = page
                    .first_of_month()
                    .replace_day(day)
                    .ok()
                    .and_then(|date| page.index_of(date))
                    .unwrap_or_else(|| page.first_index());
                self.offset = offset;
                tracing::debug!(offset, "Turned page");
                true
            }
            Err(e) => {
                tracing::debug!(offset, error = %e, "Cannot turn page");
                false
            }
        }
    }

    fn reset(&mut self) -> bool {
        self.jump_to(self.picker.today())
    }

    /// Shows the page for the month containing `date` with the cursor on it
    fn jump_to(&mut self, date: Date) -> bool {
        let Ok(offset) = i32::try_from(months_between(self.picker.anchor(), date)) else {
            return false;
        };
        match self.host.show(offset, &self.picker) {
            Ok(model) => {
                let page = model.page();
                self.cursor = page.index_of(date).unwrap_or_else(|| page.first_index());
                self.offset = offset;
                true
            }
            Err(e) => {
                tracing::debug!(%date, error = %e, "Cannot jump to date");
                false
            }
        }
    }

    fn click(&mut self) -> bool {
        let Some(click) = self
            .host
            .show(self.offset, &self.picker)
            .ok()
            .and_then(|model| model.page().click(self.cursor))
        else {
            return false;
        };
        let repaint = self.picker.click(click);
        self.host.invalidate(&repaint);
        self.drain_notices();
        true
    }

    fn clear(&mut self) {
        let repaint = self.picker.clear_selection();
        self.host.invalidate(&repaint);
        self.last_clicked = None;
        self.drain_notices();
    }

    fn confirm(&mut self) -> bool {
        if self.picker.mode().is_picker() && self.confirmable {
            tracing::debug!(days = self.picker.store().len(), "Selection confirmed");
            self.state = AppState::Confirmed;
            true
        } else {
            false
        }
    }

    fn drain_notices(&mut self) {
        for notice in self.notices.try_iter() {
            match notice {
                Notice::SelectionAbility(can_select) => self.confirmable = can_select,
                Notice::DayClicked(day) => self.last_clicked = Some(day),
            }
        }
    }

    fn status_line(&self) -> String {
        if let Some(day) = self.last_clicked.as_ref() {
            return match day.label() {
                Some(label) => format!("{}: {label}", day.date()),
                None => day.date().to_string(),
            };
        }
        if !self.picker.mode().is_picker() {
            String::from("Press ? for help")
        } else if !self.confirmable {
            String::from("Nothing selected")
        } else {
            match self.picker.store().len() {
                1 => String::from("1 day selected, y to confirm"),
                n => format!("{n} days selected, y to confirm"),
            }
        }
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [cal_area, _, status_area] = Layout::vertical([MONTH_VIEW_HEIGHT, 1, 1])
            .flex(Flex::Center)
            .areas(area);
        let status = self.status_line();
        match self.host.show(self.offset, &self.picker) {
            Ok(model) => MonthView::new(model, self.picker.labels())
                .cursor(self.cursor)
                .render(cal_area, buf),
            Err(e) => Line::raw(e.to_string()).centered().render(cal_area, buf),
        }
        Line::styled(status, STATUS_STYLE)
            .centered()
            .render(status_area, buf);
        if self.state == AppState::Helping {
            Help::new(BASE_STYLE, self.picker.mode().is_picker()).render(area, buf);
        } else if let AppState::Jumping(ref mut state) = self.state {
            JumpTo.render(area, buf, state);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Jumping(JumpToState),
    Quitting,
    Confirmed,
}
