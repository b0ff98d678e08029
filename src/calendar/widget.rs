use super::util::DAYS_IN_WEEK;
use crate::picker::Labels;
use crate::render::{CellAttrs, PageRenderModel};
use crate::theme::{
    EVENT_STYLE, HIGHLIGHT_STYLE, OTHER_MONTH_STYLE, SELECTED_STYLE, TITLE_STYLE, WEEKDAY_STYLE,
};
use ratatui::{prelude::*, widgets::*};

/// Number of columns per day of week
const DAY_WIDTH: u16 = 5;

/// Width of the calendar in columns
const MAIN_WIDTH: u16 = DAY_WIDTH * 7;

/// Number of lines taken up by the title, the weekday header, and its rule
const HEADER_LINES: u16 = 3;

/// Number of lines needed to show a whole page
pub(crate) const MONTH_VIEW_HEIGHT: u16 = HEADER_LINES + 6;

/// Weekday labels longer than this are cut short
const MAX_WEEKDAY_LABEL_LEN: usize = 4;

const ACS_HLINE: char = '─';

/// Default marker shown next to event days that don't specify their own
const EVENT_MARKER: char = '*';

/// Draws one page of the calendar: a title, a Monday-first weekday header,
/// and six weeks of day cells.  Today's date is bracketed, and event days get
/// a marker after the day number.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct MonthView<'a> {
    model: &'a PageRenderModel,
    labels: &'a Labels,
    cursor: Option<usize>,
}

impl<'a> MonthView<'a> {
    pub fn new(model: &'a PageRenderModel, labels: &'a Labels) -> MonthView<'a> {
        MonthView {
            model,
            labels,
            cursor: None,
        }
    }

    /// Mark the cell at `index` as the one the keyboard cursor is on
    pub fn cursor(mut self, index: usize) -> Self {
        self.cursor = Some(index);
        self
    }

    fn cell_style(attrs: &CellAttrs) -> Style {
        if attrs.is_selected {
            SELECTED_STYLE
        } else if attrs.is_highlighted {
            HIGHLIGHT_STYLE
        } else if !attrs.is_current_month {
            OTHER_MONTH_STYLE
        } else if attrs.event.is_some() {
            EVENT_STYLE
        } else {
            Style::new()
        }
    }
}

impl Widget for MonthView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let left = area.width.saturating_sub(MAIN_WIDTH) / 2;
        let area = Rect {
            x: area.x + left,
            width: MAIN_WIDTH.min(area.width),
            ..area
        };
        let mut canvas = BufferCanvas::new(area, buf);
        let page = self.model.page();
        canvas.draw_title(&format!(
            "{} {}",
            self.labels.month(page.month()),
            page.year()
        ));
        canvas.draw_header(self.labels);
        for (i, attrs) in self.model.cells().iter().enumerate() {
            let mut style = Self::cell_style(attrs);
            if self.cursor == Some(i) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            canvas.draw_day(i, attrs, style);
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer) -> Self {
        Self { area, buf }
    }

    fn draw_title(&mut self, title: &str) {
        let width = u16::try_from(Text::raw(title).width()).unwrap_or(u16::MAX);
        let x = MAIN_WIDTH.saturating_sub(width) / 2;
        self.mvprint(0, x, title, Some(TITLE_STYLE));
    }

    fn draw_header(&mut self, labels: &Labels) {
        for (col, x) in std::iter::zip(0..DAYS_IN_WEEK, (1..).step_by(DAY_WIDTH.into())) {
            let label = labels
                .weekday(col)
                .chars()
                .take(MAX_WEEKDAY_LABEL_LEN)
                .collect::<String>();
            self.mvprint(1, x, label, Some(WEEKDAY_STYLE));
        }
        self.hline(2, 0, ACS_HLINE, MAIN_WIDTH);
    }

    fn draw_day(&mut self, index: usize, attrs: &CellAttrs, style: Style) {
        let (Ok(week), Ok(col)) = (
            u16::try_from(index / DAYS_IN_WEEK),
            u16::try_from(index % DAYS_IN_WEEK),
        ) else {
            return;
        };
        let (open, close) = if attrs.is_today {
            ('[', ']')
        } else {
            (' ', ' ')
        };
        let y = HEADER_LINES + week;
        let x = col * DAY_WIDTH;
        self.mvprint(
            y,
            x,
            format!("{open}{:2}{close}", attrs.date.day()),
            Some(style),
        );
        if let Some(ev) = attrs.event.as_ref() {
            let marker = ev.marker().unwrap_or(EVENT_MARKER);
            // Today's closing bracket takes the marker's usual column
            let marker_x = if attrs.is_today { x + 4 } else { x + 3 };
            self.mvprint(y, marker_x, String::from(marker), Some(EVENT_STYLE));
        }
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: u16, x: u16, s: S, style: Option<Style>) {
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // calendar's area, though we need to be sure that the Rect passed
            // to the Paragraph is entirely within the frame lest a panic
            // result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: u16, x: u16, ch: char, length: u16) {
        self.mvprint(y, x, String::from(ch).repeat(length.into()), None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::generate_page;
    use crate::event::{EventDay, EventDays};
    use crate::selection::{SelectedDay, SelectionStore};
    use time::macros::date;

    fn june_model() -> PageRenderModel {
        let page = generate_page(date!(2024 - 06 - 12), 0).unwrap();
        let mut store = SelectionStore::new();
        store.toggle(SelectedDay::new(date!(2024 - 06 - 03)));
        store.toggle(SelectedDay::new(date!(2024 - 06 - 04)));
        let events = EventDays::from_iter([EventDay::new(date!(2024 - 06 - 20))]);
        PageRenderModel::build(page, date!(2024 - 06 - 12), &store, &events, None)
    }

    fn rows(buf: &Buffer) -> Vec<String> {
        (0..buf.area.height)
            .map(|y| (0..buf.area.width).map(|x| buf[(x, y)].symbol()).collect())
            .collect()
    }

    #[test]
    fn test_june_2024() {
        let model = june_model();
        let labels = Labels::default();
        let area = Rect::new(0, 0, MAIN_WIDTH, MONTH_VIEW_HEIGHT);
        let mut buffer = Buffer::empty(area);
        MonthView::new(&model, &labels).render(area, &mut buffer);
        assert_eq!(
            rows(&buffer),
            [
                "             June 2024             ",
                " Mo   Tu   We   Th   Fr   Sa   Su  ",
                "───────────────────────────────────",
                " 27   28   29   30   31    1    2  ",
                "  3    4    5    6    7    8    9  ",
                " 10   11  [12]  13   14   15   16  ",
                " 17   18   19   20*  21   22   23  ",
                " 24   25   26   27   28   29   30  ",
                "  1    2    3    4    5    6    7  ",
            ]
        );
        assert_eq!(buffer[(14, 0)].modifier, Modifier::BOLD);
        assert_eq!(buffer[(1, 3)].fg, Color::DarkGray);
        assert_eq!(buffer[(1, 4)].bg, Color::LightGreen);
        assert_eq!(buffer[(6, 4)].bg, Color::LightGreen);
        assert_ne!(buffer[(11, 4)].bg, Color::LightGreen);
        assert_eq!(buffer[(16, 6)].fg, Color::LightYellow);
        assert_eq!(buffer[(18, 6)].symbol(), "*");
        assert_eq!(buffer[(18, 6)].fg, Color::LightYellow);
        assert!(!buffer[(11, 5)].modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_cursor() {
        let model = june_model();
        let labels = Labels::default();
        let area = Rect::new(0, 0, MAIN_WIDTH, MONTH_VIEW_HEIGHT);
        let mut buffer = Buffer::empty(area);
        MonthView::new(&model, &labels)
            .cursor(16)
            .render(area, &mut buffer);
        assert!(buffer[(11, 5)].modifier.contains(Modifier::REVERSED));
        assert!(!buffer[(16, 5)].modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_event_on_today() {
        let page = generate_page(date!(2024 - 06 - 12), 0).unwrap();
        let events = EventDays::from_iter([EventDay::new(date!(2024 - 06 - 12)).with_marker('!')]);
        let model = PageRenderModel::build(
            page,
            date!(2024 - 06 - 12),
            &SelectionStore::new(),
            &events,
            None,
        );
        let labels = Labels::default();
        let area = Rect::new(0, 0, MAIN_WIDTH, MONTH_VIEW_HEIGHT);
        let mut buffer = Buffer::empty(area);
        MonthView::new(&model, &labels).render(area, &mut buffer);
        assert_eq!(rows(&buffer)[5], " 10   11  [12]! 13   14   15   16  ");
        assert_eq!(buffer[(13, 5)].symbol(), "]");
        assert_eq!(buffer[(14, 5)].fg, Color::LightYellow);
    }

    #[test]
    fn test_centered_and_truncated() {
        let model = june_model();
        let labels = Labels::default();
        let area = Rect::new(0, 0, 45, 4);
        let mut buffer = Buffer::empty(area);
        MonthView::new(&model, &labels).render(area, &mut buffer);
        assert_eq!(
            rows(&buffer),
            [
                "                  June 2024                  ",
                "      Mo   Tu   We   Th   Fr   Sa   Su       ",
                "     ───────────────────────────────────     ",
                "      27   28   29   30   31    1    2       ",
            ]
        );
    }
}
