use ratatui::{
    buffer::Buffer,
    layout::Flex,
    layout::{Alignment, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

/// Key, description, and whether the command only applies to picker modes
static COMMANDS: &[(&str, &str, bool)] = &[
    ("h, LEFT", "Move to the previous day", false),
    ("l, RIGHT", "Move to the next day", false),
    ("k, UP", "Move to the previous week", false),
    ("j, DOWN", "Move to the next week", false),
    ("p, PAGE UP", "Show the previous month", false),
    ("n, PAGE DOWN", "Show the next month", false),
    ("0, HOME", "Jump to today", false),
    ("g", "Input date to jump to", false),
    ("ENTER, SPACE", "Click the day under the cursor", false),
    ("x", "Clear the selection", false),
    ("y", "Confirm the selection", true),
    ("?", "Show this help", false),
    ("q, ESC", "Quit", false),
];

const KEY_COLUMN_WIDTH: usize = 16;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help {
    style: Style,
    picker: bool,
}

impl Help {
    /// `picker` selects whether the selection commands are listed
    pub(crate) fn new(style: Style, picker: bool) -> Help {
        Help { style, picker }
    }

    fn text(self) -> Text<'static> {
        let mut lines = COMMANDS
            .iter()
            .filter(|&&(_, _, picker_only)| self.picker || !picker_only)
            .map(|&(keys, about, _)| Line::raw(format!("{keys:KEY_COLUMN_WIDTH$}{about}")))
            .collect::<Vec<_>>();
        lines.push(Line::raw(""));
        lines.push(Line::raw("Press the Any Key to dismiss."));
        Text::from(lines)
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = self.text();
        let height = u16::try_from(text.height())
            .unwrap_or(u16::MAX)
            .min(area.height)
            .saturating_add(2);
        let width = u16::try_from(text.width())
            .unwrap_or(u16::MAX)
            .min(area.width)
            .saturating_add(2);
        let para = Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .style(self.style);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        let outer_area = Rect {
            x: help_area.x.saturating_sub(1),
            y: help_area.y,
            width: help_area.width.saturating_add(2),
            height: help_area.height,
        };
        Clear.render(outer_area, buf);
        Block::new().style(self.style).render(outer_area, buf);
        para.render(help_area, buf);
    }
}
