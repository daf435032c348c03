use std::{iter, time::Duration};

use blockfall_engine::{Clock, GameSession};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::{color, style};

/// Score panel: score, lines, level, play time and combo.
pub struct StatsDisplay<'a, C> {
    session: &'a GameSession<C>,
    block: Option<BlockWidget<'a>>,
}

impl<'a, C> StatsDisplay<'a, C>
where
    C: Clock,
{
    pub fn new(session: &'a GameSession<C>) -> Self {
        Self {
            session,
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        18 + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        6 + super::block_vertical_margin(self.block.as_ref())
    }

    fn rows(&self) -> [(&'static str, String); 5] {
        let state = self.session.state();
        [
            ("SCORE:", self.session.display_score().to_string()),
            ("LINES:", state.lines().to_string()),
            ("LEVEL:", (u64::from(state.level()) + 1).to_string()),
            ("TIME:", format_elapsed(self.session.elapsed())),
            ("COMBO:", format_combo(state.combo())),
        ]
    }
}

/// Formats play time as `m:ss`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}:{:02}", secs / 60, secs % 60)
}

fn format_combo(combo: u32) -> String {
    if combo > 0 {
        format!("x{combo}")
    } else {
        "-".to_owned()
    }
}

impl<C> Widget for StatsDisplay<'_, C>
where
    C: Clock,
{
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let rows = self.rows();
        let row_areas = Layout::vertical(rows.iter().map(|_| Constraint::Length(1))).split(area);
        for ((label, value), area) in iter::zip(rows, row_areas.iter().copied()) {
            let [label_area, value_area] = area.layout(&Layout::horizontal([
                Constraint::Fill(1),
                Constraint::Fill(1),
            ]));
            let value_style = if label == "COMBO:" && value != "-" {
                style::DEFAULT.fg(color::YELLOW)
            } else {
                style::DEFAULT
            };
            Line::styled(label, style::DEFAULT)
                .left_aligned()
                .render(label_area, buf);
            Line::styled(value, value_style)
                .right_aligned()
                .render(value_area, buf);
        }
    }
}
