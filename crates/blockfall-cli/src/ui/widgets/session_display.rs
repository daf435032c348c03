use blockfall_engine::{Clock, GameSession, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use super::{BoardDisplay, PieceDisplay, StatsDisplay, color, style};

/// Whole play screen: stats, board, next piece and the state overlay.
#[derive(Debug)]
pub struct SessionDisplay<'a, C> {
    session: &'a GameSession<C>,
}

impl<'a, C> SessionDisplay<'a, C>
where
    C: Clock,
{
    pub fn new(session: &'a GameSession<C>) -> Self {
        Self { session }
    }

    fn popup(&self) -> Option<(Text<'static>, Style)> {
        let state = self.session.state();
        match self.session.session_state() {
            SessionState::Playing => None,
            SessionState::NotStarted => Some((
                Text::from(vec![
                    Line::from("BLOCKFALL"),
                    Line::from(""),
                    Line::from("Press Enter to start"),
                ]),
                Style::new().fg(color::BLACK).bg(color::CYAN),
            )),
            SessionState::Paused => Some((
                Text::from("PAUSED"),
                Style::new().fg(color::BLACK).bg(color::YELLOW),
            )),
            SessionState::GameOver => Some((
                Text::from(vec![
                    Line::from("GAME OVER"),
                    Line::from(""),
                    Line::from(format!("Score: {}", state.score())),
                    Line::from(format!("Lines: {}", state.lines())),
                    Line::from(format!("Level: {}", u64::from(state.level()) + 1)),
                    Line::from(""),
                    Line::from("Enter: play again"),
                ]),
                Style::new().fg(color::WHITE).bg(color::RED),
            )),
        }
    }
}

impl<C> Widget for SessionDisplay<'_, C>
where
    C: Clock,
{
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block_padding = Padding::symmetric(1, 0);
        let border_style: Color = match self.session.session_state() {
            SessionState::NotStarted => color::CYAN,
            SessionState::Playing => color::WHITE,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver => color::RED,
        };
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let render_board = self.session.render_board();
        let game_board = BoardDisplay::new(&render_board)
            .block(Block::bordered().border_style(border_style).style(style::DEFAULT));
        let next_panel = PieceDisplay::new()
            .piece(*self.session.state().next_piece())
            .block(panel("NEXT"));
        let stats = StatsDisplay::new(self.session).block(panel("STATS"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(game_board.width()),
            Constraint::Length(next_panel.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [stats_area] = Layout::vertical([Constraint::Length(stats.height())]).areas(left_column);
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [next_area] =
            Layout::vertical([Constraint::Length(next_panel.height())]).areas(right_column);

        let game_board_width = game_board.width();
        stats.render(stats_area, buf);
        game_board.render(board_area, buf);
        next_panel.render(next_area, buf);

        if let Some((text, style)) = self.popup() {
            let height = u16::try_from(text.height()).unwrap_or(u16::MAX) + 2;
            let block = Block::new().style(style);
            let text = text.style(style).centered();
            let area = board_area.centered(
                Constraint::Length(game_board_width),
                Constraint::Length(height),
            );
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.render(inner.centered_vertically(Constraint::Length(height - 2)), buf);
        }
    }
}
