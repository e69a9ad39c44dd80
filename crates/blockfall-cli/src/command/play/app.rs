use blockfall_engine::{ControlError, GameSession, SessionState};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    text::Text,
    widgets::{Block, Paragraph},
};
use tracing::{info, trace};

use crate::{
    tui::{App, Tui},
    view::widgets::{
        BoardDisplay, KeyBinding, KeyBindingDisplay, StatsDisplay, style,
    },
};

const FPS: f64 = 60.0;

const PLAYING_BINDINGS: &[KeyBinding] = &[
    KeyBinding::new(&["←", "→"], "Move"),
    KeyBinding::new(&["Z", "X"], "Rotate"),
    KeyBinding::new(&["↓"], "Soft Drop"),
    KeyBinding::new(&["↑", "Space"], "Hard Drop"),
    KeyBinding::new(&["P"], "Pause"),
    KeyBinding::new(&["R"], "Restart"),
    KeyBinding::new(&["Q"], "Quit"),
];
const PAUSED_BINDINGS: &[KeyBinding] = &[
    KeyBinding::new(&["P"], "Resume"),
    KeyBinding::new(&["R"], "Restart"),
    KeyBinding::new(&["Q"], "Quit"),
];
const GAME_OVER_BINDINGS: &[KeyBinding] = &[
    KeyBinding::new(&["R"], "Restart"),
    KeyBinding::new(&["Q"], "Quit"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    MoveLeft,
    MoveRight,
    RotateLeft,
    RotateRight,
    SoftDrop,
    HardDrop,
    TogglePause,
    Restart,
    Quit,
}

impl Control {
    fn from_key(key: &KeyEvent) -> Option<Self> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return matches!(key.code, KeyCode::Char('c')).then_some(Self::Quit);
        }
        let control = match key.code {
            KeyCode::Left => Self::MoveLeft,
            KeyCode::Right => Self::MoveRight,
            KeyCode::Char('z' | 'Z') => Self::RotateLeft,
            KeyCode::Char('x' | 'X') => Self::RotateRight,
            KeyCode::Down => Self::SoftDrop,
            KeyCode::Up | KeyCode::Char(' ') => Self::HardDrop,
            KeyCode::Char('p' | 'P') => Self::TogglePause,
            KeyCode::Char('r' | 'R') => Self::Restart,
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => Self::Quit,
            _ => return None,
        };
        Some(control)
    }
}

#[derive(Debug)]
pub(crate) struct PlayApp {
    session: GameSession,
    tick_rate: f64,
    is_exiting: bool,
}

impl PlayApp {
    pub(crate) fn new(session: GameSession, tick_rate: f64) -> Self {
        Self {
            session,
            tick_rate,
            is_exiting: false,
        }
    }

    pub(crate) fn session(&self) -> &GameSession {
        &self.session
    }

    fn apply(&mut self, control: Control) {
        let session = &mut self.session;
        let result: Result<(), ControlError> = match control {
            Control::MoveLeft => session.try_move_left(),
            Control::MoveRight => session.try_move_right(),
            Control::RotateLeft => session.try_rotate_left(),
            Control::RotateRight => session.try_rotate_right(),
            Control::SoftDrop => session.soft_drop().map(|_| ()),
            Control::HardDrop => session.hard_drop().map(|_| ()),
            Control::TogglePause => {
                session.toggle_pause();
                Ok(())
            }
            Control::Restart => {
                info!("restart requested");
                session.restart();
                Ok(())
            }
            Control::Quit => {
                self.is_exiting = true;
                Ok(())
            }
        };
        if let Err(err) = result {
            trace!(?control, %err, "control rejected");
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, tui: &mut Tui) -> anyhow::Result<()> {
        tui.set_tick_rate(self.tick_rate)?;
        tui.set_frame_rate(FPS)
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, event: &Event) {
        if let Some(control) = event.as_key_event().as_ref().and_then(Control::from_key) {
            self.apply(control);
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let board = self.session.board();
        let state = self.session.state();

        let mut board_display =
            BoardDisplay::new(board.grid()).block(Block::bordered().title(" BLOCKFALL "));
        if !state.is_game_over() {
            board_display = board_display
                .ghost(board.ghost_piece())
                .falling_piece(*board.piece());
        }
        let stats_display =
            StatsDisplay::new(&self.session, self.tick_rate).block(Block::bordered().title(" STATS "));
        let (status, status_style, bindings) = match state {
            SessionState::Playing => ("PLAYING", style::DEFAULT, PLAYING_BINDINGS),
            SessionState::Paused => ("PAUSED", style::PAUSED, PAUSED_BINDINGS),
            SessionState::GameOver => ("GAME OVER", style::GAME_OVER, GAME_OVER_BINDINGS),
        };
        let status_display = Paragraph::new(Text::from(status).centered())
            .style(status_style)
            .block(Block::bordered());

        let [main_area, help_area] = Layout::vertical([
            Constraint::Length(board_display.height()),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(frame.area());
        let [board_area, side_area] = Layout::horizontal([
            Constraint::Length(board_display.width()),
            Constraint::Length(stats_display.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(main_area);
        let [stats_area, status_area] = Layout::vertical([
            Constraint::Length(stats_display.height()),
            Constraint::Length(3),
        ])
        .areas(side_area);

        frame.render_widget(board_display, board_area);
        frame.render_widget(stats_display, stats_area);
        frame.render_widget(status_display, status_area);
        frame.render_widget(KeyBindingDisplay::new(bindings), help_area);
    }

    fn update(&mut self) {
        self.session.tick();
    }
}
