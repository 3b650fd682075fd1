use std::time::Duration;

use blockfall_engine::{Board, COLUMNS, CommandOutcome, GameCommand, ROWS};
use crossterm::event::{Event, KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    style::{Color, Style},
    text::Text,
    widgets::Block as BlockWidget,
};

use crate::{
    tui::Runtime,
    view::widgets::{BoardDisplay, KeyBinding, KeyBindingDisplay},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub(crate) enum PlayState {
    /// Waiting for the first game.
    Ready,
    Playing,
    GameOver,
}

const READY_KEYS: &[KeyBinding] = &[(&["S"], "Start"), (&["Q", "Esc"], "Quit")];
const PLAYING_KEYS: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↑"], "Rotate"),
    (&["↓"], "Soft Drop"),
    (&["Space", "Enter"], "Hard Drop"),
    (&["Q", "Esc"], "Quit"),
];
const GAME_OVER_KEYS: &[KeyBinding] = &[(&["S"], "Restart"), (&["Q", "Esc"], "Quit")];

#[derive(Debug)]
pub(crate) struct PlayScreen {
    board: Board,
    /// Locked cells as of the last time the board reported a change.
    grid: [[u8; COLUMNS]; ROWS],
    tick_interval: Duration,
    show_ghost: bool,
    state: PlayState,
    is_exiting: bool,
}

impl PlayScreen {
    pub(crate) fn new(board: Board, tick_interval: Duration, show_ghost: bool) -> Self {
        let mut screen = Self {
            board,
            grid: [[0; COLUMNS]; ROWS],
            tick_interval,
            show_ghost,
            state: PlayState::Ready,
            is_exiting: false,
        };
        screen.refresh_grid();
        screen
    }

    pub(crate) fn should_exit(&self) -> bool {
        self.is_exiting
    }

    pub(crate) fn handle_event(&mut self, runtime: &mut Runtime, event: &Event) {
        let Some(key) = event.as_key_event() else {
            return;
        };
        if key.kind != KeyEventKind::Press {
            return;
        }

        let playing = self.state.is_playing();
        match key.code {
            KeyCode::Left if playing => _ = self.apply(runtime, GameCommand::MoveLeft),
            KeyCode::Right if playing => _ = self.apply(runtime, GameCommand::MoveRight),
            KeyCode::Up if playing => _ = self.apply(runtime, GameCommand::Rotate),
            KeyCode::Down if playing => {
                self.apply(runtime, GameCommand::Tick);
                runtime.restart_tick();
            }
            KeyCode::Char(' ') | KeyCode::Enter if playing => {
                if self.apply(runtime, GameCommand::HardDrop).is_locked() {
                    runtime.restart_tick();
                }
            }
            KeyCode::Char('s' | 'S') if !playing => _ = self.apply(runtime, GameCommand::Start),
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => self.is_exiting = true,
            _ => {}
        }
    }

    pub(crate) fn update(&mut self, runtime: &mut Runtime) {
        if self.state.is_playing() {
            self.apply(runtime, GameCommand::Tick);
        }
    }

    fn apply(&mut self, runtime: &mut Runtime, command: GameCommand) -> CommandOutcome {
        let outcome = self.board.apply(command);
        self.refresh_grid();

        let state = match outcome {
            CommandOutcome::GameOver => PlayState::GameOver,
            CommandOutcome::Continue | CommandOutcome::Locked if self.board.is_active() => {
                PlayState::Playing
            }
            CommandOutcome::Continue | CommandOutcome::Locked => self.state,
        };
        if state != self.state {
            tracing::debug!(from = ?self.state, to = ?state, "play state changed");
            self.state = state;
        }

        let interval = self.state.is_playing().then_some(self.tick_interval);
        if runtime.tick_interval() != interval {
            runtime.set_tick_interval(interval);
        }
        outcome
    }

    /// Copies the locked cells out of the board, but only when they changed.
    fn refresh_grid(&mut self) {
        if self.board.consume_dirty_flag() {
            for (cached, row) in self.grid.iter_mut().zip(self.board.rows()) {
                *cached = *row;
            }
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        let mut board = BoardDisplay::new(&self.grid)
            .falling_piece(*self.board.falling_piece())
            .block(BlockWidget::bordered().title(" blockfall "));
        if self.show_ghost && self.state.is_playing() {
            board = board.ghost(*self.board.predicted_piece());
        }

        let (status, keys) = match self.state {
            PlayState::Ready => ("Press S to start", READY_KEYS),
            PlayState::Playing => ("", PLAYING_KEYS),
            PlayState::GameOver => ("Game over", GAME_OVER_KEYS),
        };
        let status = Text::from(status)
            .style(Style::default().fg(Color::Yellow))
            .centered();

        let [board_area, status_area, help_area] = Layout::vertical([
            Constraint::Length(board.height()),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(frame.area());
        let [board_area] = Layout::horizontal([Constraint::Length(board.width())])
            .flex(Flex::Center)
            .areas(board_area);

        frame.render_widget(board, board_area);
        frame.render_widget(status, status_area);
        frame.render_widget(KeyBindingDisplay::new(keys), help_area);
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{PiecePosition, ScriptedShapes, ShapeKind};
    use crossterm::event::{KeyEvent, KeyModifiers};

    use super::*;

    const TICK: Duration = Duration::from_millis(500);

    fn screen() -> (PlayScreen, Runtime) {
        let board = Board::with_source(ScriptedShapes::new([ShapeKind::O]));
        (PlayScreen::new(board, TICK, true), Runtime::new())
    }

    fn press(screen: &mut PlayScreen, runtime: &mut Runtime, code: KeyCode) {
        let event = Event::Key(KeyEvent::new(code, KeyModifiers::NONE));
        screen.handle_event(runtime, &event);
    }

    #[test]
    fn test_start_activates_gravity() {
        let (mut screen, mut runtime) = screen();
        assert!(screen.state.is_ready());
        assert_eq!(runtime.tick_interval(), None);

        // moves are ignored before the game starts
        press(&mut screen, &mut runtime, KeyCode::Left);
        assert_eq!(screen.board.falling_piece().column(), 4);

        press(&mut screen, &mut runtime, KeyCode::Char('s'));
        assert!(screen.state.is_playing());
        assert_eq!(runtime.tick_interval(), Some(TICK));
    }

    #[test]
    fn test_keys_drive_the_piece() {
        let (mut screen, mut runtime) = screen();
        press(&mut screen, &mut runtime, KeyCode::Char('s'));

        press(&mut screen, &mut runtime, KeyCode::Left);
        assert_eq!(screen.board.falling_piece().column(), 3);
        press(&mut screen, &mut runtime, KeyCode::Right);
        press(&mut screen, &mut runtime, KeyCode::Right);
        assert_eq!(screen.board.falling_piece().column(), 5);

        press(&mut screen, &mut runtime, KeyCode::Down);
        assert_eq!(screen.board.falling_piece().row(), 1);

        press(&mut screen, &mut runtime, KeyCode::Char(' '));
        assert_eq!(screen.grid[15][5], ShapeKind::O.color_id());
        assert_eq!(
            screen.board.falling_piece().position(),
            PiecePosition::new(0, 4)
        );
    }

    #[test]
    fn test_release_events_are_ignored() {
        let (mut screen, mut runtime) = screen();
        let mut event = KeyEvent::new(KeyCode::Char('s'), KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        screen.handle_event(&mut runtime, &Event::Key(event));
        assert!(screen.state.is_ready());
    }

    #[test]
    fn test_ticks_until_game_over() {
        let (mut screen, mut runtime) = screen();
        screen.update(&mut runtime);
        assert_eq!(screen.board.falling_piece().row(), 0);

        press(&mut screen, &mut runtime, KeyCode::Char('s'));
        for _ in 0..200 {
            screen.update(&mut runtime);
            if screen.state.is_game_over() {
                break;
            }
        }
        assert!(screen.state.is_game_over());
        assert_eq!(runtime.tick_interval(), None);

        // a new game starts from an empty grid
        press(&mut screen, &mut runtime, KeyCode::Char('s'));
        assert!(screen.state.is_playing());
        assert!(screen.grid.iter().flatten().all(|&cell| cell == 0));
    }

    #[test]
    fn test_quit() {
        let (mut screen, mut runtime) = screen();
        assert!(!screen.should_exit());
        press(&mut screen, &mut runtime, KeyCode::Esc);
        assert!(screen.should_exit());
    }
}
