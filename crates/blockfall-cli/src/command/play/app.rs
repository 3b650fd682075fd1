use std::time::Duration;

use blockfall_engine::Board;
use crossterm::event::Event;
use ratatui::Frame;

use crate::tui::{App, Runtime};

use super::screen::PlayScreen;

#[derive(Debug)]
pub(crate) struct PlayApp {
    screen: PlayScreen,
}

impl PlayApp {
    pub(crate) fn new(board: Board, tick_interval: Duration, show_ghost: bool) -> Self {
        Self {
            screen: PlayScreen::new(board, tick_interval, show_ghost),
        }
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        // gravity starts with the first game
        runtime.set_tick_interval(None);
    }

    fn should_exit(&self) -> bool {
        self.screen.should_exit()
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event) {
        self.screen.handle_event(runtime, &event);
    }

    fn draw(&self, frame: &mut Frame) {
        self.screen.draw(frame);
    }

    fn update(&mut self, runtime: &mut Runtime) {
        self.screen.update(runtime);
    }
}
