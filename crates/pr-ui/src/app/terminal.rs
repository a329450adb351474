//! Terminal front-end

use super::render::render;
use super::state::Reviewer;
use crate::highlight::Highlighter;
use crate::theme::Theme;
use anyhow::Result;
use crossterm::{
    event::{self, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io::{self, Stdout};
use std::time::Duration;

/// Main application
pub struct App {
    /// Review logic and state
    reviewer: Reviewer,
    /// Terminal
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Syntax highlighter for the raw record view
    highlighter: Highlighter,
    /// Colors
    theme: Theme,
}

impl App {
    /// Create a new app around a reviewer
    pub fn new(reviewer: Reviewer, highlighter: Highlighter) -> Result<Self> {
        // Install panic hook to restore terminal on panic
        let original_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |panic_info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            original_hook(panic_info);
        }));

        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            reviewer,
            terminal,
            highlighter,
            theme: Theme::default(),
        })
    }

    /// Run the main application loop
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.draw()?;

            if event::poll(Duration::from_millis(100))? {
                if let event::Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.reviewer.handle_key(key);
                    }
                }
            }

            if self.reviewer.state.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&mut self) -> Result<()> {
        let reviewer = &self.reviewer;
        let highlighter = &self.highlighter;
        let theme = &self.theme;

        self.terminal
            .draw(|frame| render(frame, reviewer, highlighter, theme))?;
        Ok(())
    }

    /// Review state, for reporting after the UI exits
    pub fn reviewer(&self) -> &Reviewer {
        &self.reviewer
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}
