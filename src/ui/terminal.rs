use std::io::{stdout, Stdout, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyEventKind},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};
use tracing::{debug, info};

use super::keys::{map_key, KeyAction};
use crate::game::{GameEvent, GameLoop, Position};

/// How long a frame waits for keyboard input
const FRAME: Duration = Duration::from_millis(16);

/// Plays a `GameLoop` in the terminal: samples keys every frame, feeds the
/// elapsed time to the core and draws the board after every move.
pub struct TerminalApp {
    game: GameLoop,
    quit: bool,
}

impl TerminalApp {
    pub fn new(game: GameLoop) -> Self {
        Self { game, quit: false }
    }

    pub fn game(&self) -> &GameLoop {
        &self.game
    }

    pub fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode().context("Failed to enable raw mode")?;
        execute!(stdout(), Hide, Clear(ClearType::All)).context("Failed to prepare terminal")?;

        let result = self.frame_loop();

        // Restore whatever we can; an error from the game itself wins
        let raw_mode = terminal::disable_raw_mode().context("Failed to disable raw mode");
        let cursor = execute!(stdout(), Show, MoveTo(0, self.footer_row() + 2))
            .context("Failed to restore cursor");

        keep_first_error(result, [raw_mode, cursor])
    }

    fn frame_loop(&mut self) -> Result<()> {
        let mut out = stdout();
        let mut last_frame = Instant::now();
        self.draw(&mut out)?;

        while !self.quit {
            let restarted = self.poll_keys(FRAME)?;

            let now = Instant::now();
            let elapsed = now - last_frame;
            last_frame = now;

            let ticks_before = self.game.ticks();
            let events = self.game.tick(elapsed)?;
            for event in &events {
                match event {
                    GameEvent::BerryEaten => debug!("crunch"),
                    GameEvent::ScoreChanged(score) => debug!(score, "score changed"),
                    GameEvent::Collision(kind) => debug!(?kind, "bonk"),
                    GameEvent::GameOver => info!(score = self.game.score(), "final score"),
                }
            }

            if restarted || !events.is_empty() || self.game.ticks() != ticks_before {
                self.draw(&mut out)?;
            }
        }

        Ok(())
    }

    /// Forward every key pressed during this frame. Returns true if the
    /// game was restarted.
    fn poll_keys(&mut self, timeout: Duration) -> Result<bool> {
        let mut restarted = false;
        let mut wait = timeout;

        while event::poll(wait).context("Failed to poll terminal events")? {
            wait = Duration::ZERO;
            let Event::Key(key) = event::read().context("Failed to read terminal event")? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match map_key(key) {
                KeyAction::Steer(axis, value) => self.game.set_input(axis, value),
                KeyAction::Restart if !self.game.is_running() => {
                    self.game.restart()?;
                    restarted = true;
                }
                KeyAction::Quit => self.quit = true,
                KeyAction::Restart | KeyAction::None => {}
            }
        }

        Ok(restarted)
    }

    fn draw(&self, out: &mut Stdout) -> Result<()> {
        let config = self.game.config();
        let width = config.grid_width as u16;
        let height = config.grid_height as u16;
        let segments = self.game.segments();
        let head = self.game.snake().head();
        let berry = self.game.berry();

        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;

        // Two columns per cell keeps the board roughly square
        let border = "#".repeat(width as usize * 2 + 2);
        queue!(out, MoveTo(0, 0), Print(&border))?;
        for row in 0..height {
            // Positive z points up the screen
            let z = (height - 1 - row) as i32;
            let mut line = String::with_capacity(width as usize * 2 + 2);
            line.push('#');
            for x in 0..width as i32 {
                let pos = Position::new(x, z);
                let cell = if pos == head {
                    "@@"
                } else if segments.contains(&pos) {
                    "[]"
                } else if pos == berry {
                    "()"
                } else {
                    "  "
                };
                line.push_str(cell);
            }
            line.push('#');
            queue!(out, MoveTo(0, row + 1), Print(line))?;
        }
        queue!(out, MoveTo(0, height + 1), Print(&border))?;

        let footer = self.footer_row();
        queue!(
            out,
            MoveTo(0, footer),
            Print(format!("Berries: {}", self.game.score()))
        )?;
        let hint = if self.game.is_running() {
            "Arrow keys or WASD to turn, 'q' to quit".to_string()
        } else {
            format!(
                "Game over! {} berries. Press 'r' to restart or 'q' to quit",
                self.game.score()
            )
        };
        queue!(out, MoveTo(0, footer + 1), Print(hint))?;

        out.flush().context("Failed to flush terminal")?;
        Ok(())
    }

    fn footer_row(&self) -> u16 {
        self.game.config().grid_height as u16 + 2
    }
}

/// Cleanup failures are only reported when the game itself finished cleanly
fn keep_first_error(result: Result<()>, cleanup: impl IntoIterator<Item = Result<()>>) -> Result<()> {
    cleanup.into_iter().fold(result, |acc, next| acc.and(next))
}
