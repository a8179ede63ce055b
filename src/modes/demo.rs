//! Demo mode: watch a scripted probe policy play
//!
//! Drives the environment at the configured advisory pace inside a terminal
//! event loop. The policy is deliberately simple: keep heading straight
//! unless the next cell would kill, otherwise take the first safe turn.
//! Finished episodes are recorded into the score history before the board
//! resets, so the overlay fills up as the session runs.
//!
//! # Controls
//!
//! - Space: Pause/unpause
//! - F1/H: Toggle the score-history overlay
//! - F2/T: Toggle the stats line
//! - R: Restart the episode
//! - Q/Esc: Quit

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::env::SnakeEnv;
use crate::game::{GameConfig, Turn};
use crate::input::{InputHandler, KeyAction};
use crate::render::Renderer;

pub struct DemoMode {
    env: SnakeEnv,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl DemoMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        Ok(Self {
            env: SnakeEnv::new(config)?,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Advisory pace only; the simulation is equally correct at any rate
        let tick_ms = (1_000 / u64::from(self.env.config().speed.max(1))).max(1);
        let mut tick_timer = interval(Duration::from_millis(tick_ms));

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                _ = tick_timer.tick() => {
                    self.advance();
                }

                _ = render_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.env.snapshot());
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return;
            }
            match self.input_handler.handle_key_event(key) {
                KeyAction::TogglePause => self.env.toggle_pause(),
                KeyAction::ToggleHistory => self.env.toggle_history(),
                KeyAction::ToggleStats => self.env.toggle_stats(),
                KeyAction::Restart => self.env.reset(),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    /// One simulation tick, unless paused. A finished episode is recorded
    /// into the history and the board resets for the next one.
    fn advance(&mut self) {
        if self.env.state().paused {
            return;
        }

        let turn = self.choose_turn();
        let (_reward, terminated, score) = self.env.step(turn.one_hot());

        if terminated {
            self.env.record_episode(score);
            self.env.reset();
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }

    /// Straight unless the next cell kills; otherwise the first safe turn
    fn choose_turn(&self) -> Turn {
        let state = self.env.state();
        for turn in [Turn::Straight, Turn::Right, Turn::Left] {
            let heading = state.snake.direction.turn(turn);
            let candidate = state.snake.head().moved_in(heading, state.cell_size);
            if !self.env.is_collision(Some(candidate)) {
                return turn;
            }
        }
        // Boxed in on all three sides; any move terminates
        Turn::Straight
    }
}
