use crossterm::event::{self, Event};
use platen::{InputEvent, SessionError, TextSource, TypingSession};
use ratatui::DefaultTerminal;
use web_time::{Duration, Instant};

use crate::config::Config;
use crate::keys::{self, Action};
use crate::ui;

/// How long to wait for input while no tick is scheduled
const IDLE_POLL: Duration = Duration::from_millis(250);

/// The app itself
pub struct App {
    session: TypingSession,
    config: Config,
    should_quit: bool,
}

impl App {
    /// Creates a new `App` with a session over the first configured paragraph
    pub fn new(mut config: Config) -> Result<Self, SessionError> {
        let text = config
            .paragraphs
            .next_text()
            .ok_or(SessionError::EmptyText)?;
        let session = TypingSession::with_configuration(&text, config.session())?;

        Ok(Self {
            session,
            config,
            should_quit: false,
        })
    }

    /// Runs the app
    pub fn run(&mut self) -> std::io::Result<()> {
        let mut terminal = ratatui::init();

        let result = self.event_loop(&mut terminal);

        ratatui::restore();
        result
    }

    fn event_loop(&mut self, terminal: &mut DefaultTerminal) -> std::io::Result<()> {
        while !self.should_quit() {
            self.session.poll_ticks(Instant::now());

            terminal.draw(|frame| ui::draw(frame, self.session(), &self.config.settings))?;

            let timeout = self
                .session
                .next_tick_in(Instant::now())
                .unwrap_or(IDLE_POLL);

            if event::poll(timeout)?
                && let Event::Key(key) = event::read()?
                && let Some(action) = keys::action_for(&key, self.presets().len())
            {
                self.apply(action);
            }
        }

        Ok(())
    }

    /// Apply a user action to the session
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Type(char) => {
                let mut value = self.session.input().to_string();
                value.push(char);
                self.session.on_input(InputEvent::typed(value));
            }
            Action::Backspace => {
                let mut value = self.session.input().to_string();
                if value.pop().is_some() {
                    self.session.on_input(InputEvent::typed(value));
                }
            }
            Action::Extend(index) => {
                if let Some(&delta) = self.presets().get(index)
                    && !self.session.extend(delta)
                {
                    tracing::info!(delta, "cannot extend a finished session");
                }
            }
            Action::Restart => self.restart(),
            Action::Quit => self.should_quit = true,
        }
    }

    fn restart(&mut self) {
        let Some(text) = self.config.paragraphs.next_text() else {
            return;
        };

        if let Err(error) = self
            .session
            .reset(&text, self.config.settings.duration_secs)
        {
            tracing::warn!(%error, "failed to restart session");
        }
    }

    /// Extend presets of the running session
    fn presets(&self) -> &[u32] {
        &self.session.config().extend_presets
    }

    pub const fn session(&self) -> &TypingSession {
        &self.session
    }

    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }
}
