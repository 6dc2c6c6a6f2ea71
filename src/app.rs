//! Application state and key handling

use crate::effects::EffectRunner;
use crate::platform::{is_quit_shortcut, is_submit_shortcut};
use crate::services::Services;
use crate::state::{Effect, FieldKind, Outcome, Wizard, WizardError};
use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc::UnboundedReceiver;

/// Main application struct
pub struct App {
    /// The registration session being edited
    pub wizard: Wizard,
    /// Collaborators, kept to rebuild the runner on start over
    services: Services,
    /// Spawns effects for the current session
    runner: EffectRunner,
    /// Outcomes of effects started by `runner`
    outcomes: UnboundedReceiver<Outcome>,
    /// Whether the app should quit
    quit: bool,
    /// Transient status bar message
    pub status_message: Option<String>,
    /// Frame counter driving the busy spinner
    pub tick: usize,
}

impl App {
    /// Create a new App with a fresh session
    pub fn new(services: Services) -> Self {
        let (runner, outcomes) = EffectRunner::new(services.clone());
        Self {
            wizard: Wizard::new(),
            services,
            runner,
            outcomes,
            quit: false,
            status_message: None,
            tick: 0,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Apply every outcome that has arrived since the last frame
    pub fn drain_outcomes(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(outcome) = self.outcomes.try_recv() {
            self.wizard.apply(outcome);
            applied += 1;
        }
        applied
    }

    /// Discard the session and begin a new one. Dropping the old runner
    /// aborts its lookup and orphans anything still in flight.
    pub fn start_over(&mut self) {
        let (runner, outcomes) = EffectRunner::new(self.services.clone());
        self.runner = runner;
        self.outcomes = outcomes;
        self.wizard = Wizard::new();
        self.status_message = None;
        tracing::info!("started a new registration");
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if is_quit_shortcut(&key) {
            self.quit = true;
            return;
        }

        // Handle error dialog dismissal first (modal)
        if self.wizard.failure().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.wizard.dismiss_failure();
            }
            return;
        }

        // Clear any status messages on key press
        self.status_message = None;
        self.wizard.dismiss_notice();

        if self.wizard.step().is_terminal() {
            self.handle_submitted_key(key);
        } else if self.wizard.is_otp_open() {
            self.handle_otp_key(key);
        } else {
            self.handle_form_key(key);
        }
    }

    fn handle_submitted_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('r') | KeyCode::Char('R') => self.start_over(),
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            _ => {}
        }
    }

    fn handle_otp_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => self.wizard.otp_input(c),
            KeyCode::Backspace => self.wizard.otp_backspace(),
            KeyCode::Enter => {
                let result = self.wizard.confirm_otp();
                self.run(result);
            }
            KeyCode::Esc => {
                if let Err(e) = self.wizard.cancel_otp() {
                    self.report(e);
                }
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        if is_submit_shortcut(&key) {
            let result = self.wizard.advance();
            self.run(result);
            return;
        }

        let on_button = self.wizard.is_button_focused();
        let focused_kind = self
            .wizard
            .definition()
            .and_then(|d| self.wizard.focus.active_field(d))
            .map(|spec| spec.kind);

        match key.code {
            KeyCode::Tab => self.wizard.focus_next(),
            KeyCode::BackTab => self.wizard.focus_prev(),
            KeyCode::Enter | KeyCode::Char(' ') if on_button => {
                let result = self.wizard.advance();
                self.run(result);
            }
            // Enter in a field moves on to the next one
            KeyCode::Enter => self.wizard.focus_next(),
            KeyCode::Char(' ') if matches!(focused_kind, Some(FieldKind::Checkbox)) => {
                let result = self.wizard.toggle_focused();
                self.run_optional(result);
            }
            KeyCode::Left | KeyCode::Up | KeyCode::Right | KeyCode::Down
                if matches!(focused_kind, Some(FieldKind::Radio { .. })) =>
            {
                let forward = matches!(key.code, KeyCode::Right | KeyCode::Down);
                if let Err(e) = self.wizard.cycle_focused(forward) {
                    self.report(e);
                }
            }
            KeyCode::Char(c) => {
                let result = self.wizard.input_char(c);
                self.run_optional(result);
            }
            KeyCode::Backspace => {
                let result = self.wizard.backspace();
                self.run_optional(result);
            }
            _ => {}
        }
    }

    fn run(&mut self, result: Result<Effect, WizardError>) {
        match result {
            Ok(effect) => self.runner.dispatch(effect),
            Err(e) => self.report(e),
        }
    }

    fn run_optional(&mut self, result: Result<Option<Effect>, WizardError>) {
        match result {
            Ok(Some(effect)) => self.runner.dispatch(effect),
            Ok(None) => {}
            Err(e) => self.report(e),
        }
    }

    fn report(&mut self, error: WizardError) {
        tracing::debug!(%error, "operation refused");
        // The OTP dialog shows its own message
        if !matches!(error, WizardError::InvalidOtp) {
            self.status_message = Some(error.to_string());
        }
    }

    /// Wait for the next outcome and apply it
    #[cfg(test)]
    async fn settle(&mut self) {
        if let Some(outcome) = self.outcomes.recv().await {
            self.wizard.apply(outcome);
        }
    }
}
