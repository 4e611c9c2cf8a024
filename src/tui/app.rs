//! Application state for the TUI.

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use tracing::warn;

use crate::config::Config;
use crate::error::Stretch925Error;
use crate::features::session::{
    ActionOutcome, Clock, Phase, SessionController, SessionEvent, SessionObserver,
    SessionSnapshot, SystemClock,
};
use crate::features::stretch::{Exercise, ScoreTally};
use crate::tui::event::Action;

/// Help line shown for `?`.
pub const HELP: &str =
    "s:start | e:end | n:skip | b:stretch | Enter:ready | 1-5:sessions | q:quit";

/// Marks the screen stale whenever the session changes.
struct RedrawFlag(Rc<Cell<bool>>);

impl SessionObserver for RedrawFlag {
    fn on_change(&mut self, _event: &SessionEvent) {
        self.0.set(true);
    }
}

/// Application state.
pub struct App<C: Clock = SystemClock> {
    /// The session being displayed.
    pub controller: SessionController<C>,
    /// Stretch highlighted on the camera screen.
    pub exercise: Exercise,
    /// Score log written by the pose tracker.
    score_log: Option<PathBuf>,
    /// Tally loaded when the last stretch finished.
    pub score: Option<ScoreTally>,
    /// Status message to display.
    pub status: Option<String>,
    /// Whether the screen needs drawing.
    dirty: Rc<Cell<bool>>,
}

impl App<SystemClock> {
    /// Create a new app running on real time.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured timer settings are invalid.
    pub fn new(config: &Config) -> Result<Self, Stretch925Error> {
        Self::with_clock(config, SystemClock::new())
    }
}

impl<C: Clock> App<C> {
    /// Create a new app on the given clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured timer settings are invalid.
    pub fn with_clock(config: &Config, clock: C) -> Result<Self, Stretch925Error> {
        let mut controller = SessionController::with_clock(config.session_settings()?, clock)?;
        let dirty = Rc::new(Cell::new(true));
        controller.set_observer(Box::new(RedrawFlag(Rc::clone(&dirty))));

        Ok(Self {
            controller,
            exercise: config.stretch.exercise,
            score_log: config.stretch.score_log.clone(),
            score: None,
            status: Some("Press ? for help".to_string()),
            dirty,
        })
    }

    /// Current session state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.controller.snapshot()
    }

    /// Take the redraw flag, clearing it.
    pub fn take_dirty(&self) -> bool {
        self.dirty.replace(false)
    }

    /// Fire due timer ticks.
    pub fn on_tick(&mut self) {
        if let Some(transition) = self.controller.poll() {
            self.after_transition(transition.to);
        }
    }

    /// Apply a user action.
    ///
    /// Returns true if the app should quit.
    pub fn handle(&mut self, action: Action) -> bool {
        let before = self.controller.phase();
        let outcome = match action {
            Action::Quit => return true,
            Action::Help => {
                self.set_status(HELP);
                return false;
            }
            Action::Start => self.controller.start_work(),
            Action::Stop => self.controller.stop_work(),
            Action::Skip => match before.live_interval() {
                Some(interval) => self.controller.skip(interval),
                None => {
                    self.set_status("Nothing to skip");
                    return false;
                }
            },
            Action::Stretch => self.controller.enter_stretch_flow(),
            Action::Ready => self.controller.advance_to_stretch_camera(),
            Action::SetSessions(count) => self.controller.set_session_count(count),
        };

        match outcome {
            ActionOutcome::Applied => {
                self.status = None;
                let after = self.controller.phase();
                if after != before {
                    self.after_transition(after);
                }
            }
            ActionOutcome::Rejected(reason) => self.set_status(reason.to_string()),
        }
        false
    }

    /// Tear down the session so no timer outlives the screen.
    pub fn shutdown(&mut self) {
        self.controller.dispose();
    }

    fn after_transition(&mut self, to: Phase) {
        match to {
            Phase::StretchDone => self.load_score(),
            Phase::StretchIntro => self.score = None,
            _ => {}
        }
    }

    fn load_score(&mut self) {
        let Some(path) = &self.score_log else {
            return;
        };
        match ScoreTally::take(path) {
            Ok(tally) => self.score = Some(tally),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read score log");
                self.score = None;
                self.set_status(format!("Score unavailable: {e}"));
            }
        }
        self.dirty.set(true);
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
        self.dirty.set(true);
    }
}
