//! The session controller.
//!
//! Owns the phase, the session count, the three countdowns and the one live
//! timer handle. Every phase change goes through [`SessionController::enter`],
//! which releases the current handle before acquiring the next, so two
//! countdowns can never run at once.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::clock::{Clock, SystemClock};
use super::countdown::{Countdown, TimerHandle};
use super::phase::{Cause, Interval, Phase, Transition};
use crate::error::Stretch925Error;

/// Smallest number of work intervals in a cycle.
pub const MIN_SESSION_COUNT: u8 = 1;
/// Largest number of work intervals in a cycle.
pub const MAX_SESSION_COUNT: u8 = 5;

/// What happens when a break ends and no sessions are left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExhaustedBreakPolicy {
    /// Go back to Idle with a fresh cycle
    #[default]
    ReturnToIdle,
    /// Start one more work interval; its completion resets the cycle
    RestartWork,
}

/// Durations and counts a controller is created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Work interval length in seconds
    pub work_seconds: u32,
    /// Break interval length in seconds
    pub break_seconds: u32,
    /// Stretch length in seconds
    pub stretch_seconds: u32,
    /// Work intervals per cycle
    pub session_count: u8,
    /// Behavior when the last break of a cycle ends
    pub exhausted_break: ExhaustedBreakPolicy,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            work_seconds: 1500,
            break_seconds: 300,
            stretch_seconds: 60,
            session_count: 4,
            exhausted_break: ExhaustedBreakPolicy::default(),
        }
    }
}

impl SessionSettings {
    /// Check durations are non-zero and the session count is in range.
    ///
    /// # Errors
    ///
    /// Returns `Stretch925Error::Config` describing the first bad value.
    pub fn validate(&self) -> Result<(), Stretch925Error> {
        if !(MIN_SESSION_COUNT..=MAX_SESSION_COUNT).contains(&self.session_count) {
            return Err(Stretch925Error::Config(format!(
                "Session count must be between {MIN_SESSION_COUNT} and {MAX_SESSION_COUNT}, got {}",
                self.session_count
            )));
        }
        for (name, secs) in [
            ("work", self.work_seconds),
            ("break", self.break_seconds),
            ("stretch", self.stretch_seconds),
        ] {
            if secs == 0 {
                return Err(Stretch925Error::Config(format!(
                    "The {name} duration must be at least one second"
                )));
            }
        }
        Ok(())
    }
}

/// A user intent the controller can accept or reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// Start a work interval
    StartWork,
    /// Abort the work interval
    StopWork,
    /// Skip the rest of a countdown
    Skip(Interval),
    /// Change the number of work intervals per cycle
    SetSessionCount,
    /// Opt into the stretch flow
    EnterStretchFlow,
    /// Move from the intro to the camera
    AdvanceToStretchCamera,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StartWork => f.write_str("start"),
            Self::StopWork => f.write_str("stop"),
            Self::Skip(interval) => write!(f, "skip {interval}"),
            Self::SetSessionCount => f.write_str("set session count"),
            Self::EnterStretchFlow => f.write_str("enter stretch"),
            Self::AdvanceToStretchCamera => f.write_str("start stretching"),
        }
    }
}

/// Why an action was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum Rejection {
    /// The action is not valid in the current phase
    InvalidTransition {
        /// What was asked for
        action: Action,
        /// Phase at the time
        phase: Phase,
    },
    /// A session count outside 1..=5
    OutOfRangeConfig {
        /// The rejected value
        value: u8,
    },
    /// The controller has been torn down
    Disposed,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTransition { action, phase } => {
                write!(f, "Cannot {action} during {phase}")
            }
            Self::OutOfRangeConfig { value } => write!(
                f,
                "Session count {value} is out of range ({MIN_SESSION_COUNT}-{MAX_SESSION_COUNT})"
            ),
            Self::Disposed => f.write_str("Session has ended"),
        }
    }
}

/// Result of a user action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// State changed
    Applied,
    /// Nothing changed
    Rejected(Rejection),
}

impl ActionOutcome {
    /// Whether the action changed state.
    #[must_use]
    pub const fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }

    /// The rejection reason, if any.
    #[must_use]
    pub const fn rejection(&self) -> Option<Rejection> {
        match self {
            Self::Applied => None,
            Self::Rejected(reason) => Some(*reason),
        }
    }
}

/// Read-only view of a session handed to renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// Current phase
    pub phase: Phase,
    /// Work intervals left in the cycle
    pub sessions_remaining: u8,
    /// Seconds left in the work countdown
    pub work_seconds_remaining: u32,
    /// Seconds left in the break countdown
    pub break_seconds_remaining: u32,
    /// Seconds left in the stretch countdown
    pub stretch_seconds_remaining: u32,
    /// Work intervals per cycle
    pub configured_session_count: u8,
}

/// A state change delivered to a [`SessionObserver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionEvent {
    /// State after the change
    pub snapshot: SessionSnapshot,
    /// The phase change, when there was one
    pub transition: Option<Transition>,
}

/// Receives every state change, for re-rendering.
#[cfg_attr(test, mockall::automock)]
pub trait SessionObserver {
    /// Called after each accepted action and each tick.
    fn on_change(&mut self, event: &SessionEvent);
}

/// The timer handle together with the countdown it drives.
#[derive(Debug)]
struct LiveTimer {
    interval: Interval,
    handle: TimerHandle,
}

/// Sequences work, break and stretch intervals.
pub struct SessionController<C: Clock = SystemClock> {
    settings: SessionSettings,
    phase: Phase,
    sessions_remaining: u8,
    configured_session_count: u8,
    work: Countdown,
    rest: Countdown,
    stretch: Countdown,
    timer: Option<LiveTimer>,
    clock: C,
    observer: Option<Box<dyn SessionObserver>>,
    disposed: bool,
}

impl SessionController<SystemClock> {
    /// Create a controller running on real time.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid.
    pub fn new(settings: SessionSettings) -> Result<Self, Stretch925Error> {
        Self::with_clock(settings, SystemClock::new())
    }
}

impl<C: Clock> SessionController<C> {
    /// Create a controller on the given clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid.
    pub fn with_clock(settings: SessionSettings, clock: C) -> Result<Self, Stretch925Error> {
        settings.validate()?;

        Ok(Self {
            settings,
            phase: Phase::Idle,
            sessions_remaining: settings.session_count,
            configured_session_count: settings.session_count,
            work: Countdown::new(settings.work_seconds),
            rest: Countdown::new(settings.break_seconds),
            stretch: Countdown::new(settings.stretch_seconds),
            timer: None,
            clock,
            observer: None,
            disposed: false,
        })
    }

    /// Register the observer notified on every change, replacing any other.
    pub fn set_observer(&mut self, observer: Box<dyn SessionObserver>) {
        self.observer = Some(observer);
    }

    /// Current state.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            phase: self.phase,
            sessions_remaining: self.sessions_remaining,
            work_seconds_remaining: self.work.remaining_seconds(),
            break_seconds_remaining: self.rest.remaining_seconds(),
            stretch_seconds_remaining: self.stretch.remaining_seconds(),
            configured_session_count: self.configured_session_count,
        }
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Settings this controller was built with.
    #[must_use]
    pub const fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// The countdown for an interval.
    #[must_use]
    pub const fn countdown(&self, interval: Interval) -> &Countdown {
        match interval {
            Interval::Work => &self.work,
            Interval::Break => &self.rest,
            Interval::Stretch => &self.stretch,
        }
    }

    /// The countdown whose timer is actually running, if any.
    #[must_use]
    pub fn live_interval(&self) -> Option<Interval> {
        self.timer
            .as_ref()
            .filter(|live| live.handle.is_live())
            .map(|live| live.interval)
    }

    /// Whether [`dispose`](Self::dispose) has been called.
    #[must_use]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Start a work interval. Only valid while Idle.
    pub fn start_work(&mut self) -> ActionOutcome {
        if let Err(reason) = self.require(Action::StartWork, Phase::Idle) {
            return ActionOutcome::Rejected(reason);
        }
        let transition = self.enter(Phase::Working, Cause::Start);
        self.notify(Some(transition));
        ActionOutcome::Applied
    }

    /// Abort the work interval and reset the cycle. Only valid while Working.
    pub fn stop_work(&mut self) -> ActionOutcome {
        if let Err(reason) = self.require(Action::StopWork, Phase::Working) {
            return ActionOutcome::Rejected(reason);
        }
        self.reset_cycle();
        let transition = self.enter(Phase::Idle, Cause::Stop);
        self.notify(Some(transition));
        ActionOutcome::Applied
    }

    /// Skip the rest of a countdown, applying the same transition as if it
    /// had run out. Only valid when `target` is the live countdown.
    pub fn skip(&mut self, target: Interval) -> ActionOutcome {
        if self.disposed {
            return self.reject(Rejection::Disposed);
        }
        if self.phase.live_interval() != Some(target) {
            return self.reject(Rejection::InvalidTransition {
                action: Action::Skip(target),
                phase: self.phase,
            });
        }

        self.countdown_mut(target).force_zero();
        let transition = self.complete(target, Cause::Skipped);
        self.notify(Some(transition));
        ActionOutcome::Applied
    }

    /// Change the number of work intervals per cycle. Only valid while Idle,
    /// and only for values in 1..=5.
    pub fn set_session_count(&mut self, count: u8) -> ActionOutcome {
        if let Err(reason) = self.require(Action::SetSessionCount, Phase::Idle) {
            return ActionOutcome::Rejected(reason);
        }
        if !(MIN_SESSION_COUNT..=MAX_SESSION_COUNT).contains(&count) {
            return self.reject(Rejection::OutOfRangeConfig { value: count });
        }

        self.configured_session_count = count;
        self.sessions_remaining = count;
        info!(count, "session count changed");
        self.notify(None);
        ActionOutcome::Applied
    }

    /// Opt into the stretch flow. Only valid while OnBreak.
    pub fn enter_stretch_flow(&mut self) -> ActionOutcome {
        if let Err(reason) = self.require(Action::EnterStretchFlow, Phase::OnBreak) {
            return ActionOutcome::Rejected(reason);
        }
        let transition = self.enter(Phase::StretchIntro, Cause::EnterStretch);
        self.notify(Some(transition));
        ActionOutcome::Applied
    }

    /// Start the camera-tracked stretch. Only valid during the intro.
    pub fn advance_to_stretch_camera(&mut self) -> ActionOutcome {
        if let Err(reason) = self.require(Action::AdvanceToStretchCamera, Phase::StretchIntro) {
            return ActionOutcome::Rejected(reason);
        }
        let transition = self.enter(Phase::StretchActive, Cause::Ready);
        self.notify(Some(transition));
        ActionOutcome::Applied
    }

    /// Finish the stretch early and return to the break.
    pub fn skip_to_break_from_stretch(&mut self) -> ActionOutcome {
        self.skip(Interval::Stretch)
    }

    /// Fire one tick of the live countdown without waiting for the clock.
    ///
    /// The tick is taken out of the live timer, so a later [`poll`] does not
    /// fire it a second time. Returns the phase change if the countdown ran
    /// out.
    ///
    /// [`poll`]: Self::poll
    pub fn tick(&mut self) -> Option<Transition> {
        if let Some(live) = self.timer.as_mut() {
            live.handle.consume_period();
        }
        self.fire()
    }

    /// Fire every tick the clock says is due.
    ///
    /// Ticks still owed to a timer that a transition released are dropped;
    /// the next countdown starts fresh from the moment it was acquired.
    pub fn poll(&mut self) -> Option<Transition> {
        let now = self.clock.now();
        let due = self
            .timer
            .as_mut()
            .map_or(0, |live| live.handle.due_ticks(now));

        for _ in 0..due {
            if let Some(transition) = self.fire() {
                return Some(transition);
            }
        }
        None
    }

    /// Tear down: cancel the live timer. Every later call is a no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.release_timer();
        self.disposed = true;
        self.observer = None;
        debug!("session disposed");
    }

    fn fire(&mut self) -> Option<Transition> {
        if self.disposed {
            return None;
        }
        let interval = self.live_interval()?;

        let expired = self.countdown_mut(interval).tick();
        trace!(
            %interval,
            remaining = self.countdown(interval).remaining_seconds(),
            "tick"
        );

        let transition = expired.then(|| self.complete(interval, Cause::Expired));
        self.notify(transition);
        transition
    }

    fn require(&self, action: Action, expected: Phase) -> Result<(), Rejection> {
        let reason = if self.disposed {
            Rejection::Disposed
        } else if self.phase == expected {
            return Ok(());
        } else {
            Rejection::InvalidTransition {
                action,
                phase: self.phase,
            }
        };
        debug!(%reason, "action rejected");
        Err(reason)
    }

    fn reject(&self, reason: Rejection) -> ActionOutcome {
        debug!(%reason, "action rejected");
        ActionOutcome::Rejected(reason)
    }

    fn countdown_mut(&mut self, interval: Interval) -> &mut Countdown {
        match interval {
            Interval::Work => &mut self.work,
            Interval::Break => &mut self.rest,
            Interval::Stretch => &mut self.stretch,
        }
    }

    /// Apply the completion row for a countdown that reached zero.
    fn complete(&mut self, interval: Interval, cause: Cause) -> Transition {
        match interval {
            Interval::Work => {
                self.work.reset();
                if self.sessions_remaining > 0 {
                    self.sessions_remaining -= 1;
                    self.enter(Phase::OnBreak, cause)
                } else {
                    self.reset_cycle();
                    self.enter(Phase::Idle, cause)
                }
            }
            Interval::Break => {
                self.rest.reset();
                if self.sessions_remaining > 0 {
                    return self.enter(Phase::Working, cause);
                }
                match self.settings.exhausted_break {
                    ExhaustedBreakPolicy::ReturnToIdle => {
                        self.reset_cycle();
                        self.enter(Phase::Idle, cause)
                    }
                    ExhaustedBreakPolicy::RestartWork => self.enter(Phase::Working, cause),
                }
            }
            Interval::Stretch => {
                self.stretch.reset();
                self.enter(Phase::StretchDone, cause)
            }
        }
    }

    /// Refill every countdown and the session count.
    fn reset_cycle(&mut self) {
        self.sessions_remaining = self.configured_session_count;
        self.work.reset();
        self.rest.reset();
        self.stretch.reset();
    }

    /// Switch phase, handing the timer over to the new phase's countdown.
    ///
    /// A phase that keeps the same countdown keeps the same handle, so the
    /// break does not lose its partial second when the stretch intro opens.
    fn enter(&mut self, to: Phase, cause: Cause) -> Transition {
        let from = self.phase;
        let next = to.live_interval();

        if self.live_interval() != next {
            self.release_timer();
            if let Some(interval) = next {
                self.timer = Some(LiveTimer {
                    interval,
                    handle: TimerHandle::start(self.clock.now()),
                });
            }
        }

        self.phase = to;
        let transition = Transition { from, to, cause };
        info!(
            %transition,
            sessions_remaining = self.sessions_remaining,
            "phase changed"
        );
        transition
    }

    fn release_timer(&mut self) {
        if let Some(mut live) = self.timer.take() {
            live.handle.cancel();
        }
    }

    fn notify(&mut self, transition: Option<Transition>) {
        let snapshot = self.snapshot();
        if let Some(observer) = self.observer.as_mut() {
            observer.on_change(&SessionEvent {
                snapshot,
                transition,
            });
        }
    }
}

impl<C: Clock> Drop for SessionController<C> {
    fn drop(&mut self) {
        self.release_timer();
    }
}

impl<C: Clock> fmt::Debug for SessionController<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionController")
            .field("snapshot", &self.snapshot())
            .field("live_interval", &self.live_interval())
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}
