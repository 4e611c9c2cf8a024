//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::Stretch925Error;

/// How long to wait for input before checking the timer again.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// User intent decoded from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Show the key help.
    Help,
    /// Start a work interval.
    Start,
    /// End the work interval early.
    Stop,
    /// Skip whatever countdown is running.
    Skip,
    /// Begin the stretch flow.
    Stretch,
    /// Ready to stretch in front of the camera.
    Ready,
    /// Set the number of work intervals.
    SetSessions(u8),
}

/// Map a key press to an action.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Handle Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char('?') => Some(Action::Help),
        KeyCode::Char('s') => Some(Action::Start),
        KeyCode::Char('e') => Some(Action::Stop),
        KeyCode::Char('n') => Some(Action::Skip),
        KeyCode::Char('b') => Some(Action::Stretch),
        KeyCode::Enter | KeyCode::Char('r') => Some(Action::Ready),
        KeyCode::Char(c @ '1'..='5') => c
            .to_digit(10)
            .and_then(|d| u8::try_from(d).ok())
            .map(Action::SetSessions),
        _ => None,
    }
}

/// Wait briefly for terminal input.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn next_action() -> Result<Option<Action>, Stretch925Error> {
    if event::poll(POLL_INTERVAL)
        .map_err(|e| Stretch925Error::Terminal(format!("Event poll failed: {e}")))?
    {
        if let Event::Key(key) = event::read()
            .map_err(|e| Stretch925Error::Terminal(format!("Event read failed: {e}")))?
        {
            return Ok(map_key(key));
        }
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_map_keys() {
        assert_eq!(map_key(press(KeyCode::Char('s'))), Some(Action::Start));
        assert_eq!(map_key(press(KeyCode::Char('e'))), Some(Action::Stop));
        assert_eq!(map_key(press(KeyCode::Char('n'))), Some(Action::Skip));
        assert_eq!(map_key(press(KeyCode::Char('b'))), Some(Action::Stretch));
        assert_eq!(map_key(press(KeyCode::Enter)), Some(Action::Ready));
        assert_eq!(map_key(press(KeyCode::Esc)), Some(Action::Quit));
        assert_eq!(map_key(press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_map_session_digits() {
        assert_eq!(
            map_key(press(KeyCode::Char('3'))),
            Some(Action::SetSessions(3))
        );
        assert_eq!(map_key(press(KeyCode::Char('6'))), None);
        assert_eq!(map_key(press(KeyCode::Char('0'))), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(key), Some(Action::Quit));
    }

    #[test]
    fn test_key_release_ignored() {
        let mut key = press(KeyCode::Char('s'));
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key), None);
    }
}
