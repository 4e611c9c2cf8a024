//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use crate::features::session::{format_duration_mmss, Clock, Interval, Phase, SessionSnapshot};
use crate::features::stretch::Exercise;
use crate::tui::app::{App, HELP};

/// Render the application UI.
pub fn render<C: Clock>(frame: &mut Frame<'_>, app: &App<C>) {
    // Create layout: header, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let snapshot = app.snapshot();

    render_header(frame, &snapshot, chunks[0]);
    match snapshot.phase {
        Phase::Idle | Phase::Working => render_work(frame, app, &snapshot, chunks[1]),
        Phase::OnBreak => render_break(frame, &snapshot, chunks[1]),
        Phase::StretchIntro => render_intro(frame, &snapshot, chunks[1]),
        Phase::StretchActive => render_active(frame, app, &snapshot, chunks[1]),
        Phase::StretchDone => render_done(frame, app, &snapshot, chunks[1]),
    }
    render_status_bar(frame, app, chunks[2]);
}

fn mmss(seconds: u32) -> String {
    format_duration_mmss(chrono::Duration::seconds(i64::from(seconds)))
}

/// Render the header.
fn render_header(frame: &mut Frame<'_>, snapshot: &SessionSnapshot, area: Rect) {
    let title = format!(
        " Stretch925 | {} | Number of sessions left: {} ",
        snapshot.phase, snapshot.sessions_remaining
    );

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

fn body_block(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

/// Split a body area into a text panel and a gauge row.
fn split_with_gauge(area: Rect) -> (Rect, Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);
    (rows[0], rows[1])
}

fn render_gauge<C: Clock>(frame: &mut Frame<'_>, app: &App<C>, interval: Interval, area: Rect) {
    let progress = app.controller.countdown(interval).progress().clamp(0.0, 1.0);
    let color = match interval {
        Interval::Work => Color::Red,
        Interval::Break => Color::Green,
        Interval::Stretch => Color::Yellow,
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(color))
        .ratio(progress);

    frame.render_widget(gauge, area);
}

/// Render the work screen, also shown while idle.
fn render_work<C: Clock>(
    frame: &mut Frame<'_>,
    app: &App<C>,
    snapshot: &SessionSnapshot,
    area: Rect,
) {
    let (text_area, gauge_area) = split_with_gauge(area);

    let hint = if snapshot.phase == Phase::Working {
        "[e] end session    [n] skip to break"
    } else {
        "[s] start    [1-5] sessions"
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            mmss(snapshot.work_seconds_remaining),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
    ];

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(body_block(snapshot.phase.display_name(), Color::Red));

    frame.render_widget(body, text_area);
    render_gauge(frame, app, Interval::Work, gauge_area);
}

/// Render the break screen.
fn render_break(frame: &mut Frame<'_>, snapshot: &SessionSnapshot, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "BREAK TIME",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(mmss(snapshot.break_seconds_remaining)),
        Line::from(""),
        Line::from(Span::styled(
            "[b] STRETCH!!!",
            Style::default().fg(Color::Yellow),
        )),
        Line::from(Span::styled(
            "[n] skip break",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(body_block(snapshot.phase.display_name(), Color::Green));

    frame.render_widget(body, area);
}

/// Render the stretch introduction.
fn render_intro(frame: &mut Frame<'_>, snapshot: &SessionSnapshot, area: Rect) {
    let mut lines = vec![Line::from("")];
    for exercise in Exercise::ALL {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<6}", exercise.display_name()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(exercise.instruction()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter] READY!",
        Style::default().fg(Color::Yellow),
    )));
    lines.push(Line::from(Span::styled(
        format!("Break time left: {}", mmss(snapshot.break_seconds_remaining)),
        Style::default().fg(Color::DarkGray),
    )));

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(body_block(snapshot.phase.display_name(), Color::Yellow));

    frame.render_widget(body, area);
}

/// Render the camera screen while stretching.
fn render_active<C: Clock>(
    frame: &mut Frame<'_>,
    app: &App<C>,
    snapshot: &SessionSnapshot,
    area: Rect,
) {
    let (text_area, gauge_area) = split_with_gauge(area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            app.exercise.display_name(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(app.exercise.instruction()),
        Line::from(""),
        Line::from(format!(
            "Stretch time left: {}",
            mmss(snapshot.stretch_seconds_remaining)
        )),
        Line::from(Span::styled(
            "[n] skip stretch",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(body_block(snapshot.phase.display_name(), Color::Yellow));

    frame.render_widget(body, text_area);
    render_gauge(frame, app, Interval::Stretch, gauge_area);
}

/// Render the score card.
fn render_done<C: Clock>(
    frame: &mut Frame<'_>,
    app: &App<C>,
    snapshot: &SessionSnapshot,
    area: Rect,
) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Well Done!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    match &app.score {
        Some(tally) if !tally.is_empty() => {
            lines.push(Line::from(format!("Score: {}", tally.total())));
            lines.push(Line::from(Span::styled(
                format!("You have earned {} points!", tally.points()),
                Style::default().fg(Color::Cyan),
            )));
        }
        _ => lines.push(Line::from(Span::styled(
            "No score recorded",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    lines.push(Line::from(""));
    lines.push(Line::from(format!(
        "Break time left: {}",
        mmss(snapshot.break_seconds_remaining)
    )));
    lines.push(Line::from(Span::styled(
        "[n] skip break",
        Style::default().fg(Color::DarkGray),
    )));

    let body = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(body_block(snapshot.phase.display_name(), Color::Green));

    frame.render_widget(body, area);
}

/// Render the status bar.
fn render_status_bar<C: Clock>(frame: &mut Frame<'_>, app: &App<C>, area: Rect) {
    let status_text = app.status.as_deref().unwrap_or(HELP);

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;
    use crate::config::Config;
    use crate::features::session::ManualClock;
    use crate::features::stretch::ScoreTally;
    use crate::tui::event::Action;

    fn draw(app: &App<ManualClock>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app() -> App<ManualClock> {
        App::with_clock(&Config::default(), ManualClock::new()).unwrap()
    }

    #[test]
    fn test_idle_screen() {
        let screen = draw(&app());
        assert!(screen.contains("Stretch925"));
        assert!(screen.contains("Number of sessions left: 4"));
        assert!(screen.contains("25:00"));
        assert!(screen.contains("Press ? for help"));
    }

    #[test]
    fn test_break_screen() {
        let mut app = app();
        app.handle(Action::Start);
        app.handle(Action::Skip);

        let screen = draw(&app);
        assert!(screen.contains("BREAK TIME"));
        assert!(screen.contains("05:00"));
        assert!(screen.contains("[b] STRETCH!!!"));
        assert!(screen.contains("Number of sessions left: 3"));
    }

    #[test]
    fn test_intro_lists_stretches() {
        let mut app = app();
        app.handle(Action::Start);
        app.handle(Action::Skip);
        app.handle(Action::Stretch);

        let screen = draw(&app);
        assert!(screen.contains("Y-W"));
        assert!(screen.contains("Neck"));
        assert!(screen.contains("Side"));
        assert!(screen.contains("[Enter] READY!"));
    }

    #[test]
    fn test_active_shows_stretch_time() {
        let mut app = app();
        app.handle(Action::Start);
        app.handle(Action::Skip);
        app.handle(Action::Stretch);
        app.handle(Action::Ready);

        let screen = draw(&app);
        assert!(screen.contains("Stretch time left: 01:00"));
    }

    #[test]
    fn test_done_shows_points() {
        let mut app = app();
        app.handle(Action::Start);
        app.handle(Action::Skip);
        app.handle(Action::Stretch);
        app.handle(Action::Ready);
        app.handle(Action::Skip);
        app.score = Some(ScoreTally::parse("0:120\n1:35\n").unwrap());

        let screen = draw(&app);
        assert!(screen.contains("Well Done!"));
        assert!(screen.contains("Score: 155"));
        assert!(screen.contains("You have earned 15 points!"));
    }
}
