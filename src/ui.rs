//! TUI rendering for the overhead TUI
//!
//! One screen: the coordinate input, a status line, the nearest-aircraft
//! panel and the emergency alert list. Panels are drawn from [`Report`]
//! records only, so nothing here knows about state vectors or the search.

use crate::app::{App, Status};
use crate::report::Report;
use ratatui::{prelude::*, widgets::*};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Renders one frame of the TUI based on current application state.
///
/// # Arguments
///
/// * `f` - The ratatui frame to draw into (from `terminal.draw()`).
/// * `app` - Current application state (input, status, reports).
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input
            Constraint::Length(1), // Status
            Constraint::Min(0),
            Constraint::Length(1), // Help
        ])
        .split(f.size());

    render_input(f, app, chunks[0]);
    render_status(f, app, chunks[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[2]);

    render_nearest(f, app, body[0]);
    render_alerts(f, app, body[1]);

    let help = Paragraph::new(" Enter search   Ctrl-L use my location   Esc quit")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(help, chunks[3]);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let input = Paragraph::new(app.input.as_str()).block(
        Block::default()
            .title(" Latitude, Longitude (e.g. 38.5, -77.2 or 38.5°N 77.2°W) ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(input, area);

    // Cursor sits after the last typed character
    let typed = app.input.chars().count() as u16;
    let x = (area.x + 1 + typed).min(area.x + area.width.saturating_sub(2));
    f.set_cursor(x, area.y + 1);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let line = match &app.status {
        Status::Idle => Line::from(Span::styled(
            " Enter a position to find the nearest aircraft.",
            Style::default().fg(Color::DarkGray),
        )),
        Status::Busy(msg) => Line::from(vec![
            Span::styled(
                format!(" {} ", SPINNER[app.tick_count % SPINNER.len()]),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(msg.as_str()),
        ]),
        Status::Info(msg) => Line::from(Span::styled(
            format!(" {}", msg),
            Style::default().fg(Color::Green),
        )),
        Status::Error(msg) => Line::from(Span::styled(
            format!(" {}", msg),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
    };
    f.render_widget(Paragraph::new(line), area);
}

fn render_nearest(f: &mut Frame, app: &App, area: Rect) {
    let mut title = String::from(" Nearest Aircraft ");
    if let Some(ts) = app.last_update {
        title.push_str(&format!("· updated {} ", ts.format("%H:%M:%S")));
    }
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .padding(Padding::new(2, 2, 1, 1));

    let lines = match &app.nearest {
        Some(report) => report_lines(report, Color::Yellow),
        None => vec![Line::from(Span::styled(
            "No aircraft selected yet.",
            Style::default().fg(Color::DarkGray),
        ))],
    };

    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn render_alerts(f: &mut Frame, app: &App, area: Rect) {
    let border = if app.alerts.is_empty() {
        Color::DarkGray
    } else {
        Color::Red
    };
    let block = Block::default()
        .title(format!(" Emergency Squawks ({}) ", app.alerts.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let items: Vec<ListItem> = app
        .alerts
        .iter()
        .map(|report| {
            let mut lines = report_lines(report, Color::Red);
            lines.push(Line::from(""));
            ListItem::new(lines)
        })
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

/// Headline in `accent`, then one aligned `key: value` row per detail.
fn report_lines(report: &Report, accent: Color) -> Vec<Line<'_>> {
    let width = report
        .details
        .iter()
        .map(|(k, _)| k.chars().count())
        .max()
        .unwrap_or(0);

    let mut lines = vec![
        Line::from(Span::styled(
            report.headline.as_str(),
            Style::default().fg(accent).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    lines.extend(report.details.iter().map(|(key, value)| {
        Line::from(vec![
            Span::styled(
                format!("{:<width$}  ", key, width = width),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(value.as_str()),
        ])
    }));
    lines
}
