use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use ratatui::Frame;

use super::app::{App, Field, Stage};

/// Render the active review stage plus the key-hint bar.
pub fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),    // main area
            Constraint::Length(1), // hint bar
        ])
        .split(f.area());

    match app.stage {
        Stage::Table => render_table(f, app, chunks[0]),
        Stage::Form => render_form(f, app, chunks[0]),
    }
    render_hint_bar(f, app, chunks[1]);
}

fn render_table(f: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(["Hash", "Subject", "Effort", "Percent"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let mut rows: Vec<Row> = app
        .rows
        .iter()
        .map(|r| {
            Row::new([
                Cell::from(r.hash.clone()),
                Cell::from(r.subject.clone()),
                Cell::from(r.effort.to_string()),
                Cell::from(format!("{:.1}%", r.percent * 100.0)),
            ])
        })
        .collect();
    rows.push(
        Row::new([
            Cell::from(""),
            Cell::from("TOTAL"),
            Cell::from(app.total_effort.to_string()),
            Cell::from("100.0%"),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD)),
    );

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Min(20),
            Constraint::Length(8),
            Constraint::Length(9),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .block(Block::default().borders(Borders::ALL).title("Commits"));

    let mut state = TableState::default();
    state.select(Some(app.selected));
    f.render_stateful_widget(table, area, &mut state);
}

fn render_form(f: &mut Frame, app: &App, area: Rect) {
    let focus = |field: Field| {
        if app.field == field {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    };
    let confirm_label = if app.confirm { "Yes" } else { "No" };

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Start time (HH:MM): ", focus(Field::Start)),
            Span::raw(app.start_value.clone()),
        ]),
        Line::from(vec![
            Span::styled("End time (HH:MM): ", focus(Field::End)),
            Span::raw(app.end_value.clone()),
        ]),
        Line::from(vec![
            Span::styled(
                "Rewrite git history with these times? ",
                focus(Field::Confirm),
            ),
            Span::raw(confirm_label),
        ]),
    ];
    if let Some(error) = &app.error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Time window"),
    );
    f.render_widget(form, area);
}

fn render_hint_bar(f: &mut Frame, app: &App, area: Rect) {
    let hint = match app.stage {
        Stage::Table => "Enter: continue  j/k: scroll  Esc: cancel",
        Stage::Form => "Tab: next field  Enter: submit  y/n: toggle confirm  Esc: cancel",
    };
    f.render_widget(
        Paragraph::new(hint).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
