mod app;
mod ui;

use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};

use crate::plan::DisplayRow;

pub use app::ReviewOutcome;

/// Run the review TUI: the commit table, then the window form. Returns
/// `None` when the user cancels.
pub fn review(
    rows: &[DisplayRow],
    total_effort: i64,
    start_default: String,
    end_default: String,
) -> anyhow::Result<Option<ReviewOutcome>> {
    let mut terminal = ratatui::init();
    let result = run(&mut terminal, rows, total_effort, start_default, end_default);
    ratatui::restore();
    result
}

fn run(
    terminal: &mut ratatui::DefaultTerminal,
    rows: &[DisplayRow],
    total_effort: i64,
    start_default: String,
    end_default: String,
) -> anyhow::Result<Option<ReviewOutcome>> {
    let mut app = app::App::new(rows, total_effort, start_default, end_default);
    loop {
        terminal.draw(|f| ui::render(f, &app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.cancelled {
            return Ok(None);
        }
        if app.done {
            return Ok(Some(app.outcome()));
        }
    }
}
