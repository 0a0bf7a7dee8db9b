// TUI rendering: 2D unit-state raster (updates on X, unit IDs on Y) + status panel.

use std::io::Stdout;

use hopfield_core::UpdateMode;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::Text,
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use crate::app::App;
use crate::backend::RecallBackend;

fn mode_label(mode: UpdateMode) -> String {
    match mode {
        UpdateMode::Synchronous => "sync".to_string(),
        UpdateMode::AsyncDeterministic => "async".to_string(),
        UpdateMode::AsyncStochastic { beta } => format!("stochastic (β={})", beta),
    }
}

fn raster_lines<B: RecallBackend>(app: &App<B>) -> Vec<String> {
    let mut lines = Vec::with_capacity(app.raster.len());
    for (row_idx, row) in app.raster.iter().enumerate() {
        let mut buf = format!("u{:02} |", row_idx);
        buf.extend(row.iter());
        lines.push(buf);
    }
    lines
}

fn status_line<B: RecallBackend>(app: &App<B>) -> String {
    let budget = match app.backend.budget().max_updates {
        Some(max) => max.to_string(),
        None => "∞".to_string(),
    };
    let outcome = if app.exhausted {
        "budget exhausted"
    } else if app.converged {
        "converged"
    } else {
        "searching"
    };
    format!(
        "Update: {}/{} | Units: {} | Mode: {} | Energy: {:.3} | Overlap: {:+.3} | {} | \
         Running: {}\n\
         Controls: [s] Step  [r] Run/Pause  [m] Mode  [f] New probe  [q] Quit",
        app.tick,
        budget,
        app.backend.units(),
        mode_label(app.backend.mode()),
        app.energy,
        app.overlap,
        outcome,
        if app.running { "yes" } else { "no" }
    )
}

/// Draws the UI each frame:
/// - Top: unit-state raster as rows (units) x columns (updates, circular).
/// - Bottom: status including update count, mode, energy, overlap and controls.
pub fn draw<B: RecallBackend>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &App<B>,
) -> anyhow::Result<()> {
    terminal.draw(|f| {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Percentage(80), Constraint::Percentage(20)].as_ref())
            .split(f.size());

        let raster_text = Text::from(raster_lines(app).join("\n"));
        let raster_widget = Paragraph::new(raster_text)
            .block(Block::default().title("Unit states  (update →)").borders(Borders::ALL))
            .style(Style::default().fg(Color::White));
        f.render_widget(raster_widget, chunks[0]);

        let status_widget = Paragraph::new(status_line(app))
            .style(Style::default().fg(Color::Cyan))
            .block(Block::default().title("Status").borders(Borders::ALL));
        f.render_widget(status_widget, chunks[1]);
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(mode_label(UpdateMode::Synchronous), "sync");
        assert_eq!(mode_label(UpdateMode::AsyncStochastic { beta: 2.0 }), "stochastic (β=2)");
    }
}
