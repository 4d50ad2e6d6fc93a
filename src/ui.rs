//! User interface rendering for the secure room.

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::{
    grid::{Cell, Grid},
    pathfinding::SearchReport,
    App,
};

/// Glyph rendered for every cell, colored per cell state.
const CELL_GLYPH: &str = "■ ";

/// Updates the application UI based on the persistent state.
///
/// Until the first worker pass completes there is no room to show and a waiting notice is
/// rendered instead.
///
/// # Errors
///
/// This function may return errors from dimension conversion failures.
pub(crate) fn draw(app: &mut App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    if let Some(grid) = app.grid.as_ref() {
        room(app.pass, app.report.as_ref(), grid, frame)?;
    } else {
        waiting(frame);
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Renders the waiting notice shown before the first completed pass.
fn waiting(frame: &mut Frame) {
    let layout = Layout::vertical([
        Constraint::Percentage(50),
        Constraint::Length(1),
        Constraint::Percentage(50),
    ])
    .split(frame.area());

    if let Some(area) = layout.get(1).copied() {
        frame.render_widget(
            Line::raw("Generating room...")
                .centered()
                .style(Color::Green),
            area,
        );
    }
}

/// Renders the room and the latest search report.
///
/// This function centers a bordered block holding one styled text line per grid row and draws a
/// bottom tooltip titled with the latest search outcome.
fn room(pass: u64, report: Option<&SearchReport>, grid: &Grid, frame: &mut Frame) -> Result<()> {
    let room_rows = u16::try_from(grid.rows())?;
    let room_cols = u16::try_from(grid.cols())?;

    // Overall layout: room area plus a tooltip strip at the bottom.
    let overall_layout =
        Layout::vertical([Constraint::Min(1), Constraint::Length(3)]).split(frame.area());
    let content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get room content area from layout")?;
    let tooltip_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    // Center the room block within the content area.
    let row_area = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(room_rows + 2),
        Constraint::Min(1),
    ])
    .split(content_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get room row area from vertical layout")?;
    let space = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(room_cols * 2 + 2),
        Constraint::Min(1),
    ])
    .split(row_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get room space from horizontal layout")?;

    let block = Block::bordered()
        .title(format!("Room {pass}"))
        .title_bottom("(q) quit")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);
    let inner_space = block.inner(space);

    frame.render_widget(block, space);
    frame.render_widget(Paragraph::new(room_lines(grid)), inner_space);

    // The latest search outcome as a bottom tooltip with a top border.
    let tooltip_block = Block::bordered()
        .title(report_line(report))
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);

    frame.render_widget(tooltip_block, tooltip_area);

    Ok(())
}

/// Builds one styled text line per grid row.
fn room_lines(grid: &Grid) -> Vec<Line<'static>> {
    (0..grid.rows())
        .map(|row| {
            let spans: Vec<Span<'static>> = (0..grid.cols())
                .map(|col| Span::styled(CELL_GLYPH, cell_style(grid.get(row, col))))
                .collect();

            Line::from(spans)
        })
        .collect()
}

/// Maps a cell state to its display style.
fn cell_style(cell: Cell) -> Style {
    match cell {
        Cell::Open => Style::new().fg(Color::White),
        Cell::Closed => Style::new().fg(Color::DarkGray),
        Cell::Entry | Cell::Exit => Style::new().fg(Color::Green),
        Cell::PathMark => Style::new().fg(Color::Red),
        Cell::Visited => Style::new(),
    }
}

/// Formats the tooltip line for the latest search outcome.
fn report_line(report: Option<&SearchReport>) -> String {
    report.map_or_else(|| "Searching...".to_owned(), SearchReport::describe)
}
