//! Rendering: view state in, widgets out. No state lives here.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState};

use crate::app::{App, SortColumn};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const COLUMNS: [SortColumn; 6] = [
    SortColumn::Title,
    SortColumn::PlaceOfOrigin,
    SortColumn::ArtistDisplay,
    SortColumn::Inscriptions,
    SortColumn::DateStart,
    SortColumn::DateEnd,
];

pub fn draw(frame: &mut Frame, app: &App) {
    let [header_area, table_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(3),
        Constraint::Length(2),
    ])
    .areas(frame.area());

    draw_header(frame, app, header_area);
    draw_table(frame, app, table_area);
    draw_footer(frame, app, footer_area);

    if let Some(input) = &app.rows_input {
        draw_rows_popup(frame, input, frame.area());
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::from("Artworks Data Table").bold()];
    if app.controller.is_loading() {
        let spinner = SPINNER_FRAMES[app.spinner_frame % SPINNER_FRAMES.len()];
        spans.push(Span::from("  "));
        spans.push(Span::styled(
            format!("{} Loading", spinner),
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn header_cell(app: &App, column: SortColumn) -> Cell<'static> {
    let mut label = column.label().to_string();
    if app.sort_column == Some(column) {
        label.push_str(if app.sort_ascending { " ^" } else { " v" });
    }
    Cell::from(label).style(Style::default().add_modifier(Modifier::BOLD))
}

fn draw_table(frame: &mut Frame, app: &App, area: Rect) {
    let mut header_cells = vec![Cell::from("   ")];
    header_cells.extend(COLUMNS.iter().map(|&c| header_cell(app, c)));
    let header = Row::new(header_cells).height(1);

    let rows = app.display_rows().into_iter().map(|artwork| {
        let selected = app.controller.is_selected(artwork.id);
        let marker = if selected { "[x]" } else { "[ ]" };
        let row = Row::new(vec![
            Cell::from(marker),
            Cell::from(artwork.title.clone()),
            Cell::from(artwork.place_of_origin.clone()),
            Cell::from(artwork.artist_display.clone()),
            Cell::from(artwork.inscriptions.clone()),
            Cell::from(artwork.date_start.to_string()),
            Cell::from(artwork.date_end.to_string()),
        ]);
        if selected {
            row.style(Style::default().fg(Color::Green))
        } else {
            row
        }
    });

    let widths = [
        Constraint::Length(3),
        Constraint::Percentage(28),
        Constraint::Percentage(14),
        Constraint::Percentage(26),
        Constraint::Percentage(16),
        Constraint::Length(10),
        Constraint::Length(8),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL))
        .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("");

    let mut state = TableState::default().with_selected(Some(app.cursor));
    frame.render_stateful_widget(table, area, &mut state);
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let [paginator_area, hints_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);

    let controller = &app.controller;
    let first = controller.first_offset();
    let shown = controller.rows().len() as u64;
    let paginator = if shown == 0 {
        format!("Showing 0 of {}", controller.total_records())
    } else {
        format!(
            "Showing {}-{} of {}  Page {}/{}  {} selected",
            first + 1,
            first + shown,
            controller.total_records(),
            controller.page() + 1,
            controller.page_count(),
            controller.selection().len(),
        )
    };
    frame.render_widget(Paragraph::new(paginator), paginator_area);

    let hints = "n/p page  r rows per page  space select  a select page  s sort  S direction  q quit";
    frame.render_widget(
        Paragraph::new(hints).style(Style::default().fg(Color::DarkGray)),
        hints_area,
    );
}

fn draw_rows_popup(frame: &mut Frame, input: &str, area: Rect) {
    let [popup] = Layout::horizontal([Constraint::Length(40)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::vertical([Constraint::Length(4)])
        .flex(Flex::Center)
        .areas(popup);

    frame.render_widget(Clear, popup);
    let body = Paragraph::new(vec![
        Line::from("Enter the number of rows to display:"),
        Line::from(Span::styled(
            format!("{}_", input),
            Style::default().fg(Color::Cyan),
        )),
    ])
    .block(Block::default().borders(Borders::ALL).title("Select Rows"));
    frame.render_widget(body, popup);
}
