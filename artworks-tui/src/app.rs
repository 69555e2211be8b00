//! Application loop: terminal events in, fetches out, state re-rendered.

use std::io;

use artworks_lib::ArticClient;
use artworks_lib::error::FetchError;
use artworks_lib::model::{ArtworkPage, ArtworkRow};
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;

use crate::controller::{FetchRequest, ViewController};
use crate::ui;

const SPINNER_INTERVAL_MS: u64 = 120;

/// Column to sort the displayed rows by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Title,
    PlaceOfOrigin,
    ArtistDisplay,
    Inscriptions,
    DateStart,
    DateEnd,
}

impl SortColumn {
    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::PlaceOfOrigin => "Place of Origin",
            Self::ArtistDisplay => "Artist",
            Self::Inscriptions => "Inscriptions",
            Self::DateStart => "Start Date",
            Self::DateEnd => "End Date",
        }
    }

    /// Cycles `None -> Title -> ... -> End Date -> None`.
    fn cycle(current: Option<Self>) -> Option<Self> {
        match current {
            None => Some(Self::Title),
            Some(Self::Title) => Some(Self::PlaceOfOrigin),
            Some(Self::PlaceOfOrigin) => Some(Self::ArtistDisplay),
            Some(Self::ArtistDisplay) => Some(Self::Inscriptions),
            Some(Self::Inscriptions) => Some(Self::DateStart),
            Some(Self::DateStart) => Some(Self::DateEnd),
            Some(Self::DateEnd) => None,
        }
    }
}

pub struct App {
    client: ArticClient,
    pub controller: ViewController,
    completion_tx: mpsc::UnboundedSender<(u64, Result<ArtworkPage, FetchError>)>,
    completion_rx: mpsc::UnboundedReceiver<(u64, Result<ArtworkPage, FetchError>)>,
    /// Cursor position within the displayed (possibly sorted) rows.
    pub cursor: usize,
    pub sort_column: Option<SortColumn>,
    pub sort_ascending: bool,
    /// Input buffer of the rows-per-page popup; `None` when closed.
    pub rows_input: Option<String>,
    pub spinner_frame: usize,
    should_quit: bool,
}

impl App {
    pub fn new(client: ArticClient) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            client,
            controller: ViewController::new(),
            completion_tx,
            completion_rx,
            cursor: 0,
            sort_column: None,
            sort_ascending: true,
            rows_input: None,
            spinner_frame: 0,
            should_quit: false,
        }
    }

    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        let mut events = EventStream::new();
        let mut tick =
            tokio::time::interval(std::time::Duration::from_millis(SPINNER_INTERVAL_MS));

        // Mount fetch.
        let request = self.controller.start_fetch();
        self.spawn_fetch(request);

        loop {
            terminal.draw(|frame| ui::draw(frame, &self))?;

            tokio::select! {
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            self.on_key(key);
                        }
                        Some(Ok(_)) => {}
                        Some(Err(err)) => return Err(err),
                        None => break,
                    }
                }
                completion = self.completion_rx.recv() => {
                    if let Some((seq, result)) = completion {
                        self.on_fetch_complete(seq, result);
                    }
                }
                _ = tick.tick() => {
                    if self.controller.is_loading() {
                        self.spinner_frame = self.spinner_frame.wrapping_add(1);
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    /// Rows in display order: page order, or sorted when a sort is active.
    ///
    /// Sorting reorders the displayed rows only; controller state keeps the
    /// page order the API returned.
    pub fn display_rows(&self) -> Vec<&ArtworkRow> {
        let mut rows: Vec<&ArtworkRow> = self.controller.rows().iter().collect();
        if let Some(column) = self.sort_column {
            rows.sort_by(|a, b| {
                let ord = match column {
                    SortColumn::Title => a.title.cmp(&b.title),
                    SortColumn::PlaceOfOrigin => a.place_of_origin.cmp(&b.place_of_origin),
                    SortColumn::ArtistDisplay => a.artist_display.cmp(&b.artist_display),
                    SortColumn::Inscriptions => a.inscriptions.cmp(&b.inscriptions),
                    SortColumn::DateStart => a.date_start.cmp(&b.date_start),
                    SortColumn::DateEnd => a.date_end.cmp(&b.date_end),
                };
                if self.sort_ascending { ord } else { ord.reverse() }
            });
        }
        rows
    }

    fn spawn_fetch(&self, request: FetchRequest) {
        let client = self.client.clone();
        let tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = client.fetch_page(request.page, request.limit).await;
            let _ = tx.send((request.seq, result));
        });
    }

    fn on_fetch_complete(&mut self, seq: u64, result: Result<ArtworkPage, FetchError>) {
        if self.controller.on_fetch_complete(seq, result) {
            self.cursor = self
                .cursor
                .min(self.controller.rows().len().saturating_sub(1));
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.rows_input.is_some() {
            self.on_popup_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(-1),
            KeyCode::Right | KeyCode::Char('n') => self.next_page(),
            KeyCode::Left | KeyCode::Char('p') => self.previous_page(),
            KeyCode::Char(' ') => self.toggle_cursor_row(),
            KeyCode::Char('a') => self.toggle_page_selection(),
            KeyCode::Char('s') => self.sort_column = SortColumn::cycle(self.sort_column),
            KeyCode::Char('S') => self.sort_ascending = !self.sort_ascending,
            KeyCode::Char('r') => {
                self.rows_input = Some(self.controller.rows_per_page().to_string());
            }
            _ => {}
        }
    }

    /// The rows-per-page popup accepts any text; coercion happens on apply.
    fn on_popup_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.rows_input = None,
            KeyCode::Enter => {
                if let Some(input) = self.rows_input.take() {
                    let request = self.controller.on_rows_per_page_input(&input);
                    self.cursor = 0;
                    self.spawn_fetch(request);
                }
            }
            KeyCode::Backspace => {
                if let Some(buffer) = &mut self.rows_input {
                    buffer.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(buffer) = &mut self.rows_input {
                    buffer.push(c);
                }
            }
            _ => {}
        }
    }

    fn move_cursor(&mut self, delta: isize) {
        let len = self.controller.rows().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        self.cursor = self
            .cursor
            .saturating_add_signed(delta)
            .min(len - 1);
    }

    fn next_page(&mut self) {
        let page = self.controller.page();
        if (page as u64 + 1) < self.controller.page_count() {
            let rows = self.controller.rows_per_page();
            let request = self.controller.on_page_change(page + 1, rows);
            self.cursor = 0;
            self.spawn_fetch(request);
        }
    }

    fn previous_page(&mut self) {
        let page = self.controller.page();
        if page > 0 {
            let rows = self.controller.rows_per_page();
            let request = self.controller.on_page_change(page - 1, rows);
            self.cursor = 0;
            self.spawn_fetch(request);
        }
    }

    /// Toggles the cursored row in the selection, emitting a wholesale
    /// selection-change like the table widget would.
    fn toggle_cursor_row(&mut self) {
        let row = match self.display_rows().get(self.cursor) {
            Some(row) => (*row).clone(),
            None => return,
        };
        let mut selection = self.controller.selection().to_vec();
        if let Some(pos) = selection.iter().position(|r| r.id == row.id) {
            selection.remove(pos);
        } else {
            selection.push(row);
        }
        self.controller.on_selection_change(selection);
    }

    /// Selects every row on the current page, or deselects them if all are
    /// already selected. Rows selected on other pages are left alone.
    fn toggle_page_selection(&mut self) {
        let page_rows: Vec<ArtworkRow> = self.controller.rows().to_vec();
        if page_rows.is_empty() {
            return;
        }
        let all_selected = page_rows.iter().all(|r| self.controller.is_selected(r.id));

        let mut selection = self.controller.selection().to_vec();
        if all_selected {
            selection.retain(|r| !page_rows.iter().any(|p| p.id == r.id));
        } else {
            for row in page_rows {
                if !selection.iter().any(|r| r.id == row.id) {
                    selection.push(row);
                }
            }
        }
        self.controller.on_selection_change(selection);
    }
}
