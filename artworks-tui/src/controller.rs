//! View controller: owns the table's page-session state.
//!
//! The controller holds the current page, page size, row list, total count,
//! fetch state, and selection. It never performs I/O itself: handlers return a
//! [`FetchRequest`] describing the network call to issue, and the runtime
//! feeds the outcome back through [`ViewController::on_fetch_complete`].
//! Completions are tagged with a sequence number so that when page changes
//! overlap, only the latest issued request can update the view; stale
//! completions are discarded rather than racing to overwrite newer state.

use artworks_lib::error::FetchError;
use artworks_lib::model::{ArtworkPage, ArtworkRow};

/// Page size used when the rows-per-page input cannot be parsed.
pub const DEFAULT_ROWS_PER_PAGE: u32 = 10;

/// Fetch lifecycle for the current page.
#[derive(Debug)]
pub enum FetchState {
    /// No fetch issued yet.
    Idle,
    /// A fetch is outstanding.
    Loading,
    /// The latest fetch succeeded and its page is displayed.
    Loaded,
    /// The latest fetch failed; the previous rows remain displayed.
    Errored(FetchError),
}

/// A fetch the runtime should issue. `page` is already 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchRequest {
    pub seq: u64,
    pub page: u32,
    pub limit: u32,
}

pub struct ViewController {
    /// Zero-based page index as shown by the paginator.
    page: usize,
    rows_per_page: u32,
    rows: Vec<ArtworkRow>,
    total_records: u64,
    state: FetchState,
    /// Selected rows, keyed by `ArtworkRow::id`. Not reconciled on page
    /// change: rows selected on other pages stay until the next selection
    /// event replaces the whole set.
    selection: Vec<ArtworkRow>,
    /// Sequence number of the most recently issued fetch.
    last_seq: u64,
}

impl ViewController {
    pub fn new() -> Self {
        Self {
            page: 0,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
            rows: Vec::new(),
            total_records: 0,
            state: FetchState::Idle,
            selection: Vec::new(),
            last_seq: 0,
        }
    }

    /// Issues a fetch for the current page and size, entering `Loading`.
    ///
    /// Called once on mount and again by every page/size handler.
    pub fn start_fetch(&mut self) -> FetchRequest {
        self.last_seq += 1;
        self.state = FetchState::Loading;
        FetchRequest {
            seq: self.last_seq,
            page: self.page as u32 + 1,
            limit: self.rows_per_page,
        }
    }

    /// Handles a paginator event carrying the new page index and page size.
    ///
    /// The page index is not validated against the total count; an
    /// out-of-range page is forwarded to the API as-is.
    pub fn on_page_change(&mut self, page: usize, rows: u32) -> FetchRequest {
        self.page = page;
        self.rows_per_page = rows;
        self.start_fetch()
    }

    /// Handles free-form text from the rows-per-page control.
    ///
    /// Anything that does not parse as a positive integer coerces to
    /// [`DEFAULT_ROWS_PER_PAGE`]. No upper bound is enforced.
    pub fn on_rows_per_page_input(&mut self, input: &str) -> FetchRequest {
        self.rows_per_page = coerce_rows_per_page(input);
        self.start_fetch()
    }

    /// Replaces the selection wholesale.
    pub fn on_selection_change(&mut self, rows: Vec<ArtworkRow>) {
        self.selection = rows;
    }

    /// Applies a fetch completion.
    ///
    /// Returns `false` when the completion's sequence number is not the
    /// latest issued, in which case nothing changes. On failure the rows and
    /// total keep their prior values and the cause goes to the log only.
    pub fn on_fetch_complete(
        &mut self,
        seq: u64,
        result: Result<ArtworkPage, FetchError>,
    ) -> bool {
        if seq != self.last_seq {
            log::debug!(
                "discarding stale fetch completion (seq {}, latest {})",
                seq,
                self.last_seq
            );
            return false;
        }

        match result {
            Ok(page) => {
                let (rows, total_records) = page.into_parts();
                log::info!(
                    "loaded page {} ({} rows of {})",
                    self.page + 1,
                    rows.len(),
                    total_records
                );
                self.rows = rows;
                self.total_records = total_records;
                self.state = FetchState::Loaded;
            }
            Err(err) => {
                log::error!("error fetching data: {}", err);
                self.state = FetchState::Errored(err);
            }
        }
        true
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn rows_per_page(&self) -> u32 {
        self.rows_per_page
    }

    pub fn rows(&self) -> &[ArtworkRow] {
        &self.rows
    }

    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    pub fn selection(&self) -> &[ArtworkRow] {
        &self.selection
    }

    pub fn is_selected(&self, id: u64) -> bool {
        self.selection.iter().any(|row| row.id == id)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Loading)
    }

    /// Offset of the first row on the current page, as shown by the paginator.
    pub fn first_offset(&self) -> u64 {
        self.page as u64 * self.rows_per_page as u64
    }

    /// Number of pages implied by the total count; at least 1.
    pub fn page_count(&self) -> u64 {
        self.total_records.div_ceil(self.rows_per_page.max(1) as u64).max(1)
    }
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new()
    }
}

/// Coerces rows-per-page input to a positive integer, defaulting to 10.
pub fn coerce_rows_per_page(input: &str) -> u32 {
    match input.trim().parse::<u32>() {
        Ok(n) if n > 0 => n,
        _ => DEFAULT_ROWS_PER_PAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: u64, title: &str) -> ArtworkRow {
        ArtworkRow {
            id,
            title: title.to_string(),
            place_of_origin: "Unknown".to_string(),
            artist_display: "Unknown".to_string(),
            inscriptions: "N/A".to_string(),
            date_start: 0,
            date_end: 0,
        }
    }

    fn page_of(rows: Vec<ArtworkRow>, total: u64) -> ArtworkPage {
        ArtworkPage::new(rows, total)
    }

    #[test]
    fn test_mount_fetch_is_one_based() {
        let mut controller = ViewController::new();
        let request = controller.start_fetch();

        assert_eq!(request.page, 1);
        assert_eq!(request.limit, 10);
        assert!(controller.is_loading());
    }

    #[test]
    fn test_page_change_arithmetic() {
        let mut controller = ViewController::new();
        let request = controller.on_page_change(3, 25);

        assert_eq!(request.page, 4);
        assert_eq!(request.limit, 25);
        assert_eq!(controller.first_offset(), 75);
    }

    #[test]
    fn test_total_count_propagation() {
        let mut controller = ViewController::new();
        let request = controller.start_fetch();

        assert!(controller.on_fetch_complete(request.seq, Ok(page_of(vec![], 237))));
        assert_eq!(controller.total_records(), 237);
        assert!(!controller.is_loading());
    }

    #[test]
    fn test_rows_per_page_coercion() {
        assert_eq!(coerce_rows_per_page("0"), 10);
        assert_eq!(coerce_rows_per_page(""), 10);
        assert_eq!(coerce_rows_per_page("abc"), 10);
        assert_eq!(coerce_rows_per_page("-5"), 10);
        assert_eq!(coerce_rows_per_page("25"), 25);
        assert_eq!(coerce_rows_per_page(" 25 "), 25);
    }

    #[test]
    fn test_rows_per_page_input_refetches_with_coerced_size() {
        let mut controller = ViewController::new();
        let request = controller.on_rows_per_page_input("junk");

        assert_eq!(request.limit, 10);
        assert_eq!(controller.rows_per_page(), 10);

        let request = controller.on_rows_per_page_input("50");
        assert_eq!(request.limit, 50);
    }

    #[test]
    fn test_failure_keeps_prior_rows_and_total() {
        let mut controller = ViewController::new();
        let request = controller.start_fetch();
        controller.on_fetch_complete(request.seq, Ok(page_of(vec![row(1, "A")], 100)));

        let request = controller.on_page_change(1, 10);
        assert!(controller.is_loading());
        controller.on_fetch_complete(request.seq, Err(FetchError::http(503, "down")));

        assert_eq!(controller.rows().len(), 1);
        assert_eq!(controller.rows()[0].title, "A");
        assert_eq!(controller.total_records(), 100);
        assert!(!controller.is_loading());
    }

    #[test]
    fn test_selection_persists_across_page_change() {
        let mut controller = ViewController::new();
        let request = controller.start_fetch();
        controller.on_fetch_complete(request.seq, Ok(page_of(vec![row(1, "A")], 2)));
        controller.on_selection_change(vec![row(1, "A")]);

        let request = controller.on_page_change(1, 1);
        controller.on_fetch_complete(request.seq, Ok(page_of(vec![row(2, "B")], 2)));

        assert_eq!(controller.selection().len(), 1);
        assert!(controller.is_selected(1));

        controller.on_selection_change(vec![row(2, "B")]);
        assert!(!controller.is_selected(1));
        assert!(controller.is_selected(2));
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut controller = ViewController::new();
        let first = controller.start_fetch();
        let second = controller.on_page_change(1, 10);

        // The older request resolves after the newer one was issued.
        assert!(!controller.on_fetch_complete(first.seq, Ok(page_of(vec![row(1, "old")], 50))));
        assert!(controller.rows().is_empty());
        assert!(controller.is_loading());

        assert!(controller.on_fetch_complete(second.seq, Ok(page_of(vec![row(2, "new")], 60))));
        assert_eq!(controller.rows()[0].title, "new");
        assert_eq!(controller.total_records(), 60);
    }

    #[test]
    fn test_stale_failure_does_not_clear_loading() {
        let mut controller = ViewController::new();
        let first = controller.start_fetch();
        let _second = controller.on_page_change(1, 10);

        assert!(!controller.on_fetch_complete(first.seq, Err(FetchError::http(500, ""))));
        assert!(controller.is_loading());
    }

    #[test]
    fn test_page_count() {
        let mut controller = ViewController::new();
        let request = controller.start_fetch();
        controller.on_fetch_complete(request.seq, Ok(page_of(vec![], 101)));

        assert_eq!(controller.page_count(), 11);
    }
}
