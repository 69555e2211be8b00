//! Page type for paginated listing results.

use super::ArtworkRow;

/// One page of artwork rows with the collection's total record count.
///
/// Row order matches the order of the API's `data` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkPage {
    rows: Vec<ArtworkRow>,
    total_records: u64,
}

impl ArtworkPage {
    /// Creates a new page from rows and a total record count.
    pub fn new(rows: Vec<ArtworkRow>, total_records: u64) -> Self {
        Self {
            rows,
            total_records,
        }
    }

    /// Returns a reference to the rows in this page.
    pub fn rows(&self) -> &[ArtworkRow] {
        &self.rows
    }

    /// Consumes the page and returns the rows.
    pub fn into_rows(self) -> Vec<ArtworkRow> {
        self.rows
    }

    /// Consumes the page and returns the rows and total count.
    pub fn into_parts(self) -> (Vec<ArtworkRow>, u64) {
        (self.rows, self.total_records)
    }

    /// Returns the total number of records in the remote collection.
    ///
    /// This is the collection-wide count from `pagination.total`, not the
    /// number of rows in this page. 0 when the API omits the field.
    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    /// Returns the number of rows in this page.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if this page has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
