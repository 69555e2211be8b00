//! Data model for artwork records and result pages.

mod artwork;
mod page;

pub use artwork::*;
pub use page::*;
