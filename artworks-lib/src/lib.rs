//! Artworks API client library
//!
//! A Rust async client for the Art Institute of Chicago public artworks API
//! (<https://api.artic.edu/docs/>), limited to the paginated listing endpoint.

pub mod error;
pub mod model;

mod client;

pub use client::*;
