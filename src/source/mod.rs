//! Remote directory source
//!
//! This module contains the typed wire model of the directory API and the
//! HTTP client that fetches one page of listings at a time.

mod client;
mod types;

pub use client::{DirectoryClient, SourceError, PAGE_SIZE};
pub use types::{
    DirectoryData, DirectoryResponse, ListingGroup, ListingPage, SourceListing, GITHUB_PROVENANCE,
};
