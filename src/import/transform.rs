//! Listing to project record transform

use crate::import::category::infer_category;
use crate::source::SourceListing;
use crate::storage::ProjectRecord;
use chrono::Utc;
use uuid::Uuid;

/// Status assigned to every imported project
pub const STATUS_PUBLISHED: &str = "published";

/// Link-target hint assigned to every imported project
pub const LINK_TARGET: &str = "_blank";

/// Author recorded when the listing carries no creator
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Maps a source listing to the normalized project record
///
/// Labels are flattened to a comma-delimited tag string in listing order.
/// The popularity score becomes the sort weight only when present and
/// nonzero; the directory emits zero for listings without one.
pub fn to_project_record(listing: &SourceListing) -> ProjectRecord {
    let now = Utc::now().to_rfc3339();

    ProjectRecord {
        uuid: Uuid::new_v4().to_string(),
        name: listing.server_name.clone(),
        title: listing.server_name.clone(),
        description: listing.description.clone(),
        url: listing.server_url.clone(),
        category: infer_category(&listing.labels).to_string(),
        tags: listing.labels.join(","),
        status: STATUS_PUBLISHED.to_string(),
        is_featured: false,
        created_at: now.clone(),
        updated_at: now,
        author_name: listing
            .creator
            .clone()
            .filter(|creator| !creator.is_empty())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
        target: LINK_TARGET.to_string(),
        sort: listing.star.filter(|&star| star != 0),
    }
}
