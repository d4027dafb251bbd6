//! Wire types for the remote directory API
//!
//! The directory returns an envelope with pagination metadata and a nested
//! listing group; only the fields the importer consumes are modeled, any
//! other fields in the body are ignored.

use serde::Deserialize;

/// Provenance tag of listings scraped from GitHub. Only listings carrying
/// this exact tag are imported.
pub const GITHUB_PROVENANCE: &str = "spider==github.com";

/// Envelope returned by the directory endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryResponse {
    #[serde(default)]
    pub code: i64,
    pub data: DirectoryData,
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub qid: String,
}

/// Payload of a directory response
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryData {
    /// Total number of listings across all pages
    #[serde(default)]
    pub count: u64,

    /// Listing groups; the directory puts the page's servers in the first group
    #[serde(default, rename = "mcpList")]
    pub mcp_list: Vec<ListingGroup>,
}

/// One group inside `data.mcpList`
#[derive(Debug, Clone, Deserialize)]
pub struct ListingGroup {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub servers: Vec<SourceListing>,
}

/// A single listing as returned by the directory
#[derive(Debug, Clone, Deserialize)]
pub struct SourceListing {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "serverName")]
    pub server_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, rename = "serverUrl")]
    pub server_url: String,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default, rename = "mcpSource")]
    pub mcp_source: String,
    #[serde(default, rename = "creatTime")]
    pub creat_time: String,
    #[serde(default, rename = "updateTime")]
    pub update_time: String,
    #[serde(default)]
    pub star: Option<i64>,
    #[serde(default)]
    pub creator: Option<String>,
}

impl SourceListing {
    /// Whether this listing was produced by the GitHub sub-scraper
    pub fn is_github_sourced(&self) -> bool {
        self.mcp_source == GITHUB_PROVENANCE
    }
}

/// One fetched page, flattened from the response envelope
#[derive(Debug, Clone)]
pub struct ListingPage {
    /// Total listing count reported by the directory
    pub total_count: u64,

    /// Listings on this page; empty when the source is exhausted
    pub listings: Vec<SourceListing>,
}

impl DirectoryResponse {
    /// Flattens the envelope into the page view the importer works with.
    ///
    /// An absent or empty `mcpList`, or a group without servers, yields an
    /// empty page, which the pipeline treats as end-of-data.
    pub fn into_page(self) -> ListingPage {
        let listings = self
            .data
            .mcp_list
            .into_iter()
            .next()
            .map(|group| group.servers)
            .unwrap_or_default();

        ListingPage {
            total_count: self.data.count,
            listings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_envelope() {
        let body = r#"{
            "code": 0,
            "data": {
                "category": [],
                "count": 45,
                "mcpList": [{
                    "query": "star",
                    "total": 45,
                    "servers": [{
                        "id": "abc-1",
                        "serverName": "github-tools",
                        "description": "GitHub helper",
                        "serverUrl": "https://github.com/example/github-tools",
                        "labels": ["GitHub API", "Database"],
                        "mcpSource": "spider==github.com",
                        "creatTime": "2025-01-01T00:00:00Z",
                        "updateTime": "2025-01-02T00:00:00Z",
                        "star": 42,
                        "creator": "octocat"
                    }]
                }],
                "type": "tag"
            },
            "msg": "ok",
            "qid": "q-123"
        }"#;

        let response: DirectoryResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.code, 0);
        assert_eq!(response.msg, "ok");

        let page = response.into_page();
        assert_eq!(page.total_count, 45);
        assert_eq!(page.listings.len(), 1);

        let listing = &page.listings[0];
        assert_eq!(listing.server_name, "github-tools");
        assert_eq!(listing.server_url, "https://github.com/example/github-tools");
        assert_eq!(listing.labels, vec!["GitHub API", "Database"]);
        assert_eq!(listing.star, Some(42));
        assert_eq!(listing.creator.as_deref(), Some("octocat"));
        assert!(listing.is_github_sourced());
    }

    #[test]
    fn test_deserialize_minimal_listing() {
        let body = r#"{
            "data": {
                "count": 1,
                "mcpList": [{"servers": [{"serverName": "bare"}]}]
            }
        }"#;

        let response: DirectoryResponse = serde_json::from_str(body).unwrap();
        let page = response.into_page();
        let listing = &page.listings[0];

        assert_eq!(listing.server_name, "bare");
        assert!(listing.description.is_empty());
        assert!(listing.labels.is_empty());
        assert_eq!(listing.star, None);
        assert_eq!(listing.creator, None);
        assert!(!listing.is_github_sourced());
    }

    #[test]
    fn test_empty_mcp_list_is_empty_page() {
        let body = r#"{"data": {"count": 100, "mcpList": []}}"#;
        let response: DirectoryResponse = serde_json::from_str(body).unwrap();
        let page = response.into_page();

        assert_eq!(page.total_count, 100);
        assert!(page.listings.is_empty());
    }

    #[test]
    fn test_group_without_servers_is_empty_page() {
        let body = r#"{"data": {"count": 100, "mcpList": [{"query": "star", "total": 100}]}}"#;
        let response: DirectoryResponse = serde_json::from_str(body).unwrap();
        assert!(response.into_page().listings.is_empty());
    }

    #[test]
    fn test_provenance_filter_is_exact() {
        let mut listing = SourceListing {
            id: String::new(),
            server_name: "x".to_string(),
            description: String::new(),
            server_url: String::new(),
            labels: vec![],
            mcp_source: "spider==github.com".to_string(),
            creat_time: String::new(),
            update_time: String::new(),
            star: None,
            creator: None,
        };
        assert!(listing.is_github_sourced());

        listing.mcp_source = "spider==gitee.com".to_string();
        assert!(!listing.is_github_sourced());

        listing.mcp_source = "Spider==github.com".to_string();
        assert!(!listing.is_github_sourced());
    }
}
