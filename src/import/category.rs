//! Category inference from listing labels
//!
//! The directory tags listings with free-form labels; a fixed ordered table
//! maps known labels to catalog categories. The listing's own label order
//! decides ties: the first label with a mapping wins.

/// Category assigned when no label matches
pub const DEFAULT_CATEGORY: &str = "Other";

/// Known label to category pairs. Lookup is case-sensitive over trimmed labels.
const LABEL_CATEGORIES: &[(&str, &str)] = &[
    ("Code Editor", "Development Tools"),
    ("GitHub API", "Development Tools"),
    ("Database", "Database"),
    ("Search Tool", "Search Tools"),
    ("Map Service", "Location Services"),
    ("Browser Automation", "Browser Automation"),
    ("File Management", "File Management"),
    ("Design Tool", "Design Tools"),
    ("Image Generation", "Content Generation"),
    ("Text-to-Speech", "Content Generation"),
    ("Real-time Search", "Search Tools"),
    ("Note Management", "Productivity"),
    ("Weather Query", "Utilities"),
    ("Git Automation", "Development Tools"),
    ("Document Conversion", "Content Generation"),
    ("Transaction Closed Loop", "Financial Services"),
    ("Natural Language Processing", "AI"),
    ("Edge Computing", "Cloud Services"),
    ("Redis Service", "Database"),
    ("Transcript Extraction", "Content Generation"),
    ("Thinking Tool", "AI"),
    ("AWS Knowledge Base Retrieval", "Cloud Services"),
    ("Chart Generation", "Data Visualization"),
];

/// Infers a category from a listing's labels
///
/// Walks the labels in the order the listing presents them and returns the
/// category of the first label found in the mapping table. Labels are trimmed
/// before lookup. Returns [`DEFAULT_CATEGORY`] when no label matches or the
/// listing has no labels.
pub fn infer_category(labels: &[String]) -> &'static str {
    for label in labels {
        let trimmed = label.trim();
        if let Some((_, category)) = LABEL_CATEGORIES.iter().find(|(l, _)| *l == trimmed) {
            return category;
        }
    }
    DEFAULT_CATEGORY
}
