//! Keyword classifier assigning each article one coarse topic.
//!
//! Rules are checked in order and the first rule with any matching keyword
//! wins. Matching is a case-insensitive substring test over the title and
//! summary joined by a space, so short keywords such as `ai` or `app` also
//! hit inside longer words.

use super::model::Category;

/// Ordered classification rules. Earlier rules take precedence.
const RULES: [(Category, &[&str]); 4] = [
    (
        Category::India,
        &[
            "india",
            "delhi",
            "mumbai",
            "chennai",
            "bangalore",
            "kolkata",
            "tamil",
            "kerala",
            "tamil nadu",
        ],
    ),
    (
        Category::Sports,
        &[
            "sport", "cricket", "football", "tennis", "olympic", "match", "series",
        ],
    ),
    (
        Category::Tech,
        &[
            "tech",
            "ai",
            "software",
            "google",
            "microsoft",
            "apple",
            "meta",
            "openai",
            "laptop",
            "app",
            "startup",
        ],
    ),
    (
        Category::Business,
        &[
            "business",
            "economy",
            "market",
            "stock",
            "inflation",
            "bank",
            "rbi",
            "company",
        ],
    ),
];

/// Classify an article from its title and optional summary.
///
/// Falls back to [`Category::World`] when no rule matches.
pub fn categorize(title: &str, summary: Option<&str>) -> Category {
    let text = format!("{} {}", title, summary.unwrap_or("")).to_lowercase();

    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| text.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::World)
}
