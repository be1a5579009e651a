use chrono::{DateTime, Local, Utc};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Raw API Records
// ============================================================================

/// Publication timestamp as delivered by the articles API.
///
/// The backend forwards whatever the upstream feed provided, so this is
/// usually an RFC 2822 string (`Mon, 19 Oct 2026 08:00:00 GMT`), sometimes
/// RFC 3339, and occasionally a bare epoch number in milliseconds, which
/// may carry a fractional part.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Published {
    EpochMillis(i64),
    EpochMillisFloat(f64),
    Text(String),
}

impl Published {
    /// Parse into a UTC instant. Returns `None` for unrecognized text.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            Published::EpochMillis(ms) => DateTime::from_timestamp_millis(*ms),
            Published::EpochMillisFloat(ms) => ms
                .is_finite()
                .then(|| DateTime::from_timestamp_millis(ms.trunc() as i64))
                .flatten(),
            Published::Text(s) => {
                let s = s.trim();
                if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
                    return Some(dt.with_timezone(&Utc));
                }
                if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
                    return Some(dt.with_timezone(&Utc));
                }
                // Numeric strings are treated like numeric JSON values
                s.parse::<i64>()
                    .ok()
                    .and_then(DateTime::from_timestamp_millis)
            }
        }
    }

    /// Date and time in the local zone, e.g. `Oct 19, 2026 14:05`.
    ///
    /// Unparseable text is shown as-is rather than dropped.
    pub fn format_datetime(&self) -> String {
        match self.to_datetime() {
            Some(dt) => dt
                .with_timezone(&Local)
                .format("%b %d, %Y %H:%M")
                .to_string(),
            None => self.raw_text(),
        }
    }

    /// Date only in the local zone, e.g. `Oct 19, 2026`.
    pub fn format_date(&self) -> String {
        match self.to_datetime() {
            Some(dt) => dt.with_timezone(&Local).format("%b %d, %Y").to_string(),
            None => self.raw_text(),
        }
    }

    fn raw_text(&self) -> String {
        match self {
            Published::EpochMillis(ms) => ms.to_string(),
            Published::EpochMillisFloat(ms) => ms.to_string(),
            Published::Text(s) => s.trim().to_string(),
        }
    }
}

/// One article record as returned by `GET <api>?limit=N`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Article {
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    pub link: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub published: Option<Published>,
}

impl Article {
    /// Summary text, empty when absent.
    pub fn summary_text(&self) -> &str {
        self.summary.as_deref().unwrap_or("")
    }

    /// Image URL, treating an empty string like a missing image.
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_deref().filter(|s| !s.trim().is_empty())
    }
}

// ============================================================================
// Categories
// ============================================================================

/// Coarse topic assigned to every article at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    India,
    Sports,
    Tech,
    Business,
    World,
}

impl Category {
    /// All categories, in selector order.
    pub const ALL: [Category; 5] = [
        Category::India,
        Category::Sports,
        Category::Tech,
        Category::Business,
        Category::World,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::India => "india",
            Category::Sports => "sports",
            Category::Tech => "tech",
            Category::Business => "business",
            Category::World => "world",
        }
    }

    /// Uppercased tag used in article metadata lines.
    pub fn label(self) -> &'static str {
        match self {
            Category::India => "INDIA",
            Category::Sports => "SPORTS",
            Category::Tech => "TECH",
            Category::Business => "BUSINESS",
            Category::World => "WORLD",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a selector string names no known category.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown category '{0}' (expected all, india, sports, tech, business or world)")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "india" => Ok(Category::India),
            "sports" => Ok(Category::Sports),
            "tech" => Ok(Category::Tech),
            "business" => Ok(Category::Business),
            "world" => Ok(Category::World),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

/// Category selector driving the filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Selector order used when cycling: all, then each category.
    const CYCLE: [CategoryFilter; 6] = [
        CategoryFilter::All,
        CategoryFilter::Only(Category::India),
        CategoryFilter::Only(Category::Sports),
        CategoryFilter::Only(Category::Tech),
        CategoryFilter::Only(Category::Business),
        CategoryFilter::Only(Category::World),
    ];

    pub fn matches(self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => c == category,
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::CYCLE.iter().position(|f| *f == self).unwrap_or(0);
        Self::CYCLE[(idx + 1) % Self::CYCLE.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::CYCLE.iter().position(|f| *f == self).unwrap_or(0);
        Self::CYCLE[(idx + Self::CYCLE.len() - 1) % Self::CYCLE.len()]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(c) => c.as_str(),
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse::<Category>().map(CategoryFilter::Only)
    }
}

/// An article plus its derived category.
///
/// The category is computed once when the list is loaded and never
/// recomputed for the lifetime of that list.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorizedArticle {
    pub article: Article,
    pub category: Category,
}

impl CategorizedArticle {
    pub fn new(article: Article) -> Self {
        let category = super::categorize(&article.title, article.summary.as_deref());
        Self { article, category }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "title": "Chennai rains",
            "summary": "Heavy rain",
            "link": "https://example.com/a",
            "image": "https://example.com/a.jpg",
            "published": "Mon, 19 Oct 2026 08:00:00 GMT"
        }"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.title, "Chennai rains");
        assert_eq!(article.summary_text(), "Heavy rain");
        assert_eq!(article.image_url(), Some("https://example.com/a.jpg"));
        assert!(article.published.unwrap().to_datetime().is_some());
    }

    #[test]
    fn test_deserialize_nulls_and_missing_fields() {
        let json = r#"{"title": "t", "link": "https://example.com", "image": null, "published": null}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.summary, None);
        assert_eq!(article.summary_text(), "");
        assert_eq!(article.image_url(), None);
        assert_eq!(article.published, None);
    }

    #[test]
    fn test_deserialize_missing_title_fails() {
        let json = r#"{"link": "https://example.com"}"#;
        assert!(serde_json::from_str::<Article>(json).is_err());
    }

    #[test]
    fn test_empty_image_treated_as_missing() {
        let json = r#"{"title": "t", "link": "l", "image": "  "}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(article.image_url(), None);
    }

    #[test]
    fn test_published_formats() {
        let rfc3339 = Published::Text("2026-10-19T08:00:00Z".to_string());
        let rfc2822 = Published::Text("Mon, 19 Oct 2026 08:00:00 +0000".to_string());
        let epoch = Published::EpochMillis(1_792_396_800_000);
        let numeric_text = Published::Text("1792396800000".to_string());

        assert_eq!(rfc3339.to_datetime(), rfc2822.to_datetime());
        assert_eq!(epoch.to_datetime(), numeric_text.to_datetime());
        assert!(epoch.to_datetime().is_some());
    }

    #[test]
    fn test_published_unparseable_falls_back_to_text() {
        let p = Published::Text(" yesterday ".to_string());
        assert_eq!(p.to_datetime(), None);
        assert_eq!(p.format_datetime(), "yesterday");
        assert_eq!(p.format_date(), "yesterday");
    }

    #[test]
    fn test_published_number_deserializes_as_epoch() {
        let json = r#"{"title": "t", "link": "l", "published": 1792396800000}"#;
        let article: Article = serde_json::from_str(json).unwrap();
        assert_eq!(
            article.published,
            Some(Published::EpochMillis(1_792_396_800_000))
        );
    }

    #[test]
    fn test_fractional_epoch_does_not_fail_the_batch() {
        let json = r#"[
            {"title": "a", "link": "https://example.com/a", "published": 1700000000000},
            {"title": "b", "link": "https://example.com/b", "published": 1700000000000.0}
        ]"#;
        let articles: Vec<Article> = serde_json::from_str(json).unwrap();
        assert_eq!(articles.len(), 2);

        let published = articles[1].published.as_ref().unwrap();
        assert_eq!(published, &Published::EpochMillisFloat(1_700_000_000_000.0));
        assert_eq!(
            published.to_datetime(),
            DateTime::from_timestamp_millis(1_700_000_000_000)
        );
        assert_eq!(
            Published::EpochMillisFloat(1_700_000_000_123.9).to_datetime(),
            DateTime::from_timestamp_millis(1_700_000_000_123)
        );
    }

    #[test]
    fn test_category_round_trip_names() {
        for c in Category::ALL {
            assert_eq!(c.as_str().parse::<Category>().unwrap(), c);
            assert_eq!(c.label(), c.as_str().to_uppercase());
        }
        assert!("sport".parse::<Category>().is_err());
    }

    #[test]
    fn test_filter_parse() {
        assert_eq!("ALL".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "Tech".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Tech)
        );
        let err = "weather".parse::<CategoryFilter>().unwrap_err();
        assert!(err.to_string().contains("weather"));
    }

    #[test]
    fn test_filter_cycle_wraps_both_ways() {
        let mut f = CategoryFilter::All;
        for _ in 0..6 {
            f = f.next();
        }
        assert_eq!(f, CategoryFilter::All);
        assert_eq!(
            CategoryFilter::All.prev(),
            CategoryFilter::Only(Category::World)
        );
        assert_eq!(
            CategoryFilter::Only(Category::India).prev(),
            CategoryFilter::All
        );
    }

    #[test]
    fn test_filter_matches() {
        assert!(CategoryFilter::All.matches(Category::World));
        assert!(CategoryFilter::Only(Category::Tech).matches(Category::Tech));
        assert!(!CategoryFilter::Only(Category::Tech).matches(Category::Sports));
    }
}
