//! Apple customer-review feed parsing.
//!
//! The JSON flavour of the feed wraps every scalar in `{"label": ...}` and
//! collapses `feed.entry` to a bare object when a page holds a single entry.

use chrono::DateTime;
use serde::Deserialize;

use crate::models::review::Review;

/// A review as it appears on the feed, before it is numbered within a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReview {
    pub rating: u8,
    pub title: String,
    pub text: String,
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FeedDocument {
    #[serde(default)]
    feed: Option<FeedBody>,
}

#[derive(Debug, Deserialize)]
struct FeedBody {
    #[serde(default)]
    entry: Option<Entries>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Entries {
    Many(Vec<FeedEntry>),
    One(Box<FeedEntry>),
}

#[derive(Debug, Deserialize)]
struct FeedEntry {
    #[serde(rename = "im:rating")]
    rating: Option<Label>,
    title: Option<Label>,
    content: Option<Label>,
    updated: Option<Label>,
}

#[derive(Debug, Deserialize)]
struct Label {
    label: String,
}

/// Parses one feed page into raw reviews.
///
/// Entries without a numeric `im:rating` (older feeds lead with an app
/// metadata entry) are skipped. A page with no `entry` yields an empty list.
pub fn parse_feed(body: &str) -> Result<Vec<RawReview>, serde_json::Error> {
    let document: FeedDocument = serde_json::from_str(body)?;

    let entries = match document.feed.and_then(|f| f.entry) {
        Some(Entries::Many(entries)) => entries,
        Some(Entries::One(entry)) => vec![*entry],
        None => return Ok(Vec::new()),
    };

    Ok(entries.into_iter().filter_map(into_raw_review).collect())
}

fn into_raw_review(entry: FeedEntry) -> Option<RawReview> {
    let rating = entry.rating?.label.trim().parse::<u8>().ok()?;
    Some(RawReview {
        rating,
        title: entry.title.map(|l| l.label).unwrap_or_default(),
        text: entry.content.map(|l| l.label).unwrap_or_default(),
        date: entry.updated.map(|l| l.label),
    })
}

/// Converts a raw feed review into a `Review` numbered `recall_id`.
/// An unparsable date becomes `None` rather than an error.
pub fn parse_review(raw: RawReview, recall_id: u32) -> Review {
    let created_at = raw
        .date
        .as_deref()
        .and_then(|d| DateTime::parse_from_rfc3339(d.trim()).ok());

    Review {
        recall_id,
        rating: raw.rating,
        title: raw.title,
        text: raw.text,
        created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEED_PAGE: &str = r#"{
        "feed": {
            "author": {"name": {"label": "iTunes Store"}},
            "entry": [
                {
                    "author": {"name": {"label": "user1"}},
                    "updated": {"label": "2024-05-02T08:14:51-07:00"},
                    "im:rating": {"label": "1"},
                    "im:version": {"label": "3.2.1"},
                    "id": {"label": "11001"},
                    "title": {"label": "Keeps crashing"},
                    "content": {"label": "App crashes every time I open it", "attributes": {"type": "text"}}
                },
                {
                    "updated": {"label": "2024-05-01T10:00:00Z"},
                    "im:rating": {"label": "5"},
                    "title": {"label": "Love it"},
                    "content": {"label": "Accurate readings"}
                },
                {
                    "im:rating": {"label": "3"},
                    "content": {"label": "No title on this one"}
                }
            ]
        }
    }"#;

    #[test]
    fn test_parse_feed_reads_all_entries() {
        let reviews = parse_feed(FEED_PAGE).unwrap();
        assert_eq!(reviews.len(), 3);
        assert_eq!(reviews.iter().filter(|r| r.rating == 1).count(), 1);
        assert_eq!(reviews[0].title, "Keeps crashing");
        assert_eq!(reviews[0].text, "App crashes every time I open it");
        assert_eq!(reviews[2].title, "");
        assert!(reviews[2].date.is_none());
    }

    #[test]
    fn test_parse_feed_single_entry_object() {
        let body = r#"{"feed": {"entry": {"im:rating": {"label": "2"}, "title": {"label": "Slow"}, "content": {"label": "Too slow"}}}}"#;
        let reviews = parse_feed(body).unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].rating, 2);
    }

    #[test]
    fn test_parse_feed_skips_entries_without_rating() {
        let body = r#"{"feed": {"entry": [
            {"title": {"label": "Nebula"}, "im:name": {"label": "Nebula"}},
            {"im:rating": {"label": "4"}, "title": {"label": "Nice"}, "content": {"label": "Good"}}
        ]}}"#;
        let reviews = parse_feed(body).unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].rating, 4);
    }

    #[test]
    fn test_parse_feed_without_entries_is_empty() {
        assert!(parse_feed(r#"{"feed": {"author": {}}}"#).unwrap().is_empty());
        assert!(parse_feed(r#"{}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_feed_rejects_invalid_json() {
        assert!(parse_feed("<html>not json</html>").is_err());
    }

    #[test]
    fn test_parse_review_accepts_zulu_and_offset_dates() {
        let reviews = parse_feed(FEED_PAGE).unwrap();
        let first = parse_review(reviews[0].clone(), 1);
        let second = parse_review(reviews[1].clone(), 2);
        assert_eq!(first.recall_id, 1);
        assert_eq!(
            first.created_at.unwrap().to_rfc3339(),
            "2024-05-02T08:14:51-07:00"
        );
        assert_eq!(second.created_at.unwrap().to_rfc3339(), "2024-05-01T10:00:00+00:00");
    }

    #[test]
    fn test_parse_review_bad_date_is_none() {
        let raw = RawReview {
            rating: 3,
            title: String::new(),
            text: String::new(),
            date: Some("yesterday".to_string()),
        };
        assert!(parse_review(raw, 7).created_at.is_none());
    }
}
