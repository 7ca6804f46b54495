//! Journal entry domain types and sample data.
//!
//! The entries API is not built yet, so the list view renders a fixed set of
//! sample entries. Filtering and sorting already work the way they will
//! against real data: case-insensitive search over title and content, tag
//! filter by id, newest-first by default.

use chrono::{DateTime, TimeZone, Utc};

use reflecta_core::{EntryId, TagId};

/// Maximum characters shown in the list preview.
const PREVIEW_CHARS: usize = 160;

/// A label attached to entries, with a display color.
#[derive(Debug, Clone)]
pub struct Tag {
    /// Stable tag identifier.
    pub id: TagId,
    /// Human-readable tag name.
    pub name: String,
    /// Hex color (e.g., `#3B82F6`) used for the tag pill.
    pub color: String,
}

/// A journal entry.
#[derive(Debug, Clone)]
pub struct Entry {
    /// Stable entry identifier.
    pub id: EntryId,
    /// Entry title.
    pub title: String,
    /// Full entry body.
    pub content: String,
    /// When the entry was written.
    pub created_at: DateTime<Utc>,
    /// Tags attached to this entry.
    pub tags: Vec<Tag>,
}

impl Entry {
    /// Date formatted for the list view (e.g., "May 15, 2023").
    #[must_use]
    pub fn created_at_display(&self) -> String {
        self.created_at.format("%B %-d, %Y").to_string()
    }

    /// Shortened content for the list view.
    #[must_use]
    pub fn preview(&self) -> String {
        if self.content.chars().count() <= PREVIEW_CHARS {
            return self.content.clone();
        }
        let cut: String = self.content.chars().take(PREVIEW_CHARS).collect();
        format!("{}…", cut.trim_end())
    }

    fn matches(&self, filter: &EntryFilter) -> bool {
        let matches_search = filter.query.as_ref().is_none_or(|query| {
            let query = query.to_lowercase();
            query.is_empty()
                || self.title.to_lowercase().contains(&query)
                || self.content.to_lowercase().contains(&query)
        });

        let matches_tag = filter
            .tag
            .as_ref()
            .is_none_or(|tag| self.tags.iter().any(|t| &t.id == tag));

        matches_search && matches_tag
    }
}

/// Sort order for the entry list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Most recent entries first (the default).
    #[default]
    NewestFirst,
    /// Oldest entries first.
    OldestFirst,
}

impl SortOrder {
    /// Parse the `sort` query parameter; anything but `asc` means newest-first.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Self {
        match value {
            Some("asc") => Self::OldestFirst,
            _ => Self::NewestFirst,
        }
    }

    /// The opposite order, for the sort toggle link.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::NewestFirst => Self::OldestFirst,
            Self::OldestFirst => Self::NewestFirst,
        }
    }

    /// Query parameter value for this order.
    #[must_use]
    pub const fn as_query(self) -> &'static str {
        match self {
            Self::NewestFirst => "desc",
            Self::OldestFirst => "asc",
        }
    }

    /// Whether this order is newest-first.
    #[must_use]
    pub const fn is_descending(self) -> bool {
        matches!(self, Self::NewestFirst)
    }
}

/// Criteria applied to the entry list.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Free-text search over title and content.
    pub query: Option<String>,
    /// Only entries carrying this tag.
    pub tag: Option<TagId>,
    /// Sort order.
    pub order: SortOrder,
}

/// Filter and sort entries for display.
#[must_use]
pub fn filter_entries(entries: &[Entry], filter: &EntryFilter) -> Vec<Entry> {
    let mut matched: Vec<Entry> = entries
        .iter()
        .filter(|entry| entry.matches(filter))
        .cloned()
        .collect();

    matched.sort_by(|a, b| match filter.order {
        SortOrder::NewestFirst => b.created_at.cmp(&a.created_at),
        SortOrder::OldestFirst => a.created_at.cmp(&b.created_at),
    });

    matched
}

// =============================================================================
// Sample Data
// =============================================================================

fn tag(id: &str, name: &str, color: &str) -> Tag {
    Tag {
        id: TagId::from(id),
        name: name.to_string(),
        color: color.to_string(),
    }
}

/// The known tags, shown in the sidebar and the filter dropdown.
#[must_use]
pub fn sample_tags() -> Vec<Tag> {
    vec![
        tag("1", "Personal", "#3B82F6"),
        tag("2", "Work", "#10B981"),
        tag("3", "Ideas", "#8B5CF6"),
    ]
}

/// Sample entries rendered until the entries API exists.
#[must_use]
pub fn sample_entries() -> Vec<Entry> {
    let at = |y, mo, d, h, mi| {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
            .single()
            .expect("valid sample timestamp")
    };

    vec![
        Entry {
            id: EntryId::from("1"),
            title: "My first entry".to_string(),
            content: "This is the content of my first diary entry...".to_string(),
            created_at: at(2023, 5, 15, 10, 30),
            tags: vec![tag("1", "Personal", "#3B82F6")],
        },
        Entry {
            id: EntryId::from("2"),
            title: "Reflections on the project".to_string(),
            content: "Today I was working on the new project and wanted to reflect on..."
                .to_string(),
            created_at: at(2023, 5, 14, 15, 45),
            tags: vec![
                tag("2", "Work", "#10B981"),
                tag("3", "Ideas", "#8B5CF6"),
            ],
        },
        Entry {
            id: EntryId::from("3"),
            title: "Goals for next month".to_string(),
            content: "These are my goals for next month...".to_string(),
            created_at: at(2023, 5, 13, 9, 15),
            tags: vec![tag("2", "Work", "#10B981")],
        },
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filter_returns_all_newest_first() {
        let entries = filter_entries(&sample_entries(), &EntryFilter::default());
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].id, "1");
        assert_eq!(entries[2].id, "3");
    }

    #[test]
    fn test_sort_oldest_first() {
        let filter = EntryFilter {
            order: SortOrder::OldestFirst,
            ..EntryFilter::default()
        };
        let entries = filter_entries(&sample_entries(), &filter);
        assert_eq!(entries[0].id, "3");
        assert_eq!(entries[2].id, "1");
    }

    #[test]
    fn test_search_matches_title_case_insensitive() {
        let filter = EntryFilter {
            query: Some("GOALS".to_string()),
            ..EntryFilter::default()
        };
        let entries = filter_entries(&sample_entries(), &filter);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "3");
    }

    #[test]
    fn test_search_matches_content() {
        let filter = EntryFilter {
            query: Some("diary".to_string()),
            ..EntryFilter::default()
        };
        let entries = filter_entries(&sample_entries(), &filter);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "1");
    }

    #[test]
    fn test_empty_search_matches_all() {
        let filter = EntryFilter {
            query: Some(String::new()),
            ..EntryFilter::default()
        };
        assert_eq!(filter_entries(&sample_entries(), &filter).len(), 3);
    }

    #[test]
    fn test_tag_filter() {
        let filter = EntryFilter {
            tag: Some(TagId::from("2")),
            ..EntryFilter::default()
        };
        let entries = filter_entries(&sample_entries(), &filter);
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.tags.iter().any(|t| t.id == "2")));
    }

    #[test]
    fn test_search_and_tag_combine() {
        let filter = EntryFilter {
            query: Some("goals".to_string()),
            tag: Some(TagId::from("1")),
            ..EntryFilter::default()
        };
        assert!(filter_entries(&sample_entries(), &filter).is_empty());
    }

    #[test]
    fn test_sort_order_query_round_trip() {
        assert_eq!(SortOrder::from_query(Some("asc")), SortOrder::OldestFirst);
        assert_eq!(SortOrder::from_query(Some("desc")), SortOrder::NewestFirst);
        assert_eq!(SortOrder::from_query(None), SortOrder::NewestFirst);
        assert_eq!(SortOrder::NewestFirst.toggled().as_query(), "asc");
        assert_eq!(SortOrder::OldestFirst.toggled().as_query(), "desc");
    }

    #[test]
    fn test_preview_truncates_long_content() {
        let mut entry = sample_entries().remove(0);
        entry.content = "x".repeat(500);
        let preview = entry.preview();
        assert!(preview.chars().count() <= 161);
        assert!(preview.ends_with('…'));
    }

    #[test]
    fn test_created_at_display() {
        let entries = sample_entries();
        assert_eq!(entries[0].created_at_display(), "May 15, 2023");
    }
}
