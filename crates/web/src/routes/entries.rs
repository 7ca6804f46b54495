//! Entry list route handler.
//!
//! Renders the sample entries with search, tag filter, and sort order taken
//! from the query string. All filtering happens server-side; the form
//! round-trips its state through query parameters.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::Query,
    response::IntoResponse,
};
use serde::Deserialize;

use reflecta_core::TagId;

use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::entry::{self, Entry, EntryFilter, SortOrder, Tag};
use crate::models::CurrentUser;

/// Query parameters for the entry list.
#[derive(Debug, Deserialize)]
pub struct EntriesQuery {
    /// Free-text search over title and content.
    pub q: Option<String>,
    /// Tag id filter; empty or absent means all tags.
    pub tag: Option<String>,
    /// `desc` (default) or `asc`.
    pub sort: Option<String>,
}

/// Entry list page template.
#[derive(Template, WebTemplate)]
#[template(path = "entries.html")]
pub struct EntriesTemplate {
    pub user: CurrentUser,
    pub active_nav: &'static str,
    pub entries: Vec<Entry>,
    pub tags: Vec<Tag>,
    pub q: String,
    pub selected_tag: String,
    pub sort_descending: bool,
    pub toggle_sort_url: String,
}

/// Display the entry list.
pub async fn index(
    RequireAuth(user): RequireAuth,
    Query(query): Query<EntriesQuery>,
) -> impl IntoResponse {
    let q = query.q.unwrap_or_default();
    let selected_tag = query.tag.unwrap_or_default();
    let order = SortOrder::from_query(query.sort.as_deref());

    let filter = EntryFilter {
        query: (!q.is_empty()).then(|| q.clone()),
        tag: (!selected_tag.is_empty()).then(|| TagId::from(selected_tag.as_str())),
        order,
    };
    let entries = entry::filter_entries(&entry::sample_entries(), &filter);

    let toggle_sort_url = format!(
        "/entries?q={}&tag={}&sort={}",
        urlencoding::encode(&q),
        urlencoding::encode(&selected_tag),
        order.toggled().as_query()
    );

    EntriesTemplate {
        user,
        active_nav: "entries",
        entries,
        tags: entry::sample_tags(),
        q,
        selected_tag,
        sort_descending: order.is_descending(),
        toggle_sort_url,
    }
}
