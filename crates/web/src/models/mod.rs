//! Domain models for the web front-end.
//!
//! # Models
//!
//! - `user` - The resolved account behind a session
//! - `session` - Session key constants
//! - `entry` - Journal entries and tags (sample data until the entries API lands)

pub mod entry;
pub mod session;
pub mod user;

pub use entry::{Entry, EntryFilter, SortOrder, Tag};
pub use session::keys as session_keys;
pub use user::CurrentUser;
