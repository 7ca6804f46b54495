//! User domain types.
//!
//! These types represent validated domain objects separate from the identity
//! API's wire types.

use reflecta_core::{Email, EmailError, UserId};

use crate::identity::Profile;

/// The resolved account behind the current session.
///
/// Held in memory only (profile cache); the session itself persists just the
/// token this was resolved from.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Stable account identifier issued by the identity service.
    pub id: UserId,
    /// Account email address.
    pub email: Email,
    /// Optional display name.
    pub name: Option<String>,
}

impl CurrentUser {
    /// Name to show in the UI: the account name, else the email local part.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or_else(|| self.email.local_part())
    }

    /// Single uppercase character for the avatar badge.
    #[must_use]
    pub fn initial(&self) -> String {
        self.display_name()
            .chars()
            .next()
            .map_or_else(|| "?".to_string(), |c| c.to_uppercase().to_string())
    }
}

impl TryFrom<Profile> for CurrentUser {
    type Error = EmailError;

    fn try_from(profile: Profile) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::from(profile.id),
            email: Email::parse(&profile.email)?,
            name: profile.name.filter(|name| !name.is_empty()),
        })
    }
}
