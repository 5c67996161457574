//! The decoded identity acting on the client.

use carta_core::RestaurantSlug;

/// Identity derived from the bearer credential's claims.
///
/// Constructed once at decode time so every downstream consumer
/// pattern-matches exhaustively instead of probing optional claim fields.
/// Derived transiently from the stored credential on each read; never
/// persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// No credential, or a credential whose claims could not be decoded.
    Anonymous,

    /// Platform administrator: manages the set of restaurants and may enter
    /// any tenant's workspace.
    Admin,

    /// Restaurant manager, restricted to the single tenant they own.
    ///
    /// A manager claim without a `restaurant_slug` has no actionable tenant:
    /// the guard denies it every tenant-scoped target.
    Manager { restaurant_slug: Option<RestaurantSlug> },

    /// Authenticated, but with an absent or unrecognized role. Denied every
    /// protected target without being mistaken for an anonymous visitor.
    Other { role: Option<String> },
}

impl Principal {
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::Anonymous)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// The tenant this principal owns, if any.
    pub fn owned_slug(&self) -> Option<&RestaurantSlug> {
        match self {
            Self::Manager {
                restaurant_slug: Some(slug),
            } => Some(slug),
            _ => None,
        }
    }
}
