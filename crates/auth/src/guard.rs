//! Access guard: the tenant-isolation decision point.
//!
//! Evaluated synchronously before a protected view is entered, so a denied
//! view never issues its first data request. Denials are silent redirects,
//! not errors.

use crate::principal::Principal;
use crate::route::{AccessRequirement, RouteTarget};

/// Where a denied navigation is redirected to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// The anonymous entry point.
    Login,
    /// The admin home (tenant list), doubling as the safe landing spot for
    /// authenticated principals denied a target.
    TenantList,
}

impl Destination {
    pub const fn path(self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::TenantList => "/restaurant",
        }
    }
}

/// Guard verdict for one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Redirect(Destination),
}

impl Access {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Authorize a principal against a route target.
///
/// - No IO
/// - No panics
/// - No tenant-existence lookups (ownership and role only)
///
/// A manager is allowed into a tenant workspace iff the requested slug is
/// present and byte-equal to the slug in their claims. This comparison is
/// the load-bearing tenant-isolation invariant: it holds regardless of what
/// any surrounding UI renders, and regardless of how the slug was typed into
/// the address bar.
pub fn evaluate(target: &RouteTarget, principal: &Principal) -> Access {
    match target.requirement {
        AccessRequirement::None => Access::Allow,
        _ if !principal.is_authenticated() => Access::Redirect(Destination::Login),
        AccessRequirement::RequireAdmin => match principal {
            Principal::Admin => Access::Allow,
            _ => Access::Redirect(Destination::TenantList),
        },
        AccessRequirement::RequireOwnerOrAdmin => match principal {
            Principal::Admin => Access::Allow,
            Principal::Manager {
                restaurant_slug: Some(owned),
            } => match &target.slug {
                Some(requested) if requested == owned => Access::Allow,
                _ => Access::Redirect(Destination::TenantList),
            },
            _ => Access::Redirect(Destination::TenantList),
        },
    }
}
