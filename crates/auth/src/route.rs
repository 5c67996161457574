//! Navigation targets and their access requirements.

use carta_core::RestaurantSlug;

/// Role requirement attached to a route as metadata.
///
/// An explicit enumeration instead of per-route callback guards: the one
/// pure function in [`crate::guard`] evaluates these, so there are no hidden
/// closures capturing stale state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessRequirement {
    /// Open to everyone, including anonymous visitors.
    None,
    /// Platform administrators only.
    RequireAdmin,
    /// The tenant's owning manager, or any administrator.
    RequireOwnerOrAdmin,
}

/// The navigation destination under evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTarget {
    pub requirement: AccessRequirement,
    /// The tenant slug requested by the route, where the path carries one.
    pub slug: Option<RestaurantSlug>,
}

impl RouteTarget {
    pub fn unrestricted() -> Self {
        Self {
            requirement: AccessRequirement::None,
            slug: None,
        }
    }

    pub fn admin_only() -> Self {
        Self {
            requirement: AccessRequirement::RequireAdmin,
            slug: None,
        }
    }

    pub fn workspace(slug: RestaurantSlug) -> Self {
        Self {
            requirement: AccessRequirement::RequireOwnerOrAdmin,
            slug: Some(slug),
        }
    }
}

/// First path segments that can never be a tenant's public menu.
pub const RESERVED_SEGMENTS: &[&str] = &["login", "restaurant"];

/// Resolve a navigation path to its route target.
///
/// The surface mirrors the application's routes: `/login` and the public
/// menu (`/{slug}`, any non-reserved single segment) are unrestricted,
/// `/restaurant` is the admin tenant list, and everything under
/// `/restaurant/{slug}/` is that tenant's workspace. Unknown paths fall
/// through to the public catch-all, exactly like the wildcard route.
pub fn resolve(path: &str) -> RouteTarget {
    let trimmed = path.trim_matches('/');
    let segments: Vec<&str> = if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    };

    match segments.as_slice() {
        ["restaurant"] => RouteTarget::admin_only(),
        ["restaurant", slug, ..] => RouteTarget::workspace(RestaurantSlug::from(*slug)),
        [segment] if !RESERVED_SEGMENTS.contains(segment) => RouteTarget {
            requirement: AccessRequirement::None,
            slug: Some(RestaurantSlug::from(*segment)),
        },
        _ => RouteTarget::unrestricted(),
    }
}
