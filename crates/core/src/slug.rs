//! Tenant slug value type.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// URL-safe unique identifier of a restaurant.
///
/// Slugs are intentionally opaque strings at this layer. Comparison is exact
/// byte equality: no case folding, no Unicode normalization. The guard's
/// tenant-isolation check and the gateway's path construction both rely on
/// the same exact-match semantics, so any normalization must come from the
/// server that mints slugs, never from this client.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestaurantSlug(Cow<'static, str>);

impl RestaurantSlug {
    pub fn new(slug: impl Into<Cow<'static, str>>) -> Self {
        Self(slug.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for RestaurantSlug {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RestaurantSlug {
    fn from(value: &str) -> Self {
        Self(Cow::Owned(value.to_owned()))
    }
}

impl From<String> for RestaurantSlug {
    fn from(value: String) -> Self {
        Self(Cow::Owned(value))
    }
}
