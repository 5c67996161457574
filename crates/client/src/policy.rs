//! Outgoing-request credential policy.
//!
//! Decides, per API path, whether the bearer credential travels with the
//! request. The rule: attach to everything except the declared public
//! endpoints, so the anonymous menu stays reachable without a credential and
//! a manager's credential never leaks onto another tenant's public surface.
//!
//! Exclusions are matched structurally against registered endpoint
//! templates, never by path suffix: a tenant-scoped path that happens to end
//! in `menu` must still carry the credential.

/// One segment of an endpoint template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment {
    Lit(&'static str),
    /// Matches exactly one non-empty path segment.
    Param,
}

/// Endpoints that are public by design and must be sent without credentials.
const PUBLIC_ENDPOINTS: &[&[Segment]] = &[
    // public/menu/{slug}: the anonymous menu read.
    &[Segment::Lit("public"), Segment::Lit("menu"), Segment::Param],
];

/// Whether `path` (API-relative, e.g. `public/menu/cafe`) is one of the
/// declared public endpoints.
pub fn is_public_endpoint(path: &str) -> bool {
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    PUBLIC_ENDPOINTS.iter().any(|template| {
        template.len() == segments.len()
            && template
                .iter()
                .zip(segments.iter())
                .all(|(expected, actual)| match *expected {
                    Segment::Lit(lit) => lit == *actual,
                    Segment::Param => !actual.is_empty(),
                })
    })
}

/// Whether the credential (if any is present) should be attached to `path`.
pub fn should_attach_credential(path: &str) -> bool {
    !is_public_endpoint(path)
}
