//! Bearer credential decoding.
//!
//! The credential is an opaque signed token of three dot-separated segments;
//! only the claims segment is consumed here. The signature is **not**
//! verified and expiry is **not** checked: trust is delegated to the issuing
//! server, which re-validates the credential on every API call. This layer
//! exists so the client can make fast local decisions (and show who is
//! logged in) without a network round trip.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Deserialize;
use thiserror::Error;

use carta_core::RestaurantSlug;

use crate::Principal;

/// The claim fields this client interprets. Everything else in the claims
/// segment (expiry, subject, issuer data) is opaque here.
#[derive(Debug, Deserialize)]
struct Claims {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    restaurant_slug: Option<String>,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("credential is not a three-segment token")]
    SegmentCount,

    #[error("claims segment is not valid base64url: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("claims segment is not a JSON record: {0}")]
    Claims(#[from] serde_json::Error),
}

/// Decode the claims segment of a credential into a [`Principal`].
///
/// Fails on a wrong segment count, a non-base64url claims segment, or a
/// claims segment that is not a JSON record. A structurally valid record
/// always yields a principal, however unfamiliar its role.
pub fn try_decode(credential: &str) -> Result<Principal, DecodeError> {
    let segments: Vec<&str> = credential.split('.').collect();
    let &[_header, claims, _signature] = segments.as_slice() else {
        return Err(DecodeError::SegmentCount);
    };

    let bytes = URL_SAFE_NO_PAD.decode(claims)?;
    let claims: Claims = serde_json::from_slice(&bytes)?;

    Ok(match claims.role.as_deref() {
        Some("admin") => Principal::Admin,
        Some("manager") => Principal::Manager {
            restaurant_slug: claims.restaurant_slug.map(RestaurantSlug::from),
        },
        _ => Principal::Other { role: claims.role },
    })
}

/// Decode a credential, degrading failures to [`Principal::Anonymous`].
///
/// This is the outward contract of the decoder: it never panics and never
/// surfaces an error. A corrupted credential reads as an anonymous session
/// rather than crashing the client (the failure is logged only).
pub fn decode(credential: &str) -> Principal {
    match try_decode(credential) {
        Ok(principal) => principal,
        Err(err) => {
            tracing::debug!(error = %err, "credential claims did not decode, treating as anonymous");
            Principal::Anonymous
        }
    }
}
