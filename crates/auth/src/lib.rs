//! `carta-auth` — pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: it decodes
//! bearer credentials into principals and evaluates access to route targets,
//! nothing else. Client-side decisions here are a UX convenience (fast deny
//! before issuing a doomed request); the authoritative check happens
//! server-side on every API call.

pub mod credential;
pub mod guard;
pub mod principal;
pub mod route;

pub use credential::{DecodeError, decode, try_decode};
pub use guard::{Access, Destination, evaluate};
pub use principal::Principal;
pub use route::{AccessRequirement, RouteTarget, resolve};
