//! `carta-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no transport or storage
//! concerns): typed identifiers, the tenant slug, and the domain error model.

pub mod error;
pub mod id;
pub mod slug;

pub use error::{DomainError, DomainResult};
pub use id::{CategoryId, IngredientId, ProductId, RestaurantId};
pub use slug::RestaurantSlug;
