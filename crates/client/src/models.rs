//! Typed request/response bodies for the menu API.
//!
//! These mirror the collaborating server's JSON shapes. Timestamps arrive as
//! naive ISO strings (the server does not attach an offset), hence
//! [`NaiveDateTime`].

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use carta_core::{CategoryId, IngredientId, ProductId, RestaurantId, RestaurantSlug};

/// Successful authentication response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
}

// ─── Tenant management (admin namespace) ────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub slug: RestaurantSlug,
    pub logo_image: Option<String>,
    pub username: Option<String>,
    pub is_active: bool,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RestaurantDraft {
    pub name: String,
    pub slug: RestaurantSlug,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RestaurantUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

// ─── Tenant-scoped resources ────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub id: i64,
    pub company_name: String,
    pub currency_1: String,
    pub currency_2: String,
    pub rate: f64,
    pub barcode_url: Option<String>,
    pub primary_color: Option<String>,
    pub background_color: Option<String>,
    pub logo_path: Option<String>,
    pub barcode_image_path: Option<String>,
    pub updated_at: Option<NaiveDateTime>,
}

/// The writable subset of [`Settings`]; image paths are server-managed.
#[derive(Debug, Clone, Serialize)]
pub struct SettingsDraft {
    pub company_name: String,
    pub currency_1: String,
    pub currency_2: String,
    pub rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub image_path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CategoryDraft {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ingredient {
    pub id: IngredientId,
    pub name: String,
    pub image_path: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IngredientDraft {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub image_path: Option<String>,
    pub price_currency_1: f64,
    pub price_currency_2: f64,
    #[serde(default)]
    pub category_ids: Vec<CategoryId>,
    #[serde(default)]
    pub ingredient_ids: Vec<IngredientId>,
}

/// The second price is derived server-side from the settings' exchange rate.
#[derive(Debug, Clone, Serialize)]
pub struct ProductDraft {
    pub name: String,
    pub price_currency_1: f64,
    pub category_ids: Vec<CategoryId>,
    pub ingredient_ids: Vec<IngredientId>,
}

// ─── Public menu (anonymous read) ───────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct PublicMenu {
    pub setting: PublicMenuSetting,
    pub categories: Vec<PublicMenuCategory>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublicMenuSetting {
    pub company_name: String,
    pub logo_path: Option<String>,
    pub currency_1: String,
    pub currency_2: String,
    pub barcode_image_path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublicMenuCategory {
    pub id: CategoryId,
    pub name: String,
    pub image_path: Option<String>,
    pub products: Vec<PublicMenuProduct>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublicMenuProduct {
    pub id: ProductId,
    pub name: String,
    pub image_path: Option<String>,
    pub price_currency_1: f64,
    pub price_currency_2: f64,
    #[serde(default)]
    pub ingredient_names: Vec<String>,
}
