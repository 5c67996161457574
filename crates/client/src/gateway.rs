//! Tenant-scoped API gateway.
//!
//! The single surface through which tenant data is read and written. Every
//! operation is parameterized by the tenant slug (except the admin-only
//! tenant-management namespace, which addresses a tenant as the object of
//! the call, and the public menu read, which is anonymous). The gateway
//! performs no authorization itself: it trusts that the guard ran before the
//! calling view existed, and the server re-validates every request.

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use carta_core::{CategoryId, IngredientId, ProductId, RestaurantSlug};

use crate::error::ClientError;
use crate::models::{
    Category, CategoryDraft, Ingredient, IngredientDraft, Product, ProductDraft, PublicMenu,
    Restaurant, RestaurantDraft, RestaurantUpdate, Settings, SettingsDraft,
};
use crate::policy;
use crate::session::Session;

pub struct Gateway {
    session: Arc<Session>,
}

impl Gateway {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// Admin-only tenant management, `admin/restaurants[...]`.
    pub fn admin(&self) -> AdminApi<'_> {
        AdminApi { gateway: self }
    }

    /// One tenant's workspace, `restaurants/{slug}/...`. The slug given here
    /// is the single tenant-isolation key threaded through every call.
    pub fn restaurant(&self, slug: RestaurantSlug) -> WorkspaceApi<'_> {
        WorkspaceApi {
            gateway: self,
            slug,
        }
    }

    /// Anonymous menu read for a tenant. Sent without credentials by policy,
    /// so a logged-in manager previewing another tenant's menu does not leak
    /// their credential to it.
    pub async fn public_menu(&self, slug: &RestaurantSlug) -> Result<PublicMenu, ClientError> {
        self.get(&format!("public/menu/{slug}")).await
    }

    // Request chokepoint: every outgoing call is built here, so the
    // credential policy cannot be bypassed by a new endpoint.
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut request = self
            .session
            .http()
            .request(method, self.session.config().endpoint(path));

        if policy::should_attach_credential(path) {
            if let Some(credential) = self.session.credential() {
                request = request.bearer_auth(credential);
            }
        }

        request
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }
        Ok(response.json().await?)
    }

    async fn execute_unit(&self, request: reqwest::RequestBuilder) -> Result<(), ClientError> {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }
        Ok(())
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.execute(self.request(Method::GET, path)).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.execute(self.request(Method::POST, path).json(body)).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.execute(self.request(Method::PUT, path).json(body)).await
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.execute_unit(self.request(Method::DELETE, path)).await
    }
}

/// Tenant management namespace. Slug-less: the tenant is the object of each
/// call, addressed by slug or id.
pub struct AdminApi<'a> {
    gateway: &'a Gateway,
}

impl AdminApi<'_> {
    pub async fn list(&self) -> Result<Vec<Restaurant>, ClientError> {
        self.gateway.get("admin/restaurants").await
    }

    pub async fn create(&self, draft: &RestaurantDraft) -> Result<Restaurant, ClientError> {
        self.gateway.post("admin/restaurants", draft).await
    }

    pub async fn get(&self, slug_or_id: &str) -> Result<Restaurant, ClientError> {
        self.gateway
            .get(&format!("admin/restaurants/{slug_or_id}"))
            .await
    }

    pub async fn update(
        &self,
        slug_or_id: &str,
        update: &RestaurantUpdate,
    ) -> Result<Restaurant, ClientError> {
        self.gateway
            .put(&format!("admin/restaurants/{slug_or_id}"), update)
            .await
    }

    /// Deleting a tenant that still owns menu data is a business-rule
    /// rejection ([`ClientError::Rejected`]), surfaced verbatim.
    pub async fn delete(&self, slug_or_id: &str) -> Result<(), ClientError> {
        self.gateway
            .delete(&format!("admin/restaurants/{slug_or_id}"))
            .await
    }

    pub async fn toggle_active(&self, slug_or_id: &str) -> Result<Restaurant, ClientError> {
        self.gateway
            .post(
                &format!("admin/restaurants/{slug_or_id}/toggle-active"),
                &serde_json::json!({}),
            )
            .await
    }
}

/// One tenant's slug-scoped workspace.
pub struct WorkspaceApi<'a> {
    gateway: &'a Gateway,
    slug: RestaurantSlug,
}

impl WorkspaceApi<'_> {
    pub fn slug(&self) -> &RestaurantSlug {
        &self.slug
    }

    fn scoped(&self, rest: &str) -> String {
        format!("restaurants/{}/{}", self.slug, rest)
    }

    // Settings

    pub async fn settings(&self) -> Result<Settings, ClientError> {
        self.gateway.get(&self.scoped("settings")).await
    }

    pub async fn save_settings(&self, draft: &SettingsDraft) -> Result<Settings, ClientError> {
        self.gateway.post(&self.scoped("settings"), draft).await
    }

    // Categories

    pub async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        self.gateway.get(&self.scoped("categories")).await
    }

    pub async fn create_category(&self, draft: &CategoryDraft) -> Result<Category, ClientError> {
        self.gateway.post(&self.scoped("categories"), draft).await
    }

    pub async fn update_category(
        &self,
        id: CategoryId,
        draft: &CategoryDraft,
    ) -> Result<Category, ClientError> {
        self.gateway
            .put(&self.scoped(&format!("categories/{id}")), draft)
            .await
    }

    /// Categories with linked products cannot be deleted; the server's
    /// rejection reason comes back as [`ClientError::Rejected`].
    pub async fn delete_category(&self, id: CategoryId) -> Result<(), ClientError> {
        self.gateway
            .delete(&self.scoped(&format!("categories/{id}")))
            .await
    }

    // Ingredients

    pub async fn list_ingredients(&self) -> Result<Vec<Ingredient>, ClientError> {
        self.gateway.get(&self.scoped("ingredients")).await
    }

    pub async fn create_ingredient(
        &self,
        draft: &IngredientDraft,
    ) -> Result<Ingredient, ClientError> {
        self.gateway.post(&self.scoped("ingredients"), draft).await
    }

    pub async fn update_ingredient(
        &self,
        id: IngredientId,
        draft: &IngredientDraft,
    ) -> Result<Ingredient, ClientError> {
        self.gateway
            .put(&self.scoped(&format!("ingredients/{id}")), draft)
            .await
    }

    pub async fn delete_ingredient(&self, id: IngredientId) -> Result<(), ClientError> {
        self.gateway
            .delete(&self.scoped(&format!("ingredients/{id}")))
            .await
    }

    // Products

    pub async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        self.gateway.get(&self.scoped("products")).await
    }

    pub async fn create_product(&self, draft: &ProductDraft) -> Result<Product, ClientError> {
        self.gateway.post(&self.scoped("products"), draft).await
    }

    pub async fn update_product(
        &self,
        id: ProductId,
        draft: &ProductDraft,
    ) -> Result<Product, ClientError> {
        self.gateway
            .put(&self.scoped(&format!("products/{id}")), draft)
            .await
    }

    pub async fn delete_product(&self, id: ProductId) -> Result<(), ClientError> {
        self.gateway
            .delete(&self.scoped(&format!("products/{id}")))
            .await
    }
}
