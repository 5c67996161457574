//! Black-box tests for the session, credential policy and gateway, run
//! against an ephemeral stub of the collaborating menu API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Form, Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Json};
use axum::routing::{delete, get, post};
use serde_json::json;

use carta_auth::Principal;
use carta_client::{
    ClientConfig, ClientError, CredentialStore, Epoch, Gateway, MemoryCredentialStore, Navigator,
    Session,
};
use carta_core::RestaurantSlug;

const JWT_SECRET: &[u8] = b"stub-secret";

#[derive(serde::Serialize, serde::Deserialize)]
struct StubClaims {
    sub: String,
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    restaurant_slug: Option<String>,
    exp: u64,
}

fn mint_token(role: &str, restaurant_slug: Option<&str>) -> String {
    let claims = StubClaims {
        sub: "stub".into(),
        role: role.into(),
        restaurant_slug: restaurant_slug.map(str::to_owned),
        exp: 4_102_444_800,
    };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(JWT_SECRET),
    )
    .expect("failed to encode stub jwt")
}

fn decode_bearer(headers: &HeaderMap) -> Option<StubClaims> {
    let header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?;
    let mut validation = jsonwebtoken::Validation::default();
    validation.validate_exp = false;
    jsonwebtoken::decode::<StubClaims>(
        token,
        &jsonwebtoken::DecodingKey::from_secret(JWT_SECRET),
        &validation,
    )
    .ok()
    .map(|data| data.claims)
}

/// Every request's Authorization header, keyed by path, for assertions on
/// what the credential policy actually sent.
#[derive(Clone, Default)]
struct Recorded {
    headers: Arc<Mutex<HashMap<String, Vec<Option<String>>>>>,
}

impl Recorded {
    fn record(&self, path: &str, headers: &HeaderMap) {
        let value = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        self.headers
            .lock()
            .unwrap()
            .entry(path.to_owned())
            .or_default()
            .push(value);
    }

    fn seen(&self, path: &str) -> Vec<Option<String>> {
        self.headers
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .unwrap_or_default()
    }
}

async fn stub_login(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Form(form): Form<HashMap<String, String>>,
) -> axum::response::Response {
    recorded.record("login", &headers);

    let username = form.get("username").map(String::as_str);
    let password = form.get("password").map(String::as_str);

    let token = match (username, password) {
        (Some("root"), Some("root-pw")) => mint_token("admin", None),
        (Some("roma"), Some("roma-pw")) => mint_token("manager", Some("trattoria-roma")),
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({"detail": "Incorrect username or password"})),
            )
                .into_response();
        }
    };

    Json(json!({"access_token": token, "token_type": "bearer"})).into_response()
}

async fn stub_list_restaurants(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
) -> axum::response::Response {
    recorded.record("admin/restaurants", &headers);

    let Some(claims) = decode_bearer(&headers) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Could not validate credentials"})),
        )
            .into_response();
    };
    if claims.role != "admin" {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"detail": "Admins only"})),
        )
            .into_response();
    }

    Json(json!([{
        "id": "0192c7a4-5a6e-7f00-8000-000000000001",
        "name": "Trattoria Roma",
        "slug": "trattoria-roma",
        "logo_image": null,
        "username": "roma",
        "is_active": true,
        "created_at": "2025-01-01T12:00:00",
        "updated_at": "2025-01-01T12:00:00"
    }]))
    .into_response()
}

async fn stub_delete_restaurant(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> axum::response::Response {
    recorded.record(&format!("admin/restaurants/{slug}"), &headers);

    if decode_bearer(&headers).is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Could not validate credentials"})),
        )
            .into_response();
    }

    (
        StatusCode::BAD_REQUEST,
        Json(json!({"detail": "Cannot delete restaurant with existing data"})),
    )
        .into_response()
}

async fn stub_list_categories(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> axum::response::Response {
    recorded.record(&format!("restaurants/{slug}/categories"), &headers);

    let Some(claims) = decode_bearer(&headers) else {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Could not validate credentials"})),
        )
            .into_response();
    };
    let owns = claims.role == "admin" || claims.restaurant_slug.as_deref() == Some(slug.as_str());
    if !owns {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({"detail": "Not your restaurant"})),
        )
            .into_response();
    }

    Json(json!([
        {"id": 1, "name": "Antipasti", "image_path": null},
        {"id": 2, "name": "Primi", "image_path": "/media/primi.jpg"}
    ]))
    .into_response()
}

async fn stub_public_menu(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> axum::response::Response {
    recorded.record(&format!("public/menu/{slug}"), &headers);

    Json(json!({
        "setting": {
            "company_name": "Trattoria Roma",
            "logo_path": null,
            "currency_1": "USD",
            "currency_2": "EUR",
            "barcode_image_path": null
        },
        "categories": [{
            "id": 1,
            "name": "Antipasti",
            "image_path": null,
            "products": [{
                "id": 7,
                "name": "Bruschetta",
                "image_path": null,
                "price_currency_1": 6.5,
                "price_currency_2": 6.0,
                "ingredient_names": ["bread", "tomato"]
            }]
        }]
    }))
    .into_response()
}

struct TestServer {
    base_url: String,
    recorded: Recorded,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        let recorded = Recorded::default();

        let api = Router::new()
            .route("/login", post(stub_login))
            .route("/admin/restaurants", get(stub_list_restaurants))
            .route("/admin/restaurants/:slug", delete(stub_delete_restaurant))
            .route("/restaurants/:slug/categories", get(stub_list_categories))
            .route("/public/menu/:slug", get(stub_public_menu))
            .with_state(recorded.clone());
        let app = Router::new().nest("/api/v1", api);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{addr}/api/v1");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            recorded,
            handle,
        }
    }

    fn session(&self) -> Arc<Session> {
        Arc::new(Session::new(
            ClientConfig::new(self.base_url.clone()),
            Arc::new(MemoryCredentialStore::new()),
        ))
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn login_stores_the_credential_and_decodes_the_principal() {
    let srv = TestServer::spawn().await;
    let session = srv.session();

    assert!(!session.is_authenticated());
    session.login("roma", "roma-pw").await.unwrap();

    assert!(session.is_authenticated());
    assert_eq!(
        session.principal(),
        Principal::Manager {
            restaurant_slug: Some(RestaurantSlug::new("trattoria-roma")),
        }
    );
}

#[tokio::test]
async fn rejected_login_surfaces_the_server_reason_verbatim() {
    let srv = TestServer::spawn().await;
    let session = srv.session();

    let err = session.login("roma", "wrong").await.unwrap_err();
    match err {
        ClientError::Rejected(reason) => {
            assert_eq!(reason, "Incorrect username or password");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn tenant_scoped_calls_carry_the_bearer_credential() {
    let srv = TestServer::spawn().await;
    let session = srv.session();
    session.login("roma", "roma-pw").await.unwrap();

    let gateway = Gateway::new(Arc::clone(&session));
    let categories = gateway
        .restaurant(RestaurantSlug::new("trattoria-roma"))
        .list_categories()
        .await
        .unwrap();
    assert_eq!(categories.len(), 2);

    let seen = srv.recorded.seen("restaurants/trattoria-roma/categories");
    assert_eq!(seen.len(), 1);
    let header = seen[0].as_deref().expect("credential must be attached");
    assert!(header.starts_with("Bearer "));
}

#[tokio::test]
async fn the_public_menu_is_requested_bare_even_while_logged_in() {
    let srv = TestServer::spawn().await;
    let session = srv.session();
    session.login("roma", "roma-pw").await.unwrap();

    let gateway = Gateway::new(Arc::clone(&session));
    // A manager peeking at a *different* tenant's public menu must not leak
    // their credential to it either.
    for slug in ["trattoria-roma", "other-slug"] {
        let menu = gateway
            .public_menu(&RestaurantSlug::new(slug))
            .await
            .unwrap();
        assert_eq!(menu.setting.company_name, "Trattoria Roma");

        let seen = srv.recorded.seen(&format!("public/menu/{slug}"));
        assert_eq!(seen, vec![None], "no credential on public/menu/{slug}");
    }
}

#[tokio::test]
async fn unauthorized_responses_map_without_forcing_logout() {
    let srv = TestServer::spawn().await;

    // A forged credential is presence, not validity: the server rejects it.
    let store = Arc::new(MemoryCredentialStore::new());
    store.put("h.e.y");
    let session = Arc::new(Session::new(
        ClientConfig::new(srv.base_url.clone()),
        store,
    ));

    let gateway = Gateway::new(Arc::clone(&session));
    let err = gateway.admin().list().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized));

    // Expiry/forgery is discovered lazily per call; the session is not
    // logged out behind the caller's back.
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn forbidden_responses_map_to_forbidden() {
    let srv = TestServer::spawn().await;
    let session = srv.session();
    session.login("roma", "roma-pw").await.unwrap();

    let gateway = Gateway::new(Arc::clone(&session));
    let err = gateway.admin().list().await.unwrap_err();
    assert!(matches!(err, ClientError::Forbidden));

    let err = gateway
        .restaurant(RestaurantSlug::new("other-slug"))
        .list_categories()
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Forbidden));
}

#[tokio::test]
async fn business_rule_rejections_surface_verbatim() {
    let srv = TestServer::spawn().await;
    let session = srv.session();
    session.login("root", "root-pw").await.unwrap();

    let gateway = Gateway::new(Arc::clone(&session));
    let err = gateway.admin().delete("trattoria-roma").await.unwrap_err();
    match err {
        ClientError::Rejected(reason) => {
            assert_eq!(reason, "Cannot delete restaurant with existing data");
        }
        other => panic!("expected Rejected, got {other:?}"),
    }
}

#[tokio::test]
async fn admin_list_works_end_to_end() {
    let srv = TestServer::spawn().await;
    let session = srv.session();
    session.login("root", "root-pw").await.unwrap();

    let gateway = Gateway::new(Arc::clone(&session));
    let restaurants = gateway.admin().list().await.unwrap();
    assert_eq!(restaurants.len(), 1);
    assert_eq!(restaurants[0].slug, RestaurantSlug::new("trattoria-roma"));
    assert!(restaurants[0].is_active);
}

#[tokio::test]
async fn responses_from_a_left_view_are_discarded() {
    let srv = TestServer::spawn().await;
    let session = srv.session();

    let gateway = Gateway::new(Arc::clone(&session));
    let epoch = Epoch::new();

    let token = epoch.token();
    let menu = gateway
        .public_menu(&RestaurantSlug::new("trattoria-roma"))
        .await
        .unwrap();

    // The user navigated away while the response was in flight.
    epoch.advance();
    assert!(matches!(token.admit(menu), Err(ClientError::Superseded)));
}

#[tokio::test]
async fn a_denied_navigation_never_issues_the_view_request() {
    let srv = TestServer::spawn().await;
    let session = srv.session();
    session.login("roma", "roma-pw").await.unwrap();

    let navigator = Navigator::new(Arc::clone(&session));
    let outcome = navigator.navigate("/restaurant/other-slug/edit");
    assert!(outcome.redirected);
    assert_eq!(outcome.path, "/restaurant");

    // The guard settled before any view existed, so the foreign tenant's
    // endpoints were never touched.
    assert!(srv.recorded.seen("restaurants/other-slug/categories").is_empty());
}
