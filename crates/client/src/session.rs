//! Authentication state.
//!
//! One `Session` is the explicit context object for a user's sitting:
//! constructed at startup, mutated only by login/logout, read everywhere
//! else. It owns the credential exclusively; the store underneath is a
//! passive persistence surface.

use std::sync::Arc;

use carta_auth::Principal;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::models::LoginResponse;
use crate::store::CredentialStore;

pub struct Session {
    http: reqwest::Client,
    config: ClientConfig,
    store: Arc<dyn CredentialStore>,
}

impl Session {
    pub fn new(config: ClientConfig, store: Arc<dyn CredentialStore>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            store,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The raw stored credential, if any.
    pub(crate) fn credential(&self) -> Option<String> {
        self.store.get()
    }

    /// Exchange username/password for a bearer credential and store it.
    ///
    /// The authentication endpoint expects a form-encoded body. A rejected
    /// login surfaces the server's stated reason verbatim.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), ClientError> {
        let response = self
            .http
            .post(self.config.endpoint("login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ClientError::from_response(response).await);
        }

        let body: LoginResponse = response.json().await?;
        self.store.put(&body.access_token);
        tracing::info!(username, "logged in");
        Ok(())
    }

    /// Destroy the stored credential. Navigation back to the anonymous entry
    /// point is the navigator's job (see [`crate::nav::Navigator::sign_out`]).
    pub fn logout(&self) {
        self.store.clear();
        tracing::info!("logged out");
    }

    /// Credential presence only; no local expiry check. The server is the
    /// authority and rejects stale credentials per call.
    pub fn is_authenticated(&self) -> bool {
        self.store.get().is_some()
    }

    /// Decode the stored credential into a principal.
    ///
    /// An empty store or an undecodable credential reads as
    /// [`Principal::Anonymous`]; a corrupted credential degrades rather than
    /// erroring.
    pub fn principal(&self) -> Principal {
        match self.store.get() {
            Some(credential) => carta_auth::decode(&credential),
            None => Principal::Anonymous,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryCredentialStore;

    fn session_with(store: Arc<dyn CredentialStore>) -> Session {
        Session::new(ClientConfig::new("http://127.0.0.1:9/api/v1"), store)
    }

    fn manager_token(slug: &str) -> String {
        #[derive(serde::Serialize)]
        struct Claims<'a> {
            sub: &'a str,
            role: &'a str,
            restaurant_slug: &'a str,
            exp: u64,
        }

        jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &Claims {
                sub: "roma",
                role: "manager",
                restaurant_slug: slug,
                exp: 4_102_444_800,
            },
            &jsonwebtoken::EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    #[test]
    fn empty_store_reads_as_anonymous() {
        let session = session_with(Arc::new(MemoryCredentialStore::new()));
        assert!(!session.is_authenticated());
        assert_eq!(session.principal(), Principal::Anonymous);
    }

    #[test]
    fn stored_credential_decodes_to_its_principal() {
        let store = Arc::new(MemoryCredentialStore::new());
        store.put(&manager_token("trattoria-roma"));

        let session = session_with(store);
        assert!(session.is_authenticated());
        assert_eq!(
            session.principal().owned_slug().map(|s| s.as_str()),
            Some("trattoria-roma")
        );
    }

    #[test]
    fn corrupted_credential_degrades_to_anonymous_but_counts_as_present() {
        let store = Arc::new(MemoryCredentialStore::new());
        store.put("abc");

        let session = session_with(store);
        // Presence and decodability are separate questions.
        assert!(session.is_authenticated());
        assert_eq!(session.principal(), Principal::Anonymous);
    }

    #[test]
    fn logout_clears_both_views_of_the_state() {
        let store = Arc::new(MemoryCredentialStore::new());
        store.put(&manager_token("trattoria-roma"));

        let session = session_with(store);
        session.logout();

        assert!(!session.is_authenticated());
        assert_eq!(session.principal(), Principal::Anonymous);
    }
}
