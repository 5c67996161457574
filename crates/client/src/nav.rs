//! Navigation: where the guard meets the session.
//!
//! `navigate` resolves the requested path to a route target, evaluates the
//! access guard against the current principal, and only then hands out the
//! epoch token a view needs to issue requests. The ordering guarantee falls
//! out of the shape: guard evaluation is synchronous and completes before
//! the caller can possibly fire a data request for the entered view.

use std::sync::{Arc, Mutex, PoisonError};

use carta_auth::{Access, Destination};

use crate::epoch::{Epoch, EpochToken};
use crate::session::Session;

pub struct Navigator {
    session: Arc<Session>,
    epoch: Epoch,
    current: Mutex<String>,
}

/// Outcome of one navigation.
#[derive(Debug)]
pub struct Navigation {
    /// Where the navigation actually landed.
    pub path: String,
    /// Whether the guard rerouted the request. Denials are silent: no error,
    /// no notification, just a different landing spot.
    pub redirected: bool,
    /// Epoch token for the entered view; requests issued on behalf of the
    /// view should be admitted through it.
    pub token: EpochToken,
}

impl Navigator {
    pub fn new(session: Arc<Session>) -> Self {
        Self {
            session,
            epoch: Epoch::new(),
            current: Mutex::new("/".to_owned()),
        }
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub fn current_path(&self) -> String {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Evaluate the guard for `path` and move there (or to the guard's
    /// redirect destination). Redirect destinations are safe landing spots
    /// by construction (the login page is unrestricted; the tenant list is
    /// the authenticated home), so they are entered without a second
    /// evaluation.
    pub fn navigate(&self, path: &str) -> Navigation {
        let target = carta_auth::resolve(path);
        let principal = self.session.principal();

        let (landed, redirected) = match carta_auth::evaluate(&target, &principal) {
            Access::Allow => (normalize(path), false),
            Access::Redirect(destination) => {
                tracing::debug!(
                    denied = path,
                    landing = destination.path(),
                    "navigation denied, redirecting"
                );
                (destination.path().to_owned(), true)
            }
        };

        // The previous view (and its in-flight requests) is dead from here.
        self.epoch.advance();

        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        current.clone_from(&landed);

        Navigation {
            path: landed,
            redirected,
            token: self.epoch.token(),
        }
    }

    /// Clear the session and force navigation to the anonymous entry point.
    pub fn sign_out(&self) -> Navigation {
        self.session.logout();
        self.navigate(Destination::Login.path())
    }
}

fn normalize(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_owned()
    } else if trimmed.starts_with('/') {
        trimmed.to_owned()
    } else {
        format!("/{trimmed}")
    }
}
