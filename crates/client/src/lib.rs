//! `carta-client` — session and transport layer for the menu administration
//! client.
//!
//! Everything stateful lives here: the credential store, the authentication
//! session, the outgoing-request credential policy, the tenant-scoped API
//! gateway, and navigation with its view-epoch staleness guard. The pure
//! decisions (principal decoding, access control) live in `carta-auth`; this
//! crate wires them to storage and HTTP.

pub mod config;
pub mod epoch;
pub mod error;
pub mod gateway;
pub mod models;
pub mod nav;
pub mod policy;
pub mod session;
pub mod store;

pub use config::ClientConfig;
pub use epoch::{Epoch, EpochToken};
pub use error::ClientError;
pub use gateway::{AdminApi, Gateway, WorkspaceApi};
pub use nav::{Navigation, Navigator};
pub use session::Session;
pub use store::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
