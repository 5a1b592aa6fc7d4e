//! Authentication module
//!
//! The `Authenticator` is the request interceptor: it logs in lazily on
//! first use, keeps the resulting bearer credential for the rest of the
//! session and optionally mirrors it to a file through `CredentialStore`.

mod authenticator;
mod store;
mod types;

pub use authenticator::{Authenticator, LOGIN_PATH};
pub use store::CredentialStore;
pub use types::{AuthConfig, Credential, ExpiryPolicy};
