//! # Database module
//!
//! Workspace storage for server functions. Entirely gated behind
//! `#[cfg(feature = "server")]` so client (WASM) builds never pull in reqwest.
//!
//! - [`FirebaseDatabase`]: the Realtime Database over REST, authenticated with the
//!   signed-in user's ID token.
//! - [`Database`]: the store a request uses, either the remote database or a
//!   process-wide [`store::MemoryStore`] when `FIREBASE_DATABASE_URL` is not set.
//! - [`get_backend`]: lazy process-wide [`Backend`] holding configuration, the shared
//!   HTTP client and the identity client.

#[cfg(feature = "server")]
mod backend;
#[cfg(feature = "server")]
mod firebase;

#[cfg(feature = "server")]
pub use backend::{get_backend, Backend, Database};
#[cfg(feature = "server")]
pub use firebase::FirebaseDatabase;
