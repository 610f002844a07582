//! Authentication: Firebase identity, Google OAuth and session storage.

#[cfg(feature = "server")]
mod config;
#[cfg(feature = "server")]
mod google;
#[cfg(feature = "server")]
mod identity;
#[cfg(feature = "server")]
pub mod session;

#[cfg(feature = "server")]
pub use config::{FirebaseConfig, OAuthConfig};
#[cfg(feature = "server")]
pub use google::{AuthRequest, GoogleOAuth};
#[cfg(feature = "server")]
pub use identity::{describe_auth_error, AuthTokens, IdentityClient, RefreshedTokens};
#[cfg(feature = "server")]
pub use session::{SessionData, OAUTH_STATE_KEY, PKCE_VERIFIER_KEY, SESSION_AUTH_KEY};
