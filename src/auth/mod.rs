//! Authentication
//!
//! The credential side of the application: password digests, the
//! credential manager, session tokens and the account endpoints.
//!
//! - **`credentials`** - salt generation, HMAC-SHA512 digests, verification
//! - **`manager`** - register/login component over the injected store
//! - **`tokens`** - `TokenIssuer` trait and the JWT implementation
//! - **`handlers`** - HTTP handlers for register and login

pub mod credentials;
pub mod handlers;
pub mod manager;
pub mod tokens;

pub use manager::{CredentialManager, NewAccount};
pub use tokens::{Claims, JwtTokenIssuer, TokenIssuer};
