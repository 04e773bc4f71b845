//! Authentication Handlers
//!
//! HTTP handlers for the public account endpoints.
//!
//! - **`register`** - POST /api/account/register
//! - **`login`** - POST /api/account/login
//!
//! Both return an [`types::AuthResponse`] carrying the session token;
//! everything behind `/api/users` requires that token as a bearer
//! credential.

pub mod login;
pub mod register;
pub mod types;

pub use login::login;
pub use register::register;
pub use types::{AuthResponse, LoginRequest, RegisterRequest};
