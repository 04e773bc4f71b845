//! Matchpoint - Dating App Backend
//!
//! Backend for a social/dating application: registration, password-based
//! login, member browsing with pagination and filtering, and profile-photo
//! management against an external image-hosting service.
//!
//! # Module Structure
//!
//! - **`auth`** - password digests, the credential manager, session tokens
//!   and the account endpoints
//! - **`members`** - account/photo model, the `UserStore` persistence seam
//!   and the member directory endpoints
//! - **`photos`** - the photo manager (one-main-photo invariant) and the
//!   `ImageHost` seam
//! - **`middleware`** - bearer-token authentication
//! - **`error`** - the typed failure surface and its HTTP rendering
//! - **`config`** / **`state`** / **`router`** - wiring
//!
//! # Security Notes
//!
//! - Passwords are stored as HMAC-SHA512 digests keyed by a per-account
//!   random salt; verification is constant-time.
//! - Login does not distinguish unknown users from wrong passwords.
//! - Session tokens are JWTs carried as bearer credentials.

pub mod auth;
pub mod config;
pub mod error;
pub mod members;
pub mod middleware;
pub mod photos;
pub mod router;
pub mod state;

pub use error::AppError;
pub use state::AppState;
