//! Application Error Module
//!
//! Defines the typed failure surface of the core components and its
//! conversion to HTTP responses.
//!
//! - **`types`** - The `AppError` enum and status-code mapping
//! - **`conversion`** - `IntoResponse` implementation

pub mod conversion;
pub mod types;

pub use types::AppError;
