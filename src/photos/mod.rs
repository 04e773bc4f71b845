//! Profile Photos
//!
//! - **`hosting`** - `ImageHost` trait and the HTTP client for the
//!   external image-hosting service
//! - **`manager`** - add/set-main/delete component enforcing the
//!   one-main-photo invariant
//! - **`handlers`** - HTTP handlers for the photo endpoints

pub mod handlers;
pub mod hosting;
pub mod manager;

pub use hosting::{HostedImage, HostingError, HttpImageHost, ImageHost};
pub use manager::PhotoManager;
