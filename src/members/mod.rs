//! Members
//!
//! Account/photo domain model, the persistence seam and the member
//! directory endpoints.
//!
//! - **`model`** - `Account`, `Photo` and the client-facing `Member` view
//! - **`store`** - `UserStore` trait plus Postgres and in-memory backends
//! - **`pagination`** - listing parameters and the paged envelope
//! - **`handlers`** - list/get/update HTTP handlers

pub mod handlers;
pub mod model;
pub mod pagination;
pub mod store;

pub use model::{Account, Member, Photo};
pub use store::{MemberQuery, UserStore};
