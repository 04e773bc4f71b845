//! Shared test helpers
//!
//! Builds a full application on the in-memory store with a scriptable
//! image host, and provides registration/login shortcuts.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_test::TestServer;
use bytes::Bytes;
use chrono::{Datelike, Utc};
use serde_json::json;

use matchpoint::auth::tokens::{JwtTokenIssuer, TokenIssuer};
use matchpoint::members::store::{MemoryUserStore, UserStore};
use matchpoint::photos::hosting::{HostedImage, HostingError, ImageHost};
use matchpoint::router::create_router;
use matchpoint::state::AppState;

/// Image host double: counts uploads, records deletes, fails on demand.
#[derive(Default)]
pub struct ScriptedImageHost {
    uploads: AtomicUsize,
    pub fail_uploads: AtomicBool,
    pub fail_deletes: AtomicBool,
    pub deleted: Mutex<Vec<String>>,
}

#[async_trait]
impl ImageHost for ScriptedImageHost {
    async fn upload(&self, _image: Bytes) -> Result<HostedImage, HostingError> {
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(HostingError::Rejected {
                status: 500,
                message: "storage offline".into(),
            });
        }
        let n = self.uploads.fetch_add(1, Ordering::SeqCst);
        Ok(HostedImage {
            url: format!("http://img.test/{n}.jpg"),
            storage_id: format!("img-{n}"),
        })
    }

    async fn delete(&self, storage_id: &str) -> Result<(), HostingError> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(HostingError::Rejected {
                status: 502,
                message: "storage offline".into(),
            });
        }
        self.deleted.lock().unwrap().push(storage_id.to_string());
        Ok(())
    }
}

/// Full application over the in-memory store.
pub fn test_app() -> (TestServer, Arc<ScriptedImageHost>) {
    let store: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
    let host = Arc::new(ScriptedImageHost::default());
    let tokens: Arc<dyn TokenIssuer> = Arc::new(JwtTokenIssuer::new("test-secret", 1));
    let state = AppState::new(store, host.clone(), tokens);

    let server = TestServer::new(create_router(state)).expect("failed to build test server");
    (server, host)
}

pub const TEST_PASSWORD: &str = "pw123456";

/// Registration payload for a member of the given age.
pub fn register_payload(username: &str, gender: &str, age: i32) -> serde_json::Value {
    let today = Utc::now().date_naive();
    // A birthday earlier in the year than today, so the age is exact.
    let date_of_birth = format!("{:04}-01-01", today.year() - age);
    json!({
        "username": username,
        "password": TEST_PASSWORD,
        "known_as": username,
        "gender": gender,
        "date_of_birth": date_of_birth,
        "city": "Lisbon",
        "country": "Portugal",
    })
}

/// Register a member and return their session token.
pub async fn register(server: &TestServer, username: &str, gender: &str, age: i32) -> String {
    let response = server
        .post("/api/account/register")
        .json(&register_payload(username, gender, age))
        .await;
    assert_eq!(
        response.status_code(),
        200,
        "registration of '{username}' failed: {}",
        response.text()
    );
    let body: serde_json::Value = response.json();
    body["token"].as_str().expect("token in response").to_string()
}
