/**
 * Account and Photo Models
 *
 * Domain entities shared by the credential manager, the photo manager and
 * the member directory, plus the member-facing DTOs returned by the API.
 *
 * # Invariants
 *
 * - `username` is stored lower-cased and is unique case-insensitively.
 * - `password_digest` can only be verified with this account's own
 *   `password_salt` (the salt is the HMAC key).
 * - At most one photo has `is_main == true`; exactly one whenever the
 *   account owns at least one photo.
 */

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A profile photo owned by exactly one account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    /// Unique photo ID, assigned at construction and stable for the
    /// lifetime of the photo.
    pub id: Uuid,
    /// Remote URL served by the image-hosting collaborator.
    pub url: String,
    /// Identifier under which the image is stored remotely. Absent for
    /// photos that were never pushed to the hosting collaborator.
    pub storage_id: Option<String>,
    /// Whether this is the account's main (display) photo.
    pub is_main: bool,
}

impl Photo {
    pub fn new(url: String, storage_id: Option<String>, is_main: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            url,
            storage_id,
            is_main,
        }
    }
}

/// A registered account.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: Uuid,
    /// Lower-cased, unique username.
    pub username: String,
    /// HMAC-SHA512 digest of the password, keyed by `password_salt`.
    pub password_digest: Vec<u8>,
    /// Per-account random salt generated at registration.
    pub password_salt: Vec<u8>,
    /// Display name.
    pub known_as: String,
    pub gender: String,
    pub date_of_birth: NaiveDate,
    pub city: String,
    pub country: String,
    pub introduction: Option<String>,
    pub looking_for: Option<String>,
    pub interests: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    pub photos: Vec<Photo>,
}

impl Account {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        username: String,
        password_digest: Vec<u8>,
        password_salt: Vec<u8>,
        known_as: String,
        gender: String,
        date_of_birth: NaiveDate,
        city: String,
        country: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            password_digest,
            password_salt,
            known_as,
            gender,
            date_of_birth,
            city,
            country,
            introduction: None,
            looking_for: None,
            interests: None,
            created_at: now,
            last_active: now,
            photos: Vec::new(),
        }
    }

    /// Age in whole years as of today.
    pub fn age(&self) -> i32 {
        let today = Utc::now().date_naive();
        let mut age = today.year() - self.date_of_birth.year();
        if (today.month(), today.day()) < (self.date_of_birth.month(), self.date_of_birth.day()) {
            age -= 1;
        }
        age
    }

    /// The account's main photo, if it owns any photos.
    pub fn main_photo(&self) -> Option<&Photo> {
        self.photos.iter().find(|p| p.is_main)
    }

    pub fn photo(&self, photo_id: Uuid) -> Option<&Photo> {
        self.photos.iter().find(|p| p.id == photo_id)
    }

    /// Number of photos flagged as main. Valid states are 0 (no photos)
    /// and 1 (at least one photo).
    pub fn main_photo_count(&self) -> usize {
        self.photos.iter().filter(|p| p.is_main).count()
    }
}

/// Member view of an account, safe to return to clients.
///
/// Never carries the password digest or salt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: Uuid,
    pub username: String,
    pub known_as: String,
    pub age: i32,
    pub gender: String,
    pub city: String,
    pub country: String,
    pub introduction: Option<String>,
    pub looking_for: Option<String>,
    pub interests: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
    /// URL of the main photo, if any.
    pub photo_url: Option<String>,
    pub photos: Vec<Photo>,
}

impl From<&Account> for Member {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            known_as: account.known_as.clone(),
            age: account.age(),
            gender: account.gender.clone(),
            city: account.city.clone(),
            country: account.country.clone(),
            introduction: account.introduction.clone(),
            looking_for: account.looking_for.clone(),
            interests: account.interests.clone(),
            created_at: account.created_at,
            last_active: account.last_active,
            photo_url: account.main_photo().map(|p| p.url.clone()),
            photos: account.photos.clone(),
        }
    }
}
