/**
 * Postgres User Store
 *
 * sqlx-backed `UserStore`. Accounts live in the `users` table, photos in
 * `photos` with a `sort_order` column preserving insertion order. `save`
 * rewrites the account and its photo rows in a single transaction, so a
 * failed save leaves the previously persisted state intact.
 */

use async_trait::async_trait;
use chrono::{DateTime, Days, Months, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::members::model::{Account, Photo};
use crate::members::pagination::{OrderBy, Page};
use crate::members::store::{MemberQuery, UserStore};

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn load_photos(&self, user_ids: &[Uuid]) -> Result<Vec<PhotoRow>, AppError> {
        let rows = sqlx::query_as::<_, PhotoRow>(
            r#"
            SELECT id, user_id, url, storage_id, is_main
            FROM photos
            WHERE user_id = ANY($1)
            ORDER BY sort_order
            "#,
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn assemble(&self, row: Option<UserRow>) -> Result<Option<Account>, AppError> {
        let Some(row) = row else {
            return Ok(None);
        };
        let photos = self.load_photos(&[row.id]).await?;
        Ok(Some(row.into_account(photos)))
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    password_digest: Vec<u8>,
    password_salt: Vec<u8>,
    known_as: String,
    gender: String,
    date_of_birth: NaiveDate,
    city: String,
    country: String,
    introduction: Option<String>,
    looking_for: Option<String>,
    interests: Option<String>,
    created_at: DateTime<Utc>,
    last_active: DateTime<Utc>,
}

impl UserRow {
    fn into_account(self, photos: Vec<PhotoRow>) -> Account {
        Account {
            id: self.id,
            username: self.username,
            password_digest: self.password_digest,
            password_salt: self.password_salt,
            known_as: self.known_as,
            gender: self.gender,
            date_of_birth: self.date_of_birth,
            city: self.city,
            country: self.country,
            introduction: self.introduction,
            looking_for: self.looking_for,
            interests: self.interests,
            created_at: self.created_at,
            last_active: self.last_active,
            photos: photos
                .into_iter()
                .filter(|p| p.user_id == self.id)
                .map(PhotoRow::into_photo)
                .collect(),
        }
    }
}

#[derive(Clone, sqlx::FromRow)]
struct PhotoRow {
    id: Uuid,
    user_id: Uuid,
    url: String,
    storage_id: Option<String>,
    is_main: bool,
}

impl PhotoRow {
    fn into_photo(self) -> Photo {
        Photo {
            id: self.id,
            url: self.url,
            storage_id: self.storage_id,
            is_main: self.is_main,
        }
    }
}

const SELECT_USER: &str = r#"
    SELECT id, username, password_digest, password_salt, known_as, gender,
           date_of_birth, city, country, introduction, looking_for, interests,
           created_at, last_active
    FROM users
"#;

/// Date `years` whole years before today.
fn years_ago(years: u32) -> NaiveDate {
    let today = Utc::now().date_naive();
    today
        .checked_sub_months(Months::new(12 * years))
        .unwrap_or(today)
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE username = $1"))
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;
        self.assemble(row).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(&format!("{SELECT_USER} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        self.assemble(row).await
    }

    async fn exists(&self, username: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }

    async fn save(&self, account: &Account) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO users (id, username, password_digest, password_salt, known_as,
                               gender, date_of_birth, city, country, introduction,
                               looking_for, interests, created_at, last_active)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            ON CONFLICT (id) DO UPDATE SET
                known_as = EXCLUDED.known_as,
                gender = EXCLUDED.gender,
                date_of_birth = EXCLUDED.date_of_birth,
                city = EXCLUDED.city,
                country = EXCLUDED.country,
                introduction = EXCLUDED.introduction,
                looking_for = EXCLUDED.looking_for,
                interests = EXCLUDED.interests,
                last_active = EXCLUDED.last_active
            "#,
        )
        .bind(account.id)
        .bind(&account.username)
        .bind(&account.password_digest)
        .bind(&account.password_salt)
        .bind(&account.known_as)
        .bind(&account.gender)
        .bind(account.date_of_birth)
        .bind(&account.city)
        .bind(&account.country)
        .bind(&account.introduction)
        .bind(&account.looking_for)
        .bind(&account.interests)
        .bind(account.created_at)
        .bind(account.last_active)
        .execute(&mut *tx)
        .await?;

        // Photos are rewritten wholesale; ids are assigned in code so they
        // stay stable across saves.
        sqlx::query("DELETE FROM photos WHERE user_id = $1")
            .bind(account.id)
            .execute(&mut *tx)
            .await?;

        for (position, photo) in account.photos.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO photos (id, user_id, url, storage_id, is_main, sort_order)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(photo.id)
            .bind(account.id)
            .bind(&photo.url)
            .bind(&photo.storage_id)
            .bind(photo.is_main)
            .bind(position as i32)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| AppError::persistence(e.to_string()))?;
        Ok(())
    }

    async fn list_members(&self, query: &MemberQuery) -> Result<Page<Account>, AppError> {
        // Translate the age range into date-of-birth bounds.
        let max_dob = years_ago(query.min_age as u32);
        let min_dob = years_ago(query.max_age as u32 + 1)
            .checked_add_days(Days::new(1))
            .unwrap_or(max_dob);

        let filter = r#"
            WHERE username <> $1
              AND gender = $2
              AND date_of_birth BETWEEN $3 AND $4
        "#;

        let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM users {filter}"))
            .bind(&query.exclude_username)
            .bind(&query.gender)
            .bind(min_dob)
            .bind(max_dob)
            .fetch_one(&self.pool)
            .await?;

        let order_column = match query.order_by {
            OrderBy::Created => "created_at",
            OrderBy::LastActive => "last_active",
        };
        let offset = (query.page_number - 1) as i64 * query.page_size as i64;

        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "{SELECT_USER} {filter} ORDER BY {order_column} DESC LIMIT $5 OFFSET $6"
        ))
        .bind(&query.exclude_username)
        .bind(&query.gender)
        .bind(min_dob)
        .bind(max_dob)
        .bind(query.page_size as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();
        let photos = self.load_photos(&ids).await?;

        let items: Vec<Account> = rows
            .into_iter()
            .map(|row| {
                let own: Vec<PhotoRow> = photos
                    .iter()
                    .filter(|p| p.user_id == row.id)
                    .cloned()
                    .collect();
                row.into_account(own)
            })
            .collect();

        Ok(Page::new(
            items,
            total as u64,
            query.page_number,
            query.page_size,
        ))
    }
}
