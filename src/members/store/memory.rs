/**
 * In-Memory User Store
 *
 * Map-backed `UserStore` used by the test suites and as the fallback when
 * `DATABASE_URL` is not configured. Accounts are keyed by their
 * lower-cased username; callers normalize before calling in.
 */

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::AppError;
use crate::members::model::Account;
use crate::members::pagination::{OrderBy, Page};
use crate::members::store::{MemberQuery, UserStore};

#[derive(Default)]
pub struct MemoryUserStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AppError> {
        Ok(self.accounts.read().await.get(username).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AppError> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn exists(&self, username: &str) -> Result<bool, AppError> {
        Ok(self.accounts.read().await.contains_key(username))
    }

    async fn save(&self, account: &Account) -> Result<(), AppError> {
        self.accounts
            .write()
            .await
            .insert(account.username.clone(), account.clone());
        Ok(())
    }

    async fn list_members(&self, query: &MemberQuery) -> Result<Page<Account>, AppError> {
        let accounts = self.accounts.read().await;

        let mut matches: Vec<Account> = accounts
            .values()
            .filter(|a| a.username != query.exclude_username)
            .filter(|a| a.gender == query.gender)
            .filter(|a| {
                let age = a.age();
                age >= query.min_age as i32 && age <= query.max_age as i32
            })
            .cloned()
            .collect();

        match query.order_by {
            OrderBy::Created => matches.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            OrderBy::LastActive => matches.sort_by(|a, b| b.last_active.cmp(&a.last_active)),
        }

        let total = matches.len() as u64;
        // Widen before multiplying; page_number * page_size can exceed u32.
        let offset = (query.page_number as u64 - 1) * query.page_size as u64;
        let items: Vec<Account> = matches
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(query.page_size as usize)
            .collect();

        Ok(Page::new(items, total, query.page_number, query.page_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Duration, NaiveDate, Utc};

    fn member(username: &str, gender: &str, birth_year: i32) -> Account {
        Account::new(
            username.to_string(),
            vec![1u8; 64],
            vec![2u8; 64],
            username.to_string(),
            gender.to_string(),
            NaiveDate::from_ymd_opt(birth_year, 1, 1).unwrap(),
            "Lisbon".to_string(),
            "Portugal".to_string(),
        )
    }

    fn query(gender: &str) -> MemberQuery {
        MemberQuery {
            exclude_username: "caller".to_string(),
            gender: gender.to_string(),
            min_age: 18,
            max_age: 150,
            order_by: OrderBy::LastActive,
            page_number: 1,
            page_size: 10,
        }
    }

    #[tokio::test]
    async fn test_save_then_find() {
        let store = MemoryUserStore::new();
        store.save(&member("alice", "female", 1995)).await.unwrap();

        let found = store.find_by_username("alice").await.unwrap();
        assert_eq!(found.unwrap().username, "alice");
        assert!(store.find_by_username("bob").await.unwrap().is_none());
        assert!(store.exists("alice").await.unwrap());
        assert!(!store.exists("bob").await.unwrap());
    }

    #[tokio::test]
    async fn test_save_is_an_upsert() {
        let store = MemoryUserStore::new();
        let mut alice = member("alice", "female", 1995);
        store.save(&alice).await.unwrap();

        alice.city = "Porto".to_string();
        store.save(&alice).await.unwrap();

        let found = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(found.city, "Porto");
        assert_eq!(found.id, alice.id);
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let store = MemoryUserStore::new();
        let alice = member("alice", "female", 1995);
        store.save(&alice).await.unwrap();

        let found = store.find_by_id(alice.id).await.unwrap();
        assert_eq!(found.unwrap().username, "alice");
        assert!(store.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_filters_by_gender_and_excludes_caller() {
        let store = MemoryUserStore::new();
        store.save(&member("caller", "male", 1990)).await.unwrap();
        store.save(&member("bob", "male", 1990)).await.unwrap();
        store.save(&member("alice", "female", 1995)).await.unwrap();

        let page = store.list_members(&query("male")).await.unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].username, "bob");
    }

    #[tokio::test]
    async fn test_list_filters_by_age_range() {
        let store = MemoryUserStore::new();
        let this_year = Utc::now().date_naive().year();
        store
            .save(&member("young", "female", this_year - 20))
            .await
            .unwrap();
        store
            .save(&member("older", "female", this_year - 50))
            .await
            .unwrap();

        let mut q = query("female");
        q.min_age = 30;
        let page = store.list_members(&q).await.unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].username, "older");

        q.min_age = 18;
        q.max_age = 30;
        let page = store.list_members(&q).await.unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].username, "young");
    }

    #[tokio::test]
    async fn test_list_orders_most_recent_first() {
        let store = MemoryUserStore::new();
        let mut first = member("first", "female", 1990);
        let mut second = member("second", "female", 1990);
        first.last_active = Utc::now() - Duration::hours(2);
        second.last_active = Utc::now() - Duration::hours(1);
        store.save(&first).await.unwrap();
        store.save(&second).await.unwrap();

        let page = store.list_members(&query("female")).await.unwrap();
        assert_eq!(page.items[0].username, "second");
        assert_eq!(page.items[1].username, "first");
    }

    #[tokio::test]
    async fn test_list_paginates() {
        let store = MemoryUserStore::new();
        for i in 0..5 {
            let mut m = member(&format!("m{i}"), "female", 1990);
            m.last_active = Utc::now() - Duration::hours(i);
            store.save(&m).await.unwrap();
        }

        let mut q = query("female");
        q.page_size = 2;
        q.page_number = 2;
        let page = store.list_members(&q).await.unwrap();
        assert_eq!(page.total_count, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].username, "m2");

        q.page_number = 3;
        let page = store.list_members(&q).await.unwrap();
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn test_list_survives_huge_page_numbers() {
        let store = MemoryUserStore::new();
        store.save(&member("alice", "female", 1990)).await.unwrap();

        let mut q = query("female");
        q.page_number = 100_000_000;
        q.page_size = 50;
        let page = store.list_members(&q).await.unwrap();
        assert_eq!(page.total_count, 1);
        assert!(page.items.is_empty());
    }
}
