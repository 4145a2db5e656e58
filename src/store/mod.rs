//! In-memory data behind the mock API.
//!
//! Every operation takes the lock once. Catalog and list reads first sleep the
//! configured latency, outside the lock, to imitate a remote backend.

use std::time::Duration;

use chrono::Utc;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::RwLock;

use crate::{
    dto::favorites::ToggleStatus,
    entity::{products::DEFAULT_SELLER_RATING, users::DEFAULT_ROLE},
    models::{Favorite, Order, OrderStatus, Product, ProductCondition, Review, User},
};

mod seed;

pub(crate) use seed::UNUSABLE_PASSWORD;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Username is already taken")]
    UsernameTaken,

    #[error("Email is already registered")]
    EmailTaken,

    #[error("Product not found")]
    UnknownProduct,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    /// Already hashed.
    pub password: String,
    pub name: String,
    pub campus: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct NewProduct {
    pub title: String,
    pub description: String,
    pub price: String,
    pub condition: ProductCondition,
    pub category: String,
    pub image: String,
    pub seller_id: i32,
    pub seller_name: String,
    pub seller_rating: Option<String>,
}

#[derive(Debug)]
struct Table<T> {
    rows: Vec<T>,
    next_id: i32,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }

    fn insert_with(&mut self, build: impl FnOnce(i32) -> T) -> T {
        let row = build(self.next_id);
        self.next_id += 1;
        self.rows.push(row.clone());
        row
    }
}

#[derive(Debug)]
struct Tables {
    users: Table<User>,
    products: Table<Product>,
    favorites: Table<Favorite>,
    reviews: Table<Review>,
    orders: Table<Order>,
}

impl Tables {
    fn new() -> Self {
        Self {
            users: Table::new(),
            products: Table::new(),
            favorites: Table::new(),
            reviews: Table::new(),
            orders: Table::new(),
        }
    }

    fn add_user(&mut self, user: NewUser) -> Result<User, StoreError> {
        if self.users.rows.iter().any(|u| u.username == user.username) {
            return Err(StoreError::UsernameTaken);
        }
        if self
            .users
            .rows
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(&user.email))
        {
            return Err(StoreError::EmailTaken);
        }

        Ok(self.users.insert_with(|id| User {
            id,
            username: user.username,
            email: user.email,
            password: user.password,
            name: user.name,
            campus: user.campus,
            avatar: user.avatar,
            role: DEFAULT_ROLE.to_string(),
        }))
    }

    /// `base`, or `base` with the smallest numeric suffix no user has taken.
    fn free_username(&self, base: &str) -> String {
        let taken = |name: &str| self.users.rows.iter().any(|u| u.username == name);
        if !taken(base) {
            return base.to_string();
        }
        (1u32..)
            .map(|n| format!("{base}{n}"))
            .find(|candidate| !taken(candidate))
            .unwrap_or_else(|| base.to_string())
    }

    fn add_product(&mut self, product: NewProduct) -> Product {
        self.products.insert_with(|id| Product {
            id,
            title: product.title,
            description: product.description,
            price: product.price,
            condition: product.condition,
            category: product.category,
            image: product.image,
            seller_id: product.seller_id,
            seller_name: product.seller_name,
            seller_rating: product
                .seller_rating
                .unwrap_or_else(|| DEFAULT_SELLER_RATING.to_string()),
        })
    }

    fn has_product(&self, id: i32) -> bool {
        self.products.rows.iter().any(|p| p.id == id)
    }
}

pub struct MockStore {
    tables: RwLock<Tables>,
    latency: Duration,
}

impl MockStore {
    /// An empty store.
    pub fn new(latency: Duration) -> Self {
        Self {
            tables: RwLock::new(Tables::new()),
            latency,
        }
    }

    /// A store preloaded with sample sellers and listings.
    pub fn seeded(latency: Duration) -> Self {
        let mut tables = Tables::new();
        seed::catalog(&mut tables);
        Self {
            tables: RwLock::new(tables),
            latency,
        }
    }

    async fn delay(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    pub async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        self.tables.write().await.add_user(user)
    }

    /// Like [`MockStore::insert_user`], but a taken username gets a numeric
    /// suffix instead of failing. The email must still be unused.
    pub async fn insert_user_with_free_username(
        &self,
        mut user: NewUser,
    ) -> Result<User, StoreError> {
        let mut tables = self.tables.write().await;
        user.username = tables.free_username(&user.username);
        tables.add_user(user)
    }

    pub async fn find_user(&self, id: i32) -> Option<User> {
        let tables = self.tables.read().await;
        tables.users.rows.iter().find(|u| u.id == id).cloned()
    }

    pub async fn find_user_by_email(&self, email: &str) -> Option<User> {
        let tables = self.tables.read().await;
        tables
            .users
            .rows
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    pub async fn list_products(&self) -> Vec<Product> {
        self.delay().await;
        self.tables.read().await.products.rows.clone()
    }

    pub async fn get_product(&self, id: i32) -> Option<Product> {
        self.delay().await;
        let tables = self.tables.read().await;
        tables.products.rows.iter().find(|p| p.id == id).cloned()
    }

    /// Adds the favorite if absent, removes it if present.
    pub async fn toggle_favorite(
        &self,
        user_id: i32,
        product_id: i32,
    ) -> Result<ToggleStatus, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.has_product(product_id) {
            return Err(StoreError::UnknownProduct);
        }

        let favorites = &mut tables.favorites;
        if let Some(pos) = favorites
            .rows
            .iter()
            .position(|f| f.user_id == user_id && f.product_id == product_id)
        {
            favorites.rows.remove(pos);
            return Ok(ToggleStatus::Removed);
        }

        favorites.insert_with(|id| Favorite {
            id,
            user_id,
            product_id,
            created_at: Utc::now(),
        });
        Ok(ToggleStatus::Added)
    }

    pub async fn list_favorites(&self, user_id: i32) -> Vec<Favorite> {
        self.delay().await;
        let tables = self.tables.read().await;
        tables
            .favorites
            .rows
            .iter()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect()
    }

    pub async fn list_reviews(&self, product_id: i32) -> Result<Vec<Review>, StoreError> {
        self.delay().await;
        let tables = self.tables.read().await;
        if !tables.has_product(product_id) {
            return Err(StoreError::UnknownProduct);
        }
        Ok(tables
            .reviews
            .rows
            .iter()
            .filter(|r| r.product_id == product_id)
            .cloned()
            .collect())
    }

    pub async fn insert_review(
        &self,
        product_id: i32,
        user_id: i32,
        rating: i32,
        comment: Option<String>,
    ) -> Result<Review, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.has_product(product_id) {
            return Err(StoreError::UnknownProduct);
        }
        Ok(tables.reviews.insert_with(|id| Review {
            id,
            product_id,
            user_id,
            rating,
            comment,
            created_at: Utc::now(),
        }))
    }

    /// The user's orders, newest first.
    pub async fn list_orders(&self, user_id: i32) -> Vec<Order> {
        self.delay().await;
        let tables = self.tables.read().await;
        let mut orders: Vec<Order> = tables
            .orders
            .rows
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        orders
    }

    pub async fn insert_order(
        &self,
        user_id: i32,
        total: String,
        status: OrderStatus,
        items: Value,
    ) -> Order {
        let mut tables = self.tables.write().await;
        tables.orders.insert_with(|id| Order {
            id,
            user_id,
            total,
            status,
            created_at: Utc::now(),
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn new_user(username: &str, email: &str) -> NewUser {
        NewUser {
            username: username.into(),
            email: email.into(),
            password: "hash".into(),
            name: "Test User".into(),
            campus: "Main Campus".into(),
            avatar: None,
        }
    }

    #[tokio::test]
    async fn user_ids_are_sequential_and_unique_keys_enforced() {
        let store = MockStore::new(Duration::ZERO);
        let first = store.insert_user(new_user("ana", "ana@campus.edu")).await.unwrap();
        let second = store.insert_user(new_user("ben", "ben@campus.edu")).await.unwrap();
        assert_eq!((first.id, second.id), (1, 2));
        assert_eq!(second.role, "student");

        let dup_name = store.insert_user(new_user("ana", "other@campus.edu")).await;
        assert_eq!(dup_name, Err(StoreError::UsernameTaken));

        let dup_email = store.insert_user(new_user("carl", "ANA@campus.edu")).await;
        assert_eq!(dup_email, Err(StoreError::EmailTaken));
    }

    #[tokio::test]
    async fn free_username_takes_next_suffix() {
        let store = MockStore::new(Duration::ZERO);
        store.insert_user(new_user("mchen", "mchen@campus.edu")).await.unwrap();
        store.insert_user(new_user("mchen1", "mchen1@campus.edu")).await.unwrap();

        let user = store
            .insert_user_with_free_username(new_user("mchen", "mchen@gmail.com"))
            .await
            .unwrap();
        assert_eq!(user.username, "mchen2");

        let fresh = store
            .insert_user_with_free_username(new_user("lee", "lee@gmail.com"))
            .await
            .unwrap();
        assert_eq!(fresh.username, "lee");

        let dup_email = store
            .insert_user_with_free_username(new_user("mchen", "MCHEN@gmail.com"))
            .await;
        assert_eq!(dup_email, Err(StoreError::EmailTaken));
    }

    #[tokio::test]
    async fn toggle_alternates_and_ids_keep_growing() {
        let store = MockStore::seeded(Duration::ZERO);
        assert_eq!(store.toggle_favorite(10, 1).await, Ok(ToggleStatus::Added));
        assert_eq!(store.toggle_favorite(10, 1).await, Ok(ToggleStatus::Removed));
        assert_eq!(store.toggle_favorite(10, 1).await, Ok(ToggleStatus::Added));

        let favorites = store.list_favorites(10).await;
        assert_eq!(favorites.len(), 1);
        assert_eq!(favorites[0].id, 2);
    }

    #[tokio::test]
    async fn favorites_and_reviews_need_a_known_product() {
        let store = MockStore::new(Duration::ZERO);
        assert_eq!(store.toggle_favorite(1, 99).await, Err(StoreError::UnknownProduct));
        assert_eq!(store.list_reviews(99).await, Err(StoreError::UnknownProduct));
        assert_eq!(
            store.insert_review(99, 1, 5, None).await,
            Err(StoreError::UnknownProduct)
        );
    }

    #[tokio::test]
    async fn orders_are_listed_newest_first_per_user() {
        let store = MockStore::new(Duration::ZERO);
        let first = store
            .insert_order(1, "10.00".into(), OrderStatus::Processing, json!([]))
            .await;
        let _other = store
            .insert_order(2, "5.00".into(), OrderStatus::Processing, json!([]))
            .await;
        let second = store
            .insert_order(1, "20.00".into(), OrderStatus::Shipped, json!([{ "productId": 3 }]))
            .await;

        let ids: Vec<i32> = store.list_orders(1).await.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn seeded_catalog_is_valid() {
        use crate::validation::Validate;

        let store = MockStore::seeded(Duration::ZERO);
        let products = store.list_products().await;
        assert!(!products.is_empty());
        products.validate().expect("seed listings pass product rules");
        for product in &products {
            let seller = store.find_user(product.seller_id).await.expect("seller exists");
            assert_eq!(seller.name, product.seller_name);
        }
    }
}
