//! In-memory repositories and fixtures for unit tests

use anyhow::Result;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    config::ServerConfig,
    models::{
        ADMIN_ROLE, Category, Image, NewOrder, NewUser, Order, Product, Role, USER_ROLE, User,
    },
    repositories::{
        CategoryRepository, ConstraintViolation, ImageRepository, OrderRepository,
        ProductRepository, RoleRepository, UserRepository,
    },
    security::{password::fast_encoder, remember_me::test_service},
    services::{CartService, CategoryService, OrderService, ProductService, UserService},
    session::{CurrentSession, SessionContext, SessionStore},
    state::AppState,
};

pub const ALICE_PASSWORD: &str = "alice-pw";
pub const ADMIN_PASSWORD: &str = "admin-pw";

#[derive(Default)]
struct Tables {
    roles: Vec<Role>,
    users: Vec<User>,
    categories: Vec<Category>,
    products: Vec<Product>,
    images: Vec<Image>,
    orders: Vec<Order>,
}

/// Every repository backed by vectors behind one lock
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    /// Two roles, two categories, nine products, one image, and the users
    /// `alice` (USER) and `admin` (ADMIN)
    pub async fn seeded() -> Arc<Self> {
        let store = Arc::new(Self::default());
        {
            let mut tables = store.tables.lock().await;
            tables.roles = vec![
                Role {
                    id: 1,
                    name: USER_ROLE.to_string(),
                },
                Role {
                    id: 2,
                    name: ADMIN_ROLE.to_string(),
                },
            ];
            tables.categories = vec![
                Category {
                    id: 1,
                    name: "Stationery".to_string(),
                    rating: Some(4),
                },
                Category {
                    id: 2,
                    name: "Home".to_string(),
                    rating: Some(5),
                },
            ];

            let catalogue = [
                ("Pen", Some("Blue ink ballpoint"), 10.0, 1),
                ("Book", Some("Lined pages"), 5.5, 1),
                ("Pencil", Some("HB graphite"), 1.5, 1),
                ("Eraser", None, 0.5, 1),
                ("Ruler", Some("30 cm"), 2.0, 1),
                ("Stapler", Some("Metal"), 7.0, 1),
                ("Notepad", Some("A5 paper"), 3.0, 1),
                ("Lamp", Some("Desk lamp"), 25.0, 2),
                ("Mug", Some("Ceramic"), 4.0, 2),
            ];
            tables.products = catalogue
                .iter()
                .zip(1..)
                .map(|((name, description, price, category_id), id)| Product {
                    id,
                    name: name.to_string(),
                    description: description.map(str::to_string),
                    price: *price,
                    category_id: *category_id,
                })
                .collect();
            tables.images = vec![Image {
                product_id: 1,
                link: "/img/pen.png".to_string(),
            }];
        }

        let encoder = fast_encoder();
        for (name, password, role_id) in [("alice", ALICE_PASSWORD, 1), ("admin", ADMIN_PASSWORD, 2)] {
            UserRepository::create(
                store.as_ref(),
                &NewUser {
                    name: name.to_string(),
                    password_hash: encoder.encode(password).expect("hash"),
                    email: format!("{}@shop.test", name),
                    birth_date: None,
                    role_id,
                },
            )
            .await
            .expect("seed user");
        }

        store
    }

    pub async fn product_id(&self, name: &str) -> i32 {
        let tables = self.tables.lock().await;
        tables
            .products
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.id)
            .expect("seeded product")
    }

    pub async fn category_id(&self, name: &str) -> i32 {
        let tables = self.tables.lock().await;
        tables
            .categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.id)
            .expect("seeded category")
    }

    pub async fn user_id(&self, name: &str) -> i32 {
        let tables = self.tables.lock().await;
        tables
            .users
            .iter()
            .find(|u| u.name == name)
            .map(|u| u.id)
            .expect("seeded user")
    }

    pub async fn order_count(&self) -> usize {
        self.tables.lock().await.orders.len()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<User>> {
        Ok(self.tables.lock().await.users.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<User>> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.name == name).cloned())
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        let tables = self.tables.lock().await;
        Ok(tables
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(email)))
    }

    async fn create(&self, new_user: &NewUser) -> Result<User> {
        let mut tables = self.tables.lock().await;
        if tables.users.iter().any(|u| u.name == new_user.name) {
            return Err(ConstraintViolation::Unique("users_name_key".into()).into());
        }
        if tables.users.iter().any(|u| u.email == new_user.email) {
            return Err(ConstraintViolation::Unique("users_email_key".into()).into());
        }
        let Some(role) = tables.roles.iter().find(|r| r.id == new_user.role_id).cloned() else {
            return Err(ConstraintViolation::ForeignKey("users_role_id_fkey".into()).into());
        };

        let user = User {
            id: tables.users.len() as i32 + 1,
            name: new_user.name.clone(),
            password_hash: new_user.password_hash.clone(),
            email: new_user.email.clone(),
            birth_date: new_user.birth_date,
            balance: 0.0,
            role,
        };
        tables.users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl RoleRepository for InMemoryStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>> {
        let tables = self.tables.lock().await;
        Ok(tables.roles.iter().find(|r| r.name == name).cloned())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Category>> {
        Ok(self.tables.lock().await.categories.clone())
    }
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn find_all(&self) -> Result<Vec<Product>> {
        Ok(self.tables.lock().await.products.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Product>> {
        let tables = self.tables.lock().await;
        Ok(tables.products.iter().find(|p| p.id == id).cloned())
    }

    async fn find_by_category_id(&self, category_id: i32) -> Result<Vec<Product>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .products
            .iter()
            .filter(|p| p.category_id == category_id)
            .cloned()
            .collect())
    }

    async fn search(&self, key: &str) -> Result<Vec<Product>> {
        let key = key.to_lowercase();
        let tables = self.tables.lock().await;
        Ok(tables
            .products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&key)
                    || p
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&key))
            })
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ImageRepository for InMemoryStore {
    async fn find_by_product_id(&self, product_id: i32) -> Result<Option<Image>> {
        let tables = self.tables.lock().await;
        Ok(tables
            .images
            .iter()
            .find(|i| i.product_id == product_id)
            .cloned())
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn create(&self, new_order: &NewOrder) -> Result<Order> {
        let mut tables = self.tables.lock().await;
        if !tables.users.iter().any(|u| u.id == new_order.user_id) {
            return Err(ConstraintViolation::ForeignKey("orders_user_id_fkey".into()).into());
        }

        let mut products = Vec::with_capacity(new_order.product_ids.len());
        for id in &new_order.product_ids {
            let Some(product) = tables.products.iter().find(|p| p.id == *id) else {
                return Err(
                    ConstraintViolation::ForeignKey("orders_products_product_id_fkey".into())
                        .into(),
                );
            };
            products.push(product.clone());
        }

        // distinct, increasing timestamps keep newest-first ordering stable
        let order = Order {
            id: tables.orders.len() as i32 + 1,
            price: new_order.price,
            created_at: Utc::now() + Duration::seconds(tables.orders.len() as i64),
            user_id: new_order.user_id,
            products,
        };
        tables.orders.push(order.clone());
        Ok(order)
    }

    async fn find_all_by_user_id(&self, user_id: i32) -> Result<Vec<Order>> {
        let tables = self.tables.lock().await;
        let mut orders: Vec<_> = tables
            .orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Order>> {
        let tables = self.tables.lock().await;
        Ok(tables.orders.iter().find(|o| o.id == id).cloned())
    }
}

/// Session store kept in a map
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: Mutex<HashMap<Uuid, SessionContext>>,
}

impl MemorySessionStore {
    pub async fn get(&self, id: Uuid) -> Option<SessionContext> {
        self.sessions.lock().await.get(&id).cloned()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, id: Uuid) -> Result<Option<SessionContext>> {
        Ok(self.get(id).await)
    }

    async fn save(&self, session: &CurrentSession) -> Result<()> {
        self.sessions
            .lock()
            .await
            .insert(session.id, session.context.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        self.sessions.lock().await.remove(&id);
        Ok(())
    }
}

/// Fully wired application state over the in-memory stores
pub struct TestApp {
    pub state: AppState,
    pub store: Arc<InMemoryStore>,
    pub sessions: Arc<MemorySessionStore>,
}

impl TestApp {
    pub async fn new() -> Self {
        let store = InMemoryStore::seeded().await;
        let sessions = Arc::new(MemorySessionStore::default());

        let state = AppState {
            config: Arc::new(ServerConfig::default()),
            category_service: CategoryService::new(store.clone(), store.clone()),
            product_service: ProductService::new(store.clone(), store.clone()),
            cart_service: CartService::new(store.clone()),
            order_service: OrderService::new(store.clone()),
            user_service: UserService::new(store.clone(), store.clone(), fast_encoder()),
            sessions: sessions.clone(),
            remember_me: test_service(),
        };

        Self {
            state,
            store,
            sessions,
        }
    }

    /// Store a session for `user_name` directly and return its ID
    pub async fn signed_in(&self, user_name: &str) -> Uuid {
        let user = self
            .state
            .user_service
            .load_by_username(user_name)
            .await
            .expect("seeded user");
        let session = CurrentSession::with_context(SessionContext {
            user: Some(user),
            ..SessionContext::default()
        });
        self.sessions.save(&session).await.expect("save session");
        session.id
    }
}
