use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::auth::service::{AuthConfig, AuthService};
use service::product::repository::{ProductRepository, SeaOrmProductRepository};
use service::product::ProductService;
use service::user::repository::{SeaOrmUserRepository, UserRepository};
use service::user::UserService;

/// Shared handler state; every service sits behind an `Arc`.
#[derive(Clone)]
pub struct ServerState {
    pub users: Arc<UserService>,
    pub products: Arc<ProductService>,
    pub auth: Arc<AuthService>,
}

impl ServerState {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        product_repo: Arc<dyn ProductRepository>,
        auth: AuthConfig,
    ) -> Self {
        Self {
            users: Arc::new(UserService::new(Arc::clone(&user_repo))),
            products: Arc::new(ProductService::new(product_repo)),
            auth: Arc::new(AuthService::new(user_repo, auth)),
        }
    }

    pub fn with_database(db: DatabaseConnection, auth: AuthConfig) -> Self {
        Self::new(
            Arc::new(SeaOrmUserRepository { db: db.clone() }),
            Arc::new(SeaOrmProductRepository { db }),
            auth,
        )
    }
}
