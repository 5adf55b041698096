use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::user::{Model, UserDraft};

use crate::errors::ServiceError;

/// Persistence seam for users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Model>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Model>, ServiceError>;
    async fn find_by_uname(&self, uname: &str) -> Result<Option<Model>, ServiceError>;
    async fn insert(&self, draft: UserDraft) -> Result<Model, ServiceError>;
    async fn update(&self, id: i32, draft: UserDraft) -> Result<Model, ServiceError>;
    /// `false` when no row matched.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmUserRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn list(&self) -> Result<Vec<Model>, ServiceError> {
        Ok(models::user::list(&self.db).await?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Model>, ServiceError> {
        Ok(models::user::find_by_id(&self.db, id).await?)
    }

    async fn find_by_uname(&self, uname: &str) -> Result<Option<Model>, ServiceError> {
        Ok(models::user::find_by_uname(&self.db, uname).await?)
    }

    async fn insert(&self, draft: UserDraft) -> Result<Model, ServiceError> {
        Ok(models::user::create(&self.db, draft).await?)
    }

    async fn update(&self, id: i32, draft: UserDraft) -> Result<Model, ServiceError> {
        Ok(models::user::overwrite(&self.db, id, draft).await?)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(models::user::hard_delete(&self.db, id).await?)
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, PoisonError};

    #[derive(Default)]
    pub struct MockUserRepository {
        rows: Mutex<BTreeMap<i32, Model>>,
        next_id: Mutex<i32>,
    }

    impl MockUserRepository {
        fn to_model(id: i32, draft: UserDraft) -> Result<Model, ServiceError> {
            let d = draft.normalize();
            d.validate()?;
            Ok(Model { id, uname: d.uname, password_hash: d.password_hash, fname: d.fname, lname: d.lname, email: d.email })
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn list(&self) -> Result<Vec<Model>, ServiceError> {
            let rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
            Ok(rows.values().cloned().collect())
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<Model>, ServiceError> {
            let rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
            Ok(rows.get(&id).cloned())
        }

        async fn find_by_uname(&self, uname: &str) -> Result<Option<Model>, ServiceError> {
            let rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
            Ok(rows.values().find(|u| u.uname == uname).cloned())
        }

        async fn insert(&self, draft: UserDraft) -> Result<Model, ServiceError> {
            let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
            let mut next = self.next_id.lock().unwrap_or_else(PoisonError::into_inner);
            let model = Self::to_model(*next + 1, draft)?;
            if rows.values().any(|u| u.uname == model.uname) {
                return Err(ServiceError::Conflict("uname already taken".into()));
            }
            *next += 1;
            rows.insert(model.id, model.clone());
            Ok(model)
        }

        async fn update(&self, id: i32, draft: UserDraft) -> Result<Model, ServiceError> {
            let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
            if !rows.contains_key(&id) {
                return Err(ServiceError::not_found("user", id));
            }
            let model = Self::to_model(id, draft)?;
            rows.insert(id, model.clone());
            Ok(model)
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
            Ok(rows.remove(&id).is_some())
        }
    }
}
