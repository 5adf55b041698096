use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::product::{Model, ProductDraft, ProductFilter};

use crate::errors::ServiceError;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Matching rows ordered by id; `page` is `(zero_based_index, per_page)`.
    async fn list(&self, filter: &ProductFilter, page: Option<(u64, u64)>) -> Result<Vec<Model>, ServiceError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Model>, ServiceError>;
    async fn insert(&self, draft: ProductDraft) -> Result<Model, ServiceError>;
    async fn update(&self, id: i32, draft: ProductDraft) -> Result<Model, ServiceError>;
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn list(&self, filter: &ProductFilter, page: Option<(u64, u64)>) -> Result<Vec<Model>, ServiceError> {
        Ok(models::product::search(&self.db, filter, page).await?)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Model>, ServiceError> {
        Ok(models::product::find_by_id(&self.db, id).await?)
    }

    async fn insert(&self, draft: ProductDraft) -> Result<Model, ServiceError> {
        Ok(models::product::create(&self.db, draft).await?)
    }

    async fn update(&self, id: i32, draft: ProductDraft) -> Result<Model, ServiceError> {
        Ok(models::product::overwrite(&self.db, id, draft).await?)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(models::product::hard_delete(&self.db, id).await?)
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::{Mutex, PoisonError};

    #[derive(Default)]
    pub struct MockProductRepository {
        rows: Mutex<BTreeMap<i32, Model>>,
        next_id: Mutex<i32>,
    }

    fn to_model(id: i32, draft: ProductDraft) -> Result<Model, ServiceError> {
        let d = draft.normalize();
        d.validate()?;
        Ok(Model {
            id,
            name: d.name,
            image: d.image,
            description: d.description,
            price: d.price,
            product_type: d.product_type,
            brand: d.brand,
            part_type: d.part_type,
            bike_model: d.bike_model,
        })
    }

    #[async_trait]
    impl ProductRepository for MockProductRepository {
        async fn list(&self, filter: &ProductFilter, page: Option<(u64, u64)>) -> Result<Vec<Model>, ServiceError> {
            let rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
            let matching = rows.values().filter(|p| filter.matches(p)).cloned();
            Ok(match page {
                Some((idx, per_page)) => matching.skip((idx * per_page) as usize).take(per_page as usize).collect(),
                None => matching.collect(),
            })
        }

        async fn find_by_id(&self, id: i32) -> Result<Option<Model>, ServiceError> {
            let rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
            Ok(rows.get(&id).cloned())
        }

        async fn insert(&self, draft: ProductDraft) -> Result<Model, ServiceError> {
            let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
            let mut next = self.next_id.lock().unwrap_or_else(PoisonError::into_inner);
            let model = to_model(*next + 1, draft)?;
            *next += 1;
            rows.insert(model.id, model.clone());
            Ok(model)
        }

        async fn update(&self, id: i32, draft: ProductDraft) -> Result<Model, ServiceError> {
            let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
            if !rows.contains_key(&id) {
                return Err(ServiceError::not_found("product", id));
            }
            let model = to_model(id, draft)?;
            rows.insert(id, model.clone());
            Ok(model)
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
            Ok(rows.remove(&id).is_some())
        }
    }
}
