use std::sync::Arc;

use tracing::{info, instrument};

use models::product::{Model, ProductDraft};

use super::domain::{NewProduct, ProductPatch, ProductQuery};
use super::repository::ProductRepository;
use crate::errors::ServiceError;

/// Application service for catalogue products.
pub struct ProductService {
    repo: Arc<dyn ProductRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self { Self { repo } }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: NewProduct) -> Result<Model, ServiceError> {
        let mut draft = ProductDraft {
            name: input.name,
            image: input.image,
            description: input.description,
            price: input.price,
            brand: input.brand,
            part_type: input.part_type,
            bike_model: input.bike_model,
            ..Default::default()
        };
        if let Some(t) = input.product_type {
            draft.product_type = t;
        }
        let created = self.repo.insert(draft).await?;
        info!(product_id = created.id, product_type = %created.product_type, "product_created");
        Ok(created)
    }

    pub async fn list(&self, query: &ProductQuery) -> Result<Vec<Model>, ServiceError> {
        self.repo.list(&query.filter(), query.page_window()).await
    }

    pub async fn get(&self, id: i32) -> Result<Model, ServiceError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("product", id))
    }

    /// Overwrite exactly the supplied fields and re-validate the result.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i32, patch: ProductPatch) -> Result<Model, ServiceError> {
        let existing = self.get(id).await?;
        let mut draft = ProductDraft::from(existing);

        if let Some(name) = patch.name {
            draft.name = name;
        }
        if patch.image.is_some() {
            draft.image = patch.image;
        }
        if patch.description.is_some() {
            draft.description = patch.description;
        }
        if let Some(price) = patch.price {
            draft.price = price;
        }
        if let Some(t) = patch.product_type {
            draft.product_type = t;
        }
        if patch.brand.is_some() {
            draft.brand = patch.brand;
        }
        if patch.part_type.is_some() {
            draft.part_type = patch.part_type;
        }
        if patch.bike_model.is_some() {
            draft.bike_model = patch.bike_model;
        }

        let updated = self.repo.update(id, draft).await?;
        info!(product_id = updated.id, "product_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("product", id));
        }
        info!(product_id = id, "product_deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::repository::{mock::MockProductRepository, SeaOrmProductRepository};
    use crate::test_support::get_db;
    use models::product::{PRODUCT_TYPE_ACCESSORY, PRODUCT_TYPE_SPARE_PART};

    fn bell() -> NewProduct {
        NewProduct {
            name: "Bell".into(),
            image: Some("data:image/png;base64,AAAA".into()),
            description: Some("Loud chrome bell".into()),
            price: 300,
            product_type: None,
            brand: None,
            part_type: None,
            bike_model: None,
        }
    }

    fn brake_pad() -> NewProduct {
        NewProduct {
            name: "Brake Pad".into(),
            price: 2500,
            product_type: Some(PRODUCT_TYPE_SPARE_PART.into()),
            brand: Some("Honda".into()),
            part_type: Some("brake".into()),
            bike_model: Some("cb 150".into()),
            ..bell()
        }
    }

    fn mock_service() -> ProductService {
        ProductService::new(Arc::new(MockProductRepository::default()))
    }

    #[tokio::test]
    async fn create_defaults_to_accessory() {
        let svc = mock_service();
        let p = svc.create(bell()).await.expect("create");
        assert_eq!(p.product_type, PRODUCT_TYPE_ACCESSORY);
        assert_eq!(svc.get(p.id).await.expect("get"), p);
    }

    #[tokio::test]
    async fn spare_part_without_details_is_rejected() {
        let svc = mock_service();
        let res = svc.create(NewProduct { bike_model: None, ..brake_pad() }).await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn update_keeps_unsupplied_fields() {
        let svc = mock_service();
        let p = svc.create(bell()).await.expect("create");
        let updated = svc
            .update(p.id, ProductPatch { price: Some(350), ..Default::default() })
            .await
            .expect("update");
        assert_eq!(updated.id, p.id);
        assert_eq!(updated.price, 350);
        assert_eq!(updated.name, p.name);
        assert_eq!(updated.image, p.image);
        assert_eq!(updated.description, p.description);
    }

    #[tokio::test]
    async fn switching_to_spare_part_requires_details() {
        let svc = mock_service();
        let p = svc.create(bell()).await.expect("create");
        let res = svc
            .update(p.id, ProductPatch { product_type: Some(PRODUCT_TYPE_SPARE_PART.into()), ..Default::default() })
            .await;
        assert!(matches!(res, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let svc = mock_service();
        assert!(matches!(svc.get(9).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.update(9, ProductPatch::default()).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(9).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn list_filters_on_mock_and_sqlite_agree() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let services = [
            mock_service(),
            ProductService::new(Arc::new(SeaOrmProductRepository { db })),
        ];
        for svc in services {
            svc.create(bell()).await?;
            let pad = svc.create(brake_pad()).await?;
            svc.create(NewProduct { name: "Chain".into(), brand: Some("Yamaha".into()), bike_model: Some("fz".into()), ..brake_pad() })
                .await?;

            assert_eq!(svc.list(&ProductQuery::default()).await?.len(), 3);

            let spares = ProductQuery { product_type: Some("spare part".into()), ..Default::default() };
            assert_eq!(svc.list(&spares).await?.len(), 2);

            let honda = ProductQuery { brand: Some("Honda".into()), ..Default::default() };
            assert_eq!(svc.list(&honda).await?, vec![pad.clone()]);

            let search = ProductQuery { q: Some("brake".into()), ..Default::default() };
            assert_eq!(svc.list(&search).await?, vec![pad]);

            for literal in ["%", "_"] {
                let wildcard = ProductQuery { q: Some(literal.into()), ..Default::default() };
                assert!(svc.list(&wildcard).await?.is_empty(), "{literal} matched as a pattern");
            }

            let page = ProductQuery { page: Some(2), per_page: Some(2), ..Default::default() };
            assert_eq!(svc.list(&page).await?.len(), 1);
        }
        Ok(())
    }

    #[tokio::test]
    async fn delete_then_fetch_is_not_found_on_sqlite() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = ProductService::new(Arc::new(SeaOrmProductRepository { db }));
        let p = svc.create(bell()).await?;
        svc.delete(p.id).await?;
        assert!(matches!(svc.get(p.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }
}
