use sea_orm::{
    entity::prelude::*,
    sea_query::{Expr, Func, LikeExpr},
    Condition, DatabaseConnection, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::user::{blank_to_none, check_len};

pub const PRODUCT_TYPE_ACCESSORY: &str = "accessory";
pub const PRODUCT_TYPE_SPARE_PART: &str = "spare part";

pub const NAME_MAX_LEN: usize = 255;
pub const DESCRIPTION_MAX_LEN: usize = 1000;
pub const PRODUCT_TYPE_MAX_LEN: usize = 20;
pub const DETAIL_MAX_LEN: usize = 50;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub image: Option<String>,
    pub description: Option<String>,
    pub price: i32,
    pub product_type: String,
    pub brand: Option<String>,
    pub part_type: Option<String>,
    pub bike_model: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Full set of product columns, before the store assigns an id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub image: Option<String>,
    pub description: Option<String>,
    pub price: i32,
    pub product_type: String,
    pub brand: Option<String>,
    pub part_type: Option<String>,
    pub bike_model: Option<String>,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            image: None,
            description: None,
            price: 0,
            product_type: PRODUCT_TYPE_ACCESSORY.to_string(),
            brand: None,
            part_type: None,
            bike_model: None,
        }
    }
}

impl ProductDraft {
    /// Trim text, default the type, and canonicalise the bike model.
    pub fn normalize(mut self) -> Self {
        self.name = self.name.trim().to_string();
        self.image = self.image.filter(|s| !s.trim().is_empty());
        self.description = blank_to_none(self.description);
        self.product_type = match self.product_type.trim().to_lowercase() {
            t if t.is_empty() => PRODUCT_TYPE_ACCESSORY.to_string(),
            t => t,
        };
        self.brand = blank_to_none(self.brand);
        self.part_type = blank_to_none(self.part_type);
        self.bike_model = blank_to_none(self.bike_model).map(|m| format_bike_model(&m));
        self
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        if self.name.trim().is_empty() {
            return Err(ModelError::Validation("Product name is required".into()));
        }
        check_len("name", &self.name, NAME_MAX_LEN)?;
        if let Some(d) = &self.description {
            check_len("description", d, DESCRIPTION_MAX_LEN)?;
        }
        if self.price <= 0 {
            return Err(ModelError::Validation("Price must be greater than zero".into()));
        }
        check_len("productType", &self.product_type, PRODUCT_TYPE_MAX_LEN)?;
        if self.product_type != PRODUCT_TYPE_ACCESSORY && self.product_type != PRODUCT_TYPE_SPARE_PART {
            return Err(ModelError::Validation(format!(
                "productType must be '{PRODUCT_TYPE_ACCESSORY}' or '{PRODUCT_TYPE_SPARE_PART}'"
            )));
        }
        for (field, value) in [("brand", &self.brand), ("partType", &self.part_type), ("bikeModel", &self.bike_model)] {
            match value {
                Some(v) => check_len(field, v, DETAIL_MAX_LEN)?,
                None if self.product_type == PRODUCT_TYPE_SPARE_PART => {
                    return Err(ModelError::Validation(format!("{field} is required for spare parts")));
                }
                None => {}
            }
        }
        Ok(())
    }

    fn into_active_model(self, mut am: ActiveModel) -> ActiveModel {
        am.name = Set(self.name);
        am.image = Set(self.image);
        am.description = Set(self.description);
        am.price = Set(self.price);
        am.product_type = Set(self.product_type);
        am.brand = Set(self.brand);
        am.part_type = Set(self.part_type);
        am.bike_model = Set(self.bike_model);
        am
    }
}

impl From<Model> for ProductDraft {
    fn from(m: Model) -> Self {
        Self {
            name: m.name,
            image: m.image,
            description: m.description,
            price: m.price,
            product_type: m.product_type,
            brand: m.brand,
            part_type: m.part_type,
            bike_model: m.bike_model,
        }
    }
}

/// Upper-case a bike model and join its words with `-` ("cb 150 r" -> "CB-150-R").
pub fn format_bike_model(model: &str) -> String {
    model.split_whitespace().collect::<Vec<_>>().join("-").to_uppercase()
}

/// Storefront filters; every set field must match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub product_type: Option<String>,
    pub brand: Option<String>,
    pub part_type: Option<String>,
    pub bike_model: Option<String>,
    /// Case-insensitive substring over name and description.
    pub query: Option<String>,
}

impl ProductFilter {
    /// Apply the same normalisation the stored columns went through.
    pub fn normalize(mut self) -> Self {
        self.product_type = blank_to_none(self.product_type).map(|t| t.to_lowercase());
        self.brand = blank_to_none(self.brand);
        self.part_type = blank_to_none(self.part_type);
        self.bike_model = blank_to_none(self.bike_model).map(|m| format_bike_model(&m));
        self.query = blank_to_none(self.query).map(|q| q.to_lowercase());
        self
    }

    pub fn matches(&self, p: &Model) -> bool {
        let eq = |want: &Option<String>, have: Option<&str>| want.as_deref().map_or(true, |w| have == Some(w));
        eq(&self.product_type, Some(p.product_type.as_str()))
            && eq(&self.brand, p.brand.as_deref())
            && eq(&self.part_type, p.part_type.as_deref())
            && eq(&self.bike_model, p.bike_model.as_deref())
            && self.query.as_deref().map_or(true, |q| {
                p.name.to_lowercase().contains(q)
                    || p.description.as_deref().is_some_and(|d| d.to_lowercase().contains(q))
            })
    }

    fn condition(&self) -> Condition {
        let mut cond = Condition::all();
        if let Some(t) = &self.product_type {
            cond = cond.add(Column::ProductType.eq(t.as_str()));
        }
        if let Some(b) = &self.brand {
            cond = cond.add(Column::Brand.eq(b.as_str()));
        }
        if let Some(pt) = &self.part_type {
            cond = cond.add(Column::PartType.eq(pt.as_str()));
        }
        if let Some(m) = &self.bike_model {
            cond = cond.add(Column::BikeModel.eq(m.as_str()));
        }
        if let Some(q) = &self.query {
            let pattern = format!("%{}%", escape_like(q));
            let like = || LikeExpr::new(pattern.clone()).escape('\\');
            cond = cond.add(
                Condition::any()
                    .add(Expr::expr(Func::lower(Expr::col(Column::Name))).like(like()))
                    .add(Expr::expr(Func::lower(Expr::col(Column::Description))).like(like())),
            );
        }
        cond
    }
}

/// Make `%`, `_` and `\` match themselves under `ESCAPE '\'`.
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

pub async fn create(db: &DatabaseConnection, draft: ProductDraft) -> Result<Model, ModelError> {
    let draft = draft.normalize();
    draft.validate()?;
    let am = draft.into_active_model(ActiveModel { ..Default::default() });
    Ok(am.insert(db).await?)
}

pub async fn overwrite(db: &DatabaseConnection, id: i32, draft: ProductDraft) -> Result<Model, ModelError> {
    let draft = draft.normalize();
    draft.validate()?;
    let am = draft.into_active_model(ActiveModel { id: Set(id), ..Default::default() });
    Ok(am.update(db).await?)
}

pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

/// Matching rows ordered by id. `page` is `(zero_based_index, per_page)`.
pub async fn search(
    db: &DatabaseConnection,
    filter: &ProductFilter,
    page: Option<(u64, u64)>,
) -> Result<Vec<Model>, ModelError> {
    let select = Entity::find().filter(filter.condition()).order_by_asc(Column::Id);
    let rows = match page {
        Some((idx, per_page)) => select.paginate(db, per_page).fetch_page(idx).await?,
        None => select.all(db).await?,
    };
    Ok(rows)
}

pub async fn hard_delete(db: &DatabaseConnection, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}
