use sea_orm::{entity::prelude::*, ColumnTrait, DatabaseConnection, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub const UNAME_MAX_LEN: usize = 64;
pub const NAME_MAX_LEN: usize = 64;
pub const EMAIL_MAX_LEN: usize = 255;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub uname: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub fname: String,
    pub lname: Option<String>,
    pub email: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Column values for an insert or a full overwrite; the password is
/// already hashed by the time it reaches this layer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserDraft {
    pub uname: String,
    pub password_hash: String,
    pub fname: String,
    pub lname: Option<String>,
    pub email: Option<String>,
}

impl UserDraft {
    /// Trim text and collapse blank optionals to `None`.
    pub fn normalize(mut self) -> Self {
        self.uname = self.uname.trim().to_string();
        self.fname = self.fname.trim().to_string();
        self.lname = blank_to_none(self.lname);
        self.email = blank_to_none(self.email);
        self
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        validate_uname(&self.uname)?;
        validate_name("fname", &self.fname)?;
        if let Some(lname) = &self.lname {
            check_len("lname", lname, NAME_MAX_LEN)?;
        }
        if let Some(email) = &self.email {
            validate_email(email)?;
        }
        if self.password_hash.is_empty() {
            return Err(ModelError::Validation("password hash required".into()));
        }
        Ok(())
    }

    fn into_active_model(self, mut am: ActiveModel) -> ActiveModel {
        am.uname = Set(self.uname);
        am.password_hash = Set(self.password_hash);
        am.fname = Set(self.fname);
        am.lname = Set(self.lname);
        am.email = Set(self.email);
        am
    }
}

impl From<Model> for UserDraft {
    fn from(m: Model) -> Self {
        Self { uname: m.uname, password_hash: m.password_hash, fname: m.fname, lname: m.lname, email: m.email }
    }
}

pub fn validate_uname(uname: &str) -> Result<(), ModelError> {
    if uname.trim().is_empty() {
        return Err(ModelError::Validation("uname required".into()));
    }
    check_len("uname", uname, UNAME_MAX_LEN)
}

pub fn validate_name(field: &str, name: &str) -> Result<(), ModelError> {
    if name.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} required")));
    }
    check_len(field, name, NAME_MAX_LEN)
}

pub fn validate_email(email: &str) -> Result<(), ModelError> {
    if !email.contains('@') {
        return Err(ModelError::Validation("invalid email".into()));
    }
    check_len("email", email, EMAIL_MAX_LEN)
}

pub(crate) fn check_len(field: &str, value: &str, max: usize) -> Result<(), ModelError> {
    if value.chars().count() > max {
        return Err(ModelError::Validation(format!("{field} longer than {max} characters")));
    }
    Ok(())
}

pub(crate) fn blank_to_none(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

pub async fn create(db: &DatabaseConnection, draft: UserDraft) -> Result<Model, ModelError> {
    let draft = draft.normalize();
    draft.validate()?;
    let am = draft.into_active_model(ActiveModel { ..Default::default() });
    Ok(am.insert(db).await?)
}

/// Overwrite every column of an existing row.
pub async fn overwrite(db: &DatabaseConnection, id: i32, draft: UserDraft) -> Result<Model, ModelError> {
    let draft = draft.normalize();
    draft.validate()?;
    let am = draft.into_active_model(ActiveModel { id: Set(id), ..Default::default() });
    Ok(am.update(db).await?)
}

pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn find_by_uname(db: &DatabaseConnection, uname: &str) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find().filter(Column::Uname.eq(uname)).one(db).await?)
}

pub async fn list(db: &DatabaseConnection) -> Result<Vec<Model>, ModelError> {
    Ok(Entity::find().order_by_asc(Column::Id).all(db).await?)
}

/// Remove the row; `false` when nothing matched.
pub async fn hard_delete(db: &DatabaseConnection, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(uname: &str) -> UserDraft {
        UserDraft {
            uname: uname.into(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
            fname: "Alice".into(),
            lname: Some("A".into()),
            email: Some("alice@example.com".into()),
        }
    }

    #[test]
    fn normalize_trims_and_drops_blank_optionals() {
        let d = UserDraft { uname: "  alice ".into(), lname: Some("  ".into()), email: Some("".into()), ..draft("x") }.normalize();
        assert_eq!(d.uname, "alice");
        assert_eq!(d.lname, None);
        assert_eq!(d.email, None);
    }

    #[test]
    fn validate_rejects_bad_fields() {
        assert!(draft("alice").validate().is_ok());
        assert!(draft("").validate().is_err());
        assert!(UserDraft { fname: " ".into(), ..draft("alice") }.validate().is_err());
        assert!(UserDraft { email: Some("nope".into()), ..draft("alice") }.validate().is_err());
        assert!(draft(&"u".repeat(UNAME_MAX_LEN + 1)).validate().is_err());
        assert!(UserDraft { password_hash: String::new(), ..draft("alice") }.validate().is_err());
    }

    #[test]
    fn password_hash_is_never_serialized() {
        let m = Model {
            id: 1,
            uname: "alice".into(),
            password_hash: "secret-hash".into(),
            fname: "Alice".into(),
            lname: None,
            email: None,
        };
        let json = serde_json::to_value(&m).expect("serialize");
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["uname"], "alice");
    }

    #[tokio::test]
    async fn user_crud_roundtrip_on_sqlite() -> anyhow::Result<()> {
        let db = crate::db::connect_in_memory().await?;

        let created = create(&db, draft("alice")).await?;
        assert!(created.id > 0);

        let found = find_by_id(&db, created.id).await?.expect("present");
        assert_eq!(found, created);
        let by_name = find_by_uname(&db, "alice").await?.expect("by uname");
        assert_eq!(by_name.id, created.id);

        let updated = overwrite(&db, created.id, UserDraft { fname: "Alicia".into(), ..UserDraft::from(created.clone()) }).await?;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.fname, "Alicia");

        assert!(hard_delete(&db, created.id).await?);
        assert!(!hard_delete(&db, created.id).await?);
        assert!(find_by_id(&db, created.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_uname_is_rejected_by_the_schema() -> anyhow::Result<()> {
        let db = crate::db::connect_in_memory().await?;
        create(&db, draft("bob")).await?;
        let err = create(&db, draft("bob")).await.expect_err("unique violation");
        assert!(matches!(err, ModelError::Conflict(_)), "got {err:?}");
        Ok(())
    }
}
