use std::sync::Arc;

use tracing::{info, instrument};

use models::user::UserDraft;

use super::domain::{NewUser, UserPatch, UserView};
use super::repository::UserRepository;
use crate::auth::password::hash_password;
use crate::errors::ServiceError;

/// Application service for user accounts: uniqueness policy, password
/// hashing, and fetch-then-mutate updates.
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self { Self { repo } }

    #[instrument(skip(self, input), fields(uname = %input.uname))]
    pub async fn create(&self, input: NewUser) -> Result<UserView, ServiceError> {
        if input.password.is_empty() {
            return Err(ServiceError::Validation("password required".into()));
        }
        let uname = input.uname.trim().to_string();
        self.ensure_uname_free(&uname, None).await?;

        let draft = UserDraft {
            uname,
            password_hash: hash(&input.password)?,
            fname: input.fname,
            lname: input.lname,
            email: input.email,
        };
        let created = self.repo.insert(draft).await?;
        info!(user_id = created.id, "user_created");
        Ok(created.into())
    }

    pub async fn list(&self) -> Result<Vec<UserView>, ServiceError> {
        Ok(self.repo.list().await?.into_iter().map(UserView::from).collect())
    }

    pub async fn get(&self, id: i32) -> Result<UserView, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .map(UserView::from)
            .ok_or_else(|| ServiceError::not_found("user", id))
    }

    pub async fn get_by_uname(&self, uname: &str) -> Result<Option<UserView>, ServiceError> {
        Ok(self.repo.find_by_uname(uname).await?.map(UserView::from))
    }

    /// Overwrite exactly the supplied fields; the id never changes.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: i32, patch: UserPatch) -> Result<UserView, ServiceError> {
        let existing = self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("user", id))?;
        let mut draft = UserDraft::from(existing);

        if let Some(uname) = patch.uname {
            let uname = uname.trim().to_string();
            if uname != draft.uname {
                self.ensure_uname_free(&uname, Some(id)).await?;
            }
            draft.uname = uname;
        }
        if let Some(password) = patch.password {
            if password.is_empty() {
                return Err(ServiceError::Validation("password must not be empty".into()));
            }
            draft.password_hash = hash(&password)?;
        }
        if let Some(fname) = patch.fname {
            draft.fname = fname;
        }
        if patch.lname.is_some() {
            draft.lname = patch.lname;
        }
        if patch.email.is_some() {
            draft.email = patch.email;
        }

        let updated = self.repo.update(id, draft).await?;
        info!(user_id = updated.id, "user_updated");
        Ok(updated.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("user", id));
        }
        info!(user_id = id, "user_deleted");
        Ok(())
    }

    async fn ensure_uname_free(&self, uname: &str, owner: Option<i32>) -> Result<(), ServiceError> {
        match self.repo.find_by_uname(uname).await? {
            Some(other) if Some(other.id) != owner => {
                Err(ServiceError::Conflict(format!("uname '{uname}' is already taken")))
            }
            _ => Ok(()),
        }
    }
}

fn hash(password: &str) -> Result<String, ServiceError> {
    hash_password(password).map_err(|e| ServiceError::Hash(e.to_string()))
}
