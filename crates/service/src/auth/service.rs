use std::sync::Arc;

use jsonwebtoken::{encode, EncodingKey, Header as JwtHeader};
use tracing::{debug, info, instrument};

use super::domain::{full_name, LoginInput, LoginSession};
use super::errors::AuthError;
use super::password::verify_password;
use crate::user::repository::UserRepository;

/// Auth service configuration
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: Option<String>,
    pub token_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self { Self { jwt_secret: None, token_ttl_hours: 12 } }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub sub: String,
    pub uid: i32,
    pub exp: usize,
}

/// Auth business service independent of web framework
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    cfg: AuthConfig,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, cfg: AuthConfig) -> Self { Self { users, cfg } }

    /// Authenticate a user by exact username and password.
    ///
    /// # Examples
    /// ```
    /// use service::auth::service::{AuthService, AuthConfig};
    /// use service::user::{UserService, domain::NewUser, repository::mock::MockUserRepository};
    /// use service::auth::domain::LoginInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(MockUserRepository::default());
    /// let users = UserService::new(repo.clone());
    /// let alice = NewUser { uname: "alice".into(), password: "pw1".into(), fname: "Alice".into(), lname: Some("A".into()), email: None };
    /// tokio_test::block_on(users.create(alice)).unwrap();
    /// let svc = AuthService::new(repo, AuthConfig::default());
    /// let session = tokio_test::block_on(svc.login(LoginInput { uname: "alice".into(), password: "pw1".into() })).unwrap();
    /// assert_eq!(session.full_name, "Alice A");
    /// assert!(session.token.is_none());
    /// ```
    #[instrument(skip(self, input), fields(uname = %input.uname))]
    pub async fn login(&self, input: LoginInput) -> Result<LoginSession, AuthError> {
        if input.uname.is_empty() || input.password.is_empty() {
            return Err(AuthError::Unauthorized);
        }
        let Some(user) = self.users.find_by_uname(&input.uname).await? else {
            debug!("unknown uname");
            return Err(AuthError::Unauthorized);
        };

        let ok = verify_password(&input.password, &user.password_hash)
            .map_err(|e| AuthError::HashError(e.to_string()))?;
        if !ok {
            debug!(user_id = user.id, "password mismatch");
            return Err(AuthError::Unauthorized);
        }

        let token = match &self.cfg.jwt_secret {
            Some(secret) => Some(self.issue_token(secret, user.id, &user.uname)?),
            None => None,
        };

        info!(user_id = user.id, "user_logged_in");
        Ok(LoginSession {
            user_id: user.id,
            full_name: full_name(&user.fname, user.lname.as_deref()),
            username: user.uname,
            token,
        })
    }

    fn issue_token(&self, secret: &str, user_id: i32, uname: &str) -> Result<String, AuthError> {
        let ttl = self.cfg.token_ttl_hours;
        let exp = chrono::Duration::try_hours(ttl)
            .filter(|d| *d > chrono::Duration::zero())
            .and_then(|d| chrono::Utc::now().checked_add_signed(d))
            .ok_or_else(|| AuthError::TokenError(format!("token ttl of {ttl} hours is out of range")))?
            .timestamp() as usize;
        let claims = Claims { sub: uname.to_string(), uid: user_id, exp };
        encode(&JwtHeader::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
            .map_err(|e| AuthError::TokenError(e.to_string()))
    }
}
