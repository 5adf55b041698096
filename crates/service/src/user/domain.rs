use serde::{Deserialize, Serialize};

/// Sign-up payload. Field aliases accept the older `username` naming.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    #[serde(alias = "username")]
    pub uname: String,
    pub password: String,
    #[serde(alias = "firstName")]
    pub fname: String,
    #[serde(default, alias = "lastName")]
    pub lname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Partial update: absent fields are left untouched; a blank string clears
/// an optional field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, alias = "username")]
    pub uname: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default, alias = "firstName")]
    pub fname: Option<String>,
    #[serde(default, alias = "lastName")]
    pub lname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Public view of a user; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub id: i32,
    pub uname: String,
    pub fname: String,
    pub lname: Option<String>,
    pub email: Option<String>,
}

impl From<models::user::Model> for UserView {
    fn from(m: models::user::Model) -> Self {
        Self { id: m.id, uname: m.uname, fname: m.fname, lname: m.lname, email: m.email }
    }
}
