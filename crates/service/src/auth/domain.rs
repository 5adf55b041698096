use serde::{Deserialize, Serialize};

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginInput {
    #[serde(default, alias = "username")]
    pub uname: String,
    #[serde(default)]
    pub password: String,
}

/// Login result (session)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginSession {
    pub user_id: i32,
    pub username: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// `"{fname} {lname}"`, keeping the separator when the last name is missing.
pub fn full_name(fname: &str, lname: Option<&str>) -> String {
    format!("{} {}", fname, lname.unwrap_or(""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_joins_first_and_last() {
        assert_eq!(full_name("Alice", Some("A")), "Alice A");
        assert_eq!(full_name("Bob", None), "Bob ");
    }

    #[test]
    fn login_input_accepts_username_alias() {
        let input: LoginInput = serde_json::from_str(r#"{"username":"alice","password":"pw1"}"#).expect("parse");
        assert_eq!(input.uname, "alice");
    }
}
