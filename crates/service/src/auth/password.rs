//! Argon2 password hashing with a random per-password salt.

use argon2::{
    password_hash::{Error as HashError, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use rand::rngs::OsRng;

/// Hash `plain` into a PHC string (`$argon2id$...`).
pub fn hash_password(plain: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default().hash_password(plain.as_bytes(), &salt)?.to_string())
}

/// `Ok(false)` on mismatch; `Err` only when the stored hash is malformed.
pub fn verify_password(plain: &str, phc: &str) -> Result<bool, HashError> {
    let parsed = PasswordHash::new(phc)?;
    Ok(Argon2::default().verify_password(plain.as_bytes(), &parsed).is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_salted_and_verifiable() {
        let a = hash_password("pw1").expect("hash");
        let b = hash_password("pw1").expect("hash");
        assert_ne!(a, b);
        assert!(a.starts_with("$argon2"));
        assert!(!a.contains("pw1"));
        assert!(verify_password("pw1", &a).expect("verify"));
        assert!(!verify_password("wrong", &a).expect("verify"));
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("pw1", "pw1").is_err());
    }
}
