use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand_core::OsRng;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password cannot be empty")]
    Empty,

    #[error("password hashing failed: {0}")]
    HashError(String),

    #[error("stored password hash is invalid: {0}")]
    InvalidHash(String),
}

/// Hashes a plain-text password with argon2 default parameters and a random salt.
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    if password.is_empty() {
        return Err(PasswordError::Empty);
    }

    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(e.to_string()))?;

    Ok(hash.to_string())
}

/// Checks `password` against a stored argon2 hash. A mismatch is `Ok(false)`,
/// only a malformed hash or an argon2 failure is an error.
pub fn verify_password(password_hash: &str, password: &str) -> Result<bool, PasswordError> {
    if password.is_empty() {
        return Ok(false);
    }

    let parsed_hash =
        PasswordHash::new(password_hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::HashError(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_verify_password() {
        let hash = hash_password("correct horse").unwrap();

        assert!(verify_password(&hash, "correct horse").unwrap());
        assert!(!verify_password(&hash, "battery staple").unwrap());
    }

    #[tokio::test]
    async fn test_hash_password_empty() {
        assert!(matches!(hash_password(""), Err(PasswordError::Empty)));
    }

    #[tokio::test]
    async fn test_verify_password_empty() {
        let hash = hash_password("secret").unwrap();

        assert!(!verify_password(&hash, "").unwrap());
    }

    #[tokio::test]
    async fn test_verify_password_invalid_hash() {
        let result = verify_password("not-a-phc-string", "secret");

        assert!(matches!(result, Err(PasswordError::InvalidHash(_))));
    }
}
