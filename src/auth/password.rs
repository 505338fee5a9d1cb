// Password hashing utilities
// bcrypt hashes; unit tests use the minimum cost to stay fast

use bcrypt::{hash, verify, DEFAULT_COST};

use crate::domain::user::value_objects::Password;

const HASH_COST: u32 = if cfg!(test) { 4 } else { DEFAULT_COST };

/// Hashes a validated password with bcrypt
///
/// # Returns
/// * `Ok(String)` - The bcrypt hash
/// * `Err(String)` - If hashing fails
///
/// # Example
/// ```
/// use storefront_api::auth::password::hash_password;
/// use storefront_api::domain::user::value_objects::Password;
///
/// let password = Password::new("my_password").unwrap();
/// let hash = hash_password(&password).expect("valid hash");
/// assert!(hash.starts_with("$2"));
/// ```
pub fn hash_password(password: &Password) -> Result<String, String> {
    hash(password.expose(), HASH_COST).map_err(|e| e.to_string())
}

/// Checks a login attempt against a stored hash
///
/// A malformed stored hash counts as a mismatch and is logged.
pub fn verify_password(candidate: &str, stored_hash: &str) -> bool {
    match verify(candidate, stored_hash) {
        Ok(matches) => matches,
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash could not be verified");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password(value: &str) -> Password {
        Password::new(value).expect("valid password")
    }

    #[test]
    fn hash_and_verify_password() {
        let hash = hash_password(&password("test_password_123")).expect("valid hash");

        assert!(verify_password("test_password_123", &hash));
    }

    #[test]
    fn verify_wrong_password() {
        let hash = hash_password(&password("test_password_123")).expect("valid hash");

        assert!(!verify_password("wrong_password", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let hash1 = hash_password(&password("test_password_123")).expect("valid hash");
        let hash2 = hash_password(&password("test_password_123")).expect("valid hash");

        assert_ne!(hash1, hash2);
        assert!(verify_password("test_password_123", &hash1));
        assert!(verify_password("test_password_123", &hash2));
    }

    #[test]
    fn malformed_hash_never_matches() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
    }
}
