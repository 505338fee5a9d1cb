use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 6;

/// Email value object representing a customer's login address
///
/// # Invariants
/// - Must contain '@' with something on both sides
/// - Stored trimmed and lowercased, so lookups are case-insensitive
/// - Is immutable after construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// Creates a new Email value object
    ///
    /// # Returns
    /// * `Ok(Email)` - If email is valid
    /// * `Err(String)` - If email is invalid
    ///
    /// # Example
    /// ```
    /// use storefront_api::domain::user::value_objects::Email;
    ///
    /// let email = Email::new("  Shopper@Example.com ").expect("valid email");
    /// assert_eq!(email.as_str(), "shopper@example.com");
    /// ```
    pub fn new(email: impl Into<String>) -> Result<Self, String> {
        let email = email.into().trim().to_lowercase();
        if Self::is_valid(&email) {
            Ok(Email(email))
        } else {
            Err(format!("Invalid email: {}", email))
        }
    }

    fn is_valid(email: &str) -> bool {
        match email.split_once('@') {
            Some((local, domain)) => !local.is_empty() && !domain.is_empty(),
            None => false,
        }
    }

    /// Returns the email as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Plaintext password that passed the length policy
///
/// Never serialized and never printed.
pub struct Password(String);

impl Password {
    pub fn new(password: impl Into<String>) -> Result<Self, String> {
        let password = password.into();
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            ));
        }
        Ok(Password(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("Password(***)")
    }
}
