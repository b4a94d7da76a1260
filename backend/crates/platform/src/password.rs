//! Clear text password handling
//!
//! Passwords never get hashed here: the identity provider owns credential
//! storage. This module only holds the password for the duration of a request
//! (zeroized on drop) and enforces the sign-up policy:
//! - 8 to 72 characters
//! - at least one letter
//! - at least one digit

use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

// ============================================================================
// Constants
// ============================================================================

/// Minimum password length for new accounts
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length accepted by the identity provider (bcrypt limit)
pub const MAX_PASSWORD_LENGTH: usize = 72;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    /// Password is empty
    #[error("Password cannot be empty")]
    Empty,

    /// Password is too short
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    /// Password is too long
    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    /// No alphabetic character
    #[error("Password must contain at least one letter")]
    MissingLetter,

    /// No ASCII digit
    #[error("Password must contain at least one digit")]
    MissingDigit,

    /// Confirmation does not match
    #[error("Passwords do not match")]
    Mismatch,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Does not implement `Clone`; Debug output is redacted.
///
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("Secret123".to_string()).unwrap();
/// assert!(password.check_policy().is_ok());
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Wrap a raw password
    ///
    /// Only rejects empty input. Login accepts whatever the account was
    /// created with, so the sign-up policy is a separate step
    /// ([`ClearTextPassword::check_policy`]).
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        if raw.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }
        Ok(Self(raw))
    }

    /// Validate against the sign-up policy
    pub fn check_policy(&self) -> Result<(), PasswordPolicyError> {
        let char_count = self.0.chars().count();

        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if !self.0.chars().any(char::is_alphabetic) {
            return Err(PasswordPolicyError::MissingLetter);
        }

        if !self.0.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordPolicyError::MissingDigit);
        }

        Ok(())
    }

    /// Compare with the confirmation field
    pub fn check_confirmation(&self, confirmation: &str) -> Result<(), PasswordPolicyError> {
        if self.0 == confirmation {
            Ok(())
        } else {
            Err(PasswordPolicyError::Mismatch)
        }
    }

    /// Borrow the raw value for forwarding to the identity provider
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}
