//! Password strength checks and hashing.

use std::fmt;

use bcrypt::{BcryptError, hash, verify};
use zxcvbn::{Score, feedback::Feedback, zxcvbn};

use crate::Error;

/// A password that zxcvbn scores as hard to guess, not yet hashed.
#[derive(Clone, PartialEq)]
pub struct ValidatedPassword(String);

impl ValidatedPassword {
    /// Check that `password` is strong enough to use.
    ///
    /// # Errors
    ///
    /// Returns [Error::TooWeak] with zxcvbn's advice for a stronger password
    /// if the score is below three.
    pub fn new(password: &str) -> Result<Self, Error> {
        let estimate = zxcvbn(password, &[]);

        if matches!(estimate.score(), Score::Three | Score::Four) {
            return Ok(Self(password.to_owned()));
        }

        let advice = estimate
            .feedback()
            .map(Feedback::to_string)
            .unwrap_or_default();

        Err(Error::TooWeak(advice))
    }

    /// Skip the strength check, for tests that need a fast, known password.
    #[cfg(test)]
    pub fn new_unchecked(password: &str) -> Self {
        Self(password.to_owned())
    }
}

/// Keeps the plain text password out of logs.
impl fmt::Debug for ValidatedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValidatedPassword(********)")
    }
}

/// A bcrypt hash of a [ValidatedPassword], as stored in the user table.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// The bcrypt cost to use outside of tests.
    pub const DEFAULT_COST: u32 = bcrypt::DEFAULT_COST;

    /// Hash `password` with `cost` rounds of bcrypt.
    ///
    /// # Errors
    ///
    /// Returns [Error::HashingError] if bcrypt fails.
    pub fn new(password: ValidatedPassword, cost: u32) -> Result<Self, Error> {
        hash(&password.0, cost)
            .map(Self)
            .map_err(|error| Error::HashingError(error.to_string()))
    }

    /// Wrap a hash read from the database.
    pub fn new_unchecked(stored_hash: &str) -> Self {
        Self(stored_hash.to_owned())
    }

    /// Whether `password` is the password this hash was made from.
    pub fn verify(&self, password: &str) -> Result<bool, BcryptError> {
        verify(password, &self.0)
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod validated_password_tests {
    use crate::{Error, auth::ValidatedPassword};

    #[test]
    fn rejects_empty_password() {
        let result = ValidatedPassword::new("");

        assert!(matches!(result, Err(Error::TooWeak(_))));
    }

    #[test]
    fn rejects_common_password_with_advice() {
        let Err(Error::TooWeak(advice)) = ValidatedPassword::new("password123") else {
            panic!("want a weak password error");
        };

        assert!(!advice.is_empty());
    }

    #[test]
    fn accepts_long_passphrase() {
        assert!(ValidatedPassword::new("correct horse battery staple 42!").is_ok());
    }

    #[test]
    fn debug_hides_password() {
        let password = ValidatedPassword::new_unchecked("hunter2");

        assert!(!format!("{password:?}").contains("hunter2"));
    }
}
