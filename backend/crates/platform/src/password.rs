//! Password Hashing and Verification
//!
//! Salted, one-way password storage:
//! - PBKDF2-HMAC-SHA1, 10,000 iterations, 64-byte derived key
//! - 16-byte random salt per credential, drawn from the OS CSPRNG
//! - Salt and derived key stored as standard base64 strings
//! - Constant-time comparison on verification
//! - Zeroization of clear text passwords on drop
//!
//! The parameters match the stored credentials this crate has to keep
//! verifying, so they are constants and not configuration.
//!
//! No length or complexity rule is applied while hashing. Callers that want
//! one apply [`PasswordPolicy`] before handing the password over.

use std::fmt;

use hmac::Hmac;
use sha1::Sha1;
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::{constant_time_eq, from_base64, random_bytes, to_base64};

// ============================================================================
// Constants
// ============================================================================

/// Salt length in bytes (before base64 encoding)
pub const SALT_LENGTH: usize = 16;

/// PBKDF2 iteration count
pub const PBKDF2_ITERATIONS: u32 = 10_000;

/// Derived key length in bytes (before base64 encoding)
pub const HASH_LENGTH: usize = 64;

/// Minimum password length used by [`PasswordPolicy::nist`] (NIST: SHALL be at least 8)
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length used by [`PasswordPolicy::nist`] (NIST: SHOULD permit at least 64)
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Failures of the random source or of the key derivation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// The operating system RNG could not produce bytes
    #[error("Random source unavailable: {0}")]
    RandomSource(String),

    /// Stored salt is not valid base64
    #[error("Invalid password salt encoding")]
    InvalidSalt,

    /// Stored hash is not valid base64
    #[error("Invalid password hash encoding")]
    InvalidHash,

    /// Key derivation primitive rejected its input
    #[error("Key derivation failed: {0}")]
    Derivation(String),
}

/// Password policy violation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    /// Control characters other than space, tab and newline
    #[error("Password contains invalid control characters")]
    InvalidCharacter,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// ## Security
/// - Implements `Zeroize` and `ZeroizeOnDrop`
/// - Does not implement `Clone` to prevent accidental copies
/// - Debug output is redacted
///
/// ## Examples
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("correct horse");
/// assert_eq!(format!("{:?}", password), "ClearTextPassword(\"[REDACTED]\")");
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Wrap a clear text password. The bytes are hashed exactly as given.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub(crate) fn as_str(&self) -> &str {
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

// ============================================================================
// Salt / Hashed Password (Safe to store)
// ============================================================================

/// Base64-encoded random salt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Salt(String);

impl Salt {
    /// Restore a stored salt, checking that it is valid base64
    pub fn from_base64(encoded: impl Into<String>) -> Result<Self, CryptoError> {
        let encoded = encoded.into();
        from_base64(&encoded).map_err(|_| CryptoError::InvalidSalt)?;
        Ok(Self(encoded))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn decode(&self) -> Result<Vec<u8>, CryptoError> {
        from_base64(&self.0).map_err(|_| CryptoError::InvalidSalt)
    }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Base64-encoded PBKDF2 output
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// Restore a stored hash, checking that it is valid base64
    pub fn from_base64(encoded: impl Into<String>) -> Result<Self, CryptoError> {
        let encoded = encoded.into();
        from_base64(&encoded).map_err(|_| CryptoError::InvalidHash)?;
        Ok(Self(encoded))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HashedPassword").field(&"[HASH]").finish()
    }
}

// ============================================================================
// Codec
// ============================================================================

/// Generate a fresh 16-byte salt from the OS CSPRNG
pub fn generate_salt() -> Result<Salt, CryptoError> {
    let bytes =
        random_bytes(SALT_LENGTH).map_err(|e| CryptoError::RandomSource(e.to_string()))?;
    Ok(Salt(to_base64(&bytes)))
}

/// Derive the stored hash for `password` under `salt`
///
/// Deterministic for a given (salt, password) pair. Intentionally slow.
pub fn hash_password(
    salt: &Salt,
    password: &ClearTextPassword,
) -> Result<HashedPassword, CryptoError> {
    let salt_bytes = salt.decode()?;
    let key = derive_key(password.as_bytes(), &salt_bytes, PBKDF2_ITERATIONS, HASH_LENGTH)?;
    Ok(HashedPassword(to_base64(&key)))
}

fn derive_key(
    password: &[u8],
    salt: &[u8],
    rounds: u32,
    len: usize,
) -> Result<Vec<u8>, CryptoError> {
    let mut key = vec![0u8; len];
    pbkdf2::pbkdf2::<Hmac<Sha1>>(password, salt, rounds, &mut key)
        .map_err(|e| CryptoError::Derivation(e.to_string()))?;
    Ok(key)
}

/// Salt and hash of one password, always held together
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordCredential {
    salt: Salt,
    hash: HashedPassword,
}

impl PasswordCredential {
    /// Hash `password` under a freshly generated salt
    pub fn generate(password: &ClearTextPassword) -> Result<Self, CryptoError> {
        let salt = generate_salt()?;
        let hash = hash_password(&salt, password)?;
        Ok(Self { salt, hash })
    }

    /// Restore a credential from its stored parts
    pub fn from_parts(salt: Salt, hash: HashedPassword) -> Self {
        Self { salt, hash }
    }

    pub fn salt(&self) -> &Salt {
        &self.salt
    }

    pub fn hash(&self) -> &HashedPassword {
        &self.hash
    }

    /// Check `candidate` against the stored hash
    ///
    /// Returns `false` when the derivation fails; never errors.
    pub fn verify(&self, candidate: &ClearTextPassword) -> bool {
        match hash_password(&self.salt, candidate) {
            Ok(computed) => {
                constant_time_eq(computed.as_str().as_bytes(), self.hash.as_str().as_bytes())
            }
            Err(_) => false,
        }
    }
}

// ============================================================================
// Policy (caller-level)
// ============================================================================

/// Length and character rules a caller may enforce before hashing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub max_length: usize,
}

impl PasswordPolicy {
    /// NIST SP 800-63B lengths (8..=128 code points)
    pub const fn nist() -> Self {
        Self {
            min_length: MIN_PASSWORD_LENGTH,
            max_length: MAX_PASSWORD_LENGTH,
        }
    }

    pub fn check(&self, password: &ClearTextPassword) -> Result<(), PasswordPolicyError> {
        let raw = password.as_str();

        if raw.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        // Count Unicode code points, not bytes
        let char_count = raw.chars().count();
        if char_count < self.min_length {
            return Err(PasswordPolicyError::TooShort {
                min: self.min_length,
                actual: char_count,
            });
        }
        if char_count > self.max_length {
            return Err(PasswordPolicyError::TooLong {
                max: self.max_length,
                actual: char_count,
            });
        }

        if raw
            .chars()
            .any(|ch| ch.is_control() && ch != '\t' && ch != '\n')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        Ok(())
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::nist()
    }
}

// ============================================================================
// Tests
// ============================================================================
