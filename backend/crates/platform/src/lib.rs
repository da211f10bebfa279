//! Platform Crate - Technical Infrastructure
//!
//! This crate provides the credential codec and the primitives under it:
//! - Cryptographic utilities (CSPRNG bytes, Base64, constant-time comparison)
//! - Password hashing (PBKDF2-HMAC-SHA1, per-credential salt)
//! - Optional password policy checks for callers that want one

pub mod crypto;
pub mod password;
