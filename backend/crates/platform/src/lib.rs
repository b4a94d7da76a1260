//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (SHA-256, Base64)
//! - Client identification and IP anonymisation (CIDR masking)
//! - Cookie management
//! - Password policy
//! - Rate limiting abstractions

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod password;
pub mod rate_limit;
