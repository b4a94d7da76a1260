//! Infrastructure Layer
//!
//! PostgreSQL repositories and the hosted Auth service client.

pub mod gotrue;
pub mod postgres;
