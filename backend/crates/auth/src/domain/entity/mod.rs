//! Domain Entities

pub mod login_attempt;
pub mod profile;
