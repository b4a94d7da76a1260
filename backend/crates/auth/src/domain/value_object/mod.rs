//! Value Object Module

pub mod email;
